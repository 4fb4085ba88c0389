// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::any::Any;

use crate::{
    array::{Array, ArrayData, MutableArray},
    bitmap::{Bitmap, MutableBitmap},
    buffer::MutableBuffer,
    datatypes::DataType,
    error::{Error, Result},
    types::Offset,
};

use super::BinaryArray;

/// Offsets, values and validity shared by the builders of variable-length arrays.
#[derive(Debug)]
pub(crate) struct MutableBinaryValues<O: Offset> {
    data_type: DataType,
    offsets: MutableBuffer,
    values: MutableBuffer,
    validity: Option<MutableBitmap>,
    len: usize,
    phantom: std::marker::PhantomData<O>,
}

impl<O: Offset> MutableBinaryValues<O> {
    pub fn with_capacities(data_type: DataType, capacity: usize, values: usize) -> Self {
        let mut offsets = MutableBuffer::with_capacity((capacity + 1) * std::mem::size_of::<O>());
        offsets.push(O::zero());
        Self {
            data_type,
            offsets,
            values: MutableBuffer::with_capacity(values),
            validity: None,
            len: 0,
            phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn reserve(&mut self, additional: usize, additional_values: usize) {
        self.offsets.reserve(additional * std::mem::size_of::<O>());
        self.values.reserve(additional_values);
        if let Some(x) = self.validity.as_mut() {
            x.reserve(additional)
        }
    }

    /// Pushes a new slot.
    /// # Errors
    /// Errors with [`Error::Overflow`] iff the total length of the values does not fit in `O`.
    pub fn try_push(&mut self, value: Option<&[u8]>) -> Result<()> {
        let bytes = value.unwrap_or_default();
        let end = self
            .values
            .len()
            .checked_add(bytes.len())
            .and_then(O::from_usize)
            .ok_or(Error::Overflow)?;
        self.values.extend_from_slice(bytes);
        self.offsets.push(end);
        match (value.is_some(), &mut self.validity) {
            (true, Some(validity)) => validity.push(true),
            (true, None) => {}
            (false, Some(validity)) => validity.push(false),
            (false, None) => {
                let mut validity = MutableBitmap::with_capacity(self.len + 1);
                validity.extend_constant(self.len, true);
                validity.push(false);
                self.validity = Some(validity)
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Freezes into an [`ArrayData`] and resets to empty.
    pub fn finish(&mut self) -> ArrayData {
        let len = std::mem::take(&mut self.len);
        let offsets = std::mem::take(&mut self.offsets);
        self.offsets.push(O::zero());
        let values = std::mem::take(&mut self.values);
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());

        // Safety: `len + 1` monotonic offsets ending at the length of `values`, and a bitmap
        // of `len` bits. Utf8 builders only push `&str`, so the values are valid utf8
        unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![offsets.into(), values.into()],
                vec![],
            )
        }
    }
}

/// The mutable version of [`BinaryArray`]. See [`MutableArray`] for more details.
#[derive(Debug)]
pub struct MutableBinaryArray<O: Offset> {
    values: MutableBinaryValues<O>,
}

impl<O: Offset> MutableBinaryArray<O> {
    /// Creates a new empty [`MutableBinaryArray`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new [`MutableBinaryArray`] with a capacity of slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacities(capacity, 0)
    }

    /// Creates a new [`MutableBinaryArray`] with capacities of slots and of value bytes.
    pub fn with_capacities(capacity: usize, values: usize) -> Self {
        Self {
            values: MutableBinaryValues::with_capacities(
                BinaryArray::<O>::default_data_type(),
                capacity,
                values,
            ),
        }
    }

    /// Reserves `additional` slots and `additional_values` bytes.
    pub fn reserve(&mut self, additional: usize, additional_values: usize) {
        self.values.reserve(additional, additional_values)
    }

    /// Pushes a new slot.
    /// # Errors
    /// Errors with [`Error::Overflow`] iff the total length of the values does not fit in `O`.
    pub fn try_push<T: AsRef<[u8]>>(&mut self, value: Option<T>) -> Result<()> {
        self.values.try_push(value.as_ref().map(|x| x.as_ref()))
    }

    /// Pushes a new slot.
    /// # Panics
    /// Panics iff the total length of the values does not fit in `O`.
    pub fn push<T: AsRef<[u8]>>(&mut self, value: Option<T>) {
        self.try_push(value).unwrap()
    }

    /// Freezes the pushed slots into a [`BinaryArray`] and resets this builder to empty.
    pub fn finish(&mut self) -> BinaryArray<O> {
        BinaryArray {
            data: self.values.finish(),
            phantom: std::marker::PhantomData,
        }
    }
}

impl<O: Offset> Default for MutableBinaryArray<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Offset, T: AsRef<[u8]>> Extend<Option<T>> for MutableBinaryArray<O> {
    fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0, 0);
        iter.for_each(|x| self.push(x))
    }
}

impl<O: Offset> MutableArray for MutableBinaryArray<O> {
    fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn push_null(&mut self) {
        self.push(None::<&[u8]>)
    }

    fn as_array(&mut self) -> Array {
        Array::try_new(self.values.finish()).unwrap_or_else(|_| unreachable!())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_reset() {
        let mut array = MutableBinaryArray::<i32>::new();
        array.push(Some(b"ab"));
        array.push_null();
        array.push(Some(b"c"));
        let first = array.finish();
        assert_eq!(first.offsets(), &[0, 2, 2, 3]);
        assert_eq!(first.null_count(), 1);

        array.push(Some(b"xyz"));
        let second = array.finish();
        assert_eq!(second.offsets(), &[0, 3]);
        assert_eq!(second.value(0), b"xyz");
        assert_eq!(first.value(0), b"ab");
    }
}
