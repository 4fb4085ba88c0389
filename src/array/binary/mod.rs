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

use crate::{
    buffer::Buffer,
    datatypes::{DataType, PhysicalType},
    error::{Error, Result},
    types::Offset,
};

use super::{check_physical_type, impl_common_array, ArrayAccessor, ArrayData, ArrayIter, ArrayValuesIter};

mod mutable;
pub use mutable::*;
pub(crate) use mutable::MutableBinaryValues;

/// A [`BinaryArray`] is a nullable array of bytes, stored as an offsets buffer of `len + 1`
/// [`Offset`]s (`i32` or `i64`) into a contiguous values buffer.
/// # Example
/// ```
/// use columnar::array::BinaryArray;
///
/// let array = BinaryArray::<i32>::from(vec![Some(b"hi".as_ref()), None, Some(b"".as_ref())]);
/// assert_eq!(array.value(0), b"hi");
/// assert_eq!(array.offsets(), &[0, 2, 2, 2]);
/// ```
#[derive(Clone)]
pub struct BinaryArray<O: Offset> {
    data: ArrayData,
    phantom: std::marker::PhantomData<O>,
}

impl<O: Offset> BinaryArray<O> {
    /// The [`DataType`] of a [`BinaryArray`] with offsets `O`.
    pub fn default_data_type() -> DataType {
        if O::IS_LARGE {
            DataType::LargeBinary
        } else {
            DataType::Binary
        }
    }

    /// Interprets `data` as a [`BinaryArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not binary with offsets `O`.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        let expected = if O::IS_LARGE {
            PhysicalType::LargeBinary
        } else {
            PhysicalType::Binary
        };
        check_physical_type(&data, expected, "BinaryArray")?;
        Ok(Self {
            data,
            phantom: std::marker::PhantomData,
        })
    }

    /// Creates a new [`BinaryArray`] from its offsets, values and an optional validity.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the offsets are invalid.
    pub fn from_data(offsets: Buffer, values: Buffer, validity: Option<Buffer>) -> Result<Self> {
        let len = (offsets.len() / std::mem::size_of::<O>())
            .checked_sub(1)
            .ok_or_else(|| Error::oos("offsets must have at least one element"))?;
        Self::try_new(ArrayData::try_new(
            Self::default_data_type(),
            len,
            validity,
            vec![offsets, values],
            vec![],
        )?)
    }

    /// Creates a new [`BinaryArray`] without nulls from a slice of byte slices.
    pub fn from_slice<T: AsRef<[u8]>, P: AsRef<[T]>>(slice: P) -> Self {
        let mut array = MutableBinaryArray::<O>::new();
        slice
            .as_ref()
            .iter()
            .for_each(|x| array.push(Some(x.as_ref())));
        array.finish()
    }

    impl_common_array!();

    /// The `len + 1` offsets of this array.
    #[inline]
    pub fn offsets(&self) -> &[O] {
        self.data.offsets::<O>()
    }

    /// The values buffer of this array, shared by every slot.
    #[inline]
    pub fn values(&self) -> &[u8] {
        self.data.buffers()[1].as_slice()
    }

    /// Returns the bytes at slot `i`, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> &[u8] {
        assert!(i < self.len());
        let offsets = self.offsets();
        &self.values()[offsets[i].to_usize()..offsets[i + 1].to_usize()]
    }

    /// Returns an iterator over the slots of this array, [`None`] for null slots.
    pub fn iter(&self) -> ArrayIter<Self> {
        ArrayIter::new(self)
    }

    /// Returns an iterator over the values of this array, ignoring validity.
    pub fn values_iter(&self) -> ArrayValuesIter<Self> {
        ArrayValuesIter::new(self)
    }

    /// Returns a zero-copy slice of this array.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
            phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, O: Offset> ArrayAccessor<'a> for BinaryArray<O> {
    type Item = &'a [u8];

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> &'a [u8] {
        BinaryArray::value(self, i)
    }
}

impl<'a, O: Offset> IntoIterator for &'a BinaryArray<O> {
    type Item = Option<&'a [u8]>;
    type IntoIter = ArrayIter<'a, BinaryArray<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<O: Offset, T: AsRef<[u8]>> From<Vec<Option<T>>> for BinaryArray<O> {
    fn from(values: Vec<Option<T>>) -> Self {
        values.into_iter().collect()
    }
}

impl<O: Offset, T: AsRef<[u8]>> FromIterator<Option<T>> for BinaryArray<O> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let mut array = MutableBinaryArray::<O>::new();
        iter.into_iter()
            .for_each(|x| array.push(x.as_ref().map(|x| x.as_ref())));
        array.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliced_offsets() {
        let array = BinaryArray::<i64>::from_slice([b"a".as_ref(), b"bc", b"def"]);
        assert_eq!(array.data_type(), &DataType::LargeBinary);
        let sliced = array.slice(1, 2);
        assert_eq!(sliced.offsets(), &[1, 3, 6]);
        assert_eq!(sliced.value(1), b"def");
        assert_eq!(
            sliced.iter().collect::<Vec<_>>(),
            vec![Some(b"bc".as_ref()), Some(b"def".as_ref())]
        );
    }

    #[test]
    fn invalid_offsets() {
        let offsets = Buffer::from_slice_ref(&[0i32, 3, 2]);
        let values = Buffer::from(b"abc");
        assert!(matches!(
            BinaryArray::<i32>::from_data(offsets, values, None),
            Err(Error::Layout(_))
        ));
    }
}
