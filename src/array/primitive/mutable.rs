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
    datatypes::{DataType, PhysicalType},
    types::NativeType,
};

use super::PrimitiveArray;

/// The mutable version of [`PrimitiveArray`]. See [`MutableArray`] for more details.
///
/// The validity is only allocated once the first null is pushed.
#[derive(Debug)]
pub struct MutablePrimitiveArray<T: NativeType> {
    data_type: DataType,
    values: MutableBuffer,
    validity: Option<MutableBitmap>,
    len: usize,
    phantom: std::marker::PhantomData<T>,
}

impl<T: NativeType> MutablePrimitiveArray<T> {
    /// Creates a new empty [`MutablePrimitiveArray`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new [`MutablePrimitiveArray`] with a capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data_type: T::DATA_TYPE,
            values: MutableBuffer::with_capacity(capacity * std::mem::size_of::<T>()),
            validity: None,
            len: 0,
            phantom: std::marker::PhantomData,
        }
    }

    /// Changes the arrays' [`DataType`], returning a new [`MutablePrimitiveArray`].
    /// Use to change the logical type without changing the corresponding physical Type.
    /// # Panics
    /// Panics iff the physical type of `data_type` is not `T`.
    pub fn to(self, data_type: DataType) -> Self {
        assert_eq!(
            data_type.to_physical_type(),
            PhysicalType::Primitive(T::PRIMITIVE)
        );
        Self { data_type, ..self }
    }

    /// Reserves `additional` slots.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional * std::mem::size_of::<T>());
        if let Some(x) = self.validity.as_mut() {
            x.reserve(additional)
        }
    }

    /// Adds a new slot to the array.
    #[inline]
    pub fn push(&mut self, value: Option<T>) {
        match value {
            Some(value) => {
                self.values.push(value);
                if let Some(validity) = &mut self.validity {
                    validity.push(true)
                }
            }
            None => {
                self.values.push(T::default());
                match &mut self.validity {
                    Some(validity) => validity.push(false),
                    None => self.init_validity(),
                }
            }
        }
        self.len += 1;
    }

    /// Adds a new null slot.
    #[inline]
    pub fn push_null(&mut self) {
        self.push(None)
    }

    /// Appends a slice of valid values.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.values.extend_from_slice(items);
        if let Some(validity) = &mut self.validity {
            validity.extend_constant(items.len(), true)
        }
        self.len += items.len();
    }

    // called right before the first null is added
    fn init_validity(&mut self) {
        let mut validity = MutableBitmap::with_capacity(self.values.capacity());
        validity.extend_constant(self.len, true);
        validity.push(false);
        self.validity = Some(validity)
    }

    /// The values pushed so far.
    pub fn values(&self) -> &[T] {
        // Safety: the buffer is 64-aligned and holds `len` values of `T`
        unsafe { std::slice::from_raw_parts(self.values.as_ptr() as *const T, self.len) }
    }

    /// Freezes the pushed slots into a [`PrimitiveArray`] and resets this builder to empty.
    pub fn finish(&mut self) -> PrimitiveArray<T> {
        let len = std::mem::take(&mut self.len);
        let values = std::mem::take(&mut self.values);
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());

        // Safety: `len` values and, when present, a bitmap of `len` bits whose unset bits
        // were just counted
        let data = unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![values.into()],
                vec![],
            )
        };
        PrimitiveArray {
            data,
            phantom: std::marker::PhantomData,
        }
    }
}

impl<T: NativeType> Default for MutablePrimitiveArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NativeType> Extend<Option<T>> for MutablePrimitiveArray<T> {
    fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(|x| self.push(x))
    }
}

impl<T: NativeType> FromIterator<Option<T>> for MutablePrimitiveArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: NativeType> MutableArray for MutablePrimitiveArray<T> {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_null(&mut self) {
        self.push(None)
    }

    fn as_array(&mut self) -> Array {
        Array::try_new(self.finish().into_data()).unwrap_or_else(|_| unreachable!())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}
