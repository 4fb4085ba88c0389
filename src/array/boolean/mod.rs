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
    bitmap::{utils::get_bit, Bitmap, MutableBitmap},
    datatypes::{DataType, PhysicalType},
    error::{Error, Result},
};

use super::{check_physical_type, impl_common_array, ArrayAccessor, ArrayData, ArrayIter, ArrayValuesIter};

mod mutable;
pub use mutable::*;

/// A [`BooleanArray`] is a nullable array of booleans, stored as a bitmap of values.
/// # Example
/// ```
/// use columnar::array::BooleanArray;
///
/// let array = BooleanArray::from(vec![Some(true), None, Some(false)]);
/// assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(true), None, Some(false)]);
/// assert!(array.value(0));
/// ```
#[derive(Clone)]
pub struct BooleanArray {
    data: ArrayData,
}

impl BooleanArray {
    /// Interprets `data` as a [`BooleanArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not boolean.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::Boolean, "BooleanArray")?;
        Ok(Self { data })
    }

    /// Creates a new [`BooleanArray`] from a [`Bitmap`] of values and an optional validity.
    /// # Errors
    /// Errors iff `validity` is shorter than `values`.
    pub fn from_data(values: Bitmap, validity: Option<Bitmap>) -> Result<Self> {
        let len = values.len();
        if validity.as_ref().map_or(false, |v| v.len() != len) {
            return Err(Error::oos(
                "the validity of a BooleanArray must have the same length as its values",
            ));
        }
        Self::try_new(ArrayData::try_new(
            DataType::Boolean,
            len,
            validity.map(|v| v.to_aligned_buffer()),
            vec![values.to_aligned_buffer()],
            vec![],
        )?)
    }

    /// Creates a new [`BooleanArray`] without nulls from a slice of booleans.
    pub fn from_slice<P: AsRef<[bool]>>(slice: P) -> Self {
        let values = slice.as_ref().iter().copied().collect::<MutableBitmap>();
        let len = values.len();
        // Safety: a bitmap of `len` bits
        let data = unsafe {
            ArrayData::new_unchecked(
                DataType::Boolean,
                len,
                0,
                0,
                None,
                vec![values.into_buffer()],
                vec![],
            )
        };
        Self { data }
    }

    impl_common_array!();

    /// Returns the value at slot `i`, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> bool {
        assert!(i < self.len());
        get_bit(&self.data.buffers()[0], self.data.offset() + i)
    }

    /// The values of this array as a [`Bitmap`], including those of null slots.
    pub fn values(&self) -> Bitmap {
        Bitmap::try_new(self.data.buffers()[0].clone(), self.data.offset() + self.len())
            .map(|bitmap| bitmap.slice(self.data.offset(), self.len()))
            .unwrap_or_default()
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
        }
    }
}

impl<'a> ArrayAccessor<'a> for BooleanArray {
    type Item = bool;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> bool {
        BooleanArray::value(self, i)
    }
}

impl<'a> IntoIterator for &'a BooleanArray {
    type Item = Option<bool>;
    type IntoIter = ArrayIter<'a, BooleanArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Option<bool>>> for BooleanArray {
    fn from(values: Vec<Option<bool>>) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<Option<bool>> for BooleanArray {
    fn from_iter<I: IntoIterator<Item = Option<bool>>>(iter: I) -> Self {
        let mut array = MutableBooleanArray::new();
        array.extend(iter);
        array.finish()
    }
}
