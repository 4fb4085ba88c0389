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
    datatypes::{DataType, Field, PhysicalType},
    error::{Error, Result},
};

use super::{check_physical_type, impl_common_array, Array, ArrayAccessor, ArrayData, ArrayIter};

mod mutable;
pub use mutable::*;

/// A [`FixedSizeListArray`] is a nullable array of lists of the same size, whose items are
/// stored contiguously in a single child array: slot `i` spans child slots
/// `[(offset + i) * size, (offset + i + 1) * size)`.
#[derive(Clone)]
pub struct FixedSizeListArray {
    data: ArrayData,
    values: Box<Array>,
    size: usize,
}

impl FixedSizeListArray {
    /// The [`DataType`] of a [`FixedSizeListArray`] of `size` nullable items of `data_type`.
    pub fn default_datatype(data_type: DataType, size: usize) -> DataType {
        DataType::FixedSizeList(Box::new(Field::new("item", data_type, true)), size)
    }

    /// Interprets `data` as a [`FixedSizeListArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not a fixed-size list.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::FixedSizeList, "FixedSizeListArray")?;
        let size = match data.data_type() {
            DataType::FixedSizeList(_, size) => *size,
            _ => unreachable!(),
        };
        let values = Array::try_new(data.child_data()[0].clone())?;
        Ok(Self {
            data,
            values: Box::new(values),
            size,
        })
    }

    /// Creates a new [`FixedSizeListArray`] of `data_type` from its values and optional validity.
    /// The number of slots is the number of values divided by the size.
    /// # Errors
    /// Errors iff `data_type` is not a fixed-size list of the type of `values` or the size is 0.
    pub fn from_data(data_type: DataType, values: Array, validity: Option<Buffer>) -> Result<Self> {
        let size = match &data_type {
            DataType::FixedSizeList(_, size) => *size,
            _ => {
                return Err(Error::TypeMismatch(format!(
                    "a FixedSizeListArray cannot be of type {:?}",
                    data_type
                )))
            }
        };
        if size == 0 {
            return Err(Error::oos("the size of a fixed-size list must be positive"));
        }
        let len = values.len() / size;
        Self::try_new(ArrayData::try_new(
            data_type,
            len,
            validity,
            vec![],
            vec![values.into_data()],
        )?)
    }

    /// The field describing the items of this list.
    pub fn field(&self) -> &Field {
        match self.data.data_type() {
            DataType::FixedSizeList(field, _) => field,
            _ => unreachable!(),
        }
    }

    /// The number of items of every list.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    impl_common_array!();

    /// The child array of items, shared by every slot.
    #[inline]
    pub fn values(&self) -> &Array {
        &self.values
    }

    /// Returns the list at slot `i` as a zero-copy slice of the child, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> Array {
        assert!(i < self.len());
        self.values
            .slice((self.data.offset() + i) * self.size, self.size)
    }

    /// Returns an iterator over the slots of this array, [`None`] for null slots.
    pub fn iter(&self) -> ArrayIter<Self> {
        ArrayIter::new(self)
    }

    /// Returns a zero-copy slice of this array. The child is not sliced.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
            values: self.values.clone(),
            size: self.size,
        }
    }
}

impl<'a> ArrayAccessor<'a> for FixedSizeListArray {
    type Item = Array;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> Array {
        FixedSizeListArray::value(self, i)
    }
}
