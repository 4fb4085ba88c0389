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
    types::Offset,
};

use super::{check_physical_type, impl_common_array, Array, ArrayAccessor, ArrayData, ArrayIter};

mod mutable;
pub use mutable::*;

/// A [`ListArray`] is a nullable array of lists, where every list is a slice of a single
/// child array delimited by an offsets buffer of `len + 1` [`Offset`]s.
#[derive(Clone)]
pub struct ListArray<O: Offset> {
    data: ArrayData,
    values: Box<Array>,
    phantom: std::marker::PhantomData<O>,
}

impl<O: Offset> ListArray<O> {
    /// The [`DataType`] of a [`ListArray`] whose items are nullable values of `data_type`.
    pub fn default_datatype(data_type: DataType) -> DataType {
        let field = Box::new(Field::new("item", data_type, true));
        if O::IS_LARGE {
            DataType::LargeList(field)
        } else {
            DataType::List(field)
        }
    }

    /// Interprets `data` as a [`ListArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not a list with offsets `O`.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        let expected = if O::IS_LARGE {
            PhysicalType::LargeList
        } else {
            PhysicalType::List
        };
        check_physical_type(&data, expected, "ListArray")?;
        let values = Array::try_new(data.child_data()[0].clone())?;
        Ok(Self {
            data,
            values: Box::new(values),
            phantom: std::marker::PhantomData,
        })
    }

    /// Creates a new [`ListArray`] of `data_type` from its offsets, values and optional validity.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the offsets are out of bounds of `values`, or the
    /// type of `values` differs from the item type of `data_type`.
    pub fn from_data(
        data_type: DataType,
        offsets: Buffer,
        values: Array,
        validity: Option<Buffer>,
    ) -> Result<Self> {
        let len = (offsets.len() / std::mem::size_of::<O>())
            .checked_sub(1)
            .ok_or_else(|| Error::oos("offsets must have at least one element"))?;
        Self::try_new(ArrayData::try_new(
            data_type,
            len,
            validity,
            vec![offsets],
            vec![values.into_data()],
        )?)
    }

    /// The field describing the items of this list.
    pub fn field(&self) -> &Field {
        match self.data.data_type() {
            DataType::List(field) | DataType::LargeList(field) => field,
            _ => unreachable!(),
        }
    }

    impl_common_array!();

    /// The `len + 1` offsets of this array.
    #[inline]
    pub fn offsets(&self) -> &[O] {
        self.data.offsets::<O>()
    }

    /// The child array of items, shared by every slot.
    #[inline]
    pub fn values(&self) -> &Array {
        &self.values
    }

    /// Returns the list at slot `i` as a zero-copy slice of [`ListArray::values`],
    /// ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> Array {
        assert!(i < self.len());
        let offsets = self.offsets();
        let start = offsets[i].to_usize();
        let end = offsets[i + 1].to_usize();
        self.values.slice(start, end - start)
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
            phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, O: Offset> ArrayAccessor<'a> for ListArray<O> {
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
        ListArray::value(self, i)
    }
}

impl<'a, O: Offset> IntoIterator for &'a ListArray<O> {
    type Item = Option<Array>;
    type IntoIter = ArrayIter<'a, ListArray<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Int32Array;

    #[test]
    fn values_are_slices() {
        let values: Array = Int32Array::from_slice([1, 2, 3, 4, 5]).into();
        let array = ListArray::<i32>::from_data(
            ListArray::<i32>::default_datatype(DataType::Int32),
            Buffer::from_slice_ref(&[0i32, 2, 2, 5]),
            values,
            Some(Buffer::from(&[0b101u8])),
        )
        .unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);

        let last = array.value(2);
        let last = last.downcast_ref::<Int32Array>().unwrap();
        assert_eq!(last.values(), &[3, 4, 5]);

        let sliced = array.slice(1, 2);
        assert!(sliced.is_null(0));
        assert_eq!(sliced.offsets(), &[2, 2, 5]);
        assert_eq!(sliced.value(1).len(), 3);
    }

    #[test]
    fn offsets_out_of_bounds() {
        let values: Array = Int32Array::from_slice([1, 2]).into();
        let result = ListArray::<i32>::from_data(
            ListArray::<i32>::default_datatype(DataType::Int32),
            Buffer::from_slice_ref(&[0i32, 3]),
            values,
            None,
        );
        assert!(matches!(result, Err(Error::Layout(_))));
    }
}
