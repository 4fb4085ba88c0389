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
    bitmap::Bitmap,
    buffer::Buffer,
    datatypes::{DataType, Field, PhysicalType},
    error::{Error, Result},
    scalar::Scalar,
};

use super::{check_physical_type, impl_common_array, Array, ArrayAccessor, ArrayData, ArrayIter};

mod mutable;
pub use mutable::*;

/// A [`StructArray`] is a nullable collection of named child arrays of the same length,
/// one per [`Field`]. Slot `i` of the struct is made of slot `offset + i` of every child.
/// # Example
/// ```
/// use columnar::array::{Array, BooleanArray, Int32Array, StructArray};
/// use columnar::datatypes::{DataType, Field};
///
/// let boolean: Array = BooleanArray::from_slice([false, false, true, true]).into();
/// let int: Array = Int32Array::from_slice([42, 28, 19, 31]).into();
///
/// let array = StructArray::try_from(vec![
///     (Field::new("b", DataType::Boolean, false), boolean),
///     (Field::new("c", DataType::Int32, false), int),
/// ])
/// .unwrap();
/// assert_eq!(array.len(), 4);
/// assert_eq!(array.fields()[1].name(), "c");
/// ```
#[derive(Clone)]
pub struct StructArray {
    data: ArrayData,
    values: Vec<Array>,
}

impl StructArray {
    /// Interprets `data` as a [`StructArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not a struct.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::Struct, "StructArray")?;
        let values = data
            .child_data()
            .iter()
            .cloned()
            .map(Array::try_new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { data, values })
    }

    /// Creates a new [`StructArray`] from its fields, children and optional validity.
    /// The length is the length of the first child, or 0 without children.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the children differ in length or in type from
    /// their fields.
    pub fn from_data(fields: Vec<Field>, values: Vec<Array>, validity: Option<Buffer>) -> Result<Self> {
        let len = values.first().map_or(0, |x| x.len());
        if let Some(child) = values.iter().position(|x| x.len() != len) {
            return Err(Error::oos(format!(
                "the child \"{}\" of a StructArray has {} slots, but the first child has {}",
                fields.get(child).map_or("", |f| f.name()),
                values[child].len(),
                len
            )));
        }
        Self::try_new(ArrayData::try_new(
            DataType::Struct(fields),
            len,
            validity,
            vec![],
            values.into_iter().map(|x| x.into_data()).collect(),
        )?)
    }

    /// The fields of this struct.
    pub fn fields(&self) -> &[Field] {
        match self.data.data_type() {
            DataType::Struct(fields) => fields,
            _ => unreachable!(),
        }
    }

    impl_common_array!();

    /// The children of this struct, not sliced: slot `i` of this array corresponds to
    /// slot `self.data().offset() + i` of every child.
    #[inline]
    pub fn values(&self) -> &[Array] {
        &self.values
    }

    /// The children of this struct sliced to the slots of this array.
    pub fn sliced_values(&self) -> Vec<Array> {
        let offset = self.data.offset();
        self.values
            .iter()
            .map(|x| x.slice(offset, self.len()))
            .collect()
    }

    /// Returns the values of every field at slot `i`, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn value(&self, i: usize) -> Vec<Scalar> {
        assert!(i < self.len());
        let index = self.data.offset() + i;
        self.values.iter().map(|x| x.scalar(index)).collect()
    }

    /// Returns an iterator over the slots of this array, [`None`] for null slots.
    pub fn iter(&self) -> ArrayIter<Self> {
        ArrayIter::new(self)
    }

    /// Returns a zero-copy slice of this array. The children are not sliced.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
            values: self.values.clone(),
        }
    }

    /// Deconstructs this array into its fields, sliced children and validity.
    pub fn into_parts(self) -> (Vec<Field>, Vec<Array>, Option<Bitmap>) {
        let values = self.sliced_values();
        let validity = self.validity();
        (self.fields().to_vec(), values, validity)
    }
}

impl<'a> ArrayAccessor<'a> for StructArray {
    type Item = Vec<Scalar>;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> Vec<Scalar> {
        StructArray::value(self, i)
    }
}

impl TryFrom<Vec<(Field, Array)>> for StructArray {
    type Error = Error;

    fn try_from(values: Vec<(Field, Array)>) -> Result<Self> {
        let (fields, values) = values.into_iter().unzip();
        Self::from_data(fields, values, None)
    }
}
