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
    datatypes::{DataType, IntegerType},
    error::{Error, Result},
    scalar::Scalar,
    types::DictionaryKey,
};

use super::{dictionary_key_type, impl_common_array, Array, ArrayAccessor, ArrayData, ArrayIter};

mod mutable;
pub use mutable::*;

/// A [`DictionaryArray`] is a nullable array of integer keys, each pointing to a slot of a
/// child array of values. The validity of the array is the validity of its keys.
///
/// Slicing a [`DictionaryArray`] slices its keys; its values are never sliced.
/// # Example
/// ```
/// use columnar::array::{DictionaryArray, Int8Array, Utf8Array};
/// use columnar::scalar::Scalar;
///
/// let keys = Int8Array::from(vec![Some(1), None, Some(0), Some(1)]);
/// let values = Utf8Array::<i32>::from_slice(["a", "b"]);
/// let array = DictionaryArray::from_data(keys.into(), values.into()).unwrap();
/// assert_eq!(array.key(0), Some(1));
/// assert_eq!(array.value(0), Scalar::from("b"));
/// assert_eq!(array.value(1), Scalar::Null);
/// ```
#[derive(Clone)]
pub struct DictionaryArray {
    data: ArrayData,
    keys: Box<Array>,
    values: Box<Array>,
}

impl DictionaryArray {
    /// Interprets `data` as a [`DictionaryArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not a dictionary.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        let key_type = dictionary_key_type(data.data_type()).ok_or_else(|| {
            Error::TypeMismatch(format!(
                "DictionaryArray can only be built from dictionary data, but the data type is {:?}",
                data.data_type()
            ))
        })?;
        // Safety: the keys of a valid dictionary are a valid array of the key type
        let keys = unsafe {
            ArrayData::new_unchecked(
                key_type.into(),
                data.len(),
                data.offset(),
                data.null_count(),
                data.validity().cloned(),
                data.buffers().to_vec(),
                vec![],
            )
        };
        let keys = Array::try_new(keys)?;
        let values = Array::try_new(data.child_data()[0].clone())?;
        Ok(Self {
            data,
            keys: Box::new(keys),
            values: Box::new(values),
        })
    }

    /// Creates a new [`DictionaryArray`] from integer keys and values.
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `keys` is not an integer array and with
    /// [`Error::Layout`] iff a valid key is out of bounds of `values`.
    pub fn from_data(keys: Array, values: Array) -> Result<Self> {
        let key_type = integer_type(keys.data_type())?;
        let data_type = DataType::Dictionary(key_type, Box::new(values.data_type().clone()), false);
        let keys = keys.into_data();
        let data = ArrayData::builder(data_type)
            .len(keys.len())
            .offset(keys.offset())
            .null_bit_buffer(keys.validity().cloned())
            .buffers(keys.buffers().to_vec())
            .add_child_data(values.into_data())
            .build()?;
        Self::try_new(data)
    }

    /// The [`IntegerType`] of the keys.
    pub fn key_type(&self) -> IntegerType {
        match self.data.data_type() {
            DataType::Dictionary(key, _, _) => *key,
            _ => unreachable!(),
        }
    }

    /// Whether the values are declared sorted.
    pub fn is_ordered(&self) -> bool {
        match self.data.data_type() {
            DataType::Dictionary(_, _, is_ordered) => *is_ordered,
            _ => unreachable!(),
        }
    }

    impl_common_array!();

    /// The keys of this array, an integer array with the validity of this array.
    #[inline]
    pub fn keys(&self) -> &Array {
        &self.keys
    }

    /// The values of this array, not sliced.
    #[inline]
    pub fn values(&self) -> &Array {
        &self.values
    }

    /// The key at slot `i`, [`None`] when the slot is null.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn key(&self, i: usize) -> Option<usize> {
        if self.is_null(i) {
            return None;
        }
        match self.keys.as_ref() {
            Array::Int8(a) => a.value(i).as_usize(),
            Array::Int16(a) => a.value(i).as_usize(),
            Array::Int32(a) => a.value(i).as_usize(),
            Array::Int64(a) => a.value(i).as_usize(),
            Array::UInt8(a) => a.value(i).as_usize(),
            Array::UInt16(a) => a.value(i).as_usize(),
            Array::UInt32(a) => a.value(i).as_usize(),
            Array::UInt64(a) => a.value(i).as_usize(),
            _ => unreachable!(),
        }
    }

    /// The value the key at slot `i` points to, [`Scalar::Null`] when the slot is null.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn value(&self, i: usize) -> Scalar {
        self.key(i)
            .map_or(Scalar::Null, |key| self.values.scalar(key))
    }

    /// Returns an iterator over the slots of this array, [`None`] for null slots.
    pub fn iter(&self) -> ArrayIter<Self> {
        ArrayIter::new(self)
    }

    /// Returns a zero-copy slice of this array.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
            keys: Box::new(self.keys.slice(offset, length)),
            values: self.values.clone(),
        }
    }
}

impl<'a> ArrayAccessor<'a> for DictionaryArray {
    type Item = Scalar;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> Scalar {
        DictionaryArray::value(self, i)
    }
}

fn integer_type(data_type: &DataType) -> Result<IntegerType> {
    Ok(match data_type {
        DataType::Int8 => IntegerType::Int8,
        DataType::Int16 => IntegerType::Int16,
        DataType::Int32 => IntegerType::Int32,
        DataType::Int64 => IntegerType::Int64,
        DataType::UInt8 => IntegerType::UInt8,
        DataType::UInt16 => IntegerType::UInt16,
        DataType::UInt32 => IntegerType::UInt32,
        DataType::UInt64 => IntegerType::UInt64,
        other => {
            return Err(Error::TypeMismatch(format!(
                "dictionary keys must be integers, but they are of type {:?}",
                other
            )))
        }
    })
}
