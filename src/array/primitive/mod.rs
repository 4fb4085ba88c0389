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
    types::NativeType,
};

use super::{check_physical_type, impl_common_array, ArrayAccessor, ArrayData, ArrayIter, ArrayValuesIter};

mod mutable;
pub use mutable::*;

/// A [`PrimitiveArray`] is a nullable array of a [`NativeType`] (e.g. `i32`), backed by one
/// buffer of contiguous values. Its logical [`DataType`] may be any type whose physical
/// representation is `T`, e.g. [`DataType::Date32`] for `i32`.
///
/// # Example
/// ```
/// use columnar::array::PrimitiveArray;
///
/// let array = PrimitiveArray::from(vec![Some(1i32), None, Some(10)]);
/// assert_eq!(array.value(0), 1);
/// assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(1), None, Some(10)]);
/// assert_eq!(array.values(), &[1, 0, 10]);
/// // the array has no validity when all slots are valid
/// assert!(PrimitiveArray::from_slice([1i32, 2]).validity().is_none());
/// ```
#[derive(Clone)]
pub struct PrimitiveArray<T: NativeType> {
    data: ArrayData,
    phantom: std::marker::PhantomData<T>,
}

impl<T: NativeType> PrimitiveArray<T> {
    /// Interprets `data` as a [`PrimitiveArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff the physical type of `data` is not `T`.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::Primitive(T::PRIMITIVE), "PrimitiveArray")?;
        Ok(Self {
            data,
            phantom: std::marker::PhantomData,
        })
    }

    /// Creates a new [`PrimitiveArray`] of `data_type` from its values and optional validity.
    /// # Errors
    /// Errors iff the physical type of `data_type` is not `T`, or the validity is shorter
    /// than the values.
    pub fn try_from_data(
        data_type: DataType,
        values: Buffer,
        validity: Option<Buffer>,
    ) -> Result<Self> {
        let len = values.len() / std::mem::size_of::<T>();
        if data_type.to_physical_type() != PhysicalType::Primitive(T::PRIMITIVE) {
            return Err(Error::TypeMismatch(format!(
                "a PrimitiveArray of {:?} cannot have the logical type {:?}",
                T::PRIMITIVE,
                data_type
            )));
        }
        Self::try_new(ArrayData::try_new(
            data_type,
            len,
            validity,
            vec![values],
            vec![],
        )?)
    }

    /// Creates a new [`PrimitiveArray`] without nulls from a slice of values.
    pub fn from_slice<P: AsRef<[T]>>(slice: P) -> Self {
        Self::from_vec(slice.as_ref().to_vec())
    }

    /// Creates a new [`PrimitiveArray`] without nulls from a vector of values.
    pub fn from_vec(values: Vec<T>) -> Self {
        let len = values.len();
        // Safety: a buffer of `len` values of `T` of the natural type of `T`
        let data = unsafe {
            ArrayData::new_unchecked(
                T::DATA_TYPE,
                len,
                0,
                0,
                None,
                vec![Buffer::from_vec(values)],
                vec![],
            )
        };
        Self {
            data,
            phantom: std::marker::PhantomData,
        }
    }

    /// Returns a [`PrimitiveArray`] of `len` nulls.
    pub fn new_null(data_type: DataType, len: usize) -> Self {
        let mut array = MutablePrimitiveArray::<T>::with_capacity(len).to(data_type);
        (0..len).for_each(|_| array.push_null());
        array.finish()
    }

    /// Returns this array with a new logical [`DataType`] of the same physical type.
    /// # Panics
    /// Panics iff the physical type of `data_type` is not `T`.
    pub fn to(self, data_type: DataType) -> Self {
        assert_eq!(
            data_type.to_physical_type(),
            PhysicalType::Primitive(T::PRIMITIVE),
            "a PrimitiveArray of {:?} cannot have the logical type {:?}",
            T::PRIMITIVE,
            data_type
        );
        let data = &self.data;
        // Safety: the physical layout is unchanged
        let data = unsafe {
            ArrayData::new_unchecked(
                data_type,
                data.len(),
                data.offset(),
                data.null_count(),
                data.validity().cloned(),
                data.buffers().to_vec(),
                vec![],
            )
        };
        Self {
            data,
            phantom: std::marker::PhantomData,
        }
    }

    impl_common_array!();

    /// The values of this array, including the (undefined) values of null slots.
    #[inline]
    pub fn values(&self) -> &[T] {
        let offset = self.data.offset();
        &self.data.buffer::<T>(0)[offset..offset + self.data.len()]
    }

    /// Returns the value at slot `i`, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> T {
        self.values()[i]
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

impl<'a, T: NativeType> ArrayAccessor<'a> for PrimitiveArray<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> T {
        self.values()[i]
    }
}

impl<'a, T: NativeType> IntoIterator for &'a PrimitiveArray<T> {
    type Item = Option<T>;
    type IntoIter = ArrayIter<'a, PrimitiveArray<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: NativeType> From<Vec<Option<T>>> for PrimitiveArray<T> {
    fn from(values: Vec<Option<T>>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: NativeType> From<Vec<T>> for PrimitiveArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: NativeType> FromIterator<Option<T>> for PrimitiveArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let mut array = MutablePrimitiveArray::<T>::new();
        array.extend(iter);
        array.finish()
    }
}

impl<T: NativeType> TryFrom<ArrayData> for PrimitiveArray<T> {
    type Error = Error;

    fn try_from(data: ArrayData) -> Result<Self> {
        Self::try_new(data)
    }
}

/// A type definition [`PrimitiveArray`] for `i8`
pub type Int8Array = PrimitiveArray<i8>;
/// A type definition [`PrimitiveArray`] for `i16`
pub type Int16Array = PrimitiveArray<i16>;
/// A type definition [`PrimitiveArray`] for `i32`
pub type Int32Array = PrimitiveArray<i32>;
/// A type definition [`PrimitiveArray`] for `i64`
pub type Int64Array = PrimitiveArray<i64>;
/// A type definition [`PrimitiveArray`] for `u8`
pub type UInt8Array = PrimitiveArray<u8>;
/// A type definition [`PrimitiveArray`] for `u16`
pub type UInt16Array = PrimitiveArray<u16>;
/// A type definition [`PrimitiveArray`] for `u32`
pub type UInt32Array = PrimitiveArray<u32>;
/// A type definition [`PrimitiveArray`] for `u64`
pub type UInt64Array = PrimitiveArray<u64>;
/// A type definition [`PrimitiveArray`] for `f32`
pub type Float32Array = PrimitiveArray<f32>;
/// A type definition [`PrimitiveArray`] for `f64`
pub type Float64Array = PrimitiveArray<f64>;

/// A type definition [`MutablePrimitiveArray`] for `i8`
pub type Int8Vec = MutablePrimitiveArray<i8>;
/// A type definition [`MutablePrimitiveArray`] for `i16`
pub type Int16Vec = MutablePrimitiveArray<i16>;
/// A type definition [`MutablePrimitiveArray`] for `i32`
pub type Int32Vec = MutablePrimitiveArray<i32>;
/// A type definition [`MutablePrimitiveArray`] for `i64`
pub type Int64Vec = MutablePrimitiveArray<i64>;
/// A type definition [`MutablePrimitiveArray`] for `u8`
pub type UInt8Vec = MutablePrimitiveArray<u8>;
/// A type definition [`MutablePrimitiveArray`] for `u16`
pub type UInt16Vec = MutablePrimitiveArray<u16>;
/// A type definition [`MutablePrimitiveArray`] for `u32`
pub type UInt32Vec = MutablePrimitiveArray<u32>;
/// A type definition [`MutablePrimitiveArray`] for `u64`
pub type UInt64Vec = MutablePrimitiveArray<u64>;
/// A type definition [`MutablePrimitiveArray`] for `f32`
pub type Float32Vec = MutablePrimitiveArray<f32>;
/// A type definition [`MutablePrimitiveArray`] for `f64`
pub type Float64Vec = MutablePrimitiveArray<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_type() {
        let array = Int32Array::from_slice([1, 2]).to(DataType::Date32);
        assert_eq!(array.data_type(), &DataType::Date32);
        assert_eq!(array.values(), &[1, 2]);
    }

    #[test]
    #[should_panic]
    fn wrong_logical_type() {
        let _ = Int32Array::from_slice([1, 2]).to(DataType::Date64);
    }

    #[test]
    fn wrong_physical_type() {
        let data = Int64Array::from_slice([1, 2]).into_data();
        assert!(matches!(Int32Array::try_new(data), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn sliced() {
        let array = Int32Array::from(vec![Some(1), None, Some(3), Some(4)]);
        let sliced = array.slice(1, 2);
        assert_eq!(sliced.values(), &[0, 3]);
        assert_eq!(sliced.null_count(), 1);
        assert_eq!(sliced.iter().collect::<Vec<_>>(), vec![None, Some(3)]);
        assert_eq!(sliced.iter().rev().collect::<Vec<_>>(), vec![Some(3), None]);
    }

    #[test]
    fn from_data() {
        let array = Int32Array::try_from_data(
            DataType::Time32(crate::datatypes::TimeUnit::Second),
            Buffer::from_slice_ref(&[1i32, 2, 3]),
            Some(Buffer::from(&[0b101u8])),
        )
        .unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);
        assert!(Int32Array::try_from_data(DataType::Int64, Buffer::new(), None).is_err());
    }
}
