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

/// A [`Utf8Array`] is a nullable array of strings. Its layout is that of a
/// [`super::BinaryArray`], with the additional invariant that its values are valid utf8
/// and that every offset lands on a char boundary.
/// # Example
/// ```
/// use columnar::array::Utf8Array;
///
/// let array = Utf8Array::<i32>::from(vec![Some("hi"), None, Some("there")]);
/// assert_eq!(array.value(0), "hi");
/// assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some("hi"), None, Some("there")]);
/// ```
#[derive(Clone)]
pub struct Utf8Array<O: Offset> {
    data: ArrayData,
    phantom: std::marker::PhantomData<O>,
}

impl<O: Offset> Utf8Array<O> {
    /// The [`DataType`] of a [`Utf8Array`] with offsets `O`.
    pub fn default_data_type() -> DataType {
        if O::IS_LARGE {
            DataType::LargeUtf8
        } else {
            DataType::Utf8
        }
    }

    /// Interprets `data` as a [`Utf8Array`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not utf8 with offsets `O`.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        let expected = if O::IS_LARGE {
            PhysicalType::LargeUtf8
        } else {
            PhysicalType::Utf8
        };
        check_physical_type(&data, expected, "Utf8Array")?;
        Ok(Self {
            data,
            phantom: std::marker::PhantomData,
        })
    }

    /// Creates a new [`Utf8Array`] from its offsets, values and an optional validity.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the offsets are invalid or the values are not utf8.
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

    /// Creates a new [`Utf8Array`] without nulls from a slice of strings.
    pub fn from_slice<T: AsRef<str>, P: AsRef<[T]>>(slice: P) -> Self {
        let mut array = MutableUtf8Array::<O>::new();
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

    /// Returns the string at slot `i`, ignoring its validity.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> &str {
        assert!(i < self.len());
        let offsets = self.offsets();
        let bytes = &self.values()[offsets[i].to_usize()..offsets[i + 1].to_usize()];
        // Safety: the values are valid utf8 and offsets are char boundaries, an invariant
        // checked when the `ArrayData` was built
        unsafe { std::str::from_utf8_unchecked(bytes) }
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

impl<'a, O: Offset> ArrayAccessor<'a> for Utf8Array<O> {
    type Item = &'a str;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.data.is_valid(i)
    }

    #[inline]
    fn value(&'a self, i: usize) -> &'a str {
        Utf8Array::value(self, i)
    }
}

impl<'a, O: Offset> IntoIterator for &'a Utf8Array<O> {
    type Item = Option<&'a str>;
    type IntoIter = ArrayIter<'a, Utf8Array<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<O: Offset, T: AsRef<str>> From<Vec<Option<T>>> for Utf8Array<O> {
    fn from(values: Vec<Option<T>>) -> Self {
        values.into_iter().collect()
    }
}

impl<O: Offset, T: AsRef<str>> FromIterator<Option<T>> for Utf8Array<O> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let mut array = MutableUtf8Array::<O>::new();
        iter.into_iter()
            .for_each(|x| array.push(x.as_ref().map(|x| x.as_ref())));
        array.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        let array = Utf8Array::<i32>::from_slice(["hello", "", "wörld"]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.value(2), "wörld");
        assert_eq!(array.offsets(), &[0, 5, 5, 11]);
        let sliced = array.slice(2, 1);
        assert_eq!(sliced.values_iter().collect::<Vec<_>>(), vec!["wörld"]);
    }

    #[test]
    fn not_utf8() {
        let offsets = Buffer::from_slice_ref(&[0i32, 2]);
        let values = Buffer::from(&[0xc3u8, 0x28]);
        assert!(matches!(
            Utf8Array::<i32>::from_data(offsets, values, None),
            Err(Error::Layout(_))
        ));
    }

    #[test]
    fn binary_is_not_utf8() {
        let data = super::super::BinaryArray::<i32>::from_slice([b"a"]).into_data();
        assert!(matches!(
            Utf8Array::<i32>::try_new(data),
            Err(Error::TypeMismatch(_))
        ));
    }
}
