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

//! Contains [`ArrayData`], the untyped description of an array, the typed views over it
//! ([`PrimitiveArray`], [`Utf8Array`], [`ListArray`], [`StructArray`], ...), and [`Array`],
//! the closed sum of all typed views.
//!
//! Arrays are immutable: they are built either directly from [`ArrayData`] or through their
//! mutable counterparts (e.g. [`MutablePrimitiveArray`]), which implement [`MutableArray`].
//!
//! ```
//! use columnar::array::{Array, Int32Array, MutablePrimitiveArray};
//!
//! let mut builder = MutablePrimitiveArray::<i32>::new();
//! builder.push(Some(1));
//! builder.push(None);
//! builder.push(Some(3));
//! let array: Array = builder.finish().into();
//!
//! assert_eq!(array.null_count(), 1);
//! let array = array.downcast_ref::<Int32Array>().unwrap();
//! assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(1), None, Some(3)]);
//! ```
use std::any::Any;

use crate::bitmap::Bitmap;
use crate::datatypes::{DataType, IntegerType, PhysicalType, PrimitiveType};
use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Applies `$body` to the typed view inside `$array`, bound to `$a`.
macro_rules! match_array {
    ($array:expr, |$a:ident| $body:expr) => {
        match $array {
            Array::Null($a) => $body,
            Array::Boolean($a) => $body,
            Array::Int8($a) => $body,
            Array::Int16($a) => $body,
            Array::Int32($a) => $body,
            Array::Int64($a) => $body,
            Array::UInt8($a) => $body,
            Array::UInt16($a) => $body,
            Array::UInt32($a) => $body,
            Array::UInt64($a) => $body,
            Array::Float32($a) => $body,
            Array::Float64($a) => $body,
            Array::Binary($a) => $body,
            Array::LargeBinary($a) => $body,
            Array::Utf8($a) => $body,
            Array::LargeUtf8($a) => $body,
            Array::List($a) => $body,
            Array::LargeList($a) => $body,
            Array::FixedSizeList($a) => $body,
            Array::Struct($a) => $body,
            Array::Dictionary($a) => $body,
            Array::Union($a) => $body,
        }
    };
}

/// Like [`match_array`], re-wrapping the result in the same variant.
macro_rules! map_array {
    ($array:expr, |$a:ident| $body:expr) => {
        match $array {
            Array::Null($a) => Array::Null($body),
            Array::Boolean($a) => Array::Boolean($body),
            Array::Int8($a) => Array::Int8($body),
            Array::Int16($a) => Array::Int16($body),
            Array::Int32($a) => Array::Int32($body),
            Array::Int64($a) => Array::Int64($body),
            Array::UInt8($a) => Array::UInt8($body),
            Array::UInt16($a) => Array::UInt16($body),
            Array::UInt32($a) => Array::UInt32($body),
            Array::UInt64($a) => Array::UInt64($body),
            Array::Float32($a) => Array::Float32($body),
            Array::Float64($a) => Array::Float64($body),
            Array::Binary($a) => Array::Binary($body),
            Array::LargeBinary($a) => Array::LargeBinary($body),
            Array::Utf8($a) => Array::Utf8($body),
            Array::LargeUtf8($a) => Array::LargeUtf8($body),
            Array::List($a) => Array::List($body),
            Array::LargeList($a) => Array::LargeList($body),
            Array::FixedSizeList($a) => Array::FixedSizeList($body),
            Array::Struct($a) => Array::Struct($body),
            Array::Dictionary($a) => Array::Dictionary($body),
            Array::Union($a) => Array::Union($body),
        }
    };
}

mod data;
pub use data::{ArrayData, ArrayDataBuilder};

mod equal;
mod fmt;
mod iterator;
pub use iterator::{ArrayAccessor, ArrayIter, ArrayValuesIter};
mod specification;

mod binary;
mod boolean;
mod dictionary;
mod fixed_size_list;
mod list;
mod null;
mod primitive;
mod struct_;
mod union;
mod utf8;

pub use binary::{BinaryArray, MutableBinaryArray};
pub use boolean::{BooleanArray, MutableBooleanArray};
pub use dictionary::{DictionaryArray, MutableDictionaryArray};
pub use fixed_size_list::{FixedSizeListArray, MutableFixedSizeListArray};
pub use list::{ListArray, MutableListArray};
pub use null::NullArray;
pub use primitive::*;
pub use struct_::{MutableStructArray, StructArray};
pub use union::UnionArray;
pub use utf8::{MutableUtf8Array, Utf8Array};

/// A [`Utf8Array`] with 32-bit offsets.
pub type StringArray = Utf8Array<i32>;
/// A [`Utf8Array`] with 64-bit offsets.
pub type LargeStringArray = Utf8Array<i64>;
/// A [`BinaryArray`] with 64-bit offsets.
pub type LargeBinaryArray = BinaryArray<i64>;
/// A [`ListArray`] with 64-bit offsets.
pub type LargeListArray = ListArray<i64>;

/// An array of any type: a closed sum over every typed view, one variant per [`PhysicalType`].
///
/// Use [`Array::downcast_ref`] to recover the typed view, and [`Array::try_new`] to
/// interpret an [`ArrayData`].
#[derive(Clone)]
pub enum Array {
    /// [`PhysicalType::Null`]
    Null(NullArray),
    /// [`PhysicalType::Boolean`]
    Boolean(BooleanArray),
    /// `i8` values
    Int8(Int8Array),
    /// `i16` values
    Int16(Int16Array),
    /// `i32` values, including [`DataType::Date32`] and [`DataType::Time32`]
    Int32(Int32Array),
    /// `i64` values, including [`DataType::Date64`], [`DataType::Time64`],
    /// [`DataType::Timestamp`] and [`DataType::Duration`]
    Int64(Int64Array),
    /// `u8` values
    UInt8(UInt8Array),
    /// `u16` values
    UInt16(UInt16Array),
    /// `u32` values
    UInt32(UInt32Array),
    /// `u64` values
    UInt64(UInt64Array),
    /// `f32` values
    Float32(Float32Array),
    /// `f64` values
    Float64(Float64Array),
    /// [`PhysicalType::Binary`]
    Binary(BinaryArray<i32>),
    /// [`PhysicalType::LargeBinary`]
    LargeBinary(BinaryArray<i64>),
    /// [`PhysicalType::Utf8`]
    Utf8(Utf8Array<i32>),
    /// [`PhysicalType::LargeUtf8`]
    LargeUtf8(Utf8Array<i64>),
    /// [`PhysicalType::List`]
    List(ListArray<i32>),
    /// [`PhysicalType::LargeList`]
    LargeList(ListArray<i64>),
    /// [`PhysicalType::FixedSizeList`]
    FixedSizeList(FixedSizeListArray),
    /// [`PhysicalType::Struct`]
    Struct(StructArray),
    /// [`PhysicalType::Dictionary`]
    Dictionary(DictionaryArray),
    /// [`PhysicalType::Union`]
    Union(UnionArray),
}

impl Array {
    /// Interprets `data` as the typed view corresponding to its [`PhysicalType`].
    /// This is `O(1)` for flat types and `O(number of nodes)` for nested types;
    /// no buffer is read or copied.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        use PrimitiveType::*;
        Ok(match data.data_type().to_physical_type() {
            PhysicalType::Null => Array::Null(NullArray::try_new(data)?),
            PhysicalType::Boolean => Array::Boolean(BooleanArray::try_new(data)?),
            PhysicalType::Primitive(primitive) => match primitive {
                Int8 => Array::Int8(PrimitiveArray::try_new(data)?),
                Int16 => Array::Int16(PrimitiveArray::try_new(data)?),
                Int32 => Array::Int32(PrimitiveArray::try_new(data)?),
                Int64 => Array::Int64(PrimitiveArray::try_new(data)?),
                UInt8 => Array::UInt8(PrimitiveArray::try_new(data)?),
                UInt16 => Array::UInt16(PrimitiveArray::try_new(data)?),
                UInt32 => Array::UInt32(PrimitiveArray::try_new(data)?),
                UInt64 => Array::UInt64(PrimitiveArray::try_new(data)?),
                Float32 => Array::Float32(PrimitiveArray::try_new(data)?),
                Float64 => Array::Float64(PrimitiveArray::try_new(data)?),
            },
            PhysicalType::Binary => Array::Binary(BinaryArray::try_new(data)?),
            PhysicalType::LargeBinary => Array::LargeBinary(BinaryArray::try_new(data)?),
            PhysicalType::Utf8 => Array::Utf8(Utf8Array::try_new(data)?),
            PhysicalType::LargeUtf8 => Array::LargeUtf8(Utf8Array::try_new(data)?),
            PhysicalType::List => Array::List(ListArray::try_new(data)?),
            PhysicalType::LargeList => Array::LargeList(ListArray::try_new(data)?),
            PhysicalType::FixedSizeList => {
                Array::FixedSizeList(FixedSizeListArray::try_new(data)?)
            }
            PhysicalType::Struct => Array::Struct(StructArray::try_new(data)?),
            PhysicalType::Dictionary(_) => Array::Dictionary(DictionaryArray::try_new(data)?),
            PhysicalType::Union => Array::Union(UnionArray::try_new(data)?),
        })
    }

    /// Returns a new empty [`Array`] of `data_type`.
    /// # Panics
    /// Panics iff `data_type` contains a fixed-size list of size 0.
    pub fn new_empty(data_type: &DataType) -> Self {
        new_empty_array(data_type)
    }

    /// The [`ArrayData`] backing this array.
    #[inline]
    pub fn data(&self) -> &ArrayData {
        match_array!(self, |a| a.data())
    }

    /// Converts this array into its [`ArrayData`].
    #[inline]
    pub fn into_data(self) -> ArrayData {
        match_array!(self, |a| a.into_data())
    }

    /// The [`DataType`] of this array.
    #[inline]
    pub fn data_type(&self) -> &DataType {
        self.data().data_type()
    }

    /// The number of slots of this array.
    #[inline]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether this array has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of null slots of this array.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.data().null_count()
    }

    /// Returns whether slot `i` is null.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        self.data().is_null(i)
    }

    /// Returns whether slot `i` is valid.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.data().is_valid(i)
    }

    /// The validity of this array, if any.
    #[inline]
    pub fn validity(&self) -> Option<Bitmap> {
        self.data().validity_bitmap()
    }

    /// Returns a zero-copy slice of this array with `length` slots starting at `offset`.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        map_array!(self, |a| a.slice(offset, length))
    }

    /// Returns the value of slot `i` as a [`Scalar`], [`Scalar::Null`] when the slot is null.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn scalar(&self, i: usize) -> Scalar {
        crate::scalar::new_scalar(self, i)
    }

    /// Returns this array as [`Any`], so that it can be downcast to its typed view.
    #[inline]
    pub fn as_any(&self) -> &dyn Any {
        match_array!(self, |a| a as &dyn Any)
    }

    /// Downcasts this array to the typed view `A`.
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff this array is not an `A`.
    /// # Example
    /// ```
    /// use columnar::array::{Array, Int32Array, Utf8Array};
    ///
    /// let array: Array = Int32Array::from_slice([1, 2]).into();
    /// assert!(array.downcast_ref::<Int32Array>().is_ok());
    /// assert!(array.downcast_ref::<Utf8Array<i32>>().is_err());
    /// ```
    pub fn downcast_ref<A: 'static>(&self) -> Result<&A> {
        self.as_any().downcast_ref::<A>().ok_or_else(|| {
            Error::TypeMismatch(format!(
                "an array of type {:?} is not a {}",
                self.data_type(),
                std::any::type_name::<A>()
            ))
        })
    }
}

impl TryFrom<ArrayData> for Array {
    type Error = Error;

    fn try_from(data: ArrayData) -> Result<Self> {
        Self::try_new(data)
    }
}

impl From<Array> for ArrayData {
    fn from(array: Array) -> Self {
        array.into_data()
    }
}

macro_rules! impl_from_typed {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Array {
            fn from(array: $ty) -> Self {
                Array::$variant(array)
            }
        }
    };
}

impl_from_typed!(Null, NullArray);
impl_from_typed!(Boolean, BooleanArray);
impl_from_typed!(Int8, Int8Array);
impl_from_typed!(Int16, Int16Array);
impl_from_typed!(Int32, Int32Array);
impl_from_typed!(Int64, Int64Array);
impl_from_typed!(UInt8, UInt8Array);
impl_from_typed!(UInt16, UInt16Array);
impl_from_typed!(UInt32, UInt32Array);
impl_from_typed!(UInt64, UInt64Array);
impl_from_typed!(Float32, Float32Array);
impl_from_typed!(Float64, Float64Array);
impl_from_typed!(Binary, BinaryArray<i32>);
impl_from_typed!(LargeBinary, BinaryArray<i64>);
impl_from_typed!(Utf8, Utf8Array<i32>);
impl_from_typed!(LargeUtf8, Utf8Array<i64>);
impl_from_typed!(List, ListArray<i32>);
impl_from_typed!(LargeList, ListArray<i64>);
impl_from_typed!(FixedSizeList, FixedSizeListArray);
impl_from_typed!(Struct, StructArray);
impl_from_typed!(Dictionary, DictionaryArray);
impl_from_typed!(Union, UnionArray);

/// Returns an empty [`Array`] of `data_type`.
/// # Panics
/// Panics iff `data_type` contains a fixed-size list of size 0.
pub fn new_empty_array(data_type: &DataType) -> Array {
    use crate::buffer::Buffer;
    use crate::datatypes::UnionMode;

    let (buffers, children) = match data_type {
        DataType::Null => (vec![], vec![]),
        DataType::Binary | DataType::LargeBinary | DataType::Utf8 | DataType::LargeUtf8 => {
            (vec![Buffer::new(), Buffer::new()], vec![])
        }
        DataType::List(field) | DataType::LargeList(field) => (
            vec![Buffer::new()],
            vec![new_empty_array(field.data_type()).into_data()],
        ),
        DataType::FixedSizeList(field, size) => {
            assert!(*size > 0, "the size of a fixed-size list must be positive");
            (vec![], vec![new_empty_array(field.data_type()).into_data()])
        }
        DataType::Struct(fields) => (
            vec![],
            fields
                .iter()
                .map(|f| new_empty_array(f.data_type()).into_data())
                .collect(),
        ),
        DataType::Dictionary(_, values, _) => {
            (vec![Buffer::new()], vec![new_empty_array(values).into_data()])
        }
        DataType::Union(fields, _, mode) => {
            let buffers = match mode {
                UnionMode::Dense => vec![Buffer::new(), Buffer::new()],
                UnionMode::Sparse => vec![Buffer::new()],
            };
            let children = fields
                .iter()
                .map(|f| new_empty_array(f.data_type()).into_data())
                .collect();
            (buffers, children)
        }
        _ => (vec![Buffer::new()], vec![]),
    };
    // Safety: an empty array with the buffers and children its type requires
    let data =
        unsafe { ArrayData::new_unchecked(data_type.clone(), 0, 0, 0, None, buffers, children) };
    // the physical type always matches
    match Array::try_new(data) {
        Ok(array) => array,
        Err(_) => unreachable!(),
    }
}

/// The key type of a dictionary array, [`None`] otherwise.
#[inline]
pub(crate) fn dictionary_key_type(data_type: &DataType) -> Option<IntegerType> {
    match data_type {
        DataType::Dictionary(key, _, _) => Some(*key),
        _ => None,
    }
}

/// A trait describing an array that can be mutated and frozen into an [`Array`].
///
/// Builders are single-writer: they must not be shared across threads while being mutated.
pub trait MutableArray: std::fmt::Debug + Send + Sync {
    /// The [`DataType`] of the array being built.
    fn data_type(&self) -> &DataType;

    /// The number of slots pushed so far.
    fn len(&self) -> usize;

    /// Whether no slot was pushed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes a null slot.
    fn push_null(&mut self);

    /// Freezes the accumulated slots into an [`Array`], resetting this builder to empty.
    fn as_array(&mut self) -> Array;

    /// Convert itself to [`Any`], so that it can be downcast to a concrete builder.
    fn as_any(&self) -> &dyn Any;

    /// Convert itself to a mutable [`Any`], so that it can be downcast to a concrete builder.
    fn as_mut_any(&mut self) -> &mut dyn Any;
}

/// Implements the accessors common to every typed view, assuming a field `data: ArrayData`.
macro_rules! impl_common_array {
    () => {
        /// The [`crate::array::ArrayData`] backing this array.
        #[inline]
        pub fn data(&self) -> &crate::array::ArrayData {
            &self.data
        }

        /// Converts this array into its [`crate::array::ArrayData`].
        #[inline]
        pub fn into_data(self) -> crate::array::ArrayData {
            self.data
        }

        /// The [`crate::datatypes::DataType`] of this array.
        #[inline]
        pub fn data_type(&self) -> &crate::datatypes::DataType {
            self.data.data_type()
        }

        /// The number of slots.
        #[inline]
        pub fn len(&self) -> usize {
            self.data.len()
        }

        /// Whether there are no slots.
        #[inline]
        pub fn is_empty(&self) -> bool {
            self.data.is_empty()
        }

        /// The number of null slots.
        #[inline]
        pub fn null_count(&self) -> usize {
            self.data.null_count()
        }

        /// Returns whether slot `i` is null.
        /// # Panics
        /// Panics iff `i >= self.len()`.
        #[inline]
        pub fn is_null(&self, i: usize) -> bool {
            self.data.is_null(i)
        }

        /// Returns whether slot `i` is valid.
        /// # Panics
        /// Panics iff `i >= self.len()`.
        #[inline]
        pub fn is_valid(&self, i: usize) -> bool {
            self.data.is_valid(i)
        }

        /// The validity of this array, if any.
        #[inline]
        pub fn validity(&self) -> Option<crate::bitmap::Bitmap> {
            self.data.validity_bitmap()
        }
    };
}
pub(crate) use impl_common_array;

/// Returns a [`Error::TypeMismatch`] unless `data` has the physical type `expected`.
pub(crate) fn check_physical_type(
    data: &ArrayData,
    expected: PhysicalType,
    name: &str,
) -> Result<()> {
    let physical = data.data_type().to_physical_type();
    if physical != expected {
        return Err(Error::TypeMismatch(format!(
            "{} can only be built from data of physical type {:?}, but the data type is {:?}",
            name,
            expected,
            data.data_type()
        )));
    }
    Ok(())
}
