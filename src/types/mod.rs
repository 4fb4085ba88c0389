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

//! Traits and implementations to handle _all types_ used in this crate.
//!
//! Most physical types used in this crate are native Rust types, like `i32`.
//! The most important trait is [`NativeType`], the generic trait of
//! [`crate::array::PrimitiveArray`]. [`Offset`] describes the integers used as offsets
//! of variable-length arrays and [`DictionaryKey`] the integers used as keys of dictionaries.
mod index;
pub use index::*;
mod offset;
pub use offset::*;

use crate::datatypes::{DataType, PrimitiveType};

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Trait denoting anything that has a natural logical [`DataType`].
/// For example, [`DataType::Int32`] for `i32`.
pub trait NaturalDataType {
    /// The natural [`DataType`].
    const DATA_TYPE: DataType;
}

/// Sealed trait implemented by all fixed-width types that can be stored in a
/// [`crate::buffer::Buffer`] and interpreted by [`crate::array::PrimitiveArray`].
pub trait NativeType:
    private::Sealed
    + NaturalDataType
    + Send
    + Sync
    + Sized
    + Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + PartialOrd
    + Default
    + 'static
{
    /// The physical representation of this type.
    const PRIMITIVE: PrimitiveType;

    /// Type denoting its representation as bytes.
    /// This must be `[u8; N]` where `N = size_of::<T>`.
    type Bytes: AsRef<[u8]> + std::fmt::Debug;

    /// To bytes in little endian
    fn to_le_bytes(&self) -> Self::Bytes;

    /// To bytes in native endian
    fn to_ne_bytes(&self) -> Self::Bytes;
}

macro_rules! native {
    ($type:ty, $primitive:expr, $data_type:expr) => {
        impl NaturalDataType for $type {
            const DATA_TYPE: DataType = $data_type;
        }

        impl NativeType for $type {
            const PRIMITIVE: PrimitiveType = $primitive;

            type Bytes = [u8; std::mem::size_of::<Self>()];

            #[inline]
            fn to_le_bytes(&self) -> Self::Bytes {
                Self::to_le_bytes(*self)
            }

            #[inline]
            fn to_ne_bytes(&self) -> Self::Bytes {
                Self::to_ne_bytes(*self)
            }
        }
    };
}

native!(u8, PrimitiveType::UInt8, DataType::UInt8);
native!(u16, PrimitiveType::UInt16, DataType::UInt16);
native!(u32, PrimitiveType::UInt32, DataType::UInt32);
native!(u64, PrimitiveType::UInt64, DataType::UInt64);
native!(i8, PrimitiveType::Int8, DataType::Int8);
native!(i16, PrimitiveType::Int16, DataType::Int16);
native!(i32, PrimitiveType::Int32, DataType::Int32);
native!(i64, PrimitiveType::Int64, DataType::Int64);
native!(f32, PrimitiveType::Float32, DataType::Float32);
native!(f64, PrimitiveType::Float64, DataType::Float64);

/// Trait to view a slice of [`NativeType`] as bytes.
/// ```
/// use columnar::types::ToByteSlice;
/// assert_eq!([1i32, 2].to_byte_slice().len(), 8);
/// ```
pub trait ToByteSlice {
    /// Returns the (native endian) byte representation of `self`.
    fn to_byte_slice(&self) -> &[u8];
}

impl<T: NativeType> ToByteSlice for [T] {
    #[inline]
    fn to_byte_slice(&self) -> &[u8] {
        let raw_ptr = self.as_ptr() as *const u8;
        // Safety: every `NativeType` is plain old data without padding
        unsafe { std::slice::from_raw_parts(raw_ptr, std::mem::size_of_val(self)) }
    }
}

impl<T: NativeType> ToByteSlice for T {
    #[inline]
    fn to_byte_slice(&self) -> &[u8] {
        let raw_ptr = self as *const T as *const u8;
        // Safety: every `NativeType` is plain old data without padding
        unsafe { std::slice::from_raw_parts(raw_ptr, std::mem::size_of::<T>()) }
    }
}
