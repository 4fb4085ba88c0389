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

//! Contains [`Scalar`], the value of a single slot of an [`Array`].
use crate::array::*;

/// The value of a single slot of an [`Array`], obtained via [`Array::scalar`].
///
/// Primitive scalars carry their physical value; e.g. a slot of a
/// [`crate::datatypes::DataType::Date32`] array is a [`Scalar::Int32`]. Nested scalars carry
/// their children: a list slot is the zero-copy slice of the child array it spans.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A null slot, of any type.
    Null,
    /// A boolean
    Boolean(bool),
    /// An `i8`
    Int8(i8),
    /// An `i16`
    Int16(i16),
    /// An `i32`
    Int32(i32),
    /// An `i64`
    Int64(i64),
    /// A `u8`
    UInt8(u8),
    /// A `u16`
    UInt16(u16),
    /// A `u32`
    UInt32(u32),
    /// A `u64`
    UInt64(u64),
    /// An `f32`
    Float32(f32),
    /// An `f64`
    Float64(f64),
    /// Bytes, of any offset size.
    Binary(Vec<u8>),
    /// A string, of any offset size.
    Utf8(String),
    /// A list or fixed-size list.
    List(Array),
    /// The values of every field of a struct slot.
    Struct(Vec<Scalar>),
    /// The type id and value of a union slot.
    Union(i8, Box<Scalar>),
}

impl Scalar {
    /// Whether this scalar is [`Scalar::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// Returns slot `i` of `array` as a [`Scalar`]. A dictionary slot returns the value its key
/// points to.
pub(crate) fn new_scalar(array: &Array, i: usize) -> Scalar {
    if array.is_null(i) {
        return Scalar::Null;
    }
    match array {
        Array::Null(_) => Scalar::Null,
        Array::Boolean(a) => Scalar::Boolean(a.value(i)),
        Array::Int8(a) => Scalar::Int8(a.value(i)),
        Array::Int16(a) => Scalar::Int16(a.value(i)),
        Array::Int32(a) => Scalar::Int32(a.value(i)),
        Array::Int64(a) => Scalar::Int64(a.value(i)),
        Array::UInt8(a) => Scalar::UInt8(a.value(i)),
        Array::UInt16(a) => Scalar::UInt16(a.value(i)),
        Array::UInt32(a) => Scalar::UInt32(a.value(i)),
        Array::UInt64(a) => Scalar::UInt64(a.value(i)),
        Array::Float32(a) => Scalar::Float32(a.value(i)),
        Array::Float64(a) => Scalar::Float64(a.value(i)),
        Array::Binary(a) => Scalar::Binary(a.value(i).to_vec()),
        Array::LargeBinary(a) => Scalar::Binary(a.value(i).to_vec()),
        Array::Utf8(a) => Scalar::Utf8(a.value(i).to_string()),
        Array::LargeUtf8(a) => Scalar::Utf8(a.value(i).to_string()),
        Array::List(a) => Scalar::List(a.value(i)),
        Array::LargeList(a) => Scalar::List(a.value(i)),
        Array::FixedSizeList(a) => Scalar::List(a.value(i)),
        Array::Struct(a) => Scalar::Struct(a.value(i)),
        Array::Dictionary(a) => a.value(i),
        Array::Union(a) => a.value(i),
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Utf8(value.to_string())
    }
}

macro_rules! scalar_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::$variant(value)
            }
        }
    };
}

scalar_from!(i8, Int8);
scalar_from!(i16, Int16);
scalar_from!(i32, Int32);
scalar_from!(i64, Int64);
scalar_from!(u8, UInt8);
scalar_from!(u16, UInt16);
scalar_from!(u32, UInt32);
scalar_from!(u64, UInt64);
scalar_from!(f32, Float32);
scalar_from!(f64, Float64);

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::DataType;

    #[test]
    fn from_slots() {
        let array: Array = Utf8Array::<i32>::from(vec![Some("a"), None]).into();
        assert_eq!(array.scalar(0), Scalar::from("a"));
        assert!(array.scalar(1).is_null());

        let array: Array = Int64Array::from_slice([1, 2]).to(DataType::Date64).into();
        assert_eq!(array.scalar(1), Scalar::Int64(2));
        assert_eq!(Scalar::from(Some(1i8)), Scalar::Int8(1));
        assert_eq!(Scalar::from(None::<i8>), Scalar::Null);
    }
}
