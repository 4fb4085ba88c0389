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

//! Logical equality of arrays.
//!
//! Two arrays are logically equal iff their data types are equal (ignoring the names of
//! the children of nested types), they have the same length and every slot is equal: both
//! null, or both valid with equal values. The physical layout (offsets, buffer identity,
//! the values behind null slots) is irrelevant.
use crate::types::{NativeType, Offset};

use super::*;

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        use Array::*;
        match (self, other) {
            (Null(lhs), Null(rhs)) => lhs == rhs,
            (Boolean(lhs), Boolean(rhs)) => lhs == rhs,
            (Int8(lhs), Int8(rhs)) => lhs == rhs,
            (Int16(lhs), Int16(rhs)) => lhs == rhs,
            (Int32(lhs), Int32(rhs)) => lhs == rhs,
            (Int64(lhs), Int64(rhs)) => lhs == rhs,
            (UInt8(lhs), UInt8(rhs)) => lhs == rhs,
            (UInt16(lhs), UInt16(rhs)) => lhs == rhs,
            (UInt32(lhs), UInt32(rhs)) => lhs == rhs,
            (UInt64(lhs), UInt64(rhs)) => lhs == rhs,
            (Float32(lhs), Float32(rhs)) => lhs == rhs,
            (Float64(lhs), Float64(rhs)) => lhs == rhs,
            (Binary(lhs), Binary(rhs)) => lhs == rhs,
            (LargeBinary(lhs), LargeBinary(rhs)) => lhs == rhs,
            (Utf8(lhs), Utf8(rhs)) => lhs == rhs,
            (LargeUtf8(lhs), LargeUtf8(rhs)) => lhs == rhs,
            (List(lhs), List(rhs)) => lhs == rhs,
            (LargeList(lhs), LargeList(rhs)) => lhs == rhs,
            (FixedSizeList(lhs), FixedSizeList(rhs)) => lhs == rhs,
            (Struct(lhs), Struct(rhs)) => lhs == rhs,
            (Dictionary(lhs), Dictionary(rhs)) => lhs == rhs,
            (Union(lhs), Union(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl PartialEq for NullArray {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
    }
}

/// Compares the slots of two arrays of the same view type.
macro_rules! equal_slots {
    ($lhs:expr, $rhs:expr) => {
        $lhs.data_type().equals_datatype($rhs.data_type())
            && $lhs.len() == $rhs.len()
            && $lhs.iter().eq($rhs.iter())
    };
}

impl<T: NativeType> PartialEq for PrimitiveArray<T> {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl PartialEq for BooleanArray {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl<O: Offset> PartialEq for BinaryArray<O> {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl<O: Offset> PartialEq for Utf8Array<O> {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl<O: Offset> PartialEq for ListArray<O> {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl PartialEq for FixedSizeListArray {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl PartialEq for StructArray {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl PartialEq for DictionaryArray {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

impl PartialEq for UnionArray {
    fn eq(&self, other: &Self) -> bool {
        equal_slots!(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{DataType, Field};

    #[test]
    fn ignores_values_behind_nulls() {
        let lhs = Int32Array::from(vec![Some(1), None, Some(3)]);
        let rhs = Int32Array::from_slice([1, 42, 3]);
        assert_ne!(lhs, rhs);

        let rhs = Int32Array::try_from_data(
            DataType::Int32,
            crate::buffer::Buffer::from_slice_ref(&[1i32, 42, 3]),
            Some(crate::buffer::Buffer::from(&[0b101u8])),
        )
        .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn sliced() {
        let array = Utf8Array::<i32>::from(vec![Some("a"), None, Some("c"), Some("d")]);
        let expected = Utf8Array::<i32>::from(vec![None, Some("c")]);
        assert_eq!(array.slice(1, 2), expected);
        assert_ne!(array.slice(0, 2), expected);
    }

    #[test]
    fn different_variants() {
        let lhs: Array = Int32Array::from_slice([1]).into();
        let rhs: Array = Int64Array::from_slice([1]).into();
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn logical_types() {
        let lhs = Int32Array::from_slice([1]);
        assert_ne!(lhs.clone().to(DataType::Date32), lhs);
    }

    #[test]
    fn nested_names_are_ignored() {
        let values: Array = Int32Array::from_slice([1, 2, 3]).into();
        let offsets = crate::buffer::Buffer::from_slice_ref(&[0i32, 1, 3]);
        let lhs = ListArray::<i32>::from_data(
            ListArray::<i32>::default_datatype(DataType::Int32),
            offsets.clone(),
            values.clone(),
            None,
        )
        .unwrap();
        let rhs = ListArray::<i32>::from_data(
            DataType::List(Box::new(Field::new("element", DataType::Int32, true))),
            offsets,
            values,
            None,
        )
        .unwrap();
        assert_eq!(lhs, rhs);
    }
}
