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

//! Contains all metadata, such as [`PhysicalType`], [`DataType`], [`Field`] and [`Schema`].
mod field;
mod physical_type;
mod schema;

use std::collections::BTreeMap;

pub use field::Field;
pub use physical_type::*;
pub use schema::Schema;

#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

/// Typedef for free-form key-value metadata of [`Field`] and [`Schema`].
pub type Metadata = BTreeMap<String, String>;

/// The set of logical types supported by this crate.
///
/// Each [`DataType`] has a unique [`PhysicalType`] describing how it is laid out in memory.
/// Temporal types share the layout of their integer representation: [`DataType::Date32`]
/// and [`DataType::Time32`] are stored as `i32`, [`DataType::Date64`], [`DataType::Time64`],
/// [`DataType::Timestamp`] and [`DataType::Duration`] as `i64`.
///
/// Nested types ([`DataType::List`], [`DataType::LargeList`], [`DataType::FixedSizeList`],
/// [`DataType::Struct`] and [`DataType::Union`]) declare their children via [`Field`]s and can
/// be nested arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum DataType {
    /// Null type, with no allocation.
    Null,
    /// A boolean represented as a single bit.
    Boolean,
    /// A signed 8-bit integer.
    Int8,
    /// A signed 16-bit integer.
    Int16,
    /// A signed 32-bit integer.
    Int32,
    /// A signed 64-bit integer.
    Int64,
    /// An unsigned 8-bit integer.
    UInt8,
    /// An unsigned 16-bit integer.
    UInt16,
    /// An unsigned 32-bit integer.
    UInt32,
    /// An unsigned 64-bit integer.
    UInt64,
    /// A 32-bit floating point number.
    Float32,
    /// A 64-bit floating point number.
    Float64,
    /// A timestamp, counting time units since the UNIX epoch, with an optional timezone.
    Timestamp(TimeUnit, Option<String>),
    /// Days since the UNIX epoch (1970-01-01), as `i32`.
    Date32,
    /// Milliseconds since the UNIX epoch, as `i64`.
    Date64,
    /// Time since midnight, as `i32`, in seconds or milliseconds.
    Time32(TimeUnit),
    /// Time since midnight, as `i64`, in microseconds or nanoseconds.
    Time64(TimeUnit),
    /// Elapsed time, as `i64`.
    Duration(TimeUnit),
    /// Opaque binary data of variable length.
    Binary,
    /// Opaque binary data of variable length and 64-bit offsets.
    LargeBinary,
    /// A variable-length string in Unicode with UTF-8 encoding.
    Utf8,
    /// A variable-length string in Unicode with UFT-8 encoding and 64-bit offsets.
    LargeUtf8,
    /// A list of some logical data type with variable length.
    List(Box<Field>),
    /// A list of some logical data type with fixed length.
    FixedSizeList(Box<Field>, usize),
    /// A list of some logical data type with variable length and 64-bit offsets.
    LargeList(Box<Field>),
    /// A nested datatype that contains a number of sub-fields.
    Struct(Vec<Field>),
    /// A nested datatype that can represent slots of differing types.
    /// The optional ids map each child to its type id; when absent, child `i` has id `i`.
    Union(Vec<Field>, Option<Vec<i32>>, UnionMode),
    /// A dictionary encoded array (`key_type`, `value_type`, `is_sorted`), where
    /// each array element is an index of `key_type` into an
    /// associated dictionary of `value_type`.
    Dictionary(IntegerType, Box<DataType>, bool),
}

/// An absolute length of time in seconds, milliseconds, microseconds or nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    /// Time in seconds.
    Second,
    /// Time in milliseconds.
    Millisecond,
    /// Time in microseconds.
    Microsecond,
    /// Time in nanoseconds.
    Nanosecond,
}

impl DataType {
    /// the [`PhysicalType`] of this [`DataType`].
    pub fn to_physical_type(&self) -> PhysicalType {
        use DataType::*;
        match self {
            Null => PhysicalType::Null,
            Boolean => PhysicalType::Boolean,
            Int8 => PhysicalType::Primitive(PrimitiveType::Int8),
            Int16 => PhysicalType::Primitive(PrimitiveType::Int16),
            Int32 | Date32 | Time32(_) => PhysicalType::Primitive(PrimitiveType::Int32),
            Int64 | Date64 | Timestamp(_, _) | Time64(_) | Duration(_) => {
                PhysicalType::Primitive(PrimitiveType::Int64)
            }
            UInt8 => PhysicalType::Primitive(PrimitiveType::UInt8),
            UInt16 => PhysicalType::Primitive(PrimitiveType::UInt16),
            UInt32 => PhysicalType::Primitive(PrimitiveType::UInt32),
            UInt64 => PhysicalType::Primitive(PrimitiveType::UInt64),
            Float32 => PhysicalType::Primitive(PrimitiveType::Float32),
            Float64 => PhysicalType::Primitive(PrimitiveType::Float64),
            Binary => PhysicalType::Binary,
            LargeBinary => PhysicalType::LargeBinary,
            Utf8 => PhysicalType::Utf8,
            LargeUtf8 => PhysicalType::LargeUtf8,
            List(_) => PhysicalType::List,
            FixedSizeList(_, _) => PhysicalType::FixedSizeList,
            LargeList(_) => PhysicalType::LargeList,
            Struct(_) => PhysicalType::Struct,
            Union(_, _, _) => PhysicalType::Union,
            Dictionary(key, _, _) => PhysicalType::Dictionary(*key),
        }
    }

    /// Compares the datatype with another, ignoring nested field names
    /// and metadata.
    pub fn equals_datatype(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::List(a), DataType::List(b))
            | (DataType::LargeList(a), DataType::LargeList(b)) => a.equals_ignoring_name(b),
            (DataType::FixedSizeList(a, a_size), DataType::FixedSizeList(b, b_size)) => {
                a_size == b_size && a.equals_ignoring_name(b)
            }
            (DataType::Struct(a), DataType::Struct(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(a, b)| a.equals_ignoring_name(b))
            }
            (DataType::Union(a, a_ids, a_mode), DataType::Union(b, b_ids, b_mode)) => {
                a_mode == b_mode
                    && a_ids == b_ids
                    && a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(a, b)| a.equals_ignoring_name(b))
            }
            (DataType::Dictionary(a_key, a, a_sorted), DataType::Dictionary(b_key, b, b_sorted)) => {
                a_key == b_key && a_sorted == b_sorted && a.equals_datatype(b)
            }
            _ => self == other,
        }
    }

    /// Returns whether this type has children.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            DataType::List(_)
                | DataType::LargeList(_)
                | DataType::FixedSizeList(_, _)
                | DataType::Struct(_)
                | DataType::Union(_, _, _)
        )
    }
}

impl From<IntegerType> for DataType {
    fn from(item: IntegerType) -> Self {
        match item {
            IntegerType::Int8 => DataType::Int8,
            IntegerType::Int16 => DataType::Int16,
            IntegerType::Int32 => DataType::Int32,
            IntegerType::Int64 => DataType::Int64,
            IntegerType::UInt8 => DataType::UInt8,
            IntegerType::UInt16 => DataType::UInt16,
            IntegerType::UInt32 => DataType::UInt32,
            IntegerType::UInt64 => DataType::UInt64,
        }
    }
}

impl From<PrimitiveType> for DataType {
    fn from(item: PrimitiveType) -> Self {
        match item {
            PrimitiveType::Int8 => DataType::Int8,
            PrimitiveType::Int16 => DataType::Int16,
            PrimitiveType::Int32 => DataType::Int32,
            PrimitiveType::Int64 => DataType::Int64,
            PrimitiveType::UInt8 => DataType::UInt8,
            PrimitiveType::UInt16 => DataType::UInt16,
            PrimitiveType::UInt32 => DataType::UInt32,
            PrimitiveType::UInt64 => DataType::UInt64,
            PrimitiveType::Float32 => DataType::Float32,
            PrimitiveType::Float64 => DataType::Float64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_of_temporal() {
        assert_eq!(
            DataType::Date32.to_physical_type(),
            PhysicalType::Primitive(PrimitiveType::Int32)
        );
        assert_eq!(
            DataType::Timestamp(TimeUnit::Second, Some("+01:00".to_string())).to_physical_type(),
            PhysicalType::Primitive(PrimitiveType::Int64)
        );
    }

    #[test]
    fn equals_ignores_child_names() {
        let a = DataType::List(Box::new(Field::new("item", DataType::Int32, true)));
        let b = DataType::List(Box::new(Field::new("values", DataType::Int32, true)));
        let c = DataType::List(Box::new(Field::new("item", DataType::Int32, false)));
        assert_ne!(a, b);
        assert!(a.equals_datatype(&b));
        assert!(!a.equals_datatype(&c));
    }
}
