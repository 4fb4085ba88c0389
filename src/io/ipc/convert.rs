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

//! Conversion between [`Schema`] and its flatbuffers representation.
use flatbuffers::{FlatBufferBuilder, WIPOffset};

use crate::datatypes::{DataType, Field, IntegerType, Metadata, Schema, TimeUnit, UnionMode};
use crate::error::{Error, Result};

use super::format;

mod type_id {
    pub const NULL: u8 = 0;
    pub const BOOLEAN: u8 = 1;
    pub const INT8: u8 = 2;
    pub const INT16: u8 = 3;
    pub const INT32: u8 = 4;
    pub const INT64: u8 = 5;
    pub const UINT8: u8 = 6;
    pub const UINT16: u8 = 7;
    pub const UINT32: u8 = 8;
    pub const UINT64: u8 = 9;
    pub const FLOAT32: u8 = 10;
    pub const FLOAT64: u8 = 11;
    pub const TIMESTAMP: u8 = 12;
    pub const DATE32: u8 = 13;
    pub const DATE64: u8 = 14;
    pub const TIME32: u8 = 15;
    pub const TIME64: u8 = 16;
    pub const DURATION: u8 = 17;
    pub const BINARY: u8 = 18;
    pub const LARGE_BINARY: u8 = 19;
    pub const UTF8: u8 = 20;
    pub const LARGE_UTF8: u8 = 21;
    pub const LIST: u8 = 22;
    pub const FIXED_SIZE_LIST: u8 = 23;
    pub const LARGE_LIST: u8 = 24;
    pub const STRUCT: u8 = 25;
    pub const UNION: u8 = 26;
    pub const DICTIONARY: u8 = 27;
}

fn serialize_time_unit(unit: TimeUnit) -> u8 {
    match unit {
        TimeUnit::Second => 0,
        TimeUnit::Millisecond => 1,
        TimeUnit::Microsecond => 2,
        TimeUnit::Nanosecond => 3,
    }
}

fn deserialize_time_unit(unit: u8) -> Result<TimeUnit> {
    Ok(match unit {
        0 => TimeUnit::Second,
        1 => TimeUnit::Millisecond,
        2 => TimeUnit::Microsecond,
        3 => TimeUnit::Nanosecond,
        other => return Err(Error::decode(format!("unknown time unit {}", other))),
    })
}

fn serialize_integer_type(key: IntegerType) -> u8 {
    match key {
        IntegerType::Int8 => 0,
        IntegerType::Int16 => 1,
        IntegerType::Int32 => 2,
        IntegerType::Int64 => 3,
        IntegerType::UInt8 => 4,
        IntegerType::UInt16 => 5,
        IntegerType::UInt32 => 6,
        IntegerType::UInt64 => 7,
    }
}

fn deserialize_integer_type(key: u8) -> Result<IntegerType> {
    Ok(match key {
        0 => IntegerType::Int8,
        1 => IntegerType::Int16,
        2 => IntegerType::Int32,
        3 => IntegerType::Int64,
        4 => IntegerType::UInt8,
        5 => IntegerType::UInt16,
        6 => IntegerType::UInt32,
        7 => IntegerType::UInt64,
        other => return Err(Error::decode(format!("unknown dictionary key type {}", other))),
    })
}

fn serialize_metadata<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    metadata: &Metadata,
) -> Option<WIPOffset<format::KeyValueVector<'a>>> {
    if metadata.is_empty() {
        return None;
    }
    let entries = metadata
        .iter()
        .map(|(key, value)| format::KeyValue::create(fbb, key, value))
        .collect::<Vec<_>>();
    Some(fbb.create_vector(&entries))
}

fn deserialize_metadata(metadata: Option<format::KeyValueVector>) -> Result<Metadata> {
    metadata
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    let key = entry
                        .key()
                        .ok_or_else(|| Error::decode("a metadata entry has no key"))?;
                    Ok((key.to_string(), entry.value().unwrap_or_default().to_string()))
                })
                .collect::<Result<Metadata>>()
        })
        .unwrap_or_else(|| Ok(Metadata::new()))
}

fn serialize_fields<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    fields: &[Field],
) -> Result<WIPOffset<format::FieldVector<'a>>> {
    let fields = fields
        .iter()
        .map(|field| serialize_field(fbb, field))
        .collect::<Result<Vec<_>>>()?;
    Ok(fbb.create_vector(&fields))
}

fn serialize_type<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    data_type: &DataType,
) -> Result<WIPOffset<format::Type<'a>>> {
    use type_id::*;
    let mut args = format::TypeArgs::default();
    args.id = match data_type {
        DataType::Null => NULL,
        DataType::Boolean => BOOLEAN,
        DataType::Int8 => INT8,
        DataType::Int16 => INT16,
        DataType::Int32 => INT32,
        DataType::Int64 => INT64,
        DataType::UInt8 => UINT8,
        DataType::UInt16 => UINT16,
        DataType::UInt32 => UINT32,
        DataType::UInt64 => UINT64,
        DataType::Float32 => FLOAT32,
        DataType::Float64 => FLOAT64,
        DataType::Timestamp(unit, tz) => {
            args.unit = serialize_time_unit(*unit);
            args.timezone = tz.as_ref().map(|tz| fbb.create_string(tz));
            TIMESTAMP
        }
        DataType::Date32 => DATE32,
        DataType::Date64 => DATE64,
        DataType::Time32(unit) => {
            args.unit = serialize_time_unit(*unit);
            TIME32
        }
        DataType::Time64(unit) => {
            args.unit = serialize_time_unit(*unit);
            TIME64
        }
        DataType::Duration(unit) => {
            args.unit = serialize_time_unit(*unit);
            DURATION
        }
        DataType::Binary => BINARY,
        DataType::LargeBinary => LARGE_BINARY,
        DataType::Utf8 => UTF8,
        DataType::LargeUtf8 => LARGE_UTF8,
        DataType::List(field) => {
            args.children = Some(serialize_fields(fbb, std::slice::from_ref(field.as_ref()))?);
            LIST
        }
        DataType::LargeList(field) => {
            args.children = Some(serialize_fields(fbb, std::slice::from_ref(field.as_ref()))?);
            LARGE_LIST
        }
        DataType::FixedSizeList(field, size) => {
            args.children = Some(serialize_fields(fbb, std::slice::from_ref(field.as_ref()))?);
            args.size = i32::try_from(*size).map_err(|_| Error::Overflow)?;
            FIXED_SIZE_LIST
        }
        DataType::Struct(fields) => {
            args.children = Some(serialize_fields(fbb, fields)?);
            STRUCT
        }
        DataType::Union(fields, ids, mode) => {
            args.children = Some(serialize_fields(fbb, fields)?);
            args.type_ids = ids.as_ref().map(|ids| fbb.create_vector(ids.as_slice()));
            args.mode = match mode {
                UnionMode::Sparse => 0,
                UnionMode::Dense => 1,
            };
            UNION
        }
        DataType::Dictionary(key, values, ordered) => {
            args.key = serialize_integer_type(*key);
            args.ordered = *ordered;
            args.value = Some(serialize_type(fbb, values)?);
            DICTIONARY
        }
    };
    Ok(format::Type::create(fbb, &args))
}

fn serialize_field<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    field: &Field,
) -> Result<WIPOffset<format::Field<'a>>> {
    let name = fbb.create_string(field.name());
    let type_ = serialize_type(fbb, field.data_type())?;
    let metadata = serialize_metadata(fbb, field.metadata());
    Ok(format::Field::create(fbb, name, field.is_nullable(), type_, metadata))
}

/// Serializes a [`Schema`] into `fbb`.
/// # Errors
/// Errors with [`Error::Overflow`] iff a fixed-size list is larger than `i32::MAX`.
pub(crate) fn serialize_schema<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    schema: &Schema,
) -> Result<WIPOffset<format::Schema<'a>>> {
    let fields = serialize_fields(fbb, schema.fields())?;
    let metadata = serialize_metadata(fbb, schema.metadata());
    Ok(format::Schema::create(fbb, fields, metadata))
}

fn deserialize_fields(fields: Option<format::FieldVector>) -> Result<Vec<Field>> {
    fields
        .map(|fields| fields.iter().map(deserialize_field).collect())
        .unwrap_or_else(|| Ok(vec![]))
}

/// The single child of a list type.
fn deserialize_child(type_: &format::Type) -> Result<Box<Field>> {
    let mut children = deserialize_fields(type_.children())?;
    if children.len() != 1 {
        return Err(Error::decode(format!(
            "a list type requires exactly one child, but it has {}",
            children.len()
        )));
    }
    Ok(Box::new(children.remove(0)))
}

fn deserialize_type(type_: format::Type) -> Result<DataType> {
    use type_id::*;
    Ok(match type_.id() {
        NULL => DataType::Null,
        BOOLEAN => DataType::Boolean,
        INT8 => DataType::Int8,
        INT16 => DataType::Int16,
        INT32 => DataType::Int32,
        INT64 => DataType::Int64,
        UINT8 => DataType::UInt8,
        UINT16 => DataType::UInt16,
        UINT32 => DataType::UInt32,
        UINT64 => DataType::UInt64,
        FLOAT32 => DataType::Float32,
        FLOAT64 => DataType::Float64,
        TIMESTAMP => DataType::Timestamp(
            deserialize_time_unit(type_.unit())?,
            type_.timezone().map(|tz| tz.to_string()),
        ),
        DATE32 => DataType::Date32,
        DATE64 => DataType::Date64,
        TIME32 => match deserialize_time_unit(type_.unit())? {
            unit @ (TimeUnit::Second | TimeUnit::Millisecond) => DataType::Time32(unit),
            unit => return Err(Error::decode(format!("Time32 cannot be in {:?}", unit))),
        },
        TIME64 => match deserialize_time_unit(type_.unit())? {
            unit @ (TimeUnit::Microsecond | TimeUnit::Nanosecond) => DataType::Time64(unit),
            unit => return Err(Error::decode(format!("Time64 cannot be in {:?}", unit))),
        },
        DURATION => DataType::Duration(deserialize_time_unit(type_.unit())?),
        BINARY => DataType::Binary,
        LARGE_BINARY => DataType::LargeBinary,
        UTF8 => DataType::Utf8,
        LARGE_UTF8 => DataType::LargeUtf8,
        LIST => DataType::List(deserialize_child(&type_)?),
        LARGE_LIST => DataType::LargeList(deserialize_child(&type_)?),
        FIXED_SIZE_LIST => {
            let size = usize::try_from(type_.size())
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    Error::decode(format!("invalid fixed-size list size {}", type_.size()))
                })?;
            DataType::FixedSizeList(deserialize_child(&type_)?, size)
        }
        STRUCT => DataType::Struct(deserialize_fields(type_.children())?),
        UNION => {
            let fields = deserialize_fields(type_.children())?;
            let ids = type_.type_ids().map(|ids| ids.iter().collect::<Vec<_>>());
            let mode = match type_.mode() {
                0 => UnionMode::Sparse,
                1 => UnionMode::Dense,
                other => return Err(Error::decode(format!("unknown union mode {}", other))),
            };
            DataType::Union(fields, ids, mode)
        }
        DICTIONARY => {
            let values = type_
                .value()
                .ok_or_else(|| Error::decode("a dictionary type has no value type"))?;
            DataType::Dictionary(
                deserialize_integer_type(type_.key())?,
                Box::new(deserialize_type(values)?),
                type_.ordered(),
            )
        }
        other => return Err(Error::decode(format!("unknown type id {}", other))),
    })
}

fn deserialize_field(field: format::Field) -> Result<Field> {
    let name = field
        .name()
        .ok_or_else(|| Error::decode("a field has no name"))?;
    let type_ = field
        .type_()
        .ok_or_else(|| Error::decode(format!("the field \"{}\" has no type", name)))?;
    Ok(
        Field::new(name, deserialize_type(type_)?, field.nullable())
            .with_metadata(deserialize_metadata(field.metadata())?),
    )
}

/// Deserializes a [`Schema`] from its flatbuffers representation.
pub(crate) fn deserialize_schema(schema: format::Schema) -> Result<Schema> {
    let fields = deserialize_fields(schema.fields())?;
    let metadata = deserialize_metadata(schema.metadata())?;
    Ok(Schema::new_with_metadata(fields, metadata))
}
