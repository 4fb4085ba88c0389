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

use std::fmt::{Debug, Formatter, Result, Write};

use crate::bitmap::Bitmap;
use crate::datatypes::DataType;
use crate::temporal_conversions;
use crate::types::{NativeType, Offset};

use super::*;

/// Writes `len` slots as `[a, b, None, c]`, calling `d` for every valid slot.
pub(crate) fn write_vec<D, F>(
    f: &mut F,
    d: D,
    validity: Option<&Bitmap>,
    len: usize,
    null: &'static str,
    new_lines: bool,
) -> Result
where
    D: Fn(&mut F, usize) -> Result,
    F: Write,
{
    f.write_char('[')?;
    for index in 0..len {
        if index != 0 {
            f.write_char(',')?;
            f.write_char(if new_lines { '\n' } else { ' ' })?;
        }
        match validity {
            Some(validity) if !validity.get_bit(index) => write!(f, "{}", null)?,
            _ => d(f, index)?,
        }
    }
    f.write_char(']')
}

macro_rules! temporal {
    ($array:expr, $convert:expr) => {{
        let array = $array;
        Box::new(move |f: &mut F, index: usize| {
            let value = array.value(index);
            match $convert(value) {
                Some(x) => write!(f, "{}", x),
                // out of the range of chrono: the raw value
                None => write!(f, "{}", value),
            }
        })
    }};
}

macro_rules! duration {
    ($array:expr, $unit:expr) => {{
        let array = $array;
        let suffix = temporal_conversions::duration_suffix($unit);
        Box::new(move |f: &mut F, index: usize| write!(f, "{}{}", array.value(index), suffix))
    }};
}

macro_rules! plain {
    ($array:expr) => {{
        let array = $array;
        Box::new(move |f: &mut F, index: usize| write!(f, "{}", array.value(index)))
    }};
}

/// Returns a function writing the (valid) slot `index` of `array`, without its type.
pub(crate) fn get_write_value<'a, F: Write>(
    array: &'a Array,
) -> Box<dyn Fn(&mut F, usize) -> Result + 'a> {
    match array {
        Array::Null(_) => Box::new(|f: &mut F, _: usize| write!(f, "None")),
        Array::Boolean(a) => plain!(a),
        Array::Int8(a) => plain!(a),
        Array::Int16(a) => plain!(a),
        Array::Int32(a) => match a.data_type() {
            DataType::Date32 => temporal!(a, temporal_conversions::date32_to_date),
            DataType::Time32(unit) => {
                let unit = *unit;
                temporal!(a, |x| temporal_conversions::time32_to_time(x, unit))
            }
            _ => plain!(a),
        },
        Array::Int64(a) => match a.data_type() {
            DataType::Date64 => temporal!(a, temporal_conversions::date64_to_date),
            DataType::Time64(unit) => {
                let unit = *unit;
                temporal!(a, |x| temporal_conversions::time64_to_time(x, unit))
            }
            DataType::Timestamp(unit, None) => {
                let unit = *unit;
                temporal!(a, |x| temporal_conversions::timestamp_to_naive_datetime(
                    x, unit
                ))
            }
            DataType::Timestamp(unit, Some(tz)) => {
                let unit = *unit;
                temporal!(a, |x| temporal_conversions::timestamp_to_naive_datetime(
                    x, unit
                )
                .map(|x| format!("{} {}", x, tz)))
            }
            DataType::Duration(unit) => duration!(a, *unit),
            _ => plain!(a),
        },
        Array::UInt8(a) => plain!(a),
        Array::UInt16(a) => plain!(a),
        Array::UInt32(a) => plain!(a),
        Array::UInt64(a) => plain!(a),
        Array::Float32(a) => plain!(a),
        Array::Float64(a) => plain!(a),
        Array::Binary(a) => {
            Box::new(move |f: &mut F, index: usize| write_bytes(f, a.value(index)))
        }
        Array::LargeBinary(a) => {
            Box::new(move |f: &mut F, index: usize| write_bytes(f, a.value(index)))
        }
        Array::Utf8(a) => plain!(a),
        Array::LargeUtf8(a) => plain!(a),
        Array::List(a) => {
            Box::new(move |f: &mut F, index: usize| write_array(f, &a.value(index)))
        }
        Array::LargeList(a) => {
            Box::new(move |f: &mut F, index: usize| write_array(f, &a.value(index)))
        }
        Array::FixedSizeList(a) => {
            Box::new(move |f: &mut F, index: usize| write_array(f, &a.value(index)))
        }
        Array::Struct(a) => Box::new(move |f: &mut F, index: usize| {
            let index = a.data().offset() + index;
            f.write_char('{')?;
            for (i, (field, child)) in a.fields().iter().zip(a.values()).enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: ", field.name())?;
                write_slot(f, child, index)?;
            }
            f.write_char('}')
        }),
        Array::Dictionary(a) => Box::new(move |f: &mut F, index: usize| match a.key(index) {
            Some(key) => write_slot(f, a.values(), key),
            None => write!(f, "None"),
        }),
        Array::Union(a) => Box::new(move |f: &mut F, index: usize| {
            let (field, index) = a.index(index);
            write_slot(f, &a.values()[field], index)
        }),
    }
}

fn write_bytes<F: Write>(f: &mut F, bytes: &[u8]) -> Result {
    let writer = |f: &mut F, index: usize| write!(f, "{}", bytes[index]);
    write_vec(f, writer, None, bytes.len(), "None", false)
}

fn write_slot<F: Write>(f: &mut F, array: &Array, index: usize) -> Result {
    if array.is_null(index) {
        write!(f, "None")
    } else {
        get_write_value(array)(f, index)
    }
}

/// Writes every slot of `array`, without its type.
fn write_array<F: Write>(f: &mut F, array: &Array) -> Result {
    let writer = get_write_value(array);
    let validity = array.validity();
    write_vec(f, writer, validity.as_ref(), array.len(), "None", false)
}

fn write_head_and_slots(f: &mut Formatter<'_>, head: &str, array: &Array) -> Result {
    write!(f, "{}", head)?;
    write_array(f, array)
}

impl Debug for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match_array!(self, |a| Debug::fmt(a, f))
    }
}

impl Debug for NullArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "NullArray({})", self.len())
    }
}

impl<T: NativeType> Debug for PrimitiveArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let head = format!("{:?}", self.data_type());
        let array = Array::try_new(self.data().clone()).map_err(|_| std::fmt::Error)?;
        write_head_and_slots(f, &head, &array)
    }
}

impl Debug for BooleanArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_head_and_slots(f, "BooleanArray", &self.clone().into())
    }
}

impl<O: Offset> Debug for BinaryArray<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let head = if O::IS_LARGE {
            "LargeBinaryArray"
        } else {
            "BinaryArray"
        };
        write!(f, "{}", head)?;
        let writer = |f: &mut Formatter<'_>, index: usize| write_bytes(f, self.value(index));
        write_vec(f, writer, self.validity().as_ref(), self.len(), "None", false)
    }
}

impl<O: Offset> Debug for Utf8Array<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let head = if O::IS_LARGE {
            "LargeUtf8Array"
        } else {
            "Utf8Array"
        };
        write!(f, "{}", head)?;
        let writer = |f: &mut Formatter<'_>, index: usize| write!(f, "{}", self.value(index));
        write_vec(f, writer, self.validity().as_ref(), self.len(), "None", false)
    }
}

impl<O: Offset> Debug for ListArray<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let head = if O::IS_LARGE {
            "LargeListArray"
        } else {
            "ListArray"
        };
        write!(f, "{}", head)?;
        let writer = |f: &mut Formatter<'_>, index: usize| write_array(f, &self.value(index));
        write_vec(f, writer, self.validity().as_ref(), self.len(), "None", false)
    }
}

impl Debug for FixedSizeListArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "FixedSizeListArray")?;
        let writer = |f: &mut Formatter<'_>, index: usize| write_array(f, &self.value(index));
        write_vec(f, writer, self.validity().as_ref(), self.len(), "None", false)
    }
}

impl Debug for StructArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_head_and_slots(f, "StructArray", &self.clone().into())
    }
}

impl Debug for DictionaryArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_head_and_slots(f, "DictionaryArray", &self.clone().into())
    }
}

impl Debug for UnionArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_head_and_slots(f, "UnionArray", &self.clone().into())
    }
}
