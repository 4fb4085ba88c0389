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

use crate::bitmap::{
    utils::{bytes_for, count_zeros, get_bit},
    Bitmap,
};
use crate::buffer::Buffer;
use crate::datatypes::{DataType, Field, IntegerType, PhysicalType, UnionMode};
use crate::error::{Error, Result};
use crate::types::{DictionaryKey, NativeType, Offset};

use super::specification::{check_indexes, try_check_offsets, try_check_utf8};

/// The generic, untyped description of an array: its [`DataType`], length, offset and null
/// count, together with its [`Buffer`]s and children.
///
/// The number and meaning of buffers and children is fixed by the [`PhysicalType`] of the
/// data type:
///
/// | physical type | buffers | children |
/// |---|---|---|
/// | `Null` | none | none |
/// | `Boolean` | values bitmap | none |
/// | `Primitive` | values | none |
/// | `Binary`, `Utf8` | offsets, values | none |
/// | `List` | offsets | values |
/// | `FixedSizeList` | none | values |
/// | `Struct` | none | one per field |
/// | `Dictionary` | keys | values |
/// | `Union` | type ids (+ offsets when dense) | one per field |
///
/// Every type except `Null` and `Union` may also have a validity bitmap, where bit `offset + i`
/// set means that slot `i` is valid.
///
/// The offset applies to the buffers of this node. Children of a struct, a fixed-size list or
/// a sparse union are addressed at the parent's offset (times the list size), while children
/// of lists and dense unions are addressed through their offsets buffer.
///
/// [`ArrayData`] is immutable. Cloning it is `O(number of nodes)` and shares every buffer.
#[derive(Debug, Clone)]
pub struct ArrayData {
    data_type: DataType,
    len: usize,
    offset: usize,
    null_count: usize,
    validity: Option<Buffer>,
    buffers: Vec<Buffer>,
    child_data: Vec<ArrayData>,
}

impl ArrayData {
    /// Returns a new [`ArrayDataBuilder`] of `data_type`.
    pub fn builder(data_type: DataType) -> ArrayDataBuilder {
        ArrayDataBuilder::new(data_type)
    }

    /// Creates a new [`ArrayData`] with offset 0, computing its null count from `validity`.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the buffers or children are inconsistent with
    /// `data_type` and `len`.
    pub fn try_new(
        data_type: DataType,
        len: usize,
        validity: Option<Buffer>,
        buffers: Vec<Buffer>,
        child_data: Vec<ArrayData>,
    ) -> Result<Self> {
        Self::try_new_with_offset(data_type, len, 0, None, validity, buffers, child_data)
    }

    fn try_new_with_offset(
        data_type: DataType,
        len: usize,
        offset: usize,
        null_count: Option<usize>,
        validity: Option<Buffer>,
        buffers: Vec<Buffer>,
        child_data: Vec<ArrayData>,
    ) -> Result<Self> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| Error::oos("offset + length overflows"))?;

        let computed = match (&data_type, &validity) {
            (DataType::Null, Some(_)) | (DataType::Union(..), Some(_)) => {
                return Err(Error::oos(format!(
                    "arrays of type {:?} cannot have a validity bitmap",
                    data_type
                )))
            }
            (DataType::Null, None) => len,
            (_, Some(validity)) => {
                if validity.len() < bytes_for(end) {
                    return Err(Error::oos(format!(
                        "the validity bitmap has {} bytes but offset + length ({}) requires {}",
                        validity.len(),
                        end,
                        bytes_for(end)
                    )));
                }
                count_zeros(validity, offset, len)
            }
            (_, None) => 0,
        };
        if let Some(null_count) = null_count {
            if null_count > len {
                return Err(Error::oos(format!(
                    "the null count ({}) must be <= the length ({})",
                    null_count, len
                )));
            }
            if null_count != computed {
                return Err(Error::oos(format!(
                    "the null count ({}) does not match the validity bitmap ({})",
                    null_count, computed
                )));
            }
        }

        let data = Self {
            data_type,
            len,
            offset,
            null_count: computed,
            validity,
            buffers,
            child_data,
        };
        data.validate()?;
        Ok(data)
    }

    /// Creates a new [`ArrayData`] without validating it.
    /// # Safety
    /// The caller must ensure that the arguments satisfy every invariant checked by
    /// [`ArrayData::try_new`], and that `null_count` is the number of unset bits of `validity`
    /// in `[offset, offset + len)`.
    pub(crate) unsafe fn new_unchecked(
        data_type: DataType,
        len: usize,
        offset: usize,
        null_count: usize,
        validity: Option<Buffer>,
        buffers: Vec<Buffer>,
        child_data: Vec<ArrayData>,
    ) -> Self {
        let data = Self {
            data_type,
            len,
            offset,
            null_count,
            validity,
            buffers,
            child_data,
        };
        debug_assert!(data.validate().is_ok(), "{:?}", data.validate());
        data
    }

    /// Creates an [`ArrayData`] of `len` nulls of type [`DataType::Null`].
    pub fn new_null(len: usize) -> Self {
        Self {
            data_type: DataType::Null,
            len,
            offset: 0,
            null_count: len,
            validity: None,
            buffers: vec![],
            child_data: vec![],
        }
    }

    /// The [`DataType`] of this [`ArrayData`].
    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// The number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The offset of slot 0 into the buffers of this node.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of null slots.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// The validity bitmap buffer, where bit `offset + i` corresponds to slot `i`.
    #[inline]
    pub fn validity(&self) -> Option<&Buffer> {
        self.validity.as_ref()
    }

    /// The validity of this array as a [`Bitmap`] of `len` bits.
    pub fn validity_bitmap(&self) -> Option<Bitmap> {
        self.validity.as_ref().map(|validity| {
            // Safety: bounds and null count are invariants of this struct
            unsafe {
                Bitmap::from_inner_unchecked(
                    validity.clone(),
                    self.offset,
                    self.len,
                    self.null_count,
                )
            }
        })
    }

    /// The buffers of this node, excluding the validity.
    #[inline]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// The children of this node.
    #[inline]
    pub fn child_data(&self) -> &[ArrayData] {
        &self.child_data
    }

    /// Returns whether slot `i` is null.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        !self.is_valid(i)
    }

    /// Returns whether slot `i` is valid.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len, "index {} out of bounds for length {}", i, self.len);
        match (&self.data_type, &self.validity) {
            (DataType::Null, _) => false,
            (_, Some(validity)) => get_bit(validity, self.offset + i),
            (_, None) => true,
        }
    }

    /// Returns a zero-copy slice of this [`ArrayData`] of `length` slots starting at `offset`.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(
            offset
                .checked_add(length)
                .map_or(false, |end| end <= self.len),
            "the offset of the new ArrayData cannot exceed the existing length"
        );
        let offset = self.offset + offset;
        let null_count = match (&self.data_type, &self.validity) {
            (DataType::Null, _) => length,
            (_, Some(validity)) => count_zeros(validity, offset, length),
            (_, None) => 0,
        };
        Self {
            data_type: self.data_type.clone(),
            len: length,
            offset,
            null_count,
            validity: self.validity.clone(),
            buffers: self.buffers.clone(),
            child_data: self.child_data.clone(),
        }
    }

    /// Returns buffer `i` as a slice of `T`.
    #[inline]
    pub(crate) fn buffer<T: NativeType>(&self, i: usize) -> &[T] {
        self.buffers[i].typed_data::<T>()
    }

    /// Returns the offsets of this node, `len + 1` of them, starting at its offset.
    /// Must only be called for types whose first buffer is an offsets buffer.
    #[inline]
    pub(crate) fn offsets<O: Offset>(&self) -> &[O] {
        let offsets = self.buffer::<O>(0);
        if offsets.is_empty() {
            // an empty array may have an empty offsets buffer
            &[]
        } else {
            &offsets[self.offset..self.offset + self.len + 1]
        }
    }

    /// Validates every layout invariant of this node, assuming its children are valid.
    fn validate(&self) -> Result<()> {
        if self.null_count > self.len {
            return Err(Error::oos(format!(
                "the null count ({}) must be <= the length ({})",
                self.null_count, self.len
            )));
        }
        let end = self.offset + self.len;

        match self.data_type.to_physical_type() {
            PhysicalType::Null => self.expect_layout(0, 0),
            PhysicalType::Boolean => {
                self.expect_layout(1, 0)?;
                self.expect_buffer_len(0, bytes_for(end), "values")
            }
            PhysicalType::Primitive(primitive) => {
                self.expect_layout(1, 0)?;
                let width = primitive.byte_width();
                self.expect_aligned(0, width, "values")?;
                self.expect_buffer_len(0, required_bytes(end, width)?, "values")
            }
            PhysicalType::Binary => self.validate_binary::<i32>(false),
            PhysicalType::LargeBinary => self.validate_binary::<i64>(false),
            PhysicalType::Utf8 => self.validate_binary::<i32>(true),
            PhysicalType::LargeUtf8 => self.validate_binary::<i64>(true),
            PhysicalType::List => self.validate_list::<i32>(),
            PhysicalType::LargeList => self.validate_list::<i64>(),
            PhysicalType::FixedSizeList => self.validate_fixed_size_list(),
            PhysicalType::Struct => self.validate_struct(),
            PhysicalType::Dictionary(key_type) => match key_type {
                IntegerType::Int8 => self.validate_dictionary::<i8>(),
                IntegerType::Int16 => self.validate_dictionary::<i16>(),
                IntegerType::Int32 => self.validate_dictionary::<i32>(),
                IntegerType::Int64 => self.validate_dictionary::<i64>(),
                IntegerType::UInt8 => self.validate_dictionary::<u8>(),
                IntegerType::UInt16 => self.validate_dictionary::<u16>(),
                IntegerType::UInt32 => self.validate_dictionary::<u32>(),
                IntegerType::UInt64 => self.validate_dictionary::<u64>(),
            },
            PhysicalType::Union => self.validate_union(),
        }
    }

    fn expect_layout(&self, buffers: usize, children: usize) -> Result<()> {
        if self.buffers.len() != buffers {
            return Err(Error::oos(format!(
                "arrays of type {:?} require {} buffer(s), but {} were given",
                self.data_type,
                buffers,
                self.buffers.len()
            )));
        }
        if self.child_data.len() != children {
            return Err(Error::oos(format!(
                "arrays of type {:?} require {} child(ren), but {} were given",
                self.data_type,
                children,
                self.child_data.len()
            )));
        }
        Ok(())
    }

    fn expect_buffer_len(&self, i: usize, required: usize, name: &str) -> Result<()> {
        let len = self.buffers[i].len();
        if len < required {
            return Err(Error::oos(format!(
                "the {} buffer of an array of type {:?} has {} bytes but {} are required",
                name, self.data_type, len, required
            )));
        }
        Ok(())
    }

    fn expect_aligned(&self, i: usize, width: usize, name: &str) -> Result<()> {
        if self.buffers[i].as_ptr() as usize % width != 0 {
            return Err(Error::oos(format!(
                "the {} buffer of an array of type {:?} is not aligned to {} bytes",
                name, self.data_type, width
            )));
        }
        Ok(())
    }

    fn expect_child_type(&self, field: &Field, child: &ArrayData) -> Result<()> {
        if !field.data_type().equals_datatype(child.data_type()) {
            return Err(Error::oos(format!(
                "the child \"{}\" is declared as {:?} but its data is of type {:?}",
                field.name(),
                field.data_type(),
                child.data_type()
            )));
        }
        Ok(())
    }

    /// Checks the offsets buffer (buffer 0) against `values_len`, returning the offsets in use.
    fn validate_offsets<O: Offset>(&self, values_len: usize) -> Result<&[O]> {
        let width = std::mem::size_of::<O>();
        self.expect_aligned(0, width, "offsets")?;
        if self.len == 0 && self.buffers[0].is_empty() {
            return Ok(&[]);
        }
        let end = self.offset + self.len;
        let required = required_bytes(end.checked_add(1).ok_or_else(overflow)?, width)?;
        self.expect_buffer_len(0, required, "offsets")?;
        let offsets = self.offsets::<O>();
        try_check_offsets(offsets, values_len)?;
        Ok(offsets)
    }

    fn validate_binary<O: Offset>(&self, is_utf8: bool) -> Result<()> {
        self.expect_layout(2, 0)?;
        let values = self.buffers[1].as_slice();
        let offsets = self.validate_offsets::<O>(values.len())?;
        if is_utf8 && !offsets.is_empty() {
            try_check_utf8(offsets, values)?;
        }
        Ok(())
    }

    fn validate_list<O: Offset>(&self) -> Result<()> {
        self.expect_layout(1, 1)?;
        let field = match &self.data_type {
            DataType::List(field) | DataType::LargeList(field) => field,
            _ => unreachable!(),
        };
        let child = &self.child_data[0];
        self.expect_child_type(field, child)?;
        self.validate_offsets::<O>(child.len())?;
        Ok(())
    }

    fn validate_fixed_size_list(&self) -> Result<()> {
        self.expect_layout(0, 1)?;
        let (field, size) = match &self.data_type {
            DataType::FixedSizeList(field, size) => (field, *size),
            _ => unreachable!(),
        };
        if size == 0 {
            return Err(Error::oos("the size of a fixed-size list must be positive"));
        }
        let child = &self.child_data[0];
        self.expect_child_type(field, child)?;
        let required = (self.offset + self.len)
            .checked_mul(size)
            .ok_or_else(|| Error::oos("the size of the fixed-size list overflows"))?;
        if child.len() < required {
            return Err(Error::oos(format!(
                "a fixed-size list of size {} with offset + length {} requires {} child slots, but the child has {}",
                size,
                self.offset + self.len,
                required,
                child.len()
            )));
        }
        Ok(())
    }

    fn validate_struct(&self) -> Result<()> {
        let fields = match &self.data_type {
            DataType::Struct(fields) => fields,
            _ => unreachable!(),
        };
        self.expect_layout(0, fields.len())?;
        let end = self.offset + self.len;
        fields
            .iter()
            .zip(self.child_data.iter())
            .try_for_each(|(field, child)| {
                self.expect_child_type(field, child)?;
                if child.len() < end {
                    return Err(Error::oos(format!(
                        "the struct child \"{}\" has {} slots but offset + length of the struct is {}",
                        field.name(),
                        child.len(),
                        end
                    )));
                }
                Ok(())
            })
    }

    fn validate_dictionary<K: DictionaryKey>(&self) -> Result<()> {
        self.expect_layout(1, 1)?;
        let values_type = match &self.data_type {
            DataType::Dictionary(_, values_type, _) => values_type.as_ref(),
            _ => unreachable!(),
        };
        let values = &self.child_data[0];
        if !values_type.equals_datatype(values.data_type()) {
            return Err(Error::oos(format!(
                "the dictionary values are declared as {:?} but are of type {:?}",
                values_type,
                values.data_type()
            )));
        }
        let width = std::mem::size_of::<K>();
        self.expect_aligned(0, width, "keys")?;
        self.expect_buffer_len(0, required_bytes(self.offset + self.len, width)?, "keys")?;
        let keys = &self.buffer::<K>(0)[self.offset..self.offset + self.len];
        check_indexes(keys, |i| self.is_valid(i), values.len())
    }

    fn validate_union(&self) -> Result<()> {
        let (fields, ids, mode) = match &self.data_type {
            DataType::Union(fields, ids, mode) => (fields, ids.as_ref(), *mode),
            _ => unreachable!(),
        };
        let buffers = if mode.is_dense() { 2 } else { 1 };
        self.expect_layout(buffers, fields.len())?;
        if let Some(ids) = ids {
            if ids.len() != fields.len() {
                return Err(Error::oos(
                    "a union must declare one type id per field",
                ));
            }
        }
        fields
            .iter()
            .zip(self.child_data.iter())
            .try_for_each(|(field, child)| self.expect_child_type(field, child))?;

        let end = self.offset + self.len;
        self.expect_buffer_len(0, end, "types")?;
        let types = &self.buffer::<i8>(0)[self.offset..end];

        let child_index = |type_id: i8| -> Result<usize> {
            let index = match ids {
                Some(ids) => ids.iter().position(|id| *id == type_id as i32),
                None => usize::try_from(type_id).ok().filter(|i| *i < fields.len()),
            };
            index.ok_or_else(|| {
                Error::oos(format!("the union type id {} is not declared", type_id))
            })
        };

        match mode {
            UnionMode::Sparse => {
                types.iter().try_for_each(|t| child_index(*t).map(|_| ()))?;
                self.child_data.iter().try_for_each(|child| {
                    if child.len() < end {
                        Err(Error::oos(format!(
                            "sparse union children must have at least {} slots, but one has {}",
                            end,
                            child.len()
                        )))
                    } else {
                        Ok(())
                    }
                })
            }
            UnionMode::Dense => {
                self.expect_aligned(1, 4, "offsets")?;
                self.expect_buffer_len(1, required_bytes(end, 4)?, "offsets")?;
                let offsets = &self.buffer::<i32>(1)[self.offset..end];
                types
                    .iter()
                    .zip(offsets.iter())
                    .try_for_each(|(type_id, offset)| {
                        let child = &self.child_data[child_index(*type_id)?];
                        match usize::try_from(*offset) {
                            Ok(offset) if offset < child.len() => Ok(()),
                            _ => Err(Error::oos(format!(
                                "the dense union offset {} is out of bounds of a child with {} slots",
                                offset,
                                child.len()
                            ))),
                        }
                    })
            }
        }
    }
}

fn overflow() -> Error {
    Error::oos("the length of the array overflows the size of its buffers")
}

/// The number of bytes taken by `count` values of `width` bytes.
#[inline]
fn required_bytes(count: usize, width: usize) -> Result<usize> {
    count.checked_mul(width).ok_or_else(overflow)
}

/// Incremental builder of [`ArrayData`]. Use [`ArrayData::builder`] to create one.
/// # Example
/// ```
/// use columnar::array::ArrayData;
/// use columnar::buffer::Buffer;
/// use columnar::datatypes::DataType;
///
/// let data = ArrayData::builder(DataType::Int32)
///     .len(3)
///     .add_buffer(Buffer::from_slice_ref(&[1i32, 2, 3]))
///     .null_bit_buffer(Some(Buffer::from(&[0b00000101u8])))
///     .build()
///     .unwrap();
/// assert_eq!(data.null_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ArrayDataBuilder {
    data_type: DataType,
    len: usize,
    offset: usize,
    null_count: Option<usize>,
    validity: Option<Buffer>,
    buffers: Vec<Buffer>,
    child_data: Vec<ArrayData>,
}

impl ArrayDataBuilder {
    /// Creates a new, empty [`ArrayDataBuilder`] of `data_type`.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            len: 0,
            offset: 0,
            null_count: None,
            validity: None,
            buffers: vec![],
            child_data: vec![],
        }
    }

    /// Sets the number of slots.
    pub fn len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Sets the offset of slot 0 into the buffers.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Declares the null count, which [`ArrayDataBuilder::build`] checks against the validity.
    pub fn null_count(mut self, null_count: usize) -> Self {
        self.null_count = Some(null_count);
        self
    }

    /// Sets the validity bitmap.
    pub fn null_bit_buffer(mut self, validity: Option<Buffer>) -> Self {
        self.validity = validity;
        self
    }

    /// Appends a buffer.
    pub fn add_buffer(mut self, buffer: Buffer) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Replaces all buffers.
    pub fn buffers(mut self, buffers: Vec<Buffer>) -> Self {
        self.buffers = buffers;
        self
    }

    /// Appends a child.
    pub fn add_child_data(mut self, child: ArrayData) -> Self {
        self.child_data.push(child);
        self
    }

    /// Replaces all children.
    pub fn child_data(mut self, child_data: Vec<ArrayData>) -> Self {
        self.child_data = child_data;
        self
    }

    /// Validates and freezes the builder into an [`ArrayData`].
    /// # Errors
    /// Errors with [`Error::Layout`] when the layout is inconsistent with the data type.
    pub fn build(self) -> Result<ArrayData> {
        ArrayData::try_new_with_offset(
            self.data_type,
            self.len,
            self.offset,
            self.null_count,
            self.validity,
            self.buffers,
            self.child_data,
        )
    }
}
