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

use std::sync::Arc;

use crate::types::NativeType;

use super::{bytes::Bytes, MutableBuffer};

/// [`Buffer`] is a contiguous, immutable region of bytes that can
/// be shared across thread boundaries.
///
/// The easiest way to think about `Buffer` is being equivalent to
/// an immutable `Arc<[u8]>`, with the following differences:
/// * its memory is aligned to 64 bytes
/// * clone is `O(1)` and shares the allocation
/// * [`Buffer::slice`] creates a new [`Buffer`] over a sub-range without copying
///
/// A [`Buffer`] carries no type: interpreting its bytes is the responsibility of
/// [`crate::array::ArrayData`] and its typed views.
/// # Example
/// ```
/// # use columnar::buffer::Buffer;
/// let buffer = Buffer::from(&[1u8, 2, 3, 4]);
/// let sliced = buffer.slice(1, 2);
/// assert_eq!(sliced.as_slice(), &[2, 3]);
/// ```
#[derive(Clone)]
pub struct Buffer {
    /// the internal byte buffer.
    data: Arc<Bytes>,

    /// The offset into the buffer.
    offset: usize,

    // the length of the buffer. Given a region `data` of N bytes, [offset..offset+length] is visible
    // to this buffer.
    length: usize,
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl Default for Buffer {
    #[inline]
    fn default() -> Self {
        MutableBuffer::new().into()
    }
}

impl Buffer {
    /// Creates an empty [`Buffer`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Buffer`] with `length` zeroed bytes.
    #[inline]
    pub fn new_zeroed(length: usize) -> Self {
        MutableBuffer::from_len_zeroed(length).into()
    }

    /// Creates a [`Buffer`] by copying the byte representation of `data`.
    /// ```
    /// # use columnar::buffer::Buffer;
    /// let buffer = Buffer::from_slice_ref(&[1i32, 2]);
    /// assert_eq!(buffer.len(), 8);
    /// assert_eq!(buffer.typed_data::<i32>(), &[1, 2]);
    /// ```
    #[inline]
    pub fn from_slice_ref<T: NativeType>(slice: &[T]) -> Self {
        let mut buffer = MutableBuffer::with_capacity(std::mem::size_of_val(slice));
        buffer.extend_from_slice(slice);
        buffer.into()
    }

    /// Creates a [`Buffer`] from a [`Vec`]. Its values are copied to an aligned region.
    #[inline]
    pub fn from_vec<T: NativeType>(data: Vec<T>) -> Self {
        Self::from_slice_ref(data.as_slice())
    }

    /// Auxiliary method to create a new Buffer
    pub(crate) fn from_bytes(bytes: Bytes) -> Self {
        let length = bytes.len();
        Buffer {
            data: Arc::new(bytes),
            offset: 0,
            length,
        }
    }

    /// Returns the number of bytes in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the byte slice stored in this buffer
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // Safety:
        // invariant of this struct `offset + length <= data.len()`
        debug_assert!(self.offset + self.length <= self.data.len());
        unsafe {
            self.data
                .get_unchecked(self.offset..self.offset + self.length)
        }
    }

    /// Returns a read-only view of the bytes of this buffer. Alias of [`Buffer::as_slice`].
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }

    /// Returns a new [`Buffer`] that is a slice of this buffer starting at `offset`
    /// with `length` bytes. Doing so allows the same memory region to be shared between buffers.
    /// # Panics
    /// Panics iff `offset + length` is larger than `len`.
    #[inline]
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(
            offset
                .checked_add(length)
                .map_or(false, |end| end <= self.len()),
            "the offset of the new Buffer cannot exceed the existing length"
        );
        // Safety: we just checked bounds
        unsafe { self.slice_unchecked(offset, length) }
    }

    /// Returns a new [`Buffer`] that is a slice of this buffer starting at `offset`.
    /// Doing so allows the same memory region to be shared between buffers.
    /// # Safety
    /// The caller must ensure `offset + length <= self.len()`
    #[inline]
    pub unsafe fn slice_unchecked(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.clone(),
            offset: self.offset + offset,
            length,
        }
    }

    /// Returns a pointer to the start of this buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        // Safety: invariant of this struct `offset <= data.len()`
        unsafe { self.data.ptr().as_ptr().add(self.offset) }
    }

    /// Returns the offset of this buffer, in bytes, within its allocation.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns whether `self` and `other` share the same underlying allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns whether the bytes of this buffer can be viewed as a slice of `T`.
    #[inline]
    pub fn is_aligned_to<T: NativeType>(&self) -> bool {
        self.as_ptr() as usize % std::mem::align_of::<T>() == 0
    }

    /// Views this buffer as a slice of `T`. Trailing bytes that do not form a whole `T` are ignored.
    /// # Panics
    /// This function panics iff the buffer is not aligned to `T`. Buffers allocated by this crate
    /// are always aligned; buffers sliced at an offset not multiple of `size_of::<T>()` are not.
    #[inline]
    pub fn typed_data<T: NativeType>(&self) -> &[T] {
        assert!(
            self.is_aligned_to::<T>(),
            "the buffer must be aligned to its native type"
        );
        // Safety: aligned, and every bit pattern is a valid `NativeType`
        unsafe {
            std::slice::from_raw_parts(
                self.as_ptr() as *const T,
                self.len() / std::mem::size_of::<T>(),
            )
        }
    }
}

impl<T: AsRef<[u8]>> From<T> for Buffer {
    #[inline]
    fn from(p: T) -> Self {
        Self::from_slice_ref::<u8>(p.as_ref())
    }
}

impl std::ops::Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<T: NativeType> FromIterator<T> for Buffer {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MutableBuffer::from_iter(iter).into()
    }
}
