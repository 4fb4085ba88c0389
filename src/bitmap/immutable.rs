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

use crate::buffer::Buffer;
use crate::error::{Error, Result};

use super::utils::{bytes_for, count_zeros, get_bit, BitmapIter};
use super::MutableBitmap;

/// An immutable container whose API is optimized to handle bitmaps. All quantities on this
/// container's API are measured in bits.
/// # Implementation
/// * memory on this container is sharable across thread boundaries
/// * Cloning [`Bitmap`] is `O(1)`
/// * Slicing [`Bitmap`] is `O(1)` plus the count of its unset bits
#[derive(Clone)]
pub struct Bitmap {
    bytes: Buffer,
    // both are measured in bits. They are used to bound the bitmap to a region of Bytes.
    offset: usize,
    length: usize,
    // this is a cache: it must be computed on initialization
    unset_bits: usize,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bitmap { len: ")?;
        write!(f, "{}, null_count: {}, ", self.length, self.unset_bits)?;
        f.debug_list().entries(self.iter().map(|x| x as u8)).finish()?;
        f.write_str(" }")
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        MutableBitmap::new().into()
    }
}

impl Bitmap {
    /// Initializes an empty [`Bitmap`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes a new [`Bitmap`] from a [`Buffer`] and a length.
    /// # Errors
    /// This function errors iff `length > bytes.len() * 8`
    #[inline]
    pub fn try_new(bytes: Buffer, length: usize) -> Result<Self> {
        if length > bytes.len().saturating_mul(8) {
            return Err(Error::oos(format!(
                "The length of the bitmap ({}) must be `<=` to the number of bytes times 8 ({})",
                length,
                bytes.len().saturating_mul(8)
            )));
        }
        let unset_bits = count_zeros(&bytes, 0, length);
        Ok(Self {
            bytes,
            offset: 0,
            length,
            unset_bits,
        })
    }

    /// Creates a new [`Bitmap`] from a slice and length.
    /// # Panics
    /// Panics iff `length > slice.len() * 8`
    #[inline]
    pub fn from_u8_slice<T: AsRef<[u8]>>(slice: T, length: usize) -> Self {
        let slice = slice.as_ref();
        assert!(length <= slice.len() * 8);
        let bytes = Buffer::from(&slice[..bytes_for(length)]);
        let unset_bits = count_zeros(&bytes, 0, length);
        Self {
            bytes,
            offset: 0,
            length,
            unset_bits,
        }
    }

    /// Creates a [`Bitmap`] over a region of `bytes` whose number of unset bits is known.
    /// # Safety
    /// `offset + length <= bytes.len() * 8` and `unset_bits` must equal the number of unset bits
    /// in the region.
    #[inline]
    pub(crate) unsafe fn from_inner_unchecked(
        bytes: Buffer,
        offset: usize,
        length: usize,
        unset_bits: usize,
    ) -> Self {
        debug_assert!(offset + length <= bytes.len() * 8);
        Self {
            bytes,
            offset,
            length,
            unset_bits,
        }
    }

    /// Returns the length of the [`Bitmap`].
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns whether [`Bitmap`] is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of unset bits on this [`Bitmap`].
    #[inline]
    pub fn unset_bits(&self) -> usize {
        self.unset_bits
    }

    /// Returns the number of unset bits on this [`Bitmap`].
    /// When used as a validity, this is the number of nulls.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.unset_bits
    }

    /// Slices `self`, offsetting by `offset` and truncating up to `length` bits.
    /// # Panic
    /// Panics iff `offset + length > self.length`, i.e. if the offset and `length`
    /// exceeds the allocated capacity of `self`.
    #[inline]
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(offset + length <= self.length);
        let offset = self.offset + offset;
        Self {
            bytes: self.bytes.clone(),
            offset,
            length,
            unset_bits: count_zeros(&self.bytes, offset, length),
        }
    }

    /// Returns whether the bit at position `i` is set.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn get_bit(&self, i: usize) -> bool {
        assert!(i < self.length);
        get_bit(&self.bytes, self.offset + i)
    }

    /// Returns an iterator over bits.
    pub fn iter(&self) -> BitmapIter {
        BitmapIter::new(&self.bytes, self.offset, self.length)
    }

    /// Returns the byte slice of this [`Bitmap`] with its offset and length, in bits.
    /// The returned tuple contains:
    /// * `.1`: The byte slice, truncated to the start of the first bit. So the start of the slice
    ///       is within the first 8 bits.
    /// * `.2`: The start offset in bits on a range `0 <= offsets < 8`.
    /// * `.3`: The length in number of bits.
    #[inline]
    pub fn as_slice(&self) -> (&[u8], usize, usize) {
        let start = self.offset / 8;
        let len = bytes_for(self.offset % 8 + self.length);
        (
            &self.bytes[start..start + len],
            self.offset % 8,
            self.length,
        )
    }

    /// Returns the underlying [`Buffer`] and the offset, in bits, of this [`Bitmap`] within it.
    #[inline]
    pub fn buffer(&self) -> (&Buffer, usize) {
        (&self.bytes, self.offset)
    }

    /// Returns a [`Buffer`] whose bit `i` is bit `i` of this bitmap.
    /// This is `O(1)` when the offset is a multiple of 8 and a copy otherwise.
    pub fn to_aligned_buffer(&self) -> Buffer {
        if self.offset % 8 == 0 {
            let start = self.offset / 8;
            self.bytes.slice(start, bytes_for(self.length))
        } else {
            MutableBitmap::from_iter(self.iter()).into_buffer()
        }
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        MutableBitmap::from_iter(iter).into()
    }
}

impl<const N: usize> From<[bool; N]> for Bitmap {
    fn from(values: [bool; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Bitmap {
    type Item = bool;
    type IntoIter = BitmapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
