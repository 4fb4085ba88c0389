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

use crate::buffer::{Buffer, MutableBuffer};

use super::utils::{bytes_for, count_zeros, get_bit, set, set_bit};
use super::Bitmap;

/// A container to store booleans. [`MutableBitmap`] is semantically equivalent
/// to [`Vec<bool>`], but each value is stored as a single bit, thereby achieving a compression of 8x.
/// This container is the counterpart of [`crate::buffer::MutableBuffer`] for boolean values.
/// [`MutableBitmap`] can be converted to a [`Bitmap`] at `O(1)`.
/// # Example
/// ```
/// use columnar::bitmap::{Bitmap, MutableBitmap};
/// let mut bitmap = MutableBitmap::new();
/// bitmap.push(true);
/// bitmap.push(false);
/// bitmap.push(true);
/// let bitmap: Bitmap = bitmap.into();
/// assert_eq!(bitmap.null_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MutableBitmap {
    buffer: MutableBuffer,
    // invariant: length.saturating_add(7) / 8 == buffer.len();
    length: usize,
}

impl MutableBitmap {
    /// Initializes an empty [`MutableBitmap`].
    #[inline]
    pub fn new() -> Self {
        Self {
            buffer: MutableBuffer::new(),
            length: 0,
        }
    }

    /// Initializes a zeroed [`MutableBitmap`].
    #[inline]
    pub fn from_len_zeroed(length: usize) -> Self {
        Self {
            buffer: MutableBuffer::from_len_zeroed(bytes_for(length)),
            length,
        }
    }

    /// Initializes a pre-allocated [`MutableBitmap`] with capacity for `capacity` bits.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: MutableBuffer::with_capacity(bytes_for(capacity)),
            length: 0,
        }
    }

    /// Reserves `additional` bits in the [`MutableBitmap`], potentially re-allocating its buffer.
    #[inline(always)]
    pub fn reserve(&mut self, additional: usize) {
        self.buffer
            .reserve(bytes_for(self.length + additional) - self.buffer.len())
    }

    /// Pushes a new bit to the [`MutableBitmap`], re-sizing it if necessary.
    #[inline]
    pub fn push(&mut self, value: bool) {
        if self.length % 8 == 0 {
            self.buffer.push(0u8);
        }
        if value {
            let index = self.length % 8;
            if let Some(byte) = self.buffer.as_slice_mut().last_mut() {
                *byte = set(*byte, index, true);
            }
        };
        self.length += 1;
    }

    /// Extends the [`MutableBitmap`] with `additional` bits of `value`.
    pub fn extend_constant(&mut self, additional: usize, value: bool) {
        if additional == 0 {
            return;
        }
        if !value && self.length % 8 == 0 {
            // fast path: whole zeroed bytes
            self.buffer.extend_zeros(bytes_for(self.length + additional) - self.buffer.len());
            self.length += additional;
            return;
        }
        self.reserve(additional);
        (0..additional).for_each(|_| self.push(value))
    }

    /// Returns whether the position `index` is set.
    /// # Panics
    /// Panics iff `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.length);
        get_bit(&self.buffer, index)
    }

    /// Sets the position `index` to `value`
    /// # Panics
    /// Panics iff `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.length);
        set_bit(self.buffer.as_slice_mut(), index, value)
    }

    /// Returns the number of unset bits on this [`MutableBitmap`].
    #[inline]
    pub fn unset_bits(&self) -> usize {
        count_zeros(&self.buffer, 0, self.length)
    }

    /// Returns the length of the [`MutableBitmap`].
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns whether [`MutableBitmap`] is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the [`MutableBitmap`] without releasing its allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.length = 0;
        self.buffer.clear();
    }

    /// Returns the bytes of this [`MutableBitmap`].
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Converts this [`MutableBitmap`] into a [`Buffer`] with its bits, discarding the length.
    #[inline]
    pub fn into_buffer(self) -> Buffer {
        self.buffer.into()
    }
}

impl From<MutableBitmap> for Bitmap {
    #[inline]
    fn from(bitmap: MutableBitmap) -> Self {
        let unset_bits = bitmap.unset_bits();
        let length = bitmap.length;
        // Safety: invariant of `MutableBitmap`
        unsafe { Bitmap::from_inner_unchecked(bitmap.buffer.into(), 0, length, unset_bits) }
    }
}

impl From<MutableBitmap> for Option<Bitmap> {
    #[inline]
    fn from(bitmap: MutableBitmap) -> Self {
        if bitmap.unset_bits() > 0 {
            Some(bitmap.into())
        } else {
            None
        }
    }
}

impl Extend<bool> for MutableBitmap {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        let iterator = iter.into_iter();
        let (lower, _) = iterator.size_hint();
        self.reserve(lower);
        iterator.for_each(|value| self.push(value))
    }
}

impl FromIterator<bool> for MutableBitmap {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut bitmap = MutableBitmap::new();
        bitmap.extend(iter);
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_across_bytes() {
        let mut bitmap = MutableBitmap::new();
        (0..10).for_each(|i| bitmap.push(i % 3 == 0));
        assert_eq!(bitmap.len(), 10);
        assert_eq!(bitmap.as_slice(), &[0b01001001, 0b00000010]);
        assert_eq!(bitmap.unset_bits(), 6);
    }

    #[test]
    fn extend_constant() {
        let mut bitmap = MutableBitmap::new();
        bitmap.extend_constant(9, false);
        bitmap.push(true);
        bitmap.extend_constant(3, true);
        assert_eq!(bitmap.len(), 13);
        assert_eq!(bitmap.as_slice(), &[0, 0b00011110]);
    }

    #[test]
    fn set_and_get() {
        let mut bitmap = MutableBitmap::from_len_zeroed(12);
        bitmap.set(11, true);
        assert!(bitmap.get(11));
        assert!(!bitmap.get(10));
    }

    #[test]
    fn option_without_nulls() {
        let bitmap: MutableBitmap = [true, true].into_iter().collect();
        assert!(Option::<Bitmap>::from(bitmap).is_none());
    }
}
