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

//! General utilities for bitmaps representing items where LSB is the first item.
mod iterator;

pub use iterator::BitmapIter;

const BIT_MASK: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
const UNSET_BIT_MASK: [u8; 8] = [
    255 - 1,
    255 - 2,
    255 - 4,
    255 - 8,
    255 - 16,
    255 - 32,
    255 - 64,
    255 - 128,
];

/// Returns whether bit at position `i` in `byte` is set or not
#[inline]
pub fn is_set(byte: u8, i: usize) -> bool {
    (byte & BIT_MASK[i]) != 0
}

/// Sets bit at position `i` in `byte`
#[inline]
pub fn set(byte: u8, i: usize, value: bool) -> u8 {
    if value {
        byte | BIT_MASK[i]
    } else {
        byte & UNSET_BIT_MASK[i]
    }
}

/// Sets bit at position `i` in `data`
/// # Panics
/// Panics iff `i >= data.len() * 8`
#[inline]
pub fn set_bit(data: &mut [u8], i: usize, value: bool) {
    data[i / 8] = set(data[i / 8], i % 8, value);
}

/// Returns whether bit at position `i` in `data` is set or not
/// # Panics
/// Panics iff `i >= data.len() * 8`
#[inline]
pub fn get_bit(data: &[u8], i: usize) -> bool {
    is_set(data[i / 8], i % 8)
}

/// Returns whether bit at position `i` in `data` is set or not.
///
/// # Safety
/// `i >= data.len() * 8` results in undefined behavior
#[inline]
pub unsafe fn get_bit_unchecked(data: &[u8], i: usize) -> bool {
    (*data.as_ptr().add(i >> 3) & BIT_MASK[i & 7]) != 0
}

/// Returns the number of bytes required to hold `bits` bits.
#[inline]
pub fn bytes_for(bits: usize) -> usize {
    bits.saturating_add(7) / 8
}

/// Returns the number of zero bits in `slice` in the range `[offset, offset + len)`.
/// # Panics
/// Panics iff `offset + len > slice.len() * 8`
pub fn count_zeros(slice: &[u8], offset: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    assert!(offset + len <= slice.len() * 8);

    let mut start = offset;
    let end = offset + len;
    let mut set_bits = 0;

    // leading bits until the next byte boundary
    while start < end && start % 8 != 0 {
        set_bits += get_bit(slice, start) as usize;
        start += 1;
    }

    let whole_bytes = (end - start) / 8;
    set_bits += slice[start / 8..start / 8 + whole_bytes]
        .iter()
        .map(|byte| byte.count_ones() as usize)
        .sum::<usize>();
    start += whole_bytes * 8;

    while start < end {
        set_bits += get_bit(slice, start) as usize;
        start += 1;
    }

    len - set_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set() {
        let mut data = [0u8; 2];
        set_bit(&mut data, 9, true);
        assert_eq!(data, [0, 2]);
        assert!(get_bit(&data, 9));
        set_bit(&mut data, 9, false);
        assert!(!get_bit(&data, 9));
    }

    #[test]
    fn zeros() {
        let data = [0b01011011u8, 0b11111111, 0b00000001];
        assert_eq!(count_zeros(&data, 0, 8), 3);
        assert_eq!(count_zeros(&data, 0, 24), 10);
        assert_eq!(count_zeros(&data, 2, 10), 3);
        assert_eq!(count_zeros(&data, 16, 1), 0);
        assert_eq!(count_zeros(&data, 17, 7), 7);
        assert_eq!(count_zeros(&data, 3, 0), 0);
    }

    #[test]
    fn bytes() {
        assert_eq!(bytes_for(0), 0);
        assert_eq!(bytes_for(1), 1);
        assert_eq!(bytes_for(8), 1);
        assert_eq!(bytes_for(9), 2);
    }
}
