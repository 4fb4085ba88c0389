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

//! Contains [`Buffer`], an immutable, 64-byte aligned and reference-counted region of bytes,
//! and [`MutableBuffer`], its growable counterpart.

mod bytes;
mod immutable;
mod mutable;

pub use immutable::Buffer;
pub use mutable::MutableBuffer;

/// Returns the nearest number that is `>=` than `num` and is a multiple of 64
#[inline]
pub(crate) fn round_upto_multiple_of_64(num: usize) -> usize {
    round_upto_power_of_2(num, 64)
}

/// Returns the nearest multiple of `factor` that is `>=` than `num`. Here `factor` must
/// be a power of 2.
#[inline]
pub(crate) fn round_upto_power_of_2(num: usize, factor: usize) -> usize {
    debug_assert!(factor > 0 && (factor & (factor - 1)) == 0);
    (num + (factor - 1)) & !(factor - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up() {
        assert_eq!(round_upto_multiple_of_64(0), 0);
        assert_eq!(round_upto_multiple_of_64(1), 64);
        assert_eq!(round_upto_multiple_of_64(64), 64);
        assert_eq!(round_upto_multiple_of_64(65), 128);
        assert_eq!(round_upto_power_of_2(9, 8), 16);
    }
}
