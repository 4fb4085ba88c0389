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

use super::NativeType;

/// Sealed trait describing the subset (`i32` and `i64`) of [`NativeType`] that can be used
/// as offsets of variable-length arrays.
pub trait Offset:
    NativeType + Ord + num::Zero + std::ops::Add<Output = Self> + std::ops::Sub<Output = Self>
{
    /// Whether it is `i32` (false) or `i64` (true).
    const IS_LARGE: bool;

    /// Convert itself to [`usize`]. Negative offsets saturate to zero.
    fn to_usize(&self) -> usize;

    /// Convert from [`usize`], returning `None` when it does not fit.
    fn from_usize(value: usize) -> Option<Self>;
}

impl Offset for i32 {
    const IS_LARGE: bool = false;

    #[inline]
    fn to_usize(&self) -> usize {
        usize::try_from(*self).unwrap_or(0)
    }

    #[inline]
    fn from_usize(value: usize) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

impl Offset for i64 {
    const IS_LARGE: bool = true;

    #[inline]
    fn to_usize(&self) -> usize {
        usize::try_from(*self).unwrap_or(0)
    }

    #[inline]
    fn from_usize(value: usize) -> Option<Self> {
        Self::try_from(value).ok()
    }
}
