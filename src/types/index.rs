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

use crate::datatypes::IntegerType;

use super::NativeType;

/// Trait describing the integers that can be used as keys of a
/// [`crate::array::DictionaryArray`].
pub trait DictionaryKey: NativeType + Ord {
    /// The [`IntegerType`] of this key.
    const KEY_TYPE: IntegerType;

    /// Converts itself to [`usize`], returning `None` for negative keys.
    fn as_usize(self) -> Option<usize>;

    /// Converts from [`usize`], returning `None` when it does not fit.
    fn from_usize(value: usize) -> Option<Self>;
}

macro_rules! dictionary_key {
    ($type:ty, $key_type:expr) => {
        impl DictionaryKey for $type {
            const KEY_TYPE: IntegerType = $key_type;

            #[inline]
            fn as_usize(self) -> Option<usize> {
                usize::try_from(self).ok()
            }

            #[inline]
            fn from_usize(value: usize) -> Option<Self> {
                Self::try_from(value).ok()
            }
        }
    };
}

dictionary_key!(i8, IntegerType::Int8);
dictionary_key!(i16, IntegerType::Int16);
dictionary_key!(i32, IntegerType::Int32);
dictionary_key!(i64, IntegerType::Int64);
dictionary_key!(u8, IntegerType::UInt8);
dictionary_key!(u16, IntegerType::UInt16);
dictionary_key!(u32, IntegerType::UInt32);
dictionary_key!(u64, IntegerType::UInt64);
