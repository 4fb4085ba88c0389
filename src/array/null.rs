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

use crate::{datatypes::PhysicalType, error::Result};

use super::{check_physical_type, impl_common_array, ArrayData};

/// The concrete [`super::Array`] of [`crate::datatypes::DataType::Null`].
/// It has no buffers and every slot is null.
#[derive(Clone)]
pub struct NullArray {
    data: ArrayData,
}

impl NullArray {
    /// Interprets `data` as a [`NullArray`].
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::Null, "NullArray")?;
        Ok(Self { data })
    }

    /// Returns a new [`NullArray`] of `length` slots.
    pub fn new_null(length: usize) -> Self {
        Self {
            data: ArrayData::new_null(length),
        }
    }

    impl_common_array!();

    /// Returns a zero-copy slice of this array.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
        }
    }
}
