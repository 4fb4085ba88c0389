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

use std::any::Any;

use crate::{
    array::{binary::MutableBinaryValues, Array, MutableArray},
    datatypes::DataType,
    error::Result,
    types::Offset,
};

use super::Utf8Array;

/// The mutable version of [`Utf8Array`]. See [`MutableArray`] for more details.
#[derive(Debug)]
pub struct MutableUtf8Array<O: Offset> {
    values: MutableBinaryValues<O>,
}

impl<O: Offset> MutableUtf8Array<O> {
    /// Creates a new empty [`MutableUtf8Array`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new [`MutableUtf8Array`] with a capacity of slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacities(capacity, 0)
    }

    /// Creates a new [`MutableUtf8Array`] with capacities of slots and of value bytes.
    pub fn with_capacities(capacity: usize, values: usize) -> Self {
        Self {
            values: MutableBinaryValues::with_capacities(
                Utf8Array::<O>::default_data_type(),
                capacity,
                values,
            ),
        }
    }

    /// Reserves `additional` slots and `additional_values` bytes.
    pub fn reserve(&mut self, additional: usize, additional_values: usize) {
        self.values.reserve(additional, additional_values)
    }

    /// Pushes a new slot.
    /// # Errors
    /// Errors with [`crate::error::Error::Overflow`] iff the total length of the values does
    /// not fit in `O`, e.g. more than `i32::MAX` bytes in a [`DataType::Utf8`] array.
    pub fn try_push<T: AsRef<str>>(&mut self, value: Option<T>) -> Result<()> {
        self.values
            .try_push(value.as_ref().map(|x| x.as_ref().as_bytes()))
    }

    /// Pushes a new slot.
    /// # Panics
    /// Panics iff the total length of the values does not fit in `O`.
    pub fn push<T: AsRef<str>>(&mut self, value: Option<T>) {
        self.try_push(value).unwrap()
    }

    /// Freezes the pushed slots into a [`Utf8Array`] and resets this builder to empty.
    pub fn finish(&mut self) -> Utf8Array<O> {
        Utf8Array {
            data: self.values.finish(),
            phantom: std::marker::PhantomData,
        }
    }
}

impl<O: Offset> Default for MutableUtf8Array<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Offset, T: AsRef<str>> Extend<Option<T>> for MutableUtf8Array<O> {
    fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0, 0);
        iter.for_each(|x| self.push(x))
    }
}

impl<O: Offset> MutableArray for MutableUtf8Array<O> {
    fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn push_null(&mut self) {
        self.push(None::<&str>)
    }

    fn as_array(&mut self) -> Array {
        Array::try_new(self.values.finish()).unwrap_or_else(|_| unreachable!())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}
