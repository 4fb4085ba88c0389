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
    array::{Array, ArrayData, MutableArray},
    bitmap::{Bitmap, MutableBitmap},
    datatypes::DataType,
};

use super::BooleanArray;

static BOOLEAN: DataType = DataType::Boolean;

/// The mutable version of [`BooleanArray`]. See [`MutableArray`] for more details.
#[derive(Debug, Default)]
pub struct MutableBooleanArray {
    values: MutableBitmap,
    validity: Option<MutableBitmap>,
}

impl MutableBooleanArray {
    /// Creates a new empty [`MutableBooleanArray`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`MutableBooleanArray`] with a capacity of slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: MutableBitmap::with_capacity(capacity),
            validity: None,
        }
    }

    /// Reserves `additional` slots.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        if let Some(x) = self.validity.as_mut() {
            x.reserve(additional)
        }
    }

    /// Pushes a new slot.
    pub fn push(&mut self, value: Option<bool>) {
        match value {
            Some(value) => {
                self.values.push(value);
                if let Some(validity) = &mut self.validity {
                    validity.push(true)
                }
            }
            None => {
                self.values.push(false);
                match &mut self.validity {
                    Some(validity) => validity.push(false),
                    None => {
                        let mut validity = MutableBitmap::with_capacity(self.values.len());
                        validity.extend_constant(self.values.len() - 1, true);
                        validity.push(false);
                        self.validity = Some(validity)
                    }
                }
            }
        }
    }

    /// Appends a slice of valid values.
    pub fn extend_from_slice(&mut self, items: &[bool]) {
        self.values.extend(items.iter().copied());
        if let Some(validity) = &mut self.validity {
            validity.extend_constant(items.len(), true)
        }
    }

    /// Freezes the pushed slots into a [`BooleanArray`] and resets this builder to empty.
    pub fn finish(&mut self) -> BooleanArray {
        let values = std::mem::take(&mut self.values);
        let len = values.len();
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());

        // Safety: both bitmaps have `len` bits starting at 0
        let data = unsafe {
            ArrayData::new_unchecked(
                DataType::Boolean,
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![values.into_buffer()],
                vec![],
            )
        };
        BooleanArray { data }
    }
}

impl Extend<Option<bool>> for MutableBooleanArray {
    fn extend<I: IntoIterator<Item = Option<bool>>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(|x| self.push(x))
    }
}

impl MutableArray for MutableBooleanArray {
    fn data_type(&self) -> &DataType {
        &BOOLEAN
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn push_null(&mut self) {
        self.push(None)
    }

    fn as_array(&mut self) -> Array {
        self.finish().into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push() {
        let mut array = MutableBooleanArray::new();
        array.extend_from_slice(&[true, false]);
        array.push(None);
        array.push(Some(true));
        let array = array.finish();
        assert_eq!(
            array.iter().collect::<Vec<_>>(),
            vec![Some(true), Some(false), None, Some(true)]
        );
        assert_eq!(array.null_count(), 1);
    }
}
