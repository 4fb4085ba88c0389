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
    error::{Error, Result},
};

use super::FixedSizeListArray;

/// The mutable version of [`FixedSizeListArray`], generic over the builder of its items.
#[derive(Debug)]
pub struct MutableFixedSizeListArray<M: MutableArray> {
    data_type: DataType,
    size: usize,
    values: M,
    validity: Option<MutableBitmap>,
    len: usize,
}

impl<M: MutableArray> MutableFixedSizeListArray<M> {
    /// Creates a new [`MutableFixedSizeListArray`] of lists of `size` items built by `values`.
    /// # Panics
    /// Panics iff `size` is 0.
    pub fn new(values: M, size: usize) -> Self {
        assert!(size > 0, "the size of a fixed-size list must be positive");
        let data_type = FixedSizeListArray::default_datatype(values.data_type().clone(), size);
        Self {
            data_type,
            size,
            values,
            validity: None,
            len: 0,
        }
    }

    /// The builder of the items.
    pub fn mut_values(&mut self) -> &mut M {
        &mut self.values
    }

    /// The number of items of every list.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Closes a valid list. Exactly `size` items must have been pushed since the last list.
    /// # Errors
    /// Errors with [`Error::InvalidArgument`] otherwise.
    pub fn try_push_valid(&mut self) -> Result<()> {
        self.check_items()?;
        if let Some(validity) = &mut self.validity {
            validity.push(true)
        }
        self.len += 1;
        Ok(())
    }

    /// Pushes a null list, filling its `size` items with nulls.
    pub fn push_null(&mut self) {
        (0..self.size).for_each(|_| self.values.push_null());
        match &mut self.validity {
            Some(validity) => validity.push(false),
            None => {
                let mut validity = MutableBitmap::with_capacity(self.len + 1);
                validity.extend_constant(self.len, true);
                validity.push(false);
                self.validity = Some(validity)
            }
        }
        self.len += 1;
    }

    fn check_items(&self) -> Result<()> {
        let expected = (self.len + 1) * self.size;
        if self.values.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "a fixed-size list of size {} was closed with {} items",
                self.size,
                self.values.len() as isize - (self.len * self.size) as isize
            )));
        }
        Ok(())
    }

    /// Freezes the pushed lists into a [`FixedSizeListArray`] and resets this builder to empty.
    pub fn finish(&mut self) -> FixedSizeListArray {
        let len = std::mem::take(&mut self.len);
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());
        let values = self.values.as_array();

        // Safety: `len * size` items, since every list was checked when closed
        let data = unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![],
                vec![values.clone().into_data()],
            )
        };
        FixedSizeListArray {
            data,
            values: Box::new(values),
            size: self.size,
        }
    }
}

impl<M: MutableArray + 'static> MutableArray for MutableFixedSizeListArray<M> {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_null(&mut self) {
        MutableFixedSizeListArray::push_null(self)
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
