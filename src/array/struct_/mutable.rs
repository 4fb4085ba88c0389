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
    datatypes::{DataType, Field},
    error::{Error, Result},
};

use super::StructArray;

/// The mutable version of [`StructArray`], over one builder per field.
///
/// Push the values of a slot to every child builder (see [`MutableStructArray::value`]) and
/// then close the slot with [`MutableStructArray::push`].
#[derive(Debug)]
pub struct MutableStructArray {
    data_type: DataType,
    values: Vec<Box<dyn MutableArray>>,
    validity: Option<MutableBitmap>,
    len: usize,
}

impl MutableStructArray {
    /// Creates a new [`MutableStructArray`] from its fields and one builder per field.
    /// # Panics
    /// Panics iff the number of fields and builders differ.
    pub fn new(fields: Vec<Field>, values: Vec<Box<dyn MutableArray>>) -> Self {
        assert_eq!(
            fields.len(),
            values.len(),
            "a MutableStructArray requires one builder per field"
        );
        Self {
            data_type: DataType::Struct(fields),
            values,
            validity: None,
            len: 0,
        }
    }

    /// The builders of the fields.
    pub fn mut_values(&mut self) -> &mut [Box<dyn MutableArray>] {
        &mut self.values
    }

    /// The builder of field `i`, downcast to `M`; [`None`] if it is not an `M`.
    /// # Panics
    /// Panics iff `i` is out of bounds.
    pub fn value<M: 'static>(&mut self, i: usize) -> Option<&mut M> {
        self.values[i].as_mut_any().downcast_mut::<M>()
    }

    /// Closes a slot, valid or null, whose values were pushed to every child builder.
    pub fn push(&mut self, valid: bool) {
        match &mut self.validity {
            Some(validity) => validity.push(valid),
            None if valid => {}
            None => {
                let mut validity = MutableBitmap::with_capacity(self.len + 1);
                validity.extend_constant(self.len, true);
                validity.push(false);
                self.validity = Some(validity)
            }
        }
        self.len += 1;
    }

    /// Pushes a null slot, pushing a null to every child builder.
    pub fn push_null(&mut self) {
        self.values.iter_mut().for_each(|x| x.push_null());
        self.push(false)
    }

    /// Freezes the pushed slots into a [`StructArray`] and resets this builder to empty.
    /// # Errors
    /// Errors with [`Error::Layout`] iff a child builder does not hold one value per slot.
    /// The builder is left untouched in that case.
    pub fn finish(&mut self) -> Result<StructArray> {
        let fields = match &self.data_type {
            DataType::Struct(fields) => fields,
            _ => unreachable!(),
        };
        if let Some((field, child)) = fields
            .iter()
            .zip(self.values.iter())
            .find(|(_, child)| child.len() != self.len)
        {
            return Err(Error::oos(format!(
                "the builder of field \"{}\" has {} values, but {} slots were pushed",
                field.name(),
                child.len(),
                self.len
            )));
        }

        let len = std::mem::take(&mut self.len);
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());
        let values = self
            .values
            .iter_mut()
            .map(|x| x.as_array())
            .collect::<Vec<_>>();

        // Safety: every child has `len` slots of the type of its field
        let data = unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![],
                values.iter().map(|x| x.data().clone()).collect(),
            )
        };
        Ok(StructArray { data, values })
    }
}

impl MutableArray for MutableStructArray {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_null(&mut self) {
        MutableStructArray::push_null(self)
    }

    /// # Panics
    /// Panics iff a child builder does not hold one value per slot.
    fn as_array(&mut self) -> Array {
        match self.finish() {
            Ok(array) => array.into(),
            Err(error) => panic!("{}", error),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}
