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
    array::{Array, ArrayData, MutableArray, MutablePrimitiveArray},
    bitmap::{Bitmap, MutableBitmap},
    buffer::MutableBuffer,
    datatypes::DataType,
    error::{Error, Result},
    types::{NativeType, Offset},
};

use super::ListArray;

/// The mutable version of [`ListArray`], generic over the builder of its items.
/// # Example
/// ```
/// use columnar::array::{MutableListArray, MutablePrimitiveArray};
///
/// let mut array = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<i32>::new());
/// array.try_push(Some(vec![Some(1), None])).unwrap();
/// array.push_null();
/// array.try_push(Some(vec![Some(3)])).unwrap();
/// let array = array.finish();
/// assert_eq!(array.offsets(), &[0, 2, 2, 3]);
/// ```
#[derive(Debug)]
pub struct MutableListArray<O: Offset, M: MutableArray> {
    data_type: DataType,
    offsets: MutableBuffer,
    values: M,
    validity: Option<MutableBitmap>,
    len: usize,
    phantom: std::marker::PhantomData<O>,
}

impl<O: Offset, M: MutableArray> MutableListArray<O, M> {
    /// Creates a new [`MutableListArray`] whose items are built by `values`, with nullable
    /// items named `"item"`.
    pub fn new(values: M) -> Self {
        let data_type = ListArray::<O>::default_datatype(values.data_type().clone());
        Self::new_from(values, data_type, 0)
    }

    /// Creates a new [`MutableListArray`] of `data_type` from a builder of its items.
    /// # Panics
    /// Panics iff `data_type` is not a list of offsets `O` whose items are of the type
    /// built by `values`.
    pub fn new_from(values: M, data_type: DataType, capacity: usize) -> Self {
        match (&data_type, O::IS_LARGE) {
            (DataType::List(field), false) | (DataType::LargeList(field), true) => {
                assert!(field.data_type().equals_datatype(values.data_type()))
            }
            _ => panic!("MutableListArray requires a list type, but {:?} was given", data_type),
        }
        let mut offsets = MutableBuffer::with_capacity((capacity + 1) * std::mem::size_of::<O>());
        offsets.push(O::zero());
        Self {
            data_type,
            offsets,
            values,
            validity: None,
            len: 0,
            phantom: std::marker::PhantomData,
        }
    }

    /// The builder of the items. Push the items of a list to it and then
    /// call [`MutableListArray::try_push_valid`] to close the list.
    pub fn mut_values(&mut self) -> &mut M {
        &mut self.values
    }

    /// The builder of the items.
    pub fn values(&self) -> &M {
        &self.values
    }

    /// Closes a valid list containing every item pushed to [`MutableListArray::mut_values`]
    /// since the previous list.
    /// # Errors
    /// Errors with [`Error::Overflow`] iff the number of items does not fit in `O`.
    pub fn try_push_valid(&mut self) -> Result<()> {
        self.push_offset()?;
        if let Some(validity) = &mut self.validity {
            validity.push(true)
        }
        self.len += 1;
        Ok(())
    }

    /// Pushes a null list.
    pub fn push_null(&mut self) {
        // a null slot repeats the last offset, which always fits
        let last = self.offsets.last::<O>().unwrap_or_else(O::zero);
        self.offsets.push(last);
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

    fn push_offset(&mut self) -> Result<()> {
        let offset = O::from_usize(self.values.len()).ok_or(Error::Overflow)?;
        self.offsets.push(offset);
        Ok(())
    }

    /// Freezes the pushed lists into a [`ListArray`] and resets this builder, including the
    /// builder of its items, to empty.
    pub fn finish(&mut self) -> ListArray<O> {
        let len = std::mem::take(&mut self.len);
        let offsets = std::mem::take(&mut self.offsets);
        self.offsets.push(O::zero());
        let validity: Option<Bitmap> = self.validity.take().and_then(|v| v.into());
        let null_count = validity.as_ref().map_or(0, |v| v.unset_bits());
        let values = self.values.as_array();

        // Safety: `len + 1` monotonic offsets ending at the length of `values`, whose type is
        // the item type of `data_type`
        let data = unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                len,
                0,
                null_count,
                validity.map(|v| v.to_aligned_buffer()),
                vec![offsets.into()],
                vec![values.clone().into_data()],
            )
        };
        ListArray {
            data,
            values: Box::new(values),
            phantom: std::marker::PhantomData,
        }
    }
}

impl<O: Offset, T: NativeType> MutableListArray<O, MutablePrimitiveArray<T>> {
    /// Pushes a list of primitive values, or a null list.
    /// # Errors
    /// Errors with [`Error::Overflow`] iff the number of items does not fit in `O`.
    pub fn try_push<I: IntoIterator<Item = Option<T>>>(&mut self, item: Option<I>) -> Result<()> {
        match item {
            Some(items) => {
                self.values.extend(items);
                self.try_push_valid()
            }
            None => {
                self.push_null();
                Ok(())
            }
        }
    }
}

impl<O: Offset, M: MutableArray + 'static> MutableArray for MutableListArray<O, M> {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_null(&mut self) {
        MutableListArray::push_null(self)
    }

    fn as_array(&mut self) -> Array {
        Array::try_new(self.finish().into_data()).unwrap_or_else(|_| unreachable!())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}
