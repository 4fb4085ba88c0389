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
use std::collections::HashMap;

use crate::{
    array::{Array, ArrayData, MutableArray, MutablePrimitiveArray, MutableUtf8Array},
    datatypes::DataType,
    error::{Error, Result},
    types::DictionaryKey,
};

use super::DictionaryArray;

/// A builder of [`DictionaryArray`]s of utf8 values that de-duplicates values: pushing a
/// string that was already pushed re-uses its key.
/// # Example
/// ```
/// use columnar::array::MutableDictionaryArray;
///
/// let mut array = MutableDictionaryArray::<i32>::new();
/// array.try_push(Some("a")).unwrap();
/// array.try_push(Some("b")).unwrap();
/// array.try_push(None).unwrap();
/// array.try_push(Some("a")).unwrap();
/// let array = array.finish();
/// assert_eq!(array.values().len(), 2);
/// assert_eq!(array.key(3), Some(0));
/// ```
#[derive(Debug)]
pub struct MutableDictionaryArray<K: DictionaryKey> {
    data_type: DataType,
    keys: MutablePrimitiveArray<K>,
    values: MutableUtf8Array<i32>,
    map: HashMap<String, K, ahash::RandomState>,
}

impl<K: DictionaryKey> MutableDictionaryArray<K> {
    /// Creates a new empty [`MutableDictionaryArray`].
    pub fn new() -> Self {
        Self {
            data_type: DataType::Dictionary(K::KEY_TYPE, Box::new(DataType::Utf8), false),
            keys: MutablePrimitiveArray::new(),
            values: MutableUtf8Array::new(),
            map: HashMap::default(),
        }
    }

    /// Pushes a new slot, inserting its value in the dictionary when not yet present.
    /// # Errors
    /// Errors with [`Error::Overflow`] iff the number of distinct values does not fit in `K`,
    /// or the values exceed the capacity of utf8 offsets.
    pub fn try_push(&mut self, value: Option<&str>) -> Result<()> {
        let value = match value {
            Some(value) => value,
            None => {
                self.keys.push(None);
                return Ok(());
            }
        };
        let key = match self.map.get(value) {
            Some(key) => *key,
            None => {
                let key = K::from_usize(self.map.len()).ok_or(Error::Overflow)?;
                self.values.try_push(Some(value))?;
                self.map.insert(value.to_string(), key);
                key
            }
        };
        self.keys.push(Some(key));
        Ok(())
    }

    /// The number of distinct values pushed so far.
    pub fn distinct(&self) -> usize {
        self.map.len()
    }

    /// Freezes the pushed slots into a [`DictionaryArray`] and resets this builder to empty.
    pub fn finish(&mut self) -> DictionaryArray {
        self.map.clear();
        let keys = self.keys.finish().into_data();
        let values = self.values.finish().into_data();

        // Safety: every valid key was assigned to a value pushed to `values`
        let data = unsafe {
            ArrayData::new_unchecked(
                self.data_type.clone(),
                keys.len(),
                0,
                keys.null_count(),
                keys.validity().cloned(),
                keys.buffers().to_vec(),
                vec![values],
            )
        };
        // the data is a dictionary
        DictionaryArray::try_new(data).unwrap_or_else(|_| unreachable!())
    }
}

impl<K: DictionaryKey> Default for MutableDictionaryArray<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DictionaryKey> MutableArray for MutableDictionaryArray<K> {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn push_null(&mut self) {
        self.keys.push(None)
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
    use crate::array::Utf8Array;
    use crate::scalar::Scalar;

    #[test]
    fn deduplicates() {
        let mut array = MutableDictionaryArray::<u8>::new();
        ["x", "y", "x", "x", "z"]
            .iter()
            .try_for_each(|x| array.try_push(Some(*x)))
            .unwrap();
        array.push_null();
        assert_eq!(array.distinct(), 3);

        let finished = array.finish();
        assert_eq!(finished.len(), 6);
        assert_eq!(finished.null_count(), 1);
        let values = finished.values().downcast_ref::<Utf8Array<i32>>().unwrap();
        assert_eq!(values.values_iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(finished.value(3), Scalar::from("x"));

        // the map is reset together with the keys and values
        array.try_push(Some("z")).unwrap();
        assert_eq!(array.finish().key(0), Some(0));
    }

    #[test]
    fn too_many_values() {
        let mut array = MutableDictionaryArray::<i8>::new();
        (0..128).for_each(|i| array.try_push(Some(&i.to_string())).unwrap());
        assert!(matches!(
            array.try_push(Some("128")),
            Err(Error::Overflow)
        ));
    }
}
