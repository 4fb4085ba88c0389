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

//! Checks of the layout invariants shared by several array types.
use crate::error::{Error, Result};
use crate::types::{DictionaryKey, Offset};

/// Checks that `offsets` is non-empty, starts at a non-negative value, is monotonically
/// non-decreasing and that its last value is `<= values_len`.
pub(crate) fn try_check_offsets<O: Offset>(offsets: &[O], values_len: usize) -> Result<()> {
    let first = offsets
        .first()
        .ok_or_else(|| Error::oos("offsets must have at least one element"))?;
    if *first < O::zero() {
        return Err(Error::oos("offsets must be non-negative"));
    }
    if offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::oos("offsets must be monotonically non-decreasing"));
    }
    // non-empty: checked above
    let last = offsets[offsets.len() - 1].to_usize();
    if last > values_len {
        return Err(Error::oos(format!(
            "the last offset ({}) must be <= the values length ({})",
            last, values_len
        )));
    }
    Ok(())
}

/// Checks that the byte range spanned by `offsets` is valid utf8 and that
/// every offset lands on a char boundary.
/// # Error
/// * the offsets are invalid (see [`try_check_offsets`])
/// * any slice of `values` between two consecutive pairs from `offsets` is invalid `utf8`
pub(crate) fn try_check_utf8<O: Offset>(offsets: &[O], values: &[u8]) -> Result<()> {
    try_check_offsets(offsets, values.len())?;

    let start = offsets[0].to_usize();
    let end = offsets[offsets.len() - 1].to_usize();
    let values = &values[start..end];

    if values.is_ascii() {
        return Ok(());
    }

    simdutf8::basic::from_utf8(values)
        .map_err(|_| Error::oos("string values must be valid utf8"))?;

    for offset in offsets {
        let index = offset.to_usize() - start;
        if let Some(b) = values.get(index) {
            // A valid code-point iff it does not start with 0b10xxxxxx
            // Bit-magic taken from `std::str::is_char_boundary`
            if (*b as i8) < -0x40 {
                return Err(Error::oos("Non-valid char boundary detected"));
            }
        }
    }
    Ok(())
}

/// Checks that every key whose slot is valid is a valid index of a dictionary with `len` values.
pub(crate) fn check_indexes<K: DictionaryKey>(
    keys: &[K],
    is_valid: impl Fn(usize) -> bool,
    len: usize,
) -> Result<()> {
    keys.iter()
        .enumerate()
        .filter(|(i, _)| is_valid(*i))
        .try_for_each(|(_, key)| {
            let key = key
                .as_usize()
                .ok_or_else(|| Error::oos(format!("The dictionary key {:?} is negative", key)))?;
            if key < len {
                Ok(())
            } else {
                Err(Error::oos(format!(
                    "One of the dictionary keys is {} but it must be < than the length of the dictionary values, which is {}",
                    key, len
                )))
            }
        })
}
