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

use crate::array::ArrayData;
use crate::error::{Error, Result};

use super::common::pad_to;

fn to_i64(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::Overflow)
}

/// Appends `buffer` to `arrow_data`, padded to `alignment`, and records its position.
fn write_buffer(buffer: &[u8], buffers: &mut Vec<i64>, arrow_data: &mut Vec<u8>, alignment: usize) -> Result<()> {
    let start = arrow_data.len();
    buffers.push(to_i64(start)?);
    buffers.push(to_i64(buffer.len())?);
    arrow_data.extend_from_slice(buffer);
    let padding = pad_to(buffer.len(), alignment);
    arrow_data.resize(arrow_data.len() + padding, 0);
    Ok(())
}

/// Writes the node of `data` and then, recursively, the nodes of its children.
///
/// Buffers are written whole and the node keeps the offset of `data`, so that a sliced
/// array is reconstructed as the same slice over the same buffers.
pub(super) fn write_array(
    data: &ArrayData,
    nodes: &mut Vec<i64>,
    buffers: &mut Vec<i64>,
    arrow_data: &mut Vec<u8>,
    alignment: usize,
) -> Result<()> {
    nodes.push(to_i64(data.len())?);
    nodes.push(to_i64(data.null_count())?);
    nodes.push(to_i64(data.offset())?);
    nodes.push(data.validity().is_some() as i64);

    if let Some(validity) = data.validity() {
        write_buffer(validity, buffers, arrow_data, alignment)?;
    }
    for buffer in data.buffers() {
        write_buffer(buffer, buffers, arrow_data, alignment)?;
    }
    for child in data.child_data() {
        write_array(child, nodes, buffers, arrow_data, alignment)?;
    }
    Ok(())
}
