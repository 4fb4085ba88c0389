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

//! Reconstruction of [`ArrayData`] from the nodes and buffers of a batch message.
use flatbuffers::Vector;

use crate::array::ArrayData;
use crate::buffer::Buffer;
use crate::datatypes::{DataType, PhysicalType, UnionMode};
use crate::error::{Error, Result};

fn to_usize(value: i64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::decode(format!("the {} ({}) must be a valid size", what, value)))
}

/// The structure of an array node, as declared in the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    length: usize,
    null_count: usize,
    offset: usize,
    has_validity: bool,
}

/// A cursor over the nodes and buffers of a batch message, handing out slices of `body`.
pub(super) struct BodyReader<'a> {
    nodes: Vector<'a, i64>,
    node_index: usize,
    buffers: Vector<'a, i64>,
    buffer_index: usize,
    body: &'a Buffer,
}

impl<'a> BodyReader<'a> {
    pub fn new(nodes: Vector<'a, i64>, buffers: Vector<'a, i64>, body: &'a Buffer) -> Self {
        Self {
            nodes,
            node_index: 0,
            buffers,
            buffer_index: 0,
            body,
        }
    }

    fn next_node(&mut self) -> Result<Node> {
        let start = self.node_index;
        if start + 4 > self.nodes.len() {
            return Err(Error::decode(
                "the message declares fewer nodes than its schema requires",
            ));
        }
        self.node_index += 4;
        let has_validity = match self.nodes.get(start + 3) {
            0 => false,
            1 => true,
            other => {
                return Err(Error::decode(format!(
                    "invalid validity flag {} of a node",
                    other
                )))
            }
        };
        Ok(Node {
            length: to_usize(self.nodes.get(start), "length of a node")?,
            null_count: to_usize(self.nodes.get(start + 1), "null count of a node")?,
            offset: to_usize(self.nodes.get(start + 2), "offset of a node")?,
            has_validity,
        })
    }

    /// Returns the next buffer as a zero-copy slice of the body, after checking that it
    /// lies within it.
    fn next_buffer(&mut self) -> Result<Buffer> {
        let start = self.buffer_index;
        if start + 2 > self.buffers.len() {
            return Err(Error::decode(
                "the message declares fewer buffers than its schema requires",
            ));
        }
        self.buffer_index += 2;
        let offset = to_usize(self.buffers.get(start), "offset of a buffer")?;
        let length = to_usize(self.buffers.get(start + 1), "length of a buffer")?;
        match offset.checked_add(length) {
            Some(end) if end <= self.body.len() => Ok(self.body.slice(offset, length)),
            _ => Err(Error::decode(format!(
                "a buffer at offset {} with length {} is out of bounds of a body of {} bytes",
                offset,
                length,
                self.body.len()
            ))),
        }
    }

    /// Errors unless every node and buffer was consumed.
    pub fn finish(&self) -> Result<()> {
        if self.node_index != self.nodes.len() || self.buffer_index != self.buffers.len() {
            return Err(Error::decode(format!(
                "the message declares {} nodes and {} buffers, but its schema requires {} and {}",
                self.nodes.len() / 4,
                self.buffers.len() / 2,
                self.node_index / 4,
                self.buffer_index / 2,
            )));
        }
        Ok(())
    }
}

/// The number of buffers, excluding the validity, of arrays of `data_type`.
fn buffer_count(data_type: &DataType) -> usize {
    match data_type.to_physical_type() {
        PhysicalType::Null | PhysicalType::FixedSizeList | PhysicalType::Struct => 0,
        PhysicalType::Boolean
        | PhysicalType::Primitive(_)
        | PhysicalType::List
        | PhysicalType::LargeList
        | PhysicalType::Dictionary(_) => 1,
        PhysicalType::Binary
        | PhysicalType::LargeBinary
        | PhysicalType::Utf8
        | PhysicalType::LargeUtf8 => 2,
        PhysicalType::Union => match data_type {
            DataType::Union(_, _, UnionMode::Dense) => 2,
            _ => 1,
        },
    }
}

/// The data types of the children of arrays of `data_type`.
fn child_types(data_type: &DataType) -> Vec<&DataType> {
    match data_type {
        DataType::List(field) | DataType::LargeList(field) | DataType::FixedSizeList(field, _) => {
            vec![field.data_type()]
        }
        DataType::Struct(fields) | DataType::Union(fields, _, _) => {
            fields.iter().map(|field| field.data_type()).collect()
        }
        DataType::Dictionary(_, values, _) => vec![values.as_ref()],
        _ => vec![],
    }
}

/// Reads the next node of `data_type`, and recursively its children, validating the
/// result like any other [`ArrayData`].
pub(super) fn read_array(data_type: &DataType, reader: &mut BodyReader) -> Result<ArrayData> {
    let node = reader.next_node()?;
    let validity = if node.has_validity {
        Some(reader.next_buffer()?)
    } else {
        None
    };
    let buffers = (0..buffer_count(data_type))
        .map(|_| reader.next_buffer())
        .collect::<Result<Vec<_>>>()?;
    let children = child_types(data_type)
        .into_iter()
        .map(|child| read_array(child, reader))
        .collect::<Result<Vec<_>>>()?;

    ArrayData::builder(data_type.clone())
        .len(node.length)
        .offset(node.offset)
        .null_count(node.null_count)
        .null_bit_buffer(validity)
        .buffers(buffers)
        .child_data(children)
        .build()
        .map_err(|error| match error {
            Error::Layout(message) => Error::decode(format!(
                "the message contains an invalid array of type {:?}: {}",
                data_type, message
            )),
            other => other,
        })
}
