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

use std::io::Write;

use flatbuffers::FlatBufferBuilder;

use crate::datatypes::Schema;
use crate::error::{Error, Result};
use crate::record_batch::RecordBatch;

use super::super::format::{self, MessageHeader};
use super::super::{convert, CONTINUATION_MARKER, METADATA_VERSION};
use super::serialize::write_array;

/// Options declaring the behaviour of writing IPC messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// The alignment, in bytes, of the body and of every buffer within it.
    alignment: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { alignment: 8 }
    }
}

impl WriteOptions {
    /// Creates new [`WriteOptions`].
    /// # Errors
    /// Errors with [`Error::InvalidArgument`] iff `alignment` is not a power of two of at
    /// least 8.
    pub fn try_new(alignment: usize) -> Result<Self> {
        let options = Self { alignment };
        options.validate()?;
        Ok(options)
    }

    /// The alignment of the body and of every buffer within it.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.alignment < 8 || !self.alignment.is_power_of_two() {
            return Err(Error::InvalidArgument(format!(
                "the alignment must be a power of two of at least 8, but it is {}",
                self.alignment
            )));
        }
        Ok(())
    }
}

/// A message ready to be framed: its flatbuffer metadata and its body.
#[derive(Debug, Default)]
pub(crate) struct EncodedData {
    pub ipc_message: Vec<u8>,
    pub arrow_data: Vec<u8>,
}

/// The number of bytes needed to pad `len` to a multiple of `alignment`, a power of two.
#[inline]
pub(crate) fn pad_to(len: usize, alignment: usize) -> usize {
    ((len + alignment - 1) & !(alignment - 1)) - len
}

fn to_i64(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::Overflow)
}

/// Encodes the schema message that starts a stream.
pub(crate) fn encode_schema(schema: &Schema) -> Result<EncodedData> {
    let mut fbb = FlatBufferBuilder::new();
    let schema = convert::serialize_schema(&mut fbb, schema)?;
    let message = format::Message::create(
        &mut fbb,
        METADATA_VERSION,
        MessageHeader::Schema,
        Some(schema),
        None,
        0,
    );
    fbb.finish(message, None);
    Ok(EncodedData {
        ipc_message: fbb.finished_data().to_vec(),
        arrow_data: vec![],
    })
}

/// Encodes a batch message. The schema of the batch is embedded when `with_schema`.
pub(crate) fn encode_record_batch(
    batch: &RecordBatch,
    with_schema: bool,
    options: &WriteOptions,
) -> Result<EncodedData> {
    let mut nodes = vec![];
    let mut buffers = vec![];
    let mut arrow_data = vec![];
    for column in batch.columns() {
        write_array(
            column.data(),
            &mut nodes,
            &mut buffers,
            &mut arrow_data,
            options.alignment,
        )?;
    }

    let mut fbb = FlatBufferBuilder::new();
    let schema = if with_schema {
        Some(convert::serialize_schema(&mut fbb, batch.schema())?)
    } else {
        None
    };
    let record_batch =
        format::RecordBatch::create(&mut fbb, to_i64(batch.num_rows())?, &nodes, &buffers);
    let message = format::Message::create(
        &mut fbb,
        METADATA_VERSION,
        MessageHeader::RecordBatch,
        schema,
        Some(record_batch),
        to_i64(arrow_data.len())?,
    );
    fbb.finish(message, None);

    tracing::trace!(
        rows = batch.num_rows(),
        body_length = arrow_data.len(),
        nodes = nodes.len() / 4,
        buffers = buffers.len() / 2,
        "encoded record batch"
    );
    Ok(EncodedData {
        ipc_message: fbb.finished_data().to_vec(),
        arrow_data,
    })
}

/// Writes a framed message: continuation, metadata length, padded metadata and body.
/// Returns the number of bytes written.
pub(crate) fn write_message<W: Write>(
    writer: &mut W,
    encoded: &EncodedData,
    options: &WriteOptions,
) -> Result<usize> {
    let prefix_len = CONTINUATION_MARKER.len() + 4;
    let metadata_len = encoded.ipc_message.len();
    let padding = pad_to(prefix_len + metadata_len, options.alignment);
    let padded_len = i32::try_from(metadata_len + padding).map_err(|_| Error::Overflow)?;

    write_continuation(writer, padded_len)?;
    writer.write_all(&encoded.ipc_message)?;
    write_padding(writer, padding)?;
    writer.write_all(&encoded.arrow_data)?;
    Ok(prefix_len + metadata_len + padding + encoded.arrow_data.len())
}

/// Writes the continuation marker followed by `total_len`. A `total_len` of zero ends
/// a stream.
pub(crate) fn write_continuation<W: Write>(writer: &mut W, total_len: i32) -> Result<usize> {
    writer.write_all(&CONTINUATION_MARKER)?;
    writer.write_all(&total_len.to_le_bytes())?;
    Ok(8)
}

fn write_padding<W: Write>(writer: &mut W, padding: usize) -> Result<()> {
    const ZEROS: [u8; 64] = [0; 64];
    let mut remaining = padding;
    while remaining > 0 {
        let chunk = remaining.min(ZEROS.len());
        writer.write_all(&ZEROS[..chunk])?;
        remaining -= chunk;
    }
    Ok(())
}
