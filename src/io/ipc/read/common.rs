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

use std::sync::Arc;

use crate::array::Array;
use crate::buffer::Buffer;
use crate::datatypes::Schema;
use crate::error::{Error, Result};
use crate::record_batch::{RecordBatch, RecordBatchOptions};

use super::super::format::{self, MessageHeader};
use super::super::METADATA_VERSION;
use super::deserialize::{read_array, BodyReader};

/// Verifies the flatbuffer `metadata` and returns its message.
pub(super) fn parse_message(metadata: &[u8]) -> Result<format::Message> {
    let message = format::root_as_message(metadata)
        .map_err(|error| Error::decode(format!("unable to get root as message: {}", error)))?;
    if message.version() != METADATA_VERSION {
        return Err(Error::decode(format!(
            "unsupported metadata version {}",
            message.version()
        )));
    }
    Ok(message)
}

/// The length of the body of `message`.
pub(super) fn body_length(message: &format::Message) -> Result<usize> {
    usize::try_from(message.body_length()).map_err(|_| {
        Error::decode(format!(
            "the body length ({}) must be a valid size",
            message.body_length()
        ))
    })
}

/// Errors unless `message` is of kind `expected`.
pub(super) fn check_header(message: &format::Message, expected: MessageHeader) -> Result<()> {
    match message.header() {
        Some(header) if header == expected => Ok(()),
        Some(header) => Err(Error::decode(format!(
            "expected a {:?} message, found a {:?} message",
            expected, header
        ))),
        None => Err(Error::decode("the message is of an unknown kind")),
    }
}

/// Reads a [`RecordBatch`] of `schema` from the batch header of `message`, whose buffers
/// are slices of `body`.
pub(super) fn read_record_batch(
    message: &format::Message,
    schema: Arc<Schema>,
    body: &Buffer,
) -> Result<RecordBatch> {
    check_header(message, MessageHeader::RecordBatch)?;
    let batch = message
        .batch()
        .ok_or_else(|| Error::decode("a record batch message has no batch"))?;
    let num_rows = usize::try_from(batch.length())
        .map_err(|_| Error::decode(format!("invalid row count {}", batch.length())))?;
    let nodes = batch
        .nodes()
        .ok_or_else(|| Error::decode("a record batch message has no nodes"))?;
    let buffers = batch
        .buffers()
        .ok_or_else(|| Error::decode("a record batch message has no buffers"))?;
    if nodes.len() % 4 != 0 || buffers.len() % 2 != 0 {
        return Err(Error::decode(
            "the nodes or buffers of a record batch message are incomplete",
        ));
    }

    let (node_count, buffer_count) = (nodes.len() / 4, buffers.len() / 2);

    let mut reader = BodyReader::new(nodes, buffers, body);
    let columns = schema
        .fields()
        .iter()
        .map(|field| read_array(field.data_type(), &mut reader).and_then(Array::try_new))
        .collect::<Result<Vec<_>>>()
        .map_err(|error| match error {
            Error::Layout(message) | Error::TypeMismatch(message) => Error::decode(message),
            other => other,
        })?;
    reader.finish()?;

    tracing::trace!(
        rows = num_rows,
        body_length = body.len(),
        nodes = node_count,
        buffers = buffer_count,
        "decoded record batch"
    );
    let options = RecordBatchOptions {
        row_count: Some(num_rows),
        ..Default::default()
    };
    RecordBatch::try_new_with_options(schema, columns, &options).map_err(|error| match error {
        Error::SchemaMismatch(message) => Error::decode(message),
        other => other,
    })
}
