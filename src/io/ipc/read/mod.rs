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

//! Decoding of IPC messages into record batches.
mod common;
mod deserialize;
mod stream;

pub use stream::StreamReader;

use std::sync::Arc;

use crate::buffer::{Buffer, MutableBuffer};
use crate::error::{Error, Result};
use crate::record_batch::RecordBatch;

use super::{convert, CONTINUATION_MARKER};
use common::{body_length, parse_message, read_record_batch};

/// Decodes a message written by [`encode_batch`](super::encode_batch).
///
/// The buffers of the returned columns are slices of `data`: no value is copied, and
/// `data` stays alive for as long as any of them does. The only exception is a body that
/// is not 8-byte aligned, which is copied once into an aligned region.
/// # Errors
/// Errors with [`Error::Decode`] iff the message is malformed, truncated, or declares a
/// buffer outside of its body, and with [`Error::Allocation`] iff an unaligned body cannot
/// be copied.
pub fn decode_batch(data: &Buffer) -> Result<RecordBatch> {
    let prefix_len = CONTINUATION_MARKER.len() + 4;
    if data.len() < prefix_len {
        return Err(Error::decode(format!(
            "a message has at least {} bytes, but only {} were given",
            prefix_len,
            data.len()
        )));
    }
    if data[..4] != CONTINUATION_MARKER {
        return Err(Error::decode("the message does not start with a continuation marker"));
    }
    let metadata_len = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let metadata_end = usize::try_from(metadata_len)
        .ok()
        .map(|len| prefix_len + len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            Error::decode(format!(
                "the metadata length ({}) is out of bounds of a message of {} bytes",
                metadata_len,
                data.len()
            ))
        })?;

    let message = parse_message(&data[prefix_len..metadata_end])?;
    let schema = message
        .schema()
        .ok_or_else(|| Error::decode("the message does not contain a schema"))?;
    let schema = convert::deserialize_schema(schema)?;

    let body_length = body_length(&message)?;
    match metadata_end.checked_add(body_length) {
        Some(end) if end == data.len() => {}
        Some(end) if end < data.len() => {
            return Err(Error::decode(format!(
                "the message has {} trailing bytes",
                data.len() - end
            )))
        }
        _ => {
            return Err(Error::decode(format!(
                "the body ({} bytes) is out of bounds of a message of {} bytes",
                body_length,
                data.len()
            )))
        }
    }

    let mut body = data.slice(metadata_end, body_length);
    if body.as_ptr() as usize % 8 != 0 {
        tracing::debug!(body_length, "copying an unaligned message body");
        let mut aligned = MutableBuffer::try_with_capacity(body_length)?;
        aligned.extend_from_slice(body.as_slice());
        body = aligned.into();
    }

    read_record_batch(&message, Arc::new(schema), &body)
}

#[cfg(test)]
mod tests {
    use flatbuffers::FlatBufferBuilder;

    use super::super::format::{self, MessageHeader};
    use super::super::METADATA_VERSION;
    use super::*;
    use crate::array::Int32Array;
    use crate::datatypes::{DataType, Field, Schema};

    /// A single message of one `Int32` column, framed by hand.
    fn message(version: u16, length: i64, nodes: &[i64], buffers: &[i64]) -> Buffer {
        let schema = Schema::new(vec![Field::new("a", DataType::Int32, true)]);
        let body = [1i32.to_le_bytes(), 2i32.to_le_bytes()].concat();

        let mut fbb = FlatBufferBuilder::new();
        let schema = convert::serialize_schema(&mut fbb, &schema).unwrap();
        let batch = format::RecordBatch::create(&mut fbb, length, nodes, buffers);
        let message = format::Message::create(
            &mut fbb,
            version,
            MessageHeader::RecordBatch,
            Some(schema),
            Some(batch),
            body.len() as i64,
        );
        fbb.finish(message, None);
        let metadata = fbb.finished_data();

        let padding = (8 - (8 + metadata.len()) % 8) % 8;
        let mut data = CONTINUATION_MARKER.to_vec();
        data.extend_from_slice(&((metadata.len() + padding) as i32).to_le_bytes());
        data.extend_from_slice(metadata);
        data.extend(std::iter::repeat(0).take(padding));
        data.extend_from_slice(&body);
        Buffer::from(data)
    }

    fn assert_decode_error(data: Buffer) {
        let result = decode_batch(&data);
        assert!(matches!(result, Err(Error::Decode(_))), "{:?}", result);
    }

    #[test]
    fn valid() {
        let batch = decode_batch(&message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[0, 8])).unwrap();
        let column = batch.column(0).unwrap();
        assert_eq!(
            column.downcast_ref::<Int32Array>().unwrap().values(),
            &[1, 2]
        );
    }

    #[test]
    fn buffer_out_of_bounds() {
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[0, 16]));
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[8, 1]));
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[i64::MAX, 8]));
    }

    #[test]
    fn negative_values() {
        assert_decode_error(message(METADATA_VERSION, 2, &[-1, 0, 0, 0], &[0, 8]));
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[-8, 8]));
        assert_decode_error(message(METADATA_VERSION, -2, &[2, 0, 0, 0], &[0, 8]));
    }

    #[test]
    fn unsupported_version() {
        assert_decode_error(message(METADATA_VERSION + 1, 2, &[2, 0, 0, 0], &[0, 8]));
    }

    #[test]
    fn nodes_inconsistent_with_schema() {
        // an extra node
        assert_decode_error(message(
            METADATA_VERSION,
            2,
            &[2, 0, 0, 0, 2, 0, 0, 0],
            &[0, 8],
        ));
        // a missing buffer
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 0], &[]));
        // an incomplete node
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0], &[0, 8]));
        // an invalid validity flag
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 0, 2], &[0, 8]));
    }

    #[test]
    fn invalid_layout() {
        // 3 values do not fit in 8 bytes
        assert_decode_error(message(METADATA_VERSION, 3, &[3, 0, 0, 0], &[0, 8]));
        // a null count without validity
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 1, 0, 0], &[0, 8]));
        // an offset past the values
        assert_decode_error(message(METADATA_VERSION, 2, &[2, 0, 1, 0], &[0, 8]));
    }

    #[test]
    fn length_overflowing_body() {
        let len = 1i64 << 62;
        assert_decode_error(message(METADATA_VERSION, len, &[len, 0, 0, 0], &[0, 8]));
    }

    #[test]
    fn row_count_mismatch() {
        assert_decode_error(message(METADATA_VERSION, 5, &[2, 0, 0, 0], &[0, 8]));
    }
}
