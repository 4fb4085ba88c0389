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

//! IPC stream reader.
use std::io::{ErrorKind, Read};
use std::sync::Arc;

use crate::buffer::{Buffer, MutableBuffer};
use crate::datatypes::Schema;
use crate::error::{Error, Result};
use crate::record_batch::{RecordBatch, RecordBatchReader};

use super::super::format::MessageHeader;
use super::super::{convert, CONTINUATION_MARKER};
use super::common::{body_length, check_header, parse_message, read_record_batch};

/// Reads the prefix of the next message, returning the length of its metadata, or
/// [`None`] at the end of the stream.
fn read_metadata_len<R: Read>(reader: &mut R) -> Result<Option<usize>> {
    let mut marker = [0u8; 4];
    match reader.read_exact(&mut marker[..1]) {
        Ok(()) => {}
        // a stream may end without an end-of-stream marker
        Err(error) if error.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(error) => return Err(error.into()),
    }
    read_exact(reader, &mut marker[1..])?;
    if marker != CONTINUATION_MARKER {
        return Err(Error::decode(
            "the message does not start with a continuation marker",
        ));
    }
    let mut len = [0u8; 4];
    read_exact(reader, &mut len)?;
    let len = i32::from_le_bytes(len);
    match usize::try_from(len) {
        Ok(0) => Ok(None),
        Ok(len) => Ok(Some(len)),
        Err(_) => Err(Error::decode(format!("invalid metadata length {}", len))),
    }
}

/// Like [`Read::read_exact`], but a premature end of the stream is a decode error.
fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|error| {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::decode("the stream ended in the middle of a message")
        } else {
            error.into()
        }
    })
}

/// Reads `len` bytes of metadata without trusting `len` for the allocation.
fn read_metadata<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut metadata = vec![];
    reader.by_ref().take(len as u64).read_to_end(&mut metadata)?;
    if metadata.len() != len {
        return Err(Error::decode("the stream ended in the middle of a message"));
    }
    Ok(metadata)
}

/// Reads a body of `len` bytes into an aligned region that only grows as bytes arrive.
fn read_body<R: Read>(reader: &mut R, len: usize) -> Result<Buffer> {
    const CHUNK: usize = 64 * 1024;
    let mut body = MutableBuffer::try_with_capacity(len.min(CHUNK))?;
    while body.len() < len {
        let start = body.len();
        body.extend_zeros((len - start).min(CHUNK));
        read_exact(reader, &mut body.as_slice_mut()[start..])?;
    }
    Ok(body.into())
}

/// Reader of an IPC stream written by [`StreamWriter`](crate::io::ipc::StreamWriter).
///
/// Each message is read into its own aligned region, which the columns of the returned
/// batch share.
pub struct StreamReader<R: Read> {
    reader: R,
    schema: Arc<Schema>,
    /// set once the end of the stream, or an error, was reached
    finished: bool,
}

impl<R: Read> StreamReader<R> {
    /// Tries to create a new [`StreamReader`] by reading the schema at the start of the
    /// stream.
    /// # Errors
    /// Errors with [`Error::Decode`] iff the first message is not a valid schema message.
    pub fn try_new(mut reader: R) -> Result<Self> {
        let len = read_metadata_len(&mut reader)?
            .ok_or_else(|| Error::decode("the stream does not start with a schema"))?;
        let metadata = read_metadata(&mut reader, len)?;
        let message = parse_message(&metadata)?;
        check_header(&message, MessageHeader::Schema)?;
        if body_length(&message)? != 0 {
            return Err(Error::decode("a schema message cannot have a body"));
        }
        let schema = message
            .schema()
            .ok_or_else(|| Error::decode("a schema message has no schema"))?;
        let schema = convert::deserialize_schema(schema)?;
        tracing::debug!(fields = schema.fields().len(), "reading IPC stream");

        Ok(Self {
            reader,
            schema: Arc::new(schema),
            finished: false,
        })
    }

    /// Returns the schema of the stream.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns whether the end of the stream was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn maybe_next(&mut self) -> Result<Option<RecordBatch>> {
        if self.finished {
            return Ok(None);
        }
        let len = match read_metadata_len(&mut self.reader)? {
            Some(len) => len,
            None => {
                self.finished = true;
                tracing::debug!("reached the end of the IPC stream");
                return Ok(None);
            }
        };
        let metadata = read_metadata(&mut self.reader, len)?;
        let message = parse_message(&metadata)?;
        check_header(&message, MessageHeader::RecordBatch)?;

        let body = read_body(&mut self.reader, body_length(&message)?)?;

        read_record_batch(&message, self.schema.clone(), &body).map(Some)
    }
}

impl<R: Read> Iterator for StreamReader<R> {
    type Item = Result<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.maybe_next();
        if next.is_err() {
            self.finished = true;
        }
        next.transpose()
    }
}

impl<R: Read> RecordBatchReader for StreamReader<R> {
    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use flatbuffers::FlatBufferBuilder;

    use super::super::super::format::{self, Message};
    use super::super::super::METADATA_VERSION;
    use super::*;
    use crate::datatypes::{DataType, Field};

    fn frame(data: &mut Vec<u8>, metadata: &[u8]) {
        let padding = (8 - (8 + metadata.len()) % 8) % 8;
        data.extend_from_slice(&CONTINUATION_MARKER);
        data.extend_from_slice(&((metadata.len() + padding) as i32).to_le_bytes());
        data.extend_from_slice(metadata);
        data.extend(std::iter::repeat(0).take(padding));
    }

    #[test]
    fn declared_body_larger_than_stream() {
        let schema = Schema::new(vec![Field::new("a", DataType::Int32, true)]);
        let mut data = vec![];

        let mut fbb = FlatBufferBuilder::new();
        let ipc_schema = convert::serialize_schema(&mut fbb, &schema).unwrap();
        let message = Message::create(
            &mut fbb,
            METADATA_VERSION,
            MessageHeader::Schema,
            Some(ipc_schema),
            None,
            0,
        );
        fbb.finish(message, None);
        frame(&mut data, fbb.finished_data());

        // a terabyte body of which only 16 bytes follow
        let mut fbb = FlatBufferBuilder::new();
        let batch = format::RecordBatch::create(&mut fbb, 2, &[2, 0, 0, 0], &[0, 8]);
        let message = Message::create(
            &mut fbb,
            METADATA_VERSION,
            MessageHeader::RecordBatch,
            None,
            Some(batch),
            1 << 40,
        );
        fbb.finish(message, None);
        frame(&mut data, fbb.finished_data());
        data.extend_from_slice(&[0; 16]);

        let mut reader = StreamReader::try_new(Cursor::new(data)).unwrap();
        assert!(matches!(reader.next(), Some(Err(Error::Decode(_)))));
        assert!(reader.is_finished());
    }
}
