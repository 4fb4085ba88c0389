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

//! IPC stream writer.
use std::io::Write;

use crate::datatypes::Schema;
use crate::error::{Error, Result};
use crate::record_batch::RecordBatch;

use super::common::{encode_record_batch, encode_schema, write_continuation, write_message, WriteOptions};

/// Writer of an IPC stream: a schema message, any number of batch messages, and an
/// end-of-stream marker.
///
/// The data written by this writer must be read in order. To signal that no more
/// data is arriving through the stream call [`StreamWriter::finish`].
pub struct StreamWriter<W: Write> {
    writer: W,
    write_options: WriteOptions,
    /// the schema declared by `start`, against which every batch is checked
    schema: Option<Schema>,
    finished: bool,
}

impl<W: Write> StreamWriter<W> {
    /// Creates a new [`StreamWriter`].
    pub fn new(writer: W, write_options: WriteOptions) -> Self {
        Self {
            writer,
            write_options,
            schema: None,
            finished: false,
        }
    }

    /// Starts the stream by writing its schema.
    /// # Errors
    /// Errors when the options are invalid, when the stream was already started, or when
    /// the writer fails.
    pub fn start(&mut self, schema: &Schema) -> Result<()> {
        self.write_options.validate()?;
        if self.schema.is_some() {
            return Err(Error::InvalidArgument(
                "the stream was already started".to_string(),
            ));
        }
        write_message(&mut self.writer, &encode_schema(schema)?, &self.write_options)?;
        tracing::debug!(fields = schema.fields().len(), "started IPC stream");
        self.schema = Some(schema.clone());
        Ok(())
    }

    /// Writes a [`RecordBatch`] to the stream.
    /// # Errors
    /// Errors when the stream is not started or already finished, when the schema of the
    /// batch is not the one of the stream, or when the writer fails.
    pub fn write(&mut self, batch: &RecordBatch) -> Result<()> {
        if self.finished {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "cannot write to a finished stream",
            )));
        }
        let schema = self.schema.as_ref().ok_or_else(|| {
            Error::InvalidArgument("the stream must be started before writing".to_string())
        })?;
        if batch.schema().as_ref() != schema {
            return Err(Error::SchemaMismatch(
                "the schema of the batch differs from the schema of the stream".to_string(),
            ));
        }

        let encoded = encode_record_batch(batch, false, &self.write_options)?;
        write_message(&mut self.writer, &encoded, &self.write_options)?;
        Ok(())
    }

    /// Writes the end-of-stream marker and marks the stream as done.
    pub fn finish(&mut self) -> Result<()> {
        write_continuation(&mut self.writer, 0)?;
        self.writer.flush()?;
        self.finished = true;
        tracing::debug!("finished IPC stream");
        Ok(())
    }

    /// Consumes itself, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
