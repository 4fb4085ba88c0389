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

//! Encoding of record batches into IPC messages.
mod common;
mod serialize;
mod stream;

pub use common::WriteOptions;
pub use stream::StreamWriter;

use crate::error::Result;
use crate::record_batch::RecordBatch;

use common::{encode_record_batch, write_message};

/// Encodes `batch` into a single, self-describing message containing its schema and
/// every buffer of its columns.
///
/// The body of the message starts at a multiple of the alignment, so that decoding it
/// from an aligned [`Buffer`](crate::buffer::Buffer) shares its memory.
/// # Errors
/// Errors with [`Error::InvalidArgument`](crate::error::Error::InvalidArgument) iff the
/// options are invalid.
pub fn encode_batch(batch: &RecordBatch, options: &WriteOptions) -> Result<Vec<u8>> {
    options.validate()?;
    let encoded = encode_record_batch(batch, true, options)?;
    let mut message = vec![];
    write_message(&mut message, &encoded, options)?;
    Ok(message)
}
