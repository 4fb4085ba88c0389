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

//! Serialization of [`RecordBatch`](crate::record_batch::RecordBatch)es into
//! self-describing messages, and zero-copy reconstruction from them.
//!
//! Every message is framed as
//!
//! ```text
//! <continuation: 0xFFFFFFFF>
//! <metadata length: i32, little endian>
//! <metadata: flatbuffer, padded so that the body starts aligned>
//! <body: the buffers of every column, each padded to the alignment>
//! ```
//!
//! The metadata contains the layout of the body: one node per array (recursively, in
//! pre-order) and the position of every buffer of each node within the body. When a
//! message is decoded from a [`Buffer`](crate::buffer::Buffer), the buffers of the
//! resulting arrays are slices of it; no value is copied.
//!
//! Two forms exist:
//! * a single message ([`encode_batch`] and [`decode_batch`]), whose metadata contains
//!   the schema of the batch;
//! * a stream ([`StreamWriter`] and [`StreamReader`]): a schema message followed by any
//!   number of batch messages and terminated by a continuation marker followed by a zero
//!   length.
//!
//! ```
//! use std::sync::Arc;
//! use columnar::array::{Int32Array, Utf8Array};
//! use columnar::buffer::Buffer;
//! use columnar::datatypes::{DataType, Field, Schema};
//! use columnar::io::ipc::{decode_batch, encode_batch, WriteOptions};
//! use columnar::record_batch::RecordBatch;
//!
//! # fn main() -> columnar::error::Result<()> {
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int32, false),
//!     Field::new("name", DataType::Utf8, true),
//! ]);
//! let batch = RecordBatch::try_new(
//!     Arc::new(schema),
//!     vec![
//!         Int32Array::from_slice([1, 2]).into(),
//!         Utf8Array::<i32>::from(vec![Some("a"), None]).into(),
//!     ],
//! )?;
//!
//! let message = Buffer::from(encode_batch(&batch, &WriteOptions::default())?);
//! let decoded = decode_batch(&message)?;
//! assert_eq!(decoded, batch);
//! # Ok(())
//! # }
//! ```
mod convert;
mod format;

pub mod read;
pub mod write;

pub use read::{decode_batch, StreamReader};
pub use write::{encode_batch, StreamWriter, WriteOptions};

/// The marker that starts every message of a stream.
pub(crate) const CONTINUATION_MARKER: [u8; 4] = [0xff; 4];

/// The version of the metadata written by this crate. Messages of other versions are
/// rejected.
pub(crate) const METADATA_VERSION: u16 = 1;
