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

//! A columnar in-memory array library with nested types and zero-copy interprocess
//! transfer.
//!
//! Data flows through the following layers:
//! * [`buffer::Buffer`]: an immutable, 64-byte aligned, reference-counted byte region that
//!   can be sliced without copying;
//! * [`array::ArrayData`]: the untyped, validated description of an array (data type,
//!   length, offset, null count, buffers and children);
//! * typed views such as [`array::PrimitiveArray`] or [`array::ListArray`], and the
//!   [`array::Array`] sum over all of them;
//! * [`record_batch::RecordBatch`]: equal-length columns described by a
//!   [`datatypes::Schema`];
//! * [`io::ipc`]: encoding of record batches into self-describing messages whose buffers
//!   are reconstructed without copying.
//!
//! ```
//! use std::sync::Arc;
//! use columnar::array::{Array, Int32Array, MutableListArray, MutablePrimitiveArray};
//! use columnar::datatypes::{Field, Schema};
//! use columnar::record_batch::RecordBatch;
//!
//! # fn main() -> columnar::error::Result<()> {
//! let mut lists = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<i32>::new());
//! lists.try_push(Some(vec![Some(1), Some(2)]))?;
//! lists.try_push(None::<Vec<Option<i32>>>)?;
//! let lists: Array = lists.finish().into();
//!
//! let ids: Array = Int32Array::from_slice([1, 2]).into();
//! let schema = Schema::new(vec![
//!     Field::new("id", ids.data_type().clone(), false),
//!     Field::new("values", lists.data_type().clone(), true),
//! ]);
//! let batch = RecordBatch::try_new(Arc::new(schema), vec![ids, lists])?;
//! assert_eq!(batch.num_rows(), 2);
//! assert_eq!(batch.column(1)?.null_count(), 1);
//! # Ok(())
//! # }
//! ```
// So that we have more control over what is `unsafe` inside an `unsafe` block
#![allow(unused_unsafe)]
//
#![allow(clippy::len_without_is_empty)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod alloc;
pub mod array;
pub mod bitmap;
pub mod buffer;
pub mod error;
pub mod scalar;
pub mod types;

pub mod datatypes;
pub mod io;
pub mod record_batch;
pub mod temporal_conversions;

pub mod util;
