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

//! Defines [`Error`], representing all failures of this crate.
use std::fmt::{Debug, Display, Formatter};

/// Enum with all errors in this crate.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The buffers, children or lengths of an array are inconsistent with its data type.
    Layout(String),
    /// An array was interpreted as a type it is not.
    TypeMismatch(String),
    /// The columns of a record batch do not match its schema.
    SchemaMismatch(String),
    /// An IPC message is malformed, truncated or points outside of its body.
    Decode(String),
    /// Memory could not be allocated.
    Allocation(String),
    /// An index was out of bounds.
    IndexOutOfRange {
        /// the requested index
        index: usize,
        /// the number of items available
        len: usize,
    },
    /// Wrong arguments were passed to a function.
    InvalidArgument(String),
    /// An offset or key did not fit in its integer type.
    Overflow,
    /// Error from the underlying reader or writer.
    Io(std::io::Error),
}

impl Error {
    /// Returns an [`Error::Layout`]. Used to declare invalid layouts.
    pub(crate) fn oos<A: Into<String>>(msg: A) -> Self {
        Self::Layout(msg.into())
    }

    pub(crate) fn decode<A: Into<String>>(msg: A) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Layout(desc) => write!(f, "Layout error: {}", desc),
            Error::TypeMismatch(desc) => write!(f, "Type mismatch: {}", desc),
            Error::SchemaMismatch(desc) => write!(f, "Schema mismatch: {}", desc),
            Error::Decode(desc) => write!(f, "Decode error: {}", desc),
            Error::Allocation(desc) => write!(f, "Allocation error: {}", desc),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            Error::InvalidArgument(desc) => write!(f, "Invalid argument error: {}", desc),
            Error::Overflow => write!(f, "Operation overflowed the maximum offset"),
            Error::Io(desc) => write!(f, "Io error: {}", desc),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Typedef for a [`std::result::Result`] of an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
