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

//! This module contains an implementation of a contiguous immutable memory region that knows
//! how to de-allocate itself, [`Bytes`].

use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;

use crate::alloc;

/// A continuous, fixed-size, immutable memory region that knows how to de-allocate itself.
///
/// This region is allocated using [`alloc::allocate_aligned`] (or its variants) and
/// deallocated accordingly with [`alloc::free_aligned`] when dropped.
pub(crate) struct Bytes {
    /// The raw pointer to be beginning of the region
    ptr: NonNull<u8>,
    /// The number of initialized bytes
    len: usize,
    /// The number of bytes allocated
    capacity: usize,
}

impl Bytes {
    /// Takes ownership of an allocated memory region,
    ///
    /// # Safety
    ///
    /// This function is unsafe as there is no guarantee that the given pointer is valid for `len`
    /// bytes, nor that it was allocated by [`alloc`] for `capacity` bytes.
    /// If the `ptr` and `capacity` come from a [`super::MutableBuffer`], then this is guaranteed.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize, capacity: usize) -> Self {
        debug_assert!(len <= capacity);
        Self { ptr, len, capacity }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn ptr(&self) -> NonNull<u8> {
        self.ptr
    }
}

impl Drop for Bytes {
    fn drop(&mut self) {
        // Safety: invariant of `from_raw_parts`
        unsafe { alloc::free_aligned(self.ptr, self.capacity) }
    }
}

impl std::ops::Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // Safety: `ptr` is valid for `len` initialized bytes
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Bytes) -> bool {
        self[..] == other[..]
    }
}

impl Debug for Bytes {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Bytes {{ ptr: {:?}, len: {}, data: ", self.ptr, self.len)?;

        f.debug_list().entries(self.iter()).finish()?;

        write!(f, " }}")
    }
}

// This is sound because `Bytes` is an immutable container
unsafe impl Send for Bytes {}
unsafe impl Sync for Bytes {}
