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

//! Defines memory-related functions, such as allocate/deallocate/reallocate memory
//! regions, cache and allocation alignments.

use std::alloc::{handle_alloc_error, Layout};
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// Alignment of every region allocated by this crate, in bytes.
pub const ALIGNMENT: usize = 64;

// A dangling, correctly aligned pointer used for empty regions.
#[inline]
fn dangling() -> NonNull<u8> {
    // Safety: ALIGNMENT is non-zero
    unsafe { NonNull::new_unchecked(ALIGNMENT as *mut u8) }
}

#[inline]
fn layout(size: usize) -> Option<Layout> {
    Layout::from_size_align(size, ALIGNMENT).ok()
}

/// Allocates a cache-aligned memory region of `size` bytes with uninitialized values.
/// This is more performant than using [allocate_aligned_zeroed] when all bytes will have
/// an unknown or non-zero value and is semantically similar to `malloc`.
/// Aborts on allocation failure.
pub fn allocate_aligned(size: usize) -> NonNull<u8> {
    if size == 0 {
        return dangling();
    }
    let layout = layout(size).unwrap_or_else(|| capacity_overflow(size));
    // Safety: size is non-zero
    let ptr = unsafe { std::alloc::alloc(layout) };
    NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
}

/// Allocates a cache-aligned memory region of `size` bytes with `0` on all of them.
/// This is more performant than using [allocate_aligned] and setting all bytes to zero
/// and is semantically similar to `calloc`.
pub fn allocate_aligned_zeroed(size: usize) -> NonNull<u8> {
    if size == 0 {
        return dangling();
    }
    let layout = layout(size).unwrap_or_else(|| capacity_overflow(size));
    // Safety: size is non-zero
    let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
    NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
}

/// Like [allocate_aligned] but returns [`Error::Allocation`] instead of aborting.
/// Used when `size` derives from untrusted input.
pub fn try_allocate_aligned(size: usize) -> Result<NonNull<u8>> {
    if size == 0 {
        return Ok(dangling());
    }
    let layout = layout(size).ok_or_else(|| {
        Error::Allocation(format!("a region of {} bytes is not representable", size))
    })?;
    // Safety: size is non-zero
    let ptr = unsafe { std::alloc::alloc(layout) };
    NonNull::new(ptr)
        .ok_or_else(|| Error::Allocation(format!("failed to allocate {} bytes", size)))
}

/// Frees memory previously allocated by [`allocate_aligned`].
/// # Safety
/// This function is sound iff:
///
/// * `ptr` was allocated by [`allocate_aligned`], [`allocate_aligned_zeroed`] or [`try_allocate_aligned`]
/// * `size` must be the same size that was used to allocate that block of memory.
pub unsafe fn free_aligned(ptr: NonNull<u8>, size: usize) {
    if size != 0 {
        std::alloc::dealloc(
            ptr.as_ptr(),
            Layout::from_size_align_unchecked(size, ALIGNMENT),
        );
    }
}

/// Reallocates memory previously allocated by [`allocate_aligned`].
/// # Safety
/// This function is sound iff `ptr` was previously allocated by `allocate_aligned` or
/// `allocate_aligned_zeroed` for `old_size` bytes.
/// Bytes past `old_size` are uninitialized.
pub unsafe fn reallocate(ptr: NonNull<u8>, old_size: usize, new_size: usize) -> NonNull<u8> {
    if old_size == 0 {
        return allocate_aligned(new_size);
    }

    if new_size == 0 {
        free_aligned(ptr, old_size);
        return dangling();
    }

    if layout(new_size).is_none() {
        capacity_overflow(new_size)
    }
    let raw_ptr = std::alloc::realloc(
        ptr.as_ptr(),
        Layout::from_size_align_unchecked(old_size, ALIGNMENT),
        new_size,
    );
    NonNull::new(raw_ptr).unwrap_or_else(|| {
        handle_alloc_error(Layout::from_size_align_unchecked(new_size, ALIGNMENT))
    })
}

#[cold]
fn capacity_overflow(size: usize) -> ! {
    panic!("allocation of {} bytes exceeds the maximum capacity", size)
}
