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

//! Random, fixed-seeded arrays to benchmark with.

use rand::distributions::{Alphanumeric, Distribution, Standard};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::Result;
use crate::{array::*, datatypes::*, types::NativeType, types::Offset};

/// The generator all arrays of this module draw from, so that runs are comparable.
pub fn seedable_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Draws `size` slots, each null with probability `null_density` and otherwise
/// produced by `value`.
fn slots<T, F>(size: usize, null_density: f32, mut value: F) -> impl Iterator<Item = Option<T>>
where
    F: FnMut(&mut StdRng) -> T,
{
    let mut rng = seedable_rng();
    (0..size).map(move |_| {
        if rng.gen::<f32>() < null_density {
            None
        } else {
            Some(value(&mut rng))
        }
    })
}

/// A [`PrimitiveArray`] of `data_type` with uniformly drawn values.
pub fn create_primitive_array<T>(
    size: usize,
    data_type: DataType,
    null_density: f32,
) -> PrimitiveArray<T>
where
    T: NativeType,
    Standard: Distribution<T>,
{
    slots(size, null_density, |rng| rng.gen())
        .collect::<PrimitiveArray<T>>()
        .to(data_type)
}

/// A [`BooleanArray`] whose non-null slots are `true` with probability `true_density`.
pub fn create_boolean_array(size: usize, null_density: f32, true_density: f32) -> BooleanArray {
    slots(size, null_density, |rng| rng.gen::<f32>() < true_density).collect()
}

/// A [`Utf8Array`] of 4-character alphanumeric strings.
pub fn create_string_array<O: Offset>(size: usize, null_density: f32) -> Utf8Array<O> {
    slots(size, null_density, |rng| {
        rng.sample_iter(&Alphanumeric).take(4).collect::<String>()
    })
    .collect()
}

/// A [`ListArray`] of up to 8 non-null `i32` per list.
pub fn create_list_array(size: usize, null_density: f32) -> Result<ListArray<i32>> {
    let mut array = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<i32>::new());
    let lists = slots(size, null_density, |rng| {
        let len = rng.gen_range(0, 8);
        (0..len).map(|_| Some(rng.gen::<i32>())).collect::<Vec<_>>()
    });
    for list in lists {
        array.try_push(list)?;
    }
    Ok(array.finish())
}
