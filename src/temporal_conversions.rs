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

//! Conversion methods for dates and times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::datatypes::TimeUnit;

/// Number of seconds in a day
pub const SECONDS_IN_DAY: i64 = 86_400;
/// Number of milliseconds in a second
pub const MILLISECONDS: i64 = 1_000;
/// Number of microseconds in a second
pub const MICROSECONDS: i64 = 1_000_000;
/// Number of nanoseconds in a second
pub const NANOSECONDS: i64 = 1_000_000_000;
/// Number of days between 0001-01-01 and 1970-01-01
pub const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// converts a `i32` representing a `date32` to [`NaiveDate`]
#[inline]
pub fn date32_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(EPOCH_DAYS_FROM_CE.checked_add(days)?)
}

/// converts a `i64` representing a `date64` to [`NaiveDateTime`]
#[inline]
pub fn date64_to_datetime(v: i64) -> Option<NaiveDateTime> {
    timestamp_to_naive_datetime(v, TimeUnit::Millisecond)
}

/// converts a `i64` representing a `date64` to [`NaiveDate`]
#[inline]
pub fn date64_to_date(milliseconds: i64) -> Option<NaiveDate> {
    date64_to_datetime(milliseconds).map(|x| x.date())
}

/// converts a `i32` representing a `time32` in `time_unit` to [`NaiveTime`]
#[inline]
pub fn time32_to_time(v: i32, time_unit: TimeUnit) -> Option<NaiveTime> {
    let v = u32::try_from(v).ok()?;
    match time_unit {
        TimeUnit::Second => NaiveTime::from_num_seconds_from_midnight_opt(v, 0),
        TimeUnit::Millisecond => NaiveTime::from_num_seconds_from_midnight_opt(
            v / MILLISECONDS as u32,
            v % MILLISECONDS as u32 * MICROSECONDS as u32,
        ),
        _ => None,
    }
}

/// converts a `i64` representing a `time64` in `time_unit` to [`NaiveTime`]
#[inline]
pub fn time64_to_time(v: i64, time_unit: TimeUnit) -> Option<NaiveTime> {
    let (seconds, nanoseconds) = match time_unit {
        TimeUnit::Microsecond => (v / MICROSECONDS, v % MICROSECONDS * MILLISECONDS),
        TimeUnit::Nanosecond => (v / NANOSECONDS, v % NANOSECONDS),
        _ => return None,
    };
    NaiveTime::from_num_seconds_from_midnight_opt(
        u32::try_from(seconds).ok()?,
        u32::try_from(nanoseconds).ok()?,
    )
}

/// converts a `i64` representing a timestamp in `time_unit` to [`NaiveDateTime`]
#[inline]
pub fn timestamp_to_naive_datetime(v: i64, time_unit: TimeUnit) -> Option<NaiveDateTime> {
    let (seconds, nanoseconds) = match time_unit {
        TimeUnit::Second => (v, 0),
        TimeUnit::Millisecond => (
            v.div_euclid(MILLISECONDS),
            v.rem_euclid(MILLISECONDS) * MICROSECONDS,
        ),
        TimeUnit::Microsecond => (
            v.div_euclid(MICROSECONDS),
            v.rem_euclid(MICROSECONDS) * MILLISECONDS,
        ),
        TimeUnit::Nanosecond => (v.div_euclid(NANOSECONDS), v.rem_euclid(NANOSECONDS)),
    };
    DateTime::from_timestamp(seconds, u32::try_from(nanoseconds).ok()?).map(|x| x.naive_utc())
}

/// The suffix used to display a duration in `time_unit`.
pub fn duration_suffix(time_unit: TimeUnit) -> &'static str {
    match time_unit {
        TimeUnit::Second => "s",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Microsecond => "us",
        TimeUnit::Nanosecond => "ns",
    }
}
