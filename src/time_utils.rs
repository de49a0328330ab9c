// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps.

use chrono::{DateTime, Duration, Utc};

/// Current time, nudged forward so it is strictly after `previous`.
///
/// Two updates inside the same clock tick would otherwise share a timestamp.
pub fn now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
