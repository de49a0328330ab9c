// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (in-memory).

pub mod memory;

pub use memory::{MemoryDb, StoreError};
