// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use builder::{TracingBuilder, TracingFormat};
pub use tessera_type::Result;

pub mod builder;
mod error;
