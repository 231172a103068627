// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use aggregate::{Group, SortedAggregate};
pub use error::{AggregateError, JoinError};
pub use join::{EquiJoin, NaturalJoin};
pub use tessera_type::Result;

pub mod aggregate;
mod error;
pub mod join;
