// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! API providers and their pricing

pub mod schema;

pub use schema::{ImagePrice, PriceEntry, Provider, TokenPrice, UnitPrice};
