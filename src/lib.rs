//! Agency Cost Engine
//!
//! This crate converts employee compensation, shared overhead and assigned
//! assets into hourly, daily, monthly and yearly cost rates, and prices
//! project estimates from those rates with overhead, margin and discount.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod snapshot;
