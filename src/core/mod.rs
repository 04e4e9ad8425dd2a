//! Core components of the `revenue-highlights` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The FinMind [`FmClient`] and its builder.
//! - The primary [`FmError`] type.
//! - Shared data models like [`MonthlyRevenueRecord`] and [`YearMonth`].
//! - The [`RevenueService`] seam used by the highlight aggregator.

/// The FinMind client (`FmClient`), builder, and configuration.
pub mod client;
/// The primary error type (`FmError`) for the crate.
pub mod error;
/// Shared data models used across the revenue and highlight modules.
pub mod models;
/// Service traits for abstracting the revenue provider.
pub mod services;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FmClient`
pub use client::{FmClient, FmClientBuilder};
pub use error::FmError;
pub use models::{MonthlyRevenueRecord, YearMonth};
pub use services::{RevenueRequest, RevenueService};
