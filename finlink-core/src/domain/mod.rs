//! Core domain types
//!
//! This module contains the entities the aggregation API returns. These types
//! mirror the wire representation and carry the helpers callers use to inspect
//! connection-validation progress.

pub mod connection;
pub mod job;
