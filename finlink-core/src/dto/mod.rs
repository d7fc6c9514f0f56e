//! Data Transfer Objects for API requests
//!
//! This module contains the request payloads sent to the aggregation API and
//! the thin response shapes that only carry a resource id.

pub mod connection;
