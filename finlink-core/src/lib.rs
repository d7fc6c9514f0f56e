//! Finlink Core
//!
//! Core types for the finlink aggregation API bindings.
//!
//! This crate contains:
//! - Domain types: entities returned by the aggregation API (Job, Connection, etc.)
//! - DTOs: request payloads sent to the API

pub mod domain;
pub mod dto;
