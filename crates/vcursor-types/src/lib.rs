//! Foundation types for VCURSOR.
//!
//! This crate contains the host-agnostic value types shared by all VCURSOR
//! crates: 2D vectors and viewport geometry, input events, the acceleration
//! curve, tunable settings, and error types.

pub mod config;
pub mod curve;
pub mod error;
pub mod input;
pub mod math;
