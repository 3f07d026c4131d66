//! Application layer (use-cases, policies).
//!
//! This module orchestrates domain logic and defines app-specific
//! policies without depending on the CLI front end.

pub mod inventory;
