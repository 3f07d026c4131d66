//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy pieces: the SQLite store and the config file.

pub mod app_config;
pub mod db;
