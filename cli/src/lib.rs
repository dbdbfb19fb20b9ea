//! Training Zones CLI Library
//!
//! This library exposes the CLI modules for use in tests and other crates.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
