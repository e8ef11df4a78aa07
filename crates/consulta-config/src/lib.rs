//! # Consulta Config
//!
//! Configuration management for Consulta Rápida.
//! Supports layered configuration from files, prefixed environment
//! variables, and the flat variable names of earlier deployments.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
