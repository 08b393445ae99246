//! LazyOverlay Library
//!
//! This library reads, writes and transforms touchscreen input-overlay
//! configuration files: flat `key = value` text describing layouts of
//! virtual buttons, their hitboxes and how they switch between each other.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod navigation;
pub mod parser;
pub mod services;
pub mod validator;
