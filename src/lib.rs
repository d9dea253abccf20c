//! AUTOmate Library
//!
//! Vehicle records with fuel and maintenance logs, stored as JSON files.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod output;
pub mod types;
