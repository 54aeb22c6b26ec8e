// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod persistence;
pub mod service;

pub use crate::config::ServiceConfig;
pub use crate::core::WordGraph;
pub use crate::error::{Result, WordGraphError};
pub use crate::service::{LoadReport, WordService};
