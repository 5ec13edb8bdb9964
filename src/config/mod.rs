//! Configuration module for budget-recon
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ReconPaths;
pub use settings::{DigitGrouping, Settings};
