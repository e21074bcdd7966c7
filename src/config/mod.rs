/// Database configuration and connection management
pub mod database;

/// Advice thresholds and export settings loaded from config.toml
pub mod settings;

/// Owner restriction loaded from environment variables
pub mod access;
