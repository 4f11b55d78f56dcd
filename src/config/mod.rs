/// Database connection management and entity-driven table creation
pub mod database;

/// Seed plan loading from seed.toml
pub mod seed;

/// Tool settings from environment variables
pub mod settings;
