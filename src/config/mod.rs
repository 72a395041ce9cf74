/// Database connection, schema creation, and one-time store initialization
pub mod database;

/// Application settings loading from moneybook.toml and the environment
pub mod settings;
