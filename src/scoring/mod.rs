pub mod points;
pub mod standings;
pub mod types;
