pub mod entry;
pub mod settings;
pub mod workspace;
