pub mod summary_service;
pub mod validation_service;
