pub mod assessment;
pub mod compose;
pub mod config;
pub mod errors;
pub mod learning;
pub mod models;
pub mod persona;
pub mod topics;
