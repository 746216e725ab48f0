pub mod logger;
pub mod models;
pub mod state;
pub mod taxonomy;
pub mod types;
pub mod validate;
pub mod workflow;
