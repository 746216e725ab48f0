pub mod dashboard;
pub mod enrollment;
pub mod promotion;
pub mod reports;
pub mod term_setup;
