pub mod assessments;
pub mod auth;
pub mod classes;
pub mod competencies;
pub mod fees;
mod http;
pub mod reports;
pub mod staff;
pub mod students;
pub mod subjects;

pub use auth::{login, logout};
pub use classes::{check_class_name_exist, create_class, list_classes};
pub use students::register_student;
