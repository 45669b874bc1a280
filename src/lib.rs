//! Student management: REST backend for students and their course enrollments.

pub mod converter;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use converter::convert_student_details;
pub use error::{AppError, ConfigError, FieldError};
pub use model::{ApplicationStatus, Student, StudentCourse, StudentDetail};
pub use openapi::ApiDoc;
pub use repository::{InMemoryStudentRepository, PgStudentRepository, StudentRepository, StudentTransaction};
pub use routes::{app, common_routes, student_routes};
pub use service::StudentService;
pub use settings::{AppConfig, StoreKind};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
