//! Shared application state for all routes.

use crate::repository::StudentRepository;
use crate::service::StudentService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: StudentService,
}

impl AppState {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        AppState {
            service: StudentService::new(repository),
        }
    }
}
