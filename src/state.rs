//! Shared application state for all routes. Built once at start-up, read-only afterwards.

use crate::mapping::MappingRegistry;
use crate::repository::CompanyRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CompanyRepository>,
    /// Sort-field mappings; resolved per request, never mutated.
    pub mappings: Arc<MappingRegistry>,
}

impl AppState {
    pub fn new(repo: Arc<dyn CompanyRepository>, mappings: MappingRegistry) -> Self {
        AppState {
            repo,
            mappings: Arc::new(mappings),
        }
    }
}
