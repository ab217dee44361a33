//! Routine API: company and employee REST backend over PostgreSQL.

pub mod cache;
pub mod case;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod links;
pub mod mapping;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod shaping;
pub mod sql;
pub mod state;
pub mod store;

pub use cache::CachePolicy;
pub use error::{AppError, ConfigError};
pub use mapping::{default_registry, MappingRegistry, REQUIRED_PAIRS};
pub use migration::{apply_migrations, seed};
pub use repository::{CompanyRepository, PgCompanyRepository};
pub use routes::{api_routes, app, common_routes};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
