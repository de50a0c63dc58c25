//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; validation and timestamps belong to the domain services. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module.
//!
//! # Example
//!
//! ```ignore
//! use shelter_backend::outbound::persistence::{DbPool, DieselShelterRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shelter")).await?;
//! let shelters = DieselShelterRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_shelter_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_shelter_repository::DieselShelterRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
