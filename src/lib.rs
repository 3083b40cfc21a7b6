//! Agro Registry Library
//!
//! Registry of agricultural producers, their farms and nurseries, the
//! control product catalog, and the labors that apply those products.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod metrics;
pub mod migrator;
pub mod seed;
pub mod services;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::RegistryServices;

/// Shared state for the CLI and tests: the configuration, the pool and every
/// service built on it.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub services: RegistryServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let services = RegistryServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }

    /// Connects using `config`, running migrations when `auto_migrate` is set.
    pub async fn connect(config: config::AppConfig) -> Result<Self, errors::ServiceError> {
        let pool = db::establish_connection_from_app_config(&config).await?;
        if config.auto_migrate {
            db::run_migrations(&pool).await?;
        }
        Ok(Self::new(Arc::new(pool), config))
    }
}
