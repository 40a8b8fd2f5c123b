//! Configuration bootstrapper for the alist server.
//!
//! This crate turns the process environment into a complete `config.json`:
//! the database connection string is split into its parts, every other field
//! is filled from built-in defaults, explicit `ALIST_*` overrides are applied,
//! and the JWT secret is carried over from a previous run when one exists.
//! The `alist-init` binary is a thin wrapper over [`cli::run_config_init`].

pub mod cli;
pub mod config_writer;
pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use config_writer::persist;
pub use loader::{
    build_config,
    db_url::{DatabaseUrlParts, database_parts_from_env},
    error::{DsnError, InitError},
    secret::{ResolvedSecret, SecretSource, resolve_jwt_secret},
};
pub use models::sources::InitEnv;
pub use models::{
    Config, CorsConfig, DatabaseConfig, FtpConfig, LogConfig,
    MeilisearchConfig, S3Config, SchemeConfig, SftpConfig, TaskConfig,
    TasksConfig, default_config,
};
