//! Turns an [`InitEnv`] into a complete [`Config`].

pub mod db_url;
pub mod error;
pub mod overrides;
pub mod secret;

use std::path::Path;

use tracing::info;

use crate::{Config, InitEnv, default_config};

use db_url::database_parts_from_env;
use error::InitError;
use overrides::apply_overrides;
use secret::resolve_jwt_secret;

/// Build the configuration for this run.
///
/// Layers, lowest first: built-in defaults, the parts of `DATABASE_URL`,
/// `ALIST_*` overrides. The JWT secret is resolved last against the file at
/// `existing_path`, which is only read, never written.
pub fn build_config(
    existing_path: &Path,
    env: &InitEnv,
) -> Result<Config, InitError> {
    let mut config = default_config();

    database_parts_from_env(env.database_url.as_deref())
        .apply(&mut config.database);

    let applied = apply_overrides(&mut config, &env.overrides);
    if !applied.is_empty() {
        info!(count = applied.len(), keys = ?applied, "applied env overrides");
    }

    let secret = resolve_jwt_secret(env.jwt_secret.as_deref(), existing_path)?;
    info!(source = ?secret.source, "resolved jwt secret");
    config.jwt_secret = secret.value;

    Ok(config)
}
