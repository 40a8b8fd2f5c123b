//! JWT secret resolution.

use std::{fs, io, path::Path};

use rand::{Rng, SeedableRng, distr::Alphanumeric, rng, rngs::StdRng};
use tracing::{info, warn};

use crate::{
    Config, InitError,
    constants::{JWT_SECRET_LEN, TEST_SEED_VAR},
    util::non_empty,
};

/// Where the emitted JWT secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// `JWT_SECRET` was set.
    Environment,
    /// Carried over from the config file being replaced.
    ExistingFile,
    /// Freshly generated for this run.
    Generated,
}

/// JWT secret chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret itself.
    pub value: String,
    /// Which layer supplied it.
    pub source: SecretSource,
}

/// Pick the JWT secret for this run.
///
/// A non-empty override is used verbatim. Otherwise the secret of the file at
/// `existing_path` is reused so sessions survive a regeneration; a file that
/// exists but cannot be read or parsed is fatal. Failing both, a fresh random
/// secret is generated.
pub fn resolve_jwt_secret(
    env_override: Option<&str>,
    existing_path: &Path,
) -> Result<ResolvedSecret, InitError> {
    if let Some(secret) = non_empty(env_override) {
        return Ok(ResolvedSecret {
            value: secret.to_string(),
            source: SecretSource::Environment,
        });
    }

    if let Some(existing) = read_existing_config(existing_path)?
        && !existing.jwt_secret.is_empty()
    {
        return Ok(ResolvedSecret {
            value: existing.jwt_secret,
            source: SecretSource::ExistingFile,
        });
    }

    Ok(ResolvedSecret {
        value: generate_secret(JWT_SECRET_LEN),
        source: SecretSource::Generated,
    })
}

/// Load the config a previous run left at `path`, if there is one.
pub fn read_existing_config(path: &Path) -> Result<Option<Config>, InitError> {
    match fs::metadata(path) {
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "cannot stat existing config; treating it as absent"
            );
            return Ok(None);
        }
    }

    let data = fs::read(path).map_err(|source| InitError::ReadExisting {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_slice(&data).map_err(|source| {
        InitError::ParseExisting {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), "loaded existing config");
    Ok(Some(config))
}

/// Random alphanumeric secret of `len` characters.
///
/// Honors `ALIST_INIT_TEST_SEED` so tests can pin the output.
pub fn generate_secret(len: usize) -> String {
    if let Ok(seed_str) = std::env::var(TEST_SEED_VAR)
        && let Ok(seed) = seed_str.parse::<u64>()
    {
        return sample_alphanumeric(StdRng::seed_from_u64(seed), len);
    }

    sample_alphanumeric(rng(), len)
}

fn sample_alphanumeric<R: Rng>(source: R, len: usize) -> String {
    source
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
