//! Snapshot of the environment variables an init run reads.

use std::{collections::BTreeMap, path::Path};

use crate::{
    InitError,
    constants::{DATABASE_URL_VAR, JWT_SECRET_VAR, OVERRIDE_PREFIX},
};

/// Environment-derived inputs for a single init run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitEnv {
    /// Raw `DATABASE_URL`, unparsed.
    pub database_url: Option<String>,
    /// Raw `JWT_SECRET`; empty counts as unset.
    pub jwt_secret: Option<String>,
    /// `ALIST_*` variables keyed without the prefix (`HTTP_PORT`, `DB_HOST`).
    pub overrides: BTreeMap<String, String>,
}

impl InitEnv {
    /// Snapshot the process environment.
    pub fn gather() -> Self {
        Self::from_vars(process_vars())
    }

    /// Snapshot the process environment layered over a dotenv file.
    ///
    /// Values already present in the process environment win over the file.
    pub fn gather_with_file(env_file: Option<&Path>) -> Result<Self, InitError> {
        let Some(path) = env_file else {
            return Ok(Self::gather());
        };

        let mut merged = BTreeMap::new();
        for entry in dotenvy::from_path_iter(path)? {
            let (key, value) = entry?;
            merged.insert(key, value);
        }
        merged.extend(process_vars());

        Ok(Self::from_vars(merged))
    }

    /// Pick the variables this tool reads out of arbitrary key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                DATABASE_URL_VAR => env.database_url = Some(value),
                JWT_SECRET_VAR => env.jwt_secret = Some(value),
                _ => {
                    if let Some(field) = key.strip_prefix(OVERRIDE_PREFIX)
                        && !field.is_empty()
                    {
                        env.overrides.insert(field.to_string(), value);
                    }
                }
            }
        }
        env
    }
}

/// Process environment, skipping entries that are not valid unicode.
fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(key, value)| {
        Some((key.into_string().ok()?, value.into_string().ok()?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vars_picks_known_keys_and_prefixed_overrides() {
        let env = InitEnv::from_vars([
            ("DATABASE_URL", "postgres://u:p@h:1/db"),
            ("JWT_SECRET", "s3cret"),
            ("ALIST_HTTP_PORT", "8080"),
            ("ALIST_", "ignored"),
            ("HOME", "/root"),
        ]);

        assert_eq!(env.database_url.as_deref(), Some("postgres://u:p@h:1/db"));
        assert_eq!(env.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(env.overrides.len(), 1);
        assert_eq!(
            env.overrides.get("HTTP_PORT").map(String::as_str),
            Some("8080")
        );
    }

    #[test]
    fn env_file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "ALIST_INIT_FILE_ONLY_KEY=from-file\nALIST_SITE_URL=https://files.example\n",
        )
        .unwrap();

        let env = InitEnv::gather_with_file(Some(&path)).unwrap();
        assert_eq!(
            env.overrides.get("INIT_FILE_ONLY_KEY").map(String::as_str),
            Some("from-file")
        );
    }

    #[test]
    fn process_environment_wins_over_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "ALIST_INIT_LAYER_CHECK=file\nALIST_INIT_LAYER_FILE_ONLY=file\n",
        )
        .unwrap();
        // Only this test touches the key.
        unsafe { std::env::set_var("ALIST_INIT_LAYER_CHECK", "process") };

        let env = InitEnv::gather_with_file(Some(&path)).unwrap();
        unsafe { std::env::remove_var("ALIST_INIT_LAYER_CHECK") };

        assert_eq!(
            env.overrides.get("INIT_LAYER_CHECK").map(String::as_str),
            Some("process")
        );
        assert_eq!(
            env.overrides.get("INIT_LAYER_FILE_ONLY").map(String::as_str),
            Some("file")
        );
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InitEnv::gather_with_file(Some(&dir.path().join("nope")))
            .unwrap_err();
        assert!(matches!(err, InitError::EnvFile(_)));
    }
}
