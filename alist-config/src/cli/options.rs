//! Options accepted by [`run_config_init`](super::run_config_init).

use std::path::PathBuf;

use crate::constants::DEFAULT_CONFIG_PATH;

#[derive(Debug, Clone)]
/// Options controlling a config init run.
pub struct InitOptions {
    /// File to read the previous secret from and to write the result to.
    pub config_path: PathBuf,
    /// Optional dotenv file layered under the process environment.
    pub env_file: Option<PathBuf>,
    /// Print the rendered JSON instead of writing `config_path`.
    pub print_only: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            env_file: None,
            print_only: false,
        }
    }
}

impl InitOptions {
    /// Options for `config_path` with everything else defaulted.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            ..Self::default()
        }
    }
}
