//! On-disk schema of `config.json`.
//!
//! Field order and key names are what the server expects, including the
//! historical `task_persistant` spelling. Every struct deserializes with
//! `#[serde(default)]` so an older file that lacks newer keys still parses;
//! a key holding the wrong JSON type is still rejected.

pub mod sources;

use serde::{Deserialize, Serialize};

/// Everything the server reads from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When set the server trusts this file and ignores `ALIST_*` variables.
    pub force: bool,
    /// Public URL of the site, used when links are generated.
    pub site_url: String,
    /// Base URL static assets are served from; empty serves them locally.
    pub cdn: String,
    /// Key used to sign session tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in hours.
    pub token_expires_in: u32,
    /// Database connection.
    pub database: DatabaseConfig,
    /// Search backend, only used when the server is set to index with it.
    pub meilisearch: MeilisearchConfig,
    /// Listener addresses and TLS.
    pub scheme: SchemeConfig,
    /// Scratch space for uploads and transfers.
    pub temp_dir: String,
    /// Index directory of the built-in search backend.
    pub bleve_dir: String,
    /// Empty means the server serves its embedded frontend.
    pub dist_dir: String,
    /// Log file rotation.
    pub log: LogConfig,
    /// Seconds to wait before the server starts its storages.
    pub delayed_start: u32,
    /// `0` disables the limit.
    pub max_connections: u32,
    /// Accept self-signed certificates from upstream storages.
    pub tls_insecure_skip_verify: bool,
    /// Background task pools.
    pub tasks: TasksConfig,
    /// Cross-origin request policy.
    pub cors: CorsConfig,
    /// S3-compatible gateway.
    pub s3: S3Config,
    /// FTP server.
    pub ftp: FtpConfig,
    /// SFTP server.
    pub sftp: SftpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force: false,
            site_url: String::new(),
            cdn: String::new(),
            jwt_secret: String::new(),
            token_expires_in: 48,
            database: DatabaseConfig::default(),
            meilisearch: MeilisearchConfig::default(),
            scheme: SchemeConfig::default(),
            temp_dir: "data/temp".to_string(),
            bleve_dir: "data/bleve".to_string(),
            dist_dir: String::new(),
            log: LogConfig::default(),
            delayed_start: 0,
            max_connections: 0,
            tls_insecure_skip_verify: true,
            tasks: TasksConfig::default(),
            cors: CorsConfig::default(),
            s3: S3Config::default(),
            ftp: FtpConfig::default(),
            sftp: SftpConfig::default(),
        }
    }
}

/// Built-in defaults with no secret and no database credentials.
///
/// Pure: every call returns an identical value and nothing is read from the
/// environment or the filesystem.
pub fn default_config() -> Config {
    Config::default()
}

/// Connection settings for the metadata database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Driver name (`sqlite3`, `mysql`, `postgres`); empty lets the server pick.
    #[serde(rename = "type")]
    pub kind: String,
    /// Server host name or address.
    pub host: String,
    /// `0` when the connection string carried no port.
    pub port: u16,
    pub user: String,
    /// Password in plain text.
    pub password: String,
    /// Database name.
    pub name: String,
    /// SQLite file, used when `type` is `sqlite3`.
    pub db_file: String,
    /// Prefix for every table the server creates.
    pub table_prefix: String,
    /// Postgres `sslmode`.
    pub ssl_mode: String,
    /// Full driver DSN; when set it takes precedence over the split fields.
    pub dsn: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: String::new(),
            host: String::new(),
            port: 0,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            db_file: "data/data.db".to_string(),
            table_prefix: "x_".to_string(),
            ssl_mode: String::new(),
            dsn: String::new(),
        }
    }
}

/// Meilisearch connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeilisearchConfig {
    /// Base URL of the Meilisearch instance.
    pub host: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Prefix applied to index names.
    pub index_prefix: String,
}

impl Default for MeilisearchConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:7700".to_string(),
            api_key: String::new(),
            index_prefix: String::new(),
        }
    }
}

/// Where and how the server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Bind address for the HTTP and HTTPS listeners.
    pub address: String,
    /// HTTP listener port.
    pub http_port: u16,
    /// `-1` disables the HTTPS listener.
    pub https_port: i32,
    /// Redirect plain HTTP to HTTPS.
    pub force_https: bool,
    /// PEM certificate for the HTTPS listener.
    pub cert_file: String,
    /// PEM key for the HTTPS listener.
    pub key_file: String,
    /// Unix socket to listen on instead of TCP when set.
    pub unix_file: String,
    /// Octal permissions applied to `unix_file`.
    pub unix_file_perm: String,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            http_port: 5244,
            https_port: -1,
            force_https: false,
            cert_file: String::new(),
            key_file: String::new(),
            unix_file: String::new(),
            unix_file_perm: String::new(),
        }
    }
}

/// Rotating log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write logs to `name` as well as stdout.
    pub enable: bool,
    /// Log file path.
    pub name: String,
    /// Megabytes per file before rotation.
    pub max_size: u32,
    /// Rotated files kept.
    pub max_backups: u32,
    /// Days.
    pub max_age: u32,
    /// Gzip rotated files.
    pub compress: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: "data/log/log.log".to_string(),
            max_size: 50,
            max_backups: 30,
            max_age: 28,
            compress: false,
        }
    }
}

/// Worker pool settings for one class of background task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Concurrent workers.
    pub workers: u32,
    /// Retries before a task is marked failed.
    pub max_retry: u32,
    #[serde(rename = "task_persistant")]
    /// Keep queued tasks across restarts.
    pub task_persistent: bool,
}

impl TaskConfig {
    fn pool(workers: u32, max_retry: u32) -> Self {
        Self {
            workers,
            max_retry,
            task_persistent: false,
        }
    }
}

/// Pools per task kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Offline downloads.
    pub download: TaskConfig,
    /// Transfers of finished downloads into storages.
    pub transfer: TaskConfig,
    /// Uploads into storages.
    pub upload: TaskConfig,
    /// Copies between storages.
    pub copy: TaskConfig,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            download: TaskConfig::pool(5, 1),
            transfer: TaskConfig::pool(5, 2),
            upload: TaskConfig::pool(5, 0),
            copy: TaskConfig::pool(5, 2),
        }
    }
}

/// Cross-origin request policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any.
    pub allow_origins: Vec<String>,
    /// Allowed methods.
    pub allow_methods: Vec<String>,
    /// Allowed request headers.
    pub allow_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let any = || vec!["*".to_string()];
        Self {
            allow_origins: any(),
            allow_methods: any(),
            allow_headers: any(),
        }
    }
}

/// S3-compatible gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// Run the gateway.
    pub enable: bool,
    /// Gateway port.
    pub port: u16,
    /// Serve the gateway over TLS.
    pub ssl: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            enable: false,
            port: 5246,
            ssl: false,
        }
    }
}

/// Built-in FTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FtpConfig {
    /// Run the FTP server.
    pub enable: bool,
    /// Listen address, `host:port`.
    pub listen: String,
    /// Attempts to find a free passive-mode port.
    pub find_pasv_port_attempts: u32,
    /// Allow active-mode data connections from ports other than 20.
    pub active_transfer_port_non_20: bool,
    /// Seconds.
    pub idle_timeout: u32,
    /// Seconds.
    pub connection_timeout: u32,
    /// Refuse active-mode transfers.
    pub disable_active_mode: bool,
    /// Default to binary transfer mode.
    pub default_transfer_binary: bool,
    /// Require active-mode data connections to come from the control peer.
    pub enable_active_conn_ip_check: bool,
    /// Require passive-mode data connections to come from the control peer.
    pub enable_pasv_conn_ip_check: bool,
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            enable: false,
            listen: ":5221".to_string(),
            find_pasv_port_attempts: 50,
            active_transfer_port_non_20: false,
            idle_timeout: 900,
            connection_timeout: 30,
            disable_active_mode: false,
            default_transfer_binary: false,
            enable_active_conn_ip_check: true,
            enable_pasv_conn_ip_check: true,
        }
    }
}

/// Built-in SFTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SftpConfig {
    /// Run the SFTP server.
    pub enable: bool,
    /// Listen address, `host:port`.
    pub listen: String,
}

impl Default for SftpConfig {
    fn default() -> Self {
        Self {
            enable: false,
            listen: ":5222".to_string(),
        }
    }
}
