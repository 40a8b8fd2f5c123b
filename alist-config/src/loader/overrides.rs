//! `ALIST_*` environment overrides.
//!
//! The server reads the same variable names at startup; honoring them here
//! lets an image bake non-default values into the generated file. Each entry
//! maps an external key (without the `ALIST_` prefix) to one field.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use tracing::{debug, warn};

use crate::{
    Config, TaskConfig,
    util::{parse_bool, parse_csv},
};

type Apply = fn(&mut Config, &str) -> Result<(), String>;

const OVERRIDES: &[(&str, Apply)] = &[
    ("FORCE", |c, v| set_bool(&mut c.force, v)),
    ("SITE_URL", |c, v| set_string(&mut c.site_url, v)),
    ("CDN", |c, v| set_string(&mut c.cdn, v)),
    ("TOKEN_EXPIRES_IN", |c, v| set_parsed(&mut c.token_expires_in, v)),
    ("TEMP_DIR", |c, v| set_string(&mut c.temp_dir, v)),
    ("BLEVE_DIR", |c, v| set_string(&mut c.bleve_dir, v)),
    ("DIST_DIR", |c, v| set_string(&mut c.dist_dir, v)),
    ("DELAYED_START", |c, v| set_parsed(&mut c.delayed_start, v)),
    ("MAX_CONNECTIONS", |c, v| set_parsed(&mut c.max_connections, v)),
    ("TLS_INSECURE_SKIP_VERIFY", |c, v| {
        set_bool(&mut c.tls_insecure_skip_verify, v)
    }),
    // database
    ("DB_TYPE", |c, v| set_string(&mut c.database.kind, v)),
    ("DB_HOST", |c, v| set_string(&mut c.database.host, v)),
    ("DB_PORT", |c, v| set_parsed(&mut c.database.port, v)),
    ("DB_USER", |c, v| set_string(&mut c.database.user, v)),
    ("DB_PASS", |c, v| set_string(&mut c.database.password, v)),
    ("DB_NAME", |c, v| set_string(&mut c.database.name, v)),
    ("DB_FILE", |c, v| set_string(&mut c.database.db_file, v)),
    ("DB_TABLE_PREFIX", |c, v| set_string(&mut c.database.table_prefix, v)),
    ("DB_SSL_MODE", |c, v| set_string(&mut c.database.ssl_mode, v)),
    ("DB_DSN", |c, v| set_string(&mut c.database.dsn, v)),
    // meilisearch
    ("MEILISEARCH_HOST", |c, v| set_string(&mut c.meilisearch.host, v)),
    ("MEILISEARCH_API_KEY", |c, v| {
        set_string(&mut c.meilisearch.api_key, v)
    }),
    ("MEILISEARCH_INDEX_PREFIX", |c, v| {
        set_string(&mut c.meilisearch.index_prefix, v)
    }),
    // scheme (unprefixed, as the server names them)
    ("ADDR", |c, v| set_string(&mut c.scheme.address, v)),
    ("HTTP_PORT", |c, v| set_parsed(&mut c.scheme.http_port, v)),
    ("HTTPS_PORT", |c, v| set_parsed(&mut c.scheme.https_port, v)),
    ("FORCE_HTTPS", |c, v| set_bool(&mut c.scheme.force_https, v)),
    ("CERT_FILE", |c, v| set_string(&mut c.scheme.cert_file, v)),
    ("KEY_FILE", |c, v| set_string(&mut c.scheme.key_file, v)),
    ("UNIX_FILE", |c, v| set_string(&mut c.scheme.unix_file, v)),
    ("UNIX_FILE_PERM", |c, v| set_string(&mut c.scheme.unix_file_perm, v)),
    // log
    ("LOG_ENABLE", |c, v| set_bool(&mut c.log.enable, v)),
    ("LOG_NAME", |c, v| set_string(&mut c.log.name, v)),
    ("MAX_SIZE", |c, v| set_parsed(&mut c.log.max_size, v)),
    ("MAX_BACKUPS", |c, v| set_parsed(&mut c.log.max_backups, v)),
    ("MAX_AGE", |c, v| set_parsed(&mut c.log.max_age, v)),
    ("COMPRESS", |c, v| set_bool(&mut c.log.compress, v)),
    // tasks
    ("TASKS_DOWNLOAD_WORKERS", |c, v| {
        set_parsed(&mut c.tasks.download.workers, v)
    }),
    ("TASKS_DOWNLOAD_MAX_RETRY", |c, v| {
        set_parsed(&mut c.tasks.download.max_retry, v)
    }),
    ("TASKS_DOWNLOAD_TASK_PERSISTANT", |c, v| {
        set_persistent(&mut c.tasks.download, v)
    }),
    ("TASKS_TRANSFER_WORKERS", |c, v| {
        set_parsed(&mut c.tasks.transfer.workers, v)
    }),
    ("TASKS_TRANSFER_MAX_RETRY", |c, v| {
        set_parsed(&mut c.tasks.transfer.max_retry, v)
    }),
    ("TASKS_TRANSFER_TASK_PERSISTANT", |c, v| {
        set_persistent(&mut c.tasks.transfer, v)
    }),
    ("TASKS_UPLOAD_WORKERS", |c, v| {
        set_parsed(&mut c.tasks.upload.workers, v)
    }),
    ("TASKS_UPLOAD_MAX_RETRY", |c, v| {
        set_parsed(&mut c.tasks.upload.max_retry, v)
    }),
    ("TASKS_UPLOAD_TASK_PERSISTANT", |c, v| {
        set_persistent(&mut c.tasks.upload, v)
    }),
    ("TASKS_COPY_WORKERS", |c, v| set_parsed(&mut c.tasks.copy.workers, v)),
    ("TASKS_COPY_MAX_RETRY", |c, v| {
        set_parsed(&mut c.tasks.copy.max_retry, v)
    }),
    ("TASKS_COPY_TASK_PERSISTANT", |c, v| {
        set_persistent(&mut c.tasks.copy, v)
    }),
    // cors
    ("CORS_ALLOW_ORIGINS", |c, v| set_list(&mut c.cors.allow_origins, v)),
    ("CORS_ALLOW_METHODS", |c, v| set_list(&mut c.cors.allow_methods, v)),
    ("CORS_ALLOW_HEADERS", |c, v| set_list(&mut c.cors.allow_headers, v)),
    // s3
    ("S3_ENABLE", |c, v| set_bool(&mut c.s3.enable, v)),
    ("S3_PORT", |c, v| set_parsed(&mut c.s3.port, v)),
    ("S3_SSL", |c, v| set_bool(&mut c.s3.ssl, v)),
    // ftp
    ("FTP_ENABLE", |c, v| set_bool(&mut c.ftp.enable, v)),
    ("FTP_LISTEN", |c, v| set_string(&mut c.ftp.listen, v)),
    ("FTP_FIND_PASV_PORT_ATTEMPTS", |c, v| {
        set_parsed(&mut c.ftp.find_pasv_port_attempts, v)
    }),
    ("FTP_ACTIVE_TRANSFER_PORT_NON_20", |c, v| {
        set_bool(&mut c.ftp.active_transfer_port_non_20, v)
    }),
    ("FTP_IDLE_TIMEOUT", |c, v| set_parsed(&mut c.ftp.idle_timeout, v)),
    ("FTP_CONNECTION_TIMEOUT", |c, v| {
        set_parsed(&mut c.ftp.connection_timeout, v)
    }),
    ("FTP_DISABLE_ACTIVE_MODE", |c, v| {
        set_bool(&mut c.ftp.disable_active_mode, v)
    }),
    ("FTP_DEFAULT_TRANSFER_BINARY", |c, v| {
        set_bool(&mut c.ftp.default_transfer_binary, v)
    }),
    ("FTP_ENABLE_ACTIVE_CONN_IP_CHECK", |c, v| {
        set_bool(&mut c.ftp.enable_active_conn_ip_check, v)
    }),
    ("FTP_ENABLE_PASV_CONN_IP_CHECK", |c, v| {
        set_bool(&mut c.ftp.enable_pasv_conn_ip_check, v)
    }),
    // sftp
    ("SFTP_ENABLE", |c, v| set_bool(&mut c.sftp.enable, v)),
    ("SFTP_LISTEN", |c, v| set_string(&mut c.sftp.listen, v)),
];

/// Apply every recognised override to `config`.
///
/// Values that fail to parse are logged and skipped. Returns the keys that
/// were applied.
pub fn apply_overrides(
    config: &mut Config,
    overrides: &BTreeMap<String, String>,
) -> Vec<&'static str> {
    let mut applied = Vec::new();
    for (key, apply) in OVERRIDES {
        let Some(raw) = overrides.get(*key) else {
            continue;
        };
        match apply(config, raw) {
            Ok(()) => {
                debug!(key = %key, "applied ALIST_ override");
                applied.push(*key);
            }
            Err(reason) => {
                warn!(
                    key = %key,
                    value = %raw,
                    %reason,
                    "ignoring ALIST_ override"
                );
            }
        }
    }
    applied
}

fn set_string(slot: &mut String, raw: &str) -> Result<(), String> {
    *slot = raw.to_string();
    Ok(())
}

fn set_bool(slot: &mut bool, raw: &str) -> Result<(), String> {
    *slot = parse_bool(raw)
        .ok_or_else(|| format!("expected a boolean, got {raw:?}"))?;
    Ok(())
}

fn set_list(slot: &mut Vec<String>, raw: &str) -> Result<(), String> {
    *slot = parse_csv(raw);
    Ok(())
}

fn set_persistent(task: &mut TaskConfig, raw: &str) -> Result<(), String> {
    set_bool(&mut task.task_persistent, raw)
}

fn set_parsed<T>(slot: &mut T, raw: &str) -> Result<(), String>
where
    T: FromStr,
    T::Err: Display,
{
    *slot = raw.trim().parse::<T>().map_err(|err| err.to_string())?;
    Ok(())
}
