//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Directory where incoming uploads are persisted
    pub upload_dir: String,
    /// Directory where processed artifacts are written
    pub output_dir: String,
    /// Age threshold in seconds after which stored files are reclaimed
    pub max_file_age_secs: u64,
    /// Sweep cadence in seconds; sweeps align to wall-clock boundaries of this
    /// value (3600 means top of every hour)
    pub sweep_interval_secs: u64,
    /// Maximum accepted multipart body size in bytes
    pub max_upload_bytes: usize,
    /// When true, all pre-existing artifacts are deleted at the start of each
    /// request. Opt-in: a concurrent request's artifact can be clobbered.
    pub eager_clear_outputs: bool,
    /// External command that reads an image on stdin and writes the
    /// background-removed PNG to stdout
    pub remover_command: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPLOAD_DIR` - uploads directory (default: "uploads")
    /// - `OUTPUT_DIR` - outputs directory (default: "outputs")
    /// - `MAX_FILE_AGE_SECS` - retention threshold (default: 3600)
    /// - `SWEEP_INTERVAL_SECS` - sweep cadence (default: 3600)
    /// - `MAX_UPLOAD_BYTES` - multipart body limit (default: 20 MiB)
    /// - `EAGER_CLEAR_OUTPUTS` - "true"/"1" to clear outputs per request (default: false)
    /// - `REMOVER_COMMAND` - background-removal command line (default: "rembg i")
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "outputs".to_string()),
            max_file_age_secs: env::var("MAX_FILE_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20 * 1024 * 1024),
            eager_clear_outputs: env::var("EAGER_CLEAR_OUTPUTS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            remover_command: env::var("REMOVER_COMMAND")
                .unwrap_or_else(|_| "rembg i".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upload_dir: "uploads".to_string(),
            output_dir: "outputs".to_string(),
            max_file_age_secs: 3600,
            sweep_interval_secs: 3600,
            max_upload_bytes: 20 * 1024 * 1024,
            eager_clear_outputs: false,
            remover_command: "rembg i".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.output_dir, "outputs");
        assert_eq!(config.max_file_age_secs, 3600);
        assert_eq!(config.sweep_interval_secs, 3600);
        assert!(!config.eager_clear_outputs);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("UPLOAD_DIR");
        env::remove_var("OUTPUT_DIR");
        env::remove_var("MAX_FILE_AGE_SECS");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("MAX_UPLOAD_BYTES");
        env::remove_var("EAGER_CLEAR_OUTPUTS");
        env::remove_var("REMOVER_COMMAND");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_file_age_secs, 3600);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert!(!config.eager_clear_outputs);
        assert_eq!(config.remover_command, "rembg i");
    }
}
