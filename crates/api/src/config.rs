use std::path::PathBuf;
use std::str::FromStr;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` is text.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// | Env Var                | Default                    |
/// |------------------------|----------------------------|
/// | `HOST`                 | `0.0.0.0`                  |
/// | `PORT`                 | `3000`                     |
/// | `CORS_ORIGINS`         | `http://localhost:5173`    |
/// | `REQUEST_TIMEOUT_SECS` | `30`                       |
/// | `UPLOAD_DIR`           | `uploads`                  |
/// | `PUBLIC_URL`           | `http://localhost:{PORT}`  |
/// | `LOG_FORMAT`           | `text`                     |
///
/// `DATABASE_URL` is read separately by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Directory uploaded posters are written to and served from.
    pub upload_dir: PathBuf,
    /// Externally visible base URL, used to build poster links. No trailing slash.
    pub public_url: String,
    pub log_format: LogFormat,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key` as `T`, panicking with the variable name on bad input.
fn parse_env<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: std::fmt::Display,
{
    let raw = env_or(key, default);
    raw.parse()
        .unwrap_or_else(|e| panic!("{key} has invalid value '{raw}': {e}"))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to
    /// local-development defaults. Panics on unparsable values.
    pub fn from_env() -> Self {
        let port: u16 = parse_env("PORT", "3000");
        let public_url = env_or("PUBLIC_URL", &format!("http://localhost:{port}"));

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port,
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "30"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            public_url: public_url.trim_end_matches('/').to_string(),
            log_format: LogFormat::from_name(&env_or("LOG_FORMAT", "text")),
        }
    }
}
