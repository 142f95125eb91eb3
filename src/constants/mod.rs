/// Extensions accepted by the upload pipeline, compared against the lower-cased suffix.
pub const PERMITTED_EXTENSIONS: [&str; 3] = [".pdf", ".csv", ".txt"];

/// 1 MiB
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set in .env file or environment variable")]
    Missing(&'static str),
    #[error("{key} must be a valid {expected} (got: {value})")]
    Invalid { key: &'static str, expected: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Env {
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
    pub upload_chunk_size: usize,
}

impl Env {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let frontend_url = lookup("FRONTEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("FRONTEND_URL"))?;
        if !is_origin(&frontend_url) {
            return Err(ConfigError::Invalid {
                key: "FRONTEND_URL",
                expected: "origin such as http://localhost:5173",
                value: frontend_url,
            });
        }

        let ip = lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080u16, "u16 integer")?;
        let workers = parse_or("WORKERS", lookup("WORKERS"), 2usize, "positive integer")?;
        let upload_chunk_size = parse_or(
            "UPLOAD_CHUNK_SIZE",
            lookup("UPLOAD_CHUNK_SIZE"),
            DEFAULT_CHUNK_SIZE,
            "positive integer",
        )?;

        if workers == 0 {
            return Err(ConfigError::Invalid {
                key: "WORKERS",
                expected: "positive integer",
                value: "0".to_string(),
            });
        }
        if upload_chunk_size == 0 {
            return Err(ConfigError::Invalid {
                key: "UPLOAD_CHUNK_SIZE",
                expected: "positive integer",
                value: "0".to_string(),
            });
        }

        Ok(Env { frontend_url, ip, port, workers, upload_chunk_size })
    }
}

/// `*`, or an http(s) URL with a host and no path.
fn is_origin(value: &str) -> bool {
    let value = value.trim_end_matches('/');
    if value == "*" {
        return true;
    }
    match value.parse::<actix_web::http::Uri>() {
        Ok(uri) => {
            let bare = match uri.path_and_query() {
                Some(pq) => matches!(pq.as_str(), "" | "/"),
                None => true,
            };
            matches!(uri.scheme_str(), Some("http") | Some("https"))
                && uri.host().is_some_and(|host| !host.is_empty())
                && bare
        }
        Err(_) => false,
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => {
            value.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key, expected, value })
        }
        None => Ok(default),
    }
}
