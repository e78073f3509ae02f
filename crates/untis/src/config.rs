/// Connection and cache settings for a WebUntis session
use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MINUTES};
use crate::error::{Result, UntisError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;

/// Path of the JSON-RPC endpoint on a WebUntis server.
pub const DEFAULT_RPC_PATH: &str = "/WebUntis/jsonrpc.do";

/// Client name reported to the server on login.
pub const DEFAULT_CLIENT_NAME: &str = "untis-rs";

/// Settings needed to open a session
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Host name, e.g. "mese.webuntis.com"
    pub server: String,
    pub school: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("server", &self.server)
            .field("school", &self.school)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("path", &self.path)
            .field("client_name", &self.client_name)
            .field("cache", &self.cache)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Response cache limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}

fn default_path() -> String {
    DEFAULT_RPC_PATH.to_string()
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl SessionConfig {
    /// Creates a configuration with default path, client name and cache limits.
    pub fn new(
        server: impl Into<String>,
        school: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            school: school.into(),
            username: username.into(),
            password: password.into(),
            path: default_path(),
            client_name: default_client_name(),
            cache: CacheConfig::default(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Loads a session configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(SessionConfig)` - The parsed configuration
    /// * `Err(UntisError::Config)` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| UntisError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Builds `https://<server><path>?school=<school>`.
    pub fn endpoint_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("https://{}{}", self.server, self.path))?;
        url.query_pairs_mut().append_pair("school", &self.school);
        Ok(url)
    }
}
