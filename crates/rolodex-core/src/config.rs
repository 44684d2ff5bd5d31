use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub carddav: CardDavConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
}

impl AuthConfig {
    /// ## Summary
    /// Returns the single-user section, required when `method` is `single_user`.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the section is missing.
    pub fn single_user(&self) -> CoreResult<&SingleUserAuthConfig> {
        self.single_user.as_ref().ok_or_else(|| {
            CoreError::InvalidConfiguration(
                "auth.single_user is required for single_user auth".to_string(),
            )
        })
    }

    /// Proxy header names, falling back to the defaults when the section is absent.
    #[must_use]
    pub fn proxy(&self) -> ProxyAuthConfig {
        self.proxy.clone().unwrap_or_default()
    }
}

/// Principal resolution from headers set by an authenticating reverse proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    #[serde(default = "default_user_header")]
    pub user_header: String,
    #[serde(default = "default_read_only_header")]
    pub read_only_header: String,
}

impl Default for ProxyAuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            read_only_header: default_read_only_header(),
        }
    }
}

fn default_user_header() -> String {
    "X-Remote-User".to_string()
}

fn default_read_only_header() -> String {
    "X-Remote-Read-Only".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the origin derived from the bind port.
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// ## Summary
    /// Returns the externally visible base URL, without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.trim_end_matches('/').to_string()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardDavConfig {
    /// `displayname` of the contacts collection.
    pub display_name: String,
    /// Largest vCard body accepted by `PUT`, in bytes.
    pub max_resource_size: usize,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "info")?
            .set_default("auth.method", "single_user")?
            .set_default("auth.single_user.name", "admin")?
            .set_default("auth.single_user.read_only", false)?
            .set_default("carddav.display_name", "Contacts")?
            .set_default("carddav.max_resource_size", 102_400)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    if settings.auth.method == AuthMethod::SingleUser {
        settings.auth.single_user()?;
    }
    tracing::debug!(method = ?settings.auth.method, "Auth method selected");

    Ok(settings)
}
