//! Configuration management for the listening history loader.
//!
//! This module loads configuration values from environment variables and
//! `.env` files into an explicit [`Config`] value. The value is built once by
//! the binary and passed by reference into every pipeline stage; nothing
//! below this module reads the environment on its own.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr};

use chrono_tz::Tz;
use sqlx::postgres::PgConnectOptions;

use crate::{Res, error::EtlError};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TIMEZONE: &str = "US/Central";
pub const DEFAULT_TABLE: &str = "most_recently_played_songs";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory
/// under `playlog/.env` first and then in the current working directory.
/// Variables that are already set in the process environment are never
/// overwritten, so a scheduler can inject secrets directly.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlog/.env`
/// - macOS: `~/Library/Application Support/playlog/.env`
/// - Windows: `%LOCALAPPDATA%/playlog/.env`
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be parsed. Missing
/// files are not an error.
pub fn load_env() -> Result<(), String> {
    let path = env_path();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the user-level `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlog/.env");
    path
}

/// Spotify application credentials (`CLIENT_ID` / `CLIENT_SECRET`).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Base URLs of the Spotify services.
///
/// Defaults point at the public Spotify endpoints. Overriding them is mostly
/// useful for tests running against a local mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

/// Connection parameters of the destination database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub table: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Everything a pipeline run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub refresh_token: String,
    pub timezone: Tz,
    pub database: DatabaseConfig,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key-value source.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timezone_name = get("LOCAL_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = Tz::from_str(&timezone_name).map_err(|e| EtlError::InvalidConfig {
            key: "LOCAL_TIMEZONE".to_string(),
            message: e.to_string(),
        })?;

        Ok(Config {
            credentials: credentials_from(&get)?,
            endpoints: endpoints_from(&get),
            refresh_token: require(&get, "REFRESH_TOKEN")?,
            timezone,
            database: database_from(&get)?,
        })
    }
}

/// Configuration of the one-time authorization setup flow.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub redirect_uri: String,
}

impl AuthConfig {
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Ok(AuthConfig {
            credentials: credentials_from(&get)?,
            endpoints: endpoints_from(&get),
            redirect_uri: require(&get, "SPOTIFY_API_REDIRECT_URI")?,
        })
    }
}

fn require<F>(get: &F, key: &str) -> Res<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).ok_or_else(|| EtlError::MissingConfig(key.to_string()))
}

fn credentials_from<F>(get: &F) -> Res<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(Credentials {
        client_id: require(get, "CLIENT_ID")?,
        client_secret: require(get, "CLIENT_SECRET")?,
    })
}

fn endpoints_from<F>(get: &F) -> Endpoints
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Endpoints::default();
    let trim = |url: String| url.trim_end_matches('/').to_string();
    Endpoints {
        api_url: get("SPOTIFY_API_URL").map(trim).unwrap_or(defaults.api_url),
        token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.token_url),
        auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or(defaults.auth_url),
    }
}

fn database_from<F>(get: &F) -> Res<DatabaseConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let port_value = require(get, "PORT")?;
    let port = port_value
        .trim()
        .parse::<u16>()
        .map_err(|e| EtlError::InvalidConfig {
            key: "PORT".to_string(),
            message: format!("{:?}: {}", port_value, e),
        })?;

    let table = get("DB_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
    if !is_valid_table_name(&table) {
        return Err(EtlError::InvalidConfig {
            key: "DB_TABLE".to_string(),
            message: format!("{:?} is not a plain [schema.]table identifier", table),
        });
    }

    Ok(DatabaseConfig {
        username: require(get, "USERNAME")?,
        password: require(get, "PASSWORD")?,
        host: require(get, "HOST")?,
        port,
        database: require(get, "DATABASE")?,
        table,
    })
}

/// Accepts `table` or `schema.table` made of ASCII letters, digits and
/// underscores, not starting with a digit. The name is interpolated into SQL.
pub fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}
