use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// bcrypt rejects work factors outside this range.
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;
/// Tokens live between one minute and one year.
const TOKEN_EXPIRY_RANGE: RangeInclusive<i64> = 1..=60 * 24 * 365;

/// Settings used to sign and validate bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub issuer: String,
    pub audience: String,
    pub secret_key: String,
    pub expiry_minutes: i64,
}

/// Snapshot of everything the service reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the task database (`DATABASE_URL`).
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtSettings,
    /// Work factor passed to bcrypt when hashing new passwords.
    pub bcrypt_cost: u32,
}

/// A required key is missing or a value could not be parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt: JwtSettings {
                issuer: required("JWT_ISSUER")?,
                audience: required("JWT_AUDIENCE")?,
                secret_key: required("JWT_SECRET")?,
                expiry_minutes: parse_in_range(&lookup, "JWT_EXPIRY_MINUTES", 60, TOKEN_EXPIRY_RANGE)?,
            },
            bcrypt_cost: parse_in_range(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST, BCRYPT_COST_RANGE)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_in_range<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + fmt::Display,
{
    let value = parse_or(lookup, key, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}
