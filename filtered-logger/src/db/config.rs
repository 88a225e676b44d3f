//! Connection settings read from the environment.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sqlx::mysql::MySqlConnectOptions;

use crate::error::{Error, Result};

pub const HOST_VAR: &str = "PERSONAL_DATA_DB_HOST";
pub const USERNAME_VAR: &str = "PERSONAL_DATA_DB_USERNAME";
pub const PASSWORD_VAR: &str = "PERSONAL_DATA_DB_PASSWORD";
pub const NAME_VAR: &str = "PERSONAL_DATA_DB_NAME";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USERNAME: &str = "root";

/// MySQL connection settings.
///
/// `database` has no default. The password is kept as a [`SecretString`] and
/// never appears in `Debug` output.
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: SecretString,
    pub database: String,
}

impl DbConfig {
    /// Builds a config, rejecting an empty database name.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self> {
        let database = database.into();
        if database.is_empty() {
            return Err(Error::MissingConfig(NAME_VAR));
        }
        Ok(Self {
            host: host.into(),
            user: user.into(),
            password: SecretString::from(password.into()),
            database,
        })
    }

    /// Reads the `PERSONAL_DATA_DB_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, applying defaults for host, user and
    /// password.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = lookup(NAME_VAR).ok_or(Error::MissingConfig(NAME_VAR))?;
        Self::new(
            lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            lookup(USERNAME_VAR).unwrap_or_else(|| DEFAULT_USERNAME.to_owned()),
            lookup(PASSWORD_VAR).unwrap_or_default(),
            database,
        )
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.database)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}
