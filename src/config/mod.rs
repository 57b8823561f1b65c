//! Connection Profiles
//!
//! This module handles loading and saving connection profiles: the
//! construction-time configuration concrete drivers consume. Profiles are
//! stored as a named registry in a JSON file under the platform config
//! directory (`~/.config/stratum/connections.json` on Linux).
//!
//! # Passwords
//! A profile may hold a password directly or reference an environment
//! variable via `password_env`, resolved when the profile is looked up.
//! Passwords never appear in `Debug` output and must never reach logs or
//! error messages.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StratumError};

/// How to reach a backend.
///
/// `backend` is a free-form scheme interpreted by the driver (e.g.
/// "postgres"); the remaining fields are whichever of the usual connection
/// parameters that backend needs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Backend scheme, interpreted by the driver
    pub backend: String,

    /// Hostname (for server backends)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port number (for server backends)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Password. Sensitive: excluded from Debug output, never logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable to read the password from instead of storing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Database name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Database file path (for file backends)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl ConnectionProfile {
    /// Create a profile for a server backend.
    #[must_use]
    pub fn server(
        backend: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            host: Some(host.into()),
            port: Some(port),
            user: Some(user.into()),
            password: None,
            password_env: None,
            database: Some(database.into()),
            file: None,
        }
    }

    /// Create a profile for a file backend.
    #[must_use]
    pub fn file(backend: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            backend: backend.into(),
            host: None,
            port: None,
            user: None,
            password: None,
            password_env: None,
            database: None,
            file: Some(path.into()),
        }
    }

    /// Store a password directly in the profile.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Reference the password through an environment variable.
    #[must_use]
    pub fn with_password_env(mut self, var: impl Into<String>) -> Self {
        self.password_env = Some(var.into());
        self
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_env", &self.password_env)
            .field("database", &self.database)
            .field("file", &self.file)
            .finish()
    }
}

/// Named connection profiles plus an optional default pointer.
///
/// On-disk format:
/// ```json
/// {
///   "profiles": {
///     "local": { "backend": "postgres", "host": "localhost", ... }
///   },
///   "default": "local"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRegistry {
    /// Profiles by name
    pub profiles: HashMap<String, ConnectionProfile>,

    /// Name of the default profile (must exist in the map)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ProfileRegistry {
    /// Load a registry from a file.
    ///
    /// A missing file yields an empty registry; an unreadable or malformed
    /// file is a `Config` error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| StratumError::config(format!("could not read profile registry: {e}")))?;

        let registry: Self = serde_json::from_str(&contents)
            .map_err(|e| StratumError::config(format!("invalid profile registry format: {e}")))?;

        debug!(path = %path.display(), profiles = registry.profiles.len(), "loaded profile registry");
        Ok(registry)
    }

    /// Save the registry to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StratumError::config(format!("could not create config directory: {e}"))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| StratumError::config(format!("could not serialize registry: {e}")))?;

        fs::write(path, contents)
            .map_err(|e| StratumError::config(format!("could not write profile registry: {e}")))?;

        debug!(path = %path.display(), profiles = self.profiles.len(), "saved profile registry");
        Ok(())
    }

    /// Look up a profile by name, or the default profile when no name is
    /// given, resolving any `password_env` reference.
    ///
    /// Unknown names, a missing default, and a missing password variable are
    /// `Config` errors.
    pub fn resolve(&self, name: Option<&str>) -> Result<ConnectionProfile> {
        let name = match name {
            Some(name) => name,
            None => self.default.as_deref().ok_or_else(|| {
                StratumError::config("no profile name given and no default profile is set")
            })?,
        };

        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| StratumError::config(format!("no connection profile named '{name}'")))?;

        let mut resolved = profile.clone();
        if let Some(var) = resolved.password_env.as_deref() {
            match std::env::var(var) {
                Ok(password) => resolved.password = Some(password),
                Err(_) => {
                    return Err(StratumError::config(format!(
                        "environment variable {var} not found for password"
                    )));
                }
            }
        }

        debug!(profile = name, "resolved connection profile");
        Ok(resolved)
    }

    /// Insert or replace a named profile.
    pub fn insert(&mut self, name: impl Into<String>, profile: ConnectionProfile) {
        self.profiles.insert(name.into(), profile);
    }

    /// Remove a named profile, returning it if present.
    ///
    /// Clears the default pointer when it referenced the removed profile.
    pub fn remove(&mut self, name: &str) -> Option<ConnectionProfile> {
        let removed = self.profiles.remove(name);
        if removed.is_some() && self.default.as_deref() == Some(name) {
            self.default = None;
        }
        removed
    }

    /// Mark an existing profile as the default.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            return Err(StratumError::config(format!("no connection profile named '{name}'")));
        }
        self.default = Some(name.to_string());
        Ok(())
    }

    /// Profile names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Path of the per-user profile registry
/// (`<config_dir>/stratum/connections.json`).
pub fn registry_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| StratumError::config("could not determine user config directory"))?;

    Ok(config_dir.join("stratum").join("connections.json"))
}
