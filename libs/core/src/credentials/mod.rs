//! Connection profiles and the stores they are looked up from.
//!
//! A profile is owned by whoever operates the pipeline; this crate only reads
//! it. Three stores ship with the crate: an in-memory map for embedding and
//! tests, environment variables holding connection URIs, and a YAML file.

mod env;
mod file;

pub use env::{EnvCredentialStore, ENV_PREFIX, parse_connection_uri};
pub use file::FileCredentialStore;

use crate::error::NotifyResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named connection record holding the webhook host and robot key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl ConnectionProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

// The password is the robot key; keep it out of logs.
impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("host", &self.host)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("schema", &self.schema)
            .field("port", &self.port)
            .finish()
    }
}

/// Read-only lookup of connection profiles by name.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns `Ok(None)` when no profile is registered under `name`.
    async fn lookup(&self, name: &str) -> NotifyResult<Option<ConnectionProfile>>;
}

pub type SharedCredentialStore = Arc<dyn CredentialStore>;

#[derive(Clone, Debug, Default)]
pub struct InMemoryCredentialStore {
    profiles: HashMap<String, ConnectionProfile>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, name: impl Into<String>, profile: ConnectionProfile) -> Self {
        self.profiles.insert(name.into(), profile);
        self
    }
}

impl FromIterator<(String, ConnectionProfile)> for InMemoryCredentialStore {
    fn from_iter<T: IntoIterator<Item = (String, ConnectionProfile)>>(iter: T) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, name: &str) -> NotifyResult<Option<ConnectionProfile>> {
        Ok(self.profiles.get(name).cloned())
    }
}
