use super::{ConnectionProfile, CredentialStore};
use crate::error::{NotifyError, NotifyResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ConnectionsFile {
    #[serde(default)]
    connections: HashMap<String, ConnectionProfile>,
}

/// Connections loaded once from a YAML document:
///
/// ```yaml
/// connections:
///   wechat_default:
///     host: https://qyapi.weixin.qq.com
///     password: ROBOT_KEY
/// ```
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    profiles: HashMap<String, ConnectionProfile>,
}

impl FileCredentialStore {
    pub fn load(path: impl AsRef<Path>) -> NotifyResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            NotifyError::Store(format!("read connections file {}: {err}", path.display()))
        })?;
        Self::from_yaml_str(&raw).map_err(|err| match err {
            NotifyError::Store(reason) => {
                NotifyError::Store(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    pub fn from_yaml_str(raw: &str) -> NotifyResult<Self> {
        let file: ConnectionsFile = serde_yaml::from_str(raw)
            .map_err(|err| NotifyError::Store(format!("parse connections file: {err}")))?;
        tracing::debug!(
            connections = file.connections.len(),
            "loaded connection profiles"
        );
        Ok(Self {
            profiles: file.connections,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn lookup(&self, name: &str) -> NotifyResult<Option<ConnectionProfile>> {
        Ok(self.profiles.get(name).cloned())
    }
}
