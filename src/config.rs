//! Environment sourced settings for the storage backend.
//!
//! All lookups go through a [`ConfigProvider`] so that the resolver never reads
//! the process environment directly.
use crate::error::ConfigError;
use crate::region::Region;
use std::collections::HashMap;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const ACCESS_KEY_ALIAS_VAR: &str = "AWS_ACCESS_KEY";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SECRET_KEY_ALIAS_VAR: &str = "AWS_SECRET_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub const REGION_VAR: &str = "AWS_DEFAULT_REGION";
pub const ENDPOINT_VAR: &str = "AWS_S3_HOST";

/// A mapping from option name to value
pub trait ConfigProvider: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads options from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {}

impl EnvConfig {
    pub fn new() -> Self {
        EnvConfig {}
    }

    /// Loads `.env` from the working directory first, if there is one
    pub fn with_dotenv() -> Self {
        dotenvy::from_filename(".env").ok();
        EnvConfig {}
    }
}

impl ConfigProvider for EnvConfig {
    fn get(&self, name: &str) -> Option<String> {
        dotenvy::var(name).ok()
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Static AWS credentials
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

// Keep secrets out of the logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self, ConfigError> {
        let access_key = lookup(config, &[ACCESS_KEY_VAR, ACCESS_KEY_ALIAS_VAR])
            .ok_or(ConfigError::MissingCredentials(ACCESS_KEY_VAR))
            .inspect_err(crate::logerr!())?;
        let secret_key = lookup(config, &[SECRET_KEY_VAR, SECRET_KEY_ALIAS_VAR])
            .ok_or(ConfigError::MissingCredentials(SECRET_KEY_VAR))
            .inspect_err(crate::logerr!())?;
        let session_token = lookup(config, &[SESSION_TOKEN_VAR]);

        Ok(Credentials {
            access_key,
            secret_key,
            session_token,
        })
    }
}

/// Everything needed to build a client for the real storage service
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub region: Region,
    pub credentials: Credentials,
    /// Custom endpoint for S3 compatible stores, `None` for AWS itself
    pub endpoint: Option<String>,
}

impl BackendSettings {
    /// Credentials are checked before the region, neither touches the network
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_config(config)?;

        let region = match lookup(config, &[REGION_VAR]) {
            Some(name) => name.parse::<Region>().inspect_err(crate::logerr!())?,
            None => Region::default(),
        };

        let endpoint = lookup(config, &[ENDPOINT_VAR]);

        Ok(BackendSettings {
            region,
            credentials,
            endpoint,
        })
    }
}

// Empty values count as unset
fn lookup(config: &impl ConfigProvider, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| config.get(name))
        .find(|value| !value.is_empty())
}
