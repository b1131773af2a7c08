use crate::sites::{DEFAULT_SHELL_SITE, SiteDefinition, SiteRegistry};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Prefix of environment variables overriding the configuration,
/// e.g. `ACCESS_GATE__PERSIST_RAW_URL=true`
pub const ENV_PREFIX: &str = "ACCESS_GATE__";

/// Errors that can occur while loading the gate configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Access gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Carry the original request URL to the login page as `returnurl`
    #[serde(default)]
    pub persist_raw_url: bool,

    /// Name of the site whose login page is used outside normal display mode
    #[serde(default = "default_shell_site")]
    pub shell_site: String,

    /// Page shown when login is required but no login page is configured
    #[serde(default = "default_error_page")]
    pub error_page: String,

    /// Known sites, keyed by name
    #[serde(default)]
    pub sites: HashMap<String, SiteDefinition>,
}

fn default_shell_site() -> String {
    DEFAULT_SHELL_SITE.to_owned()
}

fn default_error_page() -> String {
    "/error".to_owned()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            persist_raw_url: false,
            shell_site: default_shell_site(),
            error_page: default_error_page(),
            sites: HashMap::new(),
        }
    }
}

impl GateConfig {
    /// Extract and validate the configuration from a prepared figment
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if extraction fails and `ConfigError::Invalid`
    /// if the extracted values are inconsistent.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config = figment
            .extract::<GateConfig>()
            .map_err(Box::new)?
            .normalize_site_names()?;
        config.validate()?;
        tracing::debug!(
            sites = config.sites.len(),
            shell_site = %config.shell_site,
            persist_raw_url = config.persist_raw_url,
            "Access gate configuration loaded"
        );
        Ok(config)
    }

    /// Load defaults, then the optional YAML file, then `ACCESS_GATE__*` variables
    ///
    /// # Errors
    /// See [`GateConfig::from_figment`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Env keys arrive lowercased; file site names are folded the same way
        // first so an override lands on the site it names.
        let base = match path {
            Some(path) => Figment::from(Yaml::file(path))
                .extract::<GateConfig>()
                .map_err(Box::new)?
                .normalize_site_names()?,
            None => GateConfig::default(),
        };
        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Lowercase site names and `shell_site`
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if two sites differ only in case.
    pub fn normalize_site_names(mut self) -> Result<Self, ConfigError> {
        let mut sites = HashMap::with_capacity(self.sites.len());
        for (name, site) in self.sites {
            let key = name.to_lowercase();
            if sites.insert(key, site).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "site names must be unique ignoring case: {name}"
                )));
            }
        }
        self.sites = sites;
        self.shell_site = self.shell_site.to_lowercase();
        Ok(self)
    }

    /// Validate the configuration for consistency
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` for an empty shell site name or error page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shell_site.trim().is_empty() {
            return Err(ConfigError::Invalid("shell_site must not be empty".to_owned()));
        }
        if self.error_page.trim().is_empty() {
            return Err(ConfigError::Invalid("error_page must not be empty".to_owned()));
        }
        Ok(())
    }

    /// Site registry built from `sites`; map keys become site names
    #[must_use]
    pub fn site_registry(&self) -> SiteRegistry {
        self.sites
            .iter()
            .map(|(name, site)| SiteDefinition {
                name: name.clone(),
                ..site.clone()
            })
            .fold(
                SiteRegistry::default().with_shell_site(self.shell_site.clone()),
                SiteRegistry::with_site,
            )
    }
}
