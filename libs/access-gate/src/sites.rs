use crate::context::{DisplayMode, SiteContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the administrative site used when no other name is configured
pub const DEFAULT_SHELL_SITE: &str = "shell";

/// Static definition of a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDefinition {
    /// Site name; filled from the map key when loaded from configuration
    #[serde(default)]
    pub name: String,

    /// Login page path (empty if the site has none)
    #[serde(default)]
    pub login_page: String,

    /// Anonymous users must log in before viewing any page
    #[serde(default)]
    pub require_login: bool,
}

impl SiteDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_login_page(mut self, login_page: impl Into<String>) -> Self {
        self.login_page = login_page.into();
        self
    }

    #[must_use]
    pub fn with_require_login(mut self, require_login: bool) -> Self {
        self.require_login = require_login;
        self
    }

    /// Per-request view of this site in the given display mode
    #[must_use]
    pub fn context(&self, display_mode: DisplayMode) -> SiteContext {
        SiteContext {
            name: self.name.clone(),
            login_page: self.login_page.clone(),
            require_login: self.require_login,
            display_mode,
        }
    }
}

/// Registry of known sites, including the designated shell site.
///
/// Site names are matched ignoring case.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: HashMap<String, SiteDefinition>,
    shell_site: String,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self {
            sites: HashMap::new(),
            shell_site: DEFAULT_SHELL_SITE.to_owned(),
        }
    }
}

impl SiteRegistry {
    /// Use a different site as the shell site
    #[must_use]
    pub fn with_shell_site(mut self, name: impl Into<String>) -> Self {
        self.shell_site = name.into().to_lowercase();
        self
    }

    /// Register a site under its own name, replacing any previous definition
    pub fn register(&mut self, site: SiteDefinition) {
        self.sites.insert(site.name.to_lowercase(), site);
    }

    #[must_use]
    pub fn with_site(mut self, site: SiteDefinition) -> Self {
        self.register(site);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SiteDefinition> {
        self.sites.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sites.contains_key(&name.to_lowercase())
    }

    #[must_use]
    pub fn shell_site_name(&self) -> &str {
        &self.shell_site
    }

    /// The shell site, if it is registered
    #[must_use]
    pub fn shell(&self) -> Option<&SiteDefinition> {
        self.sites.get(&self.shell_site)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
