use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering state of the current site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// End-user rendering
    #[default]
    Normal,
    Preview,
    Edit,
    Snapshot,
}

impl DisplayMode {
    #[must_use]
    pub fn is_normal(self) -> bool {
        self == DisplayMode::Normal
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Preview => "preview",
            DisplayMode::Edit => "edit",
            DisplayMode::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The site a request is being rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContext {
    pub name: String,
    /// Login page path; empty when the site has none
    #[serde(default)]
    pub login_page: String,
    #[serde(default)]
    pub require_login: bool,
    #[serde(default)]
    pub display_mode: DisplayMode,
}

impl SiteContext {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            login_page: String::new(),
            require_login: false,
            display_mode: DisplayMode::Normal,
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

    #[must_use]
    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }
}

/// Read-only snapshot of the inbound page request.
///
/// `site` is `None` when the host resolved no site for the request. That is a
/// different state from a site that does not require login, and the gates treat
/// it as such.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub site: Option<SiteContext>,
    /// Raw request URL (path and query) as received
    pub raw_url: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(raw_url: impl Into<String>) -> Self {
        Self {
            site: None,
            raw_url: raw_url.into(),
        }
    }

    #[must_use]
    pub fn with_site(mut self, site: SiteContext) -> Self {
        self.site = Some(site);
        self
    }

    #[must_use]
    pub fn site(&self) -> Option<&SiteContext> {
        self.site.as_ref()
    }

    /// Name of the current site, if any
    #[must_use]
    pub fn site_name(&self) -> Option<&str> {
        self.site.as_ref().map(|s| s.name.as_str())
    }
}

/// The user the request is executed for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub is_authenticated: bool,
    pub username: String,
    /// An editor session exists in the shell site
    #[serde(default)]
    pub has_shell_session: bool,
}

impl UserContext {
    /// Anonymous user without an editor session
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            username: "anonymous".to_owned(),
            has_shell_session: false,
        }
    }

    #[must_use]
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            username: username.into(),
            has_shell_session: false,
        }
    }

    #[must_use]
    pub fn with_shell_session(mut self, has_shell_session: bool) -> Self {
        self.has_shell_session = has_shell_session;
        self
    }
}

/// Content item resolved for the request.
///
/// `read_access` is computed by the host's access-control layer for the current
/// user before the gate runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub path: String,
    pub read_access: bool,
}

impl ContentItem {
    #[must_use]
    pub fn new(path: impl Into<String>, read_access: bool) -> Self {
        Self {
            path: path.into(),
            read_access,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_default_is_normal() {
        assert_eq!(DisplayMode::default(), DisplayMode::Normal);
        assert!(DisplayMode::Normal.is_normal());
        assert!(!DisplayMode::Preview.is_normal());
        assert!(!DisplayMode::Edit.is_normal());
        assert!(!DisplayMode::Snapshot.is_normal());
    }

    #[test]
    fn test_display_mode_serialization() {
        let json = serde_json::to_string(&DisplayMode::Preview).unwrap();
        assert_eq!(json, "\"preview\"");

        let mode: DisplayMode = serde_json::from_str("\"edit\"").unwrap();
        assert_eq!(mode, DisplayMode::Edit);
        assert_eq!(mode.to_string(), "edit");
    }

    #[test]
    fn test_request_context_without_site() {
        let ctx = RequestContext::new("/home");
        assert!(ctx.site().is_none());
        assert_eq!(ctx.site_name(), None);
        assert_eq!(ctx.raw_url, "/home");
    }

    #[test]
    fn test_request_context_with_site() {
        let site = SiteContext::new("website")
            .with_login_page("/login")
            .with_require_login(true)
            .with_display_mode(DisplayMode::Edit);
        let ctx = RequestContext::new("/home").with_site(site);

        assert_eq!(ctx.site_name(), Some("website"));
        let site = ctx.site().unwrap();
        assert_eq!(site.login_page, "/login");
        assert!(site.require_login);
        assert_eq!(site.display_mode, DisplayMode::Edit);
    }

    #[test]
    fn test_user_context_constructors() {
        let anon = UserContext::anonymous();
        assert!(!anon.is_authenticated);
        assert!(!anon.has_shell_session);

        let editor = UserContext::authenticated("sitecore\\editor").with_shell_session(true);
        assert!(editor.is_authenticated);
        assert!(editor.has_shell_session);
        assert_eq!(editor.username, "sitecore\\editor");
    }

    #[test]
    fn test_request_context_deserialize_defaults() {
        let ctx: RequestContext = serde_json::from_str(
            r#"{"site": {"name": "website"}, "raw_url": "/about"}"#,
        )
        .unwrap();

        let site = ctx.site().unwrap();
        assert!(site.login_page.is_empty());
        assert!(!site.require_login);
        assert_eq!(site.display_mode, DisplayMode::Normal);
    }
}
