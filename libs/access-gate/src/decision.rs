use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the gate granted or denied access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// The site requires login and no user is logged in
    LoginRequired,
    /// Authoring display mode without a logged in user or editor session
    DisplayModeWithoutSession,
    /// The user cannot read the resolved item
    NoReadAccess,
    /// Nothing to protect
    NoCurrentItem,
    ReadAccessGranted,
}

impl AccessReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccessReason::LoginRequired => "login required",
            AccessReason::DisplayModeWithoutSession => "non-normal display mode without session",
            AccessReason::NoReadAccess => "no read access to item",
            AccessReason::NoCurrentItem => "no current item",
            AccessReason::ReadAccessGranted => "read access granted",
        }
    }
}

impl fmt::Display for AccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access policy, before redirect resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub granted: bool,
    pub reason: AccessReason,
}

impl Verdict {
    #[must_use]
    pub fn grant(reason: AccessReason) -> Self {
        Self {
            granted: true,
            reason,
        }
    }

    #[must_use]
    pub fn deny(reason: AccessReason) -> Self {
        Self {
            granted: false,
            reason,
        }
    }
}

/// Result of [`AccessGate::evaluate`](crate::AccessGate::evaluate).
///
/// `redirect_target` is only set on denial, and only when a login page could be
/// resolved for the request. A denial without a target is routed to the error page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub granted: bool,
    pub redirect_target: Option<String>,
    pub reason: AccessReason,
}

impl Decision {
    #[must_use]
    pub fn granted(reason: AccessReason) -> Self {
        Self {
            granted: true,
            redirect_target: None,
            reason,
        }
    }

    #[must_use]
    pub fn denied(reason: AccessReason, redirect_target: Option<String>) -> Self {
        Self {
            granted: false,
            redirect_target,
            reason,
        }
    }
}
