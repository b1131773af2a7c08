use crate::{
    context::{ContentItem, RequestContext, UserContext},
    decision::{AccessReason, Verdict},
    sites::SiteRegistry,
};

/// Type alias for a reference-counted access policy
pub type PolicyRef = std::sync::Arc<dyn AccessPolicy>;

/// Access policy applied by [`AccessGate`](crate::AccessGate).
///
/// Every method has a default implementation. A host that needs a different rule
/// for one step overrides that method only; the other defaults keep calling
/// through `self`, so an overridden `login_page` is also what
/// `is_login_page_request` and the redirect target use.
pub trait AccessPolicy: Send + Sync {
    /// Login page for the request, or `None` when none can be resolved.
    ///
    /// No site resolves nothing. In normal display mode the site's own login page
    /// is used; any other display mode falls back to the shell site.
    fn login_page(&self, request: &RequestContext, sites: &SiteRegistry) -> Option<String> {
        let site = request.site()?;
        let login_page = if site.display_mode.is_normal() {
            site.login_page.as_str()
        } else {
            sites.shell()?.login_page.as_str()
        };
        (!login_page.is_empty()).then(|| login_page.to_owned())
    }

    /// Whether the request addresses the login page itself
    fn is_login_page_request(&self, request: &RequestContext, sites: &SiteRegistry) -> bool {
        self.login_page(request, sites)
            .is_some_and(|login_page| starts_with_ignore_ascii_case(&request.raw_url, &login_page))
    }

    /// Run the access gates in order, stopping at the first one that denies
    fn check_access(
        &self,
        request: &RequestContext,
        user: &UserContext,
        item: Option<&ContentItem>,
        sites: &SiteRegistry,
    ) -> Verdict {
        tracing::info!(user = %user.username, "Checking security for current user");

        if let Some(site) = request.site()
            && site.require_login
            && !user.is_authenticated
            && !self.is_login_page_request(request, sites)
        {
            tracing::warn!(site = %site.name, "Site requires login and no user is logged in");
            return Verdict::deny(AccessReason::LoginRequired);
        }

        if let Some(site) = request.site()
            && !site.display_mode.is_normal()
            && !user.is_authenticated
            && !user.has_shell_session
            && !self.is_login_page_request(request, sites)
        {
            tracing::warn!(
                site = %site.name,
                display_mode = %site.display_mode,
                "Non-normal display mode and no user is logged in"
            );
            return Verdict::deny(AccessReason::DisplayModeWithoutSession);
        }

        let Some(item) = item else {
            tracing::info!("Access is granted as there is no current item");
            return Verdict::grant(AccessReason::NoCurrentItem);
        };

        if item.read_access {
            tracing::info!(
                user = %user.username,
                item = %item.path,
                "Access granted as the current user has read access to current item"
            );
            Verdict::grant(AccessReason::ReadAccessGranted)
        } else {
            tracing::warn!(
                user = %user.username,
                item = %item.path,
                "Current user does not have read access to the current item"
            );
            Verdict::deny(AccessReason::NoReadAccess)
        }
    }
}

/// Policy with the stock behavior of every step
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAccessPolicy;

impl AccessPolicy for DefaultAccessPolicy {}

/// Prefix test that folds ASCII letters only, independent of any locale
#[must_use]
pub fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}
