use crate::{
    config::GateConfig,
    context::{ContentItem, RequestContext, UserContext},
    decision::Decision,
    policy::{DefaultAccessPolicy, PolicyRef},
    redirect,
    sites::SiteRegistry,
};
use std::sync::Arc;

/// Decides whether the current user may view the requested page.
///
/// The gate is immutable once built and holds no per-request state, so a single
/// instance can be shared across request handlers.
#[derive(Clone)]
pub struct AccessGate {
    policy: PolicyRef,
    sites: Arc<SiteRegistry>,
    persist_raw_url: bool,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("sites", &self.sites)
            .field("persist_raw_url", &self.persist_raw_url)
            .finish_non_exhaustive()
    }
}

impl AccessGate {
    #[must_use]
    pub fn builder() -> AccessGateBuilder {
        AccessGateBuilder::default()
    }

    /// Gate with the default policy, configured from `config`
    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        Self::builder()
            .sites(config.site_registry())
            .persist_raw_url(config.persist_raw_url)
            .build()
    }

    #[must_use]
    pub fn sites(&self) -> &SiteRegistry {
        &self.sites
    }

    #[must_use]
    pub fn persist_raw_url(&self) -> bool {
        self.persist_raw_url
    }

    /// Login page for the request, as resolved by the policy
    #[must_use]
    pub fn resolve_login_page(&self, request: &RequestContext) -> Option<String> {
        self.policy.login_page(request, &self.sites)
    }

    #[must_use]
    pub fn is_login_page_request(&self, request: &RequestContext) -> bool {
        self.policy.is_login_page_request(request, &self.sites)
    }

    /// Evaluate access for one request.
    ///
    /// A denial carries the login redirect target when a login page resolves for
    /// the request, and no target otherwise.
    #[must_use]
    pub fn evaluate(
        &self,
        request: &RequestContext,
        user: &UserContext,
        item: Option<&ContentItem>,
    ) -> Decision {
        let verdict = self.policy.check_access(request, user, item, &self.sites);
        if verdict.granted {
            return Decision::granted(verdict.reason);
        }

        let target = self.resolve_login_page(request).map(|login_page| {
            redirect::login_redirect(&login_page, &request.raw_url, self.persist_raw_url)
        });
        Decision::denied(verdict.reason, target)
    }
}

#[derive(Default)]
pub struct AccessGateBuilder {
    policy: Option<PolicyRef>,
    sites: Option<SiteRegistry>,
    persist_raw_url: bool,
}

impl AccessGateBuilder {
    /// Replace the default policy
    #[must_use]
    pub fn policy(mut self, policy: PolicyRef) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn sites(mut self, sites: SiteRegistry) -> Self {
        self.sites = Some(sites);
        self
    }

    /// Carry the original request URL to the login page as `returnurl`
    #[must_use]
    pub fn persist_raw_url(mut self, persist_raw_url: bool) -> Self {
        self.persist_raw_url = persist_raw_url;
        self
    }

    #[must_use]
    pub fn build(self) -> AccessGate {
        AccessGate {
            policy: self
                .policy
                .unwrap_or_else(|| Arc::new(DefaultAccessPolicy) as PolicyRef),
            sites: Arc::new(self.sites.unwrap_or_default()),
            persist_raw_url: self.persist_raw_url,
        }
    }
}
