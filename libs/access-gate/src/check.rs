use crate::{
    config::GateConfig,
    context::{ContentItem, RequestContext, UserContext},
    errors::GateError,
    gate::AccessGate,
    redirect,
};

/// Arguments handed to the security check by the host pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineArgs {
    pub request: Option<RequestContext>,
    pub user: Option<UserContext>,
    pub item: Option<ContentItem>,
}

impl PipelineArgs {
    #[must_use]
    pub fn new(request: RequestContext, user: UserContext) -> Self {
        Self {
            request: Some(request),
            user: Some(user),
            item: None,
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.item = Some(item);
        self
    }
}

/// What the host must do after the security check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Access granted; continue rendering
    Continue,
    /// Redirect to the login page
    Redirect { location: String, permanent: bool },
    /// Redirect to the error page; no login page could be resolved
    ErrorPage { location: String, message: String },
}

impl CheckOutcome {
    /// Whether the remaining pipeline steps must be skipped
    #[must_use]
    pub fn aborts_pipeline(&self) -> bool {
        !matches!(self, CheckOutcome::Continue)
    }

    /// Redirect location, if the outcome redirects
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            CheckOutcome::Continue => None,
            CheckOutcome::Redirect { location, .. } | CheckOutcome::ErrorPage { location, .. } => {
                Some(location)
            }
        }
    }
}

/// Pipeline step that checks access to the requested page
#[derive(Debug, Clone)]
pub struct SecurityCheck {
    gate: AccessGate,
    error_page: String,
}

impl SecurityCheck {
    #[must_use]
    pub fn new(gate: AccessGate, error_page: impl Into<String>) -> Self {
        Self {
            gate,
            error_page: error_page.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(AccessGate::from_config(config), config.error_page.clone())
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Check security access to the page.
    ///
    /// # Errors
    /// Returns `GateError::MissingArgument` if the host did not supply the request
    /// or the user.
    pub fn process(&self, args: &PipelineArgs) -> Result<CheckOutcome, GateError> {
        let request = args
            .request
            .as_ref()
            .ok_or(GateError::MissingArgument("request"))?;
        let user = args
            .user
            .as_ref()
            .ok_or(GateError::MissingArgument("user"))?;

        let span = tracing::info_span!(
            "security_check",
            raw_url = %request.raw_url,
            site = request.site_name().unwrap_or_default()
        );
        let _guard = span.enter();

        Ok(self.check(request, user, args.item.as_ref()))
    }

    /// Same as [`SecurityCheck::process`] with arguments the caller already holds
    #[must_use]
    pub fn check(
        &self,
        request: &RequestContext,
        user: &UserContext,
        item: Option<&ContentItem>,
    ) -> CheckOutcome {
        let decision = self.gate.evaluate(request, user, item);
        if decision.granted {
            return CheckOutcome::Continue;
        }

        if let Some(location) = decision.redirect_target {
            tracing::info!(%location, reason = %decision.reason, "Redirecting to login page");
            CheckOutcome::Redirect {
                location,
                permanent: false,
            }
        } else {
            tracing::info!(
                reason = %decision.reason,
                "Redirecting to error page as no login page was found"
            );
            let message = redirect::missing_login_page_message(request.site_name());
            CheckOutcome::ErrorPage {
                location: redirect::error_page_redirect(&self.error_page, &message),
                message,
            }
        }
    }
}
