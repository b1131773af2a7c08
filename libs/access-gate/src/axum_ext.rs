//! Axum middleware running the security check
//!
//! Host layers in front of this middleware insert [`RequestContext`],
//! [`UserContext`] and, when an item was resolved, [`ContentItem`] into the
//! request extensions.

use crate::{
    check::{CheckOutcome, PipelineArgs, SecurityCheck},
    context::{ContentItem, RequestContext, UserContext},
    errors::GateError,
};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Response for an outcome that stops the pipeline.
///
/// `Continue` has no response of its own: [`security_check`] runs the inner
/// service for it, and a direct conversion yields an empty `204 No Content`.
impl IntoResponse for CheckOutcome {
    fn into_response(self) -> Response {
        let (status, location) = match self {
            CheckOutcome::Continue => return StatusCode::NO_CONTENT.into_response(),
            CheckOutcome::Redirect {
                location,
                permanent,
            } => {
                let status = if permanent {
                    StatusCode::MOVED_PERMANENTLY
                } else {
                    StatusCode::FOUND
                };
                (status, location)
            }
            CheckOutcome::ErrorPage { location, .. } => (StatusCode::FOUND, location),
        };

        match HeaderValue::try_from(location) {
            Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Redirect location is not a valid header value");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Middleware that redirects requests the gate denies
pub async fn security_check(
    State(check): State<Arc<SecurityCheck>>,
    request: Request,
    next: Next,
) -> Response {
    let extensions = request.extensions();
    let outcome = check.process(&PipelineArgs {
        request: extensions.get::<RequestContext>().cloned(),
        user: extensions.get::<UserContext>().cloned(),
        item: extensions.get::<ContentItem>().cloned(),
    });

    match outcome {
        Ok(CheckOutcome::Continue) => next.run(request).await,
        Ok(outcome) => outcome.into_response(),
        Err(err @ GateError::MissingArgument(_)) => {
            tracing::error!(error = %err, "Security check middleware is missing request context");
            err.into_response()
        }
    }
}
