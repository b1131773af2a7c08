#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Page access gate for rendering pipelines.
//!
//! [`AccessGate`] decides whether the current user may view the content item a
//! page request resolved to. [`SecurityCheck`] wraps the gate and turns a denial
//! into a redirect to the login page or to the generic error page.
//!
//! ```
//! use access_gate::{
//!     AccessGate, DisplayMode, RequestContext, SiteDefinition, SiteRegistry, UserContext,
//! };
//!
//! let site = SiteDefinition::new("website")
//!     .with_login_page("/login")
//!     .with_require_login(true);
//! let request = RequestContext::new("/home").with_site(site.context(DisplayMode::Normal));
//!
//! let gate = AccessGate::builder().sites(SiteRegistry::default()).build();
//! let decision = gate.evaluate(&request, &UserContext::anonymous(), None);
//!
//! assert!(!decision.granted);
//! assert_eq!(decision.redirect_target.as_deref(), Some("/login"));
//! ```

pub mod check;
pub mod config;
pub mod context;
pub mod decision;
pub mod errors;
pub mod gate;
pub mod policy;
pub mod redirect;
pub mod sites;

#[cfg(feature = "axum-ext")]
pub mod axum_ext;

pub use check::{CheckOutcome, PipelineArgs, SecurityCheck};
pub use config::{ConfigError, GateConfig};
pub use context::{ContentItem, DisplayMode, RequestContext, SiteContext, UserContext};
pub use decision::{AccessReason, Decision, Verdict};
pub use errors::GateError;
pub use gate::{AccessGate, AccessGateBuilder};
pub use policy::{AccessPolicy, DefaultAccessPolicy, PolicyRef};
pub use sites::{SiteDefinition, SiteRegistry};
