//! Redirect targets for denied requests

/// Query parameter carrying the original request URL to the login page
pub const RETURN_URL_PARAM: &str = "returnurl";

/// Query parameter carrying the message to the error page
pub const ERROR_PARAM: &str = "error";

/// Site name used in the error message when the request has no site
const NO_SITE: &str = "<none>";

/// Append `name=value` to `url`, percent-encoding the value.
///
/// A `#fragment` on `url` stays last.
#[must_use]
pub fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let (base, fragment) = url.find('#').map_or((url, ""), |idx| url.split_at(idx));
    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };
    format!(
        "{base}{separator}{}={}{fragment}",
        urlencoding::encode(name),
        urlencoding::encode(value)
    )
}

/// Target for a redirect to the login page.
///
/// The raw request URL is carried as `returnurl` only when `persist_raw_url` is set.
#[must_use]
pub fn login_redirect(login_page: &str, raw_url: &str, persist_raw_url: bool) -> String {
    if persist_raw_url {
        append_query_param(login_page, RETURN_URL_PARAM, raw_url)
    } else {
        login_page.to_owned()
    }
}

/// Message shown when login is required but no login page resolves
#[must_use]
pub fn missing_login_page_message(site_name: Option<&str>) -> String {
    format!(
        "Login is required, but no valid login page has been specified for the site ({}).",
        site_name.unwrap_or(NO_SITE)
    )
}

/// Target for a redirect to the generic error page
#[must_use]
pub fn error_page_redirect(error_page: &str, message: &str) -> String {
    append_query_param(error_page, ERROR_PARAM, message)
}
