//! Where to send the user after they log in.
//!
//! Only local paths are accepted as redirect targets so that the log-in page
//! cannot be abused as an open redirect.

use axum::{
    extract::Request,
    http::{HeaderMap, Uri},
};
use axum_htmx::{HX_CURRENT_URL, HX_REQUEST};

use crate::endpoints;

/// Reduce `raw_url` to a local path and query, or `None` if it points
/// elsewhere or back to the log-in page.
///
/// Absolute URLs are only accepted when `allow_absolute` is set, which is the
/// case for the htmx current URL header since browsers always send it in full.
fn local_path_and_query(raw_url: &str, allow_absolute: bool) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;

    if !allow_absolute && (uri.scheme().is_some() || uri.authority().is_some()) {
        return None;
    }

    let path_and_query = uri.path_and_query()?;
    let path = path_and_query.path();

    let is_local = path.starts_with('/') && !path.starts_with("//");
    let is_auth_page = path == endpoints::LOG_IN_VIEW || path == endpoints::REGISTER_VIEW;

    (is_local && !is_auth_page).then(|| path_and_query.as_str().to_owned())
}

/// Validate a redirect URL that came from a query string or form field.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    local_path_and_query(raw_url, false)
}

/// The page the user was trying to reach.
///
/// For `/api` requests made by htmx this is the page the request came from,
/// not the API endpoint itself.
fn redirect_target(request: &Request) -> Option<String> {
    if !request.uri().path().starts_with("/api") {
        return normalize_redirect_url(request.uri().path_and_query()?.as_str());
    }

    let headers = request.headers();

    if !is_htmx_request(headers) {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get(HX_CURRENT_URL)
        .and_then(|header| header.to_str().ok())
    else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    let target = local_path_and_query(current_url, true);
    if target.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    target
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"))
}

/// The log-in page URL with a `redirect_url` query parameter.
pub fn log_in_url_with_redirect(redirect_target: &str) -> String {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(query) => format!("{}?{}", endpoints::LOG_IN_VIEW, query),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {redirect_target}: {error}");
            endpoints::LOG_IN_VIEW.to_owned()
        }
    }
}

/// The log-in page URL that will send the user back to where `request` was
/// heading, falling back to the dashboard.
pub fn build_log_in_redirect_url(request: &Request) -> String {
    let target = redirect_target(request).unwrap_or_else(|| {
        tracing::warn!("No usable redirect URL in request. Falling back to dashboard.");
        endpoints::DASHBOARD_VIEW.to_owned()
    });

    log_in_url_with_redirect(&target)
}
