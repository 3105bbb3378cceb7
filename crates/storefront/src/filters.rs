//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Content hash of main.css, computed by the build script. Empty when the
/// stylesheet could not be hashed.
const CSS_HASH: &str = env!("CSS_HASH");

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the URL of the main stylesheet.
///
/// The hashed copy can be cached forever; the plain file is the fallback
/// when the build produced no hash.
///
/// Usage in templates: `{{ ""|stylesheet_path }}`
#[askama::filter_fn]
pub fn stylesheet_path(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(stylesheet_for(CSS_HASH))
}

fn stylesheet_for(hash: &str) -> String {
    if hash.is_empty() {
        "/static/css/main.css".to_string()
    } else {
        format!("/static/css/derived/main.{hash}.css")
    }
}
