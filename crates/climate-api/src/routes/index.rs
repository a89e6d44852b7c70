//! Route listing

use axum::response::Html;

const AVAILABLE_ROUTES: &str = "Available API Routes<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/{start}<br/>\
/api/v1.0/{start}/{end}";

/// List the available API routes
pub async fn welcome() -> Html<&'static str> {
    Html(AVAILABLE_ROUTES)
}
