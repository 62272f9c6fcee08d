//! Admin endpoints for the `/app/` hit counter.

use axum::extract::State;
use axum::response::Html;

use crate::AppState;

/// `GET /admin/metrics` — HTML page with the current hit count.
pub async fn metrics_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
        state.hits.get()
    ))
}

/// `POST /admin/reset` — zero the hit counter.
pub async fn reset_handler(State(state): State<AppState>) -> &'static str {
    state.hits.reset();
    "Hits reset to 0"
}
