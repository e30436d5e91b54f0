//! # sdata-api — HTTP Service for Structured Data
//!
//! Authoring and storage surface over the validation engine. Schema
//! records are self-checked on every save; data records are validated
//! against their schema on every write. A failure blocks the write and the
//! engine's report is returned as the error message.
//!
//! ## API Surface
//!
//! | Prefix            | Module                 | Purpose                      |
//! |-------------------|------------------------|------------------------------|
//! | `/v1/schemas/*`   | [`routes::schemas`]    | Schema records               |
//! | `/v1/schema-check`| [`routes::schemas`]    | Self-check without storing   |
//! | `/v1/data/*`      | [`routes::data`]       | Data records                 |
//! | `/v1/validate`    | [`routes::validate`]   | Ad hoc validation            |
//! | `/health/liveness`| (this module)          | Liveness check               |

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::schemas::router())
        .merge(routes::data::router())
        .merge(routes::validate::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new().route("/health/liveness", get(liveness));

    Router::new().merge(health).merge(api)
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}
