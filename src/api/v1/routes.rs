use axum::{Router, routing::get};

use crate::api::v1::handlers::userinfo::userinfo;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // OIDC allows both GET and POST for the userinfo endpoint; POST is the
    // one that may carry the token in a form-encoded body.
    Router::new()
        .route("/userinfo", get(userinfo).post(userinfo))
        .with_state(state)
}
