use axum::{Router, routing::get};

use crate::modules::accounts::controller::{get_profile, update_profile};
use crate::state::AppState;

pub fn init_accounts_router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}
