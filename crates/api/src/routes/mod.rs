//! Route tree for the versioned API.
//!
//! ```text
//! /health                                          GET  (root level)
//! /api/v1
//! ├── /time-bank
//! │   ├── /me                                      GET, PATCH
//! │   ├── /members                                 POST  (admin)
//! │   ├── /offers                                  POST
//! │   ├── /requests                                POST
//! │   ├── /help-sessions                           POST
//! │   ├── /help-sessions/{id}/complete             POST
//! │   ├── /balances/{owner_kind}/{owner_id}        GET
//! │   ├── /ledger/{member_id}                      GET
//! │   ├── /reports                                 POST
//! │   └── /reports/{id}/resolve                    POST  (moderator/admin)
//! └── /notifications
//!     ├── /                                        GET
//!     ├── /prefs                                   GET, PATCH
//!     └── /deliver                                 POST  (admin)
//! ```

pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{members, moderation, notifications, time_bank};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    let time_bank_routes = Router::new()
        .route("/me", get(members::get_me).patch(members::update_me))
        .route("/members", post(members::enroll_member))
        .route("/offers", post(time_bank::create_offer))
        .route("/requests", post(time_bank::create_request))
        .route("/help-sessions", post(time_bank::create_session))
        .route(
            "/help-sessions/{id}/complete",
            post(time_bank::complete_session),
        )
        .route(
            "/balances/{owner_kind}/{owner_id}",
            get(time_bank::get_balance),
        )
        .route("/ledger/{member_id}", get(time_bank::get_ledger))
        .route("/reports", post(moderation::create_report))
        .route("/reports/{id}/resolve", post(moderation::resolve_report));

    let notification_routes = Router::new()
        .route("/", get(notifications::list_notifications))
        .route(
            "/prefs",
            get(notifications::get_prefs).patch(notifications::update_prefs),
        )
        .route("/deliver", post(notifications::record_delivery));

    Router::new()
        .nest("/time-bank", time_bank_routes)
        .nest("/notifications", notification_routes)
}
