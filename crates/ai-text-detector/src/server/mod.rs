//! Web front-end: one page with a text area and an analyze button, backed by
//! a JSON endpoint returning the [`View`](crate::presentation::View) to show.

pub mod app;
mod page;
pub mod routes;

pub use app::{build_app, run_server, AppState};
