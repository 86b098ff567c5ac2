//! Read-only leaderboard endpoint
//!
//! `GET /leaderboard` answers with the latest snapshot the engine published,
//! or `{}` before anything has been loaded.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::watch;

use crate::highscores::{Leaderboard, MatchInfo};

/// Receiving end of the engine's leaderboard feed
pub type LeaderboardSnapshots = watch::Receiver<Option<Leaderboard>>;

#[derive(Debug, Serialize)]
struct LeaderboardView {
    matches: Vec<MatchInfo>,
}

pub fn router(snapshots: LeaderboardSnapshots) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .with_state(snapshots)
}

async fn get_leaderboard(State(snapshots): State<LeaderboardSnapshots>) -> Response {
    let snapshot = snapshots.borrow().clone();
    match snapshot {
        Some(board) => Json(LeaderboardView {
            matches: board.entries,
        })
        .into_response(),
        None => Json(serde_json::json!({})).into_response(),
    }
}

/// Serve the router on all interfaces until `shutdown` resolves
pub async fn serve<F>(port: u16, snapshots: LeaderboardSnapshots, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Leaderboard available at http://{}/leaderboard", addr);

    axum::serve(listener, router(snapshots))
        .with_graceful_shutdown(shutdown)
        .await
}
