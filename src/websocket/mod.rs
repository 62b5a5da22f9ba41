mod routes;
mod ws_handler;

pub use routes::websocket_routes;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::db::models::Problem;

/// Event published to connected clients when a problem is reported.
#[derive(Debug, Serialize)]
struct ProblemEvent<'a> {
    event: &'static str,
    problem: &'a Problem,
}

/// Broadcast a `problem.created` event. Lagging or absent subscribers miss
/// events rather than blocking the publisher.
pub fn publish_problem_created(events: &broadcast::Sender<String>, problem: &Problem) {
    let event = ProblemEvent {
        event: "problem.created",
        problem,
    };
    match serde_json::to_string(&event) {
        Ok(payload) => {
            let receivers = events.send(payload).unwrap_or(0);
            debug!("problem.created event delivered to {receivers} subscribers");
        }
        Err(error) => debug!("failed to encode problem event: {error}"),
    }
}
