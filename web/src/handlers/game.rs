//! Ten move handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use games_ten::{try_respond, BoardData, ClientMove};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

use crate::AppState;

/// Empty board with A to move.
pub async fn initial_board() -> Json<BoardData> {
    Json(BoardData::initial())
}

/// Play the human move and answer with the AI reply.
///
/// Malformed payloads, unparseable JSON included, get `400` with a `null`
/// body. An illegal move is an ordinary `200` response.
pub async fn make_move(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let client_move: ClientMove = match serde_json::from_slice(&body) {
        Ok(client_move) => client_move,
        Err(e) => {
            warn!(error = %e, "Rejected unparseable move payload");
            return null_response(StatusCode::BAD_REQUEST);
        }
    };

    let config = state.protocol.clone();
    // Search is CPU-bound and blocks for the whole time budget
    let outcome = tokio::task::spawn_blocking(move || try_respond(&client_move, &config)).await;

    match outcome {
        Ok(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(Err(e)) if e.is_malformed() => {
            warn!(error = %e, "Rejected malformed move payload");
            null_response(StatusCode::BAD_REQUEST)
        }
        Ok(Err(e)) => {
            error!(error = %e, "Move could not be answered");
            null_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!(error = %e, "Move task panicked");
            null_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn null_response(status: StatusCode) -> Response {
    (status, Json(Value::Null)).into_response()
}
