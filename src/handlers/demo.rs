//! Demo playback endpoint

use actix_web::HttpResponse;

use crate::demo::{script, DemoRunResponse};

/// `POST /api/demo/run`
///
/// Returns the canned narration sequence; no authentication and no live
/// provider calls.
pub async fn run() -> HttpResponse {
    HttpResponse::Ok().json(DemoRunResponse { steps: script() })
}
