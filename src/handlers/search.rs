//! Message search endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::{SearchRequest, SearchResponse};
use crate::query::{build_query, DateRange};

use super::{gmail_client, require_credentials, AppState};

/// `POST /api/search`
///
/// Builds the provider query from the selection and resolves it to the full
/// set of matching message ids, following pagination to the end.
pub async fn search(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SearchRequest>,
) -> Result<HttpResponse> {
    let bundle = require_credentials(&state, &req).await?;

    let range = DateRange::new(body.start_date.clone(), body.end_date.clone());
    let query = build_query(body.label_id.as_deref(), &range);

    let client = gmail_client(&bundle).await?;
    let message_ids = client.list_message_ids(&query).await?;

    info!(count = message_ids.len(), query = %query, "Search completed");

    Ok(HttpResponse::Ok().json(SearchResponse {
        count: message_ids.len(),
        query,
        message_ids,
    }))
}
