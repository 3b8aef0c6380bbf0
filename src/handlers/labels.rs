//! Label listing endpoint

use actix_web::{web, HttpRequest, HttpResponse};

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::{LabelEntry, LabelsResponse};

use super::{gmail_client, require_credentials, AppState};

/// `GET /api/labels`
///
/// Labels are returned in provider order with a 1-based index, matching what
/// the selection UI displays.
pub async fn list(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let bundle = require_credentials(&state, &req).await?;
    let client = gmail_client(&bundle).await?;

    let labels: Vec<LabelEntry> = client
        .list_labels()
        .await?
        .into_iter()
        .enumerate()
        .map(|(i, label)| LabelEntry {
            id: label.id,
            name: label.name,
            label_type: label.label_type,
            index: i + 1,
        })
        .collect();

    Ok(HttpResponse::Ok().json(LabelsResponse { labels }))
}
