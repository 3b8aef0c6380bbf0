//! Bulk deletion endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::deleter;
use crate::error::{Result, ServiceError};
use crate::models::{DeleteRequest, DeleteResponse};

use super::{gmail_client, require_credentials, AppState};

/// `POST /api/delete`
///
/// Authentication is checked first, then the id set; an empty set is
/// rejected before any provider interaction.
pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<DeleteRequest>,
) -> Result<HttpResponse> {
    let bundle = require_credentials(&state, &req).await?;

    if body.message_ids.is_empty() {
        return Err(ServiceError::InvalidInput(
            "No message IDs provided".to_string(),
        ));
    }

    let client = gmail_client(&bundle).await?;
    let result = deleter::delete_all(&client, &body.message_ids, state.batch_size).await?;

    info!(
        deleted = result.deleted_count,
        total = result.total_count,
        "Bulk deletion completed"
    );

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
        total_count: result.total_count,
    }))
}
