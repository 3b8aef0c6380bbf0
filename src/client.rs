//! Gmail API client for message listing, label listing, and batched trashing

use async_trait::async_trait;
use google_gmail1::api::BatchModifyMessagesRequest;
use tracing::debug;

use crate::auth::GmailHub;
use crate::error::Result;
use crate::models::LabelType;

/// Label info returned from Gmail API
#[derive(Debug, Clone)]
pub struct LabelInfo {
    pub id: String,
    pub name: String,
    pub label_type: LabelType,
}

/// Trait defining the Gmail operations this service needs
///
/// The seam exists so the deletion driver and handlers can be exercised
/// against mocks without touching the network.
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// List all message IDs matching a query, following pagination to the end
    async fn list_message_ids(&self, query: &str) -> Result<Vec<String>>;

    /// List all labels in the account
    async fn list_labels(&self) -> Result<Vec<LabelInfo>>;

    /// Move a set of messages to trash with a single batched request
    ///
    /// Callers are responsible for chunking; one call maps to one provider
    /// request.
    async fn batch_trash(&self, message_ids: &[String]) -> Result<()>;
}

/// Gmail client backed by an authenticated API hub
///
/// Requests are issued one at a time with no client-side retry; failures
/// propagate to the request boundary where they surface as provider errors.
pub struct ProductionGmailClient {
    hub: GmailHub,
}

impl ProductionGmailClient {
    pub fn new(hub: GmailHub) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl GmailClient for ProductionGmailClient {
    async fn list_message_ids(&self, query: &str) -> Result<Vec<String>> {
        let mut all_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut call = self
                .hub
                .users()
                .messages_list("me")
                .q(query)
                .max_results(100);

            if let Some(token) = page_token.as_ref() {
                call = call.page_token(token);
            }

            let (_, response) = call
                .add_scope("https://www.googleapis.com/auth/gmail.modify")
                .doit()
                .await?;

            if let Some(messages) = response.messages {
                for msg_ref in messages {
                    if let Some(id) = msg_ref.id {
                        all_ids.push(id);
                    }
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Listed {} messages for query {:?}", all_ids.len(), query);
        Ok(all_ids)
    }

    async fn list_labels(&self) -> Result<Vec<LabelInfo>> {
        let (_, response) = self
            .hub
            .users()
            .labels_list("me")
            .add_scope("https://www.googleapis.com/auth/gmail.modify")
            .doit()
            .await?;

        let labels: Vec<LabelInfo> = response
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|label| match (label.id, label.name) {
                (Some(id), Some(name)) => Some(LabelInfo {
                    id,
                    name,
                    label_type: LabelType::from_provider(label.type_.as_deref()),
                }),
                _ => None,
            })
            .collect();

        debug!("Listed {} labels", labels.len());
        Ok(labels)
    }

    async fn batch_trash(&self, message_ids: &[String]) -> Result<()> {
        if message_ids.is_empty() {
            return Ok(());
        }

        // batchModify with TRASH gives move-to-trash semantics for the whole
        // chunk in one request; removing INBOX mirrors what messages.trash does
        let request = BatchModifyMessagesRequest {
            ids: Some(message_ids.to_vec()),
            add_label_ids: Some(vec!["TRASH".to_string()]),
            remove_label_ids: Some(vec!["INBOX".to_string()]),
        };

        self.hub
            .users()
            .messages_batch_modify(request, "me")
            .add_scope("https://www.googleapis.com/auth/gmail.modify")
            .doit()
            .await?;

        Ok(())
    }
}
