//! Gmail Bulk Delete Service
//!
//! A small web backend that lets an authenticated user search and
//! bulk-delete Gmail messages matching a label and date range, proxying
//! Google's Gmail API.
//!
//! # Overview
//!
//! - **Authentication**: OAuth2 authorization-code flow with PKCE; credential
//!   bundles held per session, in memory only
//! - **Search**: label + date-range selection turned into a Gmail query,
//!   resolved to message ids with paginated listing
//! - **Deletion**: batched move-to-trash in strictly sequential chunks with
//!   progress accounting
//! - **Demo**: a canned narration sequence for UI playback
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 flow, credential bundles, Gmail hub construction
//! - [`client`] - Gmail API client (listing, labels, batched trashing)
//! - [`config`] - Server configuration
//! - [`deleter`] - Batch deletion driver
//! - [`demo`] - Scripted demo sequence
//! - [`error`] - Error types and HTTP mapping
//! - [`handlers`] - HTTP request handlers
//! - [`models`] - Request/response record types
//! - [`query`] - Search-query construction
//! - [`session`] - Session-keyed credential storage

pub mod auth;
pub mod client;
pub mod config;
pub mod deleter;
pub mod demo;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod session;

// Re-export commonly used types for convenience
pub use error::{Result, ServiceError};

pub use auth::{CredentialBundle, GmailHub, OAuthFlow};
pub use client::{GmailClient, LabelInfo, ProductionGmailClient};
pub use config::Config;
pub use deleter::{delete_all, DeletionProgress, DeletionResult, BATCH_SIZE};
pub use handlers::AppState;
pub use models::{
    DeleteRequest, DeleteResponse, LabelEntry, LabelType, SearchRequest, SearchResponse,
};
pub use query::{build_query, DateRange, LabelSelector};
pub use session::{PendingAuthStore, SessionStore, SESSION_COOKIE};
