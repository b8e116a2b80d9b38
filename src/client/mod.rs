//! Client side of the journal API: the transport capability consumed by the
//! editor, its HTTP implementation, and dashboard helpers.

pub mod error;
pub mod http;
pub mod listing;

use async_trait::async_trait;

use crate::autosave::DiaryId;
use crate::models::{DiaryEntry, DiaryFields};

pub use error::ClientError;
pub use http::HttpDiaryClient;

/// Remote CRUD over the caller's diary entries.
///
/// Implementations only move entries over the wire; they hold no editor state.
#[async_trait]
pub trait DiaryTransport: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<DiaryEntry>, ClientError>;

    async fn fetch(&self, id: DiaryId) -> Result<DiaryEntry, ClientError>;

    async fn create(&self, fields: &DiaryFields) -> Result<DiaryEntry, ClientError>;

    async fn update(&self, id: DiaryId, fields: &DiaryFields) -> Result<DiaryEntry, ClientError>;

    async fn delete(&self, id: DiaryId) -> Result<(), ClientError>;
}
