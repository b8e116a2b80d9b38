use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

use super::{ClientError, DiaryTransport};
use crate::autosave::DiaryId;
use crate::models::{DiaryEntry, DiaryFields};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `reqwest` transport for the `/diaries` resource. Every request carries the bearer token.
#[derive(Clone)]
pub struct HttpDiaryClient {
    http: Client,
    base_url: String,
    token: String,
}

impl HttpDiaryClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = self.authorized(request).send().await.map_err(|e| {
            tracing::warn!(error = %e, "Diary API request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        tracing::debug!(status = %status, message, "Diary API returned error");

        Err(ClientError::from_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse diary API response");
            ClientError::Server {
                status: 200,
                message: format!("Unreadable response: {}", e),
            }
        })
    }
}

#[async_trait]
impl DiaryTransport for HttpDiaryClient {
    async fn list(&self) -> Result<Vec<DiaryEntry>, ClientError> {
        self.send_json(self.http.get(self.url("/diaries"))).await
    }

    async fn fetch(&self, id: DiaryId) -> Result<DiaryEntry, ClientError> {
        self.send_json(self.http.get(self.url(&format!("/diaries/{}", id))))
            .await
    }

    async fn create(&self, fields: &DiaryFields) -> Result<DiaryEntry, ClientError> {
        self.send_json(self.http.post(self.url("/diaries")).json(fields))
            .await
    }

    async fn update(&self, id: DiaryId, fields: &DiaryFields) -> Result<DiaryEntry, ClientError> {
        self.send_json(self.http.put(self.url(&format!("/diaries/{}", id))).json(fields))
            .await
    }

    async fn delete(&self, id: DiaryId) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(&format!("/diaries/{}", id))))
            .await?;
        Ok(())
    }
}
