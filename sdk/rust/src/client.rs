use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Error returned by [`VisitClient`] calls.
#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
    Decode(serde_json::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
            ClientError::Status { status, body } => {
                write!(f, "API returned error status {}: {}", status, body)
            }
            ClientError::Decode(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// A visit as returned by `GET /visit/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Visit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateVisit<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

pub struct VisitClient {
    client: Client,
    base_url: String,
}

impl VisitClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Call `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let resp = self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    /// Create a visit. Without an id the server derives one from the current time.
    pub async fn create_visit(&self, id: Option<&str>) -> Result<String, ClientError> {
        let resp = self.client
            .post(format!("{}/visit", self.base_url))
            .json(&CreateVisit { id })
            .send()
            .await?;
        let created: Created = decode(resp).await?;
        Ok(created.id)
    }

    /// Read a visit back. `Ok(None)` when the server reports no record.
    pub async fn get_visit(&self, id: &str) -> Result<Option<Visit>, ClientError> {
        let resp = self.client
            .get(format!("{}/visit/{}", self.base_url, id))
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::Status { status, body: text });
    }

    serde_json::from_str::<T>(&text).map_err(ClientError::Decode)
}
