//! Draw-service collaborator: where draws and their authoritative status
//! come from.

use crate::apple::{Draw, DrawResult};
use crate::error::{RevealError, Result};
use crate::ticker::StatusHandle;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[async_trait]
pub trait DrawService: Send + Sync {
    /// The user's most recent draw, if any.
    async fn current_draw(&self) -> Result<Option<Draw>>;

    async fn create_draw(&self, referral_count: u32) -> Result<Draw>;

    async fn draw_result(&self, draw_id: &str) -> Result<DrawResult>;
}

#[derive(Debug, Serialize)]
struct DrawRequest {
    referral_count: u32,
}

/// HTTP client for the ringo backend.
#[derive(Debug, Clone)]
pub struct HttpDrawService {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl HttpDrawService {
    pub fn new(base_url: &str, user_id: impl Into<String>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RevealError::config("Backend URL cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url,
            user_id: user_id.into(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RevealError::service(status.as_u16(), error_message(&body)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pulls `detail` out of a JSON error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl DrawService for HttpDrawService {
    async fn current_draw(&self) -> Result<Option<Draw>> {
        let response = self
            .client
            .get(self.endpoint("/api/apple/current"))
            .header("X-User-Id", &self.user_id)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn create_draw(&self, referral_count: u32) -> Result<Draw> {
        let response = self
            .client
            .post(self.endpoint("/api/apple/draw"))
            .header("X-User-Id", &self.user_id)
            .json(&DrawRequest { referral_count })
            .send()
            .await?;

        let draw: Draw = Self::read_json(response).await?;
        tracing::info!(draw_id = %draw.id, "created draw");
        Ok(draw)
    }

    async fn draw_result(&self, draw_id: &str) -> Result<DrawResult> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/apple/result/{}", draw_id)))
            .header("X-User-Id", &self.user_id)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

/// Periodically refetches a draw's status and overwrites the local one.
pub struct StatusPoller {
    handle: JoinHandle<()>,
}

impl StatusPoller {
    pub fn spawn(
        service: Arc<dyn DrawService>,
        draw_id: String,
        status: StatusHandle,
        every: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                match service.draw_result(&draw_id).await {
                    Ok(result) => {
                        let fetched = result.effective_status();
                        status.set(fetched);
                        if fetched.is_revealed() {
                            tracing::info!(%draw_id, "draw revealed by server, polling stopped");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(%draw_id, error = %e, "draw status refresh failed");
                    }
                }
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
