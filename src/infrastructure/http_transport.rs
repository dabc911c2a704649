// HTTP transport implementation over reqwest
use crate::application::transport::{RequestMethod, StreamEvent, Transport};
use crate::infrastructure::sse::SseDecoder;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    stream_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: String, stream_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            stream_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open_stream(&self) -> Result<BoxStream<'static, StreamEvent>> {
        let response = self
            .client
            .get(&self.stream_url)
            .header("Accept", "text/event-stream")
            .send()
            .await
            .context("Failed to connect to event stream")?
            .error_for_status()
            .context("Event stream refused")?;

        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            while let Some(chunk) = bytes.next().await {
                let chunk: Bytes = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        tracing::warn!("event stream read failed: {}", e);
                        break;
                    }
                };
                for event in decoder.feed(&chunk) {
                    yield event;
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn request(&self, method: RequestMethod, path_and_query: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        let request = match method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
        };

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Request to {} failed with status {}: {}", url, status, body);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
