// Action client - outbound tap, rating, and catalog requests
use crate::application::transport::{RequestMethod, Transport};
use crate::domain::catalog::CatalogEntry;
use anyhow::Context;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Result of an action request. There is no cancellation primitive: a
/// superseding action simply races the stale one, and a response arriving
/// after its action was invalidated is reported as such and ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    Completed(T),
    Superseded,
}

#[derive(Clone)]
pub struct ActionClient {
    transport: Arc<dyn Transport>,
    generation: Arc<AtomicU64>,
}

impl ActionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Invalidate every in-flight action, e.g. when the user navigates
    /// away from the form that triggered it.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Tap a new keg into an existing slot. The slot is mandatory: a tap
    /// without a slot to replace is not a valid request.
    pub async fn tap_keg(
        &self,
        replace: usize,
        beer_id: i64,
        volume: f64,
    ) -> anyhow::Result<ActionOutcome<String>> {
        let path = format!(
            "api/set/keg?replace={}&beer_id={}&volume={}",
            replace, beer_id, volume
        );
        self.post(&path).await
    }

    pub async fn rate_beer(
        &self,
        beer_id: i64,
        rating: u32,
        comments: &str,
    ) -> anyhow::Result<ActionOutcome<String>> {
        let path = format!(
            "api/set/rating?beer_id={}&rating={}&comments={}",
            beer_id,
            rating,
            urlencoding::encode(comments)
        );
        self.post(&path).await
    }

    pub async fn list_brewers(&self) -> anyhow::Result<ActionOutcome<Vec<CatalogEntry>>> {
        self.get_catalog("api/get/brewer").await
    }

    pub async fn list_beers(
        &self,
        brewer_id: i64,
    ) -> anyhow::Result<ActionOutcome<Vec<CatalogEntry>>> {
        self.get_catalog(&format!("api/get/beer?brewer_id={}", brewer_id))
            .await
    }

    async fn post(&self, path: &str) -> anyhow::Result<ActionOutcome<String>> {
        let generation = self.generation.load(Ordering::SeqCst);
        let body = self.transport.request(RequestMethod::Post, path).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("dropping superseded response for {}", path);
            return Ok(ActionOutcome::Superseded);
        }
        Ok(ActionOutcome::Completed(body))
    }

    async fn get_catalog(&self, path: &str) -> anyhow::Result<ActionOutcome<Vec<CatalogEntry>>> {
        let generation = self.generation.load(Ordering::SeqCst);
        let body = self.transport.request(RequestMethod::Get, path).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("dropping superseded response for {}", path);
            return Ok(ActionOutcome::Superseded);
        }

        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&body).context("catalog response is not a JSON array")?;
        Ok(ActionOutcome::Completed(entries))
    }
}
