// Transport trait - the seam between the core and network I/O
use async_trait::async_trait;
use futures::stream::BoxStream;

/// One inbound stream event: the server-assigned identifier plus the raw
/// payload text. Parsing and ordering are the sequencer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub id: String,
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

/// Outbound and inbound channels to the telemetry host. The transport
/// guarantees neither ordering nor delivery of stream events; that burden
/// falls on the update sequencer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the one-way event stream. The stream ends when the connection
    /// drops; the caller decides whether to reconnect.
    async fn open_stream(&self) -> anyhow::Result<BoxStream<'static, StreamEvent>>;

    /// Fire one request and return the response body text.
    async fn request(&self, method: RequestMethod, path_and_query: &str)
    -> anyhow::Result<String>;
}
