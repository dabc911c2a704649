// Main entry point - wiring and the event loop
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;

use tokio_stream::StreamExt;

use crate::application::client::{DashboardClient, EventOutcome};
use crate::application::transport::Transport;
use crate::domain::projection::Viewport;
use crate::infrastructure::config::load_client_config;
use crate::infrastructure::http_transport::HttpTransport;
use crate::presentation::svg::render_dashboard;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_client_config()?;
    let viewport = Viewport::new(config.viewport.width, config.viewport.height);

    // Create transport (infrastructure layer)
    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new(config.base_url(), config.stream_url()));

    // Create the client (application layer)
    let mut client = DashboardClient::new();

    println!("Starting keg-telemetry client against {}", config.base_url());

    loop {
        let mut stream = match transport.open_stream().await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("could not open event stream: {}", e);
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        while let Some(event) = stream.next().await {
            if let EventOutcome::Applied { update_id, .. } = client.handle_event(&event) {
                match render_dashboard(client.store(), viewport) {
                    Some(markup) => {
                        tracing::info!(
                            update_id,
                            temperature = %markup.temperature,
                            taps = markup.tap_menu.len(),
                            "rendered dashboard"
                        );
                    }
                    None => tracing::info!(update_id, "snapshot applied with no kegs"),
                }
            }
        }

        tracing::warn!("event stream closed, reconnecting");
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
