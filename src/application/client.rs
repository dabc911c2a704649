// Dashboard client - feeds stream events through the sequencer into the store
use crate::application::keg_store::KegStateStore;
use crate::application::sequencer::{Rejection, UpdateSequencer};
use crate::application::transport::StreamEvent;

/// What happened to one inbound event. Rejections are recovered here and
/// never propagate past the client.
#[derive(Debug, PartialEq)]
pub enum EventOutcome {
    Applied { update_id: i64, kegs: usize },
    Dropped(Rejection),
}

#[derive(Debug, Default)]
pub struct DashboardClient {
    sequencer: UpdateSequencer,
    store: KegStateStore,
}

impl DashboardClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one stream event: accepted snapshots replace the store
    /// state atomically, rejected ones leave it untouched.
    pub fn handle_event(&mut self, event: &StreamEvent) -> EventOutcome {
        match self.sequencer.accept(event) {
            Ok(snapshot) => {
                let update_id = snapshot.update_id;
                let kegs = snapshot.kegs.len();
                self.store.apply(snapshot);
                tracing::info!(update_id, kegs, "applied snapshot");
                EventOutcome::Applied { update_id, kegs }
            }
            Err(rejection) => {
                tracing::debug!(event_id = %event.id, %rejection, "dropped event");
                EventOutcome::Dropped(rejection)
            }
        }
    }

    pub fn store(&self) -> &KegStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KegStateStore {
        &mut self.store
    }
}
