//! Engine runtime.
//!
//! Pulls inbound events off the gateway channel, handles each one as an
//! independent task over the shared state, and drains the outbox into
//! the presenter. Backpressure is the mpsc channel capacity; there is
//! no retry logic here - delivery failures are the gateway's concern.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use super::dispatcher::{AppState, InboundEvent, handle_event};
use crate::catalogs::Catalogs;
use crate::config::Config;
use crate::directives::{Outbound, Presenter};

/// Channel capacity for both the inbox and the outbox.
const CHANNEL_CAPACITY: usize = 256;

/// The assistant core, wired but not yet running.
pub struct Engine {
    state: AppState,
    inbox: mpsc::Receiver<InboundEvent>,
    outbox: mpsc::Receiver<Outbound>,
}

impl Engine {
    /// Build the engine. The returned sender is the gateway's handle for
    /// feeding platform events in; dropping it shuts the engine down.
    pub fn new(config: Arc<Config>, catalogs: Arc<Catalogs>) -> (mpsc::Sender<InboundEvent>, Self) {
        let (inbox_tx, inbox) = mpsc::channel(CHANNEL_CAPACITY);
        let (outbound_tx, outbox) = mpsc::channel(CHANNEL_CAPACITY);
        let state = AppState::new(config, catalogs, outbound_tx);
        (inbox_tx, Self { state, inbox, outbox })
    }

    /// Run until every inbound sender is gone and in-flight work drains.
    pub async fn run(self, presenter: Arc<dyn Presenter>) {
        let Engine { state, mut inbox, mut outbox } = self;

        let drain = tokio::spawn(async move {
            while let Some(outbound) = outbox.recv().await {
                presenter.present(outbound);
            }
        });

        info!("engine running");
        while let Some(event) = inbox.recv().await {
            let state = state.clone();
            tokio::spawn(async move {
                if let Err(err) = handle_event(state, event).await {
                    error!(%err, "event handler failed");
                }
            });
        }

        // Dropping the state releases the last outbound sender once the
        // in-flight tasks (and their session timers) finish.
        drop(state);
        if let Err(err) = drain.await {
            error!(%err, "outbox drain task failed");
        }
        info!("engine stopped");
    }
}
