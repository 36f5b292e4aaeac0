use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::{debug, error, info};

use crate::{
    config::RuntimeConfig,
    core::progress::Progress,
    destination::{DestinationDraft, DestinationPatch, DestinationRecord},
    op::AppliedChange,
    planner::{Planner, PlannerError},
    types::DestinationId,
    view::Intent,
};

use super::events::PlannerEvent;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("planner runtime is not running")]
    ChannelClosed,
}

type Reply<T> = oneshot::Sender<Result<T, PlannerError>>;

#[derive(Clone)]
pub struct PlannerHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<PlannerEvent>,
}

enum Command {
    Create {
        draft: DestinationDraft,
        resp: Reply<DestinationId>,
    },
    Update {
        id: DestinationId,
        patch: DestinationPatch,
        resp: Reply<Option<AppliedChange>>,
    },
    Toggle {
        id: DestinationId,
        resp: Reply<Option<AppliedChange>>,
    },
    Remove {
        id: DestinationId,
        resp: Reply<Option<AppliedChange>>,
    },
    Dispatch {
        intent: Intent,
        resp: Reply<Option<AppliedChange>>,
    },
    Import {
        text: String,
        resp: Reply<AppliedChange>,
    },
    Export {
        resp: Reply<String>,
    },
    Get {
        id: DestinationId,
        resp: oneshot::Sender<Option<DestinationRecord>>,
    },
    Snapshot {
        resp: oneshot::Sender<Vec<DestinationRecord>>,
    },
    Progress {
        resp: oneshot::Sender<Progress>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `planner` onto a task that serves commands one at a time.
///
/// Each command runs on the blocking pool, since a mutation ends in a
/// synchronous storage write.
pub fn spawn_planner(planner: Planner, config: RuntimeConfig) -> PlannerHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<PlannerEvent>(config.event_queue_bound.max(1));

    let events_tx_loop = events_tx.clone();
    tokio::spawn(async move {
        info!(count = planner.len(), "planner runtime started");
        let planner = Arc::new(Mutex::new(planner));
        while let Some(cmd) = cmd_rx.recv().await {
            let planner_ref = Arc::clone(&planner);
            let events_tx = events_tx_loop.clone();
            let stop = tokio::task::spawn_blocking(move || {
                let mut planner = planner_ref.blocking_lock();
                handle_command(cmd, &mut planner, &events_tx)
            })
            .await;
            match stop {
                Ok(true) => break,
                Ok(false) => {}
                // The dropped reply surfaces as ChannelClosed to that caller.
                Err(e) => error!(%e, "planner command panicked"),
            }
        }
        debug!("planner runtime stopped");
    });

    PlannerHandle { cmd_tx, events_tx }
}

impl PlannerHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.events_tx.subscribe()
    }

    pub async fn create(&self, draft: DestinationDraft) -> Result<DestinationId, RuntimeError> {
        Ok(self.request(|resp| Command::Create { draft, resp }).await??)
    }

    pub async fn update(
        &self,
        id: DestinationId,
        patch: DestinationPatch,
    ) -> Result<Option<AppliedChange>, RuntimeError> {
        Ok(self.request(|resp| Command::Update { id, patch, resp }).await??)
    }

    pub async fn toggle(&self, id: DestinationId) -> Result<Option<AppliedChange>, RuntimeError> {
        Ok(self.request(|resp| Command::Toggle { id, resp }).await??)
    }

    pub async fn remove(&self, id: DestinationId) -> Result<Option<AppliedChange>, RuntimeError> {
        Ok(self.request(|resp| Command::Remove { id, resp }).await??)
    }

    pub async fn dispatch(&self, intent: Intent) -> Result<Option<AppliedChange>, RuntimeError> {
        Ok(self.request(|resp| Command::Dispatch { intent, resp }).await??)
    }

    pub async fn import_json(&self, text: impl Into<String>) -> Result<AppliedChange, RuntimeError> {
        let text = text.into();
        Ok(self.request(|resp| Command::Import { text, resp }).await??)
    }

    pub async fn export_json(&self) -> Result<String, RuntimeError> {
        Ok(self.request(|resp| Command::Export { resp }).await??)
    }

    pub async fn get(&self, id: DestinationId) -> Result<Option<DestinationRecord>, RuntimeError> {
        self.request(|resp| Command::Get { id, resp }).await
    }

    pub async fn snapshot(&self) -> Result<Vec<DestinationRecord>, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    pub async fn progress(&self) -> Result<Progress, RuntimeError> {
        self.request(|resp| Command::Progress { resp }).await
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    planner: &mut Planner,
    events_tx: &broadcast::Sender<PlannerEvent>,
) -> bool {
    match cmd {
        Command::Create { draft, resp } => {
            let res = planner.create(draft).map(|(id, applied)| (id, Some(applied)));
            let res = publish(planner, events_tx, res);
            let _ = resp.send(res.map(|(id, _)| id));
        }
        Command::Update { id, patch, resp } => {
            let res = planner.update(&id, &patch).map(|a| (a.clone(), a));
            let _ = resp.send(publish(planner, events_tx, res).map(|(a, _)| a));
        }
        Command::Toggle { id, resp } => {
            let res = planner.toggle(&id).map(|a| (a.clone(), a));
            let _ = resp.send(publish(planner, events_tx, res).map(|(a, _)| a));
        }
        Command::Remove { id, resp } => {
            let res = planner.remove(&id).map(|a| (a.clone(), a));
            let _ = resp.send(publish(planner, events_tx, res).map(|(a, _)| a));
        }
        Command::Dispatch { intent, resp } => {
            let res = planner.dispatch(intent).map(|a| (a.clone(), a));
            let _ = resp.send(publish(planner, events_tx, res).map(|(a, _)| a));
        }
        Command::Import { text, resp } => {
            let res = planner.import_json(&text).map(|a| (a.clone(), Some(a)));
            let _ = resp.send(publish(planner, events_tx, res).map(|(a, _)| a));
        }
        Command::Export { resp } => {
            let _ = resp.send(planner.export_json());
        }
        Command::Get { id, resp } => {
            let _ = resp.send(planner.get(&id).cloned());
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(planner.records().to_vec());
        }
        Command::Progress { resp } => {
            let _ = resp.send(planner.progress());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

/// Broadcasts the outcome of one mutation; `res` carries the reply value and
/// the change to announce, if any.
fn publish<T>(
    planner: &Planner,
    events_tx: &broadcast::Sender<PlannerEvent>,
    res: Result<(T, Option<AppliedChange>), PlannerError>,
) -> Result<(T, Option<AppliedChange>), PlannerError> {
    match &res {
        Ok((_, Some(applied))) => {
            let _ = events_tx.send(PlannerEvent::Changed(applied.clone()));
        }
        Err(PlannerError::Persist { applied, source }) => {
            if let Some(applied) = applied {
                let _ = events_tx.send(PlannerEvent::Changed(applied.clone()));
            }
            let _ = events_tx.send(PlannerEvent::PersistFailed {
                revision: planner.revision(),
                message: source.to_string(),
            });
        }
        _ => {}
    }
    res
}
