//! Persisting wrapper around [`DestinationStore`].
//!
//! Every mutation goes through one `transact` step: apply to the store, write
//! the whole collection into the storage slot, then re-render attached views.

use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    config::PlannerConfig,
    core::{
        progress::{Achievement, Progress, achievements},
        store::{DestinationStore, StoreError, StoreSnapshot},
    },
    destination::{DestinationDraft, DestinationPatch, DestinationRecord},
    interchange::{self, ImportError},
    op::{AppliedChange, Change},
    persist::{PersistError, SlotStorage},
    share::ShareMessage,
    types::{DestinationId, Revision},
    view::{self, Intent, ListEntry, Marker, ViewSet},
};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The in-memory change was applied but could not be written out.
    /// `applied` is the change that is live but not on storage.
    #[error("failed to persist collection: {source}")]
    Persist {
        applied: Option<AppliedChange>,
        #[source]
        source: PersistError,
    },
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored collection is unreadable: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("destination {0} is completed and cannot be edited")]
    EditLocked(DestinationId),
}

impl PlannerError {
    /// The change that took effect in memory despite this error, if any.
    pub fn applied(&self) -> Option<&AppliedChange> {
        match self {
            PlannerError::Persist { applied, .. } => applied.as_ref(),
            _ => None,
        }
    }

    /// Id of a destination that was created before its save failed.
    pub fn created_id(&self) -> Option<&DestinationId> {
        match self.applied().map(|a| &a.change) {
            Some(Change::Created { id }) => Some(id),
            _ => None,
        }
    }
}

pub struct Planner {
    store: DestinationStore,
    storage: Box<dyn SlotStorage>,
    config: PlannerConfig,
    views: ViewSet,
}

impl Planner {
    /// Loads the collection from `storage`. Never fails: a missing, unreadable or
    /// corrupt slot yields an empty collection.
    pub fn hydrate(storage: impl SlotStorage + 'static, config: PlannerConfig) -> Self {
        let store = match storage.load(&config.storage_key) {
            Ok(Some(text)) => match decode_slot(&text) {
                Ok(store) => {
                    info!(key = %config.storage_key, count = store.len(), "hydrated collection");
                    store
                }
                Err(err) => {
                    warn!(key = %config.storage_key, %err, "discarding unreadable collection");
                    DestinationStore::new()
                }
            },
            Ok(None) => {
                debug!(key = %config.storage_key, "no stored collection");
                DestinationStore::new()
            }
            Err(err) => {
                error!(key = %config.storage_key, %err, "failed to read stored collection");
                DestinationStore::new()
            }
        };

        Self {
            store,
            storage: Box::new(storage),
            config,
            views: ViewSet::new(),
        }
    }

    /// Attaches views and renders the current snapshot into them.
    pub fn with_views(mut self, views: ViewSet) -> Self {
        self.views = views;
        self.views.render(self.store.records(), self.store.revision());
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn records(&self) -> &[DestinationRecord] {
        self.store.records()
    }

    pub fn get(&self, id: &DestinationId) -> Option<&DestinationRecord> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn revision(&self) -> Revision {
        self.store.revision()
    }

    pub fn create(&mut self, draft: DestinationDraft) -> Result<(DestinationId, AppliedChange), PlannerError> {
        self.transact(|store| store.create(draft))
    }

    /// Merges `patch` into `id`. Unknown ids are a no-op and yield `Ok(None)`.
    pub fn update(
        &mut self,
        id: &DestinationId,
        patch: &DestinationPatch,
    ) -> Result<Option<AppliedChange>, PlannerError> {
        self.transact(|store| Ok(store.update(id, patch)))
    }

    pub fn toggle(&mut self, id: &DestinationId) -> Result<Option<AppliedChange>, PlannerError> {
        self.transact(|store| {
            let Some(completed) = store.get(id).map(|r| r.completed) else {
                return Ok(None);
            };
            Ok(store.update(id, &DestinationPatch::completion(!completed)))
        })
    }

    pub fn remove(&mut self, id: &DestinationId) -> Result<Option<AppliedChange>, PlannerError> {
        self.transact(|store| Ok(store.remove(id)))
    }

    pub fn replace_all(&mut self, records: Vec<DestinationRecord>) -> Result<AppliedChange, PlannerError> {
        self.transact(|store| store.replace_all(records))
    }

    /// Parses an import file and replaces the collection with it. A rejected
    /// file leaves the collection and the storage slot untouched.
    pub fn import_json(&mut self, text: &str) -> Result<AppliedChange, PlannerError> {
        let records = interchange::parse_import(text, self.config.strict_import).inspect_err(|err| {
            warn!(%err, "import rejected");
        })?;
        info!(count = records.len(), "importing collection");
        self.replace_all(records)
    }

    pub fn export_json(&self) -> Result<String, PlannerError> {
        interchange::export_json(self.store.records()).map_err(PlannerError::Encode)
    }

    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }

    /// Applies a view intent. Editing a completed destination is refused here;
    /// the store itself merges unconditionally.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<AppliedChange>, PlannerError> {
        match intent {
            Intent::Add { lat, lng } => {
                let (_, applied) = self.create(DestinationDraft::at(lat, lng))?;
                Ok(Some(applied))
            }
            Intent::Edit { id, fields } => {
                if self.store.get(&id).is_some_and(|r| r.completed) {
                    return Err(PlannerError::EditLocked(id));
                }
                self.update(&id, &DestinationPatch::from(fields))
            }
            Intent::Toggle { id } => self.toggle(&id),
            Intent::Delete { id } => self.remove(&id),
            Intent::Import { records } => self.replace_all(records).map(Some),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.store.records())
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements(&self.progress())
    }

    pub fn markers(&self) -> Vec<Marker> {
        view::markers(self.store.records())
    }

    pub fn list_entries(&self) -> Vec<ListEntry> {
        view::list_entries(self.store.records())
    }

    pub fn share_message(&self, page_url: Url) -> ShareMessage {
        ShareMessage::new(&self.progress(), page_url)
    }

    fn transact<T: Outcome>(
        &mut self,
        mutate: impl FnOnce(&mut DestinationStore) -> Result<T, StoreError>,
    ) -> Result<T, PlannerError> {
        let out = mutate(&mut self.store)?;
        let persisted = self.persist();
        self.views.render(self.store.records(), self.store.revision());
        match persisted {
            Ok(()) => Ok(out),
            Err(source) => Err(PlannerError::Persist {
                applied: out.applied().cloned(),
                source,
            }),
        }
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let text = serde_json::to_string(self.store.records())?;
        self.storage
            .save(&self.config.storage_key, &text)
            .inspect_err(|err| {
                error!(key = %self.config.storage_key, %err, revision = self.store.revision(), "persist failed");
            })
    }
}

/// Result of one store mutation, as seen by `transact`.
trait Outcome {
    fn applied(&self) -> Option<&AppliedChange>;
}

impl Outcome for AppliedChange {
    fn applied(&self) -> Option<&AppliedChange> {
        Some(self)
    }
}

impl Outcome for Option<AppliedChange> {
    fn applied(&self) -> Option<&AppliedChange> {
        self.as_ref()
    }
}

impl Outcome for (DestinationId, AppliedChange) {
    fn applied(&self) -> Option<&AppliedChange> {
        Some(&self.1)
    }
}

fn decode_slot(text: &str) -> Result<DestinationStore, PlannerError> {
    let snapshot: StoreSnapshot = serde_json::from_str(text).map_err(PlannerError::Decode)?;
    Ok(DestinationStore::from_snapshot(snapshot)?)
}
