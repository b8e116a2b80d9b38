use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

use super::debounce::Debouncer;
use super::draft::{today_in_target_zone, DiaryId, Draft, Edit};
use super::status::SaveStatus;
use crate::client::{ClientError, DiaryTransport};
use crate::models::DiaryFields;

/// Quiet period between the last edit and the background save.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

/// Host-shell navigation used by the editor.
pub trait Navigator: Send + Sync + 'static {
    /// Point the visible location at `id` without leaving the editor.
    fn replace_location(&self, id: DiaryId);

    /// Leave the editor for the entry list.
    fn exit_to_list(&self);
}

struct SessionState {
    draft: Draft,
    // Bumped on every applied edit; a save only settles to `Saved` if it sent the latest one
    revision: u64,
    debounce: Debouncer,
    // Autosaves that have fired and not yet finished, including ones waiting on the save lock
    queued_autosaves: usize,
    manual_save_running: bool,
    closed: bool,
}

struct Session<T, N> {
    transport: T,
    navigator: N,
    state: Mutex<SessionState>,
    status: watch::Sender<SaveStatus>,
    // Held around every dispatch: writes reach the server in revision order and
    // an unidentified draft is created at most once
    save_lock: tokio::sync::Mutex<()>,
}

struct Saved {
    id: DiaryId,
    revision: u64,
    created: bool,
}

impl<T: DiaryTransport, N: Navigator> Session<T, N> {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: SaveStatus) {
        let previous = self.status.send_replace(status);
        if previous != status {
            tracing::debug!(from = ?previous, to = ?status, "Save status changed");
        }
    }

    fn snapshot(&self) -> (Option<DiaryId>, DiaryFields, u64) {
        let state = self.lock();
        (state.draft.id(), state.draft.fields(), state.revision)
    }

    /// Arms the debounced autosave.
    fn arm(self: &Arc<Self>, state: &mut SessionState) {
        let session = Arc::downgrade(self);
        state.debounce.schedule(async move {
            if let Some(session) = session.upgrade() {
                session.autosave().await;
            }
        });
        tracing::trace!(revision = state.revision, "Autosave scheduled");
    }

    /// Debounce timer body.
    async fn autosave(self: &Arc<Self>) {
        {
            let mut state = self.lock();
            if state.closed {
                return;
            }
            if !state.draft.has_title() {
                tracing::debug!("Autosave skipped: title is empty");
                return;
            }
            state.queued_autosaves += 1;
        }

        self.set_status(SaveStatus::Saving);
        let result = self.dispatch().await;
        self.lock().queued_autosaves -= 1;

        match result {
            Ok(saved) => {
                if saved.created && !self.lock().closed {
                    self.navigator.replace_location(saved.id);
                }
                self.settle(saved.revision);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Autosave failed");
                self.set_status(SaveStatus::Unsaved);
            }
        }
    }

    /// Create-or-update with the draft as it is once the save lock is held.
    async fn dispatch(&self) -> Result<Saved, ClientError> {
        let _guard = self.save_lock.lock().await;

        let (id, fields, revision) = self.snapshot();
        if let Some(id) = id {
            self.transport.update(id, &fields).await?;
            tracing::debug!(diary_id = %id, revision, "Draft saved");
            return Ok(Saved { id, revision, created: false });
        }

        let entry = self.transport.create(&fields).await?;
        let id = DiaryId::from(&entry);
        let created = self.lock().draft.bind_identity(id);
        if created {
            tracing::info!(diary_id = %id, "Draft bound to new entry");
        }

        Ok(Saved { id, revision, created })
    }

    /// Settles the status after a successful save of `revision`.
    fn settle(self: &Arc<Self>, revision: u64) {
        let mut state = self.lock();
        if state.revision == revision {
            self.set_status(SaveStatus::Saved);
            return;
        }

        tracing::debug!(sent = revision, current = state.revision, "Saved snapshot is already stale");
        if state.queued_autosaves > 0 {
            // A later save is already waiting for the lock and will carry the newer draft
            return;
        }

        self.set_status(SaveStatus::Unsaved);
        if !state.closed && state.draft.has_title() && !state.debounce.is_pending() {
            self.arm(&mut state);
        }
    }
}

/// Autosave session for one entry editor.
///
/// Every applied edit marks the draft `Unsaved`; edits with a non-blank title
/// (re)arm a single debounced save. The draft observed at construction is the
/// baseline and never triggers a save by itself.
///
/// Edits must be made from within a Tokio runtime, since they arm the timer.
pub struct AutosaveController<T: DiaryTransport, N: Navigator> {
    inner: Arc<Session<T, N>>,
}

impl<T: DiaryTransport, N: Navigator> AutosaveController<T, N> {
    pub fn new(transport: T, navigator: N, draft: Draft, delay: Duration) -> Self {
        let (status, _) = watch::channel(SaveStatus::Saved);

        let inner = Arc::new(Session {
            transport,
            navigator,
            state: Mutex::new(SessionState {
                draft,
                revision: 0,
                debounce: Debouncer::new(delay),
                queued_autosaves: 0,
                manual_save_running: false,
                closed: false,
            }),
            status,
            save_lock: tokio::sync::Mutex::new(()),
        });

        Self { inner }
    }

    /// Blank draft dated today in Asia/Colombo.
    pub fn new_entry(transport: T, navigator: N, delay: Duration) -> Self {
        Self::new(transport, navigator, Draft::blank(today_in_target_zone()), delay)
    }

    /// Loads an existing entry as the baseline draft.
    pub async fn open(
        transport: T,
        navigator: N,
        id: DiaryId,
        delay: Duration,
    ) -> Result<Self, ClientError> {
        let entry = transport.fetch(id).await.map_err(|e| {
            tracing::warn!(diary_id = %id, error = %e, "Failed to load diary entry");
            e
        })?;

        Ok(Self::new(transport, navigator, Draft::from_entry(&entry), delay))
    }

    pub fn draft(&self) -> Draft {
        self.inner.lock().draft.clone()
    }

    pub fn id(&self) -> Option<DiaryId> {
        self.inner.lock().draft.id()
    }

    pub fn status(&self) -> SaveStatus {
        *self.inner.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.inner.status.subscribe()
    }

    pub fn has_pending_save(&self) -> bool {
        self.inner.lock().debounce.is_pending()
    }

    /// A manual save is running (the save button is disabled).
    pub fn is_saving(&self) -> bool {
        self.inner.lock().manual_save_running
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.edit(Edit::Title(title.into()));
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.edit(Edit::Content(content.into()));
    }

    pub fn set_date(&self, date: chrono::NaiveDate) {
        self.edit(Edit::Date(date));
    }

    pub fn edit(&self, edit: Edit) {
        let mut state = self.inner.lock();
        if state.closed {
            tracing::debug!("Edit ignored: session closed");
            return;
        }
        if !state.draft.apply(edit) {
            return;
        }

        state.revision += 1;
        self.inner.set_status(SaveStatus::Unsaved);

        if !state.draft.has_title() {
            tracing::debug!(revision = state.revision, "Autosave not scheduled: title is empty");
            return;
        }

        self.inner.arm(&mut state);
    }

    /// Validates, saves the draft and exits to the entry list.
    ///
    /// On failure the draft is kept and the caller shows the error. A session
    /// that is already closed neither saves nor navigates.
    pub async fn save_and_exit(&self) -> Result<DiaryId, ClientError> {
        {
            let mut state = self.inner.lock();
            if state.closed {
                return Err(ClientError::SessionClosed);
            }
            if !state.draft.has_title() {
                return Err(ClientError::Validation("Please enter a title".to_string()));
            }
            if state.manual_save_running {
                return Err(ClientError::SaveInProgress);
            }
            state.manual_save_running = true;
            if state.debounce.cancel() {
                tracing::debug!("Pending autosave cancelled by manual save");
            }
        }

        let result = self.inner.dispatch().await;
        self.inner.lock().manual_save_running = false;

        match result {
            Ok(saved) => {
                self.inner.settle(saved.revision);
                if self.inner.lock().closed {
                    tracing::debug!(diary_id = %saved.id, "Editor closed during manual save");
                } else {
                    self.inner.navigator.exit_to_list();
                }
                Ok(saved.id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Manual save failed");
                self.inner.set_status(SaveStatus::Unsaved);
                Err(e)
            }
        }
    }

    /// Ends the session: cancels the pending save and ignores further edits.
    pub fn close(&self) {
        let mut state = self.inner.lock();
        state.closed = true;
        if state.debounce.cancel() {
            tracing::debug!("Pending autosave cancelled on close");
        }
    }
}

impl<T: DiaryTransport, N: Navigator> Drop for AutosaveController<T, N> {
    fn drop(&mut self) {
        self.close();
    }
}
