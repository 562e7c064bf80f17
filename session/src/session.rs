//! Edit session.

use editdata_commit::{
    CommitCoordinator, CommitSummary, EditConnection, EditState, InsertOutcome, SharedEditState,
};
use editdata_core::{ResultSetCache, RowId};
use editdata_edit::{EditCellResult, EditContext, EditRow, RowCreate, RowDelete, RowUpdate};
use editdata_metadata::{TableMetadata, TableMetadataProvider, TableRef};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::commit::CommitHandle;
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::query::{validate_for_session, CompletedQuery};
use crate::result::RowCreated;

/// An editable overlay over one materialized result set.
///
/// Edits are held in memory until [`commit_edits`](Self::commit_edits). The
/// session expects its mutating calls to be serialized by the caller. While a
/// commit is running they fail with [`SessionError::CommitInProgress`].
pub struct EditSession {
    context: Arc<EditContext>,
    state: SharedEditState,
    /// Id the next created row receives.
    next_row_id: RowId,
    commit_in_flight: Arc<AtomicBool>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("context", &self.context)
            .field("next_row_id", &self.next_row_id)
            .field("commit_in_flight", &self.commit_in_flight)
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Open a session over a result set whose table metadata is already known.
    pub fn new(
        result_set: Box<dyn ResultSetCache>,
        table: TableMetadata,
        config: SessionConfig,
    ) -> Self {
        let next_row_id = result_set.next_row_id();
        debug!(
            table = table.escaped_multipart_name(),
            rows = result_set.row_count(),
            "Edit session opened"
        );
        Self {
            context: Arc::new(EditContext::new(table, config.edit_options())),
            state: Arc::new(Mutex::new(EditState::new(result_set))),
            next_row_id,
            commit_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Open a session over a finished query, looking up `table`'s metadata
    /// and reconciling it with the columns the query returned.
    pub fn initialize<Q: CompletedQuery>(
        query: Q,
        provider: &dyn TableMetadataProvider,
        table: &TableRef,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        let result_set = validate_for_session(query)?;
        let metadata = provider
            .table_metadata(table)?
            .extend_with_result_columns(result_set.columns())?;
        Ok(Self::new(Box::new(result_set), metadata, config))
    }

    /// Metadata of the table being edited.
    pub fn table(&self) -> &TableMetadata {
        &self.context.table
    }

    /// Number of live rows in the result set.
    pub fn row_count(&self) -> u64 {
        self.state.lock().result_set.row_count()
    }

    /// Number of rows with a pending edit.
    pub fn pending_edit_count(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Whether `row_id` has a pending edit. Negative ids never do.
    pub fn has_pending_edit(&self, row_id: i64) -> bool {
        RowId::from_signed(row_id).is_some_and(|id| self.state.lock().cache.contains(id))
    }

    /// Whether a commit is running.
    pub fn is_committing(&self) -> bool {
        self.commit_in_flight.load(Ordering::Acquire)
    }

    /// Add a new row. It exists only as a pending edit until committed.
    pub fn create_row(&mut self) -> SessionResult<RowCreated> {
        self.ensure_idle()?;
        let row_id = self.next_row_id;
        let create = RowCreate::new(row_id, self.context.clone());
        let default_values = create.default_values();

        if let InsertOutcome::Occupied(_) = self.state.lock().cache.try_insert(create.into()) {
            return Err(SessionError::EditExists { row_id });
        }
        self.next_row_id = row_id.next();

        debug!(row_id = %row_id, "Row created");
        Ok(RowCreated {
            new_row_id: row_id,
            default_values,
        })
    }

    /// Mark a stored row for deletion.
    pub fn delete_row(&mut self, row_id: i64) -> SessionResult<()> {
        self.ensure_idle()?;
        let mut state = self.state.lock();
        let EditState { cache, result_set } = &mut *state;

        let original = RowId::from_signed(row_id)
            .and_then(|id| result_set.get_row(id))
            .ok_or(SessionError::RowOutOfRange { row_id })?;
        let id = original.id;

        if let InsertOutcome::Occupied(_) =
            cache.try_insert(RowDelete::new(self.context.clone(), original).into())
        {
            return Err(SessionError::EditExists { row_id: id });
        }

        debug!(row_id = %id, "Row marked for deletion");
        Ok(())
    }

    /// Discard the pending edit of a row.
    pub fn revert_row(&mut self, row_id: i64) -> SessionResult<()> {
        self.ensure_idle()?;
        let id = RowId::from_signed(row_id).ok_or(SessionError::RowOutOfRange { row_id })?;
        let removed = self.state.lock().cache.remove(id);
        match removed {
            Some(record) => {
                debug!(row_id = %id, kind = ?record.kind(), "Row reverted");
                Ok(())
            }
            None => Err(SessionError::NoPendingEdit { row_id: id }),
        }
    }

    /// Set one cell from client text.
    ///
    /// The first edit of a stored row snapshots it into a pending update.
    pub fn update_cell(
        &mut self,
        row_id: i64,
        ordinal: usize,
        text: &str,
    ) -> SessionResult<EditCellResult> {
        self.ensure_idle()?;
        let id = self.row_in_range(row_id)?;
        let mut state = self.state.lock();
        let EditState { cache, result_set } = &mut *state;

        if let Some(record) = cache.get_mut(id) {
            let result = record.set_cell(ordinal, text)?;
            if record.is_redundant() {
                cache.remove(id);
            }
            debug!(row_id = %id, ordinal, "Cell updated");
            return Ok(result);
        }

        let original = result_set
            .get_row(id)
            .ok_or(SessionError::RowOutOfRange { row_id })?;
        let mut update = RowUpdate::new(self.context.clone(), original);
        let result = update.set_cell(ordinal, text)?;
        if update.has_changes() {
            if let InsertOutcome::Occupied(_) = cache.try_insert(update.into()) {
                return Err(SessionError::EditExists { row_id: id });
            }
        }

        debug!(row_id = %id, ordinal, "Cell updated");
        Ok(result)
    }

    /// Undo the pending change to one cell.
    pub fn revert_cell(&mut self, row_id: i64, ordinal: usize) -> SessionResult<EditCellResult> {
        self.ensure_idle()?;
        let id = RowId::from_signed(row_id).ok_or(SessionError::RowOutOfRange { row_id })?;
        let mut state = self.state.lock();
        let record = state
            .cache
            .get_mut(id)
            .ok_or(SessionError::NoPendingEdit { row_id: id })?;

        let result = record.revert_cell(ordinal)?;
        if record.is_redundant() {
            state.cache.remove(id);
        }
        debug!(row_id = %id, ordinal, "Cell reverted");
        Ok(result)
    }

    /// Rows `start..start + count` as the client sees them: stored rows in id
    /// order, then rows pending creation, each merged with its pending edit.
    pub fn get_rows(&self, start: usize, count: usize) -> Vec<EditRow> {
        let state = self.state.lock();
        let created = state.cache.created_row_ids();
        state
            .result_set
            .row_ids()
            .into_iter()
            .chain(created)
            .skip(start)
            .take(count)
            .filter_map(|id| match state.cache.get(id) {
                Some(record) => Some(record.edit_row()),
                None => state.result_set.get_row(id).map(|row| EditRow::clean(&row)),
            })
            .collect()
    }

    /// Write every pending edit as literal SQL, one statement per line, in
    /// commit order. Nothing is written if any edit fails to script.
    pub fn script_edits(&self, output_path: impl AsRef<Path>) -> SessionResult<PathBuf> {
        let path = output_path.as_ref();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(SessionError::invalid_argument(
                "output_path",
                "must not be blank",
            ));
        }

        let script = {
            let state = self.state.lock();
            let mut script = String::new();
            for record in state.cache.commit_order() {
                script.push_str(&record.build_script()?);
                script.push('\n');
            }
            script
        };

        std::fs::write(path, script)?;
        debug!(path = %path.display(), "Edits scripted");
        Ok(path.to_path_buf())
    }

    /// Start applying every pending edit to the database.
    ///
    /// Returns as soon as the commit is spawned on the current tokio runtime.
    /// Exactly one of the callbacks runs when it ends. A failed commit leaves
    /// the failing edit and every edit after it pending; edits applied before
    /// the failure stay applied.
    ///
    /// Until the commit and its callback finish, every mutating call fails
    /// with [`SessionError::CommitInProgress`].
    pub fn commit_edits<S, F>(
        &self,
        connection: Arc<dyn EditConnection>,
        on_success: S,
        on_failure: F,
    ) -> SessionResult<CommitHandle>
    where
        S: FnOnce(CommitSummary) + Send + 'static,
        F: FnOnce(SessionError) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        if self
            .commit_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::CommitInProgress);
        }

        let in_flight = InFlight(self.commit_in_flight.clone());
        let coordinator = CommitCoordinator::new(self.state.clone());
        let task = runtime.spawn(async move {
            let _in_flight = in_flight;
            match coordinator.run(connection.as_ref()).await {
                Ok(summary) => on_success(summary),
                Err(error) => on_failure(error.into()),
            }
        });

        Ok(CommitHandle::new(task))
    }

    /// Close the session. A running commit finishes and still reports.
    pub fn dispose(self) {
        let pending = self.pending_edit_count();
        debug!(
            pending,
            committing = self.is_committing(),
            "Edit session disposed"
        );
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.is_committing() {
            return Err(SessionError::CommitInProgress);
        }
        Ok(())
    }

    fn row_in_range(&self, row_id: i64) -> SessionResult<RowId> {
        RowId::from_signed(row_id)
            .filter(|id| *id < self.next_row_id)
            .ok_or(SessionError::RowOutOfRange { row_id })
    }
}

/// Clears the in-flight flag when the commit task ends, callback included.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
