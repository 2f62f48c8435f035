use crate::query::{self, PageView};
use crate::record::StudentRecord;
use crate::store::{RecordStore, StoreError};

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted { id: String },
    /// Confirm arrived with no delete pending; nothing happened.
    NothingPending,
    /// The store refused; the pending id is kept so the user can retry.
    Failed(StoreError),
}

/// Holds the roster view state: the cached record list, the search term, the
/// 1-based page, and the id awaiting delete confirmation. Deletion is a
/// two-step request/confirm exchange so a stray click never destroys a row.
#[derive(Debug, Default)]
pub struct ListController {
    records: Vec<StudentRecord>,
    search: String,
    page: usize,
    pending_delete: Option<String>,
}

impl ListController {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            search: String::new(),
            page: 1,
            pending_delete: None,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Re-fetch the full list from the store. Called on mount and after
    /// every create/update/delete.
    pub fn refresh(&mut self, store: &dyn RecordStore) -> Result<(), StoreError> {
        self.records = store.list()?;
        Ok(())
    }

    /// Every search change snaps back to page 1, as the original table does
    /// on each keystroke.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The current projection. Out-of-range pages clamp inside the query
    /// layer without mutating the held page number.
    pub fn view(&self) -> PageView {
        query::project(&self.records, &self.search, self.page)
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Execute the pending delete, then re-fetch and re-page: if the held
    /// page fell off the end of the shrunken roster, step back to the last
    /// page that still has content (never below 1).
    pub fn confirm_delete(&mut self, store: &mut dyn RecordStore) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        if let Err(e) = store.delete(&id) {
            self.pending_delete = Some(id);
            return DeleteOutcome::Failed(e);
        }
        // The row is gone even if the follow-up fetch fails; reporting that
        // as a failed delete would be a lie. Drop the row from the cached
        // list and let the next refresh reconcile the rest.
        if let Err(e) = self.refresh(store) {
            tracing::warn!(error = %e, "roster refresh after delete failed");
            self.records.retain(|r| r.id != id);
        }

        let view = self.view();
        if self.page > view.total_pages {
            self.page = view.total_pages.max(1);
        }
        DeleteOutcome::Deleted { id }
    }
}
