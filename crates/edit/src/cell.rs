use crate::command::Edit;
use crate::error::EditError;
use invoicer_types::Invoice;
use std::sync::Arc;

/// Holds the one current snapshot of an invoice.
///
/// The only way to change it is [`SnapshotCell::apply`], which swaps in a new
/// `Arc`. Snapshots handed out earlier keep pointing at their own value, so an
/// export that took a snapshot never sees later edits.
#[derive(Debug, Clone)]
pub struct SnapshotCell {
    current: Arc<Invoice>,
    revision: u64,
}

impl SnapshotCell {
    pub fn new(invoice: Invoice) -> Self {
        Self { current: Arc::new(invoice), revision: 0 }
    }

    pub fn snapshot(&self) -> Arc<Invoice> {
        Arc::clone(&self.current)
    }

    pub fn current(&self) -> &Invoice {
        &self.current
    }

    /// Number of edits that changed the snapshot so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<Arc<Invoice>, EditError> {
        let next = edit.apply(&self.current)?;
        if next == *self.current {
            log::debug!("Edit on invoice '{}' changed nothing: {:?}", self.current.id, edit);
            return Ok(self.snapshot());
        }
        self.current = Arc::new(next);
        self.revision += 1;
        log::debug!("Invoice '{}' is now at revision {}", self.current.id, self.revision);
        Ok(self.snapshot())
    }
}
