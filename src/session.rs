use crate::export::{ExportControl, Exporter};
use invoicer_edit::{Edit, EditError, SnapshotCell};
use invoicer_types::Invoice;
use std::sync::Arc;

/// One open invoice: its current snapshot and its export control.
#[derive(Debug)]
pub struct EditorSession {
    cell: SnapshotCell,
    export: Arc<ExportControl>,
}

impl EditorSession {
    pub fn new(invoice: Invoice, exporter: Exporter) -> Self {
        Self { cell: SnapshotCell::new(invoice), export: Arc::new(ExportControl::new(exporter)) }
    }

    pub fn snapshot(&self) -> Arc<Invoice> {
        self.cell.snapshot()
    }

    pub fn revision(&self) -> u64 {
        self.cell.revision()
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<Arc<Invoice>, EditError> {
        self.cell.apply(edit)
    }

    /// The control is shared so an export can run without holding the session.
    pub fn export_control(&self) -> Arc<ExportControl> {
        Arc::clone(&self.export)
    }
}
