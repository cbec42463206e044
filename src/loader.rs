//! Sources of initial invoice snapshots.
//!
//! A loader hands out a fresh, validated [`Invoice`] for an id. Nothing is
//! written back: edits live in the editor session only.

use chrono::{Local, NaiveDate};
use invoicer_types::{Brand, Invoice, InvoiceId, InvoiceStatus, LineItem, ModelError, Party};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invoice '{0}' not found")]
    NotFound(String),

    #[error("Invalid invoice id '{0}'")]
    InvalidId(String),

    #[error("Invoice file '{path}' names id '{found}', expected '{expected}'")]
    IdMismatch { path: PathBuf, expected: String, found: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invoice is invalid: {0}")]
    Model(#[from] ModelError),
}

/// Supplies the initial snapshot for an invoice id.
pub trait InvoiceLoader: Send + Sync {
    fn get_invoice(&self, id: &InvoiceId) -> Result<Invoice, LoadError>;
}

/// Serves the same demo invoice for every id, dated today unless pinned.
#[derive(Debug, Clone, Default)]
pub struct DemoLoader {
    date: Option<NaiveDate>,
}

impl DemoLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the invoice date, for reproducible output.
    pub fn with_date(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }
}

impl InvoiceLoader for DemoLoader {
    fn get_invoice(&self, id: &InvoiceId) -> Result<Invoice, LoadError> {
        check_id(id)?;
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let invoice = demo_invoice(id.clone(), date);
        invoice.validate()?;
        Ok(invoice)
    }
}

/// The demo data: one sender, a placeholder client and two billed lines.
pub fn demo_invoice(id: InvoiceId, date: NaiveDate) -> Invoice {
    Invoice {
        id,
        title: "Invoice".to_string(),
        number: "INV0001".to_string(),
        date: Some(date),
        status: InvoiceStatus::Draft,
        from: Party {
            name: "IndyDevLab".to_string(),
            email: Some("hello@indylab.dev".to_string()),
            address: Some("6202 Old W Blvd, Phoenix, AZ".to_string()),
            phone: Some("702-555-0179".to_string()),
        },
        bill_to: Party {
            name: "Client Name".to_string(),
            email: Some(String::new()),
            address: Some(String::new()),
            phone: Some(String::new()),
        },
        items: vec![
            LineItem::new("i1", "Design work", 120.0, 10.0),
            LineItem::new("i2", "Development", 140.0, 20.0),
        ],
        notes: Some(String::new()),
        tax_percent: Some(0.0),
        currency: Some("USD".to_string()),
        logo_url: None,
        brand: Some(Brand { name: Some("Invoice Simple Clone".to_string()) }),
    }
}

/// Reads `<dir>/<id>.json` files in the invoice JSON shape.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    dir: PathBuf,
}

impl JsonFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &InvoiceId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }
}

impl InvoiceLoader for JsonFileLoader {
    fn get_invoice(&self, id: &InvoiceId) -> Result<Invoice, LoadError> {
        check_id(id)?;
        let path = self.path_for(id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(id.to_string()));
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };
        let invoice = parse_invoice(&raw, &path)?;
        if &invoice.id != id {
            return Err(LoadError::IdMismatch {
                path,
                expected: id.to_string(),
                found: invoice.id.to_string(),
            });
        }
        log::debug!("Loaded invoice '{}' from {}", id, path.display());
        Ok(invoice)
    }
}

/// Parses and validates one invoice document.
pub fn parse_invoice(raw: &str, path: &Path) -> Result<Invoice, LoadError> {
    let invoice: Invoice = serde_json::from_str(raw)
        .map_err(|source| LoadError::Json { path: path.to_path_buf(), source })?;
    invoice.validate()?;
    Ok(invoice)
}

/// Reads and validates an invoice file, whatever its id.
pub fn load_invoice_file(path: &Path) -> Result<Invoice, LoadError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    parse_invoice(&raw, path)
}

// Ids double as file names, so only a conservative character set is allowed.
fn check_id(id: &InvoiceId) -> Result<(), LoadError> {
    let raw = id.as_str();
    let valid = !raw.is_empty()
        && !raw.starts_with('.')
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid { Ok(()) } else { Err(LoadError::InvalidId(raw.to_string())) }
}
