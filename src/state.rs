use crate::config::Config;
use crate::error::PipelineError;
use crate::export::Exporter;
use crate::loader::{DemoLoader, InvoiceLoader, JsonFileLoader, LoadError};
use crate::session::EditorSession;
use invoicer_layout::DocumentLayout;
use invoicer_render_html::HtmlRenderer;
use invoicer_types::InvoiceId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

pub type SharedSession = Arc<Mutex<EditorSession>>;

/// Open sessions kept when no limit is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 256;

struct OpenSession {
    session: SharedSession,
    last_used: AtomicU64,
}

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Supplies the initial snapshot when an invoice is first opened
    pub loader: Arc<dyn InvoiceLoader>,

    /// Layout shared by the HTML and PDF views
    pub layout: Arc<DocumentLayout>,

    pub html: Arc<HtmlRenderer>,

    pub exporter: Exporter,

    /// Open invoices, keyed by id. The least recently used one is closed
    /// once `max_sessions` is reached.
    sessions: Arc<RwLock<HashMap<InvoiceId, OpenSession>>>,
    clock: Arc<AtomicU64>,
    max_sessions: usize,
}

impl AppState {
    pub fn new(loader: Arc<dyn InvoiceLoader>, layout: DocumentLayout) -> Result<Self, PipelineError> {
        let layout = Arc::new(layout);
        Ok(Self {
            loader,
            html: Arc::new(HtmlRenderer::new(Arc::clone(&layout))?),
            exporter: Exporter::new(Arc::clone(&layout)),
            layout,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(AtomicU64::new(0)),
            max_sessions: DEFAULT_MAX_SESSIONS,
        })
    }

    /// Builds the state described by `config`: the JSON loader when a data
    /// directory is configured, demo data otherwise.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let loader: Arc<dyn InvoiceLoader> = match &config.loader.data_dir {
            Some(dir) => {
                log::info!("Loading invoices from {}", dir.display());
                Arc::new(JsonFileLoader::new(dir))
            }
            None => {
                log::info!("No data directory configured, serving demo invoices");
                Arc::new(DemoLoader::new())
            }
        };
        Ok(Self::new(loader, DocumentLayout::new(config.document.page_size))?
            .with_max_sessions(config.sessions.max_open))
    }

    /// Caps the number of open sessions. At least one is always kept.
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max.max(1);
        self
    }

    /// Replaces the exporter handed to sessions opened from now on.
    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_open(&self, id: &InvoiceId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// The session for `id`, opening it through the loader on first use.
    pub async fn session(&self, id: &InvoiceId) -> Result<SharedSession, LoadError> {
        if let Some(open) = self.sessions.read().await.get(id) {
            open.last_used.store(self.tick(), Ordering::Relaxed);
            return Ok(Arc::clone(&open.session));
        }

        let mut sessions = self.sessions.write().await;
        if let Some(open) = sessions.get(id) {
            open.last_used.store(self.tick(), Ordering::Relaxed);
            return Ok(Arc::clone(&open.session));
        }
        let invoice = self.loader.get_invoice(id)?;

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, open)| open.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| id.clone());
            let Some(oldest) = oldest else { break };
            sessions.remove(&oldest);
            log::info!("Closed least recently used invoice '{}'", oldest);
        }

        log::info!("Opened invoice '{}' with {} line items", id, invoice.items.len());
        let session = Arc::new(Mutex::new(EditorSession::new(invoice, self.exporter.clone())));
        sessions.insert(
            id.clone(),
            OpenSession { session: Arc::clone(&session), last_used: AtomicU64::new(self.tick()) },
        );
        Ok(session)
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }
}
