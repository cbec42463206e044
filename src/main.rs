use clap::{Parser, Subcommand};
use invoicer::{
    AppState, Config, Exporter,
    api::build_router,
    html::HtmlRenderer,
    layout::{DocumentLayout, InvoiceView, PageSize},
    loader::load_invoice_file,
    types::ViewMode,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "invoicer", version, about = "Edit invoices in the browser and export them as PDF")]
struct Cli {
    /// Config file, without the `.toml` suffix
    #[arg(long, env = "INVOICER_CONFIG", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP editor (the default)
    Serve,
    /// Render an invoice JSON file to HTML
    Render {
        file: PathBuf,
        /// `edit` or `preview`
        #[arg(long, default_value = "preview")]
        mode: String,
        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Export an invoice JSON file to PDF
    Export {
        file: PathBuf,
        /// Defaults to `invoice-<id>.pdf` in the current directory
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Overrides the configured page size (A4 or Letter)
        #[arg(long)]
        page_size: Option<PageSize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Render { file, mode, output } => {
            let invoice = load_invoice_file(&file)?;
            let layout = Arc::new(DocumentLayout::new(config.document.page_size));
            let view = InvoiceView::build(&invoice, &layout);
            let html = HtmlRenderer::new(layout)?.render(&view, ViewMode::from_query(Some(&mode)))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => println!("{}", html),
            }
            Ok(())
        }
        Command::Export { file, output, page_size } => {
            let invoice = load_invoice_file(&file)?;
            let page_size = page_size.unwrap_or(config.document.page_size);
            let exporter = Exporter::new(Arc::new(DocumentLayout::new(page_size)));
            let artifact = exporter.export(Arc::new(invoice)).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&artifact.filename));
            std::fs::write(&path, &artifact.bytes)?;
            tracing::info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting invoicer...");
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Invoicer listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET  /invoices/:id?mode=edit|preview");
    tracing::info!("  - GET  /invoices/:id/view");
    tracing::info!("  - POST /invoices/:id/edits");
    tracing::info!("  - POST /invoices/:id/export");
    tracing::info!("  - GET  /invoices/:id/export");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,invoicer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
