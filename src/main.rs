use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glossary_graph::rpc::{GlossaryService, HttpServer, StdioServer};
use glossary_graph::{load_graph, Config};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "glossary-graph")]
#[command(about = "Glossary term graph query service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (overrides GLOSSARY_CONFIG and ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Terms table (CSV with term,definition)
    #[arg(long, global = true)]
    terms: Option<PathBuf>,

    /// Relations table (CSV with source,target,relation)
    #[arg(long, global = true)]
    links: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve JSON-RPC over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve newline-delimited JSON-RPC over stdin/stdout
    ServeStdio,
    /// Load the input tables, report counts and exit
    Verify,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Verify);

    let mut config = match &cli.config {
        Some(path) => {
            let _ = dotenv::dotenv();
            Config::from_file(path)?
        }
        None => Config::load()?,
    };
    if let Some(terms) = cli.terms {
        config.glossary.terms_path = terms;
    }
    if let Some(links) = cli.links {
        config.glossary.links_path = links;
    }
    if let Command::Serve { host, port } = &command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    config.validate()?;

    // Logs go to stderr so the stdio transport keeps stdout clean
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.glossary.log_level.as_str()),
    )
    .init();

    log::info!("Starting glossary-graph v{}", env!("CARGO_PKG_VERSION"));

    // The graph is fully built before any worker thread exists
    let (engine, report) = load_graph(config.terms_path(), config.links_path())
        .context("Failed to load glossary graph")?;

    match command {
        Command::Verify => {
            log::info!("Terms: {} ({})", report.term_count, report.terms_path.display());
            log::info!("Relations: {} ({})", report.relation_count, report.links_path.display());
            log::info!("terms sha256: {}", report.terms_sha256);
            log::info!("links sha256: {}", report.links_sha256);
            log::info!("Glossary graph verified");
            Ok(())
        }
        Command::Serve { .. } => {
            let service = GlossaryService::new(Arc::new(engine)).with_report(report);
            let server = HttpServer::from_config(service, &config)?;
            let addr = config.bind_addr();
            build_runtime(&config)?.block_on(server.run(&addr))?;
            Ok(())
        }
        Command::ServeStdio => {
            let service = GlossaryService::new(Arc::new(engine)).with_report(report);
            let server = StdioServer::new(service);
            build_runtime(&config)?.block_on(server.run())?;
            Ok(())
        }
    }
}

/// Fixed-size worker pool shared by every inbound query
fn build_runtime(config: &Config) -> Result<tokio::runtime::Runtime> {
    log::info!("Worker threads: {}", config.server.worker_threads);
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}
