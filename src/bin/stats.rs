use anyhow::{Context, Result};
use clap::Parser;
use glossary_graph::{load_graph, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glossary-stats")]
#[command(about = "Print glossary graph statistics")]
struct Args {
    /// Terms table (defaults to config)
    #[arg(long)]
    terms: Option<PathBuf>,

    /// Relations table (defaults to config)
    #[arg(long)]
    links: Option<PathBuf>,

    /// Number of most connected terms to show
    #[arg(long, default_value_t = 5)]
    top: i32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.glossary.log_level.as_str()),
    )
    .init();

    let terms = args.terms.unwrap_or_else(|| config.glossary.terms_path.clone());
    let links = args.links.unwrap_or_else(|| config.glossary.links_path.clone());

    let (engine, _report) = load_graph(&terms, &links).context("Failed to load glossary graph")?;
    let stats = engine.stats(args.top);

    println!("\n{:=<60}", "");
    println!("Graph statistics:");
    println!("{:=<60}", "");
    println!("Total nodes (terms): {}", stats.node_count);
    println!("Total edges (relations): {}", stats.edge_count);
    println!("Average node degree: {:.2}", stats.average_degree);

    println!("\nTop {} most connected terms:", stats.top_connected.len());
    for top in &stats.top_connected {
        println!("  - {}: {} relations", top.name, top.degree);
    }

    println!("\nConnected components: {}", stats.component_count);
    if stats.is_connected {
        println!("  The graph is fully connected");
    } else {
        println!("  Largest component: {} nodes", stats.largest_component);
    }
    println!("{:=<60}\n", "");

    Ok(())
}
