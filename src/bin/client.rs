use anyhow::{Context, Result};
use clap::Parser;
use glossary_graph::rpc::types::{
    methods, AllTermsResponse, PathRequest, PathResponse, RelationsRequest, RelationsResponse,
    TermRequest, TermResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Parser, Debug)]
#[command(name = "glossary-client")]
#[command(about = "Walk through the glossary query service operations")]
struct Args {
    /// JSON-RPC endpoint
    #[arg(long, default_value = "http://127.0.0.1:50052/rpc")]
    url: String,

    /// Term to look up and list relations for
    #[arg(long, default_value = "Backend-Driven UI")]
    term: String,

    /// Path search start (repeatable, paired with --target)
    #[arg(long = "source", default_values_t = vec![
        "Подход к разработке интерфейса".to_string(),
        "Классическая разработка UI".to_string(),
    ])]
    sources: Vec<String>,

    /// Path search end (repeatable, paired with --source)
    #[arg(long = "target", default_values_t = vec![
        "Интерпретатор UI".to_string(),
        "Клиентский рендеринг".to_string(),
    ])]
    targets: Vec<String>,

    /// Depth bound for path searches
    #[arg(long, default_value_t = 10)]
    max_depth: i32,
}

/// Minimal JSON-RPC client over HTTP
struct RpcClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    next_id: AtomicI64,
}

impl RpcClient {
    fn new(url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            api_key,
            next_id: AtomicI64::new(1),
        }
    }

    async fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, params: P) -> Result<R> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: Value = request
            .send()
            .await
            .with_context(|| format!("{} request to {} failed", method, self.url))?
            .json()
            .await
            .with_context(|| format!("{} returned a non-JSON body", method))?;

        if let Some(error) = response.get("error") {
            anyhow::bail!(
                "{} - {}",
                error["code"],
                error["message"].as_str().unwrap_or("unknown error")
            );
        }

        let result = response
            .get("result")
            .cloned()
            .context("response has neither result nor error")?;
        serde_json::from_value(result).with_context(|| format!("Unexpected {} result shape", method))
    }
}

fn section(title: &str) {
    println!("{}", title);
    println!("{:-<60}", "");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();

    let args = Args::parse();
    let _ = dotenv::dotenv();
    let client = RpcClient::new(args.url.clone(), std::env::var("GLOSSARY_API_KEY").ok());

    println!("{:=<60}", "");
    println!("Glossary query service client");
    println!("{:=<60}", "");
    println!();

    section("1. All terms:");
    match client.call::<_, AllTermsResponse>(methods::GET_ALL_TERMS, json!({})).await {
        Ok(response) => {
            println!("Total terms: {}", response.total_count);
            println!("First 5 terms:");
            for (i, term) in response.terms.iter().take(5).enumerate() {
                println!("  {}. {}", i + 1, term.name);
            }
        }
        Err(e) => println!("Error: {:#}", e),
    }
    println!();

    section("2. Term lookup:");
    let request = TermRequest {
        term_name: args.term.clone(),
    };
    match client.call::<_, TermResponse>(methods::GET_TERM, request).await {
        Ok(TermResponse { term: Some(term), found: true }) => {
            println!("Term: {}", term.name);
            println!("Definition: {}", term.definition);
        }
        Ok(_) => println!("Term '{}' not found", args.term),
        Err(e) => println!("Error: {:#}", e),
    }
    println!();

    section("3. Term relations:");
    let request = RelationsRequest {
        term_name: args.term.clone(),
        max_depth: 1,
    };
    match client.call::<_, RelationsResponse>(methods::GET_TERM_RELATIONS, request).await {
        Ok(response) => {
            println!("Term: {}", args.term);
            println!("Total relations: {}", response.total_count);
            println!("Relations:");
            for relation in &response.relations {
                println!(
                    "  {} --[{}]--> {}",
                    relation.source_term, relation.relation_type, relation.target_term
                );
            }
        }
        Err(e) => println!("Error: {:#}", e),
    }
    println!();

    if args.sources.len() != args.targets.len() {
        log::warn!(
            "{} --source values but {} --target values; extra values are ignored",
            args.sources.len(),
            args.targets.len()
        );
    }

    for (i, (source, target)) in args.sources.iter().zip(&args.targets).enumerate() {
        section(&format!("{}. Path search:", i + 4));
        let request = PathRequest {
            source_term: source.clone(),
            target_term: target.clone(),
            max_depth: args.max_depth,
        };
        match client.call::<_, PathResponse>(methods::FIND_PATH, request).await {
            Ok(response) if response.path_exists => {
                println!("Path from '{}' to '{}':", source, target);
                println!("{}", response.path.join(" -> "));
            }
            Ok(response) => println!("No path: {}", response.message),
            Err(e) => println!("Error: {:#}", e),
        }
        println!();
    }

    Ok(())
}
