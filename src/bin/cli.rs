//! Command-line client for article-graph.
//!
//! Runs GraphQL documents against the configured upstream without starting
//! the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Execute a query
//! cargo run --bin article-graph-cli -- query '{ articles(limit: 3) { name title } }'
//!
//! # Execute a query from a file, with variables
//! cargo run --bin article-graph-cli -- query --file top.graphql --variables '{"n": 5}'
//!
//! # Print the schema as SDL
//! cargo run --bin article-graph-cli -- schema
//!
//! # Check that the upstream is reachable
//! cargo run --bin article-graph-cli -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `UPSTREAM_BASE_URL`, `UPSTREAM_TIMEOUT_SECONDS`,
//! `UPSTREAM_USER_AGENT`.

use article_graph::config::load_from_env;
use article_graph::prelude::*;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// CLI client for article-graph.
#[derive(Parser)]
#[command(name = "article-graph-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a GraphQL document and print the JSON response
    Query {
        /// The GraphQL document (omit when using --file)
        document: Option<String>,

        /// Read the document from a file
        #[arg(short, long, conflicts_with = "document")]
        file: Option<PathBuf>,

        /// Variables as a JSON object
        #[arg(short, long)]
        variables: Option<String>,

        /// Operation to run when the document has several
        #[arg(short, long)]
        operation_name: Option<String>,
    },

    /// Print the schema as SDL
    Schema,

    /// Fetch one upstream entry and report reachability
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            document,
            file,
            variables,
            operation_name,
        } => run_query(document, file, variables, operation_name).await?,
        Commands::Schema => print!("{}", Schema::build().sdl()),
        Commands::Check => check_upstream().await?,
    }

    Ok(())
}

fn upstream_client() -> Result<RedditClient> {
    let config = load_from_env()?;
    RedditClient::new(
        &config.upstream_base_url,
        config.upstream_timeout(),
        &config.upstream_user_agent,
    )
    .context("Failed to create upstream client")
}

/// Executes one document and prints the response.
///
/// Field errors are printed on stderr after the JSON; the exit status is
/// non-zero when the response carries any error.
async fn run_query(
    document: Option<String>,
    file: Option<PathBuf>,
    variables: Option<String>,
    operation_name: Option<String>,
) -> Result<()> {
    let query = match (document, file) {
        (Some(document), _) => document,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Provide a document or --file"),
    };

    let mut request = GraphQLRequest::new(query);
    if let Some(variables) = variables {
        let variables: Map<String, Value> =
            serde_json::from_str(&variables).context("--variables must be a JSON object")?;
        request = request.with_variables(variables);
    }
    if let Some(name) = operation_name {
        request = request.with_operation_name(name);
    }

    let executor = Executor::new(Arc::new(Schema::build()), Arc::new(upstream_client()?));
    let response = executor.execute(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_ok() {
        eprintln!();
        for error in &response.errors {
            eprintln!("{} {}", "✗".red().bold(), error.message.red());
        }
        bail!("{} error(s) in response", response.errors.len());
    }

    Ok(())
}

/// Performs a single `limit=1` fetch against the upstream.
async fn check_upstream() -> Result<()> {
    let client = upstream_client()?;
    let url = client.listing_url(&ListingQuery::new(Some(1), None, None))?;

    println!("{} {}", "Checking upstream:".bright_blue().bold(), url.as_str().cyan());

    match client.fetch_listing(&ListingQuery::new(Some(1), None, None)).await {
        Ok(entries) => {
            println!(
                "{} upstream reachable, {} entr{} returned",
                "✓".green().bold(),
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" }
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e.to_string().red());
            bail!("Upstream unavailable")
        }
    }
}
