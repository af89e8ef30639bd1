//! Meow-trition
//!
//! An MCP server for the cat food nutrition calculator.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use meowtrition::build_info;
use meowtrition::config::Config;
use meowtrition::mcp::MeowtritionService;
use meowtrition::session::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Log to stderr so stdout stays clean for MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_directive))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");
    tracing::info!(precision = config.precision, "configuration loaded");

    let service = MeowtritionService::new(SessionStore::new(), config.precision);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
