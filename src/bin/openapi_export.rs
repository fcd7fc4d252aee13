use std::{fs, io::Write, path::PathBuf};

use clap::Parser;
use inventory_api::openapi::ApiDocV1;
use utoipa::OpenApi;

/// Dumps the inventory OpenAPI document
#[derive(Parser)]
#[command(name = "openapi-export", version, about)]
struct Cli {
    /// Destination file, or `-` for stdout
    #[arg(short, long, default_value = "openapi/inventory-api.v1.json")]
    output: PathBuf,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let openapi = ApiDocV1::openapi();
    let json = if cli.compact {
        serde_json::to_string(&openapi)?
    } else {
        serde_json::to_string_pretty(&openapi)?
    };

    if cli.output.as_os_str() == "-" {
        writeln!(std::io::stdout(), "{}", json)?;
        return Ok(());
    }

    if let Some(dir) = cli.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(&cli.output, json)?;

    eprintln!(
        "OpenAPI document ({} paths) written to {}",
        openapi.paths.paths.len(),
        cli.output.display()
    );
    Ok(())
}
