//! astprinter CLI
//!
//! Parses one SQL statement and writes a debug pretty-print of the AST
//! plus the re-rendered SQL to stdout.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use sqlspan_core::ast::AstNode;
use sqlspan_core::dialect::GenericDialect;
use sqlspan_core::parser::Parser;

/// Parse an SQL statement and print its AST.
#[derive(ClapParser)]
#[command(name = "astprinter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input SQL file ("-" or omitted reads stdin).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let src = match &cli.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    debug!(bytes = src.len(), "read input");

    let mut parser = Parser::new(&src, &GenericDialect).context("tokenize error")?;
    let stmt = parser.parse_statement().context("parse error")?;

    println!("{stmt:#?}");
    println!("{}", stmt.to_sql_string());
    Ok(())
}
