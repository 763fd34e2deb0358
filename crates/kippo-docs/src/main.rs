//! kippo-docs CLI - documentation builder with highlighted, copyable code blocks.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "kippo-docs")]
#[command(about = "Documentation builder with highlighted, copyable code blocks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build static documentation site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview built documentation
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Render one file as a code block to stdout
    Highlight {
        /// Source file
        file: PathBuf,

        /// Language tag (defaults to one guessed from the file extension)
        #[arg(short, long)]
        language: Option<String>,

        /// Theme name (defaults to config)
        #[arg(long)]
        theme: Option<String>,

        /// Hide the line-number gutter
        #[arg(long)]
        no_line_numbers: bool,

        /// Show the file name in the header instead of the language label
        #[arg(long)]
        filename: bool,
    },

    /// Copy a file's contents to the system clipboard
    Copy {
        /// Source file
        file: PathBuf,
    },

    /// List known language tags
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            let config = ConfigFile::load(&cli.config)?;
            commands::build::run(config.build_config(output, minify)).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(port, dir, !no_open).await?;
        }
        Commands::Highlight {
            file,
            language,
            theme,
            no_line_numbers,
            filename,
        } => {
            let config = ConfigFile::load(&cli.config)?;
            let options = commands::highlight::HighlightOptions {
                language,
                theme: theme.unwrap_or(config.highlight.theme),
                line_numbers: !no_line_numbers && config.highlight.line_numbers,
                filename,
            };
            commands::highlight::run(file, options).await?;
        }
        Commands::Copy { file } => {
            commands::copy::run(file).await?;
        }
        Commands::Languages => {
            commands::languages::run();
        }
    }

    Ok(())
}
