use crate::application::DiaryApp;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "diarist")]
#[command(about = "A file-backed diary with a small HTTP API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Add an entry (opens $EDITOR unless --content is given)
    New {
        /// Entry date (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Entry text
        #[arg(short, long)]
        content: Option<String>,
    },
    /// List months that have entries
    Months,
    /// List the entries of one month, newest first
    Entries {
        /// Four-digit year, e.g. 2025
        year: String,
        /// Two-digit month, e.g. 03
        month: String,
    },
    /// Recount every month and rewrite the month index
    Reindex,
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let app = DiaryApp::new()?;

        match cli.command {
            Some(Commands::New { date, content }) => {
                app.add_entry(date, content)?;
            }
            Some(Commands::Months) => app.print_months()?,
            Some(Commands::Entries { year, month }) => app.print_entries(&year, &month)?,
            Some(Commands::Reindex) => app.reindex()?,
            Some(Commands::Serve) | None => app.serve()?,
        }

        Ok(())
    }
}
