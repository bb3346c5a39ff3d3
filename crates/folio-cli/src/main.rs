use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_core::config_file::{self, ConfigFile};
use folio_core::{HistoryRecord, HistoryStore, RawDocument, SqliteHistoryStore};
use folio_ingest::{IngestError, Pipeline, ResumeHandler};

mod output;

use output::ColorMode;

/// Folio - Turn resumes into structured portfolio records
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log extraction details to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the history database (overrides FOLIO_HISTORY_PATH and config)
    #[arg(long, global = true)]
    history_db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a portfolio from a PDF, DOCX, or plain-text resume
    Parse {
        /// Path to the resume file
        file_path: PathBuf,

        /// Email used when the resume contains none
        #[arg(long)]
        email: Option<String>,

        /// Print the portfolio record as JSON
        #[arg(long)]
        json: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save a summary of the result to the history database
        #[arg(long, requires = "user_id")]
        save: bool,

        /// User the saved history entry belongs to
        #[arg(long)]
        user_id: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Handle a JSON action request (inline JSON or a path to a JSON file)
    Request {
        input: String,
    },

    /// Inspect or edit saved portfolio history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List a user's saved portfolios, newest first
    List {
        #[arg(long)]
        user_id: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Delete one saved portfolio
    Delete {
        #[arg(long)]
        user_id: String,
        portfolio_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config_file::load_config();

    match cli.command {
        Command::Parse {
            file_path,
            email,
            json,
            output,
            save,
            user_id,
            no_color,
        } => {
            let store = if save {
                Some(open_store(cli.history_db, &config)?)
            } else {
                None
            };
            parse(
                &file_path,
                email,
                json,
                output,
                store.as_deref().zip(user_id.as_deref()),
                ColorMode(!no_color && output_is_tty()),
                &config,
            )
        }
        Command::Request { input } => {
            let store = open_store(cli.history_db, &config)?;
            request(&input, store, &config)
        }
        Command::History { action } => {
            let store = open_store(cli.history_db, &config)?;
            match action {
                HistoryCommand::List { user_id, no_color } => {
                    let records = store.list(&user_id)?;
                    let color = ColorMode(!no_color && output_is_tty());
                    output::print_history(&mut std::io::stdout(), &records, color)?;
                    Ok(())
                }
                HistoryCommand::Delete {
                    user_id,
                    portfolio_id,
                } => {
                    if !store.delete(&user_id, &portfolio_id)? {
                        anyhow::bail!("No portfolio {} for user {}", portfolio_id, user_id);
                    }
                    println!("Deleted portfolio {}", portfolio_id);
                    Ok(())
                }
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, raised by each `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

/// Resolve the history database: flag > FOLIO_HISTORY_PATH > config > platform default.
fn open_store(flag: Option<PathBuf>, config: &ConfigFile) -> anyhow::Result<Arc<SqliteHistoryStore>> {
    let path = flag
        .or_else(|| std::env::var("FOLIO_HISTORY_PATH").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .storage
                .as_ref()
                .and_then(|s| s.history_path.as_ref())
                .map(PathBuf::from)
        })
        .or_else(config_file::default_history_path);
    let Some(path) = path else {
        anyhow::bail!("No history database location; pass --history-db or set FOLIO_HISTORY_PATH");
    };
    tracing::debug!(path = %path.display(), "opening history database");
    Ok(Arc::new(SqliteHistoryStore::open(&path)?))
}

fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        _ => "text/plain",
    }
}

fn parse(
    file_path: &Path,
    email: Option<String>,
    json: bool,
    output: Option<PathBuf>,
    save_to: Option<(&SqliteHistoryStore, &str)>,
    color: ColorMode,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume")
        .to_string();
    let bytes = std::fs::read(file_path)?;
    let mut doc = RawDocument::new(bytes, file_name.clone(), "");
    doc.content_type = content_type_for(&doc.extension()).to_string();

    let pipeline = Pipeline::from_config(config)?;
    let result = match pipeline.run(&doc, email.as_deref()) {
        Ok(result) => result,
        Err(IngestError::UnreadableDocument { reason, .. }) => {
            anyhow::bail!(
                "Could not extract readable text from {} ({}). \
                 If it is a scanned PDF, try a text-based PDF or a Word document (.docx).",
                file_name,
                reason
            );
        }
        Err(e) => return Err(e.into()),
    };

    let color = if output.is_some() { ColorMode(false) } else { color };
    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    if json {
        serde_json::to_writer_pretty(&mut writer, &result.record)?;
        writeln!(writer)?;
    } else {
        output::print_extraction_summary(&mut writer, &file_name, &result.text, color)?;
        output::print_portfolio(&mut writer, &result.record, color)?;
    }

    if let Some((store, user_id)) = save_to {
        let entry = HistoryRecord::new(
            user_id,
            email.as_deref().unwrap_or(""),
            &file_name,
            result.text.method,
            &result.record,
        );
        store.save(&entry)?;
        eprintln!("Saved portfolio {}", entry.portfolio_id);
    }
    Ok(())
}

fn request(input: &str, store: Arc<SqliteHistoryStore>, config: &ConfigFile) -> anyhow::Result<()> {
    let body = if Path::new(input).is_file() {
        std::fs::read_to_string(input)?
    } else {
        input.to_string()
    };

    let handler = ResumeHandler::new(Pipeline::from_config(config)?, store);
    let response = handler.handle_json(&body);
    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.status_code != 200 {
        anyhow::bail!("request failed with status {}", response.status_code);
    }
    Ok(())
}
