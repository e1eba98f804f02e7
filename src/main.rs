mod api;
mod commands;
mod form;
mod session;
mod state;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use state::AppState;

#[derive(Parser)]
#[command(name = "surat", about = "Desktop client for the surat management API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new incoming letter
    Create {
        /// Letter number, e.g. 005/SEKRE/X/2024
        #[arg(long)]
        nomor: String,
        /// Receipt date (YYYY-MM-DD)
        #[arg(long)]
        tanggal: NaiveDate,
        /// PDF attachment to upload with the letter
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Search letters by number and year
    Search {
        #[arg(long)]
        tahun: i32,
        /// Letter number filter
        #[arg(long)]
        nomor: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Show a single letter
    Get { id_surat: i64 },
    /// Update a letter's fields and/or replace its attachment
    Update {
        id_surat: i64,
        #[arg(long)]
        nomor: Option<String>,
        #[arg(long)]
        tanggal: Option<NaiveDate>,
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Delete a letter
    Delete { id_surat: i64 },
    /// Attach a PDF to an existing letter
    Upload { id_surat: i64, pdf: PathBuf },
    /// Download a letter's attachment
    Download {
        id_surat: i64,
        /// Output file (defaults into the download directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Incoming-letter view: pick a receipt date
    Masuk {
        /// Receipt date to select (defaults to today)
        #[arg(long)]
        tanggal: Option<NaiveDate>,
    },
    /// Archive letters by id
    Archive { id_surat: Vec<i64> },
    /// Manage the stored session
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Store an API token and verify it
    Login { token: String },
    /// Clear the stored token and profile
    Logout,
    /// Show the current session's profile
    Whoami,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    // API base URL: SURAT_API_URL > localhost default
    let api_base_url =
        std::env::var("SURAT_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let state = AppState::new(&api_base_url);

    // Pick up a previously stored token, if any
    match session::store::get_token() {
        Ok(Some(token)) => state.api.set_token(token).await,
        Ok(None) => {}
        Err(e) => log::warn!("Failed to read token from keyring: {}", e),
    }

    let result = match cli.command {
        Command::Create { nomor, tanggal, pdf } => {
            commands::create(&state, nomor, tanggal, pdf).await
        }
        Command::Search {
            tahun,
            nomor,
            page,
            size,
        } => commands::search(&state, tahun, nomor, page, size).await,
        Command::Get { id_surat } => commands::get(&state, id_surat).await,
        Command::Update {
            id_surat,
            nomor,
            tanggal,
            pdf,
        } => commands::update(&state, id_surat, nomor, tanggal, pdf).await,
        Command::Delete { id_surat } => commands::delete(&state, id_surat).await,
        Command::Upload { id_surat, pdf } => commands::upload(&state, id_surat, pdf).await,
        Command::Download { id_surat, output } => {
            commands::download(&state, id_surat, output).await
        }
        Command::Masuk { tanggal } => commands::masuk(&state, tanggal).await,
        Command::Archive { id_surat } => commands::archive(&state, id_surat).await,
        Command::Auth(AuthCommand::Login { token }) => commands::login(&state, token).await,
        Command::Auth(AuthCommand::Logout) => commands::logout(&state).await,
        Command::Auth(AuthCommand::Whoami) => commands::whoami(&state).await,
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
