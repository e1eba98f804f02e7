//! Command handlers for the surat CLI.
//!
//! Each handler is the desktop rendition of one UI action in the surat web
//! client: it runs the session gate, invokes the matching API function, and
//! prints the outcome. Handlers return `Result<(), String>` with a
//! user-facing message; `main` exits nonzero on error.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::api::surat;
use crate::api::types::{BerkasUpload, CreateSuratRequest, UpdateSuratRequest, UserResponse};
use crate::form::TanggalTerimaForm;
use crate::session::store::{self, ProfileStore, StoredProfile};
use crate::session::{GateState, SessionGate};
use crate::state::AppState;

/// Run the session gate for a protected command.
///
/// Every protected command evaluates the gate exactly once. An
/// unauthenticated resolution aborts with the login hint -- the CLI
/// rendition of the web client's redirect to the login view.
async fn require_session(state: &AppState) -> Result<UserResponse, String> {
    let mut gate = SessionGate::new();
    match gate.evaluate(state.api.as_ref(), &state.store).await {
        GateState::Authenticated(user) => Ok(user.clone()),
        _ => Err("Not logged in. Run `surat auth login <token>` first.".to_string()),
    }
}

/// Register a new incoming letter, optionally attaching a PDF.
pub async fn create(
    state: &AppState,
    nomor_surat: String,
    tanggal_terima: NaiveDate,
    pdf_path: Option<PathBuf>,
) -> Result<(), String> {
    require_session(state).await?;

    let pdf_file = match pdf_path {
        Some(path) => Some(read_pdf(&path).await?),
        None => None,
    };

    let request = CreateSuratRequest {
        nomor_surat,
        tanggal_terima,
    };

    let envelope = surat::create_surat(&state.api, &request, pdf_file)
        .await
        .map_err(|e| format!("Create failed: {}", e))?;

    log::info!("Letter registered: {}", request.nomor_surat);
    println!("{}", envelope.data.unwrap_or_else(|| "OK".to_string()));
    Ok(())
}

/// Search letters by number and year.
pub async fn search(
    state: &AppState,
    tahun: i32,
    nomor_surat: Option<String>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<(), String> {
    require_session(state).await?;

    let envelope = surat::search_surat(&state.api, tahun, nomor_surat.as_deref(), page, size)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;

    let rows = envelope.data.unwrap_or_default();
    if rows.is_empty() {
        println!("No letters found.");
    } else {
        for row in &rows {
            print_row(row.id_surat, &row.nomor_surat, row.tanggal_terima, row.is_arsip);
        }
    }
    if let Some(paging) = envelope.paging {
        println!(
            "Page {} of {} (size {})",
            paging.current_page + 1,
            paging.total_page,
            paging.size
        );
    }
    Ok(())
}

/// Show a single letter.
pub async fn get(state: &AppState, id_surat: i64) -> Result<(), String> {
    require_session(state).await?;

    let letter = surat::get_surat_by_id(&state.api, id_surat)
        .await
        .map_err(|e| format!("Fetch failed: {}", e))?;

    println!("Nomor surat   : {}", letter.nomor_surat);
    println!("Tanggal terima: {}", letter.tanggal_terima);
    println!(
        "Berkas        : {}",
        letter.berkas.as_deref().unwrap_or("-")
    );
    println!("Arsip         : {}", if letter.is_arsip { "yes" } else { "no" });
    Ok(())
}

/// Update a letter's fields and/or replace its attachment.
pub async fn update(
    state: &AppState,
    id_surat: i64,
    nomor_surat: Option<String>,
    tanggal_terima: Option<NaiveDate>,
    pdf_path: Option<PathBuf>,
) -> Result<(), String> {
    require_session(state).await?;

    let request = if nomor_surat.is_some() || tanggal_terima.is_some() {
        Some(UpdateSuratRequest {
            nomor_surat,
            tanggal_terima,
        })
    } else {
        None
    };

    let pdf_file = match pdf_path {
        Some(path) => Some(read_pdf(&path).await?),
        None => None,
    };

    let message = surat::update_surat(&state.api, id_surat, request.as_ref(), pdf_file)
        .await
        .map_err(|e| format!("Update failed: {}", e))?;

    log::info!("Letter {} updated", id_surat);
    println!("{}", message);
    Ok(())
}

/// Delete a letter.
pub async fn delete(state: &AppState, id_surat: i64) -> Result<(), String> {
    require_session(state).await?;

    let message = surat::delete_surat(&state.api, id_surat)
        .await
        .map_err(|e| format!("Delete failed: {}", e))?;

    log::info!("Letter {} deleted", id_surat);
    println!("{}", message);
    Ok(())
}

/// Attach a PDF to an existing letter.
pub async fn upload(state: &AppState, id_surat: i64, pdf_path: PathBuf) -> Result<(), String> {
    require_session(state).await?;

    let pdf_file = read_pdf(&pdf_path).await?;
    let message = surat::upload_berkas(&state.api, id_surat, pdf_file)
        .await
        .map_err(|e| format!("Upload failed: {}", e))?;

    log::info!("Attachment uploaded for letter {}", id_surat);
    println!("{}", message);
    Ok(())
}

/// Download a letter's attachment to disk.
pub async fn download(
    state: &AppState,
    id_surat: i64,
    output: Option<PathBuf>,
) -> Result<(), String> {
    require_session(state).await?;

    let bytes = surat::download_berkas(&state.api, id_surat)
        .await
        .map_err(|e| format!("Download failed: {}", e))?;

    let path = resolve_output_path(id_surat, output);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    log::info!("Attachment for letter {} saved ({} bytes)", id_surat, bytes.len());
    println!("Saved to {}", path.display());
    Ok(())
}

/// The incoming-letter date form: pick a receipt date.
///
/// Selecting a date triggers the background search refresh; the form does
/// not consume the result.
pub async fn masuk(state: &AppState, tanggal: Option<NaiveDate>) -> Result<(), String> {
    require_session(state).await?;

    let mut form = TanggalTerimaForm::new(state.api.clone());
    if let Some(date) = tanggal {
        if !form.select(date) {
            return Err(format!(
                "Receipt date {} is out of range (1900-01-01 through today)",
                date
            ));
        }
    }

    println!("Tanggal terima: {}", form.selected());
    Ok(())
}

/// Archive a batch of letters.
pub async fn archive(state: &AppState, list_id_surat: Vec<i64>) -> Result<(), String> {
    require_session(state).await?;

    if list_id_surat.is_empty() {
        return Err("No letter ids given".to_string());
    }

    let count = list_id_surat.len();
    let envelope = surat::archive_surat(&state.api, list_id_surat)
        .await
        .map_err(|e| format!("Archive failed: {}", e))?;

    log::info!("Archived {} letter(s)", count);
    println!("{}", envelope.data.unwrap_or_else(|| "OK".to_string()));
    Ok(())
}

/// Store an API token and verify it against the identity check.
pub async fn login(state: &AppState, token: String) -> Result<(), String> {
    // 1. Persist the token so future invocations pick it up
    store::store_token(&token).map_err(|e| format!("Failed to store token: {}", e))?;

    // 2. Use it for this invocation
    state.api.set_token(token).await;

    // 3. Verify via the session gate
    let mut gate = SessionGate::new();
    match gate.evaluate(state.api.as_ref(), &state.store).await {
        GateState::Authenticated(user) => {
            log::info!("Logged in as {}", user.nama_user);
            println!("Logged in as {} ({})", user.nama_user, user.bagian.nama_bagian);
            Ok(())
        }
        _ => {
            log::warn!("Token stored but the identity check did not pass");
            Err("Token stored, but the identity check failed. Check the token and the API URL.".to_string())
        }
    }
}

/// Clear the stored token and profile fields.
pub async fn logout(state: &AppState) -> Result<(), String> {
    state.api.clear_token().await;
    store::delete_token().map_err(|e| format!("Failed to clear token: {}", e))?;
    state
        .store
        .clear_profile()
        .map_err(|e| format!("Failed to clear profile: {}", e))?;

    log::info!("Logged out");
    println!("Logged out.");
    Ok(())
}

/// Show the profile of the current session.
pub async fn whoami(state: &AppState) -> Result<(), String> {
    let user = require_session(state).await?;
    let profile = StoredProfile::from_user(&user);

    println!("idUser      : {}", profile.id_user);
    println!("namaUser    : {}", profile.nama_user);
    println!("namaBagian  : {}", profile.nama_bagian);
    println!("namaKelompok: {}", profile.nama_kelompok);
    Ok(())
}

fn print_row(id_surat: i64, nomor_surat: &str, tanggal_terima: NaiveDate, is_arsip: bool) {
    println!(
        "{:>6}  {:<24}  {}  {}",
        id_surat,
        nomor_surat,
        tanggal_terima,
        if is_arsip { "[arsip]" } else { "" }
    );
}

/// Read a PDF from disk into an upload payload.
async fn read_pdf(path: &Path) -> Result<BerkasUpload, String> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(BerkasUpload {
        file_name: file_name_of(path),
        content,
    })
}

/// File name component of a path, falling back to a fixed name.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "berkas.pdf".to_string())
}

/// Output path for a downloaded attachment: the explicit path when given,
/// otherwise `surat-{id}.pdf` in the user's download directory (or the
/// working directory when none exists).
fn resolve_output_path(id_surat: i64, output: Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) => path,
        None => dirs::download_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("surat-{}.pdf", id_surat)),
    }
}
