//! Letter operations against the surat management backend.
//!
//! One async function per backend endpoint. Every function either returns
//! the unwrapped success payload or fails with the server-reported error
//! payload. Some endpoints hand back the full envelope (the caller needs the
//! paging block), others only the inner payload; the split follows the
//! backend's existing contract and is not unified here.

use chrono::NaiveDate;
use reqwest::multipart;
use serde::Serialize;

use super::client::ApiClient;
use super::error::{read_envelope, ApiError};
use super::types::{
    ArchiveSuratsRequest, BerkasUpload, CreateSuratRequest, ForListSuratResponse, SuratResponse,
    UpdateSuratRequest, WebResponse,
};

/// Register a new letter, optionally with a PDF attachment.
///
/// POST /api/surat with a multipart body: `data` JSON part plus an optional
/// `pdfFile` part.
pub async fn create_surat(
    client: &ApiClient,
    request: &CreateSuratRequest,
    pdf_file: Option<BerkasUpload>,
) -> Result<WebResponse<String>, ApiError> {
    let form = surat_form(Some(request), pdf_file)?;
    let response = client.post_multipart("/api/surat", form).await?;
    read_envelope(response).await
}

/// Search letters by number and year.
///
/// GET /api/surat with `nomorSurat`, `tahun`, `page`, `size` query
/// parameters. An absent number searches all letters of the year; paging
/// defaults to page 0, size 20.
pub async fn search_surat(
    client: &ApiClient,
    tahun: i32,
    nomor_surat: Option<&str>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<WebResponse<Vec<ForListSuratResponse>>, ApiError> {
    let query = search_query(tahun, nomor_surat, page, size);
    let response = client.get(&format!("/api/surat?{}", query)).await?;
    read_envelope(response).await
}

/// Fetch a single letter by its identifier.
pub async fn get_surat_by_id(
    client: &ApiClient,
    id_surat: i64,
) -> Result<SuratResponse, ApiError> {
    let response = client.get(&format!("/api/surat/{}", id_surat)).await?;
    read_envelope::<SuratResponse>(response).await?.into_data()
}

/// Update a letter's fields and/or replace its attachment.
///
/// POST /api/surat/{id} with a multipart body. The `data` part is present
/// iff field changes were supplied, the `pdfFile` part iff a file was.
pub async fn update_surat(
    client: &ApiClient,
    id_surat: i64,
    request: Option<&UpdateSuratRequest>,
    pdf_file: Option<BerkasUpload>,
) -> Result<String, ApiError> {
    let form = surat_form(request, pdf_file)?;
    let response = client
        .post_multipart(&format!("/api/surat/{}", id_surat), form)
        .await?;
    read_envelope::<String>(response).await?.into_data()
}

/// Delete a letter.
pub async fn delete_surat(client: &ApiClient, id_surat: i64) -> Result<String, ApiError> {
    let response = client.delete(&format!("/api/surat/{}", id_surat)).await?;
    read_envelope::<String>(response).await?.into_data()
}

/// Attach a PDF to an existing letter.
///
/// POST /api/surat/{id}/upload with a single `pdfFile` multipart part.
pub async fn upload_berkas(
    client: &ApiClient,
    id_surat: i64,
    pdf_file: BerkasUpload,
) -> Result<String, ApiError> {
    let form = multipart::Form::new().part("pdfFile", pdf_part(pdf_file)?);
    let response = client
        .post_multipart(&format!("/api/surat/{}/upload", id_surat), form)
        .await?;
    read_envelope::<String>(response).await?.into_data()
}

/// Download a letter's attachment.
///
/// GET /api/surat/{id}/download. The body is returned as-is regardless of
/// status; error envelopes are never decoded on this path.
pub async fn download_berkas(client: &ApiClient, id_surat: i64) -> Result<Vec<u8>, ApiError> {
    let response = client
        .get(&format!("/api/surat/{}/download", id_surat))
        .await?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// List letters received on a given date.
///
/// GET /api/surat/getSuratByDate with `tanggalTerima`, `page`, `size` query
/// parameters. Paging defaults to page 0, size 20.
pub async fn get_surat_by_date(
    client: &ApiClient,
    tanggal_terima: NaiveDate,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<WebResponse<Vec<ForListSuratResponse>>, ApiError> {
    let query = by_date_query(tanggal_terima, page, size);
    let response = client
        .get(&format!("/api/surat/getSuratByDate?{}", query))
        .await?;
    read_envelope(response).await
}

/// Archive a batch of letters by identifier.
///
/// POST /api/surat/archive with a JSON body.
pub async fn archive_surat(
    client: &ApiClient,
    list_id_surat: Vec<i64>,
) -> Result<WebResponse<String>, ApiError> {
    let request = ArchiveSuratsRequest { list_id_surat };
    let response = client.post_json("/api/surat/archive", &request).await?;
    read_envelope(response).await
}

/// Build the multipart body shared by create and update: a `data` JSON part
/// iff a request object was supplied, a `pdfFile` part iff a file was.
fn surat_form<T: Serialize>(
    data: Option<&T>,
    pdf_file: Option<BerkasUpload>,
) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new();

    if let Some(data) = data {
        let json = serde_json::to_string(data)?;
        let part = multipart::Part::text(json).mime_str("application/json")?;
        form = form.part("data", part);
    }

    if let Some(pdf_file) = pdf_file {
        form = form.part("pdfFile", pdf_part(pdf_file)?);
    }

    Ok(form)
}

fn pdf_part(pdf_file: BerkasUpload) -> Result<multipart::Part, reqwest::Error> {
    multipart::Part::bytes(pdf_file.content)
        .file_name(pdf_file.file_name)
        .mime_str("application/pdf")
}

fn search_query(
    tahun: i32,
    nomor_surat: Option<&str>,
    page: Option<u32>,
    size: Option<u32>,
) -> String {
    // Parameter order matches the backend's documented query string.
    format!(
        "nomorSurat={}&tahun={}&page={}&size={}",
        urlencoding::encode(nomor_surat.unwrap_or("")),
        tahun,
        page.unwrap_or(0),
        size.unwrap_or(20),
    )
}

fn by_date_query(tanggal_terima: NaiveDate, page: Option<u32>, size: Option<u32>) -> String {
    format!(
        "tanggalTerima={}&page={}&size={}",
        tanggal_terima.format("%Y-%m-%d"),
        page.unwrap_or(0),
        size.unwrap_or(20),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_all_params() {
        let query = search_query(2024, Some("123"), Some(0), Some(20));
        assert_eq!(query, "nomorSurat=123&tahun=2024&page=0&size=20");
    }

    #[test]
    fn test_search_query_defaults() {
        let query = search_query(2023, None, None, None);
        assert_eq!(query, "nomorSurat=&tahun=2023&page=0&size=20");
    }

    #[test]
    fn test_search_query_encodes_letter_number() {
        // Letter numbers routinely contain slashes.
        let query = search_query(2024, Some("005/SEKRE/X/2024"), None, None);
        assert_eq!(
            query,
            "nomorSurat=005%2FSEKRE%2FX%2F2024&tahun=2024&page=0&size=20"
        );
    }

    #[test]
    fn test_by_date_query() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 7).unwrap();
        let query = by_date_query(date, None, Some(50));
        assert_eq!(query, "tanggalTerima=2024-10-07&page=0&size=50");
    }

    #[test]
    fn test_surat_form_builds_with_and_without_parts() {
        let request = CreateSuratRequest {
            nomor_surat: "001/X/2024".to_string(),
            tanggal_terima: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        };
        let pdf = BerkasUpload {
            file_name: "berkas.pdf".to_string(),
            content: vec![0x25, 0x50, 0x44, 0x46],
        };

        assert!(surat_form(Some(&request), Some(pdf.clone())).is_ok());
        assert!(surat_form(Some(&request), None).is_ok());
        assert!(surat_form::<CreateSuratRequest>(None, Some(pdf)).is_ok());
        assert!(surat_form::<CreateSuratRequest>(None, None).is_ok());
    }
}
