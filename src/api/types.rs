//! Request and response types for the surat management backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Generic response envelope returned by every backend endpoint.
///
/// Success responses carry the payload in `data`; error responses carry a
/// message in `errors`. List endpoints additionally include `paging`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebResponse<T> {
    pub data: Option<T>,
    pub errors: Option<String>,
    pub paging: Option<PagingResponse>,
}

/// Paging block attached to list responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingResponse {
    pub current_page: u32,
    pub total_page: u32,
    pub size: u32,
}

/// Request body for registering a new letter (the `data` multipart part).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuratRequest {
    pub nomor_surat: String,
    pub tanggal_terima: NaiveDate,
}

/// Request body for updating a letter. Fields left `None` are omitted
/// so the backend keeps the stored value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSuratRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_surat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_terima: Option<NaiveDate>,
}

/// Request body for archiving a batch of letters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSuratsRequest {
    pub list_id_surat: Vec<i64>,
}

/// Full letter record from GET /api/surat/{id}.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuratResponse {
    pub id_surat: i64,
    pub nomor_surat: String,
    pub tanggal_terima: NaiveDate,
    /// File name of the stored attachment, if one was uploaded.
    pub berkas: Option<String>,
    pub is_arsip: bool,
}

/// List projection of a letter, returned by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForListSuratResponse {
    pub id_surat: i64,
    pub nomor_surat: String,
    pub tanggal_terima: NaiveDate,
    pub is_arsip: bool,
}

/// Organizational unit attached to a user profile.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BagianResponse {
    pub nama_bagian: String,
}

/// Group attached to a user profile.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KelompokResponse {
    pub nama_kelompok: String,
}

/// Profile of the authenticated user from GET /api/users/current.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id_user: i64,
    pub nama_user: String,
    pub bagian: BagianResponse,
    pub kelompok: KelompokResponse,
}

/// In-memory PDF attachment for multipart requests.
#[derive(Debug, Clone)]
pub struct BerkasUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_serializes_camel_case() {
        let request = CreateSuratRequest {
            nomor_surat: "005/SEKRE/X/2024".to_string(),
            tanggal_terima: NaiveDate::from_ymd_opt(2024, 10, 7).unwrap(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"nomorSurat\":\"005/SEKRE/X/2024\""));
        assert!(json.contains("\"tanggalTerima\":\"2024-10-07\""));
    }

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = UpdateSuratRequest {
            nomor_surat: Some("007/TU/XI/2024".to_string()),
            tanggal_terima: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"nomorSurat\":\"007/TU/XI/2024\""));
        assert!(!json.contains("tanggalTerima"));
    }

    #[test]
    fn test_archive_request_serialization() {
        let request = ArchiveSuratsRequest {
            list_id_surat: vec![1, 2, 5],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, "{\"listIdSurat\":[1,2,5]}");
    }

    #[test]
    fn test_envelope_deserialization_with_paging() {
        let json = r#"{
            "data": [{
                "idSurat": 12,
                "nomorSurat": "001/HUMAS/I/2024",
                "tanggalTerima": "2024-01-15",
                "isArsip": false
            }],
            "paging": {
                "currentPage": 0,
                "totalPage": 3,
                "size": 20
            }
        }"#;

        let envelope: WebResponse<Vec<ForListSuratResponse>> =
            serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].id_surat, 12);
        assert_eq!(data[0].nomor_surat, "001/HUMAS/I/2024");
        assert!(!data[0].is_arsip);
        assert!(envelope.errors.is_none());
        assert_eq!(envelope.paging.unwrap().total_page, 3);
    }

    #[test]
    fn test_user_response_deserialization() {
        let json = r#"{
            "idUser": 42,
            "namaUser": "Budi Santoso",
            "bagian": { "namaBagian": "Sekretariat" },
            "kelompok": { "namaKelompok": "Kelompok A" }
        }"#;

        let user: UserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(user.id_user, 42);
        assert_eq!(user.nama_user, "Budi Santoso");
        assert_eq!(user.bagian.nama_bagian, "Sekretariat");
        assert_eq!(user.kelompok.nama_kelompok, "Kelompok A");
    }
}
