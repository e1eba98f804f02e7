//! Selected-date state behind the incoming-letter search form.
//!
//! Holds a single selected receipt date, defaulting to today. Selecting a
//! date immediately refreshes the search by receipt date in the background;
//! the form itself never consumes the result, so a failed refresh only logs.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::api::client::ApiClient;
use crate::api::surat;

/// Earliest selectable receipt date.
fn min_tanggal() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid calendar date")
}

/// Date-picker state for the incoming-letter view.
pub struct TanggalTerimaForm {
    client: Arc<ApiClient>,
    selected: NaiveDate,
}

impl TanggalTerimaForm {
    /// New form with today's date selected.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            selected: Local::now().date_naive(),
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Whether a date can be picked: between 1900-01-01 and today inclusive.
    pub fn selectable(date: NaiveDate) -> bool {
        date >= min_tanggal() && date <= Local::now().date_naive()
    }

    /// Pick a date. Out-of-range dates are rejected and leave the selection
    /// unchanged. An accepted date triggers a background search by receipt
    /// date; failures never block the selection.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        if !Self::selectable(date) {
            return false;
        }
        self.selected = date;

        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            if let Err(e) = surat::get_surat_by_date(&client, date, None, None).await {
                log::warn!("Search by receipt date failed: {}", e);
            }
        });
        true
    }
}
