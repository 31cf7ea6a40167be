//! Spreadsheet client trait and its Google Sheets implementation

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use super::a1::{A1Range, quote_sheet_name};
use super::models::{ApiErrorBody, UpdateValuesResponse, ValueInputOption, ValueRange};

pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// An authorized handle to one remote spreadsheet document
#[async_trait]
pub trait SpreadsheetClient: Send + Sync {
    /// Every row of `sheet`, header row included.
    ///
    /// Trailing empty rows and trailing empty cells of a row may be omitted.
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Value>>>;

    /// Overwrite `range` with `values`, one inner vector per row
    async fn write_range(
        &self,
        range: &A1Range,
        values: Vec<Vec<Value>>,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse>;
}

/// Connection settings for [`GoogleSheetsClient`]
#[derive(Clone)]
pub struct ClientSettings {
    pub spreadsheet_id: String,
    pub access_token: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Google Sheets v4 client authenticated with a bearer token
#[derive(Debug, Clone)]
pub struct GoogleSheetsClient {
    http: Client,
    settings: ClientSettings,
}

impl GoogleSheetsClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, settings })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.settings.spreadsheet_id
    }

    fn values_url(&self, range: &str) -> String {
        values_url(&self.settings.base_url, &self.settings.spreadsheet_id, range)
    }
}

#[async_trait]
impl SpreadsheetClient for GoogleSheetsClient {
    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Value>>> {
        let url = self.values_url(&quote_sheet_name(sheet));
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.settings.access_token)
            .query(&[
                ("valueRenderOption", "UNFORMATTED_VALUE"),
                ("majorDimension", "ROWS"),
            ])
            .send()
            .await
            .with_context(|| format!("Request for sheet '{}' failed", sheet))?;

        let body: ValueRange = check_status(response)
            .await?
            .json()
            .await
            .context("Failed to parse values response")?;

        info!("Read {} rows from sheet '{}'", body.values.len(), sheet);
        Ok(body.values)
    }

    async fn write_range(
        &self,
        range: &A1Range,
        values: Vec<Vec<Value>>,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        let target = range.to_string();
        let url = self.values_url(&target);
        let row_count = values.len();
        debug!("PUT {} ({})", url, input.as_str());

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.settings.access_token)
            .query(&[("valueInputOption", input.as_str())])
            .json(&update_body(range, values))
            .send()
            .await
            .with_context(|| format!("Write to {} failed", target))?;

        let body: UpdateValuesResponse = check_status(response)
            .await?
            .json()
            .await
            .context("Failed to parse update response")?;

        info!(
            "Wrote {} rows to {} ({} cells updated)",
            row_count, target, body.updated_cells
        );
        Ok(body)
    }
}

fn values_url(base_url: &str, spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/spreadsheets/{}/values/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(spreadsheet_id),
        urlencoding::encode(range)
    )
}

fn update_body(range: &A1Range, values: Vec<Vec<Value>>) -> ValueRange {
    ValueRange {
        range: Some(range.to_string()),
        major_dimension: Some("ROWS".to_string()),
        values,
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("{}", describe_error(status, &body))
}

/// Human-readable message for a failed API call
fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            let code = if parsed.error.code != 0 {
                parsed.error.code
            } else {
                status.as_u16()
            };
            match parsed.error.status {
                Some(kind) => format!(
                    "Sheets API error {} ({}): {}",
                    code, kind, parsed.error.message
                ),
                None => format!("Sheets API error {}: {}", code, parsed.error.message),
            }
        }
        _ if body.trim().is_empty() => format!("Sheets API error {}", status),
        _ => format!("Sheets API error {}: {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_url_encodes_range() {
        let url = values_url(
            "https://sheets.googleapis.com/v4/",
            "doc-key",
            "'Inventario'!C2:C4",
        );
        assert_eq!(
            url,
            "https://sheets.googleapis.com/v4/spreadsheets/doc-key/values/%27Inventario%27%21C2%3AC4"
        );
    }

    #[test]
    fn test_update_body_is_single_column() {
        let range = A1Range::column_span("Consumiveis", 4, 2, 3).unwrap();
        let body = update_body(&range, vec![vec![json!("1")], vec![json!("7")]]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "range": "'Consumiveis'!D2:D3",
                "majorDimension": "ROWS",
                "values": [["1"], ["7"]]
            })
        );
    }

    #[test]
    fn test_describe_google_error() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            describe_error(StatusCode::FORBIDDEN, body),
            "Sheets API error 403 (PERMISSION_DENIED): The caller does not have permission"
        );
    }

    #[test]
    fn test_describe_plain_error() {
        assert_eq!(
            describe_error(StatusCode::BAD_GATEWAY, "upstream down"),
            "Sheets API error 502 Bad Gateway: upstream down"
        );
        assert_eq!(
            describe_error(StatusCode::NOT_FOUND, ""),
            "Sheets API error 404 Not Found"
        );
    }

    #[test]
    fn test_settings_debug_hides_token() {
        let settings = ClientSettings {
            spreadsheet_id: "doc".to_string(),
            access_token: "ya29.secret".to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        };
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("ya29.secret"));
        assert!(printed.contains("<redacted>"));
    }
}
