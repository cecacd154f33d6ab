use super::RecordSource;
use crate::activity::RawRecord;
use crate::config::AirtableConfig;
use crate::error::{ConfigError, DataFormatError, NormalizeError, UpstreamFetchError};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use url::Url;

#[derive(Debug, Deserialize)]
struct RecordsEnvelope {
    records: Vec<RawRecord>,
    #[serde(default)]
    offset: Option<String>,
}

/// Reads one page of records from an Airtable table.
pub struct AirtableSource {
    client: Client,
    endpoint: Url,
    token: String,
    filter_formula: Option<String>,
}

impl AirtableSource {
    pub fn new(
        api_base_url: &str,
        base_id: &str,
        table: &str,
        token: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let mut endpoint = Url::parse(api_base_url)
            .map_err(|e| ConfigError::Validation(format!("airtable.api_base_url: {e}")))?;
        endpoint
            .path_segments_mut()
            .map_err(|()| {
                ConfigError::Validation("airtable.api_base_url cannot be a base".into())
            })?
            .pop_if_empty()
            .push(base_id)
            .push(table);

        Ok(Self {
            client: crate::http::build_client(timeout_secs),
            endpoint,
            token: token.into(),
            filter_formula: None,
        })
    }

    pub fn from_config(config: &AirtableConfig) -> Result<Self, ConfigError> {
        let token = config
            .token
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("airtable.token is required".into()))?;
        let base_id = config
            .base_id
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("airtable.base_id is required".into()))?;
        Ok(Self::new(
            &config.api_base_url,
            base_id,
            &config.table,
            token,
            config.timeout_secs,
        )?
        .with_filter_formula(config.filter_formula.clone()))
    }

    pub fn with_filter_formula(mut self, formula: Option<String>) -> Self {
        self.filter_formula = formula.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, NormalizeError> {
        tracing::info!(endpoint = %self.endpoint, "fetching records from airtable");

        let mut request = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(formula) = &self.filter_formula {
            request = request.query(&[("filterByFormula", formula.as_str())]);
        }

        let response = request.send().await.map_err(UpstreamFetchError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(UpstreamFetchError::from)?;

        if !status.is_success() {
            let detail = error_detail(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            tracing::error!(
                status = status.as_u16(),
                detail = detail.as_str(),
                "airtable request failed"
            );
            return Err(UpstreamFetchError::Status {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        parse_envelope(&body)
    }
}

impl RecordSource for AirtableSource {
    fn fetch_records(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawRecord>, NormalizeError>> + Send + '_>> {
        Box::pin(self.fetch())
    }
}

fn parse_envelope(body: &str) -> Result<Vec<RawRecord>, NormalizeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DataFormatError::InvalidJson(e.to_string()))?;
    let envelope: RecordsEnvelope = serde_json::from_value(value)
        .map_err(|e| DataFormatError::WrongShape(format!("records envelope: {e}")))?;

    if envelope.offset.is_some() {
        tracing::warn!(
            records = envelope.records.len(),
            "airtable reported more pages; only the first page is read"
        );
    }
    Ok(envelope.records)
}

// Airtable errors come as `{"error": {"type": ..}}` or `{"error": "NOT_FOUND"}`.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(kind) => Some(kind.clone()),
        Value::Object(obj) => obj
            .get("type")
            .or_else(|| obj.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_table() {
        let source =
            AirtableSource::new("https://api.airtable.com/v0/", "app123", "Wisecompanion", "t", 5)
                .unwrap();
        assert_eq!(
            source.endpoint().as_str(),
            "https://api.airtable.com/v0/app123/Wisecompanion"
        );
    }

    #[test]
    fn table_names_are_percent_encoded() {
        let source =
            AirtableSource::new("https://api.airtable.com/v0", "app1", "省钱 活动", "t", 5)
                .unwrap();
        assert!(
            source
                .endpoint()
                .as_str()
                .ends_with("/app1/%E7%9C%81%E9%92%B1%20%E6%B4%BB%E5%8A%A8")
        );
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let config = AirtableConfig {
            base_id: Some("app1".into()),
            ..AirtableConfig::default()
        };
        assert!(AirtableSource::from_config(&config).is_err());
    }

    #[test]
    fn blank_formula_is_ignored() {
        let source = AirtableSource::new("https://api.airtable.com/v0", "a", "b", "t", 5)
            .unwrap()
            .with_filter_formula(Some("  ".into()));
        assert!(source.filter_formula.is_none());
    }

    #[test]
    fn error_detail_reads_both_shapes() {
        let typed = r#"{"error":{"type":"AUTHENTICATION_REQUIRED","message":"x"}}"#;
        assert_eq!(
            error_detail(typed).as_deref(),
            Some("AUTHENTICATION_REQUIRED")
        );
        assert_eq!(error_detail(r#"{"error":"NOT_FOUND"}"#).as_deref(), Some("NOT_FOUND"));
        assert!(error_detail("<html>").is_none());
    }

    #[test]
    fn envelope_without_records_is_wrong_shape() {
        let err = parse_envelope(r#"{"data": []}"#).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::DataFormat(DataFormatError::WrongShape(_))
        ));
    }

    #[test]
    fn envelope_unwraps_fields() {
        let records = parse_envelope(
            r#"{"records":[{"id":"rec1","createdTime":"2025-01-01T00:00:00.000Z","fields":{"Name":"a"}}],"offset":"itr1"}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "rec1");
        assert!(records[0].fields.contains_key("Name"));
    }
}
