// 🌐 Dashboard API Client - read-only access to the backend JSON endpoints
//
// Every endpoint answers with an envelope:
//   { "success": true,  "<payload key>": [...] }
//   { "success": false, "message": "..." }
//
// PE firms are the odd one out: the payload is an object keyed by firm.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::entities::{
    Company, FamilyOffice, Fund, InvestmentCompany, Investor, NewsArticle, PeFirm,
    PortfolioCompany,
};
use crate::error::{ApiError, ApiResult};
use crate::stats::AnalyticsSummary;

/// Backend endpoints the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AiCompanies,
    AiInvestors,
    Fundraising,
    FamilyOffices,
    InvestmentCompanies,
    PeFirms,
    News,
    Portfolio,
    AnalyticsSummary,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AiCompanies => "api/ai-companies",
            Endpoint::AiInvestors => "api/ai-investors",
            Endpoint::Fundraising => "api/fundraising",
            Endpoint::FamilyOffices => "api/family-offices",
            Endpoint::InvestmentCompanies => "api/investment-companies",
            Endpoint::PeFirms => "api/pe-firms",
            Endpoint::News => "api/news",
            Endpoint::Portfolio => "api/portfolio",
            Endpoint::AnalyticsSummary => "api/analytics/summary",
        }
    }

    /// Envelope key holding the payload.
    pub fn payload_key(&self) -> &'static str {
        match self {
            Endpoint::AiCompanies | Endpoint::InvestmentCompanies | Endpoint::Portfolio => {
                "companies"
            }
            Endpoint::AiInvestors => "investors",
            Endpoint::Fundraising => "fundraising",
            Endpoint::FamilyOffices => "family_offices",
            Endpoint::PeFirms => "firms",
            Endpoint::News => "news",
            Endpoint::AnalyticsSummary => "summary",
        }
    }
}

// ============================================================================
// ENVELOPE DECODING
// ============================================================================

/// Decode one response body into entity records.
///
/// - `success: false` → `ApiError::Rejected` with the backend message
/// - missing or null payload → empty list
/// - object payload → one record per entry, the key filling a missing `name`
/// - records that fail to deserialize are skipped with a warning
pub fn decode_payload<T: DeserializeOwned>(body: &str, endpoint: Endpoint) -> ApiResult<Vec<T>> {
    let mut envelope = open_envelope(body, endpoint)?;

    let raw = match envelope.remove(endpoint.payload_key()) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::Object(keyed)) => keyed_records(keyed),
        Some(other) => {
            return Err(parse_error(
                endpoint,
                format!(
                    "`{}` is neither a list nor an object: {}",
                    endpoint.payload_key(),
                    other
                ),
            ))
        }
    };

    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(endpoint = endpoint.path(), index = i, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();

    debug!(endpoint = endpoint.path(), kept = records.len(), total, "decoded payload");
    Ok(records)
}

/// Decode a single-object payload such as `{"success": true, "summary": {...}}`.
///
/// A missing or null payload decodes from an empty object, so every field
/// falls back to its default.
pub fn decode_object<T: DeserializeOwned>(body: &str, endpoint: Endpoint) -> ApiResult<T> {
    let mut envelope = open_envelope(body, endpoint)?;

    let raw = match envelope.remove(endpoint.payload_key()) {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            return Err(parse_error(
                endpoint,
                format!("`{}` is not an object: {}", endpoint.payload_key(), other),
            ))
        }
    };

    serde_json::from_value(raw).map_err(|e| parse_error(endpoint, e.to_string()))
}

/// Parse the envelope and surface `success: false` as `Rejected`.
fn open_envelope(body: &str, endpoint: Endpoint) -> ApiResult<Map<String, Value>> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|e| parse_error(endpoint, e.to_string()))?;
    let Value::Object(envelope) = envelope else {
        return Err(parse_error(endpoint, "envelope is not a JSON object".to_string()));
    };

    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_string();
        return Err(ApiError::Rejected {
            endpoint: endpoint.path().to_string(),
            message,
        });
    }

    Ok(envelope)
}

fn parse_error(endpoint: Endpoint, reason: String) -> ApiError {
    ApiError::Parse {
        endpoint: endpoint.path().to_string(),
        reason,
    }
}

fn keyed_records(keyed: Map<String, Value>) -> Vec<Value> {
    keyed
        .into_iter()
        .map(|(key, mut value)| {
            if let Value::Object(fields) = &mut value {
                let has_name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|n| !n.trim().is_empty());
                if !has_name {
                    fields.insert("name".to_string(), Value::String(key));
                }
            }
            value
        })
        .collect()
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base: Url,
}

impl DashboardClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> ApiResult<Self> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(DashboardClient { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn url_for(&self, endpoint: Endpoint) -> ApiResult<Url> {
        self.base
            .join(endpoint.path())
            .map_err(|e| ApiError::InvalidUrl {
                url: self.base.to_string(),
                reason: e.to_string(),
            })
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<Vec<T>> {
        let body = self.get_body(endpoint).await?;
        let records = decode_payload(&body, endpoint)?;
        info!(endpoint = endpoint.path(), count = records.len(), "loaded");
        Ok(records)
    }

    /// Response body of a 2xx reply; anything else becomes an error.
    async fn get_body(&self, endpoint: Endpoint) -> ApiResult<String> {
        let url = self.url_for(endpoint)?;
        debug!(%url, "fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Failed requests still carry the envelope's message when there is one
            if let Err(err @ ApiError::Rejected { .. }) = open_envelope(&body, endpoint) {
                return Err(err);
            }
            return Err(ApiError::Status {
                endpoint: endpoint.path().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(body)
    }

    pub async fn ai_companies(&self) -> ApiResult<Vec<Company>> {
        self.fetch(Endpoint::AiCompanies).await
    }

    pub async fn ai_investors(&self) -> ApiResult<Vec<Investor>> {
        self.fetch(Endpoint::AiInvestors).await
    }

    pub async fn fundraising(&self) -> ApiResult<Vec<Fund>> {
        self.fetch(Endpoint::Fundraising).await
    }

    pub async fn family_offices(&self) -> ApiResult<Vec<FamilyOffice>> {
        self.fetch(Endpoint::FamilyOffices).await
    }

    pub async fn investment_companies(&self) -> ApiResult<Vec<InvestmentCompany>> {
        self.fetch(Endpoint::InvestmentCompanies).await
    }

    pub async fn pe_firms(&self) -> ApiResult<Vec<PeFirm>> {
        self.fetch(Endpoint::PeFirms).await
    }

    pub async fn news(&self) -> ApiResult<Vec<NewsArticle>> {
        self.fetch(Endpoint::News).await
    }

    pub async fn portfolio(&self) -> ApiResult<Vec<PortfolioCompany>> {
        self.fetch(Endpoint::Portfolio).await
    }

    pub async fn analytics_summary(&self) -> ApiResult<AnalyticsSummary> {
        let body = self.get_body(Endpoint::AnalyticsSummary).await?;
        decode_object(&body, Endpoint::AnalyticsSummary)
    }
}
