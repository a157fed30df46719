// Entity Models - JSON records served by the dashboard backend
//
// Every field is optional: the backend payloads are hand-curated and sparse,
// so absence means "unknown" and never an error.
//
// Each entity exposes:
// - `Record` for the filter engine (named field access)
// - `LogoSubject` when it can show a logo

pub mod company;
pub mod investor;
pub mod fund;
pub mod news;

pub use company::{Company, PortfolioCompany};
pub use investor::{
    FamilyOffice, InvestmentCompany, InvestmentCompanyFilter, InvestmentCompanySort, Investor,
    PeFirm,
};
pub use fund::{Fund, FundStatus};
pub use news::{NewsArticle, NewsChannel};

use serde::{Deserialize, Deserializer};

// ============================================================================
// FIELD ACCESS
// ============================================================================

/// Named fields the filter engine can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Category,
    Stage,
    Industry,
    Technology,
    Investors,
    Headquarters,
    Region,
    Source,
    Sector,
    Market,
    Kind,
    Status,
    Strategy,
    Geography,
    Holdings,
    Focus,
    Family,
}

/// Borrowed view of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        match value.as_deref() {
            Some(s) => FieldValue::Text(s),
            None => FieldValue::Missing,
        }
    }

    pub fn list(values: &'a [String]) -> Self {
        if values.is_empty() {
            FieldValue::Missing
        } else {
            FieldValue::List(values)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

/// Anything the filter engine can reduce.
pub trait Record {
    fn field(&self, field: Field) -> FieldValue<'_>;
}

/// Anything that can be shown with a logo.
pub trait LogoSubject {
    /// Display name; also keys the generated avatar.
    fn display_name(&self) -> &str;

    fn logo_url(&self) -> Option<&str> {
        None
    }

    fn website(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// LENIENT DESERIALIZATION
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

/// Accepts `["a", "b"]`, `"a"` or `null`; null entries and blanks are dropped.
pub(crate) fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
        None => Vec::new(),
    };

    Ok(values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `2019`, `"2019"`, `19.5` or `null` and keeps the text form.
pub(crate) fn opt_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let text = match v {
            TextOrNumber::Text(s) => s.trim().to_string(),
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }))
}

/// Required text field: `null`, a number or a missing key all stay usable.
pub(crate) fn text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text_or_number(deserializer)?.unwrap_or_default())
}

/// Accepts `12.5`, `"12.5"`, `"12,5 %"` or `null`; unparsable text is `None`.
pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        TextOrNumber::Integer(n) => Some(n as f64),
        TextOrNumber::Float(n) => Some(n),
        TextOrNumber::Text(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .trim()
                .replace(',', ".");
            cleaned.parse().ok()
        }
    }))
}

/// First non-empty of two spellings of the same field.
pub(crate) fn first_text<'a>(a: &'a Option<String>, b: &'a Option<String>) -> Option<&'a str> {
    non_empty(a).or_else(|| non_empty(b))
}

/// Non-empty text or `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
