// 💰 Fund Entity - fundraising tracker rows
//
// The fundraising payload merges several imports, so the same concept lives
// under different keys (vintage / vintage_year, geography / geographic_focus /
// region / country, final_size / fund_size / target_size). The accessors below
// pick the first populated one. Both spellings may appear on one row, so each
// key gets its own field instead of a serde alias.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{
    first_text, non_empty, opt_text_or_number, text_or_default, Field, FieldValue, LogoSubject,
    Record,
};

/// Source tag of rows that came from the curated spreadsheet import.
pub const CURATED_SOURCE: &str = "excel import";

const NORDIC_GEOGRAPHIES: &[&str] = &[
    "nordic", "denmark", "sweden", "norway", "finland", "iceland", "baltic",
];

const NORDIC_FIRMS: &[&str] = &[
    "nordic", "adelis", "altor", "axcel", "eqt", "fsn", "herkules", "ik", "norvestor",
    "polaris", "procuritas", "summa", "triton", "verdane", "waterland", "via equity",
    "alfa framtak", "credo", "evolver", "invl", "peq", "seb", "triple", "acathia", "devco",
    "main capital", "mvi", "vaaka", "vendis", "maj invest", "trill impact", "equip",
    "impilo", "helix", "systematic", "mentha",
];

// ============================================================================
// FUND STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundStatus {
    Marketing,
    Active,
    Closed,
}

impl FundStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "marketing" => FundStatus::Marketing,
            "closed" => FundStatus::Closed,
            _ => FundStatus::Active,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FundStatus::Marketing => 0,
            FundStatus::Active => 1,
            FundStatus::Closed => 2,
        }
    }
}

// ============================================================================
// FUND
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    #[serde(default, deserialize_with = "text_or_default")]
    pub firm: String,

    pub fund_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// "Marketing", "First Close", "Closed", ...
    pub status: Option<String>,

    pub strategy: Option<String>,

    pub core_industries: Option<String>,

    pub geography: Option<String>,
    pub geographic_focus: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub vintage: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub vintage_year: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub first_close_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub final_close_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub first_close: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub final_close: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub final_size: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub fund_size: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub target_size: Option<String>,

    pub source: Option<String>,

    pub firm_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Fund {
    pub fn fund_name(&self) -> Option<&str> {
        first_text(&self.fund_name, &self.name)
    }

    pub fn status(&self) -> FundStatus {
        FundStatus::parse(self.status.as_deref().unwrap_or(""))
    }

    /// Explicit vintage if plausible, else the first year found in a close date.
    pub fn vintage_year(&self) -> Option<i32> {
        let explicit = [&self.vintage, &self.vintage_year]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .filter_map(|v| v.trim().parse::<i32>().ok())
            .find(|y| *y > 1900 && *y < 3000);
        if explicit.is_some() {
            return explicit;
        }

        [
            &self.final_close_date,
            &self.first_close_date,
            &self.first_close,
            &self.final_close,
        ]
        .into_iter()
        .filter_map(|d| d.as_deref())
        .find_map(first_year)
    }

    pub fn display_size(&self) -> &str {
        [&self.final_size, &self.fund_size, &self.target_size]
            .into_iter()
            .find_map(non_empty)
            .unwrap_or("N/A")
    }

    pub fn display_geography(&self) -> &str {
        self.geography_field().unwrap_or("N/A")
    }

    pub fn display_strategy(&self) -> &str {
        [&self.strategy, &self.core_industries]
            .into_iter()
            .find_map(non_empty)
            .unwrap_or("N/A")
    }

    fn geography_field(&self) -> Option<&str> {
        [&self.geography, &self.geographic_focus, &self.region, &self.country]
            .into_iter()
            .find_map(non_empty)
    }

    /// Nordic by geography or by a known Nordic manager in the firm name.
    pub fn is_nordic(&self) -> bool {
        let geography = self.geography_field().unwrap_or("").to_lowercase();
        let firm = self.firm.to_lowercase();

        NORDIC_GEOGRAPHIES.iter().any(|g| geography.contains(g))
            || NORDIC_FIRMS.iter().any(|f| firm.contains(f))
    }

    pub fn is_curated(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(CURATED_SOURCE))
    }

    /// Nordic row from the curated import.
    pub fn is_curated_nordic(&self) -> bool {
        self.is_curated() && self.is_nordic()
    }
}

/// First 19xx/20xx year embedded in a date-ish string ("2024-Q2", "Mar 2019").
fn first_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    bytes.windows(4).enumerate().find_map(|(i, w)| {
        let digits = w.iter().all(u8::is_ascii_digit);
        let century = w.starts_with(b"19") || w.starts_with(b"20");
        if digits && century {
            text[i..i + 4].parse().ok()
        } else {
            None
        }
    })
}

/// Newest vintage first; Marketing before open funds before Closed; then firm.
pub fn display_order(a: &Fund, b: &Fund) -> Ordering {
    let va = a.vintage_year().unwrap_or(0);
    let vb = b.vintage_year().unwrap_or(0);

    vb.cmp(&va)
        .then_with(|| a.status().rank().cmp(&b.status().rank()))
        .then_with(|| a.firm.cmp(&b.firm))
}

/// Distinct vintage years, newest first.
pub fn vintage_years(funds: &[Fund]) -> Vec<i32> {
    let mut years: Vec<i32> = funds.iter().filter_map(Fund::vintage_year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

impl Record for Fund {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.firm),
            Field::Description => match self.fund_name() {
                Some(name) => FieldValue::Text(name),
                None => FieldValue::Missing,
            },
            Field::Stage | Field::Status => FieldValue::text(&self.status),
            Field::Category | Field::Strategy => match non_empty(&self.strategy) {
                Some(s) => FieldValue::Text(s),
                None => FieldValue::text(&self.core_industries),
            },
            Field::Region | Field::Geography => match self.geography_field() {
                Some(g) => FieldValue::Text(g),
                None => FieldValue::Missing,
            },
            Field::Source => FieldValue::text(&self.source),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for Fund {
    fn display_name(&self) -> &str {
        &self.firm
    }

    fn logo_url(&self) -> Option<&str> {
        first_text(&self.firm_logo_url, &self.logo_url)
    }
}
