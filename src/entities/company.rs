// 🤖 Company Entities - AI companies and PE portfolio companies
//
// AI companies come from `/api/ai-companies`, portfolio companies from
// `/api/portfolio`. Both are sparse: a stealth-mode startup may carry little
// more than a name and a category.

use serde::{Deserialize, Serialize};

use super::{
    non_empty, opt_text_or_number, string_or_seq, text_or_default, Field, FieldValue, LogoSubject,
    Record,
};

/// Investor name that marks Y Combinator alumni.
pub const YC_INVESTOR: &str = "y combinator";

// ============================================================================
// AI COMPANY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "text_or_default")]
    pub name: String,

    pub category: Option<String>,

    pub stage: Option<String>,

    pub industry: Option<String>,

    /// Core technologies (e.g. "LLM", "Computer Vision")
    #[serde(default, deserialize_with = "string_or_seq")]
    pub technology: Vec<String>,

    /// Older imports use the plural key
    #[serde(default, deserialize_with = "string_or_seq", skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,

    /// Investors in announcement order
    #[serde(default, deserialize_with = "string_or_seq")]
    pub investors: Vec<String>,

    pub headquarters: Option<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub founded: Option<String>,

    pub description: Option<String>,

    /// Free-form valuation ("SEK 15B", "$1.8 billion")
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub valuation: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub arr: Option<String>,

    /// Headcount or range ("50-100", "200+")
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub employees: Option<String>,

    pub recent_activity: Option<String>,
}

impl Company {
    /// `technology`, or `technologies` when the singular key is empty.
    pub fn technologies(&self) -> &[String] {
        if self.technology.is_empty() {
            &self.technologies
        } else {
            &self.technology
        }
    }

    /// Category or valuation says "unicorn" / "billion".
    pub fn is_unicorn(&self) -> bool {
        let category = self.category.as_deref().unwrap_or("").to_lowercase();
        let valuation = self.valuation.as_deref().unwrap_or("").to_lowercase();

        category.contains("unicorn") || valuation.contains("billion") || valuation.contains("milliard")
    }

    /// Any investor entry mentions Y Combinator.
    pub fn is_yc_alumni(&self) -> bool {
        self.investors
            .iter()
            .any(|i| i.to_lowercase().contains(YC_INVESTOR))
    }

    /// Founding year when `founded` starts with a number.
    pub fn founded_year(&self) -> Option<i32> {
        leading_number(self.founded.as_deref()?)
    }

    /// Country part of the headquarters ("Stockholm, Sweden" → "Sweden").
    pub fn country(&self) -> Option<&str> {
        country_of(self.headquarters.as_deref()?)
    }
}

impl Record for Company {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Description => FieldValue::text(&self.description),
            Field::Category => FieldValue::text(&self.category),
            Field::Stage => FieldValue::text(&self.stage),
            Field::Industry => FieldValue::text(&self.industry),
            Field::Technology => FieldValue::list(self.technologies()),
            Field::Investors => FieldValue::list(&self.investors),
            Field::Headquarters | Field::Region => FieldValue::text(&self.headquarters),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for Company {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn logo_url(&self) -> Option<&str> {
        non_empty(&self.logo_url)
    }

    fn website(&self) -> Option<&str> {
        non_empty(&self.website)
    }
}

// ============================================================================
// PORTFOLIO COMPANY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCompany {
    #[serde(default, deserialize_with = "text_or_default")]
    pub company: String,

    /// Some firm scrapers write `name` instead of `company`
    #[serde(default, deserialize_with = "text_or_default", skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub sector: Option<String>,

    /// Home market ("Sweden", "Nordics")
    pub market: Option<String>,

    /// Entry year
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub entry: Option<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    /// Owning PE firm
    pub source: Option<String>,

    pub fund: Option<String>,

    pub headquarters: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub employees: Option<String>,

    pub description: Option<String>,

    pub status: Option<String>,
}

impl PortfolioCompany {
    /// `company`, else `name`.
    pub fn company_name(&self) -> &str {
        if self.company.trim().is_empty() {
            &self.name
        } else {
            &self.company
        }
    }

    pub fn entry_year(&self) -> Option<i32> {
        leading_number(self.entry.as_deref()?)
    }
}

impl Record for PortfolioCompany {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(self.company_name()),
            Field::Description => FieldValue::text(&self.description),
            Field::Category | Field::Sector => FieldValue::text(&self.sector),
            Field::Region | Field::Market => FieldValue::text(&self.market),
            Field::Source => FieldValue::text(&self.source),
            Field::Headquarters => FieldValue::text(&self.headquarters),
            Field::Status | Field::Stage => FieldValue::text(&self.status),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for PortfolioCompany {
    fn display_name(&self) -> &str {
        self.company_name()
    }

    fn logo_url(&self) -> Option<&str> {
        non_empty(&self.logo_url)
    }

    fn website(&self) -> Option<&str> {
        non_empty(&self.website)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Leading integer of a string ("2019", "2019-03", "2023 (spin-off)").
pub(crate) fn leading_number(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Last comma-separated part of a location string.
pub(crate) fn country_of(location: &str) -> Option<&str> {
    location
        .rsplit(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
