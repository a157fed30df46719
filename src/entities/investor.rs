// 💼 Investor Entities - AI investors, family offices, investment companies, PE firms

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{
    first_text, non_empty, opt_number, opt_text_or_number, string_or_seq, text_or_default, Field,
    FieldValue, LogoSubject, Record,
};

// ============================================================================
// AI INVESTOR
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    #[serde(default, deserialize_with = "text_or_default")]
    pub name: String,

    /// vc, pe, corporate, angel, family
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub hq: Option<String>,

    /// Long form of `hq` used by some imports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    /// Free-form amount ("$2.4B", "SEK 800M")
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub total_invested: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub ai_deals_count: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub portfolio_companies: Vec<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub notable_investments: Vec<String>,

    pub description: Option<String>,
}

impl Investor {
    pub fn headquarters(&self) -> Option<&str> {
        first_text(&self.hq, &self.headquarters)
    }

    /// Invested amount in millions; billions are scaled by 1000.
    pub fn invested_millions(&self) -> f64 {
        parse_amount_millions(self.total_invested.as_deref().unwrap_or(""))
    }
}

/// Largest investors first.
pub fn sort_by_invested(investors: &mut [Investor]) {
    investors.sort_by(|a, b| {
        b.invested_millions()
            .partial_cmp(&a.invested_millions())
            .unwrap_or(Ordering::Equal)
    });
}

impl Record for Investor {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Description => FieldValue::text(&self.description),
            Field::Category | Field::Kind => FieldValue::text(&self.kind),
            Field::Headquarters | Field::Region => match self.headquarters() {
                Some(hq) => FieldValue::Text(hq),
                None => FieldValue::Missing,
            },
            Field::Holdings => FieldValue::list(&self.portfolio_companies),
            Field::Focus => FieldValue::list(&self.notable_investments),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for Investor {
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
// FAMILY OFFICE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyOffice {
    #[serde(default, deserialize_with = "text_or_default")]
    pub name: String,

    pub founding_family: Option<String>,

    pub headquarters: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub aum: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub investment_focus: Vec<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub notable_holdings: Vec<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub founded: Option<String>,
}

impl Record for FamilyOffice {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Description => FieldValue::text(&self.description),
            Field::Family => FieldValue::text(&self.founding_family),
            Field::Headquarters | Field::Region => FieldValue::text(&self.headquarters),
            Field::Category | Field::Focus => FieldValue::list(&self.investment_focus),
            Field::Holdings => FieldValue::list(&self.notable_holdings),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for FamilyOffice {
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
// INVESTMENT COMPANY (investmentbolag)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentCompany {
    #[serde(default, deserialize_with = "text_or_default")]
    pub name: String,

    pub ticker: Option<String>,

    /// "Investment Company", "Real Estate", "Fastighetsbolag", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub holdings: Vec<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub investment_focus: Vec<String>,

    /// NAV discount in percent; negative means premium
    #[serde(default, deserialize_with = "opt_number")]
    pub discount_numeric: Option<f64>,

    /// Free-form market cap ("SEK 45.2B")
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub market_cap: Option<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    pub description: Option<String>,
}

/// Quick filters on the investment companies page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvestmentCompanyFilter {
    All,
    Investment,
    RealEstate,
    Discount,
    Premium,
    /// Market cap above 10 (billions as quoted)
    Large,
}

/// Sort modes on the investment companies page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvestmentCompanySort {
    DiscountDesc,
    DiscountAsc,
    Name,
    MarketCap,
}

impl InvestmentCompany {
    pub fn is_real_estate(&self) -> bool {
        let kind = self.kind.as_deref().unwrap_or("").to_lowercase();
        kind.contains("real estate") || kind.contains("fastighet")
    }

    /// Numeric part of the market cap string.
    pub fn market_cap_value(&self) -> f64 {
        let digits: String = self
            .market_cap
            .as_deref()
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        digits.parse().unwrap_or(0.0)
    }

    pub fn passes(&self, filter: InvestmentCompanyFilter) -> bool {
        match filter {
            InvestmentCompanyFilter::All => true,
            InvestmentCompanyFilter::Investment => !self.is_real_estate(),
            InvestmentCompanyFilter::RealEstate => self.is_real_estate(),
            InvestmentCompanyFilter::Discount => self.discount_numeric.is_some_and(|d| d > 0.0),
            InvestmentCompanyFilter::Premium => self.discount_numeric.is_some_and(|d| d < 0.0),
            InvestmentCompanyFilter::Large => self.market_cap_value() > 10.0,
        }
    }
}

pub fn sort_investment_companies(companies: &mut [InvestmentCompany], sort: InvestmentCompanySort) {
    let discount = |c: &InvestmentCompany| c.discount_numeric.unwrap_or(0.0);

    companies.sort_by(|a, b| match sort {
        InvestmentCompanySort::DiscountDesc => discount(b)
            .partial_cmp(&discount(a))
            .unwrap_or(Ordering::Equal),
        InvestmentCompanySort::DiscountAsc => discount(a)
            .partial_cmp(&discount(b))
            .unwrap_or(Ordering::Equal),
        InvestmentCompanySort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        InvestmentCompanySort::MarketCap => b
            .market_cap_value()
            .partial_cmp(&a.market_cap_value())
            .unwrap_or(Ordering::Equal),
    });
}

impl Record for InvestmentCompany {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Description => FieldValue::text(&self.description),
            Field::Category | Field::Kind => FieldValue::text(&self.kind),
            Field::Holdings => FieldValue::list(&self.holdings),
            Field::Focus => FieldValue::list(&self.investment_focus),
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for InvestmentCompany {
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
// PE FIRM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeFirm {
    /// Filled from the payload key when the record has no name
    #[serde(default, deserialize_with = "text_or_default")]
    pub name: String,

    pub headquarters: Option<String>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub aum: Option<String>,

    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub founded: Option<String>,

    pub website: Option<String>,

    pub logo_url: Option<String>,

    /// Older firm records carry the logo under `logo`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Record for PeFirm {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Description => FieldValue::text(&self.description),
            Field::Headquarters | Field::Region | Field::Category => {
                FieldValue::text(&self.headquarters)
            }
            _ => FieldValue::Missing,
        }
    }
}

impl LogoSubject for PeFirm {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn logo_url(&self) -> Option<&str> {
        first_text(&self.logo_url, &self.logo)
    }

    fn website(&self) -> Option<&str> {
        non_empty(&self.website)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// "$1.2B" → 1200.0, "SEK 800M" → 800.0, "" → 0.0
pub fn parse_amount_millions(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = digits.parse().unwrap_or(0.0);

    if text.contains('B') || text.to_lowercase().contains("billion") {
        value * 1000.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_millions() {
        assert_eq!(parse_amount_millions("$1.2B"), 1200.0);
        assert_eq!(parse_amount_millions("SEK 800M"), 800.0);
        assert_eq!(parse_amount_millions("2 billion"), 2000.0);
        assert_eq!(parse_amount_millions(""), 0.0);
    }

    #[test]
    fn test_sort_by_invested() {
        let mut investors = vec![
            Investor { name: "Small".into(), total_invested: Some("$300M".into()), ..Default::default() },
            Investor { name: "Unknown".into(), ..Default::default() },
            Investor { name: "Big".into(), total_invested: Some("$1.1B".into()), ..Default::default() },
        ];
        sort_by_invested(&mut investors);

        let names: Vec<_> = investors.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Big", "Small", "Unknown"]);
    }

    #[test]
    fn test_investor_type_rename() {
        let inv: Investor =
            serde_json::from_str(r#"{"name": "EQT Ventures", "type": "vc", "hq": "Sweden"}"#).unwrap();
        assert_eq!(inv.kind.as_deref(), Some("vc"));
        assert_eq!(inv.field(Field::Kind), FieldValue::Text("vc"));
    }

    fn bolag(name: &str, kind: &str, discount: f64, mcap: &str) -> InvestmentCompany {
        InvestmentCompany {
            name: name.into(),
            kind: Some(kind.into()),
            discount_numeric: Some(discount),
            market_cap: Some(mcap.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_investment_company_filters() {
        let investor = bolag("Investor AB", "Investment Company", 12.5, "SEK 800B");
        let balder = bolag("Balder", "Fastighetsbolag", -3.0, "SEK 8.5B");

        assert!(investor.passes(InvestmentCompanyFilter::Investment));
        assert!(!balder.passes(InvestmentCompanyFilter::Investment));
        assert!(balder.passes(InvestmentCompanyFilter::RealEstate));
        assert!(investor.passes(InvestmentCompanyFilter::Discount));
        assert!(balder.passes(InvestmentCompanyFilter::Premium));
        assert!(investor.passes(InvestmentCompanyFilter::Large));
        assert!(!balder.passes(InvestmentCompanyFilter::Large));
    }

    #[test]
    fn test_investment_company_sorts() {
        let mut list = vec![
            bolag("Latour", "Investment Company", 5.0, "SEK 150B"),
            bolag("Bure", "Investment Company", -10.0, "SEK 20B"),
            bolag("Kinnevik", "Investment Company", 30.0, "SEK 25B"),
        ];

        sort_investment_companies(&mut list, InvestmentCompanySort::DiscountDesc);
        assert_eq!(list[0].name, "Kinnevik");

        sort_investment_companies(&mut list, InvestmentCompanySort::DiscountAsc);
        assert_eq!(list[0].name, "Bure");

        sort_investment_companies(&mut list, InvestmentCompanySort::Name);
        assert_eq!(list[0].name, "Bure");
        assert_eq!(list[2].name, "Latour");

        sort_investment_companies(&mut list, InvestmentCompanySort::MarketCap);
        assert_eq!(list[0].name, "Latour");
    }

    #[test]
    fn test_pe_firm_logo_keys() {
        let firm: PeFirm =
            serde_json::from_str(r#"{"name": "EQT", "logo": "https://eqtgroup.com/logo.svg"}"#).unwrap();
        assert_eq!(firm.logo_url(), Some("https://eqtgroup.com/logo.svg"));

        let both: PeFirm = serde_json::from_str(
            r#"{"name": "EQT", "logo_url": "https://eqtgroup.com/new.svg", "logo": "https://eqtgroup.com/old.svg"}"#,
        )
        .unwrap();
        assert_eq!(both.logo_url(), Some("https://eqtgroup.com/new.svg"));
    }

    #[test]
    fn test_investor_both_headquarters_keys() {
        let inv: Investor = serde_json::from_str(
            r#"{"name": "Creandum", "hq": "", "headquarters": "Stockholm, Sweden"}"#,
        )
        .unwrap();
        assert_eq!(inv.headquarters(), Some("Stockholm, Sweden"));
        assert_eq!(inv.field(Field::Region), FieldValue::Text("Stockholm, Sweden"));
    }

    #[test]
    fn test_numeric_money_fields_and_null_names() {
        let office: FamilyOffice =
            serde_json::from_str(r#"{"name": null, "aum": 45000000000}"#).unwrap();
        assert_eq!(office.name, "");
        assert_eq!(office.aum.as_deref(), Some("45000000000"));

        let bolag: InvestmentCompany = serde_json::from_str(
            r#"{"name": "Kinnevik", "discount_numeric": "30.5", "market_cap": 25.2}"#,
        )
        .unwrap();
        assert_eq!(bolag.discount_numeric, Some(30.5));
        assert_eq!(bolag.market_cap_value(), 25.2);

        let investor: Investor =
            serde_json::from_str(r#"{"name": "EQT Ventures", "total_invested": 1200}"#).unwrap();
        assert_eq!(investor.invested_millions(), 1200.0);

        let firm: PeFirm = serde_json::from_str(r#"{"name": "Altor", "aum": 10.5}"#).unwrap();
        assert_eq!(firm.aum.as_deref(), Some("10.5"));
    }
}
