// 📊 Headline Stats - summary numbers shown above the listings

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::entities::{Company, Fund, FundStatus, NewsArticle};

/// Companies founded in or after this year count as recent.
pub const RECENT_FOUNDING_YEAR: i32 = 2023;

/// Closed funds with this vintage or newer count as recent closes.
pub const RECENT_CLOSE_VINTAGE: i32 = 2024;

// ============================================================================
// AI COMPANIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    pub total: usize,
    pub unicorns: usize,
    pub yc_alumni: usize,
    pub employees: u64,
    pub recently_founded: usize,
    pub countries: usize,
}

impl CompanyStats {
    pub fn compute(companies: &[Company]) -> Self {
        let countries: BTreeSet<&str> = companies.iter().filter_map(Company::country).collect();

        CompanyStats {
            total: companies.len(),
            unicorns: companies.iter().filter(|c| c.is_unicorn()).count(),
            yc_alumni: companies.iter().filter(|c| c.is_yc_alumni()).count(),
            employees: companies
                .iter()
                .filter_map(|c| c.employees.as_deref())
                .filter_map(estimate_employees)
                .fold(0, u64::saturating_add),
            recently_founded: companies
                .iter()
                .filter(|c| c.founded_year().is_some_and(|y| y >= RECENT_FOUNDING_YEAR))
                .count(),
            countries: countries.len(),
        }
    }

    /// "12K+" above a thousand, "850+" below.
    pub fn employees_label(&self) -> String {
        format_headcount(self.employees)
    }
}

/// "50-100" → 75, "100+" → 100, "1,200" → 1200; `None` when no digits.
pub fn estimate_employees(text: &str) -> Option<u64> {
    if let Some((low, high)) = text.split_once('-') {
        let low = digits(low)?;
        let high = digits(high)?;
        // Float midpoint; `as u64` saturates instead of wrapping
        return Some(((low as f64 + high as f64) / 2.0).round() as u64);
    }
    digits(text)
}

fn digits(text: &str) -> Option<u64> {
    let only: String = text.chars().filter(char::is_ascii_digit).collect();
    only.parse().ok()
}

pub fn format_headcount(total: u64) -> String {
    if total > 1000 {
        format!("{}K+", (total as f64 / 1000.0).round() as u64)
    } else {
        format!("{}+", total)
    }
}

// ============================================================================
// FUNDRAISING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundStats {
    pub total: usize,
    pub active: usize,
    pub recent_closes: usize,
    pub nordic: usize,
}

impl FundStats {
    pub fn compute(funds: &[Fund]) -> Self {
        FundStats {
            total: funds.len(),
            active: funds
                .iter()
                .filter(|f| f.status() != FundStatus::Closed)
                .count(),
            recent_closes: funds
                .iter()
                .filter(|f| f.status() == FundStatus::Closed)
                .filter(|f| f.vintage_year().is_some_and(|v| v >= RECENT_CLOSE_VINTAGE))
                .count(),
            nordic: funds.iter().filter(|f| f.is_nordic()).count(),
        }
    }
}

// ============================================================================
// NEWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsStats {
    pub total: usize,
    pub funding: usize,
    pub sources: usize,
}

impl NewsStats {
    pub fn compute(articles: &[NewsArticle]) -> Self {
        let sources: BTreeSet<&str> = articles
            .iter()
            .filter_map(|a| a.source.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        NewsStats {
            total: articles.len(),
            funding: articles.iter().filter(|a| a.is_funding_news()).count(),
            sources: sources.len(),
        }
    }
}

// ============================================================================
// BACKEND SUMMARY
// ============================================================================

/// Totals reported by `/api/analytics/summary`; absent counts stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    pub total_companies: Option<u64>,
    pub total_news: Option<u64>,
    pub total_pe_firms: Option<u64>,
    pub total_family_offices: Option<u64>,
    /// News items whose category mentions a deal
    pub latest_deals: Option<u64>,
}

impl AnalyticsSummary {
    pub fn label(count: Option<u64>) -> String {
        count.map_or_else(|| "N/A".to_string(), |n| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(json: &str) -> Company {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_estimate_employees() {
        assert_eq!(estimate_employees("50-100"), Some(75));
        assert_eq!(estimate_employees("100+"), Some(100));
        assert_eq!(estimate_employees("1,200"), Some(1200));
        assert_eq!(estimate_employees("11-50"), Some(31));
        assert_eq!(estimate_employees("unknown"), None);
        assert_eq!(estimate_employees("-"), None);
    }

    #[test]
    fn test_huge_headcounts_saturate() {
        assert_eq!(estimate_employees("18446744073709551615-1"), Some(u64::MAX / 2 + 1));

        let companies = vec![
            company(r#"{"name": "A", "employees": "18446744073709551615"}"#),
            company(r#"{"name": "B", "employees": "18446744073709551615-18446744073709551615"}"#),
            company(r#"{"name": "C", "employees": 10}"#),
        ];
        assert_eq!(CompanyStats::compute(&companies).employees, u64::MAX);
    }

    #[test]
    fn test_format_headcount() {
        assert_eq!(format_headcount(850), "850+");
        assert_eq!(format_headcount(1000), "1000+");
        assert_eq!(format_headcount(1500), "2K+");
        assert_eq!(format_headcount(12_340), "12K+");
    }

    #[test]
    fn test_company_stats() {
        let companies = vec![
            company(
                r#"{"name": "Acme", "category": "Unicorn", "investors": ["Y Combinator"],
                    "employees": "50-100", "founded": 2023, "headquarters": "Stockholm, Sweden"}"#,
            ),
            company(
                r#"{"name": "Bolt", "valuation": "$1.2 billion", "employees": 1000,
                    "founded": "2019", "headquarters": "Tallinn, Estonia"}"#,
            ),
            company(r#"{"name": "Stealth", "headquarters": "Uppsala, Sweden"}"#),
        ];

        let stats = CompanyStats::compute(&companies);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unicorns, 2);
        assert_eq!(stats.yc_alumni, 1);
        assert_eq!(stats.employees, 1075);
        assert_eq!(stats.employees_label(), "1K+");
        assert_eq!(stats.recently_founded, 1);
        assert_eq!(stats.countries, 2);
    }

    #[test]
    fn test_fund_stats() {
        let funds: Vec<Fund> = serde_json::from_str(
            r#"[
                {"firm": "EQT", "status": "Closed", "vintage": 2024, "geography": "Nordic"},
                {"firm": "Altor", "status": "Closed", "vintage": 2021},
                {"firm": "Blackstone", "status": "Marketing", "geography": "Global"},
                {"firm": "Verdane", "status": "First Close"}
            ]"#,
        )
        .unwrap();

        let stats = FundStats::compute(&funds);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.recent_closes, 1);
        assert_eq!(stats.nordic, 3);
    }

    #[test]
    fn test_analytics_summary_is_sparse() {
        let summary: AnalyticsSummary =
            serde_json::from_str(r#"{"total_companies": 349, "total_pe_firms": 14, "extra": true}"#)
                .unwrap();
        assert_eq!(summary.total_companies, Some(349));
        assert_eq!(summary.total_news, None);
        assert_eq!(AnalyticsSummary::label(summary.total_pe_firms), "14");
        assert_eq!(AnalyticsSummary::label(summary.latest_deals), "N/A");
    }

    #[test]
    fn test_news_stats() {
        let articles: Vec<NewsArticle> = serde_json::from_str(
            r#"[
                {"title": "Einride raises $110 million", "source": "Breakit"},
                {"title": "EQT acquires Acme", "source": "Breakit"},
                {"title": "New AI lab opens", "source": " "}
            ]"#,
        )
        .unwrap();

        let stats = NewsStats::compute(&articles);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.funding, 1);
        assert_eq!(stats.sources, 1);
    }
}
