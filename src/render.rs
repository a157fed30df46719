// 🃏 Card Props - what a listing shows for one entity
//
// Renderers (the terminal UI, `list` output) only ever see `CardProps`.
// Missing fields render as "N/A"; the logo slot is a `LogoView`, so stealth
// companies never get a candidate list.

use serde::Serialize;

use crate::entities::{
    Company, FamilyOffice, Fund, InvestmentCompany, Investor, LogoSubject, NewsArticle, PeFirm,
    PortfolioCompany,
};
use crate::logo::{FirmLogoDirectory, LogoPolicy, LogoView};

pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for news items in the logo slot.
pub const NEWS_GLYPH: &str = "📰";

/// Tags shown before collapsing into "+N".
const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardProps {
    pub title: String,
    pub subtitle: String,
    pub badges: Vec<String>,
    /// Label → value rows for the detail panel
    pub details: Vec<(String, String)>,
    pub flag: Option<&'static str>,
    pub logo: LogoView,
}

impl CardProps {
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// What card construction may look at besides the entity itself.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub policy: &'a LogoPolicy,
    pub firms: &'a FirmLogoDirectory,
}

impl<'a> CardContext<'a> {
    pub fn new(policy: &'a LogoPolicy, firms: &'a FirmLogoDirectory) -> Self {
        CardContext { policy, firms }
    }
}

/// Anything a listing can show as a card.
pub trait Card {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps;
}

// ============================================================================
// HELPERS
// ============================================================================

fn or_na(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn row(label: &str, value: Option<&str>) -> (String, String) {
    (label.to_string(), or_na(value))
}

fn list_row(label: &str, values: &[String]) -> (String, String) {
    let value = if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    };
    row(label, value.as_deref())
}

/// First few tags plus a "+N" marker for the rest.
pub fn tags(values: &[String]) -> Vec<String> {
    let mut shown: Vec<String> = values.iter().take(MAX_TAGS).cloned().collect();
    if values.len() > MAX_TAGS {
        shown.push(format!("+{}", values.len() - MAX_TAGS));
    }
    shown
}

/// Flag for a location string; globe for unknown places, none when empty.
pub fn country_flag(location: Option<&str>) -> Option<&'static str> {
    let location = location.map(str::trim).filter(|s| !s.is_empty())?.to_lowercase();
    let has = |needle: &str| location.contains(needle);
    let word = |w: &str| {
        location
            .split(|c: char| !c.is_alphanumeric())
            .any(|part| part == w)
    };

    let flag = if has("sweden") {
        "🇸🇪"
    } else if has("finland") {
        "🇫🇮"
    } else if has("norway") {
        "🇳🇴"
    } else if has("denmark") {
        "🇩🇰"
    } else if has("iceland") {
        "🇮🇸"
    } else if word("uk") || has("united kingdom") || has("london") {
        "🇬🇧"
    } else if has("germany") || has("berlin") {
        "🇩🇪"
    } else if has("france") || has("paris") {
        "🇫🇷"
    } else if has("netherlands") || has("amsterdam") {
        "🇳🇱"
    } else if has("switzerland") {
        "🇨🇭"
    } else if has("estonia") {
        "🇪🇪"
    } else if has("poland") {
        "🇵🇱"
    } else if word("usa")
        || has("united states")
        || has("san francisco")
        || has("new york")
        || has("california")
        || has("boston")
    {
        "🇺🇸"
    } else if has("canada") {
        "🇨🇦"
    } else {
        "🌍"
    };
    Some(flag)
}

// ============================================================================
// CARDS
// ============================================================================

impl Card for Company {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        let mut badges = Vec::new();
        if self.is_unicorn() {
            badges.push("🦄 Unicorn".to_string());
        } else if let Some(category) = self.category.as_deref() {
            badges.push(category.to_string());
        }
        if self.is_yc_alumni() {
            badges.push("YC".to_string());
        }
        badges.extend(tags(self.technologies()));

        CardProps {
            title: self.name.clone(),
            subtitle: format!(
                "Founded {} • {}",
                self.founded.as_deref().unwrap_or("Recently"),
                or_na(self.headquarters.as_deref())
            ),
            badges,
            details: vec![
                row("Category", self.category.as_deref()),
                row("Stage", self.stage.as_deref()),
                row("Industry", self.industry.as_deref()),
                row("Valuation", self.valuation.as_deref()),
                row("ARR", self.arr.as_deref()),
                row("Employees", self.employees.as_deref()),
                list_row("Investors", &self.investors),
                row("Website", self.website.as_deref()),
                row("Recent activity", self.recent_activity.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: country_flag(self.headquarters.as_deref()),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for PortfolioCompany {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        let badges = [self.sector.as_deref(), self.status.as_deref()]
            .into_iter()
            .flatten()
            .map(String::from)
            .collect();

        CardProps {
            title: self.company_name().to_string(),
            subtitle: format!(
                "{} • entry {}",
                or_na(self.source.as_deref()),
                or_na(self.entry.as_deref())
            ),
            badges,
            details: vec![
                row("Owner", self.source.as_deref()),
                row("Fund", self.fund.as_deref()),
                row("Sector", self.sector.as_deref()),
                row("Market", self.market.as_deref()),
                row("Headquarters", self.headquarters.as_deref()),
                row("Employees", self.employees.as_deref()),
                row("Website", self.website.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: country_flag(self.headquarters.as_deref().or(self.market.as_deref())),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for Investor {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        let badges = self
            .kind
            .as_deref()
            .map(|k| vec![k.to_uppercase()])
            .unwrap_or_default();

        CardProps {
            title: self.name.clone(),
            subtitle: format!(
                "{} invested • {} AI deals",
                or_na(self.total_invested.as_deref()),
                or_na(self.ai_deals_count.as_deref())
            ),
            badges,
            details: vec![
                row("Type", self.kind.as_deref()),
                row("HQ", self.headquarters()),
                row("Total invested", self.total_invested.as_deref()),
                list_row("Portfolio", &self.portfolio_companies),
                list_row("Notable investments", &self.notable_investments),
                row("Website", self.website.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: country_flag(self.headquarters()),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for FamilyOffice {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        CardProps {
            title: self.name.clone(),
            subtitle: format!(
                "{} family • AUM {}",
                or_na(self.founding_family.as_deref()),
                or_na(self.aum.as_deref())
            ),
            badges: tags(&self.investment_focus),
            details: vec![
                row("Family", self.founding_family.as_deref()),
                row("Headquarters", self.headquarters.as_deref()),
                row("AUM", self.aum.as_deref()),
                row("Founded", self.founded.as_deref()),
                list_row("Holdings", &self.notable_holdings),
                row("Website", self.website.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: country_flag(self.headquarters.as_deref()),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for InvestmentCompany {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        let discount = self.discount_numeric.map(|d| {
            if d < 0.0 {
                format!("{:.1}% premium", -d)
            } else {
                format!("{:.1}% discount", d)
            }
        });

        let mut badges = Vec::new();
        if let Some(kind) = self.kind.as_deref() {
            badges.push(kind.to_string());
        }
        if let Some(d) = &discount {
            badges.push(d.clone());
        }

        CardProps {
            title: self.name.clone(),
            subtitle: format!(
                "{} • market cap {}",
                or_na(self.ticker.as_deref()),
                or_na(self.market_cap.as_deref())
            ),
            badges,
            details: vec![
                row("Ticker", self.ticker.as_deref()),
                row("Type", self.kind.as_deref()),
                row("NAV", discount.as_deref()),
                row("Market cap", self.market_cap.as_deref()),
                list_row("Holdings", &self.holdings),
                list_row("Focus", &self.investment_focus),
                row("Website", self.website.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: Some("🇸🇪"),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for PeFirm {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        CardProps {
            title: self.name.clone(),
            subtitle: format!(
                "{} • AUM {}",
                or_na(self.headquarters.as_deref()),
                or_na(self.aum.as_deref())
            ),
            badges: Vec::new(),
            details: vec![
                row("Headquarters", self.headquarters.as_deref()),
                row("AUM", self.aum.as_deref()),
                row("Founded", self.founded.as_deref()),
                row("Website", self.website.as_deref()),
                row("Description", self.description.as_deref()),
            ],
            flag: country_flag(self.headquarters.as_deref()),
            logo: LogoView::for_subject(self, ctx.policy),
        }
    }
}

impl Card for Fund {
    fn card(&self, ctx: &CardContext<'_>) -> CardProps {
        let vintage = self.vintage_year().map(|y| y.to_string());
        // Rows without their own logo borrow the firm's by name
        let logo = if LogoSubject::logo_url(self).is_some() {
            LogoView::for_subject(self, ctx.policy)
        } else {
            LogoView::for_subject(&ctx.firms.subject(&self.firm), ctx.policy)
        };
        let badges = [self.status.as_deref(), vintage.as_deref()]
            .into_iter()
            .flatten()
            .map(String::from)
            .collect();

        CardProps {
            title: self.firm.clone(),
            subtitle: or_na(self.fund_name()),
            badges,
            details: vec![
                row("Fund", self.fund_name()),
                row("Status", self.status.as_deref()),
                row("Vintage", vintage.as_deref()),
                row("Size", Some(self.display_size())),
                row("Strategy", Some(self.display_strategy())),
                row("Geography", Some(self.display_geography())),
                row("Source", self.source.as_deref()),
            ],
            flag: country_flag(Some(self.display_geography()).filter(|g| *g != NOT_AVAILABLE)),
            logo,
        }
    }
}

impl Card for NewsArticle {
    fn card(&self, _ctx: &CardContext<'_>) -> CardProps {
        let published = self.published_at().map(|d| d.format("%Y-%m-%d").to_string());

        CardProps {
            title: self.title.clone(),
            subtitle: format!(
                "{} • {}",
                or_na(self.source.as_deref()),
                or_na(published.as_deref().or(self.published_text()))
            ),
            badges: self.category.iter().cloned().collect(),
            details: vec![
                row("Source", self.source.as_deref()),
                row("Published", published.as_deref().or(self.published_text())),
                row("Category", self.category.as_deref()),
                row("Region", self.region.as_deref()),
                row("Link", self.link_url()),
                row("Summary", self.summary_text()),
            ],
            flag: country_flag(self.region.as_deref()),
            logo: LogoView::Glyph(NEWS_GLYPH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::STEALTH_GLYPH;

    fn card_of<C: Card>(entity: &C) -> CardProps {
        let policy = LogoPolicy::default();
        let firms = FirmLogoDirectory::new();
        entity.card(&CardContext::new(&policy, &firms))
    }

    #[test]
    fn test_missing_fields_render_na() {
        let props = card_of(&Company {
            name: "Sana".to_string(),
            ..Default::default()
        });

        assert_eq!(props.detail("Stage"), Some(NOT_AVAILABLE));
        assert_eq!(props.detail("Investors"), Some(NOT_AVAILABLE));
        assert_eq!(props.subtitle, "Founded Recently • N/A");
        assert_eq!(props.flag, None);
    }

    #[test]
    fn test_company_card_badges() {
        let company: Company = serde_json::from_str(
            r#"{"name": "Acme AI", "category": "Unicorn", "investors": ["Y Combinator"],
                "technology": ["a", "b", "c", "d", "e", "f", "g"],
                "headquarters": "Stockholm, Sweden"}"#,
        )
        .unwrap();

        let props = card_of(&company);
        assert_eq!(props.badges[0], "🦄 Unicorn");
        assert_eq!(props.badges[1], "YC");
        assert_eq!(props.badges.last().map(String::as_str), Some("+2"));
        assert_eq!(props.flag, Some("🇸🇪"));
        assert!(props.logo.candidates().is_some());
    }

    #[test]
    fn test_stealth_card_uses_glyph() {
        let props = card_of(&Company {
            name: "Stealth AI".to_string(),
            website: Some("https://stealth.ai".to_string()),
            ..Default::default()
        });

        assert_eq!(props.logo, LogoView::Glyph(STEALTH_GLYPH));
    }

    #[test]
    fn test_country_flag() {
        assert_eq!(country_flag(Some("Helsinki, Finland")), Some("🇫🇮"));
        assert_eq!(country_flag(Some("London, UK")), Some("🇬🇧"));
        assert_eq!(country_flag(Some("San Francisco, CA")), Some("🇺🇸"));
        assert_eq!(country_flag(Some("Dubai")), Some("🌍"));
        assert_eq!(country_flag(Some("  ")), None);
        assert_eq!(country_flag(None), None);
    }

    #[test]
    fn test_investment_company_premium() {
        let props = card_of(&InvestmentCompany {
            name: "Investor AB".to_string(),
            discount_numeric: Some(-3.3),
            ..Default::default()
        });

        assert_eq!(props.detail("NAV"), Some("3.3% premium"));
    }

    #[test]
    fn test_fund_card_falls_back_to_directory() {
        let policy = LogoPolicy::default();
        let directory = FirmLogoDirectory::from_firms(&[PeFirm {
            name: "Altor Equity Partners".to_string(),
            logo_url: Some("https://altor.com/logo.png".to_string()),
            ..Default::default()
        }]);
        let fund = Fund {
            firm: "Altor".to_string(),
            vintage: Some("2023".to_string()),
            ..Default::default()
        };

        let props = fund.card(&CardContext::new(&policy, &directory));
        assert_eq!(props.badges, vec!["2023"]);
        assert_eq!(props.detail("Size"), Some(NOT_AVAILABLE));
        let list = props.logo.candidates().unwrap();
        assert_eq!(list.get(0), Some("https://altor.com/logo.png"));
    }
}
