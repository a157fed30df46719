// 📑 Pages - one controller per dashboard view
//
// A page owns its records, its filter criteria and its load state. Every
// criteria change re-runs the filter over the full record set, so `visible`
// is always `apply(all, criteria)` plus the page's own refinement.

use clap::ValueEnum;
use std::fmt::Display;
use tracing::{info, warn};

use crate::api::{DashboardClient, Endpoint};
use crate::entities::{
    fund, investor, news, Company, FamilyOffice, Field, Fund, InvestmentCompany, Investor,
    NewsArticle, PeFirm, PortfolioCompany, Record,
};
use crate::filter::{distinct_values, FieldMap, FilterCriteria, FilterEngine};
use crate::logo::FirmLogoDirectory;
use crate::render::{Card, CardContext, CardProps};

// ============================================================================
// PAGE KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PageKind {
    AiCompanies,
    AiMap,
    AiInvestors,
    Portfolio,
    Fundraising,
    FamilyOffices,
    InvestmentCompanies,
    PeFirms,
    News,
}

impl PageKind {
    pub const ALL: [PageKind; 9] = [
        PageKind::AiCompanies,
        PageKind::AiMap,
        PageKind::AiInvestors,
        PageKind::Portfolio,
        PageKind::Fundraising,
        PageKind::FamilyOffices,
        PageKind::InvestmentCompanies,
        PageKind::PeFirms,
        PageKind::News,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::AiCompanies => "AI Companies",
            PageKind::AiMap => "AI Map",
            PageKind::AiInvestors => "AI Investors",
            PageKind::Portfolio => "Portfolio",
            PageKind::Fundraising => "Fundraising",
            PageKind::FamilyOffices => "Family Offices",
            PageKind::InvestmentCompanies => "Investment Companies",
            PageKind::PeFirms => "PE Firms",
            PageKind::News => "News",
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            PageKind::AiCompanies | PageKind::AiMap => Endpoint::AiCompanies,
            PageKind::AiInvestors => Endpoint::AiInvestors,
            PageKind::Portfolio => Endpoint::Portfolio,
            PageKind::Fundraising => Endpoint::Fundraising,
            PageKind::FamilyOffices => Endpoint::FamilyOffices,
            PageKind::InvestmentCompanies => Endpoint::InvestmentCompanies,
            PageKind::PeFirms => Endpoint::PeFirms,
            PageKind::News => Endpoint::News,
        }
    }

    /// Which entity field backs each criterion on this page.
    pub fn field_map(&self) -> FieldMap {
        match self {
            PageKind::AiCompanies => FieldMap {
                category: Some(Field::Category),
                stage: Some(Field::Stage),
                technology: Some(Field::Technology),
                region: Some(Field::Headquarters),
                investors: Some(Field::Investors),
                search: vec![
                    Field::Name,
                    Field::Description,
                    Field::Category,
                    Field::Investors,
                    Field::Technology,
                ],
            },
            PageKind::AiMap => FieldMap {
                category: Some(Field::Category),
                stage: None,
                technology: Some(Field::Technology),
                region: Some(Field::Region),
                investors: None,
                search: vec![Field::Name, Field::Headquarters, Field::Category],
            },
            PageKind::AiInvestors => FieldMap {
                category: Some(Field::Kind),
                stage: None,
                technology: None,
                region: Some(Field::Region),
                investors: None,
                search: vec![
                    Field::Name,
                    Field::Description,
                    Field::Kind,
                    Field::Headquarters,
                    Field::Holdings,
                    Field::Focus,
                ],
            },
            PageKind::Portfolio => FieldMap {
                category: Some(Field::Sector),
                stage: Some(Field::Status),
                technology: None,
                region: Some(Field::Market),
                investors: None,
                search: vec![
                    Field::Name,
                    Field::Sector,
                    Field::Source,
                    Field::Market,
                    Field::Description,
                ],
            },
            PageKind::Fundraising => FieldMap {
                category: Some(Field::Strategy),
                stage: Some(Field::Status),
                technology: None,
                region: Some(Field::Geography),
                investors: None,
                search: vec![
                    Field::Name,
                    Field::Description,
                    Field::Strategy,
                    Field::Geography,
                ],
            },
            PageKind::FamilyOffices => FieldMap {
                category: Some(Field::Focus),
                stage: None,
                technology: None,
                region: Some(Field::Headquarters),
                investors: None,
                search: vec![
                    Field::Name,
                    Field::Family,
                    Field::Description,
                    Field::Focus,
                    Field::Holdings,
                ],
            },
            PageKind::InvestmentCompanies => FieldMap {
                category: Some(Field::Kind),
                stage: None,
                technology: None,
                region: None,
                investors: None,
                search: vec![
                    Field::Name,
                    Field::Kind,
                    Field::Holdings,
                    Field::Focus,
                    Field::Description,
                ],
            },
            PageKind::PeFirms => FieldMap {
                category: None,
                stage: None,
                technology: None,
                region: Some(Field::Headquarters),
                investors: None,
                search: vec![Field::Name, Field::Description, Field::Headquarters],
            },
            PageKind::News => FieldMap {
                category: Some(Field::Category),
                stage: None,
                technology: None,
                region: Some(Field::Region),
                investors: None,
                search: vec![Field::Name, Field::Description, Field::Source],
            },
        }
    }

    pub fn next(&self) -> Self {
        let i = self.position();
        PageKind::ALL[(i + 1) % PageKind::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let i = self.position();
        PageKind::ALL[(i + PageKind::ALL.len() - 1) % PageKind::ALL.len()]
    }

    fn position(&self) -> usize {
        PageKind::ALL.iter().position(|k| k == self).unwrap_or(0)
    }
}

// ============================================================================
// PAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Shown inline in place of the listing
    Failed(String),
}

/// Extra page-specific predicate applied after the criteria.
pub type Refinement<T> = Box<dyn Fn(&T) -> bool>;

pub struct Page<T> {
    kind: PageKind,
    engine: FilterEngine,
    order: Option<fn(&mut [T])>,
    refinement: Option<Refinement<T>>,
    all: Vec<T>,
    visible: Vec<T>,
    criteria: FilterCriteria,
    state: LoadState,
}

impl<T: Record + Clone> Page<T> {
    pub fn new(kind: PageKind) -> Self {
        Page {
            kind,
            engine: FilterEngine::new(kind.field_map()),
            order: None,
            refinement: None,
            all: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            state: LoadState::Loading,
        }
    }

    /// Default ordering applied whenever records arrive.
    pub fn ordered_by(mut self, order: fn(&mut [T])) -> Self {
        self.order = Some(order);
        self
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn all(&self) -> &[T] {
        &self.all
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn finish_load<E: Display>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(mut records) => {
                if let Some(order) = self.order {
                    order(&mut records);
                }
                info!(page = self.kind.title(), count = records.len(), "page ready");
                self.all = records;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(page = self.kind.title(), error = %err, "page failed to load");
                self.all.clear();
                self.state = LoadState::Failed(err.to_string());
            }
        }
        self.refresh();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    pub fn update_criteria(&mut self, update: impl FnOnce(&mut FilterCriteria)) {
        update(&mut self.criteria);
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.refinement = None;
        self.set_criteria(FilterCriteria::default());
    }

    pub fn refine(&mut self, refinement: Option<Refinement<T>>) {
        self.refinement = refinement;
        self.refresh();
    }

    /// Re-sort the full record set; the filter keeps that order.
    pub fn reorder(&mut self, sort: impl FnOnce(&mut [T])) {
        sort(&mut self.all);
        self.refresh();
    }

    fn refresh(&mut self) {
        let mut visible = self.engine.apply(&self.all, &self.criteria);
        if let Some(keep) = &self.refinement {
            visible.retain(|r| keep(r));
        }
        self.visible = visible;
    }
}

/// Object-safe view of a page for renderers.
pub trait Listing {
    fn kind(&self) -> PageKind;

    fn title(&self) -> &'static str {
        self.kind().title()
    }

    fn state(&self) -> &LoadState;

    fn criteria(&self) -> &FilterCriteria;

    fn set_criteria(&mut self, criteria: FilterCriteria);

    fn clear_filters(&mut self);

    fn total(&self) -> usize;

    fn visible_len(&self) -> usize;

    fn card_at(&self, index: usize, ctx: &CardContext<'_>) -> Option<CardProps>;

    fn cards(&self, ctx: &CardContext<'_>) -> Vec<CardProps> {
        (0..self.visible_len())
            .filter_map(|i| self.card_at(i, ctx))
            .collect()
    }

    /// Distinct values of the category field, for the selector.
    fn category_options(&self) -> Vec<String>;
}

impl<T: Record + Card + Clone> Listing for Page<T> {
    fn kind(&self) -> PageKind {
        self.kind
    }

    fn state(&self) -> &LoadState {
        &self.state
    }

    fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    fn set_criteria(&mut self, criteria: FilterCriteria) {
        Page::set_criteria(self, criteria)
    }

    fn clear_filters(&mut self) {
        Page::clear_filters(self)
    }

    fn total(&self) -> usize {
        self.all.len()
    }

    fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn card_at(&self, index: usize, ctx: &CardContext<'_>) -> Option<CardProps> {
        self.visible.get(index).map(|r| r.card(ctx))
    }

    fn category_options(&self) -> Vec<String> {
        match self.engine.field_map().category {
            Some(field) => distinct_values(&self.all, field),
            None => Vec::new(),
        }
    }
}

// ============================================================================
// PAGE-SPECIFIC VIEWS
// ============================================================================

impl Page<Fund> {
    /// Keep only funds of one vintage; `None` shows every vintage.
    pub fn filter_vintage(&mut self, year: Option<i32>) {
        self.fund_view(year, false);
    }

    /// Vintage filter plus the curated-Nordic switch.
    pub fn fund_view(&mut self, year: Option<i32>, curated_nordic: bool) {
        if year.is_none() && !curated_nordic {
            self.refine(None);
            return;
        }
        let refinement: Refinement<Fund> = Box::new(move |f: &Fund| {
            year.map_or(true, |y| f.vintage_year() == Some(y))
                && (!curated_nordic || f.is_curated_nordic())
        });
        self.refine(Some(refinement));
    }

    pub fn vintages(&self) -> Vec<i32> {
        fund::vintage_years(&self.all)
    }
}

impl Page<InvestmentCompany> {
    pub fn quick_filter(&mut self, filter: investor::InvestmentCompanyFilter) {
        let refinement: Refinement<InvestmentCompany> =
            Box::new(move |c: &InvestmentCompany| c.passes(filter));
        self.refine(Some(refinement));
    }

    pub fn sort_mode(&mut self, sort: investor::InvestmentCompanySort) {
        self.reorder(|all| investor::sort_investment_companies(all, sort));
    }
}

impl Page<NewsArticle> {
    pub fn channel(&self, channel: news::NewsChannel) -> Vec<NewsArticle> {
        news::channel_feed(&self.visible, channel)
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub struct Dashboard {
    pub companies: Page<Company>,
    pub ai_map: Page<Company>,
    pub investors: Page<Investor>,
    pub portfolio: Page<PortfolioCompany>,
    pub funds: Page<Fund>,
    pub family_offices: Page<FamilyOffice>,
    pub investment_companies: Page<InvestmentCompany>,
    pub pe_firms: Page<PeFirm>,
    pub news: Page<NewsArticle>,
    /// Firm-name logo lookup built from the PE firms payload
    pub firms: FirmLogoDirectory,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Every page in `Loading`.
    pub fn new() -> Self {
        Dashboard {
            companies: Page::new(PageKind::AiCompanies),
            ai_map: Page::new(PageKind::AiMap),
            investors: Page::new(PageKind::AiInvestors).ordered_by(investor::sort_by_invested),
            portfolio: Page::new(PageKind::Portfolio),
            funds: Page::new(PageKind::Fundraising)
                .ordered_by(|funds: &mut [Fund]| funds.sort_by(fund::display_order)),
            family_offices: Page::new(PageKind::FamilyOffices),
            investment_companies: Page::new(PageKind::InvestmentCompanies).ordered_by(|all: &mut [InvestmentCompany]| {
                investor::sort_investment_companies(
                    all,
                    investor::InvestmentCompanySort::DiscountDesc,
                )
            }),
            pe_firms: Page::new(PageKind::PeFirms).ordered_by(|firms: &mut [PeFirm]| {
                firms.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
            news: Page::new(PageKind::News).ordered_by(news::sort_newest_first),
            firms: FirmLogoDirectory::new(),
        }
    }

    /// Fetch every page at once; each failure stays local to its page.
    pub async fn load(client: &DashboardClient) -> Self {
        let (companies, investors, portfolio, funds, family_offices, investment_companies, pe_firms, news) = tokio::join!(
            client.ai_companies(),
            client.ai_investors(),
            client.portfolio(),
            client.fundraising(),
            client.family_offices(),
            client.investment_companies(),
            client.pe_firms(),
            client.news(),
        );

        let mut dashboard = Dashboard::new();
        if let Ok(firms) = &pe_firms {
            dashboard.firms = FirmLogoDirectory::from_firms(firms);
        }

        dashboard
            .ai_map
            .finish_load(companies.as_ref().cloned().map_err(|e| e.to_string()));
        dashboard.companies.finish_load(companies);
        dashboard.investors.finish_load(investors);
        dashboard.portfolio.finish_load(portfolio);
        dashboard.funds.finish_load(funds);
        dashboard.family_offices.finish_load(family_offices);
        dashboard.investment_companies.finish_load(investment_companies);
        dashboard.pe_firms.finish_load(pe_firms);
        dashboard.news.finish_load(news);
        dashboard
    }

    pub fn listing(&self, kind: PageKind) -> &dyn Listing {
        match kind {
            PageKind::AiCompanies => &self.companies,
            PageKind::AiMap => &self.ai_map,
            PageKind::AiInvestors => &self.investors,
            PageKind::Portfolio => &self.portfolio,
            PageKind::Fundraising => &self.funds,
            PageKind::FamilyOffices => &self.family_offices,
            PageKind::InvestmentCompanies => &self.investment_companies,
            PageKind::PeFirms => &self.pe_firms,
            PageKind::News => &self.news,
        }
    }

    pub fn listing_mut(&mut self, kind: PageKind) -> &mut dyn Listing {
        match kind {
            PageKind::AiCompanies => &mut self.companies,
            PageKind::AiMap => &mut self.ai_map,
            PageKind::AiInvestors => &mut self.investors,
            PageKind::Portfolio => &mut self.portfolio,
            PageKind::Fundraising => &mut self.funds,
            PageKind::FamilyOffices => &mut self.family_offices,
            PageKind::InvestmentCompanies => &mut self.investment_companies,
            PageKind::PeFirms => &mut self.pe_firms,
            PageKind::News => &mut self.news,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InvestmentCompanySort;
    use crate::error::ApiError;
    use crate::filter::YC_ALUMNI;
    use crate::logo::LogoPolicy;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn companies() -> Vec<Company> {
        serde_json::from_str(
            r#"[
                {"name": "Acme AI", "category": "Generative AI", "investors": ["Y Combinator"],
                 "headquarters": "Stockholm, Sweden"},
                {"name": "Einride", "category": "Autonomous Freight", "stage": "Series C",
                 "headquarters": "Gothenburg, Sweden"},
                {"name": "Silo AI", "category": "AI Lab", "headquarters": "Helsinki, Finland"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(PageKind::AiCompanies.next(), PageKind::AiMap);
        assert_eq!(PageKind::News.next(), PageKind::AiCompanies);
        assert_eq!(PageKind::AiCompanies.previous(), PageKind::News);
        for kind in PageKind::ALL {
            assert_eq!(kind.next().previous(), kind);
        }
    }

    #[test]
    fn test_finish_load_ready_and_failed() {
        let mut page: Page<Company> = Page::new(PageKind::AiCompanies);
        assert_eq!(page.state(), &LoadState::Loading);

        page.finish_load(Ok::<_, ApiError>(companies()));
        assert_eq!(page.state(), &LoadState::Ready);
        assert_eq!(page.visible().len(), 3);

        page.finish_load(Err(ApiError::Network("connection refused".into())));
        match page.state() {
            LoadState::Failed(message) => assert!(message.contains("connection refused")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(page.visible().is_empty());
    }

    #[test]
    fn test_criteria_updates_refilter() {
        let mut page: Page<Company> = Page::new(PageKind::AiCompanies);
        page.finish_load(Ok::<_, ApiError>(companies()));

        page.update_criteria(|c| c.stage = YC_ALUMNI.to_string());
        assert_eq!(page.visible().len(), 1);
        assert_eq!(page.visible()[0].name, "Acme AI");

        page.update_criteria(|c| {
            c.stage = "all".to_string();
            c.region = "finland".to_string();
        });
        assert_eq!(page.visible()[0].name, "Silo AI");

        page.clear_filters();
        assert_eq!(page.visible(), page.all());
    }

    #[test]
    fn test_listing_is_object_safe() {
        let policy = LogoPolicy::default();
        let firms = FirmLogoDirectory::new();
        let ctx = CardContext::new(&policy, &firms);

        let mut page: Page<Company> = Page::new(PageKind::AiCompanies);
        page.finish_load(Ok::<_, ApiError>(companies()));
        let mut listing: Box<dyn Listing> = Box::new(page);

        assert_eq!(listing.title(), "AI Companies");
        assert_eq!(listing.cards(&ctx).len(), 3);
        assert_eq!(
            listing.category_options(),
            vec!["Generative AI", "Autonomous Freight", "AI Lab"]
        );

        listing.set_criteria(FilterCriteria::default().with_search("freight"));
        assert_eq!(listing.visible_len(), 1);
        assert_eq!(listing.total(), 3);
        assert_eq!(listing.card_at(0, &ctx).unwrap().title, "Einride");
    }

    #[test]
    fn test_company_search_skips_location_and_industry() {
        let mut page: Page<Company> = Page::new(PageKind::AiCompanies);
        let records: Vec<Company> = serde_json::from_str(
            r#"[
                {"name": "Einride", "category": "Freight", "industry": "Logistics",
                 "headquarters": "Gothenburg, Sweden", "technology": ["Autonomy"]}
            ]"#,
        )
        .unwrap();
        page.finish_load(Ok::<_, ApiError>(records));

        page.set_criteria(FilterCriteria::default().with_search("gothenburg"));
        assert!(page.visible().is_empty());

        page.set_criteria(FilterCriteria::default().with_search("logistics"));
        assert!(page.visible().is_empty());

        page.set_criteria(FilterCriteria::default().with_search("autonomy"));
        assert_eq!(page.visible().len(), 1);
    }

    #[test]
    fn test_fund_vintage_refinement() {
        let mut dashboard = Dashboard::new();
        let funds: Vec<Fund> = serde_json::from_str(
            r#"[
                {"firm": "Altor", "status": "Closed", "vintage": 2021},
                {"firm": "EQT", "status": "Marketing", "vintage": 2024},
                {"firm": "Axcel", "status": "Closed", "vintage": 2024}
            ]"#,
        )
        .unwrap();
        dashboard.funds.finish_load(Ok::<_, ApiError>(funds));

        let order: Vec<&str> = dashboard.funds.visible().iter().map(|f| f.firm.as_str()).collect();
        assert_eq!(order, vec!["EQT", "Axcel", "Altor"]);
        assert_eq!(dashboard.funds.vintages(), vec![2024, 2021]);

        dashboard.funds.filter_vintage(Some(2021));
        assert_eq!(dashboard.funds.visible().len(), 1);

        dashboard.funds.filter_vintage(None);
        assert_eq!(dashboard.funds.visible().len(), 3);

        dashboard.funds.fund_view(Some(2024), true);
        assert!(dashboard.funds.visible().is_empty());
    }

    #[test]
    fn test_investment_company_sort_keeps_filter() {
        let mut dashboard = Dashboard::new();
        let companies: Vec<InvestmentCompany> = serde_json::from_str(
            r#"[
                {"name": "Latour", "type": "Investment Company", "discount_numeric": -5.0},
                {"name": "Kinnevik", "type": "Investment Company", "discount_numeric": 30.0},
                {"name": "Balder", "type": "Real Estate", "discount_numeric": 10.0}
            ]"#,
        )
        .unwrap();
        let page = &mut dashboard.investment_companies;
        page.finish_load(Ok::<_, ApiError>(companies));
        assert_eq!(page.visible()[0].name, "Kinnevik");

        page.set_criteria(FilterCriteria::default().with_category("investment"));
        page.sort_mode(InvestmentCompanySort::Name);

        let names: Vec<&str> = page.visible().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kinnevik", "Latour"]);
    }

    /// Serves canned bodies by path until the test ends.
    async fn serve_routes(routes: Vec<(&'static str, &'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                    let (status, body) = routes
                        .iter()
                        .find(|(p, _, _)| *p == path)
                        .map(|(_, s, b)| (*s, *b))
                        .unwrap_or(("404 Not Found", ""));
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_dashboard_load_isolates_failures() {
        let base = serve_routes(vec![
            (
                "/api/ai-companies",
                "200 OK",
                r#"{"success": true, "companies": [{"name": "Acme AI"}, {"name": "Einride"}]}"#,
            ),
            (
                "/api/pe-firms",
                "200 OK",
                r#"{"success": true, "firms": {"Altor": {"logo_url": "https://altor.com/logo.png"}}}"#,
            ),
            (
                "/api/news",
                "500 Internal Server Error",
                r#"{"success": false, "message": "news store unavailable"}"#,
            ),
        ])
        .await;
        let client = DashboardClient::new(&base, Duration::from_secs(5)).unwrap();

        let dashboard = Dashboard::load(&client).await;

        assert_eq!(dashboard.companies.state(), &LoadState::Ready);
        assert_eq!(dashboard.companies.all().len(), 2);
        assert_eq!(dashboard.ai_map.all().len(), 2);
        assert_eq!(dashboard.pe_firms.all()[0].name, "Altor");
        assert_eq!(dashboard.firms.logo_for("Altor"), Some("https://altor.com/logo.png"));
        assert!(matches!(dashboard.news.state(), LoadState::Failed(m) if m.contains("news store unavailable")));
        assert!(matches!(dashboard.portfolio.state(), LoadState::Failed(_)));
        assert_eq!(dashboard.listing(PageKind::News).visible_len(), 0);
    }
}
