// 🧭 Nordic Dashboard CLI - terminal UI plus scriptable listing commands

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use nordic_dashboard::config::DashboardConfig;
use nordic_dashboard::entities::{InvestmentCompanyFilter, InvestmentCompanySort, NewsChannel};
use nordic_dashboard::filter::FilterCriteria;
use nordic_dashboard::logo::{resolve_many, LogoPolicy, LogoView, ResolvedLogo};
use nordic_dashboard::page::{Dashboard, Listing, LoadState, PageKind};
use nordic_dashboard::render::{Card, CardContext, CardProps};
use nordic_dashboard::stats::{AnalyticsSummary, CompanyStats, FundStats, NewsStats};
use nordic_dashboard::telemetry::{init_tracing, LogOutput};

#[derive(Parser)]
#[command(name = "nordic-dashboard")]
#[command(about = "Nordic private equity and AI ecosystem dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    config: DashboardConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse every page in the terminal UI (default)
    Tui {
        /// Resolve logos over the network before the UI opens
        #[arg(long)]
        resolve_logos: bool,
    },

    /// Print one page's cards after filtering
    List {
        #[arg(value_enum)]
        page: PageKind,

        #[command(flatten)]
        filters: FilterArgs,

        /// Fundraising only: keep one vintage year
        #[arg(long)]
        vintage: Option<i32>,

        /// Fundraising only: Nordic funds from the curated import
        #[arg(long)]
        curated: bool,

        /// Investment companies only: quick filter
        #[arg(long, value_enum)]
        view: Option<InvestmentCompanyFilter>,

        /// Investment companies only: sort order
        #[arg(long, value_enum)]
        sort: Option<InvestmentCompanySort>,

        /// News only: one channel
        #[arg(long, value_enum)]
        channel: Option<NewsChannel>,

        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the logo of each card on a page
    Logos {
        #[arg(value_enum)]
        page: PageKind,

        #[command(flatten)]
        filters: FilterArgs,

        /// Cards to resolve
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Headline statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Category selector value, or "all"
    #[arg(long)]
    category: Option<String>,

    /// Stage selector value, or "all"
    #[arg(long)]
    stage: Option<String>,

    /// Technology selector value, or "all"
    #[arg(long = "tech")]
    technology: Option<String>,

    /// Region selector value, or "all"
    #[arg(long)]
    region: Option<String>,

    /// Free-text search over names and descriptions
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        if let Some(category) = &self.category {
            criteria = criteria.with_category(category.as_str());
        }
        if let Some(stage) = &self.stage {
            criteria = criteria.with_stage(stage.as_str());
        }
        if let Some(technology) = &self.technology {
            criteria = criteria.with_technology(technology.as_str());
        }
        if let Some(region) = &self.region {
            criteria = criteria.with_region(region.as_str());
        }
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }
        criteria
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let output = match cli.command {
        None | Some(Commands::Tui { .. }) => LogOutput::Discard,
        Some(_) => LogOutput::Stderr,
    };
    init_tracing(cli.json_logs, level, output);

    match cli.command {
        None => run_tui(&cli.config, false).await,
        Some(Commands::Tui { resolve_logos }) => run_tui(&cli.config, resolve_logos).await,
        Some(Commands::List {
            page,
            filters,
            vintage,
            curated,
            view,
            sort,
            channel,
            json,
        }) => {
            let options = ListOptions {
                vintage,
                curated,
                view,
                sort,
                channel,
            };
            run_list(&cli.config, page, &filters, &options, json).await
        }
        Some(Commands::Logos {
            page,
            filters,
            limit,
        }) => run_logos(&cli.config, page, &filters, limit).await,
        Some(Commands::Stats { json }) => run_stats(&cli.config, json).await,
    }
}

async fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    let client = config
        .client()
        .with_context(|| format!("Invalid backend URL: {}", config.api_url))?;
    info!(api = %client.base_url(), "loading dashboard");
    Ok(Dashboard::load(&client).await)
}

fn ensure_loaded(listing: &dyn Listing) -> Result<()> {
    match listing.state() {
        LoadState::Failed(message) => bail!("{} failed to load: {}", listing.title(), message),
        LoadState::Loading => bail!("{} never finished loading", listing.title()),
        LoadState::Ready => Ok(()),
    }
}

// ============================================================================
// LIST
// ============================================================================

#[derive(Default)]
struct ListOptions {
    vintage: Option<i32>,
    curated: bool,
    view: Option<InvestmentCompanyFilter>,
    sort: Option<InvestmentCompanySort>,
    channel: Option<NewsChannel>,
}

/// Cards for one page with the page-specific views applied.
fn page_cards(
    dashboard: &mut Dashboard,
    page: PageKind,
    criteria: FilterCriteria,
    options: &ListOptions,
    policy: &LogoPolicy,
) -> Result<Vec<CardProps>> {
    ensure_loaded(dashboard.listing(page))?;
    dashboard.listing_mut(page).set_criteria(criteria);

    if page == PageKind::Fundraising {
        dashboard.funds.fund_view(options.vintage, options.curated);
    }
    if page == PageKind::InvestmentCompanies {
        if let Some(view) = options.view {
            dashboard.investment_companies.quick_filter(view);
        }
        if let Some(sort) = options.sort {
            dashboard.investment_companies.sort_mode(sort);
        }
    }

    let ctx = CardContext::new(policy, &dashboard.firms);
    if let (PageKind::News, Some(channel)) = (page, options.channel) {
        return Ok(dashboard
            .news
            .channel(channel)
            .iter()
            .map(|article| article.card(&ctx))
            .collect());
    }
    Ok(dashboard.listing(page).cards(&ctx))
}

async fn run_list(
    config: &DashboardConfig,
    page: PageKind,
    filters: &FilterArgs,
    options: &ListOptions,
    json: bool,
) -> Result<()> {
    let mut dashboard = load_dashboard(config).await?;
    let policy = config.logo_policy();
    let cards = page_cards(&mut dashboard, page, filters.criteria(), options, &policy)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    let listing = dashboard.listing(page);
    println!("{} ({} of {})", listing.title(), cards.len(), listing.total());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for card in &cards {
        let flag = card.flag.unwrap_or(" ");
        println!("{} {} | {}", flag, card.title, card.subtitle);
        if !card.badges.is_empty() {
            println!("    {}", card.badges.join(" · "));
        }
    }
    if cards.is_empty() {
        println!("No entries match the current filters.");
    }
    Ok(())
}

// ============================================================================
// LOGOS
// ============================================================================

async fn run_logos(
    config: &DashboardConfig,
    page: PageKind,
    filters: &FilterArgs,
    limit: usize,
) -> Result<()> {
    let mut dashboard = load_dashboard(config).await?;
    let policy = config.logo_policy();
    let options = ListOptions::default();
    let cards = page_cards(&mut dashboard, page, filters.criteria(), &options, &policy)?;
    let cards: Vec<CardProps> = cards.into_iter().take(limit).collect();

    let probe = config
        .image_probe()
        .context("Failed to build image client")?;
    let views: Vec<LogoView> = cards.iter().map(|c| c.logo.clone()).collect();
    let resolved = resolve_many(&probe, &views, &policy, config.logo_concurrency).await;

    for (card, logo) in cards.iter().zip(&resolved) {
        match logo {
            ResolvedLogo::Image(resolution) if resolution.exhausted => {
                println!("{} → {} (avatar)", card.title, logo.display())
            }
            _ => println!("{} → {}", card.title, logo.display()),
        }
    }
    Ok(())
}

// ============================================================================
// STATS
// ============================================================================

async fn run_stats(config: &DashboardConfig, json: bool) -> Result<()> {
    let client = config
        .client()
        .with_context(|| format!("Invalid backend URL: {}", config.api_url))?;
    info!(api = %client.base_url(), "loading dashboard");
    let (dashboard, summary) = tokio::join!(Dashboard::load(&client), client.analytics_summary());

    // A missing summary does not fail the command
    let summary = match summary {
        Ok(summary) => Some(summary),
        Err(err) => {
            warn!(error = %err, "analytics summary unavailable");
            None
        }
    };

    let companies = CompanyStats::compute(dashboard.companies.all());
    let funds = FundStats::compute(dashboard.funds.all());
    let news = NewsStats::compute(dashboard.news.all());

    if json {
        let doc = serde_json::json!({
            "companies": companies,
            "funds": funds,
            "news": news,
            "backend": summary,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("📊 Nordic Dashboard");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("AI companies:      {}", companies.total);
    println!("  Unicorns:        {}", companies.unicorns);
    println!("  YC alumni:       {}", companies.yc_alumni);
    println!("  Employees:       {}", companies.employees_label());
    println!("  Founded 2023+:   {}", companies.recently_founded);
    println!("  Countries:       {}", companies.countries);
    println!("Funds:             {}", funds.total);
    println!("  Active:          {}", funds.active);
    println!("  Recent closes:   {}", funds.recent_closes);
    println!("  Nordic:          {}", funds.nordic);
    println!("News articles:     {}", news.total);
    println!("  Funding rounds:  {}", news.funding);
    println!("  Sources:         {}", news.sources);
    if let Some(summary) = &summary {
        println!("Backend summary");
        println!("  Companies:       {}", AnalyticsSummary::label(summary.total_companies));
        println!("  News:            {}", AnalyticsSummary::label(summary.total_news));
        println!("  PE firms:        {}", AnalyticsSummary::label(summary.total_pe_firms));
        println!("  Family offices:  {}", AnalyticsSummary::label(summary.total_family_offices));
        println!("  Latest deals:    {}", AnalyticsSummary::label(summary.latest_deals));
    }

    for kind in PageKind::ALL {
        if let LoadState::Failed(message) = dashboard.listing(kind).state() {
            println!("⚠️  {} unavailable: {}", kind.title(), message);
        }
    }
    Ok(())
}

// ============================================================================
// TUI
// ============================================================================

#[cfg(feature = "tui")]
async fn run_tui(config: &DashboardConfig, resolve_logos: bool) -> Result<()> {
    use nordic_dashboard::ui::{run_ui, App, LogoCache};

    println!("🖥️  Loading Nordic Dashboard from {}...", config.api_url);
    let dashboard = load_dashboard(config).await?;
    let policy = config.logo_policy();

    let mut logos = LogoCache::new();
    if resolve_logos {
        println!("🖼️  Resolving logos...");
        let probe = config
            .image_probe()
            .context("Failed to build image client")?;
        let ctx = CardContext::new(&policy, &dashboard.firms);
        for kind in PageKind::ALL {
            let cards = dashboard.listing(kind).cards(&ctx);
            let views: Vec<LogoView> = cards.iter().map(|c| c.logo.clone()).collect();
            let resolved = resolve_many(&probe, &views, &policy, config.logo_concurrency).await;
            for (card, logo) in cards.into_iter().zip(resolved) {
                if let LogoView::Image(candidates) = card.logo {
                    logos.insert(candidates, logo);
                }
            }
        }
    }

    println!("Starting UI... (Press 'q' to quit)\n");
    let mut app = App::new(dashboard, policy).with_logos(logos);
    run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_config: &DashboardConfig, _resolve_logos: bool) -> Result<()> {
    bail!("TUI mode not available; rebuild with `--features tui` or use `list`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "nordic-dashboard",
            "list",
            "ai-companies",
            "--category",
            "YC Alumni",
            "--search",
            "robot",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List {
                page,
                filters,
                json,
                ..
            }) => {
                assert_eq!(page, PageKind::AiCompanies);
                assert!(json);
                let criteria = filters.criteria();
                assert_eq!(criteria.category, "YC Alumni");
                assert_eq!(criteria.stage, "all");
                assert_eq!(criteria.search, "robot");
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["nordic-dashboard", "--api-url", "http://dash:8080"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config.api_url, "http://dash:8080");
    }

    #[test]
    fn test_investment_company_flags() {
        let cli = Cli::try_parse_from([
            "nordic-dashboard",
            "list",
            "investment-companies",
            "--view",
            "discount",
            "--sort",
            "market-cap",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List { view, sort, .. }) => {
                assert_eq!(view, Some(InvestmentCompanyFilter::Discount));
                assert_eq!(sort, Some(InvestmentCompanySort::MarketCap));
            }
            _ => panic!("expected list command"),
        }
    }
}
