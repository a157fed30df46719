// Nordic Dashboard - Core Library
// Entities, filtering, logo resolution and page controllers for the CLI and TUI

pub mod entities;       // Entity Models - backend JSON records
pub mod filter;         // Filter Engine - criteria over entity arrays
pub mod logo;           // Logo Resolution - candidates + fallback state machine
pub mod error;          // Backend errors
pub mod api;            // Backend client
pub mod config;         // CLI / env configuration
pub mod telemetry;      // Tracing setup
pub mod render;         // Card props per entity
pub mod page;           // Page controllers + dashboard
pub mod stats;          // Headline statistics

// Only compile the terminal UI when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use entities::{
    Company, FamilyOffice, Field, FieldValue, Fund, FundStatus, InvestmentCompany,
    InvestmentCompanyFilter, InvestmentCompanySort, Investor, LogoSubject, NewsArticle,
    NewsChannel, PeFirm, PortfolioCompany, Record,
};
pub use filter::{FieldMap, FilterCriteria, FilterEngine, ALL, YC_ALUMNI};
pub use logo::{
    resolve, resolve_many, resolve_view, FirmLogoDirectory, HttpImageProbe, ImageProbe,
    LoadEvent, LogoCandidateList, LogoPolicy, LogoResolver, LogoView, Resolution, ResolvedLogo,
    Step,
};
pub use error::{ApiError, ApiResult};
pub use api::{decode_object, decode_payload, DashboardClient, Endpoint};
pub use config::DashboardConfig;
pub use render::{country_flag, Card, CardContext, CardProps};
pub use page::{Dashboard, Listing, LoadState, Page, PageKind};
pub use stats::{AnalyticsSummary, CompanyStats, FundStats, NewsStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
