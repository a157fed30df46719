// Logo Resolution - candidate lists, fallback state machine, image probing
//
// candidates: which URLs to try, in which order
// resolver:   pure state machine over load/error/timeout signals
// probe:      async driver that feeds real image loads into the resolver
// firms:      name → logo lookup for rows that only carry a firm name

pub mod candidates;
pub mod firms;
pub mod probe;
pub mod resolver;

pub use candidates::{
    is_stealth, LogoCandidateList, LogoPolicy, LogoView, STEALTH_GLYPH, UNTRUSTED_LOGO_HOST,
};
pub use firms::{FirmLogoDirectory, FirmSubject};
pub use probe::{
    resolve, resolve_many, resolve_view, HttpImageProbe, ImageDimensions, ImageProbe, ProbeError,
    ResolvedLogo,
};
pub use resolver::{LoadEvent, LogoResolver, Resolution, ResolverState, Step};
