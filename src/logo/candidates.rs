// 🖼️ Logo Candidates - ordered list of image URLs to try for one entity
//
// Priority:
// 1. explicit logo_url (unless it points at an untrusted host)
// 2. favicon lookup for the website host
// 3. generated avatar keyed by display name (always present, always last)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::entities::LogoSubject;

/// Logo host whose responses are not trusted even when set explicitly.
pub const UNTRUSTED_LOGO_HOST: &str = "logo.clearbit.com";

/// Glyph shown instead of a logo for stealth-mode companies.
pub const STEALTH_GLYPH: &str = "🕵";

// ============================================================================
// POLICY
// ============================================================================

/// Knobs for candidate construction and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoPolicy {
    /// Hosts excluded from explicit logo URLs
    pub untrusted_hosts: Vec<String>,

    /// Favicon lookup; `{host}` is replaced by the website host
    pub favicon_template: String,

    /// Avatar service base; the name is URL-encoded into `name=`
    pub avatar_base: String,

    /// Avatar query string after the name
    pub avatar_params: String,

    /// How long one candidate may take before the next is tried
    #[serde(with = "millis")]
    pub wait: Duration,

    /// Loaded images narrower than this count as failures
    pub min_width: u32,
}

impl Default for LogoPolicy {
    fn default() -> Self {
        LogoPolicy {
            untrusted_hosts: vec![UNTRUSTED_LOGO_HOST.to_string()],
            favicon_template: "https://www.google.com/s2/favicons?domain={host}&sz=128".to_string(),
            avatar_base: "https://ui-avatars.com/api/".to_string(),
            avatar_params: "background=667eea&color=fff&size=200&bold=true&format=png".to_string(),
            wait: Duration::from_millis(2000),
            min_width: 10,
        }
    }
}

impl LogoPolicy {
    pub fn is_trusted(&self, url: &str) -> bool {
        !self.untrusted_hosts.iter().any(|h| url.contains(h.as_str()))
    }

    /// Favicon URL for a website, if it parses as an absolute URL with a host.
    pub fn favicon_url(&self, website: &str) -> Option<String> {
        let parsed = Url::parse(website.trim()).ok()?;
        let host = parsed.host_str()?;
        Some(self.favicon_template.replace("{host}", host))
    }

    pub fn avatar_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&{}",
            self.avatar_base,
            urlencoding::encode(name),
            self.avatar_params
        )
    }

    /// Zero-size or sliver images masquerading as a successful load.
    pub fn is_valid_size(&self, width: u32, height: u32) -> bool {
        width > 0 && height > 0 && width >= self.min_width
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

// ============================================================================
// CANDIDATE LIST
// ============================================================================

/// Ordered, non-empty list of logo URLs; the avatar is always last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LogoCandidateList {
    urls: Vec<String>,
}

impl LogoCandidateList {
    pub fn build<S: LogoSubject + ?Sized>(subject: &S, policy: &LogoPolicy) -> Self {
        let mut urls: Vec<String> = Vec::with_capacity(3);
        let mut push = |url: String| {
            if !urls.contains(&url) {
                urls.push(url);
            }
        };

        if let Some(explicit) = subject.logo_url().map(str::trim).filter(|u| !u.is_empty()) {
            if policy.is_trusted(explicit) {
                push(explicit.to_string());
            }
        }

        if let Some(favicon) = subject.website().and_then(|w| policy.favicon_url(w)) {
            push(favicon);
        }

        // The avatar must be last even if an earlier entry already used it
        let avatar = policy.avatar_url(subject.display_name());
        urls.retain(|u| *u != avatar);
        urls.push(avatar);

        LogoCandidateList { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// The generated avatar.
    pub fn terminal(&self) -> &str {
        self.urls.last().map(String::as_str).unwrap_or_default()
    }

    pub fn last_index(&self) -> usize {
        self.urls.len().saturating_sub(1)
    }
}

// ============================================================================
// LOGO VIEW
// ============================================================================

/// Case-insensitive "stealth" in the name.
pub fn is_stealth(name: &str) -> bool {
    name.to_lowercase().contains("stealth")
}

/// What a renderer shows in the logo slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LogoView {
    /// Fixed placeholder glyph; no image is loaded
    Glyph(&'static str),
    /// Image slot driven by the resolver
    Image(LogoCandidateList),
}

impl LogoView {
    /// Stealth check runs before any candidate is built.
    pub fn for_subject<S: LogoSubject + ?Sized>(subject: &S, policy: &LogoPolicy) -> Self {
        if is_stealth(subject.display_name()) {
            LogoView::Glyph(STEALTH_GLYPH)
        } else {
            LogoView::Image(LogoCandidateList::build(subject, policy))
        }
    }

    pub fn candidates(&self) -> Option<&LogoCandidateList> {
        match self {
            LogoView::Glyph(_) => None,
            LogoView::Image(list) => Some(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Company;

    fn company(name: &str, logo: Option<&str>, website: Option<&str>) -> Company {
        Company {
            name: name.to_string(),
            logo_url: logo.map(String::from),
            website: website.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_untrusted_logo_is_excluded() {
        let policy = LogoPolicy::default();
        let acme = company(
            "Acme AI",
            Some("https://logo.clearbit.com/acme.com"),
            Some("https://acme.com"),
        );
        let list = LogoCandidateList::build(&acme, &policy);

        assert_eq!(
            list.urls(),
            &[
                "https://www.google.com/s2/favicons?domain=acme.com&sz=128".to_string(),
                "https://ui-avatars.com/api/?name=Acme%20AI&background=667eea&color=fff&size=200&bold=true&format=png"
                    .to_string(),
            ]
        );
        assert!(list.terminal().contains("name=Acme%20AI"));
    }

    #[test]
    fn test_explicit_logo_comes_first() {
        let policy = LogoPolicy::default();
        let c = company(
            "Lovable",
            Some("https://lovable.dev/favicon.ico"),
            Some("https://lovable.dev/pricing"),
        );
        let list = LogoCandidateList::build(&c, &policy);

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some("https://lovable.dev/favicon.ico"));
        assert_eq!(
            list.get(1),
            Some("https://www.google.com/s2/favicons?domain=lovable.dev&sz=128")
        );
    }

    #[test]
    fn test_unparseable_website_is_skipped() {
        let policy = LogoPolicy::default();
        let c = company("Sana", None, Some("sanalabs.com"));
        let list = LogoCandidateList::build(&c, &policy);

        assert_eq!(list.len(), 1);
        assert_eq!(list.terminal(), policy.avatar_url("Sana"));
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let policy = LogoPolicy::default();
        let favicon = "https://www.google.com/s2/favicons?domain=acme.com&sz=128";
        let c = company("Acme", Some(favicon), Some("https://acme.com/about"));
        let list = LogoCandidateList::build(&c, &policy);

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(favicon));
    }

    #[test]
    fn test_avatar_is_always_last_and_never_duplicated() {
        let policy = LogoPolicy::default();
        let avatar = policy.avatar_url("Acme");
        let c = company("Acme", Some(&avatar), None);
        let list = LogoCandidateList::build(&c, &policy);

        assert_eq!(list.urls(), &[avatar]);
    }

    #[test]
    fn test_candidate_list_is_never_empty() {
        let policy = LogoPolicy::default();
        for c in [
            company("", None, None),
            company("X", Some(""), Some("")),
            company("Ÿ Ω", Some("https://logo.clearbit.com/x.com"), Some("not a url")),
        ] {
            let list = LogoCandidateList::build(&c, &policy);
            assert!(!list.is_empty());
            assert_eq!(list.terminal(), policy.avatar_url(&c.name));
        }
    }

    #[test]
    fn test_stealth_bypasses_candidates() {
        let policy = LogoPolicy::default();
        let c = company("Stealth Startup (ex-Spotify)", None, Some("https://example.com"));
        assert_eq!(LogoView::for_subject(&c, &policy), LogoView::Glyph(STEALTH_GLYPH));

        let lower = company("in STEALTH mode", None, None);
        assert!(LogoView::for_subject(&lower, &policy).candidates().is_none());

        let normal = company("Einride", None, None);
        assert!(LogoView::for_subject(&normal, &policy).candidates().is_some());
    }

    #[test]
    fn test_size_validation() {
        let policy = LogoPolicy::default();
        assert!(policy.is_valid_size(128, 128));
        assert!(!policy.is_valid_size(0, 0));
        assert!(!policy.is_valid_size(16, 0));
        assert!(!policy.is_valid_size(9, 9));
    }
}
