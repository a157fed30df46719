// 🏛️ Firm Logo Directory - firm name → logo for rows that only carry a name
//
// Fund rows and news items know "EQT X" or "Nordic Capital Fund XI" but not
// a website. The directory maps loose firm-name variants to the canonical
// logo from the PE firms payload, then to a curated website table.

use std::collections::HashMap;

use crate::entities::{LogoSubject, PeFirm};

/// Words stripped when building name variants.
const FIRM_SUFFIXES: &[&str] = &[
    "partners", "partner", "capital", "equity", "management", "investments", "investment",
    "asset", "private",
];

/// Curated firm → website for firms missing from the PE firms payload.
const KNOWN_FIRM_SITES: &[(&str, &str)] = &[
    ("eqt", "https://eqtgroup.com"),
    ("nordic", "https://nordiccapital.com"),
    ("axcel", "https://axcel.dk"),
    ("altor", "https://altor.com"),
    ("triton", "https://triton-partners.com"),
    ("ik", "https://ikpartners.com"),
    ("summa", "https://summaequity.com"),
    ("adelis", "https://adelisequity.com"),
    ("verdane", "https://verdane.com"),
    ("fsn", "https://fsncapital.com"),
    ("kinnevik", "https://kinnevik.com"),
    ("creandum", "https://creandum.com"),
    ("northzone", "https://northzone.com"),
    ("norrsken foundation", "https://norrsken.org"),
    ("industrifonden", "https://industrifonden.com"),
    ("inventure", "https://inventure.fi"),
    ("maki.vc", "https://maki.vc"),
    ("blackstone", "https://blackstone.com"),
];

/// Lower-cased name plus the variants with common suffix words removed.
pub fn name_variants(name: &str) -> Vec<String> {
    let base = name.trim().to_lowercase();
    if base.is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = base.split_whitespace().collect();
    let mut variants = vec![words.join(" ")];

    for suffix in FIRM_SUFFIXES {
        let kept: Vec<&str> = words.iter().copied().filter(|w| w != suffix).collect();
        variants.push(kept.join(" "));
    }

    let stripped: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !FIRM_SUFFIXES.contains(w))
        .collect();
    variants.push(stripped.join(" "));

    let mut unique = Vec::with_capacity(variants.len());
    for v in variants {
        if !v.is_empty() && !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique
}

#[derive(Debug, Clone, Default)]
pub struct FirmLogoDirectory {
    logos: HashMap<String, String>,
    sites: HashMap<String, String>,
}

impl FirmLogoDirectory {
    /// Directory seeded with the curated website table only.
    pub fn new() -> Self {
        let sites = KNOWN_FIRM_SITES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FirmLogoDirectory {
            logos: HashMap::new(),
            sites,
        }
    }

    /// Add every firm from the PE firms payload.
    pub fn from_firms(firms: &[PeFirm]) -> Self {
        let mut directory = FirmLogoDirectory::new();
        for firm in firms {
            directory.insert(firm);
        }
        directory
    }

    pub fn insert(&mut self, firm: &PeFirm) {
        for variant in name_variants(&firm.name) {
            if let Some(logo) = firm.logo_url() {
                self.logos.insert(variant.clone(), logo.to_string());
            }
            if let Some(site) = firm.website() {
                self.sites.insert(variant, site.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.logos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logos.is_empty()
    }

    pub fn logo_for(&self, name: &str) -> Option<&str> {
        name_variants(name)
            .iter()
            .find_map(|v| self.logos.get(v))
            .map(String::as_str)
    }

    pub fn website_for(&self, name: &str) -> Option<&str> {
        name_variants(name)
            .iter()
            .find_map(|v| self.sites.get(v))
            .map(String::as_str)
    }

    /// Logo subject for a bare firm name.
    pub fn subject<'a>(&'a self, name: &'a str) -> FirmSubject<'a> {
        FirmSubject {
            name,
            logo_url: self.logo_for(name),
            website: self.website_for(name),
        }
    }
}

/// A firm known only by name, enriched from the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmSubject<'a> {
    pub name: &'a str,
    pub logo_url: Option<&'a str>,
    pub website: Option<&'a str>,
}

impl LogoSubject for FirmSubject<'_> {
    fn display_name(&self) -> &str {
        self.name
    }

    fn logo_url(&self) -> Option<&str> {
        self.logo_url
    }

    fn website(&self) -> Option<&str> {
        self.website
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::{LogoCandidateList, LogoPolicy};

    fn firm(name: &str, logo: Option<&str>, website: Option<&str>) -> PeFirm {
        PeFirm {
            name: name.to_string(),
            logo_url: logo.map(String::from),
            website: website.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_variants() {
        let variants = name_variants("Nordic Capital Partners");
        assert_eq!(variants[0], "nordic capital partners");
        assert!(variants.contains(&"nordic partners".to_string()));
        assert!(variants.contains(&"nordic capital".to_string()));
        assert!(variants.contains(&"nordic".to_string()));
        assert!(name_variants("  ").is_empty());
    }

    #[test]
    fn test_lookup_by_variant() {
        let directory = FirmLogoDirectory::from_firms(&[firm(
            "Altor Equity Partners",
            Some("https://altor.com/logo.svg"),
            None,
        )]);

        assert_eq!(directory.logo_for("Altor"), Some("https://altor.com/logo.svg"));
        assert_eq!(directory.logo_for("ALTOR EQUITY"), Some("https://altor.com/logo.svg"));
        assert_eq!(directory.logo_for("Triton"), None);
    }

    #[test]
    fn test_curated_sites_cover_unknown_firms() {
        let directory = FirmLogoDirectory::new();
        assert_eq!(directory.website_for("EQT"), Some("https://eqtgroup.com"));
        assert_eq!(directory.website_for("Summa Equity"), Some("https://summaequity.com"));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_subject_feeds_candidates() {
        let policy = LogoPolicy::default();
        let directory = FirmLogoDirectory::from_firms(&[firm(
            "EQT",
            Some("https://logo.clearbit.com/eqtgroup.com"),
            None,
        )]);

        let subject = directory.subject("EQT Partners");
        let list = LogoCandidateList::build(&subject, &policy);

        // Untrusted explicit logo dropped, curated site used for the favicon
        assert_eq!(
            list.get(0),
            Some("https://www.google.com/s2/favicons?domain=eqtgroup.com&sz=128")
        );
        assert_eq!(list.len(), 2);
    }
}
