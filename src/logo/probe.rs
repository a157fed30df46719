// 📡 Logo Probe - drives the resolver against real (or fake) image loads
//
// Each attempt is bounded by `LogoPolicy::wait`. Dropping the timed-out
// future is the timer cancellation: a late answer for an old attempt can
// never reach the resolver.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::candidates::{LogoPolicy, LogoView};
use super::resolver::{LoadEvent, LogoResolver, Resolution, Step};
use super::LogoCandidateList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("image request failed: {0}")]
    Http(String),

    #[error("image host answered {0}")]
    Status(u16),

    #[error("could not read image: {0}")]
    Decode(String),
}

/// Loads one image and reports its pixel size.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError>;
}

// ============================================================================
// HTTP PROBE
// ============================================================================

pub struct HttpImageProbe {
    client: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new(request_timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ProbeError::Http(e.to_string()))?;
        Ok(HttpImageProbe { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        HttpImageProbe { client }
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        decode_dimensions(&bytes)
    }
}

/// Pixel size from the image header; the format is sniffed from the bytes.
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions, ProbeError> {
    let reader = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ProbeError::Decode(e.to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ProbeError::Decode(e.to_string()))?;

    Ok(ImageDimensions { width, height })
}

// ============================================================================
// DRIVER
// ============================================================================

/// Outcome for one logo slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolvedLogo {
    Glyph(&'static str),
    Image(Resolution),
}

impl ResolvedLogo {
    /// URL or glyph, whichever the slot shows.
    pub fn display(&self) -> &str {
        match self {
            ResolvedLogo::Glyph(glyph) => glyph,
            ResolvedLogo::Image(resolution) => &resolution.url,
        }
    }
}

/// Walk the candidate list until one loads with a valid size.
pub async fn resolve<P: ImageProbe + ?Sized>(
    probe: &P,
    candidates: &LogoCandidateList,
    policy: &LogoPolicy,
) -> Resolution {
    let mut resolver = LogoResolver::new(candidates.clone(), policy);
    let mut step = resolver.start();

    loop {
        match step {
            Step::Load { attempt, url } => {
                let event = match tokio::time::timeout(policy.wait, probe.probe(&url)).await {
                    Ok(Ok(dims)) => LoadEvent::Loaded {
                        width: dims.width,
                        height: dims.height,
                    },
                    Ok(Err(err)) => {
                        debug!(url = %url, error = %err, "logo candidate failed");
                        LoadEvent::Failed
                    }
                    Err(_) => LoadEvent::TimedOut,
                };
                step = resolver.handle(attempt, event);
            }
            Step::Settled(resolution) => {
                if resolution.exhausted {
                    debug!(url = %resolution.url, "all logo candidates failed, keeping avatar");
                }
                return resolution;
            }
            Step::Stale => {
                // Only the current attempt is ever reported here
                warn!("logo resolver reported a stale step");
                return resolver.resolution().unwrap_or_else(|| Resolution {
                    url: candidates.terminal().to_string(),
                    index: candidates.last_index(),
                    exhausted: true,
                });
            }
        }
    }
}

/// Glyph slots never touch the probe.
pub async fn resolve_view<P: ImageProbe + ?Sized>(
    probe: &P,
    view: &LogoView,
    policy: &LogoPolicy,
) -> ResolvedLogo {
    match view {
        LogoView::Glyph(glyph) => ResolvedLogo::Glyph(*glyph),
        LogoView::Image(candidates) => ResolvedLogo::Image(resolve(probe, candidates, policy).await),
    }
}

/// Resolve several slots concurrently on the current task; output order
/// matches input order.
pub async fn resolve_many<P: ImageProbe + ?Sized>(
    probe: &P,
    views: &[LogoView],
    policy: &LogoPolicy,
    concurrency: usize,
) -> Vec<ResolvedLogo> {
    stream::iter(views)
        .map(|view| resolve_view(probe, view, policy))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Company;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted answers per URL; unknown URLs fail.
    #[derive(Default)]
    struct FakeProbe {
        answers: HashMap<String, Answer>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    #[derive(Clone, Copy)]
    enum Answer {
        Size(u32, u32),
        Fail,
        Hang,
    }

    impl FakeProbe {
        fn with(mut self, url: &str, answer: Answer) -> Self {
            self.answers.insert(url.to_string(), answer);
            self
        }
    }

    #[async_trait]
    impl ImageProbe for FakeProbe {
        async fn probe(&self, url: &str) -> Result<ImageDimensions, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(url.to_string());
            match self.answers.get(url).copied().unwrap_or(Answer::Fail) {
                Answer::Size(width, height) => Ok(ImageDimensions { width, height }),
                Answer::Fail => Err(ProbeError::Status(404)),
                Answer::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ProbeError::Http("never".into()))
                }
            }
        }
    }

    fn acme() -> Company {
        Company {
            name: "Acme AI".to_string(),
            logo_url: Some("https://cdn.acme.com/logo.png".to_string()),
            website: Some("https://acme.com".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_valid_candidate_wins() {
        let policy = LogoPolicy::default();
        let list = LogoCandidateList::build(&acme(), &policy);
        let probe = FakeProbe::default().with(list.get(0).unwrap(), Answer::Size(200, 200));

        let resolution = resolve(&probe, &list, &policy).await;
        assert_eq!(resolution.index, 0);
        assert!(!resolution.exhausted);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_width_success_moves_to_favicon() {
        let policy = LogoPolicy::default();
        let list = LogoCandidateList::build(&acme(), &policy);
        let probe = FakeProbe::default()
            .with(list.get(0).unwrap(), Answer::Size(0, 0))
            .with(list.get(1).unwrap(), Answer::Size(128, 128));

        let resolution = resolve(&probe, &list, &policy).await;
        assert_eq!(resolution.url, list.get(1).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_candidate_times_out() {
        let policy = LogoPolicy::default();
        let list = LogoCandidateList::build(&acme(), &policy);
        let probe = FakeProbe::default()
            .with(list.get(0).unwrap(), Answer::Hang)
            .with(list.get(1).unwrap(), Answer::Size(64, 64));

        let started = tokio::time::Instant::now();
        let resolution = resolve(&probe, &list, &policy).await;

        assert_eq!(resolution.index, 1);
        assert!(started.elapsed() >= policy.wait);
        assert!(started.elapsed() < policy.wait * 2);
    }

    #[tokio::test]
    async fn test_all_failures_settle_on_avatar() {
        let policy = LogoPolicy::default();
        let list = LogoCandidateList::build(&acme(), &policy);
        let probe = FakeProbe::default();

        let resolution = resolve(&probe, &list, &policy).await;
        assert!(resolution.exhausted);
        assert_eq!(resolution.url, list.terminal());
        assert_eq!(*probe.seen.lock().unwrap(), list.urls().to_vec());
    }

    #[tokio::test]
    async fn test_stealth_never_reaches_probe() {
        let policy = LogoPolicy::default();
        let stealth = Company {
            name: "Stealth AI Lab".to_string(),
            website: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let view = LogoView::for_subject(&stealth, &policy);
        let probe = FakeProbe::default();

        let resolved = resolve_view(&probe, &view, &policy).await;
        assert!(matches!(resolved, ResolvedLogo::Glyph(_)));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_many_preserves_order() {
        let policy = LogoPolicy::default();
        let companies = vec![
            acme(),
            Company { name: "Stealth Co".into(), ..Default::default() },
            Company { name: "Einride".into(), ..Default::default() },
        ];
        let views: Vec<_> = companies
            .iter()
            .map(|c| LogoView::for_subject(c, &policy))
            .collect();
        let probe = FakeProbe::default()
            .with(&policy.avatar_url("Einride"), Answer::Size(200, 200))
            .with("https://cdn.acme.com/logo.png", Answer::Size(100, 100));

        let resolved = resolve_many(&probe, &views, &policy, 4).await;

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].display(), "https://cdn.acme.com/logo.png");
        assert!(matches!(resolved[1], ResolvedLogo::Glyph(_)));
        assert_eq!(resolved[2].display(), policy.avatar_url("Einride"));
    }

    #[test]
    fn test_decode_dimensions_reads_png_header() {
        let img = image::DynamicImage::new_rgba8(32, 16);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();

        let dims = decode_dimensions(&bytes).unwrap();
        assert_eq!(dims, ImageDimensions { width: 32, height: 16 });
    }

    #[test]
    fn test_decode_dimensions_rejects_html() {
        let err = decode_dimensions(b"<html>not found</html>").unwrap_err();
        assert!(matches!(err, ProbeError::Decode(_)));
    }
}
