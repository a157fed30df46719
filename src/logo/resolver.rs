// 🔁 Logo Resolver - per-image fallback state machine
//
// States: Loading(i) → Loading(i+1) → ... → Settled
//
// The resolver never touches the network or a clock. A driver performs the
// `Step::Load` it is told to, arms a wait timer, and reports back exactly one
// `LoadEvent` tagged with the attempt it belongs to. Events for any other
// attempt are stale (timer already cancelled, image already replaced) and are
// ignored.

use serde::Serialize;
use tracing::debug;

use super::candidates::{LogoCandidateList, LogoPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolverState {
    Loading { index: usize },
    Settled { index: usize, exhausted: bool },
}

/// Signal reported by the image element for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded { width: u32, height: u32 },
    Failed,
    TimedOut,
}

/// Final outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub url: String,
    pub index: usize,
    /// Every candidate failed; `url` is the terminal avatar
    pub exhausted: bool,
}

/// What the driver must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Start loading `url` and arm the wait timer
    Load { attempt: usize, url: String },
    /// Cancel the timer and keep showing the resolved image
    Settled(Resolution),
    /// Event did not belong to the current attempt
    Stale,
}

pub struct LogoResolver {
    candidates: LogoCandidateList,
    policy: LogoPolicy,
    state: ResolverState,
}

impl LogoResolver {
    pub fn new(candidates: LogoCandidateList, policy: &LogoPolicy) -> Self {
        LogoResolver {
            candidates,
            policy: policy.clone(),
            state: ResolverState::Loading { index: 0 },
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn candidates(&self) -> &LogoCandidateList {
        &self.candidates
    }

    /// First step: load candidate 0.
    pub fn start(&self) -> Step {
        self.load_step(0)
    }

    /// Feed the outcome of `attempt` into the machine.
    pub fn handle(&mut self, attempt: usize, event: LoadEvent) -> Step {
        let index = match self.state {
            ResolverState::Loading { index } if index == attempt => index,
            _ => {
                debug!(attempt, ?event, state = ?self.state, "ignoring stale logo event");
                return Step::Stale;
            }
        };

        match event {
            LoadEvent::Loaded { width, height } if self.policy.is_valid_size(width, height) => {
                self.settle(index, false)
            }
            LoadEvent::Loaded { width, height } => {
                debug!(index, width, height, "logo too small, trying next candidate");
                self.advance(index)
            }
            LoadEvent::Failed => {
                debug!(index, "logo failed to load, trying next candidate");
                self.advance(index)
            }
            LoadEvent::TimedOut => {
                debug!(index, "logo timed out, trying next candidate");
                self.advance(index)
            }
        }
    }

    /// Current resolution once settled.
    pub fn resolution(&self) -> Option<Resolution> {
        match self.state {
            ResolverState::Settled { index, exhausted } => Some(self.resolution_at(index, exhausted)),
            ResolverState::Loading { .. } => None,
        }
    }

    fn advance(&mut self, index: usize) -> Step {
        let next = index + 1;
        if next < self.candidates.len() {
            self.state = ResolverState::Loading { index: next };
            self.load_step(next)
        } else {
            // The avatar is already in place; nothing left to try
            self.settle(self.candidates.last_index(), true)
        }
    }

    fn settle(&mut self, index: usize, exhausted: bool) -> Step {
        self.state = ResolverState::Settled { index, exhausted };
        Step::Settled(self.resolution_at(index, exhausted))
    }

    fn load_step(&self, index: usize) -> Step {
        Step::Load {
            attempt: index,
            url: self.candidates.get(index).unwrap_or_default().to_string(),
        }
    }

    fn resolution_at(&self, index: usize, exhausted: bool) -> Resolution {
        Resolution {
            url: self.candidates.get(index).unwrap_or_default().to_string(),
            index,
            exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Company;

    fn resolver() -> (LogoResolver, LogoCandidateList) {
        let policy = LogoPolicy::default();
        let company = Company {
            name: "Acme AI".to_string(),
            logo_url: Some("https://cdn.acme.com/logo.png".to_string()),
            website: Some("https://acme.com".to_string()),
            ..Default::default()
        };
        let list = LogoCandidateList::build(&company, &policy);
        (LogoResolver::new(list.clone(), &policy), list)
    }

    fn load(attempt: usize, list: &LogoCandidateList) -> Step {
        Step::Load {
            attempt,
            url: list.get(attempt).unwrap().to_string(),
        }
    }

    #[test]
    fn test_starts_at_first_candidate() {
        let (r, list) = resolver();
        assert_eq!(r.start(), load(0, &list));
        assert_eq!(r.state(), ResolverState::Loading { index: 0 });
        assert!(r.resolution().is_none());
    }

    #[test]
    fn test_valid_load_settles() {
        let (mut r, list) = resolver();
        let step = r.handle(0, LoadEvent::Loaded { width: 128, height: 128 });

        let expected = Resolution {
            url: list.get(0).unwrap().to_string(),
            index: 0,
            exhausted: false,
        };
        assert_eq!(step, Step::Settled(expected.clone()));
        assert_eq!(r.resolution(), Some(expected));
    }

    #[test]
    fn test_zero_width_success_advances() {
        let (mut r, list) = resolver();
        let step = r.handle(0, LoadEvent::Loaded { width: 0, height: 0 });
        assert_eq!(step, load(1, &list));
        assert_eq!(r.state(), ResolverState::Loading { index: 1 });
    }

    #[test]
    fn test_tiny_image_advances() {
        let (mut r, list) = resolver();
        assert_eq!(r.handle(0, LoadEvent::Loaded { width: 1, height: 1 }), load(1, &list));
    }

    #[test]
    fn test_error_and_timeout_advance() {
        let (mut r, list) = resolver();
        assert_eq!(r.handle(0, LoadEvent::Failed), load(1, &list));
        assert_eq!(r.handle(1, LoadEvent::TimedOut), load(2, &list));
    }

    #[test]
    fn test_exhausted_list_settles_on_avatar() {
        let (mut r, list) = resolver();
        r.handle(0, LoadEvent::Failed);
        r.handle(1, LoadEvent::Failed);
        let step = r.handle(2, LoadEvent::Failed);

        assert_eq!(
            step,
            Step::Settled(Resolution {
                url: list.terminal().to_string(),
                index: 2,
                exhausted: true,
            })
        );
        assert_eq!(r.state(), ResolverState::Settled { index: 2, exhausted: true });
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let (mut r, list) = resolver();
        assert_eq!(r.handle(0, LoadEvent::TimedOut), load(1, &list));

        // The first image finishes after its timer already fired
        assert_eq!(r.handle(0, LoadEvent::Loaded { width: 64, height: 64 }), Step::Stale);
        assert_eq!(r.state(), ResolverState::Loading { index: 1 });

        r.handle(1, LoadEvent::Loaded { width: 64, height: 64 });
        assert_eq!(r.handle(1, LoadEvent::TimedOut), Step::Stale);
        assert_eq!(r.state(), ResolverState::Settled { index: 1, exhausted: false });
    }

    #[test]
    fn test_no_candidate_is_retried() {
        let (mut r, list) = resolver();
        let mut attempted = Vec::new();
        let mut step = r.start();

        while let Step::Load { attempt, url } = step {
            attempted.push(url);
            step = r.handle(attempt, LoadEvent::Failed);
        }

        assert_eq!(attempted, list.urls());
    }
}
