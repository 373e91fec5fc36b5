use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

use super::error::{ErrorCode, TransportError};

const ACCEPT_FEEDS: &str = "application/rss+xml, application/xml;q=0.9, */*;q=0.8";

/// Process-wide state shared by every session.
#[derive(Debug)]
pub struct Defaults {
    pub(super) headers: HeaderMap,
}

impl Defaults {
    fn build() -> Result<Self, TransportError> {
        let agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let agent = HeaderValue::from_str(&agent)
            .map_err(|e| TransportError::new(ErrorCode::FailedInit, e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, agent);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FEEDS));

        Ok(Self { headers })
    }
}

static DEFAULTS: OnceLock<Result<Defaults, TransportError>> = OnceLock::new();
static INIT_RUNS: AtomicUsize = AtomicUsize::new(0);

/// One-time transport setup.
///
/// The first caller on any thread runs the setup; concurrent callers block
/// until it has finished and every later call is a lookup. Lives until the
/// process exits.
pub fn global_init() -> Result<&'static Defaults, TransportError> {
    DEFAULTS
        .get_or_init(|| {
            INIT_RUNS.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("initializing transport defaults");
            Defaults::build()
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// How many times the setup itself has run. Never more than one.
pub fn init_runs() -> usize {
    INIT_RUNS.load(Ordering::SeqCst)
}
