use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{error, warn};

use crate::config::ServiceConfig;
use crate::error::{ResolveError, TranscriptError};
use crate::models::{MessageWindow, SessionIdentity, TranscriptEntry};
use crate::parsers::parse_transcript_with_cancel;
use crate::resolver::PathResolver;

/// Orchestrates transcript resolution and parsing for one session at a time.
///
/// Holds only immutable configuration, so a single instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct SessionMessagesService {
    resolver: Arc<PathResolver>,
    read_timeout: Duration,
    default_limit: usize,
}

/// What the blocking worker found
enum Lookup {
    Found(MessageWindow),
    Missing,
    Failed(TranscriptError),
}

/// Raises the cancellation flag when the request future goes away
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl SessionMessagesService {
    pub fn new(resolver: PathResolver, read_timeout: Duration, default_limit: usize) -> Self {
        Self { resolver: Arc::new(resolver), read_timeout, default_limit }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        let resolver =
            PathResolver::with_strategies(&config.projects_root, config.lookup_order.clone());
        Self::new(resolver, config.read_timeout, config.default_limit)
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Most recent `limit` messages for a session
    ///
    /// Falls back to `legacy_messages` (or an empty list) whenever the transcript is
    /// missing, unreadable, corrupted or too slow to read.
    ///
    /// # Errors
    ///
    /// Returns an error only when the identity is invalid or resolves outside the
    /// projects root.
    pub async fn get_messages(
        &self,
        identity: &SessionIdentity,
        legacy_messages: Option<Vec<TranscriptEntry>>,
        limit: usize,
    ) -> Result<Vec<TranscriptEntry>, ResolveError> {
        let cancel = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&cancel));

        let resolver = Arc::clone(&self.resolver);
        let owned_identity = identity.clone();
        let task = tokio::task::spawn_blocking(move || {
            load_transcript(&resolver, &owned_identity, limit, &cancel)
        });

        let lookup = match tokio::time::timeout(self.read_timeout, task).await {
            Ok(Ok(result)) => result?,
            Ok(Err(e)) => {
                error!(session = %identity.primary_id, error = %e, "Transcript worker failed");
                return Ok(legacy_messages.unwrap_or_default());
            }
            Err(_) => {
                warn!(
                    session = %identity.primary_id,
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "Timed out reading transcript, using stored messages"
                );
                return Ok(legacy_messages.unwrap_or_default());
            }
        };

        match lookup {
            Lookup::Found(window) => Ok(window.into_entries()),
            Lookup::Missing => {
                warn!(
                    project = %identity.project_id,
                    session = %identity.primary_id,
                    "No transcript for session, using stored messages"
                );
                Ok(legacy_messages.unwrap_or_default())
            }
            Lookup::Failed(e @ TranscriptError::Cancelled { .. }) => {
                warn!(session = %identity.primary_id, error = %e, "Transcript read cancelled");
                Ok(legacy_messages.unwrap_or_default())
            }
            Lookup::Failed(e) => {
                error!(
                    session = %identity.primary_id,
                    error = %e,
                    "Failed to read transcript, using stored messages"
                );
                Ok(legacy_messages.unwrap_or_default())
            }
        }
    }
}

/// Blocking half of [`SessionMessagesService::get_messages`]
fn load_transcript(
    resolver: &PathResolver,
    identity: &SessionIdentity,
    limit: usize,
    cancel: &AtomicBool,
) -> Result<Lookup, ResolveError> {
    let location = resolver.resolve(identity)?;
    let Some(path) = location.path else {
        return Ok(Lookup::Missing);
    };

    Ok(match parse_transcript_with_cancel(&path, limit, cancel) {
        Ok(window) => Lookup::Found(window),
        Err(e) => Lookup::Failed(e),
    })
}
