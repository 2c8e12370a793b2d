use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::strategy::LookupStrategy;
use crate::error::ResolveError;
use crate::models::{SessionIdentity, TranscriptLocation};
use crate::utils::{encode_project_dir, is_descendant, normalize_lexically};

/// File extension Claude Code uses for session transcripts
pub const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// Resolves session identities to transcript files below a fixed root
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    strategies: Vec<LookupStrategy>,
}

impl PathResolver {
    /// Resolver trying the primary id first, then the secondary id
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_strategies(root, LookupStrategy::DEFAULT_ORDER.to_vec())
    }

    pub fn with_strategies(root: impl Into<PathBuf>, strategies: Vec<LookupStrategy>) -> Self {
        Self { root: root.into(), strategies }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn strategies(&self) -> &[LookupStrategy] {
        &self.strategies
    }

    /// Find the transcript for `identity`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identity has an empty primary id
    /// - Any candidate path (existing or not) normalizes outside the root
    /// - The matched file canonicalizes outside the canonical root (symlink escape)
    /// - The root or the matched file cannot be canonicalized
    ///
    /// A missing transcript is not an error: it yields [`TranscriptLocation::not_found`].
    pub fn resolve(&self, identity: &SessionIdentity) -> Result<TranscriptLocation, ResolveError> {
        identity.validate()?;

        let project_dir = self.root.join(encode_project_dir(&identity.project_id));
        let candidates = self.candidate_paths(&project_dir, identity)?;

        for (strategy, candidate) in candidates {
            if !transcript_exists(&candidate) {
                debug!(strategy = %strategy, path = %candidate.display(), "No transcript at candidate path");
                continue;
            }

            match self.confine(&candidate)? {
                Some(canonical) => {
                    info!(
                        project = %identity.project_id,
                        session = %identity.primary_id,
                        matched_by = %strategy.matched_by(),
                        path = %canonical.display(),
                        "Resolved session transcript"
                    );
                    return Ok(TranscriptLocation::found(canonical, strategy.matched_by()));
                }
                // Removed between the existence check and canonicalization
                None => continue,
            }
        }

        info!(
            project = %identity.project_id,
            session = %identity.primary_id,
            matched_by = "none",
            "No session transcript found"
        );
        Ok(TranscriptLocation::not_found())
    }

    /// Build every candidate path and reject any that escapes the root
    fn candidate_paths(
        &self,
        project_dir: &Path,
        identity: &SessionIdentity,
    ) -> Result<Vec<(LookupStrategy, PathBuf)>, ResolveError> {
        let root = normalize_lexically(&self.root);
        let mut candidates = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let Some(id) = strategy.candidate(identity) else {
                continue;
            };

            let candidate =
                normalize_lexically(&project_dir.join(format!("{}.{}", id, TRANSCRIPT_EXTENSION)));
            if !is_descendant(&candidate, &root) {
                error!(
                    strategy = %strategy,
                    candidate = %candidate.display(),
                    root = %root.display(),
                    "Rejected session identifier escaping the projects root"
                );
                return Err(ResolveError::PathTraversal { candidate, root });
            }
            candidates.push((*strategy, candidate));
        }

        Ok(candidates)
    }

    /// Canonicalize `candidate` and verify it is still inside the canonical root
    ///
    /// Returns `Ok(None)` if the file disappeared before it could be canonicalized.
    fn confine(&self, candidate: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let canonical_root = self
            .root
            .canonicalize()
            .map_err(|source| ResolveError::Canonicalize { path: self.root.clone(), source })?;

        let canonical = match candidate.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ResolveError::Canonicalize { path: candidate.to_path_buf(), source });
            }
        };

        if !is_descendant(&canonical, &canonical_root) {
            error!(
                candidate = %candidate.display(),
                canonical = %canonical.display(),
                "Rejected transcript resolving outside the projects root"
            );
            return Err(ResolveError::PathTraversal { candidate: canonical, root: canonical_root });
        }

        Ok(Some(canonical))
    }
}

/// Resolve `identity` below `root` using the default lookup order
pub fn resolve(root: &Path, identity: &SessionIdentity) -> Result<TranscriptLocation, ResolveError> {
    PathResolver::new(root).resolve(identity)
}

/// Existence check that degrades permission and other metadata errors to "missing"
fn transcript_exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Cannot stat transcript candidate, treating as missing");
            false
        }
    }
}
