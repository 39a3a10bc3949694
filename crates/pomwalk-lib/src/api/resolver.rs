//! Transitive dependency resolution
//!
//! A resolution run walks the dependency graph depth-first from a root
//! coordinate. For each coordinate it follows the parent chain, emits the
//! chain (most specific first), folds it into the effective document, and
//! descends into the surviving dependencies in declaration order.
//!
//! The walk runs in one spawned producer task driving an explicit worklist,
//! so stack depth does not grow with graph depth. Items reach the consumer
//! through a bounded channel: the producer only gets ahead by one item, and
//! closing the channel stops it before its next fetch or descent.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::repository::PomFetcher;
use super::source::MetadataSource;
use crate::maven::{Coordinate, PomDocument};
use crate::primitives::ResolutionError;

/// One item of a resolution stream; an `Err` is always the last item
pub type ResolutionItem = Result<String, ResolutionError>;

/// Drives resolution runs over a shared [`MetadataSource`]
pub struct DependencyResolver<F> {
    source: Arc<MetadataSource<F>>,
}

impl<F> Clone for DependencyResolver<F> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<F> DependencyResolver<F>
where
    F: PomFetcher + Send + Sync + 'static,
{
    pub fn new(source: Arc<MetadataSource<F>>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<MetadataSource<F>> {
        &self.source
    }

    /// Start a resolution run for `root`.
    ///
    /// Each call gets its own visited set; only the source's caches are
    /// shared between runs. Must be called from within a tokio runtime.
    pub fn resolve(&self, root: &str) -> ResolutionStream {
        let (tx, rx) = mpsc::channel(1);
        let run = ResolutionRun {
            source: Arc::clone(&self.source),
            tx,
            visited: HashSet::new(),
            expanded: HashSet::new(),
        };

        tokio::spawn(run.drive(root.to_string()));

        ResolutionStream {
            rx,
            cancelled: false,
        }
    }
}

/// Why a run stopped early
enum Halt {
    /// Consumer closed the stream
    Cancelled,
    Failed(ResolutionError),
}

impl From<ResolutionError> for Halt {
    fn from(error: ResolutionError) -> Self {
        Halt::Failed(error)
    }
}

/// Run-scoped state, owned by the producer task
struct ResolutionRun<F> {
    source: Arc<MetadataSource<F>>,
    tx: mpsc::Sender<ResolutionItem>,
    /// Every string emitted so far
    visited: HashSet<String>,
    /// Requested coordinates whose documents have been walked
    expanded: HashSet<String>,
}

impl<F> ResolutionRun<F>
where
    F: PomFetcher + Send + Sync + 'static,
{
    async fn drive(mut self, root: String) {
        info!("Resolving {}", root);

        let mut worklist = vec![root.clone()];
        while let Some(coordinate) = worklist.pop() {
            match self.step(&coordinate).await {
                // Reversed so the first declared dependency is popped first
                Ok(children) => worklist.extend(children.into_iter().rev()),
                Err(Halt::Cancelled) => {
                    debug!("Resolution of {} cancelled", root);
                    return;
                }
                Err(Halt::Failed(error)) => {
                    info!("Resolution of {} failed: {}", root, error);
                    // A closed channel means nobody is left to tell
                    let _ = self.tx.send(Err(error)).await;
                    return;
                }
            }
        }

        info!("Resolved {} coordinates from {}", self.visited.len(), root);
    }

    /// Process one coordinate, returning the dependencies to descend into
    async fn step(&mut self, requested: &str) -> Result<Vec<String>, Halt> {
        self.ensure_open()?;

        if self.visited.contains(requested) || !self.expanded.insert(requested.to_string()) {
            trace!("Already visited {}", requested);
            return Ok(Vec::new());
        }

        if !Coordinate::is_resolvable(requested) {
            debug!("Passing through unresolvable coordinate {}", requested);
            self.emit(requested.to_string()).await?;
            return Ok(Vec::new());
        }

        let coordinate = Coordinate::parse(requested)?;
        let chain = self.parent_chain(&coordinate).await?;

        for document in &chain {
            self.emit(document.coordinate().to_string()).await?;
        }

        let Some(effective) = PomDocument::effective(&chain) else {
            return Ok(Vec::new());
        };
        debug!(
            "Effective document for {} merged from {} POMs",
            requested,
            chain.len()
        );

        self.emit(effective.coordinate().to_string()).await?;

        Ok(effective
            .transitive_dependencies()
            .iter()
            .map(|dependency| dependency.coordinate_string())
            .collect())
    }

    /// Fetch `start` and its ancestors, most specific first
    async fn parent_chain(&self, start: &Coordinate) -> Result<Vec<Arc<PomDocument>>, Halt> {
        let mut ancestry: HashSet<Coordinate> = HashSet::new();
        let mut path: Vec<String> = Vec::new();
        let mut chain = Vec::new();
        let mut next = Some(start.clone());

        while let Some(coordinate) = next {
            self.ensure_open()?;

            path.push(coordinate.to_string());
            ancestry.insert(coordinate.clone());

            let document = self.source.get_document(&coordinate).await?;
            next = match &document.parent {
                Some(parent) if ancestry.contains(parent) => {
                    path.push(parent.to_string());
                    return Err(ResolutionError::CircularReference {
                        coordinate: parent.to_string(),
                        chain: path.join(" -> "),
                    }
                    .into());
                }
                parent => parent.clone(),
            };
            chain.push(document);
        }

        trace!("Parent chain for {}: {}", start, path.join(" -> "));
        Ok(chain)
    }

    /// Send `coordinate` unless it was already emitted in this run
    async fn emit(&mut self, coordinate: String) -> Result<(), Halt> {
        if !self.visited.insert(coordinate.clone()) {
            return Ok(());
        }

        trace!("Emitting {}", coordinate);
        self.tx
            .send(Ok(coordinate))
            .await
            .map_err(|_| Halt::Cancelled)
    }

    fn ensure_open(&self) -> Result<(), Halt> {
        if self.tx.is_closed() {
            Err(Halt::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Consumer side of a resolution run
///
/// Dropping the stream cancels the run.
pub struct ResolutionStream {
    rx: mpsc::Receiver<ResolutionItem>,
    cancelled: bool,
}

impl ResolutionStream {
    /// Next resolved coordinate, a terminal error, or `None` when finished
    pub async fn next(&mut self) -> Option<ResolutionItem> {
        if self.cancelled {
            return None;
        }
        self.rx.recv().await
    }

    /// Stop the run. No further fetches are issued and no further items
    /// are produced.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.rx.close();
    }

    /// Drain the stream into an outcome
    pub async fn collect(mut self) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::default();
        while let Some(item) = self.next().await {
            match item {
                Ok(coordinate) => outcome.coordinates.push(coordinate),
                Err(error) => {
                    outcome.error = Some(error);
                    break;
                }
            }
        }
        outcome
    }
}

/// Everything a run emitted, plus its terminal error if it failed
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    pub coordinates: Vec<String>,
    pub error: Option<ResolutionError>,
}

impl ResolutionOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<String>, ResolutionError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.coordinates),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
