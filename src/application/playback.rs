//! Step-by-step reveal of a traversal that has already been computed.

use crate::domain::{Traversal, TraversalKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStep {
    /// The `position`-th (1-based) node of `total` is revealed
    Visit {
        id: String,
        position: usize,
        total: usize,
        message: String,
    },
    /// All nodes have been revealed
    Complete { message: String },
}

impl PlaybackStep {
    pub fn message(&self) -> &str {
        match self {
            PlaybackStep::Visit { message, .. } | PlaybackStep::Complete { message } => message,
        }
    }
}

/// Yields one visit step per node in traversal order, then a completion step.
///
/// Pacing is left to the consumer; the order is fixed at construction.
#[derive(Debug, Clone)]
pub struct TraversalPlayback {
    kind: TraversalKind,
    order: Vec<String>,
    next: usize,
    finished: bool,
}

impl TraversalPlayback {
    pub fn new(kind: TraversalKind, traversal: &Traversal) -> Self {
        Self {
            kind,
            order: traversal.order.clone(),
            next: 0,
            finished: false,
        }
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }
}

impl Iterator for TraversalPlayback {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(id) = self.order.get(self.next) {
            self.next += 1;
            return Some(PlaybackStep::Visit {
                id: id.clone(),
                position: self.next,
                total: self.order.len(),
                message: format!("{}: Visiting node {} of {}", self.kind, self.next, self.order.len()),
            });
        }
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(PlaybackStep::Complete {
            message: format!("{} traversal complete!", self.kind),
        })
    }
}
