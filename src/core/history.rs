//! Transition history tracking.
//!
//! Records the accepted transitions of a machine in the order they happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Records kept by a manager's history unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Record of a single accepted transition.
///
/// # Example
///
/// ```rust
/// use statepath::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "Pending",
///     to: "Running",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "Running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<Id> {
    /// The vertex being left
    pub from: Id,
    /// The vertex being entered
    pub to: Id,
    /// When the transition was accepted
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions, optionally bounded.
///
/// A bounded history drops its oldest records first.
///
/// # Example
///
/// ```rust
/// use statepath::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::new();
/// history.record(TransitionRecord { from: "Start", to: "Middle", timestamp: Utc::now() });
/// history.record(TransitionRecord { from: "Middle", to: "End", timestamp: Utc::now() });
///
/// assert_eq!(history.path(), vec![&"Start", &"Middle", &"End"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionHistory<Id> {
    records: VecDeque<TransitionRecord<Id>>,
    limit: Option<usize>,
}

impl<Id> Default for TransitionHistory<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> TransitionHistory<Id> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history keeping at most `limit` records.
    ///
    /// Storage grows with the records actually kept, not with `limit`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statepath::core::{TransitionHistory, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let mut history = TransitionHistory::bounded(1);
    /// history.record(TransitionRecord { from: "A", to: "B", timestamp: Utc::now() });
    /// history.record(TransitionRecord { from: "B", to: "C", timestamp: Utc::now() });
    ///
    /// assert_eq!(history.path(), vec![&"B", &"C"]);
    /// ```
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Maximum number of records kept, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, evicting the oldest record when full.
    pub fn record(&mut self, record: TransitionRecord<Id>) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Vertices visited, in order: the first recorded source, then the
    /// destination of every record.
    pub fn path(&self) -> Vec<&Id> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Records from oldest to newest.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<Id>> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
