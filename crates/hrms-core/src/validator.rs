// ── Debounced identifier uniqueness validator ──
//
// Every identifier edit restarts an 800 ms debounce timer. Only a timer
// that survives to maturity may fetch the roster, and only a result whose
// tag (identifier + generation) still matches the current input may move
// the state. Superseded timers are cancelled outright; superseded fetches
// run to completion and are dropped on arrival.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::error::CoreError;
use crate::model::Roster;
use crate::source::RosterSource;

/// Typing inactivity required before an identifier is checked.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

// ── ValidationState ──────────────────────────────────────────────

/// Availability of an identifier, tagged with the identifier it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ValidationState {
    /// No identifier entered.
    Idle,
    /// Debounce timer running or roster fetch in flight.
    Pending { identifier: String },
    Available { identifier: String },
    Taken { identifier: String },
    /// The roster could not be fetched. No claim is made either way.
    Failed { identifier: String, message: String },
}

impl ValidationState {
    /// The identifier this state was computed for (`None` when idle).
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { identifier }
            | Self::Available { identifier }
            | Self::Taken { identifier }
            | Self::Failed { identifier, .. } => Some(identifier),
        }
    }

    /// `true` if this state describes `identifier`.
    pub fn is_for(&self, identifier: &str) -> bool {
        self.identifier() == Some(identifier)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, Self::Taken { .. })
    }

    /// Short status line for the presentation layer.
    pub fn describe(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Pending { .. } => "Checking...".into(),
            Self::Available { identifier } => format!("Employee ID \"{identifier}\" is available"),
            Self::Taken { identifier } => format!("Employee ID \"{identifier}\" already exists"),
            Self::Failed { .. } => "Failed to check Employee ID".into(),
        }
    }
}

// ── One-shot checks ──────────────────────────────────────────────

/// Classify `identifier` against a roster snapshot (exact, case-sensitive,
/// surrounding whitespace ignored).
pub fn check(roster: &Roster, identifier: &str) -> ValidationState {
    let identifier = identifier.trim().to_owned();
    if roster.contains_id(&identifier) {
        ValidationState::Taken { identifier }
    } else {
        ValidationState::Available { identifier }
    }
}

/// Fetch the roster and classify `identifier`, with no debounce.
///
/// A blank identifier is `Idle` without touching the source. A fetch
/// failure becomes `Failed`, never `Available`.
pub async fn validate<S: RosterSource>(source: &S, identifier: &str) -> ValidationState {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return ValidationState::Idle;
    }
    match source.fetch_roster().await {
        Ok(roster) => check(&roster, identifier),
        Err(e) => ValidationState::Failed {
            identifier: identifier.to_owned(),
            message: e.to_string(),
        },
    }
}

/// Submission gate for a create form.
///
/// `Taken`, `Pending` and any state computed for a different identifier
/// block the submit. `Failed` lets it through: the backend's own
/// duplicate check still applies.
pub fn ensure_identifier_claimable(
    state: &ValidationState,
    identifier: &str,
) -> Result<(), CoreError> {
    if !state.is_for(identifier.trim()) {
        return Err(CoreError::precondition(
            "Employee ID: not checked yet - wait for the availability check and try again",
        ));
    }
    match state {
        ValidationState::Taken { .. } => Err(CoreError::precondition(
            "Employee ID: Already exists - please use a different ID",
        )),
        ValidationState::Pending { .. } => Err(CoreError::precondition(
            "Employee ID: still being checked - wait a moment and try again",
        )),
        ValidationState::Idle
        | ValidationState::Available { .. }
        | ValidationState::Failed { .. } => Ok(()),
    }
}

// ── IdValidator ──────────────────────────────────────────────────

/// Reactive, debounced uniqueness checker for one form field.
///
/// Feed every edit to [`on_identifier_change`](Self::on_identifier_change)
/// and observe [`state`](Self::state) or [`subscribe`](Self::subscribe).
/// Must be driven from inside a tokio runtime. Dropping the validator
/// cancels any pending timer.
pub struct IdValidator<S: RosterSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    debounce: Duration,
    state: watch::Sender<ValidationState>,
    cycle: Mutex<Cycle>,
    /// Parent of every timer token; cancelled on close.
    shutdown: CancellationToken,
}

/// Bookkeeping for the most recent input.
#[derive(Default)]
struct Cycle {
    generation: u64,
    timer: Option<CancellationToken>,
}

impl<S: RosterSource> IdValidator<S> {
    pub fn new(source: S) -> Self {
        Self::with_debounce(source, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(source: S, debounce: Duration) -> Self {
        let (state, _) = watch::channel(ValidationState::Idle);
        Self {
            inner: Arc::new(Inner {
                source,
                debounce,
                state,
                cycle: Mutex::new(Cycle::default()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.inner.debounce
    }

    /// Current state (cheap clone).
    pub fn state(&self) -> ValidationState {
        self.inner.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.inner.state.subscribe()
    }

    /// React to the identifier field changing to `identifier`.
    ///
    /// Cancels the previous timer (if still running), then either goes
    /// `Idle` for blank input or goes `Pending` and arms a fresh timer.
    /// States are tagged with the trimmed identifier, the same value a
    /// submitted form carries.
    pub fn on_identifier_change(&self, identifier: &str) {
        if self.inner.shutdown.is_cancelled() {
            trace!("validator closed, ignoring identifier change");
            return;
        }

        let mut cycle = self.inner.lock_cycle();
        cycle.generation += 1;
        if let Some(prev) = cycle.timer.take() {
            prev.cancel();
        }

        let identifier = identifier.trim();
        if identifier.is_empty() {
            self.inner.state.send_replace(ValidationState::Idle);
            return;
        }

        let identifier = identifier.to_owned();
        let generation = cycle.generation;
        let timer = self.inner.shutdown.child_token();
        cycle.timer = Some(timer.clone());
        self.inner.state.send_replace(ValidationState::Pending {
            identifier: identifier.clone(),
        });
        drop(cycle);

        trace!(%identifier, generation, "debounce timer armed");
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.run_cycle(identifier, generation, timer).await;
        });
    }

    /// Re-run the check for the current identifier (e.g. after `Failed`).
    pub fn revalidate(&self) {
        let current = self.state();
        if let Some(identifier) = current.identifier() {
            self.on_identifier_change(identifier);
        }
    }

    /// Wait until the current input has a settled (non-pending) state.
    ///
    /// Once the validator is closed nothing moves the state any more, so
    /// this returns the current state as is, possibly still `Pending`.
    pub async fn settled(&self) -> ValidationState {
        let mut rx = self.inner.state.subscribe();
        tokio::select! {
            biased;
            () = self.inner.shutdown.cancelled() => self.state(),
            settled = rx.wait_for(|s| !s.is_pending()) => {
                settled.map_or_else(|_| self.state(), |s| s.clone())
            }
        }
    }

    /// Tear down: cancel the pending timer and orphan any in-flight fetch.
    pub fn close(&self) {
        let mut cycle = self.inner.lock_cycle();
        cycle.generation += 1;
        cycle.timer = None;
        self.inner.shutdown.cancel();
        debug!("identifier validator closed");
    }
}

impl<S: RosterSource> Drop for IdValidator<S> {
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}

impl<S: RosterSource> Inner<S> {
    fn lock_cycle(&self) -> MutexGuard<'_, Cycle> {
        // The guarded data is two plain fields; a panic mid-update cannot
        // leave it inconsistent.
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_cycle(&self, identifier: String, generation: u64, timer: CancellationToken) {
        tokio::select! {
            biased;
            () = timer.cancelled() => {
                trace!(%identifier, generation, "debounce timer cancelled");
                return;
            }
            () = tokio::time::sleep(self.debounce) => {}
        }

        // From here on cancellation no longer applies; a superseded result
        // is filtered by `apply`.
        debug!(%identifier, generation, "checking identifier availability");
        let next = validate(&self.source, &identifier).await;
        self.apply(generation, next);
    }

    /// Commit `next` if it still describes the current input.
    fn apply(&self, generation: u64, next: ValidationState) -> bool {
        let cycle = self.lock_cycle();
        let current = self.state.borrow().clone();
        let fresh = cycle.generation == generation
            && next.identifier().is_some_and(|id| current.is_for(id));
        if !fresh {
            trace!(
                identifier = next.identifier().unwrap_or_default(),
                generation,
                latest = cycle.generation,
                "discarding stale validation result"
            );
            return false;
        }

        if let ValidationState::Failed {
            ref identifier,
            ref message,
        } = next
        {
            warn!(%identifier, error = %message, "identifier availability check failed");
        } else {
            debug!(state = ?next, "identifier validation settled");
        }
        self.state.send_replace(next);
        true
    }
}
