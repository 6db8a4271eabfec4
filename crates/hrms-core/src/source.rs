// ── Roster data source ──
//
// The seam between the validator/selector and wherever the roster comes
// from. `Service` implements it over HTTP; tests plug in scripted fakes.

use std::future::Future;
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::Roster;

/// Something that can produce a fresh roster snapshot.
///
/// Every call is a new fetch. Implementations must not hand back a cached
/// snapshot that predates a mutation they know about.
pub trait RosterSource: Send + Sync + 'static {
    fn fetch_roster(&self) -> impl Future<Output = Result<Roster, CoreError>> + Send;
}

impl<S: RosterSource> RosterSource for Arc<S> {
    fn fetch_roster(&self) -> impl Future<Output = Result<Roster, CoreError>> + Send {
        (**self).fetch_roster()
    }
}

/// A fixed snapshot. Useful for offline validation and tests.
impl RosterSource for Roster {
    async fn fetch_roster(&self) -> Result<Roster, CoreError> {
        Ok(self.clone())
    }
}
