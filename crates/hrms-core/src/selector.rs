// ── Searchable employee selector ──
//
// Synchronous state machine behind a typeahead picker. The committed
// selection exists only while the visible text equals the picked
// employee's label; dependent actions read the committed employee, never
// the raw text.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Employee, Roster};

/// Message shown when a dependent action runs without a committed pick.
pub const SELECTION_REQUIRED: &str = "Please select an employee";

const AMBIGUOUS_PREVIEW: usize = 5;

// ── SelectionState ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    Empty,
    /// Free text entered; `candidates` is always `roster.filter(query)`.
    Searching {
        query: String,
        candidates: Vec<Arc<Employee>>,
    },
    Selected { employee: Arc<Employee> },
}

impl SelectionState {
    pub fn selected(&self) -> Option<&Arc<Employee>> {
        match self {
            Self::Selected { employee } => Some(employee),
            Self::Empty | Self::Searching { .. } => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected().is_some()
    }
}

// ── Selector ─────────────────────────────────────────────────────

/// Typeahead selection over a roster snapshot.
#[derive(Debug, Clone)]
pub struct Selector {
    roster: Roster,
    query: String,
    state: SelectionState,
    dropdown_open: bool,
    error: Option<String>,
}

impl Selector {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            query: String::new(),
            state: SelectionState::Empty,
            dropdown_open: false,
            error: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The visible query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The identifier fed to dependent actions. `None` unless selected.
    pub fn committed_employee_id(&self) -> Option<&str> {
        self.state.selected().map(|e| e.employee_id.as_str())
    }

    /// Candidates for the current text (full roster when the text is empty).
    pub fn candidates(&self) -> Vec<Arc<Employee>> {
        match &self.state {
            SelectionState::Searching { candidates, .. } => candidates.clone(),
            SelectionState::Empty | SelectionState::Selected { .. } => {
                self.roster.filter(&self.query)
            }
        }
    }

    /// The dropdown shows only while open and the query is non-empty.
    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_open && !self.query.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    // ── Events ───────────────────────────────────────────────────

    /// Text edited. Returns the new candidate list.
    ///
    /// Text that reproduces the selected label keeps the selection; any
    /// other edit abandons it. Emptied text goes back to `Empty`;
    /// whitespace-only text stays as typed and lists the whole roster.
    pub fn on_query_change(&mut self, query: &str) -> Vec<Arc<Employee>> {
        query.clone_into(&mut self.query);
        self.dropdown_open = true;

        if let SelectionState::Selected { employee } = &self.state {
            if employee.label() == query {
                return self.candidates();
            }
            debug!(employee_id = %employee.employee_id, "selection abandoned by edit");
        }

        self.state = if query.is_empty() {
            SelectionState::Empty
        } else {
            SelectionState::Searching {
                query: query.to_owned(),
                candidates: self.roster.filter(query),
            }
        };
        self.candidates()
    }

    /// Commit `employee`: text becomes its label, dropdown closes, any
    /// local error clears.
    pub fn on_candidate_pick(&mut self, employee: Arc<Employee>) {
        debug!(employee_id = %employee.employee_id, "employee selected");
        self.query = employee.label();
        self.state = SelectionState::Selected { employee };
        self.dropdown_open = false;
        self.error = None;
    }

    /// Reset to an empty query over the full roster.
    pub fn on_clear(&mut self) {
        self.query.clear();
        self.state = SelectionState::Empty;
        self.dropdown_open = false;
    }

    pub fn on_focus(&mut self) {
        self.dropdown_open = true;
    }

    /// Install a fresh roster snapshot.
    ///
    /// Search results are recomputed. A selected employee that vanished
    /// from the roster drops back to searching on its label.
    pub fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
        self.state = match std::mem::replace(&mut self.state, SelectionState::Empty) {
            SelectionState::Empty => SelectionState::Empty,
            SelectionState::Searching { query, .. } => SelectionState::Searching {
                candidates: self.roster.filter(&query),
                query,
            },
            SelectionState::Selected { employee } => {
                match self.roster.find(&employee.employee_id) {
                    Some(fresh) => SelectionState::Selected {
                        employee: Arc::clone(fresh),
                    },
                    None => {
                        debug!(
                            employee_id = %employee.employee_id,
                            "selected employee no longer in roster"
                        );
                        SelectionState::Searching {
                            candidates: self.roster.filter(&self.query),
                            query: self.query.clone(),
                        }
                    }
                }
            }
        };
    }

    // ── Gating ───────────────────────────────────────────────────

    /// The committed employee, or `PreconditionNotMet`.
    ///
    /// Text that happens to spell a valid identifier does not count.
    pub fn require_selected(&self) -> Result<&Arc<Employee>, CoreError> {
        self.state
            .selected()
            .ok_or_else(|| CoreError::precondition(SELECTION_REQUIRED))
    }

    /// Apply `query` and pick the match if it is unambiguous.
    ///
    /// A single candidate is picked. Among several, an exact
    /// (case-sensitive) identifier match wins. Anything else leaves the
    /// selector searching and returns `PreconditionNotMet` naming the
    /// problem; [`candidates`](Self::candidates) then lists the options.
    pub fn resolve_unique(&mut self, query: &str) -> Result<Arc<Employee>, CoreError> {
        let candidates = self.on_query_change(query);
        let pick = match candidates.as_slice() {
            [] => {
                return Err(CoreError::precondition(format!(
                    "No employee matches \"{query}\""
                )));
            }
            [only] => Arc::clone(only),
            many => match many.iter().find(|e| e.employee_id == query) {
                Some(exact) => Arc::clone(exact),
                None => {
                    let preview: Vec<String> = many
                        .iter()
                        .take(AMBIGUOUS_PREVIEW)
                        .map(|e| e.label())
                        .collect();
                    let more = many.len().saturating_sub(AMBIGUOUS_PREVIEW);
                    let suffix = if more > 0 {
                        format!(", and {more} more")
                    } else {
                        String::new()
                    };
                    return Err(CoreError::precondition(format!(
                        "\"{query}\" matches {} employees: {}{suffix}",
                        many.len(),
                        preview.join(", ")
                    )));
                }
            },
        };
        self.on_candidate_pick(Arc::clone(&pick));
        Ok(pick)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::test_support::employee;

    fn roster() -> Roster {
        Roster::new(vec![
            employee("E1", "Ann Lee", "HR"),
            employee("E2", "Bo Chen", "Engineering"),
            employee("E12", "Cy Ng", "Sales"),
        ])
    }

    fn ids(list: &[Arc<Employee>]) -> Vec<&str> {
        list.iter().map(|e| e.employee_id.as_str()).collect()
    }

    #[test]
    fn starts_empty_with_full_roster() {
        let s = Selector::new(roster());
        assert_eq!(s.state(), &SelectionState::Empty);
        assert_eq!(ids(&s.candidates()), ["E1", "E2", "E12"]);
        assert!(!s.dropdown_visible());
        assert!(s.committed_employee_id().is_none());
    }

    #[test]
    fn typing_filters_and_opens_dropdown() {
        let mut s = Selector::new(roster());
        let found = s.on_query_change("ann");
        assert_eq!(ids(&found), ["E1"]);
        assert!(s.dropdown_visible());
        assert!(matches!(s.state(), SelectionState::Searching { query, .. } if query == "ann"));
    }

    #[test]
    fn whitespace_query_lists_everyone_and_keeps_the_text() {
        let mut s = Selector::new(roster());
        let found = s.on_query_change("   ");
        assert_eq!(ids(&found), ["E1", "E2", "E12"]);
        assert_eq!(s.query(), "   ");
        assert!(s.dropdown_visible());
        assert!(
            matches!(s.state(), SelectionState::Searching { query, candidates } if query == "   " && candidates.len() == 3)
        );
        assert!(s.committed_employee_id().is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut s = Selector::new(roster());
        let lower = s.on_query_change("chen");
        let upper = s.on_query_change("CHEN");
        assert_eq!(lower, upper);
    }

    #[test]
    fn searching_candidates_track_the_query() {
        let mut s = Selector::new(roster());
        s.on_query_change("E1");
        match s.state() {
            SelectionState::Searching { query, candidates } => {
                assert_eq!(candidates, &s.roster().filter(query));
            }
            other => panic!("expected searching, got {other:?}"),
        }
    }

    #[test]
    fn pick_commits_label_and_closes_dropdown() {
        let mut s = Selector::new(roster());
        s.set_error(SELECTION_REQUIRED);
        let ann = s.on_query_change("ann")[0].clone();
        s.on_candidate_pick(ann);

        assert_eq!(s.query(), "E1 - Ann Lee");
        assert_eq!(s.committed_employee_id(), Some("E1"));
        assert!(!s.dropdown_visible());
        assert!(s.error().is_none());
    }

    #[test]
    fn any_edit_after_pick_abandons_selection() {
        let mut s = Selector::new(roster());
        let ann = s.roster().find("E1").cloned().unwrap();
        s.on_candidate_pick(ann);

        s.on_query_change("E1 - Ann Le");
        assert!(!s.state().is_selected());
        assert!(s.committed_employee_id().is_none());
        assert!(s.require_selected().is_err());
    }

    #[test]
    fn retyping_the_exact_label_keeps_selection() {
        let mut s = Selector::new(roster());
        let ann = s.roster().find("E1").cloned().unwrap();
        s.on_candidate_pick(ann);

        s.on_query_change("E1 - Ann Lee");
        assert_eq!(s.committed_employee_id(), Some("E1"));
    }

    #[test]
    fn emptied_text_returns_to_empty() {
        let mut s = Selector::new(roster());
        s.on_query_change("bo");
        let all = s.on_query_change("");
        assert_eq!(s.state(), &SelectionState::Empty);
        assert_eq!(all.len(), 3);
        assert!(!s.dropdown_visible());
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = Selector::new(roster());
        let bo = s.roster().find("E2").cloned().unwrap();
        s.on_candidate_pick(bo);
        s.on_clear();

        assert_eq!(s.state(), &SelectionState::Empty);
        assert_eq!(s.query(), "");
        assert_eq!(s.candidates().len(), 3);
    }

    #[test]
    fn focus_shows_dropdown_only_with_text() {
        let mut s = Selector::new(roster());
        s.on_focus();
        assert!(!s.dropdown_visible());

        let e1 = s.roster().find("E1").cloned().unwrap();
        s.on_candidate_pick(e1);
        assert!(!s.dropdown_visible());
        s.on_focus();
        assert!(s.dropdown_visible());
    }

    #[test]
    fn typed_identifier_is_not_a_selection() {
        let mut s = Selector::new(roster());
        s.on_query_change("E2");
        let err = s.require_selected().unwrap_err();
        assert_eq!(err.to_string(), SELECTION_REQUIRED);
    }

    #[test]
    fn replace_roster_refreshes_search_results() {
        let mut s = Selector::new(roster());
        s.on_query_change("dana");
        assert!(s.candidates().is_empty());

        s.replace_roster(Roster::new(vec![employee("E9", "Dana Fox", "Ops")]));
        assert_eq!(ids(&s.candidates()), ["E9"]);
    }

    #[test]
    fn replace_roster_drops_a_deleted_selection() {
        let mut s = Selector::new(roster());
        let bo = s.roster().find("E2").cloned().unwrap();
        s.on_candidate_pick(bo);

        s.replace_roster(Roster::new(vec![employee("E1", "Ann Lee", "HR")]));
        assert!(
            matches!(s.state(), SelectionState::Searching { query, candidates }
                if query == "E2 - Bo Chen" && candidates.is_empty())
        );
    }

    #[test]
    fn replace_roster_keeps_a_surviving_selection() {
        let mut s = Selector::new(roster());
        let ann = s.roster().find("E1").cloned().unwrap();
        s.on_candidate_pick(ann);

        s.replace_roster(roster());
        assert_eq!(s.committed_employee_id(), Some("E1"));
    }

    #[test]
    fn resolve_unique_picks_single_or_exact_match() {
        let mut s = Selector::new(roster());
        assert_eq!(s.resolve_unique("bo").unwrap().employee_id, "E2");
        assert_eq!(s.query(), "E2 - Bo Chen");

        // "E1" also matches "E12"; the exact id wins.
        assert_eq!(s.resolve_unique("E1").unwrap().employee_id, "E1");
    }

    #[test]
    fn resolve_unique_reports_ambiguity_and_misses() {
        let mut s = Selector::new(roster());
        let err = s.resolve_unique("e").unwrap_err();
        assert!(err.to_string().contains("matches 3 employees"), "{err}");
        assert!(!s.state().is_selected());
        assert_eq!(s.candidates().len(), 3);

        let err = s.resolve_unique("zzz").unwrap_err();
        assert!(err.to_string().contains("No employee matches"));
    }

    #[test]
    fn state_serializes_with_tag() {
        let mut s = Selector::new(roster());
        s.on_query_change("cy");
        let json = serde_json::to_value(s.state()).unwrap();
        assert_eq!(json["state"], "searching");
        assert_eq!(json["candidates"][0]["employee_id"], "E12");
    }
}
