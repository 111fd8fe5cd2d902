//! Navigation over the page graph
//!
//! Pure functions for linear movement plus the outcome type every
//! navigation action reports.

use std::collections::BTreeSet;

use crate::schemas::{AnswerSet, PageGraph};

use super::evaluator::is_page_visible;

/// Where the session currently is in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPosition {
    /// Index of the current page
    pub current: usize,

    /// Indices of every page reached so far; only ever grows
    pub visited: BTreeSet<usize>,

    /// Ledger index of the provider whose enrollment sub-flow is active
    pub enrolling: Option<usize>,

    /// Ledger index of the provider being added to the group
    pub adding: Option<usize>,
}

impl Default for NavigationPosition {
    fn default() -> Self {
        NavigationPosition {
            current: 0,
            visited: BTreeSet::from([0]),
            enrolling: None,
            adding: None,
        }
    }
}

impl NavigationPosition {
    /// Commit a move to `index` and record it as visited
    pub fn commit(&mut self, index: usize) {
        self.current = index;
        self.visited.insert(index);
    }
}

/// Why a navigation action left the position unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StayReason {
    /// Required fields are unanswered
    Incomplete(Vec<String>),
    /// Completion pages are terminal for forward navigation
    CompletionPage,
    /// No visible page after the current one
    EndOfGraph,
    /// No visible page before the current one
    StartOfGraph,
    /// A named target page is not in the graph
    MissingPage(String),
    /// No ledger record qualified for the next enrollment
    NoReadyProvider,
    /// No ledger record at the requested index
    UnknownProvider(usize),
}

impl std::fmt::Display for StayReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StayReason::Incomplete(missing) => {
                write!(f, "required fields unanswered: {}", missing.join(", "))
            }
            StayReason::CompletionPage => write!(f, "this is a completion page"),
            StayReason::EndOfGraph => write!(f, "no later page is visible"),
            StayReason::StartOfGraph => write!(f, "no earlier page is visible"),
            StayReason::MissingPage(id) => write!(f, "page '{}' does not exist", id),
            StayReason::NoReadyProvider => write!(f, "no provider is ready to enroll"),
            StayReason::UnknownProvider(index) => write!(f, "no provider at index {}", index),
        }
    }
}

/// Outcome of a navigation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Position moved between two pages
    Moved { from: usize, to: usize },
    /// The checkpoint re-entered its own page for another provider
    Looped { page: usize },
    /// Nothing moved
    Stayed(StayReason),
}

impl Transition {
    /// Check if the position changed or the page was re-entered
    pub fn is_move(&self) -> bool {
        !matches!(self, Transition::Stayed(_))
    }

    /// Page index the action landed on, if it moved
    pub fn target(&self) -> Option<usize> {
        match self {
            Transition::Moved { to, .. } => Some(*to),
            Transition::Looped { page } => Some(*page),
            Transition::Stayed(_) => None,
        }
    }

    /// Reason for staying, if nothing moved
    pub fn reason(&self) -> Option<&StayReason> {
        match self {
            Transition::Stayed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// First visible page after `from`
pub fn next_visible_index(graph: &PageGraph, from: usize, answers: &AnswerSet) -> Option<usize> {
    graph
        .pages()
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(_, page)| is_page_visible(page, answers))
        .map(|(i, _)| i)
}

/// Last visible page before `from`
pub fn previous_visible_index(
    graph: &PageGraph,
    from: usize,
    answers: &AnswerSet,
) -> Option<usize> {
    graph.pages()[..from.min(graph.len())]
        .iter()
        .rposition(|page| is_page_visible(page, answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Page, Visibility};

    fn graph() -> PageGraph {
        PageGraph::new(vec![
            Page::new("a", "A"),
            Page::new("b", "B").with_visibility(Visibility::when("showB", "Yes")),
            Page::new("c", "C"),
            Page::new("d", "D").with_visibility(Visibility::when("showD", "Yes")),
        ])
    }

    #[test]
    fn test_next_skips_hidden_pages() {
        let g = graph();
        assert_eq!(next_visible_index(&g, 0, &AnswerSet::new()), Some(2));
        assert_eq!(
            next_visible_index(&g, 0, &AnswerSet::new().with("showB", "Yes")),
            Some(1)
        );
    }

    #[test]
    fn test_next_at_end_is_none() {
        let g = graph();
        assert_eq!(next_visible_index(&g, 2, &AnswerSet::new()), None);
        assert_eq!(next_visible_index(&g, 3, &AnswerSet::new()), None);
    }

    #[test]
    fn test_previous_skips_hidden_pages() {
        let g = graph();
        assert_eq!(previous_visible_index(&g, 2, &AnswerSet::new()), Some(0));
        assert_eq!(
            previous_visible_index(&g, 2, &AnswerSet::new().with("showB", "Yes")),
            Some(1)
        );
        assert_eq!(previous_visible_index(&g, 0, &AnswerSet::new()), None);
    }

    #[test]
    fn test_previous_clamps_out_of_range_index() {
        let g = graph();
        assert_eq!(previous_visible_index(&g, 99, &AnswerSet::new()), Some(2));
    }

    #[test]
    fn test_position_commit_grows_visited() {
        let mut position = NavigationPosition::default();
        position.commit(2);
        position.commit(1);
        assert_eq!(position.current, 1);
        assert_eq!(position.visited, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_transition_helpers() {
        let moved = Transition::Moved { from: 0, to: 2 };
        assert!(moved.is_move());
        assert_eq!(moved.target(), Some(2));
        assert!(moved.reason().is_none());

        let looped = Transition::Looped { page: 6 };
        assert_eq!(looped.target(), Some(6));

        let stayed = Transition::Stayed(StayReason::EndOfGraph);
        assert!(!stayed.is_move());
        assert_eq!(stayed.reason(), Some(&StayReason::EndOfGraph));
    }

    #[test]
    fn test_stay_reason_display() {
        let reason = StayReason::Incomplete(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(reason.to_string(), "required fields unanswered: a, b");
        assert_eq!(
            StayReason::MissingPage("x".to_string()).to_string(),
            "page 'x' does not exist"
        );
    }
}
