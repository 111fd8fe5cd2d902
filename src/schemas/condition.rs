//! Condition language used by page-graph files for visibility and
//! answer-dependent text.

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, AnswerValue};

/// Boolean expression over the answer set.
///
/// The equality form `{ "field": .., "value": .. }` is the common case;
/// the combinators cover the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Equals { field: String, value: AnswerValue },
    Present { present: String },
    All { all: Vec<Condition> },
    Any { any: Vec<Condition> },
    Not { not: Box<Condition> },
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate against the current answers. Missing fields compare unequal.
    pub fn evaluate(&self, answers: &AnswerSet) -> bool {
        match self {
            Condition::Equals { field, value } => answers.is(field, value),
            Condition::Present { present } => answers.contains(present),
            Condition::All { all } => all.iter().all(|c| c.evaluate(answers)),
            Condition::Any { any } => any.iter().any(|c| c.evaluate(answers)),
            Condition::Not { not } => !not.evaluate(answers),
        }
    }

    /// Field names this condition reads
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Condition::Equals { field, .. } => vec![field.as_str()],
            Condition::Present { present } => vec![present.as_str()],
            Condition::All { all } => all.iter().flat_map(Condition::fields).collect(),
            Condition::Any { any } => any.iter().flat_map(Condition::fields).collect(),
            Condition::Not { not } => not.fields(),
        }
    }
}
