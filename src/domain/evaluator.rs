//! Field evaluator
//!
//! Pure resolution of answer-dependent attributes. Nothing here mutates
//! state; every function is a function of (declaration, answers).

use crate::schemas::{AnswerSet, Dynamic, Field, Page, Visibility};

/// Resolve a literal-or-derived attribute against the answers
pub fn resolve<T: Clone>(attribute: &Dynamic<T>, answers: &AnswerSet) -> T {
    match attribute {
        Dynamic::Static(value) => value.clone(),
        Dynamic::Derived(derive) => derive(answers),
    }
}

/// Whether a visibility predicate holds.
///
/// Equality predicates compare `answers[field]` with the expected value;
/// an absent predicate means always visible.
pub fn is_visible(visibility: &Visibility, answers: &AnswerSet) -> bool {
    match visibility {
        Visibility::Always => true,
        Visibility::Equals { field, value } => answers.is(field, value),
        Visibility::Derived(predicate) => predicate(answers),
    }
}

pub fn is_page_visible(page: &Page, answers: &AnswerSet) -> bool {
    is_visible(&page.show_when, answers)
}

pub fn is_field_visible(field: &Field, answers: &AnswerSet) -> bool {
    is_visible(&field.show_when, answers)
}

/// Fields of a page that are currently visible, in declaration order
pub fn visible_fields<'a>(page: &'a Page, answers: &AnswerSet) -> Vec<&'a Field> {
    page.fields
        .iter()
        .filter(|f| is_field_visible(f, answers))
        .collect()
}

pub fn field_label(field: &Field, answers: &AnswerSet) -> String {
    resolve(&field.label, answers)
}

pub fn field_options(field: &Field, answers: &AnswerSet) -> Vec<String> {
    resolve(&field.options, answers)
}

pub fn page_description(page: &Page, answers: &AnswerSet) -> String {
    resolve(&page.description, answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{AnswerValue, Field, Page};

    fn already_enrolled(answers: &AnswerSet) -> bool {
        answers.is_text("providerAlreadyEnrolled", "Yes")
    }

    #[test]
    fn test_resolve_static_and_derived() {
        let answers = AnswerSet::new().with("providerAlreadyEnrolled", "Yes");
        let fixed: Dynamic<String> = Dynamic::from("Fixed");
        let derived: Dynamic<String> = Dynamic::derived(|a| {
            if already_enrolled(a) {
                "Existing Provider".to_string()
            } else {
                "New Provider".to_string()
            }
        });

        assert_eq!(resolve(&fixed, &answers), "Fixed");
        assert_eq!(resolve(&derived, &answers), "Existing Provider");
        assert_eq!(resolve(&derived, &AnswerSet::new()), "New Provider");
    }

    #[test]
    fn test_equality_visibility() {
        let vis = Visibility::when("groupPracticeAttached", "Yes");
        assert!(is_visible(&vis, &AnswerSet::new().with("groupPracticeAttached", "Yes")));
        assert!(!is_visible(&vis, &AnswerSet::new().with("groupPracticeAttached", "No")));
        assert!(!is_visible(&vis, &AnswerSet::new()));
    }

    #[test]
    fn test_equality_visibility_is_strict_about_kind() {
        let vis = Visibility::when("flag", true);
        assert!(is_visible(&vis, &AnswerSet::new().with("flag", true)));
        assert!(!is_visible(&vis, &AnswerSet::new().with("flag", "true")));
    }

    #[test]
    fn test_absent_predicate_is_visible() {
        assert!(is_visible(&Visibility::Always, &AnswerSet::new()));
    }

    #[test]
    fn test_visible_fields_preserves_order() {
        let page = Page::new("payto-mailto", "Pay To")
            .with_field(Field::radio("paytoMailtoMatch", "Match?", &["Yes", "No"]).required())
            .with_field(
                Field::checkbox("paytoMailtoComplete", "Updated")
                    .required()
                    .with_visibility(Visibility::when("paytoMailtoMatch", "No")),
            )
            .with_field(Field::text("comment", "Comment"));

        let names = |answers: &AnswerSet| -> Vec<String> {
            visible_fields(&page, answers)
                .into_iter()
                .map(|f| f.name.clone())
                .collect()
        };

        assert_eq!(names(&AnswerSet::new()), vec!["paytoMailtoMatch", "comment"]);
        assert_eq!(
            names(&AnswerSet::new().with("paytoMailtoMatch", AnswerValue::from("No"))),
            vec!["paytoMailtoMatch", "paytoMailtoComplete", "comment"]
        );
    }

    #[test]
    fn test_derived_label() {
        let field = Field::radio(
            "providerEnrollmentType",
            Dynamic::derived(|a: &AnswerSet| {
                if already_enrolled(a) {
                    "You are adding an Existing Provider".to_string()
                } else {
                    "You are adding a New Provider".to_string()
                }
            }),
            &["New Provider"],
        );
        assert_eq!(field_label(&field, &AnswerSet::new()), "You are adding a New Provider");
        assert_eq!(field_options(&field, &AnswerSet::new()), vec!["New Provider"]);
    }
}
