//! End-to-end scenarios against the bundled group-change walkthrough

use std::sync::Arc;

use crate::config::builtin_graph;
use crate::prompt::ScriptedPrompter;
use crate::schemas::{AnswerValue, BranchConfig, ProviderStatus};

use super::navigation::{StayReason, Transition};
use super::session::{Session, ToggleOutcome};

const VERIFICATION_CHECKS: [&str; 8] = [
    "ssnVerified",
    "dexSanctionsCheck",
    "dobVerified",
    "npiVerified",
    "licensesVerified",
    "doctorLicenseVerified",
    "deaEffectiveDates",
    "effectiveDatesChecked",
];

fn session() -> Session {
    Session::new(Arc::new(builtin_graph().unwrap()), BranchConfig::default())
}

fn index(s: &Session, id: &str) -> usize {
    s.graph().index_of(id).unwrap()
}

/// Answer question 20 for a provider, ticking every visible check except `skip`
fn verify_provider(s: &mut Session, enrolled: &str, in_group: Option<&str>, skip: &[&str]) {
    s.jump_to("question-20");
    s.set_answer("question20Answered", "Yes");
    s.set_answer("providerAlreadyEnrolled", enrolled);
    if let Some(in_group) = in_group {
        s.set_answer("providerInGroup", in_group);
    }
    let visible: Vec<String> = s.visible_fields().iter().map(|f| f.name.clone()).collect();
    for check in VERIFICATION_CHECKS {
        if visible.iter().any(|v| v == check) && !skip.contains(&check) {
            s.set_answer(check, true);
        }
    }
}

// ===== SCENARIO A: hidden dependent field =====

#[test]
fn test_hidden_dependent_field_does_not_gate() {
    let mut s = session();
    s.jump_to("group-practice");
    assert!(!s.can_proceed());

    s.set_answer("groupPracticeAttached", "No");
    let names: Vec<&str> = s.visible_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["groupPracticeAttached"]);
    assert!(s.can_proceed());

    s.set_answer("groupPracticeAttached", "Yes");
    assert!(!s.can_proceed());
    assert_eq!(s.validate().missing, vec!["questionsAnswered".to_string()]);
}

// ===== SCENARIO B: checkpoint loop =====

#[tokio::test]
async fn test_checkpoint_loop_records_and_clears() {
    let mut s = session();
    s.set_answer("userName", "Pat Doe");
    verify_provider(&mut s, "No", None, &[]);
    let checkpoint = index(&s, "question-20");

    let mut prompter = ScriptedPrompter::new([true]);
    let t = s.next(&mut prompter).await;

    assert_eq!(t, Transition::Looped { page: checkpoint });
    assert_eq!(s.position().current, checkpoint);
    assert_eq!(
        prompter.confirms(),
        &["Are there more providers to verify in this application?".to_string()]
    );

    assert_eq!(s.ledger().len(), 1);
    let record = s.ledger().get(0).unwrap();
    assert_eq!(record.status, ProviderStatus::ReadyToEnroll);
    assert!(record.is_complete("ssnVerified"));
    assert!(record.answers.is_text("userName", "Pat Doe"));

    for field in BranchConfig::default()
        .verification_fields
        .iter()
        .chain(&BranchConfig::default().verification_cleared_fields)
    {
        assert!(!s.answers().contains(field), "{} not cleared", field);
    }
    assert!(s.answers().is_text("userName", "Pat Doe"));
    assert!(!s.can_proceed());
}

// ===== SCENARIO C: outreach detour =====

#[tokio::test]
async fn test_unverifiable_field_detours_to_outreach() {
    let mut s = session();
    verify_provider(&mut s, "No", None, &["ssnVerified"]);
    assert!(!s.can_proceed());

    let outcome = s
        .toggle_unverifiable("ssnVerified", &mut ScriptedPrompter::new([true]))
        .await;
    assert!(matches!(outcome, ToggleOutcome::Marked { .. }));
    assert!(s.can_proceed());

    let from = s.position().current;
    let t = s.next(&mut ScriptedPrompter::declining()).await;
    let outreach = index(&s, "question-20-unable-to-verify-completion");

    assert_eq!(t, Transition::Moved { from, to: outreach });
    assert_eq!(s.ledger().len(), 1);
    assert_eq!(
        s.ledger().get(0).unwrap().status.to_string(),
        "Unable to Verify - Requires Outreach"
    );
    assert_eq!(s.next_label(), "Complete");
    assert_eq!(
        s.next(&mut ScriptedPrompter::declining()).await,
        Transition::Stayed(StayReason::CompletionPage)
    );
}

#[tokio::test]
async fn test_verified_provider_skips_detour_pages() {
    let mut s = session();
    verify_provider(&mut s, "No", None, &[]);

    let from = s.position().current;
    let t = s.next(&mut ScriptedPrompter::declining()).await;
    assert_eq!(t, Transition::Moved { from, to: index(&s, "questions-21-23") });
    assert!(s.ledger().is_empty());
}

// ===== SCENARIO D: no ready provider =====

#[tokio::test]
async fn test_additional_providers_without_candidate_stays() {
    let mut s = session();
    verify_provider(&mut s, "Yes", Some("No"), &[]);
    s.next(&mut ScriptedPrompter::new([true])).await;
    assert_eq!(
        s.ledger().get(0).unwrap().status,
        ProviderStatus::ReadyToAddToGroup
    );

    s.set_answer("providerEnrollmentType", "New Provider");
    s.jump_to("additional-providers-check");
    s.set_answer("additionalProvidersNeeded", "Yes");
    let before = s.position().clone();

    let t = s.next(&mut ScriptedPrompter::declining()).await;
    assert_eq!(t, Transition::Stayed(StayReason::NoReadyProvider));
    assert_eq!(s.position(), &before);
    assert!(s.answers().is_text("additionalProvidersNeeded", "Yes"));
}

#[tokio::test]
async fn test_additional_providers_enrolls_next_new_provider() {
    let mut s = session();
    verify_provider(&mut s, "No", None, &[]);
    s.next(&mut ScriptedPrompter::new([true])).await;

    s.set_answer("providerEnrollmentType", "New Provider");
    s.jump_to("create-enrollment");
    s.set_answer("createEnrollmentComplete", true);
    s.jump_to("additional-providers-check");
    s.set_answer("additionalProvidersNeeded", "Yes");

    let from = s.position().current;
    let t = s.next(&mut ScriptedPrompter::declining()).await;

    assert_eq!(t, Transition::Moved { from, to: index(&s, "create-enrollment") });
    assert_eq!(s.position().enrolling, Some(0));
    assert!(!s.answers().contains("createEnrollmentComplete"));
    assert!(!s.answers().contains("additionalProvidersNeeded"));
    assert!(s.answers().is_text("providerEnrollmentType", "New Provider"));
    assert_eq!(
        s.ledger().get(0).unwrap().get("groupSpecialtiesChecked"),
        Some(&AnswerValue::Flag(false))
    );

    s.set_answer("createEnrollmentComplete", true);
    assert!(s.ledger().get(0).unwrap().is_complete("createEnrollmentComplete"));
}

// ===== SCENARIO E: outreach note round trip =====

#[tokio::test]
async fn test_unverifiable_note_round_trip() {
    let mut s = session();
    verify_provider(&mut s, "No", None, &["ssnVerified", "dobVerified"]);
    let mut prompter = ScriptedPrompter::new([true, true]);

    s.toggle_unverifiable("dobVerified", &mut prompter).await;
    s.toggle_unverifiable("ssnVerified", &mut prompter).await;
    let ssn_note = format!("Unable to verify: {}", s.label_of("ssnVerified"));
    assert_eq!(s.outreach_notes().len(), 2);
    assert_eq!(
        s.outreach_notes().iter().filter(|n| **n == ssn_note).count(),
        1
    );

    let outcome = s.toggle_unverifiable("ssnVerified", &mut prompter).await;
    assert_eq!(outcome, ToggleOutcome::Unmarked);
    assert_eq!(
        s.outreach_notes(),
        &[format!("Unable to verify: {}", s.label_of("dobVerified"))]
    );
    assert_eq!(prompter.confirms().len(), 2);
}

// ===== WHOLE-FLOW BEHAVIOUR =====

#[tokio::test]
async fn test_linear_walk_from_welcome() {
    let mut s = session();
    let mut prompter = ScriptedPrompter::declining();
    assert_eq!(s.progress().to_string(), format!("Step 1 of {}", s.graph().len()));

    s.set_answer("userName", "P");
    assert!(matches!(
        s.next(&mut prompter).await,
        Transition::Stayed(StayReason::Incomplete(_))
    ));

    s.set_answer("userName", "Pat");
    s.set_answer("pwoNumber", "PWO0012345");
    assert_eq!(s.next(&mut prompter).await, Transition::Moved { from: 0, to: 1 });

    s.set_answer("groupPracticeAttached", "No");
    s.next(&mut prompter).await;
    assert_eq!(s.current_page().unwrap().id, "question-6");
    assert_eq!(s.previous(), Transition::Moved { from: 2, to: 1 });
}

#[tokio::test]
async fn test_provider_type_routes_to_new_provider_pages() {
    let mut s = session();
    s.jump_to("provider-type-selection");
    let field = s.graph().field("providerEnrollmentType").unwrap();
    assert_eq!(
        crate::domain::field_options(field, s.answers()),
        vec!["New Provider".to_string()]
    );

    s.set_answer("providerEnrollmentType", "New Provider");
    let from = s.position().current;
    let t = s.next(&mut ScriptedPrompter::declining()).await;
    assert_eq!(t, Transition::Moved { from, to: index(&s, "create-enrollment") });
}

#[tokio::test]
async fn test_group_add_flow_completes_provider() {
    let mut s = session();
    verify_provider(&mut s, "Yes", Some("No"), &[]);
    s.next(&mut ScriptedPrompter::new([true])).await;

    let t = s.resume_adding_to_group(0);
    assert_eq!(
        t.target(),
        Some(index(&s, "existing-provider-open-cics"))
    );

    s.jump_to("existing-provider-completion");
    s.set_answer("additionalExistingProvidersNeeded", "No");
    let t = s.next(&mut ScriptedPrompter::declining()).await;
    assert_eq!(t.target(), Some(index(&s, "final-completion")));
    assert_eq!(s.ledger().get(0).unwrap().status, ProviderStatus::Complete);
}

#[test]
fn test_handoff_page_label() {
    let mut s = session();
    s.set_answer("additionalProvidersNeeded", "Yes");
    s.jump_to("next-provider-ready-check");
    assert!(s.is_last_page());
    assert_eq!(s.next_label(), "Continue to Provider Type Selection");
}
