//! Branch points of the walkthrough
//!
//! Transitions that loop, detour or fork instead of scanning forward.
//! Each one resolves its prompts and target lookups before it mutates
//! anything, so a declined prompt or a missing page leaves the session
//! exactly as it was.

use crate::prompt::Prompter;
use crate::schemas::{ProviderRecord, ProviderStatus};

use super::ledger::verification_status;
use super::navigation::{StayReason, Transition};
use super::session::Session;

impl Session {
    /// Leave the provider verification page.
    ///
    /// Asks whether more providers remain, records the provider when it
    /// loops or needs outreach, and otherwise falls through to the
    /// duplicate check and an ordinary advance.
    pub(super) async fn leave_verification_page<P: Prompter>(
        &mut self,
        prompter: &mut P,
    ) -> Transition {
        let page = self.position.current;
        let more_providers = prompter.confirm(&self.branches.more_providers_prompt).await;
        let needs_outreach = self
            .outreach
            .any_unverifiable(&self.branches.verification_fields);

        if more_providers || needs_outreach {
            self.capture_provider(needs_outreach);
        }

        if more_providers {
            self.clear_verification();
            self.position.commit(page);
            tracing::debug!(page, "checkpoint looped for next provider");
            return Transition::Looped { page };
        }

        if needs_outreach {
            let target = self.branches.outreach_completion_page.clone();
            return self.jump_to(&target);
        }

        if let Some(transition) = self.reject_duplicate(prompter).await {
            return transition;
        }

        self.advance_linear()
    }

    /// Append a record for the provider on the verification page
    fn capture_provider(&mut self, needs_outreach: bool) -> usize {
        let status = verification_status(
            &self.answers,
            &self.branches.already_enrolled_field,
            &self.branches.in_group_field,
            needs_outreach,
        );
        let record = ProviderRecord::new(
            status,
            self.answers.clone(),
            self.outreach.notes().to_vec(),
        );
        let index = self.ledger.push(record);
        tracing::info!(provider = index, status = %status, "provider recorded");
        index
    }

    /// Forget the verification answers and flags of the provider just recorded
    fn clear_verification(&mut self) {
        let fields = self
            .branches
            .verification_fields
            .iter()
            .chain(self.branches.verification_cleared_fields.iter());
        for field in fields {
            self.answers.remove(field);
        }
        self.outreach.clear_fields(&self.branches.verification_fields);
    }

    /// Offer to reject a provider that is already enrolled and in the group.
    ///
    /// Returns `None` when the detour does not apply or is declined.
    async fn reject_duplicate<P: Prompter>(&mut self, prompter: &mut P) -> Option<Transition> {
        let is_duplicate = self
            .answers
            .is_text(&self.branches.already_enrolled_field, "Yes")
            && self.answers.is_text(&self.branches.in_group_field, "Yes");
        if !is_duplicate {
            return None;
        }

        let Some(target) = self.graph.index_of(&self.branches.duplicate_rejection_page) else {
            tracing::warn!(
                page = %self.branches.duplicate_rejection_page,
                "duplicate rejection page not found"
            );
            return None;
        };

        if !prompter.confirm(&self.branches.duplicate_rejection_prompt).await {
            return None;
        }

        let from = self.position.current;
        self.outreach
            .add_note(self.branches.duplicate_rejection_note.clone());
        self.position.commit(target);
        tracing::info!(from, to = target, "application rejected as duplicate");
        Some(Transition::Moved { from, to: target })
    }

    /// Pick up the next new provider waiting to be enrolled.
    ///
    /// Searches ahead of the provider currently enrolling. The previous
    /// provider is marked enrolled, the new one's progress flags reset and
    /// the answer set starts a fresh enrollment sub-flow.
    pub(super) fn start_next_enrollment(&mut self) -> Transition {
        let Some(found) = self.ledger.find_ready_to_enroll(
            self.position.enrolling,
            &self.branches.already_enrolled_field,
            "No",
        ) else {
            tracing::debug!("no further provider ready to enroll");
            return Transition::Stayed(StayReason::NoReadyProvider);
        };

        let entry = self.branches.enrollment_entry_page.clone();
        let Some(target) = self.graph.index_of(&entry) else {
            tracing::warn!(page = %entry, "enrollment entry page not found");
            return Transition::Stayed(StayReason::MissingPage(entry));
        };

        if let Some(previous) = self.position.enrolling {
            self.ledger
                .set_status(previous, ProviderStatus::EnrolledReadyForGroup);
            tracing::info!(provider = previous, "provider enrolled");
        }
        self.ledger
            .reset_fields(found, &self.branches.enrollment_reset_fields);
        self.position.enrolling = Some(found);

        self.reset_enrollment_answers();
        self.answers.remove(&self.branches.additional_providers_field);

        let from = self.position.current;
        self.position.commit(target);
        tracing::info!(provider = found, from, to = target, "enrolling next provider");
        Transition::Moved { from, to: target }
    }

    /// Drop every tracked answer and seed the new-provider enrollment type
    fn reset_enrollment_answers(&mut self) {
        let tracked: Vec<String> = self
            .graph
            .tracked_fields()
            .map(|f| f.name.clone())
            .collect();
        for field in &tracked {
            self.answers.remove(field);
        }
        self.answers.set(
            self.branches.enrollment_type_field.as_str(),
            self.branches.new_provider_value.as_str(),
        );
    }

    /// Mark the provider being added to the group as complete
    pub(super) fn finish_group_add(&mut self) {
        if let Some(index) = self.position.adding.take() {
            self.ledger.set_status(index, ProviderStatus::Complete);
            tracing::info!(provider = index, "provider added to group");
        }
    }

    /// Resume the enrollment sub-flow of provider `index`.
    ///
    /// Restores the provider's tracked progress into the answer set and
    /// moves to the enrollment entry page.
    pub fn resume_enrolling(&mut self, index: usize) -> Transition {
        let Some(record) = self.ledger.get(index) else {
            return Transition::Stayed(StayReason::UnknownProvider(index));
        };
        let entry = self.branches.enrollment_entry_page.clone();
        let Some(target) = self.graph.index_of(&entry) else {
            tracing::warn!(page = %entry, "enrollment entry page not found");
            return Transition::Stayed(StayReason::MissingPage(entry));
        };

        let restored: Vec<_> = self
            .graph
            .tracked_fields()
            .filter_map(|f| record.get(&f.name).map(|v| (f.name.clone(), v.clone())))
            .collect();

        self.reset_enrollment_answers();
        for (field, value) in restored {
            self.answers.set(field, value);
        }
        self.position.enrolling = Some(index);

        let from = self.position.current;
        self.position.commit(target);
        tracing::info!(provider = index, from, to = target, "resumed enrollment");
        Transition::Moved { from, to: target }
    }

    /// Start adding provider `index` to the group
    pub fn resume_adding_to_group(&mut self, index: usize) -> Transition {
        if self.ledger.get(index).is_none() {
            return Transition::Stayed(StayReason::UnknownProvider(index));
        }
        let entry = self.branches.group_add_entry_page.clone();
        let Some(target) = self.graph.index_of(&entry) else {
            tracing::warn!(page = %entry, "group add entry page not found");
            return Transition::Stayed(StayReason::MissingPage(entry));
        };

        self.answers.set(
            self.branches.enrollment_type_field.as_str(),
            self.branches.existing_provider_value.as_str(),
        );
        self.position.adding = Some(index);

        let from = self.position.current;
        self.position.commit(target);
        tracing::info!(provider = index, from, to = target, "adding provider to group");
        Transition::Moved { from, to: target }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::navigation::NavigationPosition;
    use crate::prompt::ScriptedPrompter;
    use crate::schemas::{AnswerSet, AnswerValue, BranchConfig, Field, Page, PageGraph, Visibility};

    use super::*;

    fn branches() -> BranchConfig {
        BranchConfig {
            verification_fields: vec!["ssnVerified".to_string()],
            ..BranchConfig::default()
        }
    }

    fn graph() -> Arc<PageGraph> {
        Arc::new(PageGraph::new(vec![
            Page::new("question-20", "Provider Info Verification")
                .with_field(Field::radio("question20Answered", "Answered?", &["Yes", "No"]))
                .with_field(Field::checkbox("ssnVerified", "SSN verified").required()),
            Page::new("question-20-unable-to-verify-completion", "Outreach").completion(),
            Page::new("duplicate-rejection-completion", "Duplicate").completion(),
            Page::new("questions-21-23", "Questions 21-23"),
            Page::new("create-enrollment", "Create Enrollment")
                .with_visibility(Visibility::when("providerEnrollmentType", "New Provider"))
                .with_field(
                    Field::checkbox("createEnrollmentComplete", "Created")
                        .required()
                        .tracked(),
                ),
            Page::new("existing-provider-open-cics", "Open CICS"),
            Page::new("existing-provider-completion", "Existing Done"),
            Page::new("additional-providers-check", "More?").with_field(
                Field::radio("additionalProvidersNeeded", "More?", &["Yes", "No"]).required(),
            ),
            Page::new("final", "Final"),
        ]))
    }

    fn session() -> Session {
        Session::new(graph(), branches())
    }

    fn ready_record(enrolled: &str) -> ProviderRecord {
        ProviderRecord::new(
            ProviderStatus::ReadyToEnroll,
            AnswerSet::new().with("providerAlreadyEnrolled", enrolled),
            vec![],
        )
    }

    #[tokio::test]
    async fn test_checkpoint_loops_when_more_providers() {
        let mut s = session();
        s.set_answer("question20Answered", "Yes");
        s.set_answer("providerAlreadyEnrolled", "No");
        s.set_answer("ssnVerified", true);
        s.set_answer("userName", "Pat");

        let mut prompter = ScriptedPrompter::new([true]);
        let t = s.next(&mut prompter).await;

        assert_eq!(t, Transition::Looped { page: 0 });
        assert_eq!(s.position().current, 0);
        assert_eq!(s.ledger().len(), 1);
        let record = s.ledger().get(0).unwrap();
        assert_eq!(record.status, ProviderStatus::ReadyToEnroll);
        assert!(record.is_complete("ssnVerified"));
        assert!(!s.answers().contains("ssnVerified"));
        assert!(!s.answers().contains("question20Answered"));
        assert!(!s.answers().contains("providerAlreadyEnrolled"));
        assert!(s.answers().is_text("userName", "Pat"));
        assert_eq!(prompter.confirms().len(), 1);
    }

    #[tokio::test]
    async fn test_checkpoint_loop_clears_unverifiable_flags() {
        let mut s = session();
        s.toggle_unverifiable("ssnVerified", &mut ScriptedPrompter::new([true]))
            .await;

        let t = s.next(&mut ScriptedPrompter::new([true])).await;
        assert_eq!(t, Transition::Looped { page: 0 });

        let record = s.ledger().get(0).unwrap();
        assert_eq!(record.status, ProviderStatus::RequiresOutreach);
        assert_eq!(record.outreach_notes, vec!["Unable to verify: SSN verified".to_string()]);
        assert!(s.outreach().unverifiable().is_empty());
        assert!(s.outreach_notes().is_empty());
    }

    #[tokio::test]
    async fn test_checkpoint_detours_to_outreach() {
        let mut s = session();
        s.toggle_unverifiable("ssnVerified", &mut ScriptedPrompter::new([true]))
            .await;

        let t = s.next(&mut ScriptedPrompter::declining()).await;
        assert_eq!(t, Transition::Moved { from: 0, to: 1 });
        assert_eq!(s.ledger().len(), 1);
        assert_eq!(s.ledger().get(0).unwrap().status, ProviderStatus::RequiresOutreach);
    }

    #[tokio::test]
    async fn test_checkpoint_falls_through_without_recording() {
        let mut s = session();
        s.set_answer("ssnVerified", true);

        let t = s.next(&mut ScriptedPrompter::declining()).await;
        assert_eq!(t, Transition::Moved { from: 0, to: 3 });
        assert!(s.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_rejection_detour() {
        let mut s = session();
        s.set_answer("ssnVerified", true);
        s.set_answer("providerAlreadyEnrolled", "Yes");
        s.set_answer("providerInGroup", "Yes");

        let mut prompter = ScriptedPrompter::new([false, true]);
        let t = s.next(&mut prompter).await;

        assert_eq!(t, Transition::Moved { from: 0, to: 2 });
        assert_eq!(prompter.confirms().len(), 2);
        assert_eq!(
            s.outreach_notes(),
            &[BranchConfig::default().duplicate_rejection_note]
        );
    }

    #[tokio::test]
    async fn test_duplicate_rejection_declined_advances() {
        let mut s = session();
        s.set_answer("ssnVerified", true);
        s.set_answer("providerAlreadyEnrolled", "Yes");
        s.set_answer("providerInGroup", "Yes");

        let t = s.next(&mut ScriptedPrompter::new([false, false])).await;
        assert_eq!(t, Transition::Moved { from: 0, to: 3 });
        assert!(s.outreach_notes().is_empty());
    }

    #[test]
    fn test_back_skips_detour_pages() {
        let mut s = session();
        s.jump_to("questions-21-23");
        assert_eq!(s.previous(), Transition::Moved { from: 3, to: 0 });
    }

    #[tokio::test]
    async fn test_additional_provider_loop() {
        let mut s = session();
        s.ledger.push(ready_record("No"));
        s.ledger.push(ready_record("Yes"));
        s.ledger.push(ready_record("No"));
        s.position.enrolling = Some(0);
        s.jump_to("additional-providers-check");
        s.set_answer("createEnrollmentComplete", true);
        s.set_answer("additionalProvidersNeeded", "Yes");

        let t = s.next(&mut ScriptedPrompter::declining()).await;

        assert_eq!(t, Transition::Moved { from: 7, to: 4 });
        assert_eq!(s.position().enrolling, Some(2));
        assert_eq!(
            s.ledger().get(0).unwrap().status,
            ProviderStatus::EnrolledReadyForGroup
        );
        assert_eq!(
            s.ledger().get(2).unwrap().get("createEnrollmentComplete"),
            Some(&AnswerValue::Flag(false))
        );
        assert!(!s.answers().contains("createEnrollmentComplete"));
        assert!(!s.answers().contains("additionalProvidersNeeded"));
        assert!(s.answers().is_text("providerEnrollmentType", "New Provider"));
    }

    #[tokio::test]
    async fn test_additional_provider_loop_without_candidate() {
        let mut s = session();
        s.ledger.push(ready_record("Yes"));
        s.jump_to("additional-providers-check");
        s.set_answer("additionalProvidersNeeded", "Yes");
        let before_position = s.position().clone();
        let before_answers = s.answers().clone();

        let t = s.next(&mut ScriptedPrompter::declining()).await;
        assert_eq!(t, Transition::Stayed(StayReason::NoReadyProvider));
        assert_eq!(s.position(), &before_position);
        assert_eq!(s.answers(), &before_answers);
    }

    #[tokio::test]
    async fn test_additional_providers_no_advances_linearly() {
        let mut s = session();
        s.jump_to("additional-providers-check");
        s.set_answer("additionalProvidersNeeded", "No");
        let t = s.next(&mut ScriptedPrompter::declining()).await;
        assert_eq!(t, Transition::Moved { from: 7, to: 8 });
    }

    #[test]
    fn test_tracked_field_syncs_to_enrolling_provider() {
        let mut s = session();
        s.ledger.push(ready_record("No"));
        s.set_answer("createEnrollmentComplete", true);
        assert!(s.ledger().get(0).unwrap().get("createEnrollmentComplete").is_none());

        s.position.enrolling = Some(0);
        s.set_answer("createEnrollmentComplete", true);
        assert!(s.ledger().get(0).unwrap().is_complete("createEnrollmentComplete"));

        s.set_answer("userName", "Pat");
        assert!(s.ledger().get(0).unwrap().get("userName").is_none());
    }

    #[test]
    fn test_resume_enrolling_restores_tracked_values() {
        let mut s = session();
        s.ledger
            .push(ready_record("No").with_answer("createEnrollmentComplete", true));
        s.set_answer("createEnrollmentComplete", false);

        let t = s.resume_enrolling(0);
        assert_eq!(t, Transition::Moved { from: 0, to: 4 });
        assert_eq!(s.position().enrolling, Some(0));
        assert_eq!(
            s.answers().get("createEnrollmentComplete"),
            Some(&AnswerValue::Flag(true))
        );
        assert!(s.answers().is_text("providerEnrollmentType", "New Provider"));
    }

    #[test]
    fn test_resume_unknown_provider_is_noop() {
        let mut s = session();
        assert_eq!(
            s.resume_enrolling(3),
            Transition::Stayed(StayReason::UnknownProvider(3))
        );
        assert_eq!(s.position(), &NavigationPosition::default());
    }

    #[test]
    fn test_resume_with_missing_entry_page_is_noop() {
        let mut s = Session::new(
            Arc::new(PageGraph::new(vec![Page::new("only", "Only")])),
            branches(),
        );
        s.ledger.push(ready_record("No"));
        let t = s.resume_enrolling(0);
        assert_eq!(
            t,
            Transition::Stayed(StayReason::MissingPage("create-enrollment".to_string()))
        );
        assert_eq!(s.position().enrolling, None);
        assert!(s.answers().is_empty());
    }

    #[tokio::test]
    async fn test_group_add_completes_provider() {
        let mut s = session();
        s.ledger.push(
            ready_record("Yes").with_status(ProviderStatus::ReadyToAddToGroup),
        );

        let t = s.resume_adding_to_group(0);
        assert_eq!(t, Transition::Moved { from: 0, to: 5 });
        assert!(s.answers().is_text("providerEnrollmentType", "Existing Provider"));
        assert_eq!(s.position().adding, Some(0));

        s.jump_to("existing-provider-completion");
        let t = s.next(&mut ScriptedPrompter::declining()).await;
        assert_eq!(t, Transition::Moved { from: 6, to: 7 });
        assert_eq!(s.ledger().get(0).unwrap().status, ProviderStatus::Complete);
        assert_eq!(s.position().adding, None);
    }
}
