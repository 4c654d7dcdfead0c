//! Step controller: the wizard state machine.
//!
//! Owns the schema, the committed snapshot, the current step and the
//! transition guard. Live input is read through [`WizardPorts`]; everything
//! the user sees is pushed back out through the same ports.

use crate::guard::{Clock, TransitionGuard, DEFAULT_ANIMATION_BUDGET};
use anyhow::Result;
use log::{debug, info};
use okenaba_core::config::WizardConfig;
use okenaba_core::preview::render_snapshot;
use okenaba_core::schema::JumpPolicy;
use okenaba_core::share::{site_link, DEFAULT_SITE_BASE_URL};
use okenaba_core::upload::ImageData;
use okenaba_core::validation::{validate_all, validate_step};
use okenaba_core::{FormSnapshot, ValidationFailure, ValidationResult, WizardSchema};
use okenaba_ports::{Direction, StepState, WizardPorts};
use std::time::Duration;

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved {
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// Entered the success state.
    Completed,
    /// Validation failed; the step did not change.
    Blocked(ValidationFailure),
    /// A transition animation is still running.
    Debounced,
    /// Not applicable from the current state.
    Ignored,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

pub struct StepController<P, C> {
    schema: WizardSchema,
    ports: P,
    clock: C,
    guard: TransitionGuard,
    snapshot: FormSnapshot,
    current_step: usize,
    completed: bool,
    site_base_url: String,
}

impl<P, C> StepController<P, C>
where
    P: WizardPorts,
    C: Clock,
{
    pub fn new(schema: WizardSchema, ports: P, clock: C) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            schema,
            ports,
            clock,
            guard: TransitionGuard::new(DEFAULT_ANIMATION_BUDGET),
            snapshot: FormSnapshot::new(),
            current_step: 1,
            completed: false,
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
        })
    }

    pub fn from_config(config: &WizardConfig, ports: P, clock: C) -> Result<Self> {
        let schema = config.schema()?;
        Ok(Self::new(schema, ports, clock)?
            .with_animation_budget(config.animation_budget())
            .with_site_base_url(&config.site_base_url))
    }

    pub fn with_animation_budget(mut self, budget: Duration) -> Self {
        self.guard = TransitionGuard::new(budget);
        self
    }

    pub fn with_site_base_url(mut self, base_url: &str) -> Self {
        self.site_base_url = base_url.to_string();
        self
    }

    /// First paint: step 1, indicator, preview placeholder.
    pub fn start(&mut self) {
        info!(
            "🧭 Starting {} wizard ({} steps)",
            self.schema.name,
            self.schema.total_steps()
        );
        self.render_step(Direction::Forward);
    }

    pub fn advance(&mut self) -> Transition {
        if self.completed {
            return Transition::Ignored;
        }
        if self.is_transitioning() {
            debug!("advance ignored: transition in progress");
            return Transition::Debounced;
        }

        self.ports.clear_all_field_errors();
        if let ValidationResult::Invalid(failure) =
            validate_step(&self.schema, self.current_step, &self.ports)
        {
            return self.block(failure);
        }

        self.commit_live();
        if self.current_step < self.schema.total_steps() {
            self.move_to(self.current_step + 1)
        } else {
            // Earlier steps may have been skipped by a jump or cleared since.
            self.finish_if_complete()
        }
    }

    /// Step back without validating; live values are kept.
    pub fn retreat(&mut self) -> Transition {
        if self.completed {
            return Transition::Ignored;
        }
        if self.is_transitioning() {
            debug!("retreat ignored: transition in progress");
            return Transition::Debounced;
        }
        if self.current_step == 1 {
            return Transition::Ignored;
        }

        self.commit_live();
        self.move_to(self.current_step - 1)
    }

    pub fn jump_to(&mut self, step: usize) -> Transition {
        if self.completed {
            return Transition::Ignored;
        }
        if self.is_transitioning() {
            debug!("jump to {} ignored: transition in progress", step);
            return Transition::Debounced;
        }
        if !self.can_jump_to(step) {
            return Transition::Ignored;
        }

        self.commit_live();
        self.move_to(step)
    }

    /// Whether the indicator would accept a jump to `step` right now.
    pub fn can_jump_to(&self, step: usize) -> bool {
        if step == 0 || step > self.schema.total_steps() || step == self.current_step {
            return false;
        }
        match self.schema.jump_policy {
            JumpPolicy::CompletedOnly => step < self.current_step,
            JumpPolicy::Any => true,
        }
    }

    /// Final submission: every gating step must pass.
    ///
    /// On failure the wizard moves to the offending step regardless of the
    /// guard or the jump policy, so the user can fix it.
    pub fn submit(&mut self) -> Transition {
        if self.completed {
            return Transition::Ignored;
        }

        self.ports.clear_all_field_errors();
        self.commit_live();
        self.finish_if_complete()
    }

    /// Commit live values and refresh the preview.
    pub fn save(&mut self) {
        self.commit_live();
        self.render_preview();
    }

    pub fn reset(&mut self) {
        info!("🔄 Resetting wizard");
        self.snapshot.clear();
        for key in self.schema.keys() {
            self.ports.set_field_value(key, "");
        }
        self.ports.clear_all_field_errors();
        self.current_step = 1;
        self.completed = false;
        self.guard.release();
        self.render_step(Direction::Backward);
    }

    /// The animation-completion event.
    pub fn complete_animation(&mut self) {
        self.guard.complete();
    }

    pub fn refresh(&mut self) {
        if self.completed {
            self.render_success();
        } else {
            self.render_step(Direction::Forward);
        }
    }

    /// Store an accepted header image and re-render.
    pub fn set_image(&mut self, image: ImageData) {
        self.snapshot.set_image(image);
        self.render_preview();
    }

    pub fn render_preview(&mut self) {
        let fragment = render_snapshot(&self.schema, &self.snapshot);
        self.ports.replace_preview(&fragment);
    }

    pub fn is_transitioning(&self) -> bool {
        self.guard.is_active(self.clock.now())
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.schema.total_steps()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut P {
        &mut self.ports
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Public link for the committed site name.
    pub fn site_link(&self) -> String {
        let name = self
            .schema
            .preview
            .name
            .map(|key| self.snapshot.get(key))
            .unwrap_or("");
        site_link(&self.site_base_url, name)
    }

    fn block(&mut self, failure: ValidationFailure) -> Transition {
        info!(
            "Step {} blocked on {}: {}",
            self.current_step, failure.field, failure.message
        );
        self.ports.set_field_error(failure.field, &failure.message);
        self.ports.focus_field(failure.field);
        Transition::Blocked(failure)
    }

    fn commit_live(&mut self) {
        let keys = self.schema.keys();
        self.snapshot.commit_from(&keys, &self.ports);
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.current_step;
        let direction = Direction::between(from, to);
        self.current_step = to;
        self.guard.arm(self.clock.now());
        debug!("Step {} -> {} ({:?})", from, to, direction);
        self.render_step(direction);
        Transition::Moved {
            from,
            to,
            direction,
        }
    }

    /// Enter Success only when every gating step passes; otherwise show the
    /// first failing step with its error.
    fn finish_if_complete(&mut self) -> Transition {
        if let Some((step, failure)) = validate_all(&self.schema, &self.ports) {
            if step != self.current_step {
                self.guard.release();
                self.move_to(step);
            }
            return self.block(failure);
        }
        self.finish()
    }

    fn finish(&mut self) -> Transition {
        self.completed = true;
        self.guard.arm(self.clock.now());
        info!("✅ {} wizard completed", self.schema.name);
        self.render_success();
        Transition::Completed
    }

    fn render_step(&mut self, direction: Direction) {
        self.ports.show_step(self.current_step, direction);
        self.sync_indicator();
        self.render_preview();
        self.ports.scroll_to_top();
    }

    fn render_success(&mut self) {
        let link = self.site_link();
        self.ports.show_success(&link);
        self.sync_indicator();
        self.render_preview();
        self.ports.scroll_to_top();
    }

    fn sync_indicator(&mut self) {
        let total = self.schema.total_steps();
        // Past the last step everything reads as completed.
        let current = if self.completed {
            total + 1
        } else {
            self.current_step
        };

        for step in 1..=total {
            let state = if step < current {
                StepState::Completed
            } else if step == current {
                StepState::Active
            } else {
                StepState::Pending
            };
            self.ports.set_step_state(step, state);
        }
        for index in 1..total {
            self.ports.set_connector_state(index, index < current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::ManualClock;
    use okenaba_core::{FieldKey, FieldValues, Variant};
    use okenaba_ports::{FakePorts, PortEvent};

    fn business() -> (StepController<FakePorts, ManualClock>, FakePorts, ManualClock) {
        let ports = FakePorts::new();
        let clock = ManualClock::new();
        let mut ctl = StepController::new(
            Variant::Business.schema().unwrap(),
            ports.clone(),
            clock.clone(),
        )
        .unwrap();
        ctl.start();
        (ctl, ports, clock)
    }

    fn fill_business_step_one(ports: &FakePorts) {
        ports.type_value(FieldKey::BusinessName, "Joe's Bakery");
        ports.type_value(FieldKey::Industry, "Food");
        ports.type_value(FieldKey::PrimaryGoal, "attract_clients");
    }

    #[test]
    fn start_renders_first_step() {
        let (ctl, ports, _) = business();
        assert_eq!(ctl.current_step(), 1);
        assert_eq!(ports.step_state(1), Some(StepState::Active));
        assert_eq!(ports.step_state(2), Some(StepState::Pending));
        assert_eq!(ports.connector(1), Some(false));
        assert!(ports.preview().contains("preview-placeholder"));
        assert!(!ctl.is_transitioning());
    }

    #[test]
    fn blocked_advance_sets_error_and_focus() {
        let (mut ctl, ports, _) = business();
        let outcome = ctl.advance();

        match outcome {
            Transition::Blocked(failure) => assert_eq!(failure.field, FieldKey::BusinessName),
            other => panic!("expected Blocked, got {:?}", other),
        }
        assert_eq!(ctl.current_step(), 1);
        assert_eq!(
            ports.error_for(FieldKey::BusinessName).as_deref(),
            Some("Please enter your business name")
        );
        assert_eq!(ports.focused(), Some(FieldKey::BusinessName));
        assert!(!ctl.is_transitioning());
    }

    #[test]
    fn valid_advance_commits_and_moves() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);

        let outcome = ctl.advance();
        assert_eq!(
            outcome,
            Transition::Moved {
                from: 1,
                to: 2,
                direction: Direction::Forward
            }
        );
        assert_eq!(ctl.snapshot().get(FieldKey::BusinessName), "Joe's Bakery");
        assert_eq!(ports.step_state(1), Some(StepState::Completed));
        assert_eq!(ports.step_state(2), Some(StepState::Active));
        assert_eq!(ports.connector(1), Some(true));
        assert!(ports.preview().contains("Joe&#039;s Bakery"));
        assert!(ctl.is_transitioning());
    }

    #[test]
    fn errors_are_cleared_before_revalidating() {
        let (mut ctl, ports, _) = business();
        ctl.advance();
        fill_business_step_one(&ports);
        ctl.advance();
        assert!(ports.errors().is_empty());
    }

    #[test]
    fn advance_during_transition_is_debounced() {
        let (mut ctl, ports, clock) = business();
        fill_business_step_one(&ports);
        ctl.advance();

        assert_eq!(ctl.advance(), Transition::Debounced);
        assert_eq!(ctl.retreat(), Transition::Debounced);
        assert_eq!(ctl.current_step(), 2);

        clock.advance(Duration::from_millis(400));
        assert!(ctl.advance().moved());
        assert_eq!(ctl.current_step(), 3);
    }

    #[test]
    fn completion_event_unblocks_before_budget() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();
        ctl.complete_animation();
        assert!(ctl.retreat().moved());
        assert_eq!(ctl.current_step(), 1);
    }

    #[test]
    fn retreat_keeps_live_values() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();
        ctl.complete_animation();

        ports.type_value(FieldKey::Tagline, "Fresh bread daily");
        assert!(ctl.retreat().moved());
        assert_eq!(ctl.snapshot().get(FieldKey::Tagline), "Fresh bread daily");
    }

    #[test]
    fn retreat_from_first_step_is_ignored() {
        let (mut ctl, ports, _) = business();
        ports.clear_events();
        assert_eq!(ctl.retreat(), Transition::Ignored);
        assert!(ports.events().is_empty());
    }

    #[test]
    fn completed_only_policy_allows_backward_jumps() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();
        ctl.complete_animation();
        ctl.advance();
        ctl.complete_animation();
        assert_eq!(ctl.current_step(), 3);

        assert!(ctl.can_jump_to(1));
        assert_eq!(
            ctl.jump_to(1),
            Transition::Moved {
                from: 3,
                to: 1,
                direction: Direction::Backward
            }
        );
        ctl.complete_animation();
        assert_eq!(ctl.jump_to(3), Transition::Ignored);
        assert_eq!(ctl.jump_to(1), Transition::Ignored);
        assert_eq!(ctl.jump_to(0), Transition::Ignored);
        assert_eq!(ctl.jump_to(9), Transition::Ignored);
    }

    #[test]
    fn submit_on_last_step_enters_success() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();
        ctl.complete_animation();
        ctl.advance();
        ctl.complete_animation();

        assert_eq!(ctl.advance(), Transition::Completed);
        assert!(ctl.is_completed());
        assert!(ports.has_event(|e| matches!(
            e,
            PortEvent::Success { site_link } if site_link == "https://presence.app/joe's-bakery"
        )));
        for step in 1..=3 {
            assert_eq!(ports.step_state(step), Some(StepState::Completed));
        }
        assert_eq!(ports.connector(2), Some(true));

        ctl.complete_animation();
        assert_eq!(ctl.advance(), Transition::Ignored);
        assert_eq!(ctl.retreat(), Transition::Ignored);
        assert_eq!(ctl.jump_to(1), Transition::Ignored);
    }

    #[test]
    fn submit_jumps_back_to_first_failing_step() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();
        ctl.complete_animation();
        ctl.advance();
        assert!(ctl.is_transitioning());

        ports.type_value(FieldKey::Industry, "  ");
        match ctl.submit() {
            Transition::Blocked(failure) => {
                assert_eq!(failure.field, FieldKey::Industry);
                assert_eq!(failure.message, "Industry is required");
            }
            other => panic!("expected Blocked, got {:?}", other),
        }
        assert_eq!(ctl.current_step(), 1);
        assert_eq!(ports.focused(), Some(FieldKey::Industry));
        assert!(!ctl.is_completed());
    }

    #[test]
    fn reset_clears_everything() {
        let (mut ctl, ports, _) = business();
        fill_business_step_one(&ports);
        ctl.advance();

        ctl.reset();
        assert_eq!(ctl.current_step(), 1);
        assert!(!ctl.is_transitioning());
        assert_eq!(ctl.snapshot().get(FieldKey::BusinessName), "");
        assert_eq!(ports.field_value(FieldKey::BusinessName), "");
        assert_eq!(ports.step_state(1), Some(StepState::Active));
        assert!(ports.preview().contains("preview-placeholder"));
    }

    #[test]
    fn refresh_is_idempotent() {
        let (mut ctl, ports, _) = business();
        ctl.refresh();
        let first = ports.preview();
        let count = ports.preview_count();
        ctl.refresh();
        assert_eq!(ports.preview(), first);
        assert_eq!(ports.preview_count(), count + 1);
        assert_eq!(ctl.current_step(), 1);
    }
}
