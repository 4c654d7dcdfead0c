use okenaba_core::{FieldKey, Variant};
use okenaba_ports::{Direction, FakePorts, PortEvent, StepState};
use okenaba_workflow::{handle_key, Focus, ManualClock, StepController, Transition, WizardKey};
use std::time::Duration;

fn controller(variant: Variant) -> (StepController<FakePorts, ManualClock>, FakePorts, ManualClock) {
    let ports = FakePorts::new();
    let clock = ManualClock::new();
    let mut ctl =
        StepController::new(variant.schema().unwrap(), ports.clone(), clock.clone()).unwrap();
    ctl.start();
    (ctl, ports, clock)
}

fn settle(clock: &ManualClock) {
    clock.advance(Duration::from_millis(400));
}

#[test]
fn business_walkthrough_with_bakery() {
    let (mut ctl, ports, clock) = controller(Variant::Business);

    assert!(matches!(ctl.advance(), Transition::Blocked(_)));
    assert_eq!(ctl.current_step(), 1);
    assert!(ports.error_for(FieldKey::BusinessName).is_some());

    ports.type_value(FieldKey::BusinessName, "Joe's Bakery");
    ports.type_value(FieldKey::Industry, "Bakery");
    ports.type_value(FieldKey::PrimaryGoal, "leads");
    assert!(ctl.advance().moved());
    assert_eq!(ctl.current_step(), 2);
    assert_eq!(ports.step_state(1), Some(StepState::Completed));
    assert!(ports.error_for(FieldKey::BusinessName).is_none());

    settle(&clock);
    ports.type_value(FieldKey::Description, "<b>Sourdough</b> & more");
    assert!(ctl.advance().moved());
    assert!(ports
        .preview()
        .contains("&lt;b&gt;Sourdough&lt;/b&gt; &amp; more"));

    settle(&clock);
    assert_eq!(ctl.submit(), Transition::Completed);
    assert!(ports.has_event(|e| matches!(e, PortEvent::Success { .. })));
}

#[test]
fn unknown_goal_option_blocks() {
    let (mut ctl, ports, _) = controller(Variant::Business);
    ports.type_value(FieldKey::BusinessName, "Joe's Bakery");
    ports.type_value(FieldKey::Industry, "Bakery");
    ports.type_value(FieldKey::PrimaryGoal, "world_domination");

    match ctl.advance() {
        Transition::Blocked(failure) => assert_eq!(failure.field, FieldKey::PrimaryGoal),
        other => panic!("expected Blocked, got {:?}", other),
    }
}

#[test]
fn forward_jump_depends_on_policy() {
    let (mut business, _, _) = controller(Variant::Business);
    assert_eq!(business.jump_to(3), Transition::Ignored);
    assert_eq!(business.current_step(), 1);

    let (mut personal, ports, _) = controller(Variant::Personal);
    assert_eq!(
        personal.jump_to(3),
        Transition::Moved {
            from: 1,
            to: 3,
            direction: Direction::Forward
        }
    );
    assert_eq!(ports.step_state(1), Some(StepState::Completed));
    assert_eq!(ports.step_state(2), Some(StepState::Completed));
    assert_eq!(ports.step_state(3), Some(StepState::Active));
    assert_eq!(ports.step_state(4), Some(StepState::Pending));
    assert_eq!(ports.connector(2), Some(true));
    assert_eq!(ports.connector(3), Some(false));
}

#[test]
fn personal_submit_returns_to_name_step() {
    let (mut ctl, ports, clock) = controller(Variant::Personal);
    ctl.jump_to(4);
    settle(&clock);
    ports.type_value(FieldKey::Email, "ada@example.com");

    match ctl.submit() {
        Transition::Blocked(failure) => {
            assert_eq!(failure.field, FieldKey::SiteName);
            assert_eq!(failure.message, "Please enter your name or business name");
        }
        other => panic!("expected Blocked, got {:?}", other),
    }
    assert_eq!(ctl.current_step(), 2);
    assert_eq!(ports.focused(), Some(FieldKey::SiteName));
}

#[test]
fn advancing_off_last_step_rechecks_skipped_steps() {
    let (mut ctl, ports, clock) = controller(Variant::Personal);
    ctl.jump_to(4);
    settle(&clock);
    ports.type_value(FieldKey::Email, "ada@example.com");

    match ctl.advance() {
        Transition::Blocked(failure) => assert_eq!(failure.field, FieldKey::SiteName),
        other => panic!("expected Blocked, got {:?}", other),
    }
    assert!(!ctl.is_completed());
    assert_eq!(ctl.current_step(), 2);
    assert_eq!(ports.focused(), Some(FieldKey::SiteName));
    assert_eq!(
        ports.error_for(FieldKey::SiteName).as_deref(),
        Some("Please enter your name or business name")
    );
    assert!(!ports.has_event(|e| matches!(e, PortEvent::Success { .. })));
    assert_eq!(ctl.snapshot().get(FieldKey::Email), "ada@example.com");
}

#[test]
fn personal_email_is_checked_on_last_step() {
    let (mut ctl, ports, clock) = controller(Variant::Personal);
    ports.type_value(FieldKey::SiteName, "Ada Lovelace");
    ctl.jump_to(4);
    settle(&clock);

    ports.type_value(FieldKey::Email, "not-an-email");
    assert!(matches!(ctl.advance(), Transition::Blocked(_)));
    assert_eq!(
        ports.error_for(FieldKey::Email).as_deref(),
        Some("Please enter a valid email address")
    );

    ports.type_value(FieldKey::Email, "ada@example.com");
    assert_eq!(ctl.advance(), Transition::Completed);
    assert_eq!(ctl.site_link(), "https://presence.app/ada-lovelace");
}

#[test]
fn rapid_presses_move_only_once() {
    let (mut ctl, _, clock) = controller(Variant::Personal);
    assert!(ctl.advance().moved());
    assert_eq!(ctl.advance(), Transition::Debounced);
    assert_eq!(ctl.jump_to(4), Transition::Debounced);
    assert_eq!(ctl.current_step(), 2);

    clock.advance(Duration::from_millis(399));
    assert_eq!(ctl.retreat(), Transition::Debounced);
    clock.advance(Duration::from_millis(1));
    assert!(ctl.retreat().moved());
    assert_eq!(ctl.current_step(), 1);
}

#[test]
fn enter_and_indicator_keys_drive_the_controller() {
    let (mut ctl, ports, clock) = controller(Variant::Personal);

    assert!(handle_key(&mut ctl, Focus::TextInput, WizardKey::Enter).moved());
    settle(&clock);
    assert_eq!(
        handle_key(&mut ctl, Focus::TextArea, WizardKey::Enter),
        Transition::Ignored
    );

    ports.type_value(FieldKey::SiteName, "Ada");
    assert!(handle_key(&mut ctl, Focus::TextInput, WizardKey::Enter).moved());
    settle(&clock);
    assert_eq!(ctl.current_step(), 3);

    assert_eq!(
        handle_key(&mut ctl, Focus::IndicatorCircle(1), WizardKey::Space),
        Transition::Moved {
            from: 3,
            to: 1,
            direction: Direction::Backward
        }
    );
}

#[test]
fn values_survive_back_and_forth() {
    let (mut ctl, ports, clock) = controller(Variant::Personal);
    ctl.advance();
    settle(&clock);
    ports.type_value(FieldKey::SiteName, "Ada");
    ports.type_value(FieldKey::Bio, "Mathematician");
    ctl.retreat();
    settle(&clock);

    assert_eq!(ctl.snapshot().get(FieldKey::Bio), "Mathematician");
    assert!(ports.preview().contains("preview-bio\">Mathematician"));
    ctl.advance();
    assert_eq!(ctl.snapshot().get(FieldKey::SiteName), "Ada");
}
