use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use okenaba_core::config::WizardConfig;
use okenaba_core::theme::{Theme, ThemeStore};
use okenaba_core::{FieldKey, Variant};
use okenaba_ports::FakePorts;
use okenaba_tui::app::Mode;
use okenaba_tui::ui::dump_step;
use okenaba_tui::{App, InputResult};
use okenaba_workflow::ManualClock;
use std::fs;
use tempfile::{tempdir, TempDir};

fn key(code: KeyCode) -> KeyEvent {
    key_with(code, KeyModifiers::NONE)
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn type_text(app: &mut App<ManualClock>, text: &str) {
    for c in text.chars() {
        app.handle_input(key(KeyCode::Char(c)));
    }
}

/// Press a key, then let the frame render so the next transition is allowed.
fn press(app: &mut App<ManualClock>, event: KeyEvent) -> InputResult {
    let result = app.handle_input(event);
    app.on_frame_rendered();
    result
}

fn app_for(variant: Variant) -> (App<ManualClock>, FakePorts, TempDir) {
    let dir = tempdir().unwrap();
    let config = WizardConfig {
        variant,
        theme_path: dir.path().join("theme.json"),
        ..WizardConfig::default()
    };
    let clipboard = FakePorts::new();
    let app = App::new(&config, ManualClock::new())
        .unwrap()
        .with_clipboards(Box::new(clipboard.clone()), Box::new(FakePorts::new()));
    (app, clipboard, dir)
}

#[test]
fn business_flow_reaches_success() {
    let (mut app, clipboard, _dir) = app_for(Variant::Business);

    press(&mut app, key(KeyCode::Enter));
    assert_eq!(app.controller().current_step(), 1);
    assert!(dump_step(&app).contains("⚠ Please enter your business name"));

    type_text(&mut app, "Joe's Bakery");
    app.handle_input(key(KeyCode::Tab));
    type_text(&mut app, "Bakery");
    app.handle_input(key(KeyCode::Tab));
    app.handle_input(key(KeyCode::Right));
    assert_eq!(
        app.ports().input(FieldKey::PrimaryGoal).unwrap().value(),
        "leads"
    );

    press(&mut app, key(KeyCode::Enter));
    assert_eq!(app.controller().current_step(), 2);
    let dump = dump_step(&app);
    assert!(dump.contains("(✓)━━(2)──(3)"));
    assert!(dump.contains("Joe's Bakery"));

    // Enter inside the multi-line description adds a line instead of advancing.
    app.handle_input(key(KeyCode::Tab));
    type_text(&mut app, "Fresh bread");
    press(&mut app, key(KeyCode::Enter));
    type_text(&mut app, "Every day");
    assert_eq!(app.controller().current_step(), 2);
    assert_eq!(
        app.controller().snapshot().get(FieldKey::Description),
        "Fresh bread\nEvery day"
    );

    press(&mut app, key_with(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(app.controller().is_completed());
    assert!(!app.exit_guard().is_armed());

    app.handle_input(key(KeyCode::Char('c')));
    assert_eq!(
        clipboard.clipboard().as_deref(),
        Some("https://presence.app/joe's-bakery")
    );
    assert_eq!(app.handle_input(key(KeyCode::Enter)), InputResult::Complete);
}

#[test]
fn escape_goes_back_and_keeps_values() {
    let (mut app, _, _dir) = app_for(Variant::Business);
    type_text(&mut app, "Joe's Bakery");
    app.handle_input(key(KeyCode::Tab));
    type_text(&mut app, "Bakery");
    app.handle_input(key(KeyCode::Tab));
    app.handle_input(key(KeyCode::Left));
    press(&mut app, key(KeyCode::Enter));
    assert_eq!(app.controller().current_step(), 2);

    type_text(&mut app, "Since 1990");
    press(&mut app, key(KeyCode::Esc));
    assert_eq!(app.controller().current_step(), 1);
    assert_eq!(app.controller().snapshot().get(FieldKey::Tagline), "Since 1990");
    assert_eq!(
        app.ports().input(FieldKey::PrimaryGoal).unwrap().value(),
        "sell_services"
    );
}

#[test]
fn leaving_requires_confirmation() {
    let (mut app, _, _dir) = app_for(Variant::Business);
    let quit = key_with(KeyCode::Char('q'), KeyModifiers::CONTROL);

    assert_eq!(app.handle_input(quit), InputResult::Continue);
    assert!(matches!(app.mode(), Mode::ConfirmExit));
    assert_eq!(app.handle_input(key(KeyCode::Char('n'))), InputResult::Continue);
    assert!(app.exit_guard().is_armed());

    app.handle_input(quit);
    assert_eq!(
        app.handle_input(key(KeyCode::Char('y'))),
        InputResult::Left {
            target: "/".to_string(),
            discarded: true
        }
    );
}

#[test]
fn theme_toggle_is_persisted() {
    let (mut app, _, dir) = app_for(Variant::Business);
    assert_eq!(app.theme(), Theme::Dark);

    app.handle_input(key(KeyCode::F(2)));
    assert_eq!(app.theme(), Theme::Light);
    let stored = ThemeStore::new(dir.path().join("theme.json")).load().unwrap();
    assert_eq!(stored, Some(Theme::Light));
}

#[test]
fn personal_image_via_picker_and_drop() {
    let (mut app, _, dir) = app_for(Variant::Personal);
    press(&mut app, key(KeyCode::Enter));
    type_text(&mut app, "Ada");

    let png = dir.path().join("me.png");
    fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();

    app.handle_input(key_with(KeyCode::Char('o'), KeyModifiers::CONTROL));
    assert!(matches!(app.mode(), Mode::ImagePath(_)));
    app.handle_paste(png.to_str().unwrap());
    app.handle_input(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::Editing));
    assert!(app.controller().snapshot().image().is_some());
    assert!(dump_step(&app).contains("[header image]"));

    let gif = dir.path().join("cat.gif");
    fs::write(&gif, [1, 2, 3]).unwrap();
    app.handle_paste(gif.to_str().unwrap());
    let notice = app.ports_mut().latest_notification().unwrap();
    assert_eq!(notice.message, "Please upload a PNG or JPEG image");
    assert!(app.controller().snapshot().image().is_some());
}

#[test]
fn alt_digit_jumps_under_free_navigation() {
    let (mut app, _, _dir) = app_for(Variant::Personal);
    press(&mut app, key_with(KeyCode::Char('4'), KeyModifiers::ALT));
    assert_eq!(app.controller().current_step(), 4);
    assert_eq!(app.focused_field(), Some(FieldKey::Email));

    let (mut business, _, _dir) = app_for(Variant::Business);
    press(&mut business, key_with(KeyCode::Char('3'), KeyModifiers::ALT));
    assert_eq!(business.controller().current_step(), 1);
}
