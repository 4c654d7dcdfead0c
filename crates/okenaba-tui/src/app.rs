//! Terminal wizard state and key handling.

use crate::clipboard::{FileClipboard, Osc52Clipboard};
use crate::input::TextInput;
use crate::ports::TuiPorts;
use crate::widgets::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use okenaba_core::config::WizardConfig;
use okenaba_core::schema::{FieldRule, FieldSpec};
use okenaba_core::theme::{resolve_theme, Theme, ThemeStore};
use okenaba_core::upload::{FileUpload, UploadSource};
use okenaba_core::FieldKey;
use okenaba_ports::{Clipboard, FieldSource, Navigator, NoticeKind, Notifier};
use okenaba_workflow::{
    copy_text, handle_key, Clock, ExitGuard, Focus, LeaveOutcome, StepController, Transition,
    UploadFlow, WizardKey,
};
use std::io;
use std::path::Path;

/// Result of handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// The user finished and dismissed the success screen.
    Complete,
    /// The user left onboarding for `target`.
    Left { target: String, discarded: bool },
    Quit,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Editing,
    /// Typing the path of a header image.
    ImagePath(TextInput),
    ConfirmExit,
}

/// Answers the exit prompt with the key the user already pressed.
struct KeyedNavigator {
    answer: bool,
    discarded: bool,
    target: Option<String>,
}

impl KeyedNavigator {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            discarded: false,
            target: None,
        }
    }
}

impl Navigator for KeyedNavigator {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.answer
    }

    fn discard_and_redirect(&mut self, delete_url: &str, target: &str) {
        info!("Discarding draft via {}", delete_url);
        self.discarded = true;
        self.target = Some(target.to_string());
    }

    fn redirect(&mut self, target: &str) {
        self.target = Some(target.to_string());
    }
}

pub struct App<C> {
    controller: StepController<TuiPorts<C>, C>,
    exit_guard: ExitGuard,
    draft_delete_url: String,
    theme: Theme,
    prefers_dark: bool,
    theme_store: ThemeStore,
    mode: Mode,
    primary_clipboard: Box<dyn Clipboard>,
    fallback_clipboard: Box<dyn Clipboard>,
}

impl<C: Clock + Clone> App<C> {
    pub fn new(config: &WizardConfig, clock: C) -> Result<Self> {
        let schema = config.schema()?;
        let ports = TuiPorts::new(&schema, clock.clone(), config.notification_lifetime());
        let mut controller = StepController::new(schema, ports, clock)?
            .with_animation_budget(config.animation_budget())
            .with_site_base_url(&config.site_base_url);
        controller.start();

        // Terminals are dark unless told otherwise.
        let prefers_dark = true;
        let theme_store = ThemeStore::new(&config.theme_path);
        let stored = theme_store.load().unwrap_or_else(|err| {
            warn!("Ignoring unreadable theme preference: {:#}", err);
            None
        });

        Ok(Self {
            controller,
            exit_guard: ExitGuard::new(config.draft_delete_url.clone()),
            draft_delete_url: config.draft_delete_url.clone(),
            theme: resolve_theme(stored, prefers_dark),
            prefers_dark,
            theme_store,
            mode: Mode::Editing,
            primary_clipboard: Box::new(Osc52Clipboard::new(io::stdout())),
            fallback_clipboard: Box::new(FileClipboard::new(
                config.theme_path.with_file_name("site-link.txt"),
            )),
        })
    }

    pub fn with_clipboards(
        mut self,
        primary: Box<dyn Clipboard>,
        fallback: Box<dyn Clipboard>,
    ) -> Self {
        self.primary_clipboard = primary;
        self.fallback_clipboard = fallback;
        self
    }

    pub fn controller(&self) -> &StepController<TuiPorts<C>, C> {
        &self.controller
    }

    pub fn ports(&self) -> &TuiPorts<C> {
        self.controller.ports()
    }

    pub fn ports_mut(&mut self) -> &mut TuiPorts<C> {
        self.controller.ports_mut()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn exit_guard(&self) -> &ExitGuard {
        &self.exit_guard
    }

    /// A frame with the new step is on screen; the transition is over.
    pub fn on_frame_rendered(&mut self) {
        self.controller.complete_animation();
    }

    /// Fields of the step being edited.
    pub fn step_fields(&self) -> Vec<FieldSpec> {
        self.controller
            .schema()
            .step(self.controller.current_step())
            .map(|step| step.fields.clone())
            .unwrap_or_default()
    }

    /// Focused field, defaulting to the first on the step.
    pub fn focused_field(&self) -> Option<FieldKey> {
        let fields = self.step_fields();
        self.ports()
            .focused()
            .filter(|key| fields.iter().any(|spec| spec.key == *key))
            .or_else(|| fields.first().map(|spec| spec.key))
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> InputResult {
        if key.kind != KeyEventKind::Press {
            return InputResult::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match self.mode {
            Mode::ConfirmExit => return self.handle_confirm_exit_input(key),
            Mode::ImagePath(_) => return self.handle_image_path_input(key),
            Mode::Editing => {}
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => return self.request_exit(),
            KeyCode::F(2) => {
                self.toggle_theme();
                return InputResult::Continue;
            }
            _ => {}
        }

        if self.controller.is_completed() {
            self.handle_success_input(key)
        } else {
            self.handle_step_input(key)
        }
    }

    /// Bracketed paste. A dropped image file arrives this way.
    pub fn handle_paste(&mut self, text: &str) -> InputResult {
        if let Mode::ImagePath(input) = &mut self.mode {
            input.insert(text);
            return InputResult::Continue;
        }
        if self.controller.is_completed() {
            return InputResult::Continue;
        }

        let candidate = text.trim().trim_matches(|c| c == '\'' || c == '"');
        if self.controller.schema().preview.show_image && looks_like_image(candidate) {
            self.upload_from_path(candidate, UploadSource::DragDrop);
            return InputResult::Continue;
        }

        if let Some(key) = self.focused_field() {
            if let Some(input) = self.ports_mut().input_mut(key) {
                input.insert(text);
            }
            self.controller.save();
        }
        InputResult::Continue
    }

    fn handle_step_input(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('s') if ctrl => {
                if self.controller.submit() == Transition::Completed {
                    self.exit_guard.on_submit();
                }
            }
            KeyCode::Char('o') if ctrl => {
                if self.controller.schema().preview.show_image {
                    self.mode = Mode::ImagePath(TextInput::new(false));
                } else {
                    self.ports_mut()
                        .notify("This site has no header image", NoticeKind::Info);
                }
            }
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char(c) if alt && c.is_ascii_digit() => {
                let step = c.to_digit(10).unwrap_or(0) as usize;
                self.controller.jump_to(step);
            }
            KeyCode::Esc | KeyCode::PageUp => {
                self.controller.retreat();
            }
            KeyCode::PageDown => {
                self.controller.advance();
            }
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Up => self.ports_mut().scroll_by(-1),
            KeyCode::Down => self.ports_mut().scroll_by(1),
            KeyCode::Enter => self.press_enter(),
            KeyCode::Left | KeyCode::Right if self.focused_options().is_some() => {
                let step = if key.code == KeyCode::Left { -1 } else { 1 };
                self.cycle_option(step);
            }
            _ => {
                if let Some(field) = self.focused_field() {
                    let edited = self
                        .ports_mut()
                        .input_mut(field)
                        .map(|input| input.handle_key(key))
                        .unwrap_or(false);
                    if edited {
                        self.controller.save();
                    }
                }
            }
        }
        InputResult::Continue
    }

    fn handle_success_input(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('y') => {
                self.copy_site_link();
                InputResult::Continue
            }
            KeyCode::Char('r') => {
                self.reset();
                InputResult::Continue
            }
            KeyCode::Enter | KeyCode::Char('q') => InputResult::Complete,
            _ => InputResult::Continue,
        }
    }

    fn handle_confirm_exit_input(&mut self, key: KeyEvent) -> InputResult {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return InputResult::Continue,
        };
        self.mode = Mode::Editing;

        let mut nav = KeyedNavigator::answering(answer);
        match self.exit_guard.exit(&mut nav) {
            LeaveOutcome::Stayed => InputResult::Continue,
            LeaveOutcome::Discarded | LeaveOutcome::Navigated => InputResult::Left {
                target: nav.target.unwrap_or_else(|| "/".to_string()),
                discarded: nav.discarded,
            },
        }
    }

    fn handle_image_path_input(&mut self, key: KeyEvent) -> InputResult {
        let Mode::ImagePath(input) = &mut self.mode else {
            return InputResult::Continue;
        };
        match key.code {
            KeyCode::Esc => self.mode = Mode::Editing,
            KeyCode::Enter => {
                let path = input.value().trim().to_string();
                self.mode = Mode::Editing;
                self.upload_from_path(&path, UploadSource::Picker);
            }
            _ => {
                input.handle_key(key);
            }
        }
        InputResult::Continue
    }

    fn request_exit(&mut self) -> InputResult {
        if self.exit_guard.blocks_unload() && !self.controller.is_completed() {
            self.mode = Mode::ConfirmExit;
            InputResult::Continue
        } else {
            InputResult::Quit
        }
    }

    fn press_enter(&mut self) {
        let focused = self.focused_field();
        let multiline = focused
            .and_then(|key| self.ports().input(key))
            .map(TextInput::is_multiline)
            .unwrap_or(false);
        let focus = match focused {
            Some(_) if multiline => Focus::TextArea,
            Some(_) => Focus::TextInput,
            None => Focus::Other,
        };

        let outcome = handle_key(&mut self.controller, focus, WizardKey::Enter);
        if outcome == Transition::Ignored && multiline {
            if let Some(key) = focused {
                if let Some(input) = self.ports_mut().input_mut(key) {
                    input.newline();
                }
                self.controller.save();
            }
        }
    }

    fn cycle_focus(&mut self, delta: isize) {
        let fields = self.step_fields();
        if fields.is_empty() {
            return;
        }
        let current = self
            .focused_field()
            .and_then(|key| fields.iter().position(|spec| spec.key == key))
            .unwrap_or(0);
        let len = fields.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;

        // Leaving a field commits it.
        self.controller.save();
        self.ports_mut().focus_field(fields[next].key);
    }

    fn focused_options(&self) -> Option<Vec<String>> {
        let key = self.focused_field()?;
        match &self.controller.schema().field(key)?.rule {
            FieldRule::OneOf { options } => Some(options.clone()),
            _ => None,
        }
    }

    fn cycle_option(&mut self, delta: isize) {
        let (Some(key), Some(options)) = (self.focused_field(), self.focused_options()) else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = self
            .ports()
            .input(key)
            .and_then(|input| options.iter().position(|opt| opt == input.value()));
        let len = options.len() as isize;
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(len) as usize,
            None if delta < 0 => options.len() - 1,
            None => 0,
        };
        self.ports_mut().set_field_value(key, &options[next]);
        self.controller.save();
    }

    fn upload_from_path(&mut self, path: &str, source: UploadSource) {
        if path.is_empty() {
            UploadFlow::new(&mut self.controller).receive(source, None);
            return;
        }
        match FileUpload::from_path(Path::new(path)) {
            Ok(file) => {
                UploadFlow::new(&mut self.controller).receive(source, Some(&file));
            }
            Err(err) => {
                warn!("{:#}", err);
                self.ports_mut()
                    .notify(&format!("Could not read {}", path), NoticeKind::Error);
            }
        }
    }

    fn copy_site_link(&mut self) {
        let link = self.controller.site_link();
        copy_text(
            self.primary_clipboard.as_mut(),
            self.fallback_clipboard.as_mut(),
            self.controller.ports_mut(),
            &link,
        );
    }

    fn reset(&mut self) {
        self.controller.reset();
        self.exit_guard = ExitGuard::new(self.draft_delete_url.clone());
        self.mode = Mode::Editing;
    }

    fn toggle_theme(&mut self) {
        self.theme = match self.theme_store.toggle(self.prefers_dark) {
            Ok(theme) => theme,
            Err(err) => {
                warn!("Theme not saved: {:#}", err);
                self.ports_mut()
                    .notify("Theme preference could not be saved", NoticeKind::Error);
                self.theme.toggled()
            }
        };
    }
}

fn looks_like_image(candidate: &str) -> bool {
    let path = Path::new(candidate);
    let has_image_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "webp"
            )
        })
        .unwrap_or(false);
    has_image_ext && path.is_file()
}
