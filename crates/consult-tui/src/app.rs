use std::time::Instant;

use consult_config::ContactConfig;
use consult_core::{
    AutomationNeed, Dispatcher, EmailDraft, Field, FormController, FormSettings, FormState,
    SubmitOutcome,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::toast::ToastNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Send,
    Clear,
}

const FOCUS_ORDER: [Focus; 10] = [
    Focus::Field(Field::FirstName),
    Focus::Field(Field::LastName),
    Focus::Field(Field::Email),
    Focus::Field(Field::Phone),
    Focus::Field(Field::Company),
    Focus::Field(Field::AutomationNeeds),
    Focus::Field(Field::Message),
    Focus::Field(Field::Consent),
    Focus::Send,
    Focus::Clear,
];

pub struct App<D: Dispatcher> {
    pub controller: FormController<D, ToastNotifier>,
    pub contact: ContactConfig,
    pub show_help: bool,
    pub should_quit: bool,
    pub last_draft: Option<EmailDraft>,
    focus: usize,
}

impl<D: Dispatcher> App<D> {
    pub fn new(settings: FormSettings, contact: ContactConfig, dispatcher: D) -> Self {
        Self {
            controller: FormController::new(settings, dispatcher, ToastNotifier::default()),
            contact,
            show_help: false,
            should_quit: false,
            last_draft: None,
            focus: 0,
        }
    }

    pub fn focus(&self) -> Focus {
        FOCUS_ORDER[self.focus]
    }

    pub fn is_focused(&self, field: Field) -> bool {
        self.focus() == Focus::Field(field)
    }

    /// Advances timers: the form auto-reset and toast expiry.
    pub fn tick(&mut self, now: Instant) {
        if self.controller.tick(now) {
            self.last_draft = None;
            self.focus = 0;
        }
        self.controller.notifier().expire(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) || key.code == KeyCode::Esc
        {
            if self.show_help && key.code == KeyCode::Esc {
                self.show_help = false;
            } else {
                self.should_quit = true;
            }
            return;
        }

        if key.code == KeyCode::F(1) {
            self.show_help = !self.show_help;
            return;
        }

        if self.show_help || self.controller.state() != FormState::Editing {
            return;
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit();
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => match self.focus() {
                Focus::Field(Field::AutomationNeeds) => self.handle_needs_key(key),
                Focus::Field(Field::Consent) => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                        let consent = !self.controller.form().consent;
                        self.controller.set_consent(consent);
                    }
                }
                Focus::Field(Field::Message) if key.code == KeyCode::Enter => {
                    self.controller.edit(|form| form.message.push('\n'));
                }
                Focus::Field(field) => {
                    if key.code == KeyCode::Enter {
                        self.focus_next();
                    } else {
                        self.controller.edit(|form| {
                            if let Some(target) = form.text_mut(field) {
                                apply_text_input(target, key);
                            }
                        });
                    }
                }
                Focus::Send => {
                    if key.code == KeyCode::Enter {
                        self.submit();
                    }
                }
                Focus::Clear => {
                    if key.code == KeyCode::Enter {
                        self.controller.clear();
                        self.focus = 0;
                    }
                }
            },
        }
    }

    fn handle_needs_key(&mut self, key: KeyEvent) {
        let delta = match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => 1,
            KeyCode::Left | KeyCode::Char('h') => -1,
            KeyCode::Enter => {
                self.focus_next();
                return;
            }
            KeyCode::Backspace => {
                self.controller.set_text(Field::AutomationNeeds, "");
                return;
            }
            _ => return,
        };
        let next = cycle_need(&self.controller.form().automation_needs, delta);
        self.controller.set_text(Field::AutomationNeeds, next.code());
    }

    fn submit(&mut self) {
        match self.controller.submit(Instant::now()) {
            SubmitOutcome::Dispatched(draft) => {
                self.last_draft = Some(draft);
                self.focus = 0;
            }
            SubmitOutcome::Invalid => {
                let first_error = self.controller.errors().iter().next().map(|(f, _)| f);
                if let Some(field) = first_error {
                    if let Some(pos) = FOCUS_ORDER
                        .iter()
                        .position(|focus| *focus == Focus::Field(field))
                    {
                        self.focus = pos;
                    }
                }
            }
            SubmitOutcome::Failed | SubmitOutcome::Ignored => {}
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
    }

    fn focus_prev(&mut self) {
        if self.focus == 0 {
            self.focus = FOCUS_ORDER.len() - 1;
        } else {
            self.focus -= 1;
        }
    }
}

/// Steps through the fixed needs list; an unset or unknown value starts at the ends.
fn cycle_need(current: &str, delta: i32) -> AutomationNeed {
    let all = AutomationNeed::ALL;
    let len = all.len() as i32;
    let index = match current.parse::<AutomationNeed>() {
        Ok(need) => {
            let pos = all.iter().position(|item| *item == need).unwrap_or(0) as i32;
            (pos + delta).rem_euclid(len)
        }
        Err(_) if delta < 0 => len - 1,
        Err(_) => 0,
    };
    all[index as usize]
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}
