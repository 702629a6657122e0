//! Input - key dispatch into the focused form field
//!
//! Keys first pass the wizard-level bindings (step navigation, timer,
//! export), then fall through to the field the cursor sits on. Enter on a
//! text field advances focus; on selectors and toggles it acts on the value.

use super::event_loop::TuiMessage;
use super::state::{Screen, WizardTuiState};
use super::timer::TickHandle;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shrink_common::patterns;
use shrink_common::record::{
    coerce_amount, Department, ImmediateAction, IssueType, RecordUpdate, RiskLevel,
    RootCauseCategory,
};
use shrink_common::{timer, COMMON_PATTERNS};
use tokio::sync::mpsc;

/// Handle one key event. Returns true when the user asked to exit.
pub fn handle_key(
    state: &mut WizardTuiState,
    ticker: &mut TickHandle,
    tx: &mpsc::Sender<TuiMessage>,
    key: KeyEvent,
) -> bool {
    match state.screen {
        Screen::Welcome => welcome_key(state, ticker, tx, key),
        Screen::Wizard => wizard_key(state, ticker, tx, key),
    }
}

fn welcome_key(
    state: &mut WizardTuiState,
    ticker: &mut TickHandle,
    tx: &mpsc::Sender<TuiMessage>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => {
            state.start_investigation();
            ticker.start(tx.clone());
            false
        }
        KeyCode::Char('q') => true,
        _ => false,
    }
}

fn wizard_key(
    state: &mut WizardTuiState,
    ticker: &mut TickHandle,
    tx: &mpsc::Sender<TuiMessage>,
    key: KeyEvent,
) -> bool {
    match (key.code, key.modifiers) {
        // Ctrl+N - next step
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            state.next_step();
        }
        // Ctrl+P - previous step
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
            state.previous_step();
        }
        // Ctrl+E - export (final step only)
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            if state.session.is_last_step() {
                state.export();
            } else {
                state.set_notice("Export is available on the final step");
            }
        }
        // Ctrl+T - stop/resume the timer
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
            toggle_timer(state, ticker, tx);
        }
        (KeyCode::Tab, _) | (KeyCode::Down, _) => state.focus_next(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => state.focus_previous(),
        _ => {
            // Plain typing only; chorded keys never reach a field
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return false;
            }
            let handled = step_key(state, key.code);
            if !handled && key.code == KeyCode::Enter {
                state.focus_next();
            }
        }
    }
    false
}

fn toggle_timer(state: &mut WizardTuiState, ticker: &mut TickHandle, tx: &mpsc::Sender<TuiMessage>) {
    if state.session.timer_active {
        state.session.stop();
        ticker.stop();
        state.set_notice(format!(
            "Timer stopped at {}",
            timer::format_mmss(state.session.elapsed_seconds)
        ));
    } else {
        state.session.start();
        if !ticker.is_running() {
            ticker.start(tx.clone());
        }
        state.set_notice("Timer running");
    }
}

/// Dispatch a key to the focused field. Returns true when the field used it.
fn step_key(state: &mut WizardTuiState, code: KeyCode) -> bool {
    match state.session.current_step {
        0 => basic_info_key(state, code),
        1 => patterns_key(state, code),
        2 => root_cause_key(state, code),
        3 => resolution_key(state, code),
        _ => false,
    }
}

fn basic_info_key(state: &mut WizardTuiState, code: KeyCode) -> bool {
    let mut info = state.record.basic_info.clone();
    let handled = match state.field_index {
        0 => edit_text(&mut info.store_number, code),
        1 => {
            let (cycled, next) = cycle_option(Department::ALL, info.department, code);
            info.department = next;
            cycled
        }
        2 => {
            let edited = edit_numeric(&mut state.amount_input, code);
            if edited {
                info.amount = coerce_amount(&state.amount_input);
            }
            edited
        }
        3 => {
            let (cycled, next) = cycle_option(IssueType::ALL, info.issue_type, code);
            info.issue_type = next;
            cycled
        }
        4 => edit_text(&mut info.register_number, code),
        5 => edit_text(&mut info.employee_id, code),
        _ => false,
    };

    if handled {
        state.record = state.record.merged(RecordUpdate {
            basic_info: Some(info),
            ..RecordUpdate::default()
        });
    }
    handled
}

fn patterns_key(state: &mut WizardTuiState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            let tag = COMMON_PATTERNS[state.field_index].tag;
            let tags = patterns::toggle(&state.record.patterns, tag);
            state.record = state.record.merged(RecordUpdate {
                patterns: Some(tags),
                ..RecordUpdate::default()
            });
            true
        }
        _ => false,
    }
}

fn root_cause_key(state: &mut WizardTuiState, code: KeyCode) -> bool {
    let mut cause = state.record.root_cause.clone();
    let handled = match state.field_index {
        0 => {
            let (cycled, next) = cycle_option(RootCauseCategory::ALL, cause.category, code);
            cause.category = next;
            cycled
        }
        1 => edit_text(&mut cause.details, code),
        2 => toggle_bool(&mut cause.employee_involved, code),
        3 => toggle_bool(&mut cause.register_issue, code),
        _ => false,
    };

    if handled {
        state.record = state.record.merged(RecordUpdate {
            root_cause: Some(cause),
            ..RecordUpdate::default()
        });
    }
    handled
}

fn resolution_key(state: &mut WizardTuiState, code: KeyCode) -> bool {
    let mut resolution = state.record.resolution.clone();
    let mut overridden = false;
    let handled = match state.field_index {
        0 => {
            let (cycled, next) = cycle_option(ImmediateAction::ALL, resolution.immediate_action, code);
            resolution.immediate_action = next;
            cycled
        }
        1 => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
                resolution.risk_level =
                    cycle_level(resolution.risk_level, !matches!(code, KeyCode::Left));
                overridden = true;
                true
            }
            _ => false,
        },
        2 => toggle_bool(&mut resolution.follow_up_required, code),
        3 => {
            let edited = edit_date(&mut state.date_input, code);
            if edited {
                resolution.follow_up_date =
                    NaiveDate::parse_from_str(&state.date_input, "%Y-%m-%d").ok();
            }
            edited
        }
        4 => edit_text(&mut resolution.notes, code),
        _ => false,
    };

    if handled {
        state.record = state.record.merged(RecordUpdate {
            resolution: Some(resolution),
            ..RecordUpdate::default()
        });
        if overridden {
            // explicit pick; the suggestion stops seeding this field
            state.risk_overridden = true;
        }
    }
    handled
}

/// Plain text editing: printable chars append, backspace deletes
fn edit_text(buffer: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Amount editing: digits and a decimal point only
fn edit_numeric(buffer: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Date editing: digits and dashes (YYYY-MM-DD)
fn edit_date(buffer: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

fn toggle_bool(value: &mut bool, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right => {
            *value = !*value;
            true
        }
        _ => false,
    }
}

/// Cycle an optional selector. Right/Space/Enter move forward, Left moves
/// back; an unset field starts at the first (or last) catalog entry.
fn cycle_option<T: Copy + PartialEq>(
    all: &'static [T],
    current: Option<T>,
    code: KeyCode,
) -> (bool, Option<T>) {
    let forward = match code {
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => true,
        KeyCode::Left => false,
        _ => return (false, current),
    };

    let position = current.and_then(|value| all.iter().position(|v| *v == value));
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => all.len() - 1,
        (Some(i), true) => (i + 1) % all.len(),
        (Some(i), false) => (i + all.len() - 1) % all.len(),
    };
    (true, Some(all[next]))
}

fn cycle_level(current: RiskLevel, forward: bool) -> RiskLevel {
    let all = RiskLevel::ALL;
    let position = all
        .iter()
        .position(|level| *level == current)
        .unwrap_or(0);
    let next = if forward {
        (position + 1) % all.len()
    } else {
        (position + all.len() - 1) % all.len()
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrink_common::patterns::PatternTag;
    use shrink_common::ShrinkConfig;

    fn wizard_state() -> WizardTuiState {
        let mut state = WizardTuiState::new(&ShrinkConfig::default());
        state.screen = Screen::Wizard;
        state.session.start();
        state
    }

    #[test]
    fn test_typing_store_number() {
        let mut state = wizard_state();
        for c in ['1', '2', '3', '4'] {
            basic_info_key(&mut state, KeyCode::Char(c));
        }
        assert_eq!(state.record.basic_info.store_number, "1234");
        basic_info_key(&mut state, KeyCode::Backspace);
        assert_eq!(state.record.basic_info.store_number, "123");
    }

    #[test]
    fn test_amount_field_rejects_letters_and_coerces() {
        let mut state = wizard_state();
        state.field_index = 2;
        for c in ['2', '5', '0', '.', '5'] {
            basic_info_key(&mut state, KeyCode::Char(c));
        }
        assert!(!basic_info_key(&mut state, KeyCode::Char('x')));
        assert_eq!(state.record.basic_info.amount, 250.5);

        // an orphan dot parses as nothing and coerces to zero
        state.amount_input = ".".to_string();
        basic_info_key(&mut state, KeyCode::Char('.'));
        assert_eq!(state.record.basic_info.amount, 0.0);
    }

    #[test]
    fn test_department_cycles_both_ways() {
        let mut state = wizard_state();
        state.field_index = 1;
        basic_info_key(&mut state, KeyCode::Right);
        assert_eq!(state.record.basic_info.department, Some(Department::Electronics));
        basic_info_key(&mut state, KeyCode::Left);
        assert_eq!(
            state.record.basic_info.department,
            Some(Department::PhotoCenter)
        );
    }

    #[test]
    fn test_space_toggles_pattern_twice_back_to_empty() {
        let mut state = wizard_state();
        state.session.current_step = 1;
        state.field_index = 0;
        patterns_key(&mut state, KeyCode::Char(' '));
        assert!(state.record.patterns.contains(&PatternTag::RecurringEmployee));
        patterns_key(&mut state, KeyCode::Char(' '));
        assert!(state.record.patterns.is_empty());
    }

    #[test]
    fn test_risk_cycle_marks_override() {
        let mut state = wizard_state();
        state.session.current_step = 3;
        state.field_index = 1;
        assert!(!state.risk_overridden);
        resolution_key(&mut state, KeyCode::Right);
        assert_eq!(state.record.resolution.risk_level, RiskLevel::Medium);
        assert!(state.risk_overridden);
    }

    #[test]
    fn test_follow_up_date_parses_when_complete() {
        let mut state = wizard_state();
        state.session.current_step = 3;
        state.field_index = 3;
        for c in "2026-09-15".chars() {
            resolution_key(&mut state, KeyCode::Char(c));
        }
        assert_eq!(
            state.record.resolution.follow_up_date,
            NaiveDate::from_ymd_opt(2026, 9, 15)
        );

        // trailing edit invalidates the date until it parses again
        resolution_key(&mut state, KeyCode::Char('9'));
        assert_eq!(state.record.resolution.follow_up_date, None);
    }

    #[test]
    fn test_contributing_factor_toggles() {
        let mut state = wizard_state();
        state.session.current_step = 2;
        state.field_index = 2;
        root_cause_key(&mut state, KeyCode::Char(' '));
        assert!(state.record.root_cause.employee_involved);
        root_cause_key(&mut state, KeyCode::Char(' '));
        assert!(!state.record.root_cause.employee_involved);
    }
}
