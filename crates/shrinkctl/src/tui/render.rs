//! Rendering - UI drawing for the welcome screen, wizard, and status bar

use super::state::{Screen, WizardTuiState};
use super::utils::draw_help_overlay;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use shrink_common::record::RiskLevel;
use shrink_common::session::{StepStatus, Timeliness, STEPS, STEP_COUNT};
use shrink_common::timer::TimerStatus;
use shrink_common::{recommend, risk, timer, COMMON_PATTERNS};

/// Draw the UI
pub fn draw_ui(f: &mut Frame, state: &WizardTuiState) {
    let size = f.size();

    match state.screen {
        Screen::Welcome => draw_welcome(f, size, state),
        Screen::Wizard => draw_wizard(f, size, state),
    }

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

// ============================================================================
// Welcome screen
// ============================================================================

fn draw_welcome(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Shrink Control - Investigation Framework",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "5-Minute Shorts/Overs Analysis System",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(
            "A structured 4-step process with a built-in timer and risk assessment, \
             so an investigation stays inside the 5-minute target while capturing \
             everything that matters.",
        ),
        Line::from(""),
        feature_line("Timer System", "Color-coded alerts track the 5-minute target"),
        feature_line("4-Step Process", "Basic Info, Patterns, Root Cause, Resolution"),
        feature_line("Smart Analysis", "Automated risk scoring and recommendations"),
        feature_line("Audit Trail", "JSON export for record keeping and compliance"),
        Line::from(""),
        Line::from(Span::styled(
            "Process overview",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for step in &STEPS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>4}  ", step.target_label),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(step.title),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Timer: Ready",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" start investigation   "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit   "),
        Span::styled("F1", Style::default().fg(Color::Cyan)),
        Span::raw(" help"),
    ]));

    if let Some(store) = non_empty(&state.record.basic_info.store_number) {
        lines.push(Line::from(Span::styled(
            format!("Store {} prefilled from config", store),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let welcome = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Ready to Start Investigation ")
                .borders(Borders::ALL),
        );
    f.render_widget(welcome, area);
}

fn feature_line(title: &'static str, blurb: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<16}", title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(blurb, Style::default().fg(Color::DarkGray)),
    ])
}

// ============================================================================
// Wizard screen
// ============================================================================

fn draw_wizard(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header with timer
            Constraint::Length(4), // step progress
            Constraint::Min(8),    // step body
            Constraint::Length(3), // status bar
        ])
        .split(area);

    draw_header(f, chunks[0], state);
    draw_progress(f, chunks[1], state);
    draw_step_body(f, chunks[2], state);
    draw_status_bar(f, chunks[3], state);
}

fn draw_header(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let step = state.session.current_step;
    let elapsed = state.session.elapsed_seconds;

    let title_line = Line::from(vec![
        Span::styled(
            "Shrink Control",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::raw(format!(
            "Step {} of {}: {}",
            step + 1,
            STEP_COUNT,
            STEPS[step].title
        )),
    ]);

    let timer_color = match timer::classify(elapsed) {
        TimerStatus::Active => Color::Green,
        TimerStatus::Warning => Color::Yellow,
        TimerStatus::Expired => Color::Red,
    };
    let mut timer_spans = vec![Span::styled(
        format!("⏱ {}", timer::format_mmss(elapsed)),
        Style::default()
            .fg(timer_color)
            .add_modifier(Modifier::BOLD),
    )];
    if !state.session.timer_active {
        timer_spans.push(Span::styled(
            " (stopped)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    timer_spans.push(Span::raw("   "));
    if timer::within_target(elapsed) {
        timer_spans.push(Span::styled(
            "Within 5-minute target",
            Style::default().fg(Color::Green),
        ));
    } else {
        timer_spans.push(Span::styled(
            "Exceeded time limit",
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(vec![title_line, Line::from(timer_spans)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_progress(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let block = Block::default()
        .title(" Investigation Progress ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); STEP_COUNT])
        .split(inner);

    for step in 0..STEP_COUNT {
        let status = state.session.step_status(step);
        let (marker, marker_style) = match status {
            StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
            StepStatus::Active => (
                "▶",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
        };
        let title_style = if status == StepStatus::Active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let target_color = match state.session.timeliness(step) {
            Timeliness::OnTime => Color::Green,
            Timeliness::Warning => Color::Yellow,
            Timeliness::Overdue => Color::Red,
        };

        let cell = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{} ", marker), marker_style),
                Span::styled(STEPS[step].title, title_style),
            ]),
            Line::from(Span::styled(
                format!("  Target: {}", STEPS[step].target_label),
                Style::default().fg(target_color),
            )),
        ]);
        f.render_widget(cell, columns[step]);
    }
}

fn draw_step_body(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    match state.session.current_step {
        0 => draw_basic_info_step(f, area, state),
        1 => draw_patterns_step(f, area, state),
        2 => draw_root_cause_step(f, area, state),
        _ => draw_resolution_step(f, area, state),
    }
}

fn draw_basic_info_step(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let info = &state.record.basic_info;
    let focus = state.field_index;

    let lines = vec![
        description_line(0),
        Line::from(""),
        form_line("Store Number", text_value(&info.store_number, focus == 0), focus == 0),
        form_line(
            "Department",
            selector_value(info.department.map(|d| d.as_str())),
            focus == 1,
        ),
        form_line("Amount ($)", text_value(&state.amount_input, focus == 2), focus == 2),
        form_line(
            "Issue Type",
            selector_value(info.issue_type.map(|t| t.as_str())),
            focus == 3,
        ),
        form_line(
            "Register Number",
            text_value(&info.register_number, focus == 4),
            focus == 4,
        ),
        form_line("Employee ID", text_value(&info.employee_id, focus == 5), focus == 5),
    ];

    let body = Paragraph::new(lines).block(step_block(0));
    f.render_widget(body, area);
}

fn draw_patterns_step(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let selected = state.record.patterns.len();
    let mut lines = vec![
        description_line(1),
        Line::from(Span::styled(
            format!("Selected: {}", selected),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];

    for (index, info) in COMMON_PATTERNS.iter().enumerate() {
        let focused = state.field_index == index;
        let checked = state.record.patterns.contains(&info.tag);
        let marker = if focused { "▸ " } else { "  " };
        let checkbox = if checked { "[x] " } else { "[ ] " };
        let title_style = if checked {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(checkbox),
            Span::styled(format!("{:<26}", info.title), title_style),
            Span::styled(info.description, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(step_block(1));
    f.render_widget(body, area);
}

fn draw_root_cause_step(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let cause = &state.record.root_cause;
    let focus = state.field_index;
    let width = area.width.saturating_sub(24).max(20) as usize;

    let mut lines = vec![
        description_line(2),
        Line::from(""),
        form_line(
            "Primary Cause",
            selector_value(cause.category.map(|c| c.as_str())),
            focus == 0,
        ),
    ];

    lines.push(form_line(
        "Detailed Analysis",
        String::new(),
        focus == 1,
    ));
    for wrapped in wrapped_text_lines(&cause.details, width, focus == 1) {
        lines.push(wrapped);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Contributing Factors",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(checkbox_line(
        "Employee action or inaction contributed to the issue",
        cause.employee_involved,
        focus == 2,
    ));
    lines.push(checkbox_line(
        "Register or system malfunction was a factor",
        cause.register_issue,
        focus == 3,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Quick checklist: procedure followed? systems working? training adequate? \
         environment? supervision? policies communicated?",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(step_block(2));
    f.render_widget(body, area);
}

fn draw_resolution_step(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let resolution = &state.record.resolution;
    let focus = state.field_index;
    let width = area.width.saturating_sub(24).max(20) as usize;

    let breakdown = risk::score_breakdown(&state.record);
    let suggested = risk::suggested_level(&state.record);

    let mut lines = vec![
        description_line(3),
        Line::from(""),
        form_line(
            "Immediate Action",
            selector_value(resolution.immediate_action.map(|a| a.as_str())),
            focus == 0,
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("Risk Score: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}/{}", breakdown.total, risk::MAX_SCORE)),
            Span::raw("   Suggested: "),
            level_span(suggested),
        ]),
        form_line(
            "Final Risk Level",
            resolution.risk_level.as_str().to_uppercase(),
            focus == 1,
        ),
        Line::from(""),
        checkbox_line(
            "Follow-up action required",
            resolution.follow_up_required,
            focus == 2,
        ),
        form_line(
            "Follow-up Date",
            text_value(&state.date_input, focus == 3),
            focus == 3,
        ),
    ];

    if !resolution.follow_up_required {
        lines.push(Line::from(Span::styled(
            "  (date applies once follow-up is required)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(form_line("Notes", String::new(), focus == 4));
    for wrapped in wrapped_text_lines(&resolution.notes, width, focus == 4) {
        lines.push(wrapped);
    }

    if let Some(path) = &state.last_export {
        lines.push(Line::from(Span::styled(
            format!("  Last export: {}", path.display()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let advice = recommend::recommendations(&state.record);
    if !advice.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Smart Recommendations",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for item in advice {
            lines.push(Line::from(Span::styled(
                format!("  - {}", item),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(step_block(3));
    f.render_widget(body, area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &WizardTuiState) {
    let line = if let Some(notice) = &state.notice {
        Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let export_hint = if state.session.is_last_step() {
            "^E export  "
        } else {
            ""
        };
        Line::from(Span::styled(
            format!(
                "Tab/↓ next field  ↑ prev  ←/→ change  Space toggle  ^N/^P step  ^T timer  {}F1 help  ^C quit",
                export_hint
            ),
            Style::default().fg(Color::DarkGray),
        ))
    };

    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

// ============================================================================
// Shared helpers
// ============================================================================

fn step_block(step: usize) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", STEPS[step].title))
        .borders(Borders::ALL)
}

fn description_line(step: usize) -> Line<'static> {
    Line::from(Span::styled(
        STEPS[step].description,
        Style::default().fg(Color::DarkGray),
    ))
}

fn form_line(label: &'static str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<18}", label), label_style),
        Span::raw(value),
    ])
}

fn checkbox_line(label: &'static str, checked: bool, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let checkbox = if checked { "[x] " } else { "[ ] " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(checkbox),
        Span::styled(label, style),
    ])
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Text field value with a cursor while focused
fn text_value(text: &str, focused: bool) -> String {
    if focused {
        format!("{}_", text)
    } else {
        text.to_string()
    }
}

/// Selector value or the pick hint while unset
fn selector_value(value: Option<&'static str>) -> String {
    value.map(str::to_string).unwrap_or_else(|| "(press ←/→ to select)".to_string())
}

/// Wrapped free-text block, indented under its label
fn wrapped_text_lines(text: &str, width: usize, focused: bool) -> Vec<Line<'static>> {
    let shown = if focused {
        format!("{}_", text)
    } else if text.is_empty() {
        return Vec::new();
    } else {
        text.to_string()
    };

    textwrap::wrap(&shown, width)
        .into_iter()
        .map(|segment| Line::from(format!("    {}", segment)))
        .collect()
}

fn level_span(level: RiskLevel) -> Span<'static> {
    let color = match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    };
    Span::styled(
        level.as_str().to_uppercase(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
