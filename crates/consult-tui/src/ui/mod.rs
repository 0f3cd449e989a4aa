use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use consult_core::{AutomationNeed, Dispatcher, Field, FormState};

use crate::app::{App, Focus};

const SENT_BODY: &str = "Your email client should have opened with your consultation request. Please send the email to complete your submission.";

const CONSULTATION_INCLUDES: [&str; 4] = [
    "Process evaluation and automation opportunity assessment",
    "Custom recommendations for your specific needs",
    "ROI projections and implementation timeline",
    "No obligation - completely free of charge",
];

pub fn draw<D: Dispatcher>(frame: &mut Frame<'_>, app: &App<D>) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_contact_info(frame, body[0], app);
    match app.controller.state() {
        FormState::Submitted => render_thank_you(frame, body[1], app),
        FormState::Editing | FormState::Submitting => render_form(frame, body[1], app),
    }

    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header<D: Dispatcher>(frame: &mut Frame<'_>, area: Rect, app: &App<D>) {
    let title = format!(
        "{}  free consultation request",
        app.controller.settings().site_name
    );
    let paragraph = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn render_footer<D: Dispatcher>(frame: &mut Frame<'_>, area: Rect, app: &App<D>) {
    let hint = match app.controller.state() {
        FormState::Submitted => "esc quit  F1 help",
        _ => match app.focus() {
            Focus::Field(Field::AutomationNeeds) => {
                "left/right choose  tab next  shift+tab prev  ctrl+s send  esc quit"
            }
            Focus::Field(Field::Consent) => "space toggle  tab next  ctrl+s send  esc quit",
            Focus::Field(Field::Message) => {
                "enter newline  ctrl+w delete word  ctrl+u clear  tab next  ctrl+s send"
            }
            Focus::Send | Focus::Clear => "enter select  tab next  shift+tab prev  esc quit",
            Focus::Field(_) => "tab next  shift+tab prev  ctrl+u clear  ctrl+s send  F1 help",
        },
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(toast) = app.controller.notifier().current() {
        let color = if toast.is_error {
            Color::Red
        } else {
            Color::Green
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(toast.description, Style::default().fg(color)),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_contact_info<D: Dispatcher>(frame: &mut Frame<'_>, area: Rect, app: &App<D>) {
    let mut lines = vec![
        field_line(
            "Email",
            app.controller.settings().recipient.as_str(),
            false,
        ),
        field_line("Phone", &app.contact.phone, false),
        field_line("Hours", &app.contact.hours, false),
        Line::from(""),
        Line::from(Span::styled(
            "Free Consultation Includes:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for item in CONSULTATION_INCLUDES {
        lines.push(Line::from(format!("  * {}", item)));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Get in Touch").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_form<D: Dispatcher>(frame: &mut Frame<'_>, area: Rect, app: &App<D>) {
    let form = app.controller.form();
    let errors = app.controller.errors();
    let mut lines = Vec::new();

    for field in Field::ALL {
        let focused = app.is_focused(field);
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };

        match field {
            Field::AutomationNeeds => {
                let value = match form.automation_needs.parse::<AutomationNeed>() {
                    Ok(need) => format!("< {} >", need.label()),
                    Err(_) => "< Select an option >".to_string(),
                };
                lines.push(field_line(&label, &value, focused));
            }
            Field::Consent => {
                let mark = if form.consent { "[x]" } else { "[ ]" };
                let value = format!(
                    "{} I agree to receive communications from {} regarding this consultation request and related services.",
                    mark,
                    app.controller.settings().site_name
                );
                lines.push(field_line("Consent *", &value, focused));
            }
            Field::Message => {
                let mut rows = form.message.split('\n');
                let first = rows.next().unwrap_or_default();
                lines.push(field_line(&label, &cursor(first, focused), focused));
                for row in rows {
                    lines.push(Line::from(format!("  {}", row)));
                }
            }
            _ => {
                let value = form.text(field).unwrap_or_default();
                lines.push(field_line(&label, &cursor(value, focused), focused));
            }
        }

        if let Some(message) = errors.get(field) {
            lines.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let send_label = if app.controller.state() == FormState::Submitting {
        "[Preparing Request...]"
    } else {
        "[Send Consultation Request]"
    };
    lines.push(Line::from(vec![
        button(send_label, app.focus() == Focus::Send),
        Span::raw("  "),
        button("[Clear]", app.focus() == Focus::Clear),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title("Request Your Free Consultation")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_thank_you<D: Dispatcher>(frame: &mut Frame<'_>, area: Rect, app: &App<D>) {
    let recipient = app.controller.settings().recipient.as_str();
    let mut lines = vec![
        Line::from(Span::styled(
            "Thank You!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(SENT_BODY),
        Line::from(format!(
            "If your email client didn't open, you can reach us directly at {}",
            recipient
        )),
    ];

    if let Some(draft) = &app.last_draft {
        lines.push(Line::from(""));
        lines.push(field_line("Subject", &draft.subject, false));
        lines.push(field_line("Link", &draft.mailto_url(), false));
    }

    if let Some(remaining) = app.controller.reset_remaining(Instant::now()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Resetting in {}s", remaining.as_secs() + 1),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Request Sent").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::from("tab/down  next field"),
        Line::from("shift+tab/up  previous field"),
        Line::from("left/right  choose automation interest"),
        Line::from("space  toggle consent"),
        Line::from("ctrl+s  send request"),
        Line::from("ctrl+u  clear field"),
        Line::from("ctrl+w  delete word"),
        Line::from("F1  toggle help"),
        Line::from("esc  quit"),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}

fn cursor(value: &str, focused: bool) -> String {
    if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    }
}

fn button(label: &'static str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Span::styled(label, style)
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
