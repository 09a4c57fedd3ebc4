use crate::application::{App, AppMode};
use crate::domain::templates;
use crate::domain::{FieldDef, FieldKind, TemplateId};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

const PRIVACY_NOTICE: &str = "Privacy: everything stays in memory. Nothing is saved or sent anywhere, \
and quitting clears it all. You type all content yourself.";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.mode {
        AppMode::Picker => render_picker(f, app, chunks[1]),
        AppMode::Wizard | AppMode::Editing => render_wizard(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = match (app.wizard.template(), app.wizard.step()) {
        (Some(template), Some(step)) => format!(
            "DAP Note Helper | {} | Step {} of {}",
            template.title, step, template.total_steps
        ),
        _ => "DAP Note Helper | Select Note Type".to_string(),
    };
    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_picker(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let items: Vec<ListItem> = templates::all_templates()
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let style = if index == app.picker_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::from(Span::styled(
                    template.title,
                    style.add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(format!("  {}", template.description), style)),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Choose the type of service you're documenting"),
    );
    f.render_widget(list, chunks[0]);

    let notice = Paragraph::new(PRIVACY_NOTICE)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(notice, chunks[1]);
}

fn render_wizard(f: &mut Frame, app: &App, area: Rect) {
    let columns = if app.show_preview {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);

    render_progress(f, app, left[0]);
    if app.wizard.is_final_step() {
        render_review(f, app, left[1]);
    } else {
        render_step_form(f, app, left[1]);
    }

    if app.show_preview {
        render_preview(f, app, columns[1]);
    }
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let (step, total) = match (app.wizard.step(), app.wizard.template()) {
        (Some(step), Some(template)) => (step, template.total_steps),
        _ => (0, 1),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(templates::step_title(step)))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((step as f64 / total as f64).clamp(0.0, 1.0))
        .label(format!("Step {step} of {total}"));
    f.render_widget(gauge, area);
}

fn render_step_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (index, field) in app.current_fields().into_iter().enumerate() {
        let focused = index == app.field_index;
        lines.extend(field_lines(app, field, focused));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(form, area);
}

fn field_lines(app: &App, field: &FieldDef, focused: bool) -> Vec<Line<'static>> {
    let marker = if focused { "> " } else { "  " };
    let required = if field.required { " *" } else { "" };
    let prompt_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let prompt = Span::styled(format!("{marker}{}{required}: ", field.prompt), prompt_style);

    match field.kind {
        FieldKind::Text => {
            let value = if focused && app.mode == AppMode::Editing {
                format!("{}_", app.input)
            } else {
                app.field_summary(field)
            };
            vec![Line::from(vec![prompt, Span::raw(value)])]
        }
        FieldKind::Select { .. } => {
            let value = app.field_summary(field);
            let shown = if value.is_empty() {
                "(not set)".to_string()
            } else {
                value
            };
            let hint = if focused { "  ◀ ▶" } else { "" };
            vec![Line::from(vec![
                prompt,
                Span::raw(shown),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ])]
        }
        FieldKind::Multi { choices, .. } => {
            let mut lines = vec![Line::from(prompt)];
            for (index, choice) in choices.iter().enumerate() {
                let checked = app.wizard.record().is_checked(field.name, choice.id);
                let mark = if checked { "[x]" } else { "[ ]" };
                let style = if focused && index == app.choice_index {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("     {mark} {}", choice.label),
                    style,
                )));
            }
            lines
        }
    }
}

fn render_review(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .wizard
        .quality_checks()
        .into_iter()
        .map(|check| {
            let (mark, color) = if check.passed {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            Line::from(Span::styled(
                format!("{mark} {}", check.description),
                Style::default().fg(color),
            ))
        })
        .collect();

    if let Some(formatter) = app.wizard.formatter() {
        let missing = formatter.missing_required();
        if !missing.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::raw("Still needed:"));
            for field in missing {
                lines.push(Line::raw(format!(
                    "  {} ({})",
                    field.prompt,
                    templates::step_title(field.step)
                )));
            }
        }
    }

    lines.push(Line::raw(""));
    let copy_hint = if app.wizard.can_copy() {
        Span::styled("c: copy note", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            "c: copy note (complete the checks first)",
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(vec![
        copy_hint,
        Span::raw(" | n: start new note | x: exit"),
    ]));

    let review = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Quality Checks"));
    f.render_widget(review, area);
}

fn render_preview(f: &mut Frame, app: &App, area: Rect) {
    let text = app.wizard.preview().unwrap_or_default();
    let preview = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Live Preview (what will be copied)"),
        );
    f.render_widget(preview, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(status) = &app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Picker => "↑↓: choose | Enter: start | q: quit".to_string(),
            AppMode::Wizard => {
                "↑↓: field | ←→: option | Space: toggle | Enter: edit | Tab: next step | Esc: back | p: preview"
                    .to_string()
            }
            AppMode::Editing => "Enter: save | Esc: cancel".to_string(),
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Picker => Style::default(),
            AppMode::Wizard => Style::default().fg(Color::Cyan),
            AppMode::Editing => Style::default().fg(Color::Green),
        });
    f.render_widget(status, area);
}

/// One-line summary per template for `dapnote templates`.
pub fn template_listing() -> String {
    TemplateId::ALL
        .iter()
        .map(|id| {
            let template = templates::template(*id);
            format!("{:<16}{}", id.as_str(), template.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
