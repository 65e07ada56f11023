//! UI rendering for the TUI

use gene::view_state::FormRow;
use gene::{render_command_line, FieldId, FieldKind, Tab, API_MODULES};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use super::app::{App, StatusLevel};
use crate::cli::output::format_duration;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Command preview
            Constraint::Length(3), // Footer/status
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    draw_form(frame, app, chunks[1]);
    draw_preview(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| Line::from(format!(" {} {} ", idx + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL).title(" GeNe "))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(tabs, area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.rows();
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() * 2);

    for (idx, row) in rows.iter().enumerate() {
        let selected = idx == app.selected;
        let marker = if selected { "> " } else { "  " };
        let label_style = if selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default()
        };

        match row {
            FormRow::ShowApiMethods => {
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(checkbox(app.show_api_methods)),
                    Span::styled("Show HTTP & WS API methods", label_style),
                ]));
            }
            FormRow::Field(field) => {
                lines.push(field_line(app, *field, marker, label_style, selected));
            }
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing to configure here.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the selected row on screen.
    let height = area.height.saturating_sub(2) as usize;
    let scroll = app.selected.saturating_sub(height.saturating_sub(1));

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", app.tab.title())))
        .scroll((scroll as u16, 0));
    frame.render_widget(form, area);
}

fn field_line<'a>(
    app: &'a App,
    field: FieldId,
    marker: &'a str,
    label_style: Style,
    selected: bool,
) -> Line<'a> {
    let mut spans = vec![Span::raw(marker)];

    match field.kind() {
        FieldKind::Toggle => {
            spans.push(Span::raw(checkbox(app.form.toggled(field))));
            spans.push(Span::styled(field.label(), label_style));
        }
        FieldKind::Text => {
            spans.push(Span::styled(field.label(), label_style));
            spans.push(Span::raw(": "));
            let value = app.form.text(field);
            if selected && app.editing {
                spans.push(Span::styled(
                    format!("{}_", value),
                    Style::default().fg(Color::Yellow),
                ));
            } else if value.is_empty() {
                spans.push(Span::styled("(node default)", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(value));
            }
        }
        FieldKind::List => {
            spans.push(Span::styled(field.label(), label_style));
            spans.push(Span::raw(": "));
            let chosen = app.form.list(field);
            for (idx, module) in API_MODULES.iter().enumerate() {
                let on = chosen.iter().any(|m| m == module);
                let mut style = if on {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if selected && idx == app.module_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!("{}{}", checkbox(on), module), style));
                spans.push(Span::raw(" "));
            }
        }
    }

    Line::from(spans)
}

fn checkbox(on: bool) -> &'static str {
    if on {
        "[x] "
    } else {
        "[ ] "
    }
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let command = render_command_line(&app.geth().display().to_string(), &app.preview);
    let preview = Paragraph::new(command)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Command "));
    frame.render_widget(preview, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let node = match &app.node {
        Some(node) => Span::styled(
            format!(" node pid {} up {} ", node.pid(), format_duration(node.uptime())),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" node stopped ", Style::default().fg(Color::DarkGray)),
    };

    let message = match &app.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => Color::Cyan,
                StatusLevel::Warn => Color::Yellow,
            };
            Span::styled(format!(" {} ", status.text), Style::default().fg(color))
        }
        None if app.editing => Span::styled(
            " [Enter] Done  [Ctrl+U] Clear  [Ctrl+S] Start ",
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::styled(
            " [Tab/1-4] Tabs  [j/k] Move  [Enter/Space] Edit  [h/l] Module  [s] Start  [x] Stop  [q] Quit ",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let footer = Paragraph::new(Line::from(vec![node, message]))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
