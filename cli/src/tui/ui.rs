use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use taskdesk_core::client::{MessageKind, DELETE_PROMPT};
use taskdesk_core::render::terminal::{sanitize, sanitize_line};
use taskdesk_core::{Field, Priority, Status, TaskApi, TaskList};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Focus};

const LABEL_WIDTH: usize = 13;

pub fn draw<A: TaskApi>(f: &mut Frame, app: &mut App<A>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Messages
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASKDESK")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(3)])
        .split(content_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_form(f, app, side_chunks[0]);
    draw_detail_view(f, app, side_chunks[1]);
    draw_message_bar(f, app, main_chunks[2]);
    draw_footer(f, app, main_chunks[3]);

    if let Focus::ConfirmDelete(id) = app.focus {
        draw_confirm(f, id, size);
    }
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Pending => Style::default().fg(Color::Gray),
        Status::InProgress => Style::default().fg(Color::Blue),
        Status::Done => Style::default().fg(Color::Green),
        Status::Unknown => Style::default().fg(Color::DarkGray),
    }
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
        Priority::Unknown => Style::default().fg(Color::DarkGray),
    }
}

fn draw_task_list<A: TaskApi>(f: &mut Frame, app: &mut App<A>, area: Rect) {
    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let cards = match app.client.list() {
        TaskList::Cards(cards) => cards,
        other => {
            let style = if matches!(other, TaskList::Failed) {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let placeholder = Paragraph::new(other.placeholder().unwrap_or_default())
                .style(style)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }
    };

    let rows: Vec<Row> = cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Span::styled(card.status.as_str(), status_style(card.status)),
                Span::styled(card.priority.as_str(), priority_style(card.priority)),
                Span::raw(card.due.to_string()),
                Span::styled(
                    sanitize_line(&card.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12), // Status
            Constraint::Length(7),  // Priority
            Constraint::Length(14), // Due
            Constraint::Min(10),    // Title
        ],
    )
    .header(
        Row::new(vec!["Status", "Pri", "Due", "Task"]).style(Style::default().fg(Color::Yellow)),
    )
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_form<A: TaskApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let affordances = app.client.affordances();
    let form = app.client.form();
    let focused = match app.focus {
        Focus::Form(field) => Some(field),
        _ => None,
    };

    let mut lines = Vec::new();
    for field in Field::ORDER {
        let value = match field {
            Field::Status => format!("< {} >", form.status),
            Field::Priority => format!("< {} >", form.priority),
            _ => sanitize_line(form.text(field).unwrap_or_default()),
        };
        let label_style = if focused == Some(field) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                label_style,
            ),
            Span::raw(value),
        ]));
    }

    lines.push(Line::from(""));
    let mut buttons = vec![Span::styled(
        format!("[Enter] {}", affordances.submit_label),
        Style::default().fg(Color::Green),
    )];
    if affordances.cancel_visible {
        buttons.push(Span::raw("  "));
        buttons.push(Span::styled("[Esc] Cancel", Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(buttons));

    if let Some(err) = app.client.form_error() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    }

    let border_style = if focused.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(match form.id {
            Some(id) => format!(" {} #{} ", affordances.heading, id),
            None => format!(" {} ", affordances.heading),
        })
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if let Some(field) = focused.filter(Field::is_text) {
        let row = Field::ORDER.iter().position(|f| *f == field).unwrap_or(0) as u16;
        let text = form.text(field).unwrap_or_default();
        let typed: String = text.chars().take(app.cursor_position).collect();
        let before = sanitize_line(&typed);
        let x = area.x + 1 + LABEL_WIDTH as u16 + before.width() as u16;
        let y = area.y + 1 + row;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

fn draw_detail_view<A: TaskApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let card = app
        .state
        .selected()
        .and_then(|i| app.client.list().cards().get(i));
    let Some(card) = card else {
        f.render_widget(block, area);
        return;
    };

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(sanitize_line(&card.title), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(card.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::styled(card.status.as_str(), status_style(card.status)),
            Span::raw("  "),
            Span::styled("Priority: ", Style::default().fg(Color::Blue)),
            Span::styled(card.priority.as_str(), priority_style(card.priority)),
        ]),
        Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Blue)),
            Span::raw(card.due.to_string()),
        ]),
        Line::from(""),
    ];

    if let Some(description) = &card.description {
        for line in sanitize(description).lines() {
            detail_text.push(Line::from(line.to_string()));
        }
    }

    let detail = Paragraph::new(detail_text).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_message_bar<A: TaskApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let Some(flash) = app.client.messages().current() else {
        return;
    };
    let style = match flash.kind {
        MessageKind::Error => Style::default().fg(Color::White).bg(Color::Red),
        MessageKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
    };
    let bar = Paragraph::new(format!(" {} ", sanitize_line(&flash.text))).style(style);
    f.render_widget(bar, area);
}

fn draw_footer<A: TaskApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let help = if app.busy {
        "Working..."
    } else {
        match app.focus {
            Focus::List => {
                "j/k: Navigate | e: Edit | d: Delete | a: New | r: Reload | x: Dismiss | q: Quit"
            }
            Focus::Form(_) => "Tab: Next field | ←/→: Change | Enter: Submit | Esc: Back/Cancel",
            Focus::ConfirmDelete(_) => "y: Delete | n: Keep",
        }
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_confirm(f: &mut Frame, id: u64, area: Rect) {
    let popup = centered_rect(50, 5, area);
    let text = vec![
        Line::from(DELETE_PROMPT),
        Line::from(Span::styled(
            format!("Task #{}   [y] yes   [n] no", id),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}
