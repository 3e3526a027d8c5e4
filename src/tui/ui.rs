//! Rendering for the terminal chat client

use super::app::App;
use crate::api::ChatRole;
use crate::runtime::RelayClient;
use crate::state_machine::{Turn, SUGGESTIONS};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SCROLLED_HINT: &str = " ↑ More messages above ";

pub fn render<R: RelayClient + 'static>(app: &mut App<R>, frame: &mut Frame) {
    let [header_area, transcript_area, suggestions_area, input_area, help_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(app, frame, header_area);
    render_transcript(app, frame, transcript_area);
    render_suggestions(frame, suggestions_area);
    render_input(app, frame, input_area);
    render_help(frame, help_area);
}

fn render_header<R: RelayClient + 'static>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let (badge, badge_color, status) = match app.connected() {
        Some(true) => ("Online", Color::Green, "Connected to AI service"),
        Some(false) => ("Offline", Color::Red, "Relay unreachable"),
        None => ("Offline", Color::DarkGray, "Connecting..."),
    };

    let line = Line::from(vec![
        Span::styled(
            " WorkSpaceAI Chat ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{badge}] "), Style::default().fg(badge_color)),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("Signed in as {}", app.user_name()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_transcript<R: RelayClient + 'static>(app: &mut App<R>, frame: &mut Frame, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);

    let spinner = SPINNER[app.spinner_frame() % SPINNER.len()];
    let paragraph = Paragraph::new(transcript_lines(app.runtime().state().turns(), spinner))
        .wrap(Wrap { trim: false });

    // Counted before the block is attached, so borders are not included
    let content_height = u16::try_from(paragraph.line_count(inner_width)).unwrap_or(u16::MAX);
    app.viewport_mut().set_dimensions(content_height, inner_height);
    let viewport = *app.viewport();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    if viewport.can_scroll_up() {
        block = block.title(
            Line::from(Span::styled(
                SCROLLED_HINT,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
    }

    let paragraph = paragraph.block(block).scroll((viewport.offset(), 0));
    frame.render_widget(paragraph, area);
}

/// One heading line per turn followed by its content lines; wrapping is
/// left to the paragraph
pub(crate) fn transcript_lines(turns: &[Turn], spinner: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for turn in turns {
        let (label, color) = match turn.role {
            ChatRole::User => ("You", Color::Cyan),
            ChatRole::Assistant => ("WorkSpaceAI", Color::Green),
        };

        let mut heading = vec![Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if !turn.pending {
            let time = turn.created_at.with_timezone(&Local).format("%H:%M:%S");
            heading.push(Span::styled(
                format!("  {time}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(heading));

        if turn.pending {
            lines.push(Line::from(Span::styled(
                format!("{spinner} AI is thinking..."),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.extend(turn.content.lines().map(|line| Line::from(line.to_string())));
        }
        lines.push(Line::default());
    }

    lines
}

fn render_suggestions(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = SUGGESTIONS
        .chunks(2)
        .enumerate()
        .map(|(row, pair)| {
            let mut spans = Vec::new();
            for (col, suggestion) in pair.iter().enumerate() {
                let key = row * 2 + col + 1;
                spans.push(Span::styled(format!("F{key} "), key_style));
                spans.push(Span::raw(format!("{suggestion:<46}")));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Quick Actions ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_input<R: RelayClient + 'static>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let state = app.runtime().state();
    let (title, border) = if state.is_pending() {
        (" Waiting for reply... ", Color::Yellow)
    } else {
        (" Message ", Color::Cyan)
    };

    let text = if state.input().is_empty() {
        Line::from(Span::styled(
            "Type your message here...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.input().to_string())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    frame.render_widget(Paragraph::new(text).block(block), area);

    if !state.is_pending() {
        // Keep the cursor on the last visible column when the input overflows
        let typed = u16::try_from(state.input().chars().count()).unwrap_or(u16::MAX);
        let max_x = area.width.saturating_sub(2);
        frame.set_cursor_position((area.x + 1 + typed.min(max_x), area.y + 1));
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(Span::styled(
        " Enter send · F1-F6 suggestion · PgUp/PgDn scroll · End newest · Ctrl+L clear chat · Esc quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(help), area);
}
