use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::chat_view::{format_transcript, transcript_max_scroll_lines};
use crate::tui::state::ChatUiState;

pub fn draw(f: &mut Frame<'_>, state: &ChatUiState) {
    let banner_height = if state.error_banner.is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(banner_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_status(f, rows[0], state);
    draw_transcript(f, rows[1], state);
    if state.error_banner.is_some() {
        draw_banner(f, rows[2], state);
    }
    draw_input(f, rows[3], state);
}

fn draw_status(f: &mut Frame<'_>, area: Rect, state: &ChatUiState) {
    let status = if state.busy {
        "thinking...".to_string()
    } else {
        format!(
            "language: {} | Enter send | PgUp/PgDn scroll | Esc quit",
            state.target_language
        )
    };
    let line = Line::from(format!("algoassist | {status}"));
    f.render_widget(
        Paragraph::new(line).style(Style::default().add_modifier(Modifier::BOLD)),
        area,
    );
}

fn draw_transcript(f: &mut Frame<'_>, area: Rect, state: &ChatUiState) {
    let turns = state.conversation.turns();
    // Clamp against wrapped rows at the pane's inner width, not logical
    // lines, or the tail of a long wrapped reply becomes unreachable.
    let inner_width = area.width.saturating_sub(2) as usize;
    let max_scroll = transcript_max_scroll_lines(turns, inner_width);
    let scroll = state.scroll.min(max_scroll) as u16;
    let text = if turns.is_empty() {
        "Describe your coding problem...".to_string()
    } else {
        format_transcript(turns)
    };
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("transcript"));
    f.render_widget(widget, area);
}

fn draw_banner(f: &mut Frame<'_>, area: Rect, state: &ChatUiState) {
    let msg = state.error_banner.as_deref().unwrap_or_default();
    let widget = Paragraph::new(msg)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("error (F5 to dismiss)"),
        );
    f.render_widget(widget, area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, state: &ChatUiState) {
    let widget = Paragraph::new(format!("> {}", state.input))
        .block(Block::default().borders(Borders::ALL).title("problem"));
    f.render_widget(widget, area);
}
