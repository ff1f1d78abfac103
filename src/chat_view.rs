use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};

use crate::types::ChatTurn;

pub(crate) fn is_text_input_mods(mods: KeyModifiers) -> bool {
    mods.is_empty() || mods == KeyModifiers::SHIFT
}

pub(crate) fn normalize_pasted_text(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Renders the turn history as the text the transcript pane displays.
pub(crate) fn format_transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rows the text occupies once wrapped to `width` columns. Overlong words
/// are counted as hard-broken, matching how the transcript pane wraps.
pub(crate) fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut total = 0usize;
    for line in text.split('\n') {
        let chars = line.chars().count();
        let line_count = if chars == 0 { 1 } else { (chars - 1) / width + 1 };
        total = total.saturating_add(line_count);
    }
    total.max(1)
}

pub(crate) fn transcript_max_scroll_lines(turns: &[ChatTurn], width: usize) -> usize {
    wrapped_line_count(&format_transcript(turns), width).saturating_sub(1)
}

pub(crate) fn mouse_scroll_delta(me: &MouseEvent) -> Option<isize> {
    let step = if me.modifiers.contains(KeyModifiers::SHIFT) {
        12
    } else {
        3
    };
    match me.kind {
        MouseEventKind::ScrollUp => Some(-(step as isize)),
        MouseEventKind::ScrollDown => Some(step as isize),
        _ => None,
    }
}

pub(crate) fn adjust_transcript_scroll(current: usize, delta: isize, max_scroll: usize) -> usize {
    let base = if current == usize::MAX {
        max_scroll
    } else {
        current.min(max_scroll)
    };
    if delta < 0 {
        base.saturating_sub((-delta) as usize)
    } else {
        base.saturating_add(delta as usize).min(max_scroll)
    }
}
