use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event as CEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use crate::chat_view::{
    adjust_transcript_scroll, mouse_scroll_delta, normalize_pasted_text,
    transcript_max_scroll_lines,
};
use crate::config::GenerationSettings;
use crate::providers::ModelProvider;
use crate::tui::input::{map_key, ChatAction};
use crate::tui::render::draw;
use crate::tui::state::ChatUiState;
use crate::turn::run_turn;
use crate::types::AlgorithmRequest;

const PAGE_SCROLL_LINES: isize = 10;

/// Interactive chat loop. Each submit blocks on the runtime until the
/// provider returns or fails; there is no in-flight input handling, which
/// keeps the session strictly one request at a time.
pub fn run_chat(
    runtime: &Runtime,
    provider: &dyn ModelProvider,
    settings: &GenerationSettings,
    target_language: &str,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = ChatUiState::new(target_language.to_string());
    let result = event_loop(&mut terminal, &mut state, runtime, provider, settings);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut ChatUiState,
    runtime: &Runtime,
    provider: &dyn ModelProvider,
    settings: &GenerationSettings,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        // Transcript pane inner width; scroll limits follow wrapped rows.
        let pane_width = terminal.size()?.width.saturating_sub(2) as usize;
        match event::read()? {
            CEvent::Key(key) if key.kind != KeyEventKind::Release => {
                let Some(action) = map_key(key) else { continue };
                match action {
                    ChatAction::Quit => return Ok(()),
                    ChatAction::Insert(c) => state.input.push(c),
                    ChatAction::Backspace => {
                        state.input.pop();
                    }
                    ChatAction::ScrollUp => scroll(state, -PAGE_SCROLL_LINES, pane_width),
                    ChatAction::ScrollDown => scroll(state, PAGE_SCROLL_LINES, pane_width),
                    ChatAction::DismissBanner => state.error_banner = None,
                    ChatAction::Submit => {
                        let problem = state.take_input();
                        submit(terminal, state, runtime, provider, settings, problem)?;
                    }
                }
            }
            CEvent::Mouse(me) => {
                if let Some(delta) = mouse_scroll_delta(&me) {
                    scroll(state, delta, pane_width);
                }
            }
            CEvent::Paste(text) => state.input.push_str(&normalize_pasted_text(&text)),
            _ => {}
        }
    }
}

fn submit(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut ChatUiState,
    runtime: &Runtime,
    provider: &dyn ModelProvider,
    settings: &GenerationSettings,
    problem: String,
) -> anyhow::Result<()> {
    state.busy = true;
    terminal.draw(|f| draw(f, state))?;

    let request =
        AlgorithmRequest::new(problem).with_language(state.target_language.clone());
    let conversation = std::mem::take(&mut state.conversation);
    let outcome = runtime.block_on(run_turn(conversation, provider, settings, request));
    state.apply_outcome(outcome);
    Ok(())
}

fn scroll(state: &mut ChatUiState, delta: isize, pane_width: usize) {
    let max = transcript_max_scroll_lines(state.conversation.turns(), pane_width);
    state.scroll = adjust_transcript_scroll(state.scroll, delta, max);
}
