//! Watch view: plays a playlist against a simulated clock and keeps the
//! transcript list scrolled to the active segment.
//!
//! The app is split into pure state handling (`handle_key`, `tick`) and
//! terminal I/O (`run`), so the sync behavior can be driven from tests
//! without a terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    DefaultTerminal, Frame,
};
use tracing::debug;

use super::format::{format_duration, progress_bar, segment_line, truncate_to_width};
use super::InputResult;
use crate::api::{Backend, FetchState};
use crate::config::Config;
use crate::loader::TranscriptLoader;
use crate::player::{ClockPlayer, PlayerControls, PlaylistItem, SyncController, SyncEffect};
use crate::theme::current_theme;

/// Interactive transcript player.
pub struct WatchApp {
    sync: SyncController,
    controls: PlayerControls<ClockPlayer>,
    loader: TranscriptLoader,
    /// Cursor in the transcript list (follows the active segment)
    list_state: ListState,
    seek_step: f64,
    tick: Duration,
    /// Number of `ScrollTo` effects applied, for diagnostics
    scroll_count: usize,
    title: String,
}

impl WatchApp {
    /// Build the app with a loaded playlist and an attached clock player.
    pub fn new(
        backend: Arc<dyn Backend>,
        config: &Config,
        title: impl Into<String>,
        items: Vec<PlaylistItem>,
    ) -> Self {
        let mut controls = PlayerControls::new();
        controls.attach(ClockPlayer::new());

        let mut app = Self {
            sync: SyncController::new(config.player.lookahead_offset_secs),
            controls,
            loader: TranscriptLoader::spawn(backend, config.api.language.clone()),
            list_state: ListState::default(),
            seek_step: config.player.seek_step_secs,
            tick: Duration::from_millis(config.player.tick_millis.max(16)),
            scroll_count: 0,
            title: title.into(),
        };
        let effects = app.sync.load_playlist(items);
        app.apply(effects);
        app
    }

    /// Jump to a playlist entry, e.g. the one saved from a previous visit.
    pub fn resume_at(&mut self, index: usize) {
        let effects = self.sync.set_index(index);
        self.apply(effects);
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn controls(&self) -> &PlayerControls<ClockPlayer> {
        &self.controls
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn scroll_count(&self) -> usize {
        self.scroll_count
    }

    /// Apply controller effects to the player, the list, and the loader.
    fn apply(&mut self, effects: impl IntoIterator<Item = SyncEffect>) {
        for effect in effects {
            match &effect {
                SyncEffect::ScrollTo(index) => {
                    self.list_state.select(Some(*index));
                    self.scroll_count += 1;
                }
                SyncEffect::FetchTranscript(ticket) => {
                    if !self.loader.request(ticket) {
                        debug!("transcript loader is gone");
                    }
                }
                SyncEffect::LoadVideo { .. } => {
                    self.list_state.select(None);
                    self.controls.apply(&effect);
                }
                SyncEffect::Seek { .. } => {
                    self.controls.apply(&effect);
                }
            }
        }
    }

    /// One step of the event loop without input: sample the player clock
    /// and collect finished transcript fetches.
    pub fn tick(&mut self) {
        while let Some(done) = self.loader.try_recv() {
            let effect = self
                .sync
                .complete_transcript_fetch(done.ticket_id, done.result);
            self.apply(effect);
        }
        if let Some(time) = self.controls.current_time() {
            let effect = self.sync.on_time_update(time);
            self.apply(effect);
        }
    }

    /// Block until one transcript fetch finishes and apply it.
    ///
    /// Returns false if the loader has shut down.
    pub fn wait_for_transcript(&mut self) -> bool {
        match self.loader.recv() {
            Some(done) => {
                let effect = self
                    .sync
                    .complete_transcript_fetch(done.ticket_id, done.result);
                self.apply(effect);
                true
            }
            None => false,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return InputResult::Quit
            }

            KeyCode::Char(' ') => {
                if let Some(player) = self.controls.player_mut() {
                    player.toggle_pause();
                }
            }
            KeyCode::Char('m') => {
                let muted = self.sync.toggle_mute();
                self.controls.set_muted(muted);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(player) = self.controls.player_mut() {
                    player.speed_up();
                }
            }
            KeyCode::Char('-') => {
                if let Some(player) = self.controls.player_mut() {
                    player.speed_down();
                }
            }

            KeyCode::Char('n') => {
                let effects = self.sync.next_video();
                self.apply(effects);
            }
            KeyCode::Char('p') => {
                let effects = self.sync.prev_video();
                self.apply(effects);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                let effects = self.sync.select_clip(index);
                self.apply(effects);
            }

            KeyCode::Left => {
                let effects = self.sync.seek_by(-self.seek_step);
                self.apply(effects);
            }
            KeyCode::Right => {
                let effects = self.sync.seek_by(self.seek_step);
                self.apply(effects);
            }

            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => {
                if let Some(index) = self.list_state.selected() {
                    let effect = self.sync.select_segment(index);
                    self.apply(effect);
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(transcript) = self.sync.transcript().value() else {
            return;
        };
        if transcript.is_empty() {
            return;
        }
        let last = transcript.len() - 1;
        let current = self
            .list_state
            .selected()
            .or(self.sync.active_segment())
            .unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(last)
        };
        self.list_state.select(Some(next));
    }

    /// Run the event loop until the user quits.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    let pressed = key.kind == KeyEventKind::Press;
                    if pressed && self.handle_key(key) == InputResult::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Draw the whole screen.
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_transcript(frame, chunks[1]);
        self.render_progress(frame, chunks[2]);
        render_footer(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = current_theme();
        let playlist = self.sync.playlist();
        let width = area.width.saturating_sub(2) as usize;

        let line = match self.sync.current_item() {
            Some(item) => format!(
                "Clip {}/{}  {}  {}",
                self.sync.current_index() + 1,
                playlist.len(),
                item.video_id,
                item.text.as_deref().unwrap_or("")
            ),
            None => "No clips".to_string(),
        };

        let title = Span::styled(format!(" {} ", self.title), theme.accent_style());
        let header = Paragraph::new(truncate_to_width(&line, width))
            .style(theme.text_style())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(header, area);
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let theme = current_theme();
        let block = Block::default().borders(Borders::ALL).title(" Transcript ");

        match self.sync.transcript() {
            FetchState::Success(transcript) if !transcript.is_empty() => {
                let active = self.sync.active_segment();
                let items: Vec<ListItem> = transcript
                    .sentences
                    .iter()
                    .enumerate()
                    .map(|(i, segment)| {
                        let is_active = active == Some(i);
                        let style = if is_active {
                            theme.highlight_style()
                        } else {
                            theme.text_style()
                        };
                        ListItem::new(Line::styled(segment_line(segment, is_active), style))
                    })
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(theme.accent_style());
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
            other => {
                let muted = theme.text_secondary_style();
                let (text, style) = match other {
                    FetchState::Loading => ("Loading transcript...".to_string(), muted),
                    FetchState::Error(message) => (message.clone(), theme.error_style()),
                    FetchState::Success(_) => ("Transcript is empty.".to_string(), muted),
                    FetchState::Idle => ("No video selected.".to_string(), muted),
                };
                let paragraph = Paragraph::new(text)
                    .style(style)
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let theme = current_theme();
        let time = self.sync.state().current_time;
        let total = self
            .sync
            .transcript()
            .value()
            .map(|t| t.duration())
            .unwrap_or(0.0);

        let mut flags = String::new();
        if let Some(player) = self.controls.player() {
            if player.paused {
                flags.push_str(" paused");
            }
            if (player.speed - 1.0).abs() > f64::EPSILON {
                flags.push_str(&format!(" {:.2}x", player.speed));
            }
        }
        if self.sync.state().is_muted {
            flags.push_str(" muted");
        }

        let label = format!(
            " {} / {}{}",
            format_duration(time),
            format_duration(total),
            flags
        );
        let label_width = label.chars().count() + 1;
        let bar_width = (area.width as usize).saturating_sub(label_width);
        let bar = format!(" {}", progress_bar(bar_width, time, total));
        let line = Line::from(vec![
            Span::styled(bar, theme.accent_style()),
            Span::styled(label, theme.text_secondary_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let theme = current_theme();
    let keys = [
        ("space", "pause"),
        ("←/→", "seek"),
        ("↑/↓", "line"),
        ("enter", "jump"),
        ("n/p", "clip"),
        ("m", "mute"),
        ("q", "quit"),
    ];
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(*key, theme.accent_style()));
        let hint = format!(": {}", desc);
        spans.push(Span::styled(hint, theme.text_secondary_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
