use crate::calculator::ComputationRecord;
use crate::catalog::{self, RateTier};
use crate::error::{Error, ExportError, Result};
use crate::session::Session;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use super::ui;

/// How long a notification stays on screen
const NOTICE_TTL: Duration = Duration::from_secs(4);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

/// Interactive calculator state. Drives the session from key presses.
pub struct App {
    session: Session,
    tiers: &'static [RateTier],
    amount_input: String,
    selected_tier: Option<usize>,
    amount_error: Option<&'static str>,
    rate_error: Option<&'static str>,
    notice: Option<Notice>,
    history_offset: usize,
    running: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            tiers: catalog::tiers(),
            amount_input: String::new(),
            selected_tier: None,
            amount_error: None,
            rate_error: None,
            notice: None,
            history_offset: 0,
            running: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let terminal_err = |e: io::Error| Error::Terminal(e.to_string());

        enable_raw_mode().map_err(terminal_err)?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_err)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_err)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode().map_err(terminal_err)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_err)?;
        terminal.show_cursor().map_err(terminal_err)?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while self.running {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code, key.modifiers);
            }

            if let Some(notice) = &self.notice
                && notice.shown_at.elapsed() >= NOTICE_TTL
            {
                self.notice = None;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match key {
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::Esc => self.running = false,
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::Char('s') if ctrl => self.export(),
            KeyCode::Enter => self.calculate(),
            KeyCode::Up => self.move_tier(-1),
            KeyCode::Down => self.move_tier(1),
            KeyCode::PageUp => {
                self.history_offset = self.history_offset.saturating_sub(5);
            }
            KeyCode::PageDown => {
                let max = self.session.history().len().saturating_sub(1);
                self.history_offset = (self.history_offset + 5).min(max);
            }
            KeyCode::Backspace => {
                self.amount_input.pop();
            }
            KeyCode::Char(c) if !ctrl && is_amount_char(c) => self.amount_input.push(c),
            _ => {}
        }
    }

    fn calculate(&mut self) {
        let amount_text = self.amount_input.replace(',', "");
        let rate = self.selected_tier().map(|t| t.rate);

        match self.session.calculate(&amount_text, rate) {
            Ok(_) => {
                self.amount_error = None;
                self.rate_error = None;
                self.history_offset = 0;
            }
            Err(e) => {
                self.amount_error = e.amount.as_ref().map(|f| f.message());
                self.rate_error = e.rate.as_ref().map(|f| f.message());
            }
        }
    }

    fn clear(&mut self) {
        self.session.clear();
        self.history_offset = 0;
        self.notify("History cleared", NoticeKind::Info);
    }

    fn export(&mut self) {
        match self.session.export() {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.notify(format!("Exported: {}", name), NoticeKind::Success);
            }
            Err(ExportError::NothingToExport) => {
                self.notify(ExportError::NothingToExport.to_string(), NoticeKind::Info);
            }
            Err(ExportError::Write { reason, .. }) => {
                self.notify(format!("Export failed: {}", reason), NoticeKind::Failure);
            }
        }
    }

    fn move_tier(&mut self, delta: i32) {
        if self.tiers.is_empty() {
            return;
        }
        let last = self.tiers.len() - 1;
        self.selected_tier = Some(match self.selected_tier {
            None => 0,
            Some(i) if delta < 0 => i.saturating_sub(delta.unsigned_abs() as usize),
            Some(i) => (i + delta as usize).min(last),
        });
    }

    fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tiers(&self) -> &'static [RateTier] {
        self.tiers
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_tier
    }

    pub fn selected_tier(&self) -> Option<&'static RateTier> {
        self.selected_tier.and_then(|i| self.tiers.get(i))
    }

    pub fn amount_error(&self) -> Option<&'static str> {
        self.amount_error
    }

    pub fn rate_error(&self) -> Option<&'static str> {
        self.rate_error
    }

    /// Record behind the result line: the newest in the history
    pub fn last_result(&self) -> Option<&ComputationRecord> {
        self.session.history().latest()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E' | ',')
}
