// src/app.rs

use std::fs;
use std::path::Path;

use ratatui::widgets::{ListState, ScrollbarState};
use safescope::core::knowledge_base::Polarity;
use safescope::core::models::{Assessment, Flag};

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Lines of the log file kept for the log panel.
const LOG_TAIL_LINES: usize = 200;

pub enum AppState {
    Idle,
    Analyzing,
    Finished,
}

/// What the input box is interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Domain,
    Qr,
}

impl InputMode {
    pub fn toggle(self) -> Self {
        match self {
            InputMode::Domain => InputMode::Qr,
            InputMode::Qr => InputMode::Domain,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            InputMode::Domain => "Domain",
            InputMode::Qr => "QR Content",
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub mode: InputMode,
    pub input: String,
    /// The last analysis, or the message of the error it ended with.
    pub outcome: Option<Result<Assessment, String>>,
    pub flag_list_state: ListState,
    /// Animated towards the real score after each analysis.
    pub displayed_score: u8,
    pub spinner_frame: usize,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            mode: InputMode::Domain,
            input: String::new(),
            outcome: None,
            flag_list_state: ListState::default(),
            displayed_score: 0,
            spinner_frame: 0,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
        }
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    /// Red flags first, then green, each in checklist order.
    pub fn flags(&self) -> Vec<(Polarity, Flag)> {
        self.assessment()
            .map(|a| {
                a.red_flags
                    .iter()
                    .map(|f| (Polarity::Red, *f))
                    .chain(a.green_flags.iter().map(|f| (Polarity::Green, *f)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn target_score(&self) -> u8 {
        self.assessment().map(|a| a.score().value()).unwrap_or(0)
    }

    pub fn on_tick(&mut self) {
        match self.state {
            AppState::Analyzing => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
            }
            AppState::Finished => {
                let target = self.target_score();
                if self.displayed_score < target {
                    self.displayed_score = (self.displayed_score + 2).min(target);
                } else if self.displayed_score > target {
                    self.displayed_score = target;
                }
            }
            AppState::Idle => {}
        }
    }

    pub fn finish(&mut self, outcome: Result<Assessment, String>) {
        self.outcome = Some(outcome);
        self.state = AppState::Finished;
        self.displayed_score = 0;
        let has_flags = !self.flags().is_empty();
        self.flag_list_state.select(if has_flags { Some(0) } else { None });
    }

    pub fn select_next(&mut self) {
        let len = self.flags().len();
        if len == 0 {
            return;
        }
        let next = self.flag_list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.flag_list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.flags().is_empty() {
            return;
        }
        let previous = self.flag_list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.flag_list_state.select(Some(previous));
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Re-reads the tail of the log file. A missing file leaves the panel empty.
    pub fn refresh_logs(&mut self, path: &Path) {
        let Ok(content) = fs::read_to_string(path) else {
            return;
        };
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(LOG_TAIL_LINES);
        self.log_content = lines[start..].iter().rev().map(|l| l.to_string()).collect();
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.outcome = None;
        self.flag_list_state = ListState::default();
        self.displayed_score = 0;
        self.spinner_frame = 0;
    }
}
