//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! Title, then the gallows beside the word panel, the on-screen keyboard,
//! scoreboard beside the leaderboard, a status line and key help.
//!
//! # State Machine
//! - `Playing` → `GameOver` when the round ends
//! - `GameOver` → `Playing` when a new game is started

use crate::game_state::{
    GameInterface, GameView, GuessResult, KeyState, Outcome, UserAction, normalize_letter,
};
use crate::wordbank::Difficulty;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const KEYBOARD_ROW_LENGTH: usize = 13;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

fn key_colors(state: KeyState) -> (Color, Color) {
    match state {
        KeyState::Unused => (Color::DarkGray, Color::White),
        KeyState::Hit => (Color::Green, Color::Black),
        KeyState::Miss => (Color::Red, Color::White),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    /// Round finished - outcome stored in interface.message
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a GameView>,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<GameView>,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            view: None,
            state: TuiState::Playing,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(8),  // Gallows + word
                Constraint::Length(4),  // Keyboard
                Constraint::Min(8),     // Scoreboard + leaderboard
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if let Some(view) = ctx.view {
            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(20), Constraint::Min(20)])
                .split(chunks[1]);
            Self::render_gallows(f, middle[0], view);
            Self::render_word(f, middle[1], view);
            Self::render_keyboard(f, chunks[2], view);

            let bottom = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[3]);
            Self::render_scoreboard(f, bottom[0], view, ctx.message, ctx.error_message);
            Self::render_leaderboard(f, bottom[1], &view.leaderboard);
        }
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: &GameView) {
        let paragraph = Paragraph::new(view.drawing().trim_start_matches('\n'))
            .block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, view: &GameView) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(view.display_word(), WORD_STYLE)).alignment(Alignment::Center),
            Line::from(""),
            Line::from(vec![
                Span::styled("Hint: ", INFO_STYLE),
                Span::raw(view.hint.clone()),
            ]),
            Line::from(format!("Time: {} sec", view.elapsed_secs())),
        ];
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(format!("Word ({})", view.difficulty))
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: &GameView) {
        let lines: Vec<Line> = view
            .keyboard
            .chunks(KEYBOARD_ROW_LENGTH)
            .map(|row| {
                let mut spans = vec![Span::raw(" ")];
                for &(letter, state) in row {
                    let (bg_color, fg_color) = key_colors(state);
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Style::default().fg(fg_color).bg(bg_color),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_scoreboard(
        f: &mut Frame,
        area: Rect,
        view: &GameView,
        message: &str,
        error_message: &str,
    ) {
        let mut lines = vec![
            Line::from(vec![Span::styled(format!("Score: {}", view.score), SUCCESS_STYLE)]),
            Line::from(format!("Wrong Attempts: {}", view.wrong_count)),
            Line::from(""),
        ];

        match view.outcome {
            Outcome::Won => lines.push(Line::from(Span::styled("YOU WON!", SUCCESS_STYLE))),
            Outcome::Lost => lines.push(Line::from(Span::styled(
                format!(
                    "You Lost! Word was: {}",
                    view.revealed_word.as_deref().unwrap_or_default()
                ),
                ERROR_STYLE,
            ))),
            Outcome::InProgress => {}
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Scoreboard").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_leaderboard(f: &mut Frame, area: Rect, scores: &[i64]) {
        let lines: Vec<Line> = if scores.is_empty() {
            vec![Line::from("No scores yet.")]
        } else {
            scores
                .iter()
                .enumerate()
                .map(|(i, score)| Line::from(format!("{}. {score}", i + 1)))
                .collect()
        };
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Leaderboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => "A-Z: Guess | TAB: New game | 1/2/3: Easy/Medium/Hard | ESC: Quit",
            TuiState::GameOver => "TAB: New game | 1/2/3: Easy/Medium/Hard | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout so the timer keeps redrawing
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }

                // Filter out garbage characters from escape sequences (alt-tab)
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }

                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(self.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Tab => Some(UserAction::NewGame(None)),
            KeyCode::Char('1') => Some(UserAction::NewGame(Some(Difficulty::Easy))),
            KeyCode::Char('2') => Some(UserAction::NewGame(Some(Difficulty::Medium))),
            KeyCode::Char('3') => Some(UserAction::NewGame(Some(Difficulty::Hard))),
            KeyCode::Char(c) => match (self.state, normalize_letter(c)) {
                (TuiState::Playing, Some(letter)) => Some(UserAction::Guess(letter)),
                (TuiState::GameOver, Some(_)) => {
                    self.error_message = "Game over! Press TAB for a new game.".to_string();
                    None
                }
                (_, None) => {
                    self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                    None
                }
            },
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn show_session(&mut self, view: &GameView) {
        if !view.outcome.is_terminal() {
            self.state = TuiState::Playing;
        }
        self.view = Some(view.clone());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            // Redraw every poll so the timer advances
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("terminal input failed: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn show_guess_result(&mut self, letter: char, result: GuessResult) {
        self.message.clear();
        self.status = match result {
            GuessResult::Correct => format!("{letter} is in the word!"),
            GuessResult::Wrong => format!("No {letter} in this word."),
            GuessResult::Repeated => format!("{letter} was already guessed."),
            GuessResult::GameOver => "Game over! Press TAB for a new game.".to_string(),
        };
    }

    fn show_outcome(&mut self, view: &GameView, outcome: Outcome) {
        self.state = TuiState::GameOver;
        self.view = Some(view.clone());
        self.message = format!("Final score {} saved.", view.score);
        self.status = match outcome {
            Outcome::Won => "Game Over - You won!".to_string(),
            Outcome::Lost => "Game Over - You lost.".to_string(),
            Outcome::InProgress => self.status.clone(),
        };
        self.draw_or_log();
    }

    fn show_new_game(&mut self, difficulty: Difficulty) {
        self.state = TuiState::Playing;
        self.message.clear();
        self.error_message.clear();
        self.status = format!("New {difficulty} game - guess a letter");
    }

    fn show_exit(&mut self) {
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
