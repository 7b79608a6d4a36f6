use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;
use hashbrown::HashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one round, carried by scheduled events so stale ones can be dropped.
pub type RoundId = u64;

/// Valid transitions:
/// - Playing -> Summary, when the timer runs out or on game over
/// - Summary -> Playing, only through a new round
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    Summary,
}

/// How a submitted selection was judged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionResult {
    Invalid,
    Duplicate,
    Valid,
}

/// Transient highlight of the cells of the last submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub cells: Vec<BoardCoord>,
    pub result: SubmissionResult,
    serial: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    StartRound,
    /// Cell in display coordinates, that is after the current rotation.
    SelectLetter(BoardCoord),
    SubmitWord,
    ClearFlash { round: RoundId, serial: u32 },
    RotateBoard,
    TickTimer { round: RoundId, remaining: u32 },
    /// The host could not deliver a scheduled tick.
    TimerFailed { round: RoundId },
    GameOver,
}

/// Follow-up event the host must deliver back after `delay`.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled {
    pub delay: Duration,
    pub event: Event,
}

/// Result of applying one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    pub changed: bool,
    pub follow_up: Option<Scheduled>,
}

impl Update {
    const IGNORED: Self = Self {
        changed: false,
        follow_up: None,
    };

    const CHANGED: Self = Self {
        changed: true,
        follow_up: None,
    };

    fn then(delay: Duration, event: Event) -> Self {
        Self {
            changed: true,
            follow_up: Some(Scheduled { delay, event }),
        }
    }

    /// Whether the snapshot may have changed and should be re-rendered.
    pub const fn has_update(&self) -> bool {
        self.changed
    }
}

/// Everything a host needs to render a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionState {
    round: RoundId,
    board: Option<GameBoard>,
    phase: Phase,
    selected_cells: Vec<BoardCoord>,
    selection: String,
    found_words: Vec<String>,
    board_words: Vec<BoardWord>,
    #[serde(skip)]
    possible_words: HashSet<String>,
    time_remaining: u32,
    possible_score: u32,
    score: u32,
    rotation: Rotation,
    flash: Option<Flash>,
}

impl SessionState {
    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn board(&self) -> Option<&GameBoard> {
        self.board.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Selected cells in board coordinates, in selection order.
    pub fn selected_cells(&self) -> &[BoardCoord] {
        &self.selected_cells
    }

    /// Letters spelled by the current selection.
    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Words accepted this round, in the order they were found.
    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    /// Every word path on the board, sorted.
    pub fn board_words(&self) -> &[BoardWord] {
        &self.board_words
    }

    pub fn possible_word_count(&self) -> usize {
        self.possible_words.len()
    }

    pub fn is_possible_word(&self, word: &str) -> bool {
        self.possible_words.contains(&word.to_lowercase())
    }

    /// Words on the board that were not found, sorted.
    pub fn remaining_words(&self) -> Vec<String> {
        let mut remaining: Vec<String> = self
            .possible_words
            .iter()
            .filter(|word| !self.found_words.contains(word))
            .cloned()
            .collect();
        remaining.sort();
        remaining
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn possible_score(&self) -> u32 {
        self.possible_score
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// Whether the round accepts player input.
    pub fn is_playing(&self) -> bool {
        self.board.is_some() && self.phase == Phase::Playing
    }
}

/// Round lifecycle, selection, scoring, rotation and countdown for one player.
///
/// Every change goes through [`Session::update`]. Time never passes inside the session: an event that needs a
/// follow-up returns it in [`Update::follow_up`] and the host delivers it back once the delay has elapsed.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    trie: Arc<Trie>,
    rng: SmallRng,
    state: SessionState,
    flash_serial: u32,
}

impl Session {
    pub fn new(config: GameConfig, trie: Arc<Trie>, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            trie,
            rng: SmallRng::seed_from_u64(seed),
            state: SessionState::default(),
            flash_serial: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Owned copy of the current state for hosts that render elsewhere.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn update(&mut self, event: Event) -> Update {
        use Event::*;

        log::trace!("event: {:?}", event);
        if self.state.board.is_none() && !matches!(event, StartRound) {
            log::debug!("Ignoring {:?} before the first round", event);
            return Update::IGNORED;
        }

        match event {
            StartRound => self.start_round(),
            SelectLetter(coords) => self.select_letter(coords),
            SubmitWord => self.submit_word(),
            ClearFlash { round, serial } => self.clear_flash(round, serial),
            RotateBoard => self.rotate_board(),
            TickTimer { round, remaining } => self.tick_timer(round, remaining),
            TimerFailed { round } => self.timer_failed(round),
            GameOver => self.game_over(),
        }
    }

    /// Starts a round on a freshly generated board.
    pub fn start_round(&mut self) -> Update {
        let seed = self.rng.random();
        let generated = RandomBoardGenerator::new(seed).generate(&self.config, &self.trie);
        self.begin_round(generated)
    }

    /// Starts a round on a given board, the search still runs against the session dictionary.
    pub fn start_round_with(&mut self, board: GameBoard) -> Update {
        let words = WordSearch::new(&board, &self.trie).find_all_words();
        self.begin_round(GeneratedBoard {
            board,
            words,
            rerolls: 0,
        })
    }

    fn begin_round(&mut self, GeneratedBoard { board, words, .. }: GeneratedBoard) -> Update {
        let possible_words: HashSet<String> = words.iter().map(|w| w.word.clone()).collect();
        let possible_score = max_score(possible_words.iter().map(String::as_str));
        let round = self.state.round + 1;

        log::info!(
            "Round {} started: {} words, {} points available",
            round,
            possible_words.len(),
            possible_score
        );

        self.state = SessionState {
            round,
            board: Some(board),
            phase: Phase::Playing,
            selected_cells: Vec::new(),
            selection: String::new(),
            found_words: Vec::new(),
            board_words: words,
            possible_words,
            time_remaining: self.config.round_secs,
            possible_score,
            score: 0,
            rotation: self.state.rotation,
            flash: None,
        };

        self.schedule_tick(self.config.round_secs)
    }

    fn select_letter(&mut self, display: BoardCoord) -> Update {
        if !self.state.is_playing() {
            log::debug!("Ignoring selection outside of play");
            return Update::IGNORED;
        }
        let Some(board) = &self.state.board else {
            return Update::IGNORED;
        };

        let size = board.size();
        if !display.in_bounds(size) {
            log::debug!("Ignoring selection of {} outside the board", display);
            return Update::IGNORED;
        }
        let coords = self.state.rotation.inverse().apply(display, size);

        if let Some(&last) = self.state.selected_cells.last() {
            if self.state.selected_cells.contains(&coords) {
                log::debug!("Ignoring reselection of {}", coords);
                return Update::IGNORED;
            }
            if !last.is_adjacent(coords) {
                log::debug!("Ignoring {} not adjacent to {}", coords, last);
                return Update::IGNORED;
            }
        }

        self.state.selected_cells.push(coords);
        self.state.selection.push(board[coords]);
        Update::CHANGED
    }

    fn submit_word(&mut self) -> Update {
        if !self.state.is_playing() || self.state.selected_cells.is_empty() {
            log::debug!("Ignoring submission without a selection");
            return Update::IGNORED;
        }

        let cells = core::mem::take(&mut self.state.selected_cells);
        let candidate = core::mem::take(&mut self.state.selection).to_lowercase();

        let result = if self.state.found_words.contains(&candidate) {
            SubmissionResult::Duplicate
        } else if !self.state.possible_words.contains(&candidate) {
            SubmissionResult::Invalid
        } else {
            self.state.score += score_word(&candidate);
            self.state.found_words.push(candidate.clone());
            SubmissionResult::Valid
        };
        log::debug!("Submitted {:?}: {:?}", candidate, result);

        self.flash_letters(cells, result)
    }

    fn flash_letters(&mut self, cells: Vec<BoardCoord>, result: SubmissionResult) -> Update {
        self.flash_serial = self.flash_serial.wrapping_add(1);
        self.state.flash = Some(Flash {
            cells,
            result,
            serial: self.flash_serial,
        });
        Update::then(
            self.config.flash_duration(),
            Event::ClearFlash {
                round: self.state.round,
                serial: self.flash_serial,
            },
        )
    }

    fn clear_flash(&mut self, round: RoundId, serial: u32) -> Update {
        match &self.state.flash {
            Some(flash) if round == self.state.round && flash.serial == serial => {
                self.state.flash = None;
                Update::CHANGED
            }
            _ => {
                log::trace!("Ignoring stale flash clear");
                Update::IGNORED
            }
        }
    }

    fn rotate_board(&mut self) -> Update {
        if !self.state.is_playing() {
            return Update::IGNORED;
        }
        if !self.state.selected_cells.is_empty() || self.state.flash.is_some() {
            log::debug!("Ignoring rotation during a selection or flash");
            return Update::IGNORED;
        }

        self.state.rotation = self.state.rotation.next();
        log::debug!("Rotated to {} degrees", self.state.rotation.degrees());
        Update::CHANGED
    }

    fn tick_timer(&mut self, round: RoundId, remaining: u32) -> Update {
        if round != self.state.round || !self.state.is_playing() {
            log::debug!("Ignoring stale tick for round {}", round);
            return Update::IGNORED;
        }
        if remaining >= self.state.time_remaining {
            log::debug!("Ignoring tick that would not advance the timer");
            return Update::IGNORED;
        }

        self.state.time_remaining = remaining;
        if remaining == 0 {
            self.game_over()
        } else {
            self.schedule_tick(remaining)
        }
    }

    fn timer_failed(&mut self, round: RoundId) -> Update {
        if round != self.state.round || !self.state.is_playing() {
            return Update::IGNORED;
        }
        log::warn!("Timer for round {} failed, restarting the round", round);
        self.start_round()
    }

    fn game_over(&mut self) -> Update {
        if self.state.phase == Phase::Summary {
            return Update::IGNORED;
        }

        self.state.phase = Phase::Summary;
        log::info!(
            "Round {} over: {} words, {} of {} points",
            self.state.round,
            self.state.found_words.len(),
            self.state.score,
            self.state.possible_score
        );
        Update::CHANGED
    }

    fn schedule_tick(&self, remaining: u32) -> Update {
        Update::then(
            self.config.tick_interval(),
            Event::TickTimer {
                round: self.state.round,
                remaining: remaining.saturating_sub(1),
            },
        )
    }
}
