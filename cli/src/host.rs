use anyhow::{Context, Result};
use lexigrid_core as game;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::input::{self, Command};
use crate::render;

/// Everything the play loop reacts to, funnelled through one channel so session updates stay sequential.
#[derive(Debug)]
pub enum HostMsg {
    Game(game::Event),
    Line(String),
    InputClosed,
}

/// Delivers a follow-up event after its delay on a short-lived thread.
///
/// If the thread cannot be spawned the event is replaced by [`undelivered`] and sent right away.
pub fn schedule(tx: &Sender<HostMsg>, scheduled: game::Scheduled, round: game::RoundId) {
    let game::Scheduled { delay, event } = scheduled;
    let fallback = undelivered(&event, round);
    let sender = tx.clone();
    let spawned = thread::Builder::new()
        .name("lexigrid-timer".into())
        .spawn(move || {
            thread::sleep(delay);
            // the loop may already be gone
            let _ = sender.send(HostMsg::Game(event));
        });

    if let Err(err) = spawned {
        log::warn!("Could not schedule follow-up: {}", err);
        if let Some(event) = fallback {
            let _ = tx.send(HostMsg::Game(event));
        }
    }
}

/// What to deliver immediately for a follow-up that could not be scheduled.
///
/// A lost tick restarts the round instead of leaving it waiting forever, a lost flash clear is applied early so the
/// flash does not stay up and block rotation.
fn undelivered(event: &game::Event, round: game::RoundId) -> Option<game::Event> {
    match event {
        game::Event::TickTimer { .. } => Some(game::Event::TimerFailed { round }),
        game::Event::ClearFlash { .. } => Some(event.clone()),
        _ => None,
    }
}

fn spawn_input_reader(tx: Sender<HostMsg>) -> Result<()> {
    thread::Builder::new()
        .name("lexigrid-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(HostMsg::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(HostMsg::InputClosed);
        })
        .context("spawning input reader")?;
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

/// Owns the session and the gesture translator, applying messages one at a time.
pub struct PlayHost<W: Write> {
    session: game::Session,
    translator: game::GestureTranslator,
    frame_size: f32,
    tx: Sender<HostMsg>,
    output: Output,
    out: W,
}

/// What the loop should do after a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl<W: Write> PlayHost<W> {
    pub fn new(
        session: game::Session,
        frame_size: f32,
        tx: Sender<HostMsg>,
        output: Output,
        out: W,
    ) -> Self {
        let translator = game::GestureTranslator::from_config(session.config(), frame_size);
        Self {
            session,
            translator,
            frame_size,
            tx,
            output,
            out,
        }
    }

    pub fn session(&self) -> &game::Session {
        &self.session
    }

    pub fn handle(&mut self, msg: HostMsg) -> Result<Flow> {
        match msg {
            HostMsg::Game(event) => self.dispatch(event)?,
            HostMsg::Line(line) => return self.command(&line),
            HostMsg::InputClosed => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn command(&mut self, line: &str) -> Result<Flow> {
        let command = match input::parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.out, "{:#}", err)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Stop),
            Command::Help => writeln!(self.out, "{}", input::HELP)?,
            Command::NewRound => self.dispatch(game::Event::StartRound)?,
            Command::Rotate => self.dispatch(game::Event::RotateBoard)?,
            Command::Path(path) => {
                for coords in path {
                    self.dispatch(game::Event::SelectLetter(coords))?;
                }
                self.dispatch(game::Event::SubmitWord)?;
            }
            Command::Drag(points) => {
                for pointer in input::drag_events(&points) {
                    for event in self.translator.handle(pointer) {
                        self.dispatch(event)?;
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Applies one event, schedules its follow-up and renders when something changed.
    pub fn dispatch(&mut self, event: game::Event) -> Result<()> {
        let starts_round = matches!(
            event,
            game::Event::StartRound | game::Event::TimerFailed { .. }
        );
        let was_playing = self.session.state().is_playing();

        let update = self.session.update(event);
        let state = self.session.state();

        if let Some(scheduled) = update.follow_up.clone() {
            schedule(&self.tx, scheduled, state.round());
        }
        if starts_round {
            if let Some(board) = state.board() {
                self.translator.set_layout(board.size(), self.frame_size);
            }
        }
        if update.has_update() {
            self.render(was_playing)?;
        }
        Ok(())
    }

    fn render(&mut self, was_playing: bool) -> Result<()> {
        let state = self.session.state();
        match self.output {
            Output::Json => {
                serde_json::to_writer(&mut self.out, state)?;
                writeln!(self.out)?;
            }
            Output::Text if state.phase() == game::Phase::Summary && was_playing => {
                write!(self.out, "{}", render::board_view(state))?;
                write!(self.out, "{}", render::summary(state))?;
                writeln!(self.out, "type n for a new round or q to quit")?;
            }
            Output::Text => {
                write!(self.out, "{}", render::board_view(state))?;
                writeln!(self.out, "{}", render::status_line(state))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Runs an interactive round loop on stdin/stdout until the player quits or input ends.
pub fn play(session: game::Session, frame_size: f32, output: Output) -> Result<()> {
    let (tx, rx): (Sender<HostMsg>, Receiver<HostMsg>) = mpsc::channel();
    spawn_input_reader(tx.clone())?;

    let mut host = PlayHost::new(session, frame_size, tx, output, std::io::stdout());
    if output == Output::Text {
        writeln!(host.out, "{}", input::HELP)?;
    }
    host.dispatch(game::Event::StartRound)?;

    for msg in rx {
        if host.handle(msg)? == Flow::Stop {
            break;
        }
    }

    let state = host.session().state();
    log::info!(
        "Leaving after round {} with {} points",
        state.round(),
        state.score()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn host() -> (PlayHost<Vec<u8>>, Receiver<HostMsg>) {
        let (tx, rx) = mpsc::channel();
        let config = game::GameConfig {
            // keep scheduled follow-ups from firing during the test
            tick_interval_ms: 60_000,
            flash_ms: 60_000,
            ..Default::default()
        };
        let trie = Arc::new(game::Trie::from_word_list("cat\ncats\nrent\n", 3));
        let mut session = game::Session::new(config, trie, 0).unwrap();
        session.start_round_with("CATS,OREN,DIAL,PEGS".parse().unwrap());
        (PlayHost::new(session, 400.0, tx, Output::Text, Vec::new()), rx)
    }

    fn line(host: &mut PlayHost<Vec<u8>>, text: &str) -> Flow {
        host.handle(HostMsg::Line(text.to_string())).unwrap()
    }

    #[test]
    fn typed_path_scores_a_word() {
        let (mut host, _rx) = host();
        assert_eq!(line(&mut host, "0,0 0,1 0,2"), Flow::Continue);
        assert_eq!(host.session().state().score(), 1);
        let out = String::from_utf8(host.out.clone()).unwrap();
        assert!(out.contains("score 1/3"));
    }

    #[test]
    fn drag_goes_through_the_gesture_translator() {
        let (mut host, _rx) = host();
        line(&mut host, "drag 50,50 150,50 250,50 350,50");
        assert_eq!(host.session().state().found_words(), &["cats".to_string()]);
    }

    #[test]
    fn stale_tick_from_an_old_round_is_ignored() {
        let (mut host, _rx) = host();
        let stale = game::Event::TickTimer {
            round: 0,
            remaining: 1,
        };
        host.handle(HostMsg::Game(stale)).unwrap();
        assert_eq!(host.session().state().time_remaining(), 180);
    }

    #[test]
    fn timer_failure_restarts_round() {
        let (mut host, _rx) = host();
        host.handle(HostMsg::Game(game::Event::TimerFailed { round: 1 }))
            .unwrap();
        assert_eq!(host.session().state().round(), 2);
    }

    #[test]
    fn quit_and_closed_input_stop_the_loop() {
        let (mut host, _rx) = host();
        assert_eq!(line(&mut host, "q"), Flow::Stop);
        assert_eq!(host.handle(HostMsg::InputClosed).unwrap(), Flow::Stop);
    }

    #[test]
    fn bad_lines_print_an_error_and_continue() {
        let (mut host, _rx) = host();
        assert_eq!(line(&mut host, "nonsense"), Flow::Continue);
        let out = String::from_utf8(host.out.clone()).unwrap();
        assert!(out.contains("expected a,b"));
    }

    #[test]
    fn scheduled_events_come_back_through_the_queue() {
        let (tx, rx) = mpsc::channel();
        schedule(
            &tx,
            game::Scheduled {
                delay: std::time::Duration::from_millis(1),
                event: game::Event::GameOver,
            },
            1,
        );
        let msg = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert!(matches!(msg, HostMsg::Game(game::Event::GameOver)));
    }

    #[test]
    fn unscheduled_follow_ups_are_delivered_early() {
        let tick = game::Event::TickTimer {
            round: 3,
            remaining: 10,
        };
        assert_eq!(
            undelivered(&tick, 3),
            Some(game::Event::TimerFailed { round: 3 })
        );

        let clear = game::Event::ClearFlash {
            round: 3,
            serial: 2,
        };
        assert_eq!(undelivered(&clear, 3), Some(clear.clone()));
        assert_eq!(undelivered(&game::Event::GameOver, 3), None);
    }
}
