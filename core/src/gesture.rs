use alloc::vec::Vec;
use core::f32::consts::PI;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Pointer position in pixels relative to the top-left corner of the board frame, `y` grows downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn angle_to(self, other: Point) -> f32 {
        libm::atan2f(other.y - self.y, other.x - self.x)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    pub const fn start(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Start,
            position: Point::new(x, y),
        }
    }

    pub const fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            position: Point::new(x, y),
        }
    }

    pub const fn end(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::End,
            position: Point::new(x, y),
        }
    }
}

/// Smallest absolute difference between two angles, in `[0, PI]`.
fn angle_between(a: f32, b: f32) -> f32 {
    let diff = libm::fabsf(a - b) % (2.0 * PI);
    if diff > PI { 2.0 * PI - diff } else { diff }
}

/// Session events produced by one pointer event, at most a submission followed by a selection.
pub type GestureEvents = SmallVec<[Event; 2]>;

/// Turns a freeform drag over the board into discrete cell selections.
///
/// Works in display coordinates, the cells the player sees. A drag never re-enters a cell, only moves to a
/// neighbor of the last accepted cell, and only when the pointer travelled roughly in the direction of that
/// neighbor so that clipping the corner of a diagonal cell is not taken as a selection. Missing an intended cell
/// is preferred over picking a spurious one.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureTranslator {
    board_size: Coord,
    cell_size: f32,
    tolerance: f32,
    samples: Vec<Point>,
    visited: Vec<BoardCoord>,
    /// Last sample seen while still inside the last visited cell.
    anchor: Option<Point>,
}

impl GestureTranslator {
    pub fn new(board_size: Coord, frame_size: f32, tolerance: f32) -> Self {
        let mut translator = Self {
            board_size: 1,
            cell_size: 0.0,
            tolerance,
            samples: Vec::new(),
            visited: Vec::new(),
            anchor: None,
        };
        translator.set_layout(board_size, frame_size);
        translator
    }

    pub fn from_config(config: &GameConfig, frame_size: f32) -> Self {
        Self::new(config.board_size, frame_size, config.angle_tolerance)
    }

    /// Updates the board size and the rendered edge length of the square board frame, dropping any drag.
    pub fn set_layout(&mut self, board_size: Coord, frame_size: f32) {
        self.board_size = board_size.max(1);
        self.cell_size = frame_size / f32::from(self.board_size);
        self.reset();
        log::debug!(
            "Gesture layout: {} cells of {}px",
            self.board_size,
            self.cell_size
        );
    }

    pub fn is_dragging(&self) -> bool {
        !self.visited.is_empty()
    }

    /// Cells accepted so far in the current drag.
    pub fn visited(&self) -> &[BoardCoord] {
        &self.visited
    }

    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    /// Translates one pointer event. A start that arrives while a drag is still active ends that drag first, so
    /// the session never appends the new drag to an abandoned selection.
    pub fn handle(&mut self, event: PointerEvent) -> GestureEvents {
        let mut events = GestureEvents::new();
        match event.phase {
            PointerPhase::Start => {
                if self.is_dragging() && self.accepts(event.position) {
                    log::debug!("Drag restarted without an end, submitting the previous one");
                    events.extend(self.drag_end(event.position));
                }
                events.extend(self.drag_start(event.position));
            }
            PointerPhase::Move => events.extend(self.drag_move(event.position)),
            PointerPhase::End => events.extend(self.drag_end(event.position)),
        }
        events
    }

    fn drag_start(&mut self, position: Point) -> Option<Event> {
        if !self.accepts(position) {
            log::debug!("Ignoring drag start at {:?}", position);
            return None;
        }

        let cell = self.cell_at(position);
        self.reset();
        self.samples.push(position);
        self.visited.push(cell);
        self.anchor = Some(position);
        log::trace!("Drag started at {:?} in cell {}", position, cell);
        Some(Event::SelectLetter(cell))
    }

    fn drag_move(&mut self, position: Point) -> Option<Event> {
        let (Some(&last), Some(anchor)) = (self.visited.last(), self.anchor) else {
            log::trace!("Ignoring move without an active drag");
            return None;
        };
        if !position.is_finite() {
            log::trace!("Ignoring move to {:?}", position);
            return None;
        }
        self.samples.push(position);

        let cell = self.cell_at(position);
        if cell == last {
            self.anchor = Some(position);
            return None;
        }
        if self.visited.contains(&cell) {
            log::trace!("Ignoring revisit of {}", cell);
            return None;
        }
        if !last.is_adjacent(cell) {
            log::trace!("Ignoring jump from {} to {}", last, cell);
            return None;
        }

        let ideal = self.center_of(last).angle_to(self.center_of(cell));
        let traced = anchor.angle_to(position);
        let deviation = angle_between(ideal, traced);
        if deviation.is_nan() || deviation > self.tolerance {
            log::trace!(
                "Ignoring {} entered at {:.2} rad off the cell direction",
                cell,
                deviation
            );
            return None;
        }

        self.visited.push(cell);
        self.anchor = Some(position);
        Some(Event::SelectLetter(cell))
    }

    fn drag_end(&mut self, position: Point) -> Option<Event> {
        if !self.is_dragging() {
            return None;
        }

        log::trace!(
            "Drag ended at {:?} after {} samples, {} cells",
            position,
            self.samples.len(),
            self.visited.len()
        );
        self.reset();
        Some(Event::SubmitWord)
    }

    /// Cell under `position`, clamped to the board.
    pub fn cell_at(&self, position: Point) -> BoardCoord {
        let last = f32::from(self.board_size - 1);
        let axis = |value: f32| libm::floorf(value / self.cell_size).clamp(0.0, last) as Coord;
        BoardCoord::new(axis(position.y), axis(position.x))
    }

    fn center_of(&self, coords: BoardCoord) -> Point {
        Point::new(
            (f32::from(coords.col) + 0.5) * self.cell_size,
            (f32::from(coords.row) + 0.5) * self.cell_size,
        )
    }

    fn accepts(&self, position: Point) -> bool {
        self.cell_size.is_finite() && self.cell_size > 0.0 && position.is_finite()
    }

    fn reset(&mut self) {
        self.samples.clear();
        self.visited.clear();
        self.anchor = None;
    }
}
