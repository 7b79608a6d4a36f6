use lexigrid_core as game;
use std::fmt::Write;

/// The board as the player sees it under the current rotation, selected cells in brackets.
pub fn board_view(state: &game::SessionState) -> String {
    let Some(board) = state.board() else {
        return String::new();
    };
    let display = board.rotated_coordinates(state.rotation());
    let flashing = state.flash().map_or(&[][..], |flash| flash.cells.as_slice());

    let mut out = String::new();
    for row in display.rows() {
        for (i, &coords) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let letter = board[coords];
            if flashing.contains(&coords) {
                let _ = write!(out, "*{}*", letter);
            } else if state.selected_cells().contains(&coords) {
                let _ = write!(out, "[{}]", letter);
            } else {
                let _ = write!(out, " {} ", letter);
            }
        }
        out.push('\n');
    }
    out
}

pub fn status_line(state: &game::SessionState) -> String {
    let flash = state
        .flash()
        .map(|flash| format!(" {:?}", flash.result).to_lowercase())
        .unwrap_or_default();
    format!(
        "words {}/{}  score {}/{}  time {}s  rotation {}{}",
        state.found_words().len(),
        state.possible_word_count(),
        state.score(),
        state.possible_score(),
        state.time_remaining(),
        state.rotation().degrees(),
        flash
    )
}

pub fn summary(state: &game::SessionState) -> String {
    let found = if state.found_words().is_empty() {
        "No words found".to_string()
    } else {
        state.found_words().join(" ")
    };
    format!(
        "Game over\n{}\nfound: {}\nremaining: {}\n",
        status_line(state),
        found,
        state.remaining_words().join(" ")
    )
}
