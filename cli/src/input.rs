use anyhow::{Context, Result, bail};
use lexigrid_core as game;

/// One line typed during `play`.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    NewRound,
    Rotate,
    Quit,
    Help,
    /// Display cells to select in order, then submit.
    Path(Vec<game::BoardCoord>),
    /// Pixel positions of a drag, from press to release.
    Drag(Vec<game::Point>),
}

pub const HELP: &str = "\
commands:
  <row>,<col> <row>,<col> ...   select cells (as displayed) and submit
  drag <x>,<y> <x>,<y> ...      swipe through pixel positions and submit
  r | rotate                    rotate the board a quarter turn
  n | new                       start a new round
  q | quit                      leave";

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    Ok(match line {
        "n" | "new" => Command::NewRound,
        "r" | "rotate" => Command::Rotate,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "h" | "help" => Command::Help,
        _ => {
            if let Some(rest) = line.strip_prefix("drag") {
                let points = parse_pairs(rest, |x: f32, y: f32| game::Point::new(x, y))?;
                Command::Drag(points)
            } else {
                let path = parse_pairs(line, |row, col| game::BoardCoord::new(row, col))?;
                Command::Path(path)
            }
        }
    })
}

fn parse_pairs<T, U, F>(text: &str, make: F) -> Result<Vec<U>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(T, T) -> U,
{
    let items = text
        .split_whitespace()
        .map(|pair| {
            let (a, b) = pair
                .split_once(',')
                .with_context(|| format!("expected a,b but got {:?}", pair))?;
            let a = a.parse().with_context(|| format!("bad number in {:?}", pair))?;
            let b = b.parse().with_context(|| format!("bad number in {:?}", pair))?;
            Ok(make(a, b))
        })
        .collect::<Result<Vec<_>>>()?;
    if items.is_empty() {
        bail!("nothing to do, type help for commands");
    }
    Ok(items)
}

/// Pointer events for a drag through `points`: press on the first, release on the last.
pub fn drag_events(points: &[game::Point]) -> Vec<game::PointerEvent> {
    let mut events = Vec::with_capacity(points.len() + 1);
    if let Some((first, rest)) = points.split_first() {
        events.push(game::PointerEvent::start(first.x, first.y));
        events.extend(rest.iter().map(|p| game::PointerEvent::moved(p.x, p.y)));
        let last = points.last().unwrap_or(first);
        events.push(game::PointerEvent::end(last.x, last.y));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(parse_command(" n ").unwrap(), Command::NewRound);
        assert_eq!(parse_command("rotate").unwrap(), Command::Rotate);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn coordinate_paths() {
        assert_eq!(
            parse_command("0,0 0,1 1,2").unwrap(),
            Command::Path(vec![
                game::BoardCoord::new(0, 0),
                game::BoardCoord::new(0, 1),
                game::BoardCoord::new(1, 2),
            ])
        );
        assert!(parse_command("0;0").is_err());
        assert!(parse_command("0,-1").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn drags_become_pointer_events() {
        let Command::Drag(points) = parse_command("drag 50,50 150,50.5").unwrap() else {
            panic!("expected a drag");
        };
        let events = drag_events(&points);
        assert_eq!(
            events,
            vec![
                game::PointerEvent::start(50.0, 50.0),
                game::PointerEvent::moved(150.0, 50.5),
                game::PointerEvent::end(150.0, 50.5),
            ]
        );
        assert!(drag_events(&[]).is_empty());
    }
}
