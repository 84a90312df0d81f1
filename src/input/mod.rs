//! Pointer input
//!
//! The driver binary reads a small line protocol:
//!
//! ```text
//! down <x> <y>
//! move <x> <y>
//! up
//! cancel
//! wait <milliseconds>
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::time::Duration;

use thiserror::Error;

use crate::gesture::Point;

/// Raw pointer event on the dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
}

/// One parsed line of the input script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputLine {
    Pointer(PointerEvent),
    /// Pause the script, used to hold a press
    Wait(Duration),
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown pointer command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected} argument(s), got {found}")]
    Arity {
        command: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid coordinate `{0}`")]
    Coordinate(String),
    #[error("invalid wait duration `{0}`")]
    Wait(String),
}

/// Parse one protocol line; `Ok(None)` for blank and comment lines
pub fn parse_line(line: &str) -> Result<Option<InputLine>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let parsed = match command.as_str() {
        "down" => InputLine::Pointer(PointerEvent::Down(parse_point(&command, &args)?)),
        "move" => InputLine::Pointer(PointerEvent::Move(parse_point(&command, &args)?)),
        "up" => {
            expect_arity(&command, &args, 0)?;
            InputLine::Pointer(PointerEvent::Up)
        }
        "cancel" => {
            expect_arity(&command, &args, 0)?;
            InputLine::Pointer(PointerEvent::Cancel)
        }
        "wait" => {
            expect_arity(&command, &args, 1)?;
            let millis = args[0]
                .parse::<u64>()
                .map_err(|_| InputError::Wait(args[0].to_string()))?;
            InputLine::Wait(Duration::from_millis(millis))
        }
        _ => return Err(InputError::UnknownCommand(command)),
    };

    Ok(Some(parsed))
}

fn expect_arity(command: &str, args: &[&str], expected: usize) -> Result<(), InputError> {
    if args.len() != expected {
        return Err(InputError::Arity {
            command: command.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_point(command: &str, args: &[&str]) -> Result<Point, InputError> {
    expect_arity(command, args, 2)?;
    let coordinate = |raw: &str| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| InputError::Coordinate(raw.to_string()))
    };
    Ok(Point::new(coordinate(args[0])?, coordinate(args[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let pointer = |event: PointerEvent| -> Result<Option<InputLine>, InputError> {
            Ok(Some(InputLine::Pointer(event)))
        };
        assert_eq!(parse_line("down 10 20.5"), pointer(PointerEvent::Down(Point::new(10.0, 20.5))));
        assert_eq!(parse_line("  MOVE -3 4 "), pointer(PointerEvent::Move(Point::new(-3.0, 4.0))));
        assert_eq!(parse_line("up"), pointer(PointerEvent::Up));
        assert_eq!(parse_line("cancel"), pointer(PointerEvent::Cancel));
        assert_eq!(parse_line("wait 850"), Ok(Some(InputLine::Wait(Duration::from_millis(850)))));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# hold for a reset"), Ok(None));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_line("press 1 2"), Err(InputError::UnknownCommand("press".to_string())));
        assert_eq!(
            parse_line("down 1"),
            Err(InputError::Arity { command: "down".to_string(), expected: 2, found: 1 })
        );
        assert_eq!(
            parse_line("up now"),
            Err(InputError::Arity { command: "up".to_string(), expected: 0, found: 1 })
        );
        assert_eq!(parse_line("move x 2"), Err(InputError::Coordinate("x".to_string())));
        assert_eq!(parse_line("move NaN 2"), Err(InputError::Coordinate("NaN".to_string())));
        assert_eq!(parse_line("wait -5"), Err(InputError::Wait("-5".to_string())));
    }
}
