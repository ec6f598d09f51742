//! Script parsing
//!
//! One command per line. Blank lines and `#` comments are skipped:
//!
//! ```text
//! # hover with a 200ms show delay
//! enter
//! wait 250
//! leave
//! ```

use std::fmt;

use overlay_trigger::{Placement, TriggerSignal};

use crate::SimError;

/// A single simulator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Interaction on the trigger element
    Signal(TriggerSignal),
    Show,
    Hide,
    Close,
    /// Advance the simulated clock
    Wait(u64),
    /// Re-render: anchors are cleared, then attached again
    Render,
    /// Re-render without the anchors coming back
    Detach,
    Disable,
    Enable,
    /// Change the caller-owned flag (bound runs only)
    External(bool),
    Update,
    ForceUpdate,
    Placement(Placement),
    Destroy,
    Unmount,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Signal(TriggerSignal::Click) => write!(f, "click"),
            Command::Signal(TriggerSignal::PointerEnter) => write!(f, "enter"),
            Command::Signal(TriggerSignal::PointerLeave) => write!(f, "leave"),
            Command::Signal(TriggerSignal::Focus) => write!(f, "focus"),
            Command::Signal(TriggerSignal::Blur) => write!(f, "blur"),
            Command::Show => write!(f, "show"),
            Command::Hide => write!(f, "hide"),
            Command::Close => write!(f, "close"),
            Command::Wait(ms) => write!(f, "wait {}", ms),
            Command::Render => write!(f, "render"),
            Command::Detach => write!(f, "detach"),
            Command::Disable => write!(f, "disable"),
            Command::Enable => write!(f, "enable"),
            Command::External(on) => write!(f, "external {}", if *on { "on" } else { "off" }),
            Command::Update => write!(f, "update"),
            Command::ForceUpdate => write!(f, "force-update"),
            Command::Placement(placement) => write!(f, "placement {}", placement),
            Command::Destroy => write!(f, "destroy"),
            Command::Unmount => write!(f, "unmount"),
        }
    }
}

/// A parsed command with its source line number (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// Parse a whole script, stopping at the first bad line
pub fn parse_script(source: &str) -> Result<Vec<Step>, SimError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_line(line, text)?;
        steps.push(Step { line, command });
    }
    Ok(steps)
}

fn parse_line(line: usize, text: &str) -> Result<Command, SimError> {
    let mut words = text.split_whitespace();
    let name = words.next().unwrap_or_default();
    let argument = words.next();
    if let Some(extra) = words.next() {
        return Err(SimError::TrailingInput {
            line,
            rest: extra.to_string(),
        });
    }

    let command = match name {
        "click" => Command::Signal(TriggerSignal::Click),
        "enter" => Command::Signal(TriggerSignal::PointerEnter),
        "leave" => Command::Signal(TriggerSignal::PointerLeave),
        "focus" => Command::Signal(TriggerSignal::Focus),
        "blur" => Command::Signal(TriggerSignal::Blur),
        "show" => Command::Show,
        "hide" => Command::Hide,
        "close" => Command::Close,
        "render" => Command::Render,
        "detach" => Command::Detach,
        "disable" => Command::Disable,
        "enable" => Command::Enable,
        "update" => Command::Update,
        "force-update" => Command::ForceUpdate,
        "destroy" => Command::Destroy,
        "unmount" => Command::Unmount,
        "wait" => {
            let value = required(line, "wait", "a duration in milliseconds", argument)?;
            let ms = value.parse().map_err(|_| SimError::InvalidArgument {
                line,
                command: "wait",
                value: value.to_string(),
            })?;
            return Ok(Command::Wait(ms));
        }
        "external" => {
            let value = required(line, "external", "on or off", argument)?;
            let on = match value {
                "on" => true,
                "off" => false,
                other => {
                    return Err(SimError::InvalidArgument {
                        line,
                        command: "external",
                        value: other.to_string(),
                    })
                }
            };
            return Ok(Command::External(on));
        }
        "placement" => {
            let value = required(line, "placement", "a placement name", argument)?;
            let placement = value.parse().map_err(|_| SimError::InvalidArgument {
                line,
                command: "placement",
                value: value.to_string(),
            })?;
            return Ok(Command::Placement(placement));
        }
        other => {
            return Err(SimError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    match argument {
        Some(extra) => Err(SimError::TrailingInput {
            line,
            rest: extra.to_string(),
        }),
        None => Ok(command),
    }
}

fn required<'a>(
    line: usize,
    command: &'static str,
    expected: &'static str,
    argument: Option<&'a str>,
) -> Result<&'a str, SimError> {
    argument.ok_or(SimError::MissingArgument {
        line,
        command,
        expected,
    })
}
