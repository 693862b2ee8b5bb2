//! Line protocol for driving the engine from other programs.
//!
//! The format follows GTP: one command per line, an optional numeric id in
//! front, and a reply of `=` (success) or `?` (failure) followed by the id
//! and the response text, terminated by a blank line. The engine always
//! plays Black; `play` takes White's move and answers with Black's reply.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `boardsize <n>` - Start over on an n×n board
//! - `clear_board` - Start over on the current size
//! - `play [white] <cell>` - White plays `<cell>`; Black's reply is returned
//! - `genmove` - Black plays without anything to answer
//! - `showboard` - Render the board
//! - `winner` - `black`, `white` or `none`
//! - `patterns` - The live pattern instances, one per line
//! - `quit`
//!
//! ## Example
//!
//! ```
//! use hex_patterns::protocol::ProtocolEngine;
//! use hex_patterns::session::EngineConfig;
//!
//! let mut engine = ProtocolEngine::new(EngineConfig::new(8).with_seed(1)).unwrap();
//! let mut out = Vec::new();
//! engine.run_with("1 name\nquit\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=1 hex-patterns\n\n= \n\n");
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{coord_to_label, label_to_coord};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::session::{EngineConfig, Session, SessionError};
use crate::win::Winner;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "patterns",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
    "winner",
];

pub struct ProtocolEngine {
    session: Session,
}

impl ProtocolEngine {
    pub fn new(config: EngineConfig) -> Result<Self, SessionError> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric id off the front of a line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match self.session.resize(size) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "clear_board" => match self.session.reset() {
                Ok(()) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "play" => {
                let label = match args {
                    [label] => label,
                    [color, label] if matches!(color.to_lowercase().as_str(), "w" | "white") => {
                        label
                    }
                    [_, _] => return (false, "only White moves can be played".to_string()),
                    _ => return (false, "expected: play [white] <cell>".to_string()),
                };
                let cell = match label_to_coord(&label.to_lowercase()) {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                match self.session.respond(cell) {
                    Ok(Some(reply)) => (true, coord_to_label(reply)),
                    Ok(None) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.session.genmove() {
                Ok(c) => (true, coord_to_label(c)),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => {
                let shown = format!("\n{}", self.session.board());
                (true, shown.trim_end().to_string())
            }

            "winner" => {
                let winner = match self.session.winner() {
                    Winner::BlackWins => "black",
                    Winner::WhiteWins => "white",
                    Winner::NoWinner => "none",
                };
                (true, winner.to_string())
            }

            "patterns" => {
                let lines: Vec<String> = self
                    .session
                    .live()
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
                (true, lines.join("\n"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
