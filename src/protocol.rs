//! Line-based text protocol for driving the engine from a front end.
//!
//! The protocol follows the shape of the Go Text Protocol: one command per
//! line, an optional numeric id, and a response of `=[id] message` on success
//! or `?[id] message` on failure, terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - only 24 is accepted
//! - `clear_board` - reset to the empty board, White to move
//! - `opening [vertex]` - place the neutral first White peg (random near the
//!   centre if no vertex is given); Black moves next
//! - `play <color> <vertex>` - place a peg for the given color
//! - `genmove <color>` - search, play and print a move for the given color
//! - `difficulty <easy|medium|hard|iterations>` - set the search budget
//! - `winner` - `white`, `black` or `none`
//! - `showboard` - print the board
//!
//! Vertices are a column letter `A`-`X` followed by a row number `1`-`24`,
//! e.g. `L12`.
//!
//! ## Example
//!
//! ```ignore
//! use across_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;

use crate::config::{Budget, SearchConfig};
use crate::constants::N;
use crate::mcts::search_move;
use crate::position::{
    Player, Position, empty_position, parse_coord, play_move, play_opening, random_opening,
    str_coord, winner,
};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "difficulty",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "opening",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
    "winner",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game position
    pos: Position,
    /// Search settings used by `genmove`
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create a new engine with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default(), fastrand::Rng::new())
    }

    /// Create a new engine with explicit search settings and random source.
    pub fn with_config(config: SearchConfig, rng: fastrand::Rng) -> Self {
        Self {
            pos: Position::new(),
            config,
            rng,
        }
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on arbitrary streams until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            log::debug!("command: {command} {args:?}");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")
                .and_then(|_| output.flush())
                .context("failed to write response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
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

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "across-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<i32>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {N} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                empty_position(&mut self.pos);
                (true, String::new())
            }

            "opening" => {
                let pt = match args.first() {
                    Some(v) => match parse_coord(v) {
                        Some(pt) => pt,
                        None => return (false, format!("invalid vertex '{v}'")),
                    },
                    None => random_opening(&mut self.rng),
                };
                match play_opening(&mut self.pos, pt) {
                    Ok(()) => (true, str_coord(pt)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "difficulty" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<Budget>() {
                    Ok(Budget(n)) => {
                        self.config.iterations = n;
                        (true, n.to_string())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Player::parse(args[0]) else {
                    return (false, format!("invalid color '{}'", args[0]));
                };
                let Some(pt) = parse_coord(args[1]) else {
                    return (false, format!("invalid vertex '{}'", args[1]));
                };
                if let Some(w) = winner(&self.pos) {
                    return (false, format!("game is over, {w} won"));
                }

                let prev = self.pos.to_move;
                self.pos.to_move = color;
                match play_move(&mut self.pos, pt) {
                    Ok(links) => {
                        log::debug!("{color} {} formed {} links", str_coord(pt), links.len());
                        (true, String::new())
                    }
                    Err(e) => {
                        self.pos.to_move = prev;
                        (false, e.to_string())
                    }
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| Player::parse(a)) else {
                    return (false, "missing or invalid color".to_string());
                };
                if let Some(w) = winner(&self.pos) {
                    return (false, format!("game is over, {w} won"));
                }

                let prev = self.pos.to_move;
                self.pos.to_move = color;
                let Some(pt) = search_move(&self.pos, &self.config, color, &mut self.rng) else {
                    self.pos.to_move = prev;
                    return (true, "none".to_string());
                };
                match play_move(&mut self.pos, pt) {
                    Ok(_) => {
                        log::info!("{color} plays {}", str_coord(pt));
                        (true, str_coord(pt))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "winner" => match winner(&self.pos) {
                Some(w) => (true, w.to_string()),
                None => (true, "none".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.pos)),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
