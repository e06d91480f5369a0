//! REPL commands and the session state they act on
//!
//! Each command is a variant of [`Command`]; [`Session::execute`] runs one
//! against the shared client, the page cursors, and the Pokedex.

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::debug;

use crate::capture::{attempt_catch, CaughtPokemon, Pokedex};
use crate::data::{FetchError, LocationAreaPage, PokeClient};

/// Error types for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command needs a name argument and none was given
    #[error("{0} needs a name, e.g. `{0} pikachu`")]
    MissingArgument(&'static str),

    /// Fetching from the API failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Writing to the output failed
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// What the REPL should do after a command finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Every command, in the order `help` lists them
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// The word typed to invoke this command
    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next 20 location areas",
            Command::MapBack => "Displays the previous 20 location areas",
            Command::Explore => "Lists the Pokemon found in a location area",
            Command::Catch => "Throws a Pokeball at a Pokemon",
            Command::Inspect => "Shows details of a caught Pokemon",
            Command::Pokedex => "Lists all caught Pokemon",
        }
    }

    /// Looks up a command by the word the user typed
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

/// Lowercases a line and splits it into words
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// State shared across commands for one REPL run
pub struct Session {
    client: PokeClient,
    pokedex: Pokedex,
    next: Option<String>,
    previous: Option<String>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a specific RNG for capture rolls
    pub fn with_rng(client: PokeClient, rng: StdRng) -> Self {
        Self {
            client,
            pokedex: Pokedex::new(),
            next: None,
            previous: None,
            rng,
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// URL `map` will fetch next, if the API reported one
    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// URL `mapb` will fetch next, if the API reported one
    pub fn previous_page(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Runs `command` with an optional first argument, writing results to `out`
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        arg: Option<&str>,
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        debug!(command = command.name(), arg, "executing command");

        match command {
            Command::Help => {
                writeln!(out, "Welcome to the Pokedex!")?;
                writeln!(out, "Usage:")?;
                writeln!(out)?;
                for command in Command::ALL {
                    writeln!(out, "{}: {}", command.name(), command.description())?;
                }
            }
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => {
                let cursor = self.next.clone();
                self.show_page(cursor, out).await?;
            }
            Command::MapBack => {
                let cursor = self.previous.clone();
                self.show_page(cursor, out).await?;
            }
            Command::Explore => {
                let name = require_name(command, arg)?;
                writeln!(out, "Exploring {}...", name)?;
                let area = self.client.location_area(name).await?;
                writeln!(out, "Found Pokemon:")?;
                for encounter in &area.pokemon_encounters {
                    writeln!(out, " - {}", encounter.pokemon.name)?;
                }
            }
            Command::Catch => {
                let name = require_name(command, arg)?;
                writeln!(out, "Throwing a Pokeball at {}...", name)?;
                let pokemon = self.client.pokemon(name).await?;
                let base_experience = pokemon.base_experience.unwrap_or(0);
                if attempt_catch(&mut self.rng, base_experience) {
                    writeln!(out, "{} was caught!", name)?;
                    writeln!(out, "You may now inspect it with the inspect command.")?;
                    self.pokedex.add(CaughtPokemon::from(&pokemon));
                } else {
                    writeln!(out, "{} escaped!", name)?;
                }
            }
            Command::Inspect => {
                let name = require_name(command, arg)?;
                let Some(pokemon) = self.pokedex.get(name) else {
                    writeln!(out, "you have not caught that pokemon")?;
                    return Ok(Flow::Continue);
                };
                writeln!(out, "Name: {}", pokemon.name)?;
                writeln!(out, "Height: {}", pokemon.height)?;
                writeln!(out, "Weight: {}", pokemon.weight)?;
                if !pokemon.stats.is_empty() {
                    writeln!(out, "Stats:")?;
                    for stat in &pokemon.stats {
                        writeln!(out, "  -{}: {}", stat.name, stat.value)?;
                    }
                }
                if !pokemon.types.is_empty() {
                    writeln!(out, "Types:")?;
                    for kind in &pokemon.types {
                        writeln!(out, "  - {}", kind)?;
                    }
                }
            }
            Command::Pokedex => {
                if self.pokedex.is_empty() {
                    writeln!(out, "Pokedex is empty!")?;
                } else {
                    writeln!(out, "Your Pokedex:")?;
                    for pokemon in self.pokedex.iter() {
                        writeln!(out, "  - {}", pokemon.name)?;
                    }
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Fetches a location-area page, prints it, and moves the cursors
    ///
    /// A missing cursor falls back to the first page.
    async fn show_page<W: Write>(&mut self, cursor: Option<String>, out: &mut W) -> Result<(), CommandError> {
        let page: LocationAreaPage = self.client.location_areas(cursor.as_deref()).await?;
        self.next = page.next;
        self.previous = page.previous;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }
}

fn require_name(command: Command, arg: Option<&str>) -> Result<&str, CommandError> {
    arg.filter(|name| !name.is_empty())
        .ok_or(CommandError::MissingArgument(command.name()))
}
