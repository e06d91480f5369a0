//! Capture rolls and the Pokedex of caught Pokemon

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::data::Pokemon;

/// Percentage chance of catching a Pokemon with the given base experience
///
/// Stronger Pokemon are harder to catch; anything above 300 experience has
/// no chance at all.
pub fn catch_chance(base_experience: u32) -> i64 {
    100 - i64::from(base_experience) / 3
}

/// Rolls a d100 against [`catch_chance`]
pub fn attempt_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    let roll: i64 = rng.gen_range(0..100);
    roll < catch_chance(base_experience)
}

/// Stat summary kept for a caught Pokemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtStat {
    pub name: String,
    pub value: u32,
}

/// A Pokemon recorded in the Pokedex
#[derive(Debug, Clone, PartialEq)]
pub struct CaughtPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub stats: Vec<CaughtStat>,
    pub types: Vec<String>,
    pub caught_at: DateTime<Utc>,
}

impl From<&Pokemon> for CaughtPokemon {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            height: pokemon.height,
            weight: pokemon.weight,
            stats: pokemon
                .stats
                .iter()
                .map(|s| CaughtStat {
                    name: s.stat.name.clone(),
                    value: s.base_stat,
                })
                .collect(),
            types: pokemon.types.iter().map(|t| t.kind.name.clone()).collect(),
            caught_at: Utc::now(),
        }
    }
}

/// The user's caught Pokemon, keyed by name
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch; catching the same Pokemon again replaces the old record
    pub fn add(&mut self, pokemon: CaughtPokemon) {
        self.entries.insert(pokemon.name.clone(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    /// Caught Pokemon in name order
    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
