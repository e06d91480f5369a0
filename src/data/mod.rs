//! Core data models for the Pokedex CLI
//!
//! This module contains the PokeAPI response shapes the application decodes,
//! and the cached HTTP client that fetches them.

pub mod client;

pub use client::{ClientConfig, FetchError, PokeClient};

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another PokeAPI resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages
    #[serde(default)]
    pub count: u32,
    /// URL of the following page, if any
    pub next: Option<String>,
    /// URL of the preceding page, if any
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area and the Pokemon that can be encountered there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// A Pokemon as returned by the `/pokemon/{name}` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Experience gained for defeating this Pokemon; drives the capture roll.
    /// Null for some alternate forms.
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

/// A base stat value such as `hp` or `speed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

/// One of the elemental types a Pokemon has
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
