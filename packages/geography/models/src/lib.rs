#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location scope and IBGE reference table types.
//!
//! These types describe *which* slice of the case dataset a dashboard
//! request is about: a single city, a single state, or the whole
//! country. The static state tables live in [`states`].

pub mod states;

use serde::{Deserialize, Serialize};

/// Display label for the nation-wide scope.
pub const NATION_LABEL: &str = "Brasil";

/// Fixed total population used for nation-scope per-100k rates.
///
/// National rates never sum per-state estimated populations — the
/// per-state records overlap administratively and would double count.
pub const NATION_POPULATION: i64 = 210_147_125;

/// The slice of the dataset a dashboard request is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "camelCase")]
pub enum LocationScope {
    /// A single municipality, by seven-digit IBGE code.
    City(u32),
    /// A single federative unit, by two-digit IBGE code.
    State(u32),
    /// The whole country, aggregated from per-state records.
    Nation,
}

impl LocationScope {
    /// Resolves a scope from the dashboard's dropdown selections: a city
    /// selection wins over a state selection, and no selection at all
    /// means the nation-wide view.
    #[must_use]
    pub const fn resolve(state_code: Option<u32>, city_code: Option<u32>) -> Self {
        match (city_code, state_code) {
            (Some(city), _) => Self::City(city),
            (None, Some(state)) => Self::State(state),
            (None, None) => Self::Nation,
        }
    }
}

/// A city row of the IBGE reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityEntry {
    /// Seven-digit IBGE municipality code.
    pub code: u32,
    /// Municipality name.
    pub name: String,
    /// Two-letter abbreviation of the parent state.
    pub state_abbr: String,
}

/// A single `(label, code)` dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOption {
    /// Human-readable label.
    pub label: String,
    /// IBGE code submitted back by the frontend.
    pub value: u32,
}
