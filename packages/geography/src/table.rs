//! The static IBGE reference table.
//!
//! The 27 federative units are compiled in ([`states`]); cities come
//! from a CSV maintained by the `update-geo` CLI tool. The CSV carries
//! `label,value,type,state` columns, where `value` is the IBGE code —
//! historical exports stored codes float-formatted (`4106902.0`), so the
//! parser tolerates a trailing `.0`.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use covid_dashboard_case_models::PlaceType;
use covid_dashboard_geography_models::{
    CityEntry, DropdownOption, LocationScope, NATION_LABEL, states,
};
use serde::Deserialize;

use crate::GeoError;

/// One raw row of the reference CSV.
#[derive(Debug, Deserialize)]
struct RawRow {
    label: String,
    value: String,
    #[serde(rename = "type")]
    kind: PlaceType,
    state: String,
}

/// The city reference table, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct GeoTable {
    cities: BTreeMap<u32, CityEntry>,
}

impl GeoTable {
    /// Loads the reference table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the file cannot be read or a row is
    /// malformed.
    pub fn from_csv_path(path: &Path) -> Result<Self, GeoError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        log::info!(
            "Loaded {} cities from reference table {}",
            table.city_count(),
            path.display()
        );
        Ok(table)
    }

    /// Loads the reference table from any CSV reader.
    ///
    /// State-type rows are ignored — the federative units are compiled
    /// into [`states`] and do not depend on the file.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the CSV cannot be parsed, a city code is
    /// not numeric, or a city references an unknown state abbreviation.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GeoError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut cities = BTreeMap::new();

        for row in csv_reader.deserialize() {
            let row: RawRow = row?;
            if row.kind == PlaceType::State {
                continue;
            }

            let code = parse_code(&row.value).ok_or_else(|| GeoError::Malformed {
                message: format!("city '{}' has non-numeric code '{}'", row.label, row.value),
            })?;
            let state_abbr = row.state.to_uppercase();
            if states::abbr_to_code(&state_abbr).is_none() {
                return Err(GeoError::Malformed {
                    message: format!("city '{}' references unknown state '{}'", row.label, row.state),
                });
            }

            cities.insert(
                code,
                CityEntry {
                    code,
                    name: row.label,
                    state_abbr,
                },
            );
        }

        Ok(Self { cities })
    }

    /// Number of cities in the table.
    #[must_use]
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Looks up a city by IBGE code.
    #[must_use]
    pub fn city(&self, code: u32) -> Option<&CityEntry> {
        self.cities.get(&code)
    }

    /// Resolves the display label for a scope: `"{city} ({UF})"` for
    /// cities, the state name for states, `"Brasil"` for the nation.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnknownLocationCode`] if the code is absent
    /// from the reference table.
    pub fn label_for(&self, scope: LocationScope) -> Result<String, GeoError> {
        match scope {
            LocationScope::City(code) => {
                let city = self
                    .city(code)
                    .ok_or(GeoError::UnknownLocationCode { code })?;
                Ok(format!("{} ({})", city.name, city.state_abbr))
            }
            LocationScope::State(code) => {
                let name = states::state_name(code);
                if name == "Unknown" {
                    return Err(GeoError::UnknownLocationCode { code });
                }
                Ok(name.to_string())
            }
            LocationScope::Nation => Ok(NATION_LABEL.to_string()),
        }
    }

    /// Dropdown options for the cities of one state, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnknownLocationCode`] if the state code is
    /// not a federative unit.
    pub fn city_options(&self, state_code: u32) -> Result<Vec<DropdownOption>, GeoError> {
        let abbr = states::state_abbr(state_code);
        if abbr == "??" {
            return Err(GeoError::UnknownLocationCode { code: state_code });
        }

        let mut options: Vec<DropdownOption> = self
            .cities
            .values()
            .filter(|city| city.state_abbr == abbr)
            .map(|city| DropdownOption {
                label: city.name.clone(),
                value: city.code,
            })
            .collect();
        options.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(options)
    }
}

/// Dropdown options for all 27 federative units, ordered by name.
#[must_use]
pub fn state_options() -> Vec<DropdownOption> {
    let mut options: Vec<DropdownOption> = states::STATE_CODES
        .iter()
        .map(|&code| DropdownOption {
            label: states::state_name(code).to_string(),
            value: code,
        })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

/// Parses an IBGE code, tolerating the float formatting of historical
/// CSV exports (`"4106902.0"`).
fn parse_code(value: &str) -> Option<u32> {
    value.strip_suffix(".0").unwrap_or(value).parse().ok()
}
