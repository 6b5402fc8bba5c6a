//! Reference table updater.
//!
//! Fetches the most recent row of every city from the API and rewrites
//! the reference CSV the server and the dropdowns read at startup. The
//! file also carries the 27 federative units so it is self-contained.

use std::collections::BTreeMap;
use std::path::Path;

use covid_dashboard_geography::GeoTable;
use covid_dashboard_geography_models::states;
use covid_dashboard_source::{CaseSource, brasil_io::BrasilIoClient};
use covid_dashboard_source_models::CaseRow;
use serde::Serialize;

/// One row of the reference CSV.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    label: &'a str,
    value: u32,
    #[serde(rename = "type")]
    kind: &'a str,
    state: &'a str,
}

/// Rebuilds the reference CSV at `path`.
///
/// # Errors
///
/// Returns an error if the fetch fails or the file cannot be written.
pub async fn update(path: &Path, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let client = BrasilIoClient::from_env();

    log::info!("Fetching the latest city rows...");
    let rows = client.fetch_latest_cities().await?;
    let cities = city_entries(&rows);

    let existing = GeoTable::from_csv_path(path)
        .map(|table| table.city_count())
        .unwrap_or(0);
    println!(
        "Number of cities to be added: {}",
        cities.len().saturating_sub(existing)
    );

    if !yes
        && !dialoguer::Confirm::new()
            .with_prompt("Do you want to update?")
            .default(false)
            .interact()?
    {
        println!("Aborted.");
        return Ok(());
    }

    println!("Saving file...");
    write_csv(path, &cities)?;
    log::info!("Wrote {} cities to {}", cities.len(), path.display());
    Ok(())
}

/// Deduplicates usable city rows by IBGE code.
///
/// The dataset's "Importados/Indefinidos" tranche has no code and no
/// name; it can never be selected, so it is skipped.
fn city_entries(rows: &[CaseRow]) -> BTreeMap<u32, (String, String)> {
    let mut cities = BTreeMap::new();
    for row in rows {
        let (Some(code), Some(name)) = (row.city_ibge_code, row.city.as_deref()) else {
            log::debug!("Skipping codeless city row for state {}", row.state);
            continue;
        };
        cities.insert(code, (name.to_string(), row.state.to_uppercase()));
    }
    cities
}

/// Writes the state and city rows as `label,value,type,state`.
fn write_csv(path: &Path, cities: &BTreeMap<u32, (String, String)>) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    for &code in states::STATE_CODES {
        writer.serialize(CsvRow {
            label: states::state_name(code),
            value: code,
            kind: "state",
            state: states::state_abbr(code),
        })?;
    }
    for (&code, (name, state_abbr)) in cities {
        writer.serialize(CsvRow {
            label: name,
            value: code,
            kind: "city",
            state: state_abbr,
        })?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
