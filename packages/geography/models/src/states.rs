//! Brazilian federative unit code utilities.
//!
//! Provides mappings between two-digit IBGE state codes, two-letter
//! state abbreviations, and full state names for the 26 states + the
//! Federal District.

/// IBGE codes for the 26 Brazilian states + the Federal District.
pub const STATE_CODES: &[u32] = &[
    11, 12, 13, 14, 15, 16, 17, 21, 22, 23, 24, 25, 26, 27, 28, 29, 31, 32, 33, 35, 41, 42, 43,
    50, 51, 52, 53,
];

/// Maps a two-digit IBGE code to the corresponding two-letter state
/// abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub const fn state_abbr(code: u32) -> &'static str {
    match code {
        11 => "RO",
        12 => "AC",
        13 => "AM",
        14 => "RR",
        15 => "PA",
        16 => "AP",
        17 => "TO",
        21 => "MA",
        22 => "PI",
        23 => "CE",
        24 => "RN",
        25 => "PB",
        26 => "PE",
        27 => "AL",
        28 => "SE",
        29 => "BA",
        31 => "MG",
        32 => "ES",
        33 => "RJ",
        35 => "SP",
        41 => "PR",
        42 => "SC",
        43 => "RS",
        50 => "MS",
        51 => "MT",
        52 => "GO",
        53 => "DF",
        _ => "??",
    }
}

/// Maps a two-digit IBGE code to the full state name.
///
/// Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub const fn state_name(code: u32) -> &'static str {
    match code {
        11 => "Rondônia",
        12 => "Acre",
        13 => "Amazonas",
        14 => "Roraima",
        15 => "Pará",
        16 => "Amapá",
        17 => "Tocantins",
        21 => "Maranhão",
        22 => "Piauí",
        23 => "Ceará",
        24 => "Rio Grande do Norte",
        25 => "Paraíba",
        26 => "Pernambuco",
        27 => "Alagoas",
        28 => "Sergipe",
        29 => "Bahia",
        31 => "Minas Gerais",
        32 => "Espírito Santo",
        33 => "Rio de Janeiro",
        35 => "São Paulo",
        41 => "Paraná",
        42 => "Santa Catarina",
        43 => "Rio Grande do Sul",
        50 => "Mato Grosso do Sul",
        51 => "Mato Grosso",
        52 => "Goiás",
        53 => "Distrito Federal",
        _ => "Unknown",
    }
}

/// Maps a two-letter state abbreviation to the corresponding IBGE code.
///
/// Returns `None` for unrecognized abbreviations.
#[must_use]
pub fn abbr_to_code(abbr: &str) -> Option<u32> {
    match abbr.to_uppercase().as_str() {
        "RO" => Some(11),
        "AC" => Some(12),
        "AM" => Some(13),
        "RR" => Some(14),
        "PA" => Some(15),
        "AP" => Some(16),
        "TO" => Some(17),
        "MA" => Some(21),
        "PI" => Some(22),
        "CE" => Some(23),
        "RN" => Some(24),
        "PB" => Some(25),
        "PE" => Some(26),
        "AL" => Some(27),
        "SE" => Some(28),
        "BA" => Some(29),
        "MG" => Some(31),
        "ES" => Some(32),
        "RJ" => Some(33),
        "SP" => Some(35),
        "PR" => Some(41),
        "SC" => Some(42),
        "RS" => Some(43),
        "MS" => Some(50),
        "MT" => Some(51),
        "GO" => Some(52),
        "DF" => Some(53),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(STATE_CODES.len(), 27);
    }

    #[test]
    fn abbr_roundtrip() {
        for code in STATE_CODES {
            let abbr = state_abbr(*code);
            assert_ne!(abbr, "??", "unknown IBGE code: {code}");
            assert_eq!(
                abbr_to_code(abbr),
                Some(*code),
                "roundtrip failed for {code} -> {abbr}"
            );
        }
    }

    #[test]
    fn name_coverage() {
        for code in STATE_CODES {
            assert_ne!(state_name(*code), "Unknown", "no name for IBGE code: {code}");
        }
    }

    #[test]
    fn unknown_code() {
        assert_eq!(state_abbr(99), "??");
        assert_eq!(state_name(99), "Unknown");
        assert_eq!(abbr_to_code("XX"), None);
    }

    #[test]
    fn case_insensitive_abbr_to_code() {
        assert_eq!(abbr_to_code("sp"), Some(35));
        assert_eq!(abbr_to_code("Sp"), Some(35));
        assert_eq!(abbr_to_code("SP"), Some(35));
    }
}
