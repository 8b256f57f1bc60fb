// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use serde::{Deserialize, Serialize};

/// One selectable entry of an autocomplete list.
///
/// `label` is what the user sees, `value` is what gets sent to the
/// prediction endpoint. Airports carry their IATA `code`; carriers don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl OptionRecord {
    pub fn new(label: &str, value: &str, code: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            code: code.map(|c| c.to_string()),
        }
    }
}

/// Shape of `frontend_options.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OptionCatalog {
    pub airports: Vec<OptionRecord>,
    pub carriers: Vec<OptionRecord>,
}

impl OptionCatalog {
    /// Built-in catalog used whenever the data resource cannot be loaded.
    pub fn fallback() -> Self {
        let airport = |code: &str, name: &str| {
            OptionRecord::new(&format!("{} - {}", code, name), name, Some(code))
        };
        let carrier = |iata: &str, name: &str| {
            OptionRecord::new(&format!("{} - {}", iata, name), name, None)
        };

        Self {
            airports: vec![
                airport("ATL", "Atlanta Municipal"),
                airport("JFK", "John F. Kennedy International"),
                airport("LAX", "Los Angeles International"),
                airport("ORD", "Chicago O'Hare International"),
                airport("MIA", "Miami International"),
                airport("SFO", "San Francisco International"),
            ],
            carriers: vec![
                carrier("AA", "American Airlines Inc."),
                carrier("DL", "Delta Air Lines Inc."),
                carrier("WN", "Southwest Airlines Co."),
                carrier("UA", "United Air Lines Inc."),
                carrier("B6", "JetBlue Airways"),
            ],
        }
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let catalog = OptionCatalog::fallback();
        assert_eq!(catalog.airports.len(), 6);
        assert_eq!(catalog.carriers.len(), 5);

        let atl = &catalog.airports[0];
        assert_eq!(atl.label, "ATL - Atlanta Municipal");
        assert_eq!(atl.value, "Atlanta Municipal");
        assert_eq!(atl.code.as_deref(), Some("ATL"));

        assert!(catalog.carriers.iter().all(|c| c.code.is_none()));
        assert_eq!(catalog.carriers[4].label, "B6 - JetBlue Airways");
    }

    #[test]
    fn test_code_is_optional_in_json() {
        let json = r#"{
            "airports": [{"label": "DEN - Denver", "value": "Denver", "code": "DEN"}],
            "carriers": [{"label": "AS - Alaska Airlines", "value": "Alaska Airlines Inc."}]
        }"#;
        let catalog = OptionCatalog::from_json(json).unwrap();
        assert_eq!(catalog.airports[0].code.as_deref(), Some("DEN"));
        assert_eq!(catalog.carriers[0].code, None);
    }

    #[test]
    fn test_missing_list_is_an_error() {
        assert!(OptionCatalog::from_json(r#"{"airports": []}"#).is_err());
    }
}
