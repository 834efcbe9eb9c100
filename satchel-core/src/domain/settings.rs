//! User settings domain model
//!
//! One settings object per data directory, persisted as its own JSON blob
//! next to the records. Every field carries a serde default so loading an
//! older or partial blob merges missing keys instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display preferences for the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub monthly_report: bool,
    #[serde(default)]
    pub display_name: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            currency: Currency::Usd,
            language: default_language(),
            monthly_report: false,
            display_name: String::new(),
        }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// The fixed display-currency set. Rates and rendering conventions live in
/// the formatting module; the base unit for stored amounts is USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            "INR" => Ok(Currency::Inr),
            other => Err(format!("Unknown currency: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.language, "en");
        assert!(!settings.monthly_report);
        assert!(settings.display_name.is_empty());
    }

    #[test]
    fn test_partial_blob_merges_defaults() {
        // Old blobs may carry only a subset of keys
        let settings: Settings = serde_json::from_str(r#"{"currency":"EUR"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn test_currency_parse_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"monthlyReport\""));
        assert!(json.contains("\"displayName\""));
        assert!(json.contains("\"USD\""));
    }
}
