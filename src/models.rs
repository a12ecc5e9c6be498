//! Sales transaction model and the fixed name enumerations it draws from

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unknown name passed where one of the fixed enumerations was expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseNameError {}

/// Declares a closed set of display names.
///
/// Variants are listed in name order so the derived `Ord` sorts by display name.
/// Parsing accepts the display name or the variant identifier, ignoring ASCII case.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn ident(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ParseNameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(wanted) || v.ident().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseNameError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

named_enum! {
    /// Sales team member credited with a transaction
    Salesperson, "salesperson" {
        AnaSilva => "Ana Silva",
        CarlaSouza => "Carla Souza",
        JoaoSantos => "João Santos",
        MariaCosta => "Maria Costa",
        PedroOliveira => "Pedro Oliveira",
    }
}

named_enum! {
    /// Catalog item sold
    Product, "product" {
        Headset => "Headset",
        Keyboard => "Keyboard",
        Monitor => "Monitor",
        Mouse => "Mouse",
        Notebook => "Notebook",
        Webcam => "Webcam",
    }
}

named_enum! {
    /// Sales region
    Region, "region" {
        Center => "Center",
        East => "East",
        North => "North",
        South => "South",
        West => "West",
    }
}

/// One sale line. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Position in the table it was generated into
    pub id: usize,
    pub date: NaiveDate,
    pub salesperson: Salesperson,
    pub product: Product,
    pub region: Region,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub seller_bonus: f64,
}

/// Round a monetary amount to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_name() {
        assert_eq!("Ana Silva".parse::<Salesperson>().unwrap(), Salesperson::AnaSilva);
        assert_eq!("north".parse::<Region>().unwrap(), Region::North);
        assert_eq!(" Notebook ".parse::<Product>().unwrap(), Product::Notebook);
    }

    #[test]
    fn test_parse_variant_ident() {
        assert_eq!("JoaoSantos".parse::<Salesperson>().unwrap(), Salesperson::JoaoSantos);
        assert_eq!("joaosantos".parse::<Salesperson>().unwrap(), Salesperson::JoaoSantos);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Atlantis".parse::<Region>().unwrap_err();
        assert_eq!(err.kind, "region");
        assert_eq!(err.to_string(), "unknown region: 'Atlantis'");
    }

    #[test]
    fn test_order_follows_names() {
        for all in [
            Salesperson::ALL.iter().map(|s| s.name()).collect::<Vec<_>>(),
            Product::ALL.iter().map(|p| p.name()).collect::<Vec<_>>(),
            Region::ALL.iter().map(|r| r.name()).collect::<Vec<_>>(),
        ] {
            let mut sorted = all.clone();
            sorted.sort();
            assert_eq!(all, sorted);
        }
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Salesperson::JoaoSantos).unwrap();
        assert_eq!(json, "\"João Santos\"");
        let back: Salesperson = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Salesperson::JoaoSantos);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(0.004), 0.0);
    }
}
