//! Display currencies and their static rates against the base currency.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency every stored amount is expressed in.
pub const BASE_CURRENCY: &str = "INR";

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn base() -> Self {
        Self::new(BASE_CURRENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Multiplier that turns a base-currency amount into `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub code: CurrencyCode,
    pub rate: f64,
}

impl CurrencyRate {
    pub fn new(code: impl Into<String>, rate: f64) -> Self {
        Self {
            code: CurrencyCode::new(code),
            rate,
        }
    }

    pub fn parity() -> Self {
        Self::new(BASE_CURRENCY, 1.0)
    }
}

/// Static lookup table of display currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    rates: Vec<CurrencyRate>,
}

impl CurrencyTable {
    /// The fixed rates shipped with the tracker.
    pub fn standard() -> Self {
        Self {
            rates: vec![
                CurrencyRate::parity(),
                CurrencyRate::new("USD", 0.012),
                CurrencyRate::new("EUR", 0.011),
                CurrencyRate::new("GBP", 0.0097),
            ],
        }
    }

    pub fn get(&self, code: &str) -> Option<&CurrencyRate> {
        let wanted = CurrencyCode::new(code);
        self.rates.iter().find(|rate| rate.code == wanted)
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> + '_ {
        self.rates.iter().map(|rate| &rate.code)
    }

    pub fn rates(&self) -> &[CurrencyRate] {
        &self.rates
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::standard()
    }
}
