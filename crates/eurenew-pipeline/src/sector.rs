//! Renewable energy sectors reported on the leaderboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four `nrg_bal` balances the report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergySector {
    /// Renewables share of gross final energy consumption
    #[default]
    #[serde(rename = "REN")]
    Overall,

    /// Renewables share of electricity
    #[serde(rename = "REN_ELC")]
    Electricity,

    /// Renewables share of transport
    #[serde(rename = "REN_TRA")]
    Transport,

    /// Renewables share of heating and cooling
    #[serde(rename = "REN_HEAT_CL")]
    HeatingCooling,
}

impl EnergySector {
    /// Returns all sectors in selector order.
    pub const fn all() -> [Self; 4] {
        [
            Self::Overall,
            Self::Electricity,
            Self::Transport,
            Self::HeatingCooling,
        ]
    }

    /// Returns the Eurostat `nrg_bal` code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Overall => "REN",
            Self::Electricity => "REN_ELC",
            Self::Transport => "REN_TRA",
            Self::HeatingCooling => "REN_HEAT_CL",
        }
    }

    /// Returns the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Overall => "Overall Share",
            Self::Electricity => "Electricity Only",
            Self::Transport => "Transport",
            Self::HeatingCooling => "Heating & Cooling",
        }
    }

    /// Parse a sector from its `nrg_bal` code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Parse a sector from its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for EnergySector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
