//! Semiconductor universe with subsector classifications.

use crate::error::ScreenError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Business model of a chipmaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsector {
    /// Designs chips, outsources manufacturing
    Fabless,
    /// Contract manufacturer
    Foundry,
    /// Wafer fab equipment and process control
    Equipment,
    /// Integrated device manufacturer
    Idm,
    /// Analog and mixed-signal IDM
    Analog,
    /// Memory and storage
    Memory,
}

impl Subsector {
    /// All subsectors.
    pub const ALL: [Self; 6] = [
        Self::Fabless,
        Self::Foundry,
        Self::Equipment,
        Self::Idm,
        Self::Analog,
        Self::Memory,
    ];

    /// Segment name used in profiles.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fabless => "fabless",
            Self::Foundry => "foundry",
            Self::Equipment => "equipment",
            Self::Idm => "idm",
            Self::Analog => "analog",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for Subsector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Subsector {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fabless" => Ok(Self::Fabless),
            "foundry" | "foundries" => Ok(Self::Foundry),
            "equipment" => Ok(Self::Equipment),
            "idm" | "idms" => Ok(Self::Idm),
            "analog" => Ok(Self::Analog),
            "memory" => Ok(Self::Memory),
            other => Err(ScreenError::UnknownSubsector(other.to_string())),
        }
    }
}

/// Semiconductor universe.
///
/// Symbols are listed in alphabetical order.
#[derive(Debug, Clone)]
pub struct SemiconductorUniverse {
    members: BTreeMap<String, Subsector>,
}

impl Default for SemiconductorUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl SemiconductorUniverse {
    /// Create the universe with its default constituents.
    pub fn new() -> Self {
        use Subsector::*;

        let members = [
            ("NVDA", Fabless),
            ("AMD", Fabless),
            ("QCOM", Fabless),
            ("AVGO", Fabless),
            ("MRVL", Fabless),
            ("MPWR", Fabless),
            ("MCHP", Fabless),
            ("QRVO", Fabless),
            ("SWKS", Fabless),
            ("ARM", Fabless),
            ("SLAB", Fabless),
            ("ALGM", Fabless),
            ("MTSI", Fabless),
            ("TSM", Foundry),
            ("UMC", Foundry),
            ("ASML", Equipment),
            ("LRCX", Equipment),
            ("KLAC", Equipment),
            ("AMAT", Equipment),
            ("ENTG", Equipment),
            ("MKSI", Equipment),
            ("ACLS", Equipment),
            ("UCTT", Equipment),
            ("ICHR", Equipment),
            ("COHU", Equipment),
            ("FORM", Equipment),
            ("ONTO", Equipment),
            ("NVMI", Equipment),
            ("CAMT", Equipment),
            ("INTC", Idm),
            ("STM", Idm),
            ("ON", Idm),
            ("WOLF", Idm),
            ("SIMO", Idm),
            ("DIOD", Idm),
            ("MXL", Idm),
            ("SMTC", Idm),
            ("RMBS", Idm),
            ("TXN", Analog),
            ("NXPI", Analog),
            ("ADI", Analog),
            ("CRUS", Analog),
            ("MU", Memory),
            ("WDC", Memory),
            ("STX", Memory),
        ]
        .into_iter()
        .map(|(symbol, subsector)| (symbol.to_string(), subsector))
        .collect();

        Self { members }
    }

    /// Get all symbols.
    pub fn symbols(&self) -> Vec<String> {
        self.members.keys().cloned().collect()
    }

    /// Subsector of a symbol.
    pub fn subsector(&self, symbol: &str) -> Option<Subsector> {
        self.members.get(symbol).copied()
    }

    /// Get all symbols in a subsector.
    pub fn symbols_in_subsector(&self, subsector: Subsector) -> Vec<String> {
        self.members
            .iter()
            .filter(|(_, s)| **s == subsector)
            .map(|(symbol, _)| symbol.clone())
            .collect()
    }

    /// Number of constituents per subsector.
    pub fn subsector_counts(&self) -> BTreeMap<Subsector, usize> {
        let mut counts = BTreeMap::new();
        for subsector in self.members.values() {
            *counts.entry(*subsector).or_insert(0) += 1;
        }
        counts
    }
}
