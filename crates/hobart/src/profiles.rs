//! Weight profiles.
//!
//! A profile pairs a base weight vector with optional per-segment modifiers.
//! The weights for a segment are the base vector run through the weight
//! adjuster with that segment's modifier; segments without a modifier use the
//! base vector unchanged.

use crate::error::{Result, ScreenError};
use crate::universe::Universe;
use hobart_metrics::{Metric, metrics_for_keys};
use hobart_scoring::{ModifierVector, WeightAssignment, WeightVector, adjust};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Names of the built-in profiles.
pub const BUILTIN_PROFILES: [&str; 6] = [
    "semiconductors",
    "enterprise_saas",
    "cybersecurity",
    "enterprise_ai",
    "legacy_enterprise",
    "cloud_infrastructure",
];

/// Named weighting scheme for an industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name
    pub name: String,
    /// One-line description
    #[serde(default)]
    pub description: String,
    /// Base weights
    pub base: WeightVector,
    /// Modifiers keyed by segment name
    #[serde(default)]
    pub modifiers: BTreeMap<String, ModifierVector>,
    /// Segment assumed for symbols the universe does not classify
    #[serde(default)]
    pub default_segment: Option<String>,
}

impl Profile {
    /// Profile with a base vector only.
    pub fn new(name: impl Into<String>, description: impl Into<String>, base: WeightVector) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base,
            modifiers: BTreeMap::new(),
            default_segment: None,
        }
    }

    /// Add a segment modifier.
    #[must_use]
    pub fn with_modifier(mut self, segment: impl Into<String>, modifier: ModifierVector) -> Self {
        self.modifiers.insert(segment.into(), modifier);
        self
    }

    /// Set the default segment.
    #[must_use]
    pub fn with_default_segment(mut self, segment: impl Into<String>) -> Self {
        self.default_segment = Some(segment.into());
        self
    }

    /// Load a profile from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a profile from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Segment names with a modifier, plus the default segment.
    pub fn segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self.modifiers.keys().cloned().collect();
        if let Some(default) = &self.default_segment
            && !segments.contains(default)
        {
            segments.push(default.clone());
            segments.sort();
        }
        segments
    }

    /// Metric keys the profile weights.
    pub fn metric_keys(&self) -> Vec<&str> {
        self.base.iter().map(|(k, _)| k).collect()
    }

    /// Calculators for every weighted metric.
    ///
    /// # Errors
    /// [`ScreenError::Scoring`] when the profile names an unregistered metric.
    pub fn metrics(&self) -> Result<Vec<Box<dyn Metric>>> {
        Ok(metrics_for_keys(self.metric_keys())?)
    }

    /// Weights for a segment. Segments without a modifier get the base weights.
    pub fn weights_for(&self, segment: &str) -> Result<WeightVector> {
        match self.modifiers.get(segment) {
            Some(modifier) => Ok(adjust(&self.base, modifier)?),
            None => Ok(self.base.clone()),
        }
    }

    /// Weights for symbols the universe does not classify.
    pub fn default_weights(&self) -> Result<WeightVector> {
        match &self.default_segment {
            Some(segment) => self.weights_for(segment),
            None => Ok(self.base.clone()),
        }
    }

    /// Per-instrument weights for `symbols`, following the universe's segments.
    ///
    /// Profiles without modifiers give a uniform assignment.
    pub fn assignment(&self, universe: &dyn Universe, symbols: &[String]) -> Result<WeightAssignment> {
        let default = self.default_weights()?;
        if self.modifiers.is_empty() {
            return Ok(WeightAssignment::Uniform(default));
        }

        let mut assignment = WeightAssignment::per_instrument(default);
        for symbol in symbols {
            let Some(segment) = universe.segment(symbol) else {
                continue;
            };
            if self.default_segment.as_deref() == Some(segment.as_str()) {
                continue;
            }
            debug!(profile = %self.name, %symbol, %segment, "segment weights");
            assignment = assignment.with_override(symbol.clone(), self.weights_for(&segment)?);
        }
        Ok(assignment)
    }
}

fn modifier(entries: &[(&str, f64)]) -> Result<ModifierVector> {
    Ok(ModifierVector::new(entries.iter().copied())?)
}

/// Semiconductor profile: base weights plus fabless, foundry, equipment,
/// analog and memory modifiers. IDMs use the base weights.
pub fn semiconductors() -> Result<Profile> {
    let base = WeightVector::new([
        ("ev_to_fcf", 0.12),
        ("revenue_cagr", 0.12),
        ("operating_margin", 0.15),
        ("fcf_margin", 0.12),
        ("gross_margin", 0.08),
        ("net_debt_to_ebitda", 0.08),
        ("interest_coverage", 0.08),
        ("roic", 0.10),
        ("capex_intensity", 0.08),
        ("inventory_turnover", 0.07),
    ])?;

    Ok(Profile::new(
        "semiconductors",
        "Chipmakers, weighted per subsector business model",
        base,
    )
    .with_modifier(
        "fabless",
        modifier(&[
            ("ev_to_fcf", 1.05),
            ("revenue_cagr", 1.10),
            ("operating_margin", 1.10),
            ("fcf_margin", 1.15),
            ("gross_margin", 1.10),
            ("roic", 1.25),
            ("capex_intensity", 0.60),
        ])?,
    )
    .with_modifier(
        "foundry",
        modifier(&[
            ("ev_to_fcf", 0.70),
            ("revenue_cagr", 0.90),
            ("operating_margin", 1.20),
            ("fcf_margin", 0.60),
            ("gross_margin", 1.20),
            ("net_debt_to_ebitda", 1.10),
            ("interest_coverage", 1.20),
            ("roic", 0.50),
            ("capex_intensity", 1.40),
            ("inventory_turnover", 0.90),
        ])?,
    )
    .with_modifier(
        "equipment",
        modifier(&[
            ("revenue_cagr", 1.10),
            ("operating_margin", 1.20),
            ("gross_margin", 1.15),
            ("net_debt_to_ebitda", 0.90),
            ("roic", 1.10),
            ("capex_intensity", 0.80),
            ("inventory_turnover", 1.15),
        ])?,
    )
    .with_modifier(
        "analog",
        modifier(&[
            ("ev_to_fcf", 1.10),
            ("revenue_cagr", 0.90),
            ("operating_margin", 1.20),
            ("fcf_margin", 1.10),
            ("gross_margin", 1.25),
            ("interest_coverage", 1.05),
            ("roic", 1.30),
            ("capex_intensity", 0.50),
            ("inventory_turnover", 1.10),
        ])?,
    )
    .with_modifier(
        "memory",
        modifier(&[
            ("ev_to_fcf", 0.60),
            ("revenue_cagr", 1.15),
            ("fcf_margin", 0.70),
            ("net_debt_to_ebitda", 1.10),
            ("roic", 0.40),
            ("capex_intensity", 0.90),
            ("inventory_turnover", 1.40),
        ])?,
    )
    .with_default_segment("idm"))
}

/// Enterprise SaaS profile: unit economics and organizational efficiency.
pub fn enterprise_saas() -> Result<Profile> {
    let base = WeightVector::new([
        ("ev_to_fcf", 0.18),
        ("gross_margin", 0.16),
        ("revenue_per_employee", 0.14),
        ("rnd_intensity", 0.12),
        ("rule_of_40", 0.14),
        ("operating_margin", 0.10),
        ("fcf_margin", 0.08),
        ("net_debt_to_ebitda", 0.04),
        ("interest_coverage", 0.04),
    ])?;
    Ok(Profile::new(
        "enterprise_saas",
        "Subscription software, unit economics over headline growth",
        base,
    ))
}

/// Cybersecurity profile: margin leverage and go-to-market efficiency.
pub fn cybersecurity() -> Result<Profile> {
    let base = WeightVector::new([
        ("ev_to_fcf", 0.18),
        ("gross_margin", 0.16),
        ("operating_margin", 0.12),
        ("fcf_margin", 0.12),
        ("revenue_cagr", 0.10),
        ("sales_marketing_intensity", 0.14),
        ("rnd_intensity", 0.08),
        ("capex_intensity", 0.04),
        ("net_debt_to_ebitda", 0.04),
        ("interest_coverage", 0.02),
    ])?;
    Ok(Profile::new(
        "cybersecurity",
        "Security vendors, durable operating economics",
        base,
    ))
}

/// Enterprise AI profile: valuation discipline plus incremental margins as
/// AI revenue scales.
pub fn enterprise_ai() -> Result<Profile> {
    let base = WeightVector::new([
        ("ev_to_fcf", 0.22),
        ("incremental_margin", 0.18),
        ("operating_margin", 0.12),
        ("fcf_margin", 0.10),
        ("revenue_cagr", 0.08),
        ("rnd_intensity", 0.12),
        ("net_debt_to_ebitda", 0.10),
        ("interest_coverage", 0.08),
    ])?;
    Ok(Profile::new(
        "enterprise_ai",
        "Enterprise software monetizing AI, operating leverage on new revenue",
        base,
    ))
}

/// Legacy enterprise profile: cash yield and revenue stability over growth.
pub fn legacy_enterprise() -> Result<Profile> {
    let base = WeightVector::new([
        ("fcf_yield", 0.22),
        ("ev_to_fcf", 0.12),
        ("fcf_margin", 0.14),
        ("operating_margin", 0.12),
        ("revenue_volatility", 0.10),
        ("capex_intensity", 0.10),
        ("net_debt_to_ebitda", 0.08),
        ("interest_coverage", 0.06),
        ("revenue_cagr", 0.04),
        ("rnd_intensity", 0.02),
    ])?;
    Ok(Profile::new(
        "legacy_enterprise",
        "Mature technology vendors, steady cash generation",
        base,
    ))
}

/// Cloud infrastructure profile: growth and returns on heavy data-center spend.
pub fn cloud_infrastructure() -> Result<Profile> {
    let base = WeightVector::new([
        ("ev_to_fcf", 0.15),
        ("revenue_cagr", 0.15),
        ("operating_margin", 0.10),
        ("fcf_margin", 0.10),
        ("net_debt_to_ebitda", 0.075),
        ("interest_coverage", 0.075),
        ("roic", 0.10),
        ("capex_intensity", 0.05),
        ("revenue_per_capex", 0.08),
        ("gross_margin", 0.05),
        ("operating_margin_trend", 0.07),
    ])?;
    Ok(Profile::new(
        "cloud_infrastructure",
        "Hyperscalers and infrastructure providers, capital efficiency at scale",
        base,
    ))
}

/// Look up a built-in profile by name.
///
/// # Errors
/// [`ScreenError::UnknownProfile`] for names not in [`BUILTIN_PROFILES`].
pub fn profile(name: &str) -> Result<Profile> {
    match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "semiconductors" | "semis" => semiconductors(),
        "enterprise_saas" | "saas" => enterprise_saas(),
        "cybersecurity" | "cyber" => cybersecurity(),
        "enterprise_ai" | "ai" => enterprise_ai(),
        "legacy_enterprise" | "legacy" => legacy_enterprise(),
        "cloud_infrastructure" | "cloud" => cloud_infrastructure(),
        _ => Err(ScreenError::UnknownProfile(name.to_string())),
    }
}

/// All built-in profiles.
pub fn builtin_profiles() -> Result<Vec<Profile>> {
    BUILTIN_PROFILES.iter().map(|name| profile(name)).collect()
}
