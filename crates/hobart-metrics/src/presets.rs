//! Preset metric sets per industry.

use crate::efficiency::{
    CapexIntensity, InventoryTurnover, RevenuePerCapex, RevenuePerEmployee, RndIntensity,
    SalesMarketingIntensity,
};
use crate::growth::{RevenueCagr, RevenueVolatility, RuleOf40};
use crate::leverage::{InterestCoverage, NetDebtToEbitda};
use crate::metric::Metric;
use crate::profitability::{
    FcfMargin, GrossMargin, IncrementalMargin, OperatingMargin, OperatingMarginTrend, Roic,
};
use crate::registry::calculator;
use crate::valuation::{EvToFcf, FcfYield};
use hobart_scoring::{Result, ScoringError};

/// Metrics that apply across industries.
pub fn core_metrics() -> Vec<Box<dyn Metric>> {
    vec![
        Box::new(EvToFcf),
        Box::new(RevenueCagr),
        Box::new(OperatingMargin),
        Box::new(FcfMargin),
        Box::new(NetDebtToEbitda),
        Box::new(InterestCoverage),
    ]
}

/// Core metrics plus capital intensity, inventory and return measures for chipmakers.
pub fn semiconductor_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(Roic));
    metrics.push(Box::new(CapexIntensity));
    metrics.push(Box::new(InventoryTurnover));
    metrics.push(Box::new(GrossMargin));
    metrics
}

/// Core metrics plus software efficiency measures.
pub fn saas_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(GrossMargin));
    metrics.push(Box::new(RndIntensity));
    metrics.push(Box::new(RuleOf40));
    metrics.push(Box::new(RevenuePerEmployee));
    metrics
}

/// Core metrics plus go-to-market and R&D intensity for security vendors.
pub fn cybersecurity_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(GrossMargin));
    metrics.push(Box::new(SalesMarketingIntensity));
    metrics.push(Box::new(RndIntensity));
    metrics.push(Box::new(CapexIntensity));
    metrics
}

/// Core metrics plus operating leverage and R&D intensity for AI-exposed software.
pub fn enterprise_ai_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(IncrementalMargin));
    metrics.push(Box::new(RndIntensity));
    metrics
}

/// Core metrics plus cash yield and revenue stability for mature vendors.
pub fn legacy_enterprise_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(FcfYield));
    metrics.push(Box::new(RevenueVolatility));
    metrics.push(Box::new(CapexIntensity));
    metrics
}

/// Core metrics plus capital efficiency and margin trajectory for hyperscalers.
pub fn cloud_infrastructure_metrics() -> Vec<Box<dyn Metric>> {
    let mut metrics = core_metrics();
    metrics.push(Box::new(Roic));
    metrics.push(Box::new(CapexIntensity));
    metrics.push(Box::new(RevenuePerCapex));
    metrics.push(Box::new(GrossMargin));
    metrics.push(Box::new(OperatingMarginTrend));
    metrics
}

/// Calculators for the given keys, in order.
///
/// # Errors
/// [`ScoringError::UnknownMetric`] for a key without a calculator.
pub fn metrics_for_keys<I, K>(keys: I) -> Result<Vec<Box<dyn Metric>>>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keys.into_iter()
        .map(|key| {
            let key = key.as_ref();
            calculator(key).ok_or_else(|| ScoringError::UnknownMetric(key.to_string()))
        })
        .collect()
}
