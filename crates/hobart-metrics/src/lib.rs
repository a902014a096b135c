#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod efficiency;
pub mod growth;
pub mod leverage;
pub mod metric;
pub mod presets;
pub mod profitability;
pub mod registry;
pub mod table;
pub mod valuation;

pub use metric::Metric;
pub use presets::{
    cloud_infrastructure_metrics, core_metrics, cybersecurity_metrics, enterprise_ai_metrics,
    legacy_enterprise_metrics, metrics_for_keys, saas_metrics, semiconductor_metrics,
};
pub use registry::{
    MetricCategory, MetricInfo, available_metrics, calculator, direction_policy,
    get_metric_info, list_metric_keys, metrics_by_category,
};
pub use table::build_table;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
