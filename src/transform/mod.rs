pub mod aggregate;
pub mod chart;
pub mod extract;
pub mod flatten;
pub mod header_config;
pub mod kpi;
pub mod normalize;
pub mod stats;
