pub mod attributes;
pub mod dataset;
pub mod estimators;
pub mod instances;
