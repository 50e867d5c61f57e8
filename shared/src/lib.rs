pub mod data;
pub mod pricing;
