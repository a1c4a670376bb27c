//! Equipment catalog for quoting: panels, batteries and inverters.
//!
//! The catalog is passed explicitly to every stage that needs it, so several
//! catalogs (regional pricing, test fixtures) can coexist.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod spec;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{CatalogError, CatalogResult};
pub use spec::{BatterySpec, InverterSpec, PanelSpec};
