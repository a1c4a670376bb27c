//! Quote execution service.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use sq_catalog::Catalog;
use tracing::{info, warn};

use crate::config::{QuoteFile, load_quote};
use crate::document::{DocumentData, assemble_document};
use crate::error::AppResult;
use crate::simulate::{DaySimulation, simulate_day};

/// A quote file together with the catalog it resolves against.
#[derive(Debug, Clone)]
pub struct PreparedQuote {
    pub file: QuoteFile,
    pub catalog: Catalog,
}

/// Result of a quote run.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub document: DocumentData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<DaySimulation>,
}

/// Load a quote file and its catalog.
pub fn prepare_quote(path: &Path) -> AppResult<PreparedQuote> {
    let file = load_quote(path)?;
    let catalog = match file.catalog_path(path) {
        Some(catalog_path) => {
            info!(path = %catalog_path.display(), "loading catalog");
            Catalog::load_yaml(&catalog_path)?
        }
        None => Catalog::builtin(),
    };
    Ok(PreparedQuote { file, catalog })
}

/// Check the customer inputs before running anything.
pub fn validate_quote(prepared: &PreparedQuote) -> AppResult<()> {
    let request = &prepared.file.request;
    request.inputs.validate()?;
    if request.battery_count == 0 {
        warn!("battery_count is 0; the day simulation will run without storage");
    }
    Ok(())
}

/// Assemble the quote document and, if requested, simulate a day for it.
pub fn run_quote(prepared: &PreparedQuote, with_simulation: bool) -> AppResult<QuoteResponse> {
    let start = Instant::now();

    let document = assemble_document(&prepared.file.request, &prepared.catalog)?;
    let simulation = if with_simulation {
        Some(simulate_day(&document, &prepared.file.profile)?)
    } else {
        None
    };

    info!(
        quote_id = %document.quote_id,
        simulated = with_simulation,
        elapsed_s = start.elapsed().as_secs_f64(),
        "quote run finished"
    );

    Ok(QuoteResponse {
        document,
        simulation,
    })
}
