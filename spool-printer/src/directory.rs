//! Installed printer listing

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::PrintResult;
use crate::spooler::SpoolBackend;

/// Snapshot of one installed printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterDescriptor {
    pub name: String,
    pub is_default: bool,
}

/// List installed printers in OS order, flagging the OS default
///
/// At most one entry is marked default, even if the OS reports a name twice.
#[instrument(skip(backend))]
pub fn list_printers(backend: &dyn SpoolBackend) -> PrintResult<Vec<PrinterDescriptor>> {
    let names = backend.enum_printers()?;
    let default = backend.default_printer()?;

    let mut default_seen = false;
    let printers = names
        .into_iter()
        .map(|name| {
            let is_default = !default_seen && default.as_deref() == Some(name.as_str());
            default_seen |= is_default;
            PrinterDescriptor { name, is_default }
        })
        .collect();

    Ok(printers)
}
