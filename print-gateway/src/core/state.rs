use std::sync::Arc;

use spool_printer::{RawSpooler, SpoolBackend, system_backend};

use crate::core::Config;
use crate::printing::PrintService;

/// Server state shared by all handlers
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub print: PrintService,
}

impl ServerState {
    /// Build state around an explicit spooler backend
    pub fn new(config: Config, backend: Arc<dyn SpoolBackend>) -> Self {
        let spooler = RawSpooler::new(backend).with_doc_name(config.doc_name.clone());
        let print = PrintService::new(spooler, config.serialize_per_printer);

        Self {
            config: Arc::new(config),
            print,
        }
    }

    /// Build state around the operating system's spooler
    pub fn initialize(config: Config) -> Self {
        tracing::info!(
            serialize_per_printer = config.serialize_per_printer,
            doc_name = %config.doc_name,
            "Initializing print service"
        );
        Self::new(config, system_backend())
    }
}
