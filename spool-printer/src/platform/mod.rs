//! OS spooler backends
//!
//! - Windows: winspool (`OpenPrinterW` / `WritePrinter`)
//! - Unix: CUPS scheduler over IPP

#[cfg(unix)]
mod cups;
#[cfg(windows)]
mod winspool;

#[cfg(unix)]
pub use cups::CupsSpool;
#[cfg(windows)]
pub use winspool::WinSpool;

use std::sync::Arc;

use crate::spooler::SpoolBackend;

/// Spooler backend for the compile target
pub fn system_backend() -> Arc<dyn SpoolBackend> {
    #[cfg(windows)]
    {
        Arc::new(WinSpool)
    }
    #[cfg(unix)]
    {
        Arc::new(CupsSpool::new())
    }
    #[cfg(not(any(windows, unix)))]
    {
        Arc::new(unsupported::Unsupported)
    }
}

#[cfg(not(any(windows, unix)))]
mod unsupported {
    use crate::error::{PrintError, PrintResult, SpoolStep};
    use crate::spooler::{SpoolBackend, SpoolSession};

    /// Backend for targets without a print spooler binding
    pub struct Unsupported;

    impl SpoolBackend for Unsupported {
        fn open_printer(&self, name: &str) -> PrintResult<Box<dyn SpoolSession + '_>> {
            Err(PrintError::spool(name, SpoolStep::Open, None))
        }

        fn enum_printers(&self) -> PrintResult<Vec<String>> {
            Err(PrintError::Enumeration(
                "printing is not supported on this platform".to_string(),
            ))
        }

        fn default_printer(&self) -> PrintResult<Option<String>> {
            Ok(None)
        }
    }
}
