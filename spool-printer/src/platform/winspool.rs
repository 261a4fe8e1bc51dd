//! Windows spooler backend (winspool)

use core::ffi::c_void;

use windows::Win32::Foundation::GetLastError;
use windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, EnumPrintersW, GetDefaultPrinterW,
    OpenPrinterW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_HANDLE, PRINTER_INFO_4W,
    StartDocPrinterW, StartPagePrinter, WritePrinter,
};
use windows::core::{PCWSTR, PWSTR};

use crate::error::{PrintError, PrintResult, SpoolStep};
use crate::spooler::{SpoolBackend, SpoolSession};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn last_error() -> Option<u32> {
    let code = unsafe { GetLastError() }.0;
    (code != 0).then_some(code)
}

/// Windows print spooler
#[derive(Debug, Default, Clone, Copy)]
pub struct WinSpool;

impl SpoolBackend for WinSpool {
    fn open_printer(&self, name: &str) -> PrintResult<Box<dyn SpoolSession + '_>> {
        let name_w = to_wide(name);
        let mut handle = PRINTER_HANDLE::default();

        unsafe { OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None) }
            .map_err(|_| PrintError::spool(name, SpoolStep::Open, last_error()))?;

        Ok(Box::new(WinSession {
            printer: name.to_string(),
            handle,
        }))
    }

    fn enum_printers(&self) -> PrintResult<Vec<String>> {
        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed: u32 = 0;
        let mut returned: u32 = 0;

        unsafe {
            let _ = EnumPrintersW(flags, None, 4, None, &mut needed, &mut returned);
            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                4,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|e| PrintError::Enumeration(format!("EnumPrintersW failed: {}", e)))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_4W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            Ok(slice
                .iter()
                .filter(|info| !info.pPrinterName.is_null())
                .filter_map(|info| PWSTR(info.pPrinterName.0).to_string().ok())
                .collect())
        }
    }

    fn default_printer(&self) -> PrintResult<Option<String>> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);
            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            if !GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed).as_bool() {
                return Ok(None);
            }

            PWSTR(buf.as_mut_ptr())
                .to_string()
                .map(Some)
                .map_err(|e| PrintError::Enumeration(format!("UTF-16 decode failed: {}", e)))
        }
    }
}

/// An open winspool printer handle
struct WinSession {
    printer: String,
    handle: PRINTER_HANDLE,
}

impl WinSession {
    fn fail(&self, step: SpoolStep) -> PrintError {
        PrintError::spool(&self.printer, step, last_error())
    }
}

impl SpoolSession for WinSession {
    fn start_document(&mut self, doc_name: &str) -> PrintResult<()> {
        let doc_name_w = to_wide(doc_name);
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        if unsafe { StartDocPrinterW(self.handle, 1, &doc_info as *const DOC_INFO_1W) } == 0 {
            return Err(self.fail(SpoolStep::StartDocument));
        }
        Ok(())
    }

    fn start_page(&mut self) -> PrintResult<()> {
        if !unsafe { StartPagePrinter(self.handle) }.as_bool() {
            return Err(self.fail(SpoolStep::StartPage));
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> PrintResult<usize> {
        let len = u32::try_from(data.len()).map_err(|_| {
            PrintError::InvalidPayload(format!("payload too large: {} bytes", data.len()))
        })?;

        let mut written: u32 = 0;
        let ok = unsafe {
            WritePrinter(
                self.handle,
                data.as_ptr() as *const c_void,
                len,
                &mut written,
            )
        };
        if !ok.as_bool() {
            return Err(self.fail(SpoolStep::Write));
        }
        Ok(written as usize)
    }

    fn end_page(&mut self) -> PrintResult<()> {
        if !unsafe { EndPagePrinter(self.handle) }.as_bool() {
            return Err(self.fail(SpoolStep::EndPage));
        }
        Ok(())
    }

    fn end_document(&mut self) -> PrintResult<()> {
        if !unsafe { EndDocPrinter(self.handle) }.as_bool() {
            return Err(self.fail(SpoolStep::EndDocument));
        }
        Ok(())
    }

    fn close(&mut self) -> PrintResult<()> {
        unsafe { ClosePrinter(self.handle) }.map_err(|_| self.fail(SpoolStep::Close))
    }
}
