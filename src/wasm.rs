//! WASM bindings for atbl
//!
//! This module provides JavaScript-accessible functions for parsing ATBL documents.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// Parse options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
pub struct WasmParseOptions {
    /// Accept `\r\n` line endings
    #[serde(default)]
    pub strip_carriage_returns: bool,
}

/// Parse result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ParseOutput {
    /// Parsed rows; each cell is an array of byte values
    pub rows: Vec<Vec<Vec<u8>>>,
    /// Whether parsing was successful
    pub success: bool,
    /// Error message if parsing failed
    pub error: Option<String>,
    /// Line the error was raised on
    pub line: Option<usize>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse an ATBL document
///
/// # Arguments
/// * `input` - Full ATBL document
/// * `options` - Optional `{ strip_carriage_returns }` object
///
/// # Returns
/// `{ rows, success, error, line }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseAtbl")]
pub fn parse_atbl_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: WasmParseOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let parse_opts = crate::ParseOptions {
        strip_carriage_returns: opts.strip_carriage_returns,
    };

    let result = match crate::parse_with_options(input, &parse_opts) {
        Ok(table) => ParseOutput {
            rows: table.into_rows(),
            success: true,
            error: None,
            line: None,
        },
        Err(err) => ParseOutput {
            rows: Vec::new(),
            success: false,
            error: Some(err.to_string()),
            line: err.line(),
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Check whether a token is an ATBL command
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "isAtblCommand")]
pub fn is_atbl_command_wasm(token: &str) -> bool {
    crate::is_command(token)
}

/// Check an ATBL document for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkAtbl")]
pub fn check_atbl_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_atbl(input, &crate::ParseOptions::default());
    let summary = CheckSummary {
        errors: result.messages(DiagnosticLevel::Error),
        warnings: result.messages(DiagnosticLevel::Warning),
        infos: result.messages(DiagnosticLevel::Info),
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of ATBL check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
