//! Python bindings for atbl
//!
//! Exposes the parser as `parse(document) -> list[list[bytes]]`. Parse
//! errors are raised as `ValueError` with the line-numbered message.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Parse an ATBL document into rows of `bytes` cells
#[pyfunction]
#[pyo3(signature = (document, strip_carriage_returns = false))]
fn parse(
    py: Python<'_>,
    document: &str,
    strip_carriage_returns: bool,
) -> PyResult<Vec<Vec<Py<PyBytes>>>> {
    let options = atbl::ParseOptions {
        strip_carriage_returns,
    };
    let table = atbl::parse_with_options(document, &options)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;

    Ok(table
        .into_rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| PyBytes::new(py, cell).unbind())
                .collect()
        })
        .collect())
}

/// Check whether a token is an ATBL command
#[pyfunction]
fn is_command(token: &str) -> bool {
    atbl::is_command(token)
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(is_command, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
