//! ATBL parsing core
//!
//! A document is processed one line at a time:
//!
//! ```text
//! Raw document -> Line split -> Version check -> Line decoder -> Row/Cell state machine -> Table
//! ```
//!
//! Starting a row finishes the open row, starting a cell finishes the
//! open cell, and the end of input finishes everything that is still
//! open.

mod fragment;
mod line;
mod options;
mod parser;
mod table;


// Re-export public API
pub use fragment::decode_hex_fragment;
pub use line::{decode_line, is_command, Command, CONTINUATION_PREFIX, MIN_LINE_LEN};
pub use options::ParseOptions;
pub use parser::{parse, parse_with_options, AtblParser, ParserState, VERSION_LINE};
pub use table::{cell_as_text, cell_display, cell_to_hex, Cell, Row, Table};
