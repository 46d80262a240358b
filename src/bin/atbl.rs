//! atbl CLI - parse ATBL documents and dump the resulting table

#[cfg(feature = "cli")]
use atbl::{
    cell_as_text, cell_to_hex,
    diagnostics::{check_atbl, format_diagnostics, Diagnostic},
    parse_with_options, ParseOptions, Table,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "atbl")]
#[command(version)]
#[command(about = "Parse ATBL table documents and dump their cells", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format for the parsed table
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Accept `\r\n` line endings
    #[arg(long)]
    crlf: bool,

    /// Check mode - report problems without dumping the table
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check an ATBL document for problems
    Check {
        /// Input file to check
        input: Option<String>,

        /// Accept `\r\n` line endings
        #[arg(long)]
        crlf: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Parse a document and dump its table (default action)
    Dump {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Accept `\r\n` line endings
        #[arg(long)]
        crlf: bool,
    },

    /// Show version and format info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per row, cells as escaped text
    Text,
    /// One line per row, cells as lowercase hex
    Hex,
    /// JSON array of rows of byte arrays
    Json,
    /// CSV with cells as text (invalid UTF-8 replaced)
    Csv,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;
    let options = parse_options(cli.crlf);

    // If check mode, analyze and report issues
    if cli.check {
        run_check(&input, &options, !cli.no_color);
        return Ok(());
    }

    dump(&input, &options, cli.format, cli.output.as_deref())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check {
            input,
            crlf,
            no_color,
        } => {
            let content = read_input(input.as_deref())?;
            run_check(&content, &parse_options(crlf), !no_color);
        }

        Commands::Dump {
            input,
            output,
            format,
            crlf,
        } => {
            let content = read_input(input.as_deref())?;
            dump(&content, &parse_options(crlf), format, output.as_deref())?;
        }

        Commands::Info => {
            println!("atbl - ATBL table document parser");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Format version: 1");
            println!("Commands:");
            println!("  ver 1     version header (first line only)");
            println!("  rem ...   remark, ignored");
            println!("  row       start a row");
            println!("  cel       start a cell in the current row");
            println!("  txt ...   append UTF-8 text to the current cell");
            println!("  hex ...   append hex-decoded bytes to the current cell");
            println!("  (4 spaces) continuation: append a newline and the rest of the line");
            println!();
            println!("Output formats: text, hex, json, csv");
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn parse_options(crlf: bool) -> ParseOptions {
    if crlf {
        ParseOptions::lenient()
    } else {
        ParseOptions::strict()
    }
}

/// Read the whole input from a file, or stdin when no path is given
#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn run_check(input: &str, options: &ParseOptions, use_color: bool) {
    let result = check_atbl(input, options);
    println!("{}", format_diagnostics(&result, use_color));

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn dump(
    input: &str,
    options: &ParseOptions,
    format: OutputFormat,
    output: Option<&str>,
) -> io::Result<()> {
    let table = match parse_with_options(input, options) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{}", Diagnostic::from_error(&err, input));
            std::process::exit(1);
        }
    };

    let rendered = render(&table, format)?;

    match output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(rendered.as_bytes())?;
            eprintln!(
                "✓ {} row(s) written to: {}",
                table.row_count(),
                path
            );
        }
        None => {
            io::stdout().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn render(table: &Table, format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_lines(table, |cell| {
            cell_as_text(cell).escape_debug().to_string()
        })),
        OutputFormat::Hex => Ok(render_lines(table, cell_to_hex)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string(table)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Csv => render_csv(table),
    }
}

#[cfg(feature = "cli")]
fn render_lines(table: &Table, cell_fmt: impl Fn(&[u8]) -> String) -> String {
    let mut out = String::new();
    for row in table {
        let cells: Vec<String> = row.iter().map(|cell| cell_fmt(cell.as_slice())).collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

#[cfg(feature = "cli")]
fn render_csv(table: &Table) -> io::Result<String> {
    // rows may differ in length
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in table {
        writer
            .write_record(row.iter().map(|cell| cell_as_text(cell).into_owned()))
            .map_err(io::Error::from)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install atbl --features cli");
    eprintln!("  atbl [OPTIONS] [INPUT_FILE]");
}
