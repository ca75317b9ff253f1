//! `bkm parse` — transform artifacts into tabular CSV.

mod carrier_freight_v1;
mod statement_pdf;

pub(crate) use statement_pdf::read_statement_table;

use std::path::PathBuf;

use clap::Subcommand;

use crate::CliError;

#[derive(Subcommand)]
pub enum ParseCommands {
    /// Parse a carrier statement PDF into invoice/amount CSV
    #[command(name = "statement-pdf", after_help = "\
Examples:
  bkm parse statement-pdf --template carrier_freight_v1 --file statement.pdf
  bkm parse statement-pdf --template carrier_freight_v1 --file statement.pdf --out vendor.csv")]
    StatementPdf {
        /// Template ID (available: carrier_freight_v1)
        #[arg(long)]
        template: String,

        /// Path to PDF file
        #[arg(long)]
        file: PathBuf,

        /// Output CSV file path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

pub fn cmd_parse(command: ParseCommands) -> Result<(), CliError> {
    match command {
        ParseCommands::StatementPdf { template, file, out, quiet } => {
            statement_pdf::cmd_parse_statement_pdf(&template, &file, &out, quiet)
        }
    }
}
