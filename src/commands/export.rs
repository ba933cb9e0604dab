//! Data export command.
//!
//! Writes the active profile's tasks, test scores or mistake log to a CSV or
//! JSON file for backup or analysis in a spreadsheet.
//!
//! ```bash
//! # Study plan as CSV in the current directory
//! neetplan export tasks
//!
//! # Test history as JSON to a chosen file
//! neetplan export scores --format json --output scores.json
//! ```

use crate::{
    libs::{
        export::{ExportData, ExportFormat, Exporter},
        messages::Message,
        session::Session,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Which records to export
    #[arg(value_enum, default_value = "tasks")]
    data: ExportData,

    /// Output format for the exported data
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path
    ///
    /// Defaults to `neetplan_<data>_<timestamp>.<ext>` in the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let session = Session::current()?;
    let exporter = Exporter::new(args.format, args.data, args.output);

    let count = exporter.export(args.data, &session.db.conn)?;
    if count == 0 {
        msg_info!(Message::NothingToExport);
        return Ok(());
    }

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
