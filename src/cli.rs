//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - global flags and the [`Command`] to run
//! - [`ReportArgs`] - output directory, date range and formats shared by the
//!   report commands
//! - [`FormatArg`], [`MediaTypeArg`], [`KindArg`] - value enums that convert
//!   into the library types

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::extract::MediaType;
use crate::format::ReportFormat;
use crate::record::RowKind;

/// Extract SMS, call logs, media metadata and chat exports from an Android
/// device into CSV and PDF reports.
#[derive(Parser, Debug, Clone)]
#[command(name = "droidpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    droidpack sms -o reports
    droidpack calls --after 2024-01-01 --before 2024-03-31 --format pdf
    droidpack media --type video --folder WhatsApp
    droidpack chat 'WhatsApp Chat with Alice.txt' --sender Alice
    droidpack parse sms saved_sms_dump.txt --format csv
    droidpack collect --dest extracted")]
pub struct Args {
    /// Path to the adb executable
    #[arg(long, global = true, value_name = "PATH")]
    pub adb: Option<PathBuf>,

    /// Seconds to wait for each device command
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract SMS messages from the connected device
    Sms {
        #[command(flatten)]
        report: ReportArgs,

        /// Keep messages whose sender contains TOKEN
        #[arg(long, value_name = "TOKEN")]
        folder: Option<String>,
    },

    /// Extract the call log from the connected device
    Calls {
        #[command(flatten)]
        report: ReportArgs,

        /// Keep calls whose number contains TOKEN
        #[arg(long, value_name = "TOKEN")]
        folder: Option<String>,
    },

    /// Extract media store entries from the connected device
    Media {
        #[command(flatten)]
        report: ReportArgs,

        /// Keep files whose path contains TOKEN ("All" keeps everything)
        #[arg(long, value_name = "TOKEN")]
        folder: Option<String>,

        /// Media collection to query
        #[arg(long = "type", value_enum, default_value = "images")]
        media_type: MediaTypeArg,
    },

    /// Convert a chat text export
    Chat {
        /// Path to the exported .txt file
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// Keep messages whose sender contains TOKEN
        #[arg(long, value_name = "TOKEN")]
        sender: Option<String>,

        /// Treat every line on its own; lines without a header are dropped
        #[arg(long)]
        strict_lines: bool,
    },

    /// Build reports from a saved `content query` dump (no device needed)
    Parse {
        /// Kind of rows in the dump
        #[arg(value_enum)]
        kind: KindArg,

        /// Path to the dump file
        dump: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// Keep records whose sender, number or path contains TOKEN
        #[arg(long, value_name = "TOKEN")]
        folder: Option<String>,
    },

    /// Pull WhatsApp, Telegram and Instagram data and zip it
    Collect {
        /// Local directory the data is pulled into
        #[arg(long, default_value = "extracted", value_name = "DIR")]
        dest: PathBuf,

        /// Do not create a zip archive
        #[arg(long)]
        no_archive: bool,
    },
}

/// Options shared by every report-producing command.
#[derive(ClapArgs, Debug, Clone)]
pub struct ReportArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Keep records on or after this date (YYYY-MM-DD or epoch seconds)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep records on or before this date (YYYY-MM-DD or epoch seconds)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Report formats to write
    #[arg(short, long, value_enum, value_delimiter = ',', default_values = ["csv", "pdf"])]
    pub format: Vec<FormatArg>,

    /// Prefix CSV files with a UTF-8 byte order mark
    #[arg(long)]
    pub bom: bool,
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FormatArg {
    Csv,
    Pdf,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> ReportFormat {
        match format {
            FormatArg::Csv => ReportFormat::Csv,
            FormatArg::Pdf => ReportFormat::Pdf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MediaTypeArg {
    #[value(alias = "image")]
    Images,
    #[value(alias = "videos")]
    Video,
    Audio,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> MediaType {
        match arg {
            MediaTypeArg::Images => MediaType::Images,
            MediaTypeArg::Video => MediaType::Video,
            MediaTypeArg::Audio => MediaType::Audio,
        }
    }
}

/// Row kinds accepted by `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum KindArg {
    Sms,
    Calls,
    Media,
}

impl From<KindArg> for RowKind {
    fn from(arg: KindArg) -> RowKind {
        match arg {
            KindArg::Sms => RowKind::Message,
            KindArg::Calls => RowKind::Call,
            KindArg::Media => RowKind::Media,
        }
    }
}
