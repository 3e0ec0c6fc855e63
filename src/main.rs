//! # droidpack CLI
//!
//! Command-line interface for the droidpack library.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use droidpack::archive::{archive_name, default_targets, pull_app_data, zip_directory};
use droidpack::bridge::AdbBridge;
use droidpack::cli::{Args, Command, ReportArgs};
use droidpack::config::{ChatConfig, Config};
use droidpack::core::{
    ExtractionStats, FilterConfig, Filterable, ReportRecord, apply_filters, normalize_calls,
    normalize_media_rows, normalize_messages, sort_newest_first,
};
use droidpack::extract::{MediaType, extract_calls, extract_media, extract_messages};
use droidpack::format::{ReportFormat, write_report};
use droidpack::parsing::{ChatParser, RowParser};
use droidpack::record::RowKind;
use droidpack::{DroidpackError, Result};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose, args.quiet);

    match run(args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("❌ {failed} report(s) could not be written");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Runs the selected command; returns the number of failed report writes.
fn run(args: Args) -> Result<usize> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    if let Some(adb) = &args.adb {
        config.bridge.adb_path = adb.clone();
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err(DroidpackError::invalid_config("--timeout must be positive", None));
        }
        config.bridge.timeout_secs = timeout;
    }

    println!("📦 droidpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match args.command {
        Command::Sms { report, folder } => {
            let bridge = connect(&config);
            println!("⏳ Querying SMS providers...");
            let messages = extract_messages(&bridge);
            export(messages, &report, folder, &mut config)
        }
        Command::Calls { report, folder } => {
            let bridge = connect(&config);
            println!("⏳ Querying call log...");
            let calls = extract_calls(&bridge);
            export(calls, &report, folder, &mut config)
        }
        Command::Media {
            report,
            folder,
            media_type,
        } => {
            let bridge = connect(&config);
            let media_type: MediaType = media_type.into();
            println!("⏳ Querying {media_type} media store...");
            let media = extract_media(&bridge, media_type, config.bridge.user);
            export(media, &report, folder, &mut config)
        }
        Command::Chat {
            input,
            report,
            sender,
            strict_lines,
        } => {
            let chat_config = if strict_lines {
                ChatConfig::strict()
            } else {
                config.chat.clone()
            };
            println!("📂 Input:   {}", input.display());
            println!("⏳ Parsing chat export...");
            let records = ChatParser::with_config(chat_config).parse_file(&input)?;
            export(records, &report, sender, &mut config)
        }
        Command::Parse {
            kind,
            dump,
            report,
            folder,
        } => {
            let kind: RowKind = kind.into();
            println!("📂 Input:   {}", dump.display());
            println!("⏳ Parsing {kind:?} rows...");
            let output = fs::read_to_string(&dump)?;
            let rows = RowParser::for_kind(kind).parse_rows(&output);
            match kind {
                RowKind::Message => {
                    export(normalize_messages(&rows), &report, folder, &mut config)
                }
                RowKind::Call => {
                    let mut calls = normalize_calls(&rows);
                    sort_newest_first(&mut calls);
                    export(calls, &report, folder, &mut config)
                }
                RowKind::Media => {
                    export(normalize_media_rows(&rows), &report, folder, &mut config)
                }
            }
        }
        Command::Collect { dest, no_archive } => {
            let bridge = connect(&config);
            collect(&bridge, &dest, no_archive)?;
            Ok(0)
        }
    }
}

fn connect(config: &Config) -> AdbBridge {
    let bridge = AdbBridge::new(config.bridge.clone());
    if bridge.device_connected() {
        println!("📱 Device:  connected");
    } else {
        println!("⚠️  No authorized device found; queries will return nothing");
    }
    bridge
}

/// Filters, writes every requested format and prints the summary.
fn export<R: ReportRecord + Filterable>(
    records: Vec<R>,
    report: &ReportArgs,
    folder: Option<String>,
    config: &mut Config,
) -> Result<usize> {
    let start = Instant::now();
    if let Some(dir) = &report.output {
        config.output.dir = dir.clone();
    }
    if report.bom {
        config.output.bom = true;
    }

    let mut filters = FilterConfig::new();
    if let Some(after) = &report.after {
        filters = filters.with_date_from(after);
        println!("📅 After:   {}", after);
    }
    if let Some(before) = &report.before {
        filters = filters.with_date_to(before);
        println!("📅 Before:  {}", before);
    }
    if let Some(token) = folder {
        println!("📁 Folder:  {}", token);
        filters = filters.with_folder(token);
    }
    if (report.after.is_some() || report.before.is_some()) && !filters.has_date_filter() {
        println!("⚠️  Date filter needs valid --after and --before; showing all dates");
    }

    let found = records.len();
    println!("   Found {} {}", found, R::KIND.noun());

    let kept = if filters.is_active() {
        println!("🔍 Filtering...");
        let kept = apply_filters(records, &filters);
        println!("   {} {} after filtering", kept.len(), R::KIND.noun());
        kept
    } else {
        records
    };
    let stats = ExtractionStats::new(R::KIND, found, kept.len());

    let mut saved: Vec<(ReportFormat, PathBuf)> = Vec::new();
    let mut failed = 0;
    if !kept.is_empty() {
        let mut formats: Vec<ReportFormat> = Vec::new();
        for format in report.format.iter().map(|f| ReportFormat::from(*f)) {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        for format in formats {
            let path = format.output_path(&config.output.dir, R::KIND.file_stem());
            println!("💾 Writing {}...", format);
            match write_report(&kept, &path, format, config) {
                Ok(_) => saved.push((format, path)),
                Err(e) => {
                    eprintln!("❌ {} report failed: {}", format, e);
                    failed += 1;
                }
            }
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   Found:     {} {}", stats.found, stats.kind.noun());
    if filters.is_active() {
        println!(
            "   Filtered:  {} removed ({:.1}%)",
            stats.filtered_out(),
            stats.filtered_ratio()
        );
    }
    if stats.kept == 0 {
        println!("   No {} to save", stats.kind.noun());
    } else if saved.is_empty() {
        println!("   Saved:     0 {}", stats.kind.noun());
    } else {
        println!("   Saved:     {}", stats);
    }
    for (format, path) in &saved {
        println!("   {}:       {}", format, path.display());
    }
    println!("   Time:      {:.2}s", start.elapsed().as_secs_f64());

    if failed == 0 && !saved.is_empty() {
        println!();
        println!("✅ Done!");
    }
    Ok(failed)
}

fn collect(bridge: &AdbBridge, dest: &Path, no_archive: bool) -> Result<()> {
    println!("📱 Pulling app data into {}...", dest.display());
    fs::create_dir_all(dest)?;
    let summary = pull_app_data(bridge, &default_targets(), dest);

    for label in &summary.missing {
        println!("⚠️  {} not found", label);
    }
    println!("   Pulled {} item(s)", summary.pulled.len());

    if !no_archive {
        let archive = PathBuf::from(archive_name(chrono::Local::now().naive_local()));
        let files = zip_directory(dest, &archive)?;
        println!("🗜️  {} file(s) zipped to {}", files, archive.display());
    }

    println!();
    println!("✅ Extraction complete. Data is saved in {}", dest.display());
    println!(
        "🔐 Reminder: WhatsApp .crypt14 databases need the key from /data/data/com.whatsapp/files/key"
    );
    Ok(())
}
