use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::ExportKind;
use crate::errors::TrackerError;

use super::usage_error;

const IMPORT_USAGE: &str = "import <path>";
const EXPORT_USAGE: &str = "export backup|month [directory]";
const CLEAR_USAGE: &str = "clear month|all";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "import",
            "Merge a JSON backup into the saved data",
            IMPORT_USAGE,
            cmd_import,
        ),
        CommandEntry::new(
            "export",
            "Write a full backup or the current month to a JSON file",
            EXPORT_USAGE,
            cmd_export,
        ),
        CommandEntry::new(
            "clear",
            "Clear this month's expenses or all saved data",
            CLEAR_USAGE,
            cmd_clear,
        ),
    ]
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error(IMPORT_USAGE));
    };
    match context.tracker.import_file(Path::new(path)) {
        Ok(outcome) => {
            if !outcome.changed() {
                output::info("Nothing new to merge.");
            }
            Ok(())
        }
        Err(TrackerError::Import(reason)) => {
            warn!(%reason, "import rejected");
            output::error("Could not parse JSON file.");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, dir) = match args {
        [kind] => (parse_kind(kind)?, context.config.export_dir()),
        [kind, dir] => (parse_kind(kind)?, PathBuf::from(dir)),
        _ => return Err(usage_error(EXPORT_USAGE)),
    };
    let path = context.tracker.export(kind, &dir)?;
    output::success(format!("Exported to {}.", path.display()));
    Ok(())
}

fn parse_kind(raw: &str) -> Result<ExportKind, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "backup" => Ok(ExportKind::Backup),
        "month" => Ok(ExportKind::Month),
        _ => Err(usage_error(EXPORT_USAGE)),
    }
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["month"] => {
            if context.confirm("Clear all expenses for this month?")? {
                context.tracker.clear_month()?;
            } else {
                output::info("Nothing cleared.");
            }
            Ok(())
        }
        ["all"] => {
            if context.confirm("Clear ALL saved data? This cannot be undone.")? {
                context.tracker.clear_all()?;
            } else {
                output::info("Nothing cleared.");
            }
            Ok(())
        }
        _ => Err(usage_error(CLEAR_USAGE)),
    }
}
