use std::path::Path;

use timeline_analyze::{missing_breaking_changes, PlaceholderBreakingChange, TimelineIndex};

use crate::commands::load_or_exit;
use crate::OutputFormat;

/// Print a placeholder breaking change for every deprecation whose
/// counterpart is missing, ready to be filled in and added to the timeline.
///
/// The placeholders are JSON in both output modes; text mode adds a summary
/// line on stderr.
pub(crate) fn cmd_scaffold(file: &Path, output: OutputFormat, quiet: bool) {
    let releases = load_or_exit(file, output, quiet);
    let index = TimelineIndex::build(&releases);
    let missing = missing_breaking_changes(&releases, &index);

    let placeholders: Vec<&PlaceholderBreakingChange> =
        missing.values().map(|m| &m.placeholder).collect();

    if output == OutputFormat::Text && !quiet {
        eprintln!("{} missing breaking change(s)", placeholders.len());
    }

    let json = serde_json::to_string_pretty(&placeholders)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", json);
}
