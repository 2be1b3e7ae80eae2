use std::path::Path;

use timeline_analyze::TimelineIndex;

use crate::commands::load_or_exit;
use crate::OutputFormat;

pub(crate) fn cmd_stats(file: &Path, output: OutputFormat, quiet: bool) {
    let releases = load_or_exit(file, output, quiet);
    let index = TimelineIndex::build(&releases);

    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "releases": index.releases.len(),
                "deprecations": index.deprecations.len(),
                "breaking_changes": index.breaking_changes.len(),
                "duplicates": index.duplicates,
            });
            let pretty = serde_json::to_string_pretty(&json)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("Timeline Statistics");
            println!("===================");
            println!();
            println!("  Releases: {}", index.releases.len());
            println!("  Deprecations: {}", index.deprecations.len());
            println!("  Breaking changes: {}", index.breaking_changes.len());
            println!();
            println!("Duplicates:");
            if index.duplicates.is_empty() {
                println!("  None.");
            } else {
                for duplicate in &index.duplicates {
                    println!(
                        "  [{}] {} (release {})",
                        duplicate.kind, duplicate.id, duplicate.release
                    );
                }
            }
        }
    }
}
