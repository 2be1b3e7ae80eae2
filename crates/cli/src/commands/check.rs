use std::path::Path;
use std::process;

use timeline_analyze::AnalysisReport;
use timeline_interchange::{FileTimeline, TimelineFeed, TimelineSource};

use crate::config::resolve_config;
use crate::{report_error, OutputFormat};

pub(crate) struct CheckOptions<'a> {
    pub file: &'a Path,
    pub all: bool,
    pub config: Option<&'a Path>,
    pub marker: Option<&'a str>,
    pub output: OutputFormat,
    pub quiet: bool,
}

pub(crate) fn cmd_check(opts: CheckOptions<'_>) {
    let CheckOptions {
        file,
        all,
        config,
        marker,
        output,
        quiet,
    } = opts;

    // Step 1: Resolve checklist options (config file, then flags)
    let mut options = match resolve_config(config) {
        Ok(c) => c.checklist,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };
    if all {
        options.only_wrong = false;
    }
    if let Some(marker) = marker {
        options.example_marker = marker.to_string();
    }

    // Step 2: Every published snapshot runs the full pipeline
    let mut has_findings = false;
    let mut feed = TimelineFeed::new();
    feed.subscribe(|releases| {
        let report = timeline_analyze::analyze(releases, &options);
        has_findings = report.has_findings();
        if !quiet {
            print_report(&report, output);
        }
    });

    // Step 3: Load the timeline and publish it
    let source = FileTimeline::new(file);
    match feed.refresh(&source) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(source = %source.describe(), "timeline contains no releases, nothing to check");
        }
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
    drop(feed);

    // Step 4: Exit code based on findings
    if has_findings {
        process::exit(1);
    }
}

fn print_report(report: &AnalysisReport, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", report.checklist.render());
        }
    }
}
