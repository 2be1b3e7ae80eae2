pub(crate) mod check;
pub(crate) mod scaffold;
pub(crate) mod stats;

use std::path::Path;
use std::process;

use timeline_interchange::Release;

use crate::{report_error, OutputFormat};

/// Load a timeline file or exit with an error message.
pub(crate) fn load_or_exit(file: &Path, output: OutputFormat, quiet: bool) -> Vec<Release> {
    match timeline_interchange::load_timeline(file) {
        Ok(releases) => releases,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}
