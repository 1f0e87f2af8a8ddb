//! Preload command.

use std::path::Path;

use crate::cli::output;
use crate::core::preload::{self, PreloadOptions};
use crate::error::Result;

/// Expand the `@PreLoad` annotation of `file`.
///
/// Prints the rewritten source unless `write` is set, in which case the
/// file is updated in place.
pub fn execute(file: &Path, pattern: String, extension: String, write: bool) -> Result<()> {
    let source = std::fs::read_to_string(file)?;
    let context = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let options = PreloadOptions { pattern, extension };

    let Some(injection) = preload::inject(&source, context, &options)? else {
        output::dimmed(&format!("no @PreLoad annotation in {}", file.display()));
        return Ok(());
    };

    if write {
        std::fs::write(file, &injection.source)?;
        output::success(&format!(
            "injected {} module(s) from {} into {}",
            injection.modules.len(),
            output::path(&injection.component_dir.display().to_string()),
            file.display()
        ));
    } else {
        print!("{}", injection.source);
    }
    Ok(())
}
