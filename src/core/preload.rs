//! `@PreLoad` source rewriting.
//!
//! A source file can ask for every component under a directory to be
//! imported eagerly and registered on a global object:
//!
//! ```text
//! @PreLoad("./components","PreLoad","app/components/")
//! ```
//!
//! [`inject`] replaces the first such annotation with the import and
//! registration statements for the matching files.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;

const START_MARKER: &str = "// Start: Injected PreLoad script";
const END_MARKER: &str = "// End: Injected PreLoad script";

fn annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@PreLoad\("(.*)","(.*)","(.*)"\)"#).expect("preload pattern is valid")
    })
}

/// Which files to pick up below the annotated directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadOptions {
    /// Glob relative to the component directory.
    pub pattern: String,
    /// Extension stripped from file names to form module names.
    pub extension: String,
}

impl Default for PreloadOptions {
    fn default() -> Self {
        Self {
            pattern: "**/*.tsx".to_string(),
            extension: ".tsx".to_string(),
        }
    }
}

/// The arguments of a `@PreLoad(...)` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Component directory, relative to the annotated file.
    pub directory: String,
    /// Global object the modules are registered on.
    pub variable: String,
    /// Prefix of every generated import path.
    pub prefix: String,
}

/// A rewritten source.
#[derive(Debug, Clone)]
pub struct Injection {
    pub annotation: Annotation,
    pub component_dir: PathBuf,
    pub modules: Vec<Module>,
    pub source: String,
}

/// One preloaded component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Import path.
    pub import: String,
    /// Local binding of the default export.
    pub binding: String,
}

/// Find the first annotation in `source`.
pub fn find(source: &str) -> Option<Annotation> {
    locate(source).map(|(_, annotation)| annotation)
}

fn locate(source: &str) -> Option<(Range<usize>, Annotation)> {
    let caps = annotation_regex().captures(source)?;
    let range = caps.get(0)?.range();
    Some((
        range,
        Annotation {
            directory: caps[1].to_string(),
            variable: caps[2].to_string(),
            prefix: caps[3].to_string(),
        },
    ))
}

/// Rewrite `source`, resolving the component directory against `context`
/// (the directory of the annotated file).
///
/// Returns `None` when the source has no annotation.
///
/// # Errors
///
/// Returns `Error::Pattern` if the glob pattern is malformed.
pub fn inject(source: &str, context: &Path, options: &PreloadOptions) -> Result<Option<Injection>> {
    let Some((found, annotation)) = locate(source) else {
        return Ok(None);
    };

    let component_dir = crate::core::aliases::normalize(&context.join(&annotation.directory));
    let files = matching_files(&component_dir, &options.pattern)?;
    debug!(
        dir = %component_dir.display(),
        pattern = %options.pattern,
        files = files.len(),
        "resolved preload components"
    );

    let modules: Vec<Module> = files
        .iter()
        .map(|file| module_for(file, &component_dir, &annotation.prefix, &options.extension))
        .collect();

    let script = render(&annotation.variable, &modules);
    let mut rewritten = String::with_capacity(source.len() + script.len());
    rewritten.push_str(&source[..found.start]);
    rewritten.push_str(&script);
    rewritten.push_str(&source[found.end..]);

    Ok(Some(Injection {
        annotation,
        component_dir,
        modules,
        source: rewritten,
    }))
}

fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let mut files = Vec::new();
    for entry in glob::glob(&full)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "unreadable path while resolving preload components"),
        }
    }
    files.sort();
    Ok(files)
}

fn module_for(file: &Path, component_dir: &Path, prefix: &str, extension: &str) -> Module {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match file_name.strip_suffix(extension) {
        Some(stem) if !stem.is_empty() && !extension.is_empty() => stem.to_string(),
        _ => file_name.clone(),
    };

    let relative = file
        .parent()
        .and_then(|parent| parent.strip_prefix(component_dir).ok())
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    let import = if relative.is_empty() {
        format!("{}{}", prefix, name)
    } else {
        format!("{}{}/{}", prefix, relative, name)
    };

    Module {
        import,
        binding: format!("{}{}", relative.replace('/', ""), name),
    }
}

fn render(variable: &str, modules: &[Module]) -> String {
    let mut script = Vec::new();
    if !variable.contains('.') {
        script.push(format!("declare var {}: any;", variable));
    }
    script.push(format!(
        "try {{ {v} = {v} || {{}}; }} catch (e) {{ {v} = {{}}; }}\n",
        v = variable
    ));
    for module in modules {
        script.push(format!("import {} from '{}';", module.binding, module.import));
    }

    let registrations: Vec<String> = modules
        .iter()
        .map(|m| format!("{}[\"{}\"] = {};", variable, m.import, m.binding))
        .collect();

    let mut out = [
        START_MARKER.to_string(),
        script.join("\n"),
        registrations.join("\n"),
        END_MARKER.to_string(),
    ]
    .join("\n");
    out.push('\n');
    out
}
