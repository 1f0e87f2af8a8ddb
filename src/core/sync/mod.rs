//! Model synchronisation.
//!
//! Projects the CMS content type catalog onto a directory of generated
//! TypeScript files: one model file per type, the type mapper, and the
//! optional `schema.json`. Generated files have no identity of their own;
//! every run evicts what the catalog no longer names and rewrites the rest.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::remote::{AuthService, ModelCatalog, TypeDetail, TypeSummary};
use crate::error::{ConfigError, Result, SyncError, WriteFailure};

mod mapper;
mod model;
mod schema;
mod typescript;

pub use model::{instance_name, interface_name, props_name, ModelFile, PropertyKind};
pub use schema::{Schema, SchemaEntry, SchemaProperty};
pub use typescript::{field_name, safe_model_name};

/// Where and how to synchronise.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Output directory for the generated files.
    pub output: PathBuf,
    /// Maximum number of type detail requests in flight.
    pub concurrency: usize,
    /// Whether to write `schema.json`.
    pub schema: bool,
}

impl SyncOptions {
    /// Options for the configured model directory (`EPI_MODEL_PATH`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingModelDir` if the directory resolves to
    /// an empty value.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dir = config.model_dir();
        if dir.trim().is_empty() {
            return Err(ConfigError::MissingModelDir.into());
        }
        Ok(Self {
            output: config.root_dir().join(dir),
            concurrency: constants::SYNC_CONCURRENCY,
            schema: true,
        })
    }
}

/// What a run did.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// The user the run was authenticated as, if any.
    pub user: Option<String>,
    /// Number of types in the catalog.
    pub types: usize,
    /// Stale files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Generated files that were written.
    pub written: Vec<PathBuf>,
    /// Catalog names whose detail could not be fetched.
    pub skipped: Vec<String>,
}

/// One synchronisation job against a CMS.
pub struct ModelSync<'a, S: ?Sized> {
    service: &'a S,
    options: SyncOptions,
}

impl<'a, S> ModelSync<'a, S>
where
    S: ModelCatalog + AuthService + ?Sized,
{
    pub fn new(service: &'a S, options: SyncOptions) -> Self {
        Self { service, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run the job.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::CatalogUnavailable` if the catalog cannot be
    /// fetched (the output directory is left untouched), or
    /// `SyncError::WriteFailures` listing every generated file that could
    /// not be written or evicted.
    pub async fn run(&self) -> Result<SyncReport> {
        let output = &self.options.output;
        let mut report = SyncReport {
            user: self.current_user().await,
            ..SyncReport::default()
        };

        debug!(path = %output.display(), "ensuring model directory");
        tokio::fs::create_dir_all(output).await?;

        let types = match self.service.list_types().await {
            Ok(Some(types)) => types,
            Ok(None) => {
                return Err(SyncError::CatalogUnavailable(
                    "the model service returned no data".to_string(),
                )
                .into())
            }
            Err(e) => return Err(SyncError::CatalogUnavailable(e.to_string()).into()),
        };
        report.types = types.len();
        info!(count = types.len(), "retrieved content types");

        let names: Vec<String> = types.iter().map(|t| t.name.clone()).collect();
        let catalog: HashSet<String> = names.iter().cloned().collect();
        let keep: HashSet<String> = names.iter().map(|n| interface_name(n)).collect();

        let mut failures = Vec::new();
        let clashes = self.name_clashes(&types, &mut failures);
        self.evict(&keep, &mut report, &mut failures).await?;

        let details = self
            .generate_models(&types, &clashes, &catalog, &mut report, &mut failures)
            .await;

        let mapper_path = output.join(mapper::file_name());
        let outcome = write(&mapper_path, mapper::render(&names)).await;
        record(outcome, &mut report, &mut failures);

        if self.options.schema {
            let path = output.join(constants::SCHEMA_FILE);
            let schema = schema::build(
                types
                    .iter()
                    .enumerate()
                    .map(|(i, summary)| (summary, details.get(&i))),
            );
            let outcome = match schema::to_json(&schema) {
                Ok(json) => write(&path, json).await,
                Err(e) => Err(WriteFailure {
                    path,
                    reason: e.to_string(),
                }),
            };
            record(outcome, &mut report, &mut failures);
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(SyncError::WriteFailures(failures).into())
        }
    }

    /// Check (and refresh) the session. The result is informational only:
    /// the catalog may still be readable anonymously.
    async fn current_user(&self) -> Option<String> {
        match self.service.is_authenticated().await {
            Ok(true) => {}
            Ok(false) => {
                info!("using an unauthenticated connection");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "authentication status unavailable");
                return None;
            }
        }

        match self.service.current_user().await {
            Ok(user) => {
                info!(user = user.as_deref().unwrap_or("unknown"), "authenticated");
                user
            }
            Err(e) => {
                warn!(error = %e, "current user unavailable");
                None
            }
        }
    }

    /// Catalog indices whose generated file name was already claimed by an
    /// earlier type. Each one is reported as a write failure and not written.
    fn name_clashes(
        &self,
        types: &[TypeSummary],
        failures: &mut Vec<WriteFailure>,
    ) -> HashSet<usize> {
        let mut claimed: HashMap<String, &str> = HashMap::new();
        let mut clashes = HashSet::new();
        for (index, summary) in types.iter().enumerate() {
            let file = interface_name(&summary.name);
            match claimed.get(&file) {
                Some(owner) => {
                    warn!(name = %summary.name, owner = %owner, "duplicate generated file name");
                    failures.push(WriteFailure {
                        path: self.options.output.join(format!("{file}.ts")),
                        reason: format!(
                            "duplicate generated file name: '{}' and '{}'",
                            owner, summary.name
                        ),
                    });
                    clashes.insert(index);
                }
                None => {
                    claimed.insert(file, &summary.name);
                }
            }
        }
        clashes
    }

    /// Delete every file whose stem is neither the type mapper nor a
    /// generated interface name in `keep`.
    async fn evict(
        &self,
        keep: &HashSet<String>,
        report: &mut SyncReport,
        failures: &mut Vec<WriteFailure>,
    ) -> Result<()> {
        let mut entries = tokio::fs::read_dir(&self.options.output).await?;
        let mut stale = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            if stem != constants::TYPE_MAPPER && !keep.contains(&stem) {
                stale.push(path);
            }
        }
        stale.sort();

        for path in stale {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "removed stale model");
                    report.removed.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to remove stale model");
                    failures.push(WriteFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Fetch every type's detail with bounded concurrency and write its
    /// model file. Returns the fetched details by catalog index.
    async fn generate_models(
        &self,
        types: &[TypeSummary],
        clashes: &HashSet<usize>,
        catalog: &HashSet<String>,
        report: &mut SyncReport,
        failures: &mut Vec<WriteFailure>,
    ) -> HashMap<usize, TypeDetail> {
        let service = self.service;
        let output = &self.options.output;
        let unique = types
            .iter()
            .enumerate()
            .filter(|(index, _)| !clashes.contains(index));

        let mut results = stream::iter(unique)
            .map(|(index, summary)| async move {
                let detail = match service.type_detail(&summary.guid).await {
                    Ok(Some(detail)) => detail,
                    Ok(None) => {
                        warn!(name = %summary.name, "no detail for content type, skipped");
                        return (index, None);
                    }
                    Err(e) => {
                        warn!(
                            name = %summary.name,
                            error = %e,
                            "failed to fetch content type, skipped"
                        );
                        return (index, None);
                    }
                };

                let file = ModelFile::new(&detail, catalog);
                let path = output.join(file.file_name());
                let outcome = write(&path, file.render()).await;
                (index, Some((detail, outcome)))
            })
            .buffer_unordered(self.options.concurrency.max(1));

        let mut details = HashMap::new();
        while let Some((index, fetched)) = results.next().await {
            match fetched {
                Some((detail, outcome)) => {
                    record(outcome, report, failures);
                    details.insert(index, detail);
                }
                None => report.skipped.push(types[index].name.clone()),
            }
        }
        report.written.sort();
        report.skipped.sort();
        details
    }
}

async fn write(path: &Path, contents: String) -> std::result::Result<PathBuf, WriteFailure> {
    match tokio::fs::write(path, contents).await {
        Ok(()) => {
            debug!(path = %path.display(), "written");
            Ok(path.to_path_buf())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to write generated file");
            Err(WriteFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}

fn record(
    outcome: std::result::Result<PathBuf, WriteFailure>,
    report: &mut SyncReport,
    failures: &mut Vec<WriteFailure>,
) {
    match outcome {
        Ok(path) => report.written.push(path),
        Err(failure) => failures.push(failure),
    }
}
