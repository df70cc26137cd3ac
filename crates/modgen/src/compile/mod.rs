mod atomic_io;
mod emit;
mod hashing;
mod manifest;
pub(crate) mod output;
pub(crate) mod plan;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::codegen::generate_sources;
use crate::error::CompileError;
use crate::external::ProjectSkeleton;
use crate::mod_config::ModConfig;
use crate::resources::{render_project_metadata, render_resources};
use output::{GeneratedFile, OutputSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Java package prefix; the mod id is appended as the last segment.
    pub base_package: String,
    /// Recorded in the output manifest.
    pub generator_version: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_package: "com.example".to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    Create,
    Update,
    Unchanged,
    Remove,
}

impl FileAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Unchanged => "unchanged",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// `/`-separated, relative to the project directory.
    pub path: String,
    pub action: FileAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub project_dir: PathBuf,
    pub files: Vec<FileOutcome>,
}

impl CompileReport {
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|file| file.action == action).count()
    }

    pub fn action_for(&self, path: &str) -> Option<FileAction> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.action)
    }
}

/// Validates the whole graph and renders every file that does not depend on the skeleton
/// before the project directory is touched. Only the metadata merge runs after `prepare`.
pub(crate) fn compile_with(
    config: &ModConfig,
    skeleton: &dyn ProjectSkeleton,
    project_dir: &Path,
    options: &CompileOptions,
) -> Result<CompileReport, CompileError> {
    info!(
        mod_id = config.mod_id(),
        project_dir = %project_dir.display(),
        registrations = config.registrations().len(),
        "mod_compile_started"
    );
    let plan = plan::plan(config, options)?;

    let mut output = OutputSet::default();
    output.extend(
        generate_sources(&plan)
            .into_iter()
            .map(|unit| GeneratedFile::text(unit.path, unit.owner, &unit.source)),
    )?;
    output.extend(render_resources(&plan)?)?;
    info!(mod_id = config.mod_id(), files = output.len(), "mod_compile_validated");

    skeleton.prepare(project_dir)?;
    output.insert(render_project_metadata(&plan, project_dir)?)?;

    let files = emit::emit(project_dir, config.mod_id(), &options.generator_version, &output)?;
    let report = CompileReport {
        project_dir: project_dir.to_path_buf(),
        files,
    };
    info!(
        mod_id = config.mod_id(),
        created = report.count(FileAction::Create),
        updated = report.count(FileAction::Update),
        unchanged = report.count(FileAction::Unchanged),
        removed = report.count(FileAction::Remove),
        "mod_compile_finished"
    );
    Ok(report)
}
