mod assets;
mod data;
mod metadata;

use std::path::Path;

use crate::compile::output::GeneratedFile;
use crate::compile::plan::ModPlan;
use crate::error::CompileError;

/// Data and asset files. None of them depend on what the project directory holds.
pub(crate) fn render_resources(plan: &ModPlan<'_>) -> Result<Vec<GeneratedFile>, CompileError> {
    let mut files = data::recipe_files(plan);
    files.extend(data::loot_table_files(plan));
    files.extend(data::tag_files(plan)?);
    files.push(assets::lang_file(plan)?);
    files.extend(assets::model_files(plan)?);
    Ok(files)
}

/// `fabric.mod.json`, merged into whatever the prepared skeleton already ships.
pub(crate) fn render_project_metadata(
    plan: &ModPlan<'_>,
    project_dir: &Path,
) -> Result<GeneratedFile, CompileError> {
    metadata::fabric_mod_json(plan, project_dir)
}
