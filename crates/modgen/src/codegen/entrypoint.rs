use std::collections::BTreeSet;

use super::imports as classes;
use super::java::SourceWriter;
use crate::compile::plan::ModPlan;

/// The `ModInitializer` named in the metadata entrypoints.
pub(crate) fn render_entrypoint(plan: &ModPlan<'_>) -> String {
    let imports = BTreeSet::from([classes::MOD_INITIALIZER.to_string()]);
    let mut writer = SourceWriter::new();
    writer.header(&plan.package, &imports);
    writer.open(format!(
        "public final class {} implements ModInitializer {{",
        plan.entrypoint_type
    ));
    writer.line("@Override");
    writer.open("public void onInitialize() {");
    writer.line(format!("{}.initialize();", plan.registry_type));
    writer.close("}");
    writer.close("}");
    writer.finish()
}

pub(crate) fn entrypoint_class(plan: &ModPlan<'_>) -> String {
    format!("{}.{}", plan.package, plan.entrypoint_type)
}
