mod block_class;
mod entrypoint;
mod imports;
mod java;
mod registry;
mod scheduler;

use crate::compile::plan::ModPlan;
use crate::snippets::SCHEDULER_TYPE;

pub(crate) use entrypoint::entrypoint_class;
pub(crate) use java::escape_java_string;

/// One generated Java source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JavaUnit {
    pub path: String,
    pub owner: String,
    pub source: String,
}

pub(crate) fn generate_sources(plan: &ModPlan<'_>) -> Vec<JavaUnit> {
    let package_dir = format!("src/main/java/{}", plan.package.replace('.', "/"));
    let mut units = vec![
        JavaUnit {
            path: format!("{package_dir}/{}.java", plan.registry_type),
            owner: format!("registry unit of {}", plan.mod_id()),
            source: registry::render_registry(plan),
        },
        JavaUnit {
            path: format!("{package_dir}/{}.java", plan.entrypoint_type),
            owner: format!("entrypoint of {}", plan.mod_id()),
            source: entrypoint::render_entrypoint(plan),
        },
    ];
    if plan.uses_scheduler {
        units.push(JavaUnit {
            path: format!("{package_dir}/{SCHEDULER_TYPE}.java"),
            owner: format!("delayed task queue of {}", plan.mod_id()),
            source: scheduler::render_scheduler(plan),
        });
    }
    for (block, specialized) in plan.specialized_blocks() {
        units.push(JavaUnit {
            path: format!("{package_dir}/block/{}.java", specialized.type_name),
            owner: format!("block {}", block.id),
            source: block_class::render_block_class(&plan.package, specialized),
        });
    }
    units
}
