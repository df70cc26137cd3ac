//! Compiles a declarative content graph (items, blocks, creative tabs, recipes,
//! loot tables and block behaviour) into a Fabric mod project.

mod codegen;
mod compile;
mod error;
pub mod external;
mod ids;
pub mod model;
mod mod_config;
pub mod naming;
mod resources;
mod snippets;

pub use compile::{CompileOptions, CompileReport, FileAction, FileOutcome};
pub use error::{CompileError, ValidationError, ValidationErrorKind};
pub use external::{
    BuildDriver, DriverError, ExistingDirectory, GitTemplate, GradleDriver, ProjectSkeleton,
    SkeletonError, DEFAULT_TEMPLATE_URL,
};
pub use ids::{validate_mod_id, ContentId, IdError};
pub use model::{
    Block, BlockHooks, DropCount, FoodProperties, GroupIcon, GroupRef, Item, ItemGroup, ItemKind,
    LootEntry, LootKind, LootPool, LootTable, LootTableError, MiningLevel, Recipe, RecipeError,
    Rolls, ToolProperties, ToolType, VanillaGroup,
};
pub use mod_config::{ModConfig, Registration};
pub use snippets::{
    actions, compose_hook, message, ActionError, ComposedHook, Fragment, HookEvent, Scope,
    SCHEDULER_TYPE, SUCCESS_STATEMENT,
};
