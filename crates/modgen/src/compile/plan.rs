use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::CompileOptions;
use crate::error::ValidationError;
use crate::ids::{validate_mod_id, within_loader_length, ContentId, IdError};
use crate::model::{
    Block, GroupIcon, GroupRef, Item, ItemGroup, ItemKind, LootTable, Recipe, ToolType,
    VanillaGroup,
};
use crate::mod_config::{ModConfig, Registration};
use crate::naming::{constant_name, pascal_case, type_name, NameTable};
use crate::snippets::{compose_hook, ComposedHook, HookEvent, SCHEDULER_TYPE};

/// A validated content graph with every generated name assigned.
#[derive(Debug)]
pub(crate) struct ModPlan<'a> {
    pub config: &'a ModConfig,
    pub package: String,
    pub registry_type: String,
    pub entrypoint_type: String,
    pub entries: Vec<PlannedEntry<'a>>,
    pub tabs: Vec<PlannedTab<'a>>,
    pub loot_tables: Vec<PlannedLootTable<'a>>,
    /// Some hook hands work to the generated delayed task queue.
    pub uses_scheduler: bool,
}

impl<'a> ModPlan<'a> {
    pub(crate) fn mod_id(&self) -> &str {
        self.config.mod_id()
    }

    pub(crate) fn specialized_blocks(
        &self,
    ) -> impl Iterator<Item = (&PlannedBlock<'a>, &Specialization)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            PlannedEntry::Block(block) => match &block.class {
                BlockClass::Specialized(specialized) => Some((block, specialized)),
                BlockClass::Default => None,
            },
            PlannedEntry::Item(_) => None,
        })
    }
}

#[derive(Debug)]
pub(crate) enum PlannedEntry<'a> {
    Item(PlannedItem<'a>),
    Block(PlannedBlock<'a>),
}

#[derive(Debug)]
pub(crate) struct PlannedItem<'a> {
    pub item: &'a Item,
    pub id: ContentId,
    pub field: String,
    pub tool: Option<PlannedTool>,
}

#[derive(Debug)]
pub(crate) struct PlannedTool {
    pub material_field: String,
    pub repair: RepairTag,
}

/// Item tag listing what repairs a tool. Without an ingredient the tag stays empty.
#[derive(Debug)]
pub(crate) struct RepairTag {
    pub field: String,
    pub tag_id: ContentId,
    pub ingredient: Option<ContentId>,
}

#[derive(Debug)]
pub(crate) struct PlannedBlock<'a> {
    pub block: &'a Block,
    pub id: ContentId,
    pub field: String,
    pub item_field: String,
    pub class: BlockClass,
}

/// Picked once per block: the stock block type, or a generated subclass.
#[derive(Debug)]
pub(crate) enum BlockClass {
    Default,
    Specialized(Specialization),
}

#[derive(Debug)]
pub(crate) struct Specialization {
    pub type_name: String,
    pub speeds: Vec<(ToolType, f32)>,
    pub hooks: Vec<ComposedHook>,
}

#[derive(Debug)]
pub(crate) enum TabTarget<'a> {
    Vanilla(VanillaGroup),
    Custom(CustomTab<'a>),
}

#[derive(Debug)]
pub(crate) struct CustomTab<'a> {
    pub group: &'a ItemGroup,
    pub id: ContentId,
    pub field: String,
    pub key_field: String,
    pub icon: IconSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IconSource {
    Field(String),
    Registry(String),
}

#[derive(Debug)]
pub(crate) struct PlannedTab<'a> {
    pub target: TabTarget<'a>,
    pub members: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct PlannedLootTable<'a> {
    pub table: &'a LootTable,
    pub owner: String,
    pub path: String,
}

pub(crate) fn plan<'a>(
    config: &'a ModConfig,
    options: &CompileOptions,
) -> Result<ModPlan<'a>, ValidationError> {
    let mod_id = config.mod_id();
    validate_mod_id(mod_id).map_err(|source| malformed("mod", mod_id, source))?;
    if !within_loader_length(mod_id) {
        warn!(mod_id, length = mod_id.len(), "mod_id_length_rejected_by_loader");
    }

    let mod_type = pascal_case(mod_id);
    let mut planner = Planner {
        mod_id,
        names: NameTable::default(),
        declared: HashMap::new(),
        fields: HashMap::new(),
        tabs: Vec::new(),
        tab_index: HashMap::new(),
    };
    let registry_type = format!("{mod_type}Registry");
    let entrypoint_type = format!("{mod_type}Mod");
    planner.names.reserve(&registry_type, mod_id)?;
    planner.names.reserve(&entrypoint_type, mod_id)?;
    planner.names.reserve(SCHEDULER_TYPE, mod_id)?;

    let mut entries = Vec::with_capacity(config.registrations().len());
    for registration in config.registrations() {
        let entry = match registration {
            Registration::Item(item) => PlannedEntry::Item(planner.plan_item(item)?),
            Registration::Block(block) => PlannedEntry::Block(planner.plan_block(block)?),
        };
        entries.push(entry);
    }

    let mut loot_tables = Vec::new();
    for entry in &entries {
        if let PlannedEntry::Block(planned) = entry {
            if let Some(table) = planned.block.loot_table_ref() {
                let owner = planned.id.to_string();
                check_loot_table(&owner, table)?;
                loot_tables.push(PlannedLootTable {
                    table,
                    path: format!(
                        "data/{}/loot_table/blocks/{}.json",
                        planned.id.namespace(),
                        planned.id.path()
                    ),
                    owner,
                });
            }
        }
    }
    for (name, table) in config.loot_tables() {
        let id = planner.local_id("loot table", name)?;
        let owner = id.to_string();
        check_loot_table(&owner, table)?;
        let category = table.category();
        if ContentId::new("minecraft", category).is_err() {
            return Err(ValidationError::InvalidLootTable {
                owner,
                reason: format!("category '{category}' is not a valid directory path"),
            });
        }
        loot_tables.push(PlannedLootTable {
            table,
            path: format!(
                "data/{}/loot_table/{category}/{}.json",
                id.namespace(),
                id.path()
            ),
            owner,
        });
    }

    let uses_scheduler = entries.iter().any(|entry| match entry {
        PlannedEntry::Block(PlannedBlock {
            class: BlockClass::Specialized(specialized),
            ..
        }) => specialized.hooks.iter().any(|hook| hook.scheduled),
        _ => false,
    });
    let tabs = planner.finish_tabs()?;
    debug!(
        mod_id,
        entries = entries.len(),
        tabs = tabs.len(),
        loot_tables = loot_tables.len(),
        uses_scheduler,
        "content_plan_ready"
    );
    Ok(ModPlan {
        config,
        package: format!("{}.{}", options.base_package, mod_id.replace('-', "_")),
        registry_type,
        entrypoint_type,
        entries,
        tabs,
        loot_tables,
        uses_scheduler,
    })
}

enum PendingTab<'a> {
    Vanilla(VanillaGroup),
    Custom {
        group: &'a ItemGroup,
        id: ContentId,
        field: String,
        key_field: String,
    },
}

impl PendingTab<'_> {
    fn key(&self) -> String {
        match self {
            Self::Vanilla(vanilla) => vanilla.registry_id().to_string(),
            Self::Custom { id, .. } => id.to_string(),
        }
    }
}

struct Planner<'a> {
    mod_id: &'a str,
    names: NameTable,
    /// Raw id to the label of what declared it.
    declared: HashMap<String, &'static str>,
    /// Raw id to the registry field of its item form.
    fields: HashMap<String, String>,
    tabs: Vec<(PendingTab<'a>, Vec<String>)>,
    tab_index: HashMap<String, usize>,
}

impl<'a> Planner<'a> {
    fn plan_item(&mut self, item: &'a Item) -> Result<PlannedItem<'a>, ValidationError> {
        let id = self.declare(item.id(), item.kind_label())?;
        let owner = id.to_string();
        let field = constant_name(&id);
        self.names.reserve(&field, &owner)?;
        if let Some(recipe) = item.recipe_ref() {
            check_recipe(&owner, recipe)?;
        }

        let tool = match item.kind() {
            ItemKind::Tool(tool) => {
                let material_field = format!("{field}_MATERIAL");
                self.names.reserve(&material_field, &owner)?;
                let ingredient = match &tool.repair_ingredient {
                    Some(raw) => Some(
                        ContentId::parse(raw)
                            .map_err(|source| malformed("repair ingredient", raw, source))?,
                    ),
                    None => None,
                };
                let repair_field = format!("{field}_REPAIR_MATERIALS");
                self.names.reserve(&repair_field, &owner)?;
                let tag_id = ContentId::new(id.namespace(), &format!("{}_repair_materials", id.path()))
                    .map_err(|source| malformed("repair tag", &owner, source))?;
                let repair = RepairTag {
                    field: repair_field,
                    tag_id,
                    ingredient,
                };
                Some(PlannedTool {
                    material_field,
                    repair,
                })
            }
            ItemKind::Plain | ItemKind::Food(_) => None,
        };

        self.fields.insert(item.id().to_string(), field.clone());
        if let Some(group) = item.group_ref() {
            self.join_tab(group, &field)?;
        }
        Ok(PlannedItem {
            item,
            id,
            field,
            tool,
        })
    }

    fn plan_block(&mut self, block: &'a Block) -> Result<PlannedBlock<'a>, ValidationError> {
        let id = self.declare(block.id(), "block")?;
        let owner = id.to_string();
        let field = constant_name(&id);
        let item_field = format!("{field}_ITEM");
        self.names.reserve(&field, &owner)?;
        self.names.reserve(&item_field, &owner)?;
        if let Some(recipe) = block.recipe_ref() {
            check_recipe(&owner, recipe)?;
        }

        let hooks = HookEvent::ALL
            .into_iter()
            .filter_map(|event| {
                let fragments = block.hook_fragments(event)?;
                compose_hook(event, &fragments)
            })
            .collect::<Vec<_>>();
        let speeds = block
            .speed_overrides()
            .iter()
            .map(|(tool, speed)| (*tool, *speed))
            .collect::<Vec<_>>();
        let class = if hooks.is_empty() && speeds.is_empty() {
            BlockClass::Default
        } else {
            let class_name = type_name(&id, "Block");
            self.names.reserve(&class_name, &owner)?;
            BlockClass::Specialized(Specialization {
                type_name: class_name,
                speeds,
                hooks,
            })
        };

        self.fields.insert(block.id().to_string(), item_field.clone());
        if let Some(group) = block.group_ref() {
            self.join_tab(group, &item_field)?;
        }
        Ok(PlannedBlock {
            block,
            id,
            field,
            item_field,
            class,
        })
    }

    fn declare(&mut self, raw: &str, label: &'static str) -> Result<ContentId, ValidationError> {
        let id = ContentId::parse(raw).map_err(|source| malformed(label, raw, source))?;
        if let Some(existing) = self.declared.get(raw) {
            return Err(ValidationError::DuplicateId {
                id: raw.to_string(),
                existing,
                duplicate: label,
            });
        }
        self.declared.insert(raw.to_string(), label);
        Ok(id)
    }

    /// Bare names take the mod id as namespace.
    fn local_id(&self, subject: &'static str, raw: &str) -> Result<ContentId, ValidationError> {
        let parsed = if raw.contains(':') {
            ContentId::parse(raw)
        } else {
            ContentId::new(self.mod_id, raw)
        };
        parsed.map_err(|source| malformed(subject, raw, source))
    }

    fn join_tab(&mut self, group: &'a GroupRef, member: &str) -> Result<(), ValidationError> {
        let tab = match group {
            GroupRef::Vanilla(vanilla) => PendingTab::Vanilla(*vanilla),
            GroupRef::Custom(custom) => {
                let id = self.local_id("item group", custom.id())?;
                if VanillaGroup::from_registry_id(&id.to_string()).is_some() {
                    return Err(ValidationError::ReservedItemGroup { id: id.to_string() });
                }
                let field = format!("{}_TAB", constant_name(&id));
                PendingTab::Custom {
                    group: custom,
                    key_field: format!("{field}_KEY"),
                    field,
                    id,
                }
            }
        };
        let key = tab.key();

        if let Some(&index) = self.tab_index.get(&key) {
            let (existing, members) = &mut self.tabs[index];
            if let (
                PendingTab::Custom { group: first, .. },
                PendingTab::Custom { group: second, .. },
            ) = (existing, &tab)
            {
                if first.name() != second.name() || first.icon_ref() != second.icon_ref() {
                    return Err(ValidationError::ConflictingItemGroup { id: key });
                }
            }
            members.push(member.to_string());
            return Ok(());
        }

        if let PendingTab::Custom {
            field, key_field, ..
        } = &tab
        {
            self.names.reserve(field, &key)?;
            self.names.reserve(key_field, &key)?;
        }
        self.tab_index.insert(key, self.tabs.len());
        self.tabs.push((tab, vec![member.to_string()]));
        Ok(())
    }

    fn finish_tabs(&mut self) -> Result<Vec<PlannedTab<'a>>, ValidationError> {
        let pending = std::mem::take(&mut self.tabs);
        let mut tabs = Vec::with_capacity(pending.len());
        for (tab, members) in pending {
            let target = match tab {
                PendingTab::Vanilla(vanilla) => TabTarget::Vanilla(vanilla),
                PendingTab::Custom {
                    group,
                    id,
                    field,
                    key_field,
                } => {
                    let icon = self.resolve_icon(group, &members)?;
                    TabTarget::Custom(CustomTab {
                        group,
                        id,
                        field,
                        key_field,
                        icon,
                    })
                }
            };
            tabs.push(PlannedTab { target, members });
        }
        Ok(tabs)
    }

    /// Without an explicit icon the first member stands in.
    fn resolve_icon(&self, group: &ItemGroup, members: &[String]) -> Result<IconSource, ValidationError> {
        match group.icon_ref() {
            Some(GroupIcon::Entity(raw)) => match self.fields.get(raw) {
                Some(field) => Ok(IconSource::Field(field.clone())),
                None => registry_icon(raw),
            },
            Some(GroupIcon::Literal(raw)) => registry_icon(raw),
            None => Ok(members
                .first()
                .map(|field| IconSource::Field(field.clone()))
                .unwrap_or_else(|| IconSource::Registry("minecraft:barrier".to_string()))),
        }
    }
}

fn registry_icon(raw: &str) -> Result<IconSource, ValidationError> {
    let id = ContentId::parse(raw).map_err(|source| malformed("group icon", raw, source))?;
    Ok(IconSource::Registry(id.to_string()))
}

fn malformed(subject: &'static str, raw: &str, source: IdError) -> ValidationError {
    ValidationError::MalformedId {
        subject,
        id: raw.to_string(),
        source,
    }
}

fn check_recipe(owner: &str, recipe: &Recipe) -> Result<(), ValidationError> {
    recipe
        .check_compilable()
        .map_err(|reason| ValidationError::InvalidRecipe {
            owner: owner.to_string(),
            reason,
        })
}

fn check_loot_table(owner: &str, table: &LootTable) -> Result<(), ValidationError> {
    if let Some(pools) = table.data().get("pools") {
        if !pools.is_array() {
            return Err(ValidationError::InvalidLootTable {
                owner: owner.to_string(),
                reason: "'pools' must be an array".to_string(),
            });
        }
    }
    for (pool_index, pool) in table.pools().iter().enumerate() {
        let has_entries = pool
            .get("entries")
            .and_then(Value::as_array)
            .is_some_and(|entries| !entries.is_empty());
        if !has_entries {
            return Err(ValidationError::EmptyLootPool {
                owner: owner.to_string(),
                pool_index,
            });
        }
    }
    Ok(())
}
