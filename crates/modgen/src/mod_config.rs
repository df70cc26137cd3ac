use std::path::Path;

use crate::compile::{compile_with, CompileOptions, CompileReport};
use crate::error::{CompileError, ValidationError};
use crate::external::{BuildDriver, DriverError, GitTemplate, ProjectSkeleton};
use crate::model::{Block, Item, LootTable};

/// An item or block, kept in one list so registration order survives into the output.
#[derive(Debug, Clone)]
pub enum Registration {
    Item(Item),
    Block(Block),
}

impl Registration {
    pub fn id(&self) -> &str {
        match self {
            Self::Item(item) => item.id(),
            Self::Block(block) => block.id(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Item(item) => item.kind_label(),
            Self::Block(_) => "block",
        }
    }
}

/// The root of a content graph: mod metadata plus everything registered on it.
#[derive(Debug, Clone)]
pub struct ModConfig {
    mod_id: String,
    name: String,
    description: String,
    version: String,
    authors: Vec<String>,
    registrations: Vec<Registration>,
    loot_tables: Vec<(String, LootTable)>,
}

impl ModConfig {
    pub fn new(mod_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            name: name.into(),
            description: String::new(),
            version: "1.0.0".to_string(),
            authors: Vec::new(),
            registrations: Vec::new(),
            loot_tables: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn register_item(&mut self, item: Item) -> Result<(), ValidationError> {
        self.register(Registration::Item(item))
    }

    /// Food items are items of [`ItemKind::Food`](crate::model::ItemKind) and share their ordering.
    pub fn register_food_item(&mut self, item: Item) -> Result<(), ValidationError> {
        self.register(Registration::Item(item))
    }

    pub fn register_block(&mut self, block: Block) -> Result<(), ValidationError> {
        self.register(Registration::Block(block))
    }

    /// Registers a table that is not attached to a block. Bare names live in the mod namespace.
    pub fn register_loot_table(
        &mut self,
        name: impl Into<String>,
        table: LootTable,
    ) -> Result<(), ValidationError> {
        let name = name.into();
        let key = self.namespaced(&name);
        if self
            .loot_tables
            .iter()
            .any(|(existing, _)| self.namespaced(existing) == key)
        {
            return Err(ValidationError::DuplicateId {
                id: key,
                existing: "loot table",
                duplicate: "loot table",
            });
        }
        self.loot_tables.push((name, table));
        Ok(())
    }

    fn namespaced(&self, name: &str) -> String {
        if name.contains(':') {
            name.to_string()
        } else {
            format!("{}:{name}", self.mod_id)
        }
    }

    fn register(&mut self, registration: Registration) -> Result<(), ValidationError> {
        if let Some(existing) = self
            .registrations
            .iter()
            .find(|existing| existing.id() == registration.id())
        {
            return Err(ValidationError::DuplicateId {
                id: registration.id().to_string(),
                existing: existing.label(),
                duplicate: registration.label(),
            });
        }
        self.registrations.push(registration);
        Ok(())
    }

    pub fn mod_id(&self) -> &str {
        &self.mod_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn version_text(&self) -> &str {
        &self.version
    }

    pub fn author_list(&self) -> &[String] {
        &self.authors
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.registrations.iter().filter_map(|registration| match registration {
            Registration::Item(item) => Some(item),
            Registration::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.registrations.iter().filter_map(|registration| match registration {
            Registration::Block(block) => Some(block),
            Registration::Item(_) => None,
        })
    }

    pub fn loot_tables(&self) -> impl Iterator<Item = (&str, &LootTable)> {
        self.loot_tables
            .iter()
            .map(|(name, table)| (name.as_str(), table))
    }

    /// Compiles into `project_dir`, cloning the default template there first when it is missing.
    pub fn compile(&self, project_dir: impl AsRef<Path>) -> Result<CompileReport, CompileError> {
        compile_with(
            self,
            &GitTemplate::default(),
            project_dir.as_ref(),
            &CompileOptions::default(),
        )
    }

    pub fn compile_with(
        &self,
        skeleton: &dyn ProjectSkeleton,
        project_dir: impl AsRef<Path>,
        options: &CompileOptions,
    ) -> Result<CompileReport, CompileError> {
        compile_with(self, skeleton, project_dir.as_ref(), options)
    }

    pub fn build(&self, driver: &dyn BuildDriver, project_dir: impl AsRef<Path>) -> Result<(), DriverError> {
        driver.build(project_dir.as_ref())
    }

    pub fn run(&self, driver: &dyn BuildDriver, project_dir: impl AsRef<Path>) -> Result<(), DriverError> {
        driver.run(project_dir.as_ref())
    }
}
