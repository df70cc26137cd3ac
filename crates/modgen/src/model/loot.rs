use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LootTableError {
    #[error("loot table is not valid json: {0}")]
    Json(String),
    #[error("loot table json must be an object")]
    NotAnObject,
    #[error("loot table json must contain a 'type' field")]
    MissingType,
    #[error("loot table 'type' field must be a non-empty string")]
    InvalidType,
}

/// Roll count of a pool: a constant, a uniform range, or any number provider object.
#[derive(Debug, Clone, PartialEq)]
pub enum Rolls {
    Fixed(u32),
    Uniform { min: u32, max: u32 },
    Raw(Value),
}

impl Rolls {
    fn to_value(&self) -> Value {
        match self {
            Self::Fixed(count) => json!(count),
            Self::Uniform { min, max } => uniform(*min, *max),
            Self::Raw(value) => value.clone(),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, Self::Fixed(0))
    }
}

impl From<u32> for Rolls {
    fn from(count: u32) -> Self {
        Self::Fixed(count)
    }
}

/// A `minecraft:item` pool entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LootEntry {
    item_id: String,
    weight: Option<u32>,
    quality: Option<i32>,
    conditions: Vec<Value>,
    functions: Vec<Value>,
}

impl LootEntry {
    pub fn item(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            weight: None,
            quality: None,
            conditions: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn condition(mut self, condition: Value) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn function(mut self, function: Value) -> Self {
        self.functions.push(function);
        self
    }

    pub fn build(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("type".to_string(), json!("minecraft:item"));
        entry.insert("name".to_string(), json!(self.item_id));
        if let Some(weight) = self.weight {
            entry.insert("weight".to_string(), json!(weight));
        }
        if let Some(quality) = self.quality {
            entry.insert("quality".to_string(), json!(quality));
        }
        if !self.conditions.is_empty() {
            entry.insert("conditions".to_string(), Value::Array(self.conditions.clone()));
        }
        if !self.functions.is_empty() {
            entry.insert("functions".to_string(), Value::Array(self.functions.clone()));
        }
        Value::Object(entry)
    }
}

impl From<&str> for LootEntry {
    fn from(item_id: &str) -> Self {
        Self::item(item_id)
    }
}

impl From<String> for LootEntry {
    fn from(item_id: String) -> Self {
        Self::item(item_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LootPool {
    rolls: Rolls,
    bonus_rolls: Option<Rolls>,
    entries: Vec<Value>,
    conditions: Vec<Value>,
    functions: Vec<Value>,
}

impl Default for LootPool {
    fn default() -> Self {
        Self::new()
    }
}

impl LootPool {
    pub fn new() -> Self {
        Self {
            rolls: Rolls::Fixed(1),
            bonus_rolls: None,
            entries: Vec::new(),
            conditions: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn rolls(mut self, rolls: impl Into<Rolls>) -> Self {
        self.rolls = rolls.into();
        self
    }

    pub fn bonus_rolls(mut self, rolls: impl Into<Rolls>) -> Self {
        self.bonus_rolls = Some(rolls.into());
        self
    }

    pub fn entry(mut self, entry: impl Into<LootEntry>) -> Self {
        self.entries.push(entry.into().build());
        self
    }

    pub fn raw_entry(mut self, entry: Value) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn condition(mut self, condition: Value) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn function(mut self, function: Value) -> Self {
        self.functions.push(function);
        self
    }

    /// Empty lists and zero bonus rolls are left out of the pool object.
    pub fn build(&self) -> Value {
        let mut pool = Map::new();
        pool.insert("rolls".to_string(), self.rolls.to_value());
        if let Some(bonus) = self.bonus_rolls.as_ref().filter(|bonus| !bonus.is_zero()) {
            pool.insert("bonus_rolls".to_string(), bonus.to_value());
        }
        if !self.entries.is_empty() {
            pool.insert("entries".to_string(), Value::Array(self.entries.clone()));
        }
        if !self.conditions.is_empty() {
            pool.insert("conditions".to_string(), Value::Array(self.conditions.clone()));
        }
        if !self.functions.is_empty() {
            pool.insert("functions".to_string(), Value::Array(self.functions.clone()));
        }
        Value::Object(pool)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LootKind {
    Block,
    Entity,
    Chest,
    Other(String),
}

impl LootKind {
    fn from_type(loot_type: &str) -> Self {
        match loot_type {
            "minecraft:block" | "block" => Self::Block,
            "minecraft:entity" | "entity" => Self::Entity,
            "minecraft:chest" | "chest" => Self::Chest,
            other => Self::Other(other.to_string()),
        }
    }

    /// Directory under `loot_table/` where tables of this kind live.
    pub fn default_category(&self) -> String {
        match self {
            Self::Block => "blocks".to_string(),
            Self::Entity => "entities".to_string(),
            Self::Chest => "chests".to_string(),
            Self::Other(loot_type) => loot_type
                .rsplit(':')
                .next()
                .unwrap_or(loot_type.as_str())
                .to_string(),
        }
    }
}

/// How many of an item a block drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCount {
    Fixed(u32),
    Uniform { min: u32, max: u32 },
}

/// A finalized loot table document plus the directory it is written under.
#[derive(Debug, Clone, PartialEq)]
pub struct LootTable {
    data: Value,
    text: String,
    category: String,
}

impl LootTable {
    pub fn from_json(text: &str) -> Result<Self, LootTableError> {
        let text = text.trim();
        let data = serde_json::from_str::<Value>(text)
            .map_err(|error| LootTableError::Json(error.to_string()))?;
        let category = kind_of(&data)?.default_category();
        Ok(Self {
            data,
            text: text.to_string(),
            category,
        })
    }

    pub fn from_value(data: Value) -> Result<Self, LootTableError> {
        let category = kind_of(&data)?.default_category();
        let text = serde_json::to_string_pretty(&data)
            .map_err(|error| LootTableError::Json(error.to_string()))?;
        Ok(Self {
            data,
            text,
            category,
        })
    }

    pub fn from_pools(
        loot_type: &str,
        pools: &[LootPool],
        category: Option<&str>,
    ) -> Result<Self, LootTableError> {
        let pools = pools.iter().map(LootPool::build).collect::<Vec<_>>();
        let table = Self::from_value(json!({ "type": loot_type, "pools": pools }))?;
        Ok(match category {
            Some(category) => table.with_category(category),
            None => table,
        })
    }

    pub fn drops_self(block_id: &str) -> Self {
        Self::block_table(json!([{
            "rolls": 1,
            "entries": [LootEntry::item(block_id).build()],
            "conditions": [survives_explosion()],
        }]))
    }

    pub fn drops_item(item_id: &str, count: DropCount) -> Self {
        let mut entry = LootEntry::item(item_id);
        match count {
            DropCount::Uniform { min, max } => entry = entry.function(set_uniform_count(min, max)),
            DropCount::Fixed(1) => {}
            DropCount::Fixed(count) => entry = entry.function(set_fixed_count(count)),
        }
        let entry = entry.function(explosion_decay());
        Self::block_table(json!([{
            "rolls": 1,
            "entries": [entry.build()],
            "conditions": [survives_explosion()],
        }]))
    }

    pub fn drops_nothing() -> Self {
        Self::block_table(json!([]))
    }

    /// Silk touch yields `silk_touch_item` (the block itself when `None`); otherwise the
    /// optional fallback item and count drop.
    pub fn drops_with_silk_touch(
        block_id: &str,
        silk_touch_item: Option<&str>,
        fallback: Option<(&str, u32)>,
    ) -> Self {
        let mut children = vec![LootEntry::item(silk_touch_item.unwrap_or(block_id))
            .condition(silk_touch())
            .build()];
        if let Some((item_id, count)) = fallback {
            let mut entry = LootEntry::item(item_id).condition(inverted(silk_touch()));
            if count != 1 {
                entry = entry.function(set_fixed_count(count));
            }
            children.push(entry.function(explosion_decay()).build());
        }
        Self::block_table(alternatives_pool(children))
    }

    /// Ore-style drops: `item_id` scaled by fortune, or the block itself under silk touch.
    pub fn drops_with_fortune(
        block_id: &str,
        item_id: &str,
        min_count: u32,
        max_count: u32,
        silk_touch_drops_self: bool,
    ) -> Self {
        let mut ore = LootEntry::item(item_id).condition(inverted(silk_touch()));
        if min_count != 1 || max_count != 1 {
            ore = ore.function(set_uniform_count(min_count, max_count));
        }
        let ore = ore.function(fortune_bonus()).function(explosion_decay());

        let mut children = Vec::new();
        if silk_touch_drops_self {
            children.push(LootEntry::item(block_id).condition(silk_touch()).build());
        }
        children.push(ore.build());
        Self::block_table(alternatives_pool(children))
    }

    pub fn entity(pools: &[LootPool]) -> Self {
        Self::typed("minecraft:entity", pools)
    }

    pub fn chest(pools: &[LootPool]) -> Self {
        Self::typed("minecraft:chest", pools)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn loot_type(&self) -> &str {
        self.data
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn kind(&self) -> LootKind {
        LootKind::from_type(self.loot_type())
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pools(&self) -> &[Value] {
        self.data
            .get("pools")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn block_table(pools: Value) -> Self {
        Self::from_document(json!({ "type": "minecraft:block", "pools": pools }), "blocks")
    }

    fn typed(loot_type: &str, pools: &[LootPool]) -> Self {
        let pools = pools.iter().map(LootPool::build).collect::<Vec<_>>();
        let data = json!({ "type": loot_type, "pools": pools });
        let category = LootKind::from_type(loot_type).default_category();
        Self::from_document(data, &category)
    }

    fn from_document(data: Value, category: &str) -> Self {
        let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
        Self {
            data,
            text,
            category: category.to_string(),
        }
    }
}

fn kind_of(data: &Value) -> Result<LootKind, LootTableError> {
    let object = data.as_object().ok_or(LootTableError::NotAnObject)?;
    match object.get("type") {
        None => Err(LootTableError::MissingType),
        Some(Value::String(loot_type)) if !loot_type.trim().is_empty() => {
            Ok(LootKind::from_type(loot_type))
        }
        Some(_) => Err(LootTableError::InvalidType),
    }
}

fn alternatives_pool(children: Vec<Value>) -> Value {
    json!([{
        "rolls": 1,
        "entries": [{ "type": "minecraft:alternatives", "children": children }],
    }])
}

fn uniform(min: u32, max: u32) -> Value {
    json!({ "type": "minecraft:uniform", "min": min, "max": max })
}

pub fn survives_explosion() -> Value {
    json!({ "condition": "minecraft:survives_explosion" })
}

pub fn silk_touch() -> Value {
    json!({
        "condition": "minecraft:match_tool",
        "predicate": {
            "predicates": {
                "minecraft:enchantments": [
                    { "enchantments": "minecraft:silk_touch", "levels": { "min": 1 } }
                ]
            }
        }
    })
}

pub fn inverted(term: Value) -> Value {
    json!({ "condition": "minecraft:inverted", "term": term })
}

pub fn set_fixed_count(count: u32) -> Value {
    json!({ "function": "minecraft:set_count", "count": count })
}

pub fn set_uniform_count(min: u32, max: u32) -> Value {
    json!({ "function": "minecraft:set_count", "count": uniform(min, max) })
}

pub fn fortune_bonus() -> Value {
    json!({
        "function": "minecraft:apply_bonus",
        "enchantment": "minecraft:fortune",
        "formula": "minecraft:ore_drops"
    })
}

pub fn explosion_decay() -> Value {
    json!({ "function": "minecraft:explosion_decay" })
}
