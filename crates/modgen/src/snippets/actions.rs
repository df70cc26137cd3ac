//! Ready-made hook fragments. The free functions assume the callback variables `world`, `pos`
//! and `player`; use a [`Scope`] when the surrounding code names them differently.
//!
//! Registry names are given as vanilla names (`diamond`, `minecraft:diamond`) or as namespaced
//! ids of other mods; anything else is rejected before it reaches the generated source.

use thiserror::Error;

use super::imports::{
    AABB, BLOCK, BLOCKS, BLOCK_POS, BUILT_IN_REGISTRIES, ENTITY_TYPE, GAME_EVENT, ITEMS,
    ITEM_STACK, LIGHTNING_BOLT, LIVING_ENTITY, MOB_EFFECTS, MOB_EFFECT_INSTANCE,
    RESOURCE_LOCATION, SERVER_LEVEL, SOUND_EVENTS, SOUND_SOURCE,
};
use super::{Fragment, SCHEDULER_TYPE};
use crate::ids::ContentId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("{subject} '{name}' is neither a vanilla name like 'diamond' nor a namespaced id")]
    InvalidName { subject: &'static str, name: String },
    #[error("{subject} '{name}' must be a vanilla name like 'speed'")]
    NotVanilla { subject: &'static str, name: String },
    #[error("{subject} must be a finite number, got {value}")]
    NonFinite { subject: &'static str, value: f64 },
    #[error("'{name}' is not a Java variable name")]
    InvalidVariable { name: String },
}

/// Variable names a fragment refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub(crate) world: String,
    pub(crate) pos: String,
    pub(crate) player: String,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            world: "world".to_string(),
            pos: "pos".to_string(),
            player: "player".to_string(),
        }
    }
}

impl Scope {
    pub fn new(world: &str, pos: &str, player: &str) -> Result<Self, ActionError> {
        Ok(Self {
            world: variable(world)?,
            pos: variable(pos)?,
            player: variable(player)?,
        })
    }

    pub fn replace_block(&self, block: &str) -> Result<Fragment, ActionError> {
        let (state, imports) = match registry_target("block", block)? {
            Target::Constant(name) => (format!("Blocks.{name}.defaultBlockState()"), vec![BLOCKS]),
            Target::Lookup(id) => (
                format!("BuiltInRegistries.BLOCK.getValue(ResourceLocation.parse(\"{id}\")).defaultBlockState()"),
                vec![BUILT_IN_REGISTRIES, RESOURCE_LOCATION],
            ),
        };
        Ok(Fragment::new(format!("{}.setBlockAndUpdate({}, {state});", self.world, self.pos))
            .with_imports(imports))
    }

    pub fn teleport_player(&self, x: f64, y: f64, z: f64) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "{}.teleportTo({}, {}, {});",
            self.player,
            coordinate("x", x)?,
            coordinate("y", y)?,
            coordinate("z", z)?
        )))
    }

    /// Offsets are added to the block position.
    pub fn teleport_player_relative(&self, dx: f64, dy: f64, dz: f64) -> Result<Fragment, ActionError> {
        let pos = &self.pos;
        Ok(Fragment::new(format!(
            "{}.teleportTo({pos}.getX() + {}, {pos}.getY() + {}, {pos}.getZ() + {});",
            self.player,
            coordinate("dx", dx)?,
            coordinate("dy", dy)?,
            coordinate("dz", dz)?
        )))
    }

    pub fn launch_player(&self, dx: f64, dy: f64, dz: f64) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "{player}.push({}, {}, {});\n{player}.hurtMarked = true;",
            double("dx", dx)?,
            double("dy", dy)?,
            double("dz", dz)?,
            player = self.player
        )))
    }

    pub fn apply_effect(&self, effect: &str, duration_ticks: u32, amplifier: u32) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "{}.addEffect(new MobEffectInstance(MobEffects.{}, {duration_ticks}, {amplifier}));",
            self.player,
            vanilla_constant("effect", effect)?
        ))
        .with_imports([MOB_EFFECT_INSTANCE, MOB_EFFECTS]))
    }

    pub fn play_sound(&self, sound: &str, volume: f32, pitch: f32) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "{}.playSound(null, {}, SoundEvents.{}, SoundSource.BLOCKS, {}, {});",
            self.world,
            self.pos,
            vanilla_constant("sound", sound)?,
            float("volume", volume)?,
            float("pitch", pitch)?
        ))
        .with_imports([SOUND_EVENTS, SOUND_SOURCE]))
    }

    pub fn summon_lightning(&self) -> Fragment {
        let pos = &self.pos;
        Fragment::new(format!(
            "if ({} instanceof ServerLevel serverLevel) {{\n    \
             LightningBolt bolt = new LightningBolt(EntityType.LIGHTNING_BOLT, serverLevel);\n    \
             bolt.moveTo({pos}.getX() + 0.5, {pos}.getY(), {pos}.getZ() + 0.5);\n    \
             serverLevel.addFreshEntity(bolt);\n}}",
            self.world
        ))
        .with_imports([SERVER_LEVEL, LIGHTNING_BOLT, ENTITY_TYPE])
    }

    pub fn drop_item(&self, item: &str, count: u32) -> Result<Fragment, ActionError> {
        let (stack, imports) = match registry_target("item", item)? {
            Target::Constant(name) => (format!("new ItemStack(Items.{name}, {count})"), vec![ITEMS]),
            Target::Lookup(id) => (
                format!("new ItemStack(BuiltInRegistries.ITEM.getValue(ResourceLocation.parse(\"{id}\")), {count})"),
                vec![BUILT_IN_REGISTRIES, RESOURCE_LOCATION],
            ),
        };
        Ok(Fragment::new(format!("Block.popResource({}, {}, {stack});", self.world, self.pos))
            .with_imports([BLOCK, ITEM_STACK])
            .with_imports(imports))
    }

    /// Lights fire above the block (or in its place) when that space is empty.
    pub fn place_fire(&self, above: bool) -> Fragment {
        let target = if above {
            format!("{}.above()", self.pos)
        } else {
            self.pos.clone()
        };
        let world = &self.world;
        Fragment::new(format!(
            "if ({world}.getBlockState({target}).isAir()) {{\n    \
             {world}.setBlockAndUpdate({target}, Blocks.FIRE.defaultBlockState());\n}}"
        ))
        .with_import(BLOCKS)
    }

    /// Replaces every fire block within a cube of the given radius with air.
    pub fn extinguish_area(&self, radius: u32) -> Fragment {
        let world = &self.world;
        Fragment::new(format!(
            "for (int dx = -{radius}; dx <= {radius}; dx++) {{\n    \
             for (int dy = -{radius}; dy <= {radius}; dy++) {{\n        \
             for (int dz = -{radius}; dz <= {radius}; dz++) {{\n            \
             BlockPos checkPos = {pos}.offset(dx, dy, dz);\n            \
             if ({world}.getBlockState(checkPos).is(Blocks.FIRE)) {{\n                \
             {world}.setBlockAndUpdate(checkPos, Blocks.AIR.defaultBlockState());\n            \
             }}\n        }}\n    }}\n}}",
            pos = self.pos
        ))
        .with_imports([BLOCK_POS, BLOCKS])
    }

    pub fn give_xp(&self, amount: i32) -> Fragment {
        Fragment::new(format!("{}.giveExperiencePoints({amount});", self.player))
    }

    pub fn remove_xp(&self, amount: i32) -> Fragment {
        Fragment::new(format!(
            "{}.giveExperiencePoints(-{});",
            self.player,
            amount.unsigned_abs()
        ))
    }

    pub fn damage_nearby(&self, amount: f32, radius: f64, exclude_player: bool) -> Result<Fragment, ActionError> {
        let filter = if exclude_player {
            format!("e -> e != {}", self.player)
        } else {
            "e -> true".to_string()
        };
        let world = &self.world;
        Ok(Fragment::new(format!(
            "for (LivingEntity e : {world}.getEntitiesOfClass(LivingEntity.class, new AABB({}).inflate({}), {filter})) {{\n    \
             e.hurt({world}.damageSources().magic(), {});\n}}",
            self.pos,
            double("radius", radius)?,
            float("amount", amount)?
        ))
        .with_imports([LIVING_ENTITY, AABB]))
    }

    pub fn heal_nearby(&self, amount: f32, radius: f64) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "for (LivingEntity e : {}.getEntitiesOfClass(LivingEntity.class, new AABB({}).inflate({}))) {{\n    \
             e.heal({});\n}}",
            self.world,
            self.pos,
            double("radius", radius)?,
            float("amount", amount)?
        ))
        .with_imports([LIVING_ENTITY, AABB]))
    }

    /// Runs `inner` once, `ticks` server ticks after the event fires. Every delayed action of a
    /// mod shares one queue that is drained from a single server tick listener.
    pub fn delayed_action(&self, inner: Fragment, ticks: u32) -> Fragment {
        let world = &self.world;
        let body = indent(inner.code(), "        ");
        let code = format!(
            "if (!{world}.isClientSide()) {{\n    \
             {scheduler}.schedule({world}.getServer(), {ticks}, () -> {{\n{body}\n    }});\n}}",
            scheduler = SCHEDULER_TYPE
        );
        let imports = inner.imports().map(str::to_string).collect::<Vec<_>>();
        Fragment::new(code).with_imports(imports).scheduled()
    }

    pub fn sculk_event(&self, event: &str) -> Result<Fragment, ActionError> {
        Ok(Fragment::new(format!(
            "{}.gameEvent({}, GameEvent.{}, {});",
            self.world,
            self.player,
            vanilla_constant("game event", event)?,
            self.pos
        ))
        .with_import(GAME_EVENT))
    }
}

pub fn replace_block(block: &str) -> Result<Fragment, ActionError> {
    Scope::default().replace_block(block)
}

pub fn teleport_player(x: f64, y: f64, z: f64) -> Result<Fragment, ActionError> {
    Scope::default().teleport_player(x, y, z)
}

pub fn teleport_player_relative(dx: f64, dy: f64, dz: f64) -> Result<Fragment, ActionError> {
    Scope::default().teleport_player_relative(dx, dy, dz)
}

pub fn launch_player(dx: f64, dy: f64, dz: f64) -> Result<Fragment, ActionError> {
    Scope::default().launch_player(dx, dy, dz)
}

pub fn apply_effect(effect: &str, duration_ticks: u32, amplifier: u32) -> Result<Fragment, ActionError> {
    Scope::default().apply_effect(effect, duration_ticks, amplifier)
}

pub fn play_sound(sound: &str, volume: f32, pitch: f32) -> Result<Fragment, ActionError> {
    Scope::default().play_sound(sound, volume, pitch)
}

pub fn summon_lightning() -> Fragment {
    Scope::default().summon_lightning()
}

pub fn drop_item(item: &str, count: u32) -> Result<Fragment, ActionError> {
    Scope::default().drop_item(item, count)
}

pub fn place_fire(above: bool) -> Fragment {
    Scope::default().place_fire(above)
}

pub fn extinguish_area(radius: u32) -> Fragment {
    Scope::default().extinguish_area(radius)
}

pub fn give_xp(amount: i32) -> Fragment {
    Scope::default().give_xp(amount)
}

pub fn remove_xp(amount: i32) -> Fragment {
    Scope::default().remove_xp(amount)
}

pub fn damage_nearby(amount: f32, radius: f64, exclude_player: bool) -> Result<Fragment, ActionError> {
    Scope::default().damage_nearby(amount, radius, exclude_player)
}

pub fn heal_nearby(amount: f32, radius: f64) -> Result<Fragment, ActionError> {
    Scope::default().heal_nearby(amount, radius)
}

pub fn delayed_action(inner: Fragment, ticks: u32) -> Fragment {
    Scope::default().delayed_action(inner, ticks)
}

pub fn sculk_event(event: &str) -> Result<Fragment, ActionError> {
    Scope::default().sculk_event(event)
}

enum Target {
    /// Upper-cased field of the vanilla holder class.
    Constant(String),
    Lookup(ContentId),
}

fn registry_target(subject: &'static str, raw: &str) -> Result<Target, ActionError> {
    let Some((namespace, path)) = raw.split_once(':') else {
        return constant_name(raw)
            .map(Target::Constant)
            .ok_or_else(|| invalid_name(subject, raw));
    };
    let id = ContentId::new(namespace, path).map_err(|_| invalid_name(subject, raw))?;
    if namespace == "minecraft" {
        if let Some(name) = constant_name(path) {
            return Ok(Target::Constant(name));
        }
    }
    Ok(Target::Lookup(id))
}

fn vanilla_constant(subject: &'static str, raw: &str) -> Result<String, ActionError> {
    let name = raw.strip_prefix("minecraft:").unwrap_or(raw);
    constant_name(name).ok_or_else(|| ActionError::NotVanilla {
        subject,
        name: raw.to_string(),
    })
}

fn constant_name(raw: &str) -> Option<String> {
    let starts_with_letter = raw.starts_with(|c: char| c.is_ascii_lowercase());
    let rest_ok = raw
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    (starts_with_letter && rest_ok).then(|| raw.to_ascii_uppercase())
}

fn invalid_name(subject: &'static str, raw: &str) -> ActionError {
    ActionError::InvalidName {
        subject,
        name: raw.to_string(),
    }
}

fn variable(name: &str) -> Result<String, ActionError> {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if starts_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(name.to_string())
    } else {
        Err(ActionError::InvalidVariable {
            name: name.to_string(),
        })
    }
}

fn finite(subject: &'static str, value: f64) -> Result<f64, ActionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ActionError::NonFinite { subject, value })
    }
}

/// Whole numbers print without a fraction so they read like the literal the caller wrote.
fn coordinate(subject: &'static str, value: f64) -> Result<String, ActionError> {
    let value = finite(subject, value)?;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Ok(format!("{}", value as i64))
    } else {
        Ok(format!("{value:?}"))
    }
}

fn double(subject: &'static str, value: f64) -> Result<String, ActionError> {
    Ok(format!("{:?}", finite(subject, value)?))
}

fn float(subject: &'static str, value: f32) -> Result<String, ActionError> {
    finite(subject, f64::from(value))?;
    Ok(format!("{value:?}f"))
}

fn indent(code: &str, prefix: &str) -> String {
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports(fragment: &Fragment) -> Vec<&str> {
        fragment.imports().collect()
    }

    #[test]
    fn block_and_player_actions() {
        assert_eq!(
            replace_block("gold_block").expect("block").code(),
            "world.setBlockAndUpdate(pos, Blocks.GOLD_BLOCK.defaultBlockState());"
        );
        assert_eq!(
            teleport_player(100.0, 200.0, 300.0).expect("teleport").code(),
            "player.teleportTo(100, 200, 300);"
        );
        assert!(teleport_player_relative(0.0, 10.0, 0.5)
            .expect("relative")
            .code()
            .contains("pos.getY() + 10, pos.getZ() + 0.5"));
        assert_eq!(
            launch_player(0.0, 1.0, 0.0).expect("launch").code(),
            "player.push(0.0, 1.0, 0.0);\nplayer.hurtMarked = true;"
        );
        assert_eq!(give_xp(100).code(), "player.giveExperiencePoints(100);");
        assert_eq!(remove_xp(-25).code(), "player.giveExperiencePoints(-25);");
    }

    #[test]
    fn effects_and_sounds_declare_imports() {
        let effect = apply_effect("speed", 200, 1).expect("effect");
        assert_eq!(
            effect.code(),
            "player.addEffect(new MobEffectInstance(MobEffects.SPEED, 200, 1));"
        );
        assert_eq!(imports(&effect), vec![MOB_EFFECT_INSTANCE, MOB_EFFECTS]);

        let sound = play_sound("minecraft:anvil_land", 1.0, 0.5).expect("sound");
        assert!(sound.code().contains("SoundEvents.ANVIL_LAND, SoundSource.BLOCKS, 1.0f, 0.5f"));
        assert_eq!(imports(&sound), vec![SOUND_EVENTS, SOUND_SOURCE]);
    }

    #[test]
    fn namespaced_names_resolve_to_constants_or_lookups() {
        let vanilla = drop_item("minecraft:diamond", 1).expect("vanilla");
        assert_eq!(
            vanilla.code(),
            "Block.popResource(world, pos, new ItemStack(Items.DIAMOND, 1));"
        );

        let modded = drop_item("m:ruby", 3).expect("modded");
        assert_eq!(
            modded.code(),
            "Block.popResource(world, pos, new ItemStack(BuiltInRegistries.ITEM.getValue(ResourceLocation.parse(\"m:ruby\")), 3));"
        );
        assert!(imports(&modded).contains(&RESOURCE_LOCATION));
        assert!(!imports(&modded).contains(&ITEMS));

        let block = replace_block("m:ores/ruby_ore").expect("lookup");
        assert!(block
            .code()
            .contains("BuiltInRegistries.BLOCK.getValue(ResourceLocation.parse(\"m:ores/ruby_ore\")).defaultBlockState()"));
    }

    #[test]
    fn names_that_are_not_java_safe_are_rejected() {
        for raw in ["Diamond", "gold block", "", "1up", "a;b", "m:Ruby"] {
            assert!(
                matches!(drop_item(raw, 1), Err(ActionError::InvalidName { .. })),
                "{raw:?}"
            );
        }
        assert!(matches!(
            apply_effect("m:frenzy", 20, 0),
            Err(ActionError::NotVanilla { subject: "effect", .. })
        ));
        assert!(matches!(
            sculk_event("BLOCK_ACTIVATE"),
            Err(ActionError::NotVanilla { .. })
        ));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(matches!(
            play_sound("anvil_land", f32::NAN, 1.0),
            Err(ActionError::NonFinite { subject: "volume", .. })
        ));
        assert!(matches!(
            teleport_player(f64::INFINITY, 64.0, 0.0),
            Err(ActionError::NonFinite { subject: "x", .. })
        ));
        assert!(matches!(
            damage_nearby(2.0, f64::NAN, true),
            Err(ActionError::NonFinite { subject: "radius", .. })
        ));
        assert!(matches!(
            heal_nearby(f32::NEG_INFINITY, 2.0),
            Err(ActionError::NonFinite { subject: "amount", .. })
        ));
        assert!(matches!(
            launch_player(0.0, f64::NAN, 0.0),
            Err(ActionError::NonFinite { subject: "dy", .. })
        ));
    }

    #[test]
    fn lightning_only_runs_server_side() {
        let code = summon_lightning().code().to_string();
        assert!(code.starts_with("if (world instanceof ServerLevel serverLevel) {"));
        assert!(code.contains("LightningBolt bolt = new LightningBolt("));
        assert!(code.contains("bolt.moveTo(pos.getX() + 0.5, pos.getY(), pos.getZ() + 0.5);"));
        assert!(code.contains("serverLevel.addFreshEntity(bolt);"));
    }

    #[test]
    fn scope_renames_variables() {
        let scope = Scope::new("lvl", "bp", "p").expect("scope");
        assert!(scope.place_fire(true).code().contains("lvl.getBlockState(bp.above())"));
        assert!(scope.place_fire(false).code().contains("lvl.setBlockAndUpdate(bp, Blocks.FIRE"));
        assert!(scope
            .sculk_event("block_activate")
            .expect("event")
            .code()
            .contains("lvl.gameEvent(p, GameEvent.BLOCK_ACTIVATE, bp);"));
        assert_eq!(
            Scope::new("world", "pos.above()", "player"),
            Err(ActionError::InvalidVariable {
                name: "pos.above()".to_string()
            })
        );
    }

    #[test]
    fn area_actions() {
        let extinguish = extinguish_area(3).code().to_string();
        assert!(extinguish.contains("for (int dx = -3; dx <= 3; dx++)"));
        assert!(extinguish.contains("BlockPos checkPos = pos.offset(dx, dy, dz);"));

        let damage = damage_nearby(6.0, 5.0, true).expect("damage").code().to_string();
        assert!(damage.contains("new AABB(pos).inflate(5.0), e -> e != player"));
        assert!(damage.contains("e.hurt(world.damageSources().magic(), 6.0f);"));
        assert!(damage_nearby(1.0, 2.5, false).expect("damage").code().contains("e -> true"));

        assert!(heal_nearby(4.0, 3.0).expect("heal").code().contains("e.heal(4.0f);"));
    }

    #[test]
    fn delayed_action_goes_through_the_shared_queue() {
        let delayed = delayed_action(drop_item("emerald", 2).expect("drop"), 40);
        let code = delayed.code();
        assert!(code.starts_with("if (!world.isClientSide()) {"));
        assert!(code.contains("    DelayedTasks.schedule(world.getServer(), 40, () -> {"));
        assert!(code.contains("        Block.popResource(world, pos, new ItemStack(Items.EMERALD, 2));"));
        assert!(!code.contains("END_SERVER_TICK"));
        assert!(delayed.is_scheduled());
        assert!(imports(&delayed).contains(&ITEMS));

        let nested = delayed_action(delayed_action(give_xp(1), 5), 10);
        assert_eq!(nested.code().matches("DelayedTasks.schedule(").count(), 2);
        assert!(nested.is_scheduled());
    }
}
