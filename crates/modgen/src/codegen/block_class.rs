use std::collections::BTreeSet;

use super::imports as classes;
use super::java::{float_literal, SourceWriter};
use crate::compile::plan::Specialization;
use crate::snippets::{ComposedHook, HookEvent, SCHEDULER_TYPE};

/// A `Block` subclass carrying speed overrides and the event wiring of its hooks.
pub(crate) fn render_block_class(package: &str, specialized: &Specialization) -> String {
    let mut imports = [classes::BLOCK, classes::BLOCK_BEHAVIOUR]
        .into_iter()
        .map(String::from)
        .collect::<BTreeSet<_>>();
    let mut body = SourceWriter::new();
    body.open(format!("public class {} extends Block {{", specialized.type_name));
    body.open(format!(
        "public {}(BlockBehaviour.Properties properties) {{",
        specialized.type_name
    ));
    body.line("super(properties);");
    body.close("}");

    if !specialized.speeds.is_empty() {
        write_speed_overrides(&mut body, &mut imports, specialized);
    }
    if !specialized.hooks.is_empty() {
        write_event_registration(&mut body, &mut imports, package, specialized);
    }
    body.close("}");

    let mut unit = SourceWriter::new();
    unit.header(&format!("{package}.block"), &imports);
    let mut source = unit.finish();
    source.push_str(&body.finish());
    source
}

fn write_speed_overrides(body: &mut SourceWriter, imports: &mut BTreeSet<String>, specialized: &Specialization) {
    imports.extend(
        [
            classes::BLOCK_POS,
            classes::BLOCK_GETTER,
            classes::BLOCK_STATE,
            classes::ITEM_STACK,
            classes::ITEM_TAGS,
            classes::PLAYER,
        ]
        .into_iter()
        .map(String::from),
    );

    body.blank();
    body.line("@Override");
    body.open("protected float getDestroyProgress(BlockState state, Player player, BlockGetter level, BlockPos pos) {");
    body.line("float hardness = state.getDestroySpeed(level, pos);");
    body.open("if (hardness == -1.0f) {");
    body.line("return 0.0f;");
    body.close("}");
    body.line("float speed = toolSpeed(player.getMainHandItem(), player.getDestroySpeed(state));");
    body.line("boolean correctTool = !state.requiresCorrectToolForDrops() || player.hasCorrectToolForDrops(state);");
    body.line("return speed / hardness / (correctTool ? 30.0f : 100.0f);");
    body.close("}");

    body.blank();
    body.open("private static float toolSpeed(ItemStack tool, float fallback) {");
    for (tool, speed) in &specialized.speeds {
        body.open(format!("if (tool.is(ItemTags.{})) {{", tool.item_tag_constant()));
        body.line(format!("return {};", float_literal(*speed)));
        body.close("}");
    }
    body.line("return fallback;");
    body.close("}");
}

fn write_event_registration(
    body: &mut SourceWriter,
    imports: &mut BTreeSet<String>,
    package: &str,
    specialized: &Specialization,
) {
    body.blank();
    body.open("public static void registerEvents() {");
    for hook in &specialized.hooks {
        imports.extend(hook.imports.iter().cloned());
        if hook.scheduled {
            imports.insert(format!("{package}.{SCHEDULER_TYPE}"));
        }
        write_hook(body, imports, &specialized.type_name, hook);
    }
    body.close("}");
}

fn write_hook(body: &mut SourceWriter, imports: &mut BTreeSet<String>, type_name: &str, hook: &ComposedHook) {
    match hook.event {
        HookEvent::LeftClick => {
            imports.insert(classes::ATTACK_BLOCK_CALLBACK.to_string());
            imports.insert(classes::INTERACTION_RESULT.to_string());
            body.open("AttackBlockCallback.EVENT.register((player, world, hand, pos, direction) -> {");
            guarded(body, &format!("world.getBlockState(pos).getBlock() instanceof {type_name}"), &hook.body);
            body.line("return InteractionResult.PASS;");
            body.close("});");
        }
        HookEvent::RightClick => {
            imports.insert(classes::USE_BLOCK_CALLBACK.to_string());
            imports.insert(classes::INTERACTION_RESULT.to_string());
            imports.insert(classes::BLOCK_POS.to_string());
            body.open("UseBlockCallback.EVENT.register((player, world, hand, hitResult) -> {");
            body.line("BlockPos pos = hitResult.getBlockPos();");
            guarded(body, &format!("world.getBlockState(pos).getBlock() instanceof {type_name}"), &hook.body);
            body.line("return InteractionResult.PASS;");
            body.close("});");
        }
        HookEvent::Break => {
            imports.insert(classes::PLAYER_BLOCK_BREAK_EVENTS.to_string());
            body.open("PlayerBlockBreakEvents.AFTER.register((world, player, pos, state, blockEntity) -> {");
            guarded(body, &format!("state.getBlock() instanceof {type_name}"), &hook.body);
            body.close("});");
        }
    }
}

fn guarded(body: &mut SourceWriter, condition: &str, code: &str) {
    body.open(format!("if ({condition}) {{"));
    body.code(code);
    body.close("}");
}
