use std::collections::BTreeSet;

use super::imports as classes;
use super::java::SourceWriter;
use crate::compile::plan::ModPlan;
use crate::snippets::SCHEDULER_TYPE;

/// One server tick listener draining a queue of delayed actions, shared by every block.
pub(crate) fn render_scheduler(plan: &ModPlan<'_>) -> String {
    let imports = [
        classes::ARRAY_LIST,
        classes::LIST,
        classes::MINECRAFT_SERVER,
        classes::SERVER_LIFECYCLE_EVENTS,
        classes::SERVER_TICK_EVENTS,
    ]
    .into_iter()
    .map(String::from)
    .collect::<BTreeSet<_>>();

    let mut writer = SourceWriter::new();
    writer.header(&plan.package, &imports);
    writer.open(format!("public final class {SCHEDULER_TYPE} {{"));
    writer.line("private static final List<Task> PENDING = new ArrayList<>();");
    writer.line("private static boolean registered;");
    writer.blank();
    writer.line(format!("private {SCHEDULER_TYPE}() {{}}"));

    writer.blank();
    writer.open("public static void register() {");
    writer.open("if (registered) {");
    writer.line("return;");
    writer.close("}");
    writer.line("registered = true;");
    writer.line(format!("ServerTickEvents.END_SERVER_TICK.register({SCHEDULER_TYPE}::tick);"));
    writer.line("ServerLifecycleEvents.SERVER_STOPPED.register(server -> PENDING.clear());");
    writer.close("}");

    writer.blank();
    writer.open("public static void schedule(MinecraftServer server, int ticks, Runnable action) {");
    writer.open("if (server == null) {");
    writer.line("return;");
    writer.close("}");
    writer.line("PENDING.add(new Task(server.getTickCount() + Math.max(ticks, 0), action));");
    writer.close("}");

    writer.blank();
    writer.open("private static void tick(MinecraftServer server) {");
    writer.line("int now = server.getTickCount();");
    writer.line("List<Task> due = new ArrayList<>();");
    writer.open("PENDING.removeIf(task -> {");
    writer.open("if (task.dueTick() > now) {");
    writer.line("return false;");
    writer.close("}");
    writer.line("due.add(task);");
    writer.line("return true;");
    writer.close("});");
    writer.open("for (Task task : due) {");
    writer.line("task.action().run();");
    writer.close("}");
    writer.close("}");

    writer.blank();
    writer.line("private record Task(int dueTick, Runnable action) {}");
    writer.close("}");
    writer.finish()
}
