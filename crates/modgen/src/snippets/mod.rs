pub mod actions;
pub(crate) mod imports;
pub mod message;

use std::collections::BTreeSet;

pub use actions::{ActionError, Scope};

pub const SUCCESS_STATEMENT: &str = "return InteractionResult.SUCCESS;";
pub(crate) const INTERACTION_RESULT: &str = "net.minecraft.world.InteractionResult";
/// Generated class, in the mod package, that owns the queue behind delayed actions.
pub const SCHEDULER_TYPE: &str = "DelayedTasks";

/// A unit of Java statement text plus the classes it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    code: String,
    imports: BTreeSet<String>,
    scheduled: bool,
}

impl Fragment {
    /// Code with no import requirements.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            imports: BTreeSet::new(),
            scheduled: false,
        }
    }

    /// Hand-written code; imports are inferred from the well-known symbols it mentions.
    pub fn raw(code: impl Into<String>) -> Self {
        let code = code.into();
        let imports = imports::infer(&code);
        let scheduled = imports::mentions(&code, SCHEDULER_TYPE);
        Self {
            code,
            imports,
            scheduled,
        }
    }

    pub fn with_import(mut self, class: impl Into<String>) -> Self {
        self.imports.insert(class.into());
        self
    }

    pub fn with_imports<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Marks code that hands work to the mod's delayed task queue.
    pub(crate) fn scheduled(mut self) -> Self {
        self.scheduled = true;
        self
    }

    /// Concatenates fragments into one, keeping the union of their imports.
    pub fn join(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut lines = Vec::new();
        let mut imports = BTreeSet::new();
        let mut scheduled = false;
        for fragment in fragments {
            let statement = terminated(&fragment.code);
            if !statement.is_empty() {
                lines.push(statement);
            }
            imports.extend(fragment.imports);
            scheduled |= fragment.scheduled;
        }
        Self {
            code: lines.join("\n"),
            imports,
            scheduled,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

impl From<&str> for Fragment {
    fn from(code: &str) -> Self {
        Self::raw(code)
    }
}

impl From<String> for Fragment {
    fn from(code: String) -> Self {
        Self::raw(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookEvent {
    LeftClick,
    RightClick,
    Break,
}

impl HookEvent {
    pub const ALL: [HookEvent; 3] = [Self::LeftClick, Self::RightClick, Self::Break];

    /// Click callbacks must hand an interaction result back to the game.
    pub fn returns_result(self) -> bool {
        matches!(self, Self::LeftClick | Self::RightClick)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftClick => "left_click",
            Self::RightClick => "right_click",
            Self::Break => "break",
        }
    }
}

/// A hook body ready to be placed inside an event callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedHook {
    pub event: HookEvent,
    pub body: String,
    pub imports: BTreeSet<String>,
    /// The body schedules work on the [`SCHEDULER_TYPE`] queue.
    pub scheduled: bool,
}

/// Concatenates the fragments of one event. Click events end with exactly one success return;
/// success returns written inside the fragments are dropped.
pub fn compose_hook(event: HookEvent, fragments: &[Fragment]) -> Option<ComposedHook> {
    let mut lines = Vec::new();
    let mut imports = BTreeSet::new();
    let mut scheduled = false;
    for fragment in fragments {
        let mut statement = terminated(&fragment.code);
        if event.returns_result() {
            statement = strip_success(&statement);
        }
        if !statement.is_empty() {
            lines.push(statement);
        }
        imports.extend(fragment.imports.iter().cloned());
        scheduled |= fragment.scheduled;
    }
    if lines.is_empty() {
        return None;
    }

    if event.returns_result() {
        lines.push(SUCCESS_STATEMENT.to_string());
        imports.insert(INTERACTION_RESULT.to_string());
    }
    Some(ComposedHook {
        event,
        body: lines.join("\n"),
        imports,
        scheduled,
    })
}

fn terminated(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed.ends_with(';') || trimmed.ends_with('}') {
        trimmed.to_string()
    } else {
        format!("{trimmed};")
    }
}

fn strip_success(statement: &str) -> String {
    statement
        .lines()
        .filter_map(|line| {
            if !line.contains(SUCCESS_STATEMENT) {
                return Some(line.to_string());
            }
            let rest = line.replace(SUCCESS_STATEMENT, "");
            (!rest.trim().is_empty()).then(|| rest.trim_end().to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
