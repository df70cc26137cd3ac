use std::collections::HashMap;

use crate::error::ValidationError;
use crate::ids::ContentId;

/// `UPPER_SNAKE` field name for the path part of an id. Runs of separators become one underscore.
pub fn constant_name(id: &ContentId) -> String {
    constant_from(id.path())
}

pub fn constant_from(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut in_separator_run = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_uppercase());
            in_separator_run = false;
        } else if c == '_' {
            name.push('_');
            in_separator_run = false;
        } else if matches!(c, ':' | '-' | '.' | '/') || c.is_whitespace() {
            if !in_separator_run {
                name.push('_');
                in_separator_run = true;
            }
        }
    }
    guard_leading_digit(name)
}

/// `PascalCase` type name for the path part of an id, followed by `suffix`.
pub fn type_name(id: &ContentId, suffix: &str) -> String {
    format!("{}{suffix}", pascal_case(id.path()))
}

pub fn pascal_case(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    for word in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars);
        }
    }
    guard_leading_digit(name)
}

/// Language key such as `item.mining_demo.ruby`; path separators become dots.
pub fn translation_key(prefix: &str, id: &ContentId) -> String {
    format!("{prefix}.{}.{}", id.namespace(), id.path().replace('/', "."))
}

fn guard_leading_digit(name: String) -> String {
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Every generated identifier mapped to the id that produced it.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    owners: HashMap<String, String>,
}

impl NameTable {
    pub(crate) fn reserve(&mut self, generated: &str, owner: &str) -> Result<(), ValidationError> {
        match self.owners.get(generated) {
            Some(first) => Err(ValidationError::NamingConflict {
                generated: generated.to_string(),
                first: first.clone(),
                second: owner.to_string(),
            }),
            None => {
                self.owners.insert(generated.to_string(), owner.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    fn id(raw: &str) -> ContentId {
        ContentId::parse(raw).expect("valid id")
    }

    #[test]
    fn constants_normalize_separators() {
        assert_eq!(constant_name(&id("m:ruby_ore")), "RUBY_ORE");
        assert_eq!(constant_name(&id("m:ruby-ore")), "RUBY_ORE");
        assert_eq!(constant_name(&id("m:ores/deep.ruby--ore")), "ORES_DEEP_RUBY_ORE");
        assert_eq!(constant_name(&id("m:9lives")), "_9LIVES");
        assert_eq!(constant_from("tutorial:poison apple"), "TUTORIAL_POISON_APPLE");
    }

    #[test]
    fn type_names_are_pascal_case() {
        assert_eq!(type_name(&id("m:ruby_ore"), "Block"), "RubyOreBlock");
        assert_eq!(type_name(&id("m:ores/ruby-ore"), "Block"), "OresRubyOreBlock");
        assert_eq!(pascal_case("mining_demo"), "MiningDemo");
        assert_eq!(pascal_case("3d_mod"), "_3dMod");
    }

    #[test]
    fn translation_keys_use_dots() {
        assert_eq!(translation_key("block", &id("m:ores/ruby")), "block.m.ores.ruby");
        assert_eq!(translation_key("itemGroup", &id("m:new_foods")), "itemGroup.m.new_foods");
    }

    #[test]
    fn conflicting_reservations_name_both_owners() {
        let mut table = NameTable::default();
        table.reserve("RUBY_ORE", "m:ruby-ore").expect("first");
        let error = table.reserve("RUBY_ORE", "m:ruby_ore").expect_err("conflict");
        assert_eq!(error.kind(), ValidationErrorKind::NamingConflict);
        let message = error.to_string();
        assert!(message.contains("m:ruby-ore") && message.contains("m:ruby_ore"));
    }
}
