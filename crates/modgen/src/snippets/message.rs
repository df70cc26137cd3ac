use super::imports::COMPONENT;
use super::{Fragment, Scope};
use crate::codegen::escape_java_string;

impl Scope {
    pub fn send_message(&self, message: &str) -> Fragment {
        self.display(message, false)
    }

    pub fn send_action_bar_message(&self, message: &str) -> Fragment {
        self.display(message, true)
    }

    fn display(&self, message: &str, action_bar: bool) -> Fragment {
        Fragment::new(format!(
            "{}.displayClientMessage(Component.literal(\"{}\"), {action_bar});",
            self.player,
            escape_java_string(message)
        ))
        .with_import(COMPONENT)
    }
}

pub fn send_message(message: &str) -> Fragment {
    Scope::default().send_message(message)
}

pub fn send_action_bar_message(message: &str) -> Fragment {
    Scope::default().send_action_bar_message(message)
}

pub fn console_print(message: &str) -> Fragment {
    Fragment::new(format!(
        "System.out.println(\"{}\");",
        escape_java_string(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_and_action_bar() {
        assert_eq!(
            send_message("Hello!").code(),
            "player.displayClientMessage(Component.literal(\"Hello!\"), false);"
        );
        let bar = Scope::new("world", "pos", "p")
            .expect("scope")
            .send_action_bar_message("Ouch");
        assert_eq!(
            bar.code(),
            "p.displayClientMessage(Component.literal(\"Ouch\"), true);"
        );
        assert_eq!(bar.imports().collect::<Vec<_>>(), vec![COMPONENT]);
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(
            console_print("say \"hi\"").code(),
            "System.out.println(\"say \\\"hi\\\"\");"
        );
        assert_eq!(console_print("a\\b\nc").code(), "System.out.println(\"a\\\\b\\nc\");");
    }
}
