use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Line-oriented Java writer with four-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Writes multi-line code at the current depth, keeping its relative indentation.
    pub(crate) fn code(&mut self, code: &str) {
        for line in code.lines() {
            self.line(line.trim_end());
        }
    }

    pub(crate) fn header(&mut self, package: &str, imports: &BTreeSet<String>) {
        self.line(format!("package {package};"));
        self.blank();
        if !imports.is_empty() {
            for import in imports {
                self.line(format!("import {import};"));
            }
            self.blank();
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Float literal with the `f` suffix, e.g. `3.0f`.
pub(crate) fn float_literal(value: f32) -> String {
    if value.is_nan() {
        "Float.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Float.POSITIVE_INFINITY".to_string()
        } else {
            "Float.NEGATIVE_INFINITY".to_string()
        }
    } else {
        format!("{value:?}f")
    }
}

pub(crate) fn escape_java_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn string_literal(raw: &str) -> String {
    format!("\"{}\"", escape_java_string(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_indents_blocks() {
        let mut writer = SourceWriter::new();
        writer.open("class A {");
        writer.open("void f() {");
        writer.code("if (x) {\n    y();\n}");
        writer.close("}");
        writer.blank();
        writer.close("}");
        assert_eq!(
            writer.finish(),
            "class A {\n    void f() {\n        if (x) {\n            y();\n        }\n    }\n\n}\n"
        );
    }

    #[test]
    fn header_lists_sorted_imports() {
        let mut writer = SourceWriter::new();
        let imports = ["b.B", "a.A"].into_iter().map(String::from).collect();
        writer.header("com.example.m", &imports);
        assert_eq!(writer.finish(), "package com.example.m;\n\nimport a.A;\nimport b.B;\n\n");
    }

    #[test]
    fn literals() {
        assert_eq!(float_literal(3.0), "3.0f");
        assert_eq!(float_literal(0.3), "0.3f");
        assert_eq!(float_literal(f32::NAN), "Float.NaN");
        assert_eq!(string_literal("a \"b\""), "\"a \\\"b\\\"\"");
    }
}
