//! Rendering of JSON bodies as native literals of a target language.

use serde_json::Value;

/// Literal grammar of one target's nested maps and lists.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsonSyntax {
    pub object_open: &'static str,
    pub object_close: &'static str,
    pub empty_object: &'static str,
    pub array_open: &'static str,
    pub array_close: &'static str,
    pub empty_array: &'static str,
    pub key_separator: &'static str,
    pub null: &'static str,
    pub true_literal: &'static str,
    pub false_literal: &'static str,
    /// Go requires a comma after the last element of a multi-line literal.
    pub trailing_comma: bool,
    pub indent: &'static str,
    pub string: fn(&str) -> String,
}

/// Render `value` starting at the current cursor position.
///
/// Nested lines are indented one level deeper than `depth`; the closing
/// bracket sits at `depth`.
pub(crate) fn render(value: &Value, syntax: &JsonSyntax, depth: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, syntax, depth);
    out
}

fn write_value(out: &mut String, value: &Value, syntax: &JsonSyntax, depth: usize) {
    match value {
        Value::Null => out.push_str(syntax.null),
        Value::Bool(true) => out.push_str(syntax.true_literal),
        Value::Bool(false) => out.push_str(syntax.false_literal),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&(syntax.string)(s)),
        Value::Array(items) if items.is_empty() => out.push_str(syntax.empty_array),
        Value::Object(map) if map.is_empty() => out.push_str(syntax.empty_object),
        Value::Array(items) => {
            out.push_str(syntax.array_open);
            write_items(out, items.iter(), items.len(), syntax, depth, |out, item| {
                write_value(out, item, syntax, depth + 1);
            });
            out.push_str(syntax.array_close);
        }
        Value::Object(map) => {
            out.push_str(syntax.object_open);
            write_items(out, map.iter(), map.len(), syntax, depth, |out, (key, item)| {
                out.push_str(&(syntax.string)(key));
                out.push_str(syntax.key_separator);
                write_value(out, item, syntax, depth + 1);
            });
            out.push_str(syntax.object_close);
        }
    }
}

fn write_items<T>(
    out: &mut String,
    items: impl Iterator<Item = T>,
    len: usize,
    syntax: &JsonSyntax,
    depth: usize,
    mut write_item: impl FnMut(&mut String, T),
) {
    out.push('\n');
    for (i, item) in items.enumerate() {
        out.push_str(&syntax.indent.repeat(depth + 1));
        write_item(out, item);
        if i + 1 < len || syntax.trailing_comma {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&syntax.indent.repeat(depth));
}
