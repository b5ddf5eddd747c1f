//! Shell-side value rendering.
//!
//! Constants and returned values cross back into the shell either as
//! `declare` statements (stubs) or as plain stdout lines (invocation
//! results). Booleans are lowercased to their shell spellings.

use serde_json::Value as JsonValue;

/// Render a value as a shell literal plus the `declare` typedef it
/// needs: `-i` for integers, `-a` for arrays, `-A` for maps, nothing
/// for strings and booleans.
pub fn shell_literal(value: &JsonValue) -> (String, Option<&'static str>) {
    match value {
        JsonValue::Bool(b) => (b.to_string(), None),
        JsonValue::Number(n) if n.is_i64() => (n.to_string(), Some("-i")),
        JsonValue::Array(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| shell_literal(item).0)
                .collect();
            (format!("({})", rendered.join(" ")), Some("-a"))
        }
        JsonValue::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, val)| format!("[{}]={}", quote(key), shell_literal(val).0))
                .collect();
            (format!("({})", rendered.join(" ")), Some("-A"))
        }
        JsonValue::String(s) => (quote(s), None),
        JsonValue::Null => (quote(""), None),
        other => (quote(&other.to_string()), None),
    }
}

fn quote(raw: &str) -> String {
    format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A global `declare` plus assignment, one per module constant.
pub fn declare_var(name: &str, value: &JsonValue) -> String {
    let (literal, typedef) = shell_literal(value);
    let declare = match typedef {
        Some(t) => format!("declare -g {t} {name}"),
        None => format!("declare -g {name}"),
    };
    format!("{declare}\n{name}={literal}\n")
}

/// Invocation results print line-oriented on stdout: nothing for
/// null, one line per array element, booleans lowercase, strings raw.
pub fn result_lines(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Null => Vec::new(),
        JsonValue::Array(items) => items.iter().flat_map(result_lines).collect(),
        JsonValue::Bool(b) => vec![b.to_string()],
        JsonValue::String(s) => vec![s.clone()],
        JsonValue::Number(n) => vec![n.to_string()],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_carry_i_typedef() {
        assert_eq!(shell_literal(&json!(42)), ("42".to_string(), Some("-i")));
    }

    #[test]
    fn test_booleans_are_lowercase_unquoted() {
        assert_eq!(shell_literal(&json!(true)), ("true".to_string(), None));
    }

    #[test]
    fn test_arrays_render_with_a_typedef() {
        let (literal, typedef) = shell_literal(&json!(["a", 1, true]));
        assert_eq!(literal, "(\"a\" 1 true)");
        assert_eq!(typedef, Some("-a"));
    }

    #[test]
    fn test_objects_render_associative() {
        let (literal, typedef) = shell_literal(&json!({"k": "v"}));
        assert_eq!(literal, "([\"k\"]=\"v\")");
        assert_eq!(typedef, Some("-A"));
    }

    #[test]
    fn test_declare_var_includes_typedef() {
        let rendered = declare_var("COUNT", &json!(3));
        assert_eq!(rendered, "declare -g -i COUNT\nCOUNT=3\n");

        let plain = declare_var("NAME", &json!("anna"));
        assert_eq!(plain, "declare -g NAME\nNAME=\"anna\"\n");
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let (literal, _) = shell_literal(&json!("say \"hi\""));
        assert_eq!(literal, "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_result_lines_shapes() {
        assert!(result_lines(&json!(null)).is_empty());
        assert_eq!(result_lines(&json!(true)), vec!["true"]);
        assert_eq!(result_lines(&json!("raw")), vec!["raw"]);
        assert_eq!(
            result_lines(&json!(["a", "b"])),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(result_lines(&json!({"k": 1})), vec!["{\"k\":1}"]);
    }
}
