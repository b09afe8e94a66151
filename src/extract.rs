//! Recovery of a JSON object embedded in free-form model output.
//!
//! Models asked for "only JSON" still wrap the object in prose or code fences
//! now and then. Rather than slicing from the first `{` to the last `}`, the
//! scanner walks the text tracking nesting depth and string literals, so
//! braces inside string values and trailing prose containing braces do not
//! throw off the match.

use std::collections::HashMap;

use serde_json::Value;

/// Returns the first balanced `{...}` span in `text` that parses as a JSON object.
///
/// Candidates that balance but fail to parse (e.g. `{like this}` in prose) are
/// skipped and scanning resumes at the next opening brace.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let mut spans = HashMap::new();

    for (start, _) in text.match_indices('{') {
        if !spans.contains_key(&start) {
            resolve_spans_from(text, start, &mut spans);
        }

        let Some(&Some(end)) = spans.get(&start) else {
            continue;
        };
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&text[start..end]) {
            return Some(value);
        }
    }

    None
}

/// Scans from the `{` at `start` and records, for it and for every `{` met
/// outside a string literal along the way, the end of its balanced span, or
/// `None` when it is closed by `]` or never closed.
///
/// A `{` reached outside a string has the same lexical state as a fresh scan
/// started there, so one pass settles all of them and the whole extraction
/// stays linear in the common case.
fn resolve_spans_from(text: &str, start: usize, spans: &mut HashMap<usize, Option<usize>>) {
    let mut open: Vec<(usize, char)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        let index = start + offset;

        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' => open.push((index, ch)),
            '}' | ']' => {
                let Some((opened_at, opener)) = open.pop() else {
                    break;
                };
                if opener == '{' {
                    spans.insert(opened_at, (ch == '}').then_some(index + ch.len_utf8()));
                }
                if open.is_empty() {
                    return;
                }
            }
            _ => {}
        }
    }

    for (opened_at, opener) in open {
        if opener == '{' {
            spans.entry(opened_at).or_insert(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PASTA: &str = r#"{"title":"Pasta","description":"d","prepTime":"10 min","cookTime":"20 min","servings":2,"tips":[{"id":"t1","text":"Use fresh basil"}],"steps":[{"number":1,"instruction":"Boil water"}]}"#;

    #[test]
    fn parses_a_bare_object() {
        let expected: Value = serde_json::from_str(PASTA).unwrap();
        assert_eq!(extract_json_object(PASTA), Some(expected));
    }

    #[test]
    fn finds_object_inside_prose_and_code_fence() {
        let reply = format!("Sure! Here you go:\n```json\n{PASTA}\n```\nEnjoy!");
        let expected: Value = serde_json::from_str(PASTA).unwrap();
        assert_eq!(extract_json_object(&reply), Some(expected));
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_span() {
        let reply = r#"Recipe: {"title":"Curly {braces} pasta","tips":[{"id":"t}","text":"a \"quoted\" } brace"}]} and then {more prose}"#;
        assert_eq!(
            extract_json_object(reply),
            Some(json!({
                "title": "Curly {braces} pasta",
                "tips": [{"id": "t}", "text": "a \"quoted\" } brace"}]
            }))
        );
    }

    #[test]
    fn skips_prose_braces_before_the_object() {
        let reply = "Replace {dish} with the name. {\"title\":\"Pho\",\"servings\":4}";
        assert_eq!(
            extract_json_object(reply),
            Some(json!({"title": "Pho", "servings": 4}))
        );
    }

    #[test]
    fn handles_multibyte_text_around_the_object() {
        let reply = "Voilà — crème brûlée: {\"title\":\"Crème brûlée\"} ✨";
        assert_eq!(
            extract_json_object(reply),
            Some(json!({"title": "Crème brûlée"}))
        );
    }

    #[test]
    fn nested_object_inside_an_unclosed_brace_is_found() {
        assert_eq!(
            extract_json_object("{ draft: {\"title\":\"Pho\"} and more"),
            Some(json!({"title": "Pho"}))
        );
    }

    #[test]
    fn many_unclosed_braces_do_not_rescan_the_text() {
        let reply = format!("{}{{\"title\":\"Pho\"}}", "{".repeat(200_000));
        assert_eq!(extract_json_object(&reply), Some(json!({"title": "Pho"})));

        let unclosed = "{ \"a\": [".repeat(100_000);
        assert_eq!(extract_json_object(&unclosed), None);
    }

    #[test]
    fn returns_none_without_a_parseable_object() {
        assert_eq!(extract_json_object("I could not find a recipe, sorry."), None);
        assert_eq!(extract_json_object("{\"title\": \"unterminated\""), None);
        assert_eq!(extract_json_object("{not: json}"), None);
        assert_eq!(extract_json_object("[1, 2, 3]"), None);
        assert_eq!(extract_json_object(""), None);
    }
}
