//! Helpers shared by the advisory prompts: JSON extraction from free-form
//! model replies and the reply-language instruction.

use serde_json::Value;
use shared::Language;

/// Greedy span from the first `{` to the last `}`
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Body of the first ```json fenced block, if any
fn fenced_json(text: &str) -> Option<&str> {
    let open = text.find("```json")?;
    let body = &text[open + "```json".len()..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Pull a JSON object out of a model reply
///
/// A fenced ```json block wins; otherwise the outermost brace span is
/// parsed. Anything that does not parse to an object gives `None`.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let parse = |candidate: &str| {
        serde_json::from_str::<Value>(candidate)
            .ok()
            .filter(Value::is_object)
    };

    fenced_json(text)
        .and_then(parse)
        .or_else(|| brace_span(text).and_then(parse))
}

/// Instruction appended to prompts when the farmer reads another language
pub fn language_instruction(code: Option<&str>) -> Option<String> {
    let language = Language::from_code(code);
    if language.is_english() {
        return None;
    }
    Some(format!(
        "Respond in {} ({}). Keep the JSON keys in English and translate only the values.",
        language.name, language.native
    ))
}

/// Append the language instruction to a prompt when one applies
pub fn with_language(prompt: String, code: Option<&str>) -> String {
    match language_instruction(code) {
        Some(instruction) => format!("{}\n\n{}", prompt, instruction),
        None => prompt,
    }
}

/// Prompt line for an optional form field, empty when the field is blank
pub fn optional_line(label: &str, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => format!("{}: {}", label, v),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_object() {
        let v = extract_json_object(r#"{"dailyTip": "Water early"}"#).unwrap();
        assert_eq!(v["dailyTip"], "Water early");
    }

    #[test]
    fn test_object_with_surrounding_prose() {
        let text = "Here is your advice:\n{\"a\": {\"b\": 1}}\nGood luck!";
        let v = extract_json_object(text).unwrap();
        assert_eq!(v["a"]["b"], 1);
    }

    #[test]
    fn test_fenced_block_preferred() {
        let text = "Note {not json}\n```json\n{\"summary\": \"Sunny\"}\n```\n";
        let v = extract_json_object(text).unwrap();
        assert_eq!(v["summary"], "Sunny");
    }

    #[test]
    fn test_malformed_and_missing() {
        assert!(extract_json_object("no braces here").is_none());
        assert!(extract_json_object("{ broken: json, }").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(brace_span("} backwards {").is_none());
        assert_eq!(brace_span("x {a} y {b} z"), Some("{a} y {b}"));
    }

    #[test]
    fn test_language_instruction() {
        assert!(language_instruction(None).is_none());
        assert!(language_instruction(Some("en")).is_none());
        assert!(language_instruction(Some("zz")).is_none());
        let hi = language_instruction(Some("hi")).unwrap();
        assert!(hi.starts_with("Respond in Hindi"));
        assert_eq!(with_language("P".into(), Some("ta")).lines().count(), 3);
    }

    #[test]
    fn test_optional_line() {
        assert_eq!(optional_line("Soil Type", Some("Loamy")), "Soil Type: Loamy");
        assert_eq!(optional_line("Soil Type", Some("  ")), "");
        assert_eq!(optional_line("Soil Type", None), "");
    }

    proptest! {
        /// Any serialized object survives being wrapped in prose
        #[test]
        fn prop_object_recovered_from_prose(key in "[a-z]{1,8}", value in "[A-Za-z ]{0,20}", prefix in "[A-Za-z .:]{0,30}") {
            let mut map = serde_json::Map::new();
            map.insert(key.clone(), Value::String(value.clone()));
            let object = Value::Object(map);
            let text = format!("{}\n{}\nThanks", prefix, object);
            let parsed = extract_json_object(&text).unwrap();
            prop_assert_eq!(&parsed[key.as_str()], &Value::String(value));
        }
    }
}
