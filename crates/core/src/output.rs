//! JSON rendering for generated documents.

use std::io::Write;

use serde_json::Value;

use crate::error::CoreError;

/// Render `value` as 2-space indented JSON followed by a newline.
pub fn to_pretty_string(value: &Value) -> Result<String, CoreError> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write `value` to `writer` in the same form as [`to_pretty_string`].
pub fn write_json<W: Write>(value: &Value, mut writer: W) -> Result<(), CoreError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_string_sorts_keys_and_ends_with_newline() {
        let rendered = to_pretty_string(&json!({"b": 1, "a": [true]})).unwrap();
        assert_eq!(rendered, "{\n  \"a\": [\n    true\n  ],\n  \"b\": 1\n}\n");
    }

    #[test]
    fn write_json_matches_pretty_string() {
        let value = json!({"title": "x", "panels": []});
        let mut buffer = Vec::new();
        write_json(&value, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_pretty_string(&value).unwrap());
    }
}
