//! Rendering of command results for the terminal or for scripts.

use serde::Serialize;

/// Envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> JsonOut<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Render a result as the JSON envelope, or as text via `text`.
///
/// Report renderers terminate every line, so the trailing newline is
/// dropped before the result reaches `println!`.
pub fn render<T: Serialize>(
    json: bool,
    data: &T,
    text: impl FnOnce(&T) -> String,
) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(&JsonOut::ok(data))
    } else {
        Ok(text(data).trim_end().to_string())
    }
}

pub fn print_report<T: Serialize>(
    json: bool,
    data: T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    println!("{}", render(json, &data, text)?);
    Ok(())
}

/// One line per row in text mode; a JSON array otherwise.
pub fn print_rows<T: Serialize>(
    json: bool,
    rows: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    let rendered = render(json, &rows, |rows| {
        rows.iter().map(row).collect::<Vec<_>>().join("\n")
    })?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_envelope() {
        let rendered = render(true, &vec!["Headache"], |_| unreachable!()).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["ok"], Value::Bool(true));
        assert_eq!(parsed["data"][0], "Headache");
    }

    #[test]
    fn test_text_drops_trailing_newline() {
        let rendered = render(false, &(), |_| "All vitals appear normal!\n".to_string()).unwrap();
        assert_eq!(rendered, "All vitals appear normal!");
    }
}
