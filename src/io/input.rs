use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Try `preferred` first, then every other format compiled into this build.
pub fn parse_document_any(contents: &str, preferred: DocumentFormat) -> Result<Value> {
    let primary = match parse_document_str(contents, preferred) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    for candidate in DocumentFormat::available_formats() {
        if candidate == preferred {
            continue;
        }
        if let Ok(value) = parse_document_str(contents, candidate) {
            return Ok(value);
        }
    }
    let tried = DocumentFormat::available_formats()
        .into_iter()
        .map(|format| format.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(anyhow!("tried {tried} (first error: {primary:#})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_json_documents() {
        let raw = "{\"image\":{\"path\":\"bg.png\"}}";
        let parsed = parse_document_str(raw, DocumentFormat::Json).unwrap();
        assert_eq!(parsed["image"]["path"], json!("bg.png"));
    }

    #[test]
    fn reports_every_tried_format() {
        let err = parse_document_any("{not valid", DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("json"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn parse_yaml_documents() {
        let raw = "color: ff0000\nimage:\n  path: bg.png";
        let parsed = parse_document_str(raw, DocumentFormat::Yaml).unwrap();
        assert_eq!(parsed["color"], json!("ff0000"));
        assert_eq!(parsed["image"]["path"], json!("bg.png"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parse_toml_documents() {
        let raw = "color = \"ff0000\"";
        let parsed = parse_document_str(raw, DocumentFormat::Toml).unwrap();
        assert_eq!(parsed["color"], json!("ff0000"));
    }
}
