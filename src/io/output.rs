use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Where the saved params document goes once the selector is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsSink {
    Stdout,
    File(PathBuf),
}

impl ParamsSink {
    /// `-` means stdout, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            ParamsSink::Stdout
        } else {
            ParamsSink::File(PathBuf::from(raw))
        }
    }

    fn describe(&self) -> String {
        match self {
            ParamsSink::Stdout => "stdout".to_string(),
            ParamsSink::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub sinks: Vec<ParamsSink>,
}

impl SaveOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            sinks: vec![ParamsSink::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_sinks(mut self, sinks: Vec<ParamsSink>) -> Self {
        self.sinks = sinks;
        self
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize `params` once and write it to every configured sink.
pub fn save_params(params: &Value, options: &SaveOptions) -> Result<()> {
    if options.sinks.is_empty() {
        return Ok(());
    }
    let mut payload = render_document(params, options.format, options.pretty)?;
    if !payload.ends_with('\n') {
        payload.push('\n');
    }
    for sink in &options.sinks {
        write_sink(sink, &payload)
            .with_context(|| format!("failed to write params to {}", sink.describe()))?;
    }
    Ok(())
}

pub fn render_document(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json if pretty => {
            serde_json::to_string_pretty(value).context("failed to serialize JSON")
        }
        DocumentFormat::Json => serde_json::to_string(value).context("failed to serialize JSON"),
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml if pretty => {
            toml::to_string_pretty(value).context("failed to serialize TOML")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::to_string(value).context("failed to serialize TOML"),
    }
}

fn write_sink(sink: &ParamsSink, payload: &str) -> Result<()> {
    match sink {
        ParamsSink::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            stdout.flush()?;
        }
        ParamsSink::File(path) => fs::write(path, payload)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn dash_means_stdout() {
        assert_eq!(ParamsSink::parse("-"), ParamsSink::Stdout);
        assert_eq!(
            ParamsSink::parse("out.json"),
            ParamsSink::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn compact_json_keeps_key_order() {
        let params = json!({"image": {"path": "/img.png"}, "color": "ff0000"});
        let rendered = render_document(&params, DocumentFormat::Json, false).unwrap();
        assert_eq!(rendered, r#"{"image":{"path":"/img.png"},"color":"ff0000"}"#);
    }

    #[test]
    fn no_sinks_is_a_noop() {
        let options = SaveOptions::default().with_sinks(Vec::new());
        save_params(&json!({"color": "ff0000"}), &options).unwrap();
    }

    #[test]
    fn writes_params_file() {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("radio-selector-params-{stamp}.json"));
        let options = SaveOptions::default()
            .with_pretty(false)
            .with_sinks(vec![ParamsSink::File(path.clone())]);
        save_params(&json!({"color": "00ff00"}), &options).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\"color\":\"00ff00\"}\n");
        fs::remove_file(path).unwrap();
    }
}
