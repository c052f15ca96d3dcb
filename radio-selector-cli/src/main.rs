use std::fmt::Write as FmtWrite;
use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use radio_selector::io::{
    DocumentFormat, ExtensionFormat, ParamsSink, SaveOptions, parse_document_any, save_params,
};
use radio_selector::{SelectorOptions, SelectorUI, UiOptions};

const DEFAULT_LOG_FILTER: &str = "radio_selector=debug";

#[derive(Debug, Parser)]
#[command(
    name = "radio-selector",
    version,
    about = "Pick exactly one background (image, color, ...) in the terminal"
)]
struct Cli {
    /// Selector schema: file path, inline payload, or "-" for stdin
    #[arg(short = 's', long = "schema", value_name = "SPEC")]
    schema: String,

    /// Current params: file path, inline payload, or "-" for stdin
    #[arg(short = 'p', long = "params", value_name = "SPEC")]
    params: Option<String>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Where to write the saved params ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Refuse to save while the checked choice has no value
    #[arg(long = "require-value")]
    require_value: bool,

    /// Base URL that relative image paths are resolved against
    #[arg(long = "content-base", value_name = "URL")]
    content_base: Option<String>,

    /// Append diagnostics to this file (RUST_LOG overrides the filter)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut diagnostics = Diagnostics::default();
    if cli.schema == "-" && cli.params.as_deref() == Some("-") {
        diagnostics.push("input", "schema and params cannot both come from stdin");
    }
    let schema_format = format_hint(&cli.schema, "schema", &mut diagnostics);
    let params_format = cli
        .params
        .as_deref()
        .map(|spec| format_hint(spec, "params", &mut diagnostics));
    let save = save_options(&cli, params_format.or(Some(schema_format)), &mut diagnostics);
    diagnostics.into_result()?;

    let schema = load_value(&cli.schema, schema_format, "schema")?;
    let params = match cli.params.as_deref() {
        Some(spec) => load_value(spec, params_format.unwrap_or_default(), "params")?,
        None => Value::Object(Default::default()),
    };

    let mut selector_options = SelectorOptions::default();
    if let Some(base) = cli.content_base.as_ref() {
        selector_options = selector_options.with_content_base(base.clone());
    }
    let mut ui = SelectorUI::new(schema, params)
        .with_options(UiOptions::default().with_require_value(cli.require_value))
        .with_selector_options(selector_options);
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }

    let saved = ui.run().map_err(Report::msg)?;
    save_params(&saved, &save).map_err(Report::msg)?;
    info!(sinks = save.sinks.len(), "wrote params");
    Ok(())
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn format_hint(spec: &str, label: &str, diagnostics: &mut Diagnostics) -> DocumentFormat {
    if spec == "-" {
        return DocumentFormat::default();
    }
    match DocumentFormat::from_path(Path::new(spec)) {
        ExtensionFormat::Known(format) => format,
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push(
                label,
                format!("'{spec}' is {format_name}, but this build lacks the '{feature_flag}' feature"),
            );
            DocumentFormat::default()
        }
        ExtensionFormat::Unknown => DocumentFormat::default(),
    }
}

fn load_value(spec: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    let (contents, origin) = if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        (buffer, "stdin".to_string())
    } else {
        match fs::read_to_string(spec) {
            Ok(contents) => (contents, spec.to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                (spec.to_string(), format!("inline {label}"))
            }
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("failed to read {label} from {spec}"));
            }
        }
    };
    parse_document_any(&contents, format)
        .map_err(|err| eyre!("failed to parse {label} ({origin}): {err:#}"))
}

fn save_options(
    cli: &Cli,
    hint: Option<DocumentFormat>,
    diagnostics: &mut Diagnostics,
) -> SaveOptions {
    let sinks = if cli.outputs.is_empty() {
        vec![ParamsSink::Stdout]
    } else {
        cli.outputs
            .iter()
            .map(|raw| ParamsSink::parse(raw.trim()))
            .collect()
    };

    let mut format = None;
    for sink in &sinks {
        let ParamsSink::File(path) = sink else {
            continue;
        };
        if path.as_os_str().is_empty() {
            diagnostics.push("output", "output destination cannot be empty");
            continue;
        }
        if !cli.force && path.exists() {
            diagnostics.push(
                "output",
                format!("{} already exists (pass --force to overwrite)", path.display()),
            );
        }
        match DocumentFormat::from_path(path) {
            ExtensionFormat::Known(found) => match format {
                Some(existing) if existing != found => diagnostics.push(
                    "output",
                    format!("{} uses {found} but other outputs use {existing}", path.display()),
                ),
                _ => format = Some(found),
            },
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push(
                "output",
                format!(
                    "{} needs {format_name} support; rebuild with the '{feature_flag}' feature",
                    path.display()
                ),
            ),
            ExtensionFormat::Unknown => diagnostics.push(
                "output",
                format!("cannot infer format of {}; use .json/.yaml/.toml", path.display()),
            ),
        }
    }

    SaveOptions::new(format.or(hint).unwrap_or_default())
        .with_pretty(!cli.no_pretty)
        .with_sinks(sinks)
}

/// Collects every input/output problem so they are reported together.
#[derive(Default)]
struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    fn push(&mut self, label: &str, message: impl Into<String>) {
        self.messages.push(format!("{label}: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("cannot start radio-selector:\n");
        for (idx, message) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {message}", idx + 1);
        }
        Err(eyre!(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["radio-selector", "--schema", "{}"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_to_stdout() {
        let mut diagnostics = Diagnostics::default();
        let options = save_options(&cli(&[]), None, &mut diagnostics);
        assert_eq!(options.sinks, vec![ParamsSink::Stdout]);
        assert_eq!(options.format, DocumentFormat::Json);
        assert!(diagnostics.messages.is_empty());
    }

    #[test]
    fn rejects_outputs_without_known_extension() {
        let mut diagnostics = Diagnostics::default();
        save_options(
            &cli(&["-o", "params.out", "--force"]),
            None,
            &mut diagnostics,
        );
        assert_eq!(diagnostics.messages.len(), 1);
        assert!(diagnostics.messages[0].contains("cannot infer format"));
    }

    #[test]
    fn inline_payloads_parse_when_no_file_exists() {
        let value = load_value(
            r#"{"fields":[{"name":"image","type":"image"}]}"#,
            DocumentFormat::Json,
            "schema",
        )
        .unwrap();
        assert_eq!(value["fields"][0]["type"], "image");
    }
}
