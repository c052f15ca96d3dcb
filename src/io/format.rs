use std::fmt;
use std::path::Path;

/// Supported data formats for schema and params documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

/// What a file extension says about a document's format in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionFormat {
    Known(DocumentFormat),
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

impl DocumentFormat {
    pub fn available_formats() -> Vec<DocumentFormat> {
        vec![
            DocumentFormat::Json,
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            DocumentFormat::Toml,
        ]
    }

    pub fn from_path(path: &Path) -> ExtensionFormat {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return ExtensionFormat::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "json" => ExtensionFormat::Known(DocumentFormat::Json),
            "yaml" | "yml" => {
                #[cfg(feature = "yaml")]
                {
                    ExtensionFormat::Known(DocumentFormat::Yaml)
                }
                #[cfg(not(feature = "yaml"))]
                {
                    ExtensionFormat::UnsupportedFeature {
                        format_name: "YAML",
                        feature_flag: "yaml",
                    }
                }
            }
            "toml" => {
                #[cfg(feature = "toml")]
                {
                    ExtensionFormat::Known(DocumentFormat::Toml)
                }
                #[cfg(not(feature = "toml"))]
                {
                    ExtensionFormat::UnsupportedFeature {
                        format_name: "TOML",
                        feature_flag: "toml",
                    }
                }
            }
            _ => ExtensionFormat::Unknown,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}
