use figment::providers::{Format, Json, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Error, Metadata, Profile, Provider};
use std::path::Path;

/// Provider for a config file whose format is picked from its extension.
/// Unknown extensions are sniffed from the content and default to TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> SmartProvider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let format = match extension.as_str() {
        "toml" => "toml",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        _ => std::fs::read_to_string(path)
            .ok()
            .and_then(|content| detect_format_from_content(&content))
            .unwrap_or("toml"),
    };

    tracing::debug!("Loading {} as {}", path.display(), format);
    match format {
        "json" => SmartProvider::Json(Json::file(path)),
        "yaml" => SmartProvider::Yaml(Yaml::file(path)),
        _ => SmartProvider::Toml(Toml::file(path)),
    }
}

fn detect_format_from_content(content: &str) -> Option<&'static str> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        return Some("json");
    }
    let first_line = trimmed.lines().next().unwrap_or("");
    if first_line.starts_with('[') || first_line.contains(" = ") {
        return Some("toml");
    }
    if first_line.contains(": ") || first_line.ends_with(':') || first_line.starts_with("---") {
        return Some("yaml");
    }
    None
}

pub enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl Provider for SmartProvider {
    fn metadata(&self) -> Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}
