//! Endpoint manifest loading.

use crate::arguments::ArgumentBinding;
use crate::config::{Authorization, EndpointConfig};
use crate::{Error, HttpVerb, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Supported manifest file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ManifestFormat::Json),
            "toml" => Some(ManifestFormat::Toml),
            _ => None,
        }
    }
}

/// One endpoint declaration as written in a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointDefinition {
    pub verb: HttpVerb,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub authorization: Option<Authorization>,
    /// Duration text such as `"00:00:03.000"`.
    pub cache_time: Option<String>,
    /// Bound property names; the position in the list is the placeholder index.
    pub arguments: Vec<String>,
    pub unwrap: Option<String>,
}

impl EndpointDefinition {
    pub fn to_config(&self) -> EndpointConfig {
        let mut config = EndpointConfig::new(self.verb, self.endpoint.clone());
        for (name, value) in &self.headers {
            config = config.with_header(name.clone(), value.clone());
        }
        if let Some(authorization) = &self.authorization {
            config = config.with_authorization(authorization.clone());
        }
        if let Some(cache_time) = &self.cache_time {
            config = config.with_cache_time(cache_time);
        }
        if !self.arguments.is_empty() {
            config = config.with_bindings(
                self.arguments
                    .iter()
                    .enumerate()
                    .map(|(index, property)| ArgumentBinding::new(property.clone(), index))
                    .collect(),
            );
        }
        if let Some(property) = &self.unwrap {
            config = config.with_unwrap_property(property.clone());
        }
        config
    }
}

/// Named groups of endpoint declarations.
///
/// Each top-level key names a group, typically one per response type:
///
/// ```toml
/// [[weather]]
/// endpoint = "api/weather"
/// authorization = { scheme = "Bearer", token = "secret" }
///
/// [[weather]]
/// verb = "get"
/// endpoint = "api/weather?City={0}&Date={1}"
/// arguments = ["city", "date"]
/// cache_time = "00:00:03"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointManifest {
    groups: HashMap<String, Vec<EndpointDefinition>>,
}

impl EndpointManifest {
    /// Load a manifest, detecting the format from the file extension.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Manifest("No file extension found".to_string()))?;

        let format = ManifestFormat::from_extension(ext)
            .ok_or_else(|| Error::Manifest(format!("Unsupported format: {}", ext)))?;

        let content = fs::read_to_string(path)?;
        let manifest = Self::parse(&content, format)?;

        tracing::debug!(
            path = %path.display(),
            groups = manifest.groups.len(),
            "Endpoint manifest loaded"
        );
        Ok(manifest)
    }

    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        match format {
            ManifestFormat::Json => Self::from_json_str(content),
            ManifestFormat::Toml => Self::from_toml_str(content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Manifest(format!("TOML parse error: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::Manifest(format!("JSON parse error: {}", e)))
    }

    pub fn insert(&mut self, name: impl Into<String>, definitions: Vec<EndpointDefinition>) {
        self.groups.insert(name.into(), definitions);
    }

    pub fn group(&self, name: &str) -> Option<&[EndpointDefinition]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Endpoint configurations of the group `name`.
    pub fn configs(&self, name: &str) -> Result<Vec<EndpointConfig>> {
        let definitions = self
            .group(name)
            .ok_or_else(|| Error::Manifest(format!("No endpoint group named '{}'", name)))?;
        Ok(definitions.iter().map(EndpointDefinition::to_config).collect())
    }
}
