use crate::deployment::Deployment;
use crate::package::Package;
use crate::types::ResourceKey;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse manifest document #{index}: {source}")]
    Parse {
        index: usize,
        source: serde_yaml::Error,
    },
    #[error("manifest document #{index} has no kind")]
    MissingKind { index: usize },
    #[error("manifest document #{index} has no metadata.name")]
    MissingName { index: usize },
    #[error("invalid {kind} '{name}': {source}")]
    Invalid {
        kind: String,
        name: String,
        source: serde_yaml::Error,
    },
    #[error("{path}: {source}")]
    InFile {
        path: String,
        source: Box<ManifestError>,
    },
}

/// A resource kind this crate does not model, kept so callers can see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherResource {
    pub kind: String,
    pub name: String,
    pub runtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Deployment(Deployment),
    Package(Package),
    Other(OtherResource),
}

impl Resource {
    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(_) => "deployment",
            Self::Package(_) => "package",
            Self::Other(other) => &other.kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Deployment(d) => d.name(),
            Self::Package(p) => p.name(),
            Self::Other(other) => &other.name,
        }
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey::for_kind(self.kind(), self.name())
    }
}

/// Parsed resources keyed by `"{kind}:{name}"`, in first-seen order.
///
/// Inserting a resource whose key already exists replaces the earlier one
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    entries: IndexMap<ResourceKey, Resource>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        self.entries.insert(resource.key(), resource)
    }

    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &Resource)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ManifestError> {
        let mut set = Self::new();
        for path in paths {
            set.extend(parse_resource_file(path)?);
        }
        Ok(set)
    }
}

impl Extend<Resource> for ResourceSet {
    fn extend<T: IntoIterator<Item = Resource>>(&mut self, iter: T) {
        for resource in iter {
            self.insert(resource);
        }
    }
}

impl FromIterator<Resource> for ResourceSet {
    fn from_iter<T: IntoIterator<Item = Resource>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Parse a YAML stream of `---`-separated resource documents. JSON input is
/// accepted as a single document.
pub fn parse_resources_str(input: &str) -> Result<Vec<Resource>, ManifestError> {
    let mut resources = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value =
            Value::deserialize(document).map_err(|source| ManifestError::Parse { index, source })?;
        if value.is_null() {
            continue;
        }
        resources.push(resource_from_value(index, value)?);
    }
    Ok(resources)
}

pub fn parse_resource_file(path: impl AsRef<Path>) -> Result<Vec<Resource>, ManifestError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: display.clone(),
        source,
    })?;
    parse_resources_str(&content).map_err(|e| ManifestError::InFile {
        path: display,
        source: Box::new(e),
    })
}

fn resource_from_value(index: usize, value: Value) -> Result<Resource, ManifestError> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(ManifestError::MissingKind { index })?
        .to_owned();
    let name = value
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .ok_or(ManifestError::MissingName { index })?
        .to_owned();

    let invalid = |source| ManifestError::Invalid {
        kind: kind.clone(),
        name: name.clone(),
        source,
    };

    if kind.eq_ignore_ascii_case("deployment") {
        return serde_yaml::from_value(value)
            .map(Resource::Deployment)
            .map_err(invalid);
    }
    if kind.eq_ignore_ascii_case("package") {
        return serde_yaml::from_value(value)
            .map(Resource::Package)
            .map_err(invalid);
    }

    let runtime = value
        .get("spec")
        .and_then(|s| s.get("runtime"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    Ok(Resource::Other(OtherResource {
        kind: kind.to_ascii_lowercase(),
        name,
        runtime,
    }))
}
