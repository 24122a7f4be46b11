use crate::de;
use crate::DEVICE_RUNTIME;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bundle of executables plus shared configuration, identified by `(name, version)`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Package {
    pub metadata: PackageMetadata,
    #[serde(default)]
    pub spec: PackageSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub ros: RosSection,
    #[serde(default)]
    pub device: DeviceSection,
    #[serde(default)]
    pub executables: Vec<Executable>,
    #[serde(default)]
    pub environment_vars: Vec<EnvVar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RosSection {
    #[serde(default, deserialize_with = "de::flag")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceSection {
    #[serde(default = "default_restart")]
    pub restart: String,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            restart: default_restart(),
        }
    }
}

/// One runnable unit within a package.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Executable {
    pub name: String,
    pub docker: DockerSection,
    #[serde(default)]
    pub command: Option<CommandSpec>,
    #[serde(default, deserialize_with = "de::flag")]
    pub run_as_bash: bool,
    #[serde(default)]
    pub liveness_probe: Option<LivenessProbe>,
    #[serde(default)]
    pub limits: Option<ResourceLimits>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DockerSection {
    pub image: String,
}

/// A command given either as one shell line or as an argument vector.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandSpec {
    Line(String),
    Args(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LivenessProbe {
    #[serde(default)]
    pub exec: Option<ExecProbe>,
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
    #[serde(default)]
    pub period_seconds: Option<u32>,
    #[serde(default)]
    pub failure_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExecProbe {
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceLimits {
    /// Memory limit in megabytes.
    #[serde(default)]
    pub memory: Option<u64>,
    /// CPU count or fraction, kept in its source numeric form.
    #[serde(default)]
    pub cpu: Option<serde_json::Number>,
}

/// An environment variable declaration or override.
///
/// `value` and `default` distinguish an absent field (`None`) from an explicit
/// `null` (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EnvVar {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::present")]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "de::present")]
    pub default: Option<Value>,
}

impl EnvVar {
    pub fn with_value(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.to_owned()),
            value: Some(value.into()),
            default: None,
        }
    }

    pub fn with_default(name: &str, default: impl Into<Value>) -> Self {
        Self {
            name: Some(name.to_owned()),
            value: None,
            default: Some(default.into()),
        }
    }

    /// The effective value: `value` wins over `default` whenever it is present.
    pub fn effective(&self) -> Option<&Value> {
        self.value.as_ref().or(self.default.as_ref())
    }
}

impl Package {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    pub fn is_device(&self) -> bool {
        self.spec.runtime == DEVICE_RUNTIME
    }

    pub fn ros_enabled(&self) -> bool {
        self.spec.ros.enabled
    }
}

fn default_restart() -> String {
    "always".to_owned()
}
