use crate::de;
use crate::package::EnvVar;
use crate::DEVICE_RUNTIME;
use serde::{Deserialize, Serialize};

/// A declared instance of a package targeting a runtime.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Deployment {
    pub metadata: DeploymentMetadata,
    #[serde(default)]
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DeploymentMetadata {
    pub name: String,
    pub depends: PackageRef,
}

/// Reference from a deployment to the package it instantiates.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageRef {
    #[serde(default = "default_package_kind")]
    pub kind: String,
    #[serde(rename = "nameOrGUID", alias = "name")]
    pub name_or_guid: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub env_args: Vec<EnvVar>,
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
    #[serde(default)]
    pub depends: Vec<DependencyRef>,
}

/// A custom bind mount declared by a deployment. Entries missing either path
/// are kept here and skipped when volumes are built.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    #[serde(default)]
    pub sub_path: Option<String>,
    #[serde(default)]
    pub mount_path: Option<String>,
    #[serde(default)]
    pub perm: Option<u32>,
}

/// A hard dependency on another resource, usually a deployment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
    #[serde(default = "default_dependency_kind")]
    pub kind: String,
    #[serde(rename = "nameOrGUID", alias = "name")]
    pub name_or_guid: String,
}

impl DependencyRef {
    pub fn is_deployment(&self) -> bool {
        self.kind.eq_ignore_ascii_case("deployment")
    }
}

impl Deployment {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn package_ref(&self) -> &PackageRef {
        &self.metadata.depends
    }

    pub fn is_device(&self) -> bool {
        self.spec.runtime == DEVICE_RUNTIME
    }
}

fn default_package_kind() -> String {
    "package".to_owned()
}

fn default_dependency_kind() -> String {
    "deployment".to_owned()
}
