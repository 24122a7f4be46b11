//! Typed resource manifests for device deployments.
//!
//! This crate defines the schema layer: `Deployment` and `Package` resources
//! (with their executables, environment declarations, volumes and probes),
//! multi-document YAML/JSON parsing into an insertion-ordered `ResourceSet`,
//! and the parse-time defaulting that lets the synthesis engine treat every
//! optional field as explicitly present or absent.

mod de;
pub mod deployment;
pub mod package;
pub mod resource;
pub mod types;

pub use deployment::{Deployment, DeploymentSpec, DependencyRef, PackageRef, VolumeMount};
pub use package::{
    CommandSpec, DeviceSection, DockerSection, EnvVar, ExecProbe, Executable, LivenessProbe,
    Package, PackageSpec, ResourceLimits, RosSection,
};
pub use resource::{
    parse_resource_file, parse_resources_str, ManifestError, OtherResource, Resource, ResourceSet,
};
pub use types::{ContainerName, ResourceKey};

/// Runtime value selecting resources that run on a device.
pub const DEVICE_RUNTIME: &str = "device";
