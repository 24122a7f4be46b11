use crate::infra::INFRA_SERVICE_KEY;
use crate::partition::{DeploymentMap, PackageMap};
use crate::resolve::resolve_package;
use devcompose_schema::{ContainerName, Deployment, ResourceKey};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    ServiceStarted,
}

/// One `depends_on` edge, rendered as `{condition: ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DependsCondition {
    pub condition: Condition,
}

pub type DependsOn = IndexMap<ContainerName, DependsCondition>;

/// Edges for one deployment: the ROS master when `infra_enabled`, then every
/// executable of each deployment it depends on when `link_dependencies` is set.
///
/// A dependency whose deployment or package cannot be found contributes no
/// edges.
pub fn build_depends_on(
    deployment: &Deployment,
    deployments: &DeploymentMap<'_>,
    packages: &PackageMap<'_>,
    infra_enabled: bool,
    link_dependencies: bool,
) -> DependsOn {
    let mut edges = DependsOn::new();
    if infra_enabled {
        edges.insert(
            ContainerName::new(INFRA_SERVICE_KEY),
            DependsCondition::default(),
        );
    }
    if !link_dependencies {
        return edges;
    }

    for dependency in deployment.spec.depends.iter().filter(|d| d.is_deployment()) {
        let key = ResourceKey::deployment(&dependency.name_or_guid);
        let Some(target) = deployments.get(key.as_str()) else {
            debug!(
                "{}: dependency '{}' is not a device deployment",
                deployment.name(),
                dependency.name_or_guid
            );
            continue;
        };
        let reference = target.package_ref();
        let package =
            match resolve_package(packages, &reference.name_or_guid, &reference.version) {
                Ok(package) => package,
                Err(e) => {
                    debug!("{}: skipping edge to '{}': {e}", deployment.name(), target.name());
                    continue;
                }
            };
        for executable in &package.spec.executables {
            edges.insert(
                ContainerName::for_executable(target.name(), &executable.name),
                DependsCondition::default(),
            );
        }
    }
    edges
}
