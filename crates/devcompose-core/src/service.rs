use crate::command::{build_command, build_healthcheck};
use crate::depends::DependsOn;
use crate::env::Environment;
use devcompose_schema::{ContainerName, Deployment, Package};
use serde::Serialize;
use tracing::debug;

/// Network mode of every synthesized service.
pub const NETWORK_MODE: &str = "host";

/// One Compose service. Empty and absent fields are removed by the pruner,
/// not at serialization time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub container_name: ContainerName,
    pub image: String,
    pub restart: String,
    pub network_mode: String,
    pub command: Option<Vec<String>>,
    pub environment: Environment,
    pub volumes: Vec<String>,
    pub depends_on: DependsOn,
    pub healthcheck: Option<HealthCheck>,
    pub mem_limit: Option<String>,
    pub cpus: Option<serde_json::Number>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub test: String,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

/// Per-deployment pieces shared by every executable's service.
#[derive(Debug, Clone, Default)]
pub struct DeploymentPlan {
    pub volumes: Vec<String>,
    pub environment: Environment,
    pub depends_on: DependsOn,
}

/// Compose spells the on-failure policy with a hyphen.
pub fn normalize_restart(policy: &str) -> String {
    match policy {
        "onfailure" => "on-failure".to_owned(),
        other => other.to_owned(),
    }
}

/// One service per executable of `package`, named `"{deployment}_{executable}"`.
pub fn synthesize_services(
    deployment: &Deployment,
    package: &Package,
    plan: &DeploymentPlan,
) -> Vec<Service> {
    let restart = normalize_restart(&package.spec.device.restart);
    package
        .spec
        .executables
        .iter()
        .map(|executable| {
            let container_name =
                ContainerName::for_executable(deployment.name(), &executable.name);
            debug!("synthesizing {container_name} from {}", executable.docker.image);
            let limits = executable.limits.as_ref();
            Service {
                container_name,
                image: executable.docker.image.clone(),
                restart: restart.clone(),
                network_mode: NETWORK_MODE.to_owned(),
                command: build_command(executable),
                environment: plan.environment.clone(),
                volumes: plan.volumes.clone(),
                depends_on: plan.depends_on.clone(),
                healthcheck: build_healthcheck(executable),
                mem_limit: limits.and_then(|l| l.memory).map(|mb| format!("{mb}m")),
                cpus: limits.and_then(|l| l.cpu.clone()),
            }
        })
        .collect()
}
