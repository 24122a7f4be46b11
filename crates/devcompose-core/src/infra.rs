use crate::depends::DependsOn;
use crate::env::Environment;
use crate::service::{Service, NETWORK_MODE};
use devcompose_schema::{ContainerName, EnvVar, Package};

/// Reserved services-map key of the shared ROS master.
pub const INFRA_SERVICE_KEY: &str = "rosmaster";
pub const INFRA_IMAGE: &str = "ros:melodic-ros-core";
pub const ROS_MASTER_PORT: u16 = 11311;
pub const ROS_MASTER_URI: &str = "http://localhost:11311";

/// The connection variable a ROS-enabled package needs, or `None` when the
/// package does not use ROS. A `Some` result means the shared ROS master must
/// exist in the document.
pub fn connection_env(package: &Package) -> Option<EnvVar> {
    package
        .ros_enabled()
        .then(|| EnvVar::with_value("ROS_MASTER_URI", ROS_MASTER_URI))
}

/// The shared ROS master service, created at most once per synthesis pass.
pub fn infra_service() -> Service {
    Service {
        container_name: ContainerName::new(INFRA_SERVICE_KEY),
        image: INFRA_IMAGE.to_owned(),
        restart: "always".to_owned(),
        network_mode: NETWORK_MODE.to_owned(),
        command: Some(vec![
            "roscore".to_owned(),
            "-p".to_owned(),
            ROS_MASTER_PORT.to_string(),
        ]),
        environment: Environment::new(),
        volumes: Vec::new(),
        depends_on: DependsOn::new(),
        healthcheck: None,
        mem_limit: None,
        cpus: None,
    }
}
