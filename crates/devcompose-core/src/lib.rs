//! Synthesis engine turning device deployments into a local Compose document.
//!
//! A pass partitions a parsed `ResourceSet` into device deployments and
//! packages, resolves each deployment's package, derives volumes, environment,
//! commands, health checks and `depends_on` edges, injects the shared ROS
//! master service when any package asks for it, and collects one service per
//! executable. The resulting `ComposeDocument` is pruned of empty values before
//! it is handed to an encoder. Per-deployment failures never abort a pass.

pub mod command;
pub mod compose;
pub mod context;
pub mod depends;
pub mod engine;
pub mod env;
pub mod infra;
pub mod partition;
pub mod prune;
pub mod resolve;
pub mod service;
pub mod volume;

pub use command::{build_command, build_healthcheck};
pub use compose::ComposeDocument;
pub use context::PlatformContext;
pub use depends::{build_depends_on, Condition, DependsCondition, DependsOn};
pub use engine::{SkippedDeployment, SynthesisOptions, SynthesisReport, Synthesizer};
pub use env::{compose_environment, Environment};
pub use infra::{connection_env, infra_service, INFRA_SERVICE_KEY};
pub use partition::{partition, Partition};
pub use prune::prune;
pub use resolve::{resolve_package, ResolveError};
pub use service::{normalize_restart, synthesize_services, DeploymentPlan, HealthCheck, Service};
pub use volume::{build_volumes, mode_for};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("manifest error: {0}")]
    Manifest(#[from] devcompose_schema::ManifestError),
    #[error("context error: failed to read {path}: {source}")]
    ContextRead {
        path: String,
        source: std::io::Error,
    },
    #[error("context error: invalid {path}: {source}")]
    ContextParse {
        path: String,
        source: toml::de::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
