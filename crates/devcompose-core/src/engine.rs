use crate::compose::ComposeDocument;
use crate::context::PlatformContext;
use crate::depends::build_depends_on;
use crate::env::compose_environment;
use crate::infra::{connection_env, infra_service, INFRA_SERVICE_KEY};
use crate::partition::partition;
use crate::resolve::{resolve_package, ResolveError};
use crate::service::{synthesize_services, DeploymentPlan};
use crate::volume::build_volumes;
use devcompose_schema::{ContainerName, ResourceSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisOptions {
    /// Emit `depends_on` edges for deployment-to-deployment dependencies.
    pub link_dependencies: bool,
}

/// A deployment left out of the document, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeployment {
    pub deployment: String,
    pub error: ResolveError,
}

/// Outcome of one synthesis pass.
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub document: ComposeDocument,
    pub skipped: Vec<SkippedDeployment>,
    /// Container names written more than once; the last write is kept.
    pub collisions: Vec<ContainerName>,
}

impl SynthesisReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Drives a synthesis pass over a resource set.
///
/// Each pass builds a fresh document, so one `Synthesizer` can be reused
/// across independent resource sets.
pub struct Synthesizer {
    context: PlatformContext,
    options: SynthesisOptions,
}

impl Synthesizer {
    pub fn new(context: PlatformContext) -> Self {
        Self::with_options(context, SynthesisOptions::default())
    }

    pub fn with_options(context: PlatformContext, options: SynthesisOptions) -> Self {
        Self { context, options }
    }

    /// Synthesize services for every device deployment in `resources`.
    ///
    /// Deployments whose package cannot be resolved are recorded in
    /// [`SynthesisReport::skipped`] and the pass continues.
    pub fn synthesize(&self, resources: &ResourceSet) -> SynthesisReport {
        let parts = partition(resources);
        info!(
            "synthesizing {} deployment(s) against {} package(s)",
            parts.deployments.len(),
            parts.packages.len()
        );

        let mut report = SynthesisReport::default();
        for deployment in parts.deployments.values() {
            let reference = deployment.package_ref();
            let package =
                match resolve_package(&parts.packages, &reference.name_or_guid, &reference.version)
                {
                    Ok(package) => package,
                    Err(error) => {
                        warn!("skipping deployment '{}': {error}", deployment.name());
                        report.skipped.push(SkippedDeployment {
                            deployment: deployment.name().to_owned(),
                            error,
                        });
                        continue;
                    }
                };

            let injected = connection_env(package);
            let infra_enabled = injected.is_some();
            if infra_enabled && !report.document.contains(INFRA_SERVICE_KEY) {
                debug!("{} enables ROS, adding {INFRA_SERVICE_KEY}", deployment.name());
                report.document.insert(infra_service());
            }

            let plan = DeploymentPlan {
                volumes: build_volumes(&deployment.spec.volumes),
                environment: compose_environment(
                    &self.context,
                    &package.spec.environment_vars,
                    &deployment.spec.env_args,
                    injected.as_slice(),
                ),
                depends_on: build_depends_on(
                    deployment,
                    &parts.deployments,
                    &parts.packages,
                    infra_enabled,
                    self.options.link_dependencies,
                ),
            };

            for service in synthesize_services(deployment, package, &plan) {
                let name = service.container_name.clone();
                if report.document.insert(service).is_some() {
                    warn!("container name '{name}' written twice, keeping the later service");
                    report.collisions.push(name);
                }
            }
        }

        info!(
            "synthesized {} service(s), skipped {} deployment(s)",
            report.document.len(),
            report.skipped.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcompose_schema::parse_resources_str;

    fn resources(input: &str) -> ResourceSet {
        parse_resources_str(input).unwrap().into_iter().collect()
    }

    #[test]
    fn empty_set_yields_empty_document() {
        let report = Synthesizer::new(PlatformContext::default()).synthesize(&ResourceSet::new());
        assert!(report.document.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn collisions_are_reported_and_last_write_wins() {
        let set = resources(
            r#"
kind: Package
metadata: {name: a, version: "1"}
spec:
  runtime: device
  executables:
    - {name: b_c, docker: {image: "first:1"}}
---
kind: Package
metadata: {name: b, version: "1"}
spec:
  runtime: device
  executables:
    - {name: c, docker: {image: "second:1"}}
---
kind: Deployment
metadata:
  name: a
  depends: {nameOrGUID: a, version: "1"}
spec: {runtime: device}
---
kind: Deployment
metadata:
  name: a_b
  depends: {nameOrGUID: b, version: "1"}
spec: {runtime: device}
"#,
        );
        let report = Synthesizer::new(PlatformContext::default()).synthesize(&set);
        assert_eq!(report.document.len(), 1);
        assert_eq!(report.collisions, vec![ContainerName::new("a_b_c")]);
        assert_eq!(report.document.get("a_b_c").unwrap().image, "second:1");
    }

    #[test]
    fn version_mismatch_is_skipped_not_fatal() {
        let set = resources(
            r#"
kind: Package
metadata: {name: p, version: "2.0"}
spec:
  runtime: device
  executables:
    - {name: main, docker: {image: "p:2"}}
---
kind: Deployment
metadata:
  name: old
  depends: {nameOrGUID: p, version: "1.0"}
spec: {runtime: device}
---
kind: Deployment
metadata:
  name: new
  depends: {nameOrGUID: p, version: "2.0"}
spec: {runtime: device}
"#,
        );
        let report = Synthesizer::new(PlatformContext::default()).synthesize(&set);
        assert!(report.document.contains("new_main"));
        assert!(!report.document.contains("old_main"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].deployment, "old");
        assert!(matches!(
            report.skipped[0].error,
            ResolveError::PackageVersionMismatch { .. }
        ));
    }
}
