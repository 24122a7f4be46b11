use devcompose_schema::{Deployment, Package, Resource, ResourceKey, ResourceSet};
use indexmap::IndexMap;

pub type DeploymentMap<'a> = IndexMap<ResourceKey, &'a Deployment>;
pub type PackageMap<'a> = IndexMap<ResourceKey, &'a Package>;

/// Device deployments and packages of a resource set, in resource-set order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub deployments: DeploymentMap<'a>,
    pub packages: PackageMap<'a>,
}

pub fn partition(resources: &ResourceSet) -> Partition<'_> {
    let mut out = Partition::default();
    for (key, resource) in resources.iter() {
        match resource {
            Resource::Deployment(d) if d.is_device() => {
                out.deployments.insert(key.clone(), d);
            }
            Resource::Package(p) if p.is_device() => {
                out.packages.insert(key.clone(), p);
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcompose_schema::parse_resources_str;

    #[test]
    fn keeps_only_device_runtime_resources() {
        let resources: ResourceSet = parse_resources_str(
            r#"
kind: Package
metadata: {name: edge, version: "1"}
spec: {runtime: device}
---
kind: Package
metadata: {name: cloud, version: "1"}
spec: {runtime: cloud}
---
kind: Deployment
metadata:
  name: d1
  depends: {nameOrGUID: edge, version: "1"}
spec: {runtime: device}
---
kind: Deployment
metadata:
  name: d2
  depends: {nameOrGUID: cloud, version: "1"}
spec: {runtime: cloud}
---
kind: Network
metadata: {name: net}
spec: {runtime: device}
"#,
        )
        .unwrap()
        .into_iter()
        .collect();

        let parts = partition(&resources);
        assert_eq!(parts.packages.len(), 1);
        assert!(parts.packages.contains_key("package:edge"));
        assert_eq!(parts.deployments.len(), 1);
        assert!(parts.deployments.contains_key("deployment:d1"));
    }

    #[test]
    fn empty_set_partitions_to_nothing() {
        let set = ResourceSet::new();
        let parts = partition(&set);
        assert!(parts.deployments.is_empty());
        assert!(parts.packages.is_empty());
    }
}
