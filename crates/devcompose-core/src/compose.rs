use crate::prune::prune;
use crate::service::Service;
use devcompose_schema::ContainerName;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Root of a synthesized Compose file: services keyed by container name, in
/// the order they were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeDocument {
    pub services: IndexMap<ContainerName, Service>,
}

impl ComposeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the service's container name. A service with the same name
    /// is replaced in place and returned.
    pub fn insert(&mut self, service: Service) -> Option<Service> {
        self.services.insert(service.container_name.clone(), service)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// The pruned document tree handed to an encoder.
    pub fn to_tree(&self) -> Result<Value, serde_json::Error> {
        Ok(prune(serde_json::to_value(self)?))
    }
}
