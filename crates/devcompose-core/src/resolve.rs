use crate::partition::PackageMap;
use devcompose_schema::{Package, ResourceKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("package '{name}' not found")]
    PackageNotFound { name: String },
    #[error("package '{name}' has version {found}, deployment requires {requested}")]
    PackageVersionMismatch {
        name: String,
        requested: String,
        found: String,
    },
}

/// Find the package a deployment refers to. Versions must match exactly as strings.
pub fn resolve_package<'a>(
    packages: &PackageMap<'a>,
    name_or_guid: &str,
    version: &str,
) -> Result<&'a Package, ResolveError> {
    let key = ResourceKey::package(name_or_guid);
    let package = packages
        .get(key.as_str())
        .copied()
        .ok_or_else(|| ResolveError::PackageNotFound {
            name: name_or_guid.to_owned(),
        })?;

    if package.version() != version {
        return Err(ResolveError::PackageVersionMismatch {
            name: name_or_guid.to_owned(),
            requested: version.to_owned(),
            found: package.version().to_owned(),
        });
    }
    Ok(package)
}
