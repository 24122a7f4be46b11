use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory mounted into every service and exported as `RIO_CONFIG_DIR`.
pub const CONFIG_DIR: &str = "/etc/devcompose";

/// Session details of the platform user, injected into every service environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformContext {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_short_id: Option<String>,
}

impl PlatformContext {
    /// Load from `--context` if given, else `~/.config/devcompose/context.toml`
    /// when it exists, else an empty context. `DEVCOMPOSE_*` variables are
    /// applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, CoreError> {
        let mut context = match explicit {
            Some(path) => Self::load(path)?,
            None => match default_context_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        context.apply_overrides(|key| std::env::var(key).ok());
        Ok(context)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        debug!("loading platform context from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::ContextRead {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CoreError::ContextParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Overwrite fields from `DEVCOMPOSE_<FIELD>` variables returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields: [(&str, &mut Option<String>); 6] = [
            ("DEVCOMPOSE_AUTH_TOKEN", &mut self.auth_token),
            ("DEVCOMPOSE_PROJECT_ID", &mut self.project_id),
            ("DEVCOMPOSE_PROJECT_NAME", &mut self.project_name),
            ("DEVCOMPOSE_ORGANIZATION_ID", &mut self.organization_id),
            ("DEVCOMPOSE_ORGANIZATION_NAME", &mut self.organization_name),
            (
                "DEVCOMPOSE_ORGANIZATION_SHORT_ID",
                &mut self.organization_short_id,
            ),
        ];
        for (key, slot) in fields {
            if let Some(value) = lookup(key) {
                *slot = Some(value);
            }
        }
    }

    /// The platform variables every service receives, in emission order.
    /// Missing context fields yield empty strings; the keys are always present.
    pub fn platform_env(&self) -> [(&'static str, String); 7] {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            ("RIO_AUTH_TOKEN", or_empty(&self.auth_token)),
            ("RIO_PROJECT_ID", or_empty(&self.project_id)),
            ("RIO_PROJECT_NAME", or_empty(&self.project_name)),
            ("RIO_ORGANIZATION_ID", or_empty(&self.organization_id)),
            ("RIO_ORGANIZATION_NAME", or_empty(&self.organization_name)),
            (
                "RIO_ORGANIZATION_SHORT_ID",
                or_empty(&self.organization_short_id),
            ),
            ("RIO_CONFIG_DIR", CONFIG_DIR.to_owned()),
        ]
    }
}

fn default_context_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/devcompose/context.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_partial_context_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.toml");
        std::fs::write(
            &path,
            "auth_token = \"tok\"\nproject_id = \"project-abc\"\n",
        )
        .unwrap();

        let context = PlatformContext::load(&path).unwrap();
        assert_eq!(context.auth_token.as_deref(), Some("tok"));
        assert_eq!(context.project_id.as_deref(), Some("project-abc"));
        assert!(context.organization_id.is_none());
    }

    #[test]
    fn rejects_unknown_context_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.toml");
        std::fs::write(&path, "region = \"eu\"\n").unwrap();
        let err = PlatformContext::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("context error:"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = PlatformContext::resolve(Some(Path::new("/nonexistent/context.toml")));
        assert!(matches!(err, Err(CoreError::ContextRead { .. })));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut context = PlatformContext {
            project_name: Some("from-file".to_owned()),
            ..PlatformContext::default()
        };
        context.apply_overrides(|key| match key {
            "DEVCOMPOSE_PROJECT_NAME" => Some("from-env".to_owned()),
            "DEVCOMPOSE_ORGANIZATION_SHORT_ID" => Some("org1".to_owned()),
            _ => None,
        });
        assert_eq!(context.project_name.as_deref(), Some("from-env"));
        assert_eq!(context.organization_short_id.as_deref(), Some("org1"));
        assert!(context.auth_token.is_none());
    }

    #[test]
    fn platform_env_always_has_seven_keys() {
        let env = PlatformContext::default().platform_env();
        assert_eq!(env.len(), 7);
        assert_eq!(env[0], ("RIO_AUTH_TOKEN", String::new()));
        assert_eq!(env[6], ("RIO_CONFIG_DIR", CONFIG_DIR.to_owned()));
    }
}
