use crate::context::PlatformContext;
use devcompose_schema::EnvVar;
use indexmap::IndexMap;
use serde_json::Value;

/// Service environment. Keys keep their first-seen position; values follow
/// the last write.
pub type Environment = IndexMap<String, String>;

/// Merge platform variables, package defaults, deployment overrides and
/// synthesized entries, in that order.
pub fn compose_environment(
    context: &PlatformContext,
    package_env: &[EnvVar],
    deployment_env: &[EnvVar],
    injected: &[EnvVar],
) -> Environment {
    let mut env: Environment = context
        .platform_env()
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

    for var in package_env.iter().chain(deployment_env).chain(injected) {
        let Some(name) = var.name.as_deref() else {
            continue;
        };
        let value = var.effective().map(stringify).unwrap_or_default();
        env.insert(name.to_owned(), value);
    }
    env
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(package: &[EnvVar], deployment: &[EnvVar]) -> Environment {
        compose_environment(&PlatformContext::default(), package, deployment, &[])
    }

    #[test]
    fn deployment_value_overrides_package_default() {
        let env = compose(
            &[EnvVar::with_default("A", "1")],
            &[EnvVar::with_value("A", "2")],
        );
        assert_eq!(env["A"], "2");
    }

    #[test]
    fn default_alone_resolves() {
        let env = compose(&[EnvVar::with_default("B", "fallback")], &[]);
        assert_eq!(env["B"], "fallback");
    }

    #[test]
    fn override_keeps_first_insertion_position() {
        let env = compose(
            &[EnvVar::with_default("X", "1"), EnvVar::with_default("Y", "1")],
            &[EnvVar::with_value("X", "2")],
        );
        let keys: Vec<&str> = env.keys().map(String::as_str).skip(7).collect();
        assert_eq!(keys, vec!["X", "Y"]);
        assert_eq!(env["X"], "2");
    }

    #[test]
    fn platform_keys_come_first_even_when_empty() {
        let env = compose(&[], &[]);
        assert_eq!(env.len(), 7);
        assert_eq!(env.get_index(0).unwrap().0.as_str(), "RIO_AUTH_TOKEN");
        assert_eq!(env["RIO_PROJECT_ID"], "");
    }

    #[test]
    fn platform_context_values_are_used() {
        let context = PlatformContext {
            auth_token: Some("secret".to_owned()),
            ..PlatformContext::default()
        };
        let env = compose_environment(&context, &[], &[], &[]);
        assert_eq!(env["RIO_AUTH_TOKEN"], "secret");
    }

    #[test]
    fn values_are_stringified() {
        let env = compose(
            &[
                EnvVar::with_default("PORT", 8080),
                EnvVar::with_default("DEBUG", true),
                EnvVar::with_default("RATIO", 0.5),
                EnvVar::with_default("NOTHING", Value::Null),
            ],
            &[],
        );
        assert_eq!(env["PORT"], "8080");
        assert_eq!(env["DEBUG"], "true");
        assert_eq!(env["RATIO"], "0.5");
        assert_eq!(env["NOTHING"], "");
    }

    #[test]
    fn explicit_null_value_beats_default() {
        let var = EnvVar {
            name: Some("C".to_owned()),
            value: Some(Value::Null),
            default: Some(Value::from("d")),
        };
        assert_eq!(compose(&[var], &[])["C"], "");
    }

    #[test]
    fn nameless_entries_are_skipped() {
        let var = EnvVar {
            name: None,
            value: Some(Value::from("orphan")),
            default: None,
        };
        assert_eq!(compose(&[var], &[]).len(), 7);
    }

    #[test]
    fn injected_entries_merge_last() {
        let env = compose_environment(
            &PlatformContext::default(),
            &[EnvVar::with_default("ROS_MASTER_URI", "http://elsewhere:1")],
            &[],
            &[EnvVar::with_value("ROS_MASTER_URI", "http://localhost:11311")],
        );
        assert_eq!(env["ROS_MASTER_URI"], "http://localhost:11311");
    }
}
