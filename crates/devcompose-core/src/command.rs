use crate::service::HealthCheck;
use devcompose_schema::{CommandSpec, Executable};

const DEFAULT_PROBE_TIMEOUT_SECS: u32 = 30;
const DEFAULT_PROBE_PERIOD_SECS: u32 = 10;
const DEFAULT_PROBE_RETRIES: u32 = 3;

/// Container command for an executable, or `None` when it declares none.
///
/// With `runAsBash` the command is wrapped as `["/bin/bash", "-c", line]`,
/// joining argument vectors with single spaces.
pub fn build_command(executable: &Executable) -> Option<Vec<String>> {
    let command = executable.command.as_ref()?;
    if executable.run_as_bash {
        let line = match command {
            CommandSpec::Line(line) => line.clone(),
            CommandSpec::Args(args) => args.join(" "),
        };
        return Some(vec!["/bin/bash".to_owned(), "-c".to_owned(), line]);
    }
    Some(match command {
        CommandSpec::Line(line) => vec![line.clone()],
        CommandSpec::Args(args) => args.clone(),
    })
}

/// Health check derived from an exec liveness probe. Unset or zero timings
/// fall back to the defaults.
pub fn build_healthcheck(executable: &Executable) -> Option<HealthCheck> {
    let probe = executable.liveness_probe.as_ref()?;
    let exec = probe.exec.as_ref().filter(|e| !e.command.is_empty())?;
    Some(HealthCheck {
        test: exec.command.join(" "),
        interval: format!(
            "{}s",
            or_default(probe.period_seconds, DEFAULT_PROBE_PERIOD_SECS)
        ),
        timeout: format!(
            "{}s",
            or_default(probe.timeout_seconds, DEFAULT_PROBE_TIMEOUT_SECS)
        ),
        retries: or_default(probe.failure_threshold, DEFAULT_PROBE_RETRIES),
    })
}

fn or_default(value: Option<u32>, default: u32) -> u32 {
    value.filter(|&n| n > 0).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcompose_schema::{DockerSection, ExecProbe, LivenessProbe};

    fn executable(command: Option<CommandSpec>, run_as_bash: bool) -> Executable {
        Executable {
            name: "main".to_owned(),
            docker: DockerSection {
                image: "img:1".to_owned(),
            },
            command,
            run_as_bash,
            liveness_probe: None,
            limits: None,
        }
    }

    fn args(items: &[&str]) -> CommandSpec {
        CommandSpec::Args(items.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn no_command_yields_none() {
        assert_eq!(build_command(&executable(None, false)), None);
        assert_eq!(build_command(&executable(None, true)), None);
    }

    #[test]
    fn bash_wraps_joined_args() {
        let cmd = build_command(&executable(Some(args(&["a", "b"])), true));
        assert_eq!(
            cmd,
            Some(vec!["/bin/bash".to_owned(), "-c".to_owned(), "a b".to_owned()])
        );
    }

    #[test]
    fn bash_wraps_line_verbatim() {
        let cmd = build_command(&executable(
            Some(CommandSpec::Line("roscore && sleep 1".to_owned())),
            true,
        ))
        .unwrap();
        assert_eq!(cmd[2], "roscore && sleep 1");
    }

    #[test]
    fn bare_string_becomes_single_element() {
        let cmd = build_command(&executable(Some(CommandSpec::Line("x".to_owned())), false));
        assert_eq!(cmd, Some(vec!["x".to_owned()]));
    }

    #[test]
    fn args_pass_through() {
        let cmd = build_command(&executable(Some(args(&["run", "--fast"])), false));
        assert_eq!(cmd, Some(vec!["run".to_owned(), "--fast".to_owned()]));
    }

    #[test]
    fn healthcheck_uses_defaults() {
        let mut exec = executable(None, false);
        exec.liveness_probe = Some(LivenessProbe {
            exec: Some(ExecProbe {
                command: vec!["cat".to_owned(), "/tmp/healthy".to_owned()],
            }),
            ..LivenessProbe::default()
        });
        let check = build_healthcheck(&exec).unwrap();
        assert_eq!(check.test, "cat /tmp/healthy");
        assert_eq!(check.timeout, "30s");
        assert_eq!(check.interval, "10s");
        assert_eq!(check.retries, 3);
    }

    #[test]
    fn healthcheck_uses_probe_values() {
        let mut exec = executable(None, false);
        exec.liveness_probe = Some(LivenessProbe {
            exec: Some(ExecProbe {
                command: vec!["true".to_owned()],
            }),
            timeout_seconds: Some(5),
            period_seconds: Some(2),
            failure_threshold: Some(7),
        });
        let check = build_healthcheck(&exec).unwrap();
        assert_eq!(check.timeout, "5s");
        assert_eq!(check.interval, "2s");
        assert_eq!(check.retries, 7);
    }

    #[test]
    fn healthcheck_treats_zero_as_unset() {
        let mut exec = executable(None, false);
        exec.liveness_probe = Some(LivenessProbe {
            exec: Some(ExecProbe {
                command: vec!["true".to_owned()],
            }),
            timeout_seconds: Some(0),
            period_seconds: Some(0),
            failure_threshold: Some(0),
        });
        let check = build_healthcheck(&exec).unwrap();
        assert_eq!(check.timeout, "30s");
        assert_eq!(check.interval, "10s");
        assert_eq!(check.retries, 3);
    }

    #[test]
    fn probe_without_exec_command_yields_none() {
        let mut exec = executable(None, false);
        assert!(build_healthcheck(&exec).is_none());
        exec.liveness_probe = Some(LivenessProbe::default());
        assert!(build_healthcheck(&exec).is_none());
        exec.liveness_probe = Some(LivenessProbe {
            exec: Some(ExecProbe::default()),
            ..LivenessProbe::default()
        });
        assert!(build_healthcheck(&exec).is_none());
    }
}
