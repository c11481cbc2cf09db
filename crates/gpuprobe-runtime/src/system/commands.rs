//! Bounded execution of external diagnostic tools.

use std::process::Stdio;
use std::time::Duration;

use gpuprobe_core::DiagnosticTool;
use thiserror::Error;
use tokio::process::Command;

/// Why a diagnostic tool produced no usable output.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Binary missing or not executable.
    #[error("failed to start: {0}")]
    Spawn(String),

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("exited with {status}: {output}")]
    ExitStatus { status: String, output: String },
}

/// Run `tool` with captured output and a hard time limit.
///
/// stdout and stderr are merged (stdout first) and trimmed, then truncated to
/// the tool's line limit. `env_defaults` are set on the child only when
/// `lookup` reports them unset. The child is killed if the limit expires.
pub async fn run_tool(
    tool: &DiagnosticTool,
    timeout: Duration,
    env_defaults: &[(String, String)],
    lookup: &(dyn Fn(&str) -> Option<String> + Send + Sync),
) -> Result<String, ToolError> {
    let mut command = Command::new(&tool.program);
    command
        .args(&tool.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for (name, value) in env_defaults {
        if lookup(name).is_none() {
            command.env(name, value);
        }
    }

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| ToolError::Timeout(timeout))?
        .map_err(|e| ToolError::Spawn(e.to_string()))?;

    let text = merge_output(&output.stdout, &output.stderr, tool.max_lines);
    if output.status.success() {
        Ok(text)
    } else {
        Err(ToolError::ExitStatus {
            status: output.status.to_string(),
            output: text,
        })
    }
}

fn merge_output(stdout: &[u8], stderr: &[u8], max_lines: Option<usize>) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    let merged = match (stdout.trim(), stderr.trim()) {
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{out}\n{err}"),
    };

    match max_lines {
        Some(limit) => merged.lines().take(limit).collect::<Vec<_>>().join("\n"),
        None => merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_merge_output_orders_and_trims() {
        assert_eq!(merge_output(b"  out\n", b"", None), "out");
        assert_eq!(merge_output(b"", b"err\n", None), "err");
        assert_eq!(merge_output(b"out\n", b"err\n", None), "out\nerr");
    }

    #[test]
    fn test_merge_output_truncates_lines() {
        let many: String = (0..80).map(|i| format!("line {i}\n")).collect();
        let merged = merge_output(many.as_bytes(), b"", Some(50));
        assert_eq!(merged.lines().count(), 50);
        assert!(merged.ends_with("line 49"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let tool = DiagnosticTool::new("ghost", "definitely_not_a_real_command_12345");
        let err = run_tool(&tool, Duration::from_secs(5), &[], &no_env)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_tool_output() {
        let tool = DiagnosticTool::new("echo", "sh").with_args(["-c", "echo hello; echo warn >&2"]);
        let out = run_tool(&tool, Duration::from_secs(5), &[], &no_env)
            .await
            .unwrap();
        assert_eq!(out, "hello\nwarn");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_keeps_output() {
        let tool = DiagnosticTool::new("fail", "sh").with_args(["-c", "echo no devices; exit 3"]);
        let err = run_tool(&tool, Duration::from_secs(5), &[], &no_env)
            .await
            .unwrap_err();
        match err {
            ToolError::ExitStatus { output, .. } => assert_eq!(output, "no devices"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_times_out() {
        let tool = DiagnosticTool::new("slow", "sleep").with_args(["5"]);
        let err = run_tool(&tool, Duration::from_millis(100), &[], &no_env)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_env_defaults_apply_only_when_unset() {
        let tool = DiagnosticTool::new("env", "sh").with_args(["-c", "printf %s \"$GPUPROBE_TEST_DEFAULT\""]);
        let defaults = vec![("GPUPROBE_TEST_DEFAULT".to_string(), "/tmp".to_string())];

        let out = run_tool(&tool, Duration::from_secs(5), &defaults, &no_env)
            .await
            .unwrap();
        assert_eq!(out, "/tmp");

        let already_set = |_: &str| Some("/run/user/1000".to_string());
        let out = run_tool(&tool, Duration::from_secs(5), &defaults, &already_set)
            .await
            .unwrap();
        assert_eq!(out, "");
    }
}
