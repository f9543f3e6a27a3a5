use std::process::{Command, Stdio};

use super::{CommandRunner, Invocation};

/// Runs invocations as child processes (the default).
///
/// The program is resolved through `PATH`. Stdin is closed, stderr is
/// inherited so the tool's own diagnostics reach the terminal, and stdout
/// is captured in full before returning. There is no timeout: a child that
/// never exits blocks the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a process runner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> String {
        trace_debug!(command = %invocation, "spawning optuna");

        let output = match Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
        {
            Ok(output) => output,
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Err(err) => {
                trace_info!(program = invocation.program(), error = %err, "failed to spawn");
                return String::new();
            }
        };

        if !output.status.success() {
            trace_info!(
                subcommand = invocation.subcommand().unwrap_or_default(),
                status = %output.status,
                "optuna exited with failure"
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
