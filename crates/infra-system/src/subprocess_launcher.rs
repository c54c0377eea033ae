// Subprocess launcher implementation
// reason: tokio::process for non-blocking spawn + async stream reads
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use binlaunch_core::domain::{ExecutableLocation, InvocationRequest, ProcessExit, StdioMode};
use binlaunch_core::port::{ByteStream, ChildProcess, ProcessHandle, ProcessLauncher};
use binlaunch_core::{Result, ShimError};

/// Subprocess launcher
/// Spawns the native executable with optional environment allowlisting
pub struct SubprocessLauncher {
    env_allowlist: Option<Vec<String>>,
}

impl SubprocessLauncher {
    /// Create a launcher that passes the parent environment through unchanged
    pub fn new() -> Self {
        Self {
            env_allowlist: None,
        }
    }

    /// Create a launcher that only passes the listed parent variables through
    ///
    /// A per-request `SpawnOptions::env_allowlist` takes precedence.
    ///
    /// # Example
    /// ```ignore
    /// let launcher = SubprocessLauncher::with_env_allowlist(
    ///     vec!["PATH".to_string(), "HOME".to_string()],
    /// );
    /// ```
    pub fn with_env_allowlist(env_allowlist: Vec<String>) -> Self {
        Self {
            env_allowlist: Some(env_allowlist),
        }
    }

    /// Filter environment variables to allowlist only
    fn filter_env<I>(vars: I, allowlist: &[String]) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter(|(k, _)| allowlist.contains(k))
            .collect()
    }

    /// Build the command for one invocation
    fn build_command(&self, location: &ExecutableLocation, request: &InvocationRequest) -> Command {
        let options = &request.options;
        let mut cmd = Command::new(location.path());
        cmd.args(&request.args);

        if let Some(allowlist) = options.env_allowlist.as_ref().or(self.env_allowlist.as_ref()) {
            cmd.env_clear();
            cmd.envs(Self::filter_env(std::env::vars(), allowlist));
        }

        for key in &options.env_remove {
            cmd.env_remove(key);
        }
        cmd.envs(&options.env);

        if let Some(dir) = &options.current_dir {
            cmd.current_dir(dir);
        }

        // stdout is always captured; the caller decides whether to consume it
        cmd.stdin(to_stdio(options.stdin))
            .stdout(Stdio::piped())
            .stderr(to_stdio(options.stderr));

        cmd
    }
}

impl Default for SubprocessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for SubprocessLauncher {
    fn launch(
        &self,
        location: &ExecutableLocation,
        request: &InvocationRequest,
    ) -> Result<ProcessHandle> {
        let program = location.program();
        let mut cmd = self.build_command(location, request);

        let mut child = cmd.spawn().map_err(|source| {
            warn!(program = %program, error = %source, "Spawn failed");
            ShimError::SpawnFailed {
                program: program.clone(),
                source,
            }
        })?;

        info!(
            program = %program,
            pid = ?child.id(),
            args = ?request.args,
            working_dir = ?request.options.current_dir,
            "Subprocess spawned"
        );

        let stdout = child.stdout.take().ok_or_else(|| {
            ShimError::Io(std::io::Error::other("Failed to capture stdout"))
        })?;
        let stderr = child.stderr.take().map(|s| Box::new(s) as ByteStream);

        Ok(ProcessHandle::new(
            Box::new(stdout),
            stderr,
            Box::new(TokioChild { inner: child }),
        ))
    }
}

fn to_stdio(mode: StdioMode) -> Stdio {
    match mode {
        StdioMode::Inherit => Stdio::inherit(),
        StdioMode::Piped => Stdio::piped(),
        StdioMode::Null => Stdio::null(),
    }
}

/// tokio child wrapped behind the ChildProcess port
struct TokioChild {
    inner: Child,
}

#[async_trait]
impl ChildProcess for TokioChild {
    fn id(&self) -> Option<u32> {
        self.inner.id()
    }

    async fn wait(&mut self) -> std::io::Result<ProcessExit> {
        let status = self.inner.wait().await?;
        Ok(ProcessExit::from(status))
    }

    fn start_kill(&mut self) -> std::io::Result<()> {
        self.inner.start_kill()
    }

    fn terminate(&mut self) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            match self.inner.id() {
                Some(pid) => {
                    debug!(pid = %pid, "Sending SIGTERM");
                    kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(std::io::Error::from)
                }
                // Already reaped
                None => Ok(()),
            }
        }

        #[cfg(not(unix))]
        {
            self.inner.start_kill()
        }
    }
}

/// Ask the process to stop, then force-kill it if it outlives `grace`
///
/// Caller-side cancellation helper; the launcher itself never times out.
pub async fn terminate_gracefully(handle: &mut ProcessHandle, grace: Duration) -> Result<ProcessExit> {
    let pid = handle.id();
    info!(pid = ?pid, grace_ms = %grace.as_millis(), "Terminating child process");

    handle.terminate()?;

    match tokio::time::timeout(grace, handle.wait()).await {
        Ok(exit) => {
            let exit = exit?;
            info!(pid = ?pid, exit = %exit, "Process exited after termination request");
            Ok(exit)
        }
        Err(_) => {
            warn!(pid = ?pid, "Process did not exit in time, killing");
            handle.kill()?;
            Ok(handle.wait().await?)
        }
    }
}
