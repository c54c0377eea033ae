// Process Launcher Port
// Abstraction for spawning the located executable and observing it

use crate::domain::{ExecutableLocation, InvocationRequest, ProcessExit};
use crate::error::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Readable byte stream from a child process
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Control over a running child process
#[async_trait]
pub trait ChildProcess: Send {
    /// OS process id, `None` once the process has been reaped
    fn id(&self) -> Option<u32>;

    /// Wait for termination
    async fn wait(&mut self) -> std::io::Result<ProcessExit>;

    /// Forceful kill (SIGKILL / TerminateProcess), does not wait
    fn start_kill(&mut self) -> std::io::Result<()>;

    /// Polite termination request (SIGTERM on Unix); falls back to `start_kill` elsewhere
    fn terminate(&mut self) -> std::io::Result<()>;
}

/// Live handle to a spawned process
///
/// stdout is always present; stderr only when the caller asked for it piped.
pub struct ProcessHandle {
    pub stdout: ByteStream,
    pub stderr: Option<ByteStream>,
    child: Box<dyn ChildProcess>,
}

impl ProcessHandle {
    pub fn new(stdout: ByteStream, stderr: Option<ByteStream>, child: Box<dyn ChildProcess>) -> Self {
        Self {
            stdout,
            stderr,
            child,
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the exit event only; stream data may still be in flight
    pub async fn wait(&mut self) -> std::io::Result<ProcessExit> {
        self.child.wait().await
    }

    pub fn kill(&mut self) -> std::io::Result<()> {
        self.child.start_kill()
    }

    pub fn terminate(&mut self) -> std::io::Result<()> {
        self.child.terminate()
    }

    pub fn into_parts(self) -> (ByteStream, Option<ByteStream>, Box<dyn ChildProcess>) {
        (self.stdout, self.stderr, self.child)
    }
}

impl std::fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.child.id())
            .field("stderr_piped", &self.stderr.is_some())
            .finish()
    }
}

/// Process Launcher trait
///
/// Implementations:
/// - SubprocessLauncher: spawns a real OS process (infra-system)
/// - MockLauncher: scripted output for tests
pub trait ProcessLauncher: Send + Sync {
    /// Spawn `location` with `request.args`, without waiting for it
    ///
    /// stdout is always piped regardless of `request.options`.
    ///
    /// # Errors
    /// - ShimError::SpawnFailed if the OS refuses to start the process
    fn launch(
        &self,
        location: &ExecutableLocation,
        request: &InvocationRequest,
    ) -> Result<ProcessHandle>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::StdioMode;
    use crate::error::ShimError;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Scripted outcome of one mock run
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Emit the given bytes and exit
        Run {
            stdout: Vec<u8>,
            stderr: Vec<u8>,
            exit: ProcessExit,
        },
        /// Fail to spawn with the given io error kind
        SpawnError(std::io::ErrorKind),
    }

    impl MockBehavior {
        pub fn stdout(text: &str) -> Self {
            MockBehavior::Run {
                stdout: text.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit: ProcessExit::Code(0),
            }
        }

        pub fn fail(code: i32, stderr: &str) -> Self {
            MockBehavior::Run {
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
                exit: ProcessExit::Code(code),
            }
        }
    }

    /// Mock child that has already exited
    pub struct MockChild {
        exit: ProcessExit,
        killed: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl ChildProcess for MockChild {
        fn id(&self) -> Option<u32> {
            None
        }

        async fn wait(&mut self) -> std::io::Result<ProcessExit> {
            Ok(self.exit)
        }

        fn start_kill(&mut self) -> std::io::Result<()> {
            *self.killed.lock().unwrap() = true;
            Ok(())
        }

        fn terminate(&mut self) -> std::io::Result<()> {
            self.start_kill()
        }
    }

    /// Mock Process Launcher for testing
    pub struct MockLauncher {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        killed: Arc<Mutex<bool>>,
    }

    impl MockLauncher {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
                killed: Arc::new(Mutex::new(false)),
            }
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }

        /// Argument vectors of every launch, in order
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn was_killed(&self) -> bool {
            *self.killed.lock().unwrap()
        }
    }

    impl ProcessLauncher for MockLauncher {
        fn launch(
            &self,
            location: &ExecutableLocation,
            request: &InvocationRequest,
        ) -> Result<ProcessHandle> {
            self.calls.lock().unwrap().push(request.args.clone());

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::SpawnError(kind) => Err(ShimError::SpawnFailed {
                    program: location.program(),
                    source: std::io::Error::from(kind),
                }),
                MockBehavior::Run {
                    stdout,
                    stderr,
                    exit,
                } => {
                    let stdout: ByteStream = Box::new(Cursor::new(stdout));
                    let stderr: Option<ByteStream> = match request.options.stderr {
                        StdioMode::Piped => Some(Box::new(Cursor::new(stderr))),
                        _ => None,
                    };
                    let child = MockChild {
                        exit,
                        killed: self.killed.clone(),
                    };
                    Ok(ProcessHandle::new(stdout, stderr, Box::new(child)))
                }
            }
        }
    }
}
