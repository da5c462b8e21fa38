use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    process::{Child, Command},
    task::JoinHandle,
    time::{self, Duration},
};
use tracing::{debug, warn};

use crate::types::ExecutionFailure;

/// How long to keep draining stdout/stderr once the process itself is gone
const OUTPUT_GRACE: Duration = Duration::from_secs(1);

/// A single program invocation
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Written to the child's stdin, which is then closed
    pub stdin: String,
    pub timeout: Duration,
}

/// Raw, unsanitized result of running a process
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<ExecutionFailure>,
}

impl ProcessOutput {
    fn failed(failure: ExecutionFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }
}

/// Run a program to completion or until `spec.timeout` elapses.
///
/// Never returns an error: anything that goes wrong after the workspace is set
/// up, including a failed spawn, is an execution failure recorded in the
/// output. Whatever the program printed before it was killed is kept.
pub async fn run_process(spec: ProcessSpec) -> ProcessOutput {
    debug!("Process spawn - Command: {}", spec.program);
    debug!("Process spawn - Args: {:?}", spec.args);
    debug!("Process spawn - Working dir: {:?}", spec.working_dir);

    let mut command = build_command(&spec);
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!("Failed to spawn {}: {}", spec.program, e);
            return ProcessOutput::failed(ExecutionFailure::Spawn(e.to_string()));
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        let input = spec.stdin;
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                // The program is free to ignore its input and exit early
                if e.kind() != ErrorKind::BrokenPipe {
                    debug!("Failed to write stdin: {}", e);
                }
            }
            // Dropping stdin closes the pipe so the program sees EOF
        });
    }

    let stdout = child.stdout.take().map(OutputReader::spawn);
    let stderr = child.stderr.take().map(OutputReader::spawn);

    // The id is gone once the child is reaped, and the group has to be
    // killed after that as well.
    let group = child.id();

    let failure = match time::timeout(spec.timeout, child.wait()).await {
        Ok(Ok(status)) => exit_failure(status),
        Ok(Err(e)) => Some(ExecutionFailure::Io(e.to_string())),
        Err(_) => {
            debug!("Process exceeded {:?}, killing", spec.timeout);
            kill(&mut child).await;
            Some(ExecutionFailure::TimedOut(spec.timeout))
        }
    };

    // Background jobs the program left behind would otherwise keep running
    // and hold the output pipes open.
    kill_group(group);

    ProcessOutput {
        stdout: collect(stdout).await,
        stderr: collect(stderr).await,
        failure,
    }
}

fn build_command(spec: &ProcessSpec) -> Command {
    let mut command = std::process::Command::new(&spec.program);
    command
        .args(&spec.args)
        .current_dir(&spec.working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Own process group, so killing it also takes down whatever the program
    // started (`go run` executes the compiled binary as a child).
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut command = Command::from(command);
    command.kill_on_drop(true);
    command
}

fn exit_failure(status: ExitStatus) -> Option<ExecutionFailure> {
    if status.success() {
        return None;
    }
    match status.code() {
        Some(code) => Some(ExecutionFailure::NonZeroExit(code)),
        None => Some(ExecutionFailure::Signaled),
    }
}

async fn kill(child: &mut Child) {
    kill_group(child.id());

    // Kills the direct child if it is still around, then reaps it
    if let Err(e) = child.kill().await {
        debug!("Failed to reap killed process: {}", e);
    }
}

#[cfg(unix)]
fn kill_group(group: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = group else {
        return;
    };
    match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        // Nothing left in the group
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!("Failed to kill process group {}: {}", pgid, e),
    }
}

#[cfg(not(unix))]
fn kill_group(_group: Option<u32>) {}

/// Drains a pipe in the background into a buffer that stays readable if the
/// reader has to be abandoned.
struct OutputReader {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl OutputReader {
    fn spawn<R: AsyncRead + Unpin + Send + 'static>(mut pipe: R) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let handle = tokio::spawn(async move {
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        debug!("Failed to read process output: {}", e);
                        break;
                    }
                }
            }
        });
        Self { buf, handle }
    }

    fn take(&self) -> String {
        let buf = self
            .buf
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

async fn collect(reader: Option<OutputReader>) -> String {
    let Some(mut reader) = reader else {
        return String::new();
    };
    match time::timeout(OUTPUT_GRACE, &mut reader.handle).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Output reader failed: {}", e),
        Err(_) => {
            // Something outside the process group still holds the pipe
            warn!("Gave up waiting for process output");
            reader.handle.abort();
        }
    }
    reader.take()
}
