//! Subprocess-backed compiler

use crate::compiler::{CompileOutput, Compiler};
use crate::config::Config;
use crate::error::{CoffeeError, Result};
use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How often a timed compile checks whether the child has exited
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs an external compiler, feeding source on stdin
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ExternalCompiler {
    /// Create a compiler that runs `program` with exactly `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Kill the compiler if it has not exited after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the compiler described by the configuration, including the
    /// fixed `-c -s -p` flags
    pub fn from_config(config: &Config) -> Result<Self> {
        let (program, args) = config.compiler_command()?;
        Ok(Self::new(program, args).with_timeout(config.compile_timeout))
    }

    fn failure(&self, reason: impl ToString) -> CoffeeError {
        CoffeeError::Spawn {
            program: self.program.clone(),
            reason: reason.to_string(),
        }
    }

    fn wait(&self, child: &mut Child) -> Result<()> {
        let Some(limit) = self.timeout else {
            child.wait()?;
            return Ok(());
        };

        let deadline = Instant::now() + limit;
        loop {
            if child.try_wait()?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!(program = %self.program, "compiler timed out, killing it");
                // The child may exit between try_wait and kill
                kill_process_group(child);
                let _ = child.kill();
                let _ = child.wait();
                return Err(CoffeeError::Timeout {
                    program: self.program.clone(),
                    seconds: limit.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Start the compiler in a process group of its own so a timeout can take
/// down any helpers it forked along with it
#[cfg(unix)]
fn isolate(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn isolate(_command: &mut Command) {}

/// SIGKILL every process in the child's group
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: kill(2) takes no pointers; a negative pid addresses the group
    // that `isolate` created with the child as its leader.
    unsafe {
        libc::kill(-pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Read a pipe to the end
fn drain<R: Read>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

impl Compiler for ExternalCompiler {
    fn compile(&self, source: &str) -> Result<CompileOutput> {
        debug!(program = %self.program, bytes = source.len(), "invoking compiler");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        isolate(&mut command);
        let mut child = command.spawn().map_err(|e| self.failure(e))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Feed and drain concurrently so neither side blocks on a full pipe.
        // The threads are not scoped: after a timeout they are left behind
        // rather than joined, since an escaped descendant may still hold the
        // pipes open.
        let input = source.to_string();
        thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                // A compiler that exits early closes its end; that is not our error
                let _ = stdin.write_all(input.as_bytes());
            }
        });
        let out = thread::spawn(move || drain(stdout));
        let err = thread::spawn(move || drain(stderr));

        self.wait(&mut child)?;
        let out = out
            .join()
            .map_err(|_| self.failure("stdout reader panicked"))??;
        let err = err
            .join()
            .map_err(|_| self.failure("stderr reader panicked"))??;

        Ok(CompileOutput::from_streams(&out, &err))
    }
}
