//! Running external programs from command bodies.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// What to run: a whitespace-split command line or an explicit argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Line(String),
    Args(Vec<String>),
}

impl Cmd {
    fn argv(&self) -> Vec<String> {
        match self {
            Cmd::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            Cmd::Args(args) => args.clone(),
        }
    }
}

impl From<&str> for Cmd {
    fn from(line: &str) -> Self {
        Cmd::Line(line.to_string())
    }
}

impl From<String> for Cmd {
    fn from(line: String) -> Self {
        Cmd::Line(line)
    }
}

impl From<Vec<String>> for Cmd {
    fn from(args: Vec<String>) -> Self {
        Cmd::Args(args)
    }
}

impl From<&[&str]> for Cmd {
    fn from(args: &[&str]) -> Self {
        Cmd::Args(args.iter().map(|a| (*a).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Cmd {
    fn from(args: [&str; N]) -> Self {
        Cmd::Args(args.iter().map(|a| (*a).to_string()).collect())
    }
}

impl<const N: usize> From<[&[&str]; N]> for Cmd {
    /// Nested sequences are flattened one level: `[&["git"], &["log", "-1"]]`.
    fn from(groups: [&[&str]; N]) -> Self {
        Cmd::Args(
            groups
                .iter()
                .flat_map(|g| g.iter().map(|a| (*a).to_string()))
                .collect(),
        )
    }
}

/// Exit status and captured output of a finished program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run a program to completion, capturing stdout and stderr. `input`, when
/// given, is written to the program's stdin.
///
/// # Errors
///
/// Returns `Err` if the command is empty, the program cannot be found on
/// `PATH`, or spawning or waiting fails.
pub fn run(cmd: impl Into<Cmd>, input: Option<&str>) -> io::Result<RunOutput> {
    let cmd: Cmd = cmd.into();
    let argv = cmd.argv();
    let Some((program, args)) = argv.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    let resolved = which::which(program).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{program}: command not found ({e})"),
        )
    })?;
    tracing::debug!(program = %resolved.display(), ?args, "spawning");

    let mut child = Command::new(&resolved)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // stdin is written on its own thread while stdout and stderr are drained
    let writer = match (input, child.stdin.take()) {
        (Some(text), Some(mut stdin)) => {
            let bytes = text.as_bytes().to_vec();
            Some(thread::spawn(move || -> io::Result<()> {
                match stdin.write_all(&bytes) {
                    // the child may exit without reading all of its input
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                }
                // stdin drops here so the child sees end of input
            }))
        }
        _ => None,
    };

    let output = child.wait_with_output()?;
    if let Some(writer) = writer {
        writer
            .join()
            .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
    }

    Ok(RunOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
