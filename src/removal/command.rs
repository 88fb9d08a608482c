//! Command Remover
//!
//! Production `BackgroundRemover` that pipes the image through an external
//! command: bytes on stdin, background-removed PNG on stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{BackgroundRemover, RemovalError};

// == Command Remover ==
/// Runs a configured command line for each image.
///
/// The command is split on whitespace; the first token is the program, the
/// rest are arguments. With the default `rembg i` this becomes
/// `rembg i < input > output`.
#[derive(Debug, Clone)]
pub struct CommandRemover {
    program: String,
    args: Vec<String>,
}

impl CommandRemover {
    /// Creates a remover from a whitespace-separated command line.
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| "rembg".to_string());
        Self {
            program,
            args: parts.collect(),
        }
    }
}

impl BackgroundRemover for CommandRemover {
    fn process(&self, image: &[u8]) -> Result<Vec<u8>, RemovalError> {
        debug!("Running {} on {} input bytes", self.program, image.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // The write must not share a thread with the stdout read: a tool that
        // streams output while consuming input fills both pipe buffers and
        // deadlocks a sequential write-then-read. A dedicated thread feeds
        // stdin (and closes it on drop) while wait_with_output drains stdout
        // and stderr here.
        //
        // A tool that exits before reading all input closes the pipe; its
        // exit status carries the real failure, so a broken pipe is not an
        // error in the writer.
        let writer = child.stdin.take().map(|mut stdin| {
            let image = image.to_vec();
            std::thread::spawn(move || match stdin.write_all(&image) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    return Err(RemovalError::Tool(
                        "stdin writer thread panicked".to_string(),
                    ))
                }
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RemovalError::Tool(format!(
                "exit status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(RemovalError::Tool("tool produced no output".to_string()));
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_parsing() {
        let remover = CommandRemover::new("rembg i --model u2net");
        assert_eq!(remover.program, "rembg");
        assert_eq!(remover.args, vec!["i", "--model", "u2net"]);
    }

    #[test]
    fn test_passthrough_command_succeeds() {
        // `cat` echoes stdin to stdout, a stand-in for a well-behaved tool
        let remover = CommandRemover::new("cat");
        let result = remover.process(b"fake png bytes").unwrap();
        assert_eq!(result, b"fake png bytes");
    }

    #[test]
    fn test_large_payload_streams_through_pipe() {
        // `cat` emits output while still consuming input, so a payload well
        // past the OS pipe buffer deadlocks unless stdin is fed concurrently
        // with the stdout read
        let remover = CommandRemover::new("cat");
        let payload = vec![0xABu8; 2 * 1024 * 1024];
        let result = remover.process(&payload).unwrap();
        assert_eq!(result, payload);
    }

    #[test]
    fn test_failing_command_reports_tool_error() {
        let remover = CommandRemover::new("false");
        let err = remover.process(b"bytes").unwrap_err();
        assert!(matches!(err, RemovalError::Tool(_)));
    }

    #[test]
    fn test_missing_program_reports_io_error() {
        let remover = CommandRemover::new("definitely-not-a-real-program-xyz");
        let err = remover.process(b"bytes").unwrap_err();
        assert!(matches!(err, RemovalError::Io(_)));
    }
}
