use std::{
    io::{BufRead, BufReader, Read},
    process::{Command, ExitStatus, Stdio},
    thread,
};

use crate::errors::GateError;

pub trait OutputFormatter {
    fn line(&mut self, line: &str) -> Result<(), GateError>;
    fn err_line(&mut self, line: &str) -> Result<(), GateError>;
}

/// Captures without printing anything.
#[derive(Debug, Clone, Default)]
pub struct SilentFormatter;
impl OutputFormatter for SilentFormatter {
    fn line(&mut self, _line: &str) -> Result<(), GateError> {
        Ok(())
    }
    fn err_line(&mut self, _line: &str) -> Result<(), GateError> {
        Ok(())
    }
}

/// Echoes every line of the child process to stderr as it is read, keeping
/// stdout for the report.
#[derive(Debug, Clone, Default)]
pub struct EchoFormatter;
impl OutputFormatter for EchoFormatter {
    fn line(&mut self, line: &str) -> Result<(), GateError> {
        eprintln!("{}", line);
        Ok(())
    }
    fn err_line(&mut self, line: &str) -> Result<(), GateError> {
        eprintln!("{}", line);
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CaptureOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CaptureOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Text to show the user when the process failed: stderr, or stdout if
    /// the tool wrote its diagnostics there.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        format!("Process exited with {}", self.status)
    }
}

fn strip_ansi(text: &str) -> Result<String, GateError> {
    String::from_utf8(strip_ansi_escapes::strip(text.as_bytes())).map_err(GateError::from)
}

pub fn command_line(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy().to_string();
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();
    if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

pub fn run_and_capture<F>(mut cmd: Command, formatter: &mut F) -> Result<CaptureOutput, GateError>
where
    F: OutputFormatter,
{
    let program = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| GateError::ToolExecution(format!("Failed to run '{}': {}", program, e)))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // stderr is drained on its own thread so a chatty tool cannot block on a full pipe
    let (stdout_output, stderr_output) = thread::scope(|scope| -> Result<(String, String), GateError> {
        let stderr_reader = scope.spawn(move || -> std::io::Result<String> {
            let mut bytes = Vec::new();
            if let Some(mut stderr) = stderr {
                stderr.read_to_end(&mut bytes)?;
            }
            Ok(String::from_utf8_lossy(&bytes).to_string())
        });

        let mut stdout_output = String::new();
        if let Some(stdout) = stdout {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                let line = line?;
                formatter.line(&line)?;
                stdout_output.push_str(&line);
                stdout_output.push('\n');
            }
        }

        let stderr_output = stderr_reader
            .join()
            .map_err(|_| GateError::ToolExecution("Failed to read stderr".to_string()))??;
        for line in stderr_output.lines() {
            formatter.err_line(line)?;
        }
        Ok((stdout_output, stderr_output))
    })?;

    let status = child.wait()?;

    Ok(CaptureOutput {
        stdout: strip_ansi(&stdout_output)?,
        stderr: strip_ansi(&stderr_output)?,
        status,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[test]
    fn captures_stdout_and_stderr() {
        let output = run_and_capture(
            shell("echo '| src/A.sol |'; echo warning >&2"),
            &mut SilentFormatter,
        )
        .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "| src/A.sol |\n");
        assert_eq!(output.stderr, "warning\n");
    }

    #[test]
    fn strips_ansi_escapes() {
        let output =
            run_and_capture(shell("printf '\\033[32m100.00%%\\033[0m\\n'"), &mut SilentFormatter)
                .unwrap();
        assert_eq!(output.stdout, "100.00%\n");
    }

    #[test]
    fn failed_process_reports_stderr() {
        let output = run_and_capture(
            shell("echo 'compilation error' >&2; exit 1"),
            &mut SilentFormatter,
        )
        .unwrap();
        assert!(!output.success());
        assert_eq!(output.error_text(), "compilation error");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output =
            run_and_capture(shell("echo 'Error: no tests'; exit 2"), &mut SilentFormatter).unwrap();
        assert_eq!(output.error_text(), "Error: no tests");
    }

    #[test]
    fn missing_program_is_tool_execution_error() {
        let result = run_and_capture(
            Command::new("covgate-definitely-not-installed"),
            &mut SilentFormatter,
        );
        match result {
            Err(GateError::ToolExecution(msg)) => {
                assert!(msg.contains("covgate-definitely-not-installed"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn renders_command_line() {
        let mut command = Command::new("forge");
        command.args(["coverage", "--report", "summary"]);
        assert_eq!(command_line(&command), "forge coverage --report summary");
    }
}
