//! Shared harness for CLI integration tests: run the built `npat` binary and
//! keep a per-case transcript for post-mortem inspection.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Outcome of one CLI invocation.
pub struct CliResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

/// Run `npat` with `args` and record the transcript under the target tmp dir.
pub fn run_cli_case(case: &str, args: &[&str]) -> CliResult {
    let output = Command::new(env!("CARGO_BIN_EXE_npat"))
        .args(args)
        .env_remove("RUST_BACKTRACE")
        .output()
        .expect("npat binary should launch");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let log_path = write_case_log(case, args, &output.status, &stdout, &stderr);

    CliResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}

fn write_case_log(
    case: &str,
    args: &[&str],
    status: &ExitStatus,
    stdout: &str,
    stderr: &str,
) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("cli-cases");
    fs::create_dir_all(&dir).expect("case log dir");
    let path = dir.join(format!("{case}.log"));
    let body = format!(
        "args: {args:?}\nstatus: {status}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n"
    );
    fs::write(&path, body).expect("case log written");
    path
}
