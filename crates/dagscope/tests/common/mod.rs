//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the dagscope binary in the specified directory.
///
/// Colors and logging are turned off so output can be matched exactly.
pub fn run_dagscope_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dagscope"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute dagscope binary")
}

/// Stdout of a finished command as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Import rows for the four-node graph `a -> b -> c`, `a -> d`
pub const ABCD_ROWS: &str = r#"{"object":"a","owner":"ingest"}
{"object":"b","depends_on":"a"}
{"object":"c","depends_on":["b"]}
{"object":"d","depends_on":"a","position_x":10.0,"position_y":20.0}
"#;

/// Initialize a repository in `dir` and import [`ABCD_ROWS`] into it.
pub fn init_with_abcd(dir: &Path) {
    let output = run_dagscope_in_dir(dir, &["init", "--quiet"]);
    assert!(output.status.success(), "init failed: {}", stderr(&output));

    std::fs::write(dir.join("jobs.jsonl"), ABCD_ROWS).expect("Failed to write import file");
    let output = run_dagscope_in_dir(dir, &["import", "jobs.jsonl"]);
    assert!(output.status.success(), "import failed: {}", stderr(&output));
}
