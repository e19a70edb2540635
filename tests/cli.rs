//! End-to-end tests for the vwpeaks and vwpeaks-resolve binaries.
//!
//! Covers:
//! 1. Peak calling output format and minimum width
//! 2. Overlap trimming, duplicate removal and the ambiguity exit code
//! 3. Malformed and out-of-order input
//! 4. Usage errors
//! 5. Cluster resolution

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

// =============================================================================
// Helper functions
// =============================================================================

fn create_input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_vwpeaks(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vwpeaks"))
        .args(args)
        .output()
        .expect("Failed to run vwpeaks")
}

fn run_with_stdin(bin: &str, args: &[&str], stdin_content: &str) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("Failed to wait for binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Signal rows for one summit group starting at `first_pos`.
fn group(chrom: &str, first_pos: u64, summit: u64, scores: &[f32]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let pos = first_pos + i as u64;
            format!("{}\t{}\t{}\tid\t{}\t{}\n", chrom, pos - 1, pos, y, summit)
        })
        .collect()
}

fn flat_top() -> String {
    group("chr1", 101, 103, &[1.0, 2.0, 5.0, 5.0, 2.0, 1.0])
}

// =============================================================================
// Peak calling
// =============================================================================

#[test]
fn test_flat_top_peak() {
    let input = create_input_file(&flat_top());
    let output = run_vwpeaks(&["2", "-i", input.path().to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "chr1\t102\t104\tid\t5\t103\t103\n");
}

#[test]
fn test_min_width_excludes_narrow_peak() {
    let input = create_input_file(&flat_top());
    let output = run_vwpeaks(&["3", "-i", input.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_stdin_input() {
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], &flat_top());

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t102\t104\tid\t5\t103\t103\n");
}

#[test]
fn test_stats_go_to_stderr() {
    let output = run_with_stdin(
        env!("CARGO_BIN_EXE_vwpeaks"),
        &["1", "--stats", "-i", "-"],
        &flat_top(),
    );

    assert!(output.status.success());
    assert!(stderr(&output).contains("Records: 6"));
    assert_eq!(stdout(&output).lines().count(), 1);
}

#[test]
fn test_summit_proximity_beats_height() {
    // Taller maximum at 3, shorter one at 9 next to summit 9.
    let scores = [1.0, 4.0, 10.0, 4.0, 1.0, 1.0, 2.0, 4.0, 6.0, 4.0, 2.0];
    let output = run_with_stdin(
        env!("CARGO_BIN_EXE_vwpeaks"),
        &["1"],
        &group("chr1", 1, 9, &scores),
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t7\t10\tid\t6\t9\t9\n");
}

// =============================================================================
// Overlap resolution
// =============================================================================

#[test]
fn test_left_peak_shortened() {
    let mut content = group("chr1", 10, 12, &[1.0, 6.0, 8.0, 6.0, 5.0, 1.0]);
    content.push_str(&group("chr1", 13, 16, &[1.0, 5.0, 6.0, 9.0, 6.0, 1.0]));
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], &content);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "chr1\t10\t13\tid\t8\t12\t12\nchr1\t13\t17\tid\t9\t16\t16\n"
    );
}

#[test]
fn test_identical_peaks_keep_closer_summit() {
    let scores = [6.0, 7.0, 8.0, 7.0, 6.0];
    let mut content = group("chr1", 3, 5, &scores);
    content.push_str(&group("chr1", 3, 7, &scores));
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], &content);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t2\t7\tid\t8\t5\t5\n");
}

#[test]
fn test_ambiguous_overlap_exits_2() {
    let mut content = group("chr1", 3, 5, &[6.0, 7.0, 8.0, 7.0, 6.0]);
    content.push_str(&group("chr1", 4, 6, &[6.0, 7.0, 8.0, 7.0, 6.5, 6.0]));
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], &content);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unsure how to resolve overlap"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_different_chromosomes_do_not_interact() {
    let mut content = group("chr1", 3, 5, &[6.0, 7.0, 8.0, 7.0, 6.0]);
    content.push_str(&group("chr2", 4, 6, &[6.0, 7.0, 8.0, 7.0, 6.5, 6.0]));
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], &content);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "chr1\t2\t7\tid\t8\t5\t5\nchr2\t3\t9\tid\t8\t6\t6\n"
    );
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn test_not_single_base_fails() {
    let content = "chr1\t100\t101\tid\t1\t101\nchr1\t101\t103\tid\t2\t101\n";
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], content);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 2"));
}

#[test]
fn test_out_of_order_fails() {
    let content = "chr1\t100\t101\tid\t1\t101\nchr1\t99\t100\tid\t2\t101\n";
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], content);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ascending order"));
}

#[test]
fn test_missing_column_fails() {
    let content = "chr1\t100\t101\tid\t1\n";
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks"), &["1"], content);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_file_fails() {
    let output = run_vwpeaks(&["1", "-i", "/nonexistent/signal.bed"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error:"));
}

// =============================================================================
// Usage errors
// =============================================================================

#[test]
fn test_missing_min_width_is_usage_error() {
    let output = run_vwpeaks(&[]);
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_zero_min_width_is_usage_error() {
    let output = run_vwpeaks(&["0"]);
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_non_numeric_min_width_is_usage_error() {
    let output = run_vwpeaks(&["wide"]);
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_help_succeeds() {
    let output = run_vwpeaks(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("MIN_WIDTH"));
}

// =============================================================================
// Cluster resolution
// =============================================================================

#[test]
fn test_resolve_clusters() {
    let content = "chr1\t100\t400|chr1\t100\t200\ta\t5;chr1\t180\t260\tb\t9.50;chr1\t260\t400\tc\t4\n\
                   chr2\t0\t50|chr2\t0\t50\td\t1\n";
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks-resolve"), &[], content);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "chr1\t180\t260\tb\t9.50\nchr1\t260\t400\tc\t4\nchr2\t0\t50\td\t1\n"
    );
}

#[test]
fn test_resolve_clusters_from_file() {
    let input = create_input_file("chr1\t0\t30|chr1\t0\t20\tx\t2;chr1\t10\t30\ty\t3\n");
    let output = Command::new(env!("CARGO_BIN_EXE_vwpeaks-resolve"))
        .args(["-i", input.path().to_str().unwrap()])
        .output()
        .expect("Failed to run vwpeaks-resolve");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t10\t30\ty\t3\n");
}

#[test]
fn test_resolve_clusters_malformed_line() {
    let content = "chr1\t0\t30|chr1\t0\t20\tx\n";
    let output = run_with_stdin(env!("CARGO_BIN_EXE_vwpeaks-resolve"), &[], content);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 1"));
}
