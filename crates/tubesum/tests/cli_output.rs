use std::process::{Command, Output};

fn tubesum(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tubesum"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LOG_DIR")
        .env("LOG_LEVEL", "info")
        .env("NO_COLOR", "1")
        // Nothing listens on the discard port
        .env("YOUTUBE_BASE_URL", "http://127.0.0.1:9")
        .env("TRANSCRIPT_TIMEOUT_SECS", "2")
        .output()
        .expect("Failed to run tubesum")
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = tubesum(&["transcribe", "abc123"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&output.stdout));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fetching transcript for video: abc123"));
}

#[test]
fn test_invalid_video_url_fails_without_stdout() {
    let output = tubesum(&["transcribe", "https://www.youtube.com/watch?v="]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
