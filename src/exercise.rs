use crate::config::DrillConfig;
use crate::error::{DrillError, Result};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A word the typing test says was typed wrong
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Mistake {
    pub word: String,
    pub typed: String,
}

impl Mistake {
    pub fn new(word: impl Into<String>, typed: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            typed: typed.into(),
        }
    }
}

/// What came back from one run of the typing test
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundResult {
    pub exit_code: i32,
    pub stderr_empty: bool,
    pub mistakes: Vec<Mistake>,
}

impl RoundResult {
    pub fn finished(mistakes: Vec<Mistake>) -> Self {
        Self {
            exit_code: 0,
            stderr_empty: true,
            mistakes,
        }
    }

    pub fn quit(exit_code: i32, stderr_empty: bool) -> Self {
        Self {
            exit_code,
            stderr_empty,
            mistakes: Vec::new(),
        }
    }
}

/// Boundary to the external typing exercise
pub trait ExerciseAdapter {
    /// Present `text` to the user and report how it went.
    ///
    /// A non-zero `exit_code` in the result means the user asked to stop.
    fn run(&mut self, text: &str) -> Result<RoundResult>;
}

/// Join a round's words into the text shown to the user.
pub fn practice_text(words: &[String]) -> String {
    words.join(" ")
}

#[derive(Serialize)]
struct Quote<'a> {
    text: &'a str,
    attribution: &'a str,
}

#[derive(Deserialize)]
struct TestReport {
    #[serde(default)]
    mistakes: Option<Vec<Mistake>>,
}

/// Request payload: a one element quote list
pub fn encode_request(text: &str) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&[Quote {
        text,
        attribution: "",
    }])?)
}

/// Pull the mistakes out of the typing test's JSON report.
pub fn parse_report(stdout: &[u8]) -> Result<Vec<Mistake>> {
    let reports: Vec<TestReport> = serde_json::from_slice(stdout)?;
    let first = reports
        .into_iter()
        .next()
        .ok_or_else(|| DrillError::Protocol("empty report list".into()))?;
    Ok(first.mistakes.unwrap_or_default())
}

/// Runs the `tt` typing test (or anything speaking its JSON protocol)
#[derive(Debug, Clone)]
pub struct TypingTest {
    exe: String,
    args: Vec<String>,
}

impl TypingTest {
    pub fn new(exe: impl Into<String>, max_secs: u32, extras: &[String]) -> Self {
        let mut args: Vec<String> = [
            "-oneshot",
            "-json",
            "-nobackspace",
            "-t",
            max_secs.to_string().as_str(),
            "-quotes",
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.extend(extras.iter().cloned());

        Self {
            exe: exe.into(),
            args,
        }
    }

    pub fn from_config(config: &DrillConfig) -> Self {
        Self::new(
            config.typer_exe.clone(),
            config.typer_max_secs,
            &config.typer_args_extras,
        )
    }

    pub fn exe(&self) -> &str {
        &self.exe
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn launch_error(&self, source: std::io::Error) -> DrillError {
        DrillError::Launch {
            exe: self.exe.clone(),
            source,
        }
    }
}

impl ExerciseAdapter for TypingTest {
    fn run(&mut self, text: &str) -> Result<RoundResult> {
        let request = encode_request(text)?;

        let mut child = Command::new(&self.exe)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&request) {
                Ok(()) => {}
                // The test may quit before reading its quote
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    warn!("{} closed its input early", self.exe)
                }
                Err(e) => return Err(self.launch_error(e)),
            }
        }

        let output = child.wait_with_output().map_err(|e| self.launch_error(e))?;
        debug!(
            "{} exited with {:?}, stdout: {}, stderr: {}",
            self.exe,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        let stderr_empty = output.stderr.is_empty();
        let exit_code = output.status.code().unwrap_or_else(|| {
            warn!("{} was terminated by a signal", self.exe);
            1
        });

        if exit_code != 0 {
            return Ok(RoundResult::quit(exit_code, stderr_empty));
        }

        Ok(RoundResult {
            exit_code,
            stderr_empty,
            mistakes: parse_report(&output.stdout)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_practice_text_keeps_order_and_repeats() {
        let words: Vec<String> = ["dog", "cat", "dog"].iter().map(|s| s.to_string()).collect();
        assert_eq!(practice_text(&words), "dog cat dog");
    }

    #[test]
    fn test_request_is_single_quote_with_blank_attribution() {
        let request = encode_request("cat dog").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "text": "cat dog", "attribution": "" }])
        );
    }

    #[test]
    fn test_report_with_mistakes() {
        let stdout = br#"[{"wpm": 61, "cpm": 305, "accuracy": 96.2,
            "mistakes": [{"word": "cat", "typed": "cta"}, {"word": "dog", "typed": "dgo"}]}]"#;
        assert_eq!(
            parse_report(stdout).unwrap(),
            vec![Mistake::new("cat", "cta"), Mistake::new("dog", "dgo")]
        );
    }

    #[test]
    fn test_null_or_missing_mistakes_mean_none() {
        assert!(parse_report(br#"[{"mistakes": null}]"#).unwrap().is_empty());
        assert!(parse_report(br#"[{"wpm": 80}]"#).unwrap().is_empty());
        assert!(parse_report(br#"[{"mistakes": []}]"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_reports_are_protocol_errors() {
        assert_matches!(parse_report(b""), Err(DrillError::Protocol(_)));
        assert_matches!(parse_report(b"not json"), Err(DrillError::Protocol(_)));
        assert_matches!(parse_report(b"[]"), Err(DrillError::Protocol(_)));
        assert_matches!(
            parse_report(br#"[{"mistakes": [{"word": 3}]}]"#),
            Err(DrillError::Protocol(_))
        );
        assert_matches!(parse_report(br#"{"mistakes": []}"#), Err(DrillError::Protocol(_)));
    }

    #[test]
    fn test_fixed_flags_come_before_extras() {
        let extras = vec!["-noskip".to_string(), "-theme=default".to_string()];
        let tt = TypingTest::new("tt", 45, &extras);
        assert_eq!(tt.exe(), "tt");
        assert_eq!(
            tt.args(),
            &[
                "-oneshot",
                "-json",
                "-nobackspace",
                "-t",
                "45",
                "-quotes",
                "-",
                "-noskip",
                "-theme=default"
            ]
        );
    }

    #[test]
    fn test_missing_executable_is_launch_error() {
        let mut tt = TypingTest::new("/nonexistent/glowl-typer", 30, &[]);
        assert_matches!(tt.run("cat"), Err(DrillError::Launch { .. }));
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::sync::{Mutex, MutexGuard};
        use tempfile::TempDir;

        // Writing a script while another test forks can make exec fail with ETXTBSY
        static SPAWN: Mutex<()> = Mutex::new(());

        fn serial() -> MutexGuard<'static, ()> {
            SPAWN.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn script(dir: &TempDir, body: &str) -> String {
            let path = dir.path().join("fake-tt");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        #[test]
        fn test_reads_mistakes_from_stdout() {
            let _guard = serial();
            let dir = tempfile::tempdir().unwrap();
            let exe = script(
                &dir,
                r#"cat > /dev/null; echo '[{"mistakes":[{"word":"cat","typed":"cta"}]}]'"#,
            );
            let result = TypingTest::new(exe, 30, &[]).run("cat dog").unwrap();
            assert_eq!(result, RoundResult::finished(vec![Mistake::new("cat", "cta")]));
        }

        #[test]
        fn test_non_zero_exit_skips_parsing() {
            let _guard = serial();
            let dir = tempfile::tempdir().unwrap();
            let exe = script(&dir, "cat > /dev/null; echo 'garbage'; exit 1");
            let result = TypingTest::new(exe, 30, &[]).run("cat").unwrap();
            assert_eq!(result, RoundResult::quit(1, true));
        }

        #[test]
        fn test_stderr_is_observed() {
            let _guard = serial();
            let dir = tempfile::tempdir().unwrap();
            let exe = script(&dir, "cat > /dev/null; echo 'boom' >&2; exit 2");
            let result = TypingTest::new(exe, 30, &[]).run("cat").unwrap();
            assert_eq!(result, RoundResult::quit(2, false));
        }

        #[test]
        fn test_garbage_on_success_is_protocol_error() {
            let _guard = serial();
            let dir = tempfile::tempdir().unwrap();
            let exe = script(&dir, "cat > /dev/null; echo 'not json'");
            assert_matches!(
                TypingTest::new(exe, 30, &[]).run("cat"),
                Err(DrillError::Protocol(_))
            );
        }

        #[test]
        fn test_request_reaches_stdin() {
            let _guard = serial();
            let dir = tempfile::tempdir().unwrap();
            let seen = dir.path().join("seen.json");
            let exe = script(
                &dir,
                &format!("cat > '{}'; echo '[{{}}]'", seen.display()),
            );
            TypingTest::new(exe, 30, &[]).run("dog dog").unwrap();
            let value: serde_json::Value =
                serde_json::from_slice(&std::fs::read(&seen).unwrap()).unwrap();
            assert_eq!(value[0]["text"], "dog dog");
            assert_eq!(value[0]["attribution"], "");
        }
    }
}
