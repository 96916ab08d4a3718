use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::CorroborationConfig;

/// Anything that can turn a prompt into a text completion.
pub trait TextGenerator: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("text generator unavailable: {0}")]
    Unavailable(String),
    #[error("text generator failed: {0}")]
    Failed(String),
}

/// Generator backed by a local CLI that reads the prompt on stdin and prints the
/// completion on stdout.
#[derive(Debug, Clone)]
pub struct CommandTextGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandTextGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// `None` when no command is configured.
    pub fn from_config(config: &CorroborationConfig) -> Option<Self> {
        config
            .command
            .as_ref()
            .map(|program| Self::new(program.clone()).with_args(config.args.clone()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TextGenerator for CommandTextGenerator {
    fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                GeneratorError::Unavailable(format!("failed to start {}: {err}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .map_err(|err| GeneratorError::Failed(format!("failed to send prompt: {err}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|err| {
                GeneratorError::Failed(format!("{} did not finish: {err}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GeneratorError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_is_none_without_command() {
        assert!(CommandTextGenerator::from_config(&CorroborationConfig::default()).is_none());
    }

    #[test]
    fn from_config_carries_program_and_args() {
        let config = CorroborationConfig {
            command: Some("llm".to_string()),
            args: vec!["--model".to_string(), "fast".to_string()],
        };

        let generator = CommandTextGenerator::from_config(&config).expect("generator configured");

        assert_eq!(generator.program(), "llm");
        assert_eq!(generator.args, vec!["--model", "fast"]);
    }

    #[test]
    fn missing_program_is_unavailable() {
        let generator = CommandTextGenerator::new("epic-prioritizer-no-such-generator");

        let err = generator.complete("{}").expect_err("spawn fails");

        assert!(matches!(err, GeneratorError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn echoes_prompt_through_cat() {
        let generator = CommandTextGenerator::new("cat");

        let response = generator.complete("{\"urgency\":\"high\"}").expect("cat runs");

        assert_eq!(response, "{\"urgency\":\"high\"}");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure() {
        let generator = CommandTextGenerator::new("sh").with_args(["-c", "echo nope >&2; exit 3"]);

        let err = generator.complete("ignored").expect_err("command fails");

        match err {
            GeneratorError::Failed(message) => assert!(message.contains("nope")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
