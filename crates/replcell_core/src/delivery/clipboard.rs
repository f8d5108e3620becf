use super::Clipboard;
use crate::config::CellConfig;
use crate::error::CellError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// One external program that reads clipboard content from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardProgram {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardProgram {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Programs tried when no preference is configured, in order.
pub fn default_programs() -> Vec<ClipboardProgram> {
    vec![
        ClipboardProgram::new("xclip", ["-i", "-selection", "clipboard"]),
        ClipboardProgram::new("xsel", ["-i", "--clipboard"]),
        ClipboardProgram::new("wl-copy", Vec::<String>::new()),
        ClipboardProgram::new("pbcopy", Vec::<String>::new()),
    ]
}

/// Clipboard backed by the first installed program of an ordered list.
#[derive(Debug, Clone)]
pub struct ProgramClipboard {
    programs: Vec<ClipboardProgram>,
}

impl ProgramClipboard {
    pub fn new(programs: Vec<ClipboardProgram>) -> Self {
        Self { programs }
    }

    /// Default chain, restricted to `preferred_clipboard` when it is set.
    pub fn from_config(config: &CellConfig) -> Self {
        let programs = default_programs()
            .into_iter()
            .filter(|candidate| {
                config
                    .preferred_clipboard
                    .as_deref()
                    .map_or(true, |preferred| candidate.program == preferred)
            })
            .collect();
        Self::new(programs)
    }

    pub fn programs(&self) -> &[ClipboardProgram] {
        &self.programs
    }
}

impl Clipboard for ProgramClipboard {
    fn copy(&self, text: &str) -> Result<(), CellError> {
        for candidate in &self.programs {
            let spawned = Command::new(&candidate.program)
                .args(&candidate.args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            let mut child = match spawned {
                Ok(child) => child,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    tracing::debug!(program = %candidate.program, "clipboard program not found");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            // The child is reaped even when it closed stdin early.
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            };
            let status = child.wait()?;
            written?;
            if !status.success() {
                return Err(CellError::ClipboardUnavailable(format!(
                    "{} exited with {}",
                    candidate.program, status
                )));
            }
            tracing::debug!(program = %candidate.program, bytes = text.len(), "copied cell");
            return Ok(());
        }

        let names: Vec<&str> = self
            .programs
            .iter()
            .map(|candidate| candidate.program.as_str())
            .collect();
        tracing::warn!(tried = ?names, "no clipboard program available");
        Err(CellError::ClipboardUnavailable(if names.is_empty() {
            "no clipboard program configured".to_string()
        } else {
            format!("could not find any of: {}", names.join(", "))
        }))
    }
}
