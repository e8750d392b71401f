//! Terminal input and output for an interview session

use ai_speech::{VoiceGender, VoiceInfo};
use application::SessionSnapshot;
use domain::{SessionState, TurnRole};

/// What a typed line means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Words the candidate "says"
    Speech(String),
    /// End the current answer now
    Submit,
    /// Restart listening
    Resume,
    /// End the interview
    Stop,
    /// A slash command that does not exist
    Unknown(String),
    /// Nothing but whitespace
    Blank,
}

impl ConsoleInput {
    /// Interpret one line of terminal input
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Speech(line.to_string());
        };
        match command.trim().to_lowercase().as_str() {
            "submit" | "done" => Self::Submit,
            "resume" => Self::Resume,
            "stop" | "quit" | "exit" => Self::Stop,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Turns snapshot changes into lines for the terminal
///
/// Interviewer lines are printed by the speaker as they are spoken, so
/// only the candidate's turns and phase changes are shown here.
#[derive(Debug, Default)]
pub struct SnapshotPrinter {
    shown_turns: usize,
    state: SessionState,
}

impl SnapshotPrinter {
    /// Create a printer that has shown nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines describing what changed since the last snapshot
    pub fn render(&mut self, snapshot: &SessionSnapshot) -> Vec<String> {
        let mut lines = Vec::new();

        if snapshot.turns.len() < self.shown_turns {
            self.shown_turns = 0;
        }
        for turn in &snapshot.turns[self.shown_turns..] {
            if turn.role() == TurnRole::User {
                lines.push(turn.to_string());
            }
        }
        self.shown_turns = snapshot.turns.len();

        if snapshot.state != self.state {
            self.state = snapshot.state;
            match snapshot.state {
                SessionState::Listening => {
                    lines.push("(listening, pause or type /submit to finish)".to_string());
                },
                SessionState::Processing => lines.push("(thinking...)".to_string()),
                SessionState::Ended => lines.push("Interview ended.".to_string()),
                SessionState::Error => lines.push(
                    snapshot
                        .notice
                        .clone()
                        .unwrap_or_else(|| "Interview stopped after an error.".to_string()),
                ),
                SessionState::Idle | SessionState::Greeting | SessionState::Speaking => {},
            }
        }

        lines
    }
}

const fn gender_label(gender: Option<VoiceGender>) -> &'static str {
    match gender {
        Some(VoiceGender::Male) => "male",
        Some(VoiceGender::Female) => "female",
        Some(VoiceGender::Neutral) => "neutral",
        None => "unknown",
    }
}

/// One line per voice, the selected one marked with `*`
pub fn voice_lines(voices: &[VoiceInfo], selected: Option<&VoiceInfo>) -> Vec<String> {
    voices
        .iter()
        .map(|voice| {
            let marker = if selected.is_some_and(|s| s.id == voice.id) {
                '*'
            } else {
                ' '
            };
            format!(
                "{marker} {} ({}, {})",
                voice.name,
                voice.language,
                gender_label(voice.gender)
            )
        })
        .collect()
}
