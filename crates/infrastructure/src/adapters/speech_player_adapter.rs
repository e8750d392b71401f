//! Speech player adapter - Implements SpeechPlayerPort using ai_speech crate

use std::{fmt, sync::Arc};

use ai_speech::{SpeechConfig, SpeechError, SpeechOutput, UtteranceSettings, select_voice};
use application::error::ApplicationError;
use application::ports::SpeechPlayerPort;
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Adapter for speech outputs from the ai_speech crate
///
/// The voice is chosen once, when the adapter is built, and every line of
/// the session is spoken with the same settings.
pub struct SpeechPlayerAdapter {
    output: Arc<dyn SpeechOutput>,
    settings: UtteranceSettings,
}

impl fmt::Debug for SpeechPlayerAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechPlayerAdapter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SpeechPlayerAdapter {
    /// Create an adapter, picking the voice from the output's catalog
    ///
    /// Falls back to the output's default voice when the catalog is
    /// unavailable or nothing in it matches the configured preference.
    pub async fn new(output: Arc<dyn SpeechOutput>, config: &SpeechConfig) -> Self {
        let voices = match output.voices().await {
            Ok(voices) => voices,
            Err(e) => {
                warn!(error = %e, "Voice catalog unavailable, using default voice");
                Vec::new()
            },
        };

        let voice = select_voice(&voices, &config.voice_preference()).cloned();
        if voice.is_none() {
            warn!(
                language = %config.language,
                available = voices.len(),
                "No voice matches the preference, using default voice"
            );
        }

        let settings = config.utterance_settings(voice);
        info!(voice = settings.voice_name(), rate = settings.rate, "Speech output ready");
        Self { output, settings }
    }

    /// Settings every line is spoken with
    pub const fn settings(&self) -> &UtteranceSettings {
        &self.settings
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Cancelled => ApplicationError::Playback("cancelled".to_string()),
            SpeechError::PlaybackFailed(e) => ApplicationError::Playback(e),
            other => ApplicationError::Playback(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPlayerPort for SpeechPlayerAdapter {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn speak(&self, text: &str) -> Result<(), ApplicationError> {
        self.output
            .speak(text, &self.settings)
            .await
            .map_err(Self::map_error)
    }

    async fn cancel(&self) {
        self.output.cancel().await;
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{ConsoleSpeaker, VoiceInfo};
    use mockall::mock;

    use super::*;

    mock! {
        Output {}

        #[async_trait]
        impl SpeechOutput for Output {
            async fn speak(&self, text: &str, settings: &UtteranceSettings) -> Result<(), SpeechError>;
            async fn cancel(&self);
            async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;
        }
    }

    #[tokio::test]
    async fn voice_is_selected_from_catalog() {
        let config = SpeechConfig::default();
        let speaker = ConsoleSpeaker::new(config.voices.clone(), std::io::sink());
        let adapter = SpeechPlayerAdapter::new(Arc::new(speaker), &config).await;

        assert_eq!(adapter.settings().voice_name(), "Google UK English Female");
        assert!((adapter.settings().rate - 0.9).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn catalog_failure_uses_default_voice() {
        let mut output = MockOutput::new();
        output
            .expect_voices()
            .returning(|| Err(SpeechError::Unsupported("no synthesizer".into())));

        let adapter = SpeechPlayerAdapter::new(Arc::new(output), &SpeechConfig::default()).await;
        assert!(adapter.settings().voice.is_none());
    }

    #[tokio::test]
    async fn speak_uses_selected_settings() {
        let mut output = MockOutput::new();
        output
            .expect_voices()
            .returning(|| Ok(vec![VoiceInfo::new("s", "Samantha", "en-US")]));
        output
            .expect_speak()
            .withf(|text, settings| {
                text == "Tell me about yourself." && settings.voice_name() == "Samantha"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let adapter = SpeechPlayerAdapter::new(Arc::new(output), &SpeechConfig::default()).await;
        adapter.speak("Tell me about yourself.").await.unwrap();
    }

    #[tokio::test]
    async fn playback_errors_are_mapped() {
        let mut output = MockOutput::new();
        output.expect_voices().returning(|| Ok(Vec::new()));
        output
            .expect_speak()
            .returning(|_, _| Err(SpeechError::PlaybackFailed("device busy".into())));

        let adapter = SpeechPlayerAdapter::new(Arc::new(output), &SpeechConfig::default()).await;
        let err = adapter.speak("Hello").await.unwrap_err();
        assert_eq!(err, ApplicationError::Playback("device busy".to_string()));
    }

    #[test]
    fn map_error_cancelled() {
        let err = SpeechPlayerAdapter::map_error(SpeechError::Cancelled);
        assert_eq!(err, ApplicationError::Playback("cancelled".to_string()));
    }
}
