use std::fmt;

use bytes::Bytes;
use serde::Serialize;

/// The two operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /clone-voice`
    CloneVoice,
    /// `POST /text-to-cloned-speech`
    TextToClonedSpeech,
}

impl Operation {
    /// Multipart field carrying the uploaded audio
    pub const fn file_field(self) -> &'static str {
        match self {
            Self::CloneVoice => "audio",
            Self::TextToClonedSpeech => "audio_sample",
        }
    }

    /// Client error when the file part is absent
    pub const fn missing_file_message(self) -> &'static str {
        match self {
            Self::CloneVoice => "No audio file part",
            Self::TextToClonedSpeech => "No audio sample file provided",
        }
    }

    /// Client error when the file part has an empty filename
    pub const fn unnamed_file_message(self) -> &'static str {
        match self {
            Self::CloneVoice => "No selected audio file",
            Self::TextToClonedSpeech => "No selected audio sample file",
        }
    }

    /// Temp file name prefix for this operation's uploads
    pub const fn slot(self) -> &'static str {
        match self {
            Self::CloneVoice => "voice-sample",
            Self::TextToClonedSpeech => "voice-sample-for-tts",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            Self::CloneVoice => "Voice cloning successful",
            Self::TextToClonedSpeech => "Text-to-cloned-speech generation successful",
        }
    }

    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::CloneVoice => "Voice cloning failed",
            Self::TextToClonedSpeech => "Text-to-cloned-speech generation failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CloneVoice => "voice cloning",
            Self::TextToClonedSpeech => "text-to-cloned-speech",
        })
    }
}

/// A file part received in a multipart request
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied filename, possibly empty
    pub filename: String,
    /// Raw file bytes
    pub bytes: Bytes,
}

/// Successful delegate outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedAudio {
    /// Where the provider made the result available
    pub url: String,
}

/// JSON body returned on success
#[derive(Debug, Serialize)]
pub struct ClonedAudioResponse {
    #[serde(rename = "clonedAudioURL")]
    pub cloned_audio_url: String,
    pub message: &'static str,
}

impl ClonedAudioResponse {
    pub fn new(operation: Operation, cloned: ClonedAudio) -> Self {
        Self {
            cloned_audio_url: cloned.url,
            message: operation.success_message(),
        }
    }
}
