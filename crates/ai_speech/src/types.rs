//! Audio payloads handed to a provider and the text it returns

/// Container formats an upload can arrive in
///
/// `.opus` files and `audio/opus` uploads are Opus in an Ogg container and
/// travel as [`AudioFormat::Ogg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    Ogg,
    Mp3,
    Wav,
    Flac,
    /// Browser `MediaRecorder` output, assumed when nothing else matches
    #[default]
    Webm,
    /// AAC in an MP4 container
    M4a,
}

impl AudioFormat {
    /// MIME type sent on the multipart file part
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/mp4",
        }
    }

    /// File extension providers use to sniff the container
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Webm => "webm",
            Self::M4a => "m4a",
        }
    }

    /// Match a content type, ignoring parameters such as `codecs=opus`
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or(mime).trim();

        match base.to_ascii_lowercase().as_str() {
            "audio/ogg" | "audio/opus" | "application/ogg" => Some(Self::Ogg),
            "audio/mpeg" | "audio/mp3" | "audio/mpga" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/m4a" | "audio/mp4" | "audio/x-m4a" | "video/mp4" | "audio/aac" => {
                Some(Self::M4a)
            },
            _ => None,
        }
    }

    /// Match an upload's file name extension
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "mp3" | "mpga" | "mpeg" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            "m4a" | "mp4" | "aac" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Content type first, then file name, then WebM
    #[must_use]
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        content_type
            .and_then(Self::from_mime_type)
            .or_else(|| file_name.and_then(Self::from_file_name))
            .unwrap_or_default()
    }
}

/// Uploaded clip bytes tagged with their detected format
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Upload file name with the extension matching the format
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.extension())
    }
}

/// Provider output for one clip
///
/// Blank text is passed through; deciding that a clip held no speech is left
/// to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    /// ISO 639-1 code, when the provider reports one
    pub language: Option<String>,
    pub duration_ms: Option<u64>,
}

impl Transcription {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}
