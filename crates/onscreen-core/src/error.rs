use std::path::PathBuf;

/// Where users can fetch trained models
pub const TRAINED_DATA_URL: &str = "https://github.com/tesseract-ocr/tessdata_best";

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No language selected")]
    NoLanguageSelected,

    #[error("OCR failed for language '{language}': {source}")]
    OcrEngineFailure {
        language: String,
        #[source]
        source: OcrError,
    },

    #[error("Screen capture failed: {0}")]
    ScreenCaptureFailed(String),

    #[error("A capture is already in progress")]
    Busy,

    #[error("Capture worker failed: {0}")]
    WorkerFailed(String),
}

impl CaptureError {
    /// Text shown to the user, with a hint on how to recover
    pub fn user_message(&self, tessdata_path: &str) -> String {
        match self {
            CaptureError::NoLanguageSelected => format!(
                "No language selected, please download trained data from\r\n{TRAINED_DATA_URL}\r\nand move it into folder {tessdata_path}"
            ),
            CaptureError::OcrEngineFailure {
                language,
                source: OcrError::MissingModel { .. },
            } => format!(
                "Trained data for '{language}' is missing, please download {language}.traineddata from\r\n{TRAINED_DATA_URL}\r\nand move it into folder {tessdata_path}"
            ),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("No trained data for '{language}' at {path}")]
    MissingModel { language: String, path: PathBuf },

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Malformed engine output: {0}")]
    MalformedOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to update window attributes: {0}")]
    AttributeSinkFailure(String),
}
