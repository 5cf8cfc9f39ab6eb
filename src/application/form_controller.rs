use crate::{
    api::ProcessRequest,
    domain::{AppError, OutputFormat, ProcessedFile, StatusKind},
    ui::status::StatusArea,
    utils::{extract_video_id, is_recognized_media_url},
};

const GENERIC_FAILURE: &str = "Could not process the request.";

/// Result of activating an action control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input passed validation; send this request.
    Started(ProcessRequest),
    /// Input failed validation; nothing is sent.
    Rejected(AppError),
    /// A request is already in flight.
    Ignored,
}

/// Owns the form state: the URL input, the processing marker and the
/// status region.
#[derive(Debug)]
pub struct FormController {
    url: String,
    processing: Option<OutputFormat>,
    status_area: StatusArea,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            processing: None,
            status_area: StatusArea::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    /// The format whose control shows the processing marker.
    pub fn processing(&self) -> Option<OutputFormat> {
        self.processing
    }

    /// All action controls are disabled while this is true.
    pub fn controls_disabled(&self) -> bool {
        self.processing.is_some()
    }

    pub fn status_area(&self) -> &StatusArea {
        &self.status_area
    }

    pub fn status_area_mut(&mut self) -> &mut StatusArea {
        &mut self.status_area
    }

    pub fn submit(&mut self, format: OutputFormat) -> Submission {
        if self.processing.is_some() {
            return Submission::Ignored;
        }

        let url = self.url.trim();

        if url.is_empty() {
            return self.reject(AppError::EmptyInput);
        }

        if !is_recognized_media_url(url) {
            return self.reject(AppError::UnrecognizedUrl);
        }

        let request = ProcessRequest {
            url: url.to_string(),
            format,
        };

        tracing::info!(
            video_id = extract_video_id(url).unwrap_or("?"),
            %format,
            "Processing request started"
        );

        self.processing = Some(format);
        self.status_area.show_status(
            format!(
                "Processing {}... Please wait. This might take a moment.",
                format
            ),
            StatusKind::Loading,
        );

        Submission::Started(request)
    }

    fn reject(&mut self, error: AppError) -> Submission {
        self.status_area
            .show_status(error.to_string(), StatusKind::Error);
        Submission::Rejected(error)
    }

    /// Applies the outcome of a request. Controls are re-enabled on every path.
    pub fn finish(&mut self, format: OutputFormat, result: Result<ProcessedFile, AppError>) {
        match result {
            Ok(file) => {
                tracing::info!(filename = %file.filename, url = %file.url, "Processing finished");
                self.status_area.show_status(
                    format!("Success! Your {} is ready.", format),
                    StatusKind::Success,
                );
                self.status_area.add_download_link(file.url, file.filename);
            }
            Err(e) => {
                tracing::error!("Error: {}", e);
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                };
                self.status_area
                    .show_status(format!("Error: {}", message), StatusKind::Error);
            }
        }

        self.processing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusMessage;
    use crate::ui::status::StatusItem;
    use url::Url;

    fn controller_with(url: &str) -> FormController {
        let mut controller = FormController::new();
        controller.set_url(url.to_string());
        controller
    }

    fn processed(filename: &str) -> ProcessedFile {
        ProcessedFile {
            url: Url::parse("http://127.0.0.1:5000/files/")
                .unwrap()
                .join(filename)
                .unwrap(),
            filename: filename.to_string(),
        }
    }

    fn status(controller: &FormController) -> &StatusMessage {
        controller.status_area().message().expect("a status message")
    }

    fn link_count(controller: &FormController) -> usize {
        controller
            .status_area()
            .items()
            .iter()
            .filter(|item| matches!(item, StatusItem::Link(_)))
            .count()
    }

    #[test]
    fn test_empty_or_blank_input_is_rejected() {
        for input in ["", "   ", "\t\n"] {
            for format in OutputFormat::ALL {
                let mut controller = controller_with(input);
                let submission = controller.submit(format);

                assert_eq!(submission, Submission::Rejected(AppError::EmptyInput));
                assert_eq!(status(&controller).text, "Please paste a YouTube URL first.");
                assert_eq!(status(&controller).kind, StatusKind::Error);
                assert!(!controller.controls_disabled());
                assert_eq!(controller.processing(), None);
            }
        }
    }

    #[test]
    fn test_unrecognized_url_is_rejected() {
        for input in ["not a url", "https://vimeo.com/123", "youtube", "https://youtube.com"] {
            let mut controller = controller_with(input);
            let submission = controller.submit(OutputFormat::Audio);

            assert_eq!(submission, Submission::Rejected(AppError::UnrecognizedUrl));
            assert_eq!(status(&controller).text, "Invalid YouTube URL format.");
            assert!(!controller.controls_disabled());
        }
    }

    #[test]
    fn test_valid_input_starts_processing() {
        let mut controller = controller_with("  https://youtu.be/abc123  ");
        let submission = controller.submit(OutputFormat::Mp3);

        assert_eq!(
            submission,
            Submission::Started(ProcessRequest {
                url: "https://youtu.be/abc123".to_string(),
                format: OutputFormat::Mp3,
            })
        );
        assert_eq!(controller.processing(), Some(OutputFormat::Mp3));
        assert!(controller.controls_disabled());
        assert_eq!(status(&controller).kind, StatusKind::Loading);
        assert_eq!(
            status(&controller).text,
            "Processing mp3... Please wait. This might take a moment."
        );
    }

    #[test]
    fn test_second_submission_while_processing_is_ignored() {
        let mut controller = controller_with("https://youtu.be/abc123");
        assert!(matches!(controller.submit(OutputFormat::Mp3), Submission::Started(_)));
        assert_eq!(controller.submit(OutputFormat::Video), Submission::Ignored);
        assert_eq!(controller.processing(), Some(OutputFormat::Mp3));
    }

    #[test]
    fn test_success_shows_message_and_link() {
        let mut controller = controller_with("https://youtu.be/abc123");
        controller.submit(OutputFormat::Mp3);
        controller.finish(OutputFormat::Mp3, Ok(processed("abc123.mp3")));

        assert_eq!(status(&controller).text, "Success! Your mp3 is ready.");
        assert_eq!(status(&controller).kind, StatusKind::Success);
        let link = controller.status_area().download_link().unwrap();
        assert_eq!(link.filename, "abc123.mp3");
        assert_eq!(link.label(), "Download \"abc123.mp3\"");
        assert_eq!(link_count(&controller), 1);
        assert!(!controller.controls_disabled());
        assert_eq!(controller.processing(), None);
    }

    #[test]
    fn test_consecutive_successes_keep_one_link() {
        let mut controller = controller_with("https://youtu.be/abc123");
        controller.submit(OutputFormat::Mp3);
        controller.finish(OutputFormat::Mp3, Ok(processed("abc123.mp3")));

        controller.set_url("https://youtube.com/watch?v=xyz".to_string());
        controller.submit(OutputFormat::Video);
        controller.finish(OutputFormat::Video, Ok(processed("xyz.mp4")));

        assert_eq!(link_count(&controller), 1);
        assert_eq!(
            controller.status_area().download_link().unwrap().filename,
            "xyz.mp4"
        );
    }

    #[test]
    fn test_failure_reenables_controls() {
        let failures = [
            AppError::Api("Rate limited".to_string()),
            AppError::Api("Server error: 500".to_string()),
            AppError::Api("HTTP request failed: connection refused".to_string()),
        ];

        for failure in failures {
            let mut controller = controller_with("https://youtube.com/watch?v=xyz");
            controller.submit(OutputFormat::Video);
            controller.finish(OutputFormat::Video, Err(failure.clone()));

            assert!(!controller.controls_disabled());
            assert_eq!(controller.processing(), None);
            assert_eq!(status(&controller).kind, StatusKind::Error);
            assert_eq!(status(&controller).text, format!("Error: {}", failure));
            assert_eq!(link_count(&controller), 0);
        }
    }

    #[test]
    fn test_rate_limited_scenario() {
        let mut controller = controller_with("https://youtube.com/watch?v=xyz");
        controller.submit(OutputFormat::Video);
        controller.finish(
            OutputFormat::Video,
            Err(AppError::Api("Rate limited".to_string())),
        );
        assert_eq!(status(&controller).text, "Error: Rate limited");
    }

    #[test]
    fn test_blank_error_uses_generic_message() {
        let mut controller = controller_with("https://youtu.be/abc");
        controller.submit(OutputFormat::Audio);
        controller.finish(OutputFormat::Audio, Err(AppError::Api(String::new())));
        assert_eq!(
            status(&controller).text,
            "Error: Could not process the request."
        );
    }
}
