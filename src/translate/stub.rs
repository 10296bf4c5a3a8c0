use async_trait::async_trait;

use super::interface::{
    TranslationBackend, TranslationRequest, TranslationResponse, VerificationResult, STATUS_SUCCESS,
};

/// Rendered in the marker line when the request names no target hardware
pub const ABSENT_PLACEHOLDER: &str = "none";

pub const STUB_RAW_LOG: &str = "Mock backend: no real translation performed.";

/// First line of every generated program, echoing the request's routing fields
pub fn marker_line(request: &TranslationRequest) -> String {
    format!(
        "// Mock translated from {} to {} (target_hw={})",
        request.source_language,
        request.destination_language,
        request.target_hardware.as_deref().unwrap_or(ABSENT_PLACEHOLDER),
    )
}

/// Turn a request into the canned success response.
///
/// Pure: reads nothing but `request`, never fails, and leaves `source_code`
/// untouched after the marker line.
pub fn stub_translate(request: &TranslationRequest) -> TranslationResponse {
    let mut generated = marker_line(request);
    generated.push('\n');
    generated.push_str(&request.source_code);

    TranslationResponse {
        status: STATUS_SUCCESS.to_string(),
        generated_code: Some(generated),
        verify_result: Some(VerificationResult::default()),
        raw_log: Some(STUB_RAW_LOG.to_string()),
        error_message: None,
    }
}

/// Backend that answers every request with [`stub_translate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBackend;

#[async_trait]
impl TranslationBackend for StubBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResponse {
        stub_translate(request)
    }
}
