//! Translation contract shared by the mock backend and real backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// A request to translate `source_code` from one language to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(alias = "src_lang")]
    pub source_language: String,
    #[serde(alias = "dst_lang")]
    pub destination_language: String,
    #[serde(alias = "src_code")]
    pub source_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_context: Option<String>,
    #[serde(default, alias = "target_hw", skip_serializing_if = "Option::is_none")]
    pub target_hardware: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_spec: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_hints: Option<String>,
}

impl TranslationRequest {
    pub fn new(
        source_language: impl Into<String>,
        destination_language: impl Into<String>,
        source_code: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            destination_language: destination_language.into(),
            source_code: source_code.into(),
            file_context: None,
            target_hardware: None,
            io_spec: None,
            extra_hints: None,
        }
    }

    pub fn with_target_hardware(mut self, target_hardware: impl Into<String>) -> Self {
        self.target_hardware = Some(target_hardware.into());
        self
    }

    pub fn with_file_context(mut self, file_context: impl Into<String>) -> Self {
        self.file_context = Some(file_context.into());
        self
    }
}

/// Outcome of checking the translated code against the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(default = "default_functional_pass")]
    pub functional_pass: bool,
    #[serde(default, alias = "max_abs_diff", skip_serializing_if = "Option::is_none")]
    pub max_absolute_difference: Option<f64>,
    #[serde(default, alias = "perf_baseline_ms", skip_serializing_if = "Option::is_none")]
    pub performance_baseline_ms: Option<f64>,
    #[serde(default, alias = "perf_new_ms", skip_serializing_if = "Option::is_none")]
    pub performance_new_ms: Option<f64>,
}

fn default_functional_pass() -> bool {
    true
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self {
            functional_pass: default_functional_pass(),
            max_absolute_difference: None,
            performance_baseline_ms: None,
            performance_new_ms: None,
        }
    }
}

impl VerificationResult {
    /// Baseline time divided by new time, when both timings were measured
    pub fn speedup(&self) -> Option<f64> {
        match (self.performance_baseline_ms, self.performance_new_ms) {
            (Some(baseline), Some(new)) if new > 0.0 => Some(baseline / new),
            _ => None,
        }
    }

    /// One-line human readable summary, e.g. `Functional: PASS, max_abs_diff=0.001`
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Functional: {}",
            if self.functional_pass { "PASS" } else { "FAIL" }
        );

        if let Some(diff) = self.max_absolute_difference {
            summary.push_str(&format!(", max_abs_diff={}", diff));
        }

        if let (Some(baseline), Some(new)) = (self.performance_baseline_ms, self.performance_new_ms) {
            summary.push_str(&format!(", baseline={:.4} ms, new={:.4} ms", baseline, new));
            if let Some(speedup) = self.speedup() {
                summary.push_str(&format!(", speedup={:.2}x", speedup));
            }
        }

        summary
    }
}

/// Result of a translation, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_result: Option<VerificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TranslationResponse {
    /// Failure shape: no code, no verification, only the reason
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            generated_code: None,
            verify_result: None,
            raw_log: None,
            error_message: Some(error_message.into()),
        }
    }

    /// A response counts as successful when it carries generated code,
    /// whatever the status string says.
    pub fn is_success(&self) -> bool {
        self.generated_code.is_some()
    }

    pub fn failure_reason(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(self.error_message.clone().unwrap_or_else(|| {
            format!("Backend did not return generated_code (status={})", self.status)
        }))
    }
}

/// Anything that can answer a translation request.
///
/// Implementations report failures inside the response (`status = "error"`)
/// rather than through `Err`, so callers handle one shape.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Short name reported by the health endpoint
    fn name(&self) -> &str;

    async fn translate(&self, request: &TranslationRequest) -> TranslationResponse;
}
