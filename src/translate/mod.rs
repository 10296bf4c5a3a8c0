pub mod interface;
pub mod stub;

pub use interface::{
    TranslationBackend, TranslationRequest, TranslationResponse, VerificationResult,
};
pub use stub::{stub_translate, StubBackend};
