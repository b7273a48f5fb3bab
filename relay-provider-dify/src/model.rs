//! Fixed capability descriptor.
//!
//! Model selection happens inside the Dify app configuration, so the
//! adapter reports one constant descriptor. Usage is billed by the Dify
//! deployment, not per token here.

use relay_types::{ModelDescriptor, ModelInfo};
use rust_decimal::Decimal;

/// Identifier reported for every Dify app.
pub const MODEL_ID: &str = "dify-chat";

/// The constant capability record.
pub fn model_info() -> ModelInfo {
    ModelInfo {
        max_tokens: 8192,
        context_window: 128_000,
        supports_images: true,
        supports_prompt_cache: false,
        input_price: Decimal::ZERO,
        output_price: Decimal::ZERO,
    }
}

/// The descriptor returned by [`crate::Dify`]'s `Provider::model`.
pub fn model_descriptor() -> ModelDescriptor {
    ModelDescriptor {
        id: MODEL_ID.to_string(),
        info: model_info(),
    }
}
