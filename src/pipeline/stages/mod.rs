//! Built-in pipeline stages
//!
//! The standard chain is:
//! 1. InputStage - Input validation and parsing
//! 2. TransformStage - Data transformation and enrichment
//! 3. OutputStage - Output formatting and delivery
//!
//! All three pass data through unchanged; shape-specific work lives in the
//! adapters. `FnStage` wraps a closure for custom steps.

pub mod function;
pub mod passthrough;

// Re-export stages
pub use function::FnStage;
pub use passthrough::{InputStage, OutputStage, TransformStage};

use super::stage_list::StageList;
use std::sync::Arc;

/// A fresh list holding Input → Transform → Output
pub fn standard_stages() -> StageList {
    let stages = StageList::new();
    stages.push(Arc::new(InputStage));
    stages.push(Arc::new(TransformStage));
    stages.push(Arc::new(OutputStage));
    stages
}
