// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Structured trace events. The payload is any expression accepted by `serde_json::json!`.
//!
//! ```
//! # use hmove_logging::hmove_trace;
//! hmove_trace!("token.transfer", { "amount": "12.5" });
//! ```

pub use serde_json;
pub use tracing;

/// Emits a `trace` level event tagged with `evt`, carrying `params` as JSON
#[macro_export]
macro_rules! hmove_trace {
    ($evt:expr, $params:tt) => {
        $crate::tracing::trace!(
            "hmove_trace:{}:{}",
            $evt,
            $crate::serde_json::json!($params)
        );
    };
}
