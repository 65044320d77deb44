//! Chat assistant: intent detection, product matching, and streamed replies.
//!
//! The flow for one turn:
//!
//! 1. Semantic search over product documents supplies menu context.
//! 2. The provider classifies intent with a JSON-schema-constrained call;
//!    on any failure the keyword classifier takes over.
//! 3. Per-intent work runs (product match, product listing, FAQ scoring,
//!    cart mutation) and is emitted as typed SSE events.
//! 4. The provider's streamed completion is relayed as content deltas,
//!    ending with a `[DONE]` frame.
//!
//! The provider is OpenRouter's OpenAI-compatible chat-completions API. A
//! per-request API key in the payload overrides the configured key for that
//! request only; there is no process-global key state.

pub mod client;
pub mod intent;
pub mod matcher;
pub mod prompt;
pub mod service;
pub mod types;

pub use client::{ChatClient, ChatError};
pub use intent::{Intent, fallback_intent};
pub use matcher::{ScoredFaq, find_mentioned_product, score_faqs};
pub use service::{ChatService, TurnPlan};
pub use types::{ChatEvent, HistoryTurn, IntentAnalysis, ProductCard};
