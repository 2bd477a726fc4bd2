//! Clients for the third-party providers behind the gateway.

pub mod form_relay;
pub mod media;
pub mod text;

pub use form_relay::FormRelayClient;
pub use media::{MediaClient, MediaKind, MediaRequest};
pub use text::{CompletionRequest, HttpTextProvider, TextCompletion};
