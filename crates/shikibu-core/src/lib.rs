//! shikibu-core: writing workspace core library.
//!
//! Holds everything the gateway and the desktop surface share: the
//! application config, the chat/document types, the provider HTTP clients,
//! the composer (generate/learn dispatch with the fallback policy), the
//! canned fallback text, and the app-local saved-output store.

mod composer;
mod credentials;
mod fallback;
mod outputs;
mod providers;
mod shared;

pub use composer::{
    Composer, ComposerError, Reply, GENERATE_MODEL, GENERATE_SYSTEM, LEARN_MODEL,
    LEARN_PROMPT_HEADER, MAX_TOKENS, TEMPERATURE,
};
pub use credentials::{ProviderCredentials, ENV_ANTHROPIC_API_KEY, ENV_OPENAI_API_KEY};
pub use fallback::{
    chat_reply, generate_reply, generate_set, CHAT_REPLIES, GENERATE_NOTE, GREETING,
    LEARN_FALLBACK, LEARN_NOTE,
};
pub use outputs::{OutputStore, OutputStoreError, OUTPUTS_KEY};
pub use providers::{AnthropicClient, OpenAiClient, ProviderError};
pub use shared::{CoreConfig, Message, Role, SavedDocument, DOC_TYPE_GENERAL, UNTITLED};
