// HTTP client utilities
use crate::domain::error::AskError;
use crate::infrastructure::config::LlmConfig;
use reqwest::Client;

/// Create the shared HTTP client
///
/// The request timeout is the only deadline on a language-model call.
pub fn create_client(llm: &LlmConfig) -> Result<Client, AskError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(llm.timeout_secs))
        .user_agent(concat!("vidask/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
