use crate::application::translate::SqlTranslator;
use crate::domain::error::AskError;
use crate::domain::traits::Translator;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::OpenAiClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::cache::AnswerCache;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn Translator>,
    pub cache: Option<Arc<AnswerCache>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AskError> {
        let http_client = create_client(&config.llm)?;
        let model = OpenAiClient::new(http_client, config.llm.clone());
        Ok(Self::with_translator(config, Arc::new(SqlTranslator::new(model))))
    }

    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        let cache = config
            .cache
            .enable
            .then(|| Arc::new(AnswerCache::new(Duration::from_secs(config.cache.ttl_secs))));

        Self {
            translator,
            cache,
            config: Arc::new(config),
        }
    }
}
