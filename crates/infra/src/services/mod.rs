use crate::config::Config;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The external messaging channel. One call per benefit record per run, no
/// retries inside a single attempt; the dispatch pipeline's ledger decides
/// whether an attempt happens at all.
#[async_trait::async_trait]
pub trait IMessageSender: Send + Sync {
    async fn send(&self, phone: &str, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
struct OutboundMessageBody<'a> {
    phone: &'a str,
    text: &'a str,
}

/// Delivers messages by POSTing them to the configured message gateway.
pub struct WebhookMessageSender {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl WebhookMessageSender {
    pub fn new(url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl IMessageSender for WebhookMessageSender {
    async fn send(&self, phone: &str, text: &str) -> anyhow::Result<()> {
        let mut req = self
            .client
            .post(&self.url)
            .json(&OutboundMessageBody { phone, text });
        if let Some(api_key) = &self.api_key {
            req = req.header("fidelo-gateway-key", api_key);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            anyhow::bail!("Message gateway returned status: {}", res.status());
        }
        Ok(())
    }
}

/// Sender used when no gateway is configured. Messages are logged and
/// recorded as sent, which keeps local runs from failing every record.
pub struct LogOnlyMessageSender {}

#[async_trait::async_trait]
impl IMessageSender for LogOnlyMessageSender {
    async fn send(&self, phone: &str, _text: &str) -> anyhow::Result<()> {
        info!("No message gateway configured, dropping message to {}", phone);
        Ok(())
    }
}

pub fn create_message_sender(config: &Config) -> Arc<dyn IMessageSender> {
    match &config.message_gateway_url {
        Some(url) => Arc::new(WebhookMessageSender::new(
            url.clone(),
            config.message_gateway_api_key.clone(),
        )),
        None => Arc::new(LogOnlyMessageSender {}),
    }
}
