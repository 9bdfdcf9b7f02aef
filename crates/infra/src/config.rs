use chrono::FixedOffset;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Fixed UTC offset in which all tenants are assumed to live. The
    /// schedule-window check of the reminder pipeline compares against
    /// wall-clock time in this offset.
    pub utc_offset: FixedOffset,
    /// Endpoint of the external message gateway. When absent, outbound
    /// messages are logged and dropped, which is useful for local runs.
    pub message_gateway_url: Option<String>,
    /// API key sent to the message gateway with every delivery.
    pub message_gateway_api_key: Option<String>,
}

const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let offset_hours = match std::env::var("TENANT_UTC_OFFSET_HOURS") {
            Ok(raw) => match raw.parse::<i32>() {
                Ok(hours) if (-12..=14).contains(&hours) => hours,
                _ => {
                    warn!(
                        "The given TENANT_UTC_OFFSET_HOURS: {} is not a valid offset, falling back to {}.",
                        raw, DEFAULT_UTC_OFFSET_HOURS
                    );
                    DEFAULT_UTC_OFFSET_HOURS
                }
            },
            Err(_) => DEFAULT_UTC_OFFSET_HOURS,
        };
        let utc_offset = FixedOffset::east_opt(offset_hours * 3600)
            .expect("Validated utc offset to be in range");

        let message_gateway_url = std::env::var("MESSAGE_GATEWAY_URL").ok();
        if message_gateway_url.is_none() {
            info!("Did not find MESSAGE_GATEWAY_URL environment variable. Outbound messages will only be logged.");
        }
        let message_gateway_api_key = std::env::var("MESSAGE_GATEWAY_API_KEY").ok();

        Self {
            port,
            utc_offset,
            message_gateway_url,
            message_gateway_api_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
