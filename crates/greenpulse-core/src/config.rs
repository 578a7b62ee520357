// ── Runtime configuration for the monitor ──

use std::time::Duration;

use greenpulse_api::transport::DEFAULT_TIMEOUT;
use indexmap::IndexMap;
use secrecy::SecretString;
use url::Url;

use crate::seed;
use crate::store::DEFAULT_ALERT_CAPACITY;

pub use greenpulse_api::vision::client::DEFAULT_ENDPOINT as DEFAULT_VISION_ENDPOINT;

/// Everything [`LiveMonitor::from_config`](crate::LiveMonitor::from_config) needs to
/// build the live clients and stores.
///
/// Produced by `greenpulse-config` from the layered user configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Provider root; `/v1/images:annotate` is appended per request.
    pub vision_endpoint: Url,
    pub vision_api_key: SecretString,
    pub vision_timeout: Duration,
    pub image_timeout: Duration,
    /// Room code to static reference image.
    pub room_images: IndexMap<String, Url>,
    /// Warm the image cache in the background on start.
    pub preload_images: bool,
    /// Maximum alerts retained.
    pub alert_capacity: usize,
}

impl MonitorConfig {
    /// Defaults for everything except the credential.
    pub fn new(vision_api_key: SecretString) -> Result<Self, url::ParseError> {
        Ok(Self {
            vision_endpoint: Url::parse(DEFAULT_VISION_ENDPOINT)?,
            vision_api_key,
            vision_timeout: DEFAULT_TIMEOUT,
            image_timeout: DEFAULT_TIMEOUT,
            room_images: seed::default_room_images(),
            preload_images: true,
            alert_capacity: DEFAULT_ALERT_CAPACITY,
        })
    }
}
