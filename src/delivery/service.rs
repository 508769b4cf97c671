//! Dual-mode delivery of the configured content.
//!
//! # Modes
//! - Active (`passiveMode = false`): pull only, served by [`DeliveryService::retrieve`]
//! - Passive (`passiveMode = true`): push armed, served by
//!   [`DeliveryService::on_data_request`] for each `client/data` event
//!
//! The `client/data` listener is registered in both modes so a push in
//! active mode reaches the service and is suppressed like any other
//! mismatched channel.
//!
//! # Suppression
//! ```text
//!                 pull (get)      push (client/data)
//! active          content         null marker
//! passive         null marker     content
//! ```
//! A channel that does not match the configured mode answers with
//! `{type: "null", content: "null"}`, never an error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ClientConfig, Content};
use crate::delivery::data::{Data, NULL_CONTENT};
use crate::delivery::provider::DataProvider;
use crate::host::EventBus;
use crate::observability::metrics;

/// Registry name of the client component.
pub const SERVICE_NAME: &str = "client";

/// Push event the frontend emits to request data.
pub const DATA_EVENT: &str = "client/data";

/// Delivery protocol, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Active,
    Passive,
}

/// The path a delivery went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Pull,
    Push,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Pull => "pull",
            Channel::Push => "push",
        }
    }

    fn serves(&self, mode: DeliveryMode) -> bool {
        matches!(
            (self, mode),
            (Channel::Pull, DeliveryMode::Active) | (Channel::Push, DeliveryMode::Passive)
        )
    }
}

/// Holds one validated config and serves it through both channels.
#[derive(Debug)]
pub struct DeliveryService {
    config: ClientConfig,
}

impl DeliveryService {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn mode(&self) -> DeliveryMode {
        if self.config.passive_mode {
            DeliveryMode::Passive
        } else {
            DeliveryMode::Active
        }
    }

    /// Map the config to its payload, ignoring the mode.
    pub fn payload(&self) -> Data {
        let self_id = self.config.self_id.clone();
        let data_type = self.config.inject_type();

        let content = match &self.config.content {
            Content::Button { alert_text } => alert_text.clone(),
            Content::Text { show_text } => show_text.clone(),
            Content::Html { content } => content.clone(),
            Content::Iframe { show_url } => show_url.clone(),
            Content::Markdown { content } => content.clone(),
            Content::Null => NULL_CONTENT.to_string(),
        };

        Data {
            self_id,
            data_type,
            content,
        }
    }

    /// Pull path.
    pub fn retrieve(&self) -> Data {
        self.deliver(Channel::Pull)
    }

    /// Push handler for [`DATA_EVENT`].
    pub fn on_data_request(&self) -> Data {
        self.deliver(Channel::Push)
    }

    fn deliver(&self, channel: Channel) -> Data {
        let suppressed = !channel.serves(self.mode());
        let data = if suppressed {
            Data::suppressed(self.config.self_id.as_str())
        } else {
            self.payload()
        };

        tracing::debug!(
            self_id = %data.self_id,
            channel = channel.as_str(),
            data_type = %data.data_type,
            suppressed,
            "Delivering data"
        );
        metrics::record_delivery(channel, data.data_type, suppressed);

        data
    }
}

#[async_trait]
impl DataProvider for DeliveryService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn get(&self) -> Data {
        self.retrieve()
    }

    fn register_events(self: Arc<Self>, bus: &EventBus) {
        let service = Arc::clone(&self);
        bus.add_listener(DATA_EVENT, move || service.on_data_request());
        match self.mode() {
            DeliveryMode::Passive => {
                tracing::info!(self_id = %self.config.self_id, event = DATA_EVENT, "Push channel armed")
            }
            DeliveryMode::Active => {
                tracing::debug!(
                    self_id = %self.config.self_id,
                    event = DATA_EVENT,
                    "Push listener registered, suppressed in active mode"
                )
            }
        }
    }

    fn unregister_events(&self, bus: &EventBus) {
        if bus.remove_listener(DATA_EVENT) {
            tracing::info!(self_id = %self.config.self_id, event = DATA_EVENT, "Push channel disarmed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate, InjectType};
    use crate::delivery::data::DataType;
    use serde_json::json;

    fn service(raw: serde_json::Value) -> DeliveryService {
        DeliveryService::new(validate(&raw).unwrap())
    }

    #[tokio::test]
    async fn test_active_text_pull() {
        let svc = service(json!({
            "selfId": "bot1",
            "passiveMode": false,
            "injectType": "text",
            "showText": "hello",
        }));

        let data = svc.get().await;
        assert_eq!(
            data,
            Data { self_id: "bot1".into(), data_type: DataType::Text, content: "hello".into() }
        );
    }

    #[tokio::test]
    async fn test_passive_iframe() {
        let svc = service(json!({
            "selfId": "bot1",
            "passiveMode": true,
            "injectType": "iframe",
            "showUrl": "https://x.test",
        }));

        assert_eq!(svc.get().await, Data::suppressed("bot1"));
        assert_eq!(
            svc.on_data_request(),
            Data { self_id: "bot1".into(), data_type: DataType::Iframe, content: "https://x.test".into() }
        );
    }

    #[test]
    fn test_active_push_is_suppressed() {
        let svc = service(json!({ "selfId": "b", "injectType": "html", "content": "<p>x</p>" }));
        assert_eq!(svc.mode(), DeliveryMode::Active);
        assert_eq!(svc.on_data_request(), Data::suppressed("b"));
        assert_eq!(svc.retrieve().content, "<p>x</p>");
    }

    #[test]
    fn test_channels_agree_on_payload() {
        for tag in InjectType::ALL {
            let active = service(json!({ "selfId": "s", "injectType": tag.as_str() }));
            let passive = service(json!({ "selfId": "s", "passiveMode": true, "injectType": tag.as_str() }));

            let pulled = active.retrieve();
            let pushed = passive.on_data_request();
            assert_eq!(pulled, pushed);
            assert_eq!(pulled.data_type, tag);
            assert_eq!(pulled.content, active.config().content.value().unwrap_or(NULL_CONTENT));
        }
    }

    #[test]
    fn test_null_tag_maps_to_null_literal() {
        let svc = service(json!({ "selfId": "n", "injectType": "null" }));
        assert_eq!(svc.retrieve(), Data::suppressed("n"));
    }

    #[test]
    fn test_repeated_delivery_is_identical() {
        let svc = service(json!({ "selfId": "m", "passiveMode": true, "injectType": "markdown" }));
        let first = serde_json::to_vec(&svc.on_data_request()).unwrap();
        for _ in 0..5 {
            assert_eq!(serde_json::to_vec(&svc.on_data_request()).unwrap(), first);
        }
    }

    #[test]
    fn test_register_events_in_both_modes() {
        let bus = EventBus::new();

        let active = Arc::new(service(json!({ "selfId": "a", "injectType": "text" })));
        Arc::clone(&active).register_events(&bus);
        assert_eq!(bus.emit(DATA_EVENT), Some(Data::suppressed("a")));

        let passive = Arc::new(service(json!({ "selfId": "p", "passiveMode": true, "injectType": "button" })));
        Arc::clone(&passive).register_events(&bus);
        let data = bus.emit(DATA_EVENT).unwrap();
        assert_eq!(data.data_type, DataType::Button);

        passive.unregister_events(&bus);
        assert!(bus.emit(DATA_EVENT).is_none());
    }
}
