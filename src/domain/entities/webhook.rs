use crate::domain::value_objects::ids::WebhookId;
use serde::Serialize;
use serde_json::Value;

/// Content lifecycle events a subscription can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    PostCreated,
    PostUpdated,
    PostDeleted,
    PostPublished,
}

impl WebhookEvent {
    pub const ALL: [WebhookEvent; 4] = [
        WebhookEvent::PostCreated,
        WebhookEvent::PostUpdated,
        WebhookEvent::PostDeleted,
        WebhookEvent::PostPublished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEvent::PostCreated => "post.created",
            WebhookEvent::PostUpdated => "post.updated",
            WebhookEvent::PostDeleted => "post.deleted",
            WebhookEvent::PostPublished => "post.published",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.as_str() == raw)
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored delivery target as the dispatcher sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: WebhookId,
    pub url: String,
    pub secret: Option<String>,
    pub events: Vec<String>,
    pub active: bool,
}

impl Subscription {
    /// Only active subscriptions whose event list names `event` receive it.
    pub fn wants(&self, event: WebhookEvent) -> bool {
        self.active && self.events.iter().any(|name| name == event.as_str())
    }

    /// The secret used for signing; an empty string counts as no secret.
    pub fn signing_secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|secret| !secret.is_empty())
    }
}

/// JSON body posted to every subscriber.
#[derive(Debug, Serialize)]
pub struct WebhookEnvelope<'a> {
    pub event: &'a str,
    pub data: &'a Value,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(events: &[&str], active: bool) -> Subscription {
        Subscription {
            id: WebhookId::new(),
            url: "https://hooks.example.com/a".to_string(),
            secret: None,
            events: events.iter().map(|e| e.to_string()).collect(),
            active,
        }
    }

    #[test]
    fn given_event_names_when_parsed_should_round_trip() {
        for event in WebhookEvent::ALL {
            assert_eq!(WebhookEvent::parse(event.as_str()), Some(event));
        }
        assert_eq!(WebhookEvent::parse("post.viewed"), None);
    }

    #[test]
    fn given_active_subscription_when_event_listed_should_want_it() {
        let sub = subscription(&["post.created"], true);
        assert!(sub.wants(WebhookEvent::PostCreated));
        assert!(!sub.wants(WebhookEvent::PostPublished));
    }

    #[test]
    fn given_inactive_subscription_when_event_listed_should_not_want_it() {
        let sub = subscription(&["post.created", "post.published"], false);
        for event in WebhookEvent::ALL {
            assert!(!sub.wants(event));
        }
    }

    #[test]
    fn given_empty_secret_when_signing_should_treat_as_unsigned() {
        let mut sub = subscription(&["post.created"], true);
        sub.secret = Some(String::new());
        assert_eq!(sub.signing_secret(), None);
        sub.secret = Some("s3cret".to_string());
        assert_eq!(sub.signing_secret(), Some("s3cret"));
    }

    #[test]
    fn given_envelope_when_serialized_should_keep_field_order() {
        let data = serde_json::json!({"slug": "hello"});
        let envelope = WebhookEnvelope {
            event: "post.created",
            data: &data,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        };
        let body = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            body,
            r#"{"event":"post.created","data":{"slug":"hello"},"timestamp":"2024-01-01T00:00:00Z"}"#
        );
    }
}
