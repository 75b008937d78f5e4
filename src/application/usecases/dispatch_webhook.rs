// Use case: dispatch_webhook.

use crate::application::context::AppContext;
use crate::domain::entities::webhook::{Subscription, WebhookEnvelope, WebhookEvent};
use crate::domain::services::webhook_signature;
use crate::domain::value_objects::timestamps::Timestamp;
use crate::infrastructure::db::dto::WebhookDeliveryRow;
use metrics::counter;
use serde_json::Value;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Fans a domain event out to every matching subscription and waits for all of them.
pub struct DispatchWebhookUseCase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub webhook_id: uuid::Uuid,
    pub url: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub event: WebhookEvent,
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DispatchReport {
    fn empty(event: WebhookEvent) -> Self {
        Self {
            event,
            attempted: 0,
            delivered: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }
}

struct Delivery {
    subscription: Subscription,
    body: Vec<u8>,
    signature: Option<String>,
    timeout: Option<Duration>,
}

impl DispatchWebhookUseCase {
    /// Deliver `event` with `data` to all active subscribers of that event.
    ///
    /// Never fails: lookup problems yield an empty report and each delivery
    /// failure is recorded in its own outcome.
    pub async fn execute(ctx: &AppContext, event: WebhookEvent, data: Value) -> DispatchReport {
        // Step 1: Load active subscriptions.
        let rows = match ctx.repos.webhook.list_active().await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(event = event.as_str(), error = %err, "webhook_subscriptions_unavailable");
                return DispatchReport::empty(event);
            }
        };

        // Step 2: Keep the ones subscribed to this event.
        let targets: Vec<Subscription> = rows
            .into_iter()
            .map(|row| row.into_subscription())
            .filter(|sub| sub.wants(event))
            .collect();
        if targets.is_empty() {
            return DispatchReport::empty(event);
        }

        // Step 3: Serialize the envelope once; the same bytes are signed and sent.
        let envelope = WebhookEnvelope {
            event: event.as_str(),
            data: &data,
            timestamp: Timestamp::now_utc().to_rfc3339(),
        };
        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(err) => {
                warn!(event = event.as_str(), error = %err, "webhook_envelope_invalid");
                return DispatchReport::empty(event);
            }
        };

        // Step 4: Deliver to every target concurrently.
        let timeout = ctx
            .settings
            .webhooks
            .request_timeout_ms
            .map(Duration::from_millis);
        let mut handles = Vec::with_capacity(targets.len());
        for subscription in targets {
            let signature = subscription
                .signing_secret()
                .map(|secret| webhook_signature::sign(secret, &body));
            let delivery = Delivery {
                subscription,
                body: body.clone(),
                signature,
                timeout,
            };
            let webhook_id = delivery.subscription.id.0;
            let url = delivery.subscription.url.clone();
            let client = ctx.http.clone();
            let handle = tokio::spawn(async move { Self::deliver_one(&client, delivery).await });
            handles.push((webhook_id, url, handle));
        }

        // Step 5: Wait for every delivery to settle.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (webhook_id, url, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => DeliveryOutcome {
                    webhook_id,
                    url,
                    success: false,
                    status_code: None,
                    error: Some(format!("delivery task failed: {err}")),
                },
            };
            outcomes.push(outcome);
        }

        // Step 6: Log, count, and record each outcome.
        let attempted_at = OffsetDateTime::now_utc();
        for outcome in &outcomes {
            Self::record(ctx, event, outcome, attempted_at).await;
        }

        // Step 7: Summarize.
        let delivered = outcomes.iter().filter(|o| o.success).count();
        DispatchReport {
            event,
            attempted: outcomes.len(),
            delivered,
            failed: outcomes.len() - delivered,
            outcomes,
        }
    }

    async fn deliver_one(client: &reqwest::Client, delivery: Delivery) -> DeliveryOutcome {
        let Delivery {
            subscription,
            body,
            signature,
            timeout,
        } = delivery;

        let mut request = client
            .post(&subscription.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        if let (Some(secret), Some(signature)) = (subscription.signing_secret(), signature) {
            request = request
                .header("X-Webhook-Secret", secret)
                .header("X-Webhook-Signature", signature);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => DeliveryOutcome {
                webhook_id: subscription.id.0,
                url: subscription.url,
                success: true,
                status_code: Some(resp.status().as_u16()),
                error: None,
            },
            Ok(resp) => DeliveryOutcome {
                webhook_id: subscription.id.0,
                url: subscription.url,
                success: false,
                status_code: Some(resp.status().as_u16()),
                error: Some(format!("unexpected status {}", resp.status().as_u16())),
            },
            Err(err) => DeliveryOutcome {
                webhook_id: subscription.id.0,
                url: subscription.url,
                success: false,
                status_code: None,
                error: Some(err.to_string()),
            },
        }
    }

    async fn record(
        ctx: &AppContext,
        event: WebhookEvent,
        outcome: &DeliveryOutcome,
        attempted_at: OffsetDateTime,
    ) {
        let label = if outcome.success { "delivered" } else { "failed" };
        counter!("webhook_deliveries_total", "event" => event.as_str(), "outcome" => label)
            .increment(1);
        if outcome.success {
            info!(
                event = event.as_str(),
                webhook_id = %outcome.webhook_id,
                url = %outcome.url,
                status = outcome.status_code,
                "webhook_delivered"
            );
        } else {
            warn!(
                event = event.as_str(),
                webhook_id = %outcome.webhook_id,
                url = %outcome.url,
                status = outcome.status_code,
                error = outcome.error.as_deref().unwrap_or(""),
                "webhook_delivery_failed"
            );
        }

        let row = WebhookDeliveryRow {
            id: uuid::Uuid::new_v4(),
            webhook_id: outcome.webhook_id,
            event_name: event.as_str().to_string(),
            success: outcome.success,
            response_status: outcome.status_code.map(i32::from),
            error: outcome.error.clone(),
            created_at: attempted_at,
        };
        if let Err(err) = ctx.repos.webhook_delivery.insert(&row).await {
            warn!(webhook_id = %outcome.webhook_id, error = %err, "webhook_delivery_not_recorded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DispatchWebhookUseCase;
    use crate::application::context::test_support::{
        seed_webhook, test_context, unavailable_context,
    };
    use crate::domain::entities::webhook::WebhookEvent;
    use serde_json::json;

    #[tokio::test]
    async fn given_no_subscriptions_when_dispatch_should_return_empty_report() {
        let ctx = test_context();

        let report =
            DispatchWebhookUseCase::execute(&ctx, WebhookEvent::PostCreated, json!({"id": 1})).await;

        assert_eq!(report.attempted, 0);
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn given_only_other_event_subscribers_when_dispatch_should_not_attempt() {
        let ctx = test_context();
        seed_webhook(&ctx, "http://127.0.0.1:1/hook", None, &["post.deleted"], true).await;
        seed_webhook(&ctx, "http://127.0.0.1:1/hook", None, &["post.created"], false).await;

        let report =
            DispatchWebhookUseCase::execute(&ctx, WebhookEvent::PostCreated, json!({})).await;

        assert_eq!(report.attempted, 0);
    }

    #[tokio::test]
    async fn given_unavailable_store_when_dispatch_should_not_fail() {
        let ctx = unavailable_context();

        let report =
            DispatchWebhookUseCase::execute(&ctx, WebhookEvent::PostDeleted, json!({})).await;

        assert_eq!(report.attempted, 0);
        assert_eq!(report.event, WebhookEvent::PostDeleted);
    }

    #[tokio::test]
    async fn given_unreachable_target_when_dispatch_should_record_failed_outcome() {
        let ctx = test_context();
        let hook =
            seed_webhook(&ctx, "http://127.0.0.1:1/hook", Some("s"), &["post.updated"], true).await;

        let report =
            DispatchWebhookUseCase::execute(&ctx, WebhookEvent::PostUpdated, json!({})).await;

        assert_eq!(report.attempted, 1);
        assert_eq!(report.failed, 1);
        assert!(report.outcomes[0].error.is_some());
        assert_eq!(report.outcomes[0].status_code, None);

        let recorded = ctx
            .repos
            .webhook_delivery
            .list_by_webhook(hook.id, 10)
            .await
            .unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(!recorded[0].success);
        assert_eq!(recorded[0].event_name, "post.updated");
    }
}
