use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, warn};

use chartcast_core::{
    CastHandler, ChannelToken, EventKind, HubResponse, SharedSecret, SubscriptionMode,
    SubscriptionNotice, SubscriptionRequest,
};

use crate::config::SubscriptionDefaults;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a hub's subscription endpoint.
///
/// Holds the hub URL, the invoking application's own callback URL, and the
/// handler that learns about acknowledged subscription changes.
pub struct SubscriptionClient {
    http: Client,
    hub_url: String,
    client_url: String,
    handler: Arc<dyn CastHandler>,
}

impl SubscriptionClient {
    pub fn new(
        hub_url: impl Into<String>,
        client_url: impl Into<String>,
        handler: Arc<dyn CastHandler>,
    ) -> Self {
        Self {
            http: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            hub_url: hub_url.into(),
            client_url: client_url.into(),
            handler,
        }
    }

    pub fn hub_url(&self) -> &str {
        &self.hub_url
    }

    pub fn client_url(&self) -> &str {
        &self.client_url
    }

    /// One synchronous round trip to the hub.
    ///
    /// Hub-level rejection and transport failure both come back as a
    /// [`HubResponse`]; this never returns an error. On a 2xx
    /// acknowledgment, exactly one of `on_subscribed` / `on_unsubscribed`
    /// fires with the normalized descriptor; on any failure neither does.
    #[instrument(skip(self, request), fields(topic = %request.topic, mode = %request.mode))]
    pub async fn submit(&self, request: &SubscriptionRequest) -> HubResponse {
        let response = match self.http.post(&self.hub_url).json(request).send().await {
            Ok(resp) => {
                let status = resp.status();
                HubResponse::received(status.as_u16(), status.canonical_reason().unwrap_or_default())
            }
            Err(e) => {
                warn!("subscription transport failure: {e}");
                HubResponse::network_error()
            }
        };

        if response.is_success() {
            debug!(status = response.status, "hub acknowledged");
            let notice = SubscriptionNotice {
                hub_url: self.hub_url.clone(),
                client_url: self.client_url.clone(),
                topic: request.topic.clone(),
                events: request.events.clone(),
            };
            match request.mode {
                SubscriptionMode::Subscribe => self.handler.on_subscribed(&notice),
                SubscriptionMode::Unsubscribe => self.handler.on_unsubscribed(&notice),
            }
        } else {
            debug!(status = response.status, text = %response.status_text, "hub did not acknowledge");
        }

        response
    }
}

/// User-editable field values behind one subscription form. The callback
/// URL and the mode are supplied at submit time, not edited here.
#[derive(Clone, Debug)]
pub struct SubscriptionFields {
    pub topic: String,
    pub events: Vec<EventKind>,
    pub secret: SharedSecret,
    pub lease: u32,
    pub channel_type: String,
    /// Generated fresh when the form is created.
    pub channel_endpoint: ChannelToken,
}

impl SubscriptionFields {
    pub fn from_defaults(defaults: &SubscriptionDefaults) -> Self {
        Self {
            topic: defaults.topic.clone(),
            events: defaults.events.clone(),
            secret: defaults.secret.clone(),
            lease: defaults.lease,
            channel_type: defaults.channel_type.clone(),
            channel_endpoint: ChannelToken::new(),
        }
    }
}

impl Default for SubscriptionFields {
    fn default() -> Self {
        Self::from_defaults(&SubscriptionDefaults::default())
    }
}

/// Where one form instance stands with respect to its newest attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitState {
    /// No attempt has been made yet.
    Idle,
    /// The newest attempt has not settled.
    Pending,
    /// The newest attempt settled.
    Settled { success: bool },
}

/// Data for the status alert under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub success: bool,
    pub text: String,
}

/// Drives the Idle → Pending → Settled lifecycle of one subscription form.
///
/// Every attempt is tagged with a monotonically increasing sequence number;
/// a settle carrying an older tag than one already applied is discarded, so
/// a slow stale response can never overwrite a newer result. The form stays
/// re-submittable forever.
#[derive(Debug)]
pub struct SubscriptionForm {
    pub fields: SubscriptionFields,
    next_seq: u64,
    settled_seq: u64,
    response: Option<HubResponse>,
}

impl SubscriptionForm {
    pub fn new(fields: SubscriptionFields) -> Self {
        Self {
            fields,
            next_seq: 1,
            settled_seq: 0,
            response: None,
        }
    }

    /// Build a request from the current field values plus the caller's
    /// callback URL and the chosen mode. Nothing is persisted.
    pub fn build_request(
        &self,
        mode: SubscriptionMode,
        callback: impl Into<String>,
    ) -> SubscriptionRequest {
        SubscriptionRequest {
            topic: self.fields.topic.clone(),
            events: self.fields.events.clone(),
            mode,
            callback: callback.into(),
            secret: self.fields.secret.clone(),
            lease: self.fields.lease,
            channel_type: self.fields.channel_type.clone(),
            channel_endpoint: self.fields.channel_endpoint.clone(),
        }
    }

    /// Start a new attempt and return its sequence tag.
    pub fn begin(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Record the result of attempt `seq`. Returns false, changing nothing,
    /// when the tag was never issued or an attempt at least as new already
    /// settled.
    pub fn settle(&mut self, seq: u64, response: HubResponse) -> bool {
        if seq >= self.next_seq || seq <= self.settled_seq {
            return false;
        }
        self.settled_seq = seq;
        self.response = Some(response);
        true
    }

    pub fn state(&self) -> SubmitState {
        if self.next_seq == 1 {
            SubmitState::Idle
        } else if self.settled_seq == self.next_seq - 1 {
            let success = self.response.as_ref().is_some_and(HubResponse::is_success);
            SubmitState::Settled { success }
        } else {
            SubmitState::Pending
        }
    }

    /// The newest applied response. While an attempt is pending this still
    /// shows the previous result, which is what the status line displays.
    pub fn response(&self) -> Option<&HubResponse> {
        self.response.as_ref()
    }

    /// Status alert data: nothing until the first settle.
    pub fn status_line(&self) -> Option<StatusLine> {
        self.response.as_ref().map(|resp| StatusLine {
            success: resp.is_success(),
            text: resp.status_text.clone(),
        })
    }

    /// Run one subscribe/unsubscribe action end to end: begin an attempt,
    /// submit it with the client's callback URL, settle with the result.
    ///
    /// Holding `&mut self` across the round trip keeps this path strictly
    /// sequential; callers that interleave attempts use `begin`/`settle`
    /// with `SubscriptionClient::submit` directly.
    pub async fn run(&mut self, client: &SubscriptionClient, mode: SubscriptionMode) -> HubResponse {
        let request = self.build_request(mode, client.client_url());
        let seq = self.begin();
        let response = client.submit(&request).await;
        self.settle(seq, response.clone());
        response
    }
}
