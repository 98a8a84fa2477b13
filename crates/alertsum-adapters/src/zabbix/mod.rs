mod models;
mod rpc;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use alertsum_core::ids::{EventId, TriggerId};
use alertsum_core::inventory::{AlertRecord, Event, HostGroup, MediaChannel, TriggerCondition};
use alertsum_ports::error::MonitoringError;
use alertsum_ports::outbound::MonitoringClient;
use alertsum_ports::types::EventQuery;

use models::{AlertRow, EventRow, HostGroupRow, MediaTypeRow, TriggerRow};
use rpc::{RpcRequest, JSONRPC_VERSION};

use rpc::ApiVersion;

const API_PATH: &str = "api_jsonrpc.php";

// Bearer header auth from 6.4; the `auth` body field is gone in 7.2.
const HEADER_AUTH_SINCE: ApiVersion = ApiVersion::new(6, 4);
// `user.login` takes `username` instead of `user` from 5.4.
const USERNAME_PARAM_SINCE: ApiVersion = ApiVersion::new(5, 4);

#[derive(Debug, Clone)]
pub struct ZabbixConfig {
    /// Host, host:port or full URL of the frontend.
    pub address: String,
    pub timeout: Duration,
}

/// JSON-RPC client for the Zabbix API.
///
/// Lifecycle: [`ZabbixClient::new`], then [`ZabbixClient::login`], then
/// queries through [`MonitoringClient`], then [`ZabbixClient::logout`].
pub struct ZabbixClient {
    client: Client,
    endpoint: String,
    version: Option<ApiVersion>,
    token: Option<String>,
    next_id: AtomicU64,
}

impl ZabbixClient {
    pub fn new(config: &ZabbixConfig) -> Result<Self, MonitoringError> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MonitoringError::upstream("client", e))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(&config.address),
            version: None,
            token: None,
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn api_version(&self) -> Result<String, MonitoringError> {
        self.call("apiinfo.version", json!({}), None).await
    }

    pub async fn login(&mut self, user: &str, password: &str) -> Result<(), MonitoringError> {
        let raw_version = self
            .api_version()
            .await
            .map_err(|e| MonitoringError::Authentication(e.to_string()))?;
        self.version = ApiVersion::parse(&raw_version);

        let user_key = match self.version {
            Some(v) if v < USERNAME_PARAM_SINCE => "user",
            _ => "username",
        };
        let mut params = json!({ "password": password });
        params[user_key] = json!(user);

        let token: String = self
            .call("user.login", params, None)
            .await
            .map_err(|e| match e {
                MonitoringError::UpstreamQuery { reason, .. } => {
                    MonitoringError::Authentication(reason)
                }
                other => other,
            })?;
        self.token = Some(token);

        tracing::info!(
            endpoint = %self.endpoint,
            version = %raw_version,
            "connected to Zabbix API"
        );
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), MonitoringError> {
        let Some(token) = self.token.clone() else {
            return Ok(());
        };
        let _: bool = self.call("user.logout", json!([]), Some(token.as_str())).await?;
        self.token = None;
        tracing::debug!(endpoint = %self.endpoint, "logged out of Zabbix API");
        Ok(())
    }

    async fn query<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<R, MonitoringError> {
        let token = self.token.as_deref().ok_or(MonitoringError::NotAuthenticated)?;
        self.call(method, params, Some(token)).await
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
        token: Option<&str>,
    ) -> Result<R, MonitoringError> {
        let header_auth = matches!(self.version, Some(v) if v >= HEADER_AUTH_SINCE);
        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            auth: if header_auth { None } else { token },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let (true, Some(token)) = (header_auth, token) {
            builder = builder.bearer_auth(token);
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| MonitoringError::upstream(method, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MonitoringError::upstream(method, e))?;

        tracing::debug!(
            method,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "zabbix call"
        );

        if !status.is_success() {
            return Err(MonitoringError::upstream(
                method,
                format!("http status={status}, body={}", truncate(&body, 200)),
            ));
        }
        rpc::decode(method, &body)
    }
}

#[async_trait]
impl MonitoringClient for ZabbixClient {
    async fn host_groups(&self) -> Result<Vec<HostGroup>, MonitoringError> {
        let rows: Vec<HostGroupRow> = self
            .query("hostgroup.get", models::host_group_params(self.version))
            .await?;
        rows.into_iter().map(HostGroup::try_from).collect()
    }

    async fn media_types(&self) -> Result<Vec<MediaChannel>, MonitoringError> {
        let rows: Vec<MediaTypeRow> = self
            .query("mediatype.get", models::media_type_params())
            .await?;
        rows.into_iter().map(MediaChannel::try_from).collect()
    }

    async fn events(&self, query: &EventQuery) -> Result<Vec<Event>, MonitoringError> {
        let rows: Vec<EventRow> = self
            .query("event.get", models::event_params(query))
            .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    async fn alerts(&self, event_ids: &[EventId]) -> Result<Vec<AlertRecord>, MonitoringError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<AlertRow> = self
            .query("alert.get", models::alert_params(event_ids))
            .await?;
        rows.into_iter().map(AlertRecord::try_from).collect()
    }

    async fn triggers(
        &self,
        trigger_ids: &[TriggerId],
    ) -> Result<Vec<TriggerCondition>, MonitoringError> {
        if trigger_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<TriggerRow> = self
            .query("trigger.get", models::trigger_params(trigger_ids))
            .await?;
        rows.into_iter().map(TriggerCondition::try_from).collect()
    }
}

/// `zabbix.example.com` -> `http://zabbix.example.com/api_jsonrpc.php`.
pub fn endpoint_url(address: &str) -> String {
    let address = address.trim();
    let with_scheme = if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };
    if with_scheme.ends_with(API_PATH) {
        return with_scheme;
    }
    format!("{}/{API_PATH}", with_scheme.trim_end_matches('/'))
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
