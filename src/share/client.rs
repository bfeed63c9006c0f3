use super::query::{
    EmailVariables, IdVariables, NoVariables, Operation, RecordVariables, Request, Response,
    VaccineRecordList, ADD_RECORD, INTROSPECT, LIST_VACCINE_RECORD, REMOVE_RECORD,
    UPDATE_VACCINE_RECORD, WRITE_ATTACHMENT,
};
use super::{AttachmentInput, MutationResult, RecordLookup, Schema, ShareBackend};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::vaccine::VaccineRecord;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::OnceCell;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-api-key";
const BACKOFF_BASE_MILLIS: u64 = 100;
const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// GraphQL client for one Share node. Build once per process and reuse it:
/// the schema is fetched on first use and kept for the client's lifetime.
#[derive(Debug)]
pub struct ShareClient {
    http: reqwest::Client,
    url: String,
    retries: u32,
    schema: OnceCell<Schema>,
}

impl ShareClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.share_node_api_key())
            .map_err(|err| Error::Config(format!("Invalid Share node API key: {err}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs())
            .build()?;

        Ok(Self {
            http,
            url: config.share_node_url().to_string(),
            retries: config.retries(),
            schema: OnceCell::new(),
        })
    }

    pub async fn schema(&self) -> Result<&Schema> {
        self.schema
            .get_or_try_init(|| async {
                info!("Fetching schema from {}", self.url);
                let data = self.post(&INTROSPECT, &NoVariables {}).await?;
                Schema::from_introspection(take_field(data, INTROSPECT.field)?)
            })
            .await
    }

    async fn execute<V, T>(&self, op: &Operation, variables: &V) -> Result<T>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.schema().await?.ensure(op)?;
        let data = self.post(op, variables).await?;
        debug!("{} returned {data}", op.name);
        take_field(data, op.field)
    }

    async fn post<V>(&self, op: &Operation, variables: &V) -> Result<serde_json::Value>
    where
        V: Serialize + Sync,
    {
        let body = Request {
            query: op.document,
            operation_name: op.name,
            variables,
        };

        let response = self.send(&body).await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Response>(&text) {
            Ok(response) => into_data(response),
            Err(err) if status.is_success() => Err(Error::Graphql(format!(
                "Invalid response to `{}`: {err}",
                op.name
            ))),
            Err(_) => Err(Error::Graphql(format!(
                "`{}` failed with {status}: {text}",
                op.name
            ))),
        }
    }

    async fn send<B>(&self, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + Sync,
    {
        let mut attempt: u32 = 0;

        loop {
            let result = self.http.post(&self.url).json(body).send().await;

            let retryable = match &result {
                Ok(response) => RETRY_STATUSES.contains(&response.status()),
                Err(err) => err.is_connect() || err.is_timeout(),
            };

            if !retryable || attempt >= self.retries {
                return result.map_err(Error::from);
            }

            attempt += 1;
            let delay = backoff(attempt);
            match &result {
                Ok(response) => warn!(
                    "Share node answered {}; retry {attempt}/{} in {delay:?}",
                    response.status(),
                    self.retries
                ),
                Err(err) => warn!("{err}; retry {attempt}/{} in {delay:?}", self.retries),
            }
            sleep(delay).await;
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_BASE_MILLIS << attempt.saturating_sub(1).min(10))
}

fn into_data(response: Response) -> Result<serde_json::Value> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(Error::Graphql(messages.join("; ")));
    }

    response
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| Error::Graphql("Response has no `data`".into()))
}

fn take_field<T: DeserializeOwned>(mut data: serde_json::Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| Error::Graphql(format!("Response has no `{field}`")))?;

    serde_json::from_value(value)
        .map_err(|err| Error::Graphql(format!("Unexpected `{field}` payload: {err}")))
}

#[async_trait]
impl ShareBackend for ShareClient {
    async fn write_attachment(&self, input: &AttachmentInput) -> Result<MutationResult> {
        self.execute(&WRITE_ATTACHMENT, input).await
    }

    async fn add_vaccine_record(&self, record: &VaccineRecord) -> Result<MutationResult> {
        let variables = RecordVariables { id: None, record };
        self.execute(&ADD_RECORD, &variables).await
    }

    async fn find_vaccine_record(&self, email: &str) -> Result<RecordLookup> {
        let list: Option<VaccineRecordList> = self
            .execute(&LIST_VACCINE_RECORD, &EmailVariables { email })
            .await?;

        let ids = list.and_then(|l| l.vaccine_records).unwrap_or_default();
        if ids.len() > 1 {
            warn!(
                "{} vaccine records share `{email}`; using the first one",
                ids.len()
            );
        }

        Ok(ids
            .into_iter()
            .next()
            .map(|r| RecordLookup::Found(r.id))
            .unwrap_or(RecordLookup::NotFound))
    }

    async fn put_vaccine_record(
        &self,
        id: &str,
        record: &VaccineRecord,
    ) -> Result<MutationResult> {
        let variables = RecordVariables {
            id: Some(id),
            record,
        };
        self.execute(&UPDATE_VACCINE_RECORD, &variables).await
    }

    async fn remove_vaccine_record(&self, id: &str) -> Result<MutationResult> {
        self.execute(&REMOVE_RECORD, &IdVariables { id }).await
    }
}
