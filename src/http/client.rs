//! API client: pipeline + transport + envelope unwrapping

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::http::middleware::Pipeline;
use crate::http::request::{ApiRequest, RawResponse};
use crate::http::transport::Transport;

/// Code the backend puts in the envelope on success
pub const SUCCESS_CODE: i64 = 200;

/// The backend's response wrapper: `{ code, msg, data }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Fail unless the envelope reports success
    pub fn into_result(self) -> Result<Envelope<T>> {
        if self.code == SUCCESS_CODE {
            Ok(self)
        } else {
            Err(Error::Api {
                code: self.code,
                message: self.msg,
            })
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    pipeline: Pipeline,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, pipeline: Pipeline) -> Self {
        Self {
            transport,
            pipeline,
        }
    }

    /// Run the pipeline and hand back the raw response
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        self.pipeline.execute(self.transport.as_ref(), request).await
    }

    /// Call an endpoint and unwrap its `data`
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let envelope = self.envelope::<T>(request).await?;
        envelope
            .data
            .ok_or_else(|| Error::Other("Response carried no data".to_string()))
    }

    /// Call an endpoint that answers with a message only
    pub async fn call_message(&self, request: ApiRequest) -> Result<String> {
        let envelope = self.envelope::<serde_json::Value>(request).await?;
        Ok(envelope.msg)
    }

    async fn envelope<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<T>> {
        let response = self.execute(request).await?;
        let envelope: Envelope<T> = serde_json::from_str(&response.body)?;
        envelope.into_result()
    }
}
