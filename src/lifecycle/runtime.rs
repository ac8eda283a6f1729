//! Platform runtime API loop.
//!
//! # Protocol
//! ```text
//! GET  /2018-06-01/runtime/invocation/next            → event + context headers
//! POST /2018-06-01/runtime/invocation/{id}/response   ← proxy response JSON
//! POST /2018-06-01/runtime/invocation/{id}/error      ← undecodable event
//! ```
//!
//! # Design Decisions
//! - One invocation at a time; the loop blocks on `next` between events
//! - Failing to fetch the next event ends the loop (the platform restarts
//!   the environment); failing to post a result is logged and skipped

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;

use crate::error::RuntimeError;
use crate::http::{HandlerResponse, HttpEvent, InvocationContext};
use crate::routing::Dispatcher;

pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";
const DEADLINE_HEADER: &str = "lambda-runtime-deadline-ms";
const TRACE_ID_HEADER: &str = "lambda-runtime-trace-id";
const ERROR_TYPE_HEADER: &str = "lambda-runtime-function-error-type";

/// One event fetched from the runtime API.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub context: InvocationContext,
    pub payload: String,
}

impl Invocation {
    pub fn request_id(&self) -> &str {
        self.context.request_id.as_deref().unwrap_or_default()
    }
}

pub struct RuntimeClient {
    client: reqwest::Client,
    base: Url,
}

impl RuntimeClient {
    /// `api_address` is the `host:port` from `AWS_LAMBDA_RUNTIME_API`.
    pub fn new(api_address: &str) -> Result<Self, RuntimeError> {
        let base = Url::parse(&format!("http://{}/{}/runtime/", api_address, API_VERSION))?;
        // The runtime API is link-local; never route it through a proxy.
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self { client, base })
    }

    pub async fn next_invocation(&self) -> Result<Invocation, RuntimeError> {
        let url = self.base.join("invocation/next")?;
        let resp = self.client.get(url).send().await?.error_for_status()?;

        let headers = resp.headers();
        let request_id = header_str(headers, REQUEST_ID_HEADER)
            .ok_or(RuntimeError::MissingHeader(REQUEST_ID_HEADER))?
            .to_string();
        let context = InvocationContext {
            function_name: None,
            request_id: Some(request_id),
            trace_header: header_str(headers, TRACE_ID_HEADER).map(str::to_string),
            deadline_ms: header_str(headers, DEADLINE_HEADER).and_then(|v| v.parse().ok()),
        };

        let payload = resp.text().await?;
        Ok(Invocation { context, payload })
    }

    pub async fn send_response(&self, request_id: &str, response: &HandlerResponse) -> Result<(), RuntimeError> {
        let url = self.base.join(&format!("invocation/{}/response", request_id))?;
        self.client.post(url).json(response).send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn send_error(&self, request_id: &str, error_type: &str, message: &str) -> Result<(), RuntimeError> {
        let url = self.base.join(&format!("invocation/{}/error", request_id))?;
        self.client
            .post(url)
            .header(ERROR_TYPE_HEADER, error_type)
            .json(&json!({ "errorMessage": message, "errorType": error_type }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Poll for invocations until shutdown or a fetch failure.
pub async fn run(
    client: RuntimeClient,
    dispatcher: Arc<Dispatcher>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), RuntimeError> {
    tracing::info!(endpoint = %client.base, "Runtime loop starting");

    loop {
        let invocation = tokio::select! {
            next = client.next_invocation() => next?,
            _ = shutdown.recv() => {
                tracing::info!("Runtime loop stopping");
                return Ok(());
            }
        };

        handle_invocation(&client, &dispatcher, invocation).await;
    }
}

async fn handle_invocation(client: &RuntimeClient, dispatcher: &Dispatcher, invocation: Invocation) {
    let request_id = invocation.request_id().to_string();

    let result = match serde_json::from_str::<HttpEvent>(&invocation.payload) {
        Ok(event) => {
            let response = dispatcher.invoke(event, &invocation.context).await;
            client.send_response(&request_id, &response).await
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Event could not be decoded");
            client.send_error(&request_id, "InvalidEvent", &e.to_string()).await
        }
    };

    if let Err(e) = result {
        tracing::error!(request_id = %request_id, error = %e, "Failed to report invocation result");
    }
}
