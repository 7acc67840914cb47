use std::collections::VecDeque;

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};

use crate::config::AssistantApiConfig;
use crate::error::{parse_error_message, AssistantApiError};
use crate::events::StreamEvent;
use crate::headers::build_headers;
use crate::payload::{ActionRequest, MessageRequest, ThreadHandle, ToolOutput};
use crate::retry::{is_retryable_http_error, retry_delay_ms, MAX_RETRIES};
use crate::sse::SseStreamParser;
use crate::url::{actions_url, messages_url, threads_url};

/// HTTP client for the conversation backend.
///
/// All methods take the bearer credential per call: the same client serves
/// both the pre-gate (anonymous) and authenticated phases of a session.
#[derive(Debug)]
pub struct AssistantApiClient {
    http: Client,
    config: AssistantApiConfig,
}

impl AssistantApiClient {
    pub fn new(config: AssistantApiConfig) -> Result<Self, AssistantApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AssistantApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AssistantApiConfig {
        &self.config
    }

    pub fn build_headers(&self, credential: Option<&str>) -> Result<HeaderMap, AssistantApiError> {
        let headers = build_headers(&self.config, credential);
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    AssistantApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    AssistantApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_create_thread_request(
        &self,
        credential: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, AssistantApiError> {
        let headers = self.build_headers(credential)?;
        Ok(self
            .http
            .post(threads_url(&self.config.base_url))
            .headers(headers))
    }

    pub fn build_message_request(
        &self,
        thread_id: &str,
        content: &str,
        credential: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, AssistantApiError> {
        let headers = self.build_headers(credential)?;
        Ok(self
            .http
            .post(messages_url(&self.config.base_url, thread_id))
            .headers(headers)
            .json(&MessageRequest::new(content)))
    }

    pub fn build_actions_request(
        &self,
        thread_id: &str,
        request: &ActionRequest,
        credential: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, AssistantApiError> {
        let headers = self.build_headers(credential)?;
        Ok(self
            .http
            .post(actions_url(&self.config.base_url, thread_id))
            .headers(headers)
            .json(request))
    }

    /// Create a conversation thread and return its opaque handle.
    pub async fn create_thread(
        &self,
        credential: Option<&str>,
    ) -> Result<ThreadHandle, AssistantApiError> {
        let response = self
            .send_with_retry(|| self.build_create_thread_request(credential))
            .await?;
        let body = response.text().await.map_err(AssistantApiError::from)?;
        serde_json::from_str::<ThreadHandle>(&body).map_err(AssistantApiError::from)
    }

    /// Post a user message and open the event stream for its exchange.
    pub async fn open_message_stream(
        &self,
        thread_id: &str,
        content: &str,
        credential: Option<&str>,
    ) -> Result<ExchangeStream, AssistantApiError> {
        let response = self
            .send_with_retry(|| self.build_message_request(thread_id, content, credential))
            .await?;
        Ok(ExchangeStream::from_response(response))
    }

    /// Submit tool-call outputs for a paused run and open the continuation
    /// stream for the same exchange.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
        credential: Option<&str>,
    ) -> Result<ExchangeStream, AssistantApiError> {
        let request = ActionRequest::new(run_id, outputs);
        let response = self
            .send_with_retry(|| self.build_actions_request(thread_id, &request, credential))
            .await?;
        Ok(ExchangeStream::from_response(response))
    }

    async fn send_with_retry<F>(&self, build_request: F) -> Result<Response, AssistantApiError>
    where
        F: Fn() -> Result<reqwest::RequestBuilder, AssistantApiError>,
    {
        let mut last_status = None;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            match build_request()?.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }

                    let status = response.status();
                    last_status = Some(status);
                    let body = response.text().await.unwrap_or_else(|_| {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    });
                    let message = parse_error_message(status, &body);
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(status.as_u16(), &body) {
                        tracing::warn!(
                            status = status.as_u16(),
                            attempt,
                            "retrying backend request"
                        );
                        tokio::time::sleep(retry_delay_ms(attempt)).await;
                        continue;
                    }

                    return Err(AssistantApiError::Status(status, message));
                }
                Err(error) => {
                    let message = error.to_string();
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(0, &message) {
                        tracing::warn!(%message, attempt, "retrying backend request after transport error");
                        tokio::time::sleep(retry_delay_ms(attempt)).await;
                        continue;
                    }

                    return Err(AssistantApiError::Request(error));
                }
            }
        }

        Err(AssistantApiError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }
}

/// Pull-based view over one exchange's SSE response.
///
/// Events are drained strictly in arrival order; `Ok(None)` marks the end
/// of the stream. Callers decide whether an end without a terminal run
/// event is acceptable.
pub struct ExchangeStream {
    chunks: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    parser: SseStreamParser,
    pending: VecDeque<StreamEvent>,
    exhausted: bool,
}

impl ExchangeStream {
    fn from_response(response: Response) -> Self {
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();
        Self::from_chunks(chunks)
    }

    /// Build a stream from raw chunk futures; the seam used by scripted
    /// transports in tests.
    pub fn from_chunks(chunks: BoxStream<'static, reqwest::Result<Vec<u8>>>) -> Self {
        Self {
            chunks,
            parser: SseStreamParser::default(),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Return the next normalized event, awaiting more bytes as needed.
    pub async fn next_event(&mut self) -> Result<Option<StreamEvent>, AssistantApiError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }

            if self.exhausted {
                return Ok(None);
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => {
                    self.pending.extend(self.parser.feed(&chunk));
                }
                Some(Err(error)) => {
                    self.exhausted = true;
                    return Err(AssistantApiError::Request(error));
                }
                None => {
                    self.exhausted = true;
                    if !self.parser.is_empty_buffer() {
                        return Err(AssistantApiError::MalformedStream(
                            "stream ended with an incomplete SSE frame".to_string(),
                        ));
                    }
                }
            }
        }
    }
}
