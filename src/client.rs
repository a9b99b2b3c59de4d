use crate::GenaiError;
use crate::auth::{Credentials, TokenSource};
use crate::config::VertexConfig;
use crate::http::common::construct_generate_url;
use crate::http::generate::send_generate_request;
use crate::logging::{Logger, TracingLogger};
use crate::payload::build_payload;
use crate::prompt::Prompt;
use crate::request::RequestPayload;
use crate::response::GenerateResponse;
use reqwest::Client as ReqwestClient;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The main client for generating content with a Vertex AI model.
///
/// Cheap to clone; clones share the configuration, the connection pool and
/// the credential cache. Safe to use from many tasks at once.
#[derive(Clone)]
pub struct Client {
    config: Arc<VertexConfig>,
    url: String,
    #[allow(clippy::struct_field_names)]
    http_client: ReqwestClient,
    tokens: TokenSource,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("url", &self.url)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Builder for `Client` instances.
///
/// # Example
///
/// ```
/// use vertex_genai::Client;
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .project_id("my-project")
///     .location_id("us-central1")
///     .api_endpoint("us-central1-aiplatform.googleapis.com")
///     .access_token("ya29.token")
///     .system_instruction("Answer using the GoFr documentation only.")
///     .timeout(Duration::from_secs(120))
///     .build()
///     .unwrap();
///
/// assert_eq!(client.config().model_id, "gemini-1.5-pro-002");
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    config: VertexConfig,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl ClientBuilder {
    /// Starts from an existing configuration.
    #[must_use]
    pub fn from_config(config: VertexConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.config.project_id = project_id.into();
        self
    }

    #[must_use]
    pub fn location_id(mut self, location_id: impl Into<String>) -> Self {
        self.config.location_id = location_id.into();
        self
    }

    /// Sets the API host, e.g. `us-central1-aiplatform.googleapis.com`.
    #[must_use]
    pub fn api_endpoint(mut self, api_endpoint: impl Into<String>) -> Self {
        self.config.api_endpoint = api_endpoint.into();
        self
    }

    /// Sets the model. Defaults to [`DEFAULT_MODEL_ID`](crate::DEFAULT_MODEL_ID).
    #[must_use]
    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.config.model_id = model_id.into();
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Uses a service-account key (the JSON file contents) for authentication.
    #[must_use]
    pub fn service_account_json(self, json: impl Into<String>) -> Self {
        self.credentials(Credentials::ServiceAccountJson(json.into()))
    }

    /// Uses a pre-minted OAuth access token for authentication.
    #[must_use]
    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.credentials(Credentials::AccessToken(token.into()))
    }

    /// Sets the system instruction sent ahead of per-call instructions.
    #[must_use]
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.system_instruction = Some(instruction.into());
        self
    }

    /// Adds a default retrieval datastore.
    #[must_use]
    pub fn datastore(mut self, datastore: impl Into<String>) -> Self {
        self.config.datastores.push(datastore.into());
        self
    }

    /// Replaces the default retrieval datastores.
    #[must_use]
    pub fn datastores<I, S>(mut self, datastores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.datastores = datastores.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the `https://{api_endpoint}` URL prefix.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Sets the total request timeout on the underlying HTTP client.
    ///
    /// If not set, uses reqwest's default (no timeout). Generation with
    /// retrieval can be slow; 120-300 seconds is a reasonable range.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the logger for client diagnostics. Defaults to [`TracingLogger`].
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the `Client`.
    ///
    /// Defaults are applied before validation, so an unset model ID is never
    /// reported as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration is missing ([`GenaiError::MissingConfig`])
    /// - The credentials cannot be parsed ([`GenaiError::Credential`])
    /// - The HTTP client cannot be created ([`GenaiError::ClientBuild`])
    pub fn build(mut self) -> Result<Client, GenaiError> {
        self.config.set_defaults();
        self.config.validate()?;

        let tokens = TokenSource::from_credentials(&self.config.credentials)?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| GenaiError::ClientBuild(e.to_string()))?;

        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        let url = construct_generate_url(&self.config);

        logger.info(&format!(
            "Initialized Vertex AI client: project={} location={} model={}",
            self.config.project_id, self.config.location_id, self.config.model_id
        ));

        Ok(Client {
            config: Arc::new(self.config),
            url,
            http_client,
            tokens,
            logger,
        })
    }
}

impl Client {
    /// Creates a new builder for `Client` instances.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Creates a client from a configuration with default HTTP settings.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`].
    pub fn new(config: VertexConfig) -> Result<Self, GenaiError> {
        ClientBuilder::from_config(config).build()
    }

    /// The configuration this client was built with, defaults applied.
    #[must_use]
    pub fn config(&self) -> &VertexConfig {
        &self.config
    }

    /// The `streamGenerateContent` URL requests are sent to.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.url
    }

    /// Starts a generation call.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use vertex_genai::{Client, Turn};
    /// # async fn example(client: Client) -> Result<(), vertex_genai::GenaiError> {
    /// // Plain prompt with the client's default datastores and instructions
    /// let text = client.generate("What is GoFr?").send().await?;
    ///
    /// // Conversation with per-call overrides
    /// let text = client
    ///     .generate(vec![Turn::user("Hi"), Turn::model("Hello!"), Turn::user("List the CLI commands")])
    ///     .with_datastores(["projects/p/locations/global/collections/default_collection/dataStores/cli-docs"])
    ///     .with_system_instructions(["Answer as a bulleted list"])
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn generate(&self, prompt: impl Into<Prompt>) -> GenerateBuilder<'_> {
        GenerateBuilder::new(self, prompt.into())
    }
}

/// A single generation call, configured before being sent.
#[derive(Debug)]
pub struct GenerateBuilder<'a> {
    client: &'a Client,
    prompt: Prompt,
    datastores: Option<Vec<String>>,
    system_instructions: Option<Vec<String>>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl<'a> GenerateBuilder<'a> {
    const fn new(client: &'a Client, prompt: Prompt) -> Self {
        Self {
            client,
            prompt,
            datastores: None,
            system_instructions: None,
            timeout: None,
            cancellation: None,
        }
    }

    /// Uses these datastores instead of the client's defaults.
    ///
    /// An empty list disables retrieval for this call.
    #[must_use]
    pub fn with_datastores<I, S>(mut self, datastores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datastores = Some(datastores.into_iter().map(Into::into).collect());
        self
    }

    /// Appends system instructions after the client's default instruction.
    #[must_use]
    pub fn with_system_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_instructions = Some(instructions.into_iter().map(Into::into).collect());
        self
    }

    /// Fails the call with [`GenaiError::Timeout`] if it takes longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Aborts the in-flight request with [`GenaiError::Cancelled`] once
    /// `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The request document this call would send.
    #[must_use]
    pub fn build_payload(&self) -> RequestPayload {
        build_payload(
            &self.prompt,
            &self.client.config,
            self.datastores.as_deref(),
            self.system_instructions.as_deref(),
        )
    }

    /// Sends the request and returns the flattened response text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Vertex AI responds with a
    /// non-success status, the response cannot be decoded, or the call is
    /// cancelled or times out. No partial text is returned.
    pub async fn send(self) -> Result<String, GenaiError> {
        self.send_detailed().await.map(|response| response.text())
    }

    /// Sends the request and returns the decoded response entries.
    ///
    /// # Errors
    ///
    /// See [`GenerateBuilder::send`].
    pub async fn send_detailed(self) -> Result<GenerateResponse, GenaiError> {
        let payload = self.build_payload();
        let client = self.client;

        client.logger.debug(&format!(
            "Sending generation request: messages={} tools={} system_instruction_parts={}",
            payload.contents.len(),
            payload.tools.len(),
            payload
                .system_instruction
                .as_ref()
                .map_or(0, |si| si.parts.len())
        ));

        let request = send_generate_request(&client.http_client, &client.tokens, &client.url, &payload);
        let result = with_limits(request, self.timeout, self.cancellation.as_ref())
            .await
            .and_then(|body| GenerateResponse::from_body(&body));

        match &result {
            Ok(response) => client.logger.debug(&format!(
                "Received generation response: entries={}",
                response.entries.len()
            )),
            Err(e) => client
                .logger
                .error(&format!("Generation request failed: {e}")),
        }

        result
    }
}

/// Runs `request` under an optional timeout and cancellation token.
///
/// Dropping the request future aborts the HTTP exchange and releases its
/// connection.
async fn with_limits<T>(
    request: impl Future<Output = Result<T, GenaiError>>,
    timeout: Option<Duration>,
    cancellation: Option<&CancellationToken>,
) -> Result<T, GenaiError> {
    let bounded = async {
        match timeout {
            Some(duration) => tokio::time::timeout(duration, request)
                .await
                .map_err(|_| GenaiError::Timeout(duration))?,
            None => request.await,
        }
    };

    match cancellation {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => Err(GenaiError::Cancelled),
            result = bounded => result,
        },
        None => bounded.await,
    }
}
