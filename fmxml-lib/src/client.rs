//! Main FmConnector

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::trace;
use log::warn;
use reqwest::Client;
use url::Url;

use crate::config::ConnectorConfig;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::ResultEnvelope;
use crate::model::parse;
use crate::query::Query;
use crate::query::try_compile;
use crate::transport::Credentials;
use crate::transport::HttpExecutor;
use crate::transport::ReqwestExecutor;

/// Path of the result-set XML grammar on the server.
pub const XML_PATH: &str = "fmi/xml/fmresultset.xml";

/// Query command listing the databases hosted by the server.
pub const DB_NAMES: &str = "-dbnames";

/// Field carrying each database name in a `-dbnames` response.
const DATABASE_NAME_FIELD: &str = "DATABASE_NAME";

/// Connector to the server's XML publishing endpoint.
///
/// Every operation is exactly one HTTP GET: no retries, no caching, no
/// pooling beyond what the HTTP client does on its own. The connector is cheap
/// to clone (uses `Arc` internally) and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use fmxml_lib::FmConnector;
/// use fmxml_lib::query::{Action, Query};
///
/// let connector = FmConnector::builder()
///     .host("fm.example.com")
///     .credentials("admin", "secret")
///     .build();
///
/// let query = Query::builder("contacts", "web", Action::FindAll).max(10).build();
/// let envelope = connector.query(&query).await?;
///
/// for record in envelope.records() {
///     println!("{}", record.to_json()?);
/// }
/// ```
#[derive(Clone)]
pub struct FmConnector {
    inner: Arc<FmConnectorInner>,
}

struct FmConnectorInner {
    scheme: String,
    host: String,
    port: Option<u16>,
    credentials: Credentials,
    executor: Arc<dyn HttpExecutor>,
}

impl FmConnector {
    /// Creates a new builder for constructing a connector.
    pub fn builder() -> FmConnectorBuilder<Missing, Missing> {
        FmConnectorBuilder::new()
    }

    /// Creates a connector from a [`ConnectorConfig`].
    pub fn from_config(config: &ConnectorConfig) -> FmConnector {
        let mut builder = FmConnector::builder()
            .host(config.host.clone())
            .credentials(config.username.clone(), config.password.clone())
            .scheme(config.scheme.clone());
        if let Some(port) = config.port {
            builder = builder.port(port);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Returns the host.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// Returns the port, if one was set.
    pub fn port(&self) -> Option<u16> {
        self.inner.port
    }

    /// Returns the endpoint URL, without a query string.
    pub fn endpoint(&self) -> Result<Url, ApiError> {
        let mut base = format!("{}://{}", self.inner.scheme, self.inner.host);
        if let Some(port) = self.inner.port {
            base.push_str(&format!(":{}", port));
        }

        let mut url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.set_path(XML_PATH);
        Ok(url)
    }

    /// Returns the full request URL for a query.
    pub fn query_url(&self, query: &Query) -> Result<Url, Error> {
        let query_string = try_compile(query)?;
        Ok(self.url_with_query(&query_string)?)
    }

    /// Checks connectivity and credentials by listing the hosted databases.
    ///
    /// Only the HTTP status is checked; the body is not parsed.
    pub async fn ping(&self) -> Result<(), Error> {
        let url = self.url_with_query(DB_NAMES)?;
        self.get(&url).await?;
        Ok(())
    }

    /// Returns the names of the databases hosted by the server.
    pub async fn database_names(&self) -> Result<Vec<String>, Error> {
        let url = self.url_with_query(DB_NAMES)?;
        let body = self.get(&url).await?;
        let envelope = parse(&body)?;

        if let Some(error) = envelope.protocol_error() {
            warn!("database listing failed: {}", error);
            return Err(Error::Protocol {
                error,
                envelope: Box::new(envelope),
            });
        }

        Ok(envelope
            .records()
            .iter()
            .filter_map(|r| r.raw_value(DATABASE_NAME_FIELD))
            .map(str::to_string)
            .collect())
    }

    /// Runs a query and returns the materialized result envelope.
    ///
    /// A non-zero protocol error code yields [`Error::Protocol`], which still
    /// carries the (materialized) envelope.
    pub async fn query(&self, query: &Query) -> Result<ResultEnvelope, Error> {
        let url = self.query_url(query)?;
        let body = self.get(&url).await?;

        let mut envelope = parse(&body)?;
        envelope.materialize();

        if let Some(error) = envelope.protocol_error() {
            warn!(
                "query {} on {}/{} failed: {}",
                query.action(),
                query.database(),
                query.layout(),
                error
            );
            return Err(Error::Protocol {
                error,
                envelope: Box::new(envelope),
            });
        }

        debug!(
            "query {} on {}/{} fetched {} of {} records",
            query.action(),
            query.database(),
            query.layout(),
            envelope.resultset().fetch_size,
            envelope.resultset().count
        );
        Ok(envelope)
    }

    fn url_with_query(&self, query_string: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint()?;
        url.set_query(Some(query_string));
        Ok(url)
    }

    /// Sends one GET and maps non-2xx statuses to errors.
    async fn get(&self, url: &Url) -> Result<Vec<u8>, ApiError> {
        debug!("GET {}", url);

        let response = self.inner.executor.get(url, &self.inner.credentials).await?;
        debug!("HTTP {} ({} bytes)", response.status, response.body.len());
        trace!("response body: {}", String::from_utf8_lossy(&response.body));

        match ApiError::from_status(response.status, &response.body) {
            Some(error) => Err(error),
            None => Ok(response.body),
        }
    }
}

impl std::fmt::Debug for FmConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmConnector")
            .field("scheme", &self.inner.scheme)
            .field("host", &self.inner.host)
            .field("port", &self.inner.port)
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FmConnector`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `host` - The server host name or address
/// - `credentials` - HTTP Basic account name and password
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fmxml_lib::FmConnector;
///
/// let connector = FmConnector::builder()
///     .host("fm.example.com")
///     .credentials("admin", "secret")
///     .port(8080)
///     .timeout(Duration::from_secs(30))
///     .build();
///
/// assert_eq!(
///     connector.endpoint().unwrap().as_str(),
///     "http://fm.example.com:8080/fmi/xml/fmresultset.xml"
/// );
/// ```
pub struct FmConnectorBuilder<Host, Creds> {
    host: Host,
    credentials: Creds,
    scheme: String,
    port: Option<u16>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    executor: Option<Arc<dyn HttpExecutor>>,
}

impl FmConnectorBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            host: Missing,
            credentials: Missing,
            scheme: "http".to_string(),
            port: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            executor: None,
        }
    }
}

impl Default for FmConnectorBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FmConnectorBuilder<Missing, C> {
    /// Sets the server host.
    pub fn host(self, host: impl Into<String>) -> FmConnectorBuilder<Set<String>, C> {
        FmConnectorBuilder {
            host: Set(host.into()),
            credentials: self.credentials,
            scheme: self.scheme,
            port: self.port,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            executor: self.executor,
        }
    }
}

impl<H> FmConnectorBuilder<H, Missing> {
    /// Sets the HTTP Basic credentials.
    pub fn credentials(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> FmConnectorBuilder<H, Set<Credentials>> {
        FmConnectorBuilder {
            host: self.host,
            credentials: Set(Credentials::new(username, password)),
            scheme: self.scheme,
            port: self.port,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            executor: self.executor,
        }
    }
}

impl<H, C> FmConnectorBuilder<H, C> {
    /// Sets the URL scheme.
    ///
    /// Defaults to `http`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the port. Without one the scheme's default port is used.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client for the default executor.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the HTTP executor entirely.
    ///
    /// Timeouts and the HTTP client set on this builder are then ignored.
    pub fn executor<E: HttpExecutor + 'static>(mut self, executor: E) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }
}

impl FmConnectorBuilder<Set<String>, Set<Credentials>> {
    /// Builds the [`FmConnector`].
    ///
    /// This method is only available when both `host` and `credentials` have been set.
    pub fn build(self) -> FmConnector {
        let executor = match self.executor {
            Some(executor) => executor,
            None => {
                let client = self.http_client.unwrap_or_else(|| {
                    let mut builder = Client::builder();
                    if let Some(timeout) = self.connect_timeout {
                        builder = builder.connect_timeout(timeout);
                    }
                    builder.build().unwrap_or_else(|e| {
                        warn!("falling back to default HTTP client: {}", e);
                        Client::new()
                    })
                });
                let mut executor = ReqwestExecutor::new(client);
                if let Some(timeout) = self.timeout {
                    executor = executor.with_timeout(timeout);
                }
                Arc::new(executor) as Arc<dyn HttpExecutor>
            }
        };

        FmConnector {
            inner: Arc::new(FmConnectorInner {
                scheme: self.scheme,
                host: self.host.0,
                port: self.port,
                credentials: self.credentials.0,
                executor,
            }),
        }
    }
}
