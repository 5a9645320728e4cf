//! Connector round trips against a local one-shot HTTP server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use url::Url;

use fmxml_lib::error::{ApiError, Error};
use fmxml_lib::query::{Action, FieldCriterion, Query};
use fmxml_lib::transport::{Credentials, HttpExecutor, HttpResponse};
use fmxml_lib::{ConnectorConfig, FmConnector};

const CONTACTS: &[u8] = include_bytes!("fixtures/contacts.xml");
const RECORD_MISSING: &[u8] = include_bytes!("fixtures/record_missing.xml");
const DBNAMES: &[u8] = include_bytes!("fixtures/dbnames.xml");

/// What the server saw of the request.
#[derive(Debug, Clone, Default)]
struct Captured {
    path_and_query: String,
    authorization: Option<String>,
    user_agent: Option<String>,
}

/// Serves exactly one connection, answering every request with `status` and `body`.
async fn serve_once(status: u16, body: &'static [u8]) -> (SocketAddr, Arc<Mutex<Option<Captured>>>) {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(None));

    let slot = captured.clone();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            let slot = slot.clone();
            async move {
                let header = |name: &str| {
                    req.headers()
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                let seen = Captured {
                    path_and_query: req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.to_string())
                        .unwrap_or_default(),
                    authorization: header("authorization"),
                    user_agent: header("user-agent"),
                };
                *slot.lock().unwrap() = Some(seen);

                Ok::<_, Infallible>(
                    Response::builder()
                        .status(StatusCode::from_u16(status).unwrap())
                        .header("Content-Type", "text/xml")
                        .body(Full::new(Bytes::from_static(body)))
                        .unwrap(),
                )
            }
        });

        let _ = http1::Builder::new().serve_connection(io, service).await;
    });

    (addr, captured)
}

fn connector(addr: SocketAddr) -> FmConnector {
    FmConnector::builder()
        .host(addr.ip().to_string())
        .port(addr.port())
        .credentials("admin", "secret")
        .build()
}

fn captured(slot: &Arc<Mutex<Option<Captured>>>) -> Captured {
    slot.lock().unwrap().clone().expect("server saw no request")
}

#[tokio::test]
async fn test_query_success() {
    let (addr, slot) = serve_once(200, CONTACTS).await;
    let query = Query::builder("crm", "contacts_web", Action::Find)
        .fields([FieldCriterion::eq("name", "Ann Lee")])
        .max(2)
        .build();

    let envelope = connector(addr).query(&query).await.unwrap();
    assert_eq!(envelope.records().len(), 2);
    assert_eq!(
        envelope.records()[0].get_text("name").unwrap(),
        Some("Ann Lee")
    );

    let seen = captured(&slot);
    assert_eq!(
        seen.path_and_query,
        "/fmi/xml/fmresultset.xml?-db=crm&-lay=contacts_web&-skip=0&-max=2&-query=(q1)\
         &-q1=name&-q1.value=%3D%3DAnn%20Lee&-findquery"
    );
    assert_eq!(seen.authorization.as_deref(), Some("Basic YWRtaW46c2VjcmV0"));
    assert_eq!(seen.user_agent.as_deref(), Some(fmxml_lib::transport::USER_AGENT_VALUE));
}

#[tokio::test]
async fn test_unauthorized_status() {
    let (addr, _) = serve_once(401, b"").await;
    let query = Query::builder("crm", "contacts_web", Action::FindAll).build();

    let err = connector(addr).query(&query).await.unwrap_err();
    assert!(err.is_unauthorized(), "{err:?}");
    assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_server_error_status_carries_body() {
    let (addr, _) = serve_once(500, b"engine down").await;
    let query = Query::builder("crm", "contacts_web", Action::FindAll).build();

    match connector(addr).query(&query).await {
        Err(Error::Api(ApiError::Http { status, message })) => {
            assert_eq!(status, 500);
            assert_eq!(message, "engine down");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_protocol_error_keeps_envelope() {
    let (addr, _) = serve_once(200, RECORD_MISSING).await;
    let query = Query::builder("crm", "contacts_web", Action::Find)
        .record_id(999)
        .build();

    let err = connector(addr).query(&query).await.unwrap_err();
    assert_eq!(err.protocol_code(), Some(401));
    assert_eq!(err.to_string(), "[401] No records match the request");

    let envelope = err.envelope().unwrap();
    assert_eq!(envelope.datasource().unwrap().layout, "contacts_web");
    assert!(envelope.records().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (addr, _) = serve_once(200, b"<html><body>gateway</p></html>").await;
    let query = Query::builder("crm", "contacts_web", Action::FindAny).build();

    let err = connector(addr).query(&query).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn test_ping_and_database_names() {
    let (addr, slot) = serve_once(200, DBNAMES).await;
    let connector = connector(addr);

    connector.ping().await.unwrap();
    assert_eq!(
        captured(&slot).path_and_query,
        "/fmi/xml/fmresultset.xml?-dbnames"
    );

    let (addr, _) = serve_once(200, DBNAMES).await;
    let names = self::connector(addr).database_names().await.unwrap();
    assert_eq!(names, ["crm", "inventory"]);
}

#[tokio::test]
async fn test_ping_rejected_credentials() {
    let (addr, _) = serve_once(401, b"").await;
    assert!(connector(addr).ping().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = connector(addr).ping().await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Network(_))), "{err:?}");
}

#[tokio::test]
async fn test_unsupported_action_never_reaches_the_network() {
    let (addr, slot) = serve_once(200, CONTACTS).await;
    let query = Query::builder("crm", "contacts_web", Action::parse("-view")).build();

    let err = connector(addr).query(&query).await.unwrap_err();
    assert!(matches!(err, Error::Query(_)));
    assert!(slot.lock().unwrap().is_none());
}

// =============================================================================
// Custom executor
// =============================================================================

struct Canned {
    body: &'static [u8],
    seen: Arc<Mutex<Vec<(String, Credentials)>>>,
}

#[async_trait]
impl HttpExecutor for Canned {
    async fn get(&self, url: &Url, credentials: &Credentials) -> Result<HttpResponse, ApiError> {
        self.seen
            .lock()
            .unwrap()
            .push((url.to_string(), credentials.clone()));
        Ok(HttpResponse::new(200, self.body))
    }
}

#[tokio::test]
async fn test_custom_executor_from_config() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let config = ConnectorConfig::new("fm.example.com", "web", "pw")
        .with_scheme("https")
        .with_port(8443);

    let connector = FmConnector::builder()
        .host(config.host.clone())
        .credentials(config.username.clone(), config.password.clone())
        .scheme(config.scheme.clone())
        .port(8443)
        .executor(Canned {
            body: CONTACTS,
            seen: seen.clone(),
        })
        .build();

    let query = Query::builder("crm", "contacts_web", Action::Delete)
        .record_id(101)
        .build();
    connector.query(&query).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].0,
        "https://fm.example.com:8443/fmi/xml/fmresultset.xml?-db=crm&-lay=contacts_web&-recid=101&-delete"
    );
    assert_eq!(seen[0].1, Credentials::new("web", "pw"));

    let from_config = FmConnector::from_config(&config);
    assert_eq!(
        from_config.endpoint().unwrap(),
        connector.endpoint().unwrap()
    );
}
