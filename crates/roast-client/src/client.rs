//! Chat endpoint client

use async_trait::async_trait;
use reqwest::{
    Url,
    header::{ACCEPT, CONTENT_TYPE},
};

use crate::{
    error::{Error, Result},
    types::{ChatRequest, parse_reply},
};

/// Anything that can turn one message into one reply.
///
/// Implementations must not retry and must not keep conversation state:
/// every call carries only `message`.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a message and wait for the reply text
    async fn send(&self, message: &str) -> Result<String>;
}

/// Client for the HTTP chat endpoint
pub struct HttpChatService {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpChatService {
    /// Endpoint used when nothing else is configured
    pub const DEFAULT_ENDPOINT: &'static str = "https://comp-eb.onrender.com/chat";

    /// Create a client for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::InvalidConfig(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    /// The endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn send(&self, message: &str) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, len = message.len(), "posting chat message");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&ChatRequest::new(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read error response body");
                    String::new()
                }
            };
            return Err(Error::from_status(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    /// Throwaway HTTP server answering every request with a canned response
    struct TestServer {
        addr: std::net::SocketAddr,
        requests: mpsc::UnboundedReceiver<String>,
        shutdown: tokio::sync::oneshot::Sender<()>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl TestServer {
        async fn start(status: u16, body: &str) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let body = body.to_string();
            let (req_tx, requests) = mpsc::unbounded_channel();
            let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

            let handle = tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        accept = listener.accept() => {
                            if let Ok((mut socket, _)) = accept {
                                let body = body.clone();
                                let req_tx = req_tx.clone();
                                tokio::spawn(async move {
                                    let request = read_request(&mut socket).await;
                                    let _ = req_tx.send(request);

                                    let response = format!(
                                        "HTTP/1.1 {} X\r\n\
                                         Content-Type: application/json\r\n\
                                         Content-Length: {}\r\n\
                                         Connection: close\r\n\
                                         \r\n\
                                         {}",
                                        status,
                                        body.len(),
                                        body
                                    );
                                    let _ = socket.write_all(response.as_bytes()).await;
                                });
                            }
                        }
                    }
                }
            });

            Self {
                addr,
                requests,
                shutdown: shutdown_tx,
                handle,
            }
        }

        fn url(&self) -> String {
            format!("http://{}/chat", self.addr)
        }

        async fn shutdown(self) {
            let _ = self.shutdown.send(());
            let _ = self.handle.await;
        }
    }

    /// Read one request: headers plus `Content-Length` bytes of body
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_new_rejects_garbage_endpoint() {
        let err = HttpChatService::new("not a url").err().unwrap();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let err = HttpChatService::new("ftp://example.com/chat").err().unwrap();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_default_endpoint_parses() {
        let client = HttpChatService::new(HttpChatService::DEFAULT_ENDPOINT).unwrap();
        assert_eq!(client.endpoint(), "https://comp-eb.onrender.com/chat");
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut server = TestServer::start(200, r#"{"reply":"nice take"}"#).await;
        let client = HttpChatService::new(&server.url()).unwrap();

        let reply = client.send("Messi is overrated").await.unwrap();
        assert_eq!(reply, "nice take");

        let request = server.requests.recv().await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /chat "), "got: {}", request);
        assert!(lower.contains("content-type: application/json"));
        assert!(lower.contains("accept: application/json"));
        assert!(request.ends_with(r#"{"message":"Messi is overrated"}"#), "got: {}", request);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_send_server_error_is_status() {
        let server = TestServer::start(500, r#"{"reply":"ignored"}"#).await;
        let client = HttpChatService::new(&server.url()).unwrap();

        let err = client.send("hi").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body_excerpt(), Some(r#"{"reply":"ignored"}"#));
        assert_eq!(err.kind(), FailureKind::Transport);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_send_non_string_reply_is_malformed() {
        let server = TestServer::start(200, r#"{"reply": 42}"#).await;
        let client = HttpChatService::new(&server.url()).unwrap();

        let err = client.send("hi").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_send_connection_refused_is_transport() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpChatService::new(&format!("http://{}/chat", addr)).unwrap();
        let err = client.send("hi").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)), "got: {:?}", err);
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
