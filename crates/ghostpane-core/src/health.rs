//! Loopback health endpoint
//!
//! Answers every request on `127.0.0.1:<port>` with a small JSON status
//! document. When the configured port is taken it walks up one port at a
//! time until it finds a free one or runs out of attempts.

use std::{
    io,
    net::Ipv4Addr,
    sync::{
        Mutex,
        atomic::{AtomicU16, Ordering},
    },
    time::Duration,
};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::oneshot,
    time::{sleep, timeout},
};
use tracing::{debug, info, warn};

use crate::Error;

/// Time a client gets to send its request headers
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_BUFFER: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Ports tried in total, starting at `port`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u16,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_port() -> u16 {
    43210
}

fn default_max_attempts() -> u16 {
    10
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// What the renderer gets back when it asks where the endpoint lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthEndpoint {
    pub status: String,
    pub port: u16,
    pub url: String,
}

pub struct HealthService {
    config: HealthConfig,
    port: AtomicU16,
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
}

impl HealthService {
    pub fn new(config: HealthConfig) -> Self {
        let port = config.port;
        Self {
            config,
            port: AtomicU16::new(port),
            shutdown: Mutex::new(None),
        }
    }

    /// Bind and start answering requests. Returns the port actually bound.
    pub async fn start(&self) -> Result<u16, Error> {
        if self.is_running() {
            debug!("Health service is already running");
            return Ok(self.port());
        }

        let listener = bind_with_retry(&self.config).await?;
        let port = listener.local_addr()?.port();
        let (tx, rx) = oneshot::channel();

        *self.shutdown.lock().map_err(|_| Error::StatePoisoned)? = Some(tx);
        self.port.store(port, Ordering::Relaxed);
        tokio::spawn(serve(listener, rx));

        info!("Health service is running on http://localhost:{}", port);
        Ok(port)
    }

    pub fn stop(&self) {
        let sender = match self.shutdown.lock() {
            Ok(mut shutdown) => shutdown.take(),
            Err(_) => None,
        };

        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown
            .lock()
            .map(|shutdown| shutdown.is_some())
            .unwrap_or(false)
    }

    pub fn port(&self) -> u16 {
        self.port.load(Ordering::Relaxed)
    }

    pub fn endpoint(&self) -> HealthEndpoint {
        let port = self.port();
        let status = if self.is_running() { "ok" } else { "stopped" };
        HealthEndpoint {
            status: status.to_string(),
            port,
            url: format!("http://localhost:{}", port),
        }
    }
}

impl Drop for HealthService {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn bind_with_retry(config: &HealthConfig) -> io::Result<TcpListener> {
    let mut port = config.port;
    let mut attempt = 1;

    loop {
        match TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && attempt < config.max_attempts => {
                let Some(next) = port.checked_add(1) else {
                    return Err(e);
                };
                warn!("Port {} is in use, trying {}", port, next);
                sleep(Duration::from_millis(config.retry_delay_ms)).await;
                port = next;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn serve(listener: TcpListener, mut shutdown: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(async move {
                        if let Err(e) = respond(stream).await {
                            debug!(%peer, error = %e, "health response failed");
                        }
                    });
                }
                Err(e) => warn!(error = %e, "health accept failed"),
            },
        }
    }

    info!("Health service stopped");
}

async fn respond(mut stream: TcpStream) -> io::Result<()> {
    match timeout(REQUEST_TIMEOUT, read_request_head(&mut stream)).await {
        Ok(read) => read?,
        Err(_) => {
            debug!("health client sent no request in time");
            return Ok(());
        }
    }

    let body = health_body();
    let response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        body.len(),
        body
    );

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Read until the end of the request headers or a full buffer. Path and
/// method don't matter.
async fn read_request_head(stream: &mut TcpStream) -> io::Result<()> {
    let mut request = vec![0u8; REQUEST_BUFFER];
    let mut filled = 0;

    while filled < request.len() {
        let read = stream.read(&mut request[filled..]).await?;
        if read == 0 {
            break;
        }
        filled += read;
        if request[..filled].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    Ok(())
}

fn health_body() -> String {
    serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .to_string()
}
