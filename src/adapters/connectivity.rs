use crate::domain::ports::{ConnectivityObserver, ConnectivityStatus};
use crate::utils::error::{BotError, Result};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use url::Url;

/// Observes reachability of a host by opening TCP connections at a fixed
/// interval. Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TcpProbeObserver {
    address: String,
    interval: Duration,
    connect_timeout: Duration,
}

impl TcpProbeObserver {
    pub fn new(address: impl Into<String>, interval: Duration, connect_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            interval,
            connect_timeout,
        }
    }

    /// Probes the host and port of an http(s) URL.
    pub fn for_url(url: &str, interval: Duration) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| BotError::InvalidConfigValueError {
            field: "backend.base_url".to_string(),
            value: url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let host = parsed.host_str().ok_or_else(|| BotError::InvalidConfigValueError {
            field: "backend.base_url".to_string(),
            value: url.to_string(),
            reason: "URL has no host".to_string(),
        })?;
        let port = parsed.port_or_known_default().unwrap_or(443);

        Ok(Self::new(
            format!("{}:{}", host, port),
            interval,
            Duration::from_secs(5),
        ))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn probe(&self) -> bool {
        matches!(
            tokio::time::timeout(self.connect_timeout, TcpStream::connect(&self.address)).await,
            Ok(Ok(_))
        )
    }
}

fn next_status(previous: Option<ConnectivityStatus>, reachable: bool) -> ConnectivityStatus {
    match (previous, reachable) {
        (_, true) => ConnectivityStatus::Available,
        (Some(ConnectivityStatus::Available), false) => ConnectivityStatus::Lost,
        (Some(ConnectivityStatus::Lost), false) => ConnectivityStatus::Lost,
        (_, false) => ConnectivityStatus::Unavailable,
    }
}

impl ConnectivityObserver for TcpProbeObserver {
    fn observe(&self) -> mpsc::Receiver<ConnectivityStatus> {
        let (tx, rx) = mpsc::channel(8);
        let observer = self.clone();

        tokio::spawn(async move {
            let mut last = None;
            loop {
                let status = next_status(last, observer.probe().await);
                if last != Some(status) {
                    tracing::debug!("Connectivity to {} is now {:?}", observer.address, status);
                    if tx.send(status).await.is_err() {
                        break;
                    }
                    last = Some(status);
                }

                tokio::select! {
                    _ = tokio::time::sleep(observer.interval) => {}
                    _ = tx.closed() => break,
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_status_transitions() {
        assert_eq!(next_status(None, true), ConnectivityStatus::Available);
        assert_eq!(next_status(None, false), ConnectivityStatus::Unavailable);
        assert_eq!(
            next_status(Some(ConnectivityStatus::Available), false),
            ConnectivityStatus::Lost
        );
        assert_eq!(
            next_status(Some(ConnectivityStatus::Lost), false),
            ConnectivityStatus::Lost
        );
        assert_eq!(
            next_status(Some(ConnectivityStatus::Lost), true),
            ConnectivityStatus::Available
        );
    }

    #[test]
    fn test_for_url_uses_default_port() {
        let observer = TcpProbeObserver::for_url(
            "https://generativelanguage.googleapis.com/",
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(observer.address(), "generativelanguage.googleapis.com:443");
        assert!(TcpProbeObserver::for_url("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_observe_reports_available_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let observer =
            TcpProbeObserver::new(address, Duration::from_millis(50), Duration::from_secs(1));
        let mut statuses = observer.observe();

        assert_eq!(statuses.recv().await, Some(ConnectivityStatus::Available));
    }

    #[tokio::test]
    async fn test_observe_reports_unreachable_port() {
        // 綁定後立即釋放，取得一個沒有人監聽的埠
        let address = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };

        let observer =
            TcpProbeObserver::new(address, Duration::from_millis(50), Duration::from_secs(1));
        let mut statuses = observer.observe();

        assert_eq!(statuses.recv().await, Some(ConnectivityStatus::Unavailable));
    }
}
