//! HTTP server exposing the scrape endpoint.
//!
//! Each `GET /metrics` runs one full collection cycle against the
//! controller. Scrapes are serialized so only one cycle uses the shared
//! controller session at a time.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use unifi_exporter_core::exposition::{CONTENT_TYPE, render};
use unifi_exporter_core::{Collector, StationSource};

use crate::error::CliError;

const LANDING_PAGE: &str = "<html>\n\
<head><title>UniFi Exporter</title></head>\n\
<body>\n\
<h1>UniFi Exporter</h1>\n\
<p><a href=\"/metrics\">Metrics</a></p>\n\
</body>\n\
</html>\n";

/// Shared state for all HTTP handlers.
struct ServerState<S> {
    collector: Collector<S>,
    scrape_lock: Mutex<()>,
}

/// Build the router: `/metrics` scrapes, `/` links to it.
pub fn router<S: StationSource + 'static>(collector: Collector<S>) -> Router {
    let state = Arc::new(ServerState {
        collector,
        scrape_lock: Mutex::new(()),
    });
    Router::new()
        .route("/", get(handle_root))
        .route("/metrics", get(handle_metrics::<S>))
        .with_state(state)
}

/// Serve until `shutdown` completes.
pub async fn serve<S: StationSource + 'static>(
    addr: SocketAddr,
    collector: Collector<S>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("metrics available at http://{addr}/metrics");

    axum::serve(listener, router(collector))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}

async fn handle_root() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn handle_metrics<S: StationSource>(State(state): State<Arc<ServerState<S>>>) -> Response {
    let _guard = state.scrape_lock.lock().await;
    debug!("scrape started");

    let samples = state.collector.collect().await;
    match render(&samples) {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(err) => {
            error!(error = %err, "rendering metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "installing Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "installing SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::to_bytes;

    use unifi_exporter_core::{CoreError, NetworkFilter, Station};

    use super::*;

    struct StaticSource {
        up: bool,
        scrapes: AtomicUsize,
    }

    impl StationSource for StaticSource {
        async fn authenticate(&self) -> Result<(), CoreError> {
            self.scrapes.fetch_add(1, Ordering::SeqCst);
            if self.up {
                Ok(())
            } else {
                Err(CoreError::AuthenticationFailed {
                    message: "denied".into(),
                })
            }
        }

        async fn stations(&self) -> Result<Vec<Station>, CoreError> {
            Ok(vec![Station {
                mac: "AA:BB".into(),
                hostname: "h1".into(),
                network: "main".into(),
                manufacturer: "Acme".into(),
                wired: true,
                ip: "10.0.0.5".into(),
                uptime: 120,
                last_seen: 1_700_000_000,
                tx_bytes: 500,
                rx_bytes: 200,
            }])
        }
    }

    fn state(up: bool) -> Arc<ServerState<StaticSource>> {
        Arc::new(ServerState {
            collector: Collector::new(
                StaticSource {
                    up,
                    scrapes: AtomicUsize::new(0),
                },
                NetworkFilter::new(["main"]),
            ),
            scrape_lock: Mutex::new(()),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8")
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_text_format() {
        let response = handle_metrics(State(state(true))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
        let body = body_text(response).await;
        assert!(body.lines().any(|l| l == "up 1"), "{body}");
        assert!(body.contains("unifi_station_tx_bytes{"), "{body}");
    }

    #[tokio::test]
    async fn controller_failure_is_still_a_successful_scrape() {
        let response = handle_metrics(State(state(false))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.lines().any(|l| l == "up 0"), "{body}");
        assert!(!body.contains("unifi_station"));
    }

    #[tokio::test]
    async fn every_request_runs_a_collection() {
        let state = state(true);
        handle_metrics(State(Arc::clone(&state))).await;
        handle_metrics(State(Arc::clone(&state))).await;

        assert_eq!(
            state.collector.source().scrapes.load(Ordering::SeqCst),
            2
        );
    }

    #[tokio::test]
    async fn landing_page_links_to_metrics() {
        let Html(page) = handle_root().await;
        assert!(page.contains("href=\"/metrics\""));
    }
}
