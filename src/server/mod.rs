//! Preview server for the output directory, with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::SHELL_FILE;
use crate::{Site, CONFIG_FILE};

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    output_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    if !site.output_dir.join(SHELL_FILE).exists() {
        tracing::warn!(
            "No shell document in {:?}; unmatched routes will answer 404",
            site.output_dir
        );
    }

    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        output_dir: site.output_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    // Create router with live reload endpoint
    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Server running at {}", url);
    if watch {
        tracing::info!("Live reload enabled. Watching for changes...");
    }
    tracing::info!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // Start file watcher if watch mode is enabled
    if watch {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(site, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch content and configuration, rebuild and trigger reload
fn watch_and_reload(site: Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let config_path = site.base_dir.join(CONFIG_FILE);
    for path in [&site.content_dir, &site.about_path, &config_path] {
        if path.exists() {
            debouncer
                .watcher()
                .watch(path, RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    // Handle file change events
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Editor swap and backup files
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                            && !path_str.ends_with(".swp")
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                for event in &relevant_events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Configuration may have changed too
                let result = Site::new(&site.base_dir).and_then(|site| site.build());
                match result {
                    Ok(_) => {
                        tracing::info!("Rebuilt successfully");
                        // Notify all connected clients to reload
                        let _ = reload_tx.send(());
                    }
                    Err(e) => {
                        tracing::error!("Build failed: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// What a request path maps to in the output directory
#[derive(Debug, Clone, PartialEq)]
enum Target {
    File(PathBuf),
    /// A client route with no folder of its own: answered with the shell
    Shell(PathBuf),
    Missing,
}

/// Map a request path onto the output directory the way a static host
/// with single-page-application fallback does
fn resolve(output_dir: &Path, path: &str) -> Target {
    let clean_path = path.trim_start_matches('/');
    let decoded = percent_decode_str(clean_path).decode_utf8_lossy();
    if escapes_root(clean_path) || escapes_root(&decoded) {
        return Target::Missing;
    }

    for candidate_path in [clean_path, &*decoded] {
        let candidate = output_dir.join(candidate_path);
        if !is_within(output_dir, &candidate) {
            return Target::Missing;
        }
        if candidate.is_dir() {
            let index = candidate.join(SHELL_FILE);
            if index.exists() {
                return Target::File(index);
            }
        } else if candidate.is_file() {
            return Target::File(candidate);
        }
    }

    // Missing assets stay missing; anything that looks like a route gets
    // the shell
    let last = clean_path.rsplit('/').next().unwrap_or_default();
    let shell = output_dir.join(SHELL_FILE);
    if last.contains('.') || !shell.exists() {
        Target::Missing
    } else {
        Target::Shell(shell)
    }
}

/// Whether a relative request path climbs out of its root
fn escapes_root(path: &str) -> bool {
    path.split(['/', '\\'])
        .any(|segment| segment == "..")
}

/// Whether an existing `candidate` lies under `root` once symlinks are
/// resolved. Paths that do not exist are left to the caller.
fn is_within(root: &Path, candidate: &Path) -> bool {
    match (root.canonicalize(), candidate.canonicalize()) {
        (Ok(root), Ok(candidate)) => candidate.starts_with(root),
        _ => true,
    }
}

/// Fallback handler that serves files, answers client routes with the shell
/// and injects the live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let file_path = match resolve(&state.output_dir, request.uri().path()) {
        Target::File(path) => path,
        Target::Shell(shell) => {
            tracing::debug!("Serving shell for {}", request.uri().path());
            shell
        }
        Target::Missing => return (StatusCode::NOT_FOUND, "Not found").into_response(),
    };

    // Check if it's an HTML file that needs live reload injection
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) if state.live_reload => Html(inject_live_reload(&content)).into_response(),
            Ok(content) => Html(content).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.output_dir);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
