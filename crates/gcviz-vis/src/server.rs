//! Axum web server with WebSocket control for the visualizer.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gcviz_collector::{Algorithm, PhaseDescriptor};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::clock::ClockStatus;
use crate::frame::Frame;
use crate::session::Session;
use crate::simulation::Simulation;

/// Visualization server.
pub struct VisServer {
    session: Arc<Session>,
}

impl VisServer {
    /// Create a new visualization server from a simulation.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            session: Arc::new(Session::new(simulation)),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/phase", get(phase_handler))
            .route("/api/clock", get(clock_handler))
            .route("/api/clock/play", post(play_handler))
            .route("/api/clock/pause", post(pause_handler))
            .route("/api/clock/toggle", post(toggle_handler))
            .route("/api/clock/step", post(step_handler))
            .route("/api/clock/reset", post(reset_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.session.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

/// Server status response.
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    algorithm: Algorithm,
    step: usize,
    playing: bool,
    object_count: usize,
    phase_count: usize,
}

async fn status_handler(State(session): State<Arc<Session>>) -> Json<StatusResponse> {
    let sim = session.simulation().read().await;
    Json(StatusResponse {
        status: "ok",
        algorithm: sim.algorithm(),
        step: sim.step_index(),
        playing: sim.is_playing(),
        object_count: sim.object_count(),
        phase_count: sim.clock().phase_count(),
    })
}

async fn frame_handler(State(session): State<Arc<Session>>) -> Json<Frame> {
    Json(session.frame().await)
}

async fn phase_handler(State(session): State<Arc<Session>>) -> Json<PhaseDescriptor> {
    Json(*session.phase().await)
}

async fn clock_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    Json(session.status().await)
}

async fn play_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    Json(session.play().await)
}

async fn pause_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    Json(session.pause().await)
}

async fn toggle_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    Json(session.toggle().await)
}

async fn step_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    let (_, status) = session.step().await;
    Json(status)
}

async fn reset_handler(State(session): State<Arc<Session>>) -> Json<ClockStatus> {
    Json(session.reset().await)
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: String,
}

async fn algorithm_handler(
    State(session): State<Arc<Session>>,
    Json(req): Json<AlgorithmRequest>,
) -> Result<Json<ClockStatus>, (StatusCode, String)> {
    let algorithm = parse_algorithm(&req.algorithm)?;
    Ok(Json(session.select_algorithm(algorithm).await))
}

/// Unknown collector names are a client error.
fn parse_algorithm(name: &str) -> Result<Algorithm, (StatusCode, String)> {
    name.parse()
        .map_err(|e: gcviz_collector::Error| (StatusCode::BAD_REQUEST, e.to_string()))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(session): State<Arc<Session>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, session))
}

async fn handle_ws(mut socket: WebSocket, session: Arc<Session>) {
    let initial = WsResponse::Frame(Box::new(session.frame().await));
    if let Ok(json) = serde_json::to_string(&initial) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = handle_ws_text(&session, &text).await;
                if let Ok(json) = serde_json::to_string(&response) {
                    let _ = socket.send(Message::Text(json.into())).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetFrame,
    GetStatus,
    Play,
    Pause,
    Toggle,
    Step,
    Reset,
    SelectAlgorithm { algorithm: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Frame(Box<Frame>),
    Status(ClockStatus),
    Error { message: String },
}

/// Answer one text frame. Malformed commands get an error reply.
async fn handle_ws_text(session: &Session, text: &str) -> WsResponse {
    match serde_json::from_str::<WsCommand>(text) {
        Ok(cmd) => handle_ws_command(session, cmd).await,
        Err(e) => WsResponse::Error {
            message: e.to_string(),
        },
    }
}

async fn handle_ws_command(session: &Session, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetFrame => WsResponse::Frame(Box::new(session.frame().await)),
        WsCommand::GetStatus => WsResponse::Status(session.status().await),
        WsCommand::Play => WsResponse::Status(session.play().await),
        WsCommand::Pause => WsResponse::Status(session.pause().await),
        WsCommand::Toggle => WsResponse::Status(session.toggle().await),
        WsCommand::Step => WsResponse::Status(session.step().await.1),
        WsCommand::Reset => WsResponse::Status(session.reset().await),
        WsCommand::SelectAlgorithm { algorithm } => match algorithm.parse::<Algorithm>() {
            Ok(algorithm) => WsResponse::Status(session.select_algorithm(algorithm).await),
            Err(e) => WsResponse::Error {
                message: e.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn server() -> VisServer {
        VisServer::new(Simulation::new(SimulationConfig::default()))
    }

    #[test]
    fn router_builds() {
        let server = server();
        let _router = server.router();
    }

    #[test]
    fn commands_parse() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"get_frame"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::GetFrame));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"select_algorithm","algorithm":"g1"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::SelectAlgorithm { algorithm } if algorithm == "g1"));

        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"seek"}"#).is_err());
    }

    #[test]
    fn step_command_advances() {
        let server = server();
        let response = tokio_test::block_on(handle_ws_command(server.session(), WsCommand::Step));
        match response {
            WsResponse::Status(status) => assert_eq!(status.step, 1),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        let server = server();
        let response = tokio_test::block_on(handle_ws_command(
            server.session(),
            WsCommand::SelectAlgorithm {
                algorithm: "epsilon".into(),
            },
        ));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("epsilon"));
    }

    #[tokio::test]
    async fn unknown_algorithm_is_a_bad_request() {
        let server = server();
        let reply = algorithm_handler(
            State(server.session().clone()),
            Json(AlgorithmRequest {
                algorithm: "epsilon".into(),
            }),
        )
        .await;
        let (status, message) = reply.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("epsilon"));

        let Json(clock) = algorithm_handler(
            State(server.session().clone()),
            Json(AlgorithmRequest {
                algorithm: "g1".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(clock.step, 0);
        assert_eq!(server.session().frame().await.algorithm, Algorithm::RegionCompacting);
    }

    #[test]
    fn algorithm_names_parse() {
        assert_eq!(parse_algorithm("zgc").unwrap(), Algorithm::ConcurrentRelocating);
        assert_eq!(parse_algorithm("").unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_text_gets_error_reply() {
        let server = server();
        for text in ["not json", r#"{"type":"seek","frame":3}"#, r#"{"kind":"play"}"#] {
            let response = handle_ws_text(server.session(), text).await;
            assert!(matches!(response, WsResponse::Error { .. }), "{text}");
        }
        assert_eq!(server.session().status().await.step, 0);

        let response = handle_ws_text(server.session(), r#"{"type":"step"}"#).await;
        assert!(matches!(response, WsResponse::Status(ref s) if s.step == 1));
    }

    #[tokio::test]
    async fn select_algorithm_command_switches() {
        let server = server();
        handle_ws_command(server.session(), WsCommand::Step).await;
        let response = handle_ws_command(
            server.session(),
            WsCommand::SelectAlgorithm {
                algorithm: "zgc".into(),
            },
        )
        .await;
        assert!(matches!(response, WsResponse::Status(ref s) if s.step == 0 && !s.playing));

        let frame = handle_ws_command(server.session(), WsCommand::GetFrame).await;
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"type\":\"frame\""));
        assert!(json.contains("\"algorithm\":\"zgc\""));
    }
}
