use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use code_runner::{CodeExecutionService, Language, Submission};
use serde::Deserialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub mod config;
mod page;

pub use config::{ConfigError, ServerConfig};
pub use page::render_page;

const DEFAULT_LANGUAGE: Language = Language::Go;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Language not supported")]
    PageNotFound(String),
    #[error("Unsupported language.")]
    UnsupportedLanguage(String),
    #[error("Execution error: {0}")]
    ExecutionError(#[from] code_runner::Error),
    #[error("Render error: {0}")]
    RenderError(#[from] serde_json::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::PageNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::UnsupportedLanguage(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::ExecutionError(code_runner::Error::TempDir(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not create temp directory.".to_string(),
            ),
            ServerError::ExecutionError(code_runner::Error::WriteSource(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not write to temp file.".to_string(),
            ),
            ServerError::ExecutionError(_)
            | ServerError::RenderError(_)
            | ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Rejected request: {:?}", self);
        }

        (status, message).into_response()
    }
}

/// Fields posted by the editor page, either urlencoded or as
/// `multipart/form-data`.
///
/// Missing fields read as empty strings. A body in any other encoding, or one
/// that fails to parse, yields an empty form so the request still reaches
/// the language check.
#[derive(Debug, Default, Deserialize)]
pub struct RunForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, rename = "inputData")]
    pub input_data: String,
}

#[async_trait]
impl<S> FromRequest<S> for RunForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/x-www-form-urlencoded" => {
                match Form::<RunForm>::from_request(req, state).await {
                    Ok(Form(form)) => Ok(form),
                    Err(e) => {
                        debug!("Ignoring malformed form body: {}", e);
                        Ok(RunForm::default())
                    }
                }
            }
            "multipart/form-data" => match Multipart::from_request(req, state).await {
                Ok(multipart) => Ok(RunForm::from_multipart(multipart).await),
                Err(e) => {
                    debug!("Ignoring malformed multipart body: {}", e);
                    Ok(RunForm::default())
                }
            },
            _ => {
                debug!("No form fields in body with content type {:?}", mime);
                Ok(RunForm::default())
            }
        }
    }
}

impl RunForm {
    /// Keeps the fields read before any parse error.
    async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut form = RunForm::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    debug!("Stopped reading multipart body: {}", e);
                    break;
                }
            };
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => {
                    debug!("Stopped reading multipart field {}: {}", name, e);
                    break;
                }
            };
            match name.as_str() {
                "code" => form.code = value,
                "language" => form.language = value,
                "inputData" => form.input_data = value,
                _ => {}
            }
        }
        form
    }
}

#[derive(Clone)]
pub struct AppState {
    service: CodeExecutionService,
}

pub fn create_app(service: CodeExecutionService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/run", post(run))
        .route("/:language", get(language_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting code runner on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    info!("Code runner shut down");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn home() -> Result<Html<String>, ServerError> {
    Ok(Html(render_page(DEFAULT_LANGUAGE)?))
}

async fn language_page(Path(language): Path<String>) -> Result<Html<String>, ServerError> {
    let language: Language = match language.parse() {
        Ok(language) => language,
        Err(_) => return Err(ServerError::PageNotFound(language)),
    };
    Ok(Html(render_page(language)?))
}

async fn run(State(state): State<AppState>, form: RunForm) -> Result<Response, ServerError> {
    // Reject before any workspace or process exists
    let language: Language = match form.language.parse() {
        Ok(language) => language,
        Err(_) => return Err(ServerError::UnsupportedLanguage(form.language)),
    };

    let result = state
        .service
        .execute(Submission::new(language, form.code, form.input_data))
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        result.render(),
    )
        .into_response())
}
