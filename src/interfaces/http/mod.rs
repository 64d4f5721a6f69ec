pub mod page;
pub mod session;

use crate::application::TestCaseGenerationUseCase;
use crate::domain::api_config::ApiConfigInput;
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCase;
use crate::infrastructure::csv::{export_filename, export_test_cases, CSV_CONTENT_TYPE};
use crate::infrastructure::session_store::SessionStore;
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{get, middleware, post, web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::Local;
use page::{render_index, IndexView};
use serde::{Deserialize, Serialize};
use session::SessionHandle;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Large enough for a sizeable JSON request body pasted into the form.
pub const FORM_LIMIT_BYTES: usize = 256 * 1024;

pub struct HttpState {
    pub generator: Arc<TestCaseGenerationUseCase>,
    pub sessions: Arc<SessionStore>,
}

/// Wire shape shared with the model output: `{"testCases": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestCaseEnvelope {
    #[serde(rename = "testCases")]
    pub test_cases: Vec<TestCase>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Deserialize)]
pub struct IndexQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

fn status_for(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_failure(action: &str, err: &AppError) {
    match err {
        AppError::ValidationError(_) | AppError::EmptyExportError => {
            info!(kind = err.kind(), "{} rejected: {}", action, err)
        }
        AppError::ParseError(_) => warn!(kind = err.kind(), "{} failed: {}", action, err),
        _ => error!(kind = err.kind(), "{} failed: {}", action, err),
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ErrorBody {
        error: err.kind(),
        message: err.user_message(),
    })
}

fn redirect(session: &SessionHandle, location: &str) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    session.attach(&mut builder);
    builder.finish()
}

fn csv_attachment(test_cases: &[TestCase]) -> Result<HttpResponse> {
    let bytes = export_test_cases(test_cases)?;
    let filename = export_filename(&Local::now());
    info!(count = test_cases.len(), filename = %filename, "Exporting test cases");

    Ok(HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"))
        .body(bytes))
}

async fn run_generation(state: &HttpState, input: ApiConfigInput) -> Result<Vec<TestCase>> {
    let api_config = input.validate()?;
    state.generator.execute(&api_config).await
}

#[get("/")]
async fn index(
    req: HttpRequest,
    data: web::Data<HttpState>,
    query: web::Query<IndexQuery>,
) -> HttpResponse {
    let session = SessionHandle::from_request(&req);

    let mut view = IndexView::default();
    if query.success.is_some() {
        view.test_cases = data.sessions.take_for_display(&session.id);
    }
    if query.error.is_some() {
        view.error = data.sessions.take_error(&session.id);
    }

    let mut builder = HttpResponse::Ok();
    session.attach(&mut builder);
    builder
        .content_type("text/html; charset=utf-8")
        .body(render_index(&view))
}

#[post("/")]
async fn generate(
    req: HttpRequest,
    data: web::Data<HttpState>,
    form: web::Form<ApiConfigInput>,
) -> HttpResponse {
    let session = SessionHandle::from_request(&req);

    match run_generation(&data, form.into_inner()).await {
        Ok(test_cases) => {
            data.sessions.store_generated(&session.id, test_cases);
            redirect(&session, "/?success=1")
        }
        Err(err) => {
            log_failure("Test case generation", &err);
            data.sessions.set_error(&session.id, err.user_message());
            redirect(&session, "/?error=1")
        }
    }
}

#[get("/clear")]
async fn clear(req: HttpRequest, data: web::Data<HttpState>) -> HttpResponse {
    let session = SessionHandle::from_request(&req);
    data.sessions.clear(&session.id);
    redirect(&session, "/")
}

#[get("/export/csv")]
async fn export_csv(req: HttpRequest, data: web::Data<HttpState>) -> HttpResponse {
    let session = SessionHandle::from_request(&req);
    let test_cases = data.sessions.last_exported(&session.id).unwrap_or_default();

    match csv_attachment(&test_cases) {
        Ok(response) => response,
        Err(err) => {
            log_failure("CSV export", &err);
            data.sessions.set_error(&session.id, err.user_message());
            redirect(&session, "/?error=1")
        }
    }
}

#[post("/test-cases")]
async fn api_generate(
    req: HttpRequest,
    data: web::Data<HttpState>,
    body: web::Json<ApiConfigInput>,
) -> HttpResponse {
    let session = SessionHandle::from_request(&req);

    match run_generation(&data, body.into_inner()).await {
        Ok(test_cases) => {
            data.sessions
                .store_exportable(&session.id, test_cases.clone());
            let mut builder = HttpResponse::Ok();
            session.attach(&mut builder);
            builder.json(TestCaseEnvelope { test_cases })
        }
        Err(err) => {
            log_failure("Test case generation", &err);
            error_response(&err)
        }
    }
}

#[post("/test-cases/csv")]
async fn api_export_csv(body: web::Json<TestCaseEnvelope>) -> HttpResponse {
    match csv_attachment(&body.test_cases) {
        Ok(response) => response,
        Err(err) => {
            log_failure("CSV export", &err);
            error_response(&err)
        }
    }
}

/// Unreadable form submissions follow the same flash-and-redirect flow as
/// validation failures.
fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    let session = SessionHandle::from_request(req);
    let app_err = AppError::ValidationError(format!("Invalid form submission: {}", err));
    log_failure("Form submission", &app_err);
    if let Some(data) = req.app_data::<web::Data<HttpState>>() {
        data.sessions.set_error(&session.id, app_err.user_message());
    }
    InternalError::from_response(err, redirect(&session, "/?error=1")).into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = AppError::ValidationError(format!("Invalid JSON payload: {}", err));
    log_failure("JSON request", &app_err);
    InternalError::from_response(err, error_response(&app_err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT_BYTES)
            .error_handler(form_error),
    )
    .service(index)
        .service(generate)
        .service(clear)
        .service(export_csv)
        .service(
            web::scope("/api")
                .app_data(web::JsonConfig::default().error_handler(json_error))
                .wrap(Cors::permissive())
                .service(api_generate)
                .service(api_export_csv),
        );
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
