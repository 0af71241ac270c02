use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{error, http::header, web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod deed;
pub mod document;
pub mod state;
pub mod store;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            detail: None,
            fields: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = Some(fields);
        self
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::deed::handlers::create_deed),
    components(schemas(
        deed::models::CreateDeedRequest,
        deed::models::Deed,
        ErrorResponse,
    )),
    tags((name = "Deed Service", description = "Sale deed generation endpoint."))
)]
pub struct ApiDoc;

/// JSON body errors answered with the common error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid JSON body: {}", err);
        log::info!("{}", message);
        let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        error::InternalError::from_response(err, response).into()
    })
}

/// API routes, shared by the server and the integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(deed::config));
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to connect to database. Please check DATABASE_URL and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("sale_deed_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let data = web::Data::new(app_state.clone());
    let allowed_origins = config.allowed_origins.clone();
    let static_dir = config.static_dir.clone();

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(data.clone())
            .app_data(json_config())
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .service(actix_files::Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;

    log::info!("Server stopped, releasing resources");
    app_state.shutdown().await;

    result
}
