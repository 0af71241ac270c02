use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Local;

use super::models::CreateDeedRequest;
use super::service::{process_submission, DeedError, SubmissionStage};
use crate::document::{TemplateError, DEED_FILENAME};
use crate::{AppState, ErrorResponse};

impl From<DeedError> for HttpResponse {
    fn from(error: DeedError) -> Self {
        match &error {
            DeedError::MissingFields(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&error.to_string()))
            }
            DeedError::Invalid(errors) => HttpResponse::BadRequest().json(
                ErrorResponse::bad_request(&errors.summary()).with_fields(errors.to_field_map()),
            ),
            DeedError::Template(TemplateError::NotFound(_)) => HttpResponse::InternalServerError()
                .json(ErrorResponse::new(error.kind(), "Template file not found")),
            DeedError::Template(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::new(error.kind(), "Template could not be read")),
            DeedError::Storage(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::new(error.kind(), "Failed to save deed")),
            DeedError::Render(e) => HttpResponse::InternalServerError().json(
                ErrorResponse::new(error.kind(), "PDF generation failed").with_detail(e.summary()),
            ),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/createdeed",
    tag = "Deed Service",
    request_body = CreateDeedRequest,
    responses(
        (status = 200, description = "Generated sale deed", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 405, description = "Only POST is allowed", body = ErrorResponse),
        (status = 500, description = "Template, storage or PDF generation failure", body = ErrorResponse)
    )
)]
pub async fn create_deed(
    state: web::Data<AppState>,
    body: web::Json<CreateDeedRequest>,
) -> HttpResponse {
    let today = Local::now().date_naive();

    match process_submission(&state, body.into_inner(), today).await {
        Ok(deed) => {
            log::debug!("Deed {} {}", deed.record.id, SubmissionStage::Responded);
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", DEED_FILENAME),
                ))
                .insert_header((header::CONTENT_LENGTH, deed.pdf.len()))
                .body(deed.pdf)
        }
        Err(e) => e.into(),
    }
}

/// Any method other than POST on the deed endpoint.
pub async fn method_not_allowed(req: HttpRequest) -> impl Responder {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ErrorResponse::new(
            "MethodNotAllowed",
            &format!("Method {} Not Allowed", req.method()),
        ))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/createdeed")
            .route(web::post().to(create_deed))
            .default_service(web::to(method_not_allowed)),
    );
}
