use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("payroll period is already closed")]
    PeriodClosed,

    #[error("device api error: {0}")]
    DeviceApi(String),

    #[error("storage error")]
    Database(#[from] sea_orm::DbErr),
}

impl actix_web::error::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        if let AppError::Database(err) = self {
            tracing::error!(error = %err, "storage failure");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PeriodClosed => StatusCode::CONFLICT,
            AppError::DeviceApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
