use std::ops::Deref;

use super::*;

impl FromRequest for payroll_period::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let period_id = req.match_info().get("period_id").expect("This extractor must be used under `period_id` path");
            let Ok(period_id) = Uuid::from_str(period_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `period_id`"))
            };

            let db = req.app_data::<web::Data<DatabaseConnection>>().expect("DatabaseConnection must be attached");

            let period = PayrollPeriod::find_by_id(period_id)
                .one(db.as_ref()).await
                .map_err(AppError::from)?;

            let Some(period) = period else {
                return Err(AppError::NotFound("payroll period").into())
            };

            Ok(period)
        })
    }
}

/// A payroll period that still accepts payroll generation.
pub(super) struct OpenPeriod(pub(super) payroll_period::Model);

impl Deref for OpenPeriod {
    type Target = payroll_period::Model;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OpenPeriod {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let period = payroll_period::Model::from_request(&req, &mut dev::Payload::None).await?;

            if period.is_closed {
                return Err(AppError::PeriodClosed.into());
            }

            Ok(Self(period))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::entity::sea_orm_active_enums::PeriodType;

    use super::*;

    fn period(is_closed: bool) -> payroll_period::Model {
        payroll_period::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            name: "June 2026".to_string(),
            period_type: PeriodType::Monthly,
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            is_closed,
            payment_date: None,
        }
    }

    #[actix_web::test]
    async fn test_period_extractor() {
        #[get("/{period_id}")]
        async fn test_handler(period: payroll_period::Model) -> impl Responder {
            web::Json(period)
        }

        let open_period = period(false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ open_period.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", open_period.id))
            .to_request();

        let returned_period: payroll_period::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned_period, open_period);
    }

    #[actix_web::test]
    async fn test_period_extractor_unknown_period() {
        #[get("/{period_id}")]
        async fn test_handler(period: payroll_period::Model) -> impl Responder {
            web::Json(period)
        }

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<payroll_period::Model>::new(),
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", Uuid::new_v4()))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_open_period_extractor_rejects_closed_period() {
        #[get("/{period_id}")]
        async fn test_handler(period: OpenPeriod) -> impl Responder {
            web::Json(period.0)
        }

        let open_period = period(false);
        let closed_period = period(true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ open_period.clone() ],
                vec![ closed_period.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", open_period.id))
            .to_request();

        let returned_period: payroll_period::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned_period, open_period);

        let req = test::TestRequest::default()
            .uri(&format!("/{}", closed_period.id))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
