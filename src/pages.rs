use actix_web::web;

mod attendance;
mod holidays;
mod payroll;
mod rates;
mod scans;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/scans")
            .configure(scans::config))
        .service(web::scope("/attendance")
            .configure(attendance::config))
        .service(web::scope("/payroll")
            .configure(payroll::config))
        .service(web::scope("/rates")
            .configure(rates::config))
        .service(web::scope("/holidays")
            .configure(holidays::config));
}
