use actix_web::{web, HttpResponse, Result};
use crate::models::HealthStatus;

/// 存活探针，不访问数据库
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthStatus::ok()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_check));
}
