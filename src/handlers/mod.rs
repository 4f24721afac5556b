pub mod signals;
pub mod health;

use actix_cors::Cors;
use actix_web::web;
use std::sync::Arc;

use crate::services::SignalStore;

/// 请求间共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SignalStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SignalStore>) -> Self {
        Self { store }
    }
}

/// 允许任意来源跨域访问
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config)
        .configure(signals::config);
}
