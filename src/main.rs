//! 交易信号 API 服务入口

use actix_web::{web, App, HttpServer, middleware::Logger};
use env_logger::Env;
use std::io;
use std::sync::Arc;

use signals_backend::config::AppConfig;
use signals_backend::handlers::{self, AppState};
use signals_backend::services::MongoSignalStore;

/// 应用程序入口
///
/// 读取配置、创建 MongoDB 客户端后启动 HTTP 服务器；
/// 缺少 MONGO_URI 时直接退出，不监听任何端口
#[actix_web::main]
async fn main() -> io::Result<()> {
    let (config, notes) = AppConfig::load_staged();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for (level, message) in notes {
        log::log!(level, "{}", message);
    }

    let config = config.finish().map_err(|e| {
        log::error!("配置加载失败: {:#}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::debug!("当前配置: {:?}", config);

    let store = MongoSignalStore::connect(&config.mongo).await.map_err(|e| {
        log::error!("MongoDB 初始化失败: {:#}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let state = web::Data::new(AppState::new(Arc::new(store)));

    let bind_addr = config.bind_addr();
    log::info!("启动交易信号 API 服务，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(handlers::cors())   // 跨域
            .wrap(Logger::default())  // 请求日志
            .app_data(state.clone())
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
