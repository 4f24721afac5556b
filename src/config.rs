//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，再由环境变量覆盖。
//! MongoDB 连接串只从环境变量 `MONGO_URI` 读取，缺失时拒绝启动。

use anyhow::{anyhow, Context};
use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// 配置加载过程中产生、待日志初始化后输出的信息
pub type ConfigNote = (Level, String);

/// 连接串环境变量名
pub const MONGO_URI_ENV: &str = "MONGO_URI";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// MongoDB 配置
#[derive(Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// 连接串（配置文件中通常留空，由 MONGO_URI 提供）
    #[serde(default)]
    pub uri: String,
    /// 数据库名
    #[serde(default = "default_database")]
    pub database: String,
    /// 信号集合名
    #[serde(default = "default_collection")]
    pub collection: String,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 单次查询超时时间（秒）
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

// 连接串可能带账号密码，不能出现在日志里
impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &if self.uri.is_empty() { "<unset>" } else { "<redacted>" })
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .finish()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// MongoDB 配置
    #[serde(default)]
    pub mongo: MongoConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_database() -> String { "trading".to_string() }
fn default_collection() -> String { "daily_signals".to_string() }
fn default_connect_timeout() -> u64 { 10 }
fn default_query_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: default_database(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 第一阶段：读取 .env 和配置文件
    ///
    /// 此时日志系统尚未初始化（日志级别本身来自配置文件），
    /// 加载过程中的信息以 `ConfigNote` 返回，由调用方在初始化日志后输出
    pub fn load_staged() -> (Self, Vec<ConfigNote>) {
        let mut notes = Vec::new();
        if let Ok(path) = dotenvy::dotenv() {
            notes.push((Level::Info, format!("从 {} 加载环境变量", path.display())));
        }

        let (config, file_notes) = Self::load_from_paths(&["config.json", "config/config.json"]);
        notes.extend(file_notes);
        (config, notes)
    }

    /// 第二阶段：环境变量覆盖 → 校验连接串
    pub fn finish(mut self) -> anyhow::Result<Self> {
        self.apply_env(|key| std::env::var(key).ok())?;
        self.validate()?;
        Ok(self)
    }

    /// 按顺序尝试配置文件，第一个可用的生效，都不可用则使用默认值
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> (Self, Vec<ConfigNote>) {
        let mut notes = Vec::new();

        for path in paths {
            let path = path.as_ref();
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        notes.push((Level::Info, format!("从 {} 加载配置成功", path.display())));
                        return (config, notes);
                    }
                    Err(e) => {
                        notes.push((Level::Warn, format!("加载配置文件 {} 失败: {}", path.display(), e)));
                    }
                }
            }
        }

        notes.push((Level::Info, "使用默认配置".to_string()));
        (Self::default(), notes)
    }

    /// 用环境变量覆盖配置
    ///
    /// `lookup` 抽象了环境变量读取，测试里可以传入固定的映射
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = non_empty(MONGO_URI_ENV) {
            self.mongo.uri = uri;
        }
        if let Some(db) = non_empty("MONGO_DB") {
            self.mongo.database = db;
        }
        if let Some(coll) = non_empty("MONGO_COLLECTION") {
            self.mongo.collection = coll;
        }
        if let Some(host) = non_empty("HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT 不是合法端口: {}", port))?;
        }
        Ok(())
    }

    /// 校验必填项
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.mongo.uri.trim().is_empty() {
            return Err(anyhow!("{} 未设置，服务无法启动", MONGO_URI_ENV));
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
