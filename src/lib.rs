//! MongoDB 交易信号查询服务
//!
//! 按交易日期读取每日买入信号文档，投影为固定格式的 JSON 返回

pub mod config;   // 配置加载
pub mod handlers; // HTTP 请求处理器
pub mod models;   // 数据模型定义
pub mod services; // 业务逻辑服务
