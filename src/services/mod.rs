//! 业务逻辑服务模块
//!
//! 封装日期解析、存储访问和返回体组装

pub mod date;           // 交易日期解析
pub mod signal_service; // 信号查询
pub mod store;          // 文档存储

pub use store::{MemorySignalStore, MongoSignalStore, SignalStore};
