use thiserror::Error;

use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("请求校验失败: {0}")]
    Validation(#[from] ValidationError),
    #[error("请求 {request_id} 没有可用报价（no route found）")]
    NoQuoteAvailable { request_id: String },
    #[error("报价调用已取消")]
    Cancelled,
    #[error("配置缺失或非法: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
