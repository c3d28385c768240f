//! 核心响应处理模块

use serde::Serialize;

/// 错误响应 `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// 提示响应 `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}
