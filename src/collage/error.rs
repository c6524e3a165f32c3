//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载拼版链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配：
//! 配置错误在任何文件 I/O 之前抛出，输入错误与输出错误分开，便于定位失败阶段。

/// 拼版处理统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`，最终由 `main` 打印并以非零码退出。
#[derive(Debug, thiserror::Error)]
pub enum CollageError {
    #[error("配置错误：{0}")]
    InvalidConfig(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("输出错误：{0}")]
    Output(String),

    #[error("编码错误：{0}")]
    Encode(String),
}
