//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级统一的 `AppError` 枚举，`main` 只需要处理这一种错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `CollageError` 提供 `From` 转换，`?` 可直接上转。
//! - 配置文件读取/解析错误单独成类，便于和拼版流水线错误区分。

use crate::collage::CollageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 拼版流水线错误（配置 / 加载 / 解码 / 导出）
    #[error("{0}")]
    Collage(#[from] CollageError),

    /// 配置文件不可用
    #[error("配置文件错误: {0}")]
    Settings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collage_errors_convert_with_question_mark() {
        fn fail() -> Result<(), AppError> {
            Err::<(), _>(CollageError::InvalidConfig("rows".to_string()))?;
            Ok(())
        }

        let err = fail().expect_err("should fail");
        assert!(matches!(err, AppError::Collage(CollageError::InvalidConfig(_))));
        assert_eq!(err.to_string(), "配置错误：rows");
    }
}
