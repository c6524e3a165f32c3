//! # 输入枚举与加载模块
//!
//! ## 设计思路
//!
//! 统一处理输入目录枚举与单文件字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要的解码开销。
//!
//! ## 实现思路
//!
//! - 目录：只接受普通文件，扩展名白名单 png / jpg / jpeg（不区分大小写），按文件名排序保证顺序稳定。
//! - 文件：存在性 + metadata 体积限制 + 读取 + `infer` 签名校验。

use std::path::{Path, PathBuf};

use super::source::RawImageData;
use super::{CollageConfig, CollageError, CollageHandler};

const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// 扩展名是否在白名单内（不区分大小写）。
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 枚举输入目录中的图片文件，按文件名排序。
pub fn enumerate_inputs(input_dir: &Path) -> Result<Vec<PathBuf>, CollageError> {
    if !input_dir.is_dir() {
        return Err(CollageError::FileSystem(format!(
            "输入目录不存在：{}",
            input_dir.display()
        )));
    }

    let entries = std::fs::read_dir(input_dir)
        .map_err(|e| CollageError::FileSystem(format!("无法读取输入目录：{}", e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| CollageError::FileSystem(format!("无法读取目录项：{}", e)))?;
        let path = entry.path();
        if path.is_file() && has_allowed_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

impl CollageHandler {
    /// 从本地路径加载图片原始字节。
    pub(crate) fn load_from_file(
        &self,
        path: &Path,
        config: &CollageConfig,
    ) -> Result<RawImageData, CollageError> {
        log::debug!("📁 读取图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(CollageError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| CollageError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > config.max_file_size {
            return Err(CollageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）- {}",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0,
                path.display()
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            CollageError::FileSystem(format!("无法读取图片文件 {}：{}", path.display(), e))
        })?;
        Self::validate_image_signature(&bytes, path)?;

        Ok(RawImageData {
            bytes,
            path: path.to_path_buf(),
        })
    }

    fn validate_image_signature(bytes: &[u8], path: &Path) -> Result<(), CollageError> {
        if bytes.is_empty() {
            return Err(CollageError::InvalidFormat(format!(
                "图片内容为空：{}",
                path.display()
            )));
        }

        let kind = infer::get(bytes).ok_or_else(|| {
            CollageError::InvalidFormat(format!("无法识别图片类型：{}", path.display()))
        })?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(CollageError::InvalidFormat(format!(
                "文件签名不是图片类型：{}（{}）",
                kind.mime_type(),
                path.display()
            )));
        }

        Ok(())
    }
}
