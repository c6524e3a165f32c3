//! 输出目录与文件写入模块
//!
//! # 设计思路
//!
//! 统一管理拼版结果的落盘路径与写入方式，目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 输出文件名固定为 `final_canvas_<N>.<ext>`，`N` 为从 0 开始的批次序号。
//! - 先写入同目录下的 `.part` 临时文件，完整写完并落盘后再 `rename` 到最终路径，
//!   进程中途被终止时不会留下截断的结果文件。
//! - 写入失败时尽力删除临时文件，错误原样向上返回。

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::collage::{CollageError, OutputFormat};

const CANVAS_FILE_PREFIX: &str = "final_canvas_";
const PARTIAL_SUFFIX: &str = ".part";

/// 确保输出目录存在。
pub fn ensure_output_dir(dir: &Path) -> Result<(), CollageError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            CollageError::Output(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
        })?;
    }
    Ok(())
}

/// 第 `index` 个批次的输出文件名。
pub fn canvas_file_name(index: usize, format: OutputFormat) -> String {
    format!("{}{}.{}", CANVAS_FILE_PREFIX, index, format.extension())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// 原子写入：临时文件写完后重命名到 `path`。
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), CollageError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), CollageError>,
{
    let temp_path = partial_path(path);

    let result = (|| -> Result<(), CollageError> {
        let file = File::create(&temp_path).map_err(|e| {
            CollageError::Output(format!("创建临时文件 '{}' 失败: {}", temp_path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        let file = writer
            .into_inner()
            .map_err(|e| CollageError::Output(format!("刷新输出缓冲失败: {}", e.error())))?;
        file.sync_all()
            .map_err(|e| CollageError::Output(format!("同步输出文件失败: {}", e)))?;

        fs::rename(&temp_path, path).map_err(|e| {
            CollageError::Output(format!("重命名到 '{}' 失败: {}", path.display(), e))
        })
    })();

    if result.is_err() && temp_path.exists() {
        if let Err(err) = fs::remove_file(&temp_path) {
            log::warn!("清理临时文件失败 '{}': {}", temp_path.display(), err);
        }
    }

    result
}
