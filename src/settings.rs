//! JSON 配置覆盖模块
//!
//! 配置文件中出现的字段覆盖默认值，未出现的保持默认；未知字段直接报错，避免拼写错误被静默忽略。
//! 枚举类字段以字符串给出，与 CLI 共用同一套 `from_str` 解析。

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::Deserialize;

use crate::collage::{CollageConfig, CollageError, FitMode, OutputFormat, SamplingPolicy};
use crate::error::AppError;

/// 配置文件内容，所有字段均可选。
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub dpi: Option<u32>,
    pub canvas_width_cm: Option<f64>,
    pub canvas_height_cm: Option<f64>,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub extend_vertical_px: Option<u32>,
    pub extend_horizontal_px: Option<u32>,
    pub border_cm: Option<f64>,
    pub design_image_cm: Option<[f64; 2]>,
    /// 为 `true` 时忽略设计尺寸，单图直接缩放到单元格尺寸。
    pub resize_to_cell: Option<bool>,
    pub sampling: Option<String>,
    pub sample_strip_px: Option<u32>,
    pub white_threshold: Option<f64>,
    pub output_format: Option<String>,
    pub fit_mode: Option<String>,
    pub resize_filter: Option<String>,
    pub max_file_size: Option<u64>,
    pub max_decoded_pixels: Option<u64>,
}

/// 读取并解析 JSON 配置文件。
pub fn load_overrides(path: &Path) -> Result<ConfigOverrides, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Settings(format!("读取配置文件 '{}' 失败: {}", path.display(), e))
    })?;

    serde_json::from_str::<ConfigOverrides>(&content)
        .map_err(|e| AppError::Settings(format!("解析配置文件失败: {}", e)))
}

fn parse_filter(filter: &str) -> Result<FilterType, CollageError> {
    match filter.trim().to_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" => Ok(FilterType::Triangle),
        "catmullrom" | "catmull-rom" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" => Ok(FilterType::Lanczos3),
        other => Err(CollageError::InvalidConfig(format!(
            "未知缩放滤镜：{}（可选：nearest / triangle / catmullrom / gaussian / lanczos3）",
            other
        ))),
    }
}

impl ConfigOverrides {
    /// 将覆盖项合并到配置上。
    pub fn apply(self, config: &mut CollageConfig) -> Result<(), CollageError> {
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(width) = self.canvas_width_cm {
            config.canvas_width_cm = width;
        }
        if let Some(height) = self.canvas_height_cm {
            config.canvas_height_cm = height;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(px) = self.extend_vertical_px {
            config.extend_vertical_px = px;
        }
        if let Some(px) = self.extend_horizontal_px {
            config.extend_horizontal_px = px;
        }
        if let Some(border) = self.border_cm {
            config.border_cm = border;
        }
        if let Some([width, height]) = self.design_image_cm {
            config.design_image_cm = Some((width, height));
        }
        if self.resize_to_cell == Some(true) {
            config.design_image_cm = None;
        }
        if let Some(policy) = self.sampling {
            config.sampling = SamplingPolicy::from_str(&policy)?;
        }
        if let Some(px) = self.sample_strip_px {
            config.sample_strip_px = px;
        }
        if let Some(threshold) = self.white_threshold {
            config.white_threshold = threshold;
        }
        if let Some(format) = self.output_format {
            config.output_format = OutputFormat::from_str(&format)?;
        }
        if let Some(mode) = self.fit_mode {
            config.fit_mode = FitMode::from_str(&mode)?;
        }
        if let Some(filter) = self.resize_filter {
            config.resize_filter = parse_filter(&filter)?;
        }
        if let Some(limit) = self.max_file_size {
            config.max_file_size = limit;
        }
        if let Some(limit) = self.max_decoded_pixels {
            config.max_decoded_pixels = limit;
        }
        Ok(())
    }
}
