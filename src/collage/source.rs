//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“输入文件”和“流水线中间结果”解耦：
//! - `RawImageData` 表示已读入但未解码的字节
//! - `SourceImage` 表示解码后的 RGB 原图
//! - `ProcessedImage` 表示扩边、白边、缩放之后的单图
//! - `Canvas` 表示一个批次独占的整张画布

use std::path::PathBuf;

use image::{Rgb, RgbImage};

/// 画布背景色：未填充的单元格保持该颜色。
pub const CANVAS_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// 加载阶段输出：原始字节与来源路径。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 来源路径（用于日志与诊断）。
    pub(crate) path: PathBuf,
}

/// 解码后的原图。放入画布后即被释放。
pub struct SourceImage {
    pub path: PathBuf,
    pub pixels: RgbImage,
}

/// 单图处理结果，尺寸恒等于配置的设计尺寸。
pub struct ProcessedImage {
    pub pixels: RgbImage,
}

impl ProcessedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// 单个批次的画布。
pub struct Canvas {
    pub pixels: RgbImage,
    /// 已放置的图片数量（按行优先顺序从 (0,0) 起连续填充）。
    pub placed: usize,
}

impl Canvas {
    /// 创建填满背景色的空白画布。
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, CANVAS_BACKGROUND),
            placed: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}
