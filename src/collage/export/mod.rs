//! # 导出模块
//!
//! ## 设计思路
//!
//! 输出格式是一个封闭的小集合，用枚举分派而不是条件链：新增格式只需新增一个分支与对应子模块。
//! 四种格式都以栅格数据为载荷，PDF / SVG / AI 只是不同的容器，不做矢量化。
//!
//! - `png`：无损 PNG 直接编码
//! - `pdf`：单页 PDF，整页铺一张 300 DPI 的 RGB 图像
//! - `svg`：SVG 文档内嵌 `data:image/png;base64` 图像，按画布物理尺寸标注宽高
//! - `ai`：EPS（PostScript 栅格嵌入），以 `.ai` 扩展名保存，仅作兼容兜底

mod eps;
mod pdf;
mod svg;

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::source::Canvas;
use super::{CollageConfig, CollageError};

/// 输出容器格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Pdf,
    Svg,
    Ai,
}

impl OutputFormat {
    /// 从外部字符串解析输出格式。
    ///
    /// 未知格式在任何文件 I/O 之前以配置错误失败。
    ///
    /// # 示例
    /// ```rust
    /// use collage_sheets::collage::OutputFormat;
    ///
    /// let format = OutputFormat::from_str("PDF")?;
    /// assert_eq!(format.extension(), "pdf");
    /// # Ok::<(), collage_sheets::collage::CollageError>(())
    /// ```
    pub fn from_str(format: &str) -> Result<Self, CollageError> {
        match format.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "svg" => Ok(Self::Svg),
            "ai" => Ok(Self::Ai),
            other => Err(CollageError::InvalidConfig(format!(
                "未知输出格式：{}（可选：png / pdf / svg / ai）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Ai => "ai",
        }
    }

    /// 输出文件扩展名（不含点）。
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// 将画布按当前格式写入 `writer`。
    pub fn write_canvas<W: Write>(
        self,
        canvas: &Canvas,
        config: &CollageConfig,
        writer: &mut W,
    ) -> Result<(), CollageError> {
        match self {
            Self::Png => encode_png(canvas, writer),
            Self::Pdf => pdf::write_pdf(canvas, writer),
            Self::Svg => svg::write_svg(canvas, config, writer),
            Self::Ai => eps::write_eps(canvas, config, writer),
        }
    }
}

/// 无损 PNG 编码。
pub(crate) fn encode_png<W: Write>(canvas: &Canvas, writer: W) -> Result<(), CollageError> {
    let (width, height) = canvas.dimensions();
    PngEncoder::new(writer)
        .write_image(canvas.pixels.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| CollageError::Encode(format!("PNG 编码失败：{}", e)))
}

fn write_error(format: OutputFormat, error: std::io::Error) -> CollageError {
    CollageError::Output(format!("写入 {} 数据失败：{}", format.as_str(), error))
}
