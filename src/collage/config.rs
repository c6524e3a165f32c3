//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调常量”集中到不可变的 `CollageConfig`，显式传给每个组件，
//! 而不是散落的全局常量。这样同一进程内可以并存多套配置，单测也能直接构造小尺寸配置。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的 90×90 cm / 300 DPI / 10×15 网格配置。
//! - 物理尺寸（cm）统一经 `cm_to_px` 按 DPI 换算为像素。
//! - `SamplingPolicy` / `FitMode` 负责字符串解析与反向输出（CLI 与 JSON 配置共用）。
//! - `validate` 在任何文件 I/O 之前执行，非法配置直接失败。

use image::imageops::FilterType;

use super::CollageError;
use super::export::OutputFormat;

const CM_PER_INCH: f64 = 2.54;

/// 将物理长度（厘米）按 DPI 换算为像素，四舍五入。
pub fn cm_to_px(cm: f64, dpi: u32) -> u32 {
    (cm * (dpi as f64 / CM_PER_INCH)).round().max(0.0) as u32
}

/// 拼版运行配置。
///
/// 字段覆盖画布、网格、单图变换、取色、输出与输入资源限制几个阶段。
#[derive(Debug, Clone)]
pub struct CollageConfig {
    /// 像素换算使用的分辨率。
    pub dpi: u32,
    /// 画布物理宽度（厘米）。
    pub canvas_width_cm: f64,
    /// 画布物理高度（厘米）。
    pub canvas_height_cm: f64,
    /// 网格行数。
    pub rows: u32,
    /// 网格列数。
    pub columns: u32,
    /// 上下边缘各扩展的像素数。
    pub extend_vertical_px: u32,
    /// 左右边缘各扩展的像素数。
    pub extend_horizontal_px: u32,
    /// 白边物理宽度（厘米），0 表示不加白边。
    pub border_cm: f64,
    /// 单图设计尺寸（宽, 高，厘米，不含扩边与白边）。
    ///
    /// 为 `None` 时单图直接缩放到单元格尺寸。
    pub design_image_cm: Option<(f64, f64)>,
    /// 背景色取样策略。
    pub sampling: SamplingPolicy,
    /// 底部取样条带高度（像素），0 退化为只取最底一行。
    pub sample_strip_px: u32,
    /// `Dominant` 策略下白色像素占比超过该值时直接取白色。
    pub white_threshold: f64,
    /// 输出容器格式。
    pub output_format: OutputFormat,
    /// 单元格放置方式。
    pub fit_mode: FitMode,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
    /// 单个输入文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            canvas_width_cm: 90.0,
            canvas_height_cm: 90.0,
            rows: 10,
            columns: 15,
            extend_vertical_px: 18,
            extend_horizontal_px: 18,
            border_cm: 0.0,
            design_image_cm: None,
            sampling: SamplingPolicy::Mode,
            sample_strip_px: 20,
            white_threshold: 0.8,
            output_format: OutputFormat::Png,
            fit_mode: FitMode::Cover,
            resize_filter: FilterType::Lanczos3,
            max_file_size: 200 * 1024 * 1024,
            max_decoded_pixels: 200_000_000,
        }
    }
}

impl CollageConfig {
    /// 画布像素尺寸（宽, 高）。整次运行固定不变。
    pub fn canvas_px(&self) -> (u32, u32) {
        (
            cm_to_px(self.canvas_width_cm, self.dpi),
            cm_to_px(self.canvas_height_cm, self.dpi),
        )
    }

    /// 单元格像素尺寸：画布宽 / 列数，画布高 / 行数（整除）。
    pub fn cell_px(&self) -> (u32, u32) {
        let (width, height) = self.canvas_px();
        (width / self.columns.max(1), height / self.rows.max(1))
    }

    /// 单张画布最多容纳的图片数。
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn border_px(&self) -> u32 {
        cm_to_px(self.border_cm, self.dpi)
    }

    /// 单图缩放的目标像素尺寸。
    ///
    /// 配置了设计尺寸时为“设计尺寸 + 两侧扩边 + 两侧白边”，否则等于单元格尺寸。
    pub fn design_px(&self) -> (u32, u32) {
        match self.design_image_cm {
            Some((width_cm, height_cm)) => {
                let border = self.border_px();
                (
                    cm_to_px(width_cm, self.dpi) + 2 * (self.extend_horizontal_px + border),
                    cm_to_px(height_cm, self.dpi) + 2 * (self.extend_vertical_px + border),
                )
            }
            None => self.cell_px(),
        }
    }

    /// 校验配置组合是否可用。
    ///
    /// 必须在枚举输入目录之前调用，保证配置错误不会产生任何文件副作用。
    pub fn validate(&self) -> Result<(), CollageError> {
        if self.dpi == 0 {
            return Err(CollageError::InvalidConfig("dpi 必须大于 0".to_string()));
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(CollageError::InvalidConfig(format!(
                "网格行列数必须大于 0（当前：{} 行 × {} 列）",
                self.rows, self.columns
            )));
        }
        if !(self.canvas_width_cm.is_finite() && self.canvas_width_cm > 0.0)
            || !(self.canvas_height_cm.is_finite() && self.canvas_height_cm > 0.0)
        {
            return Err(CollageError::InvalidConfig(format!(
                "画布尺寸非法：{} × {} cm",
                self.canvas_width_cm, self.canvas_height_cm
            )));
        }

        let (cell_width, cell_height) = self.cell_px();
        if cell_width == 0 || cell_height == 0 {
            let (canvas_width, canvas_height) = self.canvas_px();
            return Err(CollageError::InvalidConfig(format!(
                "画布 {}x{} 像素不足以划分 {} 行 × {} 列",
                canvas_width, canvas_height, self.rows, self.columns
            )));
        }

        if !(self.border_cm.is_finite() && self.border_cm >= 0.0) {
            return Err(CollageError::InvalidConfig(format!(
                "白边宽度非法：{} cm",
                self.border_cm
            )));
        }

        if let Some((width_cm, height_cm)) = self.design_image_cm {
            if !(width_cm.is_finite() && width_cm > 0.0 && height_cm.is_finite() && height_cm > 0.0)
            {
                return Err(CollageError::InvalidConfig(format!(
                    "单图设计尺寸非法：{} × {} cm",
                    width_cm, height_cm
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.white_threshold) {
            return Err(CollageError::InvalidConfig(format!(
                "white_threshold 必须在 0~1 之间（当前：{}）",
                self.white_threshold
            )));
        }

        Ok(())
    }
}

/// 背景色取样策略。
///
/// - `Mode`：底部条带中出现次数最多的颜色
/// - `Average`：底部条带各通道算术平均
/// - `Dominant`：白色占比过高时取白，否则取出现最多的非白色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    Mode,
    Average,
    Dominant,
}

impl SamplingPolicy {
    /// 从外部字符串解析取样策略。
    ///
    /// # 示例
    /// ```rust
    /// use collage_sheets::collage::SamplingPolicy;
    ///
    /// let p = SamplingPolicy::from_str("Average")?;
    /// assert_eq!(p.as_str(), "average");
    /// # Ok::<(), collage_sheets::collage::CollageError>(())
    /// ```
    pub fn from_str(policy: &str) -> Result<Self, CollageError> {
        match policy.trim().to_lowercase().as_str() {
            "mode" => Ok(Self::Mode),
            "average" | "mean" => Ok(Self::Average),
            "dominant" => Ok(Self::Dominant),
            other => Err(CollageError::InvalidConfig(format!(
                "未知取样策略：{}（可选：mode / average / dominant）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Average => "average",
            Self::Dominant => "dominant",
        }
    }
}

/// 单元格放置方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// 等比放大铺满单元格，居中裁掉溢出部分。
    Cover,
    /// 等比缩放到单元格内，贴单元格左上角放置，剩余区域保持画布背景。
    Contain,
}

impl FitMode {
    pub fn from_str(mode: &str) -> Result<Self, CollageError> {
        match mode.trim().to_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            other => Err(CollageError::InvalidConfig(format!(
                "未知放置方式：{}（可选：cover / contain）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
        }
    }
}
