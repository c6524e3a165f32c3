//! # 拼版处理模块（collage）
//!
//! ## 设计思路
//!
//! 该模块将“输入枚举 → 加载校验 → 单图变换 → 网格拼版 → 格式导出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条批处理流水线
//! - `loader`：负责输入目录枚举与文件加载校验
//! - `pipeline`：负责解码、单图处理与缩放
//! - `sampler` / `edges`：背景取样、扩边与白边
//! - `layout`：放置几何（纯函数）
//! - `compositor`：网格拼版
//! - `export`：PNG / PDF / SVG / AI 导出
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! main.rs（CLI 解析 + 配置合并）
//!    ↓
//! handler.rs（批次切分 + 阶段耗时日志）
//!    ├─ loader.rs（目录枚举 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 取样 + 扩边 + 白边 + 缩放）
//!    ├─ compositor.rs（layout.rs 几何 + 粘贴）
//!    └─ export/（格式分派） → storage.rs（临时文件 + 重命名）
//!    ↓
//! 返回 CollageError 给应用层
//! ```

mod compositor;
mod config;
mod edges;
mod error;
mod export;
mod handler;
mod layout;
mod loader;
mod pipeline;
mod sampler;
mod source;

pub use compositor::compose_batch;
pub use config::{CollageConfig, FitMode, SamplingPolicy, cm_to_px};
pub use edges::{apply_border, extend_edges};
pub use error::CollageError;
pub use export::OutputFormat;
pub use handler::{BatchOutput, BatchReport, CollageHandler};
pub use layout::{CropRect, FitPlan, cell_origin, fit_contain, fit_cover};
pub use loader::{enumerate_inputs, has_allowed_extension};
pub use pipeline::resize_to_cell;
pub use sampler::{sample_background, sample_bottom_strip};
pub use source::{CANVAS_BACKGROUND, Canvas, ProcessedImage, SourceImage};
