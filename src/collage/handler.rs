//! # 批处理编排模块
//!
//! ## 设计思路
//!
//! `CollageHandler` 只负责流程编排，持有一份不可变配置，不依赖 CLI。
//! 处理链路固定为：
//! 1. 创建输出目录，枚举输入文件
//! 2. 按 `rows × columns` 切分为连续批次
//! 3. 批次内逐张加载、解码、单图处理
//! 4. 拼版并按格式导出为 `final_canvas_<N>.<ext>`
//!
//! ## 实现思路
//!
//! - 单线程同步执行，批次内严格按枚举顺序处理，任一失败立即中止整次运行，不重试。
//! - 单图只在所属批次开始时才加载，峰值内存为一个批次的单图加一张画布。
//! - 记录 `load/process/compose/export/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::compositor::compose_batch;
use super::loader::enumerate_inputs;
use super::source::Canvas;
use super::{CollageConfig, CollageError};
use crate::storage::{canvas_file_name, ensure_output_dir, write_atomically};

/// 拼版处理器。
pub struct CollageHandler {
    config: CollageConfig,
}

/// 单个批次的输出结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub index: usize,
    pub path: PathBuf,
    /// 该画布上实际放置的图片数量。
    pub placed: usize,
}

/// 整次运行的汇总。
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total_images: usize,
    pub outputs: Vec<BatchOutput>,
}

impl CollageHandler {
    /// 根据配置创建处理器。配置非法时直接失败，不触碰文件系统。
    ///
    /// # 示例
    /// ```rust
    /// use collage_sheets::collage::{CollageConfig, CollageHandler};
    ///
    /// let handler = CollageHandler::new(CollageConfig::default())?;
    /// assert_eq!(handler.config().capacity(), 150);
    /// # Ok::<(), collage_sheets::collage::CollageError>(())
    /// ```
    pub fn new(config: CollageConfig) -> Result<Self, CollageError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CollageConfig {
        &self.config
    }

    /// 处理主入口：把输入目录中的全部图片拼版输出到 `output_dir`。
    ///
    /// 没有任何输入图片时不产生输出文件，返回空汇总。
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport, CollageError> {
        let config = &self.config;
        let total_start = Instant::now();

        ensure_output_dir(output_dir)?;
        let files = enumerate_inputs(input_dir)?;

        let (canvas_width, canvas_height) = config.canvas_px();
        let (cell_width, cell_height) = config.cell_px();
        log::info!(
            "🗂️ 发现 {} 张图片 - 画布: {}x{} 网格: {}x{} 单元格: {}x{} 格式: {}",
            files.len(),
            canvas_width,
            canvas_height,
            config.rows,
            config.columns,
            cell_width,
            cell_height,
            config.output_format.as_str()
        );

        let mut report = BatchReport {
            total_images: files.len(),
            outputs: Vec::new(),
        };

        if files.is_empty() {
            log::warn!("⚠️ 输入目录中没有 png/jpg/jpeg 图片：{}", input_dir.display());
            return Ok(report);
        }

        for (index, batch) in files.chunks(config.capacity()).enumerate() {
            let output = self.run_batch(index, batch, output_dir)?;
            report.outputs.push(output);
        }

        log::info!(
            "✅ 拼版完成 - 图片: {} 画布: {} total={}ms",
            report.total_images,
            report.outputs.len(),
            total_start.elapsed().as_millis()
        );

        Ok(report)
    }

    /// 处理单个批次并写出一个文件。
    fn run_batch(
        &self,
        index: usize,
        batch: &[PathBuf],
        output_dir: &Path,
    ) -> Result<BatchOutput, CollageError> {
        let config = &self.config;
        let batch_start = Instant::now();

        let mut load_elapsed = Duration::ZERO;
        let mut process_elapsed = Duration::ZERO;
        let mut processed = Vec::with_capacity(batch.len());
        for path in batch {
            let load_start = Instant::now();
            let raw = self.load_from_file(path, config)?;
            let source = self.decode_source(raw, config)?;
            load_elapsed += load_start.elapsed();

            let process_start = Instant::now();
            processed.push(self.process_image(source, config)?);
            process_elapsed += process_start.elapsed();
        }

        let compose_start = Instant::now();
        let canvas = compose_batch(processed, config)?;
        let compose_elapsed = compose_start.elapsed();

        let export_start = Instant::now();
        let path = output_dir.join(canvas_file_name(index, config.output_format));
        self.export_canvas(&canvas, &path)?;
        let export_elapsed = export_start.elapsed();

        log::info!(
            "🖨️ 画布 #{} 已写出 {} - 图片: {} load={}ms process={}ms compose={}ms export={}ms total={}ms",
            index,
            path.display(),
            canvas.placed,
            load_elapsed.as_millis(),
            process_elapsed.as_millis(),
            compose_elapsed.as_millis(),
            export_elapsed.as_millis(),
            batch_start.elapsed().as_millis()
        );

        Ok(BatchOutput {
            index,
            path,
            placed: canvas.placed,
        })
    }

    /// 按配置格式把画布写到 `path`（先写临时文件再重命名）。
    pub fn export_canvas(&self, canvas: &Canvas, path: &Path) -> Result<(), CollageError> {
        let format = self.config.output_format;
        write_atomically(path, |writer| format.write_canvas(canvas, &self.config, writer))
    }
}
