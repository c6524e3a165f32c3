//! # 网格拼版模块
//!
//! ## 设计思路
//!
//! 一个批次最多 `rows × columns` 张图，按行优先顺序从 (0,0) 开始逐格填充。
//! 放置几何全部交给 `layout`，本模块只负责缩放、裁剪与粘贴像素。
//! 批次不足时剩余单元格保留画布背景，不绘制占位。

use image::{RgbImage, imageops};

use super::layout::{cell_origin, fit_contain, fit_cover};
use super::pipeline::resize_to_cell;
use super::source::{Canvas, ProcessedImage};
use super::{CollageConfig, CollageError, FitMode};

/// 将一个批次的单图拼到新画布上。
///
/// 每张图放置后立即释放，峰值内存为“剩余单图 + 一张画布”。
pub fn compose_batch(
    images: Vec<ProcessedImage>,
    config: &CollageConfig,
) -> Result<Canvas, CollageError> {
    let capacity = config.capacity();
    if images.len() > capacity {
        return Err(CollageError::InvalidConfig(format!(
            "单张画布最多容纳 {} 张图片，当前批次 {} 张",
            capacity,
            images.len()
        )));
    }

    let (canvas_width, canvas_height) = config.canvas_px();
    let cell = config.cell_px();
    let mut canvas = Canvas::blank(canvas_width, canvas_height);

    for (index, image) in images.into_iter().enumerate() {
        let (x, y) = cell_origin(index, config.columns, cell);
        let placed = fit_into_cell(image.pixels, cell, config)?;
        imageops::replace(&mut canvas.pixels, &placed, x as i64, y as i64);
        canvas.placed += 1;
    }

    Ok(canvas)
}

/// 按放置方式把单图变换为可直接粘贴的像素块。
fn fit_into_cell(
    image: RgbImage,
    cell: (u32, u32),
    config: &CollageConfig,
) -> Result<RgbImage, CollageError> {
    match config.fit_mode {
        FitMode::Cover => {
            let plan = fit_cover(image.dimensions(), cell);
            let scaled = resize_to_cell(image, plan.scaled, config.resize_filter)?;
            if plan.is_exact() {
                return Ok(scaled);
            }

            let crop = plan.crop;
            Ok(imageops::crop_imm(&scaled, crop.x, crop.y, crop.width, crop.height).to_image())
        }
        FitMode::Contain => {
            let size = fit_contain(image.dimensions(), cell);
            resize_to_cell(image, size, config.resize_filter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::source::CANVAS_BACKGROUND;
    use image::Rgb;
    use image::imageops::FilterType;

    fn grid_config(rows: u32, columns: u32) -> CollageConfig {
        // 100 DPI 下 2.54 cm = 100 px，每格 20x10
        CollageConfig {
            dpi: 100,
            canvas_width_cm: 0.508 * columns as f64,
            canvas_height_cm: 0.254 * rows as f64,
            rows,
            columns,
            design_image_cm: None,
            resize_filter: FilterType::Nearest,
            ..CollageConfig::default()
        }
    }

    fn solid(color: Rgb<u8>, size: (u32, u32)) -> ProcessedImage {
        ProcessedImage {
            pixels: RgbImage::from_pixel(size.0, size.1, color),
        }
    }

    fn cell_is_uniform(canvas: &Canvas, origin: (u32, u32), cell: (u32, u32), color: Rgb<u8>) -> bool {
        (origin.1..origin.1 + cell.1)
            .all(|y| (origin.0..origin.0 + cell.0).all(|x| *canvas.pixels.get_pixel(x, y) == color))
    }

    fn palette(index: usize) -> Rgb<u8> {
        Rgb([(index * 40 % 250) as u8, (index * 90 % 250) as u8, 10 + index as u8])
    }

    #[test]
    fn full_batch_fills_every_cell() {
        let config = grid_config(2, 3);
        let cell = config.cell_px();
        assert_eq!(cell, (20, 10));

        let images = (0..6).map(|i| solid(palette(i), cell)).collect();
        let canvas = compose_batch(images, &config).expect("compose failed");

        assert_eq!(canvas.dimensions(), config.canvas_px());
        assert_eq!(canvas.placed, 6);
        for index in 0..6 {
            let origin = cell_origin(index, config.columns, cell);
            assert!(cell_is_uniform(&canvas, origin, cell, palette(index)), "cell {}", index);
        }
    }

    #[test]
    fn partial_batch_leaves_remaining_cells_as_background() {
        let config = grid_config(2, 3);
        let cell = config.cell_px();

        let images = (0..2).map(|i| solid(palette(i), (7, 31))).collect();
        let canvas = compose_batch(images, &config).expect("compose failed");

        assert_eq!(canvas.placed, 2);
        for index in 0..2 {
            let origin = cell_origin(index, config.columns, cell);
            assert!(cell_is_uniform(&canvas, origin, cell, palette(index)));
        }
        for index in 2..6 {
            let origin = cell_origin(index, config.columns, cell);
            assert!(cell_is_uniform(&canvas, origin, cell, CANVAS_BACKGROUND));
        }
    }

    #[test]
    fn cover_crops_overflow_symmetrically() {
        let config = grid_config(1, 1);
        let cell = config.cell_px();

        // 左 1/3 红、中 1/3 绿、右 1/3 蓝，宽图裁掉两侧后只剩绿色
        let wide = RgbImage::from_fn(60, 10, |x, _| match x / 20 {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let canvas = compose_batch(vec![ProcessedImage { pixels: wide }], &config)
            .expect("compose failed");

        assert!(cell_is_uniform(&canvas, (0, 0), cell, Rgb([0, 255, 0])));
    }

    #[test]
    fn contain_anchors_image_at_cell_corner() {
        let config = CollageConfig {
            fit_mode: FitMode::Contain,
            ..grid_config(1, 2)
        };

        let canvas = compose_batch(vec![solid(Rgb([5, 5, 5]), (10, 10))], &config)
            .expect("compose failed");

        assert!(cell_is_uniform(&canvas, (0, 0), (10, 10), Rgb([5, 5, 5])));
        assert!(cell_is_uniform(&canvas, (10, 0), (10, 10), CANVAS_BACKGROUND));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let config = grid_config(1, 2);
        let images = (0..3).map(|i| solid(palette(i), (20, 10))).collect();

        assert!(matches!(
            compose_batch(images, &config),
            Err(CollageError::InvalidConfig(_))
        ));
    }
}
