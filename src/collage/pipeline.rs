//! # 解码与单图变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 原图 → 单元格图”的过程集中管理，并在解码前增加像素上限控制。
//! 优先读取 header 尺寸做检查，再进行完整解码，避免超大输入直接吃满内存。
//!
//! ## 实现思路
//!
//! 1. 读取 header 尺寸并按像素上限快速拒绝
//! 2. 完整解码并统一转换为 RGB
//! 3. 底部条带取样 → 扩边 → 白边
//! 4. 使用 `fast_image_resize` 缩放到设计尺寸，失败时回退 `image::imageops::resize`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{ImageBuffer, Rgb, RgbImage};
use std::io::Cursor;

use super::edges::{apply_border, extend_edges};
use super::sampler::sample_background;
use super::source::{ProcessedImage, RawImageData, SourceImage};
use super::{CollageConfig, CollageError, CollageHandler};

impl CollageHandler {
    /// 将原始字节解码为 RGB 原图。
    pub(crate) fn decode_source(
        &self,
        raw: RawImageData,
        config: &CollageConfig,
    ) -> Result<SourceImage, CollageError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes).map_err(|e| {
            CollageError::Decode(format!("图片解码失败：{}（{}）", e, raw.path.display()))
        })?;

        let pixels = decoded.to_rgb8();
        log::debug!(
            "🖼️ 解码完成 - {} 尺寸: {}x{}",
            raw.path.display(),
            pixels.width(),
            pixels.height()
        );

        Ok(SourceImage {
            path: raw.path,
            pixels,
        })
    }

    /// 单图处理：取样 → 扩边 → 白边 → 缩放到设计尺寸。
    pub fn process_image(
        &self,
        source: SourceImage,
        config: &CollageConfig,
    ) -> Result<ProcessedImage, CollageError> {
        let fill = sample_background(&source.pixels, config);
        let extended = extend_edges(
            &source.pixels,
            fill,
            config.extend_vertical_px,
            config.extend_horizontal_px,
        );
        drop(source.pixels);

        let bordered = apply_border(extended, config.border_px());
        let (bordered_width, bordered_height) = bordered.dimensions();

        let target = config.design_px();
        let pixels = resize_to_cell(bordered, target, config.resize_filter)?;

        log::debug!(
            "🧩 单图处理 - {} 取样色: {:?} 扩边后: {}x{} 输出: {}x{}",
            source.path.display(),
            fill.0,
            bordered_width,
            bordered_height,
            target.0,
            target.1
        );

        Ok(ProcessedImage { pixels })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), CollageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CollageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| CollageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &CollageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CollageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| CollageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(CollageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}

/// 缩放到精确目标尺寸，不保持宽高比。
///
/// 已是目标尺寸时原样返回，保证无损恒等。
pub fn resize_to_cell(
    image: RgbImage,
    target: (u32, u32),
    filter: FilterType,
) -> Result<RgbImage, CollageError> {
    if image.dimensions() == target {
        return Ok(image);
    }

    let (target_width, target_height) = target;
    if target_width == 0 || target_height == 0 {
        return Err(CollageError::InvalidConfig(format!(
            "目标尺寸非法：{}x{}",
            target_width, target_height
        )));
    }

    match resize_with_fast_image_resize(&image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                err
            );
            Ok(image::imageops::resize(&image, target_width, target_height, filter))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbImage, CollageError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| CollageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| CollageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| CollageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
