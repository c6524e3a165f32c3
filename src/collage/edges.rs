//! # 扩边与白边模块
//!
//! 两个操作都只做“新建底图 + 原图整体平移粘贴”，不对原像素重采样，也不裁剪。

use image::{Rgb, RgbImage, imageops};

const BORDER_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// 用取样色向四周扩边。
///
/// 上下各扩 `vertical` 像素，左右各扩 `horizontal` 像素，原图位于 `(horizontal, vertical)`。
pub fn extend_edges(image: &RgbImage, fill: Rgb<u8>, vertical: u32, horizontal: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut extended = RgbImage::from_pixel(width + 2 * horizontal, height + 2 * vertical, fill);
    imageops::replace(&mut extended, image, horizontal as i64, vertical as i64);
    extended
}

/// 加等宽白边。宽度为 0 时原样返回，不分配新缓冲。
pub fn apply_border(image: RgbImage, border: u32) -> RgbImage {
    if border == 0 {
        return image;
    }

    let (width, height) = image.dimensions();
    let mut framed = RgbImage::from_pixel(width + 2 * border, height + 2 * border, BORDER_COLOR);
    imageops::replace(&mut framed, &image, border as i64, border as i64);
    framed
}
