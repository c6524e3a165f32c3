//! # 背景色取样模块
//!
//! ## 设计思路
//!
//! 照片底部通常是最接近“背景”的区域，因此只在底部水平条带内取样，
//! 得到的颜色用于扩边填充，使扩出来的区域与原图自然衔接。
//!
//! ## 实现思路
//!
//! - 条带高度按配置截取，超过图高时取整图，0 退化为最底一行。
//! - `Mode`：计数最多的颜色；并列时取扫描顺序（行优先，从条带顶行左侧开始）中最先出现的颜色。
//! - `Average`：逐通道求和后四舍五入。
//! - `Dominant`：白色占比超过阈值直接返回白色，否则在非白色像素里按 `Mode` 规则取色。

use std::collections::HashMap;

use image::{Rgb, RgbImage};

use super::{CollageConfig, SamplingPolicy};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 按配置对图片底部条带取样，返回扩边填充色。
pub fn sample_background(image: &RgbImage, config: &CollageConfig) -> Rgb<u8> {
    sample_bottom_strip(
        image,
        config.sampling,
        config.sample_strip_px,
        config.white_threshold,
    )
}

/// 对底部 `strip_px` 行按指定策略取样。
///
/// 空图没有可取样的像素，返回白色。
pub fn sample_bottom_strip(
    image: &RgbImage,
    policy: SamplingPolicy,
    strip_px: u32,
    white_threshold: f64,
) -> Rgb<u8> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return WHITE;
    }

    let strip = strip_px.clamp(1, height);
    let top = height - strip;
    let pixels = (top..height).flat_map(|y| (0..width).map(move |x| *image.get_pixel(x, y)));

    match policy {
        SamplingPolicy::Mode => most_frequent(pixels).unwrap_or(WHITE),
        SamplingPolicy::Average => mean_color(pixels).unwrap_or(WHITE),
        SamplingPolicy::Dominant => {
            let total = (strip as u64) * (width as u64);
            let white = (top..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .filter(|&(x, y)| *image.get_pixel(x, y) == WHITE)
                .count() as u64;

            if white as f64 / total as f64 > white_threshold {
                return WHITE;
            }

            most_frequent(pixels.filter(|pixel| *pixel != WHITE)).unwrap_or(WHITE)
        }
    }
}

/// 出现次数最多的颜色；并列时取最先出现者。
fn most_frequent(pixels: impl Iterator<Item = Rgb<u8>>) -> Option<Rgb<u8>> {
    let mut counts: HashMap<[u8; 3], (u64, usize)> = HashMap::new();
    for (index, pixel) in pixels.enumerate() {
        let entry = counts.entry(pixel.0).or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| Rgb(color))
}

fn mean_color(pixels: impl Iterator<Item = Rgb<u8>>) -> Option<Rgb<u8>> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for pixel in pixels {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += channel as u64;
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let channel = |sum: u64| ((sum + count / 2) / count) as u8;
    Some(Rgb([channel(sums[0]), channel(sums[1]), channel(sums[2])]))
}
