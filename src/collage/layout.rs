//! # 网格与放置几何模块
//!
//! 该模块只做尺寸与坐标计算，不接触像素数据：
//!
//! 1. **铺满放置** (`fit_cover`)：等比放大到完全覆盖单元格，居中裁掉长边溢出。
//! 2. **包含放置** (`fit_contain`)：等比缩放到单元格以内，不裁剪。
//! 3. **单元格定位** (`cell_origin`)：按行优先序号计算单元格左上角像素坐标。
//!
//! # 设计思路
//!
//! - 算法纯函数化：输入为源尺寸与目标尺寸，输出唯一结果，便于属性测试。
//! - 全程使用整数运算并四舍五入，保证缩放后尺寸至少覆盖目标尺寸，裁剪框不会越界。
//! - 对零尺寸输入给出安全回退，避免上层除零。

/// 裁剪框（相对于缩放后的图像）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 铺满放置方案：先缩放到 `scaled`，再按 `crop` 取出与目标等大的区域。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub scaled: (u32, u32),
    pub crop: CropRect,
}

impl FitPlan {
    /// 缩放后已与目标等大，无需裁剪。
    pub fn is_exact(&self) -> bool {
        self.scaled == (self.crop.width, self.crop.height)
    }
}

/// 计算铺满放置方案。
///
/// # 规则
/// - 源图更“宽”：高度对齐目标高度，宽度按比例放大，左右居中裁剪
/// - 源图更“高”：宽度对齐目标宽度，高度按比例放大，上下居中裁剪
/// - 比例一致：直接缩放到目标尺寸
///
/// # 参数
/// * `source` - 源图尺寸（宽、高）
/// * `target` - 单元格尺寸（宽、高）
pub fn fit_cover(source: (u32, u32), target: (u32, u32)) -> FitPlan {
    let (sw, sh) = (source.0 as u64, source.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);

    // 异常兜底
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return FitPlan {
            scaled: target,
            crop: CropRect { x: 0, y: 0, width: target.0, height: target.1 },
        };
    }

    let (scaled_w, scaled_h) = if sw * th > sh * tw {
        // 源图更宽：按高度缩放
        (((sw * th + sh / 2) / sh).max(tw), th)
    } else {
        // 源图更高或比例一致：按宽度缩放
        (tw, ((sh * tw + sw / 2) / sw).max(th))
    };

    FitPlan {
        scaled: (scaled_w as u32, scaled_h as u32),
        crop: CropRect {
            x: ((scaled_w - tw) / 2) as u32,
            y: ((scaled_h - th) / 2) as u32,
            width: target.0,
            height: target.1,
        },
    }
}

/// 计算包含放置后的尺寸：等比缩放到目标以内，每边至少 1 像素。
pub fn fit_contain(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (source.0 as u64, source.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);

    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return target;
    }

    let (width, height) = if sw * th > sh * tw {
        (tw, ((sh * tw + sw / 2) / sw).clamp(1, th))
    } else {
        (((sw * th + sh / 2) / sh).clamp(1, tw), th)
    };

    (width as u32, height as u32)
}

/// 第 `index` 张图片所在单元格的左上角像素坐标（行优先）。
pub fn cell_origin(index: usize, columns: u32, cell: (u32, u32)) -> (u32, u32) {
    let columns = columns.max(1) as usize;
    let row = (index / columns) as u32;
    let column = (index % columns) as u32;
    (column * cell.0, row * cell.1)
}
