//! EPS 容器（以 `.ai` 扩展名保存）：PostScript `colorimage` 嵌入十六进制 RGB 数据。
//!
//! 边界框按配置 DPI 换算为点（1/72 英寸），图像矩阵将像素坐标映射到单位正方形再整体缩放。

use std::io::{BufWriter, Write};

use super::{OutputFormat, write_error};
use crate::collage::source::Canvas;
use crate::collage::{CollageConfig, CollageError};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
/// 每行输出的像素字节数（十六进制后为 2 倍字符）。
const BYTES_PER_LINE: usize = 36;
/// `colorimage` 数据过程的读缓冲长度，需低于 Level 2 字符串上限 65535。
const PICSTR_LEN: usize = 4096;

pub(super) fn write_eps<W: Write>(
    canvas: &Canvas,
    config: &CollageConfig,
    writer: &mut W,
) -> Result<(), CollageError> {
    let (width, height) = canvas.dimensions();
    let width_pt = width as f64 * 72.0 / config.dpi as f64;
    let height_pt = height as f64 * 72.0 / config.dpi as f64;

    let mut out = BufWriter::new(writer);
    write_body(&mut out, canvas, width, height, width_pt, height_pt)
        .and_then(|_| out.flush())
        .map_err(|e| write_error(OutputFormat::Ai, e))
}

fn write_body<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    width: u32,
    height: u32,
    width_pt: f64,
    height_pt: f64,
) -> std::io::Result<()> {
    writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(out, "%%Creator: collage-sheets")?;
    writeln!(
        out,
        "%%BoundingBox: 0 0 {} {}",
        width_pt.ceil() as u64,
        height_pt.ceil() as u64
    )?;
    writeln!(out, "%%HiResBoundingBox: 0 0 {:.4} {:.4}", width_pt, height_pt)?;
    writeln!(out, "%%LanguageLevel: 2")?;
    writeln!(out, "%%Pages: 1")?;
    writeln!(out, "%%DocumentData: Clean7Bit")?;
    writeln!(out, "%%EndComments")?;
    writeln!(out, "%%Page: 1 1")?;
    writeln!(out, "gsave")?;
    writeln!(out, "/picstr {} string def", PICSTR_LEN)?;
    writeln!(out, "{:.4} {:.4} scale", width_pt, height_pt)?;
    writeln!(out, "{} {} 8 [{} 0 0 -{} 0 {}]", width, height, width, height, height)?;
    writeln!(out, "{{ currentfile picstr readhexstring pop }} false 3 colorimage")?;

    let mut line = Vec::with_capacity(BYTES_PER_LINE * 2 + 1);
    for chunk in canvas.pixels.as_raw().chunks(BYTES_PER_LINE) {
        line.clear();
        for byte in chunk {
            line.push(HEX_DIGITS[(byte >> 4) as usize]);
            line.push(HEX_DIGITS[(byte & 0x0f) as usize]);
        }
        line.push(b'\n');
        out.write_all(&line)?;
    }

    writeln!(out, "grestore")?;
    writeln!(out, "showpage")?;
    writeln!(out, "%%Trailer")?;
    writeln!(out, "%%EOF")?;
    Ok(())
}
