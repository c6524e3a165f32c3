//! SVG 容器：一个 `<image>` 元素内嵌 base64 PNG，宽高标注为画布物理尺寸。

use std::io::Write;

use base64::{Engine as _, engine::general_purpose};

use super::{OutputFormat, encode_png, write_error};
use crate::collage::source::Canvas;
use crate::collage::{CollageConfig, CollageError};

pub(super) fn write_svg<W: Write>(
    canvas: &Canvas,
    config: &CollageConfig,
    writer: &mut W,
) -> Result<(), CollageError> {
    let (width, height) = canvas.dimensions();

    let mut png = Vec::new();
    encode_png(canvas, &mut png)?;
    let payload = general_purpose::STANDARD.encode(&png);
    drop(png);

    let document = format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
            "version=\"1.1\" width=\"{w_cm}cm\" height=\"{h_cm}cm\" viewBox=\"0 0 {w} {h}\">\n",
            "  <image x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"none\" ",
            "href=\"data:image/png;base64,{payload}\" xlink:href=\"data:image/png;base64,{payload}\"/>\n",
            "</svg>\n"
        ),
        w_cm = config.canvas_width_cm,
        h_cm = config.canvas_height_cm,
        w = width,
        h = height,
        payload = payload,
    );

    writer
        .write_all(document.as_bytes())
        .map_err(|e| write_error(OutputFormat::Svg, e))
}
