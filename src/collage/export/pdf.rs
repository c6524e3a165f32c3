//! 单页 PDF 容器：整张画布作为一个 DeviceRGB 图像 XObject 铺满页面。

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::{OutputFormat, write_error};
use crate::collage::CollageError;
use crate::collage::source::Canvas;

/// PDF 页面尺寸固定按 300 DPI 换算。
pub(super) const PDF_DPI: f32 = 300.0;
const POINTS_PER_INCH: f32 = 72.0;

pub(super) fn page_size_pt(width_px: u32, height_px: u32) -> (f32, f32) {
    (
        width_px as f32 * POINTS_PER_INCH / PDF_DPI,
        height_px as f32 * POINTS_PER_INCH / PDF_DPI,
    )
}

pub(super) fn write_pdf<W: Write>(canvas: &Canvas, writer: &mut W) -> Result<(), CollageError> {
    let (width, height) = canvas.dimensions();
    let (page_width, page_height) = page_size_pt(width, height);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        canvas.pixels.as_raw().clone(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page_width.into(),
                    0.into(),
                    0.into(),
                    page_height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| CollageError::Encode(format!("PDF 内容流编码失败：{}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            "Im0" => image_id,
        },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save_to(writer)
        .map_err(|e| write_error(OutputFormat::Pdf, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::export::tests::sample_canvas;

    fn embedded_image_dimensions(bytes: &[u8]) -> Option<(i64, i64)> {
        let doc = Document::load_mem(bytes).ok()?;
        doc.objects.values().find_map(|object| {
            let stream = object.as_stream().ok()?;
            let subtype = stream.dict.get(b"Subtype").ok()?.as_name().ok()?;
            if subtype != b"Image" {
                return None;
            }
            let width = stream.dict.get(b"Width").ok()?.as_i64().ok()?;
            let height = stream.dict.get(b"Height").ok()?.as_i64().ok()?;
            Some((width, height))
        })
    }

    #[test]
    fn pdf_embeds_canvas_at_full_resolution() {
        let canvas = sample_canvas();
        let mut bytes = Vec::new();

        write_pdf(&canvas, &mut bytes).expect("pdf export failed");

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(embedded_image_dimensions(&bytes), Some((30, 20)));
    }

    #[test]
    fn pdf_page_has_single_page() {
        let canvas = sample_canvas();
        let mut bytes = Vec::new();
        write_pdf(&canvas, &mut bytes).expect("pdf export failed");

        let doc = Document::load_mem(&bytes).expect("pdf should parse");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn page_size_uses_300_dpi() {
        let (width, height) = page_size_pt(10630, 300);
        assert!((width - 2551.2).abs() < 0.01);
        assert!((height - 72.0).abs() < f32::EPSILON);
    }
}
