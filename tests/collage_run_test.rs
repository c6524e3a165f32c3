// End-to-end tests: input directory -> collage files on disk
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use collage_sheets::collage::{
    CANVAS_BACKGROUND, CollageConfig, CollageHandler, OutputFormat, cell_origin,
};
use image::imageops::FilterType;
use image::{GenericImageView, Rgb, RgbImage};

/// 10 rows x 15 columns on a 60x40 px canvas (4x4 px cells) so a full run stays fast.
fn small_grid_config(format: OutputFormat) -> CollageConfig {
    CollageConfig {
        dpi: 100,
        canvas_width_cm: 1.524,
        canvas_height_cm: 1.016,
        rows: 10,
        columns: 15,
        extend_vertical_px: 1,
        extend_horizontal_px: 1,
        design_image_cm: None,
        resize_filter: FilterType::Nearest,
        output_format: format,
        ..CollageConfig::default()
    }
}

fn color_for(index: usize) -> Rgb<u8> {
    Rgb([(index % 200) as u8, (index / 200 * 50) as u8, 100])
}

fn write_solid_inputs(dir: &Path, count: usize) {
    for i in 0..count {
        RgbImage::from_pixel(6, 6, color_for(i))
            .save(dir.join(format!("photo_{:04}.png", i)))
            .expect("save failed");
    }
}

fn cell_color(canvas: &RgbImage, index: usize, config: &CollageConfig) -> Option<Rgb<u8>> {
    let cell = config.cell_px();
    let (x0, y0) = cell_origin(index, config.columns, cell);
    let first = *canvas.get_pixel(x0, y0);
    let uniform = (y0..y0 + cell.1)
        .all(|y| (x0..x0 + cell.0).all(|x| *canvas.get_pixel(x, y) == first));
    uniform.then_some(first)
}

#[test]
fn test_151_images_produce_two_canvases() {
    let input = tempfile::tempdir().expect("tempdir failed");
    let output = tempfile::tempdir().expect("tempdir failed");
    write_solid_inputs(input.path(), 151);

    let config = small_grid_config(OutputFormat::Png);
    assert_eq!(config.capacity(), 150);
    assert_eq!(config.cell_px(), (4, 4));

    let handler = CollageHandler::new(config.clone()).expect("handler init failed");
    let report = handler.run(input.path(), output.path()).expect("run failed");

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(report.outputs[0].placed, 150);
    assert_eq!(report.outputs[1].placed, 1);

    let first = image::open(output.path().join("final_canvas_0.png"))
        .expect("canvas 0 should decode")
        .to_rgb8();
    for index in 0..150 {
        assert_eq!(cell_color(&first, index, &config), Some(color_for(index)), "cell {}", index);
    }

    let second = image::open(output.path().join("final_canvas_1.png"))
        .expect("canvas 1 should decode")
        .to_rgb8();
    assert_eq!(cell_color(&second, 0, &config), Some(color_for(150)));
    for index in 1..150 {
        assert_eq!(cell_color(&second, index, &config), Some(CANVAS_BACKGROUND));
    }
}

#[test]
fn test_output_count_is_ceil_of_inputs_over_capacity() {
    for count in [1usize, 149, 150, 300, 301] {
        let input = tempfile::tempdir().expect("tempdir failed");
        let output = tempfile::tempdir().expect("tempdir failed");
        write_solid_inputs(input.path(), count);

        let handler =
            CollageHandler::new(small_grid_config(OutputFormat::Png)).expect("handler init failed");
        let report = handler.run(input.path(), output.path()).expect("run failed");

        let capacity = 150;
        assert_eq!(report.outputs.len(), count.div_ceil(capacity));
        for (i, batch) in report.outputs.iter().enumerate() {
            assert_eq!(batch.placed, capacity.min(count - i * capacity));
        }

        let written = std::fs::read_dir(output.path()).expect("read_dir failed").count();
        assert_eq!(written, count.div_ceil(capacity));
    }
}

fn pdf_image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let doc = lopdf::Document::load_mem(bytes).ok()?;
    doc.objects.values().find_map(|object| {
        let stream = object.as_stream().ok()?;
        if stream.dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }
        let width = stream.dict.get(b"Width").ok()?.as_i64().ok()?;
        let height = stream.dict.get(b"Height").ok()?.as_i64().ok()?;
        Some((width as u32, height as u32))
    })
}

fn svg_image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let svg = std::str::from_utf8(bytes).ok()?;
    let start = svg.find("base64,")? + "base64,".len();
    let end = svg[start..].find('"')? + start;
    let png = general_purpose::STANDARD.decode(&svg[start..end]).ok()?;
    Some(image::load_from_memory(&png).ok()?.dimensions())
}

fn eps_image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let eps = std::str::from_utf8(bytes).ok()?;
    let lines: Vec<&str> = eps.lines().collect();
    let header = lines.iter().position(|line| line.ends_with("colorimage"))?;
    let mut operands = lines[header - 1].split_whitespace();
    let width: u32 = operands.next()?.parse().ok()?;
    let height: u32 = operands.next()?.parse().ok()?;

    let hex_digits: usize = lines[header + 1..]
        .iter()
        .take_while(|line| **line != "grestore")
        .map(|line| line.len())
        .sum();
    (hex_digits == width as usize * height as usize * 6).then_some((width, height))
}

#[test]
fn test_every_format_round_trips_canvas_size() {
    let formats = [
        OutputFormat::Png,
        OutputFormat::Pdf,
        OutputFormat::Svg,
        OutputFormat::Ai,
    ];

    for format in formats {
        let input = tempfile::tempdir().expect("tempdir failed");
        let output = tempfile::tempdir().expect("tempdir failed");
        write_solid_inputs(input.path(), 3);

        let config = small_grid_config(format);
        let expected = config.canvas_px();
        let handler = CollageHandler::new(config).expect("handler init failed");
        let report = handler.run(input.path(), output.path()).expect("run failed");

        assert_eq!(report.outputs.len(), 1);
        let path = &report.outputs[0].path;
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(format!("final_canvas_0.{}", format.extension()).as_str())
        );

        let bytes = std::fs::read(path).expect("read output failed");
        let measured = match format {
            OutputFormat::Png => image::load_from_memory(&bytes).ok().map(|img| img.dimensions()),
            OutputFormat::Pdf => pdf_image_dimensions(&bytes),
            OutputFormat::Svg => svg_image_dimensions(&bytes),
            OutputFormat::Ai => eps_image_dimensions(&bytes),
        };
        assert_eq!(measured, Some(expected), "format {}", format.as_str());
    }
}

#[test]
fn test_missing_input_directory_is_an_error() {
    let output = tempfile::tempdir().expect("tempdir failed");
    let handler =
        CollageHandler::new(small_grid_config(OutputFormat::Png)).expect("handler init failed");

    let result = handler.run(&output.path().join("does-not-exist"), output.path());

    assert!(result.is_err());
}
