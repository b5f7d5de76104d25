use std::io::Cursor;
use std::path::Path;

use stud_quant::PixelBuffer;

use crate::error::AppError;

/// Decode a PNG into an RGBA pixel buffer.
///
/// Palette, greyscale and 16-bit images are expanded to 8-bit RGBA.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(AppError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(PixelBuffer::new(rgba, info.width as usize)?)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<PixelBuffer, AppError> {
    let bytes = std::fs::read(path).map_err(|source| AppError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes)
}

/// Encode a pixel buffer as an RGBA PNG, drawing every pixel as a
/// `scale × scale` block.
pub fn encode_png(buffer: &PixelBuffer, scale: usize) -> Result<Vec<u8>, AppError> {
    let scale = scale.max(1);
    let out_width = buffer.width() * scale;
    let out_height = buffer.height() * scale;
    let width = u32::try_from(out_width)
        .map_err(|_| AppError::PngEncode(format!("width {out_width} too large")))?;
    let height = u32::try_from(out_height)
        .map_err(|_| AppError::PngEncode(format!("height {out_height} too large")))?;

    let mut data = Vec::with_capacity(out_width * out_height * 4);
    for row in 0..buffer.height() {
        let mut line = Vec::with_capacity(out_width * 4);
        for col in 0..buffer.width() {
            let px = buffer.rgba(buffer.index(row, col)).to_bytes();
            for _ in 0..scale {
                line.extend_from_slice(&px);
            }
        }
        for _ in 0..scale {
            data.extend_from_slice(&line);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stud_quant::{Rgb, Rgba};

    fn encode_raw(color_type: png::ColorType, width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf
    }

    #[test]
    fn test_round_trip_rgba() {
        let buffer = PixelBuffer::new(vec![1, 2, 3, 4, 250, 128, 0, 255], 2).unwrap();
        let png = encode_png(&buffer, 1).unwrap();
        assert_eq!(decode_png(&png).unwrap(), buffer);
    }

    #[test]
    fn test_scale_draws_blocks() {
        let pixels = [Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)];
        let buffer = PixelBuffer::from_rgb(&pixels, 2).unwrap();
        let decoded = decode_png(&encode_png(&buffer, 3).unwrap()).unwrap();
        assert_eq!(decoded.width(), 6);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.rgb(decoded.index(2, 2)), Rgb::new(10, 20, 30));
        assert_eq!(decoded.rgb(decoded.index(1, 3)), Rgb::new(40, 50, 60));
    }

    #[test]
    fn test_decode_grayscale_and_rgb() {
        let grey = decode_png(&encode_raw(png::ColorType::Grayscale, 2, 1, &[0, 200])).unwrap();
        assert_eq!(grey.rgba(1), Rgba::new(200, 200, 200, 255));

        let rgb = decode_png(&encode_raw(png::ColorType::Rgb, 1, 1, &[9, 8, 7])).unwrap();
        assert_eq!(rgb.rgba(0), Rgba::new(9, 8, 7, 255));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_png(b"not a png").unwrap_err();
        assert!(matches!(err, AppError::PngDecode(_)));
    }
}
