use std::path::Path;

use image::{ColorType, DynamicImage};

use homwarp_image::{Image, ImageSize};

use crate::error::IoError;

fn interleaved_to_planar<T: Copy + Into<f64>>(
    raw: &[T],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Image, IoError> {
    let plane_len = width * height;
    let mut data = vec![0.0; plane_len * channels];
    for (p, pixel) in raw.chunks_exact(channels).enumerate() {
        for (k, &v) in pixel.iter().enumerate() {
            data[k * plane_len + p] = v.into();
        }
    }
    Ok(Image::new(ImageSize { width, height }, channels, data)?)
}

/// Read an image file into a planar `f64` buffer.
///
/// PNG and JPEG (and any other format the `image` crate recognizes) are
/// supported; 8-bit and 16-bit sample values are widened to `f64` without
/// rescaling, and the channel count of the file is preserved.
pub fn read_image_any_planar(file_path: impl AsRef<Path>) -> Result<Image, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    let dyn_img = image::open(file_path)?;
    let (w, h) = (dyn_img.width() as usize, dyn_img.height() as usize);
    match dyn_img {
        DynamicImage::ImageLuma8(buf) => interleaved_to_planar(buf.as_raw(), w, h, 1),
        DynamicImage::ImageLumaA8(buf) => interleaved_to_planar(buf.as_raw(), w, h, 2),
        DynamicImage::ImageRgb8(buf) => interleaved_to_planar(buf.as_raw(), w, h, 3),
        DynamicImage::ImageRgba8(buf) => interleaved_to_planar(buf.as_raw(), w, h, 4),
        DynamicImage::ImageLuma16(buf) => interleaved_to_planar(buf.as_raw(), w, h, 1),
        DynamicImage::ImageLumaA16(buf) => interleaved_to_planar(buf.as_raw(), w, h, 2),
        DynamicImage::ImageRgb16(buf) => interleaved_to_planar(buf.as_raw(), w, h, 3),
        DynamicImage::ImageRgba16(buf) => interleaved_to_planar(buf.as_raw(), w, h, 4),
        other => interleaved_to_planar(other.to_rgb8().as_raw(), w, h, 3),
    }
}

/// Write a planar `f64` buffer to an image file.
///
/// Sample values are rounded and clamped to the 8-bit range; the format is
/// chosen from the file extension. Only 1, 2, 3 or 4 channels can be
/// encoded.
pub fn write_image_any_planar(file_path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let color = match image.num_channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        c => return Err(IoError::UnsupportedChannelCount(c)),
    };
    let (w, h, c) = (image.cols(), image.rows(), image.num_channels());
    let plane_len = image.plane_len();
    let data = image.as_slice();
    let mut interleaved = vec![0u8; plane_len * c];
    for (p, pixel) in interleaved.chunks_exact_mut(c).enumerate() {
        for (k, v) in pixel.iter_mut().enumerate() {
            *v = data[k * plane_len + p].round().clamp(0.0, 255.0) as u8;
        }
    }
    image::save_buffer(file_path, &interleaved, w as u32, h as u32, color)?;
    Ok(())
}
