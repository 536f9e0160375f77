//! PNG export and read-back of sensor images

use std::path::Path;

use image::{ImageBuffer, Luma, Rgba};
use rgbd_core::CameraInfo;
use rgbd_core::image::{ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8U};
use rgbd_core::sensor::convert_depth_32f_to_16u;
use tracing::info;

use crate::error::{IoError, Result};

type Gray16 = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Write a color image as an 8-bit RGBA PNG
pub fn write_color_png<P: AsRef<Path>>(image: &ImageRgba8U, path: P) -> Result<()> {
    let (width, height) = png_dimensions(image.size())?;
    let data = image.data();
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgba([
            data[[y, x, 0]],
            data[[y, x, 1]],
            data[[y, x, 2]],
            data[[y, x, 3]],
        ])
    });
    buffer.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), "wrote color image");
    Ok(())
}

/// Write millimeter depth as a 16-bit grayscale PNG
pub fn write_depth_16u_png<P: AsRef<Path>>(image: &ImageDepth16U, path: P) -> Result<()> {
    let data = image.data();
    let buffer = gray16(image.size(), |x, y| data[[y, x, 0]])?;
    buffer.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), "wrote 16-bit depth image");
    Ok(())
}

/// Quantize metric depth to millimeters and write it as a 16-bit PNG
pub fn write_depth_32f_png<P: AsRef<Path>>(image: &ImageDepth32F, path: P) -> Result<()> {
    write_depth_16u_png(&convert_depth_32f_to_16u(image), path)
}

/// Write labels as a 16-bit grayscale PNG, bit for bit
pub fn write_label_png<P: AsRef<Path>>(image: &ImageLabel16I, path: P) -> Result<()> {
    let data = image.data();
    let buffer = gray16(image.size(), |x, y| data[[y, x, 0]] as u16)?;
    buffer.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), "wrote label image");
    Ok(())
}

/// Read an RGBA PNG produced by `camera`
pub fn read_color_png<P: AsRef<Path>>(path: P, camera: &CameraInfo) -> Result<ImageRgba8U> {
    let buffer = image::open(path.as_ref())?.into_rgba8();
    check_size(buffer.dimensions(), camera)?;

    let mut image = ImageRgba8U::new(camera.width(), camera.height());
    let data = image.data_mut();
    for (x, y, pixel) in buffer.enumerate_pixels() {
        for (c, value) in pixel.0.iter().enumerate() {
            data[[y as usize, x as usize, c]] = *value;
        }
    }
    Ok(image)
}

/// Read a 16-bit depth PNG produced by `camera`
pub fn read_depth_16u_png<P: AsRef<Path>>(path: P, camera: &CameraInfo) -> Result<ImageDepth16U> {
    let buffer = image::open(path.as_ref())?.into_luma16();
    check_size(buffer.dimensions(), camera)?;

    let mut image = ImageDepth16U::new(camera.width(), camera.height());
    let data = image.data_mut();
    for (x, y, pixel) in buffer.enumerate_pixels() {
        data[[y as usize, x as usize, 0]] = pixel.0[0];
    }
    Ok(image)
}

fn gray16<F>(size: (usize, usize), value: F) -> Result<Gray16>
where
    F: Fn(usize, usize) -> u16,
{
    let (width, height) = png_dimensions(size)?;
    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        Luma([value(x as usize, y as usize)])
    }))
}

/// PNG dimensions are 32-bit
fn png_dimensions((width, height): (usize, usize)) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(IoError::ImageTooLarge { width, height }),
    }
}

fn check_size((width, height): (u32, u32), camera: &CameraInfo) -> Result<()> {
    let found = (width as usize, height as usize);
    if found != camera.image_size() {
        return Err(IoError::SizeMismatch {
            expected: camera.image_size(),
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgbd_core::image::label_sentinel;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rgbd-io-{}-{name}", std::process::id()))
    }

    fn camera(width: usize, height: usize) -> CameraInfo {
        CameraInfo::from_fov_y(width, height, 0.8).unwrap()
    }

    #[test]
    fn test_color_png_read_back() {
        let path = temp_path("color.png");
        let mut color = ImageRgba8U::new(4, 3);
        color.fill_rgba([204, 229, 255, 255]);
        for (channel, value) in color.at_mut(2, 1).unwrap().iter_mut().zip([1, 2, 3, 4]) {
            *channel = value;
        }

        write_color_png(&color, &path).unwrap();
        let read = read_color_png(&path, &camera(4, 3)).unwrap();
        assert_eq!(read, color);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_depth_32f_written_as_millimeters() {
        let path = temp_path("depth.png");
        let mut depth = ImageDepth32F::filled(5, 2, 1.25);
        depth.at_mut(0, 0).unwrap()[0] = f32::NAN;
        depth.at_mut(4, 1).unwrap()[0] = 100.0;

        write_depth_32f_png(&depth, &path).unwrap();
        let read = read_depth_16u_png(&path, &camera(5, 2)).unwrap();
        assert_eq!(read.value(0, 0), Some(0));
        assert_eq!(read.value(1, 0), Some(1250));
        assert_eq!(read.value(4, 1), Some(u16::MAX));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_label_png_keeps_bits() {
        let path = temp_path("label.png");
        let label = ImageLabel16I::filled(3, 3, label_sentinel::EMPTY);

        write_label_png(&label, &path).unwrap();
        let read = read_depth_16u_png(&path, &camera(3, 3)).unwrap();
        assert!(read.all_equal(label_sentinel::EMPTY as u16));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let path = temp_path("small.png");
        write_depth_16u_png(&ImageDepth16U::new(2, 2), &path).unwrap();

        let err = read_depth_16u_png(&path, &camera(640, 480)).unwrap_err();
        assert!(matches!(
            err,
            IoError::SizeMismatch {
                expected: (640, 480),
                found: (2, 2)
            }
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(png_dimensions((640, 480)).unwrap(), (640, 480));
        let too_wide = u32::MAX as usize + 1;
        assert!(matches!(
            png_dimensions((too_wide, 1)),
            Err(IoError::ImageTooLarge { width, height: 1 }) if width == too_wide
        ));
        assert!(png_dimensions((1, too_wide)).is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("missing.png");
        assert!(matches!(
            read_color_png(&path, &camera(1, 1)),
            Err(IoError::Image(_))
        ));
    }
}
