use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use homwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Planar multi-channel image with `f64` samples.
///
/// Channel planes are stored contiguously and consecutively: all of channel
/// 0, then channel 1, and so on. The channel count is a runtime value since
/// the warping pipeline is generic over the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    size: ImageSize,
    channels: usize,
    data: Vec<f64>,
}

impl Image {
    /// Create a new image from planar pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channel planes.
    /// * `data` - The pixel data, one full plane per channel.
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is zero or if the data length does not
    /// equal `width * height * channels`.
    pub fn new(size: ImageSize, channels: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 || channels == 0 {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                channels,
            ));
        }
        let expected = size.width * size.height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image filled with a constant value.
    pub fn from_size_val(size: ImageSize, channels: usize, val: f64) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 || channels == 0 {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                channels,
            ));
        }
        let data = vec![val; size.width * size.height * channels];
        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of channel planes.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// The number of samples in one channel plane.
    pub fn plane_len(&self) -> usize {
        self.size.width * self.size.height
    }

    /// The full planar data slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The full planar data slice, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// One channel plane as a row-major slice.
    pub fn plane(&self, channel: usize) -> Result<&[f64], ImageError> {
        if channel >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, self.channels));
        }
        let len = self.plane_len();
        Ok(&self.data[channel * len..(channel + 1) * len])
    }

    /// One channel plane as a mutable row-major slice.
    pub fn plane_mut(&mut self, channel: usize) -> Result<&mut [f64], ImageError> {
        if channel >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, self.channels));
        }
        let len = self.plane_len();
        Ok(&mut self.data[channel * len..(channel + 1) * len])
    }

    /// Consume the image and return the planar data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0.0; 10 * 20 * 3],
        )?;
        assert_eq!(image.cols(), 10);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.plane_len(), 200);
        Ok(())
    }

    #[test]
    fn image_data_mismatch() {
        let image = Image::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0.0; 10 * 20 * 2],
        );
        assert!(matches!(
            image,
            Err(ImageError::InvalidChannelShape(400, 600))
        ));
    }

    #[test]
    fn image_zero_extent() {
        let image = Image::new(
            ImageSize {
                width: 0,
                height: 20,
            },
            3,
            vec![],
        );
        assert!(image.is_err());
    }

    #[test]
    fn image_planes() -> Result<(), ImageError> {
        let data = (0..12).map(|v| v as f64).collect::<Vec<_>>();
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            2,
            data,
        )?;
        assert_eq!(image.plane(0)?, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(image.plane(1)?, &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        assert!(matches!(
            image.plane(2),
            Err(ImageError::ChannelIndexOutOfBounds(2, 2))
        ));
        Ok(())
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            7.5,
        )?;
        assert!(image.as_slice().iter().all(|&v| v == 7.5));
        Ok(())
    }
}
