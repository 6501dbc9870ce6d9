use crate::refs::{ObjectReferences, RefType};
use crate::PermitError;
use image::{ColorType, DynamicImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

enum RasterData {
    /// Baseline RGB JPEGs can be handed to the PDF reader as they are
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image, in practice the issuing authority's logo
pub struct Image {
    data: RasterData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode a PNG or JPEG (or anything else [image] can guess) from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Image, PermitError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        let (width, height) = (decoded.width(), decoded.height());

        let data = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::Jpeg(bytes.to_vec()),
            _ => RasterData::Decoded(decoded),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([20, 40, 90, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .expect("can encode png");
        out.into_inner()
    }

    #[test]
    fn transparent_png_gets_a_soft_mask() {
        let image = Image::from_bytes(&png(4, 2)).expect("can decode png");
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.aspect_ratio(), 2.0);
        let encoded = image.encode();
        assert!(encoded.mask.is_some());
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            Image::from_bytes(b"definitely not a picture"),
            Err(PermitError::Image(_))
        ));
    }
}
