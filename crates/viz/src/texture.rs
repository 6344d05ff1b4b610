//! Conversion of rendered grid buffers into Bevy textures.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::texture::ImageSampler;
use sim_snapshot::{PixelBuffer, Rgb};

/// Builds a nearest-sampled sRGB texture with one texel per cell.
pub fn image_from_pixels(buffer: &PixelBuffer) -> Image {
    let size = Extent3d {
        width: buffer.width().max(1),
        height: buffer.height().max(1),
        depth_or_array_layers: 1,
    };
    let mut data = buffer.to_rgba8();
    if data.is_empty() {
        data = Rgb::WHITE.to_rgba8().to_vec();
    }

    let mut image = Image::new(
        size,
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    image
}

/// Converts a snapshot colour into a Bevy colour.
pub fn color_from_rgb(rgb: Rgb) -> Color {
    Color::srgb(rgb.r, rgb.g, rgb.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_snapshot::CellColour;

    #[test]
    fn test_image_matches_buffer() {
        let mut buffer = PixelBuffer::filled(3, 2, Rgb::WHITE);
        buffer.set(1, 2, CellColour::Red.rgb());

        let image = image_from_pixels(&buffer);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.data.len(), 3 * 2 * 4);

        // Row 1, column 2 is the last texel.
        assert_eq!(&image.data[20..24], &[255, 0, 0, 255]);
        assert_eq!(&image.data[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_color_from_rgb() {
        let color = color_from_rgb(Rgb::new(0.0, 1.0, 0.0)).to_srgba();
        assert_eq!(color.red, 0.0);
        assert_eq!(color.green, 1.0);
    }
}
