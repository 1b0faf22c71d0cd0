use anyhow::{bail, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};

// 6x4 inch print at 300 PPI.
pub const SHEET_WIDTH_PX: u32 = 1800;
pub const SHEET_HEIGHT_PX: u32 = 1200;

pub const COLUMNS: u32 = 3;
pub const ROWS: u32 = 2;

/// Square region of the source photo, in original pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Selection {
    /// Clamp to the image bounds, shrinking the square where it hangs over
    /// the right or bottom edge.
    pub fn clamped(self, width: u32, height: u32) -> Result<Selection> {
        if self.x >= width || self.y >= height {
            bail!(
                "Selection origin ({}, {}) lies outside the {}x{} image",
                self.x,
                self.y,
                width,
                height
            );
        }
        let size = self.size.min(width - self.x).min(height - self.y);
        if size == 0 {
            bail!("Selection is empty");
        }
        Ok(Selection { size, ..self })
    }
}

/// Tile the selected square into a COLUMNS x ROWS grid at original resolution.
pub fn tile_selection(img: &DynamicImage, sel: Selection) -> RgbImage {
    let crop = img.crop_imm(sel.x, sel.y, sel.size, sel.size).to_rgb8();

    let mut tiled = RgbImage::new(sel.size * COLUMNS, sel.size * ROWS);
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            imageops::replace(
                &mut tiled,
                &crop,
                (col * sel.size) as i64,
                (row * sel.size) as i64,
            );
        }
    }
    tiled
}

/// Crop, replicate, and rescale to the printable 6x4 inch sheet.
pub fn build_sheet(img: &DynamicImage, sel: Selection) -> Result<RgbImage> {
    let sel = sel.clamped(img.width(), img.height())?;
    let tiled = tile_selection(img, sel);
    Ok(imageops::resize(
        &tiled,
        SHEET_WIDTH_PX,
        SHEET_HEIGHT_PX,
        FilterType::Lanczos3,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_clamp_shrinks_overhanging_selection() {
        let sel = Selection {
            x: 6,
            y: 6,
            size: 10,
        };
        assert_eq!(
            sel.clamped(8, 8).unwrap(),
            Selection { x: 6, y: 6, size: 2 }
        );
    }

    #[test]
    fn test_clamp_rejects_origin_outside_image() {
        let sel = Selection { x: 8, y: 0, size: 4 };
        assert!(sel.clamped(8, 8).is_err());
    }

    #[test]
    fn test_tiles_repeat_the_crop() {
        let img = checker_image(8, 8);
        let sel = Selection { x: 0, y: 0, size: 4 };

        let tiled = tile_selection(&img, sel);
        assert_eq!(tiled.dimensions(), (12, 8));

        let crop = img.crop_imm(0, 0, 4, 4).to_rgb8();
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(
                            tiled.get_pixel(col * 4 + dx, row * 4 + dy),
                            crop.get_pixel(dx, dy)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sheet_has_print_dimensions() {
        let img = checker_image(20, 20);
        let sel = Selection {
            x: 2,
            y: 2,
            size: 10,
        };
        let sheet = build_sheet(&img, sel).unwrap();
        assert_eq!(sheet.dimensions(), (SHEET_WIDTH_PX, SHEET_HEIGHT_PX));
    }
}
