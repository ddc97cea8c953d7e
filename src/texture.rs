//! Mipmapped textures and samplers.
//!
//! A [`Texture`] owns a pyramid of [`MipLevel`]s built once from a decoded
//! RGBA8 image; levels are immutable after generation. Level `i + 1` halves
//! each dimension (`max(1, dim / 2)`), generation stops when both dimensions
//! reach 1 or the level count hits [`MAX_MIP_LEVELS`].
//!
//! Downsampling convolves the previous level with a separable trapezoidal
//! filter: a 2-tap box when the dimension is even, a 3-tap filter with edge
//! weights proportional to `1 / current_dim` when it is odd, so the rounding
//! remainder is covered. Filtering happens in normalized float space
//! (`u8 / 255`) and requantizes with round/clamp.
//!
//! All samplers degrade to opaque white for out-of-range coordinates; a bad
//! sample is a visible-but-wrong pixel, never a fault.

use crate::color::Color;
use crate::error::{Error, Result};

/// Hard cap on pyramid depth regardless of source size.
pub const MAX_MIP_LEVELS: usize = 14;

/// One level of a mip pyramid, level 0 being full resolution.
#[derive(Debug, Clone)]
pub struct MipLevel {
    /// Width in texels.
    pub width: usize,
    /// Height in texels.
    pub height: usize,
    /// Packed RGBA8 texels, row-major.
    pub texels: Vec<u8>,
}

impl MipLevel {
    /// Read the texel at `(x, y)`. Callers guarantee bounds.
    #[must_use]
    fn texel(&self, x: usize, y: usize) -> Color {
        let idx = 4 * (x + y * self.width);
        Color::from_rgba8([
            self.texels[idx],
            self.texels[idx + 1],
            self.texels[idx + 2],
            self.texels[idx + 3],
        ])
    }
}

/// An immutable mip pyramid over one RGBA8 image.
#[derive(Debug, Clone)]
pub struct Texture {
    levels: Vec<MipLevel>,
}

impl Texture {
    /// Build a texture (full mip chain included) from a decoded RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the buffer length is not
    /// `4 * width * height`.
    pub fn from_rgba8(width: u32, height: u32, texels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = 4 * (width as usize) * (height as usize);
        if texels.len() != expected {
            return Err(Error::TextureDataLength {
                expected,
                actual: texels.len(),
            });
        }

        let mut texture = Self {
            levels: vec![MipLevel {
                width: width as usize,
                height: height as usize,
                texels,
            }],
        };
        texture.generate_mips();
        Ok(texture)
    }

    /// Full-resolution width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.levels[0].width
    }

    /// Full-resolution height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.levels[0].height
    }

    /// Number of generated levels (including level 0).
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// All levels, coarsest last.
    #[must_use]
    pub fn levels(&self) -> &[MipLevel] {
        &self.levels
    }

    /// A single level, if it exists.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.levels.get(index)
    }

    /// Build `floor(log2(max(w, h)))` reduced levels, capped at
    /// [`MAX_MIP_LEVELS`] total.
    fn generate_mips(&mut self) {
        let base_width = self.levels[0].width;
        let base_height = self.levels[0].height;

        let max_dim = base_width.max(base_height) as f32;
        let num_sub_levels = (max_dim.log2().floor() as usize).min(MAX_MIP_LEVELS - 1);

        // allocate sublevels, rounding odd sizes down
        let mut width = base_width;
        let mut height = base_height;
        for _ in 0..num_sub_levels {
            width = (width / 2).max(1);
            height = (height / 2).max(1);
            self.levels.push(MipLevel {
                width,
                height,
                texels: vec![0; 4 * width * height],
            });
        }

        for level in 1..=num_sub_levels {
            let (filled, rest) = self.levels.split_at_mut(level);
            downsample(&filled[level - 1], &mut rest[0]);
        }
    }
}

/// Convolve one level down to the next with the trapezoidal filter.
///
/// Three cases are selected by comparing current and previous dimensions:
/// width-only reduction, height-only reduction, or both.
fn downsample(prev: &MipLevel, curr: &mut MipLevel) {
    let (w_support, w_decimal) = if prev.width % 2 == 1 {
        (3usize, 1.0 / curr.width as f32)
    } else {
        (2usize, 0.0)
    };
    let (h_support, h_decimal) = if prev.height % 2 == 1 {
        (3usize, 1.0 / curr.height as f32)
    } else {
        (2usize, 0.0)
    };

    let w_norm = 1.0 / (2.0 + w_decimal);
    let h_norm = 1.0 / (2.0 + h_decimal);

    let prev_pitch = prev.width * 4;
    let curr_pitch = curr.width * 4;

    if curr.height == prev.height {
        // case 1: reduction only in horizontal size (vertical size is 1)
        for i in 0..curr.width {
            let w_weight = [
                w_norm * (1.0 - w_decimal * i as f32),
                w_norm,
                w_norm * w_decimal * (i as f32 + 1.0),
            ];

            let mut result = [0.0f32; 4];
            for ii in 0..w_support {
                accumulate(&mut result, w_weight[ii], &prev.texels[4 * (2 * i + ii)..]);
            }
            write_texel(&mut curr.texels[4 * i..], result);
        }
    } else if curr.width == prev.width {
        // case 2: reduction only in vertical size (horizontal size is 1)
        for j in 0..curr.height {
            let h_weight = [
                h_norm * (1.0 - h_decimal * j as f32),
                h_norm,
                h_norm * h_decimal * (j as f32 + 1.0),
            ];

            let mut result = [0.0f32; 4];
            for jj in 0..h_support {
                accumulate(&mut result, h_weight[jj], &prev.texels[prev_pitch * (2 * j + jj)..]);
            }
            write_texel(&mut curr.texels[curr_pitch * j..], result);
        }
    } else {
        // case 3: reduction in both sizes; with no rounding this is a 2x2
        // box, in the general case the support region is 3x3
        for j in 0..curr.height {
            let h_weight = [
                h_norm * (1.0 - h_decimal * j as f32),
                h_norm,
                h_norm * h_decimal * (j as f32 + 1.0),
            ];

            for i in 0..curr.width {
                let w_weight = [
                    w_norm * (1.0 - w_decimal * i as f32),
                    w_norm,
                    w_norm * w_decimal * (i as f32 + 1.0),
                ];

                let mut result = [0.0f32; 4];
                for jj in 0..h_support {
                    for ii in 0..w_support {
                        accumulate(
                            &mut result,
                            h_weight[jj] * w_weight[ii],
                            &prev.texels[prev_pitch * (2 * j + jj) + 4 * (2 * i + ii)..],
                        );
                    }
                }
                write_texel(&mut curr.texels[curr_pitch * j + 4 * i..], result);
            }
        }
    }
}

#[inline]
fn accumulate(result: &mut [f32; 4], weight: f32, texel: &[u8]) {
    for (k, r) in result.iter_mut().enumerate() {
        *r += weight * f32::from(texel[k]) / 255.0;
    }
}

#[inline]
fn write_texel(dst: &mut [u8], src: [f32; 4]) {
    for (k, value) in src.iter().enumerate() {
        dst[k] = (255.0 * value.clamp(0.0, 1.0)).round() as u8;
    }
}

/// Texture samplers over a mip pyramid.
pub struct Sampler2D;

impl Sampler2D {
    /// Nearest-texel lookup at a given level.
    ///
    /// Out-of-range texel coordinates (or a missing level) return opaque
    /// white.
    #[must_use]
    pub fn sample_nearest(tex: &Texture, u: f32, v: f32, level: usize) -> Color {
        let Some(mip) = tex.level(level) else {
            return Color::WHITE;
        };

        let su = (u * mip.width as f32).floor();
        let sv = (v * mip.height as f32).floor();
        if su < 0.0 || su >= mip.width as f32 || sv < 0.0 || sv >= mip.height as f32 {
            return Color::WHITE;
        }

        mip.texel(su as usize, sv as usize)
    }

    /// Bilinear lookup at a given level: blends the 4 texels bracketing the
    /// sample point by the fractional offset on each axis.
    ///
    /// `(u, v)` outside `[0, 1]` returns opaque white; samples closer than
    /// half a texel to the border degrade to a nearest lookup.
    #[must_use]
    pub fn sample_bilinear(tex: &Texture, u: f32, v: f32, level: usize) -> Color {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Color::WHITE;
        }
        let Some(mip) = tex.level(level) else {
            return Color::WHITE;
        };

        let u = u * mip.width as f32;
        let v = v * mip.height as f32;

        // inclusive band: at exactly dim - 0.5 the round below would index
        // one past the last texel
        if u <= 0.5 || u >= mip.width as f32 - 0.5 || v <= 0.5 || v >= mip.height as f32 - 0.5 {
            let su = (u as usize).min(mip.width - 1);
            let sv = (v as usize).min(mip.height - 1);
            return mip.texel(su, sv);
        }

        let su1 = u.round() as usize;
        let sv1 = v.round() as usize;
        let su0 = su1 - 1;
        let sv0 = sv1 - 1;

        let c1 = mip.texel(su0, sv0);
        let c2 = mip.texel(su1, sv0);
        let c3 = mip.texel(su0, sv1);
        let c4 = mip.texel(su1, sv1);

        let tu = u - (su0 as f32 + 0.5);
        let c12 = c1 * (1.0 - tu) + c2 * tu;
        let c34 = c3 * (1.0 - tu) + c4 * tu;

        let tv = v - (sv0 as f32 + 0.5);
        c12 * (1.0 - tv) + c34 * tv
    }

    /// Trilinear lookup: picks a fractional level from
    /// `log2(max(u_scale * w, v_scale * h))` and blends the two bracketing
    /// bilinear samples.
    #[must_use]
    pub fn sample_trilinear(tex: &Texture, u: f32, v: f32, u_scale: f32, v_scale: f32) -> Color {
        let mip0 = &tex.levels()[0];
        let level = (u_scale * mip0.width as f32)
            .max(v_scale * mip0.height as f32)
            .log2();
        let level = if level.is_finite() { level } else { 0.0 };

        let last = tex.level_count() - 1;
        let low = (level.floor().max(0.0) as usize).min(last);
        let high = (low + 1).min(last);
        let t = (level - low as f32).clamp(0.0, 1.0);

        Self::sample_bilinear(tex, u, v, low) * (1.0 - t)
            + Self::sample_bilinear(tex, u, v, high) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_texels(width: usize, height: usize) -> Vec<u8> {
        let mut texels = Vec::with_capacity(4 * width * height);
        for y in 0..height {
            for x in 0..width {
                let value = if (x + y) % 2 == 0 { 255 } else { 0 };
                texels.extend_from_slice(&[value, value, value, 255]);
            }
        }
        texels
    }

    #[test]
    fn test_mip_chain_4x4() {
        let tex = Texture::from_rgba8(4, 4, checker_texels(4, 4)).unwrap();
        assert_eq!(tex.level_count(), 3);
        assert_eq!((tex.level(0).unwrap().width, tex.level(0).unwrap().height), (4, 4));
        assert_eq!((tex.level(1).unwrap().width, tex.level(1).unwrap().height), (2, 2));
        assert_eq!((tex.level(2).unwrap().width, tex.level(2).unwrap().height), (1, 1));
    }

    #[test]
    fn test_mip_chain_non_square() {
        let tex = Texture::from_rgba8(8, 3, checker_texels(8, 3)).unwrap();
        // floor(log2(8)) = 3 sublevels: 8x3 -> 4x1 -> 2x1 -> 1x1
        assert_eq!(tex.level_count(), 4);
        assert_eq!((tex.level(1).unwrap().width, tex.level(1).unwrap().height), (4, 1));
        assert_eq!((tex.level(2).unwrap().width, tex.level(2).unwrap().height), (2, 1));
        assert_eq!((tex.level(3).unwrap().width, tex.level(3).unwrap().height), (1, 1));
    }

    #[test]
    fn test_mip_1x1_has_single_level() {
        let tex = Texture::from_rgba8(1, 1, vec![9, 9, 9, 255]).unwrap();
        assert_eq!(tex.level_count(), 1);
    }

    #[test]
    fn test_mip_chain_caps_at_fourteen_levels() {
        // 16384 wide would need 14 halvings to reach 1; the cap truncates
        // the chain one level early, leaving the coarsest at 2x1
        let tex = Texture::from_rgba8(16384, 1, vec![50; 4 * 16384]).unwrap();
        assert_eq!(tex.level_count(), MAX_MIP_LEVELS);
        let last = tex.level(MAX_MIP_LEVELS - 1).unwrap();
        assert_eq!((last.width, last.height), (2, 1));
        // the truncated tail is still filled by the filter
        assert_eq!(&last.texels[..3], &[50, 50, 50]);
    }

    #[test]
    fn test_box_filter_average() {
        // uniform 2x2 halves to the same color
        let tex = Texture::from_rgba8(2, 2, vec![100, 150, 200, 255].repeat(4)).unwrap();
        assert_eq!(tex.level_count(), 2);
        let coarse = tex.level(1).unwrap();
        assert_eq!(&coarse.texels[..4], &[100, 150, 200, 255]);
    }

    #[test]
    fn test_checker_averages_to_gray() {
        let tex = Texture::from_rgba8(2, 2, checker_texels(2, 2)).unwrap();
        let coarse = tex.level(1).unwrap();
        // two white + two black texels with equal weights
        assert_eq!(coarse.texels[0], 128);
        assert_eq!(coarse.texels[3], 255);
    }

    #[test]
    fn test_all_levels_filled() {
        // the coarsest level must be produced by the filter, not left zeroed
        let tex = Texture::from_rgba8(8, 8, vec![200, 200, 200, 255].repeat(64)).unwrap();
        let last = tex.level(tex.level_count() - 1).unwrap();
        assert_eq!(&last.texels[..3], &[200, 200, 200]);
    }

    #[test]
    fn test_nearest_out_of_range_is_white() {
        let tex = Texture::from_rgba8(2, 2, vec![0; 16]).unwrap();
        assert_eq!(Sampler2D::sample_nearest(&tex, 1.5, 0.5, 0), Color::WHITE);
        assert_eq!(Sampler2D::sample_nearest(&tex, -0.1, 0.5, 0), Color::WHITE);
        assert_eq!(Sampler2D::sample_nearest(&tex, 0.5, 2.0, 0), Color::WHITE);
    }

    #[test]
    fn test_nearest_picks_texel() {
        let mut texels = vec![0u8; 16];
        texels[4..8].copy_from_slice(&[255, 0, 0, 255]); // texel (1, 0)
        let tex = Texture::from_rgba8(2, 2, texels).unwrap();
        let c = Sampler2D::sample_nearest(&tex, 0.75, 0.25, 0);
        assert_eq!(c.to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_bilinear_out_of_range_is_white() {
        let tex = Texture::from_rgba8(2, 2, vec![0; 16]).unwrap();
        assert_eq!(Sampler2D::sample_bilinear(&tex, 1.5, 0.5, 0), Color::WHITE);
        assert_eq!(Sampler2D::sample_bilinear(&tex, 0.5, -0.5, 0), Color::WHITE);
    }

    #[test]
    fn test_bilinear_center_blends_four_texels() {
        // 2x2 black/white checker sampled dead center: equal quarter weights
        let tex = Texture::from_rgba8(2, 2, checker_texels(2, 2)).unwrap();
        let c = Sampler2D::sample_bilinear(&tex, 0.5, 0.5, 0);
        let px = c.to_rgba8();
        assert_eq!(px[0], 128);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_bilinear_edge_degrades_to_nearest() {
        let mut texels = vec![0u8; 16];
        texels[0..4].copy_from_slice(&[10, 20, 30, 255]);
        let tex = Texture::from_rgba8(2, 2, texels).unwrap();
        // well inside the half-texel border band of texel (0, 0)
        let c = Sampler2D::sample_bilinear(&tex, 0.1, 0.1, 0);
        assert_eq!(c.to_rgba8(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_trilinear_unit_scale_matches_level0() {
        let tex = Texture::from_rgba8(4, 4, vec![60, 60, 60, 255].repeat(16)).unwrap();
        // footprint of one texel per pixel: L = log2(1) = 0
        let c = Sampler2D::sample_trilinear(&tex, 0.5, 0.5, 0.25, 0.25);
        assert_eq!(c.to_rgba8(), [60, 60, 60, 255]);
    }

    #[test]
    fn test_from_rgba8_validates() {
        assert!(Texture::from_rgba8(0, 2, vec![]).is_err());
        assert!(Texture::from_rgba8(2, 2, vec![0; 15]).is_err());
    }
}
