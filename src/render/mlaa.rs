//! Morphological antialiasing over a finished frame.
//!
//! A two-phase post-process: detection walks every scanline and column of
//! the framebuffer collecting primary edge spans (maximal runs where the
//! orthogonal neighbor pair exceeds the contrast threshold), then resolve
//! blends a triangular coverage ramp into the pixels bracketing each span
//! end. The blend is not idempotent, so resolve must run exactly once per
//! frame, after all geometry is drawn.
//!
//! Edge lists are derived data: they are rebuilt from scratch for every
//! frame and never persisted across redraws.

use tracing::debug;

use crate::framebuffer::Framebuffer;

/// Per-channel difference above which two pixels count as a contrast edge.
const CONTRAST_THRESHOLD: i16 = 16;

/// True when any RGB channel of the two packed pixels differs by more than
/// the contrast threshold. Alpha is ignored. Symmetric in its arguments.
#[must_use]
pub fn is_contrast_edge(p1: [u8; 4], p2: [u8; 4]) -> bool {
    (i16::from(p1[0]) - i16::from(p2[0])).abs() > CONTRAST_THRESHOLD
        || (i16::from(p1[1]) - i16::from(p2[1])).abs() > CONTRAST_THRESHOLD
        || (i16::from(p1[2]) - i16::from(p2[2])).abs() > CONTRAST_THRESHOLD
}

/// One primary edge: a maximal contrast run along a scanline or column.
///
/// For a row span, `pri` is the row index and `begin..end` the X range; for
/// a column span, `pri` is the column and `begin..end` the Y range. The two
/// flags record whether the perpendicular seam at that end is itself a
/// contrast edge, which picks the side of the seam that receives the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpan {
    /// Inclusive start of the run along the scan axis.
    pub begin: usize,
    /// Exclusive end of the run along the scan axis.
    pub end: usize,
    /// The fixed scanline or column index.
    pub pri: usize,
    /// Orthogonal contrast edge present at `begin`.
    pub edge_at_begin: bool,
    /// Orthogonal contrast edge present at `end`.
    pub edge_at_end: bool,
}

/// Edge spans detected for one frame.
#[derive(Debug)]
pub struct MorphAntialias {
    width: usize,
    height: usize,
    row_edges: Vec<EdgeSpan>,
    col_edges: Vec<EdgeSpan>,
}

impl MorphAntialias {
    /// Scan the framebuffer for primary edges.
    #[must_use]
    pub fn new(fb: &Framebuffer) -> Self {
        let width = fb.width() as usize;
        let height = fb.height() as usize;
        let pixels = fb.pixels();

        let mut row_edges = Vec::new();
        for y_pri in 0..height.saturating_sub(1) {
            let mut begin = 0;
            for x in 0..width {
                let top = texel(pixels, width, x, y_pri);
                let bottom = texel(pixels, width, x, y_pri + 1);
                if !is_contrast_edge(top, bottom) {
                    if begin == x {
                        begin = x + 1;
                    } else {
                        row_edges.push(row_span(pixels, width, begin, x, y_pri, false));
                        begin = x + 1;
                    }
                }
            }
            if begin != width {
                row_edges.push(row_span(pixels, width, begin, width, y_pri, true));
            }
        }

        let mut col_edges = Vec::new();
        for x_pri in 0..width.saturating_sub(1) {
            let mut begin = 0;
            for y in 0..height {
                let left = texel(pixels, width, x_pri, y);
                let right = texel(pixels, width, x_pri + 1, y);
                if !is_contrast_edge(left, right) {
                    if begin == y {
                        begin = y + 1;
                    } else {
                        col_edges.push(col_span(pixels, width, begin, y, x_pri, false));
                        begin = y + 1;
                    }
                }
            }
            if begin != height {
                col_edges.push(col_span(pixels, width, begin, height, x_pri, true));
            }
        }

        debug!(
            rows = row_edges.len(),
            cols = col_edges.len(),
            "detected primary edges"
        );

        Self {
            width,
            height,
            row_edges,
            col_edges,
        }
    }

    /// Detected row spans, in scan order.
    #[must_use]
    pub fn row_edges(&self) -> &[EdgeSpan] {
        &self.row_edges
    }

    /// Detected column spans, in scan order.
    #[must_use]
    pub fn col_edges(&self) -> &[EdgeSpan] {
        &self.col_edges
    }

    /// Blend the coverage ramps for every detected span into the buffer.
    ///
    /// Must run on the same buffer the spans were detected from, once.
    pub fn resolve(&self, fb: &mut Framebuffer) {
        let pixels = fb.pixels_mut();

        for span in &self.row_edges {
            self.antialias_row_edge(pixels, span);
        }
        for span in &self.col_edges {
            self.antialias_col_edge(pixels, span);
        }
    }

    /// Ramp the two rows bracketing a horizontal primary edge.
    ///
    /// Each end of the span gets an L-shaped blend: coverage falls linearly
    /// from 0.5 at the corner to 0 at mid-span. When the opposite end of the
    /// span sits on the buffer boundary the ramp length is extended by one,
    /// compensating for the phantom pixel beyond the edge.
    fn antialias_row_edge(&self, pixels: &mut [u8], span: &EdgeSpan) {
        let y0 = span.pri;
        let y1 = span.pri + 1;
        let x1 = span.begin;
        let x2 = span.end - 1;
        let len = (span.end - span.begin) as f32;

        // begin-side L
        {
            let (y_to, y_from) = if span.edge_at_begin { (y0, y1) } else { (y1, y0) };
            let len_edge = if span.end == self.width { len + 1.0 } else { len };
            let k = -1.0 / len_edge;

            let mut i = 0.0f32;
            while i < len_edge / 2.0 {
                let h1 = k * i + 0.5;
                let h2 = (k * (i + 1.0) + 0.5).max(0.0);
                let area = (h1 + h2) / 2.0;

                let x = (x1 as f32 + i) as usize;
                blend_toward(pixels, self.width, (x, y_to), (x, y_from), area);
                i += 1.0;
            }
        }

        // end-side L
        {
            let (y_to, y_from) = if span.edge_at_end { (y0, y1) } else { (y1, y0) };
            let len_edge = if span.begin == 0 { len + 1.0 } else { len };
            let k = 1.0 / len_edge;

            let mut i = 0.0f32;
            while i > -len_edge / 2.0 {
                let h1 = k * i + 0.5;
                let h2 = (k * (i - 1.0) + 0.5).max(0.0);
                let area = (h1 + h2) / 2.0;

                let x = (x2 as f32 + i) as usize;
                blend_toward(pixels, self.width, (x, y_to), (x, y_from), area);
                i -= 1.0;
            }
        }
    }

    /// Ramp the two columns bracketing a vertical primary edge. Mirror of
    /// [`Self::antialias_row_edge`] with the axes swapped.
    fn antialias_col_edge(&self, pixels: &mut [u8], span: &EdgeSpan) {
        let x0 = span.pri;
        let x1 = span.pri + 1;
        let y1 = span.begin;
        let y2 = span.end - 1;
        let len = (span.end - span.begin) as f32;

        // begin-side L
        {
            let (x_to, x_from) = if span.edge_at_begin { (x0, x1) } else { (x1, x0) };
            let len_edge = if span.end == self.height { len + 1.0 } else { len };
            let a = 1.0 / len_edge;

            let mut i = 0.0f32;
            while i > -len_edge / 2.0 {
                let h1 = a * i + 0.5;
                let h2 = (a * (i - 1.0) + 0.5).max(0.0);
                let area = (h1 + h2) / 2.0;

                let y = (y1 as f32 - i) as usize;
                blend_toward(pixels, self.width, (x_to, y), (x_from, y), area);
                i -= 1.0;
            }
        }

        // end-side L
        {
            let (x_to, x_from) = if span.edge_at_end { (x0, x1) } else { (x1, x0) };
            let len_edge = if span.begin == 0 { len + 1.0 } else { len };
            let a = -1.0 / len_edge;

            let mut i = 0.0f32;
            while i < len_edge / 2.0 {
                let h1 = a * i + 0.5;
                let h2 = (a * (i + 1.0) + 0.5).max(0.0);
                let area = (h1 + h2) / 2.0;

                let y = (y2 as f32 - i) as usize;
                blend_toward(pixels, self.width, (x_to, y), (x_from, y), area);
                i += 1.0;
            }
        }
    }
}

/// Build a row span, testing the orthogonal horizontal pairs at both ends.
/// `dangling` marks a span that ran into the right buffer edge.
fn row_span(
    pixels: &[u8],
    width: usize,
    begin: usize,
    end: usize,
    y_pri: usize,
    dangling: bool,
) -> EdgeSpan {
    let edge_at_begin = begin != 0
        && is_contrast_edge(
            texel(pixels, width, begin - 1, y_pri),
            texel(pixels, width, begin, y_pri),
        );
    let edge_at_end = !dangling
        && is_contrast_edge(
            texel(pixels, width, end - 1, y_pri),
            texel(pixels, width, end, y_pri),
        );
    EdgeSpan {
        begin,
        end,
        pri: y_pri,
        edge_at_begin,
        edge_at_end,
    }
}

/// Build a column span, testing the orthogonal vertical pairs at both ends.
/// `dangling` marks a span that ran into the bottom buffer edge.
fn col_span(
    pixels: &[u8],
    width: usize,
    begin: usize,
    end: usize,
    x_pri: usize,
    dangling: bool,
) -> EdgeSpan {
    let edge_at_begin = begin != 0
        && is_contrast_edge(
            texel(pixels, width, x_pri, begin - 1),
            texel(pixels, width, x_pri, begin),
        );
    let edge_at_end = !dangling
        && is_contrast_edge(
            texel(pixels, width, x_pri, end - 1),
            texel(pixels, width, x_pri, end),
        );
    EdgeSpan {
        begin,
        end,
        pri: x_pri,
        edge_at_begin,
        edge_at_end,
    }
}

#[inline]
fn texel(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let idx = 4 * (y * width + x);
    [
        pixels[idx],
        pixels[idx + 1],
        pixels[idx + 2],
        pixels[idx + 3],
    ]
}

/// Blend the RGB channels of `from` into `to` by coverage `area`,
/// `to = (1 - area) * to + area * from`. Alpha is untouched.
#[inline]
fn blend_toward(
    pixels: &mut [u8],
    width: usize,
    to: (usize, usize),
    from: (usize, usize),
    area: f32,
) {
    let src = texel(pixels, width, from.0, from.1);
    let idx = 4 * (to.1 * width + to.0);
    for ch in 0..3 {
        pixels[idx + ch] =
            ((1.0 - area) * f32::from(pixels[idx + ch]) + area * f32::from(src[ch])).round() as u8;
    }
}
