//! Shared types for the pixtrace tracing pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference the
/// decoded pixel grid without depending on `image` directly.
pub use image::RgbaImage;

/// An RGBA color with 8 bits per channel.
///
/// Colors compare by exact equality on all four channels, so two pixels
/// that differ only in alpha belong to different paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. `0` is fully transparent, `255` fully opaque.
    pub a: u8,
}

impl Color {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns `true` if the alpha channel is zero.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Returns `true` if the alpha channel is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / f64::from(u8::MAX)
    }

    /// The RGB channels as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

/// A boundary vertex on the integer lattice of pixel corners.
///
/// `(0, 0)` is the top-left corner of the top-left pixel; `x` grows to the
/// right and `y` grows downward, so a `width x height` image has vertices
/// in `0..=width` by `0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixel corners from the left edge).
    pub x: u32,
    /// Vertical position (pixel corners from the top edge).
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One closed polygon boundary.
///
/// The last point connects back to the first; the closing point is never
/// repeated. Outer boundaries wind clockwise in image coordinates and holes
/// wind counter-clockwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subpath(Vec<Point>);

impl Subpath {
    /// Create a new subpath from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the subpath has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the subpath.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the subpath and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Twice the signed shoelace area of the closed polygon.
    ///
    /// Positive for clockwise winding in image coordinates (outer
    /// boundaries), negative for holes. Doubled so the result stays
    /// integral.
    #[must_use]
    pub fn signed_area_doubled(&self) -> i64 {
        let points = &self.0;
        let n = points.len();
        (0..n)
            .map(|i| {
                let p = points[i];
                let q = points[(i + 1) % n];
                i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y)
            })
            .sum()
    }
}

/// All subpaths traced for one exact color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPath {
    /// The color every pixel enclosed by these subpaths shares.
    pub color: Color,
    /// Outer boundaries and holes, in tracing order.
    pub subpaths: Vec<Subpath>,
}

impl ColorPath {
    /// Total number of vertices across all subpaths.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Subpath::len).sum()
    }
}

/// Fill rule the serializer must apply to a [`FillPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    /// Even-odd: holes nested inside an outer boundary subtract.
    #[default]
    EvenOdd,
}

impl FillRule {
    /// The SVG `fill-rule` attribute value.
    #[must_use]
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::EvenOdd => "evenodd",
        }
    }
}

/// Final per-color emission unit handed to serializers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPath {
    /// Fill color.
    pub color: Color,
    /// Alpha as a fraction in `0.0..=1.0`.
    pub opacity: f64,
    /// Fill rule to render the subpaths with.
    pub fill_rule: FillRule,
    /// Closed subpaths, each rendered as one closed sub-path.
    pub subpaths: Vec<Subpath>,
}

impl FillPath {
    /// Returns `true` when the serializer should emit an explicit opacity.
    #[must_use]
    pub const fn needs_opacity(&self) -> bool {
        !self.color.is_opaque()
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the tracing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Whether to collapse collinear vertices after tracing.
    ///
    /// Disabling this keeps one vertex per pixel corner along every
    /// boundary, which is mostly useful for debugging the tracer.
    pub optimize: bool,
}

impl TraceConfig {
    /// Default for [`optimize`](Self::optimize).
    pub const DEFAULT_OPTIMIZE: bool = true;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            optimize: Self::DEFAULT_OPTIMIZE,
        }
    }
}

/// Result of running the full tracing pipeline on encoded image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// One fill path per distinct non-transparent color, in the order the
    /// colors were first encountered scanning rows top to bottom.
    pub paths: Vec<FillPath>,

    /// Dimensions of the source image in pixels.
    ///
    /// Export serializers use this to set the SVG `viewBox`.
    pub dimensions: Dimensions,
}

/// Errors that can occur before tracing starts.
///
/// Tracing itself is total over any decoded grid; every variant here comes
/// from the decode boundary or from configuration.
///
/// Uses custom `Serialize`/`Deserialize` because `image::ImageError`
/// does not implement serde traits. The `ImageDecode` variant is
/// serialized as its `Display` string.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Configuration is invalid.
    #[error("invalid trace configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Serialize, Deserialize)]
enum TraceErrorProxy {
    ImageDecode(String),
    EmptyInput,
    InvalidConfig(String),
}

impl Serialize for TraceError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let proxy = match self {
            Self::ImageDecode(e) => TraceErrorProxy::ImageDecode(e.to_string()),
            Self::EmptyInput => TraceErrorProxy::EmptyInput,
            Self::InvalidConfig(s) => TraceErrorProxy::InvalidConfig(s.clone()),
        };
        proxy.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TraceError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = TraceErrorProxy::deserialize(deserializer)?;
        Ok(match proxy {
            // The typed image error cannot be rebuilt; keep its message.
            TraceErrorProxy::ImageDecode(msg) => {
                Self::InvalidConfig(format!("image decode error: {msg}"))
            }
            TraceErrorProxy::EmptyInput => Self::EmptyInput,
            TraceErrorProxy::InvalidConfig(s) => Self::InvalidConfig(s),
        })
    }
}
