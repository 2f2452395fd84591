//! pixtrace-pipeline: Pure boundary-tracing pipeline (sans-IO).
//!
//! Converts pixel-art and flat-color raster images into closed,
//! axis-aligned polygons, one path per distinct color, through:
//! decode -> region scan (boundary tracing) -> collinear vertex removal ->
//! fill path assembly.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. SVG output lives in
//! `pixtrace-export` and file handling in the `pixtrace` binary.

pub mod assemble;
pub mod corner;
pub mod decode;
pub mod diagnostics;
pub mod grid;
pub mod optimize;
pub mod scan;
pub mod trace;
pub mod types;
pub mod visited;

pub use corner::Corner;
pub use grid::PixelGrid;
pub use types::{
    Color, ColorPath, Dimensions, FillPath, FillRule, Point, RgbaImage, Subpath, TraceConfig,
    TraceError, TraceResult,
};

/// Trace every non-transparent region of a decoded grid.
///
/// Total over any grid: an empty or fully transparent grid yields no
/// paths.
#[must_use = "returns the traced fill paths"]
#[tracing::instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
pub fn trace_grid<G: PixelGrid + ?Sized>(grid: &G, config: &TraceConfig) -> Vec<FillPath> {
    let scanned = scan::scan_regions(grid);
    tracing::debug!(
        colors = scanned.paths.len(),
        points = diagnostics::total_points(&scanned.paths),
        corners_visited = scanned.corners_visited,
        "traced boundaries"
    );

    let paths = if config.optimize {
        let optimized = optimize::optimize_paths(&scanned.paths);
        tracing::debug!(
            points = diagnostics::total_points(&optimized),
            "removed collinear vertices"
        );
        optimized
    } else {
        scanned.paths
    };

    assemble::assemble_paths(paths)
}

/// Run the full tracing pipeline.
///
/// Takes raw image bytes (PNG, BMP, GIF, WebP) and a configuration, then
/// produces a [`TraceResult`] containing one fill path per color and the
/// source image dimensions. The dimensions are needed by export
/// serializers to set coordinate spaces (e.g., SVG `viewBox`).
///
/// An image without any non-transparent pixel is not an error; it yields
/// an empty path list.
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`TraceError::ImageDecode`] if the image format is unrecognized.
#[tracing::instrument(skip_all, fields(input_bytes = image_bytes.len()))]
pub fn process(image_bytes: &[u8], config: &TraceConfig) -> Result<TraceResult, TraceError> {
    let image = decode::decode_rgba(image_bytes)?;
    let dimensions = PixelGrid::dimensions(&image);
    tracing::debug!(
        width = dimensions.width,
        height = dimensions.height,
        "decoded image"
    );

    let paths = trace_grid(&image, config);
    Ok(TraceResult { paths, dimensions })
}
