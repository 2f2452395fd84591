//! Pipeline diagnostics: timing and counts for each stage.
//!
//! [`process_with_diagnostics`] runs the same stages as
//! [`process`](crate::process) while timing each one through a caller
//! supplied [`Clock`], keeping this crate free of platform time sources.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;
use crate::types::{ColorPath, TraceConfig, TraceError, TraceResult};
use crate::{assemble, decode, optimize, scan};

/// Source of timestamps for stage timing.
pub trait Clock {
    /// Opaque point in time.
    type Instant;

    /// The current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDiagnostics {
    /// Image decoding.
    pub decode: StageDiagnostics,
    /// Boundary tracing and color grouping.
    pub scan: StageDiagnostics,
    /// Collinear vertex removal (only when `config.optimize == true`).
    pub optimize: Option<StageDiagnostics>,
    /// Fill path assembly.
    pub assemble: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: TraceSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Image decoding metrics.
    Decode {
        /// Size of the input image bytes.
        input_bytes: usize,
        /// Decoded image width in pixels.
        width: u32,
        /// Decoded image height in pixels.
        height: u32,
        /// Pixels with non-zero alpha, translucent ones included.
        visible_pixel_count: u64,
    },
    /// Boundary tracing metrics.
    Scan {
        /// Distinct non-transparent colors.
        color_count: usize,
        /// Subpaths across all colors.
        subpath_count: usize,
        /// Vertices emitted by the tracer.
        point_count: usize,
        /// (cell, corner) states the tracer walked.
        corners_visited: usize,
    },
    /// Collinear vertex removal metrics.
    Optimize {
        /// Vertices before optimization.
        points_before: usize,
        /// Vertices after optimization.
        points_after: usize,
        /// Reduction ratio: `1.0 - (after / before)`.
        reduction_ratio: f64,
    },
    /// Fill path assembly metrics.
    Assemble {
        /// Fill paths produced.
        path_count: usize,
        /// Fill paths needing an explicit opacity.
        translucent_count: usize,
    },
}

/// High-level summary counts for the entire pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Number of output fill paths (distinct colors).
    pub path_count: usize,
    /// Number of output subpaths.
    pub subpath_count: usize,
    /// Vertices in the final output.
    pub final_point_count: usize,
}

/// Run the pipeline, collecting per-stage diagnostics.
///
/// # Errors
///
/// Same as [`process`](crate::process).
pub fn process_with_diagnostics<C: Clock>(
    image_bytes: &[u8],
    config: &TraceConfig,
    clock: &C,
) -> Result<(TraceResult, TraceDiagnostics), TraceError> {
    let total_start = clock.now();

    let start = clock.now();
    let image = decode::decode_rgba(image_bytes)?;
    let dimensions = PixelGrid::dimensions(&image);
    let decode = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Decode {
            input_bytes: image_bytes.len(),
            width: dimensions.width,
            height: dimensions.height,
            visible_pixel_count: count_visible_pixels(&image),
        },
    };

    let start = clock.now();
    let scanned = scan::scan_regions(&image);
    let traced_points = total_points(&scanned.paths);
    let scan = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Scan {
            color_count: scanned.paths.len(),
            subpath_count: total_subpaths(&scanned.paths),
            point_count: traced_points,
            corners_visited: scanned.corners_visited,
        },
    };

    let (paths, optimize) = if config.optimize {
        let start = clock.now();
        let optimized = optimize::optimize_paths(&scanned.paths);
        let points_after = total_points(&optimized);
        let stage = StageDiagnostics {
            duration: clock.elapsed(&start),
            metrics: StageMetrics::Optimize {
                points_before: traced_points,
                points_after,
                reduction_ratio: reduction_ratio(traced_points, points_after),
            },
        };
        (optimized, Some(stage))
    } else {
        (scanned.paths, None)
    };

    let start = clock.now();
    let subpath_count = total_subpaths(&paths);
    let final_point_count = total_points(&paths);
    let fills = assemble::assemble_paths(paths);
    let assemble = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Assemble {
            path_count: fills.len(),
            translucent_count: fills.iter().filter(|f| f.needs_opacity()).count(),
        },
    };

    let diagnostics = TraceDiagnostics {
        decode,
        scan,
        optimize,
        assemble,
        total_duration: clock.elapsed(&total_start),
        summary: TraceSummary {
            image_width: dimensions.width,
            image_height: dimensions.height,
            path_count: fills.len(),
            subpath_count,
            final_point_count,
        },
    };

    Ok((
        TraceResult {
            paths: fills,
            dimensions,
        },
        diagnostics,
    ))
}

impl TraceDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Trace Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{}",
            self.summary.image_width, self.summary.image_height,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<24} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);

        let mut stages = vec![("Decode", &self.decode), ("Scan", &self.scan)];
        if let Some(ref o) = self.optimize {
            stages.push(("Optimize", o));
        }
        stages.push(("Assemble", &self.assemble));

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<24} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Colors: {}  |  Subpaths: {}  |  Final points: {}",
            self.summary.path_count, self.summary.subpath_count, self.summary.final_point_count,
        ));

        lines.join("\n")
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Decode {
            input_bytes,
            width,
            height,
            visible_pixel_count,
        } => format!("{input_bytes} bytes -> {width}x{height}, {visible_pixel_count} visible"),
        StageMetrics::Scan {
            color_count,
            subpath_count,
            point_count,
            corners_visited,
        } => format!(
            "{color_count} colors, {subpath_count} subpaths, {point_count} pts, {corners_visited} corners"
        ),
        StageMetrics::Optimize {
            points_before,
            points_after,
            reduction_ratio,
        } => format!(
            "{points_before}->{points_after} pts ({:.1}% reduction)",
            reduction_ratio * 100.0,
        ),
        StageMetrics::Assemble {
            path_count,
            translucent_count,
        } => format!("{path_count} paths ({translucent_count} translucent)"),
    }
}

/// Count pixels with non-zero alpha.
pub(crate) fn count_visible_pixels<G: PixelGrid + ?Sized>(grid: &G) -> u64 {
    let mut count = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid
                .get(i64::from(x), i64::from(y))
                .is_some_and(|c| !c.is_transparent())
            {
                count += 1;
            }
        }
    }
    count
}

/// Total vertices across a slice of color paths.
pub(crate) fn total_points(paths: &[ColorPath]) -> usize {
    paths.iter().map(ColorPath::point_count).sum()
}

/// Total subpaths across a slice of color paths.
pub(crate) fn total_subpaths(paths: &[ColorPath]) -> usize {
    paths.iter().map(|p| p.subpaths.len()).sum()
}

#[allow(clippy::cast_precision_loss)]
fn reduction_ratio(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        1.0 - after as f64 / before as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::decode::tests::encode_png;

    /// Clock that advances one millisecond per reading.
    struct TickClock(Cell<u64>);

    impl Clock for TickClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.0.get();
            self.0.set(t + 1);
            t
        }

        fn elapsed(&self, since: &u64) -> Duration {
            Duration::from_millis(self.0.get() - since)
        }
    }

    fn ring_png() -> Vec<u8> {
        let img = image::RgbaImage::from_fn(3, 3, |x, y| {
            if x == 1 && y == 1 {
                image::Rgba([0, 0, 0, 0])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        encode_png(&img)
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let ms = duration_ms(Duration::from_millis(1234));
        assert!((ms - 1234.0).abs() < 0.01);
    }

    #[test]
    fn reduction_ratio_handles_empty_input() {
        assert!(reduction_ratio(0, 0).abs() < f64::EPSILON);
        assert!((reduction_ratio(10, 4) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn count_visible_pixels_skips_transparent() {
        let img = image::RgbaImage::from_fn(4, 1, |x, _| image::Rgba([0, 0, 0, u8::from(x % 2 == 0)]));
        assert_eq!(count_visible_pixels(&img), 2);
    }

    #[test]
    fn count_visible_pixels_includes_translucent() {
        let img = image::RgbaImage::from_fn(3, 1, |x, _| {
            image::Rgba([9, 9, 9, [255, 40, 0][x as usize]])
        });
        assert_eq!(count_visible_pixels(&img), 2);
    }

    #[test]
    fn diagnostics_match_result() {
        let clock = TickClock(Cell::new(0));
        let (result, diag) =
            process_with_diagnostics(&ring_png(), &TraceConfig::default(), &clock).unwrap();

        assert_eq!(result.paths.len(), 1);
        assert_eq!(diag.summary.path_count, 1);
        assert_eq!(diag.summary.subpath_count, 2);
        assert_eq!(diag.summary.final_point_count, 8);
        assert!(matches!(
            diag.decode.metrics,
            StageMetrics::Decode {
                width: 3,
                height: 3,
                visible_pixel_count: 8,
                ..
            }
        ));
        assert!(matches!(
            diag.scan.metrics,
            StageMetrics::Scan {
                color_count: 1,
                subpath_count: 2,
                ..
            }
        ));
        assert!(diag.optimize.is_some());
        assert!(diag.total_duration >= diag.scan.duration);
    }

    #[test]
    fn optimize_stage_absent_when_disabled() {
        let clock = TickClock(Cell::new(0));
        let config = TraceConfig { optimize: false };
        let (result, diag) = process_with_diagnostics(&ring_png(), &config, &clock).unwrap();
        assert!(diag.optimize.is_none());
        // Unoptimized: one vertex per boundary corner, 12 outer + 4 hole.
        assert_eq!(diag.summary.final_point_count, 16);
        assert_eq!(
            result.paths[0]
                .subpaths
                .iter()
                .map(|s| s.len())
                .sum::<usize>(),
            16
        );
    }

    #[test]
    fn errors_propagate() {
        let clock = TickClock(Cell::new(0));
        let result = process_with_diagnostics(&[], &TraceConfig::default(), &clock);
        assert!(matches!(result, Err(TraceError::EmptyInput)));
    }

    #[test]
    fn report_lists_every_stage() {
        let clock = TickClock(Cell::new(0));
        let (_, diag) =
            process_with_diagnostics(&ring_png(), &TraceConfig::default(), &clock).unwrap();
        let report = diag.report();
        assert!(report.contains("Trace Diagnostics Report"));
        for stage in ["Decode", "Scan", "Optimize", "Assemble"] {
            assert!(report.contains(stage), "missing {stage} in report");
        }
        assert!(report.contains("Subpaths: 2"));
    }

    #[test]
    fn diagnostics_serde_round_trip() {
        let clock = TickClock(Cell::new(0));
        let (_, diag) =
            process_with_diagnostics(&ring_png(), &TraceConfig::default(), &clock).unwrap();
        let json = serde_json::to_string(&diag).unwrap();
        let back: TraceDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.final_point_count, diag.summary.final_point_count);
        assert!(back.optimize.is_some());
    }
}
