//! SVG export serializer.
//!
//! Converts traced fill paths into an SVG string using the [`svg`] crate
//! for document construction, XML escaping, and path data formatting.
//!
//! Each [`FillPath`] becomes one `<path>` element. Its subpaths are
//! concatenated into a single `d` attribute, each as a closed `M`/`L`/`z`
//! run, and rendered with `fill-rule="evenodd"` so holes subtract.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility, plus the trace configuration for reproducibility.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Element, Path, Title};
use svg::node::{Node, Text, Value};

use pixtrace_pipeline::{Dimensions, FillPath, Subpath};

/// Metadata to embed in the SVG document.
///
/// All fields are optional. Text values are XML-escaped automatically by
/// the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    ///
    /// Typically the source image filename (without extension).
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized [`pixtrace_pipeline::TraceConfig`] JSON, emitted inside
    /// a `<metadata>` element wrapped in a namespaced
    /// `<pixtrace:config>` element.
    pub config_json: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from a set of closed subpaths.
///
/// Each subpath is emitted as `M` for its first point, `L` for the rest,
/// and a closing `z`. Subpaths with fewer than 2 points are skipped, so
/// an empty string means nothing drawable.
///
/// # Examples
///
/// ```
/// use pixtrace_pipeline::{Point, Subpath};
/// use pixtrace_export::build_path_data;
///
/// let square = Subpath::new(vec![
///     Point::new(0, 0),
///     Point::new(1, 0),
///     Point::new(1, 1),
///     Point::new(0, 1),
/// ]);
/// assert_eq!(build_path_data(&[square]), "M0,0 L1,0 L1,1 L0,1 z");
/// ```
#[must_use]
pub fn build_path_data(subpaths: &[Subpath]) -> String {
    let mut data = Data::new();
    let mut any = false;
    for subpath in subpaths {
        let [first, rest @ ..] = subpath.points() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        data = data.move_to((first.x, first.y));
        for p in rest {
            data = data.line_to((p.x, p.y));
        }
        data = data.close();
        any = true;
    }
    if !any {
        return String::new();
    }
    String::from(Value::from(data))
}

/// Serialize fill paths into an SVG document string.
///
/// The document uses pixel units: `width`, `height` and the `viewBox`
/// all match the source image dimensions, so one pixel maps to one user
/// unit. Paths are emitted in the order given, one `<path>` per color.
/// `fill-opacity` is only written for translucent colors.
///
/// # Examples
///
/// ```
/// use pixtrace_pipeline::{Color, Dimensions, FillPath, FillRule, Point, Subpath};
/// use pixtrace_export::{SvgMetadata, to_svg};
///
/// let path = FillPath {
///     color: Color::new(255, 0, 0, 255),
///     opacity: 1.0,
///     fill_rule: FillRule::EvenOdd,
///     subpaths: vec![Subpath::new(vec![
///         Point::new(0, 0),
///         Point::new(2, 0),
///         Point::new(2, 1),
///         Point::new(0, 1),
///     ])],
/// };
/// let meta = SvgMetadata {
///     title: Some("sprite"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&[path], Dimensions { width: 2, height: 1 }, &meta);
/// assert!(svg.contains(r##"fill="#ff0000""##));
/// assert!(svg.contains("<title>sprite</title>"));
/// ```
#[must_use]
pub fn to_svg(paths: &[FillPath], dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(config_json) = metadata.config_json {
        let mut config_el = Element::new("pixtrace:config");
        config_el.assign("xmlns:pixtrace", "https://pixtrace.dev/ns/1");
        config_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(config_el);
        doc = doc.add(metadata_el);
    }

    for fill in paths {
        let d = build_path_data(&fill.subpaths);
        if d.is_empty() {
            continue;
        }

        let mut path = Path::new()
            .set("d", d)
            .set("fill", fill.color.hex())
            .set("fill-rule", fill.fill_rule.as_svg());
        if fill.needs_opacity() {
            path = path.set("fill-opacity", format_opacity(fill.opacity));
        }
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// Opacity with at most four decimals and no trailing zeros.
fn format_opacity(opacity: f64) -> String {
    format!("{opacity:.4}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}
