mod chart;

pub use chart::Chart;

use crate::error::Error;
use crate::results::Point;
use std::ops::Range;
use std::path::Path;
use tracing::info;

/// Rendering knobs. Font sizes are in typographic points and scale with the
/// configured dpi, like the rest of the figure.
#[derive(Debug, Clone)]
pub struct ScatterOptions {
    /// figure size in inches; pixel dimensions are size times dpi
    pub fig_size: (f64, f64),
    /// output resolution
    pub dpi: u32,
    /// marker radius in pixels
    pub marker_size: u32,
    /// marker fill color
    pub marker_color: (u8, u8, u8),
    /// marker opacity
    pub marker_alpha: f64,
    /// annotation offset from the marker in pixels, x to the right, y up
    pub label_offset: (i32, i32),
    /// base font size in points; axis titles and the chart title are
    /// slightly larger
    pub font_size: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// fraction of the data span added on each side of both axes
    pub margin: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            fig_size: (8.0, 6.0),
            dpi: 200,
            marker_size: 5,
            // tab:blue
            marker_color: (31, 119, 180),
            marker_alpha: 0.6,
            label_offset: (5, 5),
            font_size: 10.0,
            title: String::from("throughput vs latency"),
            x_label: String::from("throughput (ops/s)"),
            y_label: String::from("average latency (ms)"),
            margin: 0.15,
        }
    }
}

impl ScatterOptions {
    pub(crate) fn pixel_size(&self) -> (u32, u32) {
        let (width, height) = self.fig_size;
        (
            (width * self.dpi as f64).round() as u32,
            (height * self.dpi as f64).round() as u32,
        )
    }

    /// Converts a size in points to pixels at the configured dpi.
    pub(crate) fn to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}

/// Where scatter points land: one marker and one annotation per point.
/// Implemented by the plotters-backed `Chart` and by a recorder in tests.
pub trait Surface {
    fn marker(&mut self, x: f64, y: f64) -> Result<(), Error>;
    fn annotation(&mut self, text: &str, x: f64, y: f64) -> Result<(), Error>;
}

/// Draws every point on `surface`: one marker and one annotation per point.
pub fn draw_points<S>(surface: &mut S, points: &[Point]) -> Result<(), Error>
where
    S: Surface,
{
    for point in points {
        surface.marker(point.x(), point.y())?;
        surface.annotation(&point.label, point.x(), point.y())?;
    }
    Ok(())
}

/// Renders `points` as an annotated scatter plot and rasterizes it to `path`
/// as png. Either the whole image is written or none of it: drawing happens
/// in memory and the file only appears once everything has succeeded.
pub fn render(
    points: &[Point],
    path: impl AsRef<Path>,
    options: &ScatterOptions,
) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| {
                Error::Render(format!(
                    "create output directory {}: {}",
                    parent.display(),
                    err
                ))
            })?;
        }
    }

    let (x_range, y_range) = axis_ranges(points, options.margin);
    let mut chart = Chart::new(path, x_range, y_range, options);
    draw_points(&mut chart, points)?;
    chart.present()?;

    info!("rendered {} points to {}", points.len(), path.display());
    Ok(())
}

/// Data bounds padded by `margin` on each side. A degenerate span (single
/// point or identical values) is widened to a unit span so the axes still
/// have room to draw.
fn axis_ranges(points: &[Point], margin: f64) -> (Range<f64>, Range<f64>) {
    let xs = bounds(points.iter().map(|point| point.x()));
    let ys = bounds(points.iter().map(|point| point.y()));
    (pad(xs, margin), pad(ys, margin))
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    })
}

fn pad((min, max): (f64, f64), margin: f64) -> Range<f64> {
    // an empty sequence leaves the fold untouched
    let (min, max) = if min > max { (0.0, 1.0) } else { (min, max) };
    let span = if max - min == 0.0 { 1.0 } else { max - min };
    (min - span * margin)..(max + span * margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::LabelMode;
    use crate::results::ResultRecord;

    #[derive(Default)]
    struct RecordingSurface {
        markers: Vec<(f64, f64)>,
        annotations: Vec<(String, f64, f64)>,
    }

    impl Surface for RecordingSurface {
        fn marker(&mut self, x: f64, y: f64) -> Result<(), Error> {
            self.markers.push((x, y));
            Ok(())
        }

        fn annotation(
            &mut self,
            text: &str,
            x: f64,
            y: f64,
        ) -> Result<(), Error> {
            self.annotations.push((text.to_string(), x, y));
            Ok(())
        }
    }

    fn point(source_name: &str, x: f64, y: f64) -> Point {
        let record = ResultRecord {
            source_name: source_name.to_string(),
            client_count: 1,
            throughput_ops: x,
            avg_latency_ms: y,
        };
        Point::new(record, LabelMode::ClientCount)
    }

    #[test]
    fn one_marker_and_one_annotation_per_point() {
        let points = vec![
            point("a.json", 100.0, 5.0),
            point("b.json", 200.0, 3.0),
            point("c.json", 300.0, 8.0),
        ];

        let mut surface = RecordingSurface::default();
        draw_points(&mut surface, &points).unwrap();

        assert_eq!(surface.markers.len(), points.len());
        assert_eq!(surface.annotations.len(), points.len());
        assert_eq!(surface.markers[0], (100.0, 5.0));
        assert_eq!(surface.annotations[1].0, "1 clients");
        assert_eq!(surface.annotations[2].1, 300.0);
        assert_eq!(surface.annotations[2].2, 8.0);
    }

    #[test]
    fn no_points_draws_nothing() {
        let mut surface = RecordingSurface::default();
        draw_points(&mut surface, &[]).unwrap();
        assert!(surface.markers.is_empty());
        assert!(surface.annotations.is_empty());
    }

    #[test]
    fn axis_ranges_pad_the_data_span() {
        let points =
            vec![point("a.json", 100.0, 5.0), point("b.json", 200.0, 3.0)];
        let (x_range, y_range) = axis_ranges(&points, 0.15);
        assert_eq!(x_range, 85.0..215.0);
        assert_eq!(y_range, 2.7..5.3);
    }

    #[test]
    fn axis_ranges_widen_a_degenerate_span() {
        let points = vec![point("a.json", 100.0, 5.0)];
        let (x_range, y_range) = axis_ranges(&points, 0.15);
        assert_eq!(x_range, 99.85..100.15);
        assert_eq!(y_range, 4.85..5.15);
    }

    #[test]
    fn axis_ranges_for_an_empty_sequence() {
        let (x_range, y_range) = axis_ranges(&[], 0.15);
        assert_eq!(x_range, -0.15..1.15);
        assert_eq!(y_range, -0.15..1.15);
    }
}
