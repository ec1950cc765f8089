use crate::error::Error;
use crate::plot::{ScatterOptions, Surface};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A scatter chart backed by the plotters bitmap backend. Points are
/// buffered as they arrive; `present` draws the whole figure to a sibling
/// temporary file, renames it into place on success and removes it on
/// failure, so a failed render leaves no artifact behind.
pub struct Chart<'a> {
    path: &'a Path,
    x_range: Range<f64>,
    y_range: Range<f64>,
    options: &'a ScatterOptions,
    markers: Vec<(f64, f64)>,
    annotations: Vec<(String, f64, f64)>,
}

impl Surface for Chart<'_> {
    fn marker(&mut self, x: f64, y: f64) -> Result<(), Error> {
        self.markers.push((x, y));
        Ok(())
    }

    fn annotation(&mut self, text: &str, x: f64, y: f64) -> Result<(), Error> {
        self.annotations.push((text.to_string(), x, y));
        Ok(())
    }
}

impl<'a> Chart<'a> {
    pub fn new(
        path: &'a Path,
        x_range: Range<f64>,
        y_range: Range<f64>,
        options: &'a ScatterOptions,
    ) -> Self {
        Self {
            path,
            x_range,
            y_range,
            options,
            markers: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn present(self) -> Result<(), Error> {
        let tmp = tmp_path(self.path);
        match self.draw(&tmp) {
            Ok(()) => std::fs::rename(&tmp, self.path).map_err(|err| {
                Error::Render(format!("write {}: {}", self.path.display(), err))
            }),
            Err(err) => {
                // the backend may have flushed a partial file on drop
                let _ = std::fs::remove_file(&tmp);
                Err(err)
            }
        }
    }

    fn draw(&self, tmp: &Path) -> Result<(), Error> {
        let options = self.options;
        let root =
            BitMapBackend::new(tmp, options.pixel_size()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let label_font = options.to_px(options.font_size);
        let axis_font = options.to_px(options.font_size + 2.0);
        let title_font = options.to_px(options.font_size + 4.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", title_font))
            .margin(options.to_px(10.0) as i32)
            .set_label_area_size(
                LabelAreaPosition::Left,
                options.to_px(options.font_size * 3.5) as i32,
            )
            .set_label_area_size(
                LabelAreaPosition::Bottom,
                options.to_px(options.font_size * 2.5) as i32,
            )
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .light_line_style(BLACK.mix(0.08))
            .bold_line_style(BLACK.mix(0.2))
            .label_style(("sans-serif", label_font).into_font())
            .axis_desc_style(("sans-serif", axis_font).into_font())
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .draw()
            .map_err(render_err)?;

        let (r, g, b) = options.marker_color;
        let style = RGBColor(r, g, b).mix(options.marker_alpha).filled();
        chart
            .draw_series(self.markers.iter().map(|&(x, y)| {
                Circle::new((x, y), options.marker_size as i32, style)
            }))
            .map_err(render_err)?;

        // the offset is given with y pointing up; pixel y grows downward
        let (dx, dy) = options.label_offset;
        let annotation_style = ("sans-serif", label_font)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        chart
            .draw_series(self.annotations.iter().map(|(text, x, y)| {
                EmptyElement::at((*x, *y))
                    + Text::new(text.clone(), (dx, -dy), annotation_style.clone())
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

// the temporary file keeps the final extension so that the backend still
// recognizes the image format
fn tmp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}.tmp.{}", stem, ext.to_string_lossy()),
        None => format!("{}.tmp", stem),
    };
    path.with_file_name(name)
}

fn render_err(err: impl std::fmt::Display) -> Error {
    Error::Render(err.to_string())
}
