use chrono::NaiveDate;
use gloo_utils::window;
use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::{AreaSeries, LineSeries},
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};
use wasm_bindgen::JsValue;

use vigor_domain as domain;

use crate::settings::Theme;

pub const COLOR_WEIGHT: usize = 1;
pub const COLOR_AVG_WEIGHT: usize = 4;

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_AREA: f64 = 0.3;

const WIDTH_LINE: u32 = 2;
const SIZE_POINT: u32 = 2;

const FONT: (&str, u32) = ("Roboto", 11);

/// Render the weight history as an SVG chart: logged values as dots and a
/// line with a filled area below, the centered moving average as trend line.
/// Returns `None` if no value falls within the interval.
#[allow(clippy::missing_errors_doc)]
pub fn plot_weight(
    weight: &[(NaiveDate, f32)],
    avg_weight: &[(NaiveDate, f32)],
    interval: domain::Interval,
    theme: Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let weight = within(weight, interval);
    let avg_weight = within(avg_weight, interval);

    if weight.is_empty() {
        return Ok(None);
    }

    let Some(bounds) = Bounds::of(weight.iter().chain(avg_weight.iter()).map(|(_, v)| *v)) else {
        return Ok(None);
    };

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (chart_width(), 200)).into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(
                interval.first..interval.last,
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(2)
            .y_labels(6)
            .draw()?;

        chart.draw_series(AreaSeries::new(
            weight.iter().copied(),
            0.0,
            Palette99::pick(COLOR_WEIGHT).mix(OPACITY_AREA),
        ))?;
        chart.draw_series(LineSeries::new(
            weight.iter().copied(),
            Palette99::pick(COLOR_WEIGHT)
                .mix(OPACITY_LINE)
                .stroke_width(WIDTH_LINE),
        ))?;
        chart.draw_series(weight.iter().map(|(x, y)| {
            Circle::new(
                (*x, *y),
                SIZE_POINT,
                Palette99::pick(COLOR_WEIGHT).mix(OPACITY_LINE).filled(),
            )
        }))?;
        if avg_weight.len() > 1 {
            chart.draw_series(LineSeries::new(
                avg_weight.iter().copied(),
                Palette99::pick(COLOR_AVG_WEIGHT)
                    .mix(OPACITY_LINE)
                    .stroke_width(WIDTH_LINE),
            ))?;
        }

        root.present()?;
    }

    Ok(Some(result))
}

/// CSS color of a chart legend swatch.
#[must_use]
pub fn label_color(color: usize, opacity: f64) -> String {
    let plotters::style::RGBAColor(r, g, b, a) = Palette99::pick(color).mix(opacity);
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let a = (a * 255.0) as u8;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

fn within(values: &[(NaiveDate, f32)], interval: domain::Interval) -> Vec<(NaiveDate, f32)> {
    let mut values = values
        .iter()
        .filter(|(date, _)| *date >= interval.first && *date <= interval.last)
        .copied()
        .collect::<Vec<_>>();
    values.sort_by_key(|(date, _)| *date);
    values
}

#[derive(Clone, Copy)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn of(values: impl Iterator<Item = f32>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for value in values {
            let b = bounds.get_or_insert(Bounds {
                min: value,
                max: value,
            });
            b.min = f32::min(b.min, value);
            b.max = f32::max(b.max, value);
        }
        bounds
    }

    fn min_with_margin(self) -> f32 {
        if self.min <= f32::EPSILON {
            return self.min;
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn chart_width() -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    u32::min(
        u32::max(
            window()
                .inner_width()
                .unwrap_or(JsValue::UNDEFINED)
                .as_f64()
                .unwrap_or(420.) as u32
                - 20,
            300,
        ),
        960,
    )
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Bounds::of([].into_iter()).is_none());

        let bounds = Bounds::of([80.0, 70.0, 75.0].into_iter()).unwrap();
        assert_approx_eq!(bounds.min_with_margin(), 69.0, 0.001);
        assert_approx_eq!(bounds.max_with_margin(), 81.0, 0.001);
    }

    #[test]
    fn test_bounds_of_constant_values() {
        let bounds = Bounds::of([70.0, 70.0].into_iter()).unwrap();
        assert_approx_eq!(bounds.min_with_margin(), 69.9, 0.001);
        assert_approx_eq!(bounds.max_with_margin(), 70.1, 0.001);
    }

    #[test]
    fn test_within_sorts_and_filters() {
        let interval = domain::Interval {
            first: date(2024, 5, 1),
            last: date(2024, 5, 31),
        };
        assert_eq!(
            within(
                &[
                    (date(2024, 5, 20), 71.0),
                    (date(2024, 4, 30), 70.0),
                    (date(2024, 5, 10), 72.0),
                ],
                interval
            ),
            vec![(date(2024, 5, 10), 72.0), (date(2024, 5, 20), 71.0)]
        );
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}
