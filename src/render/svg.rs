use chrono::NaiveDate;
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::{prelude::*, render::Bar};

const SIZE: (u32, u32) = (1000, 800);

/// Half of the bar thickness, in hours.
const HALF_THICKNESS: f64 = 0.4;

/// Render the horizontal bar chart as an SVG document, hour 0 at the top.
#[instrument(skip_all, fields(date = %date, n_bars = bars.len()))]
pub fn render(bars: &[Bar], date: NaiveDate) -> Result<String> {
    let x_min = bars.iter().map(|bar| bar.length).fold(0.0, f64::min);
    let x_max = bars.iter().map(|bar| bar.length).fold(f64::EPSILON, f64::max) * 1.05;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Energy heatmap: {date}"), ("sans-serif", 28.0).into_font())
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, -0.5..23.5)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(24)
            .y_label_formatter(&hour_label)
            .x_label_formatter(&|x: &f64| format!("{x:.3}"))
            .x_desc("Savings potential (longer is better)")
            .y_desc("Hour of day")
            .draw()?;

        chart.draw_series(bars.iter().map(|bar| {
            Rectangle::new(bar_corners(bar), RGBColor::from(bar.color).filled())
        }))?;
        chart.draw_series(
            bars.iter().map(|bar| Rectangle::new(bar_corners(bar), BLACK.stroke_width(1))),
        )?;

        let label_style = ("sans-serif", 14.0)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(bars.iter().map(|bar| {
            Text::new(
                format!("{:.4} €", bar.price.0),
                (bar.length / 2.0, row(bar.hour)),
                label_style.clone(),
            )
        }))?;

        root.present()?;
    }
    Ok(svg)
}

/// Rows are counted from the bottom, so hour 0 lands on the top row.
fn row(hour: u32) -> f64 {
    23.0 - f64::from(hour)
}

/// Axis label of the row.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn hour_label(y: &f64) -> String {
    format!("{:.0}", 23.0 - y.round())
}

fn bar_corners(bar: &Bar) -> [(f64, f64); 2] {
    let y = row(bar.hour);
    [(0.0, y - HALF_THICKNESS), (bar.length, y + HALF_THICKNESS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::aggregate::HourlyAverage, quantity::rate::KilowattHourRate, render::layout};

    #[test]
    fn test_render_ok() -> Result {
        let hourly = [
            HourlyAverage { hour: 1, price: KilowattHourRate(0.05) },
            HourlyAverage { hour: 2, price: KilowattHourRate(0.1) },
        ];
        let svg = render(&layout(&hourly), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Energy heatmap: 2024-01-01"));
        assert!(svg.contains("0.0500 €"));
        assert!(svg.contains("0.1000 €"));
        Ok(())
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(&23.0), "0");
        assert_eq!(hour_label(&0.0), "23");
        assert_eq!(hour_label(&row(7)), "7");
    }

    #[test]
    fn test_row() {
        assert!((row(0) - 23.0).abs() < f64::EPSILON);
        assert!(row(23).abs() < f64::EPSILON);
    }
}
