use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};

use crate::render::Bar;

const MAX_BAR_WIDTH: f64 = 40.0;

/// Terminal counterpart of the SVG chart.
#[must_use]
pub fn build_heatmap_table(bars: &[Bar]) -> Table {
    let max_length = bars.iter().map(|bar| bar.length).fold(0.0, f64::max);

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Hour", "Price", "Savings potential"]);
    for bar in bars {
        table.add_row(vec![
            Cell::new(format!("{:02}:00", bar.hour)),
            Cell::new(bar.price).set_alignment(CellAlignment::Right).fg(bar.color.into()),
            Cell::new("█".repeat(bar_width(bar.length, max_length))).fg(bar.color.into()),
        ]);
    }
    table
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_width(length: f64, max_length: f64) -> usize {
    if max_length > 0.0 {
        (length.max(0.0) / max_length * MAX_BAR_WIDTH).round() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::aggregate::HourlyAverage, quantity::rate::KilowattHourRate, render::layout};

    #[test]
    fn test_build_heatmap_table() {
        let hourly = [
            HourlyAverage { hour: 7, price: KilowattHourRate(0.25) },
            HourlyAverage { hour: 13, price: KilowattHourRate(0.05) },
        ];
        let table = build_heatmap_table(&layout(&hourly));
        assert_eq!(table.row_count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("07:00"));
        assert!(rendered.contains("0.0500 €/kWh"));
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(1.0, 1.0), 40);
        assert_eq!(bar_width(0.5, 1.0), 20);
        assert_eq!(bar_width(-0.5, 1.0), 0);
        assert_eq!(bar_width(0.5, 0.0), 0);
    }
}
