use crate::schema::PricePoint;
use chrono::DateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Outcome of drawing a price series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartView {
    /// The chart, one string per terminal row.
    Rendered(Vec<String>),
    /// There was nothing to draw.
    Unavailable,
}

/// Draw `points` as a line + marker chart into a `width` x `height` block of text.
///
/// Points are plotted by ascending timestamp regardless of input order. The
/// drawing grid is addressed with `u16` cell counts, so a block larger than
/// `u16::MAX` cells keeps its width and loses rows until it fits.
pub fn render_chart(points: &[PricePoint], title: &str, width: u16, height: u16) -> ChartView {
    if points.is_empty() || width == 0 || height == 0 {
        return ChartView::Unavailable;
    }

    let mut data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.timestamp as f64, p.price))
        .collect();
    data.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (x_min, x_max) = padded(
        data.first().map(|d| d.0).unwrap_or_default(),
        data.last().map(|d| d.0).unwrap_or_default(),
        0.0,
    );
    let (y_min, y_max) = padded(
        data.iter().map(|d| d.1).fold(f64::INFINITY, f64::min),
        data.iter().map(|d| d.1).fold(f64::NEG_INFINITY, f64::max),
        0.05,
    );

    let line = Dataset::default()
        .name("Price (USD)")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);
    let markers = Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let x_axis = Axis::default()
        .title("Date")
        .bounds([x_min, x_max])
        .labels(vec![
            date_label(x_min),
            date_label((x_min + x_max) / 2.0),
            date_label(x_max),
        ]);
    let y_axis = Axis::default()
        .title("Price (USD)")
        .bounds([y_min, y_max])
        .labels(vec![
            price_label(y_min),
            price_label((y_min + y_max) / 2.0),
            price_label(y_max),
        ]);

    let chart = Chart::new(vec![line, markers])
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    let area = Rect::new(0, 0, width, fit_height(width, height));
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    ChartView::Rendered(rows(&buf))
}

fn fit_height(width: u16, height: u16) -> u16 {
    let max_rows = u32::from(u16::MAX) / u32::from(width);
    height.min(max_rows as u16)
}

// widen a degenerate range so the axis bounds never coincide
fn padded(min: f64, max: f64, ratio: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        let pad = if min.abs() > f64::EPSILON { min.abs() * 0.05 } else { 1.0 };
        (min - pad, max + pad)
    } else {
        (min - span * ratio, max + span * ratio)
    }
}

fn date_label(millis: f64) -> String {
    DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn price_label(price: f64) -> String {
    let magnitude = price.abs();
    if magnitude >= 1.0 {
        format!("{price:.2}")
    } else if magnitude >= 0.0001 {
        format!("{price:.6}")
    } else {
        format!("{price:.3e}")
    }
}

fn rows(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
