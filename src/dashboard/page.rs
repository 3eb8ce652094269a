//! HTML page of the dashboard.

use crate::dashboard::Outcome;

/// Render the page: date picker, notices and the inline SVG chart, if any.
#[must_use]
pub fn render(zone_id: &str, outcome: &Outcome, chart: Option<&str>) -> String {
    let requested = outcome.requested();
    let mut body = String::new();

    if outcome.fell_back() {
        body.push_str(&format!(
            r#"<p class="warning">No data for {requested}, trying today instead.</p>"#
        ));
    }
    match (outcome, chart) {
        (Outcome::Report(report), Some(chart)) => {
            body.push_str(&format!(
                r#"<p>Showing <strong>{date}</strong>.</p><figure>{chart}</figure>"#,
                date = report.date,
            ));
        }
        _ => {
            body.push_str(r#"<p class="error">No data available.</p>"#);
        }
    }

    // language=html
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Energy price heatmap</title>
    <style>
        body {{ font-family: sans-serif; max-width: 1040px; margin: 2em auto; }}
        .warning {{ padding: 0.5em 1em; background: #fff3cd; }}
        .error {{ padding: 0.5em 1em; background: #f8d7da; }}
        figure {{ margin: 0; }}
    </style>
</head>
<body>
    <h1>Energy price heatmap (ENTSO-E)</h1>
    <p>Hourly day-ahead prices for <code>{zone_id}</code>.</p>
    <form method="get" action="/">
        <label>Date <input type="date" name="date" value="{requested}" onchange="this.form.submit()"></label>
        <button type="submit">Show</button>
    </form>
    {body}
</body>
</html>
"#,
        zone_id = escape(zone_id),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
