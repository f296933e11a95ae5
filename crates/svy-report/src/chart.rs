//! SVG bar charts.
//!
//! Charts are emitted as plain SVG text so they open in any browser and can
//! be diffed in review.

#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use crate::group::{CrossTab, Grouping};

const WIDTH: f64 = 760.0;
const MARGIN: f64 = 16.0;
const TITLE_LINE: f64 = 22.0;
const LABEL_LINE: f64 = 15.0;
const MIN_ROW: f64 = 26.0;
const LABEL_AREA: f64 = 280.0;
const VALUE_AREA: f64 = 90.0;

const BAR_COLOR: &str = "#4c72b0";
const PALETTE: [&str; 8] = [
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
];

/// Escape text for use in SVG element content and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let lines: Vec<String> = textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() { vec![String::new()] } else { lines }
}

fn text_block(svg: &mut String, x: f64, y: f64, anchor: &str, class: &str, lines: &[String]) {
    let _ = write!(svg, r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}" class="{class}">"#);
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { LABEL_LINE };
        let _ = write!(svg, r#"<tspan x="{x:.1}" dy="{dy:.1}">{}</tspan>"#, escape_xml(line));
    }
    svg.push_str("</text>\n");
}

fn open_svg(svg: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif">"#
    );
    svg.push_str(
        "<style>.title{font-size:16px;font-weight:bold}.label{font-size:12px}.value{font-size:11px;fill:#333}.axis{stroke:#999;stroke-width:1}</style>\n",
    );
    let _ = writeln!(svg, r#"<rect width="{width:.0}" height="{height:.0}" fill="white"/>"#);
}

/// Horizontal bar chart of one grouping, one bar per value in display order.
/// Long value labels wrap at `label_wrap` characters.
#[must_use]
pub fn bar_chart(grouping: &Grouping, title: &str, label_wrap: usize) -> String {
    let entries = grouping.entries();
    let title_lines = wrap_lines(title, 70);
    let labels: Vec<Vec<String>> = entries
        .iter()
        .map(|e| wrap_lines(&e.value, label_wrap))
        .collect();
    let row_heights: Vec<f64> = labels
        .iter()
        .map(|lines| (lines.len() as f64).mul_add(LABEL_LINE, 8.0).max(MIN_ROW))
        .collect();

    let top = (title_lines.len() as f64).mul_add(TITLE_LINE, MARGIN * 1.5);
    let height = top + row_heights.iter().sum::<f64>() + MARGIN;
    let bar_left = MARGIN + LABEL_AREA;
    let bar_span = WIDTH - bar_left - VALUE_AREA - MARGIN;
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0).max(1) as f64;

    let mut svg = String::new();
    open_svg(&mut svg, WIDTH, height);
    text_block(&mut svg, WIDTH / 2.0, MARGIN + TITLE_LINE * 0.75, "middle", "title", &title_lines);

    let mut y = top;
    for ((entry, lines), row) in entries.iter().zip(&labels).zip(&row_heights) {
        let bar_height = row - 8.0;
        let bar_width = entry.count as f64 / max * bar_span;
        let first_line = (lines.len() as f64 - 1.0).mul_add(-LABEL_LINE / 2.0, y + row / 2.0 + 4.0);
        text_block(&mut svg, bar_left - 8.0, first_line, "end", "label", lines);
        let _ = writeln!(
            svg,
            r#"<rect x="{bar_left:.1}" y="{:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{BAR_COLOR}"><title>{}: {}</title></rect>"#,
            y + 4.0,
            escape_xml(&entry.value),
            entry.count
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="value">{} ({:.1}%)</text>"#,
            bar_left + bar_width + 6.0,
            y + row / 2.0 + 4.0,
            entry.count,
            entry.percentage
        );
        y += row;
    }
    let _ = writeln!(
        svg,
        r#"<line x1="{bar_left:.1}" y1="{top:.1}" x2="{bar_left:.1}" y2="{y:.1}" class="axis"/>"#
    );
    svg.push_str("</svg>\n");
    svg
}

/// Grouped vertical bar chart: one group per row value of the cross tab, one
/// coloured bar per column value, with a legend.
#[must_use]
pub fn grouped_bar_chart(tab: &CrossTab, title: &str, label_wrap: usize) -> String {
    const PLOT_HEIGHT: f64 = 300.0;
    const LEGEND_WIDTH: f64 = 220.0;
    const SLOT: f64 = 18.0;

    let title_lines = wrap_lines(title, 70);
    let group_labels: Vec<Vec<String>> = tab
        .row_values
        .iter()
        .map(|v| wrap_lines(v, label_wrap.min(18)))
        .collect();
    let label_rows = group_labels.iter().map(Vec::len).max().unwrap_or(1) as f64;
    let legend_labels: Vec<Vec<String>> = tab
        .column_values
        .iter()
        .map(|v| wrap_lines(v, 26))
        .collect();
    let legend_height: f64 = legend_labels
        .iter()
        .map(|lines| (lines.len() as f64).mul_add(LABEL_LINE, 6.0))
        .sum::<f64>()
        + TITLE_LINE;

    let bars_per_group = tab.column_values.len().max(1) as f64;
    let group_width = bars_per_group.mul_add(SLOT, SLOT);
    let plot_left = MARGIN + 40.0;
    let plot_width = (tab.row_values.len().max(1) as f64 * group_width).max(320.0);
    let width = plot_left + plot_width + MARGIN + LEGEND_WIDTH;
    let top = (title_lines.len() as f64).mul_add(TITLE_LINE, MARGIN * 1.5);
    let baseline = top + PLOT_HEIGHT.max(legend_height);
    let height = label_rows.mul_add(LABEL_LINE, baseline + MARGIN * 2.0);
    let max = tab.max_count().max(1) as f64;
    let scale = (baseline - top) / max;

    let mut svg = String::new();
    open_svg(&mut svg, width, height);
    text_block(&mut svg, width / 2.0, MARGIN + TITLE_LINE * 0.75, "middle", "title", &title_lines);

    let ticks = tab.max_count().clamp(1, 5);
    for tick in 0..=ticks {
        let value = max * tick as f64 / ticks as f64;
        let y = value.mul_add(-scale, baseline);
        let _ = writeln!(
            svg,
            r##"<line x1="{plot_left:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e5e5e5"/>"##,
            plot_left + plot_width
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" class="value">{value:.0}</text>"#,
            plot_left - 6.0,
            y + 4.0
        );
    }

    let offset = (plot_width - tab.row_values.len() as f64 * group_width) / 2.0;
    for (r, (row_counts, lines)) in tab.counts.iter().zip(&group_labels).enumerate() {
        let group_left = (r as f64).mul_add(group_width, plot_left + offset + SLOT / 2.0);
        for (c, count) in row_counts.iter().enumerate() {
            let bar_height = *count as f64 * scale;
            let _ = writeln!(
                svg,
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{bar_height:.1}" fill="{}"><title>{} / {}: {count}</title></rect>"#,
                (c as f64).mul_add(SLOT, group_left),
                baseline - bar_height,
                SLOT - 2.0,
                PALETTE[c % PALETTE.len()],
                escape_xml(&tab.row_values[r]),
                escape_xml(&tab.column_values[c])
            );
        }
        let centre = (bars_per_group * SLOT).mul_add(0.5, group_left);
        text_block(&mut svg, centre, baseline + 18.0, "middle", "label", lines);
    }
    let _ = writeln!(
        svg,
        r#"<line x1="{plot_left:.1}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" class="axis"/>"#,
        plot_left + plot_width
    );

    let legend_left = plot_left + plot_width + MARGIN;
    let _ = writeln!(
        svg,
        r#"<text x="{legend_left:.1}" y="{:.1}" class="label" font-weight="bold">Response</text>"#,
        top + 12.0
    );
    let mut y = top + TITLE_LINE;
    for (c, lines) in legend_labels.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<rect x="{legend_left:.1}" y="{y:.1}" width="12" height="12" fill="{}"/>"#,
            PALETTE[c % PALETTE.len()]
        );
        text_block(&mut svg, legend_left + 18.0, y + 10.0, "start", "label", lines);
        y += (lines.len() as f64).mul_add(LABEL_LINE, 6.0);
    }
    svg.push_str("</svg>\n");
    svg
}
