/// Bias/tone scatter plot of the definitive sources.
///
/// Each source lands on a fixed base coordinate derived from its bias (x) and
/// tone (y). Repeated coordinates are spread around the base point so markers
/// stay distinguishable.
use std::collections::HashMap;
use std::f64::consts::PI;

use super::{escape, safe_href};
use crate::labels::{Bias, Tone};
use crate::models::DefinitiveSource;

pub const CHART_WIDTH: f64 = 500.0;
pub const CHART_HEIGHT: f64 = 250.0;
pub const PADDING: f64 = 40.0;
/// Ring spacing of the collision offset, equal to the marker radius.
pub const JITTER_RADIUS: f64 = 8.0;
/// Angular step between markers sharing a base coordinate (60°).
pub const JITTER_STEP: f64 = PI / 3.0;
const MARKERS_PER_RING: usize = 6;

/// One placed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint<'a> {
    /// 0-based position in the source list; the marker shows `index + 1`.
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub bias: Bias,
    pub tone: Tone,
    pub source: &'a DefinitiveSource,
}

/// Offset of the `occurrence`-th marker (0-based) at a shared coordinate.
///
/// The first marker sits on the base point. The next six circle it at 60°
/// steps; every further six form a wider ring so no two offsets coincide.
#[must_use]
pub fn jitter(occurrence: usize) -> (f64, f64) {
    if occurrence == 0 {
        return (0.0, 0.0);
    }
    let ring = (occurrence - 1) / MARKERS_PER_RING + 1;
    let radius = JITTER_RADIUS * ring as f64;
    let angle = occurrence as f64 * JITTER_STEP;
    (angle.cos() * radius, angle.sin() * radius)
}

/// Place every source on the chart, in input order.
#[must_use]
pub fn layout(sources: &[DefinitiveSource]) -> Vec<PlotPoint<'_>> {
    let mut seen: HashMap<(u64, u64), usize> = HashMap::new();

    sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let bias = Bias::classify(&source.analysis.bias);
            let tone = Tone::classify(&source.analysis.tone);
            let base_x = bias.axis_position();
            let base_y = tone.axis_position();

            let count = seen.entry((base_x.to_bits(), base_y.to_bits())).or_insert(0);
            let (jx, jy) = jitter(*count);
            *count += 1;

            let cx = base_x / 100.0 * (CHART_WIDTH - 2.0 * PADDING) + PADDING + jx;
            // SVG y grows downwards
            let cy = CHART_HEIGHT - (base_y / 100.0 * (CHART_HEIGHT - 2.0 * PADDING) + PADDING) - jy;

            PlotPoint {
                index,
                cx,
                cy,
                bias,
                tone,
                source,
            }
        })
        .collect()
}

/// SVG chart for the given sources.
#[must_use]
pub fn render_svg(sources: &[DefinitiveSource]) -> String {
    let w = CHART_WIDTH;
    let h = CHART_HEIGHT;
    let p = PADDING;
    let mut svg = format!(
        r##"<svg viewBox="0 0 {w} {h}" class="landscape-chart" role="img" aria-label="Source landscape">
<line x1="{p}" y1="{y_axis}" x2="{x_end}" y2="{y_axis}" stroke="#475569" stroke-width="1"/>
<line x1="{p}" y1="{p}" x2="{p}" y2="{y_axis}" stroke="#475569" stroke-width="1"/>
<text x="{mid_x}" y="{bias_y}" text-anchor="middle" class="axis-title">Bias</text>
<text x="{mid_x}" y="{bias_hint_y}" text-anchor="middle" class="axis-hint">(Left-Leaning → Right-Leaning)</text>
<text x="15" y="{mid_y}" text-anchor="middle" transform="rotate(-90 15,{mid_y})" class="axis-title">Tone</text>
<text x="28" y="{mid_y}" text-anchor="middle" transform="rotate(-90 28,{mid_y})" class="axis-hint">(Opinionated → Objective)</text>
"##,
        y_axis = h - p,
        x_end = w - p,
        mid_x = w / 2.0,
        mid_y = h / 2.0,
        bias_y = h - 5.0,
        bias_hint_y = h - 18.0,
    );

    for point in layout(sources) {
        let a = &point.source.analysis;
        svg.push_str(&format!(
            "<g class=\"point\"><circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"8\" class=\"{class}\"><title>{title}\nBias: {bias}\nTone: {tone}</title></circle><text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dy=\".3em\" class=\"point-label\">{n}</text></g>\n",
            cx = point.cx,
            cy = point.cy,
            class = point.bias.css_class(),
            title = escape(&point.source.title),
            bias = escape(&a.bias),
            tone = escape(&a.tone),
            n = point.index + 1,
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Numbered legend matching the chart markers.
#[must_use]
pub fn render_legend(sources: &[DefinitiveSource]) -> String {
    let mut html = String::from("<div class=\"legend\"><h4>Sources Legend:</h4><ol>");
    for (i, source) in sources.iter().enumerate() {
        html.push_str(&format!(
            "<li><span class=\"legend-num\">{n}.</span> <a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\" title=\"{uri}\">{title}</a></li>",
            n = i + 1,
            href = safe_href(&source.uri),
            uri = escape(&source.uri),
            title = escape(&source.title),
        ));
    }
    html.push_str("</ol></div>");
    html
}

/// Chart plus legend.
#[must_use]
pub fn render(sources: &[DefinitiveSource]) -> String {
    format!(
        "<div class=\"landscape\">{}{}</div>",
        render_svg(sources),
        render_legend(sources)
    )
}
