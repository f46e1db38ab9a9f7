use dioxus::prelude::*;

use crate::charts::{nice_ticks, CategorySeries, LinearScale};
use crate::utils::format::{format_millions, format_number, format_tonnes};

const WIDTH: f64 = 800.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 12.0;

/// Y axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AxisLabels {
    #[default]
    Plain,
    /// `0`, `0.5M`, `1M`...
    Millions,
}

/// What a column value is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ColumnValue {
    #[default]
    Jobs,
    /// Tonnes of CO2e; shown in kg below one tonne.
    Tonnes,
}

impl AxisLabels {
    fn format(self, v: f64) -> String {
        match self {
            AxisLabels::Plain => format_number(v),
            AxisLabels::Millions => format_millions(v),
        }
    }
}

impl ColumnValue {
    fn label(self, v: f64) -> String {
        match self {
            ColumnValue::Jobs => format!("{} jobs", format_number(v)),
            ColumnValue::Tonnes => format!("CO2e: {}", format_tonnes(v)),
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn ColumnChart(
    categories: Vec<String>,
    series: Vec<CategorySeries>,
    #[props(default)] stacked: bool,
    #[props(default = 300.0)] height: f64,
    #[props(default)] y_title: String,
    #[props(default)] x_title: String,
    // print every n-th category label
    #[props(default = 1)]
    label_step: usize,
    #[props(default)] labels: AxisLabels,
    #[props(default)] value: ColumnValue,
    // tooltip headline before the category, e.g. `Runtime: `
    #[props(default)]
    tooltip_prefix: String,
    // categories are percentage buckets: `12` reads `12-13%`
    #[props(default)]
    percent_buckets: bool,
    #[props(default)] legend: bool,
) -> Element {
    let mut hovered = use_signal(|| Option::<usize>::None);

    let n = categories.len().max(1);
    let margin_bottom = if x_title.is_empty() { 28.0 } else { 44.0 };
    let plot_bottom = height - margin_bottom;
    let slot = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / n as f64;
    let bar_w = (slot * 0.8).max(1.0);

    // Column totals decide the axis; stacked columns add up
    let totals: Vec<f64> = (0..categories.len())
        .map(|i| {
            let values = series.iter().map(|s| s.values.get(i).copied().unwrap_or(0.0));
            if stacked {
                values.sum()
            } else {
                values.fold(0.0, f64::max)
            }
        })
        .collect();
    let y_ticks = nice_ticks(totals.iter().copied().fold(0.0, f64::max), 4);
    let y_top = y_ticks.last().copied().unwrap_or(1.0);
    let y_scale = LinearScale::new((0.0, y_top), (plot_bottom, MARGIN_TOP));

    // (key, x, y, w, h, colour)
    let mut bars: Vec<(String, f64, f64, f64, f64, String)> = Vec::new();
    for i in 0..categories.len() {
        let x0 = MARGIN_LEFT + slot * i as f64;
        let mut base = 0.0;
        let group = series.len().max(1) as f64;
        for (k, s) in series.iter().enumerate() {
            let v = s.values.get(i).copied().unwrap_or(0.0);
            if v <= 0.0 {
                continue;
            }
            let (x, w, lo, hi) = if stacked {
                let lo = base;
                base += v;
                (x0 + (slot - bar_w) / 2.0, bar_w, lo, base)
            } else {
                let w = bar_w / group;
                (x0 + (slot - bar_w) / 2.0 + w * k as f64, w, 0.0, v)
            };
            let y = y_scale.map(hi);
            let h = (y_scale.map(lo) - y).max(0.0);
            bars.push((format!("{i}-{k}"), x, y, w, h, s.color_at(i).to_string()));
        }
    }

    let tick_labels: Vec<(f64, String)> = categories
        .iter()
        .enumerate()
        .filter(|(i, _)| i % label_step.max(1) == 0)
        .map(|(i, c)| (MARGIN_LEFT + slot * (i as f64 + 0.5), c.clone()))
        .collect();

    let tooltip = (*hovered.read()).and_then(|i| {
        let category = categories.get(i)?;
        let head = if percent_buckets {
            let lo: u32 = category.parse().unwrap_or(i as u32);
            format!("{tooltip_prefix}{}-{}%", lo, lo + 1)
        } else {
            format!("{tooltip_prefix}{category}")
        };
        let lines: Vec<(String, String)> = series
            .iter()
            .filter_map(|s| {
                let v = s.values.get(i).copied()?;
                if series.len() > 1 && v <= 0.0 {
                    return None;
                }
                let text = if series.len() > 1 {
                    format!("{}: {}", s.name, value.label(v))
                } else {
                    value.label(v)
                };
                Some((s.color_at(i).to_string(), text))
            })
            .collect();
        let left_pct = (MARGIN_LEFT + slot * (i as f64 + 0.5)) / WIDTH * 100.0;
        Some((left_pct, head, lines))
    });
    let hovered_idx = *hovered.read();
    let bands: Vec<(usize, &'static str)> = (0..categories.len())
        .map(|i| (i, if hovered_idx == Some(i) { "#64748b" } else { "transparent" }))
        .collect();

    let view_box = format!("0 0 {WIDTH} {height}");

    rsx! {
        div { class: "relative w-full",
            svg { class: "block w-full", view_box: "{view_box}", width: "100%",
                onmouseleave: move |_| hovered.set(None),
                for tick in y_ticks.iter().copied() {
                    g { key: "y{tick}",
                        line { x1: "{MARGIN_LEFT}", y1: "{y_scale.map(tick)}", x2: "{WIDTH - MARGIN_RIGHT}", y2: "{y_scale.map(tick)}", stroke: "#1f2937", stroke_width: "1" }
                        text { x: "{MARGIN_LEFT - 6.0}", y: "{y_scale.map(tick) + 4.0}", text_anchor: "end", class: "fill-current text-slate-400 text-[11px]",
                            "{labels.format(tick)}"
                        }
                    }
                }
                if !y_title.is_empty() {
                    text {
                        transform: "translate(14 {(MARGIN_TOP + plot_bottom) / 2.0}) rotate(-90)",
                        text_anchor: "middle",
                        class: "fill-current text-slate-400 text-[11px]",
                        "{y_title}"
                    }
                }
                for (x, label) in tick_labels.iter() {
                    text { key: "c{x}", x: "{x}", y: "{plot_bottom + 16.0}", text_anchor: "middle", class: "fill-current text-slate-400 text-[11px]", "{label}" }
                }
                if !x_title.is_empty() {
                    text { x: "{(MARGIN_LEFT + WIDTH - MARGIN_RIGHT) / 2.0}", y: "{height - 6.0}", text_anchor: "middle", class: "fill-current text-slate-400 text-[11px]", "{x_title}" }
                }
                for (key, x, y, w, h, color) in bars.iter() {
                    rect { key: "{key}", x: "{x}", y: "{y}", width: "{w}", height: "{h}", fill: "{color}" }
                }
                for (i, band_fill) in bands.iter().copied() {
                    rect {
                        key: "hb{i}",
                        x: "{MARGIN_LEFT + slot * i as f64}",
                        y: "{MARGIN_TOP}",
                        width: "{slot}",
                        height: "{plot_bottom - MARGIN_TOP}",
                        fill: "{band_fill}",
                        fill_opacity: "0.15",
                        onmouseenter: move |_| hovered.set(Some(i)),
                        ontouchstart: move |_| hovered.set(Some(i)),
                    }
                }
            }
            if let Some((left_pct, head, lines)) = tooltip {
                div {
                    class: "pointer-events-none absolute top-0 rounded-md border border-slate-700 bg-slate-900/95 px-2 py-1 text-xs text-slate-200 shadow",
                    style: "left: clamp(0px, calc({left_pct:.1}% - 60px), calc(100% - 160px));",
                    div { class: "text-[11px] text-slate-400", "{head}" }
                    for (i, (color, text)) in lines.iter().enumerate() {
                        div { key: "{i}", class: "flex items-center gap-1",
                            span { class: "inline-block h-2 w-2 rounded-full", style: "background:{color}" }
                            "{text}"
                        }
                    }
                }
            }
            if legend && series.len() > 1 {
                div { class: "mt-1 flex flex-wrap gap-x-4 gap-y-1 text-xs text-slate-400",
                    for (i, s) in series.iter().enumerate() {
                        span { key: "{i}", class: "inline-flex items-center gap-1",
                            span { class: "inline-block h-2 w-2 rounded-full", style: "background:{s.color}" }
                            "{s.name}"
                        }
                    }
                }
            }
        }
    }
}
