use std::rc::Rc;

use dioxus::prelude::*;

use crate::charts::series::stacked_tops;
use crate::charts::{
    nearest_index, nice_ticks, time_ticks, AxisRange, LinearScale, Series, ZoomSync, ZoomTarget,
};
use crate::utils::format::{format_day, format_local, format_memory, format_number, round};

const WIDTH: f64 = 800.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 26.0;

/// How hovered values are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ValueFormat {
    #[default]
    Integer,
    /// Floored to `precision` decimals, then `suffix`.
    Decimals(i32, &'static str),
    /// Memory already scaled to the given unit.
    Memory(&'static str),
}

impl ValueFormat {
    pub fn apply(self, v: f64) -> String {
        match self {
            ValueFormat::Integer => format_number(v.round()),
            ValueFormat::Decimals(precision, suffix) => {
                format!("{}{}", format_number(round(v, precision)), suffix)
            }
            ValueFormat::Memory(unit) => format_memory(v, unit),
        }
    }
}

/// Zoom state of one chart, reachable by the other charts of its group.
#[derive(Clone, Copy, PartialEq)]
pub struct ChartHandle {
    extremes: Signal<Option<AxisRange>>,
    reset_shown: Signal<bool>,
}

impl ChartHandle {
    fn new() -> Self {
        Self {
            extremes: Signal::new(None),
            reset_shown: Signal::new(false),
        }
    }
}

impl ZoomTarget for ChartHandle {
    fn set_extremes(&self, range: Option<AxisRange>) {
        let mut extremes = self.extremes;
        extremes.set(range);
    }

    fn reset_zoom_shown(&self) -> bool {
        *self.reset_shown.peek()
    }

    fn show_reset_zoom(&self) {
        let mut shown = self.reset_shown;
        shown.set(true);
    }

    fn hide_reset_zoom(&self) {
        let mut shown = self.reset_shown;
        shown.set(false);
    }
}

/// Charts that zoom and hover together.
#[derive(Clone)]
pub struct SyncGroup {
    zoom: Rc<ZoomSync>,
    charts: Rc<[ChartHandle]>,
    hover: Signal<Option<f64>>,
}

impl PartialEq for SyncGroup {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.zoom, &other.zoom)
    }
}

pub fn use_sync_group(size: usize) -> SyncGroup {
    use_hook(|| SyncGroup {
        zoom: Rc::new(ZoomSync::new()),
        charts: (0..size).map(|_| ChartHandle::new()).collect(),
        hover: Signal::new(None),
    })
}

fn area_path(xs: &[f64], tops: &[f64], bottoms: &[f64]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in xs.iter().zip(tops).enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd} {x:.1} {y:.1} "));
    }
    for (x, y) in xs.iter().zip(bottoms).rev() {
        d.push_str(&format!("L {x:.1} {y:.1} "));
    }
    d.push('Z');
    d
}

fn line_path(xs: &[f64], ys: &[f64]) -> String {
    xs.iter()
        .zip(ys)
        .enumerate()
        .map(|(i, (x, y))| format!("{} {x:.1} {y:.1}", if i == 0 { 'M' } else { 'L' }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[allow(non_snake_case)]
#[component]
pub fn TimeSeriesChart(
    series: Vec<Series>,
    #[props(default)] title: String,
    #[props(default)] y_title: String,
    #[props(default = 225.0)] height: f64,
    #[props(default)] stacked: bool,
    #[props(default)] markers: Vec<(f64, f64, String)>,
    #[props(default)] format: ValueFormat,
    sync: Option<SyncGroup>,
    #[props(default)] index: usize,
) -> Element {
    let local = use_hook(ChartHandle::new);
    let local_hover = use_signal(|| Option::<f64>::None);
    let mut drag_from = use_signal(|| Option::<f64>::None);

    let handle = match &sync {
        Some(group) => group.charts.get(index).copied().unwrap_or(local),
        None => local,
    };
    let mut hover = match &sync {
        Some(group) => group.hover,
        None => local_hover,
    };

    let extremes = *handle.extremes.read();
    let reset_shown = *handle.reset_shown.read();

    // Clip every series to the visible window
    let visible: Vec<Series> = series
        .iter()
        .map(|s| Series {
            points: s
                .points
                .iter()
                .copied()
                .filter(|(x, _)| extremes.map_or(true, |r| r.contains(*x)))
                .collect(),
            ..s.clone()
        })
        .collect();
    let tops: Vec<Vec<f64>> = if stacked {
        stacked_tops(&visible)
    } else {
        visible
            .iter()
            .map(|s| s.points.iter().map(|p| p.1).collect())
            .collect()
    };

    let xs_all: Vec<f64> = visible
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .collect();
    let (x_min, x_max) = match extremes {
        Some(r) => (r.min, r.max),
        None => (
            xs_all.iter().copied().fold(f64::INFINITY, f64::min),
            xs_all.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        ),
    };
    let y_max = tops
        .iter()
        .flat_map(|t| t.iter().copied())
        .fold(0.0, f64::max);
    let y_ticks = nice_ticks(y_max, 4);
    let y_top = y_ticks.last().copied().unwrap_or(1.0);

    let plot_bottom = height - MARGIN_BOTTOM;
    let x_scale = LinearScale::new((x_min, x_max), (MARGIN_LEFT, WIDTH - MARGIN_RIGHT));
    let y_scale = LinearScale::new((0.0, y_top), (plot_bottom, MARGIN_TOP));
    let view_box = format!("0 0 {WIDTH} {height}");

    // One path per series; stacked areas sit on the series below them
    let mut shapes = Vec::new();
    for (i, s) in visible.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let xs: Vec<f64> = s.points.iter().map(|p| x_scale.map(p.0)).collect();
        let ys: Vec<f64> = tops[i].iter().map(|v| y_scale.map(*v)).collect();
        let bottoms: Vec<f64> = if stacked && i > 0 {
            tops[i - 1].iter().map(|v| y_scale.map(*v)).collect()
        } else {
            vec![plot_bottom; xs.len()]
        };
        shapes.push((
            s.color.clone(),
            area_path(&xs, &ys, &bottoms),
            line_path(&xs, &ys),
        ));
    }

    // Hover bands follow the first series' sampling
    let anchor: Vec<(f64, f64)> = visible.first().map(|s| s.points.clone()).unwrap_or_default();
    let bands: Vec<(f64, f64, f64)> = anchor
        .iter()
        .enumerate()
        .map(|(i, (ts, _))| {
            let x = x_scale.map(*ts);
            let left = if i == 0 {
                MARGIN_LEFT
            } else {
                (x + x_scale.map(anchor[i - 1].0)) / 2.0
            };
            let right = match anchor.get(i + 1) {
                Some(next) => (x + x_scale.map(next.0)) / 2.0,
                None => WIDTH - MARGIN_RIGHT,
            };
            (*ts, left, (right - left).max(0.5))
        })
        .collect();

    // Crosshair: each series finds its own nearest point
    let hovered_ts = (*hover.read()).filter(|ts| extremes.map_or(true, |r| r.contains(*ts)));
    let crosshair = hovered_ts.and_then(|ts| {
        let i = nearest_index(&anchor, ts)?;
        Some(anchor[i].0)
    });
    // (name, colour, value, stacked top)
    let hovered_values: Vec<(String, String, f64, f64)> = match hovered_ts {
        Some(ts) => visible
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let j = nearest_index(&s.points, ts)?;
                Some((s.name.clone(), s.color.clone(), s.points[j].1, tops[i][j]))
            })
            .collect(),
        None => Vec::new(),
    };
    let total: f64 = hovered_values.iter().map(|v| v.2).sum();
    let headline = match hovered_values.as_slice() {
        [(_, _, value, _)] => Some(format.apply(*value)),
        [_, _, ..] if stacked => Some(format.apply(total)),
        _ => None,
    };
    let hovered_labels: Vec<(String, String, String)> = hovered_values
        .iter()
        .map(|(name, color, value, _)| {
            let share = if stacked && total > 0.0 {
                format!(" ({:.1}%)", value * 100.0 / total)
            } else {
                String::new()
            };
            (
                format!("{name}: "),
                color.clone(),
                format!("{}{}", format.apply(*value), share),
            )
        })
        .collect();

    let x_ticks = time_ticks(x_min, x_max, 6);
    let sync_for_zoom = sync.clone();
    let sync_for_reset = sync.clone();

    rsx! {
        div { class: "relative w-full",
            div { class: "flex items-baseline justify-between gap-4 text-sm min-h-6",
                span { class: "font-medium text-slate-300", "{title}" }
                if let Some(ts) = crosshair {
                    span { class: "text-slate-400 tabular-nums",
                        span { class: "text-[11px] mr-2", "{format_local(ts as i64)}" }
                        if let Some(value) = &headline {
                            span { class: "text-slate-100 font-semibold", "{value}" }
                        }
                    }
                }
            }
            if reset_shown {
                button {
                    class: "absolute right-2 top-8 z-10 rounded border border-slate-700 bg-slate-900 px-2 py-0.5 text-xs text-slate-300 hover:bg-slate-800",
                    onclick: move |_| {
                        handle.set_extremes(None);
                        handle.hide_reset_zoom();
                        if let Some(group) = &sync_for_reset {
                            group.zoom.propagate(index, None, &group.charts[..]);
                        }
                    },
                    "Reset zoom"
                }
            }
            svg {
                class: "block w-full select-none",
                view_box: "{view_box}",
                width: "100%",
                onmouseleave: move |_| {
                    hover.set(None);
                    drag_from.set(None);
                },
                // grid and y labels
                for tick in y_ticks.iter().copied() {
                    g { key: "y{tick}",
                        line { x1: "{MARGIN_LEFT}", y1: "{y_scale.map(tick)}", x2: "{WIDTH - MARGIN_RIGHT}", y2: "{y_scale.map(tick)}", stroke: "#1f2937", stroke_width: "1" }
                        text { x: "{MARGIN_LEFT - 6.0}", y: "{y_scale.map(tick) + 4.0}", text_anchor: "end", class: "fill-current text-slate-400 text-[11px]", "{format_number(tick)}" }
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
                for tick in x_ticks.iter().copied() {
                    text { key: "x{tick}", x: "{x_scale.map(tick)}", y: "{height - 8.0}", text_anchor: "middle", class: "fill-current text-slate-400 text-[11px]", "{format_day(tick as i64)}" }
                }
                for (i, (color, area, line)) in shapes.iter().enumerate() {
                    g { key: "s{i}",
                        path { d: "{area}", fill: "{color}", fill_opacity: "0.25", stroke: "none" }
                        path { d: "{line}", fill: "none", stroke: "{color}", stroke_width: "1.5" }
                    }
                }
                for (i, (mx, my, label)) in markers.iter().enumerate() {
                    if extremes.map_or(true, |r| r.contains(*mx)) {
                        g { key: "m{i}",
                            circle { cx: "{x_scale.map(*mx)}", cy: "{y_scale.map(*my)}", r: "3", fill: "#334155" }
                            text { x: "{x_scale.map(*mx) - 6.0}", y: "{y_scale.map(*my) - 8.0}", text_anchor: "end", class: "fill-current text-slate-300 text-[10px]", "{label}" }
                        }
                    }
                }
                if let Some(cx) = crosshair {
                    line { x1: "{x_scale.map(cx)}", y1: "{MARGIN_TOP}", x2: "{x_scale.map(cx)}", y2: "{plot_bottom}", stroke: "#64748b", stroke_width: "1" }
                    for (i, (_, color, _, top)) in hovered_values.iter().enumerate() {
                        circle { key: "h{i}", cx: "{x_scale.map(cx)}", cy: "{y_scale.map(*top)}", r: "3.5", fill: "{color}", stroke: "#0f172a", stroke_width: "1" }
                    }
                }
                if let Some(from) = *drag_from.read() {
                    if let Some(to) = crosshair {
                        rect {
                            x: "{x_scale.map(from.min(to))}",
                            y: "{MARGIN_TOP}",
                            width: "{(x_scale.map(from.max(to)) - x_scale.map(from.min(to))).max(1.0)}",
                            height: "{plot_bottom - MARGIN_TOP}",
                            fill: "#64748b",
                            fill_opacity: "0.2",
                        }
                    }
                }
                for (ts, left, w) in bands.iter().copied() {
                    rect {
                        key: "b{ts}",
                        x: "{left}",
                        y: "{MARGIN_TOP}",
                        width: "{w}",
                        height: "{plot_bottom - MARGIN_TOP}",
                        fill: "transparent",
                        onmouseenter: move |_| hover.set(Some(ts)),
                        ontouchstart: move |_| hover.set(Some(ts)),
                        onmousedown: move |_| drag_from.set(Some(ts)),
                        onmouseup: {
                            let sync = sync_for_zoom.clone();
                            move |_| {
                                let from = drag_from.take();
                                let Some(range) = from.and_then(|f| AxisRange::new(f, ts)) else {
                                    return;
                                };
                                handle.set_extremes(Some(range));
                                handle.show_reset_zoom();
                                if let Some(group) = &sync {
                                    group.zoom.propagate(index, Some(range), &group.charts[..]);
                                }
                            }
                        },
                    }
                }
            }
            if visible.len() > 1 {
                div { class: "mt-1 flex flex-wrap gap-x-4 gap-y-1 text-xs text-slate-400",
                    if hovered_values.is_empty() {
                        for (i, s) in visible.iter().enumerate() {
                            span { key: "l{i}", class: "inline-flex items-center gap-1",
                                span { class: "inline-block h-2 w-2 rounded-full", style: "background:{s.color}" }
                                "{s.name}"
                            }
                        }
                    } else {
                        for (i, (name, color, value)) in hovered_labels.iter().enumerate() {
                            span { key: "v{i}", class: "inline-flex items-center gap-1",
                                span { class: "inline-block h-2 w-2 rounded-full", style: "background:{color}" }
                                "{name}"
                                b { class: "text-slate-200", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
