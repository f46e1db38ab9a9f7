use dioxus::prelude::*;

use crate::charts::Segment;
use crate::utils::format::format_number;

#[allow(non_snake_case)]
#[component]
pub fn HalfDonut(segments: Vec<Segment>, #[props(default = 260)] size: i32, #[props(default = 48)] stroke: i32) -> Element {
    let mut hovered = use_signal(|| Option::<usize>::None);

    let total: f64 = segments.iter().map(|s| s.value.max(0.0)).sum();
    let c = (size as f32) / 2.0;
    let r = c - (stroke as f32) / 2.0 - 1.0;

    fn polar(cx: f32, cy: f32, r: f32, ang: f32) -> (f32, f32) {
        let rad = ang.to_radians();
        (cx + r * rad.cos(), cy + r * rad.sin())
    }
    fn arc_path(cx: f32, cy: f32, r: f32, a0: f32, a1: f32) -> String {
        let (x0, y0) = polar(cx, cy, r, a0);
        let (x1, y1) = polar(cx, cy, r, a1);
        let large_arc = if (a1 - a0).abs() >= 180.0 { 1 } else { 0 };
        format!("M {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x1:.3} {y1:.3}")
    }

    // Left to right over the top: 180 to 360 degrees
    let mut start = 180.0f32;
    let arcs: Vec<(usize, String, String)> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.value > 0.0 && total > 0.0)
        .map(|(i, s)| {
            let sweep = (s.value / total) as f32 * 180.0;
            let d = arc_path(c, c, r, start, start + sweep);
            start += sweep;
            (i, d, s.color.clone())
        })
        .collect();

    let label = (*hovered.read()).and_then(|i| {
        let s = segments.get(i)?;
        let pct = if total > 0.0 { s.value * 100.0 / total } else { 0.0 };
        Some((
            s.color.clone(),
            s.name.clone(),
            format!("Jobs: {} ({:.1}%)", format_number(s.value), pct),
        ))
    });

    let height = c + (stroke as f32) / 2.0;
    let view_box = format!("0 0 {size} {height}");
    let stroke_width = stroke.to_string();

    rsx! {
        div { class: "flex flex-col items-center gap-2",
            svg { width: "{size}", height: "{height}", view_box: "{view_box}",
                onmouseleave: move |_| hovered.set(None),
                if arcs.is_empty() {
                    path { d: "{arc_path(c, c, r, 180.0, 360.0)}", fill: "none", stroke: "#1f2937", stroke_width: "{stroke_width}" }
                }
                for (i, d, color) in arcs.into_iter() {
                    path {
                        key: "{i}",
                        d: "{d}",
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "{stroke_width}",
                        onmouseenter: move |_| hovered.set(Some(i)),
                        ontouchstart: move |_| hovered.set(Some(i)),
                    }
                }
            }
            div { class: "min-h-10 text-center text-sm",
                if let Some((color, name, jobs)) = label {
                    div { class: "flex items-center justify-center gap-1 text-slate-200",
                        span { class: "inline-block h-2 w-2 rounded-full", style: "background:{color}" }
                        b { "{name}" }
                    }
                    div { class: "text-slate-400", "{jobs}" }
                } else {
                    div { class: "flex flex-wrap justify-center gap-x-3 text-xs text-slate-400",
                        for (i, s) in segments.iter().enumerate() {
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
}
