use dioxus::prelude::*;

use crate::table::{Column, PageLink, Record, TableOptions, TableState};
#[cfg(feature = "web")]
use crate::utils::debounce::Debouncer;

/// Search input is applied once typing pauses this long.
pub const SEARCH_DEBOUNCE_MS: u32 = 350;

#[allow(non_snake_case)]
#[component]
pub fn DataTable(
    columns: Vec<Column>,
    records: Vec<Record>,
    #[props(default)] options: TableOptions,
) -> Element {
    // The table owns its state for its whole lifetime
    let mut state = use_signal(move || TableState::new(columns, records, options));

    #[cfg(feature = "web")]
    let mut pending: Signal<Debouncer<gloo_timers::callback::Timeout>> = use_signal(Debouncer::new);

    #[cfg(feature = "web")]
    use_drop(move || pending.write().cancel());

    let on_search = move |evt: FormEvent| {
        let query = evt.value();
        #[cfg(feature = "web")]
        {
            let handle = gloo_timers::callback::Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                state.write().search(&query);
            });
            pending.write().schedule(handle);
        }
        #[cfg(not(feature = "web"))]
        {
            state.write().search(&query);
        }
    };

    let table = state.read();
    let headers: Vec<(usize, String, String)> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, col)| (i, col.title.clone(), table.header_class(i)))
        .collect();
    let rows = table.page_rows();
    // (key, page number or None for the ellipsis, class)
    let links: Vec<(usize, Option<usize>, &'static str)> = if table.is_empty() {
        Vec::new()
    } else {
        table
            .page_links()
            .into_iter()
            .enumerate()
            .map(|(i, link)| match link {
                PageLink::Page { number, active } => {
                    (i, Some(number), if active { "active" } else { "waves-effect" })
                }
                PageLink::Ellipsis => (i, None, "disabled"),
            })
            .collect()
    };
    let colspan = headers.len().max(1);
    let empty = table.is_empty();
    drop(table);

    rsx! {
        div { class: "space-y-3",
            input {
                r#type: "search",
                class: "w-full max-w-xs rounded-md border border-slate-700 bg-slate-900 px-3 py-1.5 text-sm text-slate-200 placeholder-slate-500 focus:outline-none focus:border-sky-500",
                placeholder: "Search",
                oninput: on_search,
            }
            table { class: "data-table w-full text-sm",
                thead {
                    tr {
                        for (i, title, class) in headers.into_iter() {
                            th {
                                key: "{i}",
                                class: "{class}",
                                onclick: move |_| state.write().click_header(i),
                                "{title}"
                            }
                        }
                    }
                }
                tbody {
                    if empty {
                        tr {
                            td { colspan: "{colspan}", class: "text-center text-slate-400", "No matching records found" }
                        }
                    }
                    for (r, cells) in rows.into_iter().enumerate() {
                        tr { key: "{r}",
                            for (c, cell) in cells.into_iter().enumerate() {
                                td { key: "{c}", "{cell}" }
                            }
                        }
                    }
                }
            }
            if !links.is_empty() {
                ul { class: "pagination flex flex-wrap items-center gap-1 text-sm",
                    for (i, page, class) in links.into_iter() {
                        li { key: "{i}", class: "{class}",
                            if let Some(number) = page {
                                a {
                                    href: "#!",
                                    onclick: move |evt: MouseEvent| {
                                        evt.prevent_default();
                                        state.write().go_to_page(number);
                                    },
                                    "{number}"
                                }
                            } else {
                                a { "…" }
                            }
                        }
                    }
                }
            }
        }
    }
}
