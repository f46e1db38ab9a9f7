use dioxus::prelude::*;

mod api;
mod app;
mod charts;
mod components;
mod shared;
mod storage;
mod table;
mod utils;

#[cfg(feature = "server")]
mod backend;

pub const FAVICON: Asset = asset!("/assets/favicon.svg");
pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    #[cfg(feature = "server")]
    {
        dotenvy::dotenv().ok();
        backend::init_tracing();

        if let Err(e) = backend::settings() {
            eprintln!("[config] {e:#}");
            std::process::exit(1);
        }

        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "check-api" {
                let rt = tokio::runtime::Runtime::new().expect("rt");
                rt.block_on(async {
                    match api::service_info().await {
                        Ok(info) => {
                            println!("updated: {}", info.updated);
                            println!("contact: {}", info.contact_email);
                            if let Some(slack) = &info.contact_slack {
                                println!("slack:   {}", slack);
                            }
                            println!("docs:    {}", info.docs_url);
                        }
                        Err(e) => {
                            eprintln!("check-api: {}", api::error_message(&e));
                            std::process::exit(1);
                        }
                    }
                });
                return;
            }
        }
    }
    dioxus::launch(app::App);
}
