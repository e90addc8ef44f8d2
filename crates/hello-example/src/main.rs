//! The hello view, end to end.
//!
//! Registers a greeting view with a delegated click handler, renders it into
//! an in-memory page, simulates a few clicks (each one re-renders the view
//! with an updated count), and hides it again.
//!
//! Run with `RUST_LOG=stagehand.lifecycle=debug,stagehand.events=trace` to
//! watch the lifecycle and binding events.

use std::rc::Rc;

use anyhow::Result;
use serde_json::json;
use stagehand::{Binder, Page, ViewConfig, ViewRegistry};
use tracing_subscriber::EnvFilter;

const HELLO_TEMPLATE: &str = r#"<div class="greeting">
  <p>Hello, {{ name }}! You have clicked {{ clicks }} time(s).</p>
  <button id="click-me">Click me</button>
</div>"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = Rc::new(Page::new());
    let mut registry = ViewRegistry::new(page.clone());
    registry
        .renderer()
        .borrow_mut()
        .add_template("hello-template", HELLO_TEMPLATE)?;

    let view = registry.register(
        ViewConfig::new("hello")
            .selector("#hello-world")
            .template("hello-template")
            .data(json!({"name": "world", "clicks": 0}))
            .on("click #click-me", |view, _event| {
                let mut data = view.data();
                data["clicks"] = json!(data["clicks"].as_i64().unwrap_or(0) + 1);
                if let Err(err) = view.render_with(data) {
                    eprintln!("re-render failed: {}", err);
                }
            })
            .on_hide(|view| {
                println!("({} is gone)", view.name());
            }),
    )?;

    view.render()?;
    println!("-- rendered --");
    println!("{}", page.content("#hello-world").unwrap_or_default());

    // Each click bubbles up from the button and re-renders the view
    for _ in 0..3 {
        page.dispatch("#hello-world", "click", Some("#click-me"));
    }
    println!("-- after three clicks --");
    println!("{}", page.content("#hello-world").unwrap_or_default());

    view.hide();
    println!("-- hidden --");
    println!(
        "content: {:?}, visible: {}",
        page.content("#hello-world"),
        page.is_visible("#hello-world")
    );

    Ok(())
}
