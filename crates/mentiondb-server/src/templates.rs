//! Server-side rendering of the dashboard page.
//!
//! Templates are embedded at compile time so the binary is self-contained.

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment, Error};

const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

pub const DASHBOARD: &str = "dashboard.html";

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();

    env.set_auto_escape_callback(|name| {
        let is_html = std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });

    // A bad template surfaces on first render as a missing-template error.
    if let Err(e) = env.add_template(DASHBOARD, DASHBOARD_TEMPLATE) {
        tracing::error!(error = %e, "failed to compile dashboard template");
    }

    env
});

pub fn render_template<T: serde::Serialize>(name: &str, ctx: T) -> Result<String, Error> {
    let tpl = ENV.get_template(name)?;
    tpl.render(ctx)
}
