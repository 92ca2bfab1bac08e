mod api;
mod app;
mod auth;
mod config;
mod context;
mod error;
mod format;
mod forms;
mod http;
mod logging;
mod models;
mod notify;
mod session;
mod storage;
#[cfg(test)]
mod testing;
mod views;

use app::{App, AppProps};
use config::Config;

fn main() {
    let config = Config::from_build_env();
    logging::set_up(config.log_level);
    tracing::info!(api = %config.api_base_url, demo = config.demo_fallback, "starting XBank");

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
