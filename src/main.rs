mod app;
mod components;
mod files;
mod logging;
mod pages;
mod storage;

use app::App;

fn main() {
    logging::init();
    leptos::mount::mount_to_body(App);
}
