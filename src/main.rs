mod app;
mod core;
mod input;
mod io;
mod ui;

fn main() -> anyhow::Result<()> {
    app::run()
}
