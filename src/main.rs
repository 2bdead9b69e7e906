/// Terminal demo of the title animation for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use palette_tuner::native::{Cli, run_cli};

    // Logger first so config problems are reported
    palette_tuner::logging::init();
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
