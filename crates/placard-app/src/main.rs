//! Main application entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    env_logger::init();
    log::info!("Starting Placard");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = placard_app::App::from_env().and_then(|mut app| app.run(&args)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
