fn main() {
    if let Err(e) = app_lib::run() {
        log::error!("Prompt Booster stopped: {e}");
        eprintln!("Prompt Booster stopped: {e}");
        std::process::exit(1);
    }
}
