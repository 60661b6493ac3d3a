fn main() {
    if let Err(err) = exoplanet_reports::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
