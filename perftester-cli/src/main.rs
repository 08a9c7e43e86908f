fn main() {
    if let Err(e) = perftester_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
