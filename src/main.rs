fn main() {
    if let Err(e) = arktree_analyser::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
