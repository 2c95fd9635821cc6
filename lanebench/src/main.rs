fn main() {
    if let Err(e) = lanebench::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
