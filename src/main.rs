fn main() {
    if let Err(err) = shwire::cli::run() {
        eprintln!("shwire: {err}");
        std::process::exit(1);
    }
}
