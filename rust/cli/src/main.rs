use std::io;

fn main() {
    let code = neonmines_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
