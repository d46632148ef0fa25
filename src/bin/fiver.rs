use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        eprintln!("fiver: error: {e}");
        std::process::exit(e.exit_code());
    }
}
