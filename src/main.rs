use duelsmith::cli::Cli;

fn main() {
    Cli::run();
}
