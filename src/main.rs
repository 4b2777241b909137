use cubatrice_cards::cli::Cli;

fn main() {
    Cli::run();
}
