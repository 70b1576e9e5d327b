// src/bin/cli.rs
use tumblr_grab::cli::{self, Mode};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::detect_mode() {
        Ok(Mode::Cli(params)) => {
            if let Err(e) = cli::run(params) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Ok(Mode::Gui) => {
            eprintln!(include_str!("../cli_help.txt"));
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
    Ok(())
}
