use std::env;
use std::process::ExitCode;

use log::warn;

use symmetric_group::Permutation;

fn main() -> ExitCode {
    env_logger::init();
    match env::args().nth(1).as_deref() {
        None | Some("-h") | Some("--help") => {
            print!("{}", help_text());
            ExitCode::SUCCESS
        }
        Some("-v") | Some("--version") => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(one_line) => match parse_permutation(one_line) {
            Ok(permutation) => {
                println!("{}", permutation.describe());
                ExitCode::SUCCESS
            }
            Err(message) => {
                warn!("rejected argument `{one_line}`");
                eprintln!("error: {message}");
                eprintln!("for more information, try `--help` or `-h`");
                ExitCode::FAILURE
            }
        },
    }
}

fn help_text() -> String {
    format!(
        "{}, exact algebra over the symmetric group and its elements.\n\
         \n\
         Usage: symmetric-group <ARGUMENT> [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -h, --help        Print help\n\
         \x20 -v, --version     Print version\n\
         \n\
         Argument (optional):\n\
         \x20 permutation       A permutation to describe, in one-line format:\n\
         \x20                   for the permutation (2, 3, 1), write 231.\n",
        env!("CARGO_PKG_NAME")
    )
}

fn parse_permutation(text: &str) -> Result<Permutation, String> {
    let image: Vec<usize> = text
        .chars()
        .map(|symbol| symbol.to_digit(10).map(|digit| digit as usize))
        .collect::<Option<_>>()
        .ok_or_else(|| format!("`{text}` is not in one-line format, expected only digits"))?;
    Permutation::try_from(image).map_err(|rejection| rejection.to_string())
}
