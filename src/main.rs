// src/main.rs

use pathwatch::{cli, logging, run};

fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("pathwatch: {err:?}");
    }

    match run(args) {
        Ok(never) => match never {},
        Err(err) => {
            eprintln!("pathwatch: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
