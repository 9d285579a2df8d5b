use std::{env, fs, process};

use babble_core::model;

/// Parses a command-line integer that must be strictly positive.
///
/// The core also rejects zero, but validation belongs to the caller:
/// bad arguments should die here with a usage hint, not deep in a run.
fn parse_positive(raw: &str, name: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err(format!("{name} must be a positive integer, got 0")),
        Ok(value) => Ok(value),
        Err(_) => Err(format!("{name} must be a positive integer, got '{raw}'")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: {} n m input-file...", args[0]);
        eprintln!("  n: the n in n-grams (>= 1)");
        eprintln!("  m: number of sentences to generate (>= 1)");
        process::exit(2);
    }

    let n = parse_positive(&args[1], "n")?;
    let m = parse_positive(&args[2], "m")?;

    // One model and one generation run per input file
    for path in &args[3..] {
        let raw_text = fs::read_to_string(path)?;

        println!("\nThis program generates random sentences based off an n-gram model.\n");
        println!("Command line settings: {} {} {}\n", args[0], n, m);

        let table = model::build_model(&[raw_text], n)?;
        let text = model::generate(&table, m, &mut rand::rng())?;
        println!("{text}");
    }

    Ok(())
}
