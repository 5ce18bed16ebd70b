use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use pillars::builder::parse_state;
use pillars::reach::StateGraph;
use pillars::search::SearchConfig;
use pillars::{SolverFailure, State};

#[derive(Parser)]
#[command(about = "Find the fewest activations that light every pillar")]
struct Cli {
    /// Pillars clockwise as 0 (off) and 1 (on), e.g. 11010. Prompted for when omitted.
    #[arg(long, short = 'p')]
    pillars: Option<String>,
    /// Give up once a solution would need more than this many activations.
    #[arg(long)]
    max_depth: Option<usize>,
    /// Explore the reachable states first and skip the search if the goal is not among them.
    #[arg(long, default_value_t = false)]
    precheck: bool,
}

/// Ask until a valid ring is entered, explaining what was wrong each time.
fn prompt(input: &mut impl BufRead, output: &mut impl Write) -> Result<State> {
    loop {
        write!(output, "Enter the state of each pillar (0 = off, 1 = on): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read pillars")? == 0 {
            bail!("input closed before a valid puzzle was entered");
        }

        match parse_state(&line) {
            Ok(state) => return Ok(state),
            Err(reason) => writeln!(output, "{}", reason)?,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let root = match args.pillars {
        Some(digits) => parse_state(&digits).with_context(|| format!("invalid puzzle {:?}", digits))?,
        None => prompt(&mut io::stdin().lock(), &mut out)?,
    };

    if args.precheck && !StateGraph::explore(&root).is_solvable(&root) {
        info!("goal is not reachable from {}, skipping search", root);
        writeln!(out, "{}", SolverFailure::Unreachable)?;
        return Ok(());
    }

    match root.solve_with(SearchConfig { max_depth: args.max_depth }) {
        // one line per activation, then a blank line
        Ok(solution) => writeln!(out, "{}", solution)?,
        Err(failure) => writeln!(out, "{}", failure)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pillars::builder::InvalidReason;

    use super::*;

    #[test]
    fn reprompts_until_valid() {
        let mut input = Cursor::new("11a10\n12010\n101\n101010\n11010\n");
        let mut output = Vec::new();

        let root = prompt(&mut input, &mut output).unwrap();
        assert_eq!(root.to_string(), "11010");

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Enter the state of each pillar").count(), 5);
        for reason in [InvalidReason::NotNumeric, InvalidReason::NotBinary, InvalidReason::TooShort, InvalidReason::EvenLength] {
            assert!(output.contains(&reason.to_string()), "missing {:?} in {:?}", reason, output);
        }
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();

        assert!(prompt(&mut input, &mut output).is_err());
        assert!(String::from_utf8(output).unwrap().contains(&InvalidReason::NotBinary.to_string()));
    }
}
