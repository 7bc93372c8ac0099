//! Interactive prompt loop.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::radar::RiskRadar;

pub const PROMPT: &str = "Enter company to analyse: ";

const SESSION_DIVIDER_WIDTH: usize = 50;

fn is_exit(input: &str) -> bool {
    input.is_empty() || input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Run one analysis and write its console block.
pub fn write_analysis<W: Write>(radar: &RiskRadar, company: &str, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\n💡 Initializing Probabilistic AI Engine ({}) for {}...",
        radar.engine_name(),
        company
    )?;
    writeln!(
        out,
        "{}",
        format!("\n--- 🛰️ DARK RISK RADAR: {} ---", company).cyan().bold()
    )?;

    match radar.analyse(company) {
        Ok(report) => writeln!(out, "{}", report)?,
        Err(e) => writeln!(out, "{}", format!("❌ Critical Error: {}", e).red())?,
    }

    writeln!(out, "\n{}\n", "=".repeat(SESSION_DIVIDER_WIDTH))
}

/// Prompt for company names until exit, empty input or end of input.
pub fn run_session<R: BufRead, W: Write>(radar: &RiskRadar, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "🚀 DarkRiskRadar Terminal Activated.")?;
    writeln!(out, "Type 'exit' or 'quit' at any time to stop the program.\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping unreadable input line: {}", e);
                writeln!(out)?;
                continue;
            }
            Some(Err(e)) => {
                warn!("Input closed: {}", e);
                String::new()
            }
            None => {
                debug!("End of input");
                String::new()
            }
        };
        let company = line.trim();

        if is_exit(company) {
            writeln!(out, "\n🛑 Shutting down DarkRiskRadar. Goodbye!")?;
            return Ok(());
        }

        write_analysis(radar, company, &mut out)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit(""));
        assert!(is_exit("exit"));
        assert!(is_exit("QUIT"));
        assert!(is_exit("Exit"));
        assert!(!is_exit("Exxon"));
        assert!(!is_exit("quitters inc"));
    }
}
