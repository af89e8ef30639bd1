//! Utility to print a nutrition report for a single can
//!
//! Usage: can_report <weight_g> <protein> <fat> <fiber> <moisture> <ash>

use meowtrition::config::Config;
use meowtrition::nutrition::NutritionReport;
use meowtrition::session::CalculatorSession;

const USAGE: &str = "Usage: can_report <weight_g> <protein> <fat> <fiber> <moisture> <ash>";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(session) = CalculatorSession::from_args(&args) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let session = session.calculate();

    if let Some(error) = session.error() {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }

    match session.computation() {
        Some(computation) => {
            print!("{}", NutritionReport::from_computation(computation, config.precision));
            Ok(())
        }
        None => Err("calculation did not produce results".into()),
    }
}
