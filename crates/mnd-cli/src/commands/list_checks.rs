//! List checks command implementation.

use mnd_checks::all_detectors;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");
    println!("{:<10} {:<12} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for detector in all_detectors() {
        println!(
            "{:<10} {:<12} {}",
            detector.code(),
            detector.name(),
            detector.description()
        );
    }

    println!("\nAll checks run by default. Use --checks to select some, e.g.:");
    println!("  mnd check --checks argument,case");
    println!("  mnd check --checks MND001,MND003");
}
