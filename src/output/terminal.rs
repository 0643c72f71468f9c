// Colored terminal output for verdicts and service status.

use colored::Colorize;

use crate::filter::models::FilterResponse;

/// Display a single verdict for the given text.
pub fn display_verdict(text: &str, response: &FilterResponse) {
    println!("\n{}", "=== Brain Rot Check ===".bold());
    println!("  Text: {}", super::truncate_chars(text, 120).dimmed());

    let verdict = if response.is_brain_rot {
        "BRAIN ROT".red().bold()
    } else {
        "OK".green().bold()
    };
    println!("  Verdict: {verdict}");
    println!("  Score: {} / 1.00", colorize_score(response.score));
    println!("  Reasoning: {}", response.reasoning);
    println!();
}

/// Display a running service's status payload.
pub fn display_status(url: &str, status: &str, model: &str) {
    println!("{} {}", "Service:".bold(), url);
    println!("  Status: {}", status.green());
    println!("  Model: {model}");
}

/// Higher scores are better, so the scale runs red to green.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 0.75 {
        text.green()
    } else if score >= 0.5 {
        text.yellow()
    } else if score >= 0.25 {
        text.bright_red()
    } else {
        text.red().bold()
    }
}
