use cipherforge::api::ScoreReport;
use cipherforge::consts::ALPHABET;
use cipherforge::key::PermutationKey;
use cipherforge::optimizer::TrainingOutcome;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::time::Duration;

/// Prints a key as two rows: each cipher letter above the letter it decrypts to.
pub fn print_key_table(name: &str, key: &PermutationKey) {
    println!("\nKey: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cipher_row: Vec<Cell> = ALPHABET
        .iter()
        .map(|&c| {
            Cell::new((c as char).to_string())
                .set_alignment(CellAlignment::Center)
                .add_attribute(Attribute::Bold)
        })
        .collect();
    let plain_row: Vec<Cell> = ALPHABET
        .iter()
        .map(|&c| {
            let s = key
                .by_origin(c)
                .map(|m| (m.destination as char).to_string())
                .unwrap_or_else(|| "?".to_string());
            Cell::new(s).set_alignment(CellAlignment::Center)
        })
        .collect();

    table.add_row(cipher_row);
    table.add_row(plain_row);
    println!("{}", table);
}

pub fn print_outcome(outcome: &TrainingOutcome, attempts: usize, elapsed: Duration) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let reason_color = if outcome.is_solved() {
        Color::Green
    } else {
        Color::Yellow
    };

    table.add_row(vec![
        Cell::new("Result").add_attribute(Attribute::Bold),
        Cell::new(outcome.reason.to_string()).fg(reason_color),
    ]);
    table.add_row(vec![
        Cell::new("Fitness"),
        Cell::new(format!("{:.2}", outcome.fitness)).fg(Color::Cyan),
    ]);
    table.add_row(vec![Cell::new("Cycles"), Cell::new(outcome.cycles)]);
    table.add_row(vec![Cell::new("Attempts"), Cell::new(attempts)]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
    ]);
    table.add_row(vec![Cell::new("Key"), Cell::new(outcome.key.to_string())]);
    table.add_row(vec![
        Cell::new("Plaintext").add_attribute(Attribute::Bold),
        Cell::new(&outcome.plain_text),
    ]);

    println!("{}", table);
}

pub fn print_score(report: &ScoreReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let unknown = if report.unknown_words.is_empty() {
        "-".to_string()
    } else {
        report.unknown_words.join(", ")
    };

    table.add_row(vec![
        Cell::new("Fitness").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", report.fitness)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Solved"),
        Cell::new(report.solved).fg(if report.solved {
            Color::Green
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![Cell::new("Unknown"), Cell::new(unknown)]);
    table.add_row(vec![Cell::new("Plaintext"), Cell::new(&report.plain_text)]);

    println!("\n{}", table);
}
