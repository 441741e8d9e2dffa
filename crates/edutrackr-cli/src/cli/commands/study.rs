//! Headless study-tool commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use edutrackr_core::config::Config;
use edutrackr_core::study::StudyService;

fn service(config: &Config) -> StudyService {
    let service = StudyService::from_config(config);
    if service.is_offline() {
        eprintln!("No Gemini credential configured; showing canned demo content.");
    }
    service
}

pub async fn plan(config: &Config, subjects: &[String], hours: u32) -> Result<()> {
    let plan = service(config).study_plan(subjects, hours).await;
    if plan.is_empty() {
        println!("No plan came back. Try again.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["Time", "Subject", "Topic", "Duration"]);
    for item in &plan {
        table.add_row([&item.time, &item.subject, &item.topic, &item.duration]);
    }
    println!("{table}");
    Ok(())
}

pub async fn flashcards(config: &Config, topic: &str, count: usize) -> Result<()> {
    let cards = service(config).flashcards(topic, count).await;
    if cards.is_empty() {
        println!("No cards came back. Try again.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["#", "Front", "Back", "Difficulty"]);
    for (i, card) in cards.iter().enumerate() {
        table.add_row([
            &(i + 1).to_string(),
            &card.front,
            &card.back,
            &card.difficulty.label().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn quiz(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    answers: bool,
) -> Result<()> {
    let source = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide the source text with --text or --file"),
    };

    let questions = service(config).quiz_from_text(&source).await;
    if questions.is_empty() {
        println!("No questions came back. Try again.");
        return Ok(());
    }

    for (qi, question) in questions.iter().enumerate() {
        println!("{}. {}", qi + 1, question.question);
        for (oi, option) in question.options.iter().enumerate() {
            let letter = (b'a' + oi as u8) as char;
            let marker = if answers && oi == question.correct_answer {
                "*"
            } else {
                " "
            };
            println!("  {marker}{letter}) {option}");
        }
        println!();
    }
    if !answers {
        println!("Re-run with --answers to reveal the correct options.");
    }
    Ok(())
}

pub async fn tutor(config: &Config, question: &str, subject: &str) -> Result<()> {
    let reply = service(config).ask_tutor(question, subject).await;
    println!("{reply}");
    Ok(())
}
