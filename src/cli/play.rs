//! CUI player mode - play a session against the live service in the terminal.
//!
//! This is the one parameterized view over the snapshot: it matches
//! exhaustively on the current queue item (and on the prompt kind) to decide
//! which input affordance to offer.

use crate::application::session::GameSession;
use crate::domain::phase::Phase;
use crate::domain::snapshot::{ChoiceOption, GameSnapshot, PromptKind, QueueItem};
use crate::domain::value_objects::PlayerId;
use crate::infrastructure::transport::{ClientConfig, HttpTransport};
use std::io::{self, Write};
use std::sync::Arc;

/// Options for the player mode
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Remote origin override; defaults to the environment / hosted worker
    pub base_url: Option<String>,
    /// Castle name; prompted for when not given
    pub name: Option<String>,
    /// Number of AI opponents
    pub ai_count: u32,
}

/// Run the player mode
pub async fn run_play(options: PlayOptions) -> anyhow::Result<()> {
    let config = match &options.base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let transport = Arc::new(HttpTransport::new(config));
    let mut session = GameSession::new(transport);

    println!("=== The Traitors: AI Edition ===");
    println!();
    println!("Controls:");
    println!("  Enter: continue");
    println!("  1-9:   select an option");
    println!("  p:     show the roster");
    println!("  q:     quit");
    println!();

    let name = match options.name {
        Some(name) => name,
        None => loop {
            let input = get_input("Your name:")?;
            if !input.is_empty() {
                break input;
            }
        },
    };

    if session.start(&name, options.ai_count.max(1)).await.is_err() {
        anyhow::bail!(
            "could not enter the castle: {}",
            session.error().unwrap_or("unknown error")
        );
    }
    show_roster(session.snapshot());

    loop {
        if let Some(error) = session.error() {
            println!("[error] {error}");
        }

        let Some(item) = session.snapshot().current_item().cloned() else {
            if finish_if_over(&session) {
                return Ok(());
            }
            if !prompt_continue(&mut session).await? {
                return Ok(());
            }
            continue;
        };

        show_item(&item);

        match &item {
            QueueItem::PlayerPrompt {
                prompt_kind: PromptKind::MurderTarget,
                options,
                ..
            }
            | QueueItem::PlayerPrompt {
                prompt_kind: PromptKind::EndgameChoice,
                options,
                ..
            }
            | QueueItem::PlayerPrompt {
                prompt_kind: PromptKind::Other,
                options,
                ..
            } if !options.is_empty() => {
                let Some(choice) = select_option(options)? else {
                    return Ok(());
                };
                let _ = session.respond("", Some(&choice)).await;
            }
            QueueItem::PlayerPrompt { .. } => {
                // Free-text statement; empty input means "say nothing"
                let statement = get_input(">")?;
                if statement == "q" {
                    println!("Goodbye!");
                    return Ok(());
                }
                let _ = session.respond(&statement, None).await;
            }
            QueueItem::VotePrompt { options, .. } => {
                let Some(target) = select_option(options)? else {
                    return Ok(());
                };
                let _ = session.vote(&PlayerId::from(target)).await;
            }
            _ => {
                if finish_if_over(&session) {
                    return Ok(());
                }
                if !prompt_continue(&mut session).await? {
                    return Ok(());
                }
            }
        }
    }
}

/// Print the ending banner once the session is over
fn finish_if_over(session: &GameSession) -> bool {
    if session.phase() != Phase::Ended {
        return false;
    }
    println!();
    match &session.snapshot().meta.winner {
        Some(winner) => println!("== GAME OVER: {} win ==", winner.to_uppercase()),
        None => println!("== GAME OVER =="),
    }
    true
}

/// Wait for Enter (or a command) and advance. Returns false on quit.
async fn prompt_continue(session: &mut GameSession) -> anyhow::Result<bool> {
    loop {
        let input = get_input("")?;
        match input.as_str() {
            "q" => {
                println!("Goodbye!");
                return Ok(false);
            }
            "p" => {
                show_roster(session.snapshot());
                continue;
            }
            "" => {
                let _ = session.advance().await;
                return Ok(true);
            }
            _ => {
                println!("Press Enter to continue, 'p' for the roster, or 'q' to quit.");
            }
        }
    }
}

/// Display a single queue item
fn show_item(item: &QueueItem) {
    match item {
        QueueItem::HostLine { text } => {
            println!("HOST:");
            println!("{text}");
            println!();
        }
        QueueItem::AiLine { text, .. } => {
            println!("{}:", item.speaker().unwrap_or("PLAYER").to_uppercase());
            println!("{text}");
            println!();
        }
        QueueItem::PlayerLine { text } => {
            println!("YOU:");
            println!("{text}");
            println!();
        }
        QueueItem::PhaseTransition { to_scene } => {
            if let Some(scene) = to_scene {
                println!("[{}]", scene);
                println!();
            }
        }
        QueueItem::PlayerPrompt { prompt, .. } | QueueItem::VotePrompt { prompt, .. } => {
            println!("--- Your move ---");
            if !prompt.is_empty() {
                println!("{prompt}");
            }
            println!();
        }
        QueueItem::ResultReveal { text } => {
            println!("--- Reveal ---");
            println!("{text}");
            println!();
        }
        QueueItem::Unknown => {}
    }
}

/// Display the cast roster and round metadata
fn show_roster(snapshot: &GameSnapshot) {
    println!("--- Cast roster (round {}) ---", snapshot.meta.round);
    for player in &snapshot.players {
        let state = if !player.alive {
            "OUT"
        } else if player.is_human {
            "YOU"
        } else {
            "IN"
        };
        match &player.model_label {
            Some(label) => println!("  {:<12} {:<4} [{}]", player.name, state, label),
            None => println!("  {:<12} {}", player.name, state),
        }
    }
    println!("  {} players remaining", snapshot.alive_players().count());
    println!();
}

/// Present numbered options and read a selection. Returns `None` on quit.
fn select_option(options: &[ChoiceOption]) -> anyhow::Result<Option<String>> {
    for (i, option) in options.iter().enumerate() {
        println!("{}. {}", i + 1, option.label);
    }
    loop {
        let input = get_input("Select (1-9):")?;
        if input == "q" {
            println!("Goodbye!");
            return Ok(None);
        }
        if let Ok(index) = input.parse::<usize>() {
            if index >= 1 && index <= options.len() {
                return Ok(Some(options[index - 1].id.clone()));
            }
        }
        println!("Invalid choice. Enter 1-{} or 'q'.", options.len());
    }
}

/// Get user input with an optional prompt
fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
