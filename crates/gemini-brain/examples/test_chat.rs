//! Simple test for GeminiBrain chat completion.
//!
//! Run with: cargo run -p gemini-brain --example test_chat
//! Or with a custom message: cargo run -p gemini-brain --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Google AI Studio API key for authentication

use care_core::{EmotionScore, IncomingMessage, Intent};
use gemini_brain::{ClassificationContext, GenerationRequest, GeminiBrain, Provider, ProviderKind};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "I've been feeling really stressed about work lately".to_string()
    };

    println!("Initializing GeminiBrain...");
    let brain = GeminiBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!("Persona fingerprint: {}", brain.persona_hash());
    println!();

    let message = IncomingMessage::new(message_text, Vec::new(), ProviderKind::Primary)
        .ok_or("message must not be empty")?;
    // Fixed classification; the example exercises generation only.
    let context = ClassificationContext::new(EmotionScore::new("fear", 0.8), Intent::Stress, false);
    let request = GenerationRequest::new(&message, &context);

    println!("Sending: \"{}\"", message.text());
    println!("Waiting for response...\n");

    let reply = brain.generate(&request).await?;

    println!("=== Response ===");
    println!("{}", reply);
    println!("================");

    Ok(())
}
