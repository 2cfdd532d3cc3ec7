//! Simple test for OpenAiBrain chat completion.
//!
//! Run with: cargo run -p openai-brain --example test_chat
//! Or with a custom message: cargo run -p openai-brain --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - OpenAI API key for authentication

use care_core::{EmotionScore, IncomingMessage, Intent};
use openai_brain::{ClassificationContext, GenerationRequest, OpenAiBrain, Provider, ProviderKind};
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

    println!("Initializing OpenAiBrain...");
    let brain = OpenAiBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!("Persona fingerprint: {}", brain.persona_hash());
    println!();

    let message = IncomingMessage::new(message_text, Vec::new(), ProviderKind::Secondary)
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
