//! Interactive chat loop.
//!
//! Line-based request/response: prompt `You: `, answer `AI: …`. The loop
//! is single-threaded and cooperative — one question in flight, no timeout,
//! no cancellation. The only graceful stop is `exit`/`quit` between turns
//! (end-of-input behaves the same, so piped sessions terminate cleanly).

use anyhow::Result;
use std::io::Write;
use tokio::io::AsyncBufReadExt;

use crate::agent::Agent;

pub async fn run_chat(agent: &Agent) -> Result<()> {
    println!("Personal memory assistant ready. Ask anything or type 'exit'.\n");

    let stdin = tokio::io::stdin();
    let mut lines = tokio::io::BufReader::new(stdin).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                println!("Goodbye!");
                break;
            }
        };

        if is_exit_command(&line) {
            println!("Goodbye!");
            break;
        }

        match agent.respond(&line).await {
            Ok(answer) => println!("AI: {}", answer),
            Err(e) => {
                println!("Error: {}", e);
                println!("Please try again or type 'exit' to quit.");
            }
        }
    }

    Ok(())
}

/// Exactly the literal tokens `exit` and `quit`, any letter case,
/// surrounding whitespace ignored. Nothing else stops the loop.
fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_tokens_any_case() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("Quit"));
        assert!(is_exit_command("  quit  "));
    }

    #[test]
    fn test_non_exit_inputs() {
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("please quit"));
        assert!(!is_exit_command("goodbye"));
        assert!(!is_exit_command(""));
    }
}
