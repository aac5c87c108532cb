//! Interactive read-eval-print loop over stdin

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::session::{Session, TurnOutcome};

const PROMPT: &[u8] = b"you> ";
const REPLY: &[u8] = b"assistant> ";

/// Read user lines until EOF, `quit`, or Ctrl-C at the prompt
///
/// Ctrl-C while a reply is streaming cancels only that reply.
pub async fn run(mut session: Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"Type 'quit' to exit, 'clear' to start over\n")
        .await?;

    loop {
        stdout.write_all(PROMPT).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = interrupted() => None,
        };

        let Some(line) = line else {
            stdout.write_all(b"\n").await?;
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "clear" => {
                session.clear();
                stdout.write_all(b"conversation cleared\n").await?;
                continue;
            }
            _ => {}
        }

        stdout.write_all(REPLY).await?;
        let outcome = session.send(line.trim().to_owned(), &mut stdout, interrupted()).await?;
        report(&mut stdout, outcome).await?;
    }

    tracing::info!(turns = session.history().len(), "conversation ended");

    Ok(())
}

/// Single non-interactive turn
pub async fn once(mut session: Session, prompt: String) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    match session.send(prompt, &mut stdout, interrupted()).await? {
        TurnOutcome::Completed(_) => {
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
            Ok(())
        }
        TurnOutcome::Cancelled => anyhow::bail!("interrupted"),
        TurnOutcome::Failed(e) => Err(e.into()),
    }
}

async fn report(stdout: &mut tokio::io::Stdout, outcome: TurnOutcome) -> std::io::Result<()> {
    match outcome {
        TurnOutcome::Completed(_) => stdout.write_all(b"\n").await?,
        TurnOutcome::Cancelled => stdout.write_all(b"\n[cancelled]\n").await?,
        TurnOutcome::Failed(e) => {
            tracing::error!(provider = ?e.failed_provider(), error = %e, "turn failed");
            stdout.write_all(b"\n").await?;
            eprintln!("error: {e}");
        }
    }

    stdout.flush().await
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
