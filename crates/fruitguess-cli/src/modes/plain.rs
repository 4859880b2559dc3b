//! Plain mode: one game driven line by line from an async reader.
//!
//! Requests run one at a time, so every response is applied before the
//! next line is read.

use std::io::Write;

use anyhow::Result;
use fruitguess_core::api::GameClient;
use fruitguess_core::game::{GameController, GameNotice, GameRequest, Role, Stage};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const WELCOME: &str = "Fruit Guess: ask yes/no questions, then `/guess <fruit>`. `/help` lists commands.";

const HELP: &str = "\
Commands:
  <question>      ask a yes/no question
  /guess <fruit>  guess the answer
  /start, /new    start a new game
  /title          abandon the game and return to the title
  /help           show this list
  /quit, :q       exit";

pub struct PlainOptions {
    /// Start a game before reading the first line.
    pub auto_start: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Blank,
    Start,
    Title,
    Quit,
    Help,
    Guess(&'a str),
    Ask(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    match line {
        "" => Command::Blank,
        "/start" | "/new" => Command::Start,
        "/title" => Command::Title,
        "/quit" | ":q" => Command::Quit,
        "/help" => Command::Help,
        _ => match line.strip_prefix("/guess") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                Command::Guess(rest.trim())
            }
            _ => Command::Ask(line),
        },
    }
}

/// Runs plain mode until `/quit` or end of input.
///
/// # Errors
/// Returns an error only if reading input or writing output fails; game
/// server failures are printed and play continues.
pub async fn run_plain<R, W>(
    client: &GameClient,
    input: R,
    out: W,
    options: PlainOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = PlainSession {
        client,
        controller: GameController::new(),
        out,
    };

    writeln!(session.out, "{WELCOME}")?;
    if options.auto_start {
        session.start().await?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Blank => {}
            Command::Quit => break,
            Command::Help => writeln!(session.out, "{HELP}")?,
            Command::Start => session.start().await?,
            Command::Title => session.title()?,
            Command::Guess(guess) => session.guess(guess).await?,
            Command::Ask(question) => session.ask(question).await?,
        }
    }

    writeln!(session.out, "Goodbye!")?;
    Ok(())
}

struct PlainSession<'a, W> {
    client: &'a GameClient,
    controller: GameController,
    out: W,
}

impl<W: Write> PlainSession<'_, W> {
    async fn start(&mut self) -> Result<()> {
        let request = self.controller.start_game();
        self.execute(request).await
    }

    fn title(&mut self) -> Result<()> {
        self.controller.return_to_title();
        writeln!(self.out, "Back at the title. Type /start for a new game.")?;
        Ok(())
    }

    async fn ask(&mut self, question: &str) -> Result<()> {
        if self.controller.stage() != Stage::Playing {
            return self.not_playing();
        }
        let request = self.controller.ask_question(question);
        self.execute(request).await
    }

    async fn guess(&mut self, guess: &str) -> Result<()> {
        if guess.is_empty() {
            writeln!(self.out, "Error: Usage: /guess <fruit>")?;
            return Ok(());
        }
        if self.controller.stage() != Stage::Playing {
            return self.not_playing();
        }
        let request = self.controller.submit_guess(guess);
        self.execute(request).await
    }

    fn not_playing(&mut self) -> Result<()> {
        let hint = match self.controller.stage() {
            Stage::Finished => "The game is over. Type /start to play again.",
            Stage::Start | Stage::Playing => "No game in progress. Type /start to begin.",
        };
        writeln!(self.out, "Error: {hint}")?;
        Ok(())
    }

    async fn execute(&mut self, request: Option<GameRequest>) -> Result<()> {
        let Some(request) = request else {
            debug!("controller declined the request");
            return Ok(());
        };

        let before = self.controller.transcript().len();
        let response = self.client.execute(request).await;
        let notice = self.controller.complete(response);

        let added = self
            .controller
            .transcript()
            .entries()
            .get(before..)
            .unwrap_or_default();
        for entry in added {
            let prefix = match entry.role {
                Role::User => "Q",
                Role::Assistant => "A",
            };
            writeln!(self.out, "{prefix}: {}", entry.content)?;
        }

        match notice {
            Some(notice) => self.report(&notice),
            None => Ok(()),
        }
    }

    fn report(&mut self, notice: &GameNotice) -> Result<()> {
        match notice {
            GameNotice::GameStarted => writeln!(self.out, "Session started.")?,
            GameNotice::Correct { answer } => {
                writeln!(self.out, "Correct! The answer was {answer}.")?;
                writeln!(self.out, "Type /new to play again or /quit to exit.")?;
            }
            GameNotice::IncorrectGuess { guess } => {
                writeln!(self.out, "Not quite - \"{guess}\" is not the answer.")?;
            }
            GameNotice::SessionExpired { message } => {
                writeln!(self.out, "Error: {message}")?;
                writeln!(self.out, "Back at the title. Type /start for a new game.")?;
            }
            GameNotice::Failed { message } => writeln!(self.out, "Error: {message}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn mock_start(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sessionId": "s1" })),
            )
            .mount(server)
            .await;
    }

    async fn play(server: &MockServer, input: &str, auto_start: bool) -> String {
        let client = GameClient::new(Url::parse(&server.uri()).unwrap(), None).unwrap();
        let mut out = Vec::new();
        run_plain(&client, input.as_bytes(), &mut out, PlainOptions { auto_start })
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), Command::Blank);
        assert_eq!(parse_command("/new"), Command::Start);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command("/guess  Banana "), Command::Guess("Banana"));
        assert_eq!(parse_command("/guess"), Command::Guess(""));
        assert_eq!(parse_command("/guessing game"), Command::Ask("/guessing game"));
        assert_eq!(parse_command(" Is it red? "), Command::Ask("Is it red?"));
    }

    #[tokio::test]
    async fn test_full_game() {
        let server = MockServer::start().await;
        mock_start(&server).await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(body_json(
                serde_json::json!({ "sessionId": "s1", "question": "Is it red?" }),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "Yes" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/guess"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "correct": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = play(&server, "Is it red?\n\n/guess Apple\n", true).await;

        assert!(out.contains("Session started.\nQ: Is it red?\nA: Yes\n"));
        assert!(out.contains("Correct! The answer was Apple."));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_incorrect_guess_then_quit_stops_reading() {
        let server = MockServer::start().await;
        mock_start(&server).await;
        Mock::given(method("POST"))
            .and(path("/guess"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "correct": false })),
            )
            .mount(&server)
            .await;

        let out = play(&server, "/guess Banana\n/quit\nIs it red?\n", true).await;

        assert!(out.contains("Not quite - \"Banana\" is not the answer."));
        assert!(!out.contains("Q: Is it red?"));
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let server = MockServer::start().await;

        let out = play(&server, "/help\n", false).await;

        assert!(out.contains("  /start, /new "));
        assert!(out.contains("  /help           show this list"));
        assert!(out.contains("  /quit, :q "));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_before_start_is_rejected() {
        let server = MockServer::start().await;

        let out = play(&server, "Is it red?\n/guess\n", false).await;

        assert!(out.contains("Error: No game in progress. Type /start to begin."));
        assert!(out.contains("Error: Usage: /guess <fruit>"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_session_returns_to_title() {
        let server = MockServer::start().await;
        mock_start(&server).await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "Invalid session" })),
            )
            .mount(&server)
            .await;

        let out = play(&server, "Is it red?\nIs it green?\n", true).await;

        assert!(out.contains("Error: Invalid session\nBack at the title."));
        assert!(out.contains("Error: No game in progress."));
    }

    #[tokio::test]
    async fn test_start_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "boom" })),
            )
            .mount(&server)
            .await;

        let out = play(&server, "", true).await;

        assert!(out.contains("Error: Could not start a game: HTTP 500: boom"));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
