//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fruitguess_core::game::{GameNotice, GameRequest, GameResponse, Stage};
use ratatui::layout::Rect;
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{NoticeState, Overlay};
use crate::render::playing_layout;
use crate::state::{AppState, Focus, TuiState};
use crate::transcript::{render_transcript, transcript_viewport};

/// Whether applying `event` can change what is drawn.
///
/// Ticks only animate the spinner, so they matter only while a request is in
/// flight. Call before `update`.
pub fn needs_redraw(app: &AppState, event: &UiEvent) -> bool {
    match event {
        UiEvent::Frame { .. } => false,
        UiEvent::Tick => app.tui.game.is_busy(),
        UiEvent::Terminal(_) | UiEvent::Game(_) => true,
    }
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.tui.game.is_busy() {
                app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(&mut app.tui, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Game(response) => {
            handle_game_response(app, response);
            vec![]
        }
    }
}

/// Re-measures the transcript so scrolling works on what will be drawn.
fn handle_frame(tui: &mut TuiState, width: u16, height: u16) {
    let layout = playing_layout(Rect::new(0, 0, width, height));
    let (text_width, text_height) = transcript_viewport(layout.transcript);
    let line_count = render_transcript(tui.game.transcript(), text_width).len();
    tui.scroll.update_line_count(line_count);
    tui.transcript_height = text_height;
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if app.overlay.is_none() && app.tui.stage() == Stage::Playing {
                app.tui.focused_input_mut().insert_str(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = &app.overlay {
        if overlay.handle_key(key) {
            app.overlay = None;
        }
        return vec![];
    }

    let tui = &mut app.tui;
    match tui.stage() {
        Stage::Start => match key.code {
            KeyCode::Enter => start_game(tui),
            KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
            _ => vec![],
        },
        Stage::Finished => match key.code {
            KeyCode::Enter => start_game(tui),
            KeyCode::Esc => {
                return_to_title(tui);
                vec![]
            }
            KeyCode::Char('q') => vec![UiEffect::Quit],
            _ => vec![],
        },
        Stage::Playing => handle_playing_key(tui, key),
    }
}

fn handle_playing_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            tui.focus = tui.focus.toggle();
            vec![]
        }
        KeyCode::Enter => submit_focused(tui),
        KeyCode::Esc => {
            return_to_title(tui);
            vec![]
        }
        KeyCode::PageUp => {
            tui.scroll.page_up(tui.transcript_height);
            vec![]
        }
        KeyCode::PageDown => {
            tui.scroll.page_down(tui.transcript_height);
            vec![]
        }
        _ => {
            tui.focused_input_mut().handle_key(key);
            vec![]
        }
    }
}

fn start_game(tui: &mut TuiState) -> Vec<UiEffect> {
    send(tui.game.start_game())
}

fn return_to_title(tui: &mut TuiState) {
    tui.game.return_to_title();
    tui.reset_play_area();
}

/// Submits the focused field. The text stays in the field while that
/// field's request is still in flight.
fn submit_focused(tui: &mut TuiState) -> Vec<UiEffect> {
    match tui.focus {
        Focus::Question => {
            if !tui.game.can_ask() {
                return vec![];
            }
            let Some(question) = tui.question.submit() else {
                return vec![];
            };
            tui.scroll.scroll_to_bottom();
            send(tui.game.ask_question(&question))
        }
        Focus::Answer => {
            if !tui.game.can_guess() {
                return vec![];
            }
            let Some(guess) = tui.answer.submit() else {
                return vec![];
            };
            send(tui.game.submit_guess(&guess))
        }
    }
}

fn send(request: Option<GameRequest>) -> Vec<UiEffect> {
    request.map(UiEffect::Send).into_iter().collect()
}

fn handle_game_response(app: &mut AppState, response: GameResponse) {
    let Some(notice) = app.tui.game.complete(response) else {
        return;
    };
    debug!(?notice, "game notice");

    match &notice {
        GameNotice::GameStarted => {
            app.tui.reset_play_area();
            app.overlay = None;
        }
        GameNotice::Correct { .. } => app.tui.answer.clear(),
        GameNotice::SessionExpired { .. } => app.tui.reset_play_area(),
        GameNotice::IncorrectGuess { .. } | GameNotice::Failed { .. } => {}
    }

    if let Some(state) = NoticeState::from_game_notice(&notice) {
        app.overlay = Some(Overlay::Notice(state));
    }
}

#[cfg(test)]
mod tests {
    use fruitguess_core::api::{ApiError, GuessOutcome};
    use fruitguess_core::game::SessionId;
    use url::Url;

    use super::*;
    use crate::transcript::ScrollMode;

    fn app() -> AppState {
        AppState::new(&Url::parse("http://localhost:5000").unwrap())
    }

    fn key(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            key(app, KeyCode::Char(ch));
        }
    }

    fn sent(effects: &[UiEffect]) -> GameRequest {
        match effects {
            [UiEffect::Send(request)] => request.clone(),
            other => panic!("expected one request, got {other:?}"),
        }
    }

    fn session() -> SessionId {
        SessionId::new("abc123").unwrap()
    }

    fn playing_app() -> AppState {
        let mut app = app();
        let GameRequest::Start { id } = sent(&key(&mut app, KeyCode::Enter)) else {
            panic!("expected start");
        };
        update(
            &mut app,
            UiEvent::Game(GameResponse::Started {
                id,
                result: Ok(session()),
            }),
        );
        assert_eq!(app.tui.stage(), Stage::Playing);
        app
    }

    fn guess(app: &mut AppState, text: &str, result: Result<GuessOutcome, ApiError>) {
        key(app, KeyCode::Tab);
        type_text(app, text);
        let GameRequest::Guess { id, session, guess } = sent(&key(app, KeyCode::Enter)) else {
            panic!("expected guess");
        };
        update(
            app,
            UiEvent::Game(GameResponse::Guessed {
                id,
                session,
                guess,
                result,
            }),
        );
    }

    #[test]
    fn test_enter_on_title_starts_once() {
        let mut app = app();
        let request = sent(&key(&mut app, KeyCode::Enter));
        assert!(matches!(request, GameRequest::Start { .. }));

        assert!(key(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(key(&mut app, KeyCode::Char('q')), vec![UiEffect::Quit]);

        let mut app = playing_app();
        assert!(key(&mut app, KeyCode::Char('q')).is_empty());
        assert_eq!(app.tui.question.text(), "q");

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            update(&mut app, UiEvent::Terminal(Event::Key(ctrl_c))),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_question_round_trip() {
        let mut app = playing_app();
        type_text(&mut app, "Is it red?");
        let GameRequest::Ask { id, session, question } = sent(&key(&mut app, KeyCode::Enter))
        else {
            panic!("expected ask");
        };
        assert_eq!(question, "Is it red?");
        assert!(app.tui.question.is_empty());

        update(
            &mut app,
            UiEvent::Game(GameResponse::Answered {
                id,
                session,
                question,
                result: Ok(Some("Yes".to_string())),
            }),
        );
        assert_eq!(app.tui.game.transcript().len(), 2);
    }

    #[test]
    fn test_enter_while_asking_keeps_text() {
        let mut app = playing_app();
        type_text(&mut app, "Is it red?");
        sent(&key(&mut app, KeyCode::Enter));

        type_text(&mut app, "Is it round?");
        assert!(key(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(app.tui.question.text(), "Is it round?");
    }

    #[test]
    fn test_blank_question_sends_nothing() {
        let mut app = playing_app();
        type_text(&mut app, "   ");
        assert!(key(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn test_guess_while_asking_is_allowed() {
        let mut app = playing_app();
        type_text(&mut app, "Is it red?");
        sent(&key(&mut app, KeyCode::Enter));

        key(&mut app, KeyCode::Tab);
        type_text(&mut app, "Apple");
        let request = sent(&key(&mut app, KeyCode::Enter));
        assert!(matches!(request, GameRequest::Guess { .. }));
    }

    #[test]
    fn test_incorrect_guess_opens_notice_that_swallows_keys() {
        let mut app = playing_app();
        guess(&mut app, "Banana", Ok(GuessOutcome::Incorrect));

        assert_eq!(app.tui.stage(), Stage::Playing);
        let Some(Overlay::Notice(notice)) = &app.overlay else {
            panic!("expected notice");
        };
        assert!(notice.message.contains("Banana"));

        key(&mut app, KeyCode::Char('x'));
        assert!(app.tui.answer.is_empty());
        assert!(app.overlay.is_some());

        key(&mut app, KeyCode::Enter);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_correct_guess_then_play_again() {
        let mut app = playing_app();
        guess(&mut app, "Banana", Ok(GuessOutcome::Correct));

        assert_eq!(app.tui.stage(), Stage::Finished);
        assert_eq!(app.tui.game.chosen_answer(), Some("Banana"));
        assert!(app.overlay.is_none());

        let request = sent(&key(&mut app, KeyCode::Enter));
        assert!(matches!(request, GameRequest::Start { .. }));
    }

    #[test]
    fn test_expired_session_returns_to_title_with_notice() {
        let mut app = playing_app();
        guess(
            &mut app,
            "Banana",
            Err(ApiError::http_status(400, r#"{"error":"Invalid session"}"#)),
        );

        assert_eq!(app.tui.stage(), Stage::Start);
        assert!(matches!(app.overlay, Some(Overlay::Notice(_))));
        assert_eq!(app.tui.focus, Focus::Question);
    }

    #[test]
    fn test_esc_returns_to_title_and_clears_fields() {
        let mut app = playing_app();
        type_text(&mut app, "Is it");
        key(&mut app, KeyCode::Esc);

        assert_eq!(app.tui.stage(), Stage::Start);
        assert!(app.tui.question.is_empty());
        assert!(app.tui.game.session().is_none());
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = playing_app();
        key(&mut app, KeyCode::Tab);
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("Dragon\nfruit".to_string())),
        );
        assert_eq!(app.tui.answer.text(), "Dragon fruit");
        assert!(app.tui.question.is_empty());
    }

    #[test]
    fn test_page_up_uses_measured_transcript() {
        let mut app = playing_app();
        for n in 0..10 {
            type_text(&mut app, &format!("Question {n}?"));
            let GameRequest::Ask { id, session, question } =
                sent(&key(&mut app, KeyCode::Enter))
            else {
                panic!("expected ask");
            };
            update(
                &mut app,
                UiEvent::Game(GameResponse::Answered {
                    id,
                    session,
                    question,
                    result: Ok(Some("No".to_string())),
                }),
            );
        }
        update(
            &mut app,
            UiEvent::Frame {
                width: 80,
                height: 24,
            },
        );
        // 10 exchanges, 2 lines each, 9 separators.
        assert_eq!(app.tui.scroll.cached_line_count, 29);
        assert_eq!(app.tui.transcript_height, 14);

        key(&mut app, KeyCode::PageUp);
        assert_eq!(app.tui.scroll.mode, ScrollMode::Anchored { offset: 1 });
    }

    #[test]
    fn test_tick_spins_only_while_busy() {
        let mut app = app();
        update(&mut app, UiEvent::Tick);
        assert_eq!(app.tui.spinner_frame, 0);

        key(&mut app, KeyCode::Enter);
        update(&mut app, UiEvent::Tick);
        assert_eq!(app.tui.spinner_frame, 1);
    }

    #[test]
    fn test_idle_tick_needs_no_redraw() {
        let mut app = app();
        assert!(!needs_redraw(&app, &UiEvent::Tick));
        assert!(!needs_redraw(&app, &UiEvent::Frame { width: 80, height: 24 }));

        key(&mut app, KeyCode::Enter);
        assert!(app.tui.game.is_busy());
        assert!(needs_redraw(&app, &UiEvent::Tick));
    }
}
