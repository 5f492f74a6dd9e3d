use chrono::Local;
use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use vocab_flashcards::{
    AdapterIoError, AnswerBuffer, AppConfig, AudioChannel, AudioRequest, Catalog, CommandBackend,
    CommandRecognizer, Effect, KeyOutcome, NoRecognizer, Recognizer, Screen, SessionContext,
    SessionState, check_pronunciation, handle_action, logger, map_key, session, spawn_audio_worker,
    ui,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

struct App<'a> {
    catalog: &'a Catalog,
    config: &'a AppConfig,
    audio: AudioChannel,
    audio_failures: Receiver<AdapterIoError>,
    recognizer: Box<dyn Recognizer>,
    state: SessionState,
    buffer: AnswerBuffer,
    review_cursor: usize,
    notice: Option<String>,
    confirm_quit: bool,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::resolve(&args);
    logger::init(&config.log_file);
    logger::log(&format!("Starting with words file {}", config.words_file.display()));

    let catalog = match Catalog::load(&config.words_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            logger::log(&format!("Failed to load catalog: {}", e));
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let backend = CommandBackend {
        speech_command: config.speech_command.clone(),
        slow_args: config.speech_slow_args.clone(),
        cue_dir: config.cue_dir.clone(),
        cue_player: config.cue_player.clone(),
    };
    let (audio, audio_failures, audio_worker) = spawn_audio_worker(Box::new(backend))?;
    let recognizer: Box<dyn Recognizer> = match &config.recognizer_command {
        Some(command) => Box::new(CommandRecognizer::new(command.clone())),
        None => Box::new(NoRecognizer),
    };

    let mut app = App {
        catalog: &catalog,
        config: &config,
        audio,
        audio_failures,
        recognizer,
        state: SessionState::new(Local::now().date_naive()),
        buffer: AnswerBuffer::default(),
        review_cursor: 0,
        notice: None,
        confirm_quit: false,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Closing the channel lets the worker finish whatever is still queued.
    drop(app);
    if audio_worker.join().is_err() {
        logger::log("Audio worker panicked");
    }
    logger::log("Session closed");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let catalog = app.catalog;
    let config = app.config;

    loop {
        let ctx = SessionContext::new(catalog, &config.session, Local::now().date_naive());
        if let Some(failure) = app.audio_failures.try_iter().last() {
            app.notice = Some(format!("Audio unavailable: {}", failure));
        }
        draw(terminal, app, &ctx)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }
        if app.confirm_quit {
            match key.code {
                KeyCode::Char('y') => break,
                KeyCode::Char('n') | KeyCode::Esc => app.confirm_quit = false,
                _ => {}
            }
            continue;
        }

        app.notice = None;
        let status = session::status(&app.state, &ctx);
        let current = session::current_item(&app.state, &ctx);
        let outcome = map_key(
            &app.state,
            status,
            ctx.catalog,
            &mut app.buffer,
            &mut app.review_cursor,
            key,
        );

        match outcome {
            KeyOutcome::Action(action) => {
                let before = app.state.mode;
                let effects = handle_action(&mut app.state, action, &ctx, &mut rng);
                if app.state.mode != before {
                    app.buffer.clear();
                    app.review_cursor = 0;
                }
                app.notice = effect_notice(&effects);
                if let Err(e) = app.audio.play_effects(&effects) {
                    app.notice = Some(format!("Audio unavailable: {}", e));
                }
            }
            KeyOutcome::Speak(request) => {
                if let Err(e) = app.audio.request(AudioRequest::Speak(request)) {
                    app.notice = Some(format!("Audio unavailable: {}", e));
                }
            }
            KeyOutcome::Pronounce => {
                if let Some(item) = current {
                    app.notice = Some(format!("Listening... say \"{}\"", item.word));
                    draw(terminal, app, &ctx)?;
                    let outcome = check_pronunciation(app.recognizer.as_ref(), &item.word);
                    app.notice = Some(outcome.message());
                }
            }
            KeyOutcome::RequestQuit => app.confirm_quit = true,
            KeyOutcome::None => {}
        }
    }
    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App, ctx: &SessionContext) -> io::Result<()> {
    let status = session::status(&app.state, ctx);
    terminal.draw(|f| {
        if app.confirm_quit {
            ui::draw_quit_confirmation(f);
        } else {
            let screen = Screen {
                state: &app.state,
                ctx,
                status,
                buffer: &app.buffer,
                review_cursor: app.review_cursor,
                notice: app.notice.as_deref(),
            };
            ui::draw(f, &screen);
        }
    })?;
    Ok(())
}

/// Celebrations worth a line in the status bar; sounds are handled by the audio worker.
fn effect_notice(effects: &[Effect]) -> Option<String> {
    let mut parts = Vec::new();
    for effect in effects {
        match effect {
            Effect::DailyGoalReached => parts.push("Daily goal reached!".to_string()),
            Effect::AchievementUnlocked(achievement) => {
                parts.push(format!("Achievement unlocked: {}", achievement.title()))
            }
            Effect::Speak(_) | Effect::Cue(_) => {}
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("  "))
    }
}
