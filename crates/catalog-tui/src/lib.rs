pub mod action;
pub mod app;
mod render;
pub mod rows;

use std::sync::Arc;

use catalog::CharacterSource;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};

use crate::action::{Action, AppCommand};
use crate::app::App;

/// Launch the interactive TUI. Returns when the user quits.
///
/// The catalog is fetched in the background; the UI shows a loading state
/// until it arrives.
pub async fn run(source: Arc<dyn CharacterSource>, page_size: usize) -> anyhow::Result<()> {
    let label = source.label().to_owned();

    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, source, label, page_size).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(DisableMouseCapture)?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    source: Arc<dyn CharacterSource>,
    label: String,
    page_size: usize,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let mut app = App::new(label, page_size);

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(32);
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(Duration::from_millis(250));

    if let AppCommand::FetchAll = app.request_fetch() {
        spawn_fetch(&source, &action_tx);
    }

    loop {
        // Compute layout geometry for mouse hit testing before render.
        let size = terminal.size()?;
        let frame_rect = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        app.layout_geometry = render::compute_layout(frame_rect, &app);
        app.list_scroll_offset = render::list_scroll_offset(&app);
        app.filter_scroll_offset = render::filter_scroll_offset(&app);

        terminal.draw(|frame| render::render(frame, &app))?;

        // Wait for next event.
        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Only key presses (not release/repeat) and mouse events.
                        match &event {
                            Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                            Event::Key(_) | Event::Mouse(_) => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal event error");
                        continue;
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            _ = tick_interval.tick() => {
                app.tick();
                AppCommand::None
            }
        };

        // Execute side effects.
        match command {
            AppCommand::None => {}
            AppCommand::Quit => break,
            AppCommand::FetchAll => spawn_fetch(&source, &action_tx),
        }
    }

    Ok(())
}

/// Fetch the catalog on a background task and report back through the action channel.
fn spawn_fetch(source: &Arc<dyn CharacterSource>, tx: &mpsc::Sender<Action>) {
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch_all().await;
        let _ = tx.send(Action::CatalogLoaded(result)).await;
    });
}
