//! Console host for the todo widget.
//!
//! Reads one command per line from stdin, turns it into widget actions and
//! redraws the widget whenever a timer commits. Logs go to stderr so they do
//! not interleave with the drawing.

use anyhow::Context;
use std::sync::Arc;
use todo_core::environment::SystemClock;
use todo_runtime::{Store, metrics::MetricsRecorder};
use todo_widget::{
    Command, TodoAction, TodoEnvironment, TodoReducer, TodoState, WidgetConfig, WidgetView,
    command::HELP, render_text,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type WidgetStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

async fn draw(store: &WidgetStore, config: &WidgetConfig) {
    let text = store
        .state(|state| render_text(&WidgetView::build(state, config)))
        .await;
    println!("{text}");
}

async fn draw_json(store: &WidgetStore, config: &WidgetConfig) -> anyhow::Result<()> {
    let json = store
        .state(|state| WidgetView::build(state, config).to_json())
        .await
        .context("serializing widget view")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_widget=info,todo_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WidgetConfig::from_env();
    config.validate()?;
    tracing::info!(
        commit_delay_ms = config.commit_delay_ms,
        toast_ms = config.toast_ms,
        "starting todo widget"
    );

    let mut recorder = MetricsRecorder::new();
    recorder.install()?;

    let env = TodoEnvironment::new(Arc::new(SystemClock), config.clone());
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    // Redraw whenever a timer feeds an action back
    let mut commits = store.subscribe_actions();
    let redraw = {
        let store = store.clone();
        let config = config.clone();
        tokio::spawn(async move {
            loop {
                match commits.recv().await {
                    Ok(_) => draw(&store, &config).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "redraw lagged");
                    },
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    println!("{HELP}\n");
    draw(&store, &config).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => draw(&store, &config).await,
            Command::Json => draw_json(&store, &config).await?,
            Command::Metrics => match recorder.render() {
                Some(text) => println!("{text}"),
                None => eprintln!("metrics recorder not installed by this process"),
            },
            command => {
                let actions = store.state(|state| command.actions(state)).await;
                match actions {
                    Ok(actions) => {
                        for action in actions {
                            store.send(action).await?;
                        }
                        draw(&store, &config).await;
                    },
                    Err(error) => eprintln!("{error}"),
                }
            },
        }
    }

    store.send(TodoAction::Teardown).await?;
    store.shutdown(store.config().shutdown_timeout).await?;
    redraw.abort();
    Ok(())
}
