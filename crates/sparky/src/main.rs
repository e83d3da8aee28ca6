//! A terminal front end for the chat widget.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use sparky::AppConfig;
use sparky::core::ChatWidgetBuilder;
use sparky::core::view::ViewModel;
use sparky::render::TerminalRenderer;
use sparky::transport::HttpTransport;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    debug!("loaded config: {config:?}");
    if config.cookies.is_none() {
        warn!("SPARKY_COOKIES is not set, requests carry no CSRF token");
    }

    let transport = HttpTransport::new(config.transport_config());
    let (scroll_tx, mut scroll_rx) = mpsc::unbounded_channel();

    let mut builder = ChatWidgetBuilder::with_transport(transport)
        .with_labels(config.labels())
        .on_scroll(move |req| {
            scroll_tx.send(req).ok();
        });
    if let Some(greeting) = &config.greeting {
        builder = builder.with_greeting(greeting.clone());
    }
    let widget = builder.build();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut renderer = TerminalRenderer::from_env();
    println!("{}", renderer.title(&widget.view().await));

    let mut lines = io::BufReader::new(io::stdin()).lines();
    let mut progress_bar: Option<ProgressBar> = None;
    let mut input_disabled = false;

    loop {
        select! {
            req = scroll_rx.recv() => {
                let Some(req) = req else {
                    break;
                };
                let view = widget.view().await;

                // Finish the progress bar before printing anything else.
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                for line in renderer.reveal(&view, req) {
                    println!("{line}");
                }

                // A newer row is waiting for its own scroll request, so
                // the prompt or spinner would land in front of it.
                if !renderer.is_caught_up(&view) {
                    continue;
                }

                input_disabled = view.input.disabled;
                if input_disabled {
                    let bar = ProgressBar::new_spinner();
                    bar.set_style(progress_style.clone());
                    bar.set_message(view.input.placeholder.clone());
                    bar.enable_steady_tick(Duration::from_millis(100));
                    progress_bar = Some(bar);
                } else {
                    prompt(&renderer, &view);
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        error!("error reading input: {}", err);
                        break;
                    }
                };
                if input_disabled {
                    debug!("input is disabled, dropping: {line:?}");
                    continue;
                }

                widget.submit(line);
                let view = widget.view().await;
                if !view.input.disabled {
                    // Nothing was sent, ask again.
                    prompt(&renderer, &view);
                }
            }
        }
    }

    if let Some(progress_bar) = progress_bar {
        progress_bar.finish_and_clear();
    }
}

fn prompt(renderer: &TerminalRenderer, view: &ViewModel) {
    println!("{}", renderer.hint(&view.input, &view.send_button.label));
    print!("> ");
    std::io::stdout().flush().ok();
}
