/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use clap::Parser;
use curryfinder::cli::Cli;
use curryfinder::dispatcher::Dispatcher;
use curryfinder::getstate::GetState;
use curryfinder::http;
use curryfinder::input;
use curryfinder::report::{self, Reporter};
use curryfinder::useragent;
use log::{error, info};
use simple_logger::SimpleLogger;
use std::io;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    let user_agent = useragent::resolve_user_agent(cli.user_agent.as_deref());
    let config = Arc::new(cli.to_config(user_agent));

    info!(
        "{} {} starting on {} with UA {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.target(),
        config.user_agent()
    );

    let raw = match input::read_source(cli.file.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let entries = input::split_lines(&raw);

    let state = Arc::new(GetState::new());
    state.mark_start();

    let baseline = Arc::new(http::fetch_baseline(&config).await);
    state.set_baseline_bytes(baseline.len() as u64);
    info!("Baseline for {} captured: {} bytes", config.target(), baseline.len());

    let reporter = Arc::new(Reporter::new(
        io::stdout(),
        config.output_format(),
        config.show_samples(),
    ));
    let dispatcher = Dispatcher::new(Arc::clone(&config), reporter, Arc::clone(&state));
    dispatcher.run(baseline, &entries).await;

    state.mark_end();
    if !cli.suppress_stats {
        info!("{}", report::summary(&state, config.target(), !cli.no_color));
    }
}
