mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::adapter::StdFileSystem;
use common::config::load_config;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::ChatCommand;
use std::process;
use wiring::wire_chat;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run(args: &[String]) -> Result<i32, Error> {
    let config = match parse_args(args)? {
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Config(config) => config,
    };

    if config.help {
        print_help();
        return Ok(0);
    }

    let app_config = load_config(&StdFileSystem, config.config_path.as_deref())?;
    let app_config = cli::apply_overrides(app_config, &config)?;
    let cmd = config_to_command(&config);

    let app = wire_chat(app_config, config.verbose)?;
    let _ = app.log.log(
        &LogRecord::new(LogLevel::Info, "command started")
            .layer("cli")
            .kind("lifecycle")
            .field("command", serde_json::json!(command_label(&cmd))),
    );

    let code = dispatch(&app, cmd, &config)?;

    let _ = app.log.log(
        &LogRecord::new(LogLevel::Info, "command finished")
            .layer("cli")
            .kind("lifecycle")
            .field("exit_code", serde_json::json!(code)),
    );
    Ok(code)
}

fn dispatch(app: &wiring::App, cmd: ChatCommand, config: &Config) -> Result<i32, Error> {
    match cmd {
        ChatCommand::List => app.session.list(),
        ChatCommand::Replay(index) => app.session.replay(index),
        ChatCommand::Clear => app.session.clear(config.yes),
        ChatCommand::Interactive => app.session.run_interactive(),
        ChatCommand::Send(message) => app.session.run_send(&message),
    }
}

fn command_label(cmd: &ChatCommand) -> &'static str {
    match cmd {
        ChatCommand::List => "list",
        ChatCommand::Replay(_) => "replay",
        ChatCommand::Clear => "clear",
        ChatCommand::Interactive => "interactive",
        ChatCommand::Send(_) => "send",
    }
}

fn print_help() {
    println!("Usage: chat [options] [message...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -l, --list                 List saved conversation summaries");
    println!("      --replay <n>           Replay saved turns up to index <n>");
    println!("      --clear                Clear all conversation history (asks first)");
    println!("  -y, --yes                  Skip the confirmation prompt");
    println!("  -c, --config <path>        Path to config.json");
    println!("  -m, --model <model>        Model name. Default: gemini-2.5-flash");
    println!("  -t, --transport <kind>     Transport (direct, proxy, echo). Default: direct");
    println!("      --base-url <url>       Relay base URL for the proxy transport");
    println!("  -k, --history-pairs <n>    Turns of history to send. Default: 20");
    println!("      --completion <shell>   Generate shell completions");
    println!("  -v, --verbose              Verbose diagnostics on stderr");
    println!();
    println!("Description:");
    println!("  Send a message to the model and keep the conversation across runs.");
    println!("  With no message, starts an interactive session (Ctrl-C or EOF quits).");
    println!();
    println!("Examples:");
    println!("  chat Hello, how are you?");
    println!("  chat -t proxy --base-url http://127.0.0.1:8787 \"What is Rust?\"");
    println!("  chat --list");
}
