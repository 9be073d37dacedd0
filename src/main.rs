use crossterm::style::Stylize;
use reedline::{
    default_emacs_keybindings, Emacs, FileBackedHistory, Prompt, PromptEditMode,
    PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};
use std::{borrow::Cow, io};

use hello_cli::api_client::{name_or_default, ApiClient, GreetingSource};
use hello_cli::config::config::Config;
use hello_cli::utils::app_paths::AppPaths;

struct HelloPrompt;

impl Prompt for HelloPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("hello> ")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

fn print_help() {
    println!(
        "{}",
        "Hello CLI - terminal client for the hello API".blue().bold()
    );
    println!();
    println!("{}", "Usage:".yellow());
    println!("  hello-cli [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {} - Generate config file with defaults",
        "--generate-config".green()
    );
    println!("  {}          - Use classic prompt mode", "--classic".green());
    println!("  {}             - Show this help", "--help".green());
    println!();
    println!("{}", "Environment:".yellow());
    println!(
        "  {} - Greeting server base URL (default http://localhost:5000)",
        "HELLO_API_URL".green()
    );
    println!();
    println!("{}", "Keys:".yellow());
    println!("  {}   - Send the name to the server", "Enter".green());
    println!("  {} - Recall previous names (TUI)", "Up/Down".green());
    println!("  {}     - Exit the TUI", "Esc".green());
    println!("  {}  - Exit classic mode", "Ctrl+D".green());
    println!();
}

fn main() -> io::Result<()> {
    hello_cli::utils::logging::init_tracing();

    if let Some(log_path) = hello_cli::utils::logging::log_path() {
        eprintln!("Logs: {}", log_path.display());
    }

    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        match Config::get_config_path() {
            Ok(path) => {
                let config_content = Config::create_default_with_comments();
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Error creating config directory: {}", e);
                        std::process::exit(1);
                    }
                }
                if let Err(e) = std::fs::write(&path, config_content) {
                    eprintln!("Error writing config file: {}", e);
                    std::process::exit(1);
                }
                println!("Configuration file created at: {:?}", path);
                println!("Edit this file to customize hello-cli.");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error determining config path: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Config error ({}), using defaults", e);
        Config::default()
    });

    let api_url =
        std::env::var("HELLO_API_URL").unwrap_or_else(|_| config.server.base_url.clone());

    if args.contains(&"--classic".to_string()) {
        return run_classic(&config, &api_url);
    }

    if let Err(e) = hello_cli::ui::tui_app::run_tui_app(config, &api_url) {
        eprintln!("TUI Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

// Classic mode (line-oriented interface)
fn run_classic(config: &Config, api_url: &str) -> io::Result<()> {
    print_help();

    let history_file = AppPaths::data_dir()
        .map(|dir| dir.join("classic_history.txt"))
        .unwrap_or_else(|_| std::path::PathBuf::from(".hello_cli_history"));
    let history = Box::new(
        FileBackedHistory::with_file(50, history_file).expect("Error configuring history"),
    );

    let keybindings = default_emacs_keybindings();
    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_history(history)
        .with_edit_mode(edit_mode);

    let prompt = HelloPrompt;

    let api_client = ApiClient::new(api_url);
    println!("{}", format!("Connected to API: {}", api_url).cyan());

    loop {
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                if buffer.trim() == "\\help" {
                    print_help();
                    continue;
                }

                let name = name_or_default(&buffer, &config.behavior.default_name);
                match api_client.greet(&name) {
                    Ok(response) => {
                        println!("{}", "Response:".bold());
                        println!("{}", response.message.clone().green());
                        println!("{}", format!("Status: {}", response.status).green().italic());
                    }
                    Err(e) => eprintln!("{}", format!("Error: {:#}", e).red()),
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    Ok(())
}
