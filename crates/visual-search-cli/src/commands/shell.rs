//! Interactive session command.
//!
//! Reads one command per line from stdin and applies it to a single
//! [`SearchSession`]. Blank lines and lines starting with `#` are ignored,
//! so a scripted session can be piped in from a file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error};
use visual_search_core::{BaseColour, Category, Config, Gender, SearchSession};

use super::{read_probe_file, EXIT_ERROR, EXIT_SUCCESS};
use crate::output;

const HELP: &str = "\
commands:
  file PATH          select an image file (disabled while a URL is entered)
  remove-file        drop the selected file
  url TEXT           enter an image URL (blank clears; disabled while a file is selected)
  gender G|all       Men, Women, Unisex
  colour C|all       Black, White, Blue, Red, Green, Grey, Navy Blue, Orange, Purple
  category K|all     Apparel, Accessories, Footwear, Sporting Goods
  similarity N       minimum similarity percentage, 0-100
  apply              apply filters to the cached results
  search             run the search
  show               print the session
  clear              reset the session
  help               print this list
  quit               exit";

/// Arguments for the shell command.
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Print the session as JSON for `show`
    #[arg(long)]
    pub json: bool,
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    File(PathBuf),
    RemoveFile,
    Url(String),
    Gender(Option<Gender>),
    Colour(Option<BaseColour>),
    Category(Option<Category>),
    Similarity(u8),
    Apply,
    Search,
    Show,
    Clear,
    Help,
    Quit,
}

fn facet<T: std::str::FromStr>(arg: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    arg.parse().map(Some).map_err(|e: T::Err| e.to_string())
}

impl ShellCommand {
    /// Parse a line. Returns `Ok(None)` for blank and comment lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "file" if arg.is_empty() => return Err("usage: file PATH".to_string()),
            "file" => ShellCommand::File(PathBuf::from(arg)),
            "remove-file" => ShellCommand::RemoveFile,
            "url" => ShellCommand::Url(arg.to_string()),
            "gender" => ShellCommand::Gender(facet(arg)?),
            "colour" | "color" => ShellCommand::Colour(facet(arg)?),
            "category" => ShellCommand::Category(facet(arg)?),
            "similarity" => {
                let pct: u8 = arg
                    .trim_end_matches('%')
                    .parse()
                    .map_err(|_| format!("similarity must be a number from 0 to 100, got '{}'", arg))?;
                if pct > 100 {
                    return Err(format!("similarity must be between 0 and 100, got {}", pct));
                }
                ShellCommand::Similarity(pct)
            }
            "apply" => ShellCommand::Apply,
            "search" => ShellCommand::Search,
            "show" => ShellCommand::Show,
            "clear" => ShellCommand::Clear,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Handle the shell command.
pub async fn handle_shell(args: ShellArgs, config: &Config) -> i32 {
    let mut session = match SearchSession::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to create search client: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };
    eprintln!("visual-search shell, session {} (type 'help')", session.id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                eprintln!("Error: {}", e);
                return EXIT_ERROR;
            }
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("! {}", message);
                continue;
            }
        };
        debug!(?command, "Shell command");

        match execute(&mut session, command, args.json).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => println!("! {:#}", e),
        }
    }

    EXIT_SUCCESS
}

async fn execute(session: &mut SearchSession, command: ShellCommand, json: bool) -> Result<Flow> {
    let mut criteria = session.criteria().clone();

    match command {
        ShellCommand::File(path) => {
            let file = read_probe_file(&path).await?;
            session.set_file(file)?;
            println!("file selected: {}", path.display());
        }
        ShellCommand::RemoveFile => {
            session.remove_file();
            println!("file removed");
        }
        ShellCommand::Url(text) => {
            session.set_url(&text)?;
            if text.trim().is_empty() {
                println!("url cleared");
            } else {
                println!("url set");
            }
        }
        ShellCommand::Gender(gender) => {
            criteria.gender = gender;
            session.set_criteria(criteria);
        }
        ShellCommand::Colour(colour) => {
            criteria.base_colour = colour;
            session.set_criteria(criteria);
        }
        ShellCommand::Category(category) => {
            criteria.category = category;
            session.set_criteria(criteria);
        }
        ShellCommand::Similarity(pct) => {
            session.set_criteria(criteria.with_similarity_pct(pct)?);
        }
        ShellCommand::Apply => {
            let matched = session.apply_filters()?;
            println!("{} matching, {} shown", matched, session.displayed_results().len());
            if let Some(message) = session.error_message() {
                println!("! {}", message);
            }
        }
        ShellCommand::Search => {
            println!("searching...");
            session.submit().await?;
            println!(
                "{} results cached, {} shown",
                session.raw_results().len(),
                session.displayed_results().len()
            );
        }
        ShellCommand::Show => {
            if json {
                output::print_json(&session.view())?;
            } else {
                output::print_session(session);
            }
        }
        ShellCommand::Clear => {
            session.clear();
            println!("session cleared");
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
