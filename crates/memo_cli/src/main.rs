//! `memo` command-line client.
//!
//! # Responsibility
//! - Parse subcommands into board intents and print the rendered board.
//! - Own process concerns: configuration, logging bootstrap, exit codes.

mod config;
mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use config::{AppConfig, ConfigArgs};
use log::info;
use memo_core::db::open_db;
use memo_core::{
    EditorView, Intent, KvMemoRepository, MemoBoard, MemoId, MemoRepository, MemoStore, Outcome,
    SortKey, SqliteKeyValueStore,
};
use std::convert::Infallible;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "memo", version, about = "Keep short starred and sortable memos")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all memos.
    List {
        /// title|date|star; anything else keeps creation order.
        #[arg(long, default_value_t = SortKey::Date, value_parser = parse_sort_key)]
        sort: SortKey,
    },
    /// Write a new memo.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Change title and/or content of a memo.
    #[command(group(
        ArgGroup::new("changes")
            .required(true)
            .multiple(true)
            .args(["title", "content"])
    ))]
    Edit {
        /// Memo id or unique id prefix.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a memo.
    Delete {
        /// Memo id or unique id prefix.
        id: String,
    },
    /// Toggle the star on a memo.
    Star {
        /// Memo id or unique id prefix.
        id: String,
    },
}

fn parse_sort_key(value: &str) -> Result<SortKey, Infallible> {
    value.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = AppConfig::resolve(cli.config)?;
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory is not valid UTF-8: {}", log_dir.display()))?;
        memo_core::init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        memo_core::core_version()
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let kv = SqliteKeyValueStore::try_new(&conn)?;
    let store = MemoStore::load(KvMemoRepository::new(kv)).context("failed to load memos")?;
    let mut board = MemoBoard::new(store);
    execute(&mut board, cli.command)
}

/// Applies one command to the board and returns the text to print.
fn execute<R: MemoRepository>(board: &mut MemoBoard<R>, command: Command) -> Result<String> {
    let message = match command {
        Command::List { sort } => {
            board.dispatch(Intent::Sort(sort))?;
            return Ok(render::render_board(&board.render())?);
        }
        Command::Add { title, content } => {
            board.dispatch(Intent::ToggleComposer)?;
            expect_outcome(board.dispatch(Intent::Submit { title, content })?, "created")?
        }
        Command::Edit { id, title, content } => {
            let id = resolve_id(board, &id)?;
            board.dispatch(Intent::Edit(id))?;
            let (title, content) = match board.render().editor {
                EditorView::Open {
                    title: current_title,
                    content: current_content,
                    ..
                } => (
                    title.unwrap_or(current_title),
                    content.unwrap_or(current_content),
                ),
                EditorView::Closed => bail!("memo {id} not found"),
            };
            expect_outcome(board.dispatch(Intent::Submit { title, content })?, "updated")?
        }
        Command::Delete { id } => {
            let id = resolve_id(board, &id)?;
            expect_outcome(board.dispatch(Intent::Delete(id))?, "deleted")?
        }
        Command::Star { id } => {
            let id = resolve_id(board, &id)?;
            match board.dispatch(Intent::ToggleStar(id))? {
                Outcome::Starred { starred: true, .. } => format!("starred {id}"),
                Outcome::Starred { starred: false, .. } => format!("unstarred {id}"),
                Outcome::Ignored => bail!("memo {id} not found"),
                other => bail!("unexpected outcome {other:?}"),
            }
        }
    };
    Ok(format!("{message}\n"))
}

fn expect_outcome(outcome: Outcome, verb: &str) -> Result<String> {
    match outcome {
        Outcome::Created(id) | Outcome::Updated(id) | Outcome::Deleted(id) => {
            Ok(format!("{verb} {id}"))
        }
        Outcome::Ignored => bail!("memo not found"),
        other => bail!("unexpected outcome {other:?}"),
    }
}

/// Resolves a full id or a unique, case-insensitive id prefix.
fn resolve_id<R: MemoRepository>(board: &MemoBoard<R>, text: &str) -> Result<MemoId> {
    let needle = text.trim().to_ascii_lowercase();
    if let Ok(id) = Uuid::parse_str(&needle) {
        return Ok(id);
    }
    if needle.is_empty() {
        bail!("memo id cannot be empty");
    }

    let mut matches = board
        .store()
        .snapshot()
        .iter()
        .map(|memo| memo.id)
        .filter(|id| id.to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => bail!("no memo matches `{text}`"),
        (Some(_), Some(_)) => bail!("id prefix `{text}` matches several memos"),
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, resolve_id, Cli, Command};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use memo_core::{InMemoryKeyValueStore, KvMemoRepository, MemoBoard, MemoStore, SortKey};

    type TestBoard = MemoBoard<KvMemoRepository<InMemoryKeyValueStore>>;

    fn empty_board() -> TestBoard {
        let repo = KvMemoRepository::new(InMemoryKeyValueStore::new());
        MemoBoard::new(MemoStore::load(repo).unwrap())
    }

    fn run_on(board: &mut TestBoard, args: &[&str]) -> String {
        let argv = std::iter::once("memo").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(board, cli.command).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_sort_flag_falls_back_to_insertion_for_unknown_keys() {
        let cli = Cli::try_parse_from(["memo", "list", "--sort", "color"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                sort: SortKey::Insertion
            }
        ));

        let cli = Cli::try_parse_from(["memo", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { sort: SortKey::Date }));
    }

    #[test]
    fn add_then_list_prints_the_memo() {
        let mut board = empty_board();
        let output = run_on(&mut board, &["add", "--title", "groceries"]);
        assert!(output.starts_with("created "));

        let listing = run_on(&mut board, &["list"]);
        assert!(listing.contains("groceries"));
        assert_eq!(board.store().len(), 1);
    }

    #[test]
    fn edit_keeps_fields_that_were_not_passed() {
        let mut board = empty_board();
        run_on(&mut board, &["add", "--title", "draft", "--content", "body"]);
        let id = board.store().snapshot()[0].id.to_string();

        let output = run_on(&mut board, &["edit", &id[..6], "--title", "final"]);
        assert!(output.starts_with("updated "));
        let memo = &board.store().snapshot()[0];
        assert_eq!(memo.title, "final");
        assert_eq!(memo.content, "body");
    }

    #[test]
    fn edit_without_title_or_content_is_a_usage_error() {
        let err = Cli::try_parse_from(["memo", "edit", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["memo", "edit", "abc", "--content", "body"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Edit { title: None, content: Some(_), .. }
        ));
    }

    #[test]
    fn star_and_delete_report_their_effect() {
        let mut board = empty_board();
        run_on(&mut board, &["add", "--title", "x"]);
        let id = board.store().snapshot()[0].id.to_string();

        assert!(run_on(&mut board, &["star", &id]).starts_with("starred "));
        assert!(run_on(&mut board, &["star", &id]).starts_with("unstarred "));
        assert!(run_on(&mut board, &["delete", &id]).starts_with("deleted "));
        assert!(board.store().is_empty());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut board = empty_board();
        let err = resolve_id(&board, "abc").unwrap_err();
        assert!(err.to_string().contains("no memo matches"));

        let cli = Cli::try_parse_from([
            "memo",
            "delete",
            "11111111-2222-4333-8444-555555555555",
        ])
        .unwrap();
        let err = execute(&mut board, cli.command).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
