//! Category CLI commands
//!
//! The whole tree is edited as indented text: `category show` prints it and
//! `category commit` replaces it.

use std::io::Read;
use std::path::PathBuf;

use clap::Subcommand;

use crate::controller::Controller;
use crate::display::{format_category_tree, format_reconcile_report};
use crate::error::{BookkeeperError, BookkeeperResult};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Print the category tree as editable text
    Show,

    /// List the names expenses can be filed under
    List,

    /// Replace the category tree with indented text
    Commit {
        /// File holding the tree text; stdin when omitted or "-"
        file: Option<PathBuf>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    controller: &Controller,
    cmd: CategoryCommands,
) -> BookkeeperResult<()> {
    match cmd {
        CategoryCommands::Show => {
            let snapshot = controller.refresh()?;
            print!("{}", format_category_tree(&snapshot.category_tree));
        }

        CategoryCommands::List => {
            for name in controller.refresh()?.category_names {
                println!("{}", name);
            }
        }

        CategoryCommands::Commit { file } => {
            let text = read_tree_text(file)?;
            let (report, _) = controller.on_category_commit(&text)?;
            print!("{}", format_reconcile_report(&report));
        }
    }

    Ok(())
}

fn read_tree_text(file: Option<PathBuf>) -> BookkeeperResult<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path).map_err(|e| {
            BookkeeperError::Io(format!("Failed to read {}: {}", path.display(), e))
        }),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
