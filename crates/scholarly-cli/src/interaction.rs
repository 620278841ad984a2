//! Console output and prompts.
//!
//! Commands never print directly; they go through [`UserInteraction`] so the
//! same code path serves interactive use and `--accept-defaults` runs.

use console::Term;
use dialoguer::{Confirm, Input};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Continuation line for tree structure
pub static CONTINUE_PREFIX: &str = "│  ";
/// Branch character for an item that has a sibling below it
pub static ITEM_PREFIX: &str = "├─";
/// Branch character for the last item of a tree
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Bullet for list entries
pub static BULLET: &str = "•";

/// Something a command wants shown to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Every field of one paper
  Paper(&'a PaperSummary),
  /// A compact listing, authors cut after `author_limit` names
  Papers {
    /// The papers, in listing order
    papers:       &'a [PaperSummary],
    /// Authors shown before "et al."
    author_limit: usize,
  },
  /// Papers as a JSON array on stdout
  Json(&'a [PaperSummary]),
  /// A completed action
  Success(&'a str),
  /// A failed command
  Error(ScholarlyCliError),
  /// Anything else worth saying
  Info(&'a str),
}

/// How commands talk to whoever is running them.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for a line of text, which may be empty.
  fn prompt(&self, message: &str) -> Result<String>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(Confirm::new().with_prompt(format!("{PROMPT_PREFIX}{message}")).default(false).interact()?)
  }

  fn prompt(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{PROMPT_PREFIX}{message}"))
        .allow_empty(true)
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    let out = Term::stdout();
    match content {
      ResponseContent::Paper(paper) => {
        out.write_line(&format!("\n{} {}", style(BULLET).cyan(), style(&paper.title).bold()))?;
        for line in paper_details(paper) {
          out.write_line(&format!("   {line}"))?;
        }
      },
      ResponseContent::Papers { papers, author_limit } =>
        for (i, paper) in papers.iter().enumerate() {
          let branch = if i + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          let trunk = if i + 1 == papers.len() { "   " } else { CONTINUE_PREFIX };
          out.write_line(&format!(
            "{} {} {}",
            style(branch).dim(),
            style(&paper.title).bold(),
            style(format!("({})", paper.arxiv_id())).dim()
          ))?;
          out.write_line(&format!(
            "{}  {}",
            style(trunk).dim(),
            style(paper.display_authors(author_limit)).white()
          ))?;
        },
      ResponseContent::Json(papers) => out.write_line(&serde_json::to_string_pretty(papers)?)?,
      ResponseContent::Success(message) =>
        out.write_line(&format!("{} {}", style(SUCCESS_PREFIX).green(), message))?,
      ResponseContent::Error(error) =>
        Term::stderr().write_line(&format!("{} {}", style(ERROR_PREFIX).red(), error))?,
      ResponseContent::Info(message) =>
        out.write_line(&format!("{} {}", style(INFO_PREFIX).blue(), message))?,
    }
    Ok(())
  }
}

/// The labelled lines printed under a paper's title in the detailed view.
fn paper_details(paper: &PaperSummary) -> Vec<String> {
  let mut lines = vec![
    format!("{} {}", style("Authors:").blue(), paper.authors.join(", ")),
    format!("{} {}", style("arXiv:").blue(), paper.arxiv_id()),
  ];
  if let Some(published) = paper.published {
    lines.push(format!("{} {}", style("Published:").blue(), published.format("%Y-%m-%d")));
  }
  if let Some(category) = &paper.primary_category {
    lines.push(format!("{} {}", style("Category:").blue(), category));
  }
  lines.push(format!("{} {}", style("Link:").blue(), style(&paper.link).cyan()));
  if let Some(pdf) = &paper.pdf_url {
    lines.push(format!("{} {}", style("PDF:").blue(), style(pdf).cyan()));
  }
  let abstract_text = normalize_whitespace(&paper.abstract_text);
  lines.push(format!("{} {}", style("Abstract:").blue(), abstract_text));
  lines
}
