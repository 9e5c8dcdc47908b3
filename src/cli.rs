use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::report;
use crate::select;
use crate::tracker::Tracker;

#[derive(Debug, Parser)]
#[command(name = "pivotal-tools")]
#[command(about = "Generate READMEs and changelogs from delivered Pivotal Tracker stories")]
pub struct Cli {
    /// Tracker API base URL; overrides ~/.pivotal-tools/config.toml
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// 1-based position of the project in the picker list. Skips the prompt,
    /// which makes the output safe to pipe.
    #[arg(long = "project-index", value_name = "PI")]
    pub project_index: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List delivered and finished stories as a README
    #[command(name = "generate_readme", visible_aliases = ["generate-readme", "readme"])]
    GenerateReadme(ProjectArgs),
    /// List delivered and finished stories as changelog bullets
    #[command(name = "generate_changelog", visible_aliases = ["generate-changelog", "changelog"])]
    GenerateChangelog(ProjectArgs),
    /// Print the numbered project list used by --project-index
    #[command(name = "list_projects", visible_aliases = ["list-projects", "projects"])]
    ListProjects,
}

async fn resolve_project(tracker: &dyn Tracker, args: &ProjectArgs) -> Result<String> {
    match &args.project_index {
        Some(raw) => select::project_by_index(tracker, raw)
            .await
            .context("Yikes, that did not work"),
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            select::pick_project(tracker, &mut input, &mut output).await
        }
    }
}

/// Run one subcommand and return the text to print.
pub async fn run(tracker: &dyn Tracker, command: &Command) -> Result<String> {
    match command {
        Command::GenerateReadme(args) => {
            let project_id = resolve_project(tracker, args).await?;
            report::build_readme(tracker, &project_id)
                .await
                .context("Failed to generate README")
        }
        Command::GenerateChangelog(args) => {
            let project_id = resolve_project(tracker, args).await?;
            report::build_changelog(tracker, &project_id)
                .await
                .context("Failed to generate changelog")
        }
        Command::ListProjects => {
            let projects = tracker
                .list_projects()
                .await
                .context("Failed to list projects")?;
            let mut out = Vec::new();
            select::write_project_list(&projects, &mut out)?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        }
    }
}

/// A closed pipe is reported as an error, not a panic.
pub fn write_report<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pivotal-tools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn readme_with_index() {
        let cli = parse(&["generate_readme", "--project-index=2"]);
        match cli.command {
            Command::GenerateReadme(args) => assert_eq!(args.project_index.as_deref(), Some("2")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn changelog_without_index_prompts() {
        let cli = parse(&["generate_changelog"]);
        match cli.command {
            Command::GenerateChangelog(args) => assert!(args.project_index.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kebab_aliases() {
        assert!(matches!(
            parse(&["generate-readme"]).command,
            Command::GenerateReadme(_)
        ));
        assert!(matches!(
            parse(&["changelog", "--project-index", "1"]).command,
            Command::GenerateChangelog(_)
        ));
        assert!(matches!(parse(&["projects"]).command, Command::ListProjects));
    }

    #[test]
    fn global_base_url() {
        let cli = parse(&["generate_readme", "--base-url", "http://localhost:9000/v3"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/v3"));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["pivotal-tools"]).is_err());
        assert!(Cli::try_parse_from(["pivotal-tools", "publish"]).is_err());
    }

    #[test]
    fn report_is_written_verbatim() {
        let mut out = Vec::new();
        write_report(&mut out, "Changes Widget\n==============\n").unwrap();
        assert_eq!(out, b"Changes Widget\n==============\n");
    }

    #[test]
    fn broken_pipe_is_an_error() {
        let err = write_report(&mut ClosedPipe, "README Widget\n").unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }
}
