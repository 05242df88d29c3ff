//! CLI entry point for eventscout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::types::SurveyAnswers;

/// Event discovery assistant
#[derive(Parser, Debug)]
#[command(name = "eventscout", version, about = "Conversational event discovery")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the event assistant
    Chat(ChatArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Model to use (format: provider:model, e.g., openai:gpt-4o-mini)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Your name
    #[arg(long)]
    pub name: Option<String>,

    /// An interest; repeat for several
    #[arg(short, long = "interest")]
    pub interests: Vec<String>,

    /// Preferred setting (e.g. indoor, outdoor)
    #[arg(long)]
    pub location_preference: Option<String>,

    /// Budget tier (e.g. low, medium, high)
    #[arg(short, long)]
    pub budget: Option<String>,

    /// User prompt (positional). Reads lines from stdin when omitted.
    pub prompt: Option<String>,
}

impl ChatArgs {
    /// Survey answers given on the command line, if any.
    pub fn survey(&self) -> Option<SurveyAnswers> {
        let answered = self.name.is_some()
            || !self.interests.is_empty()
            || self.location_preference.is_some()
            || self.budget.is_some();
        answered.then(|| SurveyAnswers {
            name: self.name.clone(),
            interests: (!self.interests.is_empty()).then(|| self.interests.clone()),
            location_preference: self.location_preference.clone(),
            budget_range: self.budget.clone(),
        })
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn chat(args: &[&str]) -> ChatArgs {
        let argv = ["eventscout", "chat"].iter().chain(args).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Chat(args) => args,
        }
    }

    #[test]
    fn parse_chat_with_defaults() {
        let args = chat(&[]);
        assert!(args.model.is_none());
        assert!(args.interests.is_empty());
        assert!(args.prompt.is_none());
        assert!(args.survey().is_none());
    }

    #[test]
    fn parse_chat_with_profile_flags() {
        let args = chat(&[
            "-m",
            "openai:gpt-4o",
            "--name",
            "Sam",
            "-i",
            "music",
            "--interest",
            "food",
            "--location-preference",
            "outdoor",
            "-b",
            "low",
            "Find me concerts in New York",
        ]);
        assert_eq!(args.model.as_deref(), Some("openai:gpt-4o"));
        assert_eq!(args.prompt.as_deref(), Some("Find me concerts in New York"));

        let survey = args.survey().unwrap();
        assert_eq!(survey.name.as_deref(), Some("Sam"));
        assert_eq!(
            survey.interests,
            Some(vec!["music".to_string(), "food".to_string()])
        );
        assert_eq!(survey.location_preference.as_deref(), Some("outdoor"));
        assert_eq!(survey.budget_range.as_deref(), Some("low"));
    }

    #[test]
    fn global_config_flag_is_accepted_after_subcommand() {
        let cli =
            Cli::try_parse_from(["eventscout", "chat", "--config", "/tmp/scout.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/scout.toml")));
    }

    #[test]
    fn session_flag_is_not_accepted() {
        // history lives in process memory, so an id cannot outlive the run
        assert!(Cli::try_parse_from(["eventscout", "chat", "--session", "s1", "hi"]).is_err());
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["eventscout"]).is_err());
    }
}
