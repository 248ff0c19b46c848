//! `fable tabs` command implementations.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use fable_config::{CliSettings, Config};
use fable_content::Language;
use fable_widget::{AppliedResult, ContentOrigin, LoadState, Widget};

use super::context;
use crate::error::CliError;
use crate::output::Output;

/// Options shared by all tab commands.
#[derive(Args)]
pub(crate) struct WidgetArgs {
    /// Widget instance identifier (overrides config).
    #[arg(long)]
    widget: Option<String>,

    /// Directory holding persisted widget state (overrides config).
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Serve generated demo content instead of documents.
    #[arg(long)]
    mock: bool,
}

impl WidgetArgs {
    fn load_config(self, config_path: Option<&Path>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            widget_id: self.widget,
            state_dir: self.state_dir,
            mock: self.mock.then_some(true),
            ..Default::default()
        };
        Ok(Config::load(config_path, Some(&cli_settings))?)
    }
}

/// Tab language assignment commands.
#[derive(Subcommand)]
pub(crate) enum TabsCommand {
    /// Show tab assignments and available languages.
    Show {
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Assign a language to a tab and load its content.
    Set {
        /// Tab identifier.
        tab: String,
        /// Language code.
        lang: Language,
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Remove a tab's language.
    Clear {
        /// Tab identifier.
        tab: String,
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Make a tab the active one, loading it if needed.
    Activate {
        /// Tab identifier.
        tab: String,
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Reload a tab's content.
    Retry {
        /// Tab identifier.
        tab: String,
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Save the current assignments as the default for new widgets.
    SaveDefault {
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Replace the current assignments with the saved default.
    Load {
        #[command(flatten)]
        widget: WidgetArgs,
    },
}

impl TabsCommand {
    /// Execute the tabs command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or a tab is unknown.
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        match self {
            Self::Show { widget } => {
                let widget = open(widget, config_path)?;
                print_tabs(&output, &widget);
            }
            Self::Set { tab, lang, widget } => {
                let widget = open(widget, config_path)?;
                match widget.change_language(&tab, Some(lang)).await? {
                    AppliedResult::Applied => {
                        output.success(&format!("Tab {tab} now shows {}", lang.display_name()));
                        print_state(&output, &tab, &widget.state(&tab));
                    }
                    AppliedResult::Rejected(conflict) => {
                        output.warning(&format!(
                            "{} is already shown by tab {}",
                            conflict.language.display_name(),
                            conflict.tab
                        ));
                        let available: Vec<_> = widget
                            .available_languages_for(&tab)
                            .into_iter()
                            .map(Language::code)
                            .collect();
                        output.info(&format!("Available for tab {tab}: {}", available.join(", ")));
                        return Err(CliError::Validation("language already in use".to_owned()));
                    }
                }
            }
            Self::Clear { tab, widget } => {
                let widget = open(widget, config_path)?;
                widget.change_language(&tab, None).await?;
                output.success(&format!("Tab {tab} cleared"));
            }
            Self::Activate { tab, widget } => {
                let widget = open(widget, config_path)?;
                widget.select_tab(&tab).await?;
                output.success(&format!("Tab {tab} is now active"));
                print_state(&output, &tab, &widget.state(&tab));
            }
            Self::Retry { tab, widget } => {
                let widget = open(widget, config_path)?;
                widget.retry(&tab).await?;
                print_state(&output, &tab, &widget.state(&tab));
            }
            Self::SaveDefault { widget } => {
                let widget = open(widget, config_path)?;
                widget.save_as_default();
                output.success("Saved current assignments as default");
            }
            Self::Load { widget } => {
                let widget = open(widget, config_path)?;
                if widget.seed_from_default() {
                    output.success("Loaded default assignments");
                    print_tabs(&output, &widget);
                    if widget.load_active().await.is_some() {
                        let active = widget.active_tab();
                        print_state(&output, &active, &widget.state(&active));
                    }
                } else {
                    output.warning("No default assignments saved");
                }
            }
        }
        Ok(())
    }
}

fn open(args: WidgetArgs, config_path: Option<&Path>) -> Result<Widget, CliError> {
    let config = args.load_config(config_path)?;
    context::widget(&config)
}

fn print_tabs(output: &Output, widget: &Widget) {
    let active = widget.active_tab();
    for tab in widget.tabs() {
        let marker = if tab == active { "*" } else { " " };
        let language = widget.language(&tab).map_or_else(
            || "(none)".to_owned(),
            |lang| format!("{} {}", lang.flag(), lang.display_name()),
        );
        output.info(&format!("{marker} {tab}: {language}"));

        let available: Vec<_> = widget
            .available_languages_for(&tab)
            .into_iter()
            .map(Language::code)
            .collect();
        output.detail(&format!("    available: {}", available.join(", ")));
    }
}

fn print_state(output: &Output, tab: &str, state: &LoadState) {
    match state {
        LoadState::Idle => output.detail(&format!("Tab {tab} has no content")),
        LoadState::Loading => output.detail(&format!("Tab {tab} is loading")),
        LoadState::Loaded(content) => {
            match &content.origin {
                ContentOrigin::Document { location, .. } => {
                    output.detail(&format!("Loaded {location}"));
                }
                ContentOrigin::Fallback => output.warning("No document found, placeholder shown"),
                ContentOrigin::Mock => output.detail("Generated demo content"),
            }
            output.document(&content.html);
        }
        LoadState::Failed(detail) => {
            output.error(&detail.message);
            output.info(&format!("Run `fable tabs retry {tab}` to try again"));
        }
    }
}
