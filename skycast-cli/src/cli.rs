use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use log::debug;
use skycast_core::{
    Activity, ActivityError, Config, ScaleKind, Screen, TempScale, fetcher_from_config,
};
use std::sync::Arc;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather browser")]
pub struct Cli {
    /// Temperature scale: kelvin, celsius or fahrenheit.
    #[arg(long, short)]
    units: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store an API key and a preferred temperature scale.
    Configure,

    /// Search cities by name and print their current conditions.
    Search {
        /// City name, or a prefix of one.
        query: String,
    },

    /// Print the 7-day forecast for the best-matching city.
    Forecast {
        /// City name, or a prefix of one.
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        let fetcher = fetcher_from_config(&config);
        let fetcher = if self.command.is_none() {
            // Advisory download progress for the interactive session.
            fetcher.with_progress(Arc::new(|_done: u64, _total: Option<u64>| eprint!(".")))
        } else {
            fetcher
        };

        let mut activity = Activity::new(Box::new(fetcher));
        let scale = match &self.units {
            Some(units) => TempScale::try_from(units.as_str())?,
            None => config.temp_scale()?,
        };
        activity.set_temp_scale(scale);

        match self.command {
            Some(Command::Configure) => configure(config),
            Some(Command::Search { query }) => search(&mut activity, &query).await,
            Some(Command::Forecast { query }) => forecast(&mut activity, &query).await,
            None => interactive(activity).await,
        }
    }
}

/// Log the failure in full and hand the user the one generic message.
fn report(err: ActivityError) -> anyhow::Error {
    debug!("{err:?}");
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Text::new("API key (leave empty to keep the built-in one):")
        .prompt()
        .context("Configuration aborted")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let scale = Select::new("Temperature scale:", vec!["kelvin", "celsius", "fahrenheit"])
        .prompt()
        .context("Configuration aborted")?;
    config.set_temp_scale(TempScale::try_from(scale)?);

    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search(activity: &mut Activity, query: &str) -> anyhow::Result<()> {
    activity.search(query).await.map_err(report)?;

    if activity.results().is_empty() {
        println!("No cities matched '{query}'.");
    } else {
        print!("{}", render::results_table(activity.results(), activity.scales()));
    }
    Ok(())
}

async fn forecast(activity: &mut Activity, query: &str) -> anyhow::Result<()> {
    activity.search(query).await.map_err(report)?;

    let Some(first) = activity.results().first() else {
        println!("No cities matched '{query}'.");
        return Ok(());
    };
    let id = first.id;

    activity.select(id).map_err(report)?;
    activity.fetch_forecast().await.map_err(report)?;

    if let Some(record) = activity.selected() {
        println!("{}", render::current_conditions(record, activity.scales()));
    }
    print!("{}", render::forecast_table(activity.daily_forecast(), activity.scales()));
    Ok(())
}

/// Walk the search -> select -> forecast -> back loop until the user quits.
async fn interactive(mut activity: Activity) -> anyhow::Result<()> {
    println!(
        "Enter a city's name to get a list of the most proper cities in the world.\n\
         If you put a more precise name, you will get a more precise list.\n\
         Example - Lon or Lond or London. Press Esc to quit.\n"
    );

    loop {
        let query = match Text::new("City:").with_initial_value(activity.query()).prompt() {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let outcome = activity.search(&query).await;
        eprintln!();
        if let Err(err) = outcome {
            debug!("{err:?}");
            eprintln!("{}", err.user_message());
            continue;
        }
        if activity.results().is_empty() {
            println!("No cities matched '{}'.", query.trim());
            continue;
        }

        print!("{}", render::results_table(activity.results(), activity.scales()));

        let labels: Vec<String> =
            activity.results().iter().map(|record| record.place_label()).collect();
        let picked = match Select::new("Pick a city for its forecast:", labels).raw_prompt() {
            Ok(option) => option.index,
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let id = activity.results()[picked].id;
        activity.select(id).map_err(report)?;

        let outcome = activity.fetch_forecast().await;
        eprintln!();
        if let Err(err) = outcome {
            debug!("{err:?}");
            eprintln!("{}", err.user_message());
            continue;
        }

        show_forecast(&mut activity).await?;
        if activity.screen() != Screen::Search {
            // The user quit from the forecast menu.
            return Ok(());
        }
    }
}

async fn show_forecast(activity: &mut Activity) -> anyhow::Result<()> {
    loop {
        if let Some(record) = activity.selected() {
            println!("\n{}", render::current_conditions(record, activity.scales()));
        }
        print!("{}", render::forecast_table(activity.daily_forecast(), activity.scales()));

        let choice = Select::new(
            "Forecast:",
            vec!["Back to search", "Refresh", "Temperature scale", "Quit"],
        )
        .prompt();

        match choice {
            Ok("Back to search") => {
                activity.back();
                return Ok(());
            }
            Ok("Refresh") => {
                if let Err(err) = activity.refresh().await {
                    debug!("{err:?}");
                    eprintln!("{}", err.user_message());
                }
            }
            Ok("Temperature scale") => {
                let scale = Select::new("Temperature scale:", vec!["kelvin", "celsius", "fahrenheit"])
                    .prompt();
                if let Ok(scale) = scale {
                    activity.set_scale(ScaleKind::Temperature, scale)?;
                }
            }
            Ok(_) | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}
