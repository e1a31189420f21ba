// ABOUTME: Ayurdiet CLI - computes requirements, scores recipes and generates meal plans
// ABOUTME: Reads patients and recipes from a JSON seed file and prints JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily nutrition requirements for a patient
//! ayurdiet-cli --seed data/seed.json requirements --patient p-vata-01
//!
//! # Ranked recipe suitability
//! ayurdiet-cli --seed data/seed.json score --patient p-vata-01 --all
//!
//! # A 7-day plan with a weight-loss goal
//! ayurdiet-cli --seed data/seed.json generate --patient p-vata-01 --duration 7 --goal weight-loss
//!
//! # A plan from a JSON request document
//! ayurdiet-cli --seed data/seed.json request --file request.json
//!
//! # Constitution from assessment answers
//! ayurdiet-cli constitution --answers vata,vata,pitta,kapha,vata
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use ayurdiet::config::PlannerConfig;
use ayurdiet::logging::LoggingConfig;
use ayurdiet_core::models::Dosha;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use helpers::parse::parse_dosha;

#[derive(Parser)]
#[command(
    name = "ayurdiet-cli",
    about = "Ayurvedic diet plan engine CLI",
    long_about = "Computes nutrition requirements, scores recipes and generates personalized Ayurvedic meal plans."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Seed file with patients and recipes
    #[arg(long, global = true, default_value = "data/seed.json")]
    seed: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute daily nutrition requirements
    Requirements {
        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Score the recipe corpus for a patient
    Score {
        #[command(flatten)]
        plan: PlanArgs,

        /// Include disqualified recipes in the output
        #[arg(long)]
        all: bool,
    },

    /// Generate a meal plan
    Generate {
        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Generate a meal plan from a JSON request document
    Request {
        /// Request file (`{"patientId": ..., "duration": ..., ...}`)
        #[arg(long)]
        file: PathBuf,
    },

    /// Derive a constitution from assessment answers
    Constitution {
        /// One dosha per answer (comma-separated)
        #[arg(long, value_delimiter = ',', value_parser = parse_dosha, required = true)]
        answers: Vec<Dosha>,

        /// Score band within which doshas count as co-dominant
        #[arg(long)]
        band: Option<u8>,
    },
}

/// Patient and preference flags shared by the planning commands
#[derive(Args)]
struct PlanArgs {
    /// Patient id
    #[arg(long)]
    patient: String,

    /// Plan length in days
    #[arg(long)]
    duration: Option<u32>,

    /// Explicit daily calorie target
    #[arg(long)]
    target_calories: Option<u32>,

    /// First plan day (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Goal (weight-loss, weight-gain, muscle-gain, maintenance); repeatable
    #[arg(long = "goal")]
    goals: Vec<String>,

    /// Dietary restriction; repeatable
    #[arg(long = "restriction")]
    restrictions: Vec<String>,

    /// Extra health condition; repeatable
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// Activity level override
    #[arg(long)]
    activity_level: Option<String>,

    /// Maximum preparation plus cooking minutes per recipe
    #[arg(long)]
    max_cooking_minutes: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    match cli.command {
        Command::Constitution { answers, band } => {
            commands::constitution::assess(&answers, band)?;
        }
        Command::Requirements { plan } => {
            let config = PlannerConfig::from_env()?;
            commands::plan::requirements(&cli.seed, config, &plan).await?;
        }
        Command::Score { plan, all } => {
            let config = PlannerConfig::from_env()?;
            commands::plan::score(&cli.seed, config, &plan, all).await?;
        }
        Command::Generate { plan } => {
            let config = PlannerConfig::from_env()?;
            commands::plan::generate(&cli.seed, config, &plan).await?;
        }
        Command::Request { file } => {
            let config = PlannerConfig::from_env()?;
            commands::plan::generate_from_request(&cli.seed, config, &file).await?;
        }
    }

    Ok(())
}
