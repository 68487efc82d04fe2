//! HabitFlow CLI - habit tracking with a collectible reward layer.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use habitflow_core::{
    Category, FocusSessionEvent, Frequency, HabitCompletionEvent, SessionKind, UserId,
};
use habitflow_engine::{GamificationService, GrantBatch};
use habitflow_pokedex::SpeciesClient;
use habitflow_storage::{JsonStorage, Storage};
use habitflow_streaks::run_reset_pass;
use tokio::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "habitflow")]
#[command(about = "Habit tracker with Pokemon-style rewards", long_about = None)]
struct Cli {
    /// User the command acts for
    #[arg(long, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Category
        #[arg(long, default_value = "other")]
        category: String,
        /// Frequency: daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
    },
    /// Toggle today's completion for a habit
    Complete {
        /// Habit ID
        id: String,
    },
    /// Run the daily reset pass
    Reset,
    /// Record a finished pomodoro session
    Pomodoro {
        /// Duration in minutes
        #[arg(long, default_value = "25")]
        minutes: u32,
        /// Session kind: work, break or long-break
        #[arg(long, default_value = "work")]
        kind: String,
    },
    /// Show level, experience and lifetime stats
    Stats,
    /// Show the reward collection
    Collection {
        /// Only rewards not viewed yet
        #[arg(long)]
        unviewed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let user = UserId::new(cli.user.clone());

    let storage_path = std::path::PathBuf::from(".habitflow");
    let storage = Arc::new(Mutex::new(JsonStorage::new(&storage_path).await?));
    let service = GamificationService::new(storage.clone(), SpeciesClient::new());

    match cli.command {
        Commands::Add { name, category, frequency } => {
            let (habit, gifts) = service
                .create_habit(
                    &user,
                    &name,
                    parse_category(&category)?,
                    parse_frequency(&frequency)?,
                    chrono::Utc::now(),
                )
                .await?;
            println!("Added habit: {} - {}", habit.id, habit.name);
            print_grants(&gifts);
        }
        Commands::List { all } => {
            let habits = storage.lock().await.list_habits(&user, !all).await?;

            println!("Habits ({})", habits.len());
            for habit in habits {
                println!(
                    "  {} | {} | streak {} (best {}) | {}{}",
                    habit.id,
                    habit.frequency,
                    habit.current_streak,
                    habit.best_streak,
                    habit.name,
                    if habit.completed_today { " ✓" } else { "" },
                );
            }
        }
        Commands::Complete { id } => {
            let habit_id = id.parse().map_err(|_| anyhow::anyhow!("Invalid habit ID"))?;
            let outcome = service
                .handle_completion(&HabitCompletionEvent {
                    habit_id,
                    user_id: user.clone(),
                    completed_at: chrono::Utc::now(),
                })
                .await?;

            if outcome.primary.completed {
                println!("Completed. Streak: {}", outcome.primary.current_streak);
            } else {
                println!("Completion removed. Streak: {}", outcome.primary.current_streak);
            }
            match outcome.gamification {
                Ok(batch) => print_grants(&batch),
                Err(e) => eprintln!("Rewards unavailable: {e}"),
            }
        }
        Commands::Reset => {
            let mut storage = storage.lock().await;
            let summary = run_reset_pass(&mut *storage, &user, chrono::Utc::now()).await?;
            println!(
                "Reset pass: {} reset, {} streaks broken",
                summary.reset, summary.streaks_broken
            );
        }
        Commands::Pomodoro { minutes, kind } => {
            let outcome = service
                .handle_focus_session(
                    &FocusSessionEvent {
                        user_id: user.clone(),
                        session_type: parse_kind(&kind)?,
                        duration_minutes: minutes,
                    },
                    chrono::Utc::now(),
                )
                .await?;

            if outcome.qualified {
                println!("Session recorded ({minutes} min) - counts toward evolution");
            } else {
                println!("Session recorded ({minutes} min)");
            }
            match outcome.gamification {
                Ok(batch) => print_grants(&batch),
                Err(e) => eprintln!("Rewards unavailable: {e}"),
            }
        }
        Commands::Stats => {
            let progress = service.progress(&user).await?;

            println!("{} - {}", progress.user_id, progress.current_title);
            println!("  Level {} ({} xp)", progress.level, progress.experience);
            println!("  Caught: {}", progress.total_caught);
            println!("  Completions: {}", progress.stats.total_habits_completed);
            println!("  Longest streak: {}", progress.stats.longest_streak);
            println!(
                "  Perfect days/weeks/months: {}/{}/{}",
                progress.stats.perfect_days,
                progress.stats.perfect_weeks,
                progress.stats.perfect_months
            );
            println!("  Achievements: {}", progress.achievements.len());
            for achievement in &progress.achievements {
                println!("    {} {}", achievement.icon, achievement.name);
            }
        }
        Commands::Collection { unviewed } => {
            let rewards = if unviewed {
                service.unviewed_rewards(&user).await?
            } else {
                service.progress(&user).await?.collection
            };

            println!("Collection ({})", rewards.len());
            for reward in rewards {
                println!(
                    "  #{:03} {} | {} | stage {}{}",
                    reward.species_id,
                    reward.species_name,
                    reward.rarity,
                    reward.evolution_stage,
                    if reward.can_evolve { " (can evolve)" } else { "" },
                );
            }
        }
    }

    Ok(())
}

fn print_grants(batch: &GrantBatch) {
    for reward in &batch.rewards {
        println!(
            "  Caught {} ({}) via {:?}!",
            reward.species_name, reward.rarity, reward.trigger_type
        );
    }
    for achievement in &batch.achievements {
        println!("  Achievement unlocked: {achievement}");
    }
    for title in &batch.titles {
        println!("  New title: {title}");
    }
    if let Some(level) = batch.level_up {
        println!("  Level up! Now level {level}");
    }
}

fn parse_category(s: &str) -> Result<Category> {
    match s.to_lowercase().as_str() {
        "health" => Ok(Category::Health),
        "fitness" => Ok(Category::Fitness),
        "productivity" => Ok(Category::Productivity),
        "learning" => Ok(Category::Learning),
        "mindfulness" => Ok(Category::Mindfulness),
        "social" => Ok(Category::Social),
        "creativity" => Ok(Category::Creativity),
        "finance" => Ok(Category::Finance),
        "other" => Ok(Category::Other),
        _ => Err(anyhow::anyhow!("Unknown category: {s}")),
    }
}

fn parse_frequency(s: &str) -> Result<Frequency> {
    match s.to_lowercase().as_str() {
        "daily" => Ok(Frequency::Daily),
        "weekly" => Ok(Frequency::Weekly),
        "monthly" => Ok(Frequency::Monthly),
        _ => Err(anyhow::anyhow!("Unknown frequency: {s}")),
    }
}

fn parse_kind(s: &str) -> Result<SessionKind> {
    match s.to_lowercase().as_str() {
        "work" => Ok(SessionKind::Work),
        "break" => Ok(SessionKind::Break),
        "long-break" | "longbreak" => Ok(SessionKind::LongBreak),
        _ => Err(anyhow::anyhow!("Unknown session kind: {s}")),
    }
}
