//! The gamification orchestrator.

use std::sync::Arc;

use habitflow_achievements::{achievement, evaluate_achievements, names, recompute_titles};
use habitflow_core::{
    experience_for_rarity, Category, FocusSession, FocusSessionEvent, Frequency, Habit,
    HabitCompletion, HabitCompletionEvent, Rarity, RewardId, RewardInstance, Time, TriggerType,
    UserId, UserProgress,
};
use habitflow_pokedex::{next_evolution, SpeciesProvider};
use habitflow_rewards::{
    apply_focus_progress, determine_rarity, duplicate_blocked, enumerate_triggers,
    owned_reward_keys, pick_species_id, ready_to_evolve, session_qualifies, RewardConfig,
    RewardTrigger,
};
use habitflow_storage::Storage;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::outcome::{CompletionOutcome, CompletionRecord, FocusOutcome, GrantBatch};

/// Orchestrates habit and focus events into reward, achievement and title
/// updates over a storage backend and a species source.
///
/// The random source is owned here and injected into every roll, so a
/// seeded service is fully deterministic.
pub struct GamificationService<S, P> {
    storage: Arc<Mutex<S>>,
    provider: P,
    config: RewardConfig,
    rng: Mutex<Xoshiro256PlusPlus>,
}

impl<S: Storage, P: SpeciesProvider> GamificationService<S, P> {
    /// Service with default configuration and an entropy-seeded generator.
    pub fn new(storage: Arc<Mutex<S>>, provider: P) -> Self {
        Self::with_config(
            storage,
            provider,
            RewardConfig::default(),
            Xoshiro256PlusPlus::from_entropy(),
        )
    }

    /// Service with explicit configuration and generator, for tests and
    /// embedders that need reproducible rolls.
    pub fn with_config(
        storage: Arc<Mutex<S>>,
        provider: P,
        config: RewardConfig,
        rng: Xoshiro256PlusPlus,
    ) -> Self {
        Self {
            storage,
            provider,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Validate and persist a new habit, then grant the one-time
    /// first-habit gift if it is still outstanding.
    pub async fn create_habit(
        &self,
        user_id: &UserId,
        name: &str,
        category: Category,
        frequency: Frequency,
        now: Time,
    ) -> Result<(Habit, GrantBatch), EngineError> {
        let habit = Habit::new(user_id.clone(), name, category, frequency)?;
        {
            let mut storage = self.storage.lock().await;
            storage.save_habit(&habit).await?;
        }

        info!(user = %user_id, habit = %habit.id, "habit created");
        let batch = self.handle_first_habit(user_id, now).await?;
        Ok((habit, batch))
    }

    /// Toggle a habit completion for the calendar day of `now`.
    ///
    /// A first completion records the event and runs the reward pipeline; a
    /// second completion on the same day removes the record and grants
    /// nothing. The habit-side record always succeeds or the whole call
    /// errors; a gamification failure is carried in the outcome instead.
    pub async fn handle_completion(
        &self,
        event: &HabitCompletionEvent,
    ) -> Result<CompletionOutcome, EngineError> {
        let HabitCompletionEvent {
            habit_id,
            ref user_id,
            completed_at: now,
        } = *event;
        let mut storage = self.storage.lock().await;

        let mut habit = storage
            .load_habit(habit_id)
            .await?
            .ok_or(EngineError::HabitNotFound(habit_id))?;
        if habit.user_id != *user_id {
            return Err(EngineError::WrongOwner(habit_id));
        }

        let date = now.date_naive();
        if storage.find_completion(habit_id, date).await?.is_some() {
            storage.delete_completion(habit_id, date).await?;
            habit.remove_completion(now);
            storage.save_habit(&habit).await?;

            info!(habit = %habit_id, "completion removed");
            return Ok(CompletionOutcome {
                primary: CompletionRecord {
                    completed: false,
                    current_streak: habit.current_streak,
                },
                gamification: Ok(GrantBatch::default()),
            });
        }

        let completion = HabitCompletion::new(habit_id, user_id.clone(), now);
        storage.save_completion(&completion).await?;
        habit.record_completion(now);
        storage.save_habit(&habit).await?;

        let primary = CompletionRecord {
            completed: true,
            current_streak: habit.current_streak,
        };

        let gamification = self
            .grant_for_completion(&mut *storage, &habit, user_id, now)
            .await;
        if let Err(e) = &gamification {
            warn!(habit = %habit_id, error = %e, "gamification failed, completion kept");
        }

        Ok(CompletionOutcome { primary, gamification })
    }

    /// Record a focus session and, when it qualifies, advance evolution
    /// progress across the user's collection.
    pub async fn handle_focus_session(
        &self,
        event: &FocusSessionEvent,
        now: Time,
    ) -> Result<FocusOutcome, EngineError> {
        let user_id = &event.user_id;
        let mut storage = self.storage.lock().await;

        let session = FocusSession::new(
            user_id.clone(),
            event.session_type,
            event.duration_minutes,
            now,
        );
        storage.save_session(&session).await?;

        if !session_qualifies(event.session_type, event.duration_minutes, &self.config) {
            return Ok(FocusOutcome {
                qualified: false,
                gamification: Ok(GrantBatch::default()),
            });
        }

        let gamification = self.evolve_after_session(&mut *storage, user_id, now).await;
        if let Err(e) = &gamification {
            warn!(user = %user_id, error = %e, "gamification failed, session kept");
        }

        Ok(FocusOutcome {
            qualified: true,
            gamification,
        })
    }

    /// One-time signup welcome: a starter at uncommon rarity plus the
    /// welcome achievement. Calling again is a no-op.
    pub async fn handle_signup(
        &self,
        user_id: &UserId,
        now: Time,
    ) -> Result<GrantBatch, EngineError> {
        let mut storage = self.storage.lock().await;
        let mut progress = load_or_create(&*storage, user_id).await?;

        if progress.has_achievement(names::WELCOME_TRAINER) {
            return Ok(GrantBatch::default());
        }

        let trigger = RewardTrigger::one_shot(TriggerType::Signup);
        let batch = self
            .grant_one_shot(&mut progress, &trigger, names::WELCOME_TRAINER, now)
            .await;

        storage.save_progress(&progress).await?;
        info!(user = %user_id, "signup welcome granted");
        Ok(batch)
    }

    /// One-time first-habit gift, gated on the first-step achievement.
    pub async fn handle_first_habit(
        &self,
        user_id: &UserId,
        now: Time,
    ) -> Result<GrantBatch, EngineError> {
        let mut storage = self.storage.lock().await;
        let mut progress = load_or_create(&*storage, user_id).await?;

        if progress.has_achievement(names::FIRST_STEP) {
            return Ok(GrantBatch::default());
        }

        let trigger = RewardTrigger::one_shot(TriggerType::FirstHabit);
        let batch = self
            .grant_one_shot(&mut progress, &trigger, names::FIRST_STEP, now)
            .await;

        storage.save_progress(&progress).await?;
        Ok(batch)
    }

    /// Grant a perfect-week or perfect-month reward and bump the matching
    /// stat. `period` must be one of the two perfect-period triggers.
    pub async fn handle_perfect_period(
        &self,
        user_id: &UserId,
        period: TriggerType,
        now: Time,
    ) -> Result<GrantBatch, EngineError> {
        if !matches!(period, TriggerType::PerfectWeek | TriggerType::PerfectMonth) {
            return Ok(GrantBatch::default());
        }

        let mut storage = self.storage.lock().await;
        let mut progress = load_or_create(&*storage, user_id).await?;

        match period {
            TriggerType::PerfectWeek => progress.stats.perfect_weeks += 1,
            TriggerType::PerfectMonth => progress.stats.perfect_months += 1,
            _ => {}
        }

        let trigger = RewardTrigger::one_shot(period);
        let (rarity, species_id) = self.roll(&trigger).await;

        let mut batch = GrantBatch::default();
        self.mint(&mut progress, &trigger, rarity, species_id, now, &mut batch)
            .await;
        finish_batch(&mut progress, &mut batch, now);

        storage.save_progress(&progress).await?;
        Ok(batch)
    }

    /// The user's gamification aggregate, or a fresh one if none exists yet.
    pub async fn progress(&self, user_id: &UserId) -> Result<UserProgress, EngineError> {
        let storage = self.storage.lock().await;
        Ok(load_or_create(&*storage, user_id).await?)
    }

    /// Collection entries the user has not seen yet.
    pub async fn unviewed_rewards(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RewardInstance>, EngineError> {
        let storage = self.storage.lock().await;
        let progress = load_or_create(&*storage, user_id).await?;
        Ok(progress
            .collection
            .into_iter()
            .filter(|r| !r.is_viewed)
            .collect())
    }

    /// Mark the given rewards as viewed. Returns how many were flipped.
    pub async fn mark_rewards_viewed(
        &self,
        user_id: &UserId,
        ids: &[RewardId],
        now: Time,
    ) -> Result<usize, EngineError> {
        let mut storage = self.storage.lock().await;
        let mut progress = load_or_create(&*storage, user_id).await?;

        let mut flipped = 0;
        for reward in &mut progress.collection {
            if !reward.is_viewed && ids.contains(&reward.id) {
                reward.is_viewed = true;
                flipped += 1;
            }
        }
        if flipped > 0 {
            progress.updated_at = now;
            storage.save_progress(&progress).await?;
        }
        Ok(flipped)
    }

    /// Collection entries that can still evolve.
    pub async fn evolvable_rewards(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RewardInstance>, EngineError> {
        let storage = self.storage.lock().await;
        let progress = load_or_create(&*storage, user_id).await?;
        Ok(progress
            .collection
            .into_iter()
            .filter(|r| r.can_evolve && r.evolution_requirement.is_some())
            .collect())
    }

    // === pipeline internals ===

    async fn grant_for_completion(
        &self,
        storage: &mut S,
        habit: &Habit,
        user_id: &UserId,
        now: Time,
    ) -> Result<GrantBatch, EngineError> {
        let mut progress = load_or_create(&*storage, user_id).await?;
        progress.stats.total_habits_completed += 1;
        progress.stats.longest_streak = progress.stats.longest_streak.max(habit.current_streak);

        let active = storage.list_habits(user_id, true).await?;
        let today = now.date_naive();
        if !active.is_empty()
            && progress.stats.last_perfect_day != Some(today)
            && active.iter().all(|h| h.completed_today || h.id == habit.id)
        {
            progress.stats.perfect_days += 1;
            progress.stats.last_perfect_day = Some(today);
        }

        let triggers = {
            let mut rng = self.rng.lock().await;
            enumerate_triggers(habit, &self.config, &mut *rng)
        };

        let mut batch = GrantBatch::default();
        for trigger in triggers {
            let (rarity, species_id) = self.roll(&trigger).await;
            let owned = owned_reward_keys(&progress);
            if duplicate_blocked(&owned, species_id, trigger.trigger_type) {
                continue;
            }
            self.mint(&mut progress, &trigger, rarity, species_id, now, &mut batch)
                .await;
        }

        finish_batch(&mut progress, &mut batch, now);
        storage.save_progress(&progress).await?;
        Ok(batch)
    }

    async fn evolve_after_session(
        &self,
        storage: &mut S,
        user_id: &UserId,
        now: Time,
    ) -> Result<GrantBatch, EngineError> {
        let mut progress = load_or_create(&*storage, user_id).await?;
        apply_focus_progress(&mut progress);

        let mut batch = GrantBatch::default();
        for index in ready_to_evolve(&progress) {
            let parent_id = progress.collection[index].species_id;
            let habit_id = progress.collection[index].habit_id;
            let Some(successor_id) = next_evolution(parent_id) else {
                continue;
            };

            let trigger = RewardTrigger::evolution(parent_id);
            let rarity = {
                let mut rng = self.rng.lock().await;
                determine_rarity(&trigger, &self.config, &mut *rng)
            };

            let species = self.provider.fetch(successor_id).await;
            let mut instance = RewardInstance::from_species(
                user_id.clone(),
                &species,
                rarity,
                TriggerType::Evolution,
                1,
                habit_id,
                now,
            );
            instance.parent_species_id = Some(parent_id);

            // The evolution consumes the parent's eligibility.
            let parent = &mut progress.collection[index];
            parent.can_evolve = false;
            parent.evolution_requirement = None;

            info!(from = parent_id, to = successor_id, "reward evolved");
            if let Some(level) = progress.add_reward(instance.clone(), experience_for_rarity(rarity))
            {
                batch.level_up = Some(level);
            }
            batch.rewards.push(instance);
        }

        if !batch.rewards.is_empty() {
            batch.achievements.push("Evolution Master".to_string());
        }

        finish_batch(&mut progress, &mut batch, now);
        storage.save_progress(&progress).await?;
        Ok(batch)
    }

    async fn grant_one_shot(
        &self,
        progress: &mut UserProgress,
        trigger: &RewardTrigger,
        achievement_name: &str,
        now: Time,
    ) -> GrantBatch {
        let species_id = {
            let mut rng = self.rng.lock().await;
            pick_species_id(trigger, Rarity::Uncommon, &self.config, &mut *rng)
        };

        let mut batch = GrantBatch::default();
        let owned = owned_reward_keys(progress);
        if !duplicate_blocked(&owned, species_id, trigger.trigger_type) {
            // One-shot gifts are pinned to uncommon.
            self.mint(progress, trigger, Rarity::Uncommon, species_id, now, &mut batch)
                .await;
        }

        if let Some(entry) = achievement(achievement_name, now) {
            progress.achievements.push(entry);
            batch.achievements.push(achievement_name.to_string());
        }

        finish_batch(progress, &mut batch, now);
        batch
    }

    async fn roll(&self, trigger: &RewardTrigger) -> (Rarity, u32) {
        let mut rng = self.rng.lock().await;
        let rarity = determine_rarity(trigger, &self.config, &mut *rng);
        let species_id = pick_species_id(trigger, rarity, &self.config, &mut *rng);
        (rarity, species_id)
    }

    async fn mint(
        &self,
        progress: &mut UserProgress,
        trigger: &RewardTrigger,
        rarity: Rarity,
        species_id: u32,
        now: Time,
        batch: &mut GrantBatch,
    ) {
        let species = self.provider.fetch(species_id).await;
        let instance = RewardInstance::from_species(
            progress.user_id.clone(),
            &species,
            rarity,
            trigger.trigger_type,
            trigger.value,
            trigger.habit_id,
            now,
        );

        info!(
            user = %progress.user_id,
            species = species_id,
            rarity = %rarity,
            trigger = ?trigger.trigger_type,
            "reward granted"
        );
        if let Some(level) = progress.add_reward(instance.clone(), experience_for_rarity(rarity)) {
            batch.level_up = Some(level);
        }
        batch.rewards.push(instance);
    }
}

async fn load_or_create<S: Storage>(
    storage: &S,
    user_id: &UserId,
) -> Result<UserProgress, EngineError> {
    Ok(storage
        .load_progress(user_id)
        .await?
        .unwrap_or_else(|| UserProgress::new(user_id.clone())))
}

fn finish_batch(progress: &mut UserProgress, batch: &mut GrantBatch, now: Time) {
    batch
        .achievements
        .extend(evaluate_achievements(progress, now));
    batch.titles.extend(recompute_titles(progress));
}
