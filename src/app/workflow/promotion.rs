use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::api::classes::{graduate_class, promote_class};
use crate::app::models::SchoolClass;
use crate::app::state::AppState;
use crate::app::taxonomy::class_name::class_name;
use crate::app::taxonomy::Rank;
use crate::app::types::{SyncOutcome, SyncStats};

/// What end-of-year promotion does with one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionAction {
    /// Straight move to the next rank, name precomputed.
    MoveUp {
        target: Rank,
        stream: Option<String>,
        target_name: String,
    },
    /// The class crosses into A-Level; someone has to pick Sciences or Arts
    /// before the move can happen.
    AwaitStreamChoice { target: Rank },
    /// S6 leaves the school instead of moving up.
    Graduate,
    /// The stored rank did not parse. Kept separate from graduation so bad
    /// data never reads as a completed school career.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPlan {
    pub class_id: Option<String>,
    pub from_name: String,
    pub action: PromotionAction,
}

/// Pure planning step. A stream follows the class up whenever the next rank
/// keeps the same stream scheme; the O-to-A crossing drops it and demands an
/// explicit choice.
pub fn plan_promotion(class: &SchoolClass) -> PromotionPlan {
    let from_name = class.display_name();

    let action = match Rank::parse(&class.rank) {
        None => PromotionAction::Unrecognized,
        Some(rank) => match rank.next() {
            None => PromotionAction::Graduate,
            Some(target) => {
                if target.requires_stream() && !rank.requires_stream() {
                    PromotionAction::AwaitStreamChoice { target }
                } else {
                    let stream = class
                        .stream
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string);
                    let target_name = class_name(target, stream.as_deref());
                    PromotionAction::MoveUp {
                        target,
                        stream,
                        target_name,
                    }
                }
            }
        },
    };

    PromotionPlan {
        class_id: class.id.clone(),
        from_name,
        action,
    }
}

pub fn plan_promotions(classes: &[SchoolClass]) -> Vec<PromotionPlan> {
    classes.iter().map(plan_promotion).collect()
}

async fn apply_plan(state: &AppState, plan: &PromotionPlan) -> anyhow::Result<SyncOutcome> {
    let Some(class_id) = plan.class_id.as_deref() else {
        anyhow::bail!("Class '{}' has no id", plan.from_name);
    };

    match &plan.action {
        PromotionAction::MoveUp {
            target,
            stream,
            target_name,
        } => {
            promote_class(state, class_id, *target, stream.as_deref()).await?;
            info!("Promoted {} -> {}", plan.from_name, target_name);
            Ok(SyncOutcome::Applied)
        }
        PromotionAction::Graduate => {
            graduate_class(state, class_id).await?;
            info!("Graduated {}", plan.from_name);
            Ok(SyncOutcome::Applied)
        }
        PromotionAction::AwaitStreamChoice { target } => {
            warn!(
                "{} moves to {} but needs a stream choice first, skipping",
                plan.from_name,
                target.code()
            );
            Ok(SyncOutcome::Skipped)
        }
        PromotionAction::Unrecognized => {
            warn!("Cannot promote '{}': unrecognized rank", plan.from_name);
            Ok(SyncOutcome::Failed)
        }
    }
}

/// Plan and apply promotion for a whole school's class list.
pub async fn promote_classes(
    state: &AppState,
    classes: &[SchoolClass],
    concurrency: usize,
) -> SyncStats {
    let plans = plan_promotions(classes);
    info!("Applying promotion for {} classes", plans.len());

    stream::iter(plans.into_iter().map(|plan| {
        let state = state.clone();
        async move {
            let result = apply_plan(&state, &plan).await;
            (plan.from_name, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .fold(SyncStats::default(), |mut stats, (name, result)| async move {
        match result {
            Ok(outcome) => stats.add(&outcome),
            Err(e) => {
                warn!("Promotion of '{name}' failed: {e}");
                stats.add(&SyncOutcome::Failed);
            }
        }
        stats
    })
    .await
}
