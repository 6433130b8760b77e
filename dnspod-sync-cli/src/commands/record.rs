//! `dnspod-sync import | apply | destroy`

use std::path::Path;

use anyhow::{Context, Result, bail};
use dnspod_sync_core::RecordReconciler;
use dnspod_sync_core::types::{ApplyOutcome, DeleteOutcome, RecordResource};

use crate::state::{load_spec, load_state, save_state};

/// Adopt an existing record into a fresh state file.
pub async fn import(reconciler: &RecordReconciler, identity: &str, state: &Path) -> Result<()> {
    if let Some(existing) = load_state(state)?
        && let Some(id) = existing.id
    {
        bail!("{} already tracks record {id}", state.display());
    }

    let Some(resource) = reconciler.adopt(identity).await? else {
        bail!("record {identity} does not exist");
    };
    save_state(state, &resource)?;
    println!("imported {identity}");
    Ok(())
}

/// Converge the record in `state` onto the spec in `desired`.
///
/// The state file is written even when the remote call fails part way, so a
/// record that was created keeps its identity.
pub async fn apply(reconciler: &RecordReconciler, desired: &Path, state: &Path) -> Result<()> {
    let spec = load_spec(desired)?;
    let mut resource =
        load_state(state)?.unwrap_or_else(|| RecordResource::untracked(spec.clone()));

    let result = reconciler.apply(&mut resource, spec).await;
    save_state(state, &resource)?;
    let outcome = result.with_context(|| format!("Failed to apply {}", desired.display()))?;

    println!(
        "{} {}",
        apply_verb(outcome),
        resource.id.as_deref().unwrap_or("-")
    );
    Ok(())
}

/// Delete the record tracked in `state` and clear its identity.
pub async fn destroy(reconciler: &RecordReconciler, state: &Path) -> Result<()> {
    let Some(mut resource) = load_state(state)? else {
        bail!("no state file at {}", state.display());
    };
    let identity = resource.id.clone();

    let outcome = reconciler.delete(&mut resource).await?;
    save_state(state, &resource)?;

    match (outcome, identity) {
        (DeleteOutcome::Deleted, Some(id)) => println!("deleted {id}"),
        (DeleteOutcome::AlreadyGone, Some(id)) => println!("already gone {id}"),
        _ => println!("nothing to delete"),
    }
    Ok(())
}

fn apply_verb(outcome: ApplyOutcome) -> &'static str {
    match outcome {
        ApplyOutcome::Created => "created",
        ApplyOutcome::Unchanged => "unchanged",
        ApplyOutcome::Updated => "updated",
        ApplyOutcome::Recreated => "recreated",
        ApplyOutcome::Replaced => "replaced",
    }
}
