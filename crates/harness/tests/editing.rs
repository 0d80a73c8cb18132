use liftlog_core::{Equipment, MuscleGroup, SetInput, WeightInput};
use liftlog_engine::{EngineConfig, EngineError, FlushReport};
use liftlog_harness::{TestBackend, init_test_logging};
use liftlog_storage::Storage;

// ============================================================================
// Session editor
// ============================================================================

#[test]
fn typing_then_blurring_a_slot() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    device.engine.create(backend.catalog().bench_press.id, 3)?;
    let mut editor = device.editor()?;

    // Keystrokes: "1", "12" in reps, then weight.
    editor.edit_slot(&mut device.engine, 0, SetInput::new(1, WeightInput::Empty));
    editor.edit_slot(&mut device.engine, 0, SetInput::new(12, WeightInput::Empty));
    editor.edit_slot(&mut device.engine, 0, SetInput::weighted(12, 62.5));
    assert_eq!(device.engine.pending_saves(), 1);

    let slot = editor.commit_slot(&mut device.engine, 0)?;
    assert!(slot.completed());
    assert_eq!(device.engine.pending_saves(), 0);
    assert_eq!(editor.session().active_slot_index(), Some(1));

    let stored = device.engine.storage().list_sets(slot.session_id)?;
    assert_eq!(stored.len(), 1);
    assert_eq!((stored[0].reps, stored[0].weight), (12, Some(62.5)));
    Ok(())
}

#[test]
fn clearing_reps_uncompletes_a_slot() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let squat = backend.catalog().back_squat.clone();
    device.log_session(&squat, 3, &[(5, 100.0), (5, 100.0)])?;
    let mut editor = device.editor()?;
    assert_eq!(editor.session().completed_count(), 2);

    editor.edit_slot(&mut device.engine, 1, SetInput::cleared());
    // The cleared field is queued as a delete until the commit replaces it.
    assert_eq!(device.engine.pending_saves(), 1);
    assert_eq!(editor.session().completed_count(), 2);
    editor.commit_slot(&mut device.engine, 1)?;
    assert_eq!(device.engine.pending_saves(), 0);

    assert_eq!(editor.session().completed_count(), 1);
    editor.reload(&device.engine)?;
    assert_eq!(editor.session().completed_count(), 1);
    assert!(!editor.session().slots[1].completed());
    Ok(())
}

#[test]
fn rejected_commit_restores_the_slot() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_toml_str("empty_weight = \"reject\"")?;
    let backend = TestBackend::with_config(config)?;
    let mut device = backend.new_user()?;
    let row = backend.catalog().dumbbell_row.clone();
    device.engine.create(row.id, 2)?;
    let mut editor = device.editor()?;

    editor.edit_slot(&mut device.engine, 0, SetInput::weighted(8, 22.0));
    editor.commit_slot(&mut device.engine, 0)?;
    let before = editor.session().clone();

    editor.edit_slot(&mut device.engine, 0, SetInput::new(10, WeightInput::Empty));
    let err = editor.commit_slot(&mut device.engine, 0).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(editor.session(), &before);
    assert_eq!(editor.session().slots[0].reps, Some(8));
    assert_eq!(editor.session().slots[0].weight, Some(22.0));

    editor.edit_slot(&mut device.engine, 0, SetInput::weighted(10, 24.0));
    assert!(editor.commit_slot(&mut device.engine, 0)?.completed());
    Ok(())
}

#[test]
fn extra_slots_persist_only_with_values() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let pull_up = backend.catalog().pull_up.clone();
    device.engine.create(pull_up.id, 2)?;
    let mut editor = device.editor()?;

    let extra = editor.add_slot(&device.engine)?;
    assert_eq!(extra.set_number, 3);
    assert_eq!(editor.session().slots.len(), 3);

    // An untouched extra slot disappears on reload.
    editor.reload(&device.engine)?;
    assert_eq!(editor.session().slots.len(), 2);

    editor.add_slot(&device.engine)?;
    editor.edit_slot(&mut device.engine, 2, SetInput::body_weight(6));
    editor.commit_slot(&mut device.engine, 2)?;
    editor.reload(&device.engine)?;
    assert_eq!(editor.session().slots.len(), 3);
    assert_eq!(editor.session().slots[2].weight, None);
    Ok(())
}

// ============================================================================
// Background saves
// ============================================================================

#[test]
fn queued_saves_are_written_on_complete() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let bench = backend.catalog().bench_press.clone();
    let session = device.engine.create(bench.id, 3)?;

    device.engine.queue_save(session.id(), 1, SetInput::weighted(8, 60.0));
    device.engine.queue_save(session.id(), 2, SetInput::weighted(8, 60.0));
    device.engine.queue_save(session.id(), 2, SetInput::weighted(7, 60.0));

    let done = device.engine.complete(session.id())?;
    assert_eq!(done.completed_count(), 2);
    assert_eq!(done.slots[1].reps, Some(7));
    assert_eq!(device.engine.pending_saves(), 0);
    Ok(())
}

#[test]
fn last_edit_wins_even_when_it_clears() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let bench = backend.catalog().bench_press.clone();
    device.engine.create(bench.id, 3)?;
    let mut editor = device.editor()?;
    let session_id = editor.session().id();

    editor.edit_slot(&mut device.engine, 0, SetInput::weighted(8, 60.0));
    editor.edit_slot(&mut device.engine, 0, SetInput::cleared());
    editor.edit_slot(&mut device.engine, 2, SetInput::weighted(6, 60.0));

    let done = device.engine.complete(session_id)?;
    assert!(!done.slots[0].completed());
    assert_eq!(done.completed_count(), 1);
    let stored = device.engine.storage().list_sets(session_id)?;
    assert_eq!(stored.iter().map(|s| s.set_number).collect::<Vec<_>>(), vec![3]);
    Ok(())
}

#[test]
fn failed_background_saves_are_swallowed() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let bench = backend.catalog().bench_press.clone();
    let session = device.engine.create(bench.id, 3)?;

    device.engine.queue_save(session.id(), 1, SetInput::weighted(8, f64::NAN));
    device.engine.queue_save(session.id(), 2, SetInput::weighted(8, 60.0));
    let report = device.engine.flush_saves();
    assert_eq!(report, FlushReport { applied: 1, failed: 1 });

    // Flushing again has nothing left to do.
    assert!(device.engine.flush_saves().is_clean());
    assert_eq!(device.engine.session(session.id())?.completed_count(), 1);
    Ok(())
}

#[test]
fn queued_saves_vanish_with_a_discarded_session() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let bench = backend.catalog().bench_press.clone();
    let session = device.engine.create(bench.id, 3)?;

    device.engine.queue_save(session.id(), 1, SetInput::weighted(8, 60.0));
    device.engine.discard(session.id())?;
    assert_eq!(device.engine.pending_saves(), 0);
    assert_eq!(device.engine.flush_saves(), FlushReport::default());
    Ok(())
}

// ============================================================================
// Exercise catalog
// ============================================================================

#[test]
fn own_exercises_and_favorites() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let mut other = backend.new_user()?;
    let curated = backend.catalog().all().len();

    let mine = device
        .engine
        .create_exercise("Landmine Press", MuscleGroup::Shoulders, Equipment::Barbell)?;
    assert_eq!(device.engine.exercises()?.len(), curated + 1);
    assert_eq!(other.engine.exercises()?.len(), curated);

    let bench = backend.catalog().bench_press.id;
    device.engine.set_favorite(bench, true)?;
    assert!(device.engine.exercise(bench)?.is_favorite);
    assert!(!other.engine.exercise(bench)?.is_favorite);

    assert!(matches!(
        other.engine.update_exercise(mine.id, "Mine now", MuscleGroup::Arms, Equipment::Bands),
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(other.engine.create(mine.id, 3), Err(EngineError::NotFound(_))));
    assert!(matches!(
        device.engine.update_exercise(bench, "Flat Bench", MuscleGroup::Chest, Equipment::Barbell),
        Err(EngineError::NotFound(_))
    ));

    let session = device.engine.create(mine.id, 3)?;
    assert_eq!(session.header.exercise_id, mine.id);
    Ok(())
}

#[test]
fn profile_rep_range_targets_new_sessions() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TestBackend::new()?;
    let mut device = backend.new_user()?;
    let bench = backend.catalog().bench_press.clone();

    let first = device.engine.create(bench.id, 3)?;
    assert_eq!((first.header.target_reps.min, first.header.target_reps.max), (10, 20));
    device.engine.set_rep_range(4, 6)?;
    device.engine.complete(first.id())?;

    let second = device.engine.create(bench.id, 3)?;
    assert_eq!((second.header.target_reps.min, second.header.target_reps.max), (4, 6));
    assert_eq!(device.engine.session(first.id())?.header.target_reps.max, 20);
    Ok(())
}
