mod common;

use common::{memory, sync_with, FakeRemote, ReadOnlyStore, RemoteMode};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::{Duration, Instant};
use study_planner_core::{
    initial_plan, LocalStore, PlanRepository, RemoteSync, SubjectId,
};

fn local_only_repo() -> PlanRepository {
    PlanRepository::new(memory(), RemoteSync::local_only())
}

#[tokio::test]
async fn empty_stores_yield_seed_plan() {
    assert_eq!(local_only_repo().get_plan().await, initial_plan());

    let remote = FakeRemote::new(RemoteMode::Failing);
    let repo = PlanRepository::new(memory(), sync_with(&remote));
    assert_eq!(repo.get_plan().await, initial_plan());

    let remote = FakeRemote::new(RemoteMode::Healthy);
    let repo = PlanRepository::new(memory(), sync_with(&remote));
    assert_eq!(repo.get_plan().await, initial_plan());
}

#[tokio::test]
async fn toggling_every_seed_task_twice_restores_it() {
    let repo = local_only_repo();
    let seed = initial_plan();

    for (subject, data) in &seed.subjects {
        for task in data.tasks.iter() {
            let once = repo.toggle_task(*subject, &task.id).await;
            assert_eq!(once.task_status(*subject, &task.id), Some(!task.is_completed));
            let twice = repo.toggle_task(*subject, &task.id).await;
            assert_eq!(twice.task_status(*subject, &task.id), Some(task.is_completed));
        }
    }
    assert_eq!(repo.get_plan().await, seed);
}

#[tokio::test]
async fn setting_same_status_twice_is_idempotent() {
    let repo = local_only_repo();
    let plan = repo.get_plan().await;
    let once = repo
        .update_task_status(&plan, SubjectId::Arabic, "arb_4_2", true)
        .await;
    let twice = repo
        .update_task_status(&once, SubjectId::Arabic, "arb_4_2", true)
        .await;
    assert_eq!(once, twice);
}

#[tokio::test]
async fn update_does_not_touch_previous_document() {
    let repo = local_only_repo();
    let before = repo.get_plan().await;
    let after = repo
        .update_task_status(&before, SubjectId::Math, "math_3", true)
        .await;
    assert_eq!(before.task_status(SubjectId::Math, "math_3"), Some(false));
    assert_eq!(after.task_status(SubjectId::Math, "math_3"), Some(true));
}

#[tokio::test]
async fn read_after_write_sees_update_before_remote_lands() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    remote.seed_plan(initial_plan());
    remote.set_write_delay(Duration::from_millis(300));
    let sync = sync_with(&remote);
    let repo = PlanRepository::new(memory(), sync.clone());

    let plan = repo.get_plan().await;
    let updated = repo
        .update_task_status(&plan, SubjectId::Physics, "phys_3_4", true)
        .await;

    // The remote row is still the old one here.
    assert_eq!(
        remote.stored_plan().unwrap().task_status(SubjectId::Physics, "phys_3_4"),
        Some(false)
    );
    assert_eq!(repo.get_plan().await, updated);

    sync.wait_idle().await;
    assert_eq!(remote.stored_plan(), Some(updated.clone()));
    assert_eq!(repo.get_plan().await, updated);
}

#[tokio::test]
async fn read_pending_across_a_write_keeps_the_newer_local_copy() {
    let remote = FakeRemote::new(RemoteMode::SlowReads(Duration::from_millis(100)));
    remote.seed_plan(initial_plan());
    remote.set_write_delay(Duration::from_millis(300));
    let sync = sync_with(&remote);
    let repo = PlanRepository::new(memory(), sync.clone());

    let reader = repo.clone();
    let pending_read = tokio::spawn(async move { reader.get_plan().await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let updated = repo
        .update_task_status(&initial_plan(), SubjectId::Physics, "phys_3_4", true)
        .await;

    // The remote row fetched before the write is older than the local copy.
    assert_eq!(pending_read.await.unwrap(), updated);
    assert_eq!(repo.get_plan().await, updated);

    // Even if the upsert never lands, the local write survives.
    remote.set_mode(RemoteMode::Failing);
    sync.wait_idle().await;
    assert_eq!(remote.upsert_count(), 0);
    assert_eq!(
        repo.get_plan().await.task_status(SubjectId::Physics, "phys_3_4"),
        Some(true)
    );
}

#[tokio::test]
async fn background_write_reaches_remote() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    let sync = sync_with(&remote);
    let repo = PlanRepository::new(memory(), sync.clone());

    let updated = repo.toggle_task(SubjectId::English, "eng_2").await;
    sync.wait_idle().await;

    assert_eq!(remote.upsert_count(), 1);
    assert_eq!(remote.stored_plan(), Some(updated));
}

#[tokio::test]
async fn failing_remote_falls_back_to_local_copy() {
    let remote = FakeRemote::new(RemoteMode::Failing);
    let sync = sync_with(&remote);
    let local = memory();
    let repo = PlanRepository::new(local.clone(), sync.clone());

    let updated = repo.toggle_task(SubjectId::Chemistry, "chem_5").await;
    sync.wait_idle().await;

    assert_eq!(remote.upsert_count(), 0);
    assert!(local.get("cinematic_study_plan_v1").unwrap().is_some());
    assert_eq!(repo.get_plan().await, updated);
}

#[tokio::test]
async fn remote_fetch_warms_local_cache() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    let completed = initial_plan().with_task_status(SubjectId::English, "eng_1", true);
    remote.seed_plan(completed.clone());
    let repo = PlanRepository::new(memory(), sync_with(&remote));

    assert_eq!(repo.get_plan().await, completed);

    remote.set_mode(RemoteMode::Failing);
    assert_eq!(repo.get_plan().await, completed);
}

#[tokio::test]
async fn slow_remote_read_does_not_block_local_fallback() {
    let remote = FakeRemote::new(RemoteMode::SlowReads(Duration::from_secs(10)));
    remote.seed_plan(initial_plan());
    let repo = PlanRepository::new(memory(), sync_with(&remote));

    let started = Instant::now();
    let plan = repo.get_plan().await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(plan, initial_plan());
}

#[tokio::test]
async fn unknown_task_is_a_no_op_write() {
    let repo = local_only_repo();
    let plan = repo.get_plan().await;
    let same = repo
        .update_task_status(&plan, SubjectId::Physics, "does_not_exist", true)
        .await;
    assert_eq!(same, plan);

    // A task id from another subject is not found either.
    let same = repo
        .update_task_status(&plan, SubjectId::Physics, "eng_1", true)
        .await;
    assert_eq!(same, plan);
}

#[tokio::test]
async fn local_write_failure_still_returns_new_plan() {
    let repo = PlanRepository::new(Arc::new(ReadOnlyStore), RemoteSync::local_only());
    let plan = repo.get_plan().await;
    let updated = repo
        .update_task_status(&plan, SubjectId::Math, "math_1", true)
        .await;
    assert_eq!(updated.task_status(SubjectId::Math, "math_1"), Some(true));
    // Nothing was persisted, so the next read is the seed again.
    assert_eq!(repo.get_plan().await, initial_plan());
}
