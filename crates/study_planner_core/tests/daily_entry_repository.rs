mod common;

use common::{fixed_day, memory, sample_analysis, sync_with, user, FakeRemote, RemoteMode};
use pretty_assertions::assert_eq;
use study_planner_core::{DailyEntry, DailyEntryRepository, DateKey, RemoteSync};

fn entry(reflection: &str) -> DailyEntry {
    DailyEntry {
        reflection: reflection.to_string(),
        analysis: None,
    }
}

#[tokio::test]
async fn reflection_without_analysis_reads_back_unchanged() {
    let remote = FakeRemote::new(RemoteMode::Failing);
    for repo in [
        DailyEntryRepository::new(memory(), RemoteSync::local_only()),
        DailyEntryRepository::new(memory(), sync_with(&remote)),
    ] {
        let sara = user("Sara");
        repo.save_entry(&sara, entry("تعبت اليوم")).await;
        let read = repo.get_today(&sara).await.unwrap();
        assert_eq!(read.reflection, "تعبت اليوم");
        assert!(read.analysis.is_none());
    }
}

#[tokio::test]
async fn missing_entry_reads_as_none() {
    let repo = DailyEntryRepository::new(memory(), RemoteSync::local_only());
    assert_eq!(repo.get_today(&user("Sara")).await, None);
}

#[tokio::test]
async fn saving_null_analysis_clears_previous_one() {
    let repo = DailyEntryRepository::new(memory(), RemoteSync::local_only());
    let sara = user("Sara");

    let analyzed = DailyEntry {
        reflection: "يوم جيد".to_string(),
        analysis: Some(sample_analysis(80.0)),
    };
    repo.save_entry(&sara, analyzed.clone()).await;
    assert_eq!(repo.get_today(&sara).await, Some(analyzed));

    repo.save_entry(&sara, entry("يوم آخر")).await;
    assert_eq!(repo.get_today(&sara).await, Some(entry("يوم آخر")));
}

#[tokio::test]
async fn remote_row_uses_write_date() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    let sync = sync_with(&remote);
    let repo = DailyEntryRepository::new(memory(), sync.clone()).with_clock(fixed_day);
    let sara = user("Sara");

    assert_eq!(repo.today().to_string(), "2026-10-17");
    repo.save_entry(&sara, entry("راجعت الكيمياء")).await;
    sync.wait_idle().await;

    assert_eq!(
        remote.stored_entry("user_sara", "2026-10-17"),
        Some(entry("راجعت الكيمياء"))
    );
}

#[tokio::test]
async fn per_date_history_comes_from_remote() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    let sync = sync_with(&remote);
    let sara = user("Sara");

    let writer = DailyEntryRepository::new(memory(), sync.clone()).with_clock(fixed_day);
    writer.save_entry(&sara, entry("أمس")).await;
    sync.wait_idle().await;

    let reader = DailyEntryRepository::new(memory(), sync_with(&remote));
    let date = DateKey::parse("2026-10-17").unwrap();
    assert_eq!(reader.get_entry(&sara, &date).await, Some(entry("أمس")));

    // Fetching warmed the reader's local copy.
    remote.set_mode(RemoteMode::Failing);
    assert_eq!(reader.get_entry(&sara, &date).await, Some(entry("أمس")));
}

#[tokio::test]
async fn second_write_same_day_overwrites() {
    let remote = FakeRemote::new(RemoteMode::Healthy);
    let sync = sync_with(&remote);
    let repo = DailyEntryRepository::new(memory(), sync.clone()).with_clock(fixed_day);
    let sara = user("Sara");

    repo.save_entry(&sara, entry("الأولى")).await;
    repo.save_entry(&sara, entry("الثانية")).await;
    sync.wait_idle().await;

    assert_eq!(
        remote.stored_entry("user_sara", "2026-10-17"),
        Some(entry("الثانية"))
    );
    assert_eq!(repo.get_today(&sara).await, Some(entry("الثانية")));
}
