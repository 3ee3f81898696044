#[path = "../common/mod.rs"]
mod common;

use rc522::service::{CardStore, CardTable, poll_once};
use rc522::test_support::{initialized_mock_reader, reader_with_card};
use rc522::transport::mock::MockChip;

#[tokio::test]
async fn no_card_cycles_leave_table_untouched() {
    common::init_logging();
    let mut table = CardTable::new();
    table.upsert("041a2b3c", 1_000);
    let (store, handle) = CardStore::with_table(table.clone());
    let task = tokio::spawn(store.run());

    let h = handle.clone();
    let results = tokio::task::spawn_blocking(move || {
        let mut reader = initialized_mock_reader(MockChip::new()).unwrap();
        (0..3)
            .map(|_| poll_once(&mut reader, &h).unwrap())
            .collect::<Vec<_>>()
    })
    .await
    .unwrap();
    assert_eq!(results, vec![None, None, None]);

    drop(handle);
    assert_eq!(task.await.unwrap(), table);
}

#[tokio::test]
async fn repeated_sightings_refresh_one_entry() {
    let (store, handle) = CardStore::new();
    let task = tokio::spawn(store.run());

    let h = handle.clone();
    tokio::task::spawn_blocking(move || {
        let mut reader = reader_with_card(&common::fixtures::double_uid()).unwrap();
        for _ in 0..2 {
            let card = poll_once(&mut reader, &h).unwrap();
            assert_eq!(card.as_deref(), Some("11223344556677"));
        }
    })
    .await
    .unwrap();

    drop(handle);
    let table = task.await.unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.last_seen("11223344556677").is_some());
}
