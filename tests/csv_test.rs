use cuvee::adapters::csv_io;
use cuvee::adapters::InMemoryInventory;
use cuvee::domain::ports::InventoryStore;
use cuvee::BlendError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn seed_file_loads_into_store() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "name,blend,is_empty,current_volume,capacity").unwrap();
    writeln!(file, "A1,Cab,false,100.0,150.0").unwrap();
    writeln!(file, "B2,,true,0,300").unwrap();

    let tanks = csv_io::import_path(file.path()).unwrap();
    assert_eq!(tanks.len(), 2);

    let store = InMemoryInventory::new();
    for tank in tanks {
        store.upsert(tank).unwrap();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "A1");
    assert_eq!(snapshot[0].blend.as_deref(), Some("cab"));
    assert!(snapshot[1].is_empty);
}

#[test]
fn import_upserts_by_normalized_name() {
    let store = InMemoryInventory::new();
    let first = csv_io::import_csv(
        "name,blend,is_empty,current_volume,capacity\nA1,cab,false,100,150\n",
    )
    .unwrap();
    for tank in first {
        store.upsert(tank).unwrap();
    }

    // Re-import under different casing replaces, not duplicates.
    let second = csv_io::import_csv(
        "name,blend,is_empty,current_volume,capacity\na1,merlot,false,80,150\n",
    )
    .unwrap();
    for tank in second {
        store.upsert(tank).unwrap();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].blend.as_deref(), Some("merlot"));
    assert_eq!(snapshot[0].current_volume, 80.0);
}

#[test]
fn invalid_rows_are_rejected_at_the_store_boundary() {
    let store = InMemoryInventory::new();
    let tanks = csv_io::import_csv(
        "name,blend,is_empty,current_volume,capacity\nbad,cab,false,500,100\n",
    )
    .unwrap();
    let err = store.upsert(tanks.into_iter().next().unwrap()).unwrap_err();
    assert!(matches!(err, BlendError::InvalidTankData { .. }));
}

#[test]
fn export_matches_import() {
    let store = InMemoryInventory::new();
    for tank in csv_io::import_csv(
        "name,blend,is_empty,current_volume,capacity\nq1,cab,false,75.5,200\nq2,,true,0,50\n",
    )
    .unwrap()
    {
        store.upsert(tank).unwrap();
    }

    let exported = csv_io::export_csv(&store.snapshot()).unwrap();
    let reparsed = csv_io::import_csv(&exported).unwrap();
    assert_eq!(reparsed, store.snapshot());
}
