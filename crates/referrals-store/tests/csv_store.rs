use referrals_core::domain::ReferralRecord;
use referrals_store::error::StoreErrorKind;
use referrals_store::{CsvStore, ReferralStore};
use std::fs;
use tempfile::TempDir;

#[test]
fn ensure_initialized_writes_header_once() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("referrals.csv");
    let mut store = CsvStore::new(&path);

    store.ensure_initialized().expect("init");
    store
        .append(&ReferralRecord::new("a@x.com", "b@x.com"))
        .expect("append");
    store.ensure_initialized().expect("init again");

    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents, "referrer_email,referee_email\na@x.com,b@x.com\n");
}

#[test]
fn ensure_initialized_creates_parent_directories() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("nested").join("data").join("referrals.csv");
    let mut store = CsvStore::new(&path);

    store.ensure_initialized().expect("init");

    assert!(path.exists());
    assert!(store.records().expect("records").is_empty());
}

#[test]
fn append_preserves_submitted_text_and_order() {
    let temp = TempDir::new().expect("tempdir");
    let mut store = CsvStore::new(temp.path().join("referrals.csv"));
    store.ensure_initialized().expect("init");

    let first = ReferralRecord::new("Ada+promo@Gmail.com", "Grace.H@gmail.com");
    let second = ReferralRecord::new("ada@gmail.com", "linus@kernel.org");
    store.append(&first).expect("append first");
    store.append(&second).expect("append second");

    let records = store.records().expect("records");
    assert_eq!(records, vec![first, second]);
}

#[test]
fn scans_compare_normalized_addresses() {
    let temp = TempDir::new().expect("tempdir");
    let mut store = CsvStore::new(temp.path().join("referrals.csv"));
    store.ensure_initialized().expect("init");
    store
        .append(&ReferralRecord::new("A.da+1@gmail.com", "grace+x@x.com"))
        .expect("append");
    store
        .append(&ReferralRecord::new("ada@GMAIL.com", "linus@x.com"))
        .expect("append");
    store
        .append(&ReferralRecord::new("someone@x.com", "ken@x.com"))
        .expect("append");

    assert_eq!(store.count_by_referrer("ada@gmail.com").expect("count"), 2);
    assert_eq!(store.count_by_referrer("nobody@x.com").expect("count"), 0);
    assert!(store.referee_exists("grace@x.com").expect("exists"));
    assert!(!store.referee_exists("ada@gmail.com").expect("exists"));
}

#[test]
fn values_with_commas_round_trip_through_quoting() {
    let temp = TempDir::new().expect("tempdir");
    let mut store = CsvStore::new(temp.path().join("referrals.csv"));
    store.ensure_initialized().expect("init");
    let record = ReferralRecord::new("\"odd,name\"@x.com", "b@x.com");
    store.append(&record).expect("append");

    assert_eq!(store.records().expect("records"), vec![record]);
}

#[test]
fn short_rows_are_skipped_on_scan() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("referrals.csv");
    fs::write(
        &path,
        "referrer_email,referee_email\na@x.com\na@x.com,b@x.com\n",
    )
    .expect("write");
    let store = CsvStore::new(&path);

    assert_eq!(store.count_by_referrer("a@x.com").expect("count"), 1);
    assert_eq!(store.records().expect("records").len(), 1);
}

#[test]
fn missing_header_column_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("referrals.csv");
    fs::write(&path, "referrer,referee\na@x.com,b@x.com\n").expect("write");
    let store = CsvStore::new(&path);

    let err = store.count_by_referrer("a@x.com").unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::MissingColumn);
}

#[test]
fn scanning_a_missing_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let store = CsvStore::new(temp.path().join("absent.csv"));

    let err = store.referee_exists("a@x.com").unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Io);
}
