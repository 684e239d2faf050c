use wallet_ledger::service::wallet_service::{normalize_page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[test]
fn defaults_apply_when_unspecified() {
    assert_eq!(normalize_page(None, None), (DEFAULT_PAGE_SIZE, 0));
}

#[test]
fn limit_is_clamped_to_bounds() {
    assert_eq!(normalize_page(Some(0), None).0, 1);
    assert_eq!(normalize_page(Some(-5), None).0, 1);
    assert_eq!(normalize_page(Some(10_000), None).0, MAX_PAGE_SIZE);
}

#[test]
fn negative_offset_is_floored() {
    assert_eq!(normalize_page(None, Some(-1)).1, 0);
    assert_eq!(normalize_page(None, Some(40)).1, 40);
}
