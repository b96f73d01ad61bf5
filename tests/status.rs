use footdata_terminal::status::{
    FINISHED_STATUSES, LIVE_STATUSES, StatusBucket, classify,
};

#[test]
fn live_codes_classify_live() {
    for code in LIVE_STATUSES {
        assert_eq!(classify(code), StatusBucket::Live, "code {code}");
    }
}

#[test]
fn finished_codes_classify_finished() {
    for code in FINISHED_STATUSES {
        assert_eq!(classify(code), StatusBucket::Finished, "code {code}");
    }
}

#[test]
fn everything_else_is_upcoming() {
    for code in ["NS", "TBD", "PST", "", "ft", "1h", "garbage", "Ω"] {
        assert_eq!(classify(code), StatusBucket::Upcoming, "code {code:?}");
    }
}

#[test]
fn classification_is_exact_match_not_substring() {
    assert_eq!(classify("FT2"), StatusBucket::Upcoming);
    assert_eq!(classify(" FT"), StatusBucket::Upcoming);
    assert_eq!(classify("LIVE!"), StatusBucket::Upcoming);
}

#[test]
fn sets_are_disjoint() {
    for code in LIVE_STATUSES {
        assert!(!FINISHED_STATUSES.contains(code));
    }
}
