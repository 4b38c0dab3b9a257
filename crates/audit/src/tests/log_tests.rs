// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AssignmentLog;

#[test]
fn test_new_log_is_empty() {
    let log: AssignmentLog<u32> = AssignmentLog::new();

    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert!(log.latest().is_none());
}

#[test]
fn test_append_keeps_insertion_order() {
    let mut log: AssignmentLog<u32> = AssignmentLog::new();
    log.append(1);
    log.append(2);
    log.append(3);

    assert_eq!(log.iter().copied().collect::<Vec<u32>>(), vec![1, 2, 3]);
    assert_eq!(log.latest(), Some(&3));
}

#[test]
fn test_latest_matching_scans_from_tail() {
    let log: AssignmentLog<u32> = AssignmentLog::from_records(vec![2, 4, 5, 7]);

    assert_eq!(log.latest_matching(|n| **n % 2 == 0), Some(&4));
    assert_eq!(log.latest_matching(|n| **n > 100), None);
}

#[test]
fn test_log_serializes_as_plain_array() {
    let log: AssignmentLog<u32> = AssignmentLog::from_records(vec![1, 2]);

    let json: String = serde_json::to_string(&log).unwrap();
    assert_eq!(json, "[1,2]");

    let back: AssignmentLog<u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}
