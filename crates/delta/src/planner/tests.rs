use super::*;

#[test]
fn empty_matches_yields_single_insert() {
    let new_buf = b"hello".to_vec();
    let stream = plan(Vec::new(), 0, &new_buf).unwrap();
    assert_eq!(
        stream.operations(),
        &[Operation::Insert {
            bytes: b"hello".to_vec()
        }]
    );
}

#[test]
fn matches_are_sorted_before_planning() {
    let new_buf = b"AAAABBBB".to_vec();
    let matches = vec![
        Match {
            base_offset: 4,
            new_offset: 4,
            length: 4,
        },
        Match {
            base_offset: 0,
            new_offset: 0,
            length: 4,
        },
    ];
    let stream = plan(matches, 8, &new_buf).unwrap();
    assert_eq!(
        stream.operations(),
        &[
            Operation::Copy {
                source_offset: 0,
                length: 4
            },
            Operation::Copy {
                source_offset: 4,
                length: 4
            },
        ]
    );
}

#[test]
fn gap_before_and_after_a_match_becomes_insert() {
    let new_buf = b"XXmatchYY".to_vec();
    let matches = vec![Match {
        base_offset: 0,
        new_offset: 2,
        length: 5,
    }];
    let stream = plan(matches, 5, &new_buf).unwrap();
    assert_eq!(
        stream.operations(),
        &[
            Operation::Insert {
                bytes: b"XX".to_vec()
            },
            Operation::Copy {
                source_offset: 0,
                length: 5
            },
            Operation::Insert {
                bytes: b"YY".to_vec()
            },
        ]
    );
}

#[test]
fn target_size_equals_new_buffer_length() {
    let new_buf = b"0123456789".to_vec();
    let matches = vec![Match {
        base_offset: 0,
        new_offset: 3,
        length: 4,
    }];
    let stream = plan(matches, 4, &new_buf).unwrap();
    assert_eq!(stream.target_size(), new_buf.len() as u32);
}
