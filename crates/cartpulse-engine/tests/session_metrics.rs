use cartpulse_engine::{Error, MetricsConfig, SessionMetricsComputer, compute_session_metrics};
use cartpulse_testing::InteractionLog;
use cartpulse_testing::assertions::{
    assert_metric_ranges, assert_metrics_schema, assert_row, assert_single_user,
    assert_sorted_unique,
};
use cartpulse_types::{Column, Error as SchemaError, Frame};

// Session 10: two interactions 5s apart, one cart add.
// Session 11: two interactions 2s apart, no cart adds.
fn two_sessions() -> InteractionLog {
    InteractionLog::new()
        .push(1, 10, 0, 55, 0)
        .push(1, 10, 5, 56, 1)
        .push(1, 11, 3600, 60, 0)
        .push(1, 11, 3602, 61, 0)
}

#[test]
fn test_absent_user_returns_typed_empty_table() -> anyhow::Result<()> {
    let frame = InteractionLog::new()
        .push(2, 20, 0, 70, 1)
        .push(2, 20, 9, 71, 0)
        .to_frame()?;

    let table = compute_session_metrics(&frame, 1)?;

    assert!(table.is_empty());
    assert_metrics_schema(&table)?;
    assert_eq!(
        table.column_names(),
        vec![
            "user_id",
            "session_id",
            "total_session_time",
            "cart_addition_ratio"
        ]
    );
    Ok(())
}

#[test]
fn test_empty_frame_returns_typed_empty_table() -> anyhow::Result<()> {
    let frame = InteractionLog::new().to_frame()?;
    let table = compute_session_metrics(&frame, 1)?;

    assert!(table.is_empty());
    assert_metrics_schema(&table)?;
    Ok(())
}

#[test]
fn test_single_interaction_session() -> anyhow::Result<()> {
    let frame = InteractionLog::new().push(1, 10, 0, 55, 1).to_frame()?;
    let table = compute_session_metrics(&frame, 1)?;

    assert_eq!(table.len(), 1);
    assert_row(&table, 0, (1, 10, 0.0, 100.0))?;
    Ok(())
}

#[test]
fn test_single_session_two_interactions() -> anyhow::Result<()> {
    let frame = InteractionLog::new()
        .push(1, 10, 0, 55, 0)
        .push(1, 10, 5, 56, 1)
        .to_frame()?;
    let table = compute_session_metrics(&frame, 1)?;

    assert_eq!(table.len(), 1);
    assert_row(&table, 0, (1, 10, 5.0, 50.0))?;
    Ok(())
}

#[test]
fn test_two_sessions_ordered_by_session_id() -> anyhow::Result<()> {
    let frame = two_sessions().to_frame()?;
    let table = compute_session_metrics(&frame, 1)?;

    assert_row(&table, 0, (1, 10, 5.0, 50.0))?;
    assert_row(&table, 1, (1, 11, 2.0, 0.0))?;
    assert_sorted_unique(&table)?;

    insta::assert_json_snapshot!(table, @r#"
    [
      {
        "user_id": 1,
        "session_id": 10,
        "total_session_time": 5.0,
        "cart_addition_ratio": 50.0
      },
      {
        "user_id": 1,
        "session_id": 11,
        "total_session_time": 2.0,
        "cart_addition_ratio": 0.0
      }
    ]
    "#);
    Ok(())
}

#[test]
fn test_other_users_are_excluded() -> anyhow::Result<()> {
    let frame = InteractionLog::new()
        .push(2, 10, 0, 90, 1)
        .push(1, 11, 0, 60, 0)
        .push(2, 10, 50, 91, 1)
        .push(1, 11, 2, 61, 0)
        .push(3, 11, 7, 61, 1)
        .to_frame()?;

    let table = compute_session_metrics(&frame, 1)?;

    assert_eq!(table.len(), 1);
    assert_single_user(&table, 1)?;
    assert_row(&table, 0, (1, 11, 2.0, 0.0))?;
    Ok(())
}

#[test]
fn test_unsorted_input_sorted_output() -> anyhow::Result<()> {
    let frame = InteractionLog::new()
        .push(1, 30, 40, 1, 1)
        .push(1, 5, 10, 2, 0)
        .push(1, 17, 0, 3, 1)
        .push(1, 5, 0, 4, 1)
        .push(1, 30, 0, 5, 0)
        .to_frame()?;

    let table = compute_session_metrics(&frame, 1)?;

    let sessions: Vec<i64> = table.iter().map(|r| r.session_id.get()).collect();
    assert_eq!(sessions, vec![5, 17, 30]);
    assert_row(&table, 0, (1, 5, 10.0, 50.0))?;
    assert_row(&table, 1, (1, 17, 0.0, 100.0))?;
    assert_row(&table, 2, (1, 30, 40.0, 50.0))?;
    assert_metric_ranges(&table)?;
    Ok(())
}

#[test]
fn test_ratio_rounded_to_two_decimals() -> anyhow::Result<()> {
    let frame = InteractionLog::new()
        .push(1, 10, 0, 1, 1)
        .push(1, 10, 1, 2, 0)
        .push(1, 10, 2, 3, 0)
        .push(1, 11, 0, 1, 1)
        .push(1, 11, 1, 2, 1)
        .push(1, 11, 2, 3, 0)
        .to_frame()?;

    let table = compute_session_metrics(&frame, 1)?;

    assert_row(&table, 0, (1, 10, 2.0, 33.33))?;
    assert_row(&table, 1, (1, 11, 2.0, 66.67))?;
    Ok(())
}

#[test]
fn test_text_and_typed_timestamps_agree() -> anyhow::Result<()> {
    let log = two_sessions();

    let typed = compute_session_metrics(&log.to_frame()?, 1)?;
    let text = compute_session_metrics(&log.to_text_frame()?, 1)?;

    assert_eq!(typed, text);
    Ok(())
}

#[test]
fn test_records_and_frame_paths_agree() -> anyhow::Result<()> {
    let log = two_sessions().push(2, 10, 0, 55, 1);
    let computer = SessionMetricsComputer::default();

    let from_frame = computer.compute(&log.to_frame()?, 1)?;
    let from_records = computer.compute_records(&log.records(), 1);

    assert_eq!(from_frame, from_records);
    Ok(())
}

#[test]
fn test_input_frame_is_not_modified() -> anyhow::Result<()> {
    let frame = two_sessions().push(2, 99, 0, 1, 1).to_text_frame()?;
    let before = frame.clone();

    compute_session_metrics(&frame, 1)?;

    assert_eq!(frame, before);
    Ok(())
}

#[test]
fn test_repeated_calls_are_identical() -> anyhow::Result<()> {
    let frame = two_sessions().to_frame()?;
    let computer = SessionMetricsComputer::default();

    let first = computer.compute(&frame, 1)?;
    let second = computer.compute(&frame, 1)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_bool_cart_flags() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![1_i64, 1])?
        .with_column("session_id", vec![10_i64, 10])?
        .with_column(
            "timestamp_local",
            vec!["2024-05-20T09:00:00", "2024-05-20T09:00:05"],
        )?
        .with_column("partnumber", vec!["P-55", "P-56"])?
        .with_column("add_to_cart", vec![false, true])?;

    let table = compute_session_metrics(&frame, 1)?;

    assert_row(&table, 0, (1, 10, 5.0, 50.0))?;
    Ok(())
}

#[test]
fn test_custom_column_names() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("customer", vec![7_i64, 7])?
        .with_column("visit", vec![3_i64, 3])?
        .with_column(
            "ts",
            vec!["2024-05-20 09:00:00", "2024-05-20 09:01:30"],
        )?
        .with_column("sku", vec![1_i64, 2])?
        .with_column("carted", vec![1_i64, 1])?;

    let config = MetricsConfig::from_toml_str(
        r#"
[columns]
user_id = "customer"
session_id = "visit"
timestamp_local = "ts"
partnumber = "sku"
add_to_cart = "carted"
"#,
    )?;

    let table = SessionMetricsComputer::new(config).compute(&frame, 7)?;

    assert_row(&table, 0, (7, 3, 90.0, 100.0))?;
    Ok(())
}

#[test]
fn test_unparseable_timestamp_is_schema_error() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![1_i64, 1])?
        .with_column("session_id", vec![10_i64, 10])?
        .with_column("timestamp_local", vec!["2024-05-20 09:00:00", "not a time"])?
        .with_column("partnumber", vec![55_i64, 56])?
        .with_column("add_to_cart", vec![0_i64, 1])?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    match err {
        Error::Schema(SchemaError::InvalidTimestamp { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "not a time");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_bad_timestamp_reports_frame_row() -> anyhow::Result<()> {
    // User 2's rows come first; the bad cell is at frame row 2.
    let frame = Frame::new()
        .with_column("user_id", vec![2_i64, 2, 1])?
        .with_column("session_id", vec![20_i64, 20, 10])?
        .with_column(
            "timestamp_local",
            vec!["2024-05-20 09:00:00", "2024-05-20 09:00:01", "junk"],
        )?
        .with_column("partnumber", vec![1_i64, 2, 3])?
        .with_column("add_to_cart", vec![0_i64, 0, 1])?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    match err {
        Error::Schema(SchemaError::InvalidTimestamp { row, value }) => {
            assert_eq!(row, 2);
            assert_eq!(value, "junk");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_mixed_offset_timestamps_rejected() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![1_i64, 1])?
        .with_column("session_id", vec![10_i64, 10])?
        .with_column(
            "timestamp_local",
            vec!["2024-05-20T09:00:00+02:00", "2024-05-20 09:00:05"],
        )?
        .with_column("partnumber", vec![55_i64, 56])?
        .with_column("add_to_cart", vec![0_i64, 1])?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    match err {
        Error::Schema(SchemaError::MixedTimestampOffsets { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "2024-05-20 09:00:05");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_mixed_offset_row_is_frame_row() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![3_i64, 1, 3, 1])?
        .with_column("session_id", vec![30_i64, 10, 30, 10])?
        .with_column(
            "timestamp_local",
            vec![
                "2024-05-20 08:00:00",
                "2024-05-20T09:00:00Z",
                "2024-05-20 08:00:10",
                "2024-05-20 09:00:05",
            ],
        )?
        .with_column("partnumber", vec![1_i64, 2, 3, 4])?
        .with_column("add_to_cart", vec![0_i64, 0, 0, 1])?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    assert!(matches!(
        err,
        Error::Schema(SchemaError::MixedTimestampOffsets { row: 3, .. })
    ));
    Ok(())
}

#[test]
fn test_uniform_offsets_give_true_duration() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![1_i64, 1])?
        .with_column("session_id", vec![10_i64, 10])?
        .with_column(
            "timestamp_local",
            vec!["2024-05-20T09:00:00+02:00", "2024-05-20T07:00:05Z"],
        )?
        .with_column("partnumber", vec![55_i64, 56])?
        .with_column("add_to_cart", vec![0_i64, 1])?;

    let table = compute_session_metrics(&frame, 1)?;

    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].total_session_time, 5.0);
    Ok(())
}

#[test]
fn test_missing_column_is_schema_error() -> anyhow::Result<()> {
    let frame = Frame::new()
        .with_column("user_id", vec![1_i64])?
        .with_column("session_id", vec![10_i64])?
        .with_column("timestamp_local", vec!["2024-05-20 09:00:00"])?
        .with_column("add_to_cart", vec![1_i64])?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    assert!(matches!(
        err,
        Error::Schema(SchemaError::MissingColumn(ref name)) if name == "partnumber"
    ));
    Ok(())
}

#[test]
fn test_missing_user_column_fails_even_without_matches() -> anyhow::Result<()> {
    let frame = Frame::new().with_column("session_id", Column::Int(vec![]))?;

    let err = compute_session_metrics(&frame, 1).unwrap_err();

    assert!(matches!(
        err,
        Error::Schema(SchemaError::MissingColumn(ref name)) if name == "user_id"
    ));
    Ok(())
}

#[test]
fn test_absent_user_does_not_read_other_columns() -> anyhow::Result<()> {
    // Only user_id is consulted when nobody matches.
    let frame = Frame::new().with_column("user_id", vec![2_i64, 3])?;

    let table = compute_session_metrics(&frame, 1)?;

    assert!(table.is_empty());
    assert_metrics_schema(&table)?;
    Ok(())
}
