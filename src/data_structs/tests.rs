mod accumulator_tests {
    use assert_approx_eq::assert_approx_eq;

    use crate::data_structs::ProbAccumulator;

    #[test]
    fn test_summary_statistics() {
        let acc: ProbAccumulator = [0.8, 1.0, 0.9].into_iter().collect();
        let summary = acc.into_summary("tx1", 10, "s1").unwrap();

        assert_eq!(summary.read_count, 3);
        assert_eq!(summary.min_prob, 0.8);
        assert_eq!(summary.max_prob, 1.0);
        assert_approx_eq!(summary.mean_prob, 0.9);
        assert_approx_eq!(summary.variance.unwrap(), 0.01);
    }

    #[test]
    fn test_single_read_has_no_variance() {
        let acc: ProbAccumulator = [0.95].into_iter().collect();
        let summary = acc.into_summary("tx1", 10, "s1").unwrap();

        assert_eq!(summary.read_count, 1);
        assert_eq!(summary.mean_prob, 0.95);
        assert_eq!(summary.variance, None);
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert!(ProbAccumulator::new().into_summary("tx1", 10, "s1").is_none());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let values = [0.01, 0.93, 0.2, 0.77, 0.999, 0.05, 0.6];

        let mut left: ProbAccumulator = values[..3].iter().copied().collect();
        left.merge(values[3..].iter().copied().collect());

        let mut right: ProbAccumulator = values[4..].iter().rev().copied().collect();
        right.merge(values[..4].iter().copied().collect());

        assert_eq!(left.count(), right.count());
        assert_eq!(
            left.into_summary("tx", 1, "s"),
            right.into_summary("tx", 1, "s")
        );
    }
}

mod records_tests {
    use crate::data_structs::{
        ReadRecord,
        Segment,
    };

    #[test]
    fn test_read_record_validation() {
        assert!(ReadRecord::new("s1", "ctrl", "tx1", 5, 0.0).validate().is_ok());
        assert!(ReadRecord::new("s1", "ctrl", "tx1", 5, 1.0).validate().is_ok());
        assert!(ReadRecord::new("s1", "ctrl", "tx1", 5, 1.01).validate().is_err());
        assert!(ReadRecord::new("s1", "ctrl", "tx1", 5, -0.1).validate().is_err());
        assert!(ReadRecord::new("s1", "ctrl", "tx1", 5, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_segment_len_and_display() {
        let segment = Segment::new(3, 4);
        assert_eq!(segment.len(), 2);
        assert_eq!(segment.range().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(segment.to_string(), "[3, 4]");
    }
}
