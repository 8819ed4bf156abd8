//! Ledger integration tests
//!
//! Tests ledger operations using a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::TestDatabase;
    use chrono::NaiveDate;
    use llmbot::storage::database::{BACKFILL_COST, BackfillOutcome, SignInOutcome};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_week_of_sign_ins_then_backfill() {
        let db = TestDatabase::new().await;
        let ledger = db.ledger();

        for d in 1..=3 {
            assert_ok!(ledger.sign_in("u1", "g1", "Alice", day(d)).await);
        }
        // 10 + 11 + 12
        assert_eq!(assert_ok!(ledger.balance("u1", "g1").await), 33);

        let outcome = assert_ok!(ledger.backfill("u1", "g1", "Alice", day(5)).await);
        assert_eq!(
            outcome,
            BackfillOutcome::Backfilled {
                date: day(4),
                cost: BACKFILL_COST,
                balance: 18,
            }
        );

        let outcome = assert_ok!(ledger.backfill("u1", "g1", "Alice", day(5)).await);
        assert_eq!(outcome, BackfillOutcome::NothingToBackfill);

        // A backfilled day starts a new streak of one
        match assert_ok!(ledger.sign_in("u1", "g1", "Alice", day(5)).await) {
            SignInOutcome::Signed(receipt) => {
                assert_eq!(receipt.streak, 2);
                assert_eq!(receipt.earned, 11);
                assert_eq!(receipt.total_days, 5);
                assert_eq!(receipt.balance, 29);
            }
            other => panic!("Expected sign-in, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_groups_are_separate_ledgers() {
        let db = TestDatabase::new().await;
        let ledger = db.ledger();

        assert_ok!(ledger.sign_in("u1", "g1", "Alice", day(1)).await);
        assert_ok!(ledger.sign_in("u1", "g2", "Alice", day(1)).await);
        assert_ok!(ledger.sign_in("u1", "g2", "Alice", day(2)).await);

        assert_eq!(assert_ok!(ledger.balance("u1", "g1").await), 10);
        assert_eq!(assert_ok!(ledger.balance("u1", "g2").await), 21);
        assert_eq!(assert_ok!(ledger.leaderboard("g1", None).await).len(), 1);
        assert_eq!(assert_ok!(ledger.history("u1", "g2", None).await).len(), 2);
    }

    #[tokio::test]
    async fn test_leaderboard_order_and_limit() {
        let db = TestDatabase::new().await;
        let ledger = db.ledger();

        for (i, user) in ["a", "b", "c"].iter().enumerate() {
            for d in 1..=(i as u32 + 1) {
                assert_ok!(ledger.sign_in(user, "g1", &user.to_uppercase(), day(d)).await);
            }
        }

        let board = assert_ok!(ledger.leaderboard("g1", Some(2)).await);
        let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert_eq!(board[0].points, 33);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let db = TestDatabase::new().await;
        let ledger = db.ledger();

        assert_ok!(ledger.sign_in("u1", "g1", "Alice", day(1)).await);
        assert_ok!(ledger.sign_in("u1", "g1", "Alice", day(2)).await);
        assert_ok!(ledger.backfill("u1", "g1", "Alice", day(4)).await);

        let history = assert_ok!(ledger.history("u1", "g1", Some(2)).await);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].change, -BACKFILL_COST);
        assert!(history[0].reason.contains("2025-06-03"));
        assert_eq!(history[1].change, 11);
    }

    #[tokio::test]
    async fn test_concurrent_sign_ins_grant_once() {
        let db = TestDatabase::new().await;

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let ledger = db.ledger_owned();
                tokio::spawn(async move { ledger.sign_in("u1", "g1", "Alice", day(1)).await })
            })
            .collect();

        let mut signed = 0;
        for handle in handles {
            if let Ok(Ok(SignInOutcome::Signed(_))) = handle.await {
                signed += 1;
            }
        }

        assert_eq!(signed, 1);
        assert_eq!(assert_ok!(db.ledger().balance("u1", "g1").await), 10);
    }
}
