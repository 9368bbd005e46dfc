// ═══════════════════════════════════════════════════════════════════
// Savings Tests: goal CRUD, allocation protocol, progress
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::category::SAVINGS_CATEGORY;
use finance_tracker_core::models::savings_goal::{GoalPatch, NewGoal, SavingsGoal};
use finance_tracker_core::models::transaction::{Transaction, TransactionType, MAX_AMOUNT};
use finance_tracker_core::services::savings_service::SavingsService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn svc() -> SavingsService {
    SavingsService::new()
}

fn goal(id: &str, name: &str, target: Decimal, current: Decimal) -> SavingsGoal {
    SavingsGoal {
        id: id.into(),
        name: name.into(),
        target,
        current,
        color: "#28a745".into(),
    }
}

fn emergency_fund() -> Vec<SavingsGoal> {
    vec![
        goal("1", "Emergency Fund", dec!(10000), dec!(2500)),
        goal("2", "Vacation", dec!(3000), dec!(800)),
    ]
}

fn month_of_data() -> Vec<Transaction> {
    vec![
        Transaction::income("Salary", dec!(5000), "other", d(2024, 1, 5)),
        Transaction::expense("Rent", dec!(1200), "housing", d(2024, 1, 10)),
    ]
}

// ═══════════════════════════════════════════════════════════════════
//  add_goal
// ═══════════════════════════════════════════════════════════════════

mod add_goal {
    use super::*;

    #[test]
    fn appends_with_fresh_id() {
        let goals = emergency_fund();
        let (updated, created) = svc()
            .add_goal(&goals, NewGoal::new("New Car", dec!(15000), dec!(5000), "#ffc107"))
            .unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated.last(), Some(&created));
        assert!(!created.id.is_empty());
        assert!(goals.iter().all(|g| g.id != created.id));
        assert_eq!(created.current, dec!(5000));
    }

    #[test]
    fn ids_are_unique() {
        let (goals, a) = svc()
            .add_goal(&[], NewGoal::new("A", dec!(1), Decimal::ZERO, "#000"))
            .unwrap();
        let (_, b) = svc()
            .add_goal(&goals, NewGoal::new("B", dec!(1), Decimal::ZERO, "#000"))
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn trims_name() {
        let (_, created) = svc()
            .add_goal(&[], NewGoal::new("  House  ", dec!(1), Decimal::ZERO, "#000"))
            .unwrap();
        assert_eq!(created.name, "House");
    }

    #[test]
    fn rejects_blank_name() {
        let err = svc()
            .add_goal(&[], NewGoal::new("   ", dec!(100), Decimal::ZERO, "#000"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn rejects_non_positive_target() {
        for target in [Decimal::ZERO, dec!(-1)] {
            let err = svc()
                .add_goal(&[], NewGoal::new("Goal", target, Decimal::ZERO, "#000"))
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[test]
    fn rejects_negative_current() {
        let err = svc()
            .add_goal(&[], NewGoal::new("Goal", dec!(100), dec!(-0.01), "#000"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn rejects_amounts_above_the_limit() {
        let over = MAX_AMOUNT + dec!(1);
        for new_goal in [
            NewGoal::new("Moon", over, Decimal::ZERO, "#000"),
            NewGoal::new("Moon", dec!(100), over, "#000"),
        ] {
            let err = svc().add_goal(&[], new_goal).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[test]
    fn allows_current_above_target() {
        let (_, created) = svc()
            .add_goal(&[], NewGoal::new("Done", dec!(100), dec!(150), "#000"))
            .unwrap();
        assert_eq!(created.current, dec!(150));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  edit_goal / delete_goal
// ═══════════════════════════════════════════════════════════════════

mod edit_and_delete {
    use super::*;

    #[test]
    fn edit_replaces_only_provided_fields() {
        let goals = emergency_fund();
        let patch = GoalPatch {
            target: Some(dec!(12000)),
            ..GoalPatch::default()
        };
        let updated = svc().edit_goal(&goals, "1", &patch).unwrap();
        assert_eq!(updated[0].target, dec!(12000));
        assert_eq!(updated[0].name, "Emergency Fund");
        assert_eq!(updated[0].current, dec!(2500));
        assert_eq!(updated[1], goals[1]);
    }

    #[test]
    fn edit_all_fields() {
        let patch = GoalPatch {
            name: Some("Rainy Day".into()),
            target: Some(dec!(500)),
            current: Some(dec!(50)),
            color: Some("#ff0000".into()),
        };
        let updated = svc().edit_goal(&emergency_fund(), "1", &patch).unwrap();
        assert_eq!(updated[0], goal("1", "Rainy Day", dec!(500), dec!(50)).with_color("#ff0000"));
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let err = svc()
            .edit_goal(&emergency_fund(), "nope", &GoalPatch::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn edit_revalidates() {
        let patch = GoalPatch {
            target: Some(Decimal::ZERO),
            ..GoalPatch::default()
        };
        let err = svc().edit_goal(&emergency_fund(), "1", &patch).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let patch = GoalPatch {
            name: Some(" ".into()),
            ..GoalPatch::default()
        };
        assert!(svc().edit_goal(&emergency_fund(), "1", &patch).is_err());
    }

    #[test]
    fn delete_removes_only_that_goal() {
        let updated = svc().delete_goal(&emergency_fund(), "1").unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, "2");
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let err = svc().delete_goal(&emergency_fund(), "9").unwrap_err();
        assert_eq!(
            err,
            CoreError::NotFound {
                kind: "Savings goal",
                id: "9".into()
            }
        );
    }
}

trait WithColor {
    fn with_color(self, color: &str) -> Self;
}

impl WithColor for SavingsGoal {
    fn with_color(mut self, color: &str) -> Self {
        self.color = color.into();
        self
    }
}

// ═══════════════════════════════════════════════════════════════════
//  allocate
// ═══════════════════════════════════════════════════════════════════

mod allocate {
    use super::*;

    #[test]
    fn scenario_successful_allocation() {
        let goals = emergency_fund();
        let tx = month_of_data();
        let today = d(2024, 1, 20);

        let (goals_after, tx_after) = svc()
            .allocate(&goals, &tx, "1", dec!(500), dec!(3800), today)
            .unwrap();

        assert_eq!(goals_after[0].current, dec!(3000));
        assert_eq!(goals_after[1], goals[1]);
        assert_eq!(tx_after.len(), tx.len() + 1);

        let added = tx_after.last().unwrap();
        assert_eq!(added.transaction_type, TransactionType::Expense);
        assert_eq!(added.amount, dec!(500));
        assert_eq!(added.category, SAVINGS_CATEGORY);
        assert_eq!(added.description, "Savings: Emergency Fund");
        assert_eq!(added.date, today);
        assert!(tx.iter().all(|t| t.id != added.id));
    }

    #[test]
    fn allocation_of_exact_balance_is_allowed() {
        let (goals_after, _) = svc()
            .allocate(&emergency_fund(), &[], "2", dec!(3800), dec!(3800), d(2024, 1, 20))
            .unwrap();
        assert_eq!(goals_after[1].current, dec!(4600));
    }

    #[test]
    fn over_funding_is_stored_unclamped() {
        let goals = vec![goal("g", "Small", dec!(100), dec!(90))];
        let (goals_after, _) = svc()
            .allocate(&goals, &[], "g", dec!(50), dec!(1000), d(2024, 1, 1))
            .unwrap();
        assert_eq!(goals_after[0].current, dec!(140));
    }

    #[test]
    fn scenario_insufficient_funds_leaves_state_unchanged() {
        let goals = emergency_fund();
        let tx = month_of_data();
        let goals_before = goals.clone();
        let tx_before = tx.clone();

        let err = svc()
            .allocate(&goals, &tx, "1", dec!(5000), dec!(3800), d(2024, 1, 20))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientFunds {
                requested: dec!(5000),
                available: dec!(3800)
            }
        );
        assert_eq!(goals, goals_before);
        assert_eq!(tx, tx_before);
    }

    #[test]
    fn non_positive_amount_is_validation_error() {
        for amount in [Decimal::ZERO, dec!(-10)] {
            let err = svc()
                .allocate(&emergency_fund(), &[], "1", amount, dec!(100), d(2024, 1, 1))
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[test]
    fn amount_or_result_above_the_limit_is_validation_error() {
        let err = svc()
            .allocate(&emergency_fund(), &[], "1", MAX_AMOUNT + dec!(1), Decimal::MAX, d(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let full = vec![goal("1", "Full", MAX_AMOUNT, MAX_AMOUNT)];
        let err = svc()
            .allocate(&full, &[], "1", dec!(1), dec!(100), d(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(full[0].current, MAX_AMOUNT);
    }

    #[test]
    fn unknown_goal_is_not_found() {
        let err = svc()
            .allocate(&emergency_fund(), &[], "missing", dec!(1), dec!(100), d(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn negative_available_balance_rejects_any_allocation() {
        let err = svc()
            .allocate(&emergency_fund(), &[], "1", dec!(1), dec!(-50), d(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
    }

    #[test]
    fn each_success_adds_exactly_one_transaction() {
        let mut goals = emergency_fund();
        let mut tx = month_of_data();
        for _ in 0..3 {
            let before = tx.len();
            let (g, t) = svc()
                .allocate(&goals, &tx, "2", dec!(100), dec!(3800), d(2024, 1, 21))
                .unwrap();
            assert_eq!(t.len(), before + 1);
            goals = g;
            tx = t;
        }
        assert_eq!(goals[1].current, dec!(1100));
        let savings_total: Decimal = tx
            .iter()
            .filter(|t| t.category == SAVINGS_CATEGORY)
            .map(|t| t.amount)
            .sum();
        assert_eq!(savings_total, dec!(300));
    }

    #[test]
    fn delete_after_allocation_keeps_history() {
        let (goals, tx) = svc()
            .allocate(&emergency_fund(), &[], "1", dec!(200), dec!(1000), d(2024, 1, 2))
            .unwrap();
        let goals = svc().delete_goal(&goals, "1").unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(tx.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Progress & summary
// ═══════════════════════════════════════════════════════════════════

mod progress {
    use super::*;

    #[test]
    fn partial_progress() {
        let p = svc().goal_progress(&goal("1", "EF", dec!(10000), dec!(2500)));
        assert_eq!(p.goal_id, "1");
        assert_eq!(p.percent, dec!(25));
        assert_eq!(p.remaining, dec!(7500));
        assert!(!p.achieved);
    }

    #[test]
    fn over_funded_goal_clamps_at_display_time() {
        let g = goal("1", "EF", dec!(100), dec!(250));
        let p = svc().goal_progress(&g);
        assert_eq!(p.percent, dec!(100));
        assert_eq!(p.remaining, Decimal::ZERO);
        assert!(p.achieved);
        assert_eq!(g.current, dec!(250));
    }

    #[test]
    fn zero_target_yields_zero_percent() {
        let p = svc().goal_progress(&goal("1", "Legacy", Decimal::ZERO, dec!(10)));
        assert_eq!(p.percent, Decimal::ZERO);
    }

    #[test]
    fn percent_rounded_to_two_places() {
        let p = svc().goal_progress(&goal("1", "Thirds", dec!(3), dec!(1)));
        assert_eq!(p.percent, dec!(33.33));
    }

    #[test]
    fn summary_totals() {
        let s = svc().summary(&emergency_fund());
        assert_eq!(s.total_saved, dec!(3300));
        assert_eq!(s.total_target, dec!(13000));
        assert_eq!(s.overall_percent, dec!(25.38));
    }

    #[test]
    fn oversized_stored_goals_do_not_panic() {
        let tiny_target = goal("1", "Odd", dec!(0.0000000001), Decimal::MAX);
        assert_eq!(svc().goal_progress(&tiny_target).percent, Decimal::ZERO);

        let inverted = goal("2", "Odd", Decimal::MAX, Decimal::MIN);
        assert_eq!(svc().goal_progress(&inverted).remaining, Decimal::ZERO);

        let huge = vec![
            goal("3", "Huge", Decimal::MAX, Decimal::MAX),
            goal("4", "Huge", Decimal::MAX, Decimal::MAX),
        ];
        let s = svc().summary(&huge);
        assert_eq!(s.total_saved, Decimal::MAX);
        assert_eq!(s.total_target, Decimal::MAX);
        assert_eq!(s.overall_percent, dec!(100));
    }

    #[test]
    fn summary_without_goals_is_zero() {
        let s = svc().summary(&[]);
        assert_eq!(s.total_saved, Decimal::ZERO);
        assert_eq!(s.total_target, Decimal::ZERO);
        assert_eq!(s.overall_percent, Decimal::ZERO);
    }
}
