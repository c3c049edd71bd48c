//! Property-based tests for interest matching and attendance bookkeeping.
//!
//! These tests verify that:
//! - Queries preserve exhibit / admission order
//! - Cost ordering is descending and stable on ties
//! - Revenue and balances always agree with the attendance ledger

use museum_sim::{reconcile, Exhibit, Money, Museum, Patron, SkipReason};
use proptest::prelude::*;

const NAMES: &[&str] = &["Gems", "Scrolls", "IMAX", "Dinosaurs", "Space"];

/// Strategy for (name, cost) exhibit specs drawn from a small name pool,
/// so patrons actually hit them and ties on cost are common.
fn arb_exhibits() -> impl Strategy<Value = Vec<(String, Money)>> {
    prop::collection::vec(
        (prop::sample::select(NAMES), 0..20i64).prop_map(|(n, c)| (n.to_string(), c)),
        0..8,
    )
}

/// Strategy for (spending money, interests) patron specs.
fn arb_patrons() -> impl Strategy<Value = Vec<(Money, Vec<String>)>> {
    prop::collection::vec(
        (
            0..40i64,
            prop::collection::vec(prop::sample::select(NAMES).prop_map(str::to_string), 0..5),
        ),
        0..6,
    )
}

fn build_museum(exhibits: &[(String, Money)]) -> Museum {
    let mut museum = Museum::new("Property Museum");
    for (name, cost) in exhibits {
        museum.add_exhibit(Exhibit::new(name.clone(), *cost).unwrap());
    }
    museum
}

fn build_patron(i: usize, money: Money, interests: &[String]) -> Patron {
    Patron::new(format!("Patron {}", i), money)
        .unwrap()
        .with_interests(interests.iter().cloned())
}

proptest! {
    /// interested iff the exhibit name is one of the patron's interests.
    #[test]
    fn interested_is_membership(exhibits in arb_exhibits(), patrons in arb_patrons()) {
        let museum = build_museum(&exhibits);
        for (i, (money, interests)) in patrons.iter().enumerate() {
            let patron = build_patron(i, *money, interests);
            for exhibit in museum.exhibits() {
                prop_assert_eq!(
                    museum.interested(&patron, exhibit),
                    interests.iter().any(|i| i == exhibit.name())
                );
            }
        }
    }

    /// recommend_exhibits is the interested subset, in exhibit order.
    #[test]
    fn recommend_preserves_order(exhibits in arb_exhibits(), patrons in arb_patrons()) {
        let museum = build_museum(&exhibits);
        for (i, (money, interests)) in patrons.iter().enumerate() {
            let patron = build_patron(i, *money, interests);
            let expected: Vec<&Exhibit> = museum
                .exhibits()
                .iter()
                .filter(|e| interests.iter().any(|i| i == e.name()))
                .collect();
            prop_assert_eq!(museum.recommend_exhibits(&patron), expected);
        }
    }

    /// Cost ordering is non-increasing and keeps exhibit order on ties.
    #[test]
    fn by_cost_is_descending_and_stable(exhibits in arb_exhibits(), patrons in arb_patrons()) {
        let museum = build_museum(&exhibits);
        let position = |e: &Exhibit| museum.exhibits().iter().position(|x| x.id() == e.id()).unwrap();

        for (i, (money, interests)) in patrons.iter().enumerate() {
            let patron = build_patron(i, *money, interests);
            let by_cost = museum.interested_exhibits_by_cost(&patron);

            prop_assert_eq!(by_cost.len(), museum.recommend_exhibits(&patron).len());
            for pair in by_cost.windows(2) {
                prop_assert!(pair[0].cost() >= pair[1].cost());
                if pair[0].cost() == pair[1].cost() {
                    prop_assert!(position(pair[0]) < position(pair[1]));
                }
            }
        }
    }

    /// Grouping never lists an exhibit nobody likes and agrees with
    /// patrons_who_like_exhibit.
    #[test]
    fn grouping_matches_per_exhibit_query(exhibits in arb_exhibits(), patrons in arb_patrons()) {
        let mut museum = build_museum(&exhibits);
        for (i, (money, interests)) in patrons.iter().enumerate() {
            museum.admit(build_patron(i, *money, interests));
        }

        for (exhibit, fans) in museum.patrons_by_exhibit_interest() {
            prop_assert!(!fans.is_empty());
            prop_assert_eq!(fans, museum.patrons_who_like_exhibit(exhibit));
        }
    }

    /// Revenue, balances and the attendance map all agree with the ledger.
    #[test]
    fn books_always_balance(exhibits in arb_exhibits(), patrons in arb_patrons()) {
        let mut museum = build_museum(&exhibits);

        for (i, (money, interests)) in patrons.iter().enumerate() {
            let report = museum.admit(build_patron(i, *money, interests));

            prop_assert_eq!(report.remaining_money, money - report.spent());
            prop_assert!(report.remaining_money >= 0);
            for pair in report.attended.windows(2) {
                prop_assert!(pair[0].cost >= pair[1].cost);
            }
            // Anything skipped was unaffordable at that moment
            for skipped in &report.skipped {
                prop_assert_eq!(skipped.reason, SkipReason::Unaffordable);
                prop_assert!(skipped.cost > skipped.balance);
            }
        }

        let ledger_total: Money = museum.attendance().iter().map(|a| a.cost).sum();
        prop_assert_eq!(museum.revenue(), ledger_total);

        for patron in museum.patrons() {
            let spent: Money = museum
                .attendance()
                .iter()
                .filter(|a| a.patron_id == patron.id)
                .map(|a| a.cost)
                .sum();
            let (start, _) = &patrons[patron.name.trim_start_matches("Patron ").parse::<usize>().unwrap()];
            prop_assert_eq!(patron.spending_money(), start - spent);
        }

        let report = reconcile(&museum);
        prop_assert!(report.is_balanced(), "{:?}", report.discrepancies);
    }
}
