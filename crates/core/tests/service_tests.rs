// ═══════════════════════════════════════════════════════════════════
// Service Tests — LedgerService, AggregationService, ChartService,
// TrendService, DashboardService
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use financeflow_core::errors::CoreError;
use financeflow_core::models::analytics::Totals;
use financeflow_core::models::ledger::Ledger;
use financeflow_core::models::settings::Settings;
use financeflow_core::models::setup::SetupAmounts;
use financeflow_core::models::transaction::{Transaction, TransactionDraft, TransactionKind};
use financeflow_core::random::{RandomSource, SeededRandom, SequenceRandom};
use financeflow_core::services::aggregation_service::AggregationService;
use financeflow_core::services::chart_service::{ChartService, PLACEHOLDER_LABEL};
use financeflow_core::services::dashboard_service::DashboardService;
use financeflow_core::services::ledger_service::LedgerService;
use financeflow_core::services::trend_service::TrendService;

const EPS: f64 = 1e-9;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn tx(id: i64, amount: f64, kind: TransactionKind, category: &str) -> Transaction {
    Transaction::new(id, format!("tx {id}"), amount, kind, category, d(2026, 10, 1))
}

/// Salário 6200 income, Moradia 1500, Alimentação 650.50, Transporte 45.90.
fn sample_ledger() -> Ledger {
    Ledger::from_transactions(vec![
        tx(1, 6200.0, TransactionKind::Income, "Salário"),
        tx(2, 1500.0, TransactionKind::Expense, "Moradia"),
        tx(3, 650.50, TransactionKind::Expense, "Alimentação"),
        tx(4, 45.90, TransactionKind::Expense, "Transporte"),
    ])
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService
// ═══════════════════════════════════════════════════════════════════

mod ledger_service {
    use super::*;

    #[test]
    fn append_draft_assigns_id_and_date() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let draft = TransactionDraft::new("  Cinema ", 40.0, TransactionKind::Expense, "Lazer");
        let id = svc.append_draft(&mut ledger, draft, d(2026, 10, 16), 1_700_000_000_000).unwrap();

        assert_eq!(id, 1_700_000_000_000);
        let stored = &ledger.transactions()[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.description, "Cinema");
        assert_eq!(stored.date, d(2026, 10, 16));
    }

    #[test]
    fn append_draft_keeps_explicit_date() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let draft = TransactionDraft::new("Cinema", 40.0, TransactionKind::Expense, "Lazer").on(d(2026, 9, 2));
        svc.append_draft(&mut ledger, draft, d(2026, 10, 16), 10).unwrap();
        assert_eq!(ledger.transactions()[0].date, d(2026, 9, 2));
    }

    #[test]
    fn same_timestamp_gives_unique_ids() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let a = svc
            .append_draft(&mut ledger, TransactionDraft::new("a", 1.0, TransactionKind::Expense, "x"), d(2026, 10, 16), 500)
            .unwrap();
        let b = svc
            .append_draft(&mut ledger, TransactionDraft::new("b", 1.0, TransactionKind::Expense, "x"), d(2026, 10, 16), 500)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(b, 501);
    }

    #[test]
    fn rejected_input_leaves_ledger_unchanged() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        for draft in [
            TransactionDraft::new("", 10.0, TransactionKind::Expense, "Lazer"),
            TransactionDraft::new("Cinema", 0.0, TransactionKind::Expense, "Lazer"),
            TransactionDraft::new("Cinema", -3.0, TransactionKind::Expense, "Lazer"),
            TransactionDraft::new("Cinema", f64::NAN, TransactionKind::Expense, "Lazer"),
        ] {
            assert!(svc.append_draft(&mut ledger, draft.clone(), d(2026, 10, 16), 99).is_err());
            // Rejecting twice changes nothing either.
            assert!(svc.append_draft(&mut ledger, draft, d(2026, 10, 16), 99).is_err());
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn id_after_max_i64_reuses_smallest_free_id() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::from_transactions(vec![
            tx(1, 10.0, TransactionKind::Expense, "Lazer"),
            tx(i64::MAX, 20.0, TransactionKind::Expense, "Lazer"),
        ]);
        let draft = TransactionDraft::new("Cinema", 40.0, TransactionKind::Expense, "Lazer");
        let id = svc.append_draft(&mut ledger, draft, d(2026, 10, 16), 1_700_000_000_000).unwrap();

        assert_eq!(id, 2);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn append_rejects_overflowing_total() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::from_transactions(vec![tx(1, 1e308, TransactionKind::Expense, "Lazer")]);

        let err = svc.append(&mut ledger, tx(2, 1e308, TransactionKind::Expense, "Lazer"));
        assert!(matches!(err, Err(CoreError::ValidationError(_))));
        assert_eq!(ledger.len(), 1);

        // The other kind has its own total
        svc.append(&mut ledger, tx(3, 1e308, TransactionKind::Income, "Salário")).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn replace_all_rejects_overflowing_total() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let huge = vec![
            tx(1, 1e308, TransactionKind::Expense, "Lazer"),
            tx(2, 1e308, TransactionKind::Expense, "Moradia"),
        ];
        assert!(svc.replace_all(&mut ledger, huge).is_err());
        assert_eq!(ledger, sample_ledger());
    }

    #[test]
    fn append_rejects_duplicate_id() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let err = svc.append(&mut ledger, tx(2, 5.0, TransactionKind::Expense, "Lazer"));
        assert!(err.is_err());
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn replace_all_is_all_or_nothing() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        let bad = vec![
            tx(10, 5.0, TransactionKind::Expense, "Lazer"),
            tx(11, -1.0, TransactionKind::Expense, "Lazer"),
        ];
        assert!(svc.replace_all(&mut ledger, bad).is_err());
        assert_eq!(ledger, before);

        let dupes = vec![
            tx(10, 5.0, TransactionKind::Expense, "Lazer"),
            tx(10, 6.0, TransactionKind::Expense, "Lazer"),
        ];
        assert!(svc.replace_all(&mut ledger, dupes).is_err());
        assert_eq!(ledger, before);

        svc.replace_all(&mut ledger, vec![tx(10, 5.0, TransactionKind::Expense, "Lazer")]).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn seed_from_setup_skips_zero_rent() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let count = svc
            .seed_from_setup(&mut ledger, &SetupAmounts::new(5000.0, 0.0, 200.0, 300.0), d(2026, 10, 16))
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(ledger.len(), 3);
        let mut ids: Vec<i64> = ledger.transactions().iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ledger.transactions().iter().all(|t| t.date == d(2026, 10, 16)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// AggregationService
// ═══════════════════════════════════════════════════════════════════

mod aggregation {
    use super::*;

    #[test]
    fn sample_totals() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        assert!(approx(totals.total_income, 6200.0));
        assert!(approx(totals.total_expense, 2196.40));
        assert!(approx(totals.net_balance, 4003.60));
    }

    #[test]
    fn net_balance_is_exact_difference() {
        let svc = AggregationService::new();
        let mut rng = SeededRandom::new(7);
        for n in 0..20 {
            let txs = (0..n)
                .map(|i| {
                    let kind = if rng.next_unit() < 0.5 { TransactionKind::Income } else { TransactionKind::Expense };
                    tx(i, 0.01 + rng.next_unit() * 1000.0, kind, "x")
                })
                .collect();
            let totals = svc.aggregate(&Ledger::from_transactions(txs));
            assert_eq!(totals.net_balance, totals.total_income - totals.total_expense);
        }
    }

    #[test]
    fn overflowing_sums_saturate() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 1e308, TransactionKind::Income, "Salário"),
            tx(2, 1e308, TransactionKind::Expense, "Lazer"),
            tx(3, 1e308, TransactionKind::Expense, "Lazer"),
        ]);
        let totals = AggregationService::new().aggregate(&ledger);
        assert_eq!(totals.total_income, 1e308);
        assert_eq!(totals.total_expense, f64::MAX);
        assert!(totals.net_balance.is_finite());
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let totals = AggregationService::new().aggregate(&Ledger::new());
        assert_eq!(totals.total_income, 0.0);
        assert_eq!(totals.total_expense, 0.0);
        assert_eq!(totals.net_balance, 0.0);
    }

    #[test]
    fn sample_category_totals() {
        let totals = AggregationService::new().category_totals(&sample_ledger(), "Salário");
        assert_eq!(totals.categories(), vec!["Moradia", "Alimentação", "Transporte"]);
        assert!(approx(totals.get("Moradia").unwrap(), 1500.0));
        assert!(approx(totals.get("Alimentação").unwrap(), 650.50));
        assert!(approx(totals.get("Transporte").unwrap(), 45.90));
    }

    #[test]
    fn income_category_excluded_even_for_expenses() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 100.0, TransactionKind::Expense, "Salário"),
            tx(2, 50.0, TransactionKind::Expense, "Lazer"),
        ]);
        let totals = AggregationService::new().category_totals(&ledger, "Salário");
        assert_eq!(totals.get("Salário"), None);
        assert_eq!(totals.categories(), vec!["Lazer"]);
    }

    #[test]
    fn income_kind_never_counted() {
        let ledger = Ledger::from_transactions(vec![tx(1, 100.0, TransactionKind::Income, "Freela")]);
        assert!(AggregationService::new().category_totals(&ledger, "Salário").is_empty());
    }

    #[test]
    fn first_seen_order_survives_repeats() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 1.0, TransactionKind::Expense, "B"),
            tx(2, 1.0, TransactionKind::Expense, "A"),
            tx(3, 1.0, TransactionKind::Expense, "B"),
        ]);
        let totals = AggregationService::new().category_totals(&ledger, "Salário");
        assert_eq!(totals.categories(), vec!["B", "A"]);
        assert_eq!(totals.get("B"), Some(2.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn sectors_close_the_circle() {
        let totals = AggregationService::new().category_totals(&sample_ledger(), "Salário");
        let chart = ChartService::new().build_donut(&totals, totals.sum(), &Settings::default());

        assert_eq!(chart.sectors.len(), 3);
        assert_eq!(chart.sectors[0].start_angle, 0.0);
        for pair in chart.sectors.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
            assert!(pair[0].span() > 0.0);
        }
        let total_span: f64 = chart.sectors.iter().map(|s| s.span()).sum();
        assert!((total_span - 360.0).abs() < 1e-6);
        assert!((chart.sectors.last().unwrap().end_angle - 360.0).abs() < 1e-6);
    }

    #[test]
    fn spans_are_proportional() {
        let totals = AggregationService::new().category_totals(&sample_ledger(), "Salário");
        let chart = ChartService::new().build_donut(&totals, totals.sum(), &Settings::default());
        let expected = 1500.0 / 2196.40 * 360.0;
        assert!((chart.sectors[0].span() - expected).abs() < 1e-6);
    }

    #[test]
    fn colors_and_legend() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 100.0, TransactionKind::Expense, "Moradia"),
            tx(2, 100.0, TransactionKind::Expense, "Pets"),
        ]);
        let totals = AggregationService::new().category_totals(&ledger, "Salário");
        let chart = ChartService::new().build_donut(&totals, 200.0, &Settings::default());

        assert_eq!(chart.sectors[0].color, "#05CD99");
        assert_eq!(chart.sectors[1].color, "#ccc");
        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.legend[0].category, "Moradia");
        assert_eq!(chart.legend[0].formatted_value, "R$ 100,00");
        assert_eq!(chart.formatted_total, "R$ 200,00");
        assert!(approx(chart.sectors[0].end_angle, 180.0));
    }

    #[test]
    fn zero_expense_gives_placeholder() {
        let totals = AggregationService::new().category_totals(&Ledger::new(), "Salário");
        let chart = ChartService::new().build_donut(&totals, 0.0, &Settings::default());

        assert_eq!(chart.sectors.len(), 1);
        let only = &chart.sectors[0];
        assert_eq!(only.category, PLACEHOLDER_LABEL);
        assert_eq!(only.color, "#1B254B");
        assert_eq!(only.start_angle, 0.0);
        assert_eq!(only.end_angle, 360.0);
        assert!(chart.legend.is_empty());
        assert!(chart.is_placeholder());
        assert_eq!(chart.formatted_total, "R$ 0,00");
    }

    #[test]
    fn income_only_ledger_gives_placeholder() {
        let ledger = Ledger::from_transactions(vec![tx(1, 500.0, TransactionKind::Income, "Salário")]);
        let totals = AggregationService::new().category_totals(&ledger, "Salário");
        let chart = ChartService::new().build_donut(&totals, totals.sum(), &Settings::default());
        assert!(chart.is_placeholder());
        assert!(chart.sectors.iter().all(|s| !s.start_angle.is_nan() && !s.end_angle.is_nan()));
    }

    #[test]
    fn infinite_total_gives_placeholder() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 1e308, TransactionKind::Expense, "Lazer"),
            tx(2, 1e308, TransactionKind::Expense, "Lazer"),
        ]);
        let totals = AggregationService::new().category_totals(&ledger, "Salário");
        let chart = ChartService::new().build_donut(&totals, totals.sum(), &Settings::default());

        assert!(chart.is_placeholder());
        assert_eq!(chart.total_expense, 0.0);
        assert!(chart.sectors.iter().all(|s| s.start_angle.is_finite() && s.end_angle.is_finite()));
    }

    #[test]
    fn nan_total_gives_placeholder() {
        let mut totals = financeflow_core::models::analytics::CategoryTotals::new();
        totals.add("Lazer", 10.0);
        let chart = ChartService::new().build_donut(&totals, f64::NAN, &Settings::default());
        assert!(chart.is_placeholder());
    }
}

// ═══════════════════════════════════════════════════════════════════
// TrendService
// ═══════════════════════════════════════════════════════════════════

mod trend {
    use super::*;

    const MONTHS: [&str; 6] = ["Mai", "Jun", "Jul", "Ago", "Set", "Out"];

    #[test]
    fn current_period_uses_real_totals() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        let mut rng = SeededRandom::new(1);
        let series = TrendService::new().build_series(&totals, &labels(&MONTHS), &mut rng);

        assert_eq!(series.len(), 6);
        let last = series.last().unwrap();
        assert_eq!(last.period_label, "Out");
        assert_eq!(last.income_value, totals.total_income);
        assert_eq!(last.expense_value, totals.total_expense);
        assert!(approx(last.income_bar_height_pct, 80.0));
    }

    #[test]
    fn prior_periods_within_bounds() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        for seed in 0..50 {
            let mut rng = SeededRandom::new(seed);
            let series = TrendService::new().build_series(&totals, &labels(&MONTHS), &mut rng);
            for point in &series[..5] {
                assert!(point.income_value >= 0.3 * totals.total_income);
                assert!(point.income_value <= 0.8 * totals.total_income);
                assert!(point.expense_value >= 0.3 * totals.total_expense);
                assert!(point.expense_value <= 0.8 * totals.total_expense);
                assert!(point.income_bar_height_pct <= 80.0);
            }
        }
    }

    #[test]
    fn exact_values_with_fixed_sequence() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        // Income draws first, then expense, per period.
        let mut rng = SequenceRandom::new(vec![0.0, 0.5]);
        let series = TrendService::new().build_series(&totals, &labels(&["Set", "Out"]), &mut rng);

        assert!(approx(series[0].income_value, 6200.0 * 0.3));
        assert!(approx(series[0].expense_value, totals.total_expense * 0.55));
        assert!(approx(series[0].income_bar_height_pct, 0.3 * 80.0));
    }

    #[test]
    fn scale_is_shared_across_periods() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        let mut rng = SequenceRandom::constant(0.5);
        let series = TrendService::new().build_series(&totals, &labels(&MONTHS), &mut rng);
        let scale = totals.total_income;
        for p in &series {
            assert!(approx(p.income_bar_height_pct, p.income_value / scale * 80.0));
            assert!(approx(p.expense_bar_height_pct, p.expense_value / scale * 80.0));
        }
    }

    #[test]
    fn empty_ledger_uses_floor_scale() {
        let totals = AggregationService::new().aggregate(&Ledger::new());
        let mut rng = SeededRandom::new(3);
        let series = TrendService::new().build_series(&totals, &labels(&MONTHS), &mut rng);
        for p in &series {
            assert_eq!(p.income_value, 0.0);
            assert_eq!(p.income_bar_height_pct, 0.0);
            assert_eq!(p.expense_bar_height_pct, 0.0);
        }
    }

    #[test]
    fn small_totals_scaled_against_floor() {
        let ledger = Ledger::from_transactions(vec![tx(1, 50.0, TransactionKind::Income, "Salário")]);
        let totals = AggregationService::new().aggregate(&ledger);
        let mut rng = SeededRandom::new(3);
        let series = TrendService::new().build_series(&totals, &labels(&["Out"]), &mut rng);
        assert!(approx(series[0].income_bar_height_pct, 40.0));
    }

    #[test]
    fn infinite_totals_give_finite_bars() {
        let totals = Totals {
            total_income: 1e308,
            total_expense: f64::INFINITY,
            net_balance: f64::NEG_INFINITY,
        };
        let mut rng = SeededRandom::new(3);
        let series = TrendService::new().build_series(&totals, &labels(&MONTHS), &mut rng);
        for p in &series {
            assert!((0.0..=80.0).contains(&p.income_bar_height_pct), "{p:?}");
            assert!((0.0..=80.0).contains(&p.expense_bar_height_pct), "{p:?}");
        }
    }

    #[test]
    fn no_labels_no_points() {
        let totals = AggregationService::new().aggregate(&sample_ledger());
        let mut rng = SeededRandom::new(3);
        assert!(TrendService::new().build_series(&totals, &[], &mut rng).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// DashboardService
// ═══════════════════════════════════════════════════════════════════

mod dashboard {
    use super::*;

    #[test]
    fn builds_full_view() {
        let mut rng = SequenceRandom::constant(0.5);
        let view = DashboardService::new().build_view(
            &sample_ledger(),
            &Settings::default(),
            &labels(&["Set", "Out"]),
            &mut rng,
        );

        assert_eq!(view.formatted_balance, "R$ 4.003,60");
        assert_eq!(view.formatted_income, "R$ 6.200,00");
        assert_eq!(view.formatted_expense, "R$ 2.196,40");
        assert_eq!(view.chart.legend.len(), 3);
        assert_eq!(view.chart.formatted_total, "R$ 2.196,40");
        assert_eq!(view.trend.len(), 2);
    }

    #[test]
    fn huge_amounts_never_produce_nan() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 1e308, TransactionKind::Income, "Salário"),
            tx(2, 1e308, TransactionKind::Expense, "Lazer"),
            tx(3, 1e308, TransactionKind::Expense, "Lazer"),
        ]);
        let mut rng = SeededRandom::new(11);
        let view = DashboardService::new().build_view(
            &ledger,
            &Settings::default(),
            &labels(&["Set", "Out"]),
            &mut rng,
        );

        assert!(view.totals.net_balance.is_finite());
        assert!(view.chart.is_placeholder());
        for s in &view.chart.sectors {
            assert!(s.start_angle.is_finite() && s.end_angle.is_finite());
        }
        for p in &view.trend {
            assert!(!p.income_bar_height_pct.is_nan());
            assert!(!p.expense_bar_height_pct.is_nan());
        }
    }

    #[test]
    fn recent_list_newest_first_and_limited() {
        let txs = (1..=8)
            .map(|i| tx(i, 10.0, TransactionKind::Expense, "Lazer"))
            .collect();
        let mut rng = SequenceRandom::constant(0.5);
        let view = DashboardService::new().build_view(
            &Ledger::from_transactions(txs),
            &Settings::default(),
            &labels(&["Out"]),
            &mut rng,
        );
        let ids: Vec<i64> = view.recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        assert_eq!(view.recent[0].signed_amount, "- R$ 10,00");
        assert_eq!(view.recent[0].formatted_date, "01/10/2026");
    }

    #[test]
    fn donut_ignores_income_labelled_expenses() {
        let ledger = Ledger::from_transactions(vec![
            tx(1, 100.0, TransactionKind::Expense, "Salário"),
            tx(2, 50.0, TransactionKind::Expense, "Lazer"),
        ]);
        let mut rng = SequenceRandom::constant(0.5);
        let view = DashboardService::new().build_view(&ledger, &Settings::default(), &labels(&["Out"]), &mut rng);

        assert_eq!(view.totals.total_expense, 150.0);
        assert_eq!(view.chart.total_expense, 50.0);
        assert_eq!(view.chart.sectors.len(), 1);
        assert_eq!(view.chart.sectors[0].end_angle, 360.0);
    }
}
