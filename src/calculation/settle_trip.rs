//! Settling a whole trip.
//!
//! Runs validation, ledger aggregation, netting and greedy matching over a
//! [`TripSnapshot`] and packages the outcome with its audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, SettlementResult, TripSnapshot, WarningSeverity};

use super::ledger_aggregation::{AggregationResult, aggregate_ledger};
use super::plan_verification::verify_plan;
use super::simplify::simplify;

/// Warning code for trips whose expenses use more than one currency.
pub const WARNING_MIXED_CURRENCY: &str = "MIXED_CURRENCY";
/// Warning code for a pair that settlements pushed past zero.
pub const WARNING_OVERPAYMENT: &str = "OVERPAYMENT";
/// Warning code for a plan that leaves someone outside tolerance.
pub const WARNING_UNBALANCED_PLAN: &str = "UNBALANCED_PLAN";

/// Computes the settlement plan for one trip.
///
/// The plan currency is the first expense's currency, falling back to the
/// snapshot's declared currency and then to `settings.default_currency`.
/// No conversion is performed between currencies; mixing them only raises a
/// warning.
///
/// # Errors
///
/// Returns `InvalidExpense` or `InvalidSettlement` when a record in the
/// snapshot fails validation. Records from other trips are validated too.
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::settle_trip;
/// use trip_settlement::config::EngineSettings;
/// use trip_settlement::models::{ExpenseSplit, ParticipantId, SplitShare, TripSnapshot};
/// use rust_decimal::Decimal;
///
/// let mut snapshot = TripSnapshot::new("trip_001");
/// snapshot.expenses.push(ExpenseSplit {
///     id: "exp_001".to_string(),
///     trip_id: "trip_001".to_string(),
///     paid_by: ParticipantId::from("alice"),
///     currency: "USD".to_string(),
///     split_between: vec![
///         SplitShare { user_id: ParticipantId::from("alice"), amount: Decimal::new(2000, 2) },
///         SplitShare { user_id: ParticipantId::from("bob"), amount: Decimal::new(2000, 2) },
///     ],
/// });
///
/// let result = settle_trip(&snapshot, &EngineSettings::default())?;
/// assert_eq!(result.plan.len(), 1);
/// assert_eq!(result.plan.payments[0].from.as_str(), "bob");
/// assert_eq!(result.audit_trace.steps.len(), 3);
/// # Ok::<(), trip_settlement::error::EngineError>(())
/// ```
pub fn settle_trip(
    snapshot: &TripSnapshot,
    settings: &EngineSettings,
) -> EngineResult<SettlementResult> {
    let start_time = Instant::now();
    snapshot.validate()?;

    let mut step_number: u32 = 1;
    let mut steps = Vec::new();

    let aggregation = aggregate_ledger(
        &snapshot.expenses,
        &snapshot.settlements,
        &snapshot.trip_id,
        settings,
        step_number,
    );
    steps.push(aggregation.audit_step.clone());
    step_number += 1;

    let currency = aggregation
        .currency
        .clone()
        .or_else(|| snapshot.currency.clone())
        .unwrap_or_else(|| settings.default_currency.clone());

    let mut warnings = aggregation_warnings(&aggregation, snapshot.currency.as_deref());

    let simplification = simplify(&aggregation.balances, &currency, settings.tolerance, step_number);
    steps.extend(simplification.audit_steps);

    let verification = verify_plan(
        &simplification.plan,
        &simplification.net_balances,
        settings.tolerance,
    );
    if !verification.balanced {
        let residual: Decimal = verification.residuals.iter().map(|n| n.amount.abs()).sum();
        warnings.push(AuditWarning::new(
            WARNING_UNBALANCED_PLAN,
            format!(
                "{} participant(s) left with {} outstanding after the plan",
                verification.residuals.len(),
                residual.normalize()
            ),
            WarningSeverity::High,
        ));
    }

    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        trip_id = %snapshot.trip_id,
        currency = %currency,
        balances = aggregation.balances.len(),
        payments = simplification.plan.len(),
        warnings = warnings.len(),
        duration_us,
        "Trip settled"
    );

    Ok(SettlementResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        trip_id: snapshot.trip_id.clone(),
        currency,
        directed_balances: aggregation.balances,
        net_balances: simplification.net_balances,
        plan: simplification.plan,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

fn aggregation_warnings(
    aggregation: &AggregationResult,
    declared_currency: Option<&str>,
) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    let declared_differs = match (declared_currency, aggregation.currency.as_deref()) {
        (Some(declared), Some(found)) => declared != found,
        _ => false,
    };
    if aggregation.currencies_seen.len() > 1 || declared_differs {
        let mut seen = aggregation.currencies_seen.clone();
        if let Some(declared) = declared_currency {
            if !seen.iter().any(|c| c == declared) {
                seen.push(declared.to_string());
            }
        }
        warnings.push(AuditWarning::new(
            WARNING_MIXED_CURRENCY,
            format!(
                "Trip records use several currencies ({}); amounts were combined without conversion",
                seen.join(", ")
            ),
            WarningSeverity::Medium,
        ));
    }

    for pair in &aggregation.overpaid_pairs {
        warnings.push(AuditWarning::new(
            WARNING_OVERPAYMENT,
            format!(
                "{} paid {} {} more than owed",
                pair.debtor,
                pair.creditor,
                (-pair.amount).normalize()
            ),
            WarningSeverity::Low,
        ));
    }

    warnings
}
