use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::Result,
    filter::ListFilter,
    models::{
        common::{DataEnvelope, ListParams},
        invoice::Invoice,
        payment::Payment,
        transaction::Transaction,
    },
    AppState,
};

/// Dashboard headline numbers for one organization and an optional date range.
/// Totals are exact decimal sums of the stored amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_cash_flow: Decimal,
    pub transaction_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub invoiced_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding_total: Decimal,
    pub overdue_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub payments_received: Decimal,
}

impl FinancialSummary {
    /// Only completed transactions and payments count toward cash flow;
    /// drafts never count as invoiced.
    pub fn compute(transactions: &[Transaction], invoices: &[Invoice], payments: &[Payment]) -> Self {
        let mut summary = Self::default();

        for t in transactions.iter().filter(|t| t.status == "completed") {
            summary.transaction_count += 1;
            match t.kind.as_str() {
                "income" => summary.total_income += t.amount,
                "expense" => summary.total_expense += t.amount,
                _ => {}
            }
        }

        for inv in invoices.iter().filter(|i| i.status != "draft") {
            summary.invoiced_total += inv.amount;
            match inv.status.as_str() {
                "sent" => summary.outstanding_total += inv.amount,
                "overdue" => {
                    summary.outstanding_total += inv.amount;
                    summary.overdue_count += 1;
                }
                "paid" => summary.paid_total += inv.amount,
                _ => {}
            }
        }

        summary.payments_received = payments
            .iter()
            .filter(|p| p.status == "completed")
            .map(|p| p.amount)
            .sum();

        summary.net_cash_flow = summary.total_income - summary.total_expense;
        summary
    }
}

pub async fn summary(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<DataEnvelope<FinancialSummary>>> {
    let Query(params) = params?;
    let organization_id = params.organization_id()?;
    let range = ListFilter::date_range(&params)?;

    let (transactions, invoices, payments) = tokio::try_join!(
        state.transactions.list(organization_id, &range),
        state.invoices.list(organization_id, &range),
        state.payments.list(organization_id, &range),
    )?;

    let summary = FinancialSummary::compute(&transactions, &invoices, &payments);
    tracing::debug!(%organization_id, ?summary, "Computed financial summary");
    Ok(Json(DataEnvelope::new(summary)))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn transaction(kind: &str, status: &str, amount: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            created_by: Uuid::nil(),
            description: "test".into(),
            amount: dec(amount),
            kind: kind.into(),
            category: None,
            status: status.into(),
            transaction_date: date!(2024 - 01 - 15),
            created_at: datetime!(2024-01-15 12:00 UTC),
        }
    }

    fn invoice(status: &str, amount: &str) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            created_by: Uuid::nil(),
            invoice_number: "INV-001".into(),
            client_name: "Client".into(),
            client_email: None,
            amount: dec(amount),
            status: status.into(),
            issue_date: date!(2024 - 01 - 15),
            due_date: None,
            notes: None,
            created_at: datetime!(2024-01-15 12:00 UTC),
        }
    }

    fn payment(status: &str, amount: &str) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            organization_id: Uuid::nil(),
            created_by: Uuid::nil(),
            invoice_id: None,
            amount: dec(amount),
            method: Some("card".into()),
            reference: None,
            status: status.into(),
            payment_date: date!(2024 - 01 - 15),
            created_at: datetime!(2024-01-15 12:00 UTC),
        }
    }

    #[test]
    fn empty_inputs_give_zeroes() {
        assert_eq!(FinancialSummary::compute(&[], &[], &[]), FinancialSummary::default());
    }

    #[test]
    fn cash_flow_counts_completed_transactions_only() {
        let summary = FinancialSummary::compute(
            &[
                transaction("income", "completed", "1000.10"),
                transaction("income", "pending", "500.0"),
                transaction("expense", "completed", "250.05"),
            ],
            &[],
            &[],
        );

        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.total_income, dec("1000.10"));
        assert_eq!(summary.total_expense, dec("250.05"));
        assert_eq!(summary.net_cash_flow, dec("750.05"));
    }

    #[test]
    fn invoice_totals_by_status() {
        let summary = FinancialSummary::compute(
            &[],
            &[
                invoice("draft", "999.0"),
                invoice("sent", "100.0"),
                invoice("overdue", "50.0"),
                invoice("paid", "300.0"),
            ],
            &[payment("completed", "300.0"), payment("failed", "20.0")],
        );

        assert_eq!(summary.invoiced_total, dec("450.0"));
        assert_eq!(summary.outstanding_total, dec("150.0"));
        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.paid_total, dec("300.0"));
        assert_eq!(summary.payments_received, dec("300.0"));
    }

    #[test]
    fn sums_are_exact_to_the_cent() {
        let summary = FinancialSummary::compute(
            &[
                transaction("income", "completed", "0.10"),
                transaction("income", "completed", "0.20"),
                transaction("expense", "completed", "1.01"),
            ],
            &[],
            &[],
        );

        assert_eq!(summary.total_income, dec("0.30"));
        assert_eq!(summary.net_cash_flow, dec("-0.71"));
    }
}
