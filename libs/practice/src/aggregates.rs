//! KPI aggregation over payment, client and appointment lists

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    calendar::CalendarContext,
    models::{Appointment, AppointmentStatus, Client, ClientStatus, Payment, PaymentStatus},
};

/// Sum of the amounts of completed payments
pub fn total_revenue<'a, I>(payments: I) -> Decimal
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .map(|p| p.amount)
        .sum()
}

pub fn count_with_status(payments: &[Payment], status: PaymentStatus) -> usize {
    payments.iter().filter(|p| p.status == status).count()
}

/// Figures shown above the payments list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub total_revenue: Decimal,
    pub pending_payments: usize,
    pub completed_payments: usize,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        Self {
            total_revenue: total_revenue(payments),
            pending_payments: count_with_status(payments, PaymentStatus::Pending),
            completed_payments: count_with_status(payments, PaymentStatus::Completed),
        }
    }
}

/// Practice overview for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub active_clients: usize,
    pub appointments_today: usize,
    /// Completed appointments as a percentage of the ones not cancelled
    pub session_completion_rate: f64,
    pub revenue_this_month: Decimal,
    /// Mean amount of a completed payment
    pub average_payment_value: Decimal,
}

impl DashboardSummary {
    pub fn compute(
        clients: &[Client],
        appointments: &[Appointment],
        payments: &[Payment],
        ctx: &CalendarContext,
        now: DateTime<Utc>,
    ) -> Self {
        let today = ctx.today(now);

        let appointments_today = appointments
            .iter()
            .filter(|a| ctx.local_start(a).date() == today)
            .count();

        let revenue_this_month = total_revenue(
            payments
                .iter()
                .filter(|p| same_month(p.payment_date, today)),
        );

        let completed_count = count_with_status(payments, PaymentStatus::Completed);
        let average_payment_value = if completed_count == 0 {
            Decimal::ZERO
        } else {
            total_revenue(payments) / Decimal::from(completed_count)
        };

        Self {
            total_clients: clients.len(),
            active_clients: clients
                .iter()
                .filter(|c| c.status == ClientStatus::Active)
                .count(),
            appointments_today,
            session_completion_rate: completion_rate(appointments),
            revenue_this_month,
            average_payment_value,
        }
    }
}

/// Percentage of non-cancelled appointments that were completed; 0 when there are none
pub fn completion_rate(appointments: &[Appointment]) -> f64 {
    let considered = appointments
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .count();
    if considered == 0 {
        return 0.0;
    }
    let completed = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();
    completed as f64 * 100.0 / considered as f64
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use uuid::Uuid;

    fn payment(amount: Decimal, status: PaymentStatus, day: NaiveDate) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            client_id: Uuid::new_v4(),
            package_id: None,
            service_id: None,
            amount,
            currency: Some("USD".to_string()),
            payment_method: None,
            status,
            transaction_id: None,
            payment_date: day,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            client: None,
            service: None,
            package: None,
        }
    }

    fn appointment(start: DateTime<Utc>, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            client_id: Uuid::new_v4(),
            service_id: None,
            title: "Session".to_string(),
            description: None,
            start_time: start,
            end_time: start + TimeDelta::hours(1),
            status,
            location: None,
            notes: None,
            created_at: start,
            updated_at: start,
            client: None,
            service: None,
        }
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn revenue_of_nothing_is_zero() {
        assert_eq!(total_revenue(&[] as &[Payment]), Decimal::ZERO);
    }

    #[test]
    fn only_completed_payments_count_towards_revenue() {
        let payments = vec![
            payment(Decimal::new(8500, 2), PaymentStatus::Completed, may(1)),
            payment(Decimal::new(4000, 2), PaymentStatus::Pending, may(2)),
            payment(Decimal::new(1000, 2), PaymentStatus::Refunded, may(3)),
            payment(Decimal::new(1000, 2), PaymentStatus::Failed, may(3)),
        ];
        assert_eq!(total_revenue(&payments), Decimal::new(8500, 2));
    }

    #[test]
    fn adding_a_completed_payment_adds_its_amount() {
        let mut payments = vec![payment(Decimal::new(1999, 2), PaymentStatus::Completed, may(1))];
        let before = total_revenue(&payments);

        let extra = Decimal::new(3333, 2);
        payments.push(payment(extra, PaymentStatus::Completed, may(2)));

        assert_eq!(total_revenue(&payments), before + extra);
    }

    #[test]
    fn payment_summary_counts_by_status() {
        let payments = vec![
            payment(Decimal::from(100), PaymentStatus::Completed, may(1)),
            payment(Decimal::from(50), PaymentStatus::Completed, may(2)),
            payment(Decimal::from(75), PaymentStatus::Pending, may(3)),
        ];

        let summary = PaymentSummary::from_payments(&payments);
        assert_eq!(summary.total_revenue, Decimal::from(150));
        assert_eq!(summary.pending_payments, 1);
        assert_eq!(summary.completed_payments, 2);
    }

    #[test]
    fn completion_rate_ignores_cancelled_appointments() {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let appointments = vec![
            appointment(start, AppointmentStatus::Completed),
            appointment(start, AppointmentStatus::Completed),
            appointment(start, AppointmentStatus::Completed),
            appointment(start, AppointmentStatus::NoShow),
            appointment(start, AppointmentStatus::Cancelled),
        ];
        assert_eq!(completion_rate(&appointments), 75.0);
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn dashboard_summary_uses_the_owner_day_and_month() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap();
        let appointments = vec![
            appointment(now, AppointmentStatus::Scheduled),
            appointment(now - TimeDelta::days(1), AppointmentStatus::Completed),
        ];
        let payments = vec![
            payment(Decimal::from(100), PaymentStatus::Completed, may(2)),
            payment(
                Decimal::from(60),
                PaymentStatus::Completed,
                NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            ),
            payment(Decimal::from(500), PaymentStatus::Pending, may(3)),
        ];

        let summary = DashboardSummary::compute(
            &[],
            &appointments,
            &payments,
            &CalendarContext::default(),
            now,
        );

        assert_eq!(summary.total_clients, 0);
        assert_eq!(summary.appointments_today, 1);
        assert_eq!(summary.revenue_this_month, Decimal::from(100));
        assert_eq!(summary.average_payment_value, Decimal::from(80));
        assert_eq!(summary.session_completion_rate, 50.0);
    }
}
