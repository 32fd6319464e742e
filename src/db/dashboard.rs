//! Aggregation queries behind the dashboard endpoints. Read-only; everything
//! is computed from the same tables the CRUD layer writes.

use anyhow::Result;
use chrono::{Duration, Utc};

use super::{parse_datetime, Database};
use crate::models::{
    ActivityEvent, ActivityKind, DailyProduction, DashboardOverview, DecisionBreakdown,
    DecisionType, FinancialSummary, GradeCount, OilGrade, ProductionSummary,
};

impl Database {
    pub fn dashboard_overview(&self) -> Result<DashboardOverview> {
        let conn = self.lock();

        let total_clients: i64 =
            conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
        let active_batches: i64 = conn.query_row(
            "SELECT COUNT(*) FROM batches WHERE status IN ('received', 'in_process')",
            [],
            |row| row.get(0),
        )?;
        let total_oil_produced: i64 = conn.query_row(
            "SELECT COALESCE(SUM(weight), 0) FROM oil_batches",
            [],
            |row| row.get(0),
        )?;
        let pending_invoices: i64 = conn.query_row(
            "SELECT COUNT(*) FROM invoices WHERE status IN ('sent', 'overdue')",
            [],
            |row| row.get(0),
        )?;
        let total_revenue: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM invoices WHERE status = 'paid'",
            [],
            |row| row.get(0),
        )?;

        let week_ago = (Utc::now().date_naive() - Duration::days(7)).to_string();
        let recent_quality_tests: i64 = conn.query_row(
            "SELECT COUNT(*) FROM quality_tests WHERE test_date >= ?",
            [&week_ago],
            |row| row.get(0),
        )?;

        // Stored timestamps are RFC 3339 with a fixed +00:00 offset, so plain
        // string comparison orders them correctly.
        let today_start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().to_rfc3339())
            .unwrap_or_default();
        let today_tickets: i64 = conn.query_row(
            "SELECT COUNT(*) FROM batches WHERE created_at >= ?",
            [&today_start],
            |row| row.get(0),
        )?;

        let active_rooms: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT pressing_room_id) FROM pressing_sessions WHERE finish IS NULL",
            [],
            |row| row.get(0),
        )?;
        let current_boxes: i64 = conn.query_row(
            "SELECT COALESCE(SUM(number_of_boxes), 0) FROM pressing_sessions WHERE finish IS NULL",
            [],
            |row| row.get(0),
        )?;

        Ok(DashboardOverview {
            total_clients,
            active_batches,
            total_oil_produced,
            pending_invoices,
            recent_quality_tests,
            total_revenue,
            today_tickets,
            active_rooms,
            current_boxes,
        })
    }

    pub fn production_summary(&self, days: i64) -> Result<ProductionSummary> {
        let conn = self.lock();
        let days = days.clamp(1, 365);
        let since = Utc::now() - Duration::days(days);
        let since_ts = since.to_rfc3339();
        let since_date = since.date_naive().to_string();

        let mut stmt = conn.prepare(
            "SELECT substr(created_at, 1, 10) AS day, COUNT(*), COALESCE(SUM(weight), 0)
             FROM oil_batches WHERE created_at >= ?
             GROUP BY day ORDER BY day ASC",
        )?;
        let production = stmt
            .query_map([&since_ts], |row| {
                Ok(DailyProduction {
                    date: row.get(0)?,
                    batches_processed: row.get(1)?,
                    total_oil: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT grade, COUNT(*) FROM quality_tests WHERE test_date >= ?
             GROUP BY grade ORDER BY COUNT(*) DESC",
        )?;
        let quality_distribution = stmt
            .query_map([&since_date], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|(grade, count)| {
                OilGrade::from_str(&grade).map(|grade| GradeCount { grade, count })
            })
            .collect();

        Ok(ProductionSummary {
            period_days: days,
            production,
            quality_distribution,
        })
    }

    pub fn financial_summary(&self, month: u32, year: i32) -> Result<FinancialSummary> {
        let conn = self.lock();
        let month_prefix = format!("{:04}-{:02}", year, month);

        let monthly_revenue: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM invoices
             WHERE status = 'paid' AND substr(issue_date, 1, 7) = ?",
            [&month_prefix],
            |row| row.get(0),
        )?;
        let outstanding_amount: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM invoices WHERE status IN ('sent', 'overdue')",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT decision_type, COUNT(*), AVG(unit_price)
             FROM processing_decisions WHERE substr(date, 1, 7) = ?
             GROUP BY decision_type",
        )?;
        let processing_breakdown = stmt
            .query_map([&month_prefix], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|(dt, count, avg)| {
                DecisionType::from_str(&dt).map(|decision_type| DecisionBreakdown {
                    decision_type,
                    count,
                    average_unit_price: avg,
                })
            })
            .collect();

        Ok(FinancialSummary {
            month,
            year,
            monthly_revenue,
            outstanding_amount,
            processing_breakdown,
        })
    }

    /// Merged feed of recent tickets, session starts/finishes and client
    /// registrations, newest first.
    pub fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEvent>> {
        let conn = self.lock();
        let limit = limit.min(100);
        let fetch = limit as i64;
        let mut events = Vec::new();

        let mut stmt = conn.prepare(
            "SELECT id, created_at FROM batches ORDER BY created_at DESC LIMIT ?",
        )?;
        let tickets = stmt
            .query_map([fetch], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (id, created_at) in tickets {
            events.push(ActivityEvent {
                id: format!("ticket-{id}"),
                kind: ActivityKind::Ticket,
                description: format!("إنشاء دفعة (تذكرة) #{id}"),
                timestamp: parse_datetime(created_at),
            });
        }

        let mut stmt = conn.prepare(
            "SELECT id, start, finish FROM pressing_sessions ORDER BY start DESC LIMIT ?",
        )?;
        let sessions = stmt
            .query_map([fetch], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (id, start, finish) in sessions {
            events.push(ActivityEvent {
                id: format!("session-{id}-start"),
                kind: ActivityKind::Session,
                description: format!("بدء جلسة عصر #{id}"),
                timestamp: parse_datetime(start),
            });
            if let Some(finish) = finish {
                events.push(ActivityEvent {
                    id: format!("session-{id}-finish"),
                    kind: ActivityKind::Session,
                    description: format!("إنهاء جلسة عصر #{id}"),
                    timestamp: parse_datetime(finish),
                });
            }
        }

        let mut stmt = conn.prepare(
            "SELECT id, firstname, lastname, created_at FROM clients
             ORDER BY created_at DESC LIMIT ?",
        )?;
        let clients = stmt
            .query_map([fetch], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (id, firstname, lastname, created_at) in clients {
            events.push(ActivityEvent {
                id: format!("client-{id}"),
                kind: ActivityKind::Client,
                description: format!("تسجيل عميل: {firstname} {lastname}"),
                timestamp: parse_datetime(created_at),
            });
        }

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit);
        Ok(events)
    }
}
