// src/services/relatorio_corretor.rs
use crate::models::escala::EnrichedAssignment;
use crate::models::validacao::{BrokerValidationReport, Violation, WeeklyBreakdown};
use crate::services::regras::external_days;
use crate::services::semana::{group_by_week, week_start};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Ordem cronológica: data, turno (manhã antes da tarde), nome do local.
pub fn sort_chronologically(assignments: &mut [EnrichedAssignment]) {
    assignments.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.shift.cmp(&b.shift))
            .then_with(|| a.location_name.cmp(&b.location_name))
    });
}

fn is_saturday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sat
}

/// Uma entrada por semana ISO com pelo menos uma alocação, por ordem cronológica.
pub fn build_weekly_breakdown(assignments: &[EnrichedAssignment]) -> Vec<WeeklyBreakdown> {
    let mut weekly: Vec<WeeklyBreakdown> = group_by_week(assignments, |a| a.date)
        .into_iter()
        .map(|(week, items)| {
            let external_count = items.iter().filter(|a| a.is_external()).count();
            WeeklyBreakdown {
                week_label: week.label(),
                week_start: week_start(items[0].date),
                external_count,
                internal_count: items.len() - external_count,
                saturday_count: items.iter().filter(|a| is_saturday(a.date)).count(),
                external_days: external_days(&items),
                locations: items.iter().map(|a| a.location_name.clone()).collect(),
                dates: items
                    .iter()
                    .map(|a| a.date)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect(),
            }
        })
        .collect();
    weekly.sort_by_key(|w| w.week_start);
    weekly
}

/// Monta o relatório do corretor a partir das alocações já ordenadas.
pub fn build_broker_report(
    broker_id: &str,
    broker_name: &str,
    assignments: &[EnrichedAssignment],
    weekly_breakdown: Vec<WeeklyBreakdown>,
    violations: Vec<Violation>,
) -> BrokerValidationReport {
    let external_count = assignments.iter().filter(|a| a.is_external()).count();
    BrokerValidationReport {
        broker_id: broker_id.to_string(),
        broker_name: broker_name.to_string(),
        total_assignments: assignments.len(),
        external_count,
        internal_count: assignments.len() - external_count,
        saturday_count: assignments.iter().filter(|a| is_saturday(a.date)).count(),
        weekly_breakdown,
        violations,
    }
}
