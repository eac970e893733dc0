// src/services/semana.rs
//! Agrupamento de registos datados por semana ISO (segunda a domingo).
//!
//! A chave é só o número da semana ("S10"), sem ano. Um período que
//! atravesse o fim do ano junta semanas de anos diferentes no mesmo balde;
//! por convenção cada validação cobre um único ano civil e
//! [`spans_multiple_iso_years`] permite detetar o caso para o registar.
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Número da semana ISO usado como chave de agrupamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(pub u32);

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        WeekKey(date.iso_week().week())
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Semanas vizinhas (diferença de exatamente 1).
    pub fn is_adjacent_to(&self, other: WeekKey) -> bool {
        self.0.abs_diff(other.0) == 1
    }

    pub fn label(&self) -> String {
        format!("S{}", self.0)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Segunda-feira da semana ISO que contém `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Particiona `records` por semana ISO mantendo a ordem original dentro de cada balde.
pub fn group_by_week<T, F>(records: &[T], date_of: F) -> BTreeMap<WeekKey, Vec<&T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut weeks: BTreeMap<WeekKey, Vec<&T>> = BTreeMap::new();
    for record in records {
        weeks.entry(WeekKey::of(date_of(record))).or_default().push(record);
    }
    weeks
}

/// `true` se as datas pertencem a mais de um ano ISO.
pub fn spans_multiple_iso_years<I>(dates: I) -> bool
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut years = dates.into_iter().map(|d| d.iso_week().year());
    match years.next() {
        Some(first) => years.any(|y| y != first),
        None => false,
    }
}
