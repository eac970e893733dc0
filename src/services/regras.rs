// src/services/regras.rs
//! Regras de justiça e rodízio aplicadas a uma escala já gerada.
//!
//! Cada regra é independente: recebe as alocações (enriquecidas e ordenadas
//! por data) de um corretor e devolve zero ou mais violações. A regra de
//! distribuição 2-antes-de-3 é a única global e corre depois de todos os
//! relatórios por corretor existirem.
use crate::models::escala::{BrokerInfo, EnrichedAssignment, LocationBrokerConfig, ShiftType};
use crate::models::validacao::{BrokerValidationReport, RuleId, Severity, Violation, WeeklyBreakdown};
use crate::services::semana::{group_by_week, WeekKey};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet};

/// 4 ou mais dias externos numa semana nunca deveria acontecer.
pub const LIMITE_ABSOLUTO_EXTERNOS: usize = 4;
/// Ideal: até 2 dias externos por semana.
pub const MAX_EXTERNOS_IDEAL: usize = 2;
/// Único local externo onde semanas consecutivas são proibidas.
pub const LOCAL_SEM_SEMANAS_CONSECUTIVAS: &str = "vivence";
pub const MAX_DOMINGOS_MESMO_LOCAL: usize = 2;
/// Nome usado nas violações sem corretor (regra global).
pub const DISTRIBUICAO_GERAL: &str = "Distribuição Geral";

pub type WeekBuckets<'a> = BTreeMap<WeekKey, Vec<&'a EnrichedAssignment>>;

// --- Elegibilidade (exceção de fornecedor único) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilitySource {
    /// Lista de corretores configurados para o local.
    Declared,
    /// Deduzida das alocações externas presentes nesta escala.
    Inferred,
}

impl EligibilitySource {
    pub fn label(&self) -> &'static str {
        match self {
            EligibilitySource::Declared => "configuração do local",
            EligibilitySource::Inferred => "inferido pela escala",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub sole_provider: bool,
    pub source: EligibilitySource,
}

/// Dados partilhados por todas as avaliações de uma mesma validação.
/// Construído uma vez por chamada e só lido depois.
#[derive(Debug)]
pub struct RuleContext<'a> {
    // location_id -> corretores com plantão externo nesse local
    observed_providers: BTreeMap<&'a str, BTreeSet<&'a str>>,
    declared: Option<&'a LocationBrokerConfig>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        assignments: &'a [EnrichedAssignment],
        declared: Option<&'a LocationBrokerConfig>,
    ) -> Self {
        let mut observed_providers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for a in assignments.iter().filter(|a| a.is_external()) {
            observed_providers
                .entry(a.location_id.as_str())
                .or_default()
                .insert(a.broker_id.as_str());
        }
        Self { observed_providers, declared }
    }

    /// A configuração declarada tem prioridade; sem entrada para o local,
    /// usa-se quem de facto foi alocado lá.
    pub fn eligibility(&self, location_id: &str, broker_id: &str) -> Eligibility {
        if let Some(configured) = self.declared.and_then(|cfg| cfg.get(location_id)) {
            return Eligibility {
                sole_provider: configured.len() == 1 && configured[0] == broker_id,
                source: EligibilitySource::Declared,
            };
        }
        let sole_provider = self
            .observed_providers
            .get(location_id)
            .map(|brokers| brokers.iter().all(|b| *b == broker_id))
            .unwrap_or(true);
        Eligibility {
            sole_provider,
            source: EligibilitySource::Inferred,
        }
    }
}

// --- Helpers ---

fn broker_violation(
    rule: RuleId,
    severity: Severity,
    sample: &EnrichedAssignment,
    details: String,
    dates: Vec<NaiveDate>,
    locations: Vec<String>,
) -> Violation {
    Violation {
        rule,
        severity,
        broker_name: sample.broker_name.clone(),
        broker_id: sample.broker_id.clone(),
        details,
        dates,
        locations,
    }
}

fn distinct_dates(items: &[&EnrichedAssignment]) -> Vec<NaiveDate> {
    items
        .iter()
        .map(|a| a.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// Nomes distintos pela ordem em que aparecem
fn distinct_locations(items: &[&EnrichedAssignment]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for a in items {
        if !names.contains(&a.location_name) {
            names.push(a.location_name.clone());
        }
    }
    names
}

/// Dias distintos com plantão externo (dois turnos no mesmo dia contam 1).
pub fn external_days(items: &[&EnrichedAssignment]) -> usize {
    items
        .iter()
        .filter(|a| a.is_external())
        .map(|a| a.date)
        .collect::<BTreeSet<_>>()
        .len()
}

// --- Avaliação por corretor ---

/// Corre as regras por corretor, na ordem fixa.
/// `assignments` tem de estar ordenado e pertencer a um único corretor.
pub fn evaluate_broker(
    assignments: &[EnrichedAssignment],
    broker: Option<&BrokerInfo>,
    weekly: &[WeeklyBreakdown],
    ctx: &RuleContext<'_>,
) -> Vec<Violation> {
    let weeks = group_by_week(assignments, |a| a.date);

    let mut violations = Vec::new();
    violations.extend(check_weekly_external_cap(&weeks));
    violations.extend(check_vivence_consecutive_weeks(&weeks, ctx));
    violations.extend(check_weekend_external(&weeks));
    if let (Some(info), Some(sample)) = (broker, assignments.first()) {
        violations.extend(check_rotation_alternation(info, sample, weekly));
    }
    violations.extend(check_sunday_concentration(assignments));
    violations.extend(check_double_booked_shift(assignments));
    violations
}

/// Limite de dias externos por semana: 3 é aviso, 4 ou mais é erro.
pub fn check_weekly_external_cap(weeks: &WeekBuckets<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (week, items) in weeks {
        let externals: Vec<&EnrichedAssignment> =
            items.iter().copied().filter(|a| a.is_external()).collect();
        let days = external_days(&externals);
        if days <= MAX_EXTERNOS_IDEAL {
            continue;
        }
        let (rule, severity, details) = if days >= LIMITE_ABSOLUTO_EXTERNOS {
            (
                RuleId::LimiteAbsoluto4Externos,
                Severity::Error,
                format!(
                    "Semana {}: {} dias com plantão externo. O limite absoluto é {} e nunca deve ser atingido.",
                    week, days, LIMITE_ABSOLUTO_EXTERNOS
                ),
            )
        } else {
            (
                RuleId::Max2ExternosSemana,
                Severity::Warning,
                format!(
                    "Semana {}: {} dias com plantão externo. O ideal é no máximo {} (tolerado com alta demanda).",
                    week, days, MAX_EXTERNOS_IDEAL
                ),
            )
        };
        violations.push(broker_violation(
            rule,
            severity,
            externals[0],
            details,
            distinct_dates(&externals),
            distinct_locations(&externals),
        ));
    }
    violations
}

fn is_no_repeat_location(a: &EnrichedAssignment) -> bool {
    a.is_external()
        && a
            .location_name
            .to_lowercase()
            .contains(LOCAL_SEM_SEMANAS_CONSECUTIVAS)
}

/// O mesmo corretor no local "Vivence" em duas semanas seguidas.
/// Vira aviso quando ele é o único fornecedor possível do local.
pub fn check_vivence_consecutive_weeks(
    weeks: &WeekBuckets<'_>,
    ctx: &RuleContext<'_>,
) -> Vec<Violation> {
    // location_id -> semana -> alocações
    let mut per_location: BTreeMap<&str, WeekBuckets<'_>> = BTreeMap::new();
    for (week, items) in weeks {
        for a in items.iter().copied().filter(|a| is_no_repeat_location(a)) {
            per_location
                .entry(a.location_id.as_str())
                .or_default()
                .entry(*week)
                .or_default()
                .push(a);
        }
    }

    let mut violations = Vec::new();
    for (location_id, loc_weeks) in &per_location {
        let keys: Vec<&WeekKey> = loc_weeks.keys().collect();
        for pair in keys.windows(2) {
            let (first, second) = (*pair[0], *pair[1]);
            if !first.is_adjacent_to(second) {
                continue;
            }
            let items: Vec<&EnrichedAssignment> = loc_weeks[&first]
                .iter()
                .chain(loc_weeks[&second].iter())
                .copied()
                .collect();
            let sample = items[0];
            let eligibility = ctx.eligibility(location_id, &sample.broker_id);

            let mut details = format!(
                "Alocado em {} nas semanas consecutivas {} e {}.",
                sample.location_name, first, second
            );
            let severity = if eligibility.sole_provider {
                details.push_str(&format!(
                    " Único corretor elegível para o local ({}), repetição inevitável.",
                    eligibility.source.label()
                ));
                Severity::Warning
            } else {
                Severity::Error
            };

            violations.push(broker_violation(
                RuleId::VivenceSemanasConsecutivas,
                severity,
                sample,
                details,
                distinct_dates(&items),
                vec![sample.location_name.clone()],
            ));
        }
    }
    violations
}

/// Sábado e domingo externos na mesma semana ISO.
pub fn check_weekend_external(weeks: &WeekBuckets<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (week, items) in weeks {
        let weekend: Vec<&EnrichedAssignment> = items
            .iter()
            .copied()
            .filter(|a| a.is_external() && matches!(a.date.weekday(), Weekday::Sat | Weekday::Sun))
            .collect();
        let has_saturday = weekend.iter().any(|a| a.date.weekday() == Weekday::Sat);
        let has_sunday = weekend.iter().any(|a| a.date.weekday() == Weekday::Sun);
        if !(has_saturday && has_sunday) {
            continue;
        }
        violations.push(broker_violation(
            RuleId::SemSabadoDomingoExternos,
            Severity::Error,
            weekend[0],
            format!(
                "Semana {}: plantão externo no sábado e no domingo da mesma semana.",
                week
            ),
            distinct_dates(&weekend),
            distinct_locations(&weekend),
        ));
    }
    violations
}

/// Rodízio 1-2-1-2 de dias externos para quem trabalha aos sábados.
/// Duas semanas seguidas com 1 (ou com 2) dias externos geram aviso.
pub fn check_rotation_alternation(
    broker: &BrokerInfo,
    sample: &EnrichedAssignment,
    weekly: &[WeeklyBreakdown],
) -> Vec<Violation> {
    if !broker.works_saturdays() || weekly.len() < 2 {
        return Vec::new();
    }

    let mut ordered: Vec<&WeeklyBreakdown> = weekly.iter().collect();
    ordered.sort_by_key(|w| w.week_start);

    let mut violations = Vec::new();
    for pair in ordered.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let repeated = prev.external_days == next.external_days
            && (prev.external_days == 1 || prev.external_days == 2);
        if !repeated {
            continue;
        }
        let dates: Vec<NaiveDate> = prev
            .dates
            .iter()
            .chain(next.dates.iter())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let locations: Vec<String> = prev
            .locations
            .iter()
            .chain(next.locations.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        violations.push(broker_violation(
            RuleId::RodizioExternosNaoAlternado,
            Severity::Warning,
            sample,
            format!(
                "Semanas {} e {} com {} dia(s) externo(s) cada. O rodízio esperado alterna 1 e 2.",
                prev.week_label, next.week_label, prev.external_days
            ),
            dates,
            locations,
        ));
    }
    violations
}

/// Mais de 2 plantões externos de domingo no mesmo local.
/// Conta alocações: manhã e tarde do mesmo domingo são dois plantões.
pub fn check_sunday_concentration(assignments: &[EnrichedAssignment]) -> Vec<Violation> {
    let mut per_location: BTreeMap<&str, Vec<&EnrichedAssignment>> = BTreeMap::new();
    for a in assignments
        .iter()
        .filter(|a| a.is_external() && a.date.weekday() == Weekday::Sun)
    {
        per_location.entry(a.location_id.as_str()).or_default().push(a);
    }

    let mut violations = Vec::new();
    for items in per_location.values() {
        if items.len() <= MAX_DOMINGOS_MESMO_LOCAL {
            continue;
        }
        let sample = items[0];
        violations.push(broker_violation(
            RuleId::ConcentracaoDomingos,
            Severity::Warning,
            sample,
            format!(
                "{} plantões de domingo em {}. Os domingos deste local devem rodar entre corretores.",
                items.len(),
                sample.location_name
            ),
            distinct_dates(items),
            vec![sample.location_name.clone()],
        ));
    }
    violations
}

/// O mesmo turno do mesmo dia atribuído mais de uma vez ao corretor.
/// Só aviso: nunca muda a validade da escala.
pub fn check_double_booked_shift(assignments: &[EnrichedAssignment]) -> Vec<Violation> {
    let mut slots: BTreeMap<(NaiveDate, ShiftType), Vec<&EnrichedAssignment>> = BTreeMap::new();
    for a in assignments {
        slots.entry((a.date, a.shift)).or_default().push(a);
    }

    slots
        .into_iter()
        .filter(|(_, items)| items.len() > 1)
        .map(|((date, shift), items)| {
            broker_violation(
                RuleId::TurnoDuplicado,
                Severity::Warning,
                items[0],
                format!(
                    "{} alocações no turno da {} de {}.",
                    items.len(),
                    shift.label().to_lowercase(),
                    date.format("%d/%m/%Y")
                ),
                vec![date],
                distinct_locations(&items),
            )
        })
        .collect()
}

// --- Regra global ---

/// Ninguém deve chegar ao 3º externo enquanto outro ainda não tem o 2º.
pub fn check_two_before_three(reports: &[BrokerValidationReport]) -> Option<Violation> {
    let over: Vec<&BrokerValidationReport> =
        reports.iter().filter(|r| r.external_count >= 3).collect();
    let under: Vec<&BrokerValidationReport> =
        reports.iter().filter(|r| r.external_count < 2).collect();
    if over.is_empty() || under.is_empty() {
        return None;
    }

    fn describe(group: &[&BrokerValidationReport]) -> String {
        group
            .iter()
            .map(|r| format!("{} ({})", r.broker_name, r.external_count))
            .collect::<Vec<_>>()
            .join(", ")
    }

    Some(Violation {
        rule: RuleId::Distribuicao2Antes3,
        severity: Severity::Error,
        broker_name: DISTRIBUICAO_GERAL.to_string(),
        broker_id: String::new(),
        details: format!(
            "Corretores com 3 ou mais externos: {}. Corretores com menos de 2 externos: {}.",
            describe(&over),
            describe(&under)
        ),
        dates: Vec::new(),
        locations: Vec::new(),
    })
}
