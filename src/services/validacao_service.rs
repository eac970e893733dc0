// src/services/validacao_service.rs
use crate::models::escala::{
    Assignment, BrokerInfo, EnrichedAssignment, LocationBrokerConfig, LocationInfo, LocationType,
    UnallocatedDemand, ValidationRequest, DESCONHECIDO,
};
use crate::models::validacao::{
    BrokerValidationReport, PostValidationResult, RuleId, Severity, ValidationSummary, Violation,
};
use crate::services::{regras, relatorio_corretor, semana};
use std::collections::{BTreeMap, HashMap};

/// Nome usado nas violações de turnos sem corretor.
pub const SEM_CORRETOR: &str = "Sem Corretor";

/// Tabelas de consulta (id -> registo) válidas só durante uma validação.
pub struct ReferenceData<'a> {
    brokers: HashMap<&'a str, &'a BrokerInfo>,
    locations: HashMap<&'a str, &'a LocationInfo>,
}

impl<'a> ReferenceData<'a> {
    pub fn new(brokers: &'a [BrokerInfo], locations: &'a [LocationInfo]) -> Self {
        Self {
            brokers: brokers.iter().map(|b| (b.id.as_str(), b)).collect(),
            locations: locations.iter().map(|l| (l.id.as_str(), l)).collect(),
        }
    }

    pub fn broker(&self, id: &str) -> Option<&'a BrokerInfo> {
        self.brokers.get(id).copied()
    }

    pub fn location(&self, id: &str) -> Option<&'a LocationInfo> {
        self.locations.get(id).copied()
    }

    /// Resolve nomes e tipo. IDs desconhecidos não abortam a validação:
    /// o nome fica "Desconhecido" e o local conta como interno.
    pub fn enrich(&self, assignment: &Assignment) -> EnrichedAssignment {
        let broker_name = match self.broker(&assignment.broker_id) {
            Some(b) => b.name.clone(),
            None => {
                tracing::warn!(
                    "Corretor '{}' não encontrado nas tabelas de referência",
                    assignment.broker_id
                );
                DESCONHECIDO.to_string()
            }
        };
        let (location_name, location_type) = match self.location(&assignment.location_id) {
            Some(l) => (l.name.clone(), l.location_type),
            None => {
                tracing::warn!(
                    "Local '{}' não encontrado nas tabelas de referência",
                    assignment.location_id
                );
                (DESCONHECIDO.to_string(), LocationType::Internal)
            }
        };

        EnrichedAssignment {
            broker_id: assignment.broker_id.clone(),
            broker_name,
            location_id: assignment.location_id.clone(),
            location_name,
            location_type,
            date: assignment.assignment_date,
            shift: assignment.shift_type,
        }
    }
}

/// Valida o pedido completo vindo da API.
pub fn validate_request(request: &ValidationRequest) -> PostValidationResult {
    validate_post_generation(
        &request.assignments,
        &request.brokers,
        &request.locations,
        &request.unallocated_demands,
        request.location_broker_configs.as_ref(),
    )
}

// --- FUNÇÃO PRINCIPAL: VALIDAR ESCALA GERADA ---
/// Função pura: as mesmas entradas produzem sempre o mesmo resultado (ordem incluída).
pub fn validate_post_generation(
    assignments: &[Assignment],
    brokers: &[BrokerInfo],
    locations: &[LocationInfo],
    unallocated_demands: &[UnallocatedDemand],
    location_broker_configs: Option<&LocationBrokerConfig>,
) -> PostValidationResult {
    tracing::debug!(
        "Validando {} alocações ({} corretores, {} locais, {} demandas não alocadas)",
        assignments.len(),
        brokers.len(),
        locations.len(),
        unallocated_demands.len()
    );

    if semana::spans_multiple_iso_years(assignments.iter().map(|a| a.assignment_date)) {
        tracing::warn!(
            "As alocações atravessam mais de um ano ISO; semanas com o mesmo número serão agrupadas juntas"
        );
    }

    // 1. Enriquecer
    let reference = ReferenceData::new(brokers, locations);
    let enriched: Vec<EnrichedAssignment> = assignments.iter().map(|a| reference.enrich(a)).collect();
    let ctx = regras::RuleContext::new(&enriched, location_broker_configs);

    // 2. Agrupar por corretor
    let mut per_broker: BTreeMap<&str, Vec<EnrichedAssignment>> = BTreeMap::new();
    for a in &enriched {
        per_broker.entry(a.broker_id.as_str()).or_default().push(a.clone());
    }

    // 3. Regras e relatório por corretor
    let mut broker_reports: Vec<BrokerValidationReport> = per_broker
        .into_iter()
        .map(|(broker_id, mut items)| {
            relatorio_corretor::sort_chronologically(&mut items);
            let broker_name = items[0].broker_name.clone();
            let weekly = relatorio_corretor::build_weekly_breakdown(&items);
            let violations =
                regras::evaluate_broker(&items, reference.broker(broker_id), &weekly, &ctx);
            tracing::debug!(
                "Corretor {} ({}): {} alocações, {} violações",
                broker_name,
                broker_id,
                items.len(),
                violations.len()
            );
            relatorio_corretor::build_broker_report(broker_id, &broker_name, &items, weekly, violations)
        })
        .collect();
    broker_reports.sort_by(|a, b| {
        a.broker_name
            .cmp(&b.broker_name)
            .then_with(|| a.broker_id.cmp(&b.broker_id))
    });

    // 4. Consolidar
    let result = aggregate(assignments.len(), broker_reports, unallocated_demands);
    tracing::info!(
        "Validação concluída: {} erros, {} avisos, válida = {}",
        result.summary.error_count,
        result.summary.warning_count,
        result.is_valid
    );
    result
}

/// Turno obrigatório sem corretor: sempre erro, nunca rebaixado.
pub fn unallocated_violation(demand: &UnallocatedDemand) -> Violation {
    Violation {
        rule: RuleId::TurnoNaoAlocado,
        severity: Severity::Error,
        broker_name: SEM_CORRETOR.to_string(),
        broker_id: String::new(),
        details: format!(
            "Nenhum corretor alocado em {} no dia {} (turno da {}).",
            demand.location_name,
            demand.date.format("%d/%m/%Y"),
            demand.shift.label().to_lowercase()
        ),
        dates: vec![demand.date],
        locations: vec![demand.location_name.clone()],
    }
}

/// Junta as violações, corre a regra global, promove as demandas não
/// alocadas a erro e calcula o resumo.
///
/// `broker_reports` só tem corretores com pelo menos uma alocação. Quem está
/// em `brokers` sem nenhuma alocação fica fora da regra 2-antes-de-3.
pub fn aggregate(
    total_assignments: usize,
    broker_reports: Vec<BrokerValidationReport>,
    unallocated_demands: &[UnallocatedDemand],
) -> PostValidationResult {
    let mut violations: Vec<Violation> = broker_reports
        .iter()
        .flat_map(|r| r.violations.iter().cloned())
        .collect();
    violations.extend(regras::check_two_before_three(&broker_reports));
    violations.extend(unallocated_demands.iter().map(unallocated_violation));

    // sort_by é estável: dentro do mesmo corretor mantém a ordem das regras
    violations.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.broker_name.cmp(&b.broker_name))
    });

    let rule_errors = violations
        .iter()
        .filter(|v| v.severity.is_error() && v.rule != RuleId::TurnoNaoAlocado)
        .count();
    let warning_count = violations.iter().filter(|v| !v.severity.is_error()).count();
    let error_count = rule_errors + unallocated_demands.len();

    PostValidationResult {
        is_valid: error_count == 0,
        summary: ValidationSummary {
            total_assignments,
            total_brokers: broker_reports.len(),
            error_count,
            warning_count,
            unallocated_count: unallocated_demands.len(),
        },
        violations,
        broker_reports,
        unallocated_demands: unallocated_demands.to_vec(),
    }
}
