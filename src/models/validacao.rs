// src/models/validacao.rs
use crate::models::escala::UnallocatedDemand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Regras verificadas depois da geração da escala.
/// Serializa com o identificador histórico (ex: "MAX_2_EXTERNOS_SEMANA").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "LIMITE_ABSOLUTO_4_EXTERNOS")]
    LimiteAbsoluto4Externos,
    #[serde(rename = "MAX_2_EXTERNOS_SEMANA")]
    Max2ExternosSemana,
    #[serde(rename = "VIVENCE_SEMANAS_CONSECUTIVAS")]
    VivenceSemanasConsecutivas,
    #[serde(rename = "SEM_SABADO_DOMINGO_EXTERNOS")]
    SemSabadoDomingoExternos,
    #[serde(rename = "RODIZIO_EXTERNOS_NAO_ALTERNADO")]
    RodizioExternosNaoAlternado,
    #[serde(rename = "CONCENTRACAO_DOMINGOS")]
    ConcentracaoDomingos,
    #[serde(rename = "TURNO_DUPLICADO")]
    TurnoDuplicado,
    #[serde(rename = "DISTRIBUICAO_2_ANTES_3")]
    Distribuicao2Antes3,
    /// Pseudo-regra: demanda que o gerador não conseguiu preencher.
    #[serde(rename = "TURNO_NAO_ALOCADO")]
    TurnoNaoAlocado,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::LimiteAbsoluto4Externos => "LIMITE_ABSOLUTO_4_EXTERNOS",
            RuleId::Max2ExternosSemana => "MAX_2_EXTERNOS_SEMANA",
            RuleId::VivenceSemanasConsecutivas => "VIVENCE_SEMANAS_CONSECUTIVAS",
            RuleId::SemSabadoDomingoExternos => "SEM_SABADO_DOMINGO_EXTERNOS",
            RuleId::RodizioExternosNaoAlternado => "RODIZIO_EXTERNOS_NAO_ALTERNADO",
            RuleId::ConcentracaoDomingos => "CONCENTRACAO_DOMINGOS",
            RuleId::TurnoDuplicado => "TURNO_DUPLICADO",
            RuleId::Distribuicao2Antes3 => "DISTRIBUICAO_2_ANTES_3",
            RuleId::TurnoNaoAlocado => "TURNO_NAO_ALOCADO",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    // Erros primeiro na ordenação final
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule: RuleId,
    pub severity: Severity,
    pub broker_name: String,
    /// Vazio nas violações globais.
    pub broker_id: String,
    pub details: String,
    pub dates: Vec<NaiveDate>,
    pub locations: Vec<String>,
}

/// Resumo de uma semana ISO de um corretor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBreakdown {
    pub week_label: String,  // "S10"
    pub week_start: NaiveDate, // segunda-feira da semana
    pub external_count: usize,
    pub internal_count: usize,
    pub saturday_count: usize,
    /// Dias distintos com plantão externo (o que as regras semanais contam).
    pub external_days: usize,
    pub locations: BTreeSet<String>,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerValidationReport {
    pub broker_id: String,
    pub broker_name: String,
    pub total_assignments: usize,
    pub external_count: usize,
    pub internal_count: usize,
    pub saturday_count: usize,
    pub weekly_breakdown: Vec<WeeklyBreakdown>,
    pub violations: Vec<Violation>,
}

impl BrokerValidationReport {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity.is_error())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_assignments: usize,
    pub total_brokers: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub unallocated_count: usize,
}

/// Resultado final da validação pós-geração.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub summary: ValidationSummary,
    pub broker_reports: Vec<BrokerValidationReport>,
    pub unallocated_demands: Vec<UnallocatedDemand>,
}
