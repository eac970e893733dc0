// src/models/escala.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Valor mostrado quando um ID não existe nas tabelas de referência.
pub const DESCONHECIDO: &str = "Desconhecido";

// --- Enums do domínio ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Afternoon,
}

impl ShiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "morning",
            ShiftType::Afternoon => "afternoon",
        }
    }

    /// Nome para os relatórios.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Morning => "Manhã",
            ShiftType::Afternoon => "Tarde",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Internal,
    External,
}

impl LocationType {
    pub fn is_external(&self) -> bool {
        matches!(self, LocationType::External)
    }
}

// --- Estruturas de entrada (vêm do gerador / da aplicação) ---

/// Uma alocação já gerada: corretor -> local -> data/turno.
/// Os nomes dos campos seguem o formato das tabelas (snake_case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub broker_id: String,
    pub location_id: String,
    pub assignment_date: NaiveDate, // YYYY-MM-DD
    pub shift_type: ShiftType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerInfo {
    pub id: String,
    pub name: String,
    // Ex: ["monday", "tuesday", "saturday"]
    #[serde(default)]
    pub available_weekdays: Vec<String>,
}

impl BrokerInfo {
    /// Corretores com disponibilidade ao sábado entram no rodízio de externos.
    pub fn works_saturdays(&self) -> bool {
        self.available_weekdays
            .iter()
            .any(|d| d.trim().eq_ignore_ascii_case("saturday"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

/// Turno de um local externo que nenhum corretor conseguiu cobrir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnallocatedDemand {
    pub location_id: String,
    pub location_name: String,
    pub date: NaiveDate,
    pub shift: ShiftType,
}

/// location_id -> IDs dos corretores configurados (elegíveis) para esse local.
pub type LocationBrokerConfig = BTreeMap<String, Vec<String>>;

/// Corpo do pedido de validação (POST /validacao).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub assignments: Vec<Assignment>,
    pub brokers: Vec<BrokerInfo>,
    pub locations: Vec<LocationInfo>,
    #[serde(default)]
    pub unallocated_demands: Vec<UnallocatedDemand>,
    #[serde(default)]
    pub location_broker_configs: Option<LocationBrokerConfig>,
}

// --- Estruturas auxiliares para as regras ---

/// Alocação com os nomes e o tipo de local já resolvidos.
/// Só existe durante uma validação.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedAssignment {
    pub broker_id: String,
    pub broker_name: String,
    pub location_id: String,
    pub location_name: String,
    pub location_type: LocationType,
    pub date: NaiveDate,
    pub shift: ShiftType,
}

impl EnrichedAssignment {
    pub fn is_external(&self) -> bool {
        self.location_type.is_external()
    }
}
