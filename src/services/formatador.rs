// src/services/formatador.rs
//! Texto legível do resultado da validação. Só formata, não decide nada.
use crate::models::validacao::{BrokerValidationReport, PostValidationResult, Violation};
use chrono::NaiveDate;
use std::fmt;

const LINHA: &str = "════════════════════════════════════════════════════════";

/// Destino opcional do relatório formatado (ex: o log da aplicação).
pub trait ReportSink {
    fn emit(&self, report: &str);
}

/// Envia cada linha do relatório para o `tracing` em nível INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, report: &str) {
        for line in report.lines() {
            tracing::info!(target: "validador_escala::relatorio", "{}", line);
        }
    }
}

/// Wrapper com `Display` para o relatório completo.
pub struct ReportText<'a>(pub &'a PostValidationResult);

pub fn format_report(result: &PostValidationResult) -> String {
    ReportText(result).to_string()
}

/// Formata e entrega ao `sink`; devolve o texto para quem chamou.
pub fn publish(result: &PostValidationResult, sink: &dyn ReportSink) -> String {
    let text = format_report(result);
    sink.emit(&text);
    text
}

fn icon(v: &Violation) -> &'static str {
    if v.severity.is_error() { "❌" } else { "⚠️" }
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_violation(f: &mut fmt::Formatter<'_>, v: &Violation, indent: &str, with_name: bool) -> fmt::Result {
    if with_name {
        writeln!(f, "{}{} [{}] {}: {}", indent, icon(v), v.rule, v.broker_name, v.details)?;
    } else {
        writeln!(f, "{}{} [{}] {}", indent, icon(v), v.rule, v.details)?;
    }
    if !v.dates.is_empty() {
        writeln!(f, "{}   Datas: {}", indent, join_dates(&v.dates))?;
    }
    if !v.locations.is_empty() {
        writeln!(f, "{}   Locais: {}", indent, v.locations.join(", "))?;
    }
    Ok(())
}

fn write_broker(f: &mut fmt::Formatter<'_>, r: &BrokerValidationReport) -> fmt::Result {
    let status = if r.has_errors() { "❌" } else { "✅" };
    writeln!(f, "{} {} ({})", status, r.broker_name, r.broker_id)?;
    writeln!(
        f,
        "   Total: {} | Externos: {} | Internos: {} | Sábados: {}",
        r.total_assignments, r.external_count, r.internal_count, r.saturday_count
    )?;
    for w in &r.weekly_breakdown {
        let locations: Vec<&str> = w.locations.iter().map(String::as_str).collect();
        writeln!(
            f,
            "   {} ({}): {} dia(s) externo(s) | {} ext / {} int / {} sáb | {}",
            w.week_label,
            w.week_start.format("%d/%m"),
            w.external_days,
            w.external_count,
            w.internal_count,
            w.saturday_count,
            locations.join(", ")
        )?;
    }
    if !r.violations.is_empty() {
        writeln!(f, "   Violações:")?;
        for v in &r.violations {
            write_violation(f, v, "     ", false)?;
        }
    }
    Ok(())
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let s = &result.summary;

        writeln!(f, "{}", LINHA)?;
        writeln!(f, "RELATÓRIO DE VALIDAÇÃO PÓS-GERAÇÃO")?;
        writeln!(f, "{}", LINHA)?;
        writeln!(
            f,
            "Estado: {}",
            if result.is_valid { "✅ VÁLIDA" } else { "❌ INVÁLIDA" }
        )?;
        writeln!(f, "Alocações: {} | Corretores: {}", s.total_assignments, s.total_brokers)?;
        writeln!(
            f,
            "Erros: {} | Avisos: {} | Turnos não alocados: {}",
            s.error_count, s.warning_count, s.unallocated_count
        )?;

        writeln!(f)?;
        writeln!(f, "── VIOLAÇÕES ({}) ──", result.violations.len())?;
        if result.violations.is_empty() {
            writeln!(f, "Nenhuma violação encontrada.")?;
        }
        for v in &result.violations {
            write_violation(f, v, "", true)?;
        }

        writeln!(f)?;
        writeln!(f, "── CORRETORES ({}) ──", result.broker_reports.len())?;
        for r in &result.broker_reports {
            write_broker(f, r)?;
        }
        write!(f, "{}", LINHA)
    }
}
