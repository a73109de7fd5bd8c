// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of raw notification rows into the strict dashboard shape.
//!
//! Total and order-preserving: every input row yields exactly one output
//! item, whatever fields are missing or malformed.

use predia_core::types::{NotificacionDbRecord, NotificacionItem, NotificacionTipo, Prioridad};

/// Normalize a batch of persisted rows.
pub fn normalize_notifications(records: Vec<NotificacionDbRecord>) -> Vec<NotificacionItem> {
    records.into_iter().map(normalize_record).collect()
}

/// Normalize a single row.
///
/// - `tipo` outside the closed enumeration (or absent) becomes `sistema`.
/// - `prioridad` is read from `data.prioridad` only when it is a string
///   matching the enumeration; anything else becomes `media`. No other
///   key of `data` is interpreted.
/// - `leida` null collapses to `false`.
/// - `data` passes through untouched.
pub fn normalize_record(record: NotificacionDbRecord) -> NotificacionItem {
    let tipo = record
        .tipo
        .as_deref()
        .and_then(|s| s.parse::<NotificacionTipo>().ok())
        .unwrap_or(NotificacionTipo::Sistema);

    let prioridad = record
        .data
        .as_ref()
        .and_then(|data| data.get("prioridad"))
        .and_then(|value| value.as_str())
        .and_then(|s| s.parse::<Prioridad>().ok())
        .unwrap_or(Prioridad::Media);

    NotificacionItem {
        id: record.id,
        tipo,
        titulo: record.titulo,
        mensaje: record.mensaje,
        leida: record.leida.unwrap_or(false),
        created_at: record.created_at,
        updated_at: record.updated_at,
        prioridad,
        data: record.data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str) -> NotificacionDbRecord {
        NotificacionDbRecord {
            id: id.into(),
            tipo: Some("venta".into()),
            titulo: "Venta registrada".into(),
            mensaje: "Lote 7 vendido".into(),
            leida: Some(true),
            data: None,
            created_at: "2026-03-01T10:00:00Z".into(),
            updated_at: None,
        }
    }

    #[test]
    fn well_formed_record_passes_through() {
        let item = normalize_record(record("n-1"));
        assert_eq!(item.id, "n-1");
        assert_eq!(item.tipo, NotificacionTipo::Venta);
        assert_eq!(item.titulo, "Venta registrada");
        assert!(item.leida);
        assert_eq!(item.created_at, "2026-03-01T10:00:00Z");
    }

    #[test]
    fn unknown_tipo_and_null_fields_get_defaults() {
        let mut raw = record("n-2");
        raw.tipo = Some("unknown_value".into());
        raw.leida = None;
        raw.data = None;

        let item = normalize_record(raw);
        assert_eq!(item.tipo, NotificacionTipo::Sistema);
        assert!(!item.leida);
        assert_eq!(item.prioridad, Prioridad::Media);
    }

    #[test]
    fn missing_tipo_defaults_to_sistema() {
        let mut raw = record("n-3");
        raw.tipo = None;
        assert_eq!(normalize_record(raw).tipo, NotificacionTipo::Sistema);
    }

    #[test]
    fn prioridad_is_read_from_data() {
        let mut raw = record("n-4");
        raw.data = Some(json!({"prioridad": "urgente", "cliente_id": "c-9"}));

        let item = normalize_record(raw);
        assert_eq!(item.prioridad, Prioridad::Urgente);
        // The rest of the payload is not interpreted, only carried.
        assert_eq!(item.data.unwrap()["cliente_id"], "c-9");
    }

    #[test]
    fn invalid_prioridad_defaults_to_media() {
        let mut raw = record("n-5");
        raw.data = Some(json!({"prioridad": "not_a_valid_value"}));
        assert_eq!(normalize_record(raw).prioridad, Prioridad::Media);

        let mut raw = record("n-6");
        raw.data = Some(json!({"prioridad": 3}));
        assert_eq!(
            normalize_record(raw).prioridad,
            Prioridad::Media,
            "non-string prioridad is ignored"
        );
    }

    #[test]
    fn batch_preserves_order() {
        let items = normalize_notifications(vec![record("a"), record("b"), record("c")]);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
