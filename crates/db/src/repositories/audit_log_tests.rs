//! Tests for the audit-log repository row mapping.

use centavo_core::audit::AuditAction;
use chrono::{TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use super::to_record;
use crate::entities::{audit_logs, sea_orm_active_enums::AuditAction as DbAuditAction};

#[test]
fn test_maps_row_fields_onto_the_read_model() {
    let recorded_at = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
    let row = audit_logs::Model {
        id: Uuid::now_v7(),
        actor: Uuid::now_v7(),
        action: DbAuditAction::Update,
        entity: "entry".into(),
        entity_id: Uuid::now_v7(),
        before: Some(json!({"amount": "10.00"})),
        after: Some(json!({"amount": "12.00"})),
        recorded_at: recorded_at.into(),
    };
    let (id, actor, entity_id) = (row.id, row.actor, row.entity_id);

    let record = to_record(row);
    assert_eq!(record.id.into_inner(), id);
    assert_eq!(record.actor.into_inner(), actor);
    assert_eq!(record.action, AuditAction::Update);
    assert_eq!(record.entity, "entry");
    assert_eq!(record.entity_id, entity_id);
    assert_eq!(record.before, Some(json!({"amount": "10.00"})));
    assert_eq!(record.after, Some(json!({"amount": "12.00"})));
    assert_eq!(record.recorded_at, recorded_at);
}

#[test]
fn test_action_mapping_round_trips() {
    for action in [AuditAction::Create, AuditAction::Update, AuditAction::Delete] {
        let db_action: DbAuditAction = action.into();
        assert_eq!(AuditAction::from(db_action), action);
    }
}
