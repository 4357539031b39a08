use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use url::Url;

use shot_core::model::{
    Plan, PlanError, PlanId, Session, SessionError, SessionId, SessionStatus, ShotDefinition,
    ShotRecord, ShotRecordError, ShotSlot,
};

/// Errors raised when a wire record fails domain validation.
///
/// These indicate corruption upstream of the engine; callers may skip and
/// log the offending record instead of failing the whole snapshot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("invalid shot slot key {raw:?}")]
    InvalidShotSlot { raw: String },

    #[error("shot slot {slot}: {source}")]
    InvalidShot {
        slot: u32,
        source: ShotRecordError,
    },

    #[error("invalid tutorial url {raw:?}")]
    InvalidTutorialUrl { raw: String },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Wire shape of one shot entry inside `shots_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotRecordDto {
    pub attempts: u32,
    pub goals: u32,
    #[serde(default)]
    pub shot_type: Option<String>,
}

/// Wire shape of a session as served by `GET /api/sessions`.
///
/// `session_id` is the externally generated token the collaborator uses for
/// rename/delete correlation; `id` is the stable numeric identity.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub id: u64,
    pub session_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: SessionStatus,
    #[serde(default)]
    pub plan_id: Option<u64>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub total_attempts: u32,
    pub total_goals: u32,
    #[serde(default)]
    pub shots_data: HashMap<String, ShotRecordDto>,
}

impl SessionRecord {
    /// Convert the record into a validated domain `Session`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` for non-numeric or zero slot keys and for any
    /// count pair with goals exceeding attempts.
    pub fn into_session(self) -> Result<Session, RecordError> {
        let mut shots = BTreeMap::new();
        for (raw, dto) in self.shots_data {
            let slot: u32 = raw
                .parse()
                .map_err(|_| RecordError::InvalidShotSlot { raw: raw.clone() })?;
            if slot == 0 {
                return Err(RecordError::InvalidShotSlot { raw });
            }
            let record = ShotRecord::new(dto.attempts, dto.goals, dto.shot_type)
                .map_err(|source| RecordError::InvalidShot { slot, source })?;
            shots.insert(ShotSlot::new(slot), record);
        }

        let session = Session::new(
            SessionId::new(self.id),
            self.session_id,
            self.name,
            self.status,
            self.plan_id.map(PlanId::new),
            self.start_time,
            self.duration_minutes,
            self.total_attempts,
            self.total_goals,
            shots,
        )?;
        Ok(session)
    }
}

/// Wire shape of one shot definition inside a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotDefRecord {
    pub name: String,
    #[serde(default)]
    pub tutorial_url: Option<String>,
}

/// Wire shape of a plan as served by `GET /api/plans`.
///
/// Older server versions serve plain `shot_names`; newer ones serve `shots`
/// objects with tutorial links. Both are accepted, `shots` winning.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shots: Option<Vec<ShotDefRecord>>,
    #[serde(default)]
    pub shot_names: Option<Vec<String>>,
    #[serde(default)]
    pub is_preset: bool,
    pub created_at: DateTime<Utc>,
}

impl PlanRecord {
    /// Convert the record into a validated domain `Plan`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` for malformed tutorial URLs or plan validation
    /// failures (blank name, no shots).
    pub fn into_plan(self) -> Result<Plan, RecordError> {
        let definitions = match (self.shots, self.shot_names) {
            (Some(shots), _) => shots
                .into_iter()
                .map(|shot| {
                    let tutorial = shot
                        .tutorial_url
                        .map(|raw| {
                            Url::parse(&raw)
                                .map_err(|_| RecordError::InvalidTutorialUrl { raw })
                        })
                        .transpose()?;
                    ShotDefinition::new(shot.name, tutorial).map_err(RecordError::from)
                })
                .collect::<Result<Vec<_>, _>>()?,
            (None, Some(names)) => names
                .into_iter()
                .map(|name| ShotDefinition::new(name, None).map_err(RecordError::from))
                .collect::<Result<Vec<_>, _>>()?,
            (None, None) => return Err(RecordError::Plan(PlanError::NoShots)),
        };

        let plan = Plan::new(
            PlanId::new(self.id),
            self.name,
            self.description,
            definitions,
            self.is_preset,
            self.created_at,
        )?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_json() -> &'static str {
        r#"{
            "id": 1,
            "session_id": "abc-123",
            "name": "Evening drills",
            "status": "completed",
            "plan_id": 4,
            "start_time": "2024-01-01T18:30:00Z",
            "duration_minutes": 20,
            "total_attempts": 10,
            "total_goals": 5,
            "shots_data": {
                "1": { "attempts": 4, "goals": 2, "shot_type": "wrist" },
                "2": { "attempts": 0, "goals": 0 }
            }
        }"#
    }

    #[test]
    fn session_record_maps_to_domain() {
        let record: SessionRecord = serde_json::from_str(session_json()).unwrap();
        let session = record.into_session().unwrap();

        assert_eq!(session.id(), SessionId::new(1));
        assert_eq!(session.token(), "abc-123");
        assert_eq!(session.plan_id(), Some(PlanId::new(4)));
        assert_eq!(session.total_attempts(), 10);
        assert_eq!(session.shots().len(), 2);
        let first = &session.shots()[&ShotSlot::new(1)];
        assert_eq!(first.label(), Some("wrist"));
        assert_eq!(first.accuracy(), 50.0);
    }

    #[test]
    fn rejects_non_numeric_slot_key() {
        let json = r#"{
            "id": 1, "session_id": "t", "status": "active",
            "start_time": "2024-01-01T00:00:00Z",
            "total_attempts": 0, "total_goals": 0,
            "shots_data": { "first": { "attempts": 1, "goals": 0 } }
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.into_session(),
            Err(RecordError::InvalidShotSlot { .. })
        ));
    }

    #[test]
    fn rejects_zero_slot_key() {
        let json = r#"{
            "id": 1, "session_id": "t", "status": "active",
            "start_time": "2024-01-01T00:00:00Z",
            "total_attempts": 0, "total_goals": 0,
            "shots_data": { "0": { "attempts": 1, "goals": 0 } }
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.into_session(),
            Err(RecordError::InvalidShotSlot { .. })
        ));
    }

    #[test]
    fn rejects_shot_goals_over_attempts() {
        let json = r#"{
            "id": 1, "session_id": "t", "status": "active",
            "start_time": "2024-01-01T00:00:00Z",
            "total_attempts": 5, "total_goals": 2,
            "shots_data": { "3": { "attempts": 1, "goals": 2 } }
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.into_session(),
            Err(RecordError::InvalidShot { slot: 3, .. })
        ));
    }

    #[test]
    fn rejects_session_goals_over_attempts() {
        let json = r#"{
            "id": 1, "session_id": "t", "status": "active",
            "start_time": "2024-01-01T00:00:00Z",
            "total_attempts": 2, "total_goals": 5
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record.into_session(), Err(RecordError::Session(_))));
    }

    #[test]
    fn plan_record_with_shot_objects() {
        let json = r#"{
            "id": 7,
            "name": "Five shot drill",
            "description": "Daily warmup",
            "shots": [
                { "name": "Wrist", "tutorial_url": "https://example.com/wrist" },
                { "name": "Slap" }
            ],
            "is_preset": true,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let record: PlanRecord = serde_json::from_str(json).unwrap();
        let plan = record.into_plan().unwrap();

        assert_eq!(plan.id(), PlanId::new(7));
        assert!(plan.is_preset());
        assert_eq!(plan.shots().len(), 2);
        assert!(plan.shots()[0].tutorial().is_some());
        assert!(plan.shots()[1].tutorial().is_none());
    }

    #[test]
    fn plan_record_with_legacy_shot_names() {
        let json = r#"{
            "id": 8,
            "name": "Custom",
            "shot_names": ["One", "Two"],
            "created_at": "2024-02-01T00:00:00Z"
        }"#;
        let record: PlanRecord = serde_json::from_str(json).unwrap();
        let plan = record.into_plan().unwrap();

        assert!(!plan.is_preset());
        assert_eq!(plan.shots().len(), 2);
        assert_eq!(plan.shots()[0].name(), "One");
    }

    #[test]
    fn plan_record_without_shots_is_invalid() {
        let json = r#"{
            "id": 9,
            "name": "Empty",
            "created_at": "2024-02-01T00:00:00Z"
        }"#;
        let record: PlanRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.into_plan(),
            Err(RecordError::Plan(PlanError::NoShots))
        ));
    }
}
