//! Anomaly object records ("SCE objects").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::identity::generate_id;

/// Containment class. The serialized forms are the Russian display strings
/// used by the persisted slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectClass {
    #[serde(rename = "Безопасный")]
    Safe,
    #[serde(rename = "Евклид")]
    Euclid,
    #[serde(rename = "Кетер")]
    Keter,
    #[serde(rename = "Таумиэль")]
    Thaumiel,
    #[serde(rename = "Нейтрализованный")]
    Neutralized,
}

impl ObjectClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectClass::Safe => "Безопасный",
            ObjectClass::Euclid => "Евклид",
            ObjectClass::Keter => "Кетер",
            ObjectClass::Thaumiel => "Таумиэль",
            ObjectClass::Neutralized => "Нейтрализованный",
        }
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anomaly record as persisted in the `sce_objects` slot.
///
/// `author` is a snapshot of the creating administrator's username; it is
/// never rewritten afterwards. Timestamps are set by the repository only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyObject {
    pub id: String,
    pub number: String,
    pub name: String,
    pub class: ObjectClass,
    pub containment_procedures: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new anomaly record.
#[derive(Debug, Clone)]
pub struct NewAnomalyObject {
    pub number: String,
    pub name: String,
    pub class: ObjectClass,
    pub containment_procedures: String,
    pub description: String,
    pub additional_notes: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AnomalyObjectPatch {
    pub number: Option<String>,
    pub name: Option<String>,
    pub class: Option<ObjectClass>,
    pub containment_procedures: Option<String>,
    pub description: Option<String>,
    pub additional_notes: Option<String>,
}

impl AnomalyObject {
    /// Create a new record with a fresh identifier and equal timestamps.
    pub fn new(fields: NewAnomalyObject, author: &str) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            number: fields.number,
            name: fields.name,
            class: fields.class,
            containment_procedures: fields.containment_procedures,
            description: fields.description,
            additional_notes: fields.additional_notes,
            author: author.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge patch fields over the record and bump `updated_at`.
    /// `created_at` is never touched.
    pub fn apply_patch(&mut self, patch: AnomalyObjectPatch) {
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(class) = patch.class {
            self.class = class;
        }
        if let Some(procedures) = patch.containment_procedures {
            self.containment_procedures = procedures;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(notes) = patch.additional_notes {
            self.additional_notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }
}
