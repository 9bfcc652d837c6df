//! The five record shapes and their field constraints.
//!
//! CRM: [`Company`], [`Contact`], [`Deal`]. Work tracking: [`Project`], [`Task`].
//!
//! Identifier fields such as `company_id` or `project_id` are free text; they
//! are stored as given and never checked against another collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    document::{Entity, EntityKind},
    validate::{PayloadReader, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    /// Headcount band, e.g. `11-50`.
    pub size: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Company;
    const FIELDS: &'static [&'static str] =
        &["name", "website", "industry", "size", "phone", "address", "notes"];

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;
        let company = Company {
            name: reader.required_string("name"),
            website: reader.optional_string("website"),
            industry: reader.optional_string("industry"),
            size: reader.optional_string("size"),
            phone: reader.optional_string("phone"),
            address: reader.optional_string("address"),
            notes: reader.optional_string("notes"),
        };

        reader.finish(company)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub company_id: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;
    const FIELDS: &'static [&'static str] = &[
        "name", "email", "phone", "title", "company_id", "tags", "status", "notes",
    ];

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;
        let contact = Contact {
            name: reader.required_string("name"),
            email: reader.optional_string("email"),
            phone: reader.optional_string("phone"),
            title: reader.optional_string("title"),
            company_id: reader.optional_string("company_id"),
            tags: reader.string_list("tags"),
            status: reader.string_or("status", "active"),
            notes: reader.optional_string("notes"),
        };

        reader.finish(contact)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub title: String,
    /// Never negative.
    pub value: f64,
    /// Pipeline stage.
    pub stage: String,
    pub contact_id: Option<String>,
    pub company_id: Option<String>,
    /// Win probability in percent, `0..=100`.
    pub probability: Option<i64>,
    pub close_date: Option<NaiveDate>,
}

impl Entity for Deal {
    const KIND: EntityKind = EntityKind::Deal;
    const FIELDS: &'static [&'static str] = &[
        "title", "value", "stage", "contact_id", "company_id", "probability", "close_date",
    ];

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;
        let deal = Deal {
            title: reader.required_string("title"),
            value: reader.number_at_least("value", 0.0, 0.0),
            stage: reader.string_or("stage", "new"),
            contact_id: reader.optional_string("contact_id"),
            company_id: reader.optional_string("company_id"),
            probability: reader.optional_integer_between("probability", Some(50), 0, 100),
            close_date: reader.optional_date("close_date"),
        };

        reader.finish(deal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    /// Member user ids.
    pub members: Vec<String>,
    pub status: String,
    /// Completion in percent, `0..=100`.
    pub progress: i64,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;
    const FIELDS: &'static [&'static str] = &[
        "name", "description", "owner_id", "members", "status", "progress", "due_date", "tags",
    ];

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;
        let project = Project {
            name: reader.required_string("name"),
            description: reader.optional_string("description"),
            owner_id: reader.optional_string("owner_id"),
            members: reader.string_list("members"),
            status: reader.string_or("status", "active"),
            progress: reader.integer_between("progress", 0, 0, 100),
            due_date: reader.optional_date("due_date"),
            tags: reader.string_list("tags"),
        };

        reader.finish(project)
    }
}

/// A unit of work, optionally attached to a project.
///
/// `status` is conventionally one of `todo`, `in_progress`, `done`, and
/// `priority` one of `low`, `medium`, `high`, `urgent`. Neither is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<String>,
    pub project_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub labels: Vec<String>,
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;
    const FIELDS: &'static [&'static str] = &[
        "title", "description", "status", "priority", "assignee_id", "project_id", "due_date",
        "labels",
    ];

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;
        let task = Task {
            title: reader.required_string("title"),
            description: reader.optional_string("description"),
            status: reader.string_or("status", "todo"),
            priority: reader.string_or("priority", "medium"),
            assignee_id: reader.optional_string("assignee_id"),
            project_id: reader.optional_string("project_id"),
            due_date: reader.optional_date("due_date"),
            labels: reader.string_list("labels"),
        };

        reader.finish(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::DocumentExt, validate::Violation};
    use serde_json::json;

    fn deal_with(field: &str, value: Value) -> Result<Deal, ValidationError> {
        let mut payload = json!({ "title": "Expansion" });
        payload[field] = value;

        Deal::from_payload(&payload)
    }

    #[test]
    fn company_requires_a_name() {
        let err = Company::from_payload(&json!({ "website": "https://acme.test" })).unwrap_err();

        assert_eq!(err.field("name").unwrap().violation, Violation::Missing);
    }

    #[test]
    fn contact_defaults() {
        let contact = Contact::from_payload(&json!({ "name": "Ada" })).unwrap();

        assert_eq!(contact.status, "active");
        assert!(contact.tags.is_empty());
        assert_eq!(contact.email, None);
    }

    #[test]
    fn contact_tags_keep_their_order() {
        let contact =
            Contact::from_payload(&json!({ "name": "Ada", "tags": ["vip", "emea", "beta"] }))
                .unwrap();

        assert_eq!(contact.tags, vec!["vip", "emea", "beta"]);
    }

    #[test]
    fn deal_value_must_not_be_negative() {
        let err = deal_with("value", json!(-1)).unwrap_err();

        assert_eq!(err.field("value").unwrap().violation, Violation::OutOfRange);
        assert_eq!(deal_with("value", json!(0)).unwrap().value, 0.0);
    }

    #[test]
    fn deal_probability_bounds_are_inclusive() {
        for rejected in [-1, 101] {
            let err = deal_with("probability", json!(rejected)).unwrap_err();
            assert_eq!(err.field("probability").unwrap().violation, Violation::OutOfRange);
        }

        assert_eq!(deal_with("probability", json!(0)).unwrap().probability, Some(0));
        assert_eq!(deal_with("probability", json!(100)).unwrap().probability, Some(100));
    }

    #[test]
    fn deal_probability_too_large_for_i64_is_out_of_range() {
        for rejected in [json!(18446744073709551615_u64), json!(1e20)] {
            let err = deal_with("probability", rejected).unwrap_err();
            assert_eq!(err.field("probability").unwrap().violation, Violation::OutOfRange);
        }
    }

    #[test]
    fn deal_defaults() {
        let deal = Deal::from_payload(&json!({ "title": "Expansion" })).unwrap();

        assert_eq!(deal.value, 0.0);
        assert_eq!(deal.stage, "new");
        assert_eq!(deal.probability, Some(50));
    }

    #[test]
    fn project_progress_is_a_percentage() {
        for rejected in [-1, 101] {
            let err = Project::from_payload(&json!({ "name": "Website", "progress": rejected }))
                .unwrap_err();
            assert_eq!(err.field("progress").unwrap().violation, Violation::OutOfRange);
        }

        for accepted in [0, 100] {
            let project =
                Project::from_payload(&json!({ "name": "Website", "progress": accepted })).unwrap();
            assert_eq!(project.progress, accepted);
        }
    }

    #[test]
    fn task_status_and_priority_are_free_text() {
        let task = Task::from_payload(&json!({
            "title": "Triage inbox",
            "status": "blocked",
            "priority": "whenever",
        }))
        .unwrap();

        assert_eq!(task.status, "blocked");
        assert_eq!(task.priority, "whenever");
    }

    #[test]
    fn task_wrong_types_are_reported_per_field() {
        let err = Task::from_payload(&json!({
            "title": 42,
            "labels": "urgent",
            "due_date": "tomorrow",
        }))
        .unwrap_err();

        assert_eq!(err.errors().len(), 3);
        assert!(err.errors().iter().all(|e| e.violation == Violation::WrongType));
    }

    #[test]
    fn dates_serialize_as_plain_strings() {
        let task = Task::from_payload(&json!({ "title": "Ship", "due_date": "2025-01-31" })).unwrap();
        let document = task.to_document().unwrap();

        assert_eq!(document.get_str("due_date").unwrap(), "2025-01-31");
        assert_eq!(document.get_str("status").unwrap(), "todo");
    }

    #[test]
    fn declared_fields_match_serialized_fields() {
        let task = Task::from_payload(&json!({ "title": "Ship" })).unwrap();
        let document = task.to_document().unwrap();
        let keys = document.keys().map(String::as_str).collect::<Vec<_>>();

        assert_eq!(keys, Task::FIELDS);
    }
}
