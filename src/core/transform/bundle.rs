//! Bundle builder

use crate::domain::bundle::{Bundle, BundleEntry, BundleType};
use crate::domain::resource::{DiagnosticReport, Observation, Resource};

/// Wraps a report and its observations in a transaction bundle
///
/// The report is the first entry; observations follow in the given order.
/// Every entry is a `POST` to the collection named after its resource type.
pub fn build_transaction(report: DiagnosticReport, observations: Vec<Observation>) -> Bundle {
    let mut entries = Vec::with_capacity(observations.len() + 1);
    entries.push(BundleEntry::create(Resource::from(report)));
    entries.extend(
        observations
            .into_iter()
            .map(|o| BundleEntry::create(Resource::from(o))),
    );

    tracing::debug!(entries = entries.len(), "Built transaction bundle");
    Bundle::new(BundleType::Transaction, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bundle::HttpVerb;
    use crate::domain::ids::{PatientId, ResourceId};
    use crate::domain::resource::{
        CodeableConcept, Quantity, Reference, ResourceStatus, ResourceType,
    };

    fn observation(subject: &Reference) -> Observation {
        Observation {
            id: ResourceId::generate(),
            status: ResourceStatus::Final,
            code: CodeableConcept::single("http://loinc.org", "5678-9", "Sodium"),
            subject: subject.clone(),
            value_quantity: Quantity {
                value: 140.0,
                unit: "mmol/L".to_string(),
                system: "http://unitsofmeasure.org".to_string(),
                code: "mmol/L".to_string(),
            },
        }
    }

    fn report(subject: &Reference, observations: &[Observation]) -> DiagnosticReport {
        DiagnosticReport {
            id: ResourceId::generate(),
            status: ResourceStatus::Final,
            code: CodeableConcept::single("http://loinc.org", "1234-5", "Glucose"),
            subject: subject.clone(),
            effective_date_time: Some("2024-01-15".to_string()),
            issued: Some("2024-01-15T10:30:00Z".to_string()),
            result: observations
                .iter()
                .map(|o| Reference::to_resource(ResourceType::Observation, o.id))
                .collect(),
        }
    }

    #[test]
    fn test_report_first_then_observations() {
        let subject = Reference::patient(&PatientId::new("PAT123").unwrap());
        let observations = vec![observation(&subject), observation(&subject)];
        let ids: Vec<ResourceId> = observations.iter().map(|o| o.id).collect();
        let report = report(&subject, &observations);
        let report_id = report.id;

        let bundle = build_transaction(report, observations);

        assert_eq!(bundle.bundle_type(), BundleType::Transaction);
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.entries()[0].resource.id(), report_id);
        assert_eq!(bundle.entries()[1].resource.id(), ids[0]);
        assert_eq!(bundle.entries()[2].resource.id(), ids[1]);
        assert_eq!(bundle.entries_of(ResourceType::Observation).count(), 2);

        for entry in bundle.entries() {
            assert_eq!(entry.request.method, HttpVerb::Post);
            assert_eq!(entry.request.url, entry.resource.resource_type().as_str());
        }
    }

    #[test]
    fn test_bundle_json_shape() {
        let subject = Reference::patient(&PatientId::new("PAT123").unwrap());
        let observations = vec![observation(&subject)];
        let bundle = build_transaction(report(&subject, &observations), observations);

        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "transaction");
        assert_eq!(json["entry"][0]["resource"]["resourceType"], "DiagnosticReport");
        assert_eq!(json["entry"][0]["request"]["method"], "POST");
        assert_eq!(json["entry"][0]["request"]["url"], "DiagnosticReport");
        assert_eq!(json["entry"][1]["resource"]["resourceType"], "Observation");
        assert_eq!(json["entry"][1]["request"]["url"], "Observation");
    }

    #[test]
    fn test_report_without_observations() {
        let subject = Reference::patient(&PatientId::new("PAT123").unwrap());
        let bundle = build_transaction(report(&subject, &[]), vec![]);
        assert_eq!(bundle.len(), 1);
        assert!(!bundle.is_empty());
    }
}
