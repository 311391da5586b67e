use crate::catalog::Catalog;
use crate::entry::{Difficulty, ServiceEntry};

/// The five core services every fresh install starts with.
pub fn default_catalog() -> Catalog {
    [
        (
            "EC2",
            "Elastic compute service that provides resizable compute capacity in the cloud",
            "Compute",
            Difficulty::Easy,
            "Know instance types, pricing models, and auto scaling capabilities",
        ),
        (
            "S3",
            "Object storage service that offers industry-leading scalability, data availability, security, and performance",
            "Storage",
            Difficulty::Easy,
            "Understand storage classes, lifecycle policies, and bucket policies",
        ),
        (
            "LAMBDA",
            "Serverless compute service that lets you run code without provisioning or managing servers",
            "Compute",
            Difficulty::Medium,
            "Focus on triggers, execution context, and integration with other services",
        ),
        (
            "DYNAMODB",
            "Fully managed NoSQL database service that provides fast and predictable performance with seamless scalability",
            "Database",
            Difficulty::Medium,
            "Know about partition keys, sort keys, and read/write capacity units",
        ),
        (
            "RDS",
            "Managed relational database service that makes it easy to set up, operate, and scale a relational database",
            "Database",
            Difficulty::Medium,
            "Understand multi-AZ deployments, read replicas, and backup options",
        ),
    ]
    .into_iter()
    .map(|(name, description, category, difficulty, notes)| {
        (
            name.to_string(),
            ServiceEntry::new(description, category, difficulty, notes),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_core_services() {
        let c = default_catalog();
        assert_eq!(c.names(), vec!["DYNAMODB", "EC2", "LAMBDA", "RDS", "S3"]);
        assert_eq!(c.categories(), vec!["Compute", "Database", "Storage"]);
    }

    #[test]
    fn seed_entries_are_complete() {
        for (name, entry) in default_catalog().iter() {
            assert!(name.chars().all(char::is_alphanumeric), "{name}");
            assert!(!entry.description.is_empty(), "{name}");
            assert!(!entry.study_notes.is_empty(), "{name}");
        }
    }
}
