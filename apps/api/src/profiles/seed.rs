use std::collections::BTreeSet;

use uuid::Uuid;

use crate::models::profile::{NewProfile, Project, UserProfile};

struct Sample {
    name: &'static str,
    email: &'static str,
    skills: &'static [&'static str],
    availability: &'static str,
    bio: &'static str,
    project: Option<(&'static str, &'static [&'static str])>,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Alice Johnson",
        email: "alice.johnson@example.com",
        skills: &["Python", "Machine Learning", "Data Science"],
        availability: "Now",
        bio: "AI researcher with 5 years of experience",
        project: Some(("Sentiment Classifier", &["python", "tensorflow", "pandas"])),
    },
    Sample {
        name: "Bob Smith",
        email: "bob.smith@example.com",
        skills: &["JavaScript", "React", "UI/UX Design"],
        availability: "Later Today",
        bio: "Frontend developer passionate about creating beautiful interfaces",
        project: Some(("Portfolio Builder", &["react", "javascript", "css"])),
    },
    Sample {
        name: "Charlie Davis",
        email: "charlie.davis@example.com",
        skills: &["AI", "Design", "Project Management"],
        availability: "This Weekend",
        bio: "Product designer with AI expertise",
        project: None,
    },
    Sample {
        name: "Diana Miller",
        email: "diana.miller@example.com",
        skills: &["Node.js", "MongoDB", "AWS"],
        availability: "Next Week",
        bio: "Backend developer specialized in cloud architecture",
        project: Some(("Event Ingest Service", &["node.js", "mongodb", "aws"])),
    },
    Sample {
        name: "Ethan Wilson",
        email: "ethan.wilson@example.com",
        skills: &["Mobile Dev", "Flutter", "Firebase"],
        availability: "Now",
        bio: "Mobile app developer who loves creating cross-platform solutions",
        project: None,
    },
];

/// Sample teammates for a fresh in-memory store.
pub fn sample_profiles() -> Vec<UserProfile> {
    SAMPLES
        .iter()
        .map(|s| {
            let projects = s
                .project
                .map(|(name, technologies)| Project {
                    name: name.to_string(),
                    technologies: technologies.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
                    ..Default::default()
                })
                .into_iter()
                .collect();
            NewProfile {
                full_name: s.name.to_string(),
                email: s.email.to_string(),
                bio: s.bio.to_string(),
                availability: s.availability.to_string(),
                skills: s.skills.iter().map(|sk| sk.to_string()).collect(),
                projects,
                ..Default::default()
            }
            .into_profile(Uuid::new_v4())
        })
        .collect()
}
